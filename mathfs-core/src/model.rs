//! Numeric model - two registers and the values derived from them.
//!
//! Both registers sit behind one lock so a derived value is always computed
//! from a consistent pair, never from one old and one new register.

use parking_lot::RwLock;

/// Initial value of both registers.
pub const DEFAULT_REGISTER_VALUE: i64 = 1;

/// Writable integer cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Register {
    A,
    B,
}

/// Read-only value computed from the registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Derived {
    /// `a + b`
    Sum,
    /// `a * b`
    Mul,
}

impl Derived {
    /// Evaluate against a register pair. Overflow wraps.
    pub fn compute(self, a: i64, b: i64) -> i64 {
        match self {
            Derived::Sum => a.wrapping_add(b),
            Derived::Mul => a.wrapping_mul(b),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Registers {
    a: i64,
    b: i64,
}

/// Shared register store.
///
/// Handlers hold it by shared reference (usually through an `Arc`); every
/// accessor takes the lock once, so each call observes a single snapshot.
#[derive(Debug)]
pub struct NumericModel {
    registers: RwLock<Registers>,
}

impl Default for NumericModel {
    fn default() -> Self {
        Self::new()
    }
}

impl NumericModel {
    /// Create a model with both registers at [`DEFAULT_REGISTER_VALUE`].
    pub fn new() -> Self {
        Self::with_values(DEFAULT_REGISTER_VALUE, DEFAULT_REGISTER_VALUE)
    }

    /// Create a model with explicit starting values.
    pub fn with_values(a: i64, b: i64) -> Self {
        Self {
            registers: RwLock::new(Registers { a, b }),
        }
    }

    pub fn get_register(&self, register: Register) -> i64 {
        let regs = self.registers.read();
        match register {
            Register::A => regs.a,
            Register::B => regs.b,
        }
    }

    /// Overwrite a register. Visible to every later read, derived ones included.
    pub fn set_register(&self, register: Register, value: i64) {
        let mut regs = self.registers.write();
        match register {
            Register::A => regs.a = value,
            Register::B => regs.b = value,
        }
    }

    /// Compute a derived value from the current registers.
    pub fn get_derived(&self, kind: Derived) -> i64 {
        let regs = *self.registers.read();
        kind.compute(regs.a, regs.b)
    }

    /// Both registers as one consistent pair `(a, b)`.
    pub fn snapshot(&self) -> (i64, i64) {
        let regs = *self.registers.read();
        (regs.a, regs.b)
    }
}
