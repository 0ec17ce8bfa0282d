//! Arithmetic virtual filesystem core
//!
//! This crate exposes two integer registers and two values derived from them
//! as a flat directory of text files:
//! - `a.txt`, `b.txt`: writable registers
//! - `sum.txt`: read-only `a + b`
//! - `mul.txt`: read-only `a * b`
//!
//! # Architecture
//!
//! The filesystem uses a layered design:
//! - `NumericModel`: the register store, guarded by a single lock
//! - `codec`: integer <-> decimal text conversion
//! - `FsDriver` trait: path-based filesystem operation contract
//! - `MathFs`: the driver implementation over a shared `NumericModel`
//! - `fuse` (feature `fuse`): kernel FUSE adapter around any `FsDriver`

pub mod codec;
pub mod config;
pub mod error;
pub mod fs;
pub mod model;

#[cfg(feature = "fuse")]
pub mod fuse;

pub use codec::{decode_decimal, digit_count, encode_decimal};
pub use config::MountConfig;
pub use error::{MathFsError, MathFsResult};
pub use fs::{FileAttributes, FileKind, FsDriver, MathFs, Node};
pub use model::{Derived, NumericModel, Register};

#[cfg(feature = "fuse")]
pub use fuse::{spawn_mount, MathFuse};
