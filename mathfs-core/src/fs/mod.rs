//! Filesystem layer for the arithmetic model.
//!
//! - `Node`: classification of the fixed path set
//! - `FsDriver`: path-based operation contract the host runtime calls
//! - `MathFs`: driver over a shared `NumericModel`

mod driver;
mod math_fs;
mod node;

pub use driver::{FileAttributes, FileKind, FsDriver};
pub use math_fs::MathFs;
pub use node::Node;
