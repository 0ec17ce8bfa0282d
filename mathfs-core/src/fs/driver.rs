//! FsDriver trait - the operation contract consumed by the host runtime.

use crate::error::MathFsResult;

/// Entry type reported by `attributes`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Directory,
    RegularFile,
}

/// Attributes of a node, computed fresh on every query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileAttributes {
    pub kind: FileKind,
    /// Permission bits (e.g. `0o777`)
    pub perm: u16,
    pub nlink: u32,
    /// Content length in bytes
    pub size: u64,
}

impl FileAttributes {
    pub fn is_dir(&self) -> bool {
        self.kind == FileKind::Directory
    }
}

/// Path-based filesystem operations.
///
/// Paths are absolute (`/a.txt`). Every operation is synchronous and atomic
/// with respect to the state it reads or writes.
pub trait FsDriver: Send + Sync {
    /// Look up attributes of a path.
    fn attributes(&self, path: &str) -> MathFsResult<FileAttributes>;

    /// List entry names of a directory, `.` and `..` included.
    fn list_directory(&self, path: &str) -> MathFsResult<Vec<String>>;

    /// Check that a file can be opened. Access mode is not enforced here.
    fn open(&self, path: &str) -> MathFsResult<()>;

    /// Read up to `size` bytes starting at `offset`. Empty at end of file.
    fn read(&self, path: &str, size: usize, offset: u64) -> MathFsResult<Vec<u8>>;

    /// Write `data`, returning the number of bytes accepted.
    fn write(&self, path: &str, data: &[u8], offset: u64) -> MathFsResult<usize>;

    /// Set the length of a file.
    fn truncate(&self, path: &str, size: u64) -> MathFsResult<()>;
}
