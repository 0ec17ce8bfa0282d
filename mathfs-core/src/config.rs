//! Mount configuration.

/// How the filesystem is presented to the kernel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountConfig {
    /// Name shown as the mount source (e.g. in `mount` output)
    pub fsname: String,
    /// Let users other than the mounting one access the filesystem
    pub allow_other: bool,
    /// Unmount automatically when the process exits
    pub auto_unmount: bool,
    /// Bypass the kernel page cache on opened files
    pub direct_io: bool,
}

impl Default for MountConfig {
    fn default() -> Self {
        Self {
            fsname: "mathfs".to_string(),
            allow_other: false,
            auto_unmount: false,
            direct_io: true,
        }
    }
}
