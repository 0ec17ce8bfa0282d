//! Kernel FUSE adapter.
//!
//! The kernel speaks in inodes; `FsDriver` speaks in paths. The directory is
//! fixed, so every inode maps to exactly one `Node` and back.

use std::ffi::OsStr;
use std::io;
use std::path::Path;
use std::time::{Duration, SystemTime};

use fuser::consts::FOPEN_DIRECT_IO;
use fuser::{
    BackgroundSession, FileAttr, FileType, Filesystem, MountOption, ReplyAttr, ReplyData,
    ReplyDirectory, ReplyEntry, ReplyOpen, ReplyWrite, Request, TimeOrNow,
};
use tracing::{debug, info, warn};

use crate::config::MountConfig;
use crate::fs::{FileAttributes, FileKind, FsDriver, Node};

/// Attribute/entry cache lifetime. Zero, since a write to `a.txt` changes
/// the size of `sum.txt` without the kernel seeing it.
const TTL: Duration = Duration::ZERO;

const BLOCK_SIZE: u32 = 512;

/// `fuser::Filesystem` implementation over any `FsDriver`.
pub struct MathFuse<D: FsDriver> {
    driver: D,
    direct_io: bool,
    mounted_at: SystemTime,
}

impl<D: FsDriver> MathFuse<D> {
    pub fn new(driver: D, config: &MountConfig) -> Self {
        Self {
            driver,
            direct_io: config.direct_io,
            mounted_at: SystemTime::now(),
        }
    }

    /// Get the wrapped driver.
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Attributes for a node, in kernel form.
    fn node_attr(&self, node: Node, req: &Request<'_>) -> Result<FileAttr, i32> {
        let attrs = self
            .driver
            .attributes(&node.path())
            .map_err(|e| e.errno())?;
        Ok(file_attr(node.ino(), &attrs, self.mounted_at, req.uid(), req.gid()))
    }
}

/// Translate driver attributes into a `FileAttr`.
fn file_attr(ino: u64, attrs: &FileAttributes, stamp: SystemTime, uid: u32, gid: u32) -> FileAttr {
    FileAttr {
        ino,
        size: attrs.size,
        blocks: attrs.size.div_ceil(u64::from(BLOCK_SIZE)),
        atime: stamp,
        mtime: stamp,
        ctime: stamp,
        crtime: stamp,
        kind: file_type(attrs.kind),
        perm: attrs.perm,
        nlink: attrs.nlink,
        uid,
        gid,
        rdev: 0,
        blksize: BLOCK_SIZE,
        flags: 0,
    }
}

fn file_type(kind: FileKind) -> FileType {
    match kind {
        FileKind::Directory => FileType::Directory,
        FileKind::RegularFile => FileType::RegularFile,
    }
}

/// Inode and type for a name from the root listing.
fn dir_entry(name: &str) -> Option<(u64, FileType)> {
    match name {
        "." | ".." => Some((Node::Root.ino(), FileType::Directory)),
        _ => match Node::classify(&format!("/{}", name))? {
            Node::Root => None,
            node => Some((node.ino(), FileType::RegularFile)),
        },
    }
}

/// Mount options derived from the configuration.
pub fn mount_options(config: &MountConfig) -> Vec<MountOption> {
    let mut options = vec![MountOption::FSName(config.fsname.clone())];
    if config.allow_other {
        options.push(MountOption::AllowOther);
    }
    if config.auto_unmount {
        options.push(MountOption::AutoUnmount);
    }
    options
}

impl<D: FsDriver> Filesystem for MathFuse<D> {
    fn lookup(&mut self, req: &Request<'_>, parent: u64, name: &OsStr, reply: ReplyEntry) {
        if Node::from_ino(parent) != Some(Node::Root) {
            reply.error(libc::ENOENT);
            return;
        }
        let node = name
            .to_str()
            .and_then(|name| Node::classify(&format!("/{}", name)));
        match node {
            Some(node) if node != Node::Root => match self.node_attr(node, req) {
                Ok(attr) => reply.entry(&TTL, &attr, 0),
                Err(errno) => reply.error(errno),
            },
            _ => reply.error(libc::ENOENT),
        }
    }

    fn getattr(&mut self, req: &Request<'_>, ino: u64, _fh: Option<u64>, reply: ReplyAttr) {
        let Some(node) = Node::from_ino(ino) else {
            reply.error(libc::ENOENT);
            return;
        };
        match self.node_attr(node, req) {
            Ok(attr) => reply.attr(&TTL, &attr),
            Err(errno) => reply.error(errno),
        }
    }

    fn setattr(
        &mut self,
        req: &Request<'_>,
        ino: u64,
        _mode: Option<u32>,
        _uid: Option<u32>,
        _gid: Option<u32>,
        size: Option<u64>,
        _atime: Option<TimeOrNow>,
        _mtime: Option<TimeOrNow>,
        _ctime: Option<SystemTime>,
        _fh: Option<u64>,
        _crtime: Option<SystemTime>,
        _chgtime: Option<SystemTime>,
        _bkuptime: Option<SystemTime>,
        _flags: Option<u32>,
        reply: ReplyAttr,
    ) {
        let Some(node) = Node::from_ino(ino) else {
            reply.error(libc::ENOENT);
            return;
        };
        if let Some(size) = size {
            if let Err(e) = self.driver.truncate(&node.path(), size) {
                reply.error(e.errno());
                return;
            }
        }
        match self.node_attr(node, req) {
            Ok(attr) => reply.attr(&TTL, &attr),
            Err(errno) => reply.error(errno),
        }
    }

    fn readdir(
        &mut self,
        _req: &Request<'_>,
        ino: u64,
        _fh: u64,
        offset: i64,
        mut reply: ReplyDirectory,
    ) {
        let Some(node) = Node::from_ino(ino) else {
            reply.error(libc::ENOENT);
            return;
        };
        let entries = match self.driver.list_directory(&node.path()) {
            Ok(entries) => entries,
            Err(e) => {
                reply.error(e.errno());
                return;
            }
        };

        let skip = usize::try_from(offset).unwrap_or(0);
        for (i, name) in entries.iter().enumerate().skip(skip) {
            let Some((entry_ino, kind)) = dir_entry(name) else {
                warn!(name = %name, "listing entry without inode");
                continue;
            };
            // Offset of the *next* entry; true means the buffer is full.
            if reply.add(entry_ino, (i + 1) as i64, kind, name) {
                break;
            }
        }
        reply.ok();
    }

    fn open(&mut self, _req: &Request<'_>, ino: u64, _flags: i32, reply: ReplyOpen) {
        let Some(node) = Node::from_ino(ino) else {
            reply.error(libc::ENOENT);
            return;
        };
        match self.driver.open(&node.path()) {
            Ok(()) => {
                let flags = if self.direct_io { FOPEN_DIRECT_IO } else { 0 };
                reply.opened(0, flags);
            }
            Err(e) => reply.error(e.errno()),
        }
    }

    fn read(
        &mut self,
        _req: &Request<'_>,
        ino: u64,
        _fh: u64,
        offset: i64,
        size: u32,
        _flags: i32,
        _lock_owner: Option<u64>,
        reply: ReplyData,
    ) {
        let Some(node) = Node::from_ino(ino) else {
            reply.error(libc::ENOENT);
            return;
        };
        let Ok(offset) = u64::try_from(offset) else {
            reply.error(libc::EINVAL);
            return;
        };
        match self.driver.read(&node.path(), size as usize, offset) {
            Ok(data) => reply.data(&data),
            Err(e) => reply.error(e.errno()),
        }
    }

    fn write(
        &mut self,
        _req: &Request<'_>,
        ino: u64,
        _fh: u64,
        offset: i64,
        data: &[u8],
        _write_flags: u32,
        _flags: i32,
        _lock_owner: Option<u64>,
        reply: ReplyWrite,
    ) {
        let Some(node) = Node::from_ino(ino) else {
            reply.error(libc::ENOENT);
            return;
        };
        let Ok(offset) = u64::try_from(offset) else {
            reply.error(libc::EINVAL);
            return;
        };
        match self.driver.write(&node.path(), data, offset) {
            Ok(written) => reply.written(u32::try_from(written).unwrap_or(u32::MAX)),
            Err(e) => reply.error(e.errno()),
        }
    }

    fn destroy(&mut self) {
        debug!("filesystem session destroyed");
    }
}

/// Mount on a background thread. Dropping the session unmounts.
pub fn spawn_mount<D>(
    driver: D,
    mountpoint: impl AsRef<Path>,
    config: &MountConfig,
) -> io::Result<BackgroundSession>
where
    D: FsDriver + 'static,
{
    let mountpoint = mountpoint.as_ref();
    info!(mountpoint = %mountpoint.display(), "mounting in background");
    fuser::spawn_mount2(
        MathFuse::new(driver, config),
        mountpoint,
        &mount_options(config),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::MathFs;

    #[test]
    fn test_file_attr_regular() {
        let attrs = FileAttributes {
            kind: FileKind::RegularFile,
            perm: 0o777,
            nlink: 1,
            size: 3,
        };
        let stamp = SystemTime::UNIX_EPOCH;
        let attr = file_attr(4, &attrs, stamp, 1000, 100);

        assert_eq!(attr.ino, 4);
        assert_eq!(attr.size, 3);
        assert_eq!(attr.blocks, 1);
        assert_eq!(attr.kind, FileType::RegularFile);
        assert_eq!(attr.perm, 0o777);
        assert_eq!(attr.nlink, 1);
        assert_eq!(attr.uid, 1000);
        assert_eq!(attr.gid, 100);
        assert_eq!(attr.mtime, stamp);
    }

    #[test]
    fn test_file_attr_directory() {
        let fs = MathFs::default();
        let attrs = fs.attributes("/").unwrap();
        let attr = file_attr(1, &attrs, SystemTime::UNIX_EPOCH, 0, 0);

        assert_eq!(attr.kind, FileType::Directory);
        assert_eq!(attr.nlink, 2);
        assert_eq!(attr.blocks, 0);
    }

    #[test]
    fn test_dir_entry_mapping() {
        assert_eq!(dir_entry("."), Some((1, FileType::Directory)));
        assert_eq!(dir_entry(".."), Some((1, FileType::Directory)));
        assert_eq!(dir_entry("a.txt"), Some((2, FileType::RegularFile)));
        assert_eq!(dir_entry("mul.txt"), Some((5, FileType::RegularFile)));
        assert_eq!(dir_entry("nope"), None);
        assert_eq!(dir_entry(""), None);
    }

    #[test]
    fn test_every_listed_name_has_inode() {
        let fs = MathFs::default();
        for name in fs.list_directory("/").unwrap() {
            assert!(dir_entry(&name).is_some(), "no inode for {}", name);
        }
    }

    #[test]
    fn test_mount_options() {
        let config = MountConfig::default();
        assert_eq!(
            mount_options(&config),
            vec![MountOption::FSName("mathfs".to_string())]
        );

        let config = MountConfig {
            allow_other: true,
            auto_unmount: true,
            ..MountConfig::default()
        };
        let options = mount_options(&config);
        assert!(options.contains(&MountOption::AllowOther));
        assert!(options.contains(&MountOption::AutoUnmount));
    }

    #[test]
    fn test_new_takes_direct_io_from_config() {
        let config = MountConfig {
            direct_io: false,
            ..MountConfig::default()
        };
        let fuse = MathFuse::new(MathFs::default(), &config);
        assert!(!fuse.direct_io);
        assert_eq!(fuse.driver().read("/a.txt", 4, 0).unwrap(), b"1");
    }
}
