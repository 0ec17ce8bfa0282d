//! Driver over the shared numeric model.

use std::sync::Arc;

use tracing::{debug, trace};

use super::driver::{FileAttributes, FileKind, FsDriver};
use super::node::Node;
use crate::codec::{decode_decimal, digit_count, encode_decimal};
use crate::error::{MathFsError, MathFsResult};
use crate::model::NumericModel;

/// Permission bits reported for every node.
const PERMISSIONS: u16 = 0o777;

/// Filesystem exposing `a.txt`, `b.txt`, `sum.txt` and `mul.txt`.
///
/// Clone is cheap and clones share the same registers.
#[derive(Debug, Clone, Default)]
pub struct MathFs {
    model: Arc<NumericModel>,
}

impl MathFs {
    pub fn new(model: Arc<NumericModel>) -> Self {
        Self { model }
    }

    /// The register store behind this filesystem.
    pub fn model(&self) -> &Arc<NumericModel> {
        &self.model
    }

    /// Resolve a path to a file node. The root is not a file.
    fn resolve_file(path: &str) -> MathFsResult<Node> {
        match Node::classify(path) {
            Some(Node::Root) | None => Err(MathFsError::NotFound(path.to_string())),
            Some(node) => Ok(node),
        }
    }

    /// Current integer behind a file path. The root has no value.
    fn file_value(&self, path: &str) -> MathFsResult<i64> {
        match Node::classify(path) {
            Some(Node::Register(register)) => Ok(self.model.get_register(register)),
            Some(Node::Derived(kind)) => Ok(self.model.get_derived(kind)),
            Some(Node::Root) | None => Err(MathFsError::NotFound(path.to_string())),
        }
    }
}

impl FsDriver for MathFs {
    fn attributes(&self, path: &str) -> MathFsResult<FileAttributes> {
        let attrs = match Node::classify(path) {
            Some(Node::Root) => FileAttributes {
                kind: FileKind::Directory,
                perm: PERMISSIONS,
                nlink: 2,
                size: 0,
            },
            _ => FileAttributes {
                kind: FileKind::RegularFile,
                perm: PERMISSIONS,
                nlink: 1,
                size: digit_count(self.file_value(path)?) as u64,
            },
        };
        trace!(path, size = attrs.size, "attributes");
        Ok(attrs)
    }

    fn list_directory(&self, path: &str) -> MathFsResult<Vec<String>> {
        if Node::classify(path) != Some(Node::Root) {
            return Err(MathFsError::NotFound(path.to_string()));
        }
        trace!(path, "list");

        let mut entries = vec![".".to_string(), "..".to_string()];
        entries.extend(Node::FILES.iter().map(|node| node.name().to_string()));
        Ok(entries)
    }

    fn open(&self, path: &str) -> MathFsResult<()> {
        Self::resolve_file(path)?;
        debug!(path, "open");
        Ok(())
    }

    fn read(&self, path: &str, size: usize, offset: u64) -> MathFsResult<Vec<u8>> {
        let text = encode_decimal(self.file_value(path)?);

        let start = match usize::try_from(offset) {
            Ok(start) if start < text.len() => start,
            _ => {
                trace!(path, offset, "read past end");
                return Ok(Vec::new());
            }
        };
        let end = start.saturating_add(size).min(text.len());
        trace!(path, offset, size, returned = end - start, "read");
        Ok(text[start..end].to_vec())
    }

    fn write(&self, path: &str, data: &[u8], offset: u64) -> MathFsResult<usize> {
        match Self::resolve_file(path)? {
            Node::Register(register) => {
                // Registers are scalars: every write replaces the whole value.
                let value = decode_decimal(data);
                self.model.set_register(register, value);
                debug!(path, offset, len = data.len(), value, "write");
                Ok(data.len())
            }
            _ => {
                debug!(path, "write rejected on derived file");
                Err(MathFsError::PermissionDenied(path.to_string()))
            }
        }
    }

    fn truncate(&self, path: &str, size: u64) -> MathFsResult<()> {
        // Content length always follows the current value; nothing to apply.
        Self::resolve_file(path)?;
        debug!(path, size, "truncate ignored");
        Ok(())
    }
}
