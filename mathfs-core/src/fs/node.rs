//! Path classification for the fixed directory.

use crate::model::{Derived, Register};

/// Inode of the root directory.
pub const ROOT_INO: u64 = 1;

/// Every node the filesystem knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Node {
    Root,
    Register(Register),
    Derived(Derived),
}

impl Node {
    /// Files in listing order.
    pub const FILES: [Node; 4] = [
        Node::Register(Register::A),
        Node::Register(Register::B),
        Node::Derived(Derived::Sum),
        Node::Derived(Derived::Mul),
    ];

    /// Resolve an absolute path. Anything outside the five known paths is `None`.
    ///
    /// # Examples
    /// ```
    /// use mathfs_core::{Node, Register};
    /// assert_eq!(Node::classify("/"), Some(Node::Root));
    /// assert_eq!(Node::classify("/a.txt"), Some(Node::Register(Register::A)));
    /// assert_eq!(Node::classify("/nope"), None);
    /// ```
    pub fn classify(path: &str) -> Option<Node> {
        match path {
            "/" => Some(Node::Root),
            "/a.txt" => Some(Node::Register(Register::A)),
            "/b.txt" => Some(Node::Register(Register::B)),
            "/sum.txt" => Some(Node::Derived(Derived::Sum)),
            "/mul.txt" => Some(Node::Derived(Derived::Mul)),
            _ => None,
        }
    }

    /// Base name as it appears in the directory listing.
    pub fn name(self) -> &'static str {
        match self {
            Node::Root => "/",
            Node::Register(Register::A) => "a.txt",
            Node::Register(Register::B) => "b.txt",
            Node::Derived(Derived::Sum) => "sum.txt",
            Node::Derived(Derived::Mul) => "mul.txt",
        }
    }

    /// Fixed inode number.
    pub fn ino(self) -> u64 {
        match self {
            Node::Root => ROOT_INO,
            Node::Register(Register::A) => 2,
            Node::Register(Register::B) => 3,
            Node::Derived(Derived::Sum) => 4,
            Node::Derived(Derived::Mul) => 5,
        }
    }

    pub fn from_ino(ino: u64) -> Option<Node> {
        match ino {
            ROOT_INO => Some(Node::Root),
            _ => Node::FILES.into_iter().find(|node| node.ino() == ino),
        }
    }

    /// Absolute path of this node.
    pub fn path(self) -> String {
        match self {
            Node::Root => "/".to_string(),
            _ => format!("/{}", self.name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_known_paths() {
        assert_eq!(Node::classify("/"), Some(Node::Root));
        assert_eq!(Node::classify("/b.txt"), Some(Node::Register(Register::B)));
        assert_eq!(Node::classify("/sum.txt"), Some(Node::Derived(Derived::Sum)));
        assert_eq!(Node::classify("/mul.txt"), Some(Node::Derived(Derived::Mul)));
    }

    #[test]
    fn test_classify_rejects_near_misses() {
        assert_eq!(Node::classify(""), None);
        assert_eq!(Node::classify("a.txt"), None);
        assert_eq!(Node::classify("/A.TXT"), None);
        assert_eq!(Node::classify("/a.txt/"), None);
        assert_eq!(Node::classify("//a.txt"), None);
        assert_eq!(Node::classify("/dir/a.txt"), None);
    }

    #[test]
    fn test_path_round_trip() {
        for node in Node::FILES.into_iter().chain([Node::Root]) {
            assert_eq!(Node::classify(&node.path()), Some(node));
        }
    }

    #[test]
    fn test_ino_round_trip() {
        for node in Node::FILES.into_iter().chain([Node::Root]) {
            assert_eq!(Node::from_ino(node.ino()), Some(node));
        }
        assert_eq!(Node::from_ino(0), None);
        assert_eq!(Node::from_ino(6), None);
    }
}
