use std::collections::BTreeMap;

use crate::filesystem::content::FileContent;

/// Index of a directory in the tree's arena. Parent links are held as ids so
/// the only owning path through the tree is parent→child.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirId(pub(super) usize);

impl DirId {
    pub const ROOT: DirId = DirId(0);
}

/// A file: a name, its content buffer and the advisory open flag.
///
/// `is_open` is bookkeeping, not a lock: a second open is reported but never
/// refused, and no operation consults the flag before mutating content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileNode {
    pub name: String,
    pub content: FileContent,
    pub is_open: bool,
}

impl FileNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: FileContent::new(),
            is_open: false,
        }
    }
}

/// A directory: child files and child directories live in separate
/// namespaces, each keyed by name in lexical order.
#[derive(Debug, Clone)]
pub struct DirNode {
    pub name: String,
    pub parent: Option<DirId>,
    pub files: BTreeMap<String, FileNode>,
    pub subdirs: BTreeMap<String, DirId>,
}

impl DirNode {
    pub fn new(name: impl Into<String>, parent: Option<DirId>) -> Self {
        Self {
            name: name.into(),
            parent,
            files: BTreeMap::new(),
            subdirs: BTreeMap::new(),
        }
    }
}
