//! The in-memory filesystem model.
//!
//! A tree of directories owning files, navigated through a current-directory
//! pointer. Directories live in an arena and refer to their parent by index,
//! so ownership runs strictly downward. File contents are flat byte buffers
//! with positional editing operations.

mod content;
mod node;
mod tree;

pub use content::{ContentError, FileContent};
pub use node::{DirId, DirNode, FileNode};
pub use tree::{FsError, FsTree, ROOT_NAME};
