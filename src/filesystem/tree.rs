use std::fmt::Write as _;

use snafu::Snafu;
use tracing::warn;

use crate::filesystem::node::{DirId, DirNode, FileNode};

/// The name of the arena's first node. No created subdirectory may use it.
pub const ROOT_NAME: &str = "root";

/// The in-memory filesystem: an arena of directory nodes plus the current
/// working directory.
///
/// `path` is the ordered list of directory names from the root (the root
/// itself is unnamed) and always leads to `current`; every navigation
/// mutation updates the two together.
#[derive(Debug, Clone)]
pub struct FsTree {
    dirs: Vec<DirNode>,
    current: DirId,
    path: Vec<String>,
}

impl Default for FsTree {
    fn default() -> Self {
        Self::new()
    }
}

impl FsTree {
    pub fn new() -> Self {
        Self {
            dirs: vec![DirNode::new(ROOT_NAME, None)],
            current: DirId::ROOT,
            path: Vec::new(),
        }
    }

    fn dir(&self, id: DirId) -> &DirNode {
        &self.dirs[id.0]
    }

    fn dir_mut(&mut self, id: DirId) -> &mut DirNode {
        &mut self.dirs[id.0]
    }

    fn current_dir(&self) -> &DirNode {
        self.dir(self.current)
    }

    fn current_dir_mut(&mut self) -> &mut DirNode {
        self.dir_mut(self.current)
    }

    /// Creates an empty subdirectory of the current directory.
    pub fn make_directory(&mut self, name: &str) -> Result<(), FsError> {
        if name.is_empty() {
            return EmptyDirectoryNameSnafu.fail();
        }
        if name == ROOT_NAME {
            return ReservedDirectoryNameSnafu.fail();
        }
        if self.current_dir().subdirs.contains_key(name) {
            return DirectoryAlreadyExistsSnafu { name }.fail();
        }
        self.insert_dir(self.current, name);
        Ok(())
    }

    /// Moves into the named subdirectory, or back to the parent for `".."`.
    pub fn change_directory(&mut self, name: &str) -> Result<(), FsError> {
        if name == ".." {
            let Some(parent) = self.current_dir().parent else {
                return AlreadyAtRootSnafu.fail();
            };
            self.current = parent;
            self.path.pop();
            return Ok(());
        }
        let Some(&child) = self.current_dir().subdirs.get(name) else {
            return DirectoryNotFoundSnafu { name }.fail();
        };
        self.current = child;
        self.path.push(name.to_owned());
        Ok(())
    }

    /// Subdirectory and file names of the current directory, each set in
    /// lexical order. `None` when the directory is empty.
    pub fn list_entries(&self) -> Option<(Vec<&str>, Vec<&str>)> {
        let dir = self.current_dir();
        if dir.files.is_empty() && dir.subdirs.is_empty() {
            return None;
        }
        let subdirs = dir.subdirs.keys().map(String::as_str).collect();
        let files = dir.files.keys().map(String::as_str).collect();
        Some((subdirs, files))
    }

    /// The current path rendered as names joined by `>`; empty at the root.
    pub fn display_path(&self) -> String {
        self.path.join(">")
    }

    pub fn current_dir_name(&self) -> &str {
        &self.current_dir().name
    }

    /// Creates an empty file in the current directory.
    pub fn create_file(&mut self, name: &str) -> Result<(), FsError> {
        let dir = self.current_dir_mut();
        if dir.files.contains_key(name) {
            return FileAlreadyExistsSnafu { name }.fail();
        }
        dir.files.insert(name.to_owned(), FileNode::new(name));
        Ok(())
    }

    /// Removes a file from the current directory, open or not.
    pub fn delete_file(&mut self, name: &str) -> Result<(), FsError> {
        match self.current_dir_mut().files.remove(name) {
            Some(_) => Ok(()),
            None => FileNotFoundSnafu { name }.fail(),
        }
    }

    /// Renames `source` to `target` within the current directory. An existing
    /// `target` is overwritten; content and the open flag travel with the
    /// entry.
    pub fn move_file(&mut self, source: &str, target: &str) -> Result<(), FsError> {
        let dir = self.current_dir_mut();
        let Some(mut file) = dir.files.remove(source) else {
            return FileNotFoundSnafu { name: source }.fail();
        };
        file.name = target.to_owned();
        dir.files.insert(target.to_owned(), file);
        Ok(())
    }

    /// Marks the file open and returns its handle. A file that is already
    /// open is reported but handed out anyway; the flag is advisory.
    pub fn open_file(&mut self, name: &str) -> Result<&mut FileNode, FsError> {
        let Some(file) = self.current_dir_mut().files.get_mut(name) else {
            return FileNotFoundSnafu { name }.fail();
        };
        if file.is_open {
            warn!(name, "file is already open");
        } else {
            file.is_open = true;
        }
        Ok(file)
    }

    /// Clears the open flag. Closing a closed file is a no-op.
    pub fn close_file(&mut self, name: &str) -> Result<(), FsError> {
        match self.current_dir_mut().files.get_mut(name) {
            Some(file) => {
                file.is_open = false;
                Ok(())
            }
            None => FileNotFoundSnafu { name }.fail(),
        }
    }

    /// Renders the whole tree, two spaces of indent per level, directories
    /// (recursively) before the files of each level.
    pub fn memory_map(&self) -> String {
        let mut out = String::new();
        self.render_dir(DirId::ROOT, 0, &mut out);
        out
    }

    fn render_dir(&self, id: DirId, depth: usize, out: &mut String) {
        let dir = self.dir(id);
        for (name, &child) in &dir.subdirs {
            let _ = writeln!(out, "{}{}/", "  ".repeat(depth), name);
            self.render_dir(child, depth + 1, out);
        }
        for name in dir.files.keys() {
            let _ = writeln!(out, "{}{}", "  ".repeat(depth), name);
        }
    }

    // Construction and traversal hooks for the snapshot codec. These bypass
    // the name checks of `make_directory`; the codec validates its own input.

    pub(crate) fn insert_dir(&mut self, parent: DirId, name: &str) -> DirId {
        let id = DirId(self.dirs.len());
        self.dirs.push(DirNode::new(name, Some(parent)));
        self.dir_mut(parent).subdirs.insert(name.to_owned(), id);
        id
    }

    pub(crate) fn insert_file(&mut self, dir: DirId, file: FileNode) {
        self.dir_mut(dir).files.insert(file.name.clone(), file);
    }

    pub(crate) fn files_of(&self, id: DirId) -> impl Iterator<Item = &FileNode> {
        self.dir(id).files.values()
    }

    pub(crate) fn subdirs_of(&self, id: DirId) -> impl Iterator<Item = (&str, DirId)> {
        self.dir(id)
            .subdirs
            .iter()
            .map(|(name, &child)| (name.as_str(), child))
    }
}

#[derive(Debug, Snafu, PartialEq, Eq)]
pub enum FsError {
    #[snafu(display("file not found: {name}"))]
    FileNotFound { name: String },
    #[snafu(display("directory not found: {name}"))]
    DirectoryNotFound { name: String },
    #[snafu(display("file already exists: {name}"))]
    FileAlreadyExists { name: String },
    #[snafu(display("directory already exists: {name}"))]
    DirectoryAlreadyExists { name: String },
    #[snafu(display("directory name cannot be empty"))]
    EmptyDirectoryName,
    #[snafu(display("'{ROOT_NAME}' is reserved and cannot be used as a directory name"))]
    ReservedDirectoryName,
    #[snafu(display("already at the root directory"))]
    AlreadyAtRoot,
}
