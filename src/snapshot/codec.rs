use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use compio::fs;
use snafu::{ResultExt, Snafu, ensure};
use tracing::{debug, info, warn};

use crate::filesystem::{DirId, FileContent, FileNode, FsTree};

/// Serializes the tree into the line-oriented snapshot text.
///
/// Pre-order: per directory, every `FILE` record first, then each
/// subdirectory framed by `DIR`/`ENDDIR`. The root's children sit at the top
/// level without an enclosing record. File content goes on the record line
/// verbatim, so content holding a line break is unencodable and refused.
pub fn encode(tree: &FsTree) -> Result<String, SnapshotError> {
    let mut out = String::new();
    encode_dir(tree, DirId::ROOT, true, &mut out)?;
    Ok(out)
}

fn encode_dir(tree: &FsTree, id: DirId, is_root: bool, out: &mut String) -> Result<(), SnapshotError> {
    for file in tree.files_of(id) {
        ensure!(
            !file.content.as_bytes().contains(&b'\n'),
            UnencodableContentSnafu {
                name: file.name.clone()
            }
        );
        let _ = writeln!(out, "FILE {} {}", file.name, file.content.read_all());
    }
    for (name, child) in tree.subdirs_of(id) {
        let _ = writeln!(out, "DIR {name}");
        encode_dir(tree, child, false, out)?;
    }
    if !is_root {
        out.push_str("ENDDIR\n");
    }
    Ok(())
}

/// Rebuilds a tree from snapshot text, running a directory cursor over the
/// records: `DIR` descends into a new child, `ENDDIR` pops back out, `FILE`
/// inserts under the cursor. The result starts at the root with an empty
/// path.
pub fn decode(input: &str) -> Result<FsTree, SnapshotError> {
    let mut tree = FsTree::new();
    let mut cursor = DirId::ROOT;
    let mut parents: Vec<DirId> = Vec::new();

    for (idx, line) in input.lines().enumerate() {
        let line_no = idx + 1;
        if line.is_empty() {
            continue;
        }
        if let Some(name) = line.strip_prefix("DIR ") {
            ensure!(!name.is_empty(), MalformedRecordSnafu { line_no });
            parents.push(cursor);
            cursor = tree.insert_dir(cursor, name);
        } else if let Some(rest) = line.strip_prefix("FILE ") {
            let (name, content) = rest.split_once(' ').unwrap_or((rest, ""));
            ensure!(!name.is_empty(), MalformedRecordSnafu { line_no });
            let mut file = FileNode::new(name);
            file.content = FileContent::from_text(content);
            tree.insert_file(cursor, file);
        } else if line == "ENDDIR" {
            cursor = parents
                .pop()
                .ok_or(SnapshotError::UnbalancedRecord { line_no })?;
        } else {
            return MalformedRecordSnafu { line_no }.fail();
        }
    }

    ensure!(parents.is_empty(), TruncatedSnapshotSnafu);
    Ok(tree)
}

/// Reads the snapshot at `path`. A missing file means a fresh, empty tree;
/// an unreadable one is reported and also yields a fresh tree. Startup never
/// fails on the snapshot.
pub async fn load(path: &Path) -> FsTree {
    debug!("loading snapshot from {}", path.display());
    let bytes = match fs::read(path).await {
        Ok(bytes) => bytes,
        Err(_) => {
            info!("no snapshot found, starting with an empty filesystem");
            return FsTree::new();
        }
    };
    match decode(&String::from_utf8_lossy(&bytes)) {
        Ok(tree) => tree,
        Err(e) => {
            warn!("snapshot is unreadable, starting with an empty filesystem: {e}");
            FsTree::new()
        }
    }
}

/// Writes the whole tree to `path`, replacing any previous snapshot.
pub async fn save(path: &Path, tree: &FsTree) -> Result<(), SnapshotError> {
    let encoded = encode(tree)?;
    debug!("saving snapshot to {}", path.display());
    let res = fs::write(path, encoded.into_bytes()).await;
    res.0.context(WriteSnafu { path })?;
    Ok(())
}

#[derive(Debug, Snafu)]
pub enum SnapshotError {
    #[snafu(display("content of file '{name}' contains a line break and cannot be snapshotted"))]
    UnencodableContent { name: String },
    #[snafu(display("malformed snapshot record at line {line_no}"))]
    MalformedRecord { line_no: usize },
    #[snafu(display("unbalanced ENDDIR record at line {line_no}"))]
    UnbalancedRecord { line_no: usize },
    #[snafu(display("snapshot ended inside an unclosed directory"))]
    TruncatedSnapshot,
    #[snafu(display("failed to write snapshot to {}", path.display()))]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },
}
