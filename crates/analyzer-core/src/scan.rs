//! Recursive, batched-parallel-fan-out directory walker. Produces the
//! ordered [`FileTree`] consumed by the rest of the pipeline.

use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::classify;
use crate::types::{FileNode, FileTree, TypeTag};

/// Directory names never descended into, regardless of depth (`spec.md`
/// §4.3 / §6).
pub const IGNORED_DIRS: &[&str] = &[
    "node_modules",
    ".git",
    "dist",
    "build",
    "out",
    ".vscode",
    ".idea",
    "__pycache__",
    "venv",
    ".env",
    "coverage",
    ".nyc_output",
    ".cache",
    "tmp",
    "temp",
];

/// Directory entries fetched and recursed into together before the next
/// batch starts, bounding concurrent open file handles on very large trees.
const BATCH_SIZE: usize = 10;

fn is_hidden(name: &str) -> bool {
    name.starts_with('.')
}

fn is_ignored_dir(name: &str, extra_ignored: &[String]) -> bool {
    is_hidden(name) || IGNORED_DIRS.contains(&name) || extra_ignored.iter().any(|d| d == name)
}

fn mtime_epoch_millis(meta: &std::fs::Metadata) -> i64 {
    meta.modified()
        .ok()
        .and_then(|t| t.duration_since(std::time::UNIX_EPOCH).ok())
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}

fn extension_of(name: &str) -> String {
    match name.rfind('.') {
        // A dot-leading hidden file like ".env" has no extension.
        Some(idx) if idx > 0 => name[idx..].to_lowercase(),
        _ => String::new(),
    }
}

/// Walk `root`, returning the ordered [`FileTree`]. A read failure on the
/// root directory yields an empty tree (the root-level failure case is
/// surfaced separately by the facade, which can distinguish "empty
/// workspace" from "root unreadable" via [`std::fs::read_dir`] itself).
pub fn scan(root: &Path, logger: &dyn crate::host::Logger) -> FileTree {
    scan_with_extra_ignored(root, &[], logger)
}

/// As [`scan`], but additionally skipping directory names in
/// `extra_ignored_dirs` (`.project-analyzer.toml`'s `[scan] extra_ignored_dirs`).
pub fn scan_with_extra_ignored(root: &Path, extra_ignored_dirs: &[String], logger: &dyn crate::host::Logger) -> FileTree {
    scan_dir(root, root, extra_ignored_dirs, logger)
}

fn scan_dir(dir: &Path, root: &Path, extra_ignored: &[String], logger: &dyn crate::host::Logger) -> FileTree {
    let entries: Vec<PathBuf> = match std::fs::read_dir(dir) {
        Ok(rd) => rd.filter_map(|e| e.ok().map(|e| e.path())).collect(),
        Err(e) => {
            logger.warn(&format!(
                "directory read failed for {}: {e}; yielding empty subtree",
                dir.display()
            ));
            return Vec::new();
        }
    };

    let mut nodes: Vec<FileNode> = Vec::new();
    for batch in entries.chunks(BATCH_SIZE) {
        let batch_nodes: Vec<Option<FileNode>> = batch
            .par_iter()
            .map(|path| build_node(path, root, extra_ignored, logger))
            .collect();
        nodes.extend(batch_nodes.into_iter().flatten());
    }

    sort_children(&mut nodes);
    nodes
}

fn build_node(path: &Path, root: &Path, extra_ignored: &[String], logger: &dyn crate::host::Logger) -> Option<FileNode> {
    let name = path.file_name()?.to_string_lossy().to_string();
    if is_hidden(&name) {
        return None;
    }

    let meta = match std::fs::symlink_metadata(path) {
        Ok(m) => m,
        Err(e) => {
            logger.warn(&format!("stat failed for {}: {e}", path.display()));
            return None;
        }
    };

    // Don't follow symlinks: avoids cyclic traversal (spec Non-goals).
    if meta.is_symlink() {
        return None;
    }

    let rel_path = path
        .strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/");
    let full_path = path.to_string_lossy().to_string();

    if meta.is_dir() {
        if is_ignored_dir(&name, extra_ignored) {
            return None;
        }
        let mut node = FileNode::new_directory(rel_path, full_path, name, mtime_epoch_millis(&meta));
        node.children = Some(scan_dir(path, root, extra_ignored, logger));
        Some(node)
    } else {
        let meta = std::fs::metadata(path).unwrap_or(meta);
        let extension = extension_of(&name);
        let type_tag = if extension.is_empty() {
            TypeTag::Unknown
        } else {
            classify::classify_extension(&extension[1..])
        };
        Some(FileNode::new_file(
            rel_path,
            full_path,
            name,
            extension,
            meta.len(),
            type_tag,
            mtime_epoch_millis(&meta),
        ))
    }
}

/// Directories first, then files; each group sorted by locale-aware name
/// comparison (`spec.md` §3/§4.3/§8 Ordering invariant).
fn sort_children(nodes: &mut [FileNode]) {
    nodes.sort_by(|a, b| match (a.is_directory, b.is_directory) {
        (true, false) => std::cmp::Ordering::Less,
        (false, true) => std::cmp::Ordering::Greater,
        _ => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
    });
}

/// Flatten a [`FileTree`] into the ordered sequence of all (non-directory)
/// nodes, depth-first, for handing to the dependency builder.
pub fn flatten_files(tree: &FileTree) -> Vec<&FileNode> {
    let mut out = Vec::new();
    flatten_into(tree, &mut out);
    out
}

fn flatten_into<'a>(nodes: &'a [FileNode], out: &mut Vec<&'a FileNode>) {
    for node in nodes {
        if node.is_directory {
            if let Some(children) = &node.children {
                flatten_into(children, out);
            }
        } else {
            out.push(node);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::NullLogger;
    use std::fs;

    #[test]
    fn empty_directory_yields_empty_tree() {
        let dir = tempfile::tempdir().unwrap();
        let tree = scan(dir.path(), &NullLogger);
        assert!(tree.is_empty());
    }

    #[test]
    fn ignored_directories_are_not_descended() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("node_modules")).unwrap();
        fs::write(dir.path().join("node_modules/pkg.js"), "x").unwrap();
        fs::write(dir.path().join("kept.js"), "x").unwrap();

        let tree = scan(dir.path(), &NullLogger);
        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].name, "kept.js");
    }

    #[test]
    fn hidden_entries_are_excluded_at_any_depth() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(".hidden"), "x").unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("sub/.hiddentoo"), "x").unwrap();
        fs::write(dir.path().join("sub/kept.ts"), "x").unwrap();

        let tree = scan(dir.path(), &NullLogger);
        assert_eq!(tree.len(), 1);
        let sub = &tree[0];
        assert_eq!(sub.children.as_ref().unwrap().len(), 1);
    }

    #[test]
    fn directories_sort_before_files_then_locale_name() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.ts"), "x").unwrap();
        fs::create_dir(dir.path().join("a_dir")).unwrap();
        fs::write(dir.path().join("a.ts"), "x").unwrap();

        let tree = scan(dir.path(), &NullLogger);
        assert_eq!(tree[0].name, "a_dir");
        assert!(tree[0].is_directory);
        assert_eq!(tree[1].name, "a.ts");
        assert_eq!(tree[2].name, "b.ts");
    }

    #[test]
    fn extra_ignored_dirs_are_skipped_like_built_ins() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("vendor")).unwrap();
        fs::write(dir.path().join("vendor/lib.js"), "x").unwrap();
        fs::write(dir.path().join("kept.js"), "x").unwrap();

        let tree = scan_with_extra_ignored(dir.path(), &["vendor".to_string()], &NullLogger);
        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].name, "kept.js");
    }

    #[test]
    fn flatten_files_is_depth_first_and_skips_directories() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("src")).unwrap();
        fs::write(dir.path().join("src/a.ts"), "x").unwrap();
        fs::write(dir.path().join("top.ts"), "x").unwrap();

        let tree = scan(dir.path(), &NullLogger);
        let files = flatten_files(&tree);
        assert_eq!(files.len(), 2);
        assert!(files.iter().all(|f| !f.is_directory));
    }
}
