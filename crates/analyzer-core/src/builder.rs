//! Orchestrates the per-file [`extract`](crate::extract)/[`dblink`] passes
//! and the final global edge dedup (`spec.md` §4.9).

use std::collections::{HashSet, HashMap};

use crate::dblink;
use crate::extract;
use crate::types::{Dependency, FileNode};

/// Run the language extractor (if any) and the database-link extractor for
/// a single already-read file.
pub fn extract_file(file: &FileNode, content: &str, project_files: &HashSet<String>) -> Vec<Dependency> {
    let mut deps = extract::extract(&file.path, file.type_tag, content, project_files);
    deps.extend(dblink::extract(&file.path, content));
    deps
}

/// Global `(from, to, kind)` dedup across every file's extracted edges
/// (`spec.md` §4.4 "Every extractor shares these edge-emission rules").
pub fn dedup(deps: Vec<Dependency>) -> Vec<Dependency> {
    let mut seen = HashSet::new();
    deps.into_iter().filter(|d| seen.insert(d.key())).collect()
}

/// Build the `path -> content` map's corresponding `project_files` set used
/// by every extractor to test relative-import existence: the set of
/// supported-extension file paths actually present in the workspace.
pub fn project_file_set(files: &[&FileNode]) -> HashSet<String> {
    files.iter().map(|f| f.path.clone()).collect()
}

/// Read each file's content through `read_content`, extract its edges, and
/// return the globally deduplicated edge list plus the per-path content map
/// (for the facade's run content cache).
pub fn build_all<F>(files: &[&FileNode], read_content: F) -> (Vec<Dependency>, HashMap<String, String>)
where
    F: Fn(&FileNode) -> Option<String>,
{
    let project_files = project_file_set(files);
    let mut all_deps = Vec::new();
    let mut contents = HashMap::new();

    for file in files {
        let Some(content) = read_content(file) else {
            continue;
        };
        let deps = extract_file(file, &content, &project_files);
        all_deps.extend(deps);
        contents.insert(file.path.clone(), content);
    }

    (dedup(all_deps), contents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TypeTag;

    fn js_file(path: &str) -> FileNode {
        FileNode::new_file(
            path.to_string(),
            path.to_string(),
            path.rsplit('/').next().unwrap().to_string(),
            ".js".to_string(),
            0,
            TypeTag::JavaScript,
            0,
        )
    }

    #[test]
    fn rust_files_produce_no_dependency_edges_despite_being_supported() {
        // `.rs` is in the supported-extension set (crate::classify) but has
        // no LanguageExtractor — the intentional asymmetry this test pins.
        assert!(!extract::has_extractor(TypeTag::Rust));
        assert!(crate::classify::is_supported_extension("rs"));

        let file = FileNode::new_file(
            "src/main.rs".into(),
            "src/main.rs".into(),
            "main.rs".into(),
            ".rs".into(),
            0,
            TypeTag::Rust,
            0,
        );
        let deps = extract_file(&file, "use crate::foo;\nfn main() {}\n", &HashSet::new());
        assert!(deps.is_empty());
    }

    #[test]
    fn js_and_dblink_edges_both_contribute_for_one_file() {
        let file = js_file("src/db.js");
        let content = "import x from './helper';\nconst url = 'mongodb://localhost/app';\n";
        let project = project_file_set(&[&js_file("src/helper.js")]);
        let deps = extract_file(&file, content, &project);
        assert_eq!(deps.len(), 2);
    }

    #[test]
    fn dedup_collapses_identical_triples_across_calls() {
        let a = crate::types::Dependency::new(
            "a.ts",
            crate::types::Node::Project("b.ts".into()),
            crate::types::DependencyKind::Import,
        );
        let b = crate::types::Dependency::new(
            "a.ts",
            crate::types::Node::Project("b.ts".into()),
            crate::types::DependencyKind::Import,
        );
        let deduped = dedup(vec![a, b]);
        assert_eq!(deduped.len(), 1);
    }

    #[test]
    fn build_all_skips_unreadable_files() {
        let files = vec![js_file("a.js")];
        let refs: Vec<&FileNode> = files.iter().collect();
        let (deps, contents) = build_all(&refs, |_| None);
        assert!(deps.is_empty());
        assert!(contents.is_empty());
    }
}
