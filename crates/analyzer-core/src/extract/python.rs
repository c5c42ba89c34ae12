use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;

use crate::path;
use crate::types::{Dependency, DependencyKind, Node};

fn from_import_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?m)^\s*from\s+(\.+[\w.]*)\s+import\b").unwrap())
}

/// `from X import …` / `import X` (`spec.md` §4.4). Only relative
/// (dot-leading) forms resolve to an edge; bare `import X` is not emitted,
/// and an unresolved relative import is silently dropped rather than
/// becoming a `[Missing]` node (Python has no JS-style synthetic-miss
/// convention in the source spec).
pub fn extract(path: &str, content: &str, project_files: &HashSet<String>) -> Vec<Dependency> {
    let mut seen = HashSet::new();
    let mut deps = Vec::new();

    for cap in from_import_re().captures_iter(content) {
        let dotted = cap.get(1).unwrap().as_str();
        let resolved = crate::path::resolve_python_dotted(path, dotted);
        if let Some(found) = find_variant(&resolved, project_files) {
            let dep = Dependency::new(path, Node::Project(found), DependencyKind::Import);
            if seen.insert(dep.key()) {
                deps.push(dep);
            }
        }
    }

    deps
}

fn find_variant(base: &str, project_files: &HashSet<String>) -> Option<String> {
    path::extension_variants(base)
        .into_iter()
        .find(|candidate| project_files.contains(candidate))
}
