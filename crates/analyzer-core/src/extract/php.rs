use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;

use crate::path;
use crate::types::{Dependency, DependencyKind, Node};

fn include_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"\b(?:include|require)(?:_once)?\s*\(?\s*['"]([^'"]*\.[^'"]*)['"]"#).unwrap()
    })
}

/// `include`/`require`/`include_once`/`require_once` with a `./` or `../`
/// string argument (`spec.md` §4.4); bare or absolute arguments are ignored.
pub fn extract(path: &str, content: &str, project_files: &HashSet<String>) -> Vec<Dependency> {
    let mut seen = HashSet::new();
    let mut deps = Vec::new();

    for cap in include_re().captures_iter(content) {
        let spec = cap.get(1).unwrap().as_str();
        if !(spec.contains("./") || spec.contains("../")) {
            continue;
        }
        let resolved = crate::path::resolve_relative(path, spec);
        if let Some(found) = find_variant(&resolved, project_files) {
            let dep = Dependency::new(path, Node::Project(found), DependencyKind::Include);
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
