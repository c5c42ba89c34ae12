use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;

use crate::path;
use crate::types::{Dependency, DependencyKind, Node};

fn script_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"<script[^>]*\bsrc=['"]([^'"]+)['"]"#).unwrap())
}

fn link_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"<link[^>]*\bhref=['"]([^'"]+)['"]"#).unwrap())
}

fn is_remote(spec: &str) -> bool {
    spec.starts_with("http") || spec.starts_with("//")
}

/// `<script src="…">` (kind `script`) and `<link href="…">` (kind
/// `stylesheet`), per `spec.md` §4.4. Absolute URLs are skipped.
pub fn extract(path: &str, content: &str, project_files: &HashSet<String>) -> Vec<Dependency> {
    let mut seen = HashSet::new();
    let mut deps = Vec::new();

    for cap in script_re().captures_iter(content) {
        push(path, cap.get(1).unwrap().as_str(), DependencyKind::Script, project_files, &mut seen, &mut deps);
    }
    for cap in link_re().captures_iter(content) {
        push(
            path,
            cap.get(1).unwrap().as_str(),
            DependencyKind::Stylesheet,
            project_files,
            &mut seen,
            &mut deps,
        );
    }
    deps
}

fn push(
    path: &str,
    spec: &str,
    kind: DependencyKind,
    project_files: &HashSet<String>,
    seen: &mut HashSet<(String, String, DependencyKind)>,
    deps: &mut Vec<Dependency>,
) {
    if is_remote(spec) {
        return;
    }
    let resolved = crate::path::resolve_relative(path, spec);
    if let Some(found) = find_variant(&resolved, project_files) {
        let dep = Dependency::new(path, Node::Project(found), kind);
        if seen.insert(dep.key()) {
            deps.push(dep);
        }
    }
}

fn find_variant(base: &str, project_files: &HashSet<String>) -> Option<String> {
    path::extension_variants(base)
        .into_iter()
        .find(|candidate| project_files.contains(candidate))
}
