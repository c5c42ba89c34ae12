use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;

use crate::path;
use crate::types::{Dependency, DependencyKind, Node};

fn import_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"@import\s+(?:url\(\s*)?['"]?([^'")\s;]+)['"]?\)?"#).unwrap()
    })
}

/// `@import "…"` / `@import url("…")` (`spec.md` §4.4). URLs beginning with
/// `http` or `//` are skipped.
pub fn extract(path: &str, content: &str, project_files: &HashSet<String>) -> Vec<Dependency> {
    let mut seen = HashSet::new();
    let mut deps = Vec::new();

    for cap in import_re().captures_iter(content) {
        let spec = cap.get(1).unwrap().as_str();
        if spec.starts_with("http") || spec.starts_with("//") {
            continue;
        }
        let resolved = crate::path::resolve_relative(path, spec);
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

#[cfg(test)]
mod tests {
    use super::*;

    fn files(paths: &[&str]) -> HashSet<String> {
        paths.iter().map(|p| p.to_string()).collect()
    }

    #[test]
    fn plain_import_resolves() {
        let content = "@import \"./base.css\";\n";
        let project = files(&["styles/base.css"]);
        let deps = extract("styles/main.css", content, &project);
        assert_eq!(deps.len(), 1);
        assert_eq!(deps[0].to, "styles/base.css");
    }

    #[test]
    fn url_form_resolves() {
        let content = "@import url('./reset.css');\n";
        let project = files(&["reset.css"]);
        let deps = extract("main.css", content, &project);
        assert_eq!(deps[0].to, "reset.css");
    }

    #[test]
    fn remote_urls_are_skipped() {
        let content = "@import \"https://fonts.googleapis.com/css?family=Roboto\";\n@import \"//cdn.example.com/a.css\";\n";
        let deps = extract("main.css", content, &HashSet::new());
        assert!(deps.is_empty());
    }
}
