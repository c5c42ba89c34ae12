use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;

use crate::path;
use crate::types::{Dependency, DependencyKind, Node};

fn import_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?m)^\s*import\s+(?:[\w*\s{},]+from\s+)?['"]([^'"]+)['"]"#).unwrap()
    })
}

fn require_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"\brequire\(\s*['"]([^'"]+)['"]\s*\)"#).unwrap())
}

fn dynamic_import_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"\bimport\(\s*['"]([^'"]+)['"]\s*\)"#).unwrap())
}

/// Static `import`, `require(...)`, and dynamic `import(...)` specifiers
/// (`spec.md` §4.4). Relative specifiers resolve through [`path`] and probe
/// extension variants; bare specifiers are treated as external packages.
pub fn extract(path: &str, content: &str, project_files: &HashSet<String>) -> Vec<Dependency> {
    let mut specifiers: Vec<&str> = Vec::new();
    for re in [import_re(), require_re(), dynamic_import_re()] {
        for cap in re.captures_iter(content) {
            specifiers.push(cap.get(1).unwrap().as_str());
        }
    }

    let mut seen = HashSet::new();
    let mut deps = Vec::new();
    for spec in specifiers {
        let is_relative = spec.starts_with('.') || spec.starts_with('/');
        let to = if is_relative {
            let resolved = crate::path::resolve_relative(path, spec);
            match find_variant(&resolved, project_files) {
                Some(found) => Node::Project(found),
                None => Node::Missing(resolved),
            }
        } else {
            Node::External(spec.to_string())
        };

        let dep = Dependency::new(path, to, DependencyKind::Import);
        if seen.insert(dep.key()) {
            deps.push(dep);
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
    fn static_import_relative_resolves_to_project_file() {
        let content = "import { helper } from './utils/helper';\n";
        let project = files(&["src/utils/helper.ts"]);
        let deps = extract("src/index.ts", content, &project);
        assert_eq!(deps.len(), 1);
        assert_eq!(deps[0].to, "src/utils/helper.ts");
        assert_eq!(deps[0].kind, DependencyKind::Import);
    }

    #[test]
    fn missing_relative_import_emits_synthetic_missing_node() {
        let content = "import x from './nope';\n";
        let deps = extract("src/index.ts", content, &HashSet::new());
        assert_eq!(deps[0].to, "[Missing] src/nope");
    }

    #[test]
    fn bare_specifier_emits_external_node() {
        let content = "import React from 'react';\n";
        let deps = extract("src/index.tsx", content, &HashSet::new());
        assert_eq!(deps[0].to, "[External] react");
    }

    #[test]
    fn require_and_dynamic_import_are_both_recognized() {
        let content = "const a = require('./a');\nconst b = () => import('./b');\n";
        let project = files(&["a.js", "b.js"]);
        let deps = extract("index.js", content, &project);
        assert_eq!(deps.len(), 2);
    }

    #[test]
    fn duplicate_specifiers_are_deduplicated() {
        let content = "import a from './a';\nimport { b } from './a';\n";
        let project = files(&["a.ts"]);
        let deps = extract("index.ts", content, &project);
        assert_eq!(deps.len(), 1);
    }
}
