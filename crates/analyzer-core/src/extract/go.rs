use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;

use crate::path;
use crate::types::{Dependency, DependencyKind, Node};

fn import_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#""([^"]+)""#).unwrap())
}

fn import_block_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)\bimport\s*\(([^)]*)\)").unwrap())
}

fn single_import_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"(?m)^\s*import\s+"([^"]+)""#).unwrap())
}

/// Single-quoted and grouped `import (...)` blocks (`spec.md` §4.4). Only
/// local-module paths beginning with `./` or `../` resolve to an edge;
/// module-path imports (`"fmt"`, `"github.com/..."`) are ignored.
pub fn extract(path: &str, content: &str, project_files: &HashSet<String>) -> Vec<Dependency> {
    let mut specifiers: Vec<&str> = Vec::new();

    for block in import_block_re().captures_iter(content) {
        let body = block.get(1).unwrap().as_str();
        for quoted in import_re().captures_iter(body) {
            specifiers.push(quoted.get(1).unwrap().as_str());
        }
    }
    for cap in single_import_re().captures_iter(content) {
        specifiers.push(cap.get(1).unwrap().as_str());
    }

    let mut seen = HashSet::new();
    let mut deps = Vec::new();
    for spec in specifiers {
        if !(spec.starts_with("./") || spec.starts_with("../")) {
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
