use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;

use crate::types::{Dependency, DependencyKind, Node};

fn import_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?m)^\s*import\s+(?:static\s+)?([\w.]+)\s*;").unwrap())
}

/// `import [static] a.b.C;` (`spec.md` §4.4). The captured class name is
/// matched against any project file named `C.java`; every match becomes an
/// edge (a class name is not assumed unique across the workspace). The
/// file's own `package` declaration is read elsewhere only informationally
/// and does not participate in resolution.
pub fn extract(path: &str, content: &str, project_files: &HashSet<String>) -> Vec<Dependency> {
    let mut seen = HashSet::new();
    let mut deps = Vec::new();

    for cap in import_re().captures_iter(content) {
        let dotted = cap.get(1).unwrap().as_str();
        let class_name = dotted.rsplit('.').next().unwrap_or(dotted);
        let target_name = format!("{class_name}.java");

        for candidate in project_files {
            if candidate == &target_name
                || candidate
                    .rsplit('/')
                    .next()
                    .is_some_and(|name| name == target_name)
            {
                let dep = Dependency::new(
                    path,
                    Node::Project(candidate.clone()),
                    DependencyKind::Import,
                );
                if seen.insert(dep.key()) {
                    deps.push(dep);
                }
            }
        }
    }

    deps
}
