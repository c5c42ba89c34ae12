//! Top-level function/class/variable recognition for JS/TS, Python, and
//! Java (`spec.md` §4.5). Purely lexical: no scope or type analysis.

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::types::TypeTag;

const JAVA_CONTROL_KEYWORDS: &[&str] = &["if", "for", "while", "switch", "catch", "synchronized"];

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Elements {
    pub functions: Vec<String>,
    pub classes: Vec<String>,
    pub variables: Vec<String>,
}

fn js_function_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?m)^\s*(?:export\s+)?(?:async\s+)?function\s+([A-Za-z_$][\w$]*)").unwrap()
    })
}

fn js_const_fn_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?m)^\s*(?:export\s+)?const\s+([A-Za-z_$][\w$]*)\s*=\s*(?:async\s*)?\(?[^=]*?=>").unwrap()
    })
}

fn js_class_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?m)^\s*(?:export\s+)?class\s+([A-Za-z_$][\w$]*)").unwrap())
}

fn js_variable_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?m)^\s*(?:export\s+)?(?:const|let|var)\s+([A-Za-z_$][\w$]*)\s*=").unwrap()
    })
}

fn python_def_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?m)^def\s+([A-Za-z_]\w*)").unwrap())
}

fn python_class_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?m)^class\s+([A-Za-z_]\w*)").unwrap())
}

fn python_variable_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?m)^([A-Za-z_]\w*)\s*(?::\s*[\w\[\], ]+)?=\s*[^=]").unwrap())
}

fn java_class_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?m)^\s*(?:public|private|protected)?\s*(?:static\s+)?(?:final\s+)?(?:class|interface|enum)\s+([A-Za-z_]\w*)").unwrap()
    })
}

fn java_method_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?m)^\s*(?:public|private|protected)\s+(?:static\s+)?(?:final\s+)?[\w<>\[\],\s]+?\s+([A-Za-z_]\w*)\s*\([^;]*\)\s*\{").unwrap()
    })
}

fn java_field_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?m)^\s*(?:public|private|protected)\s+(?:static\s+)?(?:final\s+)?[\w<>\[\],\s]+?\s+([A-Za-z_]\w*)\s*(?:=[^;(]*)?;").unwrap()
    })
}

/// Extract top-level functions, classes, and module/field-level variables
/// for a file whose tag has an element extractor. Unsupported tags return
/// empty buckets. Names are deduplicated and kept disjoint across buckets —
/// a name already captured as a function is dropped from variables.
pub fn extract(type_tag: TypeTag, content: &str) -> Elements {
    match type_tag {
        TypeTag::JavaScript | TypeTag::TypeScript => extract_js(content),
        TypeTag::Python => extract_python(content),
        TypeTag::Java => extract_java(content),
        _ => Elements::default(),
    }
}

fn dedup_disjoint(functions: Vec<String>, classes: Vec<String>, variables: Vec<String>) -> Elements {
    let mut seen_functions = HashSet::new();
    let functions: Vec<String> = functions
        .into_iter()
        .filter(|n| seen_functions.insert(n.clone()))
        .collect();

    let mut seen_classes = HashSet::new();
    let classes: Vec<String> = classes
        .into_iter()
        .filter(|n| seen_classes.insert(n.clone()))
        .collect();

    let mut seen_variables = HashSet::new();
    let variables: Vec<String> = variables
        .into_iter()
        .filter(|n| !functions.contains(n) && !classes.contains(n) && seen_variables.insert(n.clone()))
        .collect();

    Elements {
        functions,
        classes,
        variables,
    }
}

fn extract_js(content: &str) -> Elements {
    let mut functions: Vec<String> = js_function_re()
        .captures_iter(content)
        .map(|c| c.get(1).unwrap().as_str().to_string())
        .collect();
    functions.extend(
        js_const_fn_re()
            .captures_iter(content)
            .map(|c| c.get(1).unwrap().as_str().to_string()),
    );
    let classes = js_class_re()
        .captures_iter(content)
        .map(|c| c.get(1).unwrap().as_str().to_string())
        .collect();
    let variables = js_variable_re()
        .captures_iter(content)
        .map(|c| c.get(1).unwrap().as_str().to_string())
        .collect();

    dedup_disjoint(functions, classes, variables)
}

fn extract_python(content: &str) -> Elements {
    let functions = python_def_re()
        .captures_iter(content)
        .map(|c| c.get(1).unwrap().as_str().to_string())
        .collect();
    let classes = python_class_re()
        .captures_iter(content)
        .map(|c| c.get(1).unwrap().as_str().to_string())
        .collect();
    let variables = python_variable_re()
        .captures_iter(content)
        .map(|c| c.get(1).unwrap().as_str().to_string())
        .collect();

    dedup_disjoint(functions, classes, variables)
}

fn extract_java(content: &str) -> Elements {
    let classes = java_class_re()
        .captures_iter(content)
        .map(|c| c.get(1).unwrap().as_str().to_string())
        .collect();
    let functions: Vec<String> = java_method_re()
        .captures_iter(content)
        .map(|c| c.get(1).unwrap().as_str().to_string())
        .filter(|name| !JAVA_CONTROL_KEYWORDS.contains(&name.as_str()))
        .collect();
    let variables = java_field_re()
        .captures_iter(content)
        .map(|c| c.get(1).unwrap().as_str().to_string())
        .collect();

    dedup_disjoint(functions, classes, variables)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn js_top_level_function_and_class_are_captured() {
        let content = "export function fetchUser(id) {}\nclass UserStore {}\n";
        let elements = extract(TypeTag::JavaScript, content);
        assert_eq!(elements.functions, vec!["fetchUser"]);
        assert_eq!(elements.classes, vec!["UserStore"]);
    }

    #[test]
    fn js_arrow_const_is_captured_as_function_not_variable() {
        let content = "const compute = (a, b) => a + b;\n";
        let elements = extract(TypeTag::JavaScript, content);
        assert_eq!(elements.functions, vec!["compute"]);
        assert!(!elements.variables.contains(&"compute".to_string()));
    }

    #[test]
    fn python_def_and_class_are_captured() {
        let content = "def handler(request):\n    pass\n\n\nclass Handler:\n    pass\n";
        let elements = extract(TypeTag::Python, content);
        assert_eq!(elements.functions, vec!["handler"]);
        assert_eq!(elements.classes, vec!["Handler"]);
    }

    #[test]
    fn java_control_keywords_excluded_from_methods() {
        let content = "public class Foo {\n    public void bar() {\n        if (true) {}\n    }\n}\n";
        let elements = extract(TypeTag::Java, content);
        assert!(!elements.functions.contains(&"if".to_string()));
        assert!(elements.functions.contains(&"bar".to_string()));
    }

    #[test]
    fn unsupported_tag_yields_empty_elements() {
        let elements = extract(TypeTag::Go, "func main() {}\n");
        assert_eq!(elements, Elements::default());
    }
}
