//! Deterministic, first-match layer cascade (`spec.md` §4.7). Not
//! glob-based: every check is a case-insensitive substring test against the
//! lower-cased `path`/`name`, in a fixed order.

use crate::types::Layer;

const PRESENTATION_SUBSTRINGS: &[&str] = &[
    "view", "component", "ui", "page", "screen", "widget", "template", "layout",
];
const PRESENTATION_EXTENSIONS: &[&str] = &[
    ".vue", ".svelte", ".tsx", ".jsx", ".html", ".htm", ".css", ".scss", ".sass", ".less",
];

const BUSINESS_SUBSTRINGS: &[&str] = &[
    "service",
    "business",
    "controller",
    "handler",
    "manager",
    "provider",
    "api",
    "route",
    "endpoint",
    "middleware",
];

const DATA_SUBSTRINGS: &[&str] = &[
    "model",
    "data",
    "repository",
    "entity",
    "schema",
    "database",
    "migration",
    "seed",
];
const DATA_EXTENSIONS: &[&str] = &[".sql", ".graphql", ".gql"];

const UTILS_SUBSTRINGS: &[&str] =
    &["util", "helper", "common", "shared", "lib", "tool", "constant", "enum"];

const CONFIG_EXACT_NAMES: &[&str] = &[
    "package.json",
    "tsconfig.json",
    "webpack.config.js",
    "babel.config.js",
    ".env",
];
const CONFIG_EXTENSIONS: &[&str] = &[
    ".env", ".json", ".yaml", ".yml", ".xml", ".toml", ".ini", ".properties", ".conf",
];

const BACKEND_SOURCE_EXTENSIONS: &[&str] = &[".php", ".py", ".java", ".cs", ".go", ".rs"];

fn has_any_substring(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| haystack.contains(n))
}

fn has_any_extension(path: &str, extensions: &[&str]) -> bool {
    extensions.iter().any(|ext| path.ends_with(ext))
}

/// Assign a file to exactly one of the five fixed layers, given its
/// workspace-relative `path` and bare `name`. Canonical cascade order:
/// presentation → business → data → utils → config → fallback.
pub fn assign(path: &str, name: &str) -> Layer {
    assign_with_extras(path, name, &crate::config::LayersConfig::default())
}

/// As [`assign`], but each cascade step also checks the extra substrings
/// configured for that layer in `.project-analyzer.toml` before falling
/// through to the next layer.
pub fn assign_with_extras(path: &str, name: &str, extras: &crate::config::LayersConfig) -> Layer {
    let path_lower = path.to_lowercase();
    let name_lower = name.to_lowercase();

    if has_any_substring(&path_lower, PRESENTATION_SUBSTRINGS)
        || has_any_extension(&path_lower, PRESENTATION_EXTENSIONS)
        || has_any_owned_substring(&path_lower, &extras.presentation)
    {
        return Layer::Presentation;
    }

    if has_any_substring(&path_lower, BUSINESS_SUBSTRINGS)
        || has_any_owned_substring(&path_lower, &extras.business)
    {
        return Layer::Business;
    }

    if has_any_substring(&path_lower, DATA_SUBSTRINGS)
        || has_any_extension(&path_lower, DATA_EXTENSIONS)
        || has_any_owned_substring(&path_lower, &extras.data)
    {
        return Layer::Data;
    }

    if has_any_substring(&path_lower, UTILS_SUBSTRINGS) || has_any_owned_substring(&path_lower, &extras.utils) {
        return Layer::Utils;
    }

    if path_lower.contains("config")
        || name_lower.contains("config")
        || CONFIG_EXACT_NAMES.contains(&name_lower.as_str())
        || has_any_extension(&path_lower, CONFIG_EXTENSIONS)
        || has_any_owned_substring(&path_lower, &extras.config)
    {
        return Layer::Config;
    }

    if has_any_extension(&path_lower, BACKEND_SOURCE_EXTENSIONS) {
        Layer::Business
    } else {
        Layer::Utils
    }
}

fn has_any_owned_substring(haystack: &str, needles: &[String]) -> bool {
    needles.iter().any(|n| haystack.contains(n.as_str()))
}
