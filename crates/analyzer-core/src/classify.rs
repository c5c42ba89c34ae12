//! Maps file extensions to a closed set of language/type tags, and governs
//! which of those are admitted into dependency analysis.

use std::collections::HashSet;
use std::sync::OnceLock;

use crate::types::TypeTag;

/// `(extension without leading dot, type tag)` — the authoritative
/// extension → type table (`spec.md` §4.2, extension set from §6).
const EXTENSION_TABLE: &[(&str, TypeTag)] = &[
    ("js", TypeTag::JavaScript),
    ("jsx", TypeTag::JavaScript),
    ("ts", TypeTag::TypeScript),
    ("tsx", TypeTag::TypeScript),
    ("mjs", TypeTag::JavaScript),
    ("cjs", TypeTag::JavaScript),
    ("html", TypeTag::Html),
    ("htm", TypeTag::Html),
    ("css", TypeTag::Css),
    ("scss", TypeTag::Css),
    ("sass", TypeTag::Css),
    ("less", TypeTag::Css),
    ("vue", TypeTag::Vue),
    ("svelte", TypeTag::Svelte),
    ("astro", TypeTag::Astro),
    ("php", TypeTag::Php),
    ("py", TypeTag::Python),
    ("java", TypeTag::Java),
    ("cs", TypeTag::CSharp),
    ("cpp", TypeTag::Cpp),
    ("c", TypeTag::C),
    ("h", TypeTag::C),
    ("hpp", TypeTag::Cpp),
    ("go", TypeTag::Go),
    ("rs", TypeTag::Rust),
    ("rb", TypeTag::Ruby),
    ("swift", TypeTag::Swift),
    ("kt", TypeTag::Kotlin),
    ("scala", TypeTag::Scala),
    ("sql", TypeTag::Sql),
    ("graphql", TypeTag::GraphQl),
    ("gql", TypeTag::GraphQl),
    ("json", TypeTag::Json),
    ("xml", TypeTag::Xml),
    ("yaml", TypeTag::Yaml),
    ("yml", TypeTag::Yaml),
    ("toml", TypeTag::Toml),
    ("ini", TypeTag::Ini),
    ("env", TypeTag::Env),
    ("properties", TypeTag::Ini),
    ("conf", TypeTag::Ini),
    ("config", TypeTag::Ini),
    ("md", TypeTag::Markdown),
    ("mdx", TypeTag::Markdown),
    ("rst", TypeTag::Text),
    ("txt", TypeTag::Text),
    ("sh", TypeTag::Shell),
    ("bash", TypeTag::Shell),
    ("zsh", TypeTag::Shell),
    ("ps1", TypeTag::PowerShell),
    ("bat", TypeTag::Batch),
    ("cmd", TypeTag::Batch),
    ("r", TypeTag::R),
    ("m", TypeTag::MatlabOrObjC),
    ("dart", TypeTag::Dart),
    ("lua", TypeTag::Lua),
    ("pl", TypeTag::Perl),
    ("ex", TypeTag::Elixir),
    ("exs", TypeTag::Elixir),
];

/// The authoritative supported-extension set (`spec.md` §6): files with one
/// of these extensions are flattened into `ProjectStructure.files` and are
/// eligible for dependency analysis. This governs `files[]` membership, not
/// which extensions actually produce edges — only the `LanguageExtractor`
/// family (js/ts, python, java, go, php, css, html) does that. Extensions
/// like `.rs`, `.swift`, `.kt`, `.scala`, `.sql`, `.json` are supported
/// (classified, appear in the tree and in `files[]`/layer map) but have no
/// extractor, which is the intentional asymmetry in `spec.md` §9's second
/// Open Question — pinned by
/// `crate::builder::tests::rust_files_produce_no_dependency_edges_despite_being_supported`,
/// which has visibility into the extractor dispatch table.
fn supported_extensions() -> &'static HashSet<&'static str> {
    static SET: OnceLock<HashSet<&'static str>> = OnceLock::new();
    SET.get_or_init(|| EXTENSION_TABLE.iter().map(|(ext, _)| *ext).collect())
}

/// Classify a (lowercase, no leading dot) extension into its [`TypeTag`].
/// Unknown extensions map to `TypeTag::Unknown`.
pub fn classify_extension(extension: &str) -> TypeTag {
    EXTENSION_TABLE
        .iter()
        .find(|(ext, _)| *ext == extension)
        .map(|(_, tag)| *tag)
        .unwrap_or(TypeTag::Unknown)
}

/// Whether an extension (no leading dot, already lowercased) is in the
/// supported set governing dependency analysis and `files[]` membership.
pub fn is_supported_extension(extension: &str) -> bool {
    supported_extensions().contains(extension)
}

/// As [`is_supported_extension`], but also admitting any extension listed in
/// `.project-analyzer.toml`'s `[extensions] extra_supported` (additive only:
/// never narrows the built-in set).
pub fn is_supported_extension_with_extras(extension: &str, extra_supported: &[String]) -> bool {
    is_supported_extension(extension) || extra_supported.iter().any(|e| e == extension)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_at_least_forty_extensions() {
        assert!(EXTENSION_TABLE.len() >= 40);
    }

    #[test]
    fn unknown_extension_maps_to_unknown_tag() {
        assert_eq!(classify_extension("wasm"), TypeTag::Unknown);
    }

    #[test]
    fn known_extension_round_trip() {
        assert_eq!(classify_extension("ts"), TypeTag::TypeScript);
        assert_eq!(classify_extension("py"), TypeTag::Python);
        assert_eq!(classify_extension("scss"), TypeTag::Css);
    }

    #[test]
    fn every_supported_extension_is_classified() {
        for ext in supported_extensions() {
            assert_ne!(classify_extension(ext), TypeTag::Unknown, "{ext} should classify");
        }
    }

    #[test]
    fn rust_swift_kotlin_are_supported_but_have_no_extractor() {
        // Supported (appear in files[] / layer map) per spec.md §6. See
        // crate::builder for the test asserting they never produce edges.
        for ext in ["rs", "swift", "kt"] {
            assert!(is_supported_extension(ext));
        }
    }

    #[test]
    fn extra_supported_extends_without_narrowing_the_builtin_set() {
        let extras = vec!["zig".to_string()];
        assert!(is_supported_extension_with_extras("ts", &extras));
        assert!(is_supported_extension_with_extras("zig", &extras));
        assert!(!is_supported_extension_with_extras("wasm", &extras));
    }
}
