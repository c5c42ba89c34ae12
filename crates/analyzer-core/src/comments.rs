//! Extracts and normalizes doc-ish comments from file content, keyed by
//! extension family (`spec.md` §4.5).

use std::sync::OnceLock;

use regex::Regex;

use crate::types::TypeTag;

const MAX_COMMENTS: usize = 5;
const MIN_LENGTH: usize = 11;

fn block_comment_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)/\*(.*?)\*/").unwrap())
}

fn line_comment_re(prefix: &str) -> Regex {
    Regex::new(&format!(r"(?m)^\s*{}(.*)$", regex::escape(prefix))).unwrap()
}

fn python_triple_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"(?s)"""(.*?)"""|'''(.*?)'''"#).unwrap())
}

fn ruby_block_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?sm)^=begin(.*?)^=end").unwrap())
}

fn html_comment_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)<!--(.*?)-->").unwrap())
}

fn sql_line_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?m)--(.*)$").unwrap())
}

/// Strip leading `*` continuation markers, normalize line endings, and trim
/// surrounding whitespace.
fn normalize(raw: &str) -> String {
    raw.replace("\r\n", "\n")
        .lines()
        .map(|line| line.trim().trim_start_matches('*').trim())
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string()
}

fn collect(raw_comments: Vec<String>) -> Vec<String> {
    let mut out = Vec::new();
    for raw in raw_comments {
        let normalized = normalize(&raw);
        if normalized.len() <= MIN_LENGTH - 1 {
            continue;
        }
        if !out.contains(&normalized) {
            out.push(normalized);
        }
        if out.len() == MAX_COMMENTS {
            break;
        }
    }
    out
}

/// Extract up to [`MAX_COMMENTS`] de-duplicated, normalized comments from
/// `content`, using the recognition rules for `type_tag`'s family.
pub fn extract(type_tag: TypeTag, content: &str) -> Vec<String> {
    let raw: Vec<String> = match type_tag {
        TypeTag::JavaScript
        | TypeTag::TypeScript
        | TypeTag::Java
        | TypeTag::CSharp
        | TypeTag::Cpp
        | TypeTag::C
        | TypeTag::Go
        | TypeTag::Rust
        | TypeTag::Swift
        | TypeTag::Kotlin
        | TypeTag::Scala
        | TypeTag::Dart => c_family_comments(content),
        TypeTag::Python => {
            let mut out: Vec<String> = python_triple_re()
                .captures_iter(content)
                .map(|c| {
                    c.get(1)
                        .or_else(|| c.get(2))
                        .map(|m| m.as_str().to_string())
                        .unwrap_or_default()
                })
                .collect();
            out.extend(hash_line_comments(content));
            out
        }
        TypeTag::Php => {
            let mut out = c_family_comments(content);
            out.extend(hash_line_comments(content));
            out
        }
        TypeTag::Ruby => {
            let mut out: Vec<String> = ruby_block_re()
                .captures_iter(content)
                .map(|c| c.get(1).unwrap().as_str().to_string())
                .collect();
            out.extend(hash_line_comments(content));
            out
        }
        TypeTag::Html | TypeTag::Vue | TypeTag::Svelte | TypeTag::Astro => html_comment_re()
            .captures_iter(content)
            .map(|c| c.get(1).unwrap().as_str().to_string())
            .collect(),
        TypeTag::Css => {
            let mut out: Vec<String> = block_comment_re()
                .captures_iter(content)
                .map(|c| c.get(1).unwrap().as_str().to_string())
                .collect();
            out.extend(
                line_comment_re("//")
                    .captures_iter(content)
                    .map(|c| c.get(1).unwrap().as_str().to_string()),
            );
            out
        }
        TypeTag::Sql => {
            let mut out: Vec<String> = block_comment_re()
                .captures_iter(content)
                .map(|c| c.get(1).unwrap().as_str().to_string())
                .collect();
            out.extend(
                sql_line_re()
                    .captures_iter(content)
                    .map(|c| c.get(1).unwrap().as_str().to_string()),
            );
            out
        }
        _ => Vec::new(),
    };

    collect(raw)
}

fn c_family_comments(content: &str) -> Vec<String> {
    let mut out: Vec<String> = block_comment_re()
        .captures_iter(content)
        .map(|c| c.get(1).unwrap().as_str().to_string())
        .collect();
    out.extend(
        line_comment_re("//")
            .captures_iter(content)
            .map(|c| c.get(1).unwrap().as_str().to_string()),
    );
    out
}

fn hash_line_comments(content: &str) -> Vec<String> {
    line_comment_re("#")
        .captures_iter(content)
        .map(|c| c.get(1).unwrap().as_str().to_string())
        .collect()
}
