//! Per-language lexical dependency extraction. Each submodule maps a file's
//! textual content to a set of outgoing [`Dependency`](crate::types::Dependency)
//! edges by regex, not by parsing an AST.

mod css;
mod go;
mod html;
mod java;
mod js;
mod php;
mod python;

use std::collections::HashSet;

use crate::types::{Dependency, TypeTag};

/// Dispatch an already-read file's content to the extractor for its
/// [`TypeTag`], resolving relative specifiers against `path` and probing
/// `project_files` for existence. Returns no edges for tags with no
/// extractor (`spec.md` §9's extraction-dispatch subset).
pub fn extract(
    path: &str,
    type_tag: TypeTag,
    content: &str,
    project_files: &HashSet<String>,
) -> Vec<Dependency> {
    match type_tag {
        TypeTag::JavaScript | TypeTag::TypeScript => js::extract(path, content, project_files),
        TypeTag::Python => python::extract(path, content, project_files),
        TypeTag::Java => java::extract(path, content, project_files),
        TypeTag::Go => go::extract(path, content, project_files),
        TypeTag::Php => php::extract(path, content, project_files),
        TypeTag::Css => css::extract(path, content, project_files),
        TypeTag::Html => html::extract(path, content, project_files),
        _ => Vec::new(),
    }
}

/// Extensions dispatched to a real extractor above, as opposed to merely
/// classified/supported (`crate::classify`). Exists so `crate::builder` can
/// assert the intentional asymmetry between the supported-extension set and
/// the extraction-dispatch set without hand-maintaining two lists in sync.
pub fn has_extractor(type_tag: TypeTag) -> bool {
    matches!(
        type_tag,
        TypeTag::JavaScript
            | TypeTag::TypeScript
            | TypeTag::Python
            | TypeTag::Java
            | TypeTag::Go
            | TypeTag::Php
            | TypeTag::Css
            | TypeTag::Html
    )
}
