//! Pure path arithmetic over workspace-relative POSIX paths. No I/O.

/// Extension-variant probe order for extensionless relative specifiers
/// (`spec.md` §4.1). Order is significant: the first variant present in the
/// file map wins.
const BARE_EXTENSIONS: &[&str] = &[
    "ts", "js", "tsx", "jsx", "py", "java", "go", "php", "html", "htm", "css", "scss", "sql",
];

/// Extensions that additionally get an `index.<ext>` probe under the
/// resolved directory.
const INDEX_EXTENSIONS: &[&str] = &["ts", "js", "tsx", "jsx", "php", "html"];

/// Normalize a `/`-joined path: collapse `.` segments, resolve `..` against
/// the preceding segment, drop empty segments. Never escapes above the
/// workspace root (a leading `..` is dropped rather than producing `../x`).
fn normalize(path: &str) -> String {
    let mut out: Vec<&str> = Vec::new();
    for seg in path.split('/') {
        match seg {
            "" | "." => continue,
            ".." => {
                out.pop();
            }
            s => out.push(s),
        }
    }
    out.join("/")
}

/// Directory component of a workspace-relative path (the empty string for a
/// bare top-level file name).
fn dirname(path: &str) -> &str {
    match path.rfind('/') {
        Some(idx) => &path[..idx],
        None => "",
    }
}

fn join(dir: &str, rest: &str) -> String {
    if dir.is_empty() {
        rest.to_string()
    } else {
        format!("{dir}/{rest}")
    }
}

/// Interpret `spec` (a relative or absolute-in-workspace import specifier)
/// against the directory of `from_file`, normalize, and return a
/// forward-slash workspace-relative path. Idempotent under normalization:
/// `resolve_relative` applied to its own output (relative to the same
/// directory) is a no-op.
pub fn resolve_relative(from_file: &str, spec: &str) -> String {
    let spec = spec.replace('\\', "/");
    if let Some(rest) = spec.strip_prefix('/') {
        return normalize(rest);
    }
    let dir = dirname(from_file);
    normalize(&join(dir, &spec))
}

/// Strip exactly one leading `.` from a Python dotted import (`from . import
/// x` style already has the dot stripped by the caller's regex; this
/// handles `from .foo.bar import baz` → dotted == "foo.bar"), split on `.`,
/// and treat the remainder as path segments relative to `from_file`'s
/// directory.
pub fn resolve_python_dotted(from_file: &str, dotted: &str) -> String {
    let dotted = dotted.strip_prefix('.').unwrap_or(dotted);
    let rel = dotted.replace('.', "/");
    let dir = dirname(from_file);
    normalize(&join(dir, &rel))
}

/// Ordered sequence of candidate paths to probe against the project file
/// map when `base_path` has no extension: `base_path` itself, then
/// `base_path.<ext>` for each of [`BARE_EXTENSIONS`], then
/// `base_path/index.<ext>` for each of [`INDEX_EXTENSIONS`]. If
/// `base_path` already has an extension, it is the sole candidate.
pub fn extension_variants(base_path: &str) -> Vec<String> {
    let has_extension = base_path
        .rsplit('/')
        .next()
        .is_some_and(|last| last.contains('.'));

    if has_extension {
        return vec![base_path.to_string()];
    }

    let mut variants = Vec::with_capacity(1 + BARE_EXTENSIONS.len() + INDEX_EXTENSIONS.len());
    variants.push(base_path.to_string());
    for ext in BARE_EXTENSIONS {
        variants.push(format!("{base_path}.{ext}"));
    }
    for ext in INDEX_EXTENSIONS {
        variants.push(format!("{base_path}/index.{ext}"));
    }
    variants
}
