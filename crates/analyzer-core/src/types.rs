use std::fmt;

use serde::{Deserialize, Serialize};

/// A closed set of language/type tags a file extension can map to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum TypeTag {
    JavaScript,
    TypeScript,
    Html,
    Css,
    Vue,
    Svelte,
    Astro,
    Php,
    Python,
    Java,
    CSharp,
    Cpp,
    C,
    Go,
    Rust,
    Ruby,
    Swift,
    Kotlin,
    Scala,
    Sql,
    GraphQl,
    Json,
    Xml,
    Yaml,
    Toml,
    Ini,
    Env,
    Markdown,
    Text,
    Shell,
    PowerShell,
    Batch,
    R,
    MatlabOrObjC,
    Dart,
    Lua,
    Perl,
    Elixir,
    Unknown,
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

/// A single file or directory in the scanned workspace tree.
///
/// `isDirectory ⇒ extension == "" && size == 0`; `children` is present iff
/// `isDirectory`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileNode {
    pub path: String,
    pub full_path: String,
    pub name: String,
    pub extension: String,
    pub size: u64,
    pub type_tag: TypeTag,
    pub last_modified: i64,
    pub is_directory: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<FileNode>>,
    #[serde(default)]
    pub comments: Vec<String>,
    #[serde(default)]
    pub functions: Vec<String>,
    #[serde(default)]
    pub variables: Vec<String>,
    #[serde(default)]
    pub classes: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub is_used: bool,
    #[serde(default)]
    pub reference_count: usize,
}

impl FileNode {
    pub fn new_directory(path: String, full_path: String, name: String, last_modified: i64) -> Self {
        Self {
            path,
            full_path,
            name,
            extension: String::new(),
            size: 0,
            type_tag: TypeTag::Unknown,
            last_modified,
            is_directory: true,
            children: Some(Vec::new()),
            comments: Vec::new(),
            functions: Vec::new(),
            variables: Vec::new(),
            classes: Vec::new(),
            description: None,
            is_used: false,
            reference_count: 0,
        }
    }

    pub fn new_file(
        path: String,
        full_path: String,
        name: String,
        extension: String,
        size: u64,
        type_tag: TypeTag,
        last_modified: i64,
    ) -> Self {
        Self {
            path,
            full_path,
            name,
            extension,
            size,
            type_tag,
            last_modified,
            is_directory: false,
            children: None,
            comments: Vec::new(),
            functions: Vec::new(),
            variables: Vec::new(),
            classes: Vec::new(),
            description: None,
            is_used: false,
            reference_count: 0,
        }
    }
}

/// Top-level ordered sequence of [`FileNode`]s making up the scanned tree.
pub type FileTree = Vec<FileNode>;

/// Kind of a recognized cross-file relationship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DependencyKind {
    Import,
    Export,
    Inheritance,
    Include,
    Script,
    Stylesheet,
    Database,
}

/// The target of a [`Dependency`]: a real project file, or one of the three
/// synthetic markers. Kept as a tagged enum (not a string-prefix) per
/// REDESIGN FLAG 2 — analyses that only care about the real-file subgraph
/// (cycle detection, critical path) can match on `Node::Project` directly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum Node {
    Project(String),
    External(String),
    Missing(String),
    Database(String),
}

impl Node {
    /// The string form used in the serialized `Dependency.to` field and in
    /// cycle/critical-path node identifiers.
    pub fn as_key(&self) -> String {
        match self {
            Node::Project(p) => p.clone(),
            Node::External(n) => format!("[External] {n}"),
            Node::Missing(p) => format!("[Missing] {p}"),
            Node::Database(kind) => format!("[DB:{kind}]"),
        }
    }

    pub fn project_path(&self) -> Option<&str> {
        match self {
            Node::Project(p) => Some(p),
            _ => None,
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_key())
    }
}

/// A directed, kinded edge from a real project file to another node.
///
/// `(from, to, kind)` is unique across the whole edge list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dependency {
    pub from: String,
    pub to: String,
    pub kind: DependencyKind,
}

impl Dependency {
    pub fn new(from: impl Into<String>, to: Node, kind: DependencyKind) -> Self {
        Self {
            from: from.into(),
            to: to.as_key(),
            kind,
        }
    }

    pub fn key(&self) -> (String, String, DependencyKind) {
        (self.from.clone(), self.to.clone(), self.kind)
    }
}

/// One of the five fixed architectural layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layer {
    Presentation,
    Business,
    Data,
    Utils,
    Config,
}

impl Layer {
    pub const ALL: [Layer; 5] = [
        Layer::Presentation,
        Layer::Business,
        Layer::Data,
        Layer::Utils,
        Layer::Config,
    ];
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Layer::Presentation => write!(f, "presentation"),
            Layer::Business => write!(f, "business"),
            Layer::Data => write!(f, "data"),
            Layer::Utils => write!(f, "utils"),
            Layer::Config => write!(f, "config"),
        }
    }
}

/// Mapping from each fixed layer name to the set of file paths assigned to
/// it. A partition of `ProjectStructure.files` (every file in exactly one).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LayerMap {
    pub presentation: Vec<String>,
    pub business: Vec<String>,
    pub data: Vec<String>,
    pub utils: Vec<String>,
    pub config: Vec<String>,
}

impl LayerMap {
    pub fn push(&mut self, layer: Layer, path: String) {
        match layer {
            Layer::Presentation => self.presentation.push(path),
            Layer::Business => self.business.push(path),
            Layer::Data => self.data.push(path),
            Layer::Utils => self.utils.push(path),
            Layer::Config => self.config.push(path),
        }
    }

    pub fn get(&self, layer: Layer) -> &[String] {
        match layer {
            Layer::Presentation => &self.presentation,
            Layer::Business => &self.business,
            Layer::Data => &self.data,
            Layer::Utils => &self.utils,
            Layer::Config => &self.config,
        }
    }
}

/// Derived, recomputed-on-each-analysis totals over a [`ProjectStructure`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectStats {
    pub total_files: usize,
    pub total_size: u64,
    pub total_dependencies: usize,
    pub files_by_type: std::collections::HashMap<String, usize>,
    pub average_file_size: f64,
    pub dependency_ratio: f64,
}

/// The full output of a single `analyze(rootPath)` invocation. Immutable
/// once constructed; owns its nodes and edges by value so it serializes
/// cleanly and is cycle-safe at the data-model level.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectStructure {
    pub root_path: String,
    pub files: Vec<FileNode>,
    pub file_tree: FileTree,
    pub dependencies: Vec<Dependency>,
    pub layers: LayerMap,
    pub stats: ProjectStats,
}

impl ProjectStructure {
    pub fn empty(root_path: impl Into<String>) -> Self {
        Self {
            root_path: root_path.into(),
            files: Vec::new(),
            file_tree: Vec::new(),
            dependencies: Vec::new(),
            layers: LayerMap::default(),
            stats: ProjectStats::default(),
        }
    }
}
