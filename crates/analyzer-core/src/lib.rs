pub mod builder;
pub mod cache;
pub mod classify;
pub mod comments;
pub mod config;
pub mod dblink;
pub mod elements;
pub mod error;
pub mod extract;
pub mod facade;
pub mod graph;
pub mod host;
pub mod layer;
pub mod memory;
pub mod path;
pub mod scan;
pub mod types;

pub use error::{Advisory, AnalyzerError};
pub use facade::{AnalysisOutcome, ProjectAnalyzer};
pub use host::{Logger, NullLogger, NullProgressSink, ProgressSink, Stage, TracingLogger};
pub use types::{
    Dependency, DependencyKind, FileNode, FileTree, Layer, LayerMap, Node, ProjectStats,
    ProjectStructure, TypeTag,
};
