use std::path::PathBuf;

use thiserror::Error;

/// The kinds of error the engine can produce, per the error-handling design:
/// nearly all of these are *recovered locally* (logged, the owning unit
/// contributes an empty result) and never reach a caller. Only root-level
/// failures surface through [`AnalyzerError`].
#[derive(Debug, Error)]
pub enum AnalyzerError {
    #[error("failed to read file {path}: {cause}")]
    FileRead {
        path: PathBuf,
        cause: String,
        suggestion: Option<String>,
    },

    #[error("failed to read directory {path}: {cause}")]
    DirectoryRead {
        path: PathBuf,
        cause: String,
        suggestion: Option<String>,
    },

    #[error("failed to analyze {path}: {cause}")]
    Analysis {
        path: PathBuf,
        cause: String,
        suggestion: Option<String>,
    },

    #[error("host boundary error: {cause}")]
    Webview {
        path: Option<PathBuf>,
        cause: String,
        suggestion: Option<String>,
    },

    #[error("failed to save file {path}: {cause}")]
    FileSave {
        path: PathBuf,
        cause: String,
        suggestion: Option<String>,
    },

    #[error("workspace root {path} is unreadable: {cause}")]
    RootUnreadable { path: PathBuf, cause: String },
}

/// Informational, non-error conditions surfaced as log events rather than
/// propagated as [`AnalyzerError`]: memory pressure, slow stages, and
/// (deliberately) circular dependencies, which are a finding, not a fault.
#[derive(Debug, Clone)]
pub enum Advisory {
    MemoryWarning { heap_bytes: u64 },
    PerformanceWarning { stage: &'static str, millis: u128 },
    CircularDependency { cycle: Vec<String> },
}

impl std::fmt::Display for Advisory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Advisory::MemoryWarning { heap_bytes } => write!(
                f,
                "memory usage {:.1} MB exceeds 500 MB budget",
                *heap_bytes as f64 / (1024.0 * 1024.0)
            ),
            Advisory::PerformanceWarning { stage, millis } => {
                write!(f, "stage {stage} took {millis} ms")
            }
            Advisory::CircularDependency { cycle } => {
                write!(f, "circular dependency: {}", cycle.join(" -> "))
            }
        }
    }
}
