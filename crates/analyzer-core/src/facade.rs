//! Single entry point: `ProjectAnalyzer::analyze(rootPath)` (`spec.md`
//! §4.9). Orchestrates Scanner → bounded-parallel content read + cache-or-
//! extract → dedup → usage/reference/layer computation → stats.

use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rayon::prelude::*;

use crate::builder;
use crate::cache::{AnalysisCache, CachedFileResult, RunContentCache};
use crate::comments;
use crate::config::Config;
use crate::elements::{self, Elements};
use crate::graph;
use crate::host::{Logger, ProgressSink, Stage};
use crate::layer;
use crate::memory;
use crate::scan;
use crate::types::{Dependency, FileNode, FileTree, Layer, LayerMap, ProjectStats, ProjectStructure};

/// Files are read and extracted in batches of this size so memory stays
/// bounded on very large workspaces (`spec.md` §4.9/§5).
const EXTRACTION_BATCH_SIZE: usize = 20;

/// Outcome of an `analyze` call: the happy path, a cooperative
/// cancellation, or a root-level failure (`spec.md` §4.10).
pub enum AnalysisOutcome {
    Structure(ProjectStructure),
    Cancelled,
    Error(crate::error::AnalyzerError),
}

/// Cooperative cancellation token. Checked between extraction batches; does
/// not interrupt a single in-flight file read.
#[derive(Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

pub struct ProjectAnalyzer<'a> {
    logger: &'a dyn Logger,
    progress: &'a dyn ProgressSink,
    cancellation: CancellationToken,
    content_cache: RunContentCache,
}

impl<'a> ProjectAnalyzer<'a> {
    pub fn new(logger: &'a dyn Logger, progress: &'a dyn ProgressSink) -> Self {
        Self {
            logger,
            progress,
            cancellation: CancellationToken::new(),
            content_cache: RunContentCache::new(),
        }
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }

    /// Read-only lookup into the per-run content cache populated during the
    /// most recent `analyze` call (`spec.md` §3 Lifecycle).
    pub fn cached_content(&self, rel_path: &str) -> Option<&str> {
        self.content_cache.get(rel_path)
    }

    /// Alias for [`Self::analyze`]: the cross-run content-hash cache is
    /// always consulted transparently, so there is no separate code path to
    /// opt into. Named for hosts that want to be explicit that they expect
    /// unchanged files to be served from `.project-analyzer/cache.json`
    /// rather than re-extracted (`SPEC_FULL.md`'s incremental-cache section).
    pub fn analyze_incremental(&mut self, root_path: &Path) -> AnalysisOutcome {
        self.analyze(root_path)
    }

    pub fn analyze(&mut self, root_path: &Path) -> AnalysisOutcome {
        if let Err(e) = std::fs::read_dir(root_path) {
            let err = crate::error::AnalyzerError::RootUnreadable {
                path: root_path.to_path_buf(),
                cause: e.to_string(),
            };
            self.logger.error(&err.to_string());
            return AnalysisOutcome::Error(err);
        }

        let config = Config::load_or_default(root_path);

        self.progress.on_stage(Stage::ScanStart, 0);
        let file_tree: FileTree =
            scan::scan_with_extra_ignored(root_path, &config.scan.extra_ignored_dirs, self.logger);
        let flattened: Vec<&FileNode> = scan::flatten_files(&file_tree);
        let supported: Vec<&FileNode> = flattened
            .iter()
            .filter(|f| {
                let ext = f.extension.trim_start_matches('.');
                crate::classify::is_supported_extension_with_extras(ext, &config.extensions.extra_supported)
            })
            .copied()
            .collect();
        self.progress.on_stage(Stage::ScanDone, supported.len());
        memory::sample_and_warn(Stage::ScanDone.as_str(), self.logger);

        if self.cancellation.is_cancelled() {
            return AnalysisOutcome::Cancelled;
        }

        self.progress.on_stage(Stage::DepsStart, 0);
        let project_files = builder::project_file_set(&supported);

        let mut disk_cache = AnalysisCache::load(root_path).unwrap_or_default();

        let mut all_deps = Vec::new();
        let mut per_file_comments: HashMap<String, Vec<String>> = HashMap::new();
        let mut per_file_elements: HashMap<String, Elements> = HashMap::new();

        for batch in supported.chunks(EXTRACTION_BATCH_SIZE) {
            if self.cancellation.is_cancelled() {
                return AnalysisOutcome::Cancelled;
            }

            let batch_results: Vec<Option<ExtractedFile>> = batch
                .par_iter()
                .map(|file| read_and_extract(file, &project_files, &disk_cache, self.logger))
                .collect();

            for result in batch_results.into_iter().flatten() {
                if result.from_cache_miss {
                    disk_cache.insert(
                        result.path.clone(),
                        &result.content,
                        CachedFileResult {
                            hash: String::new(),
                            dependencies: result.dependencies.clone(),
                            comments: result.comments.clone(),
                            elements: result.elements.clone(),
                        },
                    );
                }
                all_deps.extend(result.dependencies);
                self.content_cache.insert(result.path.clone(), result.content);
                per_file_comments.insert(result.path.clone(), result.comments);
                per_file_elements.insert(result.path, result.elements);
            }
        }

        let existing: Vec<String> = supported.iter().map(|f| f.path.clone()).collect();
        disk_cache.prune(&existing);
        if let Err(e) = disk_cache.save(root_path) {
            self.logger.warn(&format!("failed to persist analysis cache: {e}"));
        }

        let dependencies = builder::dedup(all_deps);
        self.progress.on_stage(Stage::DepsDone, dependencies.len());
        memory::sample_and_warn(Stage::DepsDone.as_str(), self.logger);

        let mut files: Vec<FileNode> = supported.into_iter().cloned().collect();
        let mut layers = LayerMap::default();
        for file in &mut files {
            if let Some(c) = per_file_comments.remove(&file.path) {
                file.comments = c;
            }
            if let Some(e) = per_file_elements.remove(&file.path) {
                file.functions = e.functions;
                file.classes = e.classes;
                file.variables = e.variables;
            }
            file.reference_count = graph::reference_counts(&dependencies)
                .get(&file.path)
                .copied()
                .unwrap_or(0);
            file.is_used = graph::is_used(&file.path, &dependencies);

            let assigned = layer::assign_with_extras(&file.path, &file.name, &config.layers);
            layers.push(assigned, file.path.clone());
        }

        let stats = compute_stats(&files, &dependencies);
        self.progress.on_stage(Stage::Done, files.len());
        memory::sample_and_warn(Stage::Done.as_str(), self.logger);

        AnalysisOutcome::Structure(ProjectStructure {
            root_path: root_path.to_string_lossy().to_string(),
            files,
            file_tree,
            dependencies,
            layers,
            stats,
        })
    }
}

/// One file's content plus its extracted dependencies/comments/elements,
/// whether served from the cross-run cache or computed fresh this run.
struct ExtractedFile {
    path: String,
    content: String,
    dependencies: Vec<Dependency>,
    comments: Vec<String>,
    elements: Elements,
    from_cache_miss: bool,
}

fn read_and_extract(
    file: &FileNode,
    project_files: &std::collections::HashSet<String>,
    disk_cache: &AnalysisCache,
    logger: &dyn Logger,
) -> Option<ExtractedFile> {
    let content = match std::fs::read_to_string(&file.full_path) {
        Ok(c) => c,
        Err(e) => {
            logger.warn(&format!("failed to read {}: {e}", file.full_path));
            return None;
        }
    };

    if let Some(hit) = disk_cache.get(&file.path, &content) {
        return Some(ExtractedFile {
            path: file.path.clone(),
            content,
            dependencies: hit.dependencies.clone(),
            comments: hit.comments.clone(),
            elements: hit.elements.clone(),
            from_cache_miss: false,
        });
    }

    let dependencies = builder::extract_file(file, &content, project_files);
    let comments = comments::extract(file.type_tag, &content);
    let elements = elements::extract(file.type_tag, &content);

    Some(ExtractedFile {
        path: file.path.clone(),
        content,
        dependencies,
        comments,
        elements,
        from_cache_miss: true,
    })
}

fn compute_stats(files: &[FileNode], dependencies: &[crate::types::Dependency]) -> ProjectStats {
    let total_files = files.len();
    let total_size: u64 = files.iter().map(|f| f.size).sum();
    let total_dependencies = dependencies.len();

    let mut files_by_type: HashMap<String, usize> = HashMap::new();
    for file in files {
        *files_by_type.entry(file.type_tag.to_string()).or_insert(0) += 1;
    }

    let average_file_size = if total_files == 0 {
        0.0
    } else {
        total_size as f64 / total_files as f64
    };

    let dependency_ratio = if total_files == 0 {
        0.0
    } else {
        (total_dependencies as f64 / total_files as f64) * 100.0
    };

    ProjectStats {
        total_files,
        total_size,
        total_dependencies,
        files_by_type,
        average_file_size,
        dependency_ratio,
    }
}

/// `Layer::ALL` is re-exported here so consumers of the facade can iterate
/// the fixed layer set without reaching into `crate::types` directly.
pub const ALL_LAYERS: [Layer; 5] = Layer::ALL;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{NullLogger, NullProgressSink};
    use std::fs;

    #[test]
    fn empty_workspace_yields_empty_structure() {
        let dir = tempfile::tempdir().unwrap();
        let mut analyzer = ProjectAnalyzer::new(&NullLogger, &NullProgressSink);
        match analyzer.analyze(dir.path()) {
            AnalysisOutcome::Structure(structure) => {
                assert!(structure.files.is_empty());
                assert_eq!(structure.stats.total_files, 0);
            }
            _ => panic!("expected Structure outcome"),
        }
    }

    #[test]
    fn simple_import_chain_produces_one_edge_and_reference_count() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.js"), "import './b';\n").unwrap();
        fs::write(dir.path().join("b.js"), "export const x = 1;\n").unwrap();

        let mut analyzer = ProjectAnalyzer::new(&NullLogger, &NullProgressSink);
        match analyzer.analyze(dir.path()) {
            AnalysisOutcome::Structure(structure) => {
                assert_eq!(structure.dependencies.len(), 1);
                let b = structure.files.iter().find(|f| f.name == "b.js").unwrap();
                assert_eq!(b.reference_count, 1);
                assert!(b.is_used);
            }
            _ => panic!("expected Structure outcome"),
        }
    }

    #[test]
    fn config_file_extra_ignored_dirs_and_extra_extensions_are_honored() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(".project-analyzer.toml"),
            "[scan]\nextra_ignored_dirs = [\"vendor\"]\n\n[extensions]\nextra_supported = [\"zig\"]\n",
        )
        .unwrap();
        fs::create_dir(dir.path().join("vendor")).unwrap();
        fs::write(dir.path().join("vendor/lib.js"), "console.log(1);\n").unwrap();
        fs::write(dir.path().join("main.zig"), "pub fn main() void {}\n").unwrap();

        let mut analyzer = ProjectAnalyzer::new(&NullLogger, &NullProgressSink);
        match analyzer.analyze(dir.path()) {
            AnalysisOutcome::Structure(structure) => {
                assert!(!structure.files.iter().any(|f| f.path.starts_with("vendor")));
                assert!(structure.files.iter().any(|f| f.name == "main.zig"));
            }
            _ => panic!("expected Structure outcome"),
        }
    }

    #[test]
    fn nonexistent_root_is_a_root_level_error() {
        let mut analyzer = ProjectAnalyzer::new(&NullLogger, &NullProgressSink);
        match analyzer.analyze(Path::new("/nonexistent/path/for/test")) {
            AnalysisOutcome::Error(_) => {}
            _ => panic!("expected Error outcome"),
        }
    }

    #[test]
    fn second_run_reuses_cross_run_cache_with_identical_results() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.js"), "import './b';\n").unwrap();
        fs::write(dir.path().join("b.js"), "export const x = 1;\n").unwrap();

        let mut first = ProjectAnalyzer::new(&NullLogger, &NullProgressSink);
        let first_structure = match first.analyze(dir.path()) {
            AnalysisOutcome::Structure(s) => s,
            _ => panic!("expected Structure outcome"),
        };
        assert!(dir.path().join(".project-analyzer/cache.json").exists());

        let mut second = ProjectAnalyzer::new(&NullLogger, &NullProgressSink);
        let second_structure = match second.analyze(dir.path()) {
            AnalysisOutcome::Structure(s) => s,
            _ => panic!("expected Structure outcome"),
        };

        assert_eq!(
            first_structure.dependencies.len(),
            second_structure.dependencies.len()
        );
        assert_eq!(first_structure.dependencies[0].to, second_structure.dependencies[0].to);
    }

    #[test]
    fn analyze_incremental_reuses_cache_like_a_plain_second_analyze_call() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.js"), "import './b';\n").unwrap();
        fs::write(dir.path().join("b.js"), "export const x = 1;\n").unwrap();

        let mut first = ProjectAnalyzer::new(&NullLogger, &NullProgressSink);
        let first_structure = match first.analyze(dir.path()) {
            AnalysisOutcome::Structure(s) => s,
            _ => panic!("expected Structure outcome"),
        };

        let mut second = ProjectAnalyzer::new(&NullLogger, &NullProgressSink);
        let second_structure = match second.analyze_incremental(dir.path()) {
            AnalysisOutcome::Structure(s) => s,
            _ => panic!("expected Structure outcome"),
        };

        assert_eq!(
            first_structure.dependencies.len(),
            second_structure.dependencies.len()
        );
    }

    #[test]
    fn cancellation_before_extraction_short_circuits() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.js"), "import './b';\n").unwrap();
        let token = CancellationToken::new();
        token.cancel();
        let mut analyzer =
            ProjectAnalyzer::new(&NullLogger, &NullProgressSink).with_cancellation(token);
        match analyzer.analyze(dir.path()) {
            AnalysisOutcome::Cancelled => {}
            _ => panic!("expected Cancelled outcome"),
        }
    }
}
