//! Content cache keyed by workspace-relative path: always populated
//! per-run as a read-only lookup (`spec.md` §4.9), plus an optional
//! cross-run on-disk cache keyed by content hash so an unchanged file skips
//! re-extraction entirely (`spec.md` §9 supplemented feature).
//!
//! A cache hit and a cache miss must produce byte-identical dependency
//! edges for the same file content — the cache is an optimization, never a
//! source of divergent behavior.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::elements::Elements;
use crate::types::Dependency;

/// Per-file cached extraction output, content-hash keyed for staleness
/// detection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedFileResult {
    pub hash: String,
    pub dependencies: Vec<Dependency>,
    pub comments: Vec<String>,
    pub elements: Elements,
}

const CACHE_DIR: &str = ".project-analyzer";
const CACHE_FILE: &str = "cache.json";

/// Cross-run, on-disk cache stored at `<root>/.project-analyzer/cache.json`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisCache {
    pub files: HashMap<String, CachedFileResult>,
}

impl AnalysisCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(project_root: &Path) -> Result<Self> {
        let cache_path = project_root.join(CACHE_DIR).join(CACHE_FILE);
        if !cache_path.exists() {
            return Ok(Self::new());
        }
        let content = std::fs::read_to_string(&cache_path).context("failed to read analysis cache")?;
        serde_json::from_str(&content).context("failed to parse analysis cache")
    }

    pub fn save(&self, project_root: &Path) -> Result<()> {
        let cache_dir = project_root.join(CACHE_DIR);
        std::fs::create_dir_all(&cache_dir).context("failed to create cache directory")?;
        let cache_path = cache_dir.join(CACHE_FILE);
        let content = serde_json::to_string_pretty(self).context("failed to serialize analysis cache")?;
        std::fs::write(&cache_path, content).context("failed to write analysis cache")
    }

    /// Returns the cached result iff present and its stored hash matches
    /// `content`'s current hash.
    pub fn get(&self, rel_path: &str, content: &str) -> Option<&CachedFileResult> {
        let cached = self.files.get(rel_path)?;
        (cached.hash == compute_hash(content)).then_some(cached)
    }

    pub fn insert(&mut self, rel_path: String, content: &str, mut result: CachedFileResult) {
        result.hash = compute_hash(content);
        self.files.insert(rel_path, result);
    }

    /// Drop entries for files no longer present in the scanned tree.
    pub fn prune(&mut self, existing_files: &[String]) {
        let existing: std::collections::HashSet<&str> = existing_files.iter().map(|s| s.as_str()).collect();
        self.files.retain(|path, _| existing.contains(path.as_str()));
    }
}

pub fn compute_hash(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Per-run, in-memory content cache: the facade populates this as it reads
/// each file and exposes it read-only afterward (`spec.md` §3 Lifecycle).
#[derive(Debug, Clone, Default)]
pub struct RunContentCache {
    content: HashMap<String, String>,
}

impl RunContentCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, rel_path: String, content: String) {
        self.content.insert(rel_path, content);
    }

    pub fn get(&self, rel_path: &str) -> Option<&str> {
        self.content.get(rel_path).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}
