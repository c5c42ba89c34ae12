//! Process memory sampling at pipeline milestones (`spec.md` §5): "the
//! implementation must sample process memory at milestones and log a
//! warning when heap usage exceeds 500 MB." No crate in the retrieval pack
//! does this kind of introspection, so this reads `/proc/self/status`
//! directly — best-effort, Linux-only, `None` anywhere else or on parse
//! failure.

use crate::error::Advisory;

const WARNING_THRESHOLD_BYTES: u64 = 500 * 1024 * 1024;

/// Current resident set size in bytes, or `None` if it can't be determined
/// (non-Linux, or the kernel interface is unavailable/unparsable).
pub fn resident_set_bytes() -> Option<u64> {
    let status = std::fs::read_to_string("/proc/self/status").ok()?;
    for line in status.lines() {
        if let Some(rest) = line.strip_prefix("VmRSS:") {
            let kb: u64 = rest.trim().trim_end_matches(" kB").trim().parse().ok()?;
            return Some(kb * 1024);
        }
    }
    None
}

/// Sample current memory usage and log a warning through `logger` if it
/// exceeds [`WARNING_THRESHOLD_BYTES`]. A no-op (and silent) when the
/// sample can't be taken — this is advisory, never a failure path.
pub fn sample_and_warn(stage: &str, logger: &dyn crate::host::Logger) {
    if let Some(bytes) = resident_set_bytes() {
        if bytes > WARNING_THRESHOLD_BYTES {
            let advisory = Advisory::MemoryWarning { heap_bytes: bytes };
            logger.warn(&format!("at {stage}: {advisory}"));
        }
    }
}
