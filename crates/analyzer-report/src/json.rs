use analyzer_core::ProjectStructure;

/// Format a full `ProjectStructure` as JSON, compact (single-line) or
/// pretty-printed.
pub fn format_report(structure: &ProjectStructure, compact: bool) -> String {
    if compact {
        serde_json::to_string(structure).expect("ProjectStructure should be serializable")
    } else {
        serde_json::to_string_pretty(structure).expect("ProjectStructure should be serializable")
    }
}
