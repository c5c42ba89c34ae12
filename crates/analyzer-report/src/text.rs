use colored::Colorize;

use analyzer_core::types::Layer;
use analyzer_core::{graph, ProjectStructure};

/// Format a full `ProjectStructure` for terminal output.
pub fn format_report(structure: &ProjectStructure) -> String {
    let mut out = String::new();

    out.push_str(&format!("\n{}\n", "Project Analysis".bold()));
    out.push_str(&format!("{}\n\n", "=".repeat(40)));

    out.push_str(&format!("{}: {}\n", "Root".bold(), structure.root_path));
    out.push_str(&format!(
        "{}: {} files, {} dependencies\n\n",
        "Summary".bold(),
        structure.stats.total_files,
        structure.stats.total_dependencies,
    ));

    out.push_str(&format!("{}\n{}\n", "Stats".bold(), "-".repeat(40)));
    out.push_str(&format!(
        "  Total size:        {} bytes\n",
        structure.stats.total_size
    ));
    out.push_str(&format!(
        "  Average file size: {:.1} bytes\n",
        structure.stats.average_file_size
    ));
    out.push_str(&format!(
        "  Dependency ratio:  {:.1}%\n",
        structure.stats.dependency_ratio
    ));

    if !structure.stats.files_by_type.is_empty() {
        out.push_str("\n  Files by type:\n");
        let mut types: Vec<_> = structure.stats.files_by_type.iter().collect();
        types.sort_by_key(|(k, _)| (*k).clone());
        for (type_tag, count) in types {
            out.push_str(&format!("    {type_tag}: {count}\n"));
        }
    }

    out.push_str(&format!("\n{}\n{}\n", "Layers".bold(), "-".repeat(40)));
    for layer in Layer::ALL {
        let files = structure.layers.get(layer);
        out.push_str(&format!("  {}: {} files\n", layer, files.len()));
    }

    let cycles = graph::find_cycles(&structure.dependencies);
    out.push_str(&format!("\n{}\n{}\n", "Circular dependencies".bold(), "-".repeat(40)));
    if cycles.is_empty() {
        out.push_str(&format!("  {}\n", "none found".green()));
    } else {
        for cycle in &cycles {
            out.push_str(&format!("  {}\n", cycle.join(" -> ").red()));
        }
    }

    let critical_path = graph::critical_path(&structure.dependencies);
    if !critical_path.is_empty() {
        out.push_str(&format!("\n{}\n{}\n", "Critical path".bold(), "-".repeat(40)));
        out.push_str(&format!("  {} ({} files)\n", critical_path.join(" -> "), critical_path.len()));
    }

    let unused: Vec<&str> = structure
        .files
        .iter()
        .filter(|f| !f.is_used)
        .map(|f| f.path.as_str())
        .collect();
    if unused.is_empty() {
        out.push_str(&format!("\n{}\n", "Every file is reachable.".green().bold()));
    } else {
        out.push_str(&format!(
            "\n{} ({} found)\n{}\n",
            "Unused files".yellow().bold(),
            unused.len(),
            "-".repeat(40),
        ));
        for path in unused {
            out.push_str(&format!("  {path}\n"));
        }
    }

    out
}
