//! End-to-end scenarios driving `ProjectAnalyzer::analyze` over small
//! synthetic workspaces.

use std::fs;

use analyzer_core::host::{NullLogger, NullProgressSink};
use analyzer_core::types::Layer;
use analyzer_core::{AnalysisOutcome, ProjectAnalyzer};

fn analyze(dir: &std::path::Path) -> analyzer_core::ProjectStructure {
    let mut analyzer = ProjectAnalyzer::new(&NullLogger, &NullProgressSink);
    match analyzer.analyze(dir) {
        AnalysisOutcome::Structure(structure) => structure,
        AnalysisOutcome::Cancelled => panic!("unexpected cancellation"),
        AnalysisOutcome::Error(e) => panic!("unexpected error: {e}"),
    }
}

#[test]
fn three_file_cycle_is_detected_and_reported_once() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("a.ts"), "import './b';\n").unwrap();
    fs::write(dir.path().join("b.ts"), "import './c';\n").unwrap();
    fs::write(dir.path().join("c.ts"), "import './a';\n").unwrap();

    let structure = analyze(dir.path());
    let cycles = analyzer_core::graph::find_cycles(&structure.dependencies);
    assert_eq!(cycles.len(), 1);
    assert_eq!(cycles[0].len(), 3);
}

#[test]
fn missing_and_external_imports_emit_synthetic_targets() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("x.ts"),
        "import react from 'react';\nimport gone from './gone';\n",
    )
    .unwrap();

    let structure = analyze(dir.path());
    let targets: Vec<&str> = structure.dependencies.iter().map(|d| d.to.as_str()).collect();
    assert!(targets.contains(&"[External] react"));
    assert!(targets.contains(&"[Missing] gone"));
}

#[test]
fn mongodb_connection_string_in_python_file_emits_database_edge() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("db.py"),
        "import os\nMONGO_URL = 'mongodb://localhost:27017/app'\n",
    )
    .unwrap();

    let structure = analyze(dir.path());
    assert!(structure
        .dependencies
        .iter()
        .any(|d| d.to == "[DB:mongodb]"));
}

#[test]
fn html_file_fans_out_to_script_and_stylesheet() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("index.html"),
        "<html><head><link rel=\"stylesheet\" href=\"./style.css\"></head><body><script src=\"./app.js\"></script></body></html>\n",
    )
    .unwrap();
    fs::write(dir.path().join("style.css"), "body {}\n").unwrap();
    fs::write(dir.path().join("app.js"), "console.log('hi');\n").unwrap();

    let structure = analyze(dir.path());
    let kinds: Vec<_> = structure
        .dependencies
        .iter()
        .filter(|d| d.from == "index.html")
        .map(|d| d.kind)
        .collect();
    assert_eq!(kinds.len(), 2);
}

#[test]
fn each_file_lands_in_its_expected_layer_and_layers_partition_all_files() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("UserView.tsx"), "export function UserView() {}\n").unwrap();
    fs::create_dir(dir.path().join("services")).unwrap();
    fs::write(dir.path().join("services/UserService.ts"), "export class UserService {}\n").unwrap();
    fs::create_dir(dir.path().join("models")).unwrap();
    fs::write(dir.path().join("models/User.ts"), "export class User {}\n").unwrap();
    fs::create_dir(dir.path().join("utils")).unwrap();
    fs::write(dir.path().join("utils/format.ts"), "export function format() {}\n").unwrap();
    fs::write(dir.path().join("package.json"), "{}\n").unwrap();

    let structure = analyze(dir.path());
    assert_eq!(structure.layers.get(Layer::Presentation).len(), 1);
    assert_eq!(structure.layers.get(Layer::Business).len(), 1);
    assert_eq!(structure.layers.get(Layer::Data).len(), 1);
    assert_eq!(structure.layers.get(Layer::Utils).len(), 1);
    assert_eq!(structure.layers.get(Layer::Config).len(), 1);

    let total_in_layers: usize = Layer::ALL.iter().map(|l| structure.layers.get(*l).len()).sum();
    assert_eq!(total_in_layers, structure.files.len());
}
