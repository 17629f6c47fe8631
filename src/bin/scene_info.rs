//! Scene inspector: loads a scene document into a headless editor and
//! prints what it contains.
//!
//! Usage: cargo run --bin scene_info -- <FILE> [OPTIONS]
//!
//! Options:
//!   --config <PATH>   Editor configuration (JSON, default values if absent)
//!   --mode <MODE>     Mode to inspect in: create, hinge or demo (default: create)

use std::path::PathBuf;
use std::process::ExitCode;

use hingeblock::bridge::{self, FsFileAdapter};
use hingeblock::core::{logging, EditorConfig};
use hingeblock::editor::{Editor, EditorMode};
use hingeblock::persistence::MemoryStore;
use hingeblock::render::HeadlessRenderer;

#[tokio::main]
async fn main() -> ExitCode {
    logging::init();

    let args: Vec<String> = std::env::args().collect();
    let Some(file) = args.get(1).filter(|a| !a.starts_with("--")).map(PathBuf::from) else {
        eprintln!("Usage: scene_info <FILE> [--config <PATH>] [--mode <MODE>]");
        return ExitCode::FAILURE;
    };

    let config = match parse_str_arg(&args, "--config") {
        Some(path) => match EditorConfig::load(&path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Failed to load config {}: {}", path, e);
                return ExitCode::FAILURE;
            }
        },
        None => EditorConfig::default(),
    };
    let mode = match parse_str_arg(&args, "--mode").map(|m| m.parse::<EditorMode>()) {
        Some(Ok(mode)) => mode,
        Some(Err(e)) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
        None => EditorMode::Create,
    };

    let mut editor = Editor::new(config, HeadlessRenderer::default(), MemoryStore::new());
    editor.set_mode(mode);

    let adapter = FsFileAdapter::new(".");
    let report = match bridge::import_scene(&mut editor, &adapter, &file).await {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Failed to load {}: {}", file.display(), e);
            return ExitCode::FAILURE;
        }
    };

    let scene = editor.scene();
    println!("=== Scene: {} ===", file.display());
    println!("Mode:     {}", editor.mode());
    println!("Cubes:    {} ({} skipped)", report.cubes, report.skipped_cubes);
    for cube in scene.registry().all() {
        let p = cube.position();
        println!("  {} at ({}, {}, {})", cube.id(), p.x, p.y, p.z);
    }
    println!("Selected: {}", scene.selection().len());
    for id in scene.selection().ids() {
        println!("  {}", id);
    }
    println!(
        "Hinges:   {} markers, {} selected ({} unmatched)",
        scene.hinges().len(),
        scene.hinges().selected_count(),
        report.unmatched_hinges
    );
    for marker in scene.hinges().selected() {
        let p = marker.position();
        let [a, b] = marker.connected_cube_ids();
        println!("  ({}, {}, {}) between {} and {}", p.x, p.y, p.z, a, b);
    }

    ExitCode::SUCCESS
}

fn parse_str_arg(args: &[String], flag: &str) -> Option<String> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .cloned()
}
