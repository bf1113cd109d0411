use fretboard_detector::config::{load_config, RuntimeConfig};
use fretboard_detector::diagnostics::DetectionReport;
use fretboard_detector::image::io::{load_rgba_frame, save_gray_png, write_json_file};
use fretboard_detector::{FrameMaps, FretboardDetector};
use std::env;
use std::path::{Path, PathBuf};

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let mut args = env::args();
    let program = args
        .next()
        .unwrap_or_else(|| "fretboard_detector".to_string());
    let config_path = args
        .next()
        .map(PathBuf::from)
        .ok_or_else(|| format!("Usage: {program} <config.json>"))?;
    let config: RuntimeConfig = load_config(&config_path)?;

    let frame = load_rgba_frame(&config.input_path)?;
    let mut detector = FretboardDetector::new(config.params.clone());
    let (report, maps) = detector.process_detailed(&frame.as_view());

    print_summary(&report);

    match &config.output.json_out {
        Some(path) => {
            write_json_file(path, &report)?;
            println!("JSON report written to {}", path.display());
        }
        None => {
            let json = serde_json::to_string_pretty(&report)
                .map_err(|e| format!("Failed to serialize JSON: {e}"))?;
            println!("{json}");
        }
    }

    if let Some(dir) = &config.output.debug_dir {
        save_maps(dir, &maps)?;
        println!("Debug maps written to {}", dir.display());
    }
    Ok(())
}

fn print_summary(report: &DetectionReport) {
    let res = &report.result;
    let counts = &report.trace.counts;
    println!("Detection summary");
    println!("  frame: {}x{}", res.frame_width, res.frame_height);
    println!("  latency_ms: {:.3}", res.latency_ms);
    println!(
        "  strings: {} segments -> {} candidates -> {} lines",
        counts.string_segments,
        counts.string_candidates,
        report.trace.strings.len()
    );
    println!(
        "  frets: {} segments -> {} ridges -> {} lines",
        counts.fret_segments,
        counts.fret_ridges,
        report.trace.frets.len()
    );
    println!("  grid cells: {}/30", res.grid.filled());
    for stage in &report.trace.timings.stages {
        println!("    {:<18} {:>8.3} ms", stage.label, stage.elapsed_ms);
    }
}

fn save_maps(dir: &Path, maps: &FrameMaps) -> Result<(), String> {
    save_gray_png(&maps.edges, &dir.join("edges.png"))?;
    save_gray_png(&maps.horizontal, &dir.join("horizontal.png"))?;
    save_gray_png(&maps.vertical, &dir.join("vertical.png"))?;
    Ok(())
}
