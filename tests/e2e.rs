mod common;

use common::init_logging;
use common::synthetic_image::{blank_rgba, FretboardScene};
use fretboard_detector::image::{FrameBuffer, RgbaFrame};
use fretboard_detector::types::{GRID_COLUMNS, STRING_COUNT};
use fretboard_detector::{detect_frame, DetectorParams, FrameWorker, FretboardDetector};
use std::thread;
use std::time::{Duration, Instant};

#[test]
fn synthetic_fretboard_gives_complete_monotone_grid() {
    init_logging();
    let scene = FretboardScene::default();
    let pixels = scene.render_rgba();
    let frame = RgbaFrame::packed(scene.width, scene.height, &pixels).unwrap();

    let mut detector = FretboardDetector::new(DetectorParams::default());
    let report = detector.process_with_diagnostics(&frame);
    let grid = &report.result.grid;

    assert_eq!(report.trace.strings.len(), STRING_COUNT);
    assert!(report.trace.frets.len() >= 6, "frets: {:?}", report.trace.frets);
    assert!(
        grid.is_complete(),
        "filled {} of 30, trace: {:?}",
        grid.filled(),
        report.trace.counts
    );

    for row in grid.rows() {
        let pts: Vec<_> = row.iter().map(|c| c.unwrap()).collect();
        assert!(
            pts.windows(2).all(|w| w[0].x < w[1].x),
            "columns not increasing: {pts:?}"
        );
        assert!(pts
            .iter()
            .all(|p| (0.0..=1.0).contains(&p.x) && (0.0..=1.0).contains(&p.y)));
    }
    for col in 0..GRID_COLUMNS {
        let ys: Vec<f32> = (0..STRING_COUNT)
            .map(|row| grid.get(row, col).unwrap().y)
            .collect();
        assert!(ys.windows(2).all(|w| w[0] < w[1]), "rows not ordered: {ys:?}");
    }
}

#[test]
fn synthetic_fretboard_lines_match_the_drawing() {
    init_logging();
    let scene = FretboardScene::default();
    let pixels = scene.render_rgba();
    let frame = RgbaFrame::packed(scene.width, scene.height, &pixels).unwrap();

    let detection = detect_frame(&frame, &DetectorParams::default());
    for (line, &y) in detection.strings.lines().iter().zip(&scene.string_ys) {
        let mid = line.y_at(320.0).unwrap();
        assert!((mid - y as f32).abs() <= 3.0, "string {y}: {line:?}");
    }

    let bridge = detection.frets.lines().last().unwrap();
    assert!((bridge.start.x - 600.0).abs() <= 3.0, "bridge fret {bridge:?}");
    assert!(detection
        .frets
        .lines()
        .iter()
        .all(|l| l.start.x >= 0.0 && l.end.x >= 0.0));
    assert_eq!(detection.frets.correction().inserted, 0);
    assert_eq!(detection.maps.vertical.width(), scene.width);
}

#[test]
fn blank_frame_gives_null_grid() {
    init_logging();
    let (w, h) = (640, 480);
    let pixels = blank_rgba(w, h);
    let frame = RgbaFrame::packed(w, h, &pixels).unwrap();
    let mut detector = FretboardDetector::new(DetectorParams::default());
    let result = detector.process(&frame);
    assert!(result.grid.is_empty());
    assert_eq!(result.grid.rows().len(), STRING_COUNT);
    assert!(result.grid.rows().iter().all(|r| r.len() == GRID_COLUMNS));
    assert_eq!((result.frame_width, result.frame_height), (w, h));
    assert!(result.latency_ms >= 0.0);
}

#[test]
fn two_strings_are_not_enough() {
    init_logging();
    let scene = FretboardScene {
        string_ys: vec![300, 360],
        ..FretboardScene::default()
    };
    let pixels = scene.render_rgba();
    let frame = RgbaFrame::packed(scene.width, scene.height, &pixels).unwrap();
    let detection = detect_frame(&frame, &DetectorParams::default());
    assert!(detection.strings.is_empty());
    assert!(detection.grid.is_empty());
}

#[test]
fn missed_frames_do_not_blank_the_average() {
    init_logging();
    let scene = FretboardScene::default();
    let pixels = scene.render_rgba();
    let blank = blank_rgba(scene.width, scene.height);

    let mut detector = FretboardDetector::new(DetectorParams::default());
    let first = detector.process(&RgbaFrame::packed(scene.width, scene.height, &pixels).unwrap());
    let after_blank =
        detector.process(&RgbaFrame::packed(scene.width, scene.height, &blank).unwrap());
    assert!(first.grid.is_complete());
    assert_eq!(after_blank.grid, first.grid);
}

#[test]
fn worker_publishes_detections() {
    init_logging();
    let scene = FretboardScene::default();
    let frame = FrameBuffer::new(scene.width, scene.height, scene.render_rgba()).unwrap();
    let worker = FrameWorker::spawn(DetectorParams::default()).unwrap();
    assert!(worker.submit(frame));

    let deadline = Instant::now() + Duration::from_secs(60);
    while worker.processed_frames() == 0 {
        assert!(Instant::now() < deadline, "worker produced nothing");
        thread::sleep(Duration::from_millis(10));
    }
    let latest = worker.latest();
    assert_eq!(latest.frame_width, scene.width);
    assert!(latest.grid.is_complete());
}
