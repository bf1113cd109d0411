use super::*;
use crate::image::{GrayImage, ImageF32};

fn step_image(width: usize, height: usize, split_x: usize) -> ImageF32 {
    let mut img = ImageF32::new(width, height);
    for y in 0..height {
        for x in split_x..width {
            img.set(x, y, 1.0);
        }
    }
    img
}

#[test]
fn lsd_finds_vertical_step_edge() {
    let segs = lsd_extract_segments(&step_image(32, 48, 16), LsdOptions::default());
    assert!(!segs.is_empty(), "expected a segment on a vertical edge");
    let longest = segs
        .iter()
        .max_by(|a, b| a.length().total_cmp(&b.length()))
        .unwrap();
    assert!(
        longest.abs_gradient() > 10.0,
        "expected vertical orientation, got {longest:?}"
    );
    assert!(longest.length() >= 40.0, "too short: {}", longest.length());
    let x = 0.5 * (longest.start.x + longest.end.x);
    assert!((14.5..=16.5).contains(&x), "x={x}");
}

#[test]
fn lsd_rejects_flat_image() {
    let segs = lsd_extract_segments(&ImageF32::new(16, 16), LsdOptions::default());
    assert!(segs.is_empty(), "got {segs:?}");
}

#[test]
fn thin_stroke_gives_parallel_ridges() {
    let mut map = GrayImage::new(40, 80);
    for y in 10..70 {
        map.set(20, y, 255);
    }
    let segs = lsd_segments(&map, LsdOptions::default());
    let long: Vec<_> = segs.iter().filter(|s| s.length() > 40.0).collect();
    assert!(!long.is_empty());
    for s in &long {
        assert!(s.abs_gradient() > 10.0, "{s:?}");
        assert!((s.start.x - 20.0).abs() <= 1.5, "{s:?}");
    }
}

#[test]
fn lsd_respects_min_length() {
    let mut map = GrayImage::new(40, 40);
    for y in 10..16 {
        map.set(20, y, 255);
    }
    let opts = LsdOptions {
        min_length_px: 20.0,
        ..LsdOptions::default()
    };
    assert!(lsd_segments(&map, opts).is_empty());
}
