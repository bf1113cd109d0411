//! Fret selection, ridge merging and ratio-based extrapolation.
//!
//! Fret positions are measured by the x of each line's top (start) point.
//! Physical fret gaps shrink by a constant ratio towards the bridge, so
//! walking from the bridge towards the nut each gap should be the previous
//! one divided by [`EQUAL_TEMPERED_RATIO`].
use super::regression::LinearFit;
use crate::segments::Line;
use crate::types::Point;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Ratio of consecutive fret gaps, `2^(-1/12)`.
pub const EQUAL_TEMPERED_RATIO: f32 = 0.94387;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct FretParams {
    /// Max vertical distance of an endpoint from the endpoint regression (px).
    pub regression_tolerance_px: f32,
    /// Start-x distance under which two candidates are one ridge (px).
    pub ridge_distance_px: f32,
    pub ratio: f32,
    /// Slack around the expected gap before a fret is deleted or inserted (px).
    pub correction_tolerance_px: f32,
    pub max_insertions: usize,
    /// Number of bridge-most candidates used as anchors.
    pub anchor_count: usize,
    pub min_anchors: usize,
    /// Smallest acceptable bridge-most anchor gap (px).
    pub min_anchor_gap_px: f32,
}

impl Default for FretParams {
    fn default() -> Self {
        Self {
            regression_tolerance_px: 10.0,
            ridge_distance_px: 10.0,
            ratio: EQUAL_TEMPERED_RATIO,
            correction_tolerance_px: 10.0,
            max_insertions: 20,
            anchor_count: 6,
            min_anchors: 3,
            min_anchor_gap_px: 20.0,
        }
    }
}

/// Number of frets added and removed by the forward correction pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Correction {
    pub inserted: usize,
    pub deleted: usize,
}

/// Fret lines ordered from the nut towards the bridge.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct FretSet {
    lines: Vec<Line>,
    correction: Correction,
}

impl FretSet {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn correction(&self) -> Correction {
        self.correction
    }
}

#[derive(Clone, Copy)]
enum Endpoint {
    Start,
    End,
}

impl Endpoint {
    fn of(self, line: &Line) -> Point {
        match self {
            Endpoint::Start => line.start,
            Endpoint::End => line.end,
        }
    }

    fn of_mut(self, line: &mut Line) -> &mut Point {
        match self {
            Endpoint::Start => &mut line.start,
            Endpoint::End => &mut line.end,
        }
    }
}

/// Two regression passes, first on start points and then on end points of
/// the survivors.
pub fn select_frets(candidates: &[Line], tolerance_px: f32) -> Vec<Line> {
    let by_start = regression_pass(candidates, Endpoint::Start, tolerance_px);
    regression_pass(&by_start, Endpoint::End, tolerance_px)
}

/// Fit the chosen endpoints; an endpoint whose line straddles the fit is
/// snapped onto it, then lines whose endpoint stays off the fit by
/// `tolerance_px` or more are dropped. Without a fit every line is kept.
fn regression_pass(lines: &[Line], endpoint: Endpoint, tolerance_px: f32) -> Vec<Line> {
    let Some(fit) = LinearFit::fit(lines.iter().map(|l| endpoint.of(l))) else {
        debug!(
            "fret regression degenerate over {} candidates, keeping all",
            lines.len()
        );
        return lines.to_vec();
    };
    lines
        .iter()
        .filter_map(|line| {
            let mut line = *line;
            let anchor = endpoint.of(&line);
            let y_fit = fit.y_at(anchor.x);
            if (line.start.y - y_fit) * (line.end.y - y_fit) <= 0.0 {
                endpoint.of_mut(&mut line).y = y_fit;
            }
            (fit.residual(endpoint.of(&line)).abs() < tolerance_px).then_some(line)
        })
        .collect()
}

/// Collapse candidates whose start x lies within `distance_px` of the
/// current ridge into that ridge.
///
/// Candidates are visited by increasing start x. A merge moves the ridge
/// to the midpoint in x of both ends and widens it to the outer y extent.
pub fn merge_ridges(lines: &[Line], distance_px: f32) -> Vec<Line> {
    let mut sorted = lines.to_vec();
    sorted.sort_by(|a, b| a.start.x.total_cmp(&b.start.x));
    let mut pending: VecDeque<Line> = sorted.into();
    let mut ridges = Vec::with_capacity(pending.len());
    while let Some(mut ridge) = pending.pop_front() {
        pending.retain(|next| {
            let dx = next.start.x - ridge.start.x;
            if dx >= distance_px {
                return true;
            }
            ridge = Line::from_coords(
                ridge.start.x + dx / 2.0,
                ridge.start.y.min(next.start.y),
                ridge.end.x + (next.end.x - ridge.end.x) / 2.0,
                ridge.end.y.max(next.end.y),
            );
            false
        });
        ridges.push(ridge);
    }
    ridges
}

/// Anchor on the bridge-most ridges, correct their spacing, extend
/// towards the nut and return the frets nut-most first.
pub fn extrapolate_frets(ridges: &[Line], params: &FretParams) -> FretSet {
    let mut sorted = ridges.to_vec();
    sorted.sort_by(|a, b| a.start.x.total_cmp(&b.start.x));
    let first_anchor = sorted.len().saturating_sub(params.anchor_count);
    if sorted.len() - first_anchor < params.min_anchors.max(2) {
        debug!("only {} fret anchors, skipping frets", sorted.len());
        return FretSet::empty();
    }

    let mut frets: Vec<Line> = sorted[first_anchor..].iter().rev().copied().collect();
    let leading_gap = frets[0].start.x - frets[1].start.x;
    if leading_gap < params.min_anchor_gap_px {
        debug!("bridge-most fret gap {leading_gap:.1}px too small, skipping frets");
        return FretSet::empty();
    }

    let correction = correct_spacing(&mut frets, params);
    extend_towards_nut(&mut frets, params.ratio);
    frets.reverse();
    FretSet {
        lines: frets,
        correction,
    }
}

/// Forward correction over frets ordered bridge-most first.
///
/// Gap `i` lies between frets `i` and `i + 1` and is expected to be gap
/// `i - 1` divided by the ratio. A gap short by more than the tolerance
/// means fret `i + 1` is spurious: it is removed and its gap folded into
/// the next one. A gap long by more than the tolerance means a fret is
/// missing: one is inserted at the expected distance from fret `i`.
pub fn correct_spacing(frets: &mut Vec<Line>, params: &FretParams) -> Correction {
    let mut gaps: Vec<f32> = frets
        .windows(2)
        .map(|w| w[0].start.x - w[1].start.x)
        .collect();
    let tol = params.correction_tolerance_px;
    let mut correction = Correction::default();
    let mut i = 1;
    while i < gaps.len() {
        let expected = gaps[i - 1] / params.ratio;
        if gaps[i] < expected - tol {
            if i + 1 < gaps.len() {
                gaps[i + 1] += gaps[i];
            }
            gaps.remove(i);
            frets.remove(i + 1);
            correction.deleted += 1;
            continue;
        }
        if gaps[i] > expected + tol {
            if correction.inserted >= params.max_insertions {
                debug!("fret insertion cap {} reached", params.max_insertions);
                break;
            }
            let Some(missing) = shifted_left(&frets[i], expected) else {
                break;
            };
            frets.insert(i + 1, missing);
            gaps.insert(i, expected);
            gaps[i + 1] -= expected;
            correction.inserted += 1;
        }
        i += 1;
    }
    correction
}

/// Keep appending frets beyond the nut-most one, growing the gap by the
/// ratio each step, until a new fret would leave the image on the left.
fn extend_towards_nut(frets: &mut Vec<Line>, ratio: f32) {
    let [.., prev, last] = frets.as_slice() else {
        return;
    };
    let mut gap = prev.start.x - last.start.x;
    while gap > 0.0 && gap.is_finite() {
        gap /= ratio;
        let Some(next) = frets.last().and_then(|l| shifted_left(l, gap)) else {
            break;
        };
        frets.push(next);
    }
}

/// `line` moved left by `dx`, unless either end would go negative.
fn shifted_left(line: &Line, dx: f32) -> Option<Line> {
    let moved = line.translated(-dx, 0.0);
    (moved.start.x >= 0.0 && moved.end.x >= 0.0).then_some(moved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn fret(x: f32) -> Line {
        Line::from_coords(x, 100.0, x, 300.0)
    }

    /// Ideal fret x positions from `bridge_x` towards the nut.
    fn ideal_positions(bridge_x: f32, first_gap: f32, count: usize) -> Vec<f32> {
        let mut xs = vec![bridge_x];
        let mut gap = first_gap;
        while xs.len() < count {
            let last = xs[xs.len() - 1];
            xs.push(last - gap);
            gap /= EQUAL_TEMPERED_RATIO;
        }
        xs
    }

    #[test]
    fn straddling_start_is_snapped() {
        let mut lines: Vec<Line> = [100.0, 150.0, 200.0, 250.0, 300.0]
            .iter()
            .map(|&x| fret(x))
            .collect();
        lines[2].start.y = 60.0;
        let kept = select_frets(&lines, 10.0);
        assert_eq!(kept.len(), 5);
        assert_relative_eq!(kept[2].start.y, 92.0, epsilon = 1e-3);
        assert_eq!(kept[0].start.y, 100.0);
    }

    #[test]
    fn start_outlier_is_rejected() {
        let mut lines: Vec<Line> = [100.0, 150.0, 200.0, 250.0, 300.0]
            .iter()
            .map(|&x| fret(x))
            .collect();
        lines[2].start.y = 140.0;
        let kept = select_frets(&lines, 10.0);
        let xs: Vec<f32> = kept.iter().map(|l| l.start.x).collect();
        assert_eq!(xs, vec![100.0, 150.0, 250.0, 300.0]);
    }

    #[test]
    fn end_pass_trims_overshoot_and_drops_short_lines() {
        let mut lines: Vec<Line> = [100.0, 150.0, 200.0, 250.0, 300.0]
            .iter()
            .map(|&x| fret(x))
            .collect();
        lines[2].end.y = 340.0;
        let kept = select_frets(&lines, 10.0);
        assert_eq!(kept.len(), 5);
        assert_relative_eq!(kept[2].end.y, 308.0, epsilon = 1e-3);
        assert_eq!(kept[1].end.y, 300.0);

        lines[2].end.y = 270.0;
        let kept = select_frets(&lines, 10.0);
        assert_eq!(kept.len(), 4);
        assert!(kept.iter().all(|l| l.start.x != 200.0));
    }

    #[test]
    fn degenerate_regression_keeps_candidates() {
        let lines = [fret(120.0), Line::from_coords(120.0, 40.0, 120.0, 290.0)];
        assert_eq!(select_frets(&lines, 10.0), lines.to_vec());
    }

    #[test]
    fn ridges_merge_to_midpoint_and_outer_extent() {
        let lines = [
            fret(300.0),
            Line::from_coords(102.0, 98.0, 103.0, 305.0),
            Line::from_coords(100.0, 100.0, 101.0, 300.0),
        ];
        let ridges = merge_ridges(&lines, 10.0);
        assert_eq!(ridges.len(), 2);
        assert_eq!(ridges[0], Line::from_coords(101.0, 98.0, 102.0, 305.0));
        assert_eq!(ridges[1], fret(300.0));
    }

    #[test]
    fn ideal_spacing_needs_no_correction() {
        let mut frets: Vec<Line> = ideal_positions(600.0, 40.0, 6)
            .into_iter()
            .map(fret)
            .collect();
        let before = frets.clone();
        let correction = correct_spacing(&mut frets, &FretParams::default());
        assert_eq!(correction, Correction::default());
        assert_eq!(frets, before);
    }

    #[test]
    fn spurious_fret_is_deleted() {
        let xs = ideal_positions(600.0, 40.0, 5);
        let mut frets: Vec<Line> = xs.iter().map(|&x| fret(x)).collect();
        frets.insert(2, fret(550.0));
        let correction = correct_spacing(&mut frets, &FretParams::default());
        assert_eq!(correction, Correction { inserted: 0, deleted: 1 });
        let got: Vec<f32> = frets.iter().map(|l| l.start.x).collect();
        for (g, e) in got.iter().zip(&xs) {
            assert_relative_eq!(*g, *e, epsilon = 1e-3);
        }
        assert_eq!(got.len(), xs.len());
    }

    #[test]
    fn missing_fret_is_inserted() {
        let xs = ideal_positions(600.0, 40.0, 7);
        let mut frets: Vec<Line> = xs.iter().map(|&x| fret(x)).collect();
        frets.remove(2);
        let correction = correct_spacing(&mut frets, &FretParams::default());
        assert_eq!(correction, Correction { inserted: 1, deleted: 0 });
        assert_eq!(frets.len(), 7);
        assert_relative_eq!(frets[2].start.x, xs[2], epsilon = 1e-2);
        assert_relative_eq!(frets[2].end.x, xs[2], epsilon = 1e-2);
    }

    #[test]
    fn spurious_last_fret_is_deleted() {
        let xs = ideal_positions(600.0, 40.0, 5);
        let mut frets: Vec<Line> = xs.iter().map(|&x| fret(x)).collect();
        frets.push(fret(xs[4] - 20.0));
        let correction = correct_spacing(&mut frets, &FretParams::default());
        assert_eq!(correction, Correction { inserted: 0, deleted: 1 });
        assert_eq!(frets.len(), 5);
        assert_relative_eq!(frets[4].start.x, xs[4]);
    }

    #[test]
    fn insertion_stops_at_left_frame_edge() {
        // The middle fret leans so far left that a copy shifted by the
        // expected gap would cross x = 0 at its bottom end.
        let mut frets = vec![
            Line::from_coords(130.0, 100.0, 50.0, 300.0),
            Line::from_coords(100.0, 100.0, 20.0, 300.0),
            fret(10.0),
        ];
        let before = frets.clone();
        let correction = correct_spacing(&mut frets, &FretParams::default());
        assert_eq!(correction, Correction::default());
        assert_eq!(frets, before);
    }

    #[test]
    fn insertions_stop_at_cap() {
        let xs = ideal_positions(600.0, 40.0, 8);
        let mut frets: Vec<Line> = xs.iter().map(|&x| fret(x)).collect();
        frets.remove(5);
        frets.remove(2);
        let params = FretParams {
            max_insertions: 1,
            ..FretParams::default()
        };
        let correction = correct_spacing(&mut frets, &params);
        assert_eq!(correction.inserted, 1);
        assert_eq!(frets.len(), 7);
    }

    #[test]
    fn extrapolation_orders_nut_first_and_stays_in_frame() {
        let ridges: Vec<Line> = ideal_positions(600.0, 40.0, 6)
            .into_iter()
            .map(fret)
            .collect();
        let set = extrapolate_frets(&ridges, &FretParams::default());
        assert_eq!(set.len(), 12);
        assert_eq!(set.correction(), Correction::default());
        let xs: Vec<f32> = set.lines().iter().map(|l| l.start.x).collect();
        assert!(xs.windows(2).all(|w| w[0] < w[1]), "{xs:?}");
        assert!(set
            .lines()
            .iter()
            .all(|l| l.start.x >= 0.0 && l.end.x >= 0.0));
        assert_eq!(xs[11], 600.0);
    }

    #[test]
    fn anchors_are_the_bridge_most_ridges() {
        let mut ridges: Vec<Line> = ideal_positions(600.0, 40.0, 6)
            .into_iter()
            .map(fret)
            .collect();
        ridges.push(fret(20.0));
        let set = extrapolate_frets(&ridges, &FretParams::default());
        assert_eq!(set.len(), 12);
    }

    #[test]
    fn too_few_or_crowded_anchors_give_empty_set() {
        let params = FretParams::default();
        assert!(extrapolate_frets(&[fret(500.0), fret(560.0)], &params).is_empty());
        assert!(extrapolate_frets(&[], &params).is_empty());
        let crowded = [fret(500.0), fret(530.0), fret(545.0)];
        assert!(extrapolate_frets(&crowded, &params).is_empty());
    }
}
