//! Completion of a partial string observation to six lines.
use crate::segments::Line;
use crate::types::STRING_COUNT;
use serde::Serialize;

/// Fewest observed string lines the extrapolator will work from.
pub const MIN_STRING_LINES: usize = 3;

/// Six string lines ordered top to bottom by intercept, or nothing.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct StringSet {
    lines: Vec<Line>,
}

impl StringSet {
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

    /// Top and bottom strings.
    pub fn bounds(&self) -> Option<(&Line, &Line)> {
        Some((self.lines.first()?, self.lines.last()?))
    }
}

/// Sort observed lines by intercept and append lines below the last one,
/// stepping each endpoint by the mean left/right spacing of the observed
/// set, until there are six.
///
/// More than six observed lines keep the top six.
pub fn extrapolate_strings(mut lines: Vec<Line>) -> StringSet {
    if lines.len() < MIN_STRING_LINES {
        return StringSet::empty();
    }
    lines.sort_by(|a, b| a.intercept().total_cmp(&b.intercept()));

    let steps = (lines.len() - 1) as f32;
    let (left_sum, right_sum) = lines.windows(2).fold((0.0, 0.0), |(l, r), w| {
        (l + w[1].start.y - w[0].start.y, r + w[1].end.y - w[0].end.y)
    });
    let (left_step, right_step) = (left_sum / steps, right_sum / steps);

    while lines.len() < STRING_COUNT {
        let Some(&prev) = lines.last() else {
            break;
        };
        lines.push(Line::from_coords(
            prev.start.x,
            prev.start.y + left_step,
            prev.end.x,
            prev.end.y + right_step,
        ));
    }
    lines.truncate(STRING_COUNT);
    StringSet { lines }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn strings(ys: &[f32]) -> Vec<Line> {
        ys.iter()
            .map(|&y| Line::from_coords(0.0, y, 400.0, y + 20.0))
            .collect()
    }

    #[test]
    fn too_few_lines_give_empty_set() {
        assert!(extrapolate_strings(Vec::new()).is_empty());
        assert!(extrapolate_strings(strings(&[100.0, 130.0])).is_empty());
    }

    #[test]
    fn three_four_or_five_lines_complete_to_six() {
        for n in 3..=5 {
            let ys: Vec<f32> = (0..n).map(|i| 200.0 + 30.0 * i as f32).collect();
            let set = extrapolate_strings(strings(&ys));
            assert_eq!(set.len(), STRING_COUNT);
            for (i, line) in set.lines().iter().enumerate() {
                assert_relative_eq!(line.start.y, 200.0 + 30.0 * i as f32, epsilon = 1e-3);
                assert_relative_eq!(line.end.y, 220.0 + 30.0 * i as f32, epsilon = 1e-3);
            }
        }
    }

    #[test]
    fn unordered_input_is_sorted_by_intercept() {
        let set = extrapolate_strings(strings(&[260.0, 200.0, 230.0]));
        let intercepts: Vec<f32> = set.lines().iter().map(Line::intercept).collect();
        assert!(intercepts.windows(2).all(|w| w[0] < w[1]), "{intercepts:?}");
        let (top, bottom) = set.bounds().unwrap();
        assert_eq!(top.start.y, 200.0);
        assert_relative_eq!(bottom.start.y, 350.0, epsilon = 1e-3);
    }

    #[test]
    fn left_and_right_spacing_are_independent() {
        let lines = vec![
            Line::from_coords(0.0, 100.0, 300.0, 100.0),
            Line::from_coords(0.0, 110.0, 300.0, 120.0),
            Line::from_coords(0.0, 120.0, 300.0, 140.0),
        ];
        let set = extrapolate_strings(lines);
        let last = set.lines()[5];
        assert_relative_eq!(last.start.y, 150.0, epsilon = 1e-3);
        assert_relative_eq!(last.end.y, 200.0, epsilon = 1e-3);
    }

    #[test]
    fn surplus_lines_keep_top_six() {
        let ys: Vec<f32> = (0..8).map(|i| 100.0 + 25.0 * i as f32).collect();
        let set = extrapolate_strings(strings(&ys));
        assert_eq!(set.len(), STRING_COUNT);
        assert_eq!(set.lines()[0].start.y, 100.0);
        assert_eq!(set.lines()[5].start.y, 225.0);
    }
}
