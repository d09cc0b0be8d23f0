//! Histogram bars for charting a distribution

use serde::Serialize;

use super::distribution::{ProbabilityDistribution, MISS};

/// Default cut-off below which an outcome is not charted
pub const DISPLAY_THRESHOLD: f64 = 0.005;

/// One bar of the chart
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HistogramBar {
    pub outcome: i64,
    pub probability: f64,
}

impl HistogramBar {
    pub fn is_miss(&self) -> bool {
        self.outcome == MISS
    }

    /// Probability as a percentage with one decimal, e.g. "16.7%"
    pub fn percent(&self) -> String {
        format!("{:.1}%", 100.0 * self.probability)
    }
}

/// Bars for a distribution
///
/// A miss gets its own leading bar. Positive outcomes above `threshold` are
/// charted in ascending order, with empty bars filling any gaps between the
/// smallest and largest charted outcome.
pub fn histogram(dist: &ProbabilityDistribution, threshold: f64) -> Vec<HistogramBar> {
    let mut bars = Vec::new();

    let miss = dist.miss_chance();
    if miss > 0.0 {
        bars.push(HistogramBar {
            outcome: MISS,
            probability: miss,
        });
    }

    let visible: Vec<(i64, f64)> = dist
        .iter()
        .filter(|&(outcome, p)| outcome > 0 && p > threshold)
        .collect();

    let (Some(&(first, _)), Some(&(last, _))) = (visible.first(), visible.last()) else {
        return bars;
    };

    let mut visible = visible.into_iter().peekable();
    for outcome in first..=last {
        let probability = match visible.peek() {
            Some(&(next, p)) if next == outcome => {
                visible.next();
                p
            }
            _ => 0.0,
        };
        bars.push(HistogramBar {
            outcome,
            probability,
        });
    }
    bars
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::{parse_dice, probability_distribution};

    #[test]
    fn test_miss_bar_leads() {
        let dist = probability_distribution(&parse_dice("1d6").unwrap());
        let bars = histogram(&dist, DISPLAY_THRESHOLD);

        assert!(bars[0].is_miss());
        assert_eq!(bars[0].percent(), "16.7%");
        // 2..=5, the gap at 6, then 7..=11 (1/36 each is above the threshold)
        let outcomes: Vec<i64> = bars[1..].iter().map(|b| b.outcome).collect();
        assert_eq!(outcomes, (2..=11).collect::<Vec<_>>());
        assert_eq!(bars[5].outcome, 6);
        assert_eq!(bars[5].probability, 0.0);
    }

    #[test]
    fn test_threshold_filters_tail() {
        let dist = probability_distribution(&parse_dice("1d6").unwrap());
        let bars = histogram(&dist, 0.1);
        let last = bars.last().unwrap();
        assert_eq!(last.outcome, 5);
    }

    #[test]
    fn test_no_miss_bar_without_miss() {
        let dist = probability_distribution(&parse_dice("d44").unwrap());
        let bars = histogram(&dist, DISPLAY_THRESHOLD);
        assert!(!bars[0].is_miss());
        assert_eq!(bars[0].outcome, 11);
        assert_eq!(bars.last().unwrap().outcome, 44);
        assert_eq!(bars.len(), 34);
        assert_eq!(bars.iter().filter(|b| b.probability > 0.0).count(), 16);
    }

    #[test]
    fn test_negative_totals_not_charted() {
        let dist = probability_distribution(&parse_dice("1d4-3").unwrap());
        assert!(dist.get(-1).is_some());

        let bars = histogram(&dist, DISPLAY_THRESHOLD);
        assert!(bars[0].is_miss());
        assert!(bars[1..].iter().all(|b| b.outcome > 0));
        assert_eq!(bars[1].outcome, 2);
    }

    #[test]
    fn test_empty_distribution() {
        assert!(histogram(&ProbabilityDistribution::new(), DISPLAY_THRESHOLD).is_empty());
        let bars = histogram(&ProbabilityDistribution::certain(0), DISPLAY_THRESHOLD);
        assert_eq!(bars.len(), 1);
    }
}
