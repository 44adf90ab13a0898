//! Trend detection by least-squares slope
//!
//! A series is regressed against its chronological index (`x = 0..n-1`), not
//! against calendar dates, so gaps between entries do not weigh the slope.

use crate::scoring::ScoredEntry;

use super::types::{Trend, TrendDirection, TrendSummary};

/// Slopes strictly beyond this magnitude count as a direction
pub const TREND_THRESHOLD: f64 = 0.1;

/// Ordinary-least-squares slope of `y` against index
///
/// Returns `0.0` for fewer than two points or a zero denominator.
pub fn slope(y: &[f64]) -> f64 {
    let n = y.len();
    if n < 2 {
        return 0.0;
    }

    let n_f = n as f64;
    let (mut sum_x, mut sum_y, mut sum_xy, mut sum_x2) = (0.0, 0.0, 0.0, 0.0);
    for (i, &yi) in y.iter().enumerate() {
        let x = i as f64;
        sum_x += x;
        sum_y += yi;
        sum_xy += x * yi;
        sum_x2 += x * x;
    }

    let denominator = n_f * sum_x2 - sum_x * sum_x;
    if denominator == 0.0 {
        return 0.0;
    }
    (n_f * sum_xy - sum_x * sum_y) / denominator
}

/// Classify a slope against the fixed threshold (strict inequalities)
pub fn classify(slope: f64) -> TrendDirection {
    if slope > TREND_THRESHOLD {
        TrendDirection::Improving
    } else if slope < -TREND_THRESHOLD {
        TrendDirection::Declining
    } else {
        TrendDirection::Stable
    }
}

/// Slope and direction of one series
pub fn trend_of(y: &[f64]) -> Trend {
    let slope = slope(y);
    Trend {
        direction: classify(slope),
        slope,
    }
}

/// Mood and health trends over chronologically sorted entries
pub fn detect(sorted: &[ScoredEntry<'_>]) -> TrendSummary {
    let moods: Vec<f64> = sorted.iter().map(|s| f64::from(s.mood_score)).collect();
    let healths: Vec<f64> = sorted.iter().map(|s| f64::from(s.health_score)).collect();

    TrendSummary {
        mood: trend_of(&moods),
        health: trend_of(&healths),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Health, JournalEntry, Mood};
    use crate::scoring::{annotate, sort_chronologically};
    use chrono::NaiveDate;

    #[test]
    fn test_increasing_series_slope_one() {
        let trend = trend_of(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(trend.slope, 1.0);
        assert_eq!(trend.direction, TrendDirection::Improving);
    }

    #[test]
    fn test_constant_series_is_stable() {
        let trend = trend_of(&[3.0, 3.0, 3.0, 3.0]);
        assert_eq!(trend.slope, 0.0);
        assert_eq!(trend.direction, TrendDirection::Stable);
    }

    #[test]
    fn test_decreasing_series() {
        let trend = trend_of(&[4.0, 3.0, 2.0, 1.0]);
        assert_eq!(trend.slope, -1.0);
        assert_eq!(trend.direction, TrendDirection::Declining);
    }

    #[test]
    fn test_short_series_is_zero() {
        assert_eq!(slope(&[]), 0.0);
        assert_eq!(slope(&[4.0]), 0.0);
        assert_eq!(slope(&[1.0, 3.0]), 2.0);
    }

    #[test]
    fn test_threshold_is_strict() {
        assert_eq!(classify(0.1), TrendDirection::Stable);
        assert_eq!(classify(0.1000001), TrendDirection::Improving);
        assert_eq!(classify(-0.1), TrendDirection::Stable);
        assert_eq!(classify(-0.1000001), TrendDirection::Declining);
        assert_eq!(classify(0.0), TrendDirection::Stable);
    }

    #[test]
    fn test_noisy_series_slope() {
        // y = [2, 1, 3, 2, 4]: n=5, sum_x=10, sum_y=12, sum_xy=29, sum_x2=30
        // slope = (145 - 120) / (150 - 100) = 0.5
        let s = slope(&[2.0, 1.0, 3.0, 2.0, 4.0]);
        assert!((s - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_detect_uses_sorted_order() {
        let day = |d| NaiveDate::from_ymd_opt(2025, 6, d).unwrap();
        // Stored newest-first; mood rises chronologically, health falls
        let entries = vec![
            JournalEntry::new(day(3), Mood::Happy, Health::Poor),
            JournalEntry::new(day(2), Mood::Calm, Health::Fair),
            JournalEntry::new(day(1), Mood::Sad, Health::Excellent),
        ];
        let mut scored = annotate(&entries);
        sort_chronologically(&mut scored);

        let trends = detect(&scored);
        assert_eq!(trends.mood.direction, TrendDirection::Improving);
        assert!((trends.mood.slope - 1.5).abs() < 1e-12);
        assert_eq!(trends.health.direction, TrendDirection::Declining);
        assert!((trends.health.slope + 1.5).abs() < 1e-12);
    }
}
