//! # Correlation Engine
//! Pearson correlation between two named fields across the country
//! summaries, plus the scatter-point extraction and least-squares trend line
//! the correlation grid draws. Pure functions, no failure modes: degenerate
//! inputs return `0.0` or `None`, never NaN.

use std::collections::BTreeMap;

use crate::summary::CountrySummary;

/// Pearson correlation coefficient over the records where both fields hold
/// finite values. Fewer than 2 valid records or a zero-variance field yield
/// exactly `0.0`.
pub fn correlate(
    summaries: &BTreeMap<String, CountrySummary>,
    field_a: &str,
    field_b: &str,
) -> f64 {
    let pairs: Vec<(f64, f64)> = summaries
        .values()
        .filter_map(|s| {
            let a = s.value(field_a).filter(|v| v.is_finite())?;
            let b = s.value(field_b).filter(|v| v.is_finite())?;
            Some((a, b))
        })
        .collect();

    if pairs.len() < 2 {
        return 0.0;
    }

    let n = pairs.len() as f64;
    let mean_a = pairs.iter().map(|(a, _)| a).sum::<f64>() / n;
    let mean_b = pairs.iter().map(|(_, b)| b).sum::<f64>() / n;

    let mut numerator = 0.0;
    let mut var_a = 0.0;
    let mut var_b = 0.0;
    for (a, b) in &pairs {
        let da = a - mean_a;
        let db = b - mean_b;
        numerator += da * db;
        var_a += da * da;
        var_b += db * db;
    }

    let denominator = (var_a * var_b).sqrt();
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

/// One country's position on an x/y scatter plot.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ScatterPoint {
    pub code: String,
    pub name: String,
    pub x: f64,
    pub y: f64,
}

/// Countries where both fields are defined and finite, ready for plotting.
pub fn scatter_points(
    summaries: &BTreeMap<String, CountrySummary>,
    field_x: &str,
    field_y: &str,
) -> Vec<ScatterPoint> {
    summaries
        .values()
        .filter_map(|s| {
            let x = s.value(field_x).filter(|v| v.is_finite())?;
            let y = s.value(field_y).filter(|v| v.is_finite())?;
            Some(ScatterPoint {
                code: s.cnt.clone(),
                name: s.country_name.clone(),
                x,
                y,
            })
        })
        .collect()
}

/// Endpoints of the least-squares regression segment spanning the points'
/// x-range. `None` for fewer than 2 points or when all x values coincide.
pub fn trend_line(points: &[ScatterPoint]) -> Option<[(f64, f64); 2]> {
    if points.len() < 2 {
        return None;
    }

    let n = points.len() as f64;
    let (mut sum_x, mut sum_y, mut sum_xy, mut sum_xx) = (0.0, 0.0, 0.0, 0.0);
    for p in points {
        sum_x += p.x;
        sum_y += p.y;
        sum_xy += p.x * p.y;
        sum_xx += p.x * p.x;
    }

    let denom = n * sum_xx - sum_x * sum_x;
    if denom == 0.0 {
        return None;
    }
    let slope = (n * sum_xy - sum_x * sum_y) / denom;
    let intercept = (sum_y - slope * sum_x) / n;

    let min_x = points.iter().map(|p| p.x).fold(f64::INFINITY, f64::min);
    let max_x = points.iter().map(|p| p.x).fold(f64::NEG_INFINITY, f64::max);

    Some([
        (min_x, slope * min_x + intercept),
        (max_x, slope * max_x + intercept),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summaries(entries: &[(&str, &[(&str, f64)])]) -> BTreeMap<String, CountrySummary> {
        entries
            .iter()
            .map(|(cnt, pairs)| {
                (
                    cnt.to_string(),
                    CountrySummary {
                        cnt: cnt.to_string(),
                        country_name: cnt.to_string(),
                        values: pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect(),
                    },
                )
            })
            .collect()
    }

    #[test]
    fn perfectly_linear_fields_correlate_to_one() {
        let s = summaries(&[
            ("A", &[("X", 1.0), ("Y", 2.0)]),
            ("B", &[("X", 2.0), ("Y", 4.0)]),
            ("C", &[("X", 3.0), ("Y", 6.0)]),
        ]);
        assert!((correlate(&s, "X", "Y") - 1.0).abs() < 1e-12);
    }

    #[test]
    fn inverse_fields_correlate_to_minus_one() {
        let s = summaries(&[
            ("A", &[("X", 1.0), ("Y", -2.0)]),
            ("B", &[("X", 2.0), ("Y", -4.0)]),
            ("C", &[("X", 3.0), ("Y", -6.0)]),
        ]);
        assert!((correlate(&s, "X", "Y") + 1.0).abs() < 1e-12);
    }

    #[test]
    fn correlation_is_symmetric() {
        let s = summaries(&[
            ("A", &[("X", 1.0), ("Y", 5.0)]),
            ("B", &[("X", 4.0), ("Y", 2.0)]),
            ("C", &[("X", 2.0), ("Y", 9.0)]),
        ]);
        assert_eq!(correlate(&s, "X", "Y"), correlate(&s, "Y", "X"));
    }

    #[test]
    fn fewer_than_two_valid_records_returns_zero() {
        let s = summaries(&[
            ("A", &[("X", 1.0), ("Y", 2.0)]),
            ("B", &[("X", 2.0)]), // Y missing: only one valid pair
        ]);
        assert_eq!(correlate(&s, "X", "Y"), 0.0);
    }

    #[test]
    fn constant_field_returns_zero_not_nan() {
        let s = summaries(&[
            ("A", &[("X", 1.0), ("Y", 3.0)]),
            ("B", &[("X", 2.0), ("Y", 3.0)]),
            ("C", &[("X", 3.0), ("Y", 3.0)]),
        ]);
        let r = correlate(&s, "X", "Y");
        assert_eq!(r, 0.0);
        assert!(r.is_finite());
    }

    #[test]
    fn scatter_points_require_both_fields() {
        let s = summaries(&[
            ("A", &[("X", 1.0), ("Y", 2.0)]),
            ("B", &[("X", 2.0)]),
        ]);
        let pts = scatter_points(&s, "X", "Y");
        assert_eq!(pts.len(), 1);
        assert_eq!(pts[0].code, "A");
    }

    #[test]
    fn trend_line_spans_the_x_range() {
        let s = summaries(&[
            ("A", &[("X", 0.0), ("Y", 1.0)]),
            ("B", &[("X", 2.0), ("Y", 5.0)]),
        ]);
        let pts = scatter_points(&s, "X", "Y");
        let [lo, hi] = trend_line(&pts).unwrap();
        assert_eq!(lo, (0.0, 1.0));
        assert_eq!(hi, (2.0, 5.0));
    }

    #[test]
    fn trend_line_degenerate_cases_are_none() {
        assert!(trend_line(&[]).is_none());
        let s = summaries(&[
            ("A", &[("X", 1.0), ("Y", 1.0)]),
            ("B", &[("X", 1.0), ("Y", 2.0)]),
        ]);
        let pts = scatter_points(&s, "X", "Y");
        assert!(trend_line(&pts).is_none());
    }
}
