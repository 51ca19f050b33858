//! # Bucket Classifier
//! Three-way low/medium/high categorization for choropleth coloring, with a
//! dedicated no-data bucket for absent or NaN inputs. Values are assumed
//! pre-normalized to the 0–1 range.

/// Choropleth bucket for one country/variable cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Bucket {
    Low,
    Medium,
    High,
    NoData,
}

impl Bucket {
    /// Fixed display color the map paints this bucket with.
    pub fn color(self) -> &'static str {
        match self {
            Bucket::High => "#10b981",
            Bucket::Medium => "#6366f1",
            Bucket::Low => "#ef4444",
            Bucket::NoData => "#cccccc",
        }
    }
}

/// Classify a normalized value. Lower bounds are inclusive: 0.3 is already
/// medium, 0.7 already high. Absent or NaN never lands in a value bucket.
pub fn classify(value: Option<f64>) -> Bucket {
    let Some(v) = value else {
        return Bucket::NoData;
    };
    if v.is_nan() {
        return Bucket::NoData;
    }
    if v >= 0.7 {
        Bucket::High
    } else if v >= 0.3 {
        Bucket::Medium
    } else {
        Bucket::Low
    }
}

/// One entry of a choropleth legend.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct LegendItem {
    pub color: &'static str,
    pub label: &'static str,
}

/// Legend entries for a variable. Raw performance scores and inverted-polarity
/// variables describe their thresholds differently; everything else uses the
/// shared index scale.
pub fn legend_items(variable: &str) -> Vec<LegendItem> {
    match variable {
        "PV1MATH" => vec![
            LegendItem { color: Bucket::High.color(), label: "High (\u{2265}500)" },
            LegendItem { color: Bucket::Medium.color(), label: "Medium (470-499)" },
            LegendItem { color: Bucket::Low.color(), label: "Low (<470)" },
        ],
        "BULLIED" => vec![
            LegendItem { color: Bucket::High.color(), label: "Low (\u{2264}-0.3)" },
            LegendItem { color: Bucket::Medium.color(), label: "Medium (-0.3-0)" },
            LegendItem { color: Bucket::Low.color(), label: "High (>0)" },
        ],
        _ => vec![
            LegendItem { color: Bucket::High.color(), label: "High (\u{2265}0.3)" },
            LegendItem { color: Bucket::Medium.color(), label: "Medium (0-0.3)" },
            LegendItem { color: Bucket::Low.color(), label: "Low (<0)" },
        ],
    }
}
