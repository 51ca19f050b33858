// src/dataset/types.rs
use std::collections::BTreeMap;

use crate::dataset::error::DatasetError;

/// One merged row of the dataset: country code, resolved display name, and an
/// open map of named numeric indicators. Columns we did not anticipate land in
/// `values` like any other indicator.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct IndicatorRecord {
    #[serde(rename = "CNT")]
    pub cnt: String,
    #[serde(rename = "CountryName")]
    pub country_name: String,
    #[serde(flatten)]
    pub values: BTreeMap<String, f64>,
}

impl IndicatorRecord {
    pub fn value(&self, field: &str) -> Option<f64> {
        self.values.get(field).copied()
    }
}

/// One row of the coordinate table: composite well-being score plus the two
/// projection coordinates. Each component may be independently absent.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CoordRecord {
    pub owb: Option<f64>,
    pub x: Option<f64>,
    pub y: Option<f64>,
}

#[async_trait::async_trait]
pub trait TableSource: Send + Sync {
    /// Fetch the raw header-delimited text of the resource.
    async fn fetch_text(&self) -> Result<String, DatasetError>;
    fn name(&self) -> &'static str;
}
