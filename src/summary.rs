//! # Country Aggregator
//! Pure, testable reduction from raw indicator rows to one summary per
//! country. No I/O, no failure modes; empty input yields an empty map.
//!
//! Averaging is per-field: a field contributes to a country's mean only for
//! the rows where it is defined, so two fields of the same summary may have
//! different denominators. Downstream charts rely on exactly this.

use std::collections::BTreeMap;

use crate::countries;
use crate::dataset::types::IndicatorRecord;

/// One country's reduced record: every numeric field is the mean over the
/// rows that defined it.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct CountrySummary {
    #[serde(rename = "CNT")]
    pub cnt: String,
    #[serde(rename = "CountryName")]
    pub country_name: String,
    #[serde(flatten)]
    pub values: BTreeMap<String, f64>,
}

impl CountrySummary {
    pub fn value(&self, field: &str) -> Option<f64> {
        self.values.get(field).copied()
    }
}

struct Acc {
    first_name: String,
    // field → (running sum, running count)
    fields: BTreeMap<String, (f64, u32)>,
}

/// Group rows by country code and reduce every numeric field to its mean.
pub fn aggregate_by_country(rows: &[IndicatorRecord]) -> BTreeMap<String, CountrySummary> {
    let mut accs: BTreeMap<String, Acc> = BTreeMap::new();

    for row in rows {
        let acc = accs.entry(row.cnt.clone()).or_insert_with(|| Acc {
            first_name: row.country_name.clone(),
            fields: BTreeMap::new(),
        });
        for (field, value) in &row.values {
            if !value.is_finite() {
                continue;
            }
            let slot = acc.fields.entry(field.clone()).or_insert((0.0, 0));
            slot.0 += value;
            slot.1 += 1;
        }
    }

    accs.into_iter()
        .map(|(cnt, acc)| {
            let values = acc
                .fields
                .into_iter()
                .map(|(field, (sum, count))| (field, sum / count as f64))
                .collect();
            let country_name = countries::display_name(&cnt)
                .map(str::to_string)
                .unwrap_or(acc.first_name);
            let summary = CountrySummary {
                cnt: cnt.clone(),
                country_name,
                values,
            };
            (cnt, summary)
        })
        .collect()
}
