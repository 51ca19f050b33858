// src/dataset/mod.rs
pub mod error;
pub mod parse;
pub mod source;
pub mod state;
pub mod types;

pub use error::DatasetError;
pub use state::{DatasetState, DatasetStore, DatasetView};
pub use types::{CoordRecord, IndicatorRecord, TableSource};

use std::collections::HashMap;
use std::time::{SystemTime, UNIX_EPOCH};

use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram};
use once_cell::sync::OnceCell;

use crate::config::DatasetConfig;
use crate::countries;
use crate::dataset::parse::{parse_table, RawRow};
use crate::dataset::source::HttpSource;

/// Notice attached to the coordinate-only degraded state.
pub const PARTIAL_DATA_NOTICE: &str = "Partial data loaded. Only PCA coordinates available.";

const COUNTRY_CODE_FIELD: &str = "CNT";
const SCIENCE_FIELD: &str = "PV10SCIE";
const LEGACY_SCIENCE_FIELD: &str = "PV1SCI";

/// One-time metrics registration (so series show up on /metrics).
fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!("dataset_rows_total", "Merged indicator rows published.");
        describe_counter!(
            "dataset_rows_dropped_total",
            "Primary rows dropped for a missing country code."
        );
        describe_counter!(
            "dataset_load_errors_total",
            "Dataset load failures before the coordinate-only fallback."
        );
        describe_counter!(
            "dataset_partial_loads_total",
            "Loads that fell back to coordinate-only data."
        );
        describe_histogram!("dataset_parse_ms", "CSV parse time in milliseconds.");
        describe_gauge!(
            "dataset_last_load_ts",
            "Unix ts when a dataset state was last published."
        );
    });
}

/// Build the two HTTP sources from configuration. The fallback path reuses
/// the coordinate source, so both legs resolve against the same base URL.
pub fn http_sources(cfg: &DatasetConfig) -> (HttpSource, HttpSource) {
    (
        HttpSource::new("coordinate table", cfg.coords_url()),
        HttpSource::new("primary table", cfg.primary_url()),
    )
}

/// Run the full load: coordinate fetch, primary fetch (strictly in that
/// order), merge, and on failure the coordinate-only recovery. Always returns
/// a complete state; errors never escape this boundary.
pub async fn load_dataset(
    coords: &dyn TableSource,
    primary: &dyn TableSource,
) -> DatasetState {
    ensure_metrics_described();

    let state = match try_load_merged(coords, primary).await {
        Ok(rows) => {
            counter!("dataset_rows_total").increment(rows.len() as u64);
            DatasetState::Loaded { rows }
        }
        Err(err) => {
            tracing::warn!(error = %err, "dataset load failed; trying coordinate-only fallback");
            counter!("dataset_load_errors_total").increment(1);

            match try_load_coords_only(coords).await {
                Ok(rows) if !rows.is_empty() => {
                    counter!("dataset_partial_loads_total").increment(1);
                    counter!("dataset_rows_total").increment(rows.len() as u64);
                    DatasetState::Partial {
                        rows,
                        notice: PARTIAL_DATA_NOTICE.to_string(),
                    }
                }
                Ok(_) => DatasetState::Failed {
                    error: err.to_string(),
                },
                Err(fallback_err) => {
                    tracing::warn!(error = %fallback_err, "coordinate-only fallback also failed");
                    DatasetState::Failed {
                        error: err.to_string(),
                    }
                }
            }
        }
    };

    gauge!("dataset_last_load_ts").set(now_unix() as f64);
    state
}

async fn try_load_merged(
    coords: &dyn TableSource,
    primary: &dyn TableSource,
) -> Result<Vec<IndicatorRecord>, DatasetError> {
    // Coordinate table first; the merge needs its lookup ready before the
    // primary rows stream in.
    let coord_text = coords.fetch_text().await?;
    let coord_map = build_coord_map(parse_timed(&coord_text)?);

    let primary_text = primary.fetch_text().await?;
    let raw_rows = parse_timed(&primary_text)?;
    if raw_rows.is_empty() {
        return Err(DatasetError::EmptyDataset);
    }

    let mut merged = Vec::with_capacity(raw_rows.len());
    for (i, row) in raw_rows.into_iter().enumerate() {
        match merge_row(row, &coord_map) {
            Some(rec) => merged.push(rec),
            None => {
                tracing::warn!(row = i, "primary row missing country code, skipping");
                counter!("dataset_rows_dropped_total").increment(1);
            }
        }
    }

    if merged.is_empty() {
        return Err(DatasetError::MergeFailed);
    }
    Ok(merged)
}

async fn try_load_coords_only(
    coords: &dyn TableSource,
) -> Result<Vec<IndicatorRecord>, DatasetError> {
    let text = coords.fetch_text().await?;
    let rows = parse_timed(&text)?;

    let mut out = Vec::with_capacity(rows.len());
    for row in rows {
        let Some(cnt) = country_code(&row) else {
            continue;
        };
        let coord = coord_record(&row);
        let mut values = std::collections::BTreeMap::new();
        if let Some(v) = coord.owb {
            values.insert("OWB".to_string(), v);
        }
        if let Some(v) = coord.x {
            values.insert("X".to_string(), v);
        }
        if let Some(v) = coord.y {
            values.insert("Y".to_string(), v);
        }
        out.push(IndicatorRecord {
            country_name: resolve_name(&cnt),
            cnt,
            values,
        });
    }
    Ok(out)
}

fn parse_timed(text: &str) -> Result<Vec<RawRow>, DatasetError> {
    let t0 = std::time::Instant::now();
    let rows = parse_table(text)?;
    histogram!("dataset_parse_ms").record(t0.elapsed().as_secs_f64() * 1_000.0);
    Ok(rows)
}

fn build_coord_map(rows: Vec<RawRow>) -> HashMap<String, CoordRecord> {
    let mut map = HashMap::with_capacity(rows.len());
    for row in rows {
        if let Some(cnt) = country_code(&row) {
            map.insert(cnt, coord_record(&row));
        }
    }
    map
}

fn coord_record(row: &RawRow) -> CoordRecord {
    CoordRecord {
        owb: row.get("OWB").and_then(|c| c.as_num()),
        x: row.get("X").and_then(|c| c.as_num()),
        y: row.get("Y").and_then(|c| c.as_num()),
    }
}

fn country_code(row: &RawRow) -> Option<String> {
    let code = row.get(COUNTRY_CODE_FIELD)?.as_text()?;
    if code.is_empty() {
        return None;
    }
    Some(code.to_string())
}

fn resolve_name(cnt: &str) -> String {
    countries::display_name(cnt)
        .map(str::to_string)
        .unwrap_or_else(|| cnt.to_string())
}

/// Merge one primary row with its coordinate triple. `None` means the row
/// carries no country code and is dropped (skip-and-continue).
fn merge_row(row: RawRow, coord_map: &HashMap<String, CoordRecord>) -> Option<IndicatorRecord> {
    let cnt = country_code(&row)?;

    let mut values = std::collections::BTreeMap::new();
    for (key, cell) in &row {
        if key == COUNTRY_CODE_FIELD {
            continue;
        }
        if let Some(v) = cell.as_num() {
            values.insert(key.clone(), v);
        }
    }

    // Science score may arrive under its legacy header.
    if !values.contains_key(SCIENCE_FIELD) {
        if let Some(v) = values.get(LEGACY_SCIENCE_FIELD).copied() {
            values.insert(SCIENCE_FIELD.to_string(), v);
        }
    }

    // The coordinate table owns OWB/X/Y; whatever the primary row carried for
    // them is replaced, absent when the country has no coordinate row.
    values.remove("OWB");
    values.remove("X");
    values.remove("Y");
    if let Some(coord) = coord_map.get(&cnt) {
        if let Some(v) = coord.owb {
            values.insert("OWB".to_string(), v);
        }
        if let Some(v) = coord.x {
            values.insert("X".to_string(), v);
        }
        if let Some(v) = coord.y {
            values.insert("Y".to_string(), v);
        }
    }

    Some(IndicatorRecord {
        country_name: resolve_name(&cnt),
        cnt,
        values,
    })
}

fn now_unix() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
