use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use tower_http::{cors::CorsLayer, services::ServeDir};

use crate::catalog::{self, Theme, Variable};
use crate::classify::{classify, legend_items, Bucket, LegendItem};
use crate::config::DatasetConfig;
use crate::correlation::{correlate, scatter_points, trend_line, ScatterPoint};
use crate::countries;
use crate::dataset::{self, state::DatasetState, state::DatasetStore, state::DatasetView};
use crate::summary::{aggregate_by_country, CountrySummary};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<DatasetStore>,
    pub config: Arc<DatasetConfig>,
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/api/dataset", get(dataset_view))
        .route("/api/countries", get(country_summaries))
        .route("/api/correlation", get(correlation))
        .route("/api/choropleth", get(choropleth))
        .route("/api/catalog", get(catalog_view))
        .route("/admin/reload", post(admin_reload))
        .fallback_service(ServeDir::new("site"))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

/// The `{ rows, loading, error }` tri-state the frontend polls.
async fn dataset_view(State(state): State<AppState>) -> Json<DatasetView> {
    Json(state.store.snapshot().view())
}

/// Aggregated per-country summaries. European subset by default; `?all=1`
/// returns every country in the dataset.
async fn country_summaries(
    State(state): State<AppState>,
    Query(q): Query<HashMap<String, String>>,
) -> Json<BTreeMap<String, CountrySummary>> {
    let include_all = q.get("all").is_some_and(|v| v == "1" || v == "true");
    Json(summaries(&state, include_all))
}

fn summaries(state: &AppState, include_all: bool) -> BTreeMap<String, CountrySummary> {
    let rows = state.store.rows();
    if include_all {
        aggregate_by_country(&rows)
    } else {
        aggregate_by_country(&countries::european_only(&rows))
    }
}

#[derive(serde::Deserialize)]
struct CorrelationQuery {
    x: String,
    y: String,
}

#[derive(serde::Serialize)]
struct CorrelationResponse {
    x: String,
    y: String,
    r: f64,
    points: Vec<ScatterPoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    trend: Option<[(f64, f64); 2]>,
}

async fn correlation(
    State(state): State<AppState>,
    Query(q): Query<CorrelationQuery>,
) -> Json<CorrelationResponse> {
    let sums = summaries(&state, false);
    let r = correlate(&sums, &q.x, &q.y);
    let points = scatter_points(&sums, &q.x, &q.y);
    let trend = trend_line(&points);
    Json(CorrelationResponse {
        x: q.x,
        y: q.y,
        r,
        points,
        trend,
    })
}

#[derive(serde::Deserialize)]
struct ChoroplethQuery {
    variable: String,
}

#[derive(serde::Serialize)]
struct CountryCell {
    #[serde(skip_serializing_if = "Option::is_none")]
    value: Option<f64>,
    bucket: Bucket,
    color: &'static str,
}

#[derive(serde::Serialize)]
struct ChoroplethResponse {
    variable: String,
    legend: Vec<LegendItem>,
    countries: BTreeMap<String, CountryCell>,
}

/// Per-country bucket and color for the requested variable. Countries
/// missing the variable get the no-data bucket, never a zero.
async fn choropleth(
    State(state): State<AppState>,
    Query(q): Query<ChoroplethQuery>,
) -> Json<ChoroplethResponse> {
    let sums = summaries(&state, false);
    let cells = sums
        .into_iter()
        .map(|(code, summary)| {
            let value = summary.value(&q.variable).filter(|v| v.is_finite());
            let bucket = classify(value);
            (
                code,
                CountryCell {
                    value,
                    bucket,
                    color: bucket.color(),
                },
            )
        })
        .collect();
    Json(ChoroplethResponse {
        legend: legend_items(&q.variable),
        variable: q.variable,
        countries: cells,
    })
}

#[derive(serde::Serialize)]
struct CatalogResponse {
    themes: &'static [Theme],
    variables: &'static [Variable],
}

async fn catalog_view() -> Json<CatalogResponse> {
    Json(CatalogResponse {
        themes: catalog::THEMES,
        variables: catalog::VARIABLES,
    })
}

/// Re-run the load pipeline against the configured resources and publish
/// whichever complete state it produced.
async fn admin_reload(State(state): State<AppState>) -> String {
    let (coords, primary) = dataset::http_sources(&state.config);
    let new_state = dataset::load_dataset(&coords, &primary).await;
    let msg = match &new_state {
        DatasetState::Loaded { rows } => format!("reloaded: {} rows", rows.len()),
        DatasetState::Partial { rows, .. } => format!("reloaded partial: {} rows", rows.len()),
        DatasetState::Failed { error } => format!("reload failed: {error}"),
        DatasetState::Loading => "reloading".to_string(),
    };
    state.store.publish(new_state);
    msg
}
