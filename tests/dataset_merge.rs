// tests/dataset_merge.rs
//
// End-to-end loader properties over fixture sources: merge semantics,
// sequential coord/primary resolution, and the aggregated DNK numbers the
// frontend displays.

use pisa_explorer::dataset::source::FixtureSource;
use pisa_explorer::dataset::{load_dataset, DatasetState};
use pisa_explorer::summary::aggregate_by_country;

const PRIMARY_CSV: &str = include_str!("fixtures/country_means.csv");
const COORDS_CSV: &str = include_str!("fixtures/owb_pca_country_means.csv");

async fn load_fixture_state() -> DatasetState {
    let coords = FixtureSource::ok("coordinate table", COORDS_CSV);
    let primary = FixtureSource::ok("primary table", PRIMARY_CSV);
    load_dataset(&coords, &primary).await
}

#[tokio::test]
async fn fixture_tables_load_fully_merged() {
    let state = load_fixture_state().await;
    let rows = match state {
        DatasetState::Loaded { rows } => rows,
        other => panic!("expected Loaded, got {other:?}"),
    };

    // 10 data lines, one of them without a country code.
    assert_eq!(rows.len(), 9);

    let dnk = rows.iter().find(|r| r.cnt == "DNK").expect("DNK row");
    assert_eq!(dnk.country_name, "Denmark");
    assert_eq!(dnk.value("PV1MATH"), Some(489.0));
    assert_eq!(dnk.value("X"), Some(1.02));
    assert_eq!(dnk.value("Y"), Some(-0.48));
    assert_eq!(dnk.value("OWB"), Some(0.31));
}

#[tokio::test]
async fn countries_without_coordinate_rows_keep_coords_absent() {
    let state = load_fixture_state().await;
    let rows = state.rows().to_vec();

    // FRA has no row in the coordinate table.
    let fra = rows.iter().find(|r| r.cnt == "FRA").expect("FRA row");
    assert_eq!(fra.value("X"), None);
    assert_eq!(fra.value("Y"), None);
    assert_eq!(fra.value("OWB"), None);
    // Its primary-table indicators are untouched.
    assert_eq!(fra.value("PV1MATH"), Some(474.0));
}

#[tokio::test]
async fn empty_cells_stay_absent_through_the_merge() {
    let state = load_fixture_state().await;
    let rows = state.rows().to_vec();

    // DEU's PAREDINT cell is empty in the fixture.
    let deu = rows.iter().find(|r| r.cnt == "DEU").expect("DEU row");
    assert_eq!(deu.value("PAREDINT"), None);
}

#[tokio::test]
async fn merged_dnk_summary_matches_the_published_numbers() {
    // Two student-level DNK rows plus the coordinate row: numeric fields
    // average per-field, coordinates pass through, the name resolves.
    let primary = FixtureSource::ok(
        "primary table",
        "CNT,M,W\nDNK,450,0.2\nDNK,470,0.4\n",
    );
    let coords = FixtureSource::ok("coordinate table", "CNT,X,Y,OWB\nDNK,1.0,-0.5,0.3\n");

    let state = load_dataset(&coords, &primary).await;
    let summaries = aggregate_by_country(state.rows());
    let dnk = &summaries["DNK"];

    assert_eq!(dnk.value("M"), Some(460.0));
    assert!((dnk.value("W").unwrap() - 0.3).abs() < 1e-12);
    assert_eq!(dnk.value("X"), Some(1.0));
    assert_eq!(dnk.value("Y"), Some(-0.5));
    assert_eq!(dnk.value("OWB"), Some(0.3));
    assert_eq!(dnk.country_name, "Denmark");
}

#[tokio::test]
async fn summaries_have_one_entry_per_country() {
    let state = load_fixture_state().await;
    let rows = state.rows().to_vec();
    let summaries = aggregate_by_country(&rows);

    let mut codes: Vec<&str> = rows.iter().map(|r| r.cnt.as_str()).collect();
    codes.sort_unstable();
    codes.dedup();
    assert_eq!(summaries.len(), codes.len());
}
