// src/dataset/error.rs
use thiserror::Error;

/// Everything that can go wrong between "two resource locations" and "one
/// merged row sequence". All variants are folded into `DatasetState` at the
/// loader boundary; nothing here crosses the API layer as a panic or a 500.
#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("failed to fetch {resource}: {status} {text}")]
    Fetch {
        resource: &'static str,
        status: u16,
        text: String,
    },
    #[error("no data rows found in the primary table")]
    EmptyDataset,
    #[error("no valid country rows after merging")]
    MergeFailed,
    #[error("csv parse error: {0}")]
    Csv(#[from] csv::Error),
    #[error("http transport error: {0}")]
    Transport(#[from] reqwest::Error),
}
