// src/dataset/state.rs
//
// The load lifecycle as an explicit state machine rather than ad-hoc
// loading/error flags. A state is always published whole; readers never see
// a half-merged dataset.

use std::sync::RwLock;

use crate::dataset::types::IndicatorRecord;

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DatasetState {
    Loading,
    Loaded {
        rows: Vec<IndicatorRecord>,
    },
    /// Degraded success: coordinate-only rows plus a human-readable notice.
    Partial {
        rows: Vec<IndicatorRecord>,
        notice: String,
    },
    Failed {
        error: String,
    },
}

/// The flat `{ rows, loading, error }` projection the frontend binds to.
/// `Partial` reports its notice through `error` while still carrying rows.
#[derive(Debug, Clone, serde::Serialize)]
pub struct DatasetView {
    pub rows: Vec<IndicatorRecord>,
    pub loading: bool,
    pub error: Option<String>,
}

impl DatasetState {
    pub fn rows(&self) -> &[IndicatorRecord] {
        match self {
            DatasetState::Loaded { rows } | DatasetState::Partial { rows, .. } => rows,
            DatasetState::Loading | DatasetState::Failed { .. } => &[],
        }
    }

    pub fn view(&self) -> DatasetView {
        match self {
            DatasetState::Loading => DatasetView {
                rows: Vec::new(),
                loading: true,
                error: None,
            },
            DatasetState::Loaded { rows } => DatasetView {
                rows: rows.clone(),
                loading: false,
                error: None,
            },
            DatasetState::Partial { rows, notice } => DatasetView {
                rows: rows.clone(),
                loading: false,
                error: Some(notice.clone()),
            },
            DatasetState::Failed { error } => DatasetView {
                rows: Vec::new(),
                loading: false,
                error: Some(error.clone()),
            },
        }
    }
}

/// Shared holder for the current state. Loads compute a complete new state
/// off to the side and swap it in with a single write.
#[derive(Debug)]
pub struct DatasetStore {
    inner: RwLock<DatasetState>,
}

impl Default for DatasetStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DatasetStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(DatasetState::Loading),
        }
    }

    pub fn publish(&self, state: DatasetState) {
        let mut guard = self.inner.write().expect("dataset rwlock poisoned");
        *guard = state;
    }

    pub fn snapshot(&self) -> DatasetState {
        self.inner.read().expect("dataset rwlock poisoned").clone()
    }

    /// Rows of the current state (empty while loading or after a hard failure).
    pub fn rows(&self) -> Vec<IndicatorRecord> {
        self.inner
            .read()
            .expect("dataset rwlock poisoned")
            .rows()
            .to_vec()
    }
}
