// src/dataset/source.rs
use async_trait::async_trait;

use crate::dataset::error::DatasetError;
use crate::dataset::types::TableSource;

/// Fetches a CSV resource over HTTP. A non-success status is a typed
/// `Fetch` error carrying the status code and reason text.
pub struct HttpSource {
    label: &'static str,
    url: String,
    client: reqwest::Client,
}

impl HttpSource {
    pub fn new(label: &'static str, url: String) -> Self {
        Self {
            label,
            url,
            client: reqwest::Client::new(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl TableSource for HttpSource {
    async fn fetch_text(&self) -> Result<String, DatasetError> {
        let resp = self.client.get(&self.url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(DatasetError::Fetch {
                resource: self.label,
                status: status.as_u16(),
                text: status.canonical_reason().unwrap_or("").to_string(),
            });
        }
        Ok(resp.text().await?)
    }

    fn name(&self) -> &'static str {
        self.label
    }
}

/// In-memory stand-in for tests: either a canned body or a canned HTTP
/// failure, so the loader's fallback paths can be exercised without sockets.
pub struct FixtureSource {
    label: &'static str,
    body: FixtureBody,
}

enum FixtureBody {
    Ok(String),
    HttpError { status: u16, text: String },
}

impl FixtureSource {
    pub fn ok(label: &'static str, text: &str) -> Self {
        Self {
            label,
            body: FixtureBody::Ok(text.to_string()),
        }
    }

    pub fn http_error(label: &'static str, status: u16, text: &str) -> Self {
        Self {
            label,
            body: FixtureBody::HttpError {
                status,
                text: text.to_string(),
            },
        }
    }
}

#[async_trait]
impl TableSource for FixtureSource {
    async fn fetch_text(&self) -> Result<String, DatasetError> {
        match &self.body {
            FixtureBody::Ok(s) => Ok(s.clone()),
            FixtureBody::HttpError { status, text } => Err(DatasetError::Fetch {
                resource: self.label,
                status: *status,
                text: text.clone(),
            }),
        }
    }

    fn name(&self) -> &'static str {
        self.label
    }
}
