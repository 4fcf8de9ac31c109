use reqwest::blocking::Client;
use reqwest::header::{ETAG, IF_NONE_MATCH};
use reqwest::StatusCode;
use tracing::debug;

use crate::error::Result;

const RAW_BASE_URL: &str = "https://raw.githubusercontent.com/simulationcraft/simc";
const GENERATED_PATH: &str = "engine/dbc/generated";

/// Result of a conditional fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Downloaded { text: String, etag: Option<String> },
    NotModified,
}

/// Fetches generated dumps from the upstream repository
pub struct DumpClient {
    client: Client,
    base_url: String,
}

impl DumpClient {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("simc-data/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            base_url: RAW_BASE_URL.to_string(),
        })
    }

    /// Point the client at a mirror instead of GitHub
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn dump_url(&self, branch: &str, file: &str) -> String {
        format!("{}/{}/{}/{}", self.base_url, branch, GENERATED_PATH, file)
    }

    /// Download one dump, or learn that the copy tagged `etag` is current
    pub fn fetch(&self, branch: &str, file: &str, etag: Option<&str>) -> Result<FetchOutcome> {
        let url = self.dump_url(branch, file);
        let mut request = self.client.get(&url);
        if let Some(etag) = etag {
            request = request.header(IF_NONE_MATCH, etag);
        }

        let response = request.send()?;
        if response.status() == StatusCode::NOT_MODIFIED {
            debug!("{} not modified", url);
            return Ok(FetchOutcome::NotModified);
        }
        let response = response.error_for_status()?;
        let etag = response
            .headers()
            .get(ETAG)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let text = response.text()?;
        debug!("fetched {} ({} bytes)", url, text.len());
        Ok(FetchOutcome::Downloaded { text, etag })
    }
}
