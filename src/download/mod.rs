pub mod cache;
pub mod client;

pub use cache::*;
pub use client::*;

use anyhow::{Context, Result};
use std::collections::BTreeSet;
use std::path::PathBuf;
use tracing::info;

use crate::schema::FileType;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DownloadSummary {
    pub downloaded: Vec<String>,
    pub unchanged: Vec<String>,
}

/// Bring every dump the given file types read up to date in the branch
/// cache. Returns the branch directory.
pub fn ensure_dumps_downloaded(
    client: &DumpClient,
    cache: &CacheManager,
    branch: &str,
    file_types: &[FileType],
    force: bool,
) -> Result<(PathBuf, DownloadSummary)> {
    let files: BTreeSet<&str> = file_types
        .iter()
        .flat_map(|t| t.source_files().iter().copied())
        .collect();

    let mut summary = DownloadSummary::default();
    for file in files {
        let etag = if force {
            None
        } else {
            cache.read_etag(branch, file)
        };
        let outcome = client
            .fetch(branch, file, etag.as_deref())
            .with_context(|| format!("Failed to fetch {} from {}", file, branch))?;

        match outcome {
            FetchOutcome::NotModified => {
                info!("{} is up to date", file);
                summary.unchanged.push(file.to_string());
            }
            FetchOutcome::Downloaded { text, etag } => {
                cache.store(branch, file, &text, etag.as_deref())?;
                info!("downloaded {} ({} bytes)", file, text.len());
                summary.downloaded.push(file.to_string());
            }
        }
    }

    Ok((cache.branch_dir(branch), summary))
}
