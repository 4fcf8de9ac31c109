//! Error taxonomy shared by the decoder, the providers and the scaling engine.

use thiserror::Error;

use crate::schema::FileType;

/// Errors surfaced by decoding and scaling.
#[derive(Debug, Error)]
pub enum Error {
    /// A file-type tag that no decoder understands.
    #[error("unsupported file type: {0}")]
    UnsupportedFileType(String),

    /// The provider was never given a table for this file type.
    #[error("no table registered for {0}")]
    TableNotRegistered(FileType),

    /// A provider returned a table of the wrong shape for the requested tag.
    #[error("expected {expected} table, found {found}")]
    TableMismatch {
        expected: &'static str,
        found: &'static str,
    },

    /// A source dump needed by a decoder was not supplied.
    #[error("missing raw dump: {0}")]
    MissingDump(String),

    #[error("malformed {entity} row ({reason}): {line}")]
    MalformedRow {
        entity: &'static str,
        line: String,
        reason: String,
    },

    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: u32 },

    /// Branches the upstream formulas define but this engine deliberately
    /// refuses to guess at.
    #[error("unsupported feature: {0}")]
    UnsupportedFeature(String),

    #[error("item {item_id}: stat {mod_type} cannot be budgeted")]
    UnscalableMod { item_id: u32, mod_type: i32 },

    #[error("invalid item line: {0}")]
    InvalidItemLine(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl Error {
    pub(crate) fn malformed(
        entity: &'static str,
        line: &str,
        reason: impl Into<String>,
    ) -> Self {
        Error::MalformedRow {
            entity,
            line: line.trim().to_string(),
            reason: reason.into(),
        }
    }

    /// True for failures scoped to one build. Provider and decode errors
    /// are not recoverable.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::NotFound { .. } | Error::UnsupportedFeature(_) | Error::UnscalableMod { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
