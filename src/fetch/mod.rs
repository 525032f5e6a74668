//! Upstream fetch contract and error kinds.

mod anex;
mod client;

pub use anex::{AnexClient, DEFAULT_BASE_URL};
pub use client::GradeSource;

use std::error::Error;
use std::fmt;

use tracing::debug;

use crate::parser;
use crate::records::ClassRecord;

/// Failure modes of one upstream query. Per-field parse problems are not
/// errors; the normalizer degrades those silently.
#[derive(Debug)]
pub enum FetchError {
    /// Connection failure, timeout, or a non-success upstream status.
    Network(reqwest::Error),
    /// Upstream answered but the body is not the expected JSON shape.
    Decode(serde_json::Error),
    /// Well-formed response carrying zero classes.
    UpstreamEmpty,
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Network(e) => write!(f, "upstream request failed: {e}"),
            FetchError::Decode(e) => write!(f, "upstream response was not valid JSON: {e}"),
            FetchError::UpstreamEmpty => f.write_str("no data found for this class"),
        }
    }
}

impl Error for FetchError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            FetchError::Network(e) => Some(e),
            FetchError::Decode(e) => Some(e),
            FetchError::UpstreamEmpty => None,
        }
    }
}

/// Fetches and normalizes one course's grade records.
///
/// # Errors
///
/// [`FetchError::UpstreamEmpty`] when the response carries no classes;
/// network and decode failures pass through as their own kinds.
#[tracing::instrument(skip(source))]
pub async fn fetch_records<S: GradeSource>(
    source: &S,
    department: &str,
    course: &str,
) -> Result<Vec<ClassRecord>, FetchError> {
    let body = source.fetch_raw(department, course).await?;
    let records = parser::parse_response(&body).map_err(FetchError::Decode)?;
    if records.is_empty() {
        return Err(FetchError::UpstreamEmpty);
    }
    debug!(count = records.len(), "normalized upstream records");
    Ok(records)
}
