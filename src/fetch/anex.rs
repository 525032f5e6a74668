use std::time::Duration;

use async_trait::async_trait;

use super::{FetchError, GradeSource};

/// Production upstream origin for grade-distribution queries.
pub const DEFAULT_BASE_URL: &str = "https://anex.us/grades/getData/";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Upstream client posting form-encoded `{dept, number}` queries with a
/// bounded timeout.
pub struct AnexClient {
    http: reqwest::Client,
    base_url: String,
}

impl AnexClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(FetchError::Network)?;
        Ok(AnexClient {
            http,
            base_url: base_url.into(),
        })
    }
}

#[async_trait]
impl GradeSource for AnexClient {
    async fn fetch_raw(&self, department: &str, course: &str) -> Result<String, FetchError> {
        let form = [("dept", department), ("number", course)];
        let response = self
            .http
            .post(&self.base_url)
            .form(&form)
            .send()
            .await
            .map_err(FetchError::Network)?
            .error_for_status()
            .map_err(FetchError::Network)?;

        response.text().await.map_err(FetchError::Network)
    }
}
