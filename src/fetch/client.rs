use async_trait::async_trait;

use super::FetchError;

/// Abstraction over the upstream grade-distribution service.
#[async_trait]
pub trait GradeSource: Send + Sync {
    /// Returns the raw JSON body for one department/course query.
    async fn fetch_raw(&self, department: &str, course: &str) -> Result<String, FetchError>;
}
