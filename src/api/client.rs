use super::models::SessionState;
use crate::error::Result;
use async_trait::async_trait;

#[async_trait]
pub trait DdnsApiClient {
    /// Resolve the caller's address to a record and obtain an update token.
    async fn register(&self, access_salt: &str) -> Result<SessionState>;
    /// Ask the service to refresh the record bound to `token`.
    async fn update(&self, token: &str) -> Result<()>;
}
