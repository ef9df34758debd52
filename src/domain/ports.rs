use crate::domain::model::{Competition, MatchRecord, NewUser, User};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Read access to the football-data API.
#[async_trait]
pub trait FootballDataSource: Send + Sync {
    /// Matches of one competition, restricted to `status`.
    async fn competition_matches(
        &self,
        api_key: &str,
        code: &str,
        status: &str,
    ) -> Result<Vec<MatchRecord>>;

    async fn competitions(&self, api_key: &str) -> Result<Vec<Competition>>;
}

/// Supplies the upstream API key. Consulted on every call, never cached.
pub trait CredentialSource: Send + Sync {
    fn api_key(&self) -> Option<String>;
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn get_user(&self, id: u64) -> Option<User>;
    async fn get_user_by_username(&self, username: &str) -> Option<User>;
    async fn create_user(&self, user: NewUser) -> Result<User>;
}

pub trait ConfigProvider: Send + Sync {
    fn api_base_url(&self) -> &str;
    fn request_timeout(&self) -> Duration;
    fn competitions(&self) -> &[String];
    fn aggregation_threshold(&self) -> usize;
    fn max_matches(&self) -> usize;
    fn filter_policy(&self) -> crate::core::aggregator::FilterPolicy;
    /// `None` disables response caching.
    fn cache_ttl(&self) -> Option<Duration>;
}
