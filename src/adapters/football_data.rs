use crate::core::{Competition, FootballDataSource, MatchRecord};
use crate::utils::error::{FeedError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.football-data.org/v4";
const AUTH_HEADER: &str = "X-Auth-Token";

#[derive(Debug, Default, Deserialize)]
struct MatchesPayload {
    matches: Option<Vec<MatchRecord>>,
}

#[derive(Debug, Default, Deserialize)]
struct CompetitionsPayload {
    competitions: Option<Vec<serde_json::Value>>,
}

/// HTTP client for the football-data.org v4 API.
#[derive(Debug, Clone)]
pub struct FootballDataClient {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl FootballDataClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("fixture-feed/", env!("CARGO_PKG_VERSION")))
            .build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Ok(Self {
            client,
            base_url,
            timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get<T: DeserializeOwned>(
        &self,
        api_key: &str,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .header(AUTH_HEADER, api_key)
            .query(query)
            .timeout(self.timeout)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("{} -> {}", url, status);
        if !status.is_success() {
            return Err(FeedError::Upstream {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl FootballDataSource for FootballDataClient {
    async fn competition_matches(
        &self,
        api_key: &str,
        code: &str,
        status: &str,
    ) -> Result<Vec<MatchRecord>> {
        let path = format!("/competitions/{}/matches", code);
        let payload: MatchesPayload = self.get(api_key, &path, &[("status", status)]).await?;
        Ok(payload.matches.unwrap_or_default())
    }

    async fn competitions(&self, api_key: &str) -> Result<Vec<Competition>> {
        let payload: CompetitionsPayload = self.get(api_key, "/competitions", &[]).await?;

        let competitions = payload
            .competitions
            .unwrap_or_default()
            .into_iter()
            .filter_map(|raw| match serde_json::from_value::<Competition>(raw) {
                Ok(competition) => Some(competition),
                Err(e) => {
                    tracing::warn!("Dropping invalid competition: {}", e);
                    None
                }
            })
            .collect();
        Ok(competitions)
    }
}
