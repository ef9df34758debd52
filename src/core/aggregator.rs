use crate::core::{ConfigProvider, CredentialSource, FootballDataSource};
use crate::domain::model::{Competition, MatchRecord};
use crate::utils::error::{FeedError, Result};
use crate::utils::validation::is_competition_code;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Queried in this order until the threshold is reached.
pub const DEFAULT_COMPETITIONS: [&str; 7] = ["PL", "CL", "FL1", "BL1", "SA", "PD", "EC"];
pub const SCHEDULED_STATUS: &str = "SCHEDULED";
pub const DEFAULT_THRESHOLD: usize = 20;
pub const DEFAULT_MAX_MATCHES: usize = 20;

/// What to do with a caller-supplied competition code.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum FilterPolicy {
    /// Query only the requested competition.
    #[default]
    Honor,
    /// Always walk the full competition list.
    Ignore,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregationSettings {
    pub competitions: Vec<String>,
    pub threshold: usize,
    pub max_matches: usize,
    pub filter_policy: FilterPolicy,
}

impl Default for AggregationSettings {
    fn default() -> Self {
        Self {
            competitions: DEFAULT_COMPETITIONS.iter().map(|c| c.to_string()).collect(),
            threshold: DEFAULT_THRESHOLD,
            max_matches: DEFAULT_MAX_MATCHES,
            filter_policy: FilterPolicy::default(),
        }
    }
}

impl AggregationSettings {
    pub fn from_config<C: ConfigProvider + ?Sized>(config: &C) -> Self {
        Self {
            competitions: config.competitions().to_vec(),
            threshold: config.aggregation_threshold(),
            max_matches: config.max_matches(),
            filter_policy: config.filter_policy(),
        }
    }
}

/// Collects upcoming matches across competitions and lists competitions.
pub struct MatchAggregator {
    source: Arc<dyn FootballDataSource>,
    credentials: Arc<dyn CredentialSource>,
    settings: AggregationSettings,
}

impl MatchAggregator {
    pub fn new(
        source: Arc<dyn FootballDataSource>,
        credentials: Arc<dyn CredentialSource>,
        settings: AggregationSettings,
    ) -> Self {
        Self {
            source,
            credentials,
            settings,
        }
    }

    pub fn settings(&self) -> &AggregationSettings {
        &self.settings
    }

    fn api_key(&self) -> Result<String> {
        self.credentials
            .api_key()
            .ok_or(FeedError::MissingCredential)
    }

    /// Codes to query for `filter`, in query order.
    pub fn competition_codes(&self, filter: Option<&str>) -> Vec<String> {
        match (self.settings.filter_policy, normalize_filter(filter)) {
            (FilterPolicy::Honor, Some(code)) => vec![code],
            _ => self.settings.competitions.clone(),
        }
    }

    /// Scheduled matches, earliest first, at most `max_matches` of them.
    ///
    /// Only a missing API key is an error. A competition whose request fails
    /// is logged and skipped, so total failure yields an empty list.
    pub async fn fetch_upcoming_matches(&self, filter: Option<&str>) -> Result<Vec<MatchRecord>> {
        let api_key = self.api_key()?;
        let codes = self.competition_codes(filter);
        tracing::debug!("Querying competitions: {}", codes.join(","));

        let mut collected: Vec<MatchRecord> = Vec::new();
        for code in &codes {
            if !is_competition_code(code) {
                tracing::warn!("Skipping malformed competition code: {:?}", code);
                continue;
            }

            match self
                .source
                .competition_matches(&api_key, code, SCHEDULED_STATUS)
                .await
            {
                Ok(records) if records.is_empty() => {
                    tracing::debug!("No scheduled matches for {}", code);
                }
                Ok(records) => {
                    tracing::debug!("{} scheduled matches for {}", records.len(), code);
                    collected.extend(records.into_iter().filter(|record| {
                        match record.competition_code() {
                            Some(other) if other != code.as_str() => {
                                tracing::warn!(
                                    "Dropping match {:?} from {} returned for {}",
                                    record.0.get("id"),
                                    other,
                                    code
                                );
                                false
                            }
                            _ => true,
                        }
                    }));
                    if collected.len() >= self.settings.threshold {
                        tracing::debug!(
                            "Threshold of {} reached after {}, stopping",
                            self.settings.threshold,
                            code
                        );
                        break;
                    }
                }
                Err(e) => {
                    tracing::warn!("Failed to fetch matches for {}: {}", code, e);
                }
            }
        }

        sort_by_kickoff(&mut collected);
        collected.truncate(self.settings.max_matches);
        Ok(collected)
    }

    /// All competitions known upstream. Any upstream failure is returned.
    pub async fn fetch_competitions(&self) -> Result<Vec<Competition>> {
        let api_key = self.api_key()?;
        self.source.competitions(&api_key).await
    }
}

fn normalize_filter(filter: Option<&str>) -> Option<String> {
    filter
        .map(str::trim)
        .filter(|code| !code.is_empty())
        .map(str::to_ascii_uppercase)
}

/// Stable sort by kickoff; records without a parseable kickoff go last.
pub fn sort_by_kickoff(records: &mut [MatchRecord]) {
    records.sort_by_cached_key(|record| {
        let kickoff = record.kickoff();
        (kickoff.is_none(), kickoff)
    });
}
