use crate::adapters::credentials::{FALLBACK_KEY_VAR, PRIMARY_KEY_VAR};
use crate::core::{Competition, Match, MatchRecord};
use crate::server::AppState;
use crate::utils::error::FeedError;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchesResponse {
    pub matches: Vec<Match>,
    pub count: usize,
    pub last_updated: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CompetitionsResponse {
    pub competitions: Vec<Competition>,
    pub count: usize,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub uptime_seconds: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub message: String,
}

/// A failed endpoint call, rendered as a 500 with an [`ErrorBody`].
#[derive(Debug)]
pub struct EndpointError {
    context: &'static str,
    source: FeedError,
}

impl IntoResponse for EndpointError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.context.to_string(),
            message: self.source.to_string(),
        };
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}

fn fail(context: &'static str) -> impl FnOnce(FeedError) -> EndpointError {
    move |source| {
        if source.is_upstream_unavailable() {
            tracing::error!(
                "{}: {} (set {} or {})",
                context,
                source,
                PRIMARY_KEY_VAR,
                FALLBACK_KEY_VAR
            );
        } else {
            tracing::error!("{}: {}", context, source);
        }
        EndpointError { context, source }
    }
}

/// Keeps records that satisfy the [`Match`] schema, logging the rest.
pub fn validate_matches(records: Vec<MatchRecord>) -> Vec<Match> {
    records
        .into_iter()
        .filter_map(|record| {
            let id = record.0.get("id").cloned();
            match record.into_match() {
                Ok(m) => Some(m),
                Err(e) => {
                    tracing::warn!("Invalid match data (id {:?}): {}", id, e);
                    None
                }
            }
        })
        .collect()
}

pub fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// First value of `key`; later repeats are ignored.
pub fn first_param<'a>(pairs: &'a [(String, String)], key: &str) -> Option<&'a str> {
    pairs
        .iter()
        .find(|(name, _)| name == key)
        .map(|(_, value)| value.as_str())
}

pub async fn list_matches(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<MatchesResponse>, EndpointError> {
    let records = state
        .aggregator
        .fetch_upcoming_matches(first_param(&params, "competition"))
        .await
        .map_err(fail("Failed to fetch matches"))?;

    let matches = validate_matches(records);
    Ok(Json(MatchesResponse {
        count: matches.len(),
        matches,
        last_updated: timestamp(),
    }))
}

pub async fn list_competitions(
    State(state): State<AppState>,
) -> Result<Json<CompetitionsResponse>, EndpointError> {
    let competitions = state
        .aggregator
        .fetch_competitions()
        .await
        .map_err(fail("Failed to fetch competitions"))?;

    Ok(Json(CompetitionsResponse {
        count: competitions.len(),
        competitions,
    }))
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        uptime_seconds: state.started_at.elapsed().as_secs(),
    })
}
