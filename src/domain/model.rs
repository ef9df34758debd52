use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: i64,
    pub name: String,
    pub short_name: String,
    /// Three-letter code, e.g. "ARS".
    pub tla: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crest: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Competition {
    pub id: i64,
    pub name: String,
    pub code: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emblem: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    pub id: i64,
    pub home_team: Team,
    pub away_team: Team,
    pub utc_date: String,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matchday: Option<i64>,
    pub competition: Competition,
}

impl Match {
    pub fn kickoff(&self) -> Option<DateTime<Utc>> {
        parse_kickoff(&self.utc_date)
    }
}

/// A match exactly as the upstream API returned it.
///
/// Records are kept untyped through aggregation so that one malformed entry
/// cannot fail a whole competition; they are checked against [`Match`] only
/// at the HTTP boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatchRecord(pub serde_json::Value);

impl MatchRecord {
    pub fn kickoff(&self) -> Option<DateTime<Utc>> {
        self.0.get("utcDate")?.as_str().and_then(parse_kickoff)
    }

    pub fn competition_code(&self) -> Option<&str> {
        self.0.get("competition")?.get("code")?.as_str()
    }

    pub fn into_match(self) -> serde_json::Result<Match> {
        serde_json::from_value(self.0)
    }
}

pub fn parse_kickoff(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewUser {
    pub username: String,
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> serde_json::Value {
        json!({
            "id": 497410,
            "utcDate": "2030-08-17T14:00:00Z",
            "status": "SCHEDULED",
            "matchday": 1,
            "stage": "REGULAR_SEASON",
            "homeTeam": {"id": 57, "name": "Arsenal FC", "shortName": "Arsenal", "tla": "ARS", "crest": "https://crests.football-data.org/57.png"},
            "awayTeam": {"id": 63, "name": "Fulham FC", "shortName": "Fulham", "tla": "FUL", "crest": null},
            "competition": {"id": 2021, "name": "Premier League", "code": "PL", "type": "LEAGUE", "emblem": "https://crests.football-data.org/PL.png"}
        })
    }

    #[test]
    fn test_record_into_match() {
        let record = MatchRecord(sample());
        assert_eq!(record.competition_code(), Some("PL"));

        let m = record.into_match().unwrap();
        assert_eq!(m.home_team.tla, "ARS");
        assert_eq!(m.away_team.crest, None);
        assert_eq!(m.matchday, Some(1));
        assert_eq!(m.competition.kind, "LEAGUE");
        assert_eq!(
            m.kickoff().unwrap().to_rfc3339(),
            "2030-08-17T14:00:00+00:00"
        );
    }

    #[test]
    fn test_record_missing_utc_date_is_rejected() {
        let mut value = sample();
        value.as_object_mut().unwrap().remove("utcDate");
        let record = MatchRecord(value);

        assert!(record.kickoff().is_none());
        assert!(record.into_match().is_err());
    }

    #[test]
    fn test_match_serializes_camel_case_and_omits_absent_options() {
        let mut value = sample();
        value.as_object_mut().unwrap().remove("matchday");
        let m = MatchRecord(value).into_match().unwrap();

        let out = serde_json::to_value(&m).unwrap();
        assert_eq!(out["homeTeam"]["shortName"], "Arsenal");
        assert_eq!(out["competition"]["type"], "LEAGUE");
        assert!(out.get("matchday").is_none());
        assert!(out["awayTeam"].get("crest").is_none());
        assert!(out.get("stage").is_none());
    }

    #[test]
    fn test_parse_kickoff_offsets() {
        let a = parse_kickoff("2030-08-17T16:00:00+02:00").unwrap();
        let b = parse_kickoff("2030-08-17T14:00:00Z").unwrap();
        assert_eq!(a, b);
        assert!(parse_kickoff("not a date").is_none());
    }
}
