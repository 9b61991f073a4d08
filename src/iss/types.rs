//! open-notify response records and the domain values built from them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::client::FetchError;

/// Coordinate as sent by the API. open-notify sends strings; plain numbers
/// are accepted too.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Coordinate {
    Text(String),
    Number(f64),
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Coordinate::Text(s) => f.write_str(s),
            Coordinate::Number(n) => write!(f, "{n}"),
        }
    }
}

/// `/iss-now.json` body.
#[derive(Debug, Deserialize)]
pub struct NowResponse {
    pub timestamp: i64,
    pub iss_position: WirePosition,
}

/// Position object inside `/iss-now.json`.
#[derive(Debug, Deserialize)]
pub struct WirePosition {
    pub latitude: Coordinate,
    pub longitude: Coordinate,
}

/// `/astros.json` body.
#[derive(Debug, Deserialize)]
pub struct AstrosResponse {
    #[serde(default)]
    pub people: Vec<CrewMember>,
}

/// One person in orbit and the craft they are aboard.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CrewMember {
    pub name: String,
    pub craft: String,
}

/// `/iss-pass.json` body.
#[derive(Debug, Deserialize)]
pub struct PassResponse {
    #[serde(default)]
    pub response: Vec<WirePass>,
}

/// A predicted pass in unix seconds.
#[derive(Debug, Deserialize)]
pub struct WirePass {
    pub risetime: i64,
    pub duration: u64,
}

/// Error body returned alongside non-2xx statuses.
#[derive(Debug, Default, Deserialize)]
pub struct ApiFailure {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub reason: String,
}

/// Current ground position of the station.
#[derive(Debug, Clone, PartialEq)]
pub struct Position {
    pub latitude: String,
    pub longitude: String,
    /// Time the API sampled the position.
    pub timestamp: DateTime<Utc>,
}

/// Predicted visibility window for an observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pass {
    pub rise_time: DateTime<Utc>,
    pub duration_secs: u64,
}

/// Fixed observer location used for pass predictions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observer {
    pub latitude: f64,
    pub longitude: f64,
}

/// Convert unix seconds into a UTC timestamp.
pub fn from_unix(secs: i64) -> Result<DateTime<Utc>, FetchError> {
    DateTime::from_timestamp(secs, 0).ok_or(FetchError::Timestamp(secs))
}

impl TryFrom<NowResponse> for Position {
    type Error = FetchError;

    fn try_from(r: NowResponse) -> Result<Self, Self::Error> {
        Ok(Self {
            latitude: r.iss_position.latitude.to_string(),
            longitude: r.iss_position.longitude.to_string(),
            timestamp: from_unix(r.timestamp)?,
        })
    }
}

impl TryFrom<PassResponse> for Vec<Pass> {
    type Error = FetchError;

    /// Passes come back sorted by rise time regardless of response order.
    fn try_from(r: PassResponse) -> Result<Self, Self::Error> {
        let mut passes = r
            .response
            .into_iter()
            .map(|p| {
                Ok(Pass {
                    rise_time: from_unix(p.risetime)?,
                    duration_secs: p.duration,
                })
            })
            .collect::<Result<Vec<_>, FetchError>>()?;
        passes.sort_by_key(|p| p.rise_time);
        Ok(passes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_accepts_string_and_numeric_coordinates() {
        let body = r#"{"message":"success","timestamp":1700000000,
            "iss_position":{"latitude":"-12.3456","longitude":87.5}}"#;
        let now: NowResponse = serde_json::from_str(body).unwrap();
        let pos = Position::try_from(now).unwrap();
        assert_eq!(pos.latitude, "-12.3456");
        assert_eq!(pos.longitude, "87.5");
        assert_eq!(pos.timestamp.timestamp(), 1_700_000_000);
    }

    #[test]
    fn passes_are_sorted_by_rise_time() {
        let body = r#"{"message":"success","response":[
            {"risetime":1700003000,"duration":300},
            {"risetime":1700001000,"duration":600}]}"#;
        let resp: PassResponse = serde_json::from_str(body).unwrap();
        let passes = Vec::<Pass>::try_from(resp).unwrap();
        assert_eq!(passes.len(), 2);
        assert_eq!(passes[0].rise_time.timestamp(), 1_700_001_000);
        assert_eq!(passes[0].duration_secs, 600);
        assert_eq!(passes[1].rise_time.timestamp(), 1_700_003_000);
    }

    #[test]
    fn out_of_range_timestamp_is_rejected() {
        assert!(matches!(from_unix(i64::MAX), Err(FetchError::Timestamp(_))));
    }

    #[test]
    fn astros_missing_people_is_empty() {
        let resp: AstrosResponse = serde_json::from_str(r#"{"message":"success"}"#).unwrap();
        assert!(resp.people.is_empty());
    }
}
