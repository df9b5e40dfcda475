//! Validation of homework status responses and extraction of review verdicts
//!
//! Responses are kept as [`serde_json::Value`] rather than typed structs so
//! that each contract violation maps onto its own [`WatchError`] kind instead
//! of a single opaque deserialization failure.

use std::fmt;

use serde_json::Value;

use crate::error::{Result, WatchError};

/// Outcome of a homework review
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Approved,
    Reviewing,
    Rejected,
}

impl Verdict {
    /// Look up a verdict by its API status key
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "approved" => Some(Verdict::Approved),
            "reviewing" => Some(Verdict::Reviewing),
            "rejected" => Some(Verdict::Rejected),
            _ => None,
        }
    }

    /// The API status key for this verdict
    pub fn key(&self) -> &'static str {
        match self {
            Verdict::Approved => "approved",
            Verdict::Reviewing => "reviewing",
            Verdict::Rejected => "rejected",
        }
    }

    /// Human-readable sentence sent to the chat
    pub fn text(&self) -> &'static str {
        match self {
            Verdict::Approved => "Работа проверена: ревьюеру всё понравилось. Ура!",
            Verdict::Reviewing => "Работа взята на проверку ревьюером.",
            Verdict::Rejected => "Работа проверена: у ревьюера есть замечания.",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Check a decoded response against the API contract and return its homeworks.
///
/// Checks run in order and the first violation wins. An empty list is valid
/// and means nothing changed since the requested `from_date`.
pub fn check_response(response: &Value) -> Result<&[Value]> {
    let map = response
        .as_object()
        .ok_or_else(|| WatchError::Shape("not a mapping".to_string()))?;
    let homeworks = map
        .get("homeworks")
        .ok_or_else(|| WatchError::MissingKey("homeworks".to_string()))?;
    homeworks
        .as_array()
        .map(Vec::as_slice)
        .ok_or_else(|| WatchError::Shape("homeworks not a list".to_string()))
}

/// Read the server-supplied cursor for the next `from_date`
pub fn read_cursor(response: &Value) -> Result<i64> {
    match response.get("current_date") {
        None | Some(Value::Null) => Err(WatchError::MissingCursor("key absent".to_string())),
        Some(value) => value
            .as_i64()
            .ok_or_else(|| WatchError::MissingCursor(format!("not an integer: {}", value))),
    }
}

/// Build the status-change message for one homework record.
///
/// Callers pass the first record of the list: the API is assumed to return
/// the most recent submission first. Whether "most recent" means last
/// created or last reviewed is not documented by the API.
pub fn parse_status(record: &Value) -> Result<String> {
    let name = record
        .get("homework_name")
        .and_then(Value::as_str)
        .ok_or_else(|| WatchError::MissingKey("homework_name".to_string()))?;
    let status = record.get("status");
    let verdict = status
        .and_then(Value::as_str)
        .and_then(Verdict::from_key)
        .ok_or_else(|| {
            WatchError::UnrecognizedStatus(match status {
                Some(Value::String(s)) => s.clone(),
                Some(other) => other.to_string(),
                None => "<missing>".to_string(),
            })
        })?;

    Ok(format!(
        "Изменился статус проверки работы \"{}\". {}",
        name,
        verdict.text()
    ))
}
