//! Wire schema for the game API and the coercion rules applied at its edge.
//!
//! DESIGN
//! ======
//! The server does not normalize its JSON: booleans arrive as `true` or
//! `"true"`, counters as `3` or `"3"`. All of that is absorbed here so the rest
//! of the crate only sees typed values. Application errors are detected before
//! typed decoding so an `{ "error": ... }` body never reaches a DTO.

#[cfg(test)]
#[path = "wire_test.rs"]
mod wire_test;

use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::cards::Card;
use crate::error::SyncError;

/// Response to `POST /api/game`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGameResponse {
    #[serde(deserialize_with = "deserialize_opaque_id")]
    pub game_id: String,
    #[serde(default, deserialize_with = "deserialize_opt_number_list")]
    pub sequence: Option<Vec<u32>>,
    #[serde(default, deserialize_with = "deserialize_opt_millis")]
    pub memorization_time: Option<u64>,
    #[serde(default)]
    pub cards: Option<Vec<Card>>,
    #[serde(default, deserialize_with = "deserialize_opt_count")]
    pub total_pairs: Option<u32>,
}

/// Response to `POST /api/game/{id}/flip`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlipResponse {
    pub cards: Vec<Card>,
    #[serde(default, deserialize_with = "deserialize_id_list")]
    pub flipped_cards: Vec<u32>,
    #[serde(default, deserialize_with = "deserialize_count")]
    pub moves: u32,
    #[serde(default, deserialize_with = "deserialize_count")]
    pub pairs_found: u32,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub is_complete: bool,
    #[serde(default, deserialize_with = "deserialize_count")]
    pub score: u32,
}

/// Response to `POST /api/game/{id}/check-pair`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckPairResponse {
    pub cards: Vec<Card>,
    #[serde(default, deserialize_with = "deserialize_count")]
    pub moves: u32,
    #[serde(default, deserialize_with = "deserialize_count")]
    pub pairs_found: u32,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub is_pair: bool,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub is_complete: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default, deserialize_with = "deserialize_count")]
    pub score: u32,
}

/// Response to `POST /api/game/{id}/check`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct CheckAnswerResponse {
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub success: bool,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub message: String,
    #[serde(default, deserialize_with = "deserialize_count")]
    pub score: u32,
}

/// Response to `GET /api/game/{id}`: the authoritative snapshot.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    #[serde(deserialize_with = "deserialize_opaque_id")]
    pub game_id: String,
    #[serde(default, rename = "type")]
    pub game_type: Option<String>,
    #[serde(default)]
    pub difficulty: Option<String>,
    #[serde(default)]
    pub cards: Option<Vec<Card>>,
    #[serde(default, deserialize_with = "deserialize_count")]
    pub moves: u32,
    #[serde(default, deserialize_with = "deserialize_count")]
    pub pairs_found: u32,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub is_complete: bool,
    #[serde(default, deserialize_with = "deserialize_opt_number_list")]
    pub sequence: Option<Vec<u32>>,
}

/// Body of `POST /api/game/{id}/flip`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FlipBody {
    #[serde(rename = "cardId")]
    pub card_id: u32,
}

/// Body of `POST /api/game/{id}/check-pair`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CheckPairBody {
    #[serde(rename = "cardId1")]
    pub card_id1: u32,
    #[serde(rename = "cardId2")]
    pub card_id2: u32,
}

/// Body of `POST /api/game/{id}/check`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CheckAnswerBody {
    pub answer: Vec<u32>,
}

/// Completion/success coercion: boolean `true` or the string `"true"`.
/// Everything else, including `"TRUE"`, `1` and `null`, is false.
#[must_use]
pub fn is_true_signal(value: &Value) -> bool {
    match value {
        Value::Bool(flag) => *flag,
        Value::String(text) => text == "true",
        _ => false,
    }
}

/// Text of a truthy `error` field, if the body carries one.
///
/// Truthiness follows the server's JSON producers: `null`, `false`, `0` and
/// the empty string mean "no error".
#[must_use]
pub fn error_text(body: &Value) -> Option<String> {
    let error = body.get("error")?;
    match error {
        Value::Null | Value::Bool(false) => None,
        Value::String(text) if text.is_empty() => None,
        Value::String(text) => Some(text.clone()),
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        other => Some(other.to_string()),
    }
}

/// Decode a response body, short-circuiting on an application error.
///
/// # Errors
///
/// [`SyncError::ResponseParse`] for non-JSON bodies or shape mismatches, and
/// [`SyncError::ServerRejected`] when the body carries a truthy `error`.
pub fn parse_response<T: DeserializeOwned>(body: &str) -> Result<T, SyncError> {
    let value: Value = serde_json::from_str(body).map_err(|e| SyncError::ResponseParse(e.to_string()))?;
    if let Some(text) = error_text(&value) {
        return Err(SyncError::ServerRejected(text));
    }
    serde_json::from_value(value).map_err(|e| SyncError::ResponseParse(e.to_string()))
}

/// Error for a non-success HTTP status. An `error` field in the body wins
/// over the bare status code.
#[must_use]
pub fn status_error(status: u16, body: &str) -> SyncError {
    match serde_json::from_str::<Value>(body) {
        Ok(value) => match error_text(&value) {
            Some(text) => SyncError::ServerRejected(text),
            None => SyncError::Network(format!("HTTP {status}")),
        },
        Err(_) => SyncError::Network(format!("HTTP {status}")),
    }
}

/// Integer view of a number or numeric string.
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(crate) fn integer_from_value(value: &Value) -> Option<u64> {
    match value {
        Value::Number(number) => {
            if let Some(int) = number.as_u64() {
                return Some(int);
            }
            number
                .as_f64()
                .filter(|f| f.is_finite() && f.fract() == 0.0 && *f >= 0.0 && *f <= u64::MAX as f64)
                .map(|f| f as u64)
        }
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

fn count_from_value(value: &Value) -> Option<u32> {
    integer_from_value(value).and_then(|n| u32::try_from(n).ok())
}

pub(crate) fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(is_true_signal(&value))
}

/// Lenient counter: unparseable values read as zero.
fn deserialize_count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(count_from_value(&value).unwrap_or(0))
}

fn deserialize_opt_count<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(count_from_value(&value))
}

fn deserialize_opt_millis<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(integer_from_value(&value))
}

pub(crate) fn deserialize_card_id<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    count_from_value(&value).ok_or_else(|| D::Error::custom(format!("invalid card id {value}")))
}

fn numbers_from_value<E: serde::de::Error>(value: &Value, what: &str) -> Result<Vec<u32>, E> {
    let Value::Array(items) = value else {
        return Err(E::custom(format!("expected {what} array")));
    };
    items
        .iter()
        .map(|item| count_from_value(item).ok_or_else(|| E::custom(format!("invalid {what} entry {item}"))))
        .collect()
}

fn deserialize_id_list<'de, D>(deserializer: D) -> Result<Vec<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(Vec::new());
    }
    numbers_from_value(&value, "card id")
}

fn deserialize_opt_number_list<'de, D>(deserializer: D) -> Result<Option<Vec<u32>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(None);
    }
    numbers_from_value(&value, "number").map(Some)
}

fn deserialize_opaque_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(text) if !text.is_empty() => Ok(text),
        Value::Number(number) => Ok(number.to_string()),
        other => Err(D::Error::custom(format!("invalid game id {other}"))),
    }
}

/// Lenient message: `null` reads as empty, numbers as their text.
fn deserialize_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(String::new()),
        Value::String(text) => Ok(text),
        other => Ok(other.to_string()),
    }
}

pub(crate) fn deserialize_symbol<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(text) => Ok(text),
        Value::Number(number) => Ok(number.to_string()),
        other => Err(D::Error::custom(format!("invalid card value {other}"))),
    }
}
