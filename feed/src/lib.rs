pub mod meta;

pub use meta::{Aggregation, Cadence, GraphKind, MetricMeta};

use serde::{Deserialize, Deserializer, Serialize};

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum FeedError {
    #[error("malformed payload: {0}")]
    Malformed(String),
    #[error("payload carries no data array")]
    MissingData,
    #[error("metric rejected by backend: {0}")]
    UnknownMetric(String),
}

/// One observation as the tracker backend stores it: a timestamp in
/// whatever shape the collector wrote and a numeric value.
///
/// Older backends persist both fields as strings, newer ones emit JSON
/// numbers, so both fields accept either representation.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RawRecord {
    #[serde(deserialize_with = "de_timestamp")]
    pub timestamp: String,
    #[serde(deserialize_with = "de_value")]
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct DataPayload {
    pub data: Vec<RawRecord>,
}

#[derive(Deserialize)]
struct Envelope {
    #[serde(default)]
    data: Option<Vec<RawRecord>>,
    #[serde(default)]
    error: Option<String>,
}

/// Decodes a metric-data response body.
///
/// The backend wraps results as `{"data": [...]}` and failures as
/// `{"error": "..."}`; anything else is malformed.
pub fn decode_payload(body: &str) -> Result<DataPayload, FeedError> {
    let envelope: Envelope =
        serde_json::from_str(body).map_err(|err| FeedError::Malformed(err.to_string()))?;

    if let Some(message) = envelope.error {
        return Err(FeedError::UnknownMetric(message));
    }

    envelope
        .data
        .map(|data| DataPayload { data })
        .ok_or(FeedError::MissingData)
}

fn de_timestamp<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Stamp {
        Epoch(i64),
        Text(String),
    }

    Ok(match Stamp::deserialize(deserializer)? {
        Stamp::Epoch(epoch) => epoch.to_string(),
        Stamp::Text(text) => text,
    })
}

fn de_value<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Value {
        Number(f64),
        Text(String),
    }

    match Value::deserialize(deserializer)? {
        Value::Number(number) => Ok(number),
        Value::Text(text) => text
            .trim()
            .parse::<f64>()
            .map_err(|_| serde::de::Error::custom(format!("value is not numeric: {text:?}"))),
    }
}
