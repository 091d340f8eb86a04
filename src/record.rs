use chrono::{DateTime, NaiveDate, NaiveDateTime};
use feed::RawRecord;

/// A raw observation reduced to what aggregation needs: the calendar
/// date it happened on and its finite numeric value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedRecord {
    pub date: NaiveDate,
    pub value: f64,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("unparseable timestamp: {0:?}")]
    Timestamp(String),
    #[error("non-finite value: {0}")]
    Value(f64),
}

/// Normalizes a batch of raw records, dropping the ones that don't
/// parse. One bad row in a feed must not blank the whole chart, so
/// failures are logged and skipped rather than propagated.
pub fn normalize(raw: &[RawRecord]) -> Vec<NormalizedRecord> {
    raw.iter()
        .filter_map(|record| match try_parse(record) {
            Ok(normalized) => Some(normalized),
            Err(err) => {
                log::warn!("dropping record: {err}");
                None
            }
        })
        .collect()
}

pub fn try_parse(record: &RawRecord) -> Result<NormalizedRecord, ParseError> {
    if !record.value.is_finite() {
        return Err(ParseError::Value(record.value));
    }

    Ok(NormalizedRecord {
        date: parse_timestamp(&record.timestamp)?,
        value: record.value,
    })
}

// Epoch values this large can only be milliseconds: 1e11 seconds is
// past the year 5000, 1e11 ms is 1973.
const EPOCH_MILLIS_CUTOFF: i64 = 100_000_000_000;

/// Accepts the timestamp shapes collectors have actually produced:
/// RFC 3339, ISO date-times without an offset (`T` or space separated),
/// bare dates, and unix epochs in seconds or milliseconds.
///
/// Offset timestamps keep the calendar date of their own offset, so a
/// record logged late at night lands on the day the user experienced.
fn parse_timestamp(raw: &str) -> Result<NaiveDate, ParseError> {
    let trimmed = raw.trim();

    if let Ok(datetime) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(datetime.date_naive());
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(datetime.date());
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date);
    }

    if let Ok(epoch) = trimmed.parse::<i64>() {
        let parsed = if epoch.abs() >= EPOCH_MILLIS_CUTOFF {
            DateTime::from_timestamp_millis(epoch)
        } else {
            DateTime::from_timestamp(epoch, 0)
        };
        if let Some(datetime) = parsed {
            return Ok(datetime.date_naive());
        }
    }

    Err(ParseError::Timestamp(raw.to_string()))
}
