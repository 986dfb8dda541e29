//! Storage format of the `availabilities_json` column.
//!
//! Rows are written as a versioned envelope:
//!
//! ```json
//! {"version":1,"windows":[{"date":"2025-11-20","start":"18:00","end":"21:00"}]}
//! ```
//!
//! Databases created by the first deployment hold a bare JSON array of
//! windows; [`decode`] still reads those.

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use super::dto::Availability;

pub const CURRENT_VERSION: u64 = 1;

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("malformed availabilities: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("unsupported availabilities version {0}")]
    UnsupportedVersion(u64),

    #[error("availabilities envelope has no version")]
    MissingVersion,

    #[error("availabilities envelope has no windows")]
    MissingWindows,

    #[error("stored availabilities are empty")]
    Empty,
}

#[derive(Serialize)]
struct Envelope<'a> {
    version: u64,
    windows: &'a [Availability],
}

pub fn encode(windows: &[Availability]) -> Result<String, CodecError> {
    let raw = serde_json::to_string(&Envelope {
        version: CURRENT_VERSION,
        windows,
    })?;
    Ok(raw)
}

/// Every stored plan has at least one window, so an empty list is corruption.
pub fn decode(raw: &str) -> Result<Vec<Availability>, CodecError> {
    let windows: Vec<Availability> = match serde_json::from_str::<Value>(raw)? {
        legacy @ Value::Array(_) => serde_json::from_value(legacy)?,
        Value::Object(mut obj) => {
            let version = obj
                .get("version")
                .and_then(Value::as_u64)
                .ok_or(CodecError::MissingVersion)?;
            if version != CURRENT_VERSION {
                return Err(CodecError::UnsupportedVersion(version));
            }
            let windows = obj.remove("windows").ok_or(CodecError::MissingWindows)?;
            serde_json::from_value(windows)?
        }
        other => {
            return Err(CodecError::Malformed(serde::de::Error::custom(format!(
                "expected array or object, got {other}"
            ))))
        }
    };

    if windows.is_empty() {
        return Err(CodecError::Empty);
    }
    Ok(windows)
}
