//! Timestamps as printed by either AWS CLI major version: epoch seconds
//! (v1, e.g. `1714564800.123`) or ISO 8601 with an offset (v2).

use jiff::Timestamp;
use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum Raw {
    Seconds(f64),
    Text(String),
}

pub(crate) fn deserialize_opt<'de, D>(deserializer: D) -> Result<Option<Timestamp>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Raw>::deserialize(deserializer)?;
    raw.map(|raw| match raw {
        Raw::Seconds(secs) => from_epoch_secs(secs),
        Raw::Text(text) => text.parse::<Timestamp>().map_err(|e| e.to_string()),
    })
    .transpose()
    .map_err(serde::de::Error::custom)
}

fn from_epoch_secs(secs: f64) -> Result<Timestamp, String> {
    if !secs.is_finite() {
        return Err(format!("invalid epoch timestamp: {secs}"));
    }
    let whole = secs.floor();
    let nanos = (((secs - whole) * 1e9).round() as i32).min(999_999_999);
    Timestamp::new(whole as i64, nanos).map_err(|e| e.to_string())
}
