//! Lenient field decoding.
//!
//! The sheet API passes cells through mostly untouched, so a count can be
//! `2`, `"2"`, `""` or null, a flag can be `true` or `"TRUE"`, and a text
//! cell can be a number or null. One odd cell must not sink the whole list.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::guest::GuestStatus;

pub(crate) fn lenient_count<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64))
            .and_then(|n| u32::try_from(n).ok()),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

fn cell_text(value: Option<Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    }
}

/// Optional text cell; null, arrays and objects read as absent
pub(crate) fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(cell_text(Option::<Value>::deserialize(deserializer)?))
}

/// Required text cell; anything unusable reads as ""
pub(crate) fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(cell_text(Option::<Value>::deserialize(deserializer)?).unwrap_or_default())
}

/// `true`, `"TRUE"`, `"yes"`, `1`; everything else is false
pub(crate) fn lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Bool(b)) => b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::String(s)) => matches!(
            s.trim().to_ascii_lowercase().as_str(),
            "true" | "yes" | "y" | "1"
        ),
        _ => false,
    })
}

/// Status names in any case; null means the row hasn't been answered yet
pub(crate) fn lenient_status<'de, D>(deserializer: D) -> Result<GuestStatus, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => GuestStatus::Pending,
        Some(Value::String(s)) if s.trim().is_empty() => GuestStatus::Pending,
        Some(Value::String(s)) => {
            serde_json::from_value(Value::String(s.trim().to_lowercase())).unwrap_or(GuestStatus::Unknown)
        }
        Some(_) => GuestStatus::Unknown,
    })
}

pub(crate) fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
