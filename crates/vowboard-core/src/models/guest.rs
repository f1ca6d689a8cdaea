use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::utils::format::{format_date, initials};

use super::de::{
    lenient_bool, lenient_count, lenient_status, lenient_string, lenient_text, null_as_empty,
};

/// RSVP state of a guest row in the spreadsheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GuestStatus {
    #[default]
    Pending,
    Confirmed,
    Declined,
    Request,
    /// Anything the sheet sends that we don't recognize
    #[serde(other)]
    Unknown,
}

impl std::fmt::Display for GuestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GuestStatus::Pending => write!(f, "Pending"),
            GuestStatus::Confirmed => write!(f, "Confirmed"),
            GuestStatus::Declined => write!(f, "Declined"),
            GuestStatus::Request => write!(f, "Request"),
            GuestStatus::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Guest ids come back as numbers from some sheets and strings from others.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GuestId {
    Number(i64),
    Text(String),
}

impl Default for GuestId {
    fn default() -> Self {
        GuestId::Text(String::new())
    }
}

impl std::fmt::Display for GuestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GuestId::Number(n) => write!(f, "{}", n),
            GuestId::Text(s) => write!(f, "{}", s),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Companion {
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub relationship: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuestRecord {
    #[serde(default)]
    pub id: GuestId,
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub role: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub contact: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub message: Option<String>,
    #[serde(rename = "allowedGuests", default, deserialize_with = "lenient_count")]
    pub allowed_guests: Option<u32>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub companions: Vec<Companion>,
    #[serde(rename = "tableNumber", default, deserialize_with = "lenient_string")]
    pub table_number: Option<String>,
    #[serde(rename = "isVip", default, deserialize_with = "lenient_bool")]
    pub is_vip: bool,
    #[serde(default, deserialize_with = "lenient_status")]
    pub status: GuestStatus,
    #[serde(rename = "addedBy", default, deserialize_with = "lenient_string")]
    pub added_by: Option<String>,
    #[serde(rename = "createdAt", default, deserialize_with = "lenient_string")]
    pub created_at: Option<String>,
    #[serde(rename = "updatedAt", default, deserialize_with = "lenient_string")]
    pub updated_at: Option<String>,
}

impl GuestRecord {
    pub fn is_confirmed(&self) -> bool {
        self.status == GuestStatus::Confirmed
    }

    /// Number of seats this RSVP accounts for. A confirmed RSVP always
    /// counts at least the primary guest.
    pub fn party_size(&self) -> u32 {
        match self.allowed_guests {
            Some(n) if n > 0 => n,
            _ => 1,
        }
    }

    /// Parsed `updatedAt`, or None when missing or unparseable
    pub fn updated_at_utc(&self) -> Option<DateTime<Utc>> {
        self.updated_at.as_deref().and_then(parse_timestamp)
    }

    pub fn initials(&self) -> String {
        initials(&self.name)
    }

    /// "Confirmed Jan 05, 2026" style date, "Recently" when unknown
    pub fn confirmed_on(&self) -> String {
        format_date(self.updated_at.as_deref())
    }

    pub fn table_label(&self) -> Option<String> {
        self.table_number
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(|t| format!("Table {}", t))
    }

    pub fn party_label(&self) -> String {
        let n = self.party_size();
        if n == 1 {
            "1 Guest".to_string()
        } else {
            format!("{} Guests", n)
        }
    }
}

/// Parse the timestamp shapes the sheet produces: RFC 3339, a naive
/// "YYYY-MM-DD HH:MM:SS", or a bare date.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Some(dt.and_utc());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}
