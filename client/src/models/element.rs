//! Values with recorded history
//!
//! The archive server records every observed value of a mutable video
//! field together with the moment it was observed. On the wire an element
//! is a JSON object keyed by timestamp:
//!
//! ```json
//! { "2023-01-05T13:22:11": "First title", "2023-02-01T08:00:00": "Renamed" }
//! ```

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// A point in time as sent by the archive server.
///
/// Accepts RFC 3339 as well as naive ISO-8601 date-times and plain dates,
/// which are taken to be UTC. Always serialized as RFC 3339.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    pub fn new(at: DateTime<Utc>) -> Self {
        Self(at)
    }

    pub fn as_datetime(&self) -> DateTime<Utc> {
        self.0
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(at: DateTime<Utc>) -> Self {
        Self(at)
    }
}

impl FromStr for Timestamp {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(at) = DateTime::parse_from_rfc3339(s) {
            return Ok(Self(at.with_timezone(&Utc)));
        }

        if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
            return Ok(Self(Utc.from_utc_datetime(&naive)));
        }

        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|naive| Self(Utc.from_utc_datetime(&naive)))
            .ok_or_else(|| format!("Unrecognised timestamp: {}", s))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_rfc3339())
    }
}

impl Serialize for Timestamp {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// A value together with every recorded state it has had
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Element<T> {
    records: BTreeMap<Timestamp, T>,
}

impl<T> Default for Element<T> {
    fn default() -> Self {
        Self {
            records: BTreeMap::new(),
        }
    }
}

impl<T> Element<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a value observed at `at`, replacing any value recorded at the same moment
    pub fn record(&mut self, at: Timestamp, value: T) {
        self.records.insert(at, value);
    }

    /// Most recently recorded value
    pub fn current(&self) -> Option<&T> {
        self.records.values().next_back()
    }

    /// Value recorded just before the current one
    pub fn previous(&self) -> Option<&T> {
        self.records.values().rev().nth(1)
    }

    /// All recordings, oldest first
    pub fn history(&self) -> impl DoubleEndedIterator<Item = (&Timestamp, &T)> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<T: PartialEq> Element<T> {
    /// Whether the current value differs from the one recorded before it
    pub fn was_updated(&self) -> bool {
        match (self.current(), self.previous()) {
            (Some(current), Some(previous)) => current != previous,
            _ => false,
        }
    }
}
