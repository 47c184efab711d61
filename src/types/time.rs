//! The bookmark store's native timestamp: microseconds since 1601-01-01 UTC.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Seconds between 1601-01-01T00:00:00Z and the Unix epoch.
const EPOCH_DELTA_SECS: i64 = 11_644_473_600;

/// Microseconds between 1601-01-01T00:00:00Z and the Unix epoch.
const EPOCH_DELTA_MICROS: i64 = EPOCH_DELTA_SECS * 1_000_000;

/// A signed microsecond count since 1601-01-01T00:00:00Z.
///
/// Zero is the sentinel "unset" value — it never denotes the 1601 epoch
/// instant, and it serializes as field absence rather than `"0"`. On the
/// wire the count is a decimal string, not a JSON number.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WebkitTime(i64);

impl WebkitTime {
    /// Wraps a raw microsecond count in the 1601 epoch.
    pub const fn from_raw(micros: i64) -> Self {
        WebkitTime(micros)
    }

    /// The raw microsecond count in the 1601 epoch.
    pub const fn raw(self) -> i64 {
        self.0
    }

    /// Whether this is the "unset" sentinel.
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Converts a Unix-epoch microsecond timestamp.
    pub const fn from_unix_micros(micros: i64) -> Self {
        WebkitTime(micros + EPOCH_DELTA_MICROS)
    }

    /// This instant as Unix-epoch microseconds.
    pub const fn to_unix_micros(self) -> i64 {
        self.0 - EPOCH_DELTA_MICROS
    }

    /// This instant as Unix-epoch seconds, truncated toward zero.
    pub const fn to_unix_secs(self) -> i64 {
        self.to_unix_micros() / 1_000_000
    }

    /// This instant as a UTC calendar time.
    ///
    /// Returns `None` for the unset sentinel or values `chrono` cannot
    /// represent.
    pub fn to_datetime(self) -> Option<DateTime<Utc>> {
        if self.is_zero() {
            return None;
        }
        DateTime::from_timestamp_micros(self.to_unix_micros())
    }
}

impl fmt::Display for WebkitTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_datetime() {
            Some(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S UTC")),
            None => write!(f, "unset"),
        }
    }
}

impl Serialize for WebkitTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for WebkitTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        let micros = s.parse::<i64>().map_err(serde::de::Error::custom)?;
        Ok(WebkitTime(micros))
    }
}
