//! Time-of-day normalization
//!
//! Parser output and user answers carry times in whatever form the text had:
//! "3pm", "15:00", "noon", "9:00". Everything canonicalizes to 24-hour
//! `HH:MM` - except times that cannot be canonicalized without guessing
//! AM/PM, which are kept as an explicit ambiguity marker carrying the
//! original text. Guessing "9:00" means morning is a classic source of
//! scheduling errors, so the ambiguity is surfaced to the user instead.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Wire prefix for times that could not be canonicalized
pub const AMBIGUOUS_PREFIX: &str = "AMBIGUOUS:";

static MERIDIEM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{1,2})(?::([0-5]\d))?\s*(am|pm)$").unwrap());

static CLOCK_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(\d{1,2}):([0-5]\d)$").unwrap());

/// A time-of-day value: canonical, or flagged as ambiguous
///
/// Serializes as `"HH:MM"` or `"AMBIGUOUS:<original text>"`. Deserialization
/// accepts any string and normalizes it, so a schedule read from the wire is
/// canonical by construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimeOfDay {
    /// Canonical 24-hour time
    Clock { hour: u8, minute: u8 },
    /// Could not be canonicalized without guessing; carries the original text
    Ambiguous(String),
}

impl TimeOfDay {
    /// Construct a canonical time (hour 0-23, minute 0-59)
    pub fn clock(hour: u8, minute: u8) -> Self {
        debug_assert!(hour < 24 && minute < 60);
        Self::Clock { hour, minute }
    }

    /// Whether this value is the ambiguity marker
    pub fn is_ambiguous(&self) -> bool {
        matches!(self, Self::Ambiguous(_))
    }

    /// Normalize a raw time value
    ///
    /// - `None`, `"null"`, `"None"` (exact) and empty strings mean absence
    /// - named times, meridiem forms and two-digit-hour 24-hour forms
    ///   canonicalize to [`TimeOfDay::Clock`]
    /// - everything else - including forms where AM/PM cannot be inferred -
    ///   becomes [`TimeOfDay::Ambiguous`] carrying the original text
    ///
    /// Never fails: the caller always gets a canonical time, a marker, or
    /// `None`.
    pub fn parse(raw: Option<&str>) -> Option<Self> {
        let original = raw?.trim();
        if original.is_empty() || original == "null" || original == "None" {
            return None;
        }

        let lower = original.to_lowercase();
        match lower.as_str() {
            "noon" => return Some(Self::clock(12, 0)),
            "midnight" => return Some(Self::clock(0, 0)),
            _ => {}
        }

        if let Some(caps) = MERIDIEM_RE.captures(&lower) {
            let hour: u8 = caps[1].parse().unwrap_or(255);
            let minute: u8 = caps.get(2).map_or(0, |m| m.as_str().parse().unwrap_or(0));
            // A 12-hour clock reading must be 1-12
            if (1..=12).contains(&hour) {
                let hour = match (&caps[3], hour) {
                    ("am", 12) => 0,
                    ("am", h) => h,
                    ("pm", 12) => 12,
                    (_, h) => h + 12,
                };
                return Some(Self::clock(hour, minute));
            }
            return Some(Self::Ambiguous(original.to_string()));
        }

        if let Some(caps) = CLOCK_RE.captures(&lower) {
            let hour_text = &caps[1];
            let hour: u8 = hour_text.parse().unwrap_or(255);
            let minute: u8 = caps[2].parse().unwrap_or(0);
            // Two-digit hours are already 24-hour form; a single-digit hour
            // 1-9 could be morning or evening and is not guessed. Hour 0 is
            // unambiguous either way.
            if hour_text.len() == 2 && hour < 24 {
                return Some(Self::clock(hour, minute));
            }
            if hour == 0 {
                return Some(Self::clock(0, minute));
            }
            return Some(Self::Ambiguous(original.to_string()));
        }

        // Bare hour: 0 and 13-23 cannot be 12-hour readings, so they are safe
        if let Ok(hour) = lower.parse::<u8>() {
            if hour == 0 || (13..24).contains(&hour) {
                return Some(Self::clock(hour, 0));
            }
            return Some(Self::Ambiguous(original.to_string()));
        }

        Some(Self::Ambiguous(original.to_string()))
    }

    /// Parse a wire value, preserving an existing ambiguity marker
    fn from_wire(value: &str) -> Option<Self> {
        if let Some(rest) = value.strip_prefix(AMBIGUOUS_PREFIX) {
            return Some(Self::Ambiguous(rest.to_string()));
        }
        Self::parse(Some(value))
    }
}

impl std::fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Clock { hour, minute } => write!(f, "{:02}:{:02}", hour, minute),
            Self::Ambiguous(original) => write!(f, "{}{}", AMBIGUOUS_PREFIX, original),
        }
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

/// Deserialize an `Option<TimeOfDay>` field from any wire string
///
/// `null`, `"null"` and `"None"` all collapse to `None`; everything else
/// normalizes. Fields using this must also be `#[serde(default)]`.
pub fn deserialize_opt<'de, D>(deserializer: D) -> Result<Option<TimeOfDay>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.as_deref().and_then(TimeOfDay::from_wire))
}
