//! Calendar events and the merged schedule

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::{Artifact, Routine};

/// Timestamp layout used by calendar sources and the rendered plan
pub const EVENT_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    #[serde(with = "event_time")]
    pub start: NaiveDateTime,
    #[serde(with = "event_time")]
    pub end: NaiveDateTime,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

/// Routine plus calendar events; `notes` always describes the merge outcome
#[derive(Debug, Clone, PartialEq)]
pub struct MergedSchedule {
    pub routine: Artifact<Routine>,
    pub events: Vec<CalendarEvent>,
    pub notes: String,
}

mod event_time {
    use super::EVENT_TIME_FORMAT;
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.format(EVENT_TIME_FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, EVENT_TIME_FORMAT).map_err(serde::de::Error::custom)
    }
}
