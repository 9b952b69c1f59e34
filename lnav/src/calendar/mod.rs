//! Calendar sources and the routine/calendar merger
//!
//! A [`CalendarSource`] is the external collaborator that produces events.
//! The [`CalendarMerger`] pairs those events with the day's routine. Merging
//! performs no conflict detection between events and routine blocks.

use chrono::NaiveDateTime;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::domain::{Artifact, CalendarEvent, EVENT_TIME_FORMAT, MergedSchedule, Routine};

/// Note attached when events were merged
pub const MERGED_NOTE: &str = "Calendar merged (simple mode).";

/// Note attached when no calendar could be merged
pub const UNAVAILABLE_NOTE: &str = "Calendar unavailable.";

#[derive(Debug, Error)]
pub enum CalendarError {
    #[error("Failed to read calendar file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse calendar file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Produces calendar events for the merge step
pub trait CalendarSource: Send + Sync {
    /// Short label for logs
    fn name(&self) -> &str;

    /// Fetch events; an error means the calendar is unavailable
    fn events(&self) -> Result<Vec<CalendarEvent>, CalendarError>;
}

const SAMPLE_EVENTS: [(&str, &str, &str, &str); 2] = [
    ("2025-11-28 10:00", "2025-11-28 11:00", "Team standup meeting", "Online"),
    ("2025-11-29 14:00", "2025-11-29 15:00", "Doctor appointment", "Clinic"),
];

/// Two fixed demonstration events
#[derive(Debug, Clone, Default)]
pub struct SampleCalendar;

impl CalendarSource for SampleCalendar {
    fn name(&self) -> &str {
        "sample"
    }

    fn events(&self) -> Result<Vec<CalendarEvent>, CalendarError> {
        let parse = |s: &str| NaiveDateTime::parse_from_str(s, EVENT_TIME_FORMAT).ok();
        Ok(SAMPLE_EVENTS
            .iter()
            .filter_map(|&(start, end, title, location)| {
                Some(CalendarEvent {
                    start: parse(start)?,
                    end: parse(end)?,
                    title: title.to_string(),
                    location: Some(location.to_string()),
                })
            })
            .collect())
    }
}

/// Events read from a JSON array on disk
#[derive(Debug, Clone)]
pub struct FileCalendar {
    path: PathBuf,
}

impl FileCalendar {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl CalendarSource for FileCalendar {
    fn name(&self) -> &str {
        "file"
    }

    fn events(&self) -> Result<Vec<CalendarEvent>, CalendarError> {
        debug!(path = %self.path.display(), "FileCalendar::events: called");
        let content = std::fs::read_to_string(&self.path).map_err(|source| CalendarError::Io {
            path: self.path.clone(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| CalendarError::Parse {
            path: self.path.clone(),
            source,
        })
    }
}

/// Combines a routine with events from the injected source
pub struct CalendarMerger {
    source: Box<dyn CalendarSource>,
}

impl CalendarMerger {
    pub fn new(source: Box<dyn CalendarSource>) -> Self {
        Self { source }
    }

    /// Merge the routine with whatever the source returns
    ///
    /// An unavailable source yields no events and [`UNAVAILABLE_NOTE`]; the
    /// routine is kept either way.
    pub fn merge(&self, routine: Artifact<Routine>) -> MergedSchedule {
        debug!(source = self.source.name(), "CalendarMerger::merge: called");
        match self.source.events() {
            Ok(events) => {
                info!(source = self.source.name(), count = events.len(), "Read calendar events");
                MergedSchedule {
                    routine,
                    events,
                    notes: MERGED_NOTE.to_string(),
                }
            }
            Err(e) => {
                warn!(source = self.source.name(), error = %e, "Calendar source unavailable");
                mark_unavailable(MergedSchedule {
                    routine,
                    events: Vec::new(),
                    notes: String::new(),
                })
            }
        }
    }
}

/// Routine-only substitute: events cleared, note set to unavailable
pub fn mark_unavailable(schedule: MergedSchedule) -> MergedSchedule {
    MergedSchedule {
        routine: schedule.routine,
        events: Vec::new(),
        notes: UNAVAILABLE_NOTE.to_string(),
    }
}
