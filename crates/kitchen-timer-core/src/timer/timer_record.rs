use crate::{CoreError, CoreResult};

use std::panic::Location;

use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Persisted shape of a timer.
///
/// `quick` is not serialized: it follows from which list the record is
/// stored in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerRecord {
    /// Stable identity, generated once when the timer is created.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Countdown length in seconds.
    #[serde(rename = "duration")]
    pub duration_secs: u64,
    /// Disabled timers are kept but never started or listed.
    pub enabled: bool,
    /// Member of the quick-timer list rather than the presets.
    #[serde(skip)]
    pub quick: bool,
}

impl TimerRecord {
    /// A new enabled preset record with a fresh id.
    pub fn new(name: impl Into<String>, duration_secs: u64) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            duration_secs,
            enabled: true,
            quick: false,
        }
    }

    /// Mark the record as a quick timer.
    pub fn into_quick(mut self) -> Self {
        self.quick = true;
        self
    }

    /// Reject records that would produce an unusable timer.
    #[track_caller]
    pub fn validate(&self) -> CoreResult<()> {
        if self.id.is_nil() {
            return Err(CoreError::MalformedRecord {
                reason: format!("timer {:?} has a nil id", self.name),
                location: ErrorLocation::from(Location::caller()),
            });
        }
        if self.name.trim().is_empty() {
            return Err(CoreError::MalformedRecord {
                reason: format!("timer {} has an empty name", self.id),
                location: ErrorLocation::from(Location::caller()),
            });
        }
        Ok(())
    }

    /// Only records with a positive duration are written to storage.
    pub fn is_persistable(&self) -> bool {
        self.duration_secs > 0
    }
}
