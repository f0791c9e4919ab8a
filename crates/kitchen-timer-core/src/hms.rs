//! Hours/minutes/seconds rendering for countdown labels.

use crate::{CoreError, CoreResult};

use std::{fmt, panic::Location, str::FromStr, time::Duration};

use error_location::ErrorLocation;

const SECS_PER_MINUTE: u64 = 60;
const MINS_PER_HOUR: u64 = 60;
const SECS_PER_HOUR: u64 = MINS_PER_HOUR * SECS_PER_MINUTE;

/// A whole number of seconds split into hours, minutes and seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Hms {
    total_secs: u64,
}

impl Hms {
    /// Wrap a second count.
    pub const fn new(total_secs: u64) -> Self {
        Self { total_secs }
    }

    /// Wrap a signed second count, rejecting negative values.
    #[track_caller]
    pub fn try_from_secs(secs: i64) -> CoreResult<Self> {
        let caller = Location::caller();
        u64::try_from(secs)
            .map(Self::new)
            .map_err(|_| CoreError::InvalidArgument {
                reason: format!("negative second count {}", secs),
                location: ErrorLocation::from(caller),
            })
    }

    /// Remaining time rounded up to the next whole second.
    ///
    /// 4.2s remaining renders as 5 seconds, so an armed countdown never
    /// displays zero before it actually reaches zero.
    pub fn from_remaining(remaining: Duration) -> Self {
        let secs = remaining.as_secs();
        if remaining.subsec_nanos() > 0 {
            Self::new(secs.saturating_add(1))
        } else {
            Self::new(secs)
        }
    }

    /// Total seconds.
    pub const fn total_secs(&self) -> u64 {
        self.total_secs
    }

    /// Whole hours.
    pub const fn hours(&self) -> u64 {
        self.total_secs / SECS_PER_HOUR
    }

    /// Minutes past the hour.
    pub const fn minutes(&self) -> u64 {
        (self.total_secs % SECS_PER_HOUR) / SECS_PER_MINUTE
    }

    /// Seconds past the minute.
    pub const fn seconds(&self) -> u64 {
        self.total_secs % SECS_PER_MINUTE
    }

    /// Full rendering: `H:MM:SS`, or `MM:SS` when under an hour.
    pub fn format(&self) -> String {
        if self.hours() > 0 {
            format!("{}:{:02}:{:02}", self.hours(), self.minutes(), self.seconds())
        } else {
            format!("{:02}:{:02}", self.minutes(), self.seconds())
        }
    }

    /// Narrow rendering for the panel: `M:SS`, or `HhMMm` from one hour up.
    ///
    /// The hour form rounds up to the next whole minute, so `1:00:59` shows
    /// as `1h01m`.
    pub fn compact(&self) -> String {
        if self.hours() > 0 {
            let total_mins = self.total_secs.div_ceil(SECS_PER_MINUTE);
            format!(
                "{}h{:02}m",
                total_mins / MINS_PER_HOUR,
                total_mins % MINS_PER_HOUR
            )
        } else {
            format!("{}:{:02}", self.minutes(), self.seconds())
        }
    }
}

impl fmt::Display for Hms {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format())
    }
}

impl From<Duration> for Hms {
    fn from(duration: Duration) -> Self {
        Self::from_remaining(duration)
    }
}

impl From<Hms> for Duration {
    fn from(hms: Hms) -> Self {
        Duration::from_secs(hms.total_secs)
    }
}

/// Parses `SS`, `MM:SS` or `H:MM:SS`.
///
/// Only the leading field may exceed its usual range, so `90` and `90:00`
/// are accepted while `1:75:00` is not.
impl FromStr for Hms {
    type Err = CoreError;

    #[track_caller]
    fn from_str(s: &str) -> CoreResult<Self> {
        let caller = Location::caller();
        let invalid = |reason: String| CoreError::InvalidArgument {
            reason,
            location: ErrorLocation::from(caller),
        };

        let fields = s
            .trim()
            .split(':')
            .map(|field| {
                field
                    .parse::<u64>()
                    .map_err(|e| invalid(format!("bad duration field {:?} in {:?}: {}", field, s, e)))
            })
            .collect::<CoreResult<Vec<u64>>>()?;

        let (hours, minutes, seconds) = match fields.as_slice() {
            [secs] => (0, 0, *secs),
            [mins, secs] => (0, *mins, *secs),
            [hours, mins, secs] => (*hours, *mins, *secs),
            _ => return Err(invalid(format!("too many fields in duration {:?}", s))),
        };

        if fields.len() > 1 && seconds >= SECS_PER_MINUTE {
            return Err(invalid(format!("seconds out of range in {:?}", s)));
        }
        if fields.len() > 2 && minutes >= SECS_PER_MINUTE {
            return Err(invalid(format!("minutes out of range in {:?}", s)));
        }

        hours
            .checked_mul(SECS_PER_HOUR)
            .and_then(|h| minutes.checked_mul(SECS_PER_MINUTE).and_then(|m| h.checked_add(m)))
            .and_then(|hm| hm.checked_add(seconds))
            .map(Self::new)
            .ok_or_else(|| invalid(format!("duration {:?} overflows", s)))
    }
}
