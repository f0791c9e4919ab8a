use crate::{CoreResult, TimerRecord};

/// The two persisted record lists.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoredTimers {
    /// Preset timers.
    pub preset: Vec<TimerRecord>,
    /// Quick timers; `None` when absent from storage or not to be written.
    pub quick: Option<Vec<TimerRecord>>,
}

impl StoredTimers {
    /// Split a collection into the lists to write.
    ///
    /// Records with a zero duration are dropped, and the quick list is only
    /// produced when quick timers are saved at all.
    pub fn partition(records: &[TimerRecord], save_quick_timers: bool) -> Self {
        let select = |quick: bool| {
            records
                .iter()
                .filter(|record| record.quick == quick && record.is_persistable())
                .cloned()
                .collect::<Vec<_>>()
        };

        Self {
            preset: select(false),
            quick: save_quick_timers.then(|| select(true)),
        }
    }

    /// Flatten into validated records, presets first.
    pub fn into_records(self, save_quick_timers: bool) -> CoreResult<Vec<TimerRecord>> {
        let quick = if save_quick_timers {
            self.quick.unwrap_or_default()
        } else {
            Vec::new()
        };

        let records = self
            .preset
            .into_iter()
            .map(|record| TimerRecord {
                quick: false,
                ..record
            })
            .chain(quick.into_iter().map(TimerRecord::into_quick))
            .collect::<Vec<_>>();

        for record in &records {
            record.validate()?;
        }

        Ok(records)
    }
}
