//! Data sources decorated for editing.

use super::{DataSource, NameValue};
use crate::utils::time::{parts_to_seconds, seconds_to_parts, TimeParts};

/// Hour/minute/second view of every duration field of a data source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ModifiedTimes {
    pub schedule: TimeParts,
    pub update_timeout: TimeParts,
    pub request_timeout: TimeParts,
}

impl ModifiedTimes {
    /// Break down the durations currently stored on `source`
    pub fn from_source(source: &DataSource) -> Self {
        Self {
            schedule: seconds_to_parts(source.run_parameters.schedule.duration()),
            update_timeout: seconds_to_parts(source.update_timeout),
            request_timeout: seconds_to_parts(source.http().request_timeout),
        }
    }
}

/// A data source together with its view-only editing state.
///
/// Only [`Record::source`] is ever sent to the server.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub source: DataSource,
    pub modified_times: ModifiedTimes,
    /// Scratch row for the "add header" input
    pub new_header: NameValue,
    /// Scratch row for the "add parameter" input
    pub new_param: NameValue,
}

impl Record {
    /// Wrap a data source freshly received from the server.
    pub fn decorate(source: DataSource) -> Self {
        let modified_times = ModifiedTimes::from_source(&source);
        Self {
            source,
            modified_times,
            new_header: NameValue::default(),
            new_param: NameValue::default(),
        }
    }

    pub fn id(&self) -> &str {
        &self.source.id
    }

    pub fn name(&self) -> &str {
        &self.source.name
    }

    /// Write the hour/minute/second breakdowns back into the duration fields.
    pub fn commit_times(&mut self) {
        let times = self.modified_times;
        self.source
            .run_parameters
            .schedule
            .set_duration(parts_to_seconds(&times.schedule));
        self.source.update_timeout = parts_to_seconds(&times.update_timeout);
        self.source.http_mut().request_timeout = parts_to_seconds(&times.request_timeout);
    }
}

impl From<DataSource> for Record {
    fn from(source: DataSource) -> Self {
        Self::decorate(source)
    }
}
