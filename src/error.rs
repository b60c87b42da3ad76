use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ScheduleError>;

/// Failures of a single load attempt. Queries over a loaded store never fail.
#[derive(Error, Debug)]
pub enum ScheduleError {
    /// The source file is missing or cannot be opened.
    #[error("schedule source {} is unavailable: {}", .path.display(), .source)]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The source was read but could not be parsed into sessions.
    #[error("schedule source is malformed: {0}")]
    SourceMalformed(String),
}

impl ScheduleError {
    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        ScheduleError::SourceMalformed(message.into())
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, ScheduleError::SourceUnavailable { .. })
    }
}

impl From<csv::Error> for ScheduleError {
    fn from(err: csv::Error) -> Self {
        ScheduleError::SourceMalformed(err.to_string())
    }
}
