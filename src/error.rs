//! Error types.
//!
//! Two families:
//! - [`TaskListError`]: returned to the caller of a controller operation
//!   (validation failures the user should see)
//! - [`StoreError`]: backend I/O failures. The controller logs these and never
//!   hands them to the user.

use thiserror::Error;

/// Message shown when adding with an empty input line.
pub const EMPTY_INPUT_MESSAGE: &str = "You must write something";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TaskListError {
    #[error("{}", EMPTY_INPUT_MESSAGE)]
    EmptyInput,

    #[error("No task at index {index} (list has {len} tasks)")]
    IndexOutOfRange { index: usize, len: usize },
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Store not configured: missing {0}")]
    NotConfigured(String),

    #[error("Task has no backend id (its create call never succeeded)")]
    MissingId,
}

impl StoreError {
    pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.display().to_string(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_message_matches_notification() {
        assert_eq!(TaskListError::EmptyInput.to_string(), EMPTY_INPUT_MESSAGE);
    }

    #[test]
    fn out_of_range_reports_bounds() {
        let err = TaskListError::IndexOutOfRange { index: 3, len: 2 };
        assert_eq!(err.to_string(), "No task at index 3 (list has 2 tasks)");
    }

    #[test]
    fn http_error_display() {
        let err = StoreError::Http {
            status: 503,
            body: "unavailable".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 503: unavailable");
    }
}
