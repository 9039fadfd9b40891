//! Task entity and the completion marker.
//!
//! Completion is tracked by the `done` field. The marker (`✅ `) only exists at
//! the edges: when a task is rendered, and when it travels to a backend whose
//! record has no completion field.
//!
//! # Invariants
//! - `content` never carries a marker added by this program
//! - toggling twice restores the previous marked content

use serde::{Deserialize, Serialize};

/// Completion marker token.
pub const COMPLETION_MARKER: &str = "✅";

/// Marker plus separator, as it appears in front of completed content.
pub const MARKER_PREFIX: &str = "✅ ";

/// A single to-do item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Backend-assigned identifier (remote store only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// The text the user typed.
    pub content: String,
    #[serde(default)]
    pub done: bool,
}

impl Task {
    /// Create a new, incomplete task without an identifier.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            id: None,
            content: content.into(),
            done: false,
        }
    }

    /// Attach a backend identifier.
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    /// Decode marker-encoded text.
    ///
    /// Exactly one leading `✅ ` is stripped and the task is marked done.
    /// Text without the prefix is taken verbatim.
    pub fn from_marked(text: &str) -> Self {
        match text.strip_prefix(MARKER_PREFIX) {
            Some(rest) => Self {
                id: None,
                content: rest.to_string(),
                done: true,
            },
            None => Self::new(text),
        }
    }

    /// Content with the completion marker applied.
    pub fn marked_content(&self) -> String {
        if self.done {
            format!("{}{}", MARKER_PREFIX, self.content)
        } else {
            self.content.clone()
        }
    }

    /// Flip completion state.
    pub fn toggle(&mut self) {
        self.done = !self.done;
    }
}
