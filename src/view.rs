//! Read-only list view derived from the current tasks.

use crate::task::{Task, COMPLETION_MARKER};

pub const TITLE: &str = "To-Do List";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemView {
    /// 1-based position shown to the user.
    pub number: usize,
    /// Content with the completion marker applied.
    pub label: String,
    pub done: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListView {
    pub title: &'static str,
    pub items: Vec<ItemView>,
    /// The "Clear All" action is only offered for a non-empty list.
    pub show_clear_all: bool,
}

impl ListView {
    pub fn from_tasks(tasks: &[Task]) -> Self {
        let items = tasks
            .iter()
            .enumerate()
            .map(|(index, task)| ItemView {
                number: index + 1,
                label: task.marked_content(),
                done: task.done,
            })
            .collect();
        Self {
            title: TITLE,
            items,
            show_clear_all: !tasks.is_empty(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl std::fmt::Display for ListView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.title)?;
        writeln!(f, "{}", "─".repeat(self.title.chars().count()))?;
        if self.is_empty() {
            writeln!(f, "  (nothing to do)")?;
        }
        let width = self.items.len().to_string().len();
        for item in &self.items {
            let check = if item.done { COMPLETION_MARKER } else { "  " };
            writeln!(
                f,
                "{:>width$}. [{}] {}",
                item.number,
                check,
                item.label,
                width = width
            )?;
        }
        if self.show_clear_all {
            writeln!(f, "(type `clear` to clear all)")?;
        }
        Ok(())
    }
}
