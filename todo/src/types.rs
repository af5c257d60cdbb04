//! Domain types for the todo list.
//!
//! A todo list is an ordered collection of [`TodoItem`]s. Items carry a
//! transient editing flag which never leaves memory; see
//! [`crate::persistence`] for the stored shape.

use crate::list::TodoListStore;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Values captured when an item enters editing mode
#[derive(Clone, Debug, PartialEq, Eq)]
struct EditSnapshot {
    label: String,
    completed: bool,
}

/// A single todo item
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TodoItem {
    /// Title/description of the todo
    pub label: String,
    /// Whether the todo is completed
    pub completed: bool,
    /// Whether the item is currently being edited (never persisted)
    pub editing: bool,
    snapshot: Option<EditSnapshot>,
}

impl TodoItem {
    /// Creates a todo item
    ///
    /// The label is taken as-is; label validation happens in
    /// [`TodoListStore::create`].
    #[must_use]
    pub fn new(label: impl Into<String>, completed: bool) -> Self {
        Self {
            label: label.into(),
            completed,
            editing: false,
            snapshot: None,
        }
    }

    /// Flips the completion flag
    pub const fn toggle(&mut self) {
        self.completed = !self.completed;
    }

    /// Enters editing mode, remembering the current label and completion
    pub fn begin_edit(&mut self) {
        self.snapshot = Some(EditSnapshot {
            label: self.label.clone(),
            completed: self.completed,
        });
        self.editing = true;
    }

    /// Leaves editing mode, keeping the current values
    pub fn commit_edit(&mut self) {
        self.snapshot = None;
        self.editing = false;
    }

    /// Leaves editing mode, restoring the values captured by [`begin_edit`](Self::begin_edit)
    ///
    /// Without a prior `begin_edit` only the editing flag is cleared.
    pub fn cancel_edit(&mut self) {
        if let Some(snapshot) = self.snapshot.take() {
            self.label = snapshot.label;
            self.completed = snapshot.completed;
        }
        self.editing = false;
    }
}

/// Which subset of the list to show
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Filter {
    /// Every item
    #[default]
    All,
    /// Items not yet completed
    Active,
    /// Completed items
    Completed,
}

impl Filter {
    /// Returns `true` if `item` belongs to this filter
    #[must_use]
    pub const fn matches(self, item: &TodoItem) -> bool {
        match self {
            Self::All => true,
            Self::Active => !item.completed,
            Self::Completed => item.completed,
        }
    }

    /// The status string this filter is parsed from
    #[must_use]
    pub const fn as_status(self) -> &'static str {
        match self {
            Self::All => "",
            Self::Active => "active",
            Self::Completed => "completed",
        }
    }
}

impl From<&str> for Filter {
    /// `"active"` and `"completed"` select those subsets; anything else is `All`.
    fn from(status: &str) -> Self {
        match status {
            "active" => Self::Active,
            "completed" => Self::Completed,
            _ => Self::All,
        }
    }
}

impl FromStr for Filter {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_status())
    }
}

/// Aggregate counts over a todo list
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Summary {
    /// `true` iff no item remains active (vacuously true when empty)
    pub all_completed: bool,
    /// Number of completed items
    pub completed_count: usize,
    /// Number of active items
    pub remaining_count: usize,
}

impl Summary {
    /// Human-readable remaining count, e.g. `"1 item left"` or `"3 items left"`
    #[must_use]
    pub fn items_left(&self) -> String {
        let noun = if self.remaining_count == 1 { "item" } else { "items" };
        format!("{} {noun} left", self.remaining_count)
    }
}

/// Application state driven by [`TodoReducer`](crate::TodoReducer)
#[derive(Clone, Debug, Default)]
pub struct TodoState {
    /// The authoritative list
    pub todos: TodoListStore,
    /// Currently selected filter
    pub filter: Filter,
    /// Last rejected command or persistence failure (if any)
    pub last_error: Option<String>,
}

impl TodoState {
    /// Creates an empty state
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a state holding previously loaded items
    #[must_use]
    pub fn from_items(items: Vec<TodoItem>) -> Self {
        Self {
            todos: TodoListStore::from_items(items),
            ..Self::default()
        }
    }

    /// Items matching the current filter, in list order
    #[must_use]
    pub fn visible(&self) -> Vec<&TodoItem> {
        self.todos.visible(self.filter)
    }
}

/// Actions processed by the todo reducer
///
/// Commands carry user intent; the remaining variants are fed back by
/// effects or record rejections.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TodoAction {
    // ========== Commands ==========
    /// Append a new item
    Create {
        /// Raw label as typed; trimmed before use
        label: String,
    },
    /// Flip one item's completion
    Toggle {
        /// Item index
        index: usize,
    },
    /// Set every item's completion
    ToggleAll {
        /// Value to set
        completed: bool,
    },
    /// Enter editing mode
    BeginEdit {
        /// Item index
        index: usize,
    },
    /// Replace the label of an item in editing mode
    EditLabel {
        /// Item index
        index: usize,
        /// New label; trimmed before use
        label: String,
    },
    /// Keep the edited values
    CommitEdit {
        /// Item index
        index: usize,
    },
    /// Restore the pre-edit values
    CancelEdit {
        /// Item index
        index: usize,
    },
    /// Remove one item
    Destroy {
        /// Item index
        index: usize,
    },
    /// Remove every completed item
    ClearCompleted,
    /// Change the visible subset
    SetFilter {
        /// New filter
        filter: Filter,
    },

    // ========== Events ==========
    /// The list was written to storage
    Persisted {
        /// Number of items written
        count: usize,
    },
    /// Writing the list to storage failed
    PersistFailed {
        /// Error message
        error: String,
    },
    /// A command was rejected
    ValidationFailed {
        /// Error message
        error: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_item_is_idle() {
        let item = TodoItem::new("Buy milk", false);
        assert_eq!(item.label, "Buy milk");
        assert!(!item.completed);
        assert!(!item.editing);
    }

    #[test]
    fn toggle_flips_completion() {
        let mut item = TodoItem::new("Buy milk", false);
        item.toggle();
        assert!(item.completed);
        item.toggle();
        assert!(!item.completed);
    }

    #[test]
    fn cancel_edit_restores_snapshot() {
        let mut item = TodoItem::new("Buy milk", false);
        item.begin_edit();
        assert!(item.editing);

        item.label = "Buy oat milk".to_string();
        item.completed = true;
        item.cancel_edit();

        assert_eq!(item, TodoItem::new("Buy milk", false));
    }

    #[test]
    fn commit_edit_keeps_changes() {
        let mut item = TodoItem::new("Buy milk", false);
        item.begin_edit();
        item.label = "Buy oat milk".to_string();
        item.commit_edit();

        assert_eq!(item.label, "Buy oat milk");
        assert!(!item.editing);

        // Snapshot was discarded: a later cancel has nothing to restore
        item.cancel_edit();
        assert_eq!(item.label, "Buy oat milk");
    }

    #[test]
    fn cancel_without_begin_only_clears_flag() {
        let mut item = TodoItem::new("Walk dog", true);
        item.editing = true;
        item.cancel_edit();
        assert_eq!(item, TodoItem::new("Walk dog", true));
    }

    #[test]
    fn filter_parses_status_strings() {
        assert_eq!(Filter::from("active"), Filter::Active);
        assert_eq!(Filter::from("completed"), Filter::Completed);
        assert_eq!(Filter::from(""), Filter::All);
        assert_eq!(Filter::from("Active"), Filter::All);
        assert_eq!("whatever".parse::<Filter>(), Ok(Filter::All));
    }

    #[test]
    fn filter_display_round_trips() {
        for filter in [Filter::All, Filter::Active, Filter::Completed] {
            assert_eq!(Filter::from(filter.to_string().as_str()), filter);
        }
    }

    #[test]
    fn items_left_pluralizes() {
        let mut summary = Summary::default();
        assert_eq!(summary.items_left(), "0 items left");
        summary.remaining_count = 1;
        assert_eq!(summary.items_left(), "1 item left");
        summary.remaining_count = 2;
        assert_eq!(summary.items_left(), "2 items left");
    }
}
