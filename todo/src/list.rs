//! The authoritative, ordered todo list.

use crate::error::{Result, TodoError};
use crate::types::{Filter, Summary, TodoItem};

/// Ordered sequence of todo items with filtering, counts and mutations
///
/// Items keep insertion order and are addressed by index.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TodoListStore {
    items: Vec<TodoItem>,
}

impl TodoListStore {
    /// Creates an empty list
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Creates a list from existing items, keeping their order
    #[must_use]
    pub const fn from_items(items: Vec<TodoItem>) -> Self {
        Self { items }
    }

    /// Number of items
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the list holds no items
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// All items in order
    #[must_use]
    pub fn items(&self) -> &[TodoItem] {
        &self.items
    }

    /// Iterates over all items in order
    pub fn iter(&self) -> std::slice::Iter<'_, TodoItem> {
        self.items.iter()
    }

    /// Returns the item at `index`
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&TodoItem> {
        self.items.get(index)
    }

    /// Returns the item at `index` mutably
    pub fn get_mut(&mut self, index: usize) -> Option<&mut TodoItem> {
        self.items.get_mut(index)
    }

    /// Consumes the list, returning its items
    #[must_use]
    pub fn into_items(self) -> Vec<TodoItem> {
        self.items
    }

    fn item_mut(&mut self, index: usize) -> Result<&mut TodoItem> {
        let len = self.items.len();
        self.items
            .get_mut(index)
            .ok_or(TodoError::IndexOutOfRange { index, len })
    }

    /// Appends a new active item
    ///
    /// The label is trimmed; an empty result creates nothing and returns `None`.
    pub fn create(&mut self, label: &str) -> Option<&TodoItem> {
        let label = label.trim();
        if label.is_empty() {
            tracing::debug!("Ignoring todo with empty label");
            return None;
        }

        self.items.push(TodoItem::new(label, false));
        self.items.last()
    }

    /// Flips the completion of the item at `index`
    ///
    /// # Errors
    ///
    /// Returns [`TodoError::IndexOutOfRange`] if `index` is past the end.
    pub fn toggle(&mut self, index: usize) -> Result<&TodoItem> {
        let item = self.item_mut(index)?;
        item.toggle();
        Ok(item)
    }

    /// Sets the completion of every item
    pub fn toggle_all(&mut self, completed: bool) {
        for item in &mut self.items {
            item.completed = completed;
        }
    }

    /// Puts the item at `index` into editing mode
    ///
    /// # Errors
    ///
    /// Returns [`TodoError::IndexOutOfRange`] if `index` is past the end.
    pub fn begin_edit(&mut self, index: usize) -> Result<&TodoItem> {
        let item = self.item_mut(index)?;
        item.begin_edit();
        Ok(item)
    }

    /// Replaces the label of an item in editing mode
    ///
    /// # Errors
    ///
    /// - [`TodoError::IndexOutOfRange`] if `index` is past the end
    /// - [`TodoError::NotEditing`] if the item is not in editing mode
    /// - [`TodoError::EmptyLabel`] if the trimmed label is empty
    pub fn edit_label(&mut self, index: usize, label: &str) -> Result<&TodoItem> {
        let item = self.item_mut(index)?;
        if !item.editing {
            return Err(TodoError::NotEditing { index });
        }

        let label = label.trim();
        if label.is_empty() {
            return Err(TodoError::EmptyLabel);
        }

        label.clone_into(&mut item.label);
        Ok(item)
    }

    /// Leaves editing mode on the item at `index`, keeping its values
    ///
    /// # Errors
    ///
    /// Returns [`TodoError::IndexOutOfRange`] if `index` is past the end.
    pub fn commit_edit(&mut self, index: usize) -> Result<&TodoItem> {
        let item = self.item_mut(index)?;
        item.commit_edit();
        Ok(item)
    }

    /// Leaves editing mode on the item at `index`, restoring pre-edit values
    ///
    /// # Errors
    ///
    /// Returns [`TodoError::IndexOutOfRange`] if `index` is past the end.
    pub fn cancel_edit(&mut self, index: usize) -> Result<&TodoItem> {
        let item = self.item_mut(index)?;
        item.cancel_edit();
        Ok(item)
    }

    /// Removes and returns the item at `index`
    ///
    /// # Errors
    ///
    /// Returns [`TodoError::IndexOutOfRange`] if `index` is past the end; the
    /// list is left untouched.
    pub fn destroy(&mut self, index: usize) -> Result<TodoItem> {
        if index >= self.items.len() {
            return Err(TodoError::IndexOutOfRange {
                index,
                len: self.items.len(),
            });
        }
        Ok(self.items.remove(index))
    }

    /// Removes every completed item, returning the items that remain
    pub fn clear_completed(&mut self) -> &[TodoItem] {
        self.items.retain(|item| !item.completed);
        &self.items
    }

    /// Items matching `filter`, in list order
    ///
    /// Accepts a [`Filter`] or a status string (`"active"`, `"completed"`,
    /// anything else meaning all).
    #[must_use]
    pub fn visible(&self, filter: impl Into<Filter>) -> Vec<&TodoItem> {
        let filter = filter.into();
        self.items.iter().filter(|item| filter.matches(item)).collect()
    }

    /// Completed and remaining counts in a single pass
    #[must_use]
    pub fn summary(&self) -> Summary {
        let completed_count = self.items.iter().filter(|item| item.completed).count();
        let remaining_count = self.items.len() - completed_count;

        Summary {
            all_completed: remaining_count == 0,
            completed_count,
            remaining_count,
        }
    }
}

impl<'a> IntoIterator for &'a TodoListStore {
    type Item = &'a TodoItem;
    type IntoIter = std::slice::Iter<'a, TodoItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
