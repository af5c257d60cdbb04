//! Reducer logic for the todo list.
//!
//! Commands mutate the [`TodoListStore`](crate::TodoListStore) held in
//! [`TodoState`]. Commands that change what is stored return a single
//! `Effect::Future` which saves the list and feeds back
//! [`TodoAction::Persisted`] or [`TodoAction::PersistFailed`].

use crate::error::{Result, TodoError};
use crate::list::TodoListStore;
use crate::persistence::TodoPersistence;
use crate::types::{TodoAction, TodoState};
use todomvc_core::{SmallVec, effect::Effect, reducer::Reducer, smallvec};

/// Environment dependencies for the todo reducer
#[derive(Clone, Debug)]
pub struct TodoEnvironment {
    /// Where the list is saved
    pub persistence: TodoPersistence,
}

impl TodoEnvironment {
    /// Creates a new `TodoEnvironment`
    #[must_use]
    pub const fn new(persistence: TodoPersistence) -> Self {
        Self { persistence }
    }
}

/// Reducer for the todo list
#[derive(Clone, Debug, Default)]
pub struct TodoReducer;

/// What a successful command changed
#[derive(Clone, Copy, PartialEq, Eq)]
enum Change {
    /// Stored data changed; the list must be saved
    Stored,
    /// Only transient state changed
    Transient,
}

impl TodoReducer {
    /// Creates a new `TodoReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Applies a command to the list
    fn apply_command(state: &mut TodoState, action: &TodoAction) -> Result<Change> {
        let todos = &mut state.todos;
        match action {
            TodoAction::Create { label } => {
                todos.create(label).ok_or(TodoError::EmptyLabel)?;
                Ok(Change::Stored)
            },
            TodoAction::Toggle { index } => todos.toggle(*index).map(|_| Change::Stored),
            TodoAction::ToggleAll { completed } => {
                todos.toggle_all(*completed);
                Ok(Change::Stored)
            },
            TodoAction::BeginEdit { index } => todos.begin_edit(*index).map(|_| Change::Transient),
            TodoAction::EditLabel { index, label } => {
                todos.edit_label(*index, label).map(|_| Change::Transient)
            },
            TodoAction::CommitEdit { index } => {
                let change = Self::ending_edit(todos, *index);
                todos.commit_edit(*index).map(|_| change)
            },
            TodoAction::CancelEdit { index } => {
                let change = Self::ending_edit(todos, *index);
                todos.cancel_edit(*index).map(|_| change)
            },
            TodoAction::Destroy { index } => todos.destroy(*index).map(|_| Change::Stored),
            TodoAction::ClearCompleted => {
                todos.clear_completed();
                Ok(Change::Stored)
            },
            TodoAction::SetFilter { filter } => {
                state.filter = *filter;
                Ok(Change::Transient)
            },
            // Events are handled in `reduce`
            TodoAction::Persisted { .. }
            | TodoAction::PersistFailed { .. }
            | TodoAction::ValidationFailed { .. } => Ok(Change::Transient),
        }
    }

    /// Leaving edit mode is only worth a save if the item was in it
    fn ending_edit(todos: &TodoListStore, index: usize) -> Change {
        if todos.get(index).is_some_and(|todo| todo.editing) {
            Change::Stored
        } else {
            Change::Transient
        }
    }

    /// Builds the effect that saves the current list
    fn persist(state: &TodoState, env: &TodoEnvironment) -> Effect<TodoAction> {
        let items = state.todos.items().to_vec();
        let persistence = env.persistence.clone();

        Effect::future(async move {
            match persistence.save(&items) {
                Ok(()) => Some(TodoAction::Persisted { count: items.len() }),
                Err(error) => Some(TodoAction::PersistFailed {
                    error: error.to_string(),
                }),
            }
        })
    }
}

impl Reducer for TodoReducer {
    type State = TodoState;
    type Action = TodoAction;
    type Environment = TodoEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            // ========== Events ==========
            TodoAction::Persisted { count } => {
                tracing::debug!(count, "Todos persisted");
                SmallVec::new()
            },
            TodoAction::PersistFailed { error } => {
                tracing::error!(%error, "Failed to persist todos");
                state.last_error = Some(format!("Failed to save todos: {error}"));
                SmallVec::new()
            },
            TodoAction::ValidationFailed { error } => {
                state.last_error = Some(error);
                SmallVec::new()
            },

            // ========== Commands ==========
            command => match Self::apply_command(state, &command) {
                Ok(change) => {
                    state.last_error = None;
                    if change == Change::Stored {
                        smallvec![Self::persist(state, env)]
                    } else {
                        SmallVec::new()
                    }
                },
                Err(error) => {
                    tracing::warn!(?command, %error, "Rejected todo command");
                    self.reduce(
                        state,
                        TodoAction::ValidationFailed {
                            error: error.to_string(),
                        },
                        env,
                    )
                },
            },
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::{Filter, TodoItem};
    use std::sync::Arc;
    use todomvc_testing::{ReducerTest, assertions, mocks::InMemoryStorage};

    fn create_test_env() -> TodoEnvironment {
        TodoEnvironment::new(TodoPersistence::new(Arc::new(InMemoryStorage::new())))
    }

    fn two_todos() -> TodoState {
        TodoState::from_items(vec![
            TodoItem::new("Taste JavaScript", true),
            TodoItem::new("Buy a unicorn", false),
        ])
    }

    fn assert_persists(effects: &[Effect<TodoAction>]) {
        assertions::assert_effects_count(effects, 1);
        assertions::assert_has_future_effect(effects);
    }

    #[test]
    fn test_create_todo_success() {
        ReducerTest::new(TodoReducer::new())
            .with_env(create_test_env())
            .given_state(TodoState::new())
            .when_action(TodoAction::Create {
                label: " Buy milk ".to_string(),
            })
            .then_state(|state| {
                assert_eq!(state.todos.len(), 1);
                let todo = state.todos.get(0).unwrap();
                assert_eq!(todo.label, "Buy milk");
                assert!(!todo.completed);
                assert!(state.last_error.is_none());
            })
            .then_effects(assert_persists)
            .run();
    }

    #[test]
    fn test_create_todo_empty_label() {
        ReducerTest::new(TodoReducer::new())
            .with_env(create_test_env())
            .given_state(TodoState::new())
            .when_action(TodoAction::Create {
                label: "   ".to_string(),
            })
            .then_state(|state| {
                assert!(state.todos.is_empty());
                assert!(state.last_error.as_ref().unwrap().contains("cannot be empty"));
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn test_success_clears_last_error() {
        ReducerTest::new(TodoReducer::new())
            .with_env(create_test_env())
            .given_state(TodoState::new())
            .when_action(TodoAction::Create { label: String::new() })
            .when_action(TodoAction::Create {
                label: "Walk dog".to_string(),
            })
            .then_state(|state| {
                assert_eq!(state.todos.len(), 1);
                assert!(state.last_error.is_none());
            })
            .run();
    }

    #[test]
    fn test_toggle_and_toggle_all() {
        ReducerTest::new(TodoReducer::new())
            .with_env(create_test_env())
            .given_state(two_todos())
            .when_action(TodoAction::Toggle { index: 0 })
            .then_state(|state| {
                let summary = state.todos.summary();
                assert_eq!(summary.completed_count, 0);
                assert_eq!(summary.remaining_count, 2);
            })
            .then_effects(assert_persists)
            .run();

        ReducerTest::new(TodoReducer::new())
            .with_env(create_test_env())
            .given_state(two_todos())
            .when_action(TodoAction::ToggleAll { completed: true })
            .then_state(|state| assert!(state.todos.summary().all_completed))
            .then_effects(assert_persists)
            .run();
    }

    #[test]
    fn test_destroy_out_of_range() {
        ReducerTest::new(TodoReducer::new())
            .with_env(create_test_env())
            .given_state(two_todos())
            .when_action(TodoAction::Destroy { index: 5 })
            .then_state(|state| {
                assert_eq!(state.todos.len(), 2);
                assert!(state.last_error.as_ref().unwrap().contains("No todo at index 5"));
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn test_destroy_and_clear_completed() {
        ReducerTest::new(TodoReducer::new())
            .with_env(create_test_env())
            .given_state(two_todos())
            .when_action(TodoAction::Destroy { index: 1 })
            .then_state(|state| {
                assert_eq!(state.todos.len(), 1);
                assert_eq!(state.todos.get(0).unwrap().label, "Taste JavaScript");
            })
            .then_effects(assert_persists)
            .run();

        ReducerTest::new(TodoReducer::new())
            .with_env(create_test_env())
            .given_state(two_todos())
            .when_action(TodoAction::ClearCompleted)
            .then_state(|state| {
                assert_eq!(state.todos.items(), &[TodoItem::new("Buy a unicorn", false)]);
            })
            .then_effects(assert_persists)
            .run();
    }

    #[test]
    fn test_edit_lifecycle_cancel() {
        ReducerTest::new(TodoReducer::new())
            .with_env(create_test_env())
            .given_state(two_todos())
            .when_action(TodoAction::BeginEdit { index: 1 })
            .when_action(TodoAction::EditLabel {
                index: 1,
                label: "Buy two unicorns".to_string(),
            })
            .when_action(TodoAction::CancelEdit { index: 1 })
            .then_state(|state| {
                let todo = state.todos.get(1).unwrap();
                assert_eq!(todo.label, "Buy a unicorn");
                assert!(!todo.editing);
            })
            .then_effects(assert_persists)
            .run();
    }

    #[test]
    fn test_edit_lifecycle_commit() {
        ReducerTest::new(TodoReducer::new())
            .with_env(create_test_env())
            .given_state(two_todos())
            .when_action(TodoAction::BeginEdit { index: 1 })
            .when_action(TodoAction::EditLabel {
                index: 1,
                label: "Buy two unicorns".to_string(),
            })
            .then_effects(assertions::assert_no_effects)
            .then_state(|state| assert!(state.todos.get(1).unwrap().editing))
            .run();

        ReducerTest::new(TodoReducer::new())
            .with_env(create_test_env())
            .given_state(two_todos())
            .when_action(TodoAction::BeginEdit { index: 1 })
            .when_action(TodoAction::EditLabel {
                index: 1,
                label: "Buy two unicorns".to_string(),
            })
            .when_action(TodoAction::CommitEdit { index: 1 })
            .then_state(|state| {
                let todo = state.todos.get(1).unwrap();
                assert_eq!(todo.label, "Buy two unicorns");
                assert!(!todo.completed);
                assert!(!todo.editing);
            })
            .then_effects(assert_persists)
            .run();
    }

    #[test]
    fn test_ending_edit_that_never_began_is_not_saved() {
        for action in [
            TodoAction::CommitEdit { index: 0 },
            TodoAction::CancelEdit { index: 0 },
        ] {
            ReducerTest::new(TodoReducer::new())
                .with_env(create_test_env())
                .given_state(two_todos())
                .when_action(action)
                .then_state(|state| {
                    assert_eq!(state.todos.items(), two_todos().todos.items());
                    assert!(state.last_error.is_none());
                })
                .then_effects(assertions::assert_no_effects)
                .run();
        }
    }

    #[test]
    fn test_edit_label_without_begin_is_rejected() {
        ReducerTest::new(TodoReducer::new())
            .with_env(create_test_env())
            .given_state(two_todos())
            .when_action(TodoAction::EditLabel {
                index: 0,
                label: "Taste Rust".to_string(),
            })
            .then_state(|state| {
                assert_eq!(state.todos.get(0).unwrap().label, "Taste JavaScript");
                assert!(state.last_error.as_ref().unwrap().contains("not being edited"));
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn test_set_filter() {
        ReducerTest::new(TodoReducer::new())
            .with_env(create_test_env())
            .given_state(two_todos())
            .when_action(TodoAction::SetFilter {
                filter: Filter::Completed,
            })
            .then_state(|state| {
                let visible: Vec<_> = state.visible().iter().map(|t| t.label.clone()).collect();
                assert_eq!(visible, vec!["Taste JavaScript"]);
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn test_persist_failed_records_error() {
        ReducerTest::new(TodoReducer::new())
            .with_env(create_test_env())
            .given_state(two_todos())
            .when_action(TodoAction::PersistFailed {
                error: "disk full".to_string(),
            })
            .then_state(|state| {
                assert_eq!(
                    state.last_error.as_deref(),
                    Some("Failed to save todos: disk full")
                );
                assert_eq!(state.todos.len(), 2);
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }
}
