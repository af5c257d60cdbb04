//! # Todo Testing
//!
//! Testing utilities and helpers for the todo application.
//!
//! This crate provides:
//! - [`ReducerTest`]: Given-When-Then harness for reducers
//! - [`assertions`]: Effect assertion helpers
//! - [`mocks`]: In-memory and failing [`Storage`](todomvc_core::environment::Storage) backends
//!
//! ## Example
//!
//! ```ignore
//! use todomvc_testing::{mocks::InMemoryStorage, ReducerTest, assertions};
//!
//! ReducerTest::new(TodoReducer::new())
//!     .with_env(TodoEnvironment::new(TodoPersistence::new(Arc::new(InMemoryStorage::new()))))
//!     .given_state(TodoState::new())
//!     .when_action(TodoAction::Create { label: "Buy milk".into() })
//!     .then_state(|state| assert_eq!(state.todos.len(), 1))
//!     .then_effects(|effects| assertions::assert_effects_count(effects, 1))
//!     .run();
//! ```

pub mod mocks;

pub use reducer_test::{ReducerTest, assertions};
