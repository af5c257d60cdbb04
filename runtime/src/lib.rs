//! # Todo Runtime
//!
//! Runtime implementation for the todo application.
//!
//! This crate provides the Store - the runtime that:
//! - Manages state behind an async `RwLock`
//! - Executes reducers
//! - Executes effects, feeding produced actions back into the reducer
//! - Notifies subscribers after every processed action
//!
//! The reducer and every effect run to completion before [`Store::send`]
//! returns, so callers observe a fully settled state afterwards.

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use todomvc_core::{effect::Effect, reducer::Reducer};
use tokio::sync::{Mutex, RwLock, watch};

pub use error::StoreError;
pub use store::Store;

/// Error types for the Store runtime
pub mod error {
    use thiserror::Error;

    /// Errors that can occur during Store operations
    #[derive(Error, Debug, Clone, PartialEq, Eq)]
    pub enum StoreError {
        /// Store is shutting down and not accepting new actions
        ///
        /// Returned when `send()` is called after `shutdown()`.
        #[error("Store is shutting down")]
        ShutdownInProgress,
    }
}

/// Store module - the runtime coordinator for a reducer
pub mod store {
    use super::{
        Arc, AtomicBool, Effect, Mutex, Ordering, Reducer, RwLock, StoreError, VecDeque, watch,
    };

    /// The Store - runtime coordinator for a reducer
    ///
    /// The Store manages:
    /// 1. State (behind `RwLock` for concurrent access)
    /// 2. Reducer (business logic)
    /// 3. Environment (injected dependencies)
    /// 4. Effect execution (with feedback loop)
    ///
    /// Cloning a Store is cheap; clones share state and the change channel.
    /// Sends through any clone are processed one at a time, effects included.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let store = Store::new(TodoState::new(), TodoReducer::new(), env);
    ///
    /// store.send(TodoAction::Create { label: "Buy milk".into() }).await?;
    /// let count = store.state(|s| s.todos.len()).await;
    /// ```
    pub struct Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        state: Arc<RwLock<S>>,
        reducer: Arc<R>,
        environment: Arc<E>,
        shutdown: Arc<AtomicBool>,
        /// Held for the whole of `send`, effects included.
        send_lock: Arc<Mutex<()>>,
        /// Bumped once per processed action; observers wake on change.
        version: Arc<watch::Sender<u64>>,
    }

    impl<S, A, E, R> Clone for Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        fn clone(&self) -> Self {
            Self {
                state: Arc::clone(&self.state),
                reducer: Arc::clone(&self.reducer),
                environment: Arc::clone(&self.environment),
                shutdown: Arc::clone(&self.shutdown),
                send_lock: Arc::clone(&self.send_lock),
                version: Arc::clone(&self.version),
            }
        }
    }

    impl<S, A, E, R> Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E> + Send + Sync + 'static,
        A: Send + std::fmt::Debug + 'static,
        S: Send + Sync + 'static,
        E: Send + Sync + 'static,
    {
        /// Create a new store with initial state, reducer, and environment
        #[must_use]
        pub fn new(initial_state: S, reducer: R, environment: E) -> Self {
            let (version, _) = watch::channel(0);

            Self {
                state: Arc::new(RwLock::new(initial_state)),
                reducer: Arc::new(reducer),
                environment: Arc::new(environment),
                shutdown: Arc::new(AtomicBool::new(false)),
                send_lock: Arc::new(Mutex::new(())),
                version: Arc::new(version),
            }
        }

        /// Send an action to the store
        ///
        /// Runs the reducer, then executes the returned effects in order.
        /// Actions produced by `Effect::Future` are queued and processed the
        /// same way until the queue drains.
        ///
        /// Concurrent sends wait for each other: an action and everything it
        /// triggers finish before the next action is reduced.
        ///
        /// # Errors
        ///
        /// Returns [`StoreError::ShutdownInProgress`] if the store has been
        /// shut down.
        #[tracing::instrument(skip(self, action), name = "store_send")]
        pub async fn send(&self, action: A) -> Result<(), StoreError> {
            if self.shutdown.load(Ordering::SeqCst) {
                tracing::warn!("Rejected action: store is shutting down");
                return Err(StoreError::ShutdownInProgress);
            }

            let _serial = self.send_lock.lock().await;

            let mut queue = VecDeque::from([action]);
            while let Some(action) = queue.pop_front() {
                tracing::debug!(?action, "Processing action");

                let effects = {
                    let mut state = self.state.write().await;
                    let span = tracing::debug_span!("reducer_execution");
                    let _enter = span.enter();
                    self.reducer.reduce(&mut *state, action, &self.environment)
                };
                self.version.send_modify(|v| *v += 1);

                tracing::trace!("Reducer completed, returned {} effects", effects.len());
                for effect in effects {
                    Self::execute_effect(effect, &mut queue).await;
                }
            }

            Ok(())
        }

        /// Execute a single effect, pushing any produced action onto `queue`
        async fn execute_effect(effect: Effect<A>, queue: &mut VecDeque<A>) {
            let mut pending = VecDeque::from([effect]);
            while let Some(effect) = pending.pop_front() {
                match effect {
                    Effect::None => {
                        tracing::trace!("Executing Effect::None (no-op)");
                    },
                    Effect::Sequential(effects) => {
                        tracing::trace!("Executing Effect::Sequential ({} effects)", effects.len());
                        for (i, inner) in effects.into_iter().enumerate() {
                            pending.insert(i, inner);
                        }
                    },
                    Effect::Future(fut) => {
                        tracing::trace!("Executing Effect::Future");
                        if let Some(action) = fut.await {
                            tracing::trace!("Effect::Future produced an action, queueing");
                            queue.push_back(action);
                        } else {
                            tracing::trace!("Effect::Future completed with no action");
                        }
                    },
                }
            }
        }

        /// Read current state via a closure
        pub async fn state<F, T>(&self, f: F) -> T
        where
            F: FnOnce(&S) -> T,
        {
            let state = self.state.read().await;
            f(&*state)
        }

        /// Subscribe to state-change notifications
        ///
        /// The received value is the number of actions processed so far.
        #[must_use]
        pub fn subscribe(&self) -> watch::Receiver<u64> {
            self.version.subscribe()
        }

        /// Stop accepting new actions
        pub fn shutdown(&self) {
            tracing::info!("Initiating store shutdown");
            self.shutdown.store(true, Ordering::SeqCst);
        }

        /// Returns `true` once `shutdown()` has been called
        #[must_use]
        pub fn is_shutting_down(&self) -> bool {
            self.shutdown.load(Ordering::SeqCst)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use todomvc_core::{SmallVec, smallvec};

    #[derive(Debug, Clone, Default)]
    struct TallyState {
        count: i64,
        log: Vec<&'static str>,
    }

    #[derive(Debug, Clone)]
    enum TallyAction {
        Add(i64),
        AddThenEcho(i64),
        Echoed,
        SlowEcho,
        Chain,
    }

    struct TallyReducer;

    impl Reducer for TallyReducer {
        type State = TallyState;
        type Action = TallyAction;
        type Environment = ();

        fn reduce(
            &self,
            state: &mut TallyState,
            action: TallyAction,
            _env: &(),
        ) -> SmallVec<[Effect<TallyAction>; 4]> {
            match action {
                TallyAction::Add(n) => {
                    state.count += n;
                    state.log.push("add");
                    smallvec![Effect::None]
                },
                TallyAction::AddThenEcho(n) => {
                    state.count += n;
                    state.log.push("add");
                    smallvec![Effect::future(async { Some(TallyAction::Echoed) })]
                },
                TallyAction::SlowEcho => {
                    state.log.push("slow");
                    smallvec![Effect::future(async {
                        tokio::time::sleep(std::time::Duration::from_millis(100)).await;
                        Some(TallyAction::Echoed)
                    })]
                },
                TallyAction::Echoed => {
                    state.log.push("echo");
                    SmallVec::new()
                },
                TallyAction::Chain => {
                    state.log.push("chain");
                    smallvec![Effect::chain(vec![
                        Effect::future(async { Some(TallyAction::Add(1)) }),
                        Effect::None,
                        Effect::future(async { Some(TallyAction::Add(2)) }),
                    ])]
                },
            }
        }
    }

    #[tokio::test]
    async fn send_applies_reducer() {
        let store = Store::new(TallyState::default(), TallyReducer, ());
        assert!(store.send(TallyAction::Add(3)).await.is_ok());
        assert_eq!(store.state(|s| s.count).await, 3);
    }

    #[tokio::test]
    async fn future_effects_feed_back_before_send_returns() {
        let store = Store::new(TallyState::default(), TallyReducer, ());
        assert!(store.send(TallyAction::AddThenEcho(1)).await.is_ok());
        assert_eq!(store.state(|s| s.log.clone()).await, vec!["add", "echo"]);
    }

    #[tokio::test]
    async fn sequential_effects_run_in_order() {
        let store = Store::new(TallyState::default(), TallyReducer, ());
        assert!(store.send(TallyAction::Chain).await.is_ok());
        assert_eq!(store.state(|s| s.count).await, 3);
        assert_eq!(store.state(|s| s.log.clone()).await, vec!["chain", "add", "add"]);
    }

    #[tokio::test]
    async fn subscribers_see_each_processed_action() {
        let store = Store::new(TallyState::default(), TallyReducer, ());
        let mut changes = store.subscribe();
        assert_eq!(*changes.borrow(), 0);

        assert!(store.send(TallyAction::AddThenEcho(1)).await.is_ok());
        assert!(changes.has_changed().unwrap_or(false));
        assert_eq!(*changes.borrow_and_update(), 2);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn concurrent_sends_wait_for_pending_effects() {
        let store = Store::new(TallyState::default(), TallyReducer, ());

        let slow = tokio::spawn({
            let store = store.clone();
            async move { store.send(TallyAction::SlowEcho).await }
        });
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        assert!(store.send(TallyAction::Add(1)).await.is_ok());
        assert!(matches!(slow.await, Ok(Ok(()))));

        assert_eq!(store.state(|s| s.log.clone()).await, vec!["slow", "echo", "add"]);
    }

    #[tokio::test]
    async fn shutdown_rejects_new_actions() {
        let store = Store::new(TallyState::default(), TallyReducer, ());
        let clone = store.clone();
        store.shutdown();

        assert!(clone.is_shutting_down());
        assert_eq!(
            clone.send(TallyAction::Add(1)).await,
            Err(StoreError::ShutdownInProgress)
        );
        assert_eq!(store.state(|s| s.count).await, 0);
    }
}
