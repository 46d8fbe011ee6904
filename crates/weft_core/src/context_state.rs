//! Keyed component state that survives tree rebuilds
//!
//! Component builders run on every rebuild, so plain locals would lose
//! their state each frame. [`ContextState::use_state_keyed`] persists a
//! signal under a `(type, key)` pair: the first call creates it, later
//! calls reconstruct the same typed handle from the stored raw id.
//!
//! ```ignore
//! let ctx = ContextState::get();
//! let open = ctx.use_state_keyed("country_select_open", || false);
//! ```

use rustc_hash::FxHashMap;
use std::any::TypeId;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, OnceLock};

use crate::reactive::{
    DirtyFlag, ReactiveGraph, SharedReactiveGraph, Signal, SignalId, State, WatcherCallback,
};

/// Map key for a persisted signal: the value type plus a caller key
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct StateKey {
    type_id: TypeId,
    key: String,
}

impl StateKey {
    /// Build a key for type `T` and the given string
    pub fn from_string<T: 'static>(key: &str) -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            key: key.to_string(),
        }
    }
}

/// Process-wide registry of keyed signals
///
/// One instance per process, obtained with [`ContextState::get`]. Hosts a
/// shared [`ReactiveGraph`], the tree-dirty flag, and the optional watcher
/// hook that stateful elements register to receive targeted updates.
pub struct ContextState {
    graph: SharedReactiveGraph,
    hooks: Mutex<FxHashMap<StateKey, u64>>,
    dirty_flag: DirtyFlag,
    watcher: Mutex<Option<WatcherCallback>>,
}

static CONTEXT: OnceLock<ContextState> = OnceLock::new();

impl ContextState {
    fn new() -> Self {
        Self {
            graph: Arc::new(Mutex::new(ReactiveGraph::new())),
            hooks: Mutex::new(FxHashMap::default()),
            dirty_flag: Arc::new(AtomicBool::new(false)),
            watcher: Mutex::new(None),
        }
    }

    /// The process-wide context
    pub fn get() -> &'static ContextState {
        CONTEXT.get_or_init(ContextState::new)
    }

    /// Get or create a persistent keyed state
    ///
    /// `init` runs only on first use of the key.
    pub fn use_state_keyed<T, F>(&self, key: &str, init: F) -> State<T>
    where
        T: Clone + Send + 'static,
        F: FnOnce() -> T,
    {
        let state_key = StateKey::from_string::<T>(key);
        let mut hooks = self.hooks.lock().unwrap();

        let signal = if let Some(&raw_id) = hooks.get(&state_key) {
            Signal::from_id(SignalId::from_raw(raw_id))
        } else {
            let signal = self.graph.lock().unwrap().create_signal(init());
            hooks.insert(state_key, signal.id().to_raw());
            tracing::debug!(key, "created keyed state");
            signal
        };

        let watcher = self.watcher.lock().unwrap().clone();
        match watcher {
            Some(callback) => State::with_watcher(
                signal,
                Arc::clone(&self.graph),
                Arc::clone(&self.dirty_flag),
                callback,
            ),
            None => State::new(signal, Arc::clone(&self.graph), Arc::clone(&self.dirty_flag)),
        }
    }

    /// Register the hook stateful elements use to receive signal changes
    pub fn set_watcher(&self, callback: WatcherCallback) {
        *self.watcher.lock().unwrap() = Some(callback);
    }

    /// Mark the element tree as needing a rebuild
    pub fn request_rebuild(&self) {
        self.dirty_flag.store(true, Ordering::SeqCst);
    }

    /// Consume the rebuild flag, returning whether it was set
    pub fn take_rebuild(&self) -> bool {
        self.dirty_flag.swap(false, Ordering::SeqCst)
    }

    /// Shared graph handle (for direct signal creation in tests and hosts)
    pub fn graph(&self) -> SharedReactiveGraph {
        Arc::clone(&self.graph)
    }
}

/// Shorthand for `ContextState::get().use_state_keyed(...)`
pub fn use_state_keyed<T, F>(key: &str, init: F) -> State<T>
where
    T: Clone + Send + 'static,
    F: FnOnce() -> T,
{
    ContextState::get().use_state_keyed(key, init)
}

/// Shorthand for `ContextState::get().request_rebuild()`
pub fn request_rebuild() {
    ContextState::get().request_rebuild()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyed_state_persists() {
        let ctx = ContextState::get();
        let a = ctx.use_state_keyed("ctx_test_counter", || 7i32);
        a.set(12);
        // A later "rebuild" re-requests the same key and sees the write.
        let b = ctx.use_state_keyed("ctx_test_counter", || 7i32);
        assert_eq!(b.get(), 12);
    }

    #[test]
    fn test_same_key_different_types_do_not_collide() {
        let ctx = ContextState::get();
        let n = ctx.use_state_keyed("ctx_test_shared_key", || 3i64);
        let s = ctx.use_state_keyed("ctx_test_shared_key", || String::from("three"));
        assert_eq!(n.get(), 3);
        assert_eq!(s.get(), "three");
    }

    #[test]
    fn test_init_runs_once() {
        let ctx = ContextState::get();
        let mut runs = 0;
        let _ = ctx.use_state_keyed("ctx_test_init_once", || {
            runs += 1;
            0u8
        });
        let _ = ctx.use_state_keyed("ctx_test_init_once", || {
            runs += 1;
            0u8
        });
        assert_eq!(runs, 1);
    }

    #[test]
    fn test_rebuild_flag_roundtrip() {
        let ctx = ContextState::get();
        ctx.request_rebuild();
        assert!(ctx.take_rebuild());
        assert!(!ctx.take_rebuild());
    }
}
