//! Fine-grained reactive signal store
//!
//! A push-based signal arena: components hold typed [`Signal`] handles into
//! a [`ReactiveGraph`], and writes notify registered watchers so stateful
//! elements can rebuild just the subtrees that depend on the changed
//! signals.
//!
//! The [`State<T>`] wrapper is the primary API at the component layer: it
//! bundles a signal with shared access to the graph, the tree-dirty flag,
//! and the watcher notification hook.
//!
//! ```ignore
//! use weft_core::reactive::State;
//!
//! // State is typically obtained from the keyed context
//! let open: State<bool> = ctx.use_state_keyed("dropdown_open", || false);
//!
//! let visible = open.get();
//! open.set(!visible);           // notify watchers, no tree rebuild
//! open.set_rebuild(!visible);   // notify watchers AND mark the tree dirty
//! ```

use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;
use std::any::Any;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

new_key_type! {
    /// Unique identifier for a signal
    pub struct SignalId;
}

/// Errors from signal access
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("signal is no longer present in the reactive graph")]
    Missing,
    #[error("signal holds a value of a different type")]
    TypeMismatch,
}

/// A typed handle to a signal slot (cheap to copy)
#[derive(Debug)]
pub struct Signal<T> {
    id: SignalId,
    _marker: std::marker::PhantomData<T>,
}

impl<T> Clone for Signal<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Signal<T> {}

impl<T> Signal<T> {
    /// Get the signal's internal ID
    pub fn id(&self) -> SignalId {
        self.id
    }

    /// Reconstruct a typed handle from a raw [`SignalId`]
    ///
    /// The caller must ensure the id refers to a signal of type `T`; the
    /// keyed-state registry guarantees this by keying on the type.
    pub fn from_id(id: SignalId) -> Self {
        Signal {
            id,
            _marker: std::marker::PhantomData,
        }
    }
}

impl SignalId {
    /// Convert to a raw u64 for storage outside the graph
    pub fn to_raw(&self) -> u64 {
        use slotmap::Key;
        self.data().as_ffi()
    }

    /// Reconstruct from a raw u64
    pub fn from_raw(raw: u64) -> Self {
        slotmap::KeyData::from_ffi(raw).into()
    }
}

struct SignalNode {
    /// The signal value (type-erased)
    value: Box<dyn Any + Send>,
    /// Version counter for change detection
    version: u64,
}

/// The signal arena
///
/// Single-threaded by contract (UI thread); shared behind a mutex only so
/// `State` handles stay `Send` for callback plumbing.
pub struct ReactiveGraph {
    signals: SlotMap<SignalId, SignalNode>,
    global_version: u64,
}

impl ReactiveGraph {
    pub fn new() -> Self {
        Self {
            signals: SlotMap::with_key(),
            global_version: 0,
        }
    }

    /// Create a new signal with an initial value
    pub fn create_signal<T: Send + 'static>(&mut self, initial: T) -> Signal<T> {
        let id = self.signals.insert(SignalNode {
            value: Box::new(initial),
            version: 0,
        });
        Signal {
            id,
            _marker: std::marker::PhantomData,
        }
    }

    /// Get the current value of a signal
    pub fn get<T: Clone + 'static>(&self, signal: Signal<T>) -> Option<T> {
        self.get_checked(signal).ok()
    }

    /// Get the current value, distinguishing a dead slot from a type
    /// mismatch
    pub fn get_checked<T: Clone + 'static>(&self, signal: Signal<T>) -> Result<T, StateError> {
        let node = self.signals.get(signal.id).ok_or(StateError::Missing)?;
        node.value
            .downcast_ref::<T>()
            .cloned()
            .ok_or(StateError::TypeMismatch)
    }

    /// Set the value of a signal, bumping its version
    pub fn set<T: Send + 'static>(&mut self, signal: Signal<T>, value: T) {
        if let Some(node) = self.signals.get_mut(signal.id) {
            node.value = Box::new(value);
            node.version += 1;
            self.global_version += 1;
        }
    }

    /// Update the value in place using a function
    pub fn update<T: Clone + Send + 'static>(&mut self, signal: Signal<T>, f: impl FnOnce(T) -> T) {
        if let Some(current) = self.get(signal) {
            self.set(signal, f(current));
        }
    }

    /// Version counter for a signal, if it exists
    pub fn version(&self, id: SignalId) -> Option<u64> {
        self.signals.get(id).map(|node| node.version)
    }

    /// Monotonic counter bumped on every write
    pub fn global_version(&self) -> u64 {
        self.global_version
    }
}

impl Default for ReactiveGraph {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared handle to the reactive graph
pub type SharedReactiveGraph = Arc<Mutex<ReactiveGraph>>;

/// Flag marking the element tree as needing a rebuild
pub type DirtyFlag = Arc<AtomicBool>;

/// Callback notifying stateful elements that signals changed
pub type WatcherCallback = Arc<dyn Fn(&[SignalId]) + Send + Sync>;

/// A signal bundled with graph access, the primary component-state API
///
/// Cloning a `State` clones the handle, not the value; all clones observe
/// the same slot.
#[derive(Clone)]
pub struct State<T> {
    signal: Signal<T>,
    graph: SharedReactiveGraph,
    dirty_flag: DirtyFlag,
    /// Optional hook notifying stateful elements of writes
    watcher: Option<WatcherCallback>,
}

impl<T: Clone + Send + 'static> State<T> {
    /// Create a new State wrapper
    pub fn new(signal: Signal<T>, graph: SharedReactiveGraph, dirty_flag: DirtyFlag) -> Self {
        Self {
            signal,
            graph,
            dirty_flag,
            watcher: None,
        }
    }

    /// Create a State wrapper that notifies a watcher on writes
    pub fn with_watcher(
        signal: Signal<T>,
        graph: SharedReactiveGraph,
        dirty_flag: DirtyFlag,
        watcher: WatcherCallback,
    ) -> Self {
        Self {
            signal,
            graph,
            dirty_flag,
            watcher: Some(watcher),
        }
    }

    /// Get the current value, falling back to `T::default()` if the slot
    /// has gone away
    pub fn get(&self) -> T
    where
        T: Default,
    {
        self.graph
            .lock()
            .unwrap()
            .get(self.signal)
            .unwrap_or_default()
    }

    /// Get the current value, or `None` if the slot is gone
    pub fn try_get(&self) -> Option<T> {
        self.graph.lock().unwrap().get(self.signal)
    }

    /// Set a new value and notify watchers
    ///
    /// Use for visual-only state; structural changes should go through
    /// [`State::set_rebuild`].
    pub fn set(&self, value: T) {
        self.graph.lock().unwrap().set(self.signal, value);
        if let Some(ref watcher) = self.watcher {
            watcher(&[self.signal.id()]);
        }
    }

    /// Set a new value AND mark the element tree for rebuild
    pub fn set_rebuild(&self, value: T) {
        self.graph.lock().unwrap().set(self.signal, value);
        self.dirty_flag.store(true, Ordering::SeqCst);
        if let Some(ref watcher) = self.watcher {
            watcher(&[self.signal.id()]);
        }
    }

    /// Update the value with a function and notify watchers
    pub fn update(&self, f: impl FnOnce(T) -> T) {
        self.graph.lock().unwrap().update(self.signal, f);
        if let Some(ref watcher) = self.watcher {
            watcher(&[self.signal.id()]);
        }
    }

    /// The underlying signal id, for `deps` registration on stateful
    /// elements
    pub fn signal_id(&self) -> SignalId {
        self.signal.id()
    }
}

impl<T: std::fmt::Debug + Clone + Send + 'static> std::fmt::Debug for State<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("State")
            .field("signal", &self.signal.id())
            .field("value", &self.try_get())
            .finish()
    }
}

/// Batch of signal ids collected during a dispatch, for watcher
/// notification without re-entrancy
pub type SignalBatch = SmallVec<[SignalId; 4]>;

#[cfg(test)]
mod tests {
    use super::*;

    fn state_of<T: Clone + Send + 'static>(initial: T) -> State<T> {
        let graph: SharedReactiveGraph = Arc::new(Mutex::new(ReactiveGraph::new()));
        let signal = graph.lock().unwrap().create_signal(initial);
        State::new(signal, graph, Arc::new(AtomicBool::new(false)))
    }

    #[test]
    fn test_signal_roundtrip() {
        let mut graph = ReactiveGraph::new();
        let s = graph.create_signal(41i32);
        assert_eq!(graph.get(s), Some(41));
        graph.set(s, 42);
        assert_eq!(graph.get(s), Some(42));
    }

    #[test]
    fn test_version_bumps_on_set() {
        let mut graph = ReactiveGraph::new();
        let s = graph.create_signal(0u8);
        let v0 = graph.version(s.id()).unwrap();
        graph.set(s, 1);
        assert_eq!(graph.version(s.id()).unwrap(), v0 + 1);
    }

    #[test]
    fn test_get_checked_distinguishes_errors() {
        let mut graph = ReactiveGraph::new();
        let s = graph.create_signal(1i32);
        assert!(graph.get_checked(s).is_ok());

        let wrong_type: Signal<String> = Signal::from_id(s.id());
        assert!(matches!(
            graph.get_checked(wrong_type),
            Err(StateError::TypeMismatch)
        ));

        let dead: Signal<i32> = Signal::from_id(SignalId::from_raw(u64::MAX));
        assert!(matches!(graph.get_checked(dead), Err(StateError::Missing)));
    }

    #[test]
    fn test_signal_id_raw_roundtrip() {
        let mut graph = ReactiveGraph::new();
        let s = graph.create_signal(String::from("x"));
        let raw = s.id().to_raw();
        let rebuilt: Signal<String> = Signal::from_id(SignalId::from_raw(raw));
        assert_eq!(graph.get(rebuilt), Some(String::from("x")));
    }

    #[test]
    fn test_state_get_set() {
        let open = state_of(false);
        assert!(!open.get());
        open.set(true);
        assert!(open.get());
    }

    #[test]
    fn test_state_update() {
        let count = state_of(1i32);
        count.update(|c| c + 9);
        assert_eq!(count.get(), 10);
    }

    #[test]
    fn test_set_rebuild_marks_dirty() {
        let graph: SharedReactiveGraph = Arc::new(Mutex::new(ReactiveGraph::new()));
        let signal = graph.lock().unwrap().create_signal(0i32);
        let dirty = Arc::new(AtomicBool::new(false));
        let state = State::new(signal, graph, dirty.clone());
        state.set(1);
        assert!(!dirty.load(Ordering::SeqCst));
        state.set_rebuild(2);
        assert!(dirty.load(Ordering::SeqCst));
    }

    #[test]
    fn test_watcher_notified_on_set() {
        let graph: SharedReactiveGraph = Arc::new(Mutex::new(ReactiveGraph::new()));
        let signal = graph.lock().unwrap().create_signal(0i32);
        let hits = Arc::new(Mutex::new(Vec::new()));
        let hits_in = hits.clone();
        let state = State::with_watcher(
            signal,
            graph,
            Arc::new(AtomicBool::new(false)),
            Arc::new(move |ids: &[SignalId]| hits_in.lock().unwrap().extend_from_slice(ids)),
        );
        state.set(5);
        assert_eq!(hits.lock().unwrap().as_slice(), &[signal.id()]);
    }
}
