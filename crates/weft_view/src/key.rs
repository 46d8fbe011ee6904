//! Stable unique keys for component instances
//!
//! Keyed state persists across rebuilds by string key, so two component
//! instances must never share one. `#[track_caller]` alone collides inside
//! loops and closures; appending a UUID per instance keeps keys unique
//! while the source location stays readable for debugging.

use std::cell::OnceCell;
use uuid::Uuid;

/// Lazily generated unique key for one component instance
///
/// Format: `{prefix}@{file}:{line}:{column}#{uuid}`. Generated on first
/// access and cached for the builder's lifetime; clones keep the same key.
pub struct InstanceKey {
    key: OnceCell<String>,
    prefix: &'static str,
    file: &'static str,
    line: u32,
    column: u32,
}

impl InstanceKey {
    /// Create from the caller's source location, with a per-instance UUID
    #[track_caller]
    pub fn new(prefix: &'static str) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            key: OnceCell::new(),
            prefix,
            file: loc.file(),
            line: loc.line(),
            column: loc.column(),
        }
    }

    /// Create with a caller-chosen deterministic key
    pub fn explicit(key: impl Into<String>) -> Self {
        let instance = Self {
            key: OnceCell::new(),
            prefix: "",
            file: "",
            line: 0,
            column: 0,
        };
        let _ = instance.key.set(key.into());
        instance
    }

    /// Get or generate the key
    pub fn get(&self) -> &str {
        self.key.get_or_init(|| {
            format!(
                "{}@{}:{}:{}#{}",
                self.prefix,
                self.file,
                self.line,
                self.column,
                Uuid::new_v4().as_simple()
            )
        })
    }

    /// Derive a sub-key for internal state ("open", "query", ...)
    pub fn derive(&self, suffix: &str) -> String {
        format!("{}_{}", self.get(), suffix)
    }
}

impl std::fmt::Debug for InstanceKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "InstanceKey({})", self.get())
    }
}

impl Clone for InstanceKey {
    fn clone(&self) -> Self {
        Self::explicit(self.get())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loop_instances_are_unique() {
        let mut keys = std::collections::HashSet::new();
        for _ in 0..8 {
            let key = InstanceKey::new("chip");
            keys.insert(key.get().to_string());
        }
        assert_eq!(keys.len(), 8);
    }

    #[test]
    fn test_explicit_and_derive() {
        let key = InstanceKey::explicit("country-select");
        assert_eq!(key.get(), "country-select");
        assert_eq!(key.derive("open"), "country-select_open");
    }

    #[test]
    fn test_key_is_stable_and_survives_clone() {
        let key = InstanceKey::new("btn");
        let first = key.get().to_string();
        assert_eq!(key.get(), first);
        assert_eq!(key.clone().get(), first);
    }
}
