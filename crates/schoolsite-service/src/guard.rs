//! Re-entrancy guard for content mutations.
//!
//! A target (an ordered collection under one parent, or a section) may have
//! at most one mutation in flight. A duplicate submission fails immediately
//! with `Conflict` instead of racing the first one.

use std::sync::Arc;

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tracing::debug;

use schoolsite_core::error::AppError;
use schoolsite_core::result::AppResult;

/// Tracks in-flight mutations by target key.
#[derive(Debug, Clone, Default)]
pub struct ActionGuard {
    in_flight: Arc<DashMap<String, &'static str>>,
}

impl ActionGuard {
    /// Create a guard with nothing in flight.
    pub fn new() -> Self {
        Self::default()
    }

    /// Target key of an ordered collection under one parent.
    pub fn collection_target(collection: &str, parent_id: &str) -> String {
        format!("collection:{collection}:{parent_id}")
    }

    /// Target key of a section document.
    pub fn section_target(section_key: &str) -> String {
        format!("section:{section_key}")
    }

    /// Mark `target` busy for the lifetime of the returned ticket.
    pub fn acquire(&self, target: String, action: &'static str) -> AppResult<ActionTicket> {
        match self.in_flight.entry(target) {
            Entry::Occupied(entry) => {
                debug!(
                    key = %entry.key(),
                    running = *entry.get(),
                    rejected = action,
                    "Rejected re-entrant action"
                );
                Err(AppError::conflict(format!(
                    "Another {} is already in progress for this content; wait for it to finish",
                    entry.get()
                )))
            }
            Entry::Vacant(entry) => {
                let target = entry.key().clone();
                entry.insert(action);
                Ok(ActionTicket {
                    in_flight: Arc::clone(&self.in_flight),
                    target,
                })
            }
        }
    }

    /// Whether `target` has a mutation in flight.
    pub fn is_busy(&self, target: &str) -> bool {
        self.in_flight.contains_key(target)
    }
}

/// Releases its target when dropped, whether the action succeeded or not.
#[derive(Debug)]
pub struct ActionTicket {
    in_flight: Arc<DashMap<String, &'static str>>,
    target: String,
}

impl Drop for ActionTicket {
    fn drop(&mut self) {
        self.in_flight.remove(&self.target);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use schoolsite_core::error::ErrorKind;

    #[test]
    fn test_second_acquire_conflicts_until_release() {
        let guard = ActionGuard::new();
        let target = ActionGuard::section_target("historia");

        let ticket = guard.acquire(target.clone(), "save").unwrap();
        assert!(guard.is_busy(&target));

        let err = guard.acquire(target.clone(), "save").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);

        drop(ticket);
        assert!(!guard.is_busy(&target));
        assert!(guard.acquire(target, "save").is_ok());
    }

    #[test]
    fn test_targets_are_independent() {
        let guard = ActionGuard::new();
        let _a = guard
            .acquire(ActionGuard::collection_target("council_members", "board-1"), "add")
            .unwrap();
        assert!(
            guard
                .acquire(ActionGuard::collection_target("council_members", "board-2"), "add")
                .is_ok()
        );
    }
}
