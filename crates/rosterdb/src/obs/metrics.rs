use crate::types::Timestamp;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;

///
/// Metrics
/// Ephemeral, in-memory counters for store operations. Reset on demand,
/// never persisted, never part of a snapshot.
///

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct EventState {
    pub ops: EventOps,
    pub since: Timestamp,
}

impl Default for EventState {
    fn default() -> Self {
        Self {
            ops: EventOps::default(),
            since: Timestamp::now(),
        }
    }
}

///
/// EventOps
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct EventOps {
    // CRUD entrypoints
    pub load_calls: u64,
    pub save_calls: u64,
    pub delete_calls: u64,

    // Constraint rejections
    pub unique_violations: u64,
    pub capacity_rejections: u64,

    // Referential maintenance
    pub cascade_deletes: u64,

    // Audit trail
    pub audit_appends: u64,

    // Merge engine
    pub merge_imported: u64,
    pub merge_skipped: u64,

    // Optimistic controller
    pub rollbacks: u64,
}

thread_local! {
    static EVENT_STATE: RefCell<EventState> = RefCell::new(EventState::default());
}

/// Apply a counter update to the global metrics state.
pub(crate) fn record(f: impl FnOnce(&mut EventOps)) {
    EVENT_STATE.with_borrow_mut(|state| f(&mut state.ops));
}

/// Point-in-time copy of the counters.
#[must_use]
pub fn report() -> EventState {
    EVENT_STATE.with_borrow(Clone::clone)
}

/// Zero all counters and restart the observation window.
pub fn reset() {
    EVENT_STATE.with_borrow_mut(|state| *state = EventState::default());
}

///
/// TESTS
///
