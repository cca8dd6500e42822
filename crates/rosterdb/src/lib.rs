//! Audited in-memory roster store with a slot scheduler and an optimistic
//! mutation controller.
//!
//! ## Crate layout
//! - `error`: typed, recoverable errors with a coarse classification.
//! - `model`: persisted records, their drafts, and their patch types.
//! - `mutation`: per-cell optimistic edit state machine.
//! - `obs`: thread-local operation counters.
//! - `schedule`: day-grid slot checks and the scheduling facade.
//! - `seed`: the demo roster.
//! - `snapshot`: full-store export and duplicate-skipping import.
//! - `store`: the audited store core; the sole mutation surface.
//! - `types`: newtype wrappers for ids, timestamps, and slot times.
//!
//! The `prelude` module mirrors the surface a consumer (a page, a route
//! handler, a CLI) actually touches.

pub mod error;
pub mod model;
pub mod mutation;
pub mod obs;
pub mod schedule;
pub mod seed;
pub mod snapshot;
pub mod store;
pub mod types;

#[cfg(test)]
pub(crate) mod test_fixtures;

pub use error::{Error, ErrorClass};
pub use store::Store;

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

///
/// Prelude
/// using _ brings traits into scope and avoids name conflicts
///

pub mod prelude {
    pub use crate::{
        error::{Error, ErrorClass},
        model::{
            Actor, AuditAction, AuditChanges, AuditLog, EntityType, EventDraft, EventPatch,
            EventStatus, InterviewEvent, Interviewer, InterviewerDraft, InterviewerPatch, Role,
            SeedState,
        },
        mutation::{CellPhase, CellState, MutationController, MutationError, MutationIntent},
        schedule::{ScheduleConfig, Scheduler},
        snapshot::{MergeOutcome, Snapshot, SnapshotPatch},
        store::Store,
        types::{Date, RecordId, SlotTime, Timestamp},
    };
    pub use serde::{Deserialize, Serialize};
}
