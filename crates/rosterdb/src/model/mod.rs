//! Entity models: records the store persists, their drafts, and their
//! explicit patch types. Unknown patch fields are rejected at the serde
//! boundary (`deny_unknown_fields`); immutable fields (interviewer `email`,
//! event `interviewer_email`) have no patch slot at all.

mod audit;
mod event;
mod interviewer;
mod meta;

pub use audit::{
    Actor, AuditAction, AuditChanges, AuditLog, ChangeSet, EntityType, FieldChange,
    SYSTEM_ACTOR_EMAIL, SYSTEM_ACTOR_NAME,
};
pub use event::{EventDraft, EventPatch, EventStatus, InterviewEvent};
pub use interviewer::{Interviewer, InterviewerDraft, InterviewerPatch, Role};
pub use meta::{SeedState, StoreMeta};
