//! Audited store core.
//!
//! One `Store` instance owns the three collections (interviewers, events,
//! audit logs) plus the lifecycle meta. It is constructed explicitly and
//! passed by reference to consumers; there is no global instance. All
//! operations are synchronous and run to completion, so no caller ever
//! observes a half-applied mutation; async wrappers are a caller concern.

pub(crate) mod audit;
pub(crate) mod diff;
pub(crate) mod table;

mod events;
mod interviewers;


use crate::{
    error::Error,
    model::{
        Actor, AuditAction, AuditChanges, AuditLog, EntityType, InterviewEvent, Interviewer,
        StoreMeta,
    },
    obs,
    schedule::ScheduleConfig,
    store::{audit::AuditTrail, table::Table},
};

/// Bound applied by [`Store::recent_audit_logs`].
pub const DEFAULT_AUDIT_LIMIT: usize = 100;

///
/// Store
///

#[derive(Clone, Debug, Default)]
pub struct Store {
    pub(crate) interviewers: Table<Interviewer>,
    pub(crate) events: Table<InterviewEvent>,
    pub(crate) audit: AuditTrail,
    meta: StoreMeta,
    schedule: ScheduleConfig,
}

impl Store {
    /// Empty store, seed state `cleared`, default scheduling window.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(schedule: ScheduleConfig) -> Self {
        Self {
            schedule,
            ..Self::default()
        }
    }

    /// Store pre-loaded with the demo roster, seed state `seeded`.
    pub fn seeded() -> Result<Self, Error> {
        let mut store = Self::new();
        let (interviewers, events) = crate::seed::demo_roster();
        store.reseed(interviewers, events)?;

        Ok(store)
    }

    #[must_use]
    pub const fn meta(&self) -> &StoreMeta {
        &self.meta
    }

    #[must_use]
    pub const fn schedule_config(&self) -> &ScheduleConfig {
        &self.schedule
    }

    #[must_use]
    pub fn interviewer_count(&self) -> usize {
        self.interviewers.len()
    }

    #[must_use]
    pub fn event_count(&self) -> usize {
        self.events.len()
    }

    #[must_use]
    pub fn audit_count(&self) -> usize {
        self.audit.len()
    }

    /// Empty all three collections; seed state becomes `cleared`.
    /// The only operation besides [`Self::reseed`] that drops audit history.
    pub fn clear(&mut self) {
        self.interviewers.clear();
        self.events.clear();
        self.audit.clear();
        self.meta.note_clear();
    }

    /// Replace the whole store contents (audit trail included) with the
    /// supplied seed collections. Natural-key collisions inside the seed
    /// data are rejected and leave the store unchanged.
    pub fn reseed(
        &mut self,
        interviewers: Vec<Interviewer>,
        events: Vec<InterviewEvent>,
    ) -> Result<(), Error> {
        let mut seeded_interviewers = Table::new();
        for record in interviewers {
            seeded_interviewers.insert(record)?;
        }

        let mut seeded_events = Table::new();
        for record in events {
            seeded_events.insert(record)?;
        }

        self.interviewers = seeded_interviewers;
        self.events = seeded_events;
        self.audit.clear();
        self.meta.note_seed();

        Ok(())
    }

    /// Most-recent-first audit entries, bounded to `limit`.
    #[must_use]
    pub fn list_audit_logs(&self, limit: usize) -> Vec<AuditLog> {
        obs::metrics::record(|ops| ops.load_calls += 1);

        self.audit.recent(limit)
    }

    #[must_use]
    pub fn recent_audit_logs(&self) -> Vec<AuditLog> {
        self.list_audit_logs(DEFAULT_AUDIT_LIMIT)
    }

    /// Append an audit entry for an out-of-band action (e.g. a caller
    /// recording an export). CRUD entries are store-emitted; callers never
    /// write those themselves.
    pub fn append_audit(
        &mut self,
        action: AuditAction,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        changes: AuditChanges,
        actor: Option<&Actor>,
    ) -> AuditLog {
        self.record_audit(action, entity_type, entity_id, changes, actor)
    }

    pub(crate) fn record_audit(
        &mut self,
        action: AuditAction,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        changes: AuditChanges,
        actor: Option<&Actor>,
    ) -> AuditLog {
        obs::metrics::record(|ops| ops.audit_appends += 1);

        let log = audit::entry(action, entity_type, entity_id, changes, actor);
        self.audit.append(log.clone());

        log
    }

    /// Mark a successful organic write on the lifecycle meta.
    pub(crate) fn touch(&mut self) {
        self.meta.note_write();
    }
}
