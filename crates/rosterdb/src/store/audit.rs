use crate::{
    model::{Actor, AuditAction, AuditChanges, AuditLog, EntityType},
    types::{RecordId, Timestamp},
};
use derive_more::{Deref, IntoIterator};

///
/// AuditTrail
///
/// Append-only log of every mutation. No method here mutates or removes an
/// entry; the whole trail is dropped only by `Store::clear` / `reseed`.
///

#[derive(Clone, Debug, Default, Deref, IntoIterator)]
pub(crate) struct AuditTrail(Vec<AuditLog>);

impl AuditTrail {
    pub fn append(&mut self, log: AuditLog) {
        self.0.push(log);
    }

    /// Insert a pre-existing log as-is (import path preserves ids).
    pub fn append_existing(&mut self, log: AuditLog) {
        self.0.push(log);
    }

    pub fn contains_id(&self, id: RecordId) -> bool {
        self.0.iter().any(|log| log.id == id)
    }

    /// Most-recent-first, bounded.
    pub fn recent(&self, limit: usize) -> Vec<AuditLog> {
        self.0.iter().rev().take(limit).cloned().collect()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}

/// Build a log entry, defaulting to the system principal when no caller
/// context is supplied.
pub(crate) fn entry(
    action: AuditAction,
    entity_type: EntityType,
    entity_id: impl Into<String>,
    changes: AuditChanges,
    actor: Option<&Actor>,
) -> AuditLog {
    let actor = actor.cloned().unwrap_or_default();

    AuditLog {
        id: RecordId::generate(),
        user_email: actor.email,
        user_name: actor.name,
        action,
        entity_type,
        entity_id: entity_id.into(),
        changes,
        timestamp: Timestamp::now(),
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ChangeSet;

    fn log(tag: u8) -> AuditLog {
        entry(
            AuditAction::CreateEvent,
            EntityType::Event,
            format!("event-{tag}"),
            AuditChanges::Diff(ChangeSet::default()),
            None,
        )
    }

    #[test]
    fn recent_is_most_recent_first_and_bounded() {
        let mut trail = AuditTrail::default();
        for tag in 0..5 {
            trail.append(log(tag));
        }

        let recent = trail.recent(3);
        assert_eq!(recent.len(), 3);
        assert_eq!(recent[0].entity_id, "event-4");
        assert_eq!(recent[2].entity_id, "event-2");
    }

    #[test]
    fn entry_defaults_to_system_principal() {
        let log = log(0);
        assert_eq!(log.user_email, crate::model::SYSTEM_ACTOR_EMAIL);
        assert_eq!(log.user_name, crate::model::SYSTEM_ACTOR_NAME);
    }

    #[test]
    fn entry_uses_supplied_actor() {
        let actor = Actor::new("lea@co.com", "Lea");
        let log = entry(
            AuditAction::DeleteEvent,
            EntityType::Event,
            "x",
            AuditChanges::Diff(ChangeSet::default()),
            Some(&actor),
        );
        assert_eq!(log.user_email, "lea@co.com");
    }

    #[test]
    fn contains_id_finds_appended_logs() {
        let mut trail = AuditTrail::default();
        let log = log(1);
        let id = log.id;
        trail.append(log);

        assert!(trail.contains_id(id));
        assert!(!trail.contains_id(RecordId::generate()));
    }
}
