//! Full-store export and duplicate-skipping import.
//!
//! `import_merge` is additive: existing records win, incoming duplicates
//! are counted and skipped, never overwritten. `Store::reseed` is the
//! destructive counterpart.

use crate::{
    error::Error,
    model::{AuditLog, InterviewEvent, Interviewer},
    obs,
    store::{Store, table::Record},
};
use serde::{Deserialize, Serialize};

///
/// Snapshot
/// Deep, independent copy of the whole store; JSON-serializable backup.
///

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub interviewers: Vec<Interviewer>,
    pub events: Vec<InterviewEvent>,
    pub audit_logs: Vec<AuditLog>,
}

impl Snapshot {
    pub fn to_json(&self) -> Result<String, Error> {
        serde_json::to_string_pretty(self)
            .map_err(|err| Error::internal(format!("snapshot serialization: {err}")))
    }

    pub fn from_json(json: &str) -> Result<Self, Error> {
        serde_json::from_str(json)
            .map_err(|err| Error::validation(format!("malformed snapshot: {err}")))
    }
}

impl From<Snapshot> for SnapshotPatch {
    fn from(snapshot: Snapshot) -> Self {
        Self {
            interviewers: Some(snapshot.interviewers),
            events: Some(snapshot.events),
            audit_logs: Some(snapshot.audit_logs),
        }
    }
}

///
/// SnapshotPatch
/// Partial snapshot for import; any subset of the collections.
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct SnapshotPatch {
    pub interviewers: Option<Vec<Interviewer>>,
    pub events: Option<Vec<InterviewEvent>>,
    pub audit_logs: Option<Vec<AuditLog>>,
}

impl SnapshotPatch {
    const fn is_structurally_empty(&self) -> bool {
        self.interviewers.is_none() && self.events.is_none() && self.audit_logs.is_none()
    }
}

///
/// MergeCounts
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MergeCounts {
    pub interviewers: u64,
    pub events: u64,
    pub audit_logs: u64,
}

impl MergeCounts {
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.interviewers + self.events + self.audit_logs
    }
}

///
/// MergeOutcome
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MergeOutcome {
    pub imported: MergeCounts,
    pub skipped: MergeCounts,
}

impl Store {
    /// Deep copy of the whole store. Mutating the result does not affect
    /// the store; collections use their display orderings.
    #[must_use]
    pub fn export_snapshot(&self) -> Snapshot {
        Snapshot {
            interviewers: self.list_interviewers(),
            events: self.list_events(),
            audit_logs: self.audit.iter().cloned().collect(),
        }
    }

    /// Merge external records into the store, skipping duplicates by
    /// natural key (email for interviewers, id for events and audit logs).
    /// Per-record duplicates are counted, never errors; only input with no
    /// recognized collection at all is rejected. Imported events are not
    /// checked against the interviewer collection (permissive import), and
    /// no per-record audit entries are written; callers log the import as
    /// an out-of-band action via [`Store::append_audit`].
    pub fn import_merge(&mut self, patch: SnapshotPatch) -> Result<MergeOutcome, Error> {
        if patch.is_structurally_empty() {
            return Err(Error::validation(
                "snapshot import carries no recognized collection",
            ));
        }

        let mut outcome = MergeOutcome::default();

        for record in patch.interviewers.unwrap_or_default() {
            if self.interviewers.contains(&record.key()) || self.interviewers.contains_id(record.id)
            {
                outcome.skipped.interviewers += 1;
            } else {
                self.interviewers.insert(record)?;
                outcome.imported.interviewers += 1;
            }
        }

        for record in patch.events.unwrap_or_default() {
            if self.events.contains_id(record.id) {
                outcome.skipped.events += 1;
            } else {
                self.events.insert(record)?;
                outcome.imported.events += 1;
            }
        }

        for log in patch.audit_logs.unwrap_or_default() {
            if self.audit.contains_id(log.id) {
                outcome.skipped.audit_logs += 1;
            } else {
                self.audit.append_existing(log);
                outcome.imported.audit_logs += 1;
            }
        }

        obs::metrics::record(|ops| {
            ops.merge_imported += outcome.imported.total();
            ops.merge_skipped += outcome.skipped.total();
        });

        if outcome.imported.total() > 0 {
            self.touch();
        }

        Ok(outcome)
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures;
    use time::macros::date;

    fn populated_store() -> Store {
        let mut store = test_fixtures::store_with_interviewer("ana@co.com");
        let mut scheduler = crate::schedule::Scheduler::new(&mut store);
        scheduler
            .schedule_next("ana@co.com", date!(2026 - 03 - 02), None)
            .unwrap();

        store
    }

    #[test]
    fn export_is_a_deep_copy() {
        let store = populated_store();
        let mut snapshot = store.export_snapshot();
        snapshot.interviewers[0].name = "Mallory".into();

        assert_ne!(store.list_interviewers()[0].name, "Mallory");
    }

    #[test]
    fn round_trip_into_empty_store_imports_everything() {
        let source = populated_store();
        let snapshot = source.export_snapshot();

        let mut target = Store::new();
        let outcome = target.import_merge(snapshot.clone().into()).unwrap();

        assert_eq!(outcome.imported.interviewers as usize, snapshot.interviewers.len());
        assert_eq!(outcome.imported.events as usize, snapshot.events.len());
        assert_eq!(outcome.imported.audit_logs as usize, snapshot.audit_logs.len());
        assert_eq!(outcome.skipped, MergeCounts::default());
    }

    #[test]
    fn second_import_skips_every_record() {
        let source = populated_store();
        let snapshot = source.export_snapshot();

        let mut target = Store::new();
        target.import_merge(snapshot.clone().into()).unwrap();
        let second = target.import_merge(snapshot.clone().into()).unwrap();

        assert_eq!(second.imported, MergeCounts::default());
        assert_eq!(second.skipped.interviewers as usize, snapshot.interviewers.len());
        assert_eq!(second.skipped.events as usize, snapshot.events.len());
        assert_eq!(second.skipped.audit_logs as usize, snapshot.audit_logs.len());
    }

    #[test]
    fn import_preserves_supplied_ids_and_timestamps() {
        let source = populated_store();
        let snapshot = source.export_snapshot();
        let original = snapshot.interviewers[0].clone();

        let mut target = Store::new();
        target.import_merge(snapshot.into()).unwrap();

        let imported = target.get_interviewer(&original.email).unwrap();
        assert_eq!(imported.id, original.id);
        assert_eq!(imported.created_at, original.created_at);
    }

    #[test]
    fn import_does_not_validate_event_foreign_keys() {
        let mut event_source = test_fixtures::store_with_interviewer("ghost@co.com");
        let mut scheduler = crate::schedule::Scheduler::new(&mut event_source);
        scheduler
            .schedule_next("ghost@co.com", date!(2026 - 03 - 02), None)
            .unwrap();

        let mut target = Store::new();
        let patch = SnapshotPatch {
            events: Some(event_source.export_snapshot().events),
            ..Default::default()
        };
        let outcome = target.import_merge(patch).unwrap();

        assert_eq!(outcome.imported.events, 1);
        assert_eq!(target.interviewer_count(), 0);
    }

    #[test]
    fn structurally_empty_input_is_rejected() {
        let mut store = Store::new();
        let err = store.import_merge(SnapshotPatch::default()).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn merge_carries_audit_history_without_new_entries() {
        let source = populated_store();
        let snapshot = source.export_snapshot();

        let mut target = Store::new();
        target.import_merge(snapshot.clone().into()).unwrap();

        assert_eq!(target.audit_count(), snapshot.audit_logs.len());
    }

    #[test]
    fn json_round_trip() {
        let snapshot = populated_store().export_snapshot();
        let json = snapshot.to_json().unwrap();
        let back = Snapshot::from_json(&json).unwrap();

        assert_eq!(snapshot, back);
    }

    #[test]
    fn malformed_json_is_a_validation_error() {
        assert!(Snapshot::from_json("{not json").unwrap_err().is_validation());
    }
}
