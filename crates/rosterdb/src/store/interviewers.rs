use crate::{
    error::Error,
    model::{
        Actor, AuditAction, AuditChanges, EntityType, Interviewer, InterviewerDraft,
        InterviewerPatch,
    },
    obs,
    store::{Store, diff, table::Record},
    types::{RecordId, Timestamp},
};

impl Record for Interviewer {
    const ENTITY: &'static str = "interviewer";

    type Key = String;

    fn id(&self) -> RecordId {
        self.id
    }

    fn key(&self) -> String {
        self.email.clone()
    }
}

impl Store {
    /// Create an interviewer; the store assigns id and timestamps.
    /// Rejects an already-registered email with `DuplicateKey`.
    pub fn create_interviewer(
        &mut self,
        draft: InterviewerDraft,
        actor: Option<&Actor>,
    ) -> Result<Interviewer, Error> {
        obs::metrics::record(|ops| ops.save_calls += 1);

        draft.validate()?;
        let record = Interviewer::from_draft(draft);
        let changes = diff::full(&record)?;

        self.interviewers.insert(record.clone()).inspect_err(|_| {
            obs::metrics::record(|ops| ops.unique_violations += 1);
        })?;

        self.record_audit(
            AuditAction::CreateInterviewer,
            EntityType::Interviewer,
            record.id.to_string(),
            changes,
            actor,
        );
        self.touch();

        Ok(record)
    }

    /// Patch an interviewer by email. The diff is restricted to fields the
    /// patch actually changed; an empty diff writes nothing and emits no
    /// audit entry.
    pub fn update_interviewer(
        &mut self,
        email: &str,
        patch: InterviewerPatch,
        actor: Option<&Actor>,
    ) -> Result<Interviewer, Error> {
        obs::metrics::record(|ops| ops.save_calls += 1);

        patch.validate()?;

        let key = email.to_string();
        let current = self
            .interviewers
            .get(&key)
            .ok_or_else(|| Error::not_found("interviewer", email))?
            .clone();

        let mut merged = current.clone();
        merged.apply(patch);

        let changes = diff::between(&current, &merged)?;
        if changes.is_empty() {
            return Ok(current);
        }

        merged.updated_at = Timestamp::now();
        self.interviewers
            .modify(&key, |row| *row = merged.clone())
            .ok_or_else(|| Error::not_found("interviewer", email))?;

        self.record_audit(
            AuditAction::UpdateInterviewer,
            EntityType::Interviewer,
            merged.id.to_string(),
            AuditChanges::Diff(changes),
            actor,
        );
        self.touch();

        Ok(merged)
    }

    /// Delete an interviewer and cascade-delete every event referencing its
    /// email. One audit entry is written for the interviewer; cascaded
    /// events do not log individually.
    pub fn delete_interviewer(
        &mut self,
        email: &str,
        actor: Option<&Actor>,
    ) -> Result<Interviewer, Error> {
        obs::metrics::record(|ops| ops.delete_calls += 1);

        let key = email.to_string();
        let record = self
            .interviewers
            .get(&key)
            .ok_or_else(|| Error::not_found("interviewer", email))?
            .clone();
        let changes = diff::full(&record)?;
        self.interviewers.remove(&key);

        let cascaded = self
            .events
            .drain_matching(|event| event.interviewer_email == record.email);
        obs::metrics::record(|ops| ops.cascade_deletes += cascaded.len() as u64);

        self.record_audit(
            AuditAction::DeleteInterviewer,
            EntityType::Interviewer,
            record.id.to_string(),
            changes,
            actor,
        );
        self.touch();

        Ok(record)
    }

    #[must_use]
    pub fn get_interviewer(&self, email: &str) -> Option<&Interviewer> {
        self.interviewers.get(&email.to_string())
    }

    /// Full collection, sorted by name for display.
    #[must_use]
    pub fn list_interviewers(&self) -> Vec<Interviewer> {
        obs::metrics::record(|ops| ops.load_calls += 1);

        let mut records: Vec<Interviewer> = self.interviewers.iter().cloned().collect();
        records.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.email.cmp(&b.email)));

        records
    }
}
