use crate::{
    error::Error,
    model::{Actor, AuditAction, AuditChanges, EntityType, EventDraft, EventPatch, InterviewEvent},
    obs, schedule,
    store::{Store, diff, table::Record},
    types::{Date, RecordId, Timestamp},
};

impl Record for InterviewEvent {
    const ENTITY: &'static str = "event";

    type Key = RecordId;

    fn id(&self) -> RecordId {
        self.id
    }

    fn key(&self) -> RecordId {
        self.id
    }
}

impl Store {
    /// Create an event. The interviewer foreign key, the time order, the
    /// scheduling window, the per-day cap, and the per-day duplicate start
    /// minute are all enforced here, so the day-partition invariants hold
    /// for every record in the collection.
    pub fn create_event(
        &mut self,
        draft: EventDraft,
        actor: Option<&Actor>,
    ) -> Result<InterviewEvent, Error> {
        obs::metrics::record(|ops| ops.save_calls += 1);

        draft.validate()?;
        if !self.interviewers.contains(&draft.interviewer_email) {
            return Err(Error::validation(format!(
                "interviewerEmail does not reference a known interviewer: {}",
                draft.interviewer_email
            )));
        }

        self.check_slot(
            &draft.interviewer_email,
            draft.start_time.date(),
            draft.start_time,
            None,
        )?;

        let record = InterviewEvent::from_draft(draft);
        let changes = diff::full(&record)?;

        self.events.insert(record.clone())?;

        self.record_audit(
            AuditAction::CreateEvent,
            EntityType::Event,
            record.id.to_string(),
            changes,
            actor,
        );
        self.touch();

        Ok(record)
    }

    /// Patch an event by id. Changing the start time re-derives the end
    /// time as `start + slot length` unless the patch supplies one, and
    /// re-runs the day-partition checks with this event excluded.
    pub fn update_event(
        &mut self,
        id: RecordId,
        patch: EventPatch,
        actor: Option<&Actor>,
    ) -> Result<InterviewEvent, Error> {
        obs::metrics::record(|ops| ops.save_calls += 1);

        let current = self
            .events
            .get(&id)
            .ok_or_else(|| Error::not_found("event", id.to_string()))?
            .clone();

        let mut merged = current.clone();
        self.merge_event_patch(&mut merged, patch, actor);

        if merged.end_time <= merged.start_time {
            return Err(Error::validation(format!(
                "event endTime must be after startTime ({} <= {})",
                merged.end_time, merged.start_time
            )));
        }
        if merged.start_time != current.start_time {
            self.check_slot(
                &merged.interviewer_email,
                merged.start_time.date(),
                merged.start_time,
                Some(id),
            )?;
        }

        let changes = diff::between(&current, &merged)?;
        if changes.is_empty() {
            return Ok(current);
        }

        merged.updated_at = Timestamp::now();
        self.events
            .modify(&id, |row| *row = merged.clone())
            .ok_or_else(|| Error::not_found("event", id.to_string()))?;

        self.record_audit(
            AuditAction::UpdateEvent,
            EntityType::Event,
            id.to_string(),
            AuditChanges::Diff(changes),
            actor,
        );
        self.touch();

        Ok(merged)
    }

    pub fn delete_event(
        &mut self,
        id: RecordId,
        actor: Option<&Actor>,
    ) -> Result<InterviewEvent, Error> {
        obs::metrics::record(|ops| ops.delete_calls += 1);

        let record = self
            .events
            .get(&id)
            .ok_or_else(|| Error::not_found("event", id.to_string()))?
            .clone();
        let changes = diff::full(&record)?;
        self.events.remove(&id);

        self.record_audit(
            AuditAction::DeleteEvent,
            EntityType::Event,
            id.to_string(),
            changes,
            actor,
        );
        self.touch();

        Ok(record)
    }

    #[must_use]
    pub fn get_event(&self, id: RecordId) -> Option<&InterviewEvent> {
        self.events.get(&id)
    }

    /// Full collection, sorted by start time for display.
    #[must_use]
    pub fn list_events(&self) -> Vec<InterviewEvent> {
        obs::metrics::record(|ops| ops.load_calls += 1);

        let mut records: Vec<InterviewEvent> = self.events.iter().cloned().collect();
        records.sort_by(|a, b| a.start_time.cmp(&b.start_time).then_with(|| a.id.cmp(&b.id)));

        records
    }

    /// The (interviewer, calendar-day) partition the scheduler operates on,
    /// sorted by start time.
    #[must_use]
    pub fn day_events(&self, interviewer_email: &str, day: Date) -> Vec<InterviewEvent> {
        let mut records: Vec<InterviewEvent> = self
            .events
            .iter()
            .filter(|event| event.interviewer_email == interviewer_email && event.day() == day)
            .cloned()
            .collect();
        records.sort_by(|a, b| a.start_time.cmp(&b.start_time));

        records
    }

    /// Day-partition invariants: scheduling window, per-day cap, and
    /// duplicate start minute. Cancelled events still count against the
    /// cap; a retracted commitment still occupied the calendar.
    fn check_slot(
        &self,
        interviewer_email: &str,
        day: Date,
        start: Timestamp,
        exclude: Option<RecordId>,
    ) -> Result<(), Error> {
        let slot = start.slot();
        if !schedule::within_window(slot, self.schedule_config()) {
            return Err(Error::validation(format!(
                "start time {slot} is outside the scheduling window"
            )));
        }

        let day_events = self.day_events(interviewer_email, day);
        let occupied = day_events
            .iter()
            .filter(|event| exclude != Some(event.id))
            .count();

        if occupied >= self.schedule_config().max_slots_per_day {
            obs::metrics::record(|ops| ops.capacity_rejections += 1);
            return Err(Error::capacity(
                "event",
                format!("{interviewer_email} {day}"),
                self.schedule_config().max_slots_per_day,
            ));
        }

        if schedule::is_duplicate_time(slot, &day_events, exclude) {
            obs::metrics::record(|ops| ops.unique_violations += 1);
            return Err(Error::duplicate_key(
                "event slot",
                format!("{interviewer_email} {day} {slot}"),
            ));
        }

        Ok(())
    }

    fn merge_event_patch(
        &self,
        merged: &mut InterviewEvent,
        patch: EventPatch,
        actor: Option<&Actor>,
    ) {
        if let Some(start) = patch.start_time {
            merged.start_time = start;
            merged.end_time = patch
                .end_time
                .unwrap_or_else(|| start.plus_minutes(i64::from(self.schedule.slot_minutes)));
        } else if let Some(end) = patch.end_time {
            merged.end_time = end;
        }

        if let Some(status) = patch.status {
            let leaving_pending = merged.status.is_pending() && !status.is_pending();
            merged.status = status;

            if leaving_pending {
                let marked_by = patch
                    .marked_by
                    .clone()
                    .unwrap_or_else(|| actor.cloned().unwrap_or_default().email);
                merged.marked_by = Some(marked_by);
                merged.marked_at = Some(Timestamp::now());
            }
        }

        if let Some(skills) = patch.skills_assessed {
            merged.skills_assessed = Some(skills);
        }
        if let Some(notes) = patch.notes {
            merged.notes = Some(notes);
        }
    }
}
