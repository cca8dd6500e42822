use crate::{
    error::Error,
    types::{Date, RecordId, SlotTime, Timestamp},
};
use serde::{Deserialize, Serialize};

///
/// InterviewEvent
///
/// One scheduled interview slot. `interviewer_email` is a foreign key into
/// the interviewer collection, validated at creation time only, and is
/// immutable after creation.
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewEvent {
    pub id: RecordId,
    pub interviewer_email: String,
    pub start_time: Timestamp,
    pub end_time: Timestamp,
    pub status: EventStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skills_assessed: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Who moved the slot out of `pending`, stamped by the store.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marked_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marked_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl InterviewEvent {
    pub(crate) fn from_draft(draft: EventDraft) -> Self {
        let now = Timestamp::now();

        Self {
            id: RecordId::generate(),
            interviewer_email: draft.interviewer_email,
            start_time: draft.start_time,
            end_time: draft.end_time,
            status: draft.status,
            skills_assessed: draft.skills_assessed,
            notes: draft.notes,
            marked_by: None,
            marked_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Calendar day this slot belongs to (one partition of the day grid).
    #[must_use]
    pub fn day(&self) -> Date {
        self.start_time.date()
    }

    /// Start time at minute precision, the unit of conflict checking.
    #[must_use]
    pub fn slot(&self) -> SlotTime {
        self.start_time.slot()
    }
}

///
/// EventStatus
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
#[remain::sorted]
pub enum EventStatus {
    Attended,
    Cancelled,
    Ghosted,
    #[default]
    Pending,
}

impl EventStatus {
    #[must_use]
    pub const fn is_pending(self) -> bool {
        matches!(self, Self::Pending)
    }
}

///
/// EventDraft
///

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct EventDraft {
    pub interviewer_email: String,
    pub start_time: Timestamp,
    pub end_time: Timestamp,
    #[serde(default)]
    pub status: EventStatus,
    #[serde(default)]
    pub skills_assessed: Option<Vec<String>>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl EventDraft {
    #[must_use]
    pub fn new(interviewer_email: impl Into<String>, start: Timestamp, end: Timestamp) -> Self {
        Self {
            interviewer_email: interviewer_email.into(),
            start_time: start,
            end_time: end,
            status: EventStatus::Pending,
            skills_assessed: None,
            notes: None,
        }
    }

    pub(crate) fn validate(&self) -> Result<(), Error> {
        if self.interviewer_email.trim().is_empty() {
            return Err(Error::validation("event interviewerEmail must not be empty"));
        }
        if self.end_time <= self.start_time {
            return Err(Error::validation(format!(
                "event endTime must be after startTime ({} <= {})",
                self.end_time, self.start_time
            )));
        }

        Ok(())
    }
}

///
/// EventPatch
///
/// `interviewer_email` is deliberately absent: a slot stays with the
/// interviewer it was created for.
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct EventPatch {
    pub start_time: Option<Timestamp>,
    pub end_time: Option<Timestamp>,
    pub status: Option<EventStatus>,
    pub skills_assessed: Option<Vec<String>>,
    pub notes: Option<String>,
    /// Caller identity for a status transition; falls back to the audit actor.
    pub marked_by: Option<String>,
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> EventDraft {
        EventDraft::new(
            "ana@co.com",
            Timestamp::parse("2026-03-02T10:00:00Z").unwrap(),
            Timestamp::parse("2026-03-02T11:00:00Z").unwrap(),
        )
    }

    #[test]
    fn draft_validates_time_order() {
        let mut bad = draft();
        bad.end_time = bad.start_time;
        assert!(bad.validate().unwrap_err().is_validation());

        assert!(draft().validate().is_ok());
    }

    #[test]
    fn day_and_slot_derive_from_start() {
        let event = InterviewEvent::from_draft(draft());
        assert_eq!(event.day().to_string(), "2026-03-02");
        assert_eq!(event.slot().to_string(), "10:00");
    }

    #[test]
    fn status_defaults_to_pending() {
        let event = InterviewEvent::from_draft(draft());
        assert!(event.status.is_pending());
        assert!(event.marked_by.is_none());
        assert!(event.marked_at.is_none());
    }

    #[test]
    fn patch_rejects_interviewer_reassignment() {
        let result: Result<EventPatch, _> =
            serde_json::from_str(r#"{"interviewerEmail":"other@co.com"}"#);

        assert!(result.is_err());
    }

    #[test]
    fn status_serde_is_lowercase() {
        assert_eq!(
            serde_json::to_string(&EventStatus::Ghosted).unwrap(),
            "\"ghosted\""
        );
    }
}
