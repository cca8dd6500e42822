//! Shared fixtures for unit tests.

use crate::{
    model::{EventDraft, InterviewEvent, InterviewerDraft, Role},
    store::Store,
    types::{Date, SlotTime, Timestamp},
};

/// A standalone pending event at `hour:00` on `day`, 60 minutes long.
/// Built directly from a draft, bypassing the store's slot checks.
pub fn event_at(email: &str, day: Date, hour: u8) -> InterviewEvent {
    let slot = SlotTime::on_the_hour(hour).expect("fixture hour out of range");
    let start = Timestamp::from_date_slot(day, slot);

    InterviewEvent::from_draft(EventDraft::new(email, start, start.plus_minutes(60)))
}

/// A fresh store holding one talent interviewer with the given email.
pub fn store_with_interviewer(email: &str) -> Store {
    let mut store = Store::new();
    store
        .create_interviewer(InterviewerDraft::new("Ana Lopes", email, Role::Talent), None)
        .expect("fixture interviewer");

    store
}
