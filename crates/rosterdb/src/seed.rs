//! Demo roster for seeded stores.
//!
//! The roster is small on purpose: three interviewers covering every role,
//! and a handful of slots on the next two calendar days so the day grid has
//! something to show without being full.

use crate::{
    model::{EventDraft, InterviewEvent, Interviewer, InterviewerDraft, Role},
    types::{Date, SlotTime, Timestamp},
};

/// The demo interviewers and their events. Ids and timestamps are assigned
/// at call time; everything else is fixed.
#[must_use]
pub fn demo_roster() -> (Vec<Interviewer>, Vec<InterviewEvent>) {
    let interviewers = vec![
        interviewer(
            "Sarah Chen",
            "sarah.chen@roster.local",
            Role::Admin,
            &["system-design", "distributed-systems"],
        ),
        interviewer(
            "Miguel Torres",
            "miguel.torres@roster.local",
            Role::Talent,
            &["behavioral", "leadership"],
        ),
        interviewer(
            "Priya Nair",
            "priya.nair@roster.local",
            Role::Viewer,
            &["coding", "algorithms"],
        ),
    ];

    let today = Timestamp::now().date();
    let tomorrow = today.next_day().unwrap_or(today);

    let events = vec![
        event("sarah.chen@roster.local", today, 9),
        event("sarah.chen@roster.local", today, 11),
        event("miguel.torres@roster.local", today, 10),
        event("miguel.torres@roster.local", tomorrow, 9),
        event("priya.nair@roster.local", tomorrow, 14),
    ];

    (interviewers, events)
}

fn interviewer(name: &str, email: &str, role: Role, skills: &[&str]) -> Interviewer {
    let mut draft = InterviewerDraft::new(name, email, role);
    draft.skills = skills.iter().map(ToString::to_string).collect();
    draft.calendar_sync_enabled = role != Role::Viewer;

    Interviewer::from_draft(draft)
}

fn event(email: &str, day: Date, hour: u8) -> InterviewEvent {
    // Seed hours stay inside the default window, so the helper never fails.
    let slot = SlotTime::on_the_hour(hour).unwrap_or(SlotTime::MIDNIGHT);
    let start = Timestamp::from_date_slot(day, slot);

    InterviewEvent::from_draft(EventDraft::new(email, start, start.plus_minutes(60)))
}

///
/// TESTS
///
