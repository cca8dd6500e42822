//! Slot scheduling over one (interviewer, calendar-day) partition.
//!
//! The pure checks here are also what the store runs at its write gate, so
//! the day-partition invariants cannot drift between the two layers. The
//! [`Scheduler`] facade drives the store end to end: capacity gate, next
//! free slot, draft, create.

use crate::{
    error::Error,
    model::{Actor, EventDraft, EventPatch, InterviewEvent},
    store::Store,
    types::{Date, RecordId, SlotTime, Timestamp},
};
use serde::{Deserialize, Serialize};

///
/// ScheduleConfig
///
/// The scheduling window and per-day cap. The cap, not the window, is the
/// scarcity constraint: the default window admits 12 distinct hours but
/// only 3 slots may exist per interviewer per day.
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScheduleConfig {
    /// First schedulable hour, inclusive.
    pub open_hour: u8,
    /// Last schedulable hour, inclusive.
    pub close_hour: u8,
    pub slot_minutes: u32,
    pub max_slots_per_day: usize,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            open_hour: 9,
            close_hour: 20,
            slot_minutes: 60,
            max_slots_per_day: 3,
        }
    }
}

/// First whole-hour slot in the window not already taken, scanning in
/// ascending order. `None` means the entire window is occupied, which a
/// capacity-gated caller can never see under the default config.
#[must_use]
pub fn next_available_slot(
    day_events: &[InterviewEvent],
    config: &ScheduleConfig,
) -> Option<SlotTime> {
    let used: Vec<SlotTime> = day_events.iter().map(InterviewEvent::slot).collect();

    (config.open_hour..=config.close_hour)
        .filter_map(SlotTime::on_the_hour)
        .find(|slot| !used.contains(slot))
}

/// Whether any event in the partition other than `exclude` already starts
/// at `candidate`, at minute precision.
#[must_use]
pub fn is_duplicate_time(
    candidate: SlotTime,
    day_events: &[InterviewEvent],
    exclude: Option<RecordId>,
) -> bool {
    day_events
        .iter()
        .filter(|event| exclude != Some(event.id))
        .any(|event| event.slot() == candidate)
}

/// Whether another slot may be added to the partition. Status is ignored:
/// cancelled slots still occupy a capacity unit.
#[must_use]
pub fn has_capacity(day_events: &[InterviewEvent], config: &ScheduleConfig) -> bool {
    day_events.len() < config.max_slots_per_day
}

/// Whether a start time falls inside the scheduling window.
#[must_use]
pub const fn within_window(slot: SlotTime, config: &ScheduleConfig) -> bool {
    slot.hour() >= config.open_hour && slot.hour() <= config.close_hour
}

///
/// Scheduler
///

pub struct Scheduler<'a> {
    store: &'a mut Store,
}

impl<'a> Scheduler<'a> {
    #[must_use]
    pub const fn new(store: &'a mut Store) -> Self {
        Self { store }
    }

    /// Allocate the next free slot for an interviewer on a day: 60-minute
    /// duration, `pending` status.
    pub fn schedule_next(
        &mut self,
        interviewer_email: &str,
        day: Date,
        actor: Option<&Actor>,
    ) -> Result<InterviewEvent, Error> {
        let config = self.store.schedule_config().clone();
        let day_events = self.store.day_events(interviewer_email, day);

        if !has_capacity(&day_events, &config) {
            return Err(Error::capacity(
                "event",
                format!("{interviewer_email} {day}"),
                config.max_slots_per_day,
            ));
        }

        let slot = next_available_slot(&day_events, &config).ok_or_else(|| {
            Error::internal("scheduling window exhausted below the per-day cap")
        })?;

        let start = Timestamp::from_date_slot(day, slot);
        let end = start.plus_minutes(i64::from(config.slot_minutes));

        self.store
            .create_event(EventDraft::new(interviewer_email, start, end), actor)
    }

    /// Move an existing slot to a new start time on the same day. The end
    /// time is re-derived and the duplicate-time check re-runs in the store
    /// with this event excluded.
    pub fn move_slot(
        &mut self,
        id: RecordId,
        new_time: SlotTime,
        actor: Option<&Actor>,
    ) -> Result<InterviewEvent, Error> {
        let day = self
            .store
            .get_event(id)
            .ok_or_else(|| Error::not_found("event", id.to_string()))?
            .day();

        let patch = EventPatch {
            start_time: Some(Timestamp::from_date_slot(day, new_time)),
            ..Default::default()
        };

        self.store.update_event(id, patch, actor)
    }
}

///
/// TESTS
///
