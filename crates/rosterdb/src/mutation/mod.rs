//! Optimistic edit state machine for one calendar cell.
//!
//! A cell is the events of one (interviewer, calendar-day) pair as a UI
//! would display them. A mutation applies to the cell's view-state first,
//! then runs against the store; on success the view is reconciled from the
//! store, on failure it reverts to the pre-mutation checkpoint. Rollback is
//! a compensating view action, never a cancellation of a store write: once
//! the store confirms an operation, it stands.

use crate::{
    error::Error,
    model::{Actor, EventDraft, EventPatch, EventStatus, InterviewEvent},
    obs,
    schedule::{ScheduleConfig, Scheduler},
    store::Store,
    types::{Date, RecordId, SlotTime, Timestamp},
};
use thiserror::Error as ThisError;

///
/// CellPhase
/// `Idle -> Pending -> {Committed, RolledBack}`.
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[remain::sorted]
pub enum CellPhase {
    Committed,
    #[default]
    Idle,
    Pending,
    RolledBack,
}

///
/// SlotView
/// What a cell renders per slot; a projection of [`InterviewEvent`].
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SlotView {
    pub id: RecordId,
    pub time: SlotTime,
    pub status: EventStatus,
}

impl From<&InterviewEvent> for SlotView {
    fn from(event: &InterviewEvent) -> Self {
        Self {
            id: event.id,
            time: event.slot(),
            status: event.status,
        }
    }
}

///
/// MutationIntent
///

#[derive(Clone, Debug)]
#[remain::sorted]
pub enum MutationIntent {
    /// Add a slot at a given time, or at the next free hour when `None`.
    AddSlot { time: Option<SlotTime> },
    DeleteSlot { id: RecordId },
    MoveSlot { id: RecordId, time: SlotTime },
    SetStatus { id: RecordId, status: EventStatus },
}

///
/// MutationError
/// A store rejection with a message fit for user-facing display.
///

#[derive(Debug, ThisError)]
#[error("{message}")]
pub struct MutationError {
    pub message: String,
    #[source]
    pub source: Error,
}

impl MutationError {
    fn from_store(source: Error) -> Self {
        let message = match &source {
            Error::Capacity { limit, .. } => {
                format!("this day is fully booked ({limit} slots max)")
            }
            Error::DuplicateKey { .. } => "that time is already taken".to_string(),
            Error::NotFound { .. } => "that slot no longer exists".to_string(),
            Error::Validation { message } => format!("that change is not allowed: {message}"),
            Error::Internal { .. } => "the store rejected the change unexpectedly".to_string(),
        };

        Self { message, source }
    }
}

///
/// CellState
///

#[derive(Clone, Debug)]
pub struct CellState {
    pub interviewer_email: String,
    pub day: Date,
    pub phase: CellPhase,
    pub slots: Vec<SlotView>,
    pub last_synced: Option<Timestamp>,
    /// Pre-mutation view, held only while a mutation is in flight.
    checkpoint: Option<Vec<SlotView>>,
}

impl CellState {
    /// Cell view of the store's current day partition, phase `Idle`.
    #[must_use]
    pub fn from_store(store: &Store, interviewer_email: impl Into<String>, day: Date) -> Self {
        let interviewer_email = interviewer_email.into();
        let slots = project(store, &interviewer_email, day);

        Self {
            interviewer_email,
            day,
            phase: CellPhase::Idle,
            slots,
            last_synced: None,
            checkpoint: None,
        }
    }

    /// Apply an intent to the view-state without consulting the store.
    /// Checkpoints the current view and moves to `Pending`. An optimistic
    /// `AddSlot` uses a placeholder id; commit replaces it with the real one.
    pub fn apply(&mut self, intent: &MutationIntent, config: &ScheduleConfig) {
        self.checkpoint = Some(self.slots.clone());
        self.phase = CellPhase::Pending;

        match intent {
            MutationIntent::AddSlot { time } => {
                let chosen = time.or_else(|| self.next_free_hour(config));
                if let Some(time) = chosen {
                    self.slots.push(SlotView {
                        id: RecordId::generate(),
                        time,
                        status: EventStatus::Pending,
                    });
                    self.slots.sort_by_key(|slot| slot.time);
                }
            }
            MutationIntent::DeleteSlot { id } => {
                self.slots.retain(|slot| slot.id != *id);
            }
            MutationIntent::MoveSlot { id, time } => {
                if let Some(slot) = self.slot_mut(*id) {
                    slot.time = *time;
                }
                self.slots.sort_by_key(|slot| slot.time);
            }
            MutationIntent::SetStatus { id, status } => {
                if let Some(slot) = self.slot_mut(*id) {
                    slot.status = *status;
                }
            }
        }
    }

    /// The store accepted the mutation: reconcile the view from the store
    /// (real ids, store-derived ordering), stamp `last_synced`, drop the
    /// checkpoint.
    pub fn commit(&mut self, store: &Store) {
        self.slots = project(store, &self.interviewer_email, self.day);
        self.phase = CellPhase::Committed;
        self.last_synced = Some(Timestamp::now());
        self.checkpoint = None;
    }

    /// The store rejected the mutation: restore the pre-mutation view.
    pub fn rollback(&mut self) {
        if let Some(previous) = self.checkpoint.take() {
            self.slots = previous;
        }
        self.phase = CellPhase::RolledBack;
    }

    fn slot_mut(&mut self, id: RecordId) -> Option<&mut SlotView> {
        self.slots.iter_mut().find(|slot| slot.id == id)
    }

    fn next_free_hour(&self, config: &ScheduleConfig) -> Option<SlotTime> {
        (config.open_hour..=config.close_hour)
            .filter_map(SlotTime::on_the_hour)
            .find(|candidate| self.slots.iter().all(|slot| slot.time != *candidate))
    }
}

///
/// MutationController
///
/// Single logical writer per cell. One call processes one intent to
/// completion; intents are never queued, coalesced, or debounced here.
///

pub struct MutationController<'a> {
    store: &'a mut Store,
}

impl<'a> MutationController<'a> {
    #[must_use]
    pub const fn new(store: &'a mut Store) -> Self {
        Self { store }
    }

    /// Apply `intent` to the cell optimistically, run it against the store,
    /// then commit or roll back the cell. The store error is wrapped with a
    /// display message and returned for user-facing notification.
    pub fn mutate(
        &mut self,
        cell: &mut CellState,
        intent: MutationIntent,
        actor: Option<&Actor>,
    ) -> Result<(), MutationError> {
        let config = self.store.schedule_config().clone();
        cell.apply(&intent, &config);

        let outcome = self.run(cell, &intent, &config, actor);

        match outcome {
            Ok(()) => {
                cell.commit(self.store);
                Ok(())
            }
            Err(err) => {
                obs::metrics::record(|ops| ops.rollbacks += 1);
                cell.rollback();
                Err(MutationError::from_store(err))
            }
        }
    }

    fn run(
        &mut self,
        cell: &CellState,
        intent: &MutationIntent,
        config: &ScheduleConfig,
        actor: Option<&Actor>,
    ) -> Result<(), Error> {
        match intent {
            MutationIntent::AddSlot { time: Some(time) } => {
                let start = Timestamp::from_date_slot(cell.day, *time);
                let end = start.plus_minutes(i64::from(config.slot_minutes));
                self.store
                    .create_event(EventDraft::new(&cell.interviewer_email, start, end), actor)
                    .map(|_| ())
            }
            MutationIntent::AddSlot { time: None } => Scheduler::new(self.store)
                .schedule_next(&cell.interviewer_email, cell.day, actor)
                .map(|_| ()),
            MutationIntent::DeleteSlot { id } => self.store.delete_event(*id, actor).map(|_| ()),
            MutationIntent::MoveSlot { id, time } => Scheduler::new(self.store)
                .move_slot(*id, *time, actor)
                .map(|_| ()),
            MutationIntent::SetStatus { id, status } => {
                let patch = EventPatch {
                    status: Some(*status),
                    ..Default::default()
                };
                self.store.update_event(*id, patch, actor).map(|_| ())
            }
        }
    }
}

fn project(store: &Store, interviewer_email: &str, day: Date) -> Vec<SlotView> {
    store
        .day_events(interviewer_email, day)
        .iter()
        .map(SlotView::from)
        .collect()
}

///
/// TESTS
///
