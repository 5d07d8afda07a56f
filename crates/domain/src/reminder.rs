use crate::shared::entity::{Entity, ID};
use chrono::NaiveDateTime;

/// A `Reminder` represents something the user wants to be notified
/// about at `fire_at`.
///
/// `fire_at` is a wall-clock date and time in the time zone that was
/// active when the reminder was scheduled. The zone itself is not
/// recorded, so a zone change between scheduling and firing shifts the
/// effective delay. That is a known limitation and deliberately not
/// corrected.
#[derive(Debug, Clone, PartialEq)]
pub struct Reminder {
    /// Store-assigned identifier, `ID::UNASSIGNED` until persisted
    pub id: ID,
    /// What to remind about, must be non-blank. Enforced by the
    /// creation flow, not the store.
    pub title: String,
    /// Optional longer text shown in the notification body
    pub description: String,
    /// The local date and time at which the notification should be shown
    pub fire_at: NaiveDateTime,
}

impl Entity for Reminder {
    fn id(&self) -> ID {
        self.id
    }
}
