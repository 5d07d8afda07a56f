use crate::shared::entity::ID;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Payload key for the reminder id
pub const ID_KEY: &str = "id";
/// Payload key for the reminder title
pub const TITLE_KEY: &str = "title";
/// Payload key for the reminder description
pub const DESCRIPTION_KEY: &str = "description";

/// Tag identifying all deferred work belonging to one reminder.
///
/// The tag is a deterministic function of the reminder id rather than
/// an opaque work handle, so cancellation keeps working after a process
/// restart when no in-memory state from scheduling time survives.
pub fn reminder_work_tag(reminder_id: ID) -> String {
    format!("reminder_{}", reminder_id)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PayloadValue {
    Int(i64),
    Str(String),
}

/// Flat string/int map travelling with a deferred work item.
///
/// A work item may fire after the scheduling process is gone, so
/// everything the delivery worker needs has to be carried here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkPayload(HashMap<String, PayloadValue>);

impl WorkPayload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_int(&mut self, key: &str, value: i64) {
        self.0.insert(key.to_string(), PayloadValue::Int(value));
    }

    pub fn set_str(&mut self, key: &str, value: &str) {
        self.0
            .insert(key.to_string(), PayloadValue::Str(value.to_string()));
    }

    pub fn get_int(&self, key: &str) -> Option<i64> {
        match self.0.get(key) {
            Some(PayloadValue::Int(value)) => Some(*value),
            _ => None,
        }
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        match self.0.get(key) {
            Some(PayloadValue::Str(value)) => Some(value),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn work_tag_is_derived_from_the_id() {
        let id = ID::try_from(5).expect("Valid id");
        assert_eq!(reminder_work_tag(id), "reminder_5");
    }

    #[test]
    fn payload_values_are_typed() {
        let mut payload = WorkPayload::new();
        payload.set_int(ID_KEY, 5);
        payload.set_str(TITLE_KEY, "Buy milk");

        assert_eq!(payload.get_int(ID_KEY), Some(5));
        assert_eq!(payload.get_str(TITLE_KEY), Some("Buy milk"));
        // Wrong type or missing key yields nothing
        assert_eq!(payload.get_str(ID_KEY), None);
        assert_eq!(payload.get_int(DESCRIPTION_KEY), None);
    }
}
