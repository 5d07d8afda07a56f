use crate::dtos::ReminderDTO;
use remindme_domain::{Reminder, ID};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderResponse {
    pub reminder: ReminderDTO,
}

impl ReminderResponse {
    pub fn new(reminder: Reminder) -> Self {
        Self {
            reminder: ReminderDTO::new(reminder),
        }
    }
}

pub mod create_reminder {
    use super::*;

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub title: String,
        pub description: Option<String>,
        /// Fire time as epoch milliseconds
        pub fire_at: i64,
    }

    pub type APIResponse = ReminderResponse;
}

pub mod get_reminder {
    use super::*;

    #[derive(Serialize, Deserialize)]
    pub struct PathParams {
        pub reminder_id: ID,
    }

    pub type APIResponse = ReminderResponse;
}

pub mod get_reminders {
    use super::*;

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub reminders: Vec<ReminderDTO>,
    }

    impl APIResponse {
        pub fn new(reminders: Vec<Reminder>) -> Self {
            Self {
                reminders: reminders.into_iter().map(ReminderDTO::new).collect(),
            }
        }
    }
}

pub mod delete_reminder {
    use super::*;

    #[derive(Serialize, Deserialize)]
    pub struct PathParams {
        pub reminder_id: ID,
    }

    pub type APIResponse = ReminderResponse;
}
