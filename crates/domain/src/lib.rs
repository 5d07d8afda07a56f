pub mod date;
mod notification;
mod reminder;
mod shared;
mod work;

pub use notification::{
    reminder_channel, Notification, NotificationChannel, NotificationPriority, TapAction,
    REMINDER_CHANNEL_ID,
};
pub use reminder::Reminder;
pub use shared::entity::{Entity, InvalidIDError, ID};
pub use work::{
    reminder_work_tag, PayloadValue, WorkPayload, DESCRIPTION_KEY, ID_KEY, TITLE_KEY,
};
