use std::time::Duration;

use crate::router::Route;

pub const SUCCESS_DURATION: Duration = Duration::from_secs(3);
pub const ERROR_DURATION: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Error,
}

/// Transient message for the view. `duration` is how long it stays visible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
    pub duration: Duration,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Success,
            message: message.into(),
            duration: SUCCESS_DURATION,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            message: message.into(),
            duration: ERROR_DURATION,
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == NotificationLevel::Error
    }
}

/// Side-channel output of the store, consumed by the view.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreEvent {
    Navigate(Route),
    Notify(Notification),
}
