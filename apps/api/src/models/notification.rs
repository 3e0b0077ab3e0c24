use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    InterviewConfirmation,
    InterviewReminder,
    StatusUpdate,
    DecisionNotification,
    CustomMessage,
}

/// A composed candidate-facing message. Recorded and logged, not delivered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    pub kind: NotificationKind,
    pub recipient: String,
    pub subject: String,
    pub message: String,
    pub status: String,
    pub sent_at: DateTime<Utc>,
}
