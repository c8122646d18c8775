//! Notification types emitted by the orchestration layer

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Envelope wrapping all notifications with metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationEnvelope {
    /// Unique notification ID
    pub id: Uuid,
    /// Tenant the notification belongs to
    pub tenant_id: Uuid,
    /// When the notification was emitted
    pub timestamp: DateTime<Utc>,
    /// The actual notification
    pub notification: Notification,
}

impl NotificationEnvelope {
    pub fn new(tenant_id: Uuid, notification: Notification) -> Self {
        Self {
            id: Uuid::new_v4(),
            tenant_id,
            timestamp: Utc::now(),
            notification,
        }
    }
}

/// All notifications the orchestration layer emits
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Notification {
    /// A batch item enrolled a student in a module
    #[serde(rename = "enrollment.created")]
    EnrollmentCreated {
        enrollment_id: Uuid,
        student_id: Uuid,
        module_id: Uuid,
        batch_id: Uuid,
    },

    /// A student withdrew from a module
    #[serde(rename = "enrollment.withdrawn")]
    EnrollmentWithdrawn {
        enrollment_id: Uuid,
        student_id: Uuid,
        module_id: Uuid,
    },

    /// An anchored chat session opened
    #[serde(rename = "chat.session_started")]
    ChatSessionStarted {
        session_id: Uuid,
        student_id: Uuid,
        bibliography_item_id: Uuid,
    },

    /// A chat session reached a terminal state
    #[serde(rename = "chat.session_ended")]
    ChatSessionEnded { session_id: Uuid, status: String },
}
