use bson::{DateTime, Document};
use serde::{Deserialize, Serialize};

/// An inbox event embedded in a user document. Immutable once created;
/// it only moves between the unseen and seen sequences.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub notification_type: NotificationType,
    pub message: String,
    pub on_click_path: String,
    /// Event-specific payload (e.g. the doctor id behind an application).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Document>,
    pub created_at: DateTime,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum NotificationType {
    NewDoctorRequest,
    NewAppointmentRequest,
    AppointmentStatusChanged,
    DoctorAccountRequestChanged,
}

impl NotificationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationType::NewDoctorRequest => "new-doctor-request",
            NotificationType::NewAppointmentRequest => "new-appointment-request",
            NotificationType::AppointmentStatusChanged => "appointment-status-changed",
            NotificationType::DoctorAccountRequestChanged => "doctor-account-request-changed",
        }
    }
}
