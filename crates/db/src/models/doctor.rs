use bson::{DateTime, oid::ObjectId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Doctor {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// Owning user account. One profile per account (unique index).
    pub user_id: ObjectId,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub website: Option<String>,
    pub address: String,
    pub specialization: String,
    pub experience: String,
    pub fee_per_consultation: f64,
    /// Consultation hours as "HH:MM" strings, [from, to].
    pub timings: Vec<String>,
    #[serde(default)]
    pub status: DoctorStatus,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DoctorStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl DoctorStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DoctorStatus::Pending => "pending",
            DoctorStatus::Approved => "approved",
            DoctorStatus::Rejected => "rejected",
        }
    }
}

impl Doctor {
    pub const COLLECTION: &'static str = "doctors";

    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
