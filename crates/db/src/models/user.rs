use bson::{DateTime, oid::ObjectId};
use serde::{Deserialize, Serialize};

use super::notification::Notification;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password_hash: Option<String>,
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default)]
    pub is_doctor: bool,
    /// Inbox partition: unacknowledged events, oldest first.
    #[serde(default)]
    pub unseen_notifications: Vec<Notification>,
    /// Acknowledged history, oldest first. Only ever appended to (by
    /// marking unseen as seen) or emptied wholesale.
    #[serde(default)]
    pub seen_notifications: Vec<Notification>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl User {
    pub const COLLECTION: &'static str = "users";
}
