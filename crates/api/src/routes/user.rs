use axum::{Json, extract::State};
use mediq_db::models::{Notification, User};
use serde::Serialize;

use crate::{error::ApiError, extractors::auth::AuthUser, state::AppState};

#[derive(Debug, Serialize)]
pub struct NotificationResponse {
    pub notification_type: String,
    pub message: String,
    pub on_click_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
    pub created_at: String,
}

#[derive(Debug, Serialize)]
pub struct InboxResponse {
    pub unseen: Vec<NotificationResponse>,
    pub seen: Vec<NotificationResponse>,
}

impl NotificationResponse {
    fn from_model(n: Notification) -> Self {
        Self {
            notification_type: n.notification_type.as_str().to_string(),
            message: n.message,
            on_click_path: n.on_click_path,
            data: n
                .data
                .map(|d| serde_json::to_value(&d).unwrap_or(serde_json::Value::Null)),
            created_at: n.created_at.try_to_rfc3339_string().unwrap_or_default(),
        }
    }
}

fn inbox_of(user: User) -> InboxResponse {
    InboxResponse {
        unseen: user
            .unseen_notifications
            .into_iter()
            .map(NotificationResponse::from_model)
            .collect(),
        seen: user
            .seen_notifications
            .into_iter()
            .map(NotificationResponse::from_model)
            .collect(),
    }
}

pub async fn list_notifications(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<InboxResponse>, ApiError> {
    let user = state.users.base.find_by_id(auth.user_id).await?;
    Ok(Json(inbox_of(user)))
}

pub async fn mark_all_seen(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<InboxResponse>, ApiError> {
    let user = state.users.mark_all_notifications_seen(auth.user_id).await?;
    Ok(Json(inbox_of(user)))
}

pub async fn clear_all(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<InboxResponse>, ApiError> {
    let user = state.users.clear_notifications(auth.user_id).await?;
    Ok(Json(inbox_of(user)))
}
