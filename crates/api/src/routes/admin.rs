use axum::{
    Json,
    extract::{Path, Query, State},
};
use bson::{doc, oid::ObjectId};
use mediq_db::models::DoctorStatus;
use serde::{Deserialize, Serialize};

use crate::{error::ApiError, extractors::auth::AdminUser, state::AppState};
use mediq_services::dao::base::PaginationParams;

use super::doctor::DoctorResponse;

#[derive(Debug, Serialize)]
pub struct UserSummaryResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub is_admin: bool,
    pub is_doctor: bool,
}

#[derive(Debug, Deserialize)]
pub struct DecideRequest {
    pub status: DoctorStatus,
}

pub async fn list_users(
    State(state): State<AppState>,
    _admin: AdminUser,
    Query(params): Query<PaginationParams>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let result = state
        .users
        .base
        .find_paginated(doc! {}, Some(doc! { "created_at": -1 }), &params)
        .await?;

    let items: Vec<UserSummaryResponse> = result
        .items
        .into_iter()
        .map(|u| UserSummaryResponse {
            id: u.id.map(|id| id.to_hex()).unwrap_or_default(),
            name: u.name,
            email: u.email,
            is_admin: u.is_admin,
            is_doctor: u.is_doctor,
        })
        .collect();

    Ok(Json(serde_json::json!({
        "items": items,
        "total": result.total,
        "page": result.page,
        "per_page": result.per_page,
        "total_pages": result.total_pages,
    })))
}

pub async fn list_doctors(
    State(state): State<AppState>,
    _admin: AdminUser,
    Query(params): Query<PaginationParams>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let result = state
        .doctors
        .base
        .find_paginated(doc! {}, Some(doc! { "created_at": -1 }), &params)
        .await?;

    let items: Vec<DoctorResponse> = result
        .items
        .into_iter()
        .map(DoctorResponse::from_model)
        .collect();

    Ok(Json(serde_json::json!({
        "items": items,
        "total": result.total,
        "page": result.page,
        "per_page": result.per_page,
        "total_pages": result.total_pages,
    })))
}

/// Approve or reject a doctor application.
pub async fn decide_doctor(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(doctor_id): Path<String>,
    Json(body): Json<DecideRequest>,
) -> Result<Json<DoctorResponse>, ApiError> {
    let id = ObjectId::parse_str(&doctor_id)
        .map_err(|_| ApiError::BadRequest("Invalid doctor_id".to_string()))?;

    let doctor = state.approval.decide(id, body.status).await?;
    Ok(Json(DoctorResponse::from_model(doctor)))
}
