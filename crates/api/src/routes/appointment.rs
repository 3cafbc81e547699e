use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use bson::oid::ObjectId;
use mediq_db::models::{Appointment, AppointmentStatus};
use mediq_services::booking::parse_slot;
use serde::{Deserialize, Serialize};

use crate::{error::ApiError, extractors::auth::AuthUser, state::AppState};

#[derive(Debug, Deserialize)]
pub struct BookRequest {
    pub doctor_id: String,
    /// DD-MM-YYYY
    pub date: String,
    /// HH:MM
    pub time: String,
}

#[derive(Debug, Deserialize)]
pub struct AvailabilityRequest {
    pub doctor_id: String,
    pub date: String,
    pub time: String,
}

#[derive(Debug, Serialize)]
pub struct AvailabilityResponse {
    pub available: bool,
}

#[derive(Debug, Deserialize)]
pub struct StatusRequest {
    pub status: AppointmentStatus,
}

#[derive(Debug, Serialize)]
pub struct AppointmentResponse {
    pub id: String,
    pub user_id: String,
    pub doctor_id: String,
    pub date: String,
    pub time: String,
    pub status: String,
}

impl AppointmentResponse {
    pub fn from_model(a: Appointment) -> Self {
        Self {
            id: a.id.map(|id| id.to_hex()).unwrap_or_default(),
            user_id: a.user_id.to_hex(),
            doctor_id: a.doctor_id.to_hex(),
            date: a.date.to_chrono().format("%d-%m-%Y").to_string(),
            time: a.time.to_chrono().format("%H:%M").to_string(),
            status: a.status.as_str().to_string(),
        }
    }
}

pub async fn book(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<BookRequest>,
) -> Result<(StatusCode, Json<AppointmentResponse>), ApiError> {
    let doctor_id = ObjectId::parse_str(&body.doctor_id)
        .map_err(|_| ApiError::BadRequest("Invalid doctor_id".to_string()))?;
    let slot = parse_slot(&body.date, &body.time)?;

    let appointment = state
        .booking
        .book(auth.user_id, &auth.name, doctor_id, slot)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(AppointmentResponse::from_model(appointment)),
    ))
}

/// Availability probe. "Taken" is an answer here, not an error.
pub async fn check_availability(
    State(state): State<AppState>,
    _auth: AuthUser,
    Json(body): Json<AvailabilityRequest>,
) -> Result<Json<AvailabilityResponse>, ApiError> {
    let doctor_id = ObjectId::parse_str(&body.doctor_id)
        .map_err(|_| ApiError::BadRequest("Invalid doctor_id".to_string()))?;
    let slot = parse_slot(&body.date, &body.time)?;

    let available = state.booking.check_availability(doctor_id, slot).await?;
    Ok(Json(AvailabilityResponse { available }))
}

pub async fn list_mine(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<AppointmentResponse>>, ApiError> {
    let appointments = state.booking.appointments_for_patient(auth.user_id).await?;
    Ok(Json(
        appointments
            .into_iter()
            .map(AppointmentResponse::from_model)
            .collect(),
    ))
}

pub async fn set_status(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(appointment_id): Path<String>,
    Json(body): Json<StatusRequest>,
) -> Result<Json<AppointmentResponse>, ApiError> {
    let id = ObjectId::parse_str(&appointment_id)
        .map_err(|_| ApiError::BadRequest("Invalid appointment_id".to_string()))?;

    let appointment = state.booking.set_status(id, body.status).await?;
    Ok(Json(AppointmentResponse::from_model(appointment)))
}
