use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use bson::oid::ObjectId;
use mediq_db::models::Doctor;
use mediq_services::dao::doctor::DoctorProfile;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{error::ApiError, extractors::auth::AuthUser, state::AppState};

use super::appointment::AppointmentResponse;

#[derive(Debug, Deserialize, Validate)]
pub struct DoctorProfileRequest {
    #[validate(length(min = 1))]
    pub first_name: String,
    #[validate(length(min = 1))]
    pub last_name: String,
    #[validate(length(min = 1))]
    pub phone_number: String,
    pub website: Option<String>,
    pub address: String,
    pub specialization: String,
    pub experience: String,
    #[validate(range(min = 0.0))]
    pub fee_per_consultation: f64,
    pub timings: Vec<String>,
}

impl DoctorProfileRequest {
    fn into_profile(self) -> DoctorProfile {
        DoctorProfile {
            first_name: self.first_name,
            last_name: self.last_name,
            phone_number: self.phone_number,
            website: self.website,
            address: self.address,
            specialization: self.specialization,
            experience: self.experience,
            fee_per_consultation: self.fee_per_consultation,
            timings: self.timings,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DoctorResponse {
    pub id: String,
    pub user_id: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub website: Option<String>,
    pub address: String,
    pub specialization: String,
    pub experience: String,
    pub fee_per_consultation: f64,
    pub timings: Vec<String>,
    pub status: String,
}

impl DoctorResponse {
    pub fn from_model(d: Doctor) -> Self {
        Self {
            id: d.id.map(|id| id.to_hex()).unwrap_or_default(),
            user_id: d.user_id.to_hex(),
            first_name: d.first_name,
            last_name: d.last_name,
            phone_number: d.phone_number,
            website: d.website,
            address: d.address,
            specialization: d.specialization,
            experience: d.experience,
            fee_per_consultation: d.fee_per_consultation,
            timings: d.timings,
            status: d.status.as_str().to_string(),
        }
    }
}

/// File a doctor application. Any status the caller smuggles into the
/// body is ignored; the profile always starts pending.
pub async fn apply(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<DoctorProfileRequest>,
) -> Result<(StatusCode, Json<DoctorResponse>), ApiError> {
    body.validate()
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    let doctor = state
        .approval
        .apply(auth.user_id, body.into_profile())
        .await?;

    Ok((StatusCode::CREATED, Json(DoctorResponse::from_model(doctor))))
}

pub async fn list_approved(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> Result<Json<Vec<DoctorResponse>>, ApiError> {
    let doctors = state.doctors.find_approved().await?;
    Ok(Json(
        doctors.into_iter().map(DoctorResponse::from_model).collect(),
    ))
}

pub async fn get(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(doctor_id): Path<String>,
) -> Result<Json<DoctorResponse>, ApiError> {
    let id = ObjectId::parse_str(&doctor_id)
        .map_err(|_| ApiError::BadRequest("Invalid doctor_id".to_string()))?;
    let doctor = state.doctors.base.find_by_id(id).await?;
    Ok(Json(DoctorResponse::from_model(doctor)))
}

pub async fn me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<DoctorResponse>, ApiError> {
    let doctor = state.doctors.find_by_user_id(auth.user_id).await?;
    Ok(Json(DoctorResponse::from_model(doctor)))
}

pub async fn update_me(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<DoctorProfileRequest>,
) -> Result<Json<DoctorResponse>, ApiError> {
    body.validate()
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    let doctor = state
        .doctors
        .update_profile(auth.user_id, body.into_profile())
        .await?;
    Ok(Json(DoctorResponse::from_model(doctor)))
}

/// Appointments booked against the caller's doctor profile.
pub async fn my_appointments(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<AppointmentResponse>>, ApiError> {
    let doctor = state.doctors.find_by_user_id(auth.user_id).await?;
    let doctor_id = doctor
        .id
        .ok_or_else(|| ApiError::Internal("Doctor has no id".to_string()))?;

    let appointments = state.booking.appointments_for_doctor(doctor_id).await?;
    Ok(Json(
        appointments
            .into_iter()
            .map(AppointmentResponse::from_model)
            .collect(),
    ))
}
