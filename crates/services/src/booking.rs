use std::sync::Arc;

use bson::{DateTime, oid::ObjectId};
use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};
use mediq_db::models::{Appointment, AppointmentStatus, Notification, NotificationType};
use thiserror::Error;
use tracing::info;

use crate::dao::appointment::AppointmentDao;
use crate::dao::base::DaoError;
use crate::dao::doctor::DoctorDao;
use crate::dao::user::UserDao;

#[derive(Debug, Error)]
pub enum BookingError {
    #[error("Slot is not available")]
    SlotUnavailable,
    #[error("Invalid slot: {0}")]
    InvalidSlot(String),
    #[error(transparent)]
    Dao(#[from] DaoError),
}

pub type BookingResult<T> = Result<T, BookingError>;

/// A normalized (day, instant) pair. The day is midnight UTC of the
/// calendar date; the instant is the requested time anchored to that day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    pub date: DateTime,
    pub time: DateTime,
}

/// Parses the wire formats carried by booking requests: `DD-MM-YYYY`
/// for the day, `HH:MM` for the time of day.
pub fn parse_slot(date: &str, time: &str) -> BookingResult<Slot> {
    let day = NaiveDate::parse_from_str(date, "%d-%m-%Y")
        .map_err(|_| BookingError::InvalidSlot(format!("bad date {date:?}, want DD-MM-YYYY")))?;
    let tod = NaiveTime::parse_from_str(time, "%H:%M")
        .map_err(|_| BookingError::InvalidSlot(format!("bad time {time:?}, want HH:MM")))?;

    let midnight = Utc.from_utc_datetime(&day.and_time(NaiveTime::MIN));
    let instant = Utc.from_utc_datetime(&day.and_time(tod));

    Ok(Slot {
        date: DateTime::from_chrono(midnight),
        time: DateTime::from_chrono(instant),
    })
}

/// The collision window around a requested instant: one hour each side,
/// both bounds inclusive. An appointment exactly 60 minutes away conflicts.
pub fn slot_window(time: DateTime) -> (DateTime, DateTime) {
    const HOUR_MS: i64 = 60 * 60 * 1000;
    (
        DateTime::from_millis(time.timestamp_millis() - HOUR_MS),
        DateTime::from_millis(time.timestamp_millis() + HOUR_MS),
    )
}

pub struct BookingService {
    appointments: Arc<AppointmentDao>,
    doctors: Arc<DoctorDao>,
    users: Arc<UserDao>,
}

impl BookingService {
    pub fn new(appointments: Arc<AppointmentDao>, doctors: Arc<DoctorDao>, users: Arc<UserDao>) -> Self {
        Self {
            appointments,
            doctors,
            users,
        }
    }

    /// Pure read: is the slot free for this doctor? Day equality plus the
    /// inclusive one-hour window on either side.
    pub async fn check_availability(&self, doctor_id: ObjectId, slot: Slot) -> BookingResult<bool> {
        let (from, to) = slot_window(slot.time);
        let conflicting = self
            .appointments
            .find_in_window(doctor_id, slot.date, from, to)
            .await?;
        Ok(conflicting.is_empty())
    }

    /// Books a pending appointment and notifies the doctor's account.
    ///
    /// The doctor's linked user is resolved before anything is written,
    /// so a dangling profile fails the whole booking instead of leaving
    /// an appointment nobody was told about.
    pub async fn book(
        &self,
        patient_id: ObjectId,
        patient_name: &str,
        doctor_id: ObjectId,
        slot: Slot,
    ) -> BookingResult<Appointment> {
        let doctor = self.doctors.base.find_by_id(doctor_id).await?;
        let doctor_user = self.users.base.find_by_id(doctor.user_id).await?;
        let doctor_user_id = doctor_user.id.ok_or(DaoError::NotFound)?;

        if !self.check_availability(doctor_id, slot).await? {
            return Err(BookingError::SlotUnavailable);
        }

        // The unique (doctor_id, date, time) index backstops the check
        // above: a concurrent booking of the identical slot loses here.
        let appointment = self
            .appointments
            .create(patient_id, doctor_id, slot.date, slot.time)
            .await
            .map_err(|e| match e {
                DaoError::DuplicateKey(_) => BookingError::SlotUnavailable,
                other => BookingError::Dao(other),
            })?;

        self.users
            .push_notification(
                doctor_user_id,
                Notification {
                    notification_type: NotificationType::NewAppointmentRequest,
                    message: format!("A new appointment request has been made by {patient_name}"),
                    on_click_path: "/doctor/appointments".to_string(),
                    data: None,
                    created_at: DateTime::now(),
                },
            )
            .await?;

        info!(
            appointment_id = ?appointment.id,
            %doctor_id,
            "Appointment booked"
        );
        Ok(appointment)
    }

    /// Unconditional status transition, notifying the patient.
    pub async fn set_status(
        &self,
        appointment_id: ObjectId,
        status: AppointmentStatus,
    ) -> BookingResult<Appointment> {
        let appointment = self.appointments.base.find_by_id(appointment_id).await?;

        self.appointments.set_status(appointment_id, status).await?;

        self.users
            .push_notification(
                appointment.user_id,
                Notification {
                    notification_type: NotificationType::AppointmentStatusChanged,
                    message: format!("Appointment status has been {}", status.as_str()),
                    on_click_path: "/appointments".to_string(),
                    data: None,
                    created_at: DateTime::now(),
                },
            )
            .await?;

        info!(%appointment_id, status = status.as_str(), "Appointment status changed");
        self.appointments.base.find_by_id(appointment_id).await
            .map_err(BookingError::Dao)
    }

    pub async fn appointments_for_patient(&self, user_id: ObjectId) -> BookingResult<Vec<Appointment>> {
        Ok(self.appointments.find_by_user(user_id).await?)
    }

    pub async fn appointments_for_doctor(&self, doctor_id: ObjectId) -> BookingResult<Vec<Appointment>> {
        Ok(self.appointments.find_by_doctor(doctor_id).await?)
    }
}
