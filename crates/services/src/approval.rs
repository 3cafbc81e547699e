use std::sync::Arc;

use bson::{DateTime, doc, oid::ObjectId};
use mediq_db::models::{Doctor, DoctorStatus, Notification, NotificationType};
use thiserror::Error;
use tokio::sync::OnceCell;
use tracing::info;

use crate::dao::base::DaoError;
use crate::dao::doctor::{DoctorDao, DoctorProfile};
use crate::dao::user::UserDao;

#[derive(Debug, Error)]
pub enum ApprovalError {
    #[error("No administrator account is configured")]
    NoAdministrator,
    #[error("A doctor profile already exists for this account")]
    AlreadyApplied,
    #[error(transparent)]
    Dao(#[from] DaoError),
}

pub type ApprovalResult<T> = Result<T, ApprovalError>;

/// The doctor application/decision workflow. The administrator is a
/// singleton role; its id is resolved once and cached for the lifetime
/// of the service rather than queried per request.
pub struct ApprovalService {
    doctors: Arc<DoctorDao>,
    users: Arc<UserDao>,
    admin_id: OnceCell<ObjectId>,
}

impl ApprovalService {
    pub fn new(doctors: Arc<DoctorDao>, users: Arc<UserDao>) -> Self {
        Self {
            doctors,
            users,
            admin_id: OnceCell::new(),
        }
    }

    async fn admin_id(&self) -> ApprovalResult<ObjectId> {
        let id = self
            .admin_id
            .get_or_try_init(|| async {
                let admin = self
                    .users
                    .find_admin()
                    .await
                    .map_err(|e| match e {
                        DaoError::NotFound => ApprovalError::NoAdministrator,
                        other => ApprovalError::Dao(other),
                    })?;
                admin.id.ok_or(ApprovalError::NoAdministrator)
            })
            .await?;
        Ok(*id)
    }

    /// Files a doctor application. The profile always lands with status
    /// pending — whatever the caller tried to claim — and the admin's
    /// inbox receives the request event.
    pub async fn apply(&self, user_id: ObjectId, profile: DoctorProfile) -> ApprovalResult<Doctor> {
        // Resolve the admin before persisting anything: a misconfigured
        // deployment must not accumulate applications nobody reviews.
        let admin_id = self.admin_id().await?;

        let doctor = self
            .doctors
            .create(user_id, profile)
            .await
            .map_err(|e| match e {
                DaoError::DuplicateKey(_) => ApprovalError::AlreadyApplied,
                other => ApprovalError::Dao(other),
            })?;
        let doctor_id = doctor.id.ok_or(DaoError::NotFound)?;
        let name = doctor.display_name();

        self.users
            .push_notification(
                admin_id,
                Notification {
                    notification_type: NotificationType::NewDoctorRequest,
                    message: format!("{name} has requested for a doctor account"),
                    on_click_path: "/admin/doctorslist".to_string(),
                    data: Some(doc! {
                        "doctorId": doctor_id.to_hex(),
                        "name": name.clone(),
                    }),
                    created_at: DateTime::now(),
                },
            )
            .await?;

        info!(%doctor_id, %user_id, "Doctor application filed");
        Ok(doctor)
    }

    /// Admin decision on an application. Flips the owning account's
    /// doctor flag to match and notifies the applicant.
    pub async fn decide(&self, doctor_id: ObjectId, status: DoctorStatus) -> ApprovalResult<Doctor> {
        let doctor = self.doctors.base.find_by_id(doctor_id).await?;

        self.doctors.set_status(doctor_id, status).await?;
        self.users
            .set_is_doctor(doctor.user_id, status == DoctorStatus::Approved)
            .await?;

        self.users
            .push_notification(
                doctor.user_id,
                Notification {
                    notification_type: NotificationType::DoctorAccountRequestChanged,
                    message: format!("Your doctor account request has been {}", status.as_str()),
                    on_click_path: "/notifications".to_string(),
                    data: None,
                    created_at: DateTime::now(),
                },
            )
            .await?;

        info!(%doctor_id, status = status.as_str(), "Doctor application decided");
        Ok(self.doctors.base.find_by_id(doctor_id).await?)
    }
}
