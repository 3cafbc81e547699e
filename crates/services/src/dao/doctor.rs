use bson::{DateTime, doc, oid::ObjectId};
use mediq_db::models::{Doctor, DoctorStatus};
use mongodb::Database;

use super::base::{BaseDao, DaoError, DaoResult};

pub struct DoctorDao {
    pub base: BaseDao<Doctor>,
}

/// Caller-editable profile fields. `status` is deliberately absent:
/// it only moves through the approval workflow.
#[derive(Debug, Clone)]
pub struct DoctorProfile {
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub website: Option<String>,
    pub address: String,
    pub specialization: String,
    pub experience: String,
    pub fee_per_consultation: f64,
    pub timings: Vec<String>,
}

impl DoctorDao {
    pub fn new(db: &Database) -> Self {
        Self {
            base: BaseDao::new(db, Doctor::COLLECTION),
        }
    }

    pub async fn create(&self, user_id: ObjectId, profile: DoctorProfile) -> DaoResult<Doctor> {
        let now = DateTime::now();
        let doctor = Doctor {
            id: None,
            user_id,
            first_name: profile.first_name,
            last_name: profile.last_name,
            phone_number: profile.phone_number,
            website: profile.website,
            address: profile.address,
            specialization: profile.specialization,
            experience: profile.experience,
            fee_per_consultation: profile.fee_per_consultation,
            timings: profile.timings,
            status: DoctorStatus::Pending,
            created_at: now,
            updated_at: now,
        };

        let id = self.base.insert_one(&doctor).await?;
        self.base.find_by_id(id).await
    }

    pub async fn find_by_user_id(&self, user_id: ObjectId) -> DaoResult<Doctor> {
        self.base
            .find_one(doc! { "user_id": user_id })
            .await?
            .ok_or(DaoError::NotFound)
    }

    pub async fn find_approved(&self) -> DaoResult<Vec<Doctor>> {
        self.base
            .find_many(
                doc! { "status": "approved" },
                Some(doc! { "created_at": -1 }),
            )
            .await
    }

    pub async fn set_status(&self, doctor_id: ObjectId, status: DoctorStatus) -> DaoResult<bool> {
        self.base
            .update_by_id(
                doctor_id,
                doc! { "$set": { "status": bson::to_bson(&status).map_err(bson::ser::Error::from)? } },
            )
            .await
    }

    pub async fn update_profile(
        &self,
        user_id: ObjectId,
        profile: DoctorProfile,
    ) -> DaoResult<Doctor> {
        self.base
            .update_one(
                doc! { "user_id": user_id },
                doc! {
                    "$set": {
                        "first_name": profile.first_name,
                        "last_name": profile.last_name,
                        "phone_number": profile.phone_number,
                        "website": profile.website,
                        "address": profile.address,
                        "specialization": profile.specialization,
                        "experience": profile.experience,
                        "fee_per_consultation": profile.fee_per_consultation,
                        "timings": profile.timings,
                    }
                },
            )
            .await?;

        // NotFound surfaces here when no profile exists for the account.
        self.find_by_user_id(user_id).await
    }
}
