use bson::{DateTime, doc, oid::ObjectId};
use mediq_db::models::{Appointment, AppointmentStatus};
use mongodb::Database;

use super::base::{BaseDao, DaoResult};

pub struct AppointmentDao {
    pub base: BaseDao<Appointment>,
}

impl AppointmentDao {
    pub fn new(db: &Database) -> Self {
        Self {
            base: BaseDao::new(db, Appointment::COLLECTION),
        }
    }

    pub async fn create(
        &self,
        user_id: ObjectId,
        doctor_id: ObjectId,
        date: DateTime,
        time: DateTime,
    ) -> DaoResult<Appointment> {
        let now = DateTime::now();
        let appointment = Appointment {
            id: None,
            user_id,
            doctor_id,
            date,
            time,
            status: AppointmentStatus::Pending,
            created_at: now,
            updated_at: now,
        };

        let id = self.base.insert_one(&appointment).await?;
        self.base.find_by_id(id).await
    }

    /// Appointments for `doctor_id` on the given day whose time falls
    /// inside `[from, to]`, bounds included. Exact-day equality plus a
    /// time range, mirroring the booking collision rule.
    pub async fn find_in_window(
        &self,
        doctor_id: ObjectId,
        date: DateTime,
        from: DateTime,
        to: DateTime,
    ) -> DaoResult<Vec<Appointment>> {
        self.base
            .find_many(
                doc! {
                    "doctor_id": doctor_id,
                    "date": date,
                    "time": { "$gte": from, "$lte": to },
                },
                None,
            )
            .await
    }

    pub async fn find_by_user(&self, user_id: ObjectId) -> DaoResult<Vec<Appointment>> {
        self.base
            .find_many(
                doc! { "user_id": user_id },
                Some(doc! { "created_at": -1 }),
            )
            .await
    }

    pub async fn find_by_doctor(&self, doctor_id: ObjectId) -> DaoResult<Vec<Appointment>> {
        self.base
            .find_many(
                doc! { "doctor_id": doctor_id },
                Some(doc! { "created_at": -1 }),
            )
            .await
    }

    pub async fn set_status(
        &self,
        appointment_id: ObjectId,
        status: AppointmentStatus,
    ) -> DaoResult<bool> {
        self.base
            .update_by_id(
                appointment_id,
                doc! { "$set": { "status": bson::to_bson(&status).map_err(bson::ser::Error::from)? } },
            )
            .await
    }
}
