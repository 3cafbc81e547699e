use bson::{DateTime, doc, oid::ObjectId};
use mediq_db::models::{Notification, User};
use mongodb::Database;

use super::base::{BaseDao, DaoError, DaoResult};

/// Unseen notifications retained per user; an atomic `$slice` on push
/// drops the oldest beyond this.
const UNSEEN_RETENTION: i32 = 100;

pub struct UserDao {
    pub base: BaseDao<User>,
}

impl UserDao {
    pub fn new(db: &Database) -> Self {
        Self {
            base: BaseDao::new(db, User::COLLECTION),
        }
    }

    pub async fn create(
        &self,
        name: String,
        email: String,
        password_hash: String,
        is_admin: bool,
    ) -> DaoResult<User> {
        let now = DateTime::now();
        let user = User {
            id: None,
            name,
            email,
            password_hash: Some(password_hash),
            is_admin,
            is_doctor: false,
            unseen_notifications: Vec::new(),
            seen_notifications: Vec::new(),
            created_at: now,
            updated_at: now,
        };

        let id = self.base.insert_one(&user).await?;
        self.base.find_by_id(id).await
    }

    pub async fn find_by_email(&self, email: &str) -> DaoResult<User> {
        self.base
            .find_one(doc! { "email": email })
            .await?
            .ok_or(DaoError::NotFound)
    }

    /// The singleton administrator account.
    pub async fn find_admin(&self) -> DaoResult<User> {
        self.base
            .find_one(doc! { "is_admin": true })
            .await?
            .ok_or(DaoError::NotFound)
    }

    pub async fn set_is_doctor(&self, user_id: ObjectId, is_doctor: bool) -> DaoResult<bool> {
        self.base
            .update_by_id(user_id, doc! { "$set": { "is_doctor": is_doctor } })
            .await
    }

    /// Appends to the unseen sequence in a single atomic update, so
    /// concurrent pushes to the same user cannot lose each other.
    pub async fn push_notification(
        &self,
        user_id: ObjectId,
        notification: Notification,
    ) -> DaoResult<()> {
        let notification = bson::to_bson(&notification)?;
        let retain = -UNSEEN_RETENTION;
        let result = self
            .base
            .collection()
            .update_one(
                doc! { "_id": user_id },
                doc! {
                    "$push": {
                        "unseen_notifications": {
                            "$each": [notification],
                            "$slice": retain,
                        }
                    },
                    "$set": { "updated_at": DateTime::now() },
                },
            )
            .await?;

        if result.matched_count == 0 {
            return Err(DaoError::NotFound);
        }
        Ok(())
    }

    /// Moves every unseen notification to the end of the seen sequence,
    /// preserving order. A single pipeline update, so replaying it is a
    /// no-op rather than a duplication.
    pub async fn mark_all_notifications_seen(&self, user_id: ObjectId) -> DaoResult<User> {
        let pipeline = vec![doc! {
            "$set": {
                "seen_notifications": {
                    "$concatArrays": ["$seen_notifications", "$unseen_notifications"]
                },
                "unseen_notifications": [],
                "updated_at": DateTime::now(),
            }
        }];

        let result = self
            .base
            .collection()
            .update_one(doc! { "_id": user_id }, pipeline)
            .await?;

        if result.matched_count == 0 {
            return Err(DaoError::NotFound);
        }

        let mut user = self.base.find_by_id(user_id).await?;
        user.password_hash = None;
        Ok(user)
    }

    /// Empties both sequences. History is gone for good.
    pub async fn clear_notifications(&self, user_id: ObjectId) -> DaoResult<User> {
        let result = self
            .base
            .collection()
            .update_one(
                doc! { "_id": user_id },
                doc! {
                    "$set": {
                        "unseen_notifications": [],
                        "seen_notifications": [],
                        "updated_at": DateTime::now(),
                    }
                },
            )
            .await?;

        if result.matched_count == 0 {
            return Err(DaoError::NotFound);
        }

        let mut user = self.base.find_by_id(user_id).await?;
        user.password_hash = None;
        Ok(user)
    }
}
