pub mod sqlite;
pub mod sqlite_queries;

use crate::models;
use async_trait::async_trait;
use std::rc::Rc;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AppRepo {
    /// Inserts the user and its welcome notification in one transaction.
    /// `welcome.user_app_id` is ignored, the new user id is used instead.
    async fn insert_user_app(
        &self,
        app_user: &models::user_app::User,
        welcome: &models::notification::NewNotification,
    ) -> anyhow::Result<i64>;

    async fn get_user_app_by_email(
        &self,
        email: &str,
    ) -> anyhow::Result<Option<models::user_app::User>>;

    async fn get_user_app_by_username(
        &self,
        username: &str,
    ) -> anyhow::Result<Option<models::user_app::User>>;

    async fn get_user_app_by_id(
        &self,
        user_id: i64,
    ) -> anyhow::Result<Option<models::user_app::User>>;

    async fn update_user_app_profile(
        &self,
        user_id: i64,
        username: &str,
        email: &str,
    ) -> anyhow::Result<()>;

    async fn update_user_app_profile_image(
        &self,
        user_id: i64,
        profile_image: &str,
    ) -> anyhow::Result<()>;

    async fn get_user_photos(
        &self,
        user_id: i64,
    ) -> anyhow::Result<Vec<models::user_app::UserPhoto>>;

    async fn insert_user_photo(
        &self,
        user_id: i64,
        image_url: &str,
    ) -> anyhow::Result<models::user_app::UserPhoto>;

    /// Returns the url of the deleted photo, `None` when absent or not owned
    async fn delete_user_photo(&self, user_id: i64, photo_id: i64)
    -> anyhow::Result<Option<String>>;

    async fn insert_pet(&self, pet: &models::pet::Pet) -> anyhow::Result<i64>;

    /// Returns false when the pet is absent or not owned by `pet.user_app_id`
    async fn update_pet(&self, pet: &models::pet::Pet) -> anyhow::Result<bool>;

    async fn get_pet_by_id(
        &self,
        pet_id: i64,
        user_id: i64,
    ) -> anyhow::Result<Option<models::pet::Pet>>;

    async fn get_all_pets_user_id(&self, user_id: i64) -> anyhow::Result<Vec<models::pet::Pet>>;

    async fn delete_pet(&self, pet_id: i64, user_id: i64) -> anyhow::Result<bool>;

    /// Inserts the appointment, its service lines and the creation
    /// notification in one transaction. Returns the appointment id.
    async fn insert_appointment(
        &self,
        appointment: &models::appointment::Appointment,
        notification: &models::notification::NewNotification,
    ) -> anyhow::Result<i64>;

    /// Appointment with its pet expanded, without ownership check
    async fn get_appointment_by_id(
        &self,
        appointment_id: i64,
    ) -> anyhow::Result<Option<models::appointment::Appointment>>;

    /// Newest first
    async fn get_appointments_by_user_id(
        &self,
        user_id: i64,
    ) -> anyhow::Result<Vec<models::appointment::Appointment>>;

    /// Newest first, user and pet expanded
    async fn get_all_appointments(&self) -> anyhow::Result<Vec<models::appointment::Appointment>>;

    /// Writes the status. Notes and cancellation reason are kept when `None`.
    async fn update_appointment_status(
        &self,
        appointment_id: i64,
        status: models::appointment::AppointmentStatus,
        admin_notes: Option<String>,
        cancellation_reason: Option<String>,
    ) -> anyhow::Result<()>;

    async fn delete_appointment(&self, appointment_id: i64, user_id: i64) -> anyhow::Result<bool>;

    /// APPROVED appointments on `date` whose reminder was not sent yet
    async fn get_appointments_due_for_reminder(
        &self,
        date: chrono::NaiveDate,
    ) -> anyhow::Result<Vec<models::appointment::Appointment>>;

    /// Flags the reminder as sent and inserts it in one transaction.
    /// Returns false, writing nothing, when it was already sent.
    async fn insert_appointment_reminder(
        &self,
        appointment_id: i64,
        notification: &models::notification::NewNotification,
    ) -> anyhow::Result<bool>;

    async fn insert_notification(
        &self,
        notification: &models::notification::NewNotification,
    ) -> anyhow::Result<i64>;

    /// Newest first
    async fn get_notifications_by_user_id(
        &self,
        user_id: i64,
        limit: i64,
    ) -> anyhow::Result<Vec<models::notification::Notification>>;

    async fn mark_notification_read(
        &self,
        user_id: i64,
        notification_id: i64,
    ) -> anyhow::Result<Option<models::notification::Notification>>;

    async fn mark_all_notifications_read(&self, user_id: i64) -> anyhow::Result<u64>;

    async fn count_unread_notifications(&self, user_id: i64) -> anyhow::Result<i64>;

    async fn delete_notification(&self, user_id: i64, notification_id: i64)
    -> anyhow::Result<bool>;
}

pub type ImplAppRepo = Rc<dyn AppRepo>;
