use crate::models;
use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::{FromRow, Row, Sqlite, SqlitePool, sqlite::SqliteRow};
use std::{collections::HashMap, str::FromStr};

use super::{AppRepo, sqlite_queries};

#[derive(Clone)]
pub struct SqlxSqliteRepo {
    pub db_pool: SqlitePool,
}

fn decimal_from_text(row: &SqliteRow, column: &str) -> sqlx::Result<Decimal> {
    let value: String = row.try_get(column)?;
    Decimal::from_str(&value).map_err(|e| sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(e),
    })
}

impl FromRow<'_, SqliteRow> for models::user_app::User {
    fn from_row(row: &SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: row.try_get("id")?,
            username: row.try_get("username")?,
            email: row.try_get("email")?,
            password_hash: row.try_get("password_hash")?,
            profile_image: row.try_get("profile_image")?,
            is_admin: row.try_get("is_admin")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

impl FromRow<'_, SqliteRow> for models::user_app::UserPhoto {
    fn from_row(row: &SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: row.try_get("id")?,
            user_app_id: row.try_get("user_app_id")?,
            image_url: row.try_get("uri")?,
            uploaded_at: row.try_get("uploaded_at")?,
        })
    }
}

impl FromRow<'_, SqliteRow> for models::pet::Pet {
    fn from_row(row: &SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: row.try_get("id")?,
            user_app_id: row.try_get("user_app_id")?,
            name: row.try_get("name")?,
            breed: row.try_get("breed")?,
            age: row.try_get("age")?,
            gender: row.try_get("gender")?,
            size: row.try_get("size")?,
            medical_condition: row.try_get("medical_condition")?,
            behavioral_concern: row.try_get("behavioral_concern")?,
            treat: row.try_get("treat")?,
            rabies_expiry: row.try_get("rabies_expiry")?,
            profile_image: row.try_get("profile_image")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

impl FromRow<'_, SqliteRow> for models::appointment::ServiceLine {
    fn from_row(row: &SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            service_name: row.try_get("service_name")?,
            price: decimal_from_text(row, "price")?,
        })
    }
}

/// Service lines are loaded apart, see [SqlxSqliteRepo::get_service_lines]
impl FromRow<'_, SqliteRow> for models::appointment::Appointment {
    fn from_row(row: &SqliteRow) -> sqlx::Result<Self> {
        let pet_id: i64 = row.try_get("pet_id")?;

        let pet = match row.try_get::<Option<String>, &str>("pet_name")? {
            Some(name) => Some(models::pet::PetSummary {
                id: pet_id,
                name,
                breed: row.try_get("pet_breed")?,
                profile_image: row.try_get("pet_profile_image")?,
                size: row.try_get("pet_size")?,
            }),
            None => None,
        };

        // user columns are only selected by the admin listing
        let user = match (
            row.try_get::<Option<String>, &str>("user_username").ok().flatten(),
            row.try_get::<Option<String>, &str>("user_email").ok().flatten(),
        ) {
            (Some(username), Some(email)) => Some(models::user_app::UserSummary {
                id: row.try_get("user_app_id")?,
                username,
                email,
            }),
            _ => None,
        };

        Ok(Self {
            id: row.try_get("id")?,
            user_app_id: row.try_get("user_app_id")?,
            pet_id,
            services: vec![],
            appointment_date: row.try_get("appointment_date")?,
            appointment_time: row.try_get("time_slot")?,
            total_amount: decimal_from_text(row, "total_amount")?,
            payment_method: row.try_get("payment_method")?,
            payment_status: row.try_get("payment_status")?,
            status: row.try_get("status")?,
            admin_notes: row.try_get("admin_notes")?,
            cancellation_reason: row.try_get("cancellation_reason")?,
            reminder_sent: row.try_get("reminder_sent")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
            pet,
            user,
        })
    }
}

impl FromRow<'_, SqliteRow> for models::notification::Notification {
    fn from_row(row: &SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: row.try_get("id")?,
            user_app_id: row.try_get("user_app_id")?,
            notification_type: row.try_get("notification_type")?,
            title: row.try_get("title")?,
            message: row.try_get("message")?,
            appointment_id: row.try_get("appointment_id")?,
            read: row.try_get("is_read")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

async fn insert_notification_with<'e, E>(
    executor: E,
    notification: &models::notification::NewNotification,
) -> sqlx::Result<i64>
where
    E: sqlx::Executor<'e, Database = Sqlite>,
{
    let now = Utc::now();

    Ok(sqlx::query(sqlite_queries::QUERY_INSERT_NOTIFICATION)
        .bind(notification.user_app_id)
        .bind(notification.notification_type)
        .bind(&notification.title)
        .bind(&notification.message)
        .bind(notification.appointment_id)
        .bind(now)
        .bind(now)
        .execute(executor)
        .await?
        .last_insert_rowid())
}

impl SqlxSqliteRepo {
    async fn get_service_lines(
        &self,
        appointment_id: i64,
    ) -> anyhow::Result<Vec<models::appointment::ServiceLine>> {
        Ok(sqlx::query_as::<_, models::appointment::ServiceLine>(
            sqlite_queries::QUERY_GET_SERVICE_LINES_BY_APPOINTMENT_ID,
        )
        .bind(appointment_id)
        .fetch_all(&self.db_pool)
        .await?)
    }

    /// Fills `services` of every appointment with one query.
    /// `user_id` narrows the lines fetched to one owner.
    async fn attach_service_lines(
        &self,
        appointments: &mut [models::appointment::Appointment],
        user_id: Option<i64>,
    ) -> anyhow::Result<()> {
        let rows = sqlx::query(sqlite_queries::QUERY_GET_SERVICE_LINES)
            .bind(user_id)
            .fetch_all(&self.db_pool)
            .await?;

        let mut lines_by_appointment: HashMap<i64, Vec<models::appointment::ServiceLine>> =
            HashMap::new();
        for row in rows {
            let appointment_id: i64 = row.try_get("appointment_id")?;
            lines_by_appointment
                .entry(appointment_id)
                .or_default()
                .push(models::appointment::ServiceLine::from_row(&row)?);
        }

        for appointment in appointments.iter_mut() {
            appointment.services = lines_by_appointment
                .remove(&appointment.id)
                .unwrap_or_default();
        }

        Ok(())
    }
}

#[async_trait]
impl AppRepo for SqlxSqliteRepo {
    async fn insert_user_app(
        &self,
        app_user: &models::user_app::User,
        welcome: &models::notification::NewNotification,
    ) -> anyhow::Result<i64> {
        let mut transaction = self.db_pool.begin().await?;

        let user_app_id = sqlx::query(sqlite_queries::QUERY_INSERT_USER_APP)
            .bind(&app_user.username)
            .bind(&app_user.email)
            .bind(&app_user.password_hash)
            .bind(&app_user.profile_image)
            .bind(app_user.is_admin)
            .bind(app_user.created_at)
            .bind(app_user.updated_at)
            .execute(&mut *transaction)
            .await?
            .last_insert_rowid();

        insert_notification_with(
            &mut *transaction,
            &models::notification::NewNotification {
                user_app_id,
                ..welcome.clone()
            },
        )
        .await?;

        transaction.commit().await?;

        Ok(user_app_id)
    }

    async fn get_user_app_by_email(
        &self,
        email: &str,
    ) -> anyhow::Result<Option<models::user_app::User>> {
        Ok(sqlx::query_as::<_, models::user_app::User>(
            sqlite_queries::QUERY_GET_USER_APP_BY_EMAIL,
        )
        .bind(email)
        .fetch_optional(&self.db_pool)
        .await?)
    }

    async fn get_user_app_by_username(
        &self,
        username: &str,
    ) -> anyhow::Result<Option<models::user_app::User>> {
        Ok(sqlx::query_as::<_, models::user_app::User>(
            sqlite_queries::QUERY_GET_USER_APP_BY_USERNAME,
        )
        .bind(username)
        .fetch_optional(&self.db_pool)
        .await?)
    }

    async fn get_user_app_by_id(
        &self,
        user_id: i64,
    ) -> anyhow::Result<Option<models::user_app::User>> {
        Ok(
            sqlx::query_as::<_, models::user_app::User>(sqlite_queries::QUERY_GET_USER_APP_BY_ID)
                .bind(user_id)
                .fetch_optional(&self.db_pool)
                .await?,
        )
    }

    async fn update_user_app_profile(
        &self,
        user_id: i64,
        username: &str,
        email: &str,
    ) -> anyhow::Result<()> {
        Ok(sqlx::query(sqlite_queries::QUERY_UPDATE_USER_APP_PROFILE)
            .bind(username)
            .bind(email)
            .bind(Utc::now())
            .bind(user_id)
            .execute(&self.db_pool)
            .await
            .map(|_| ())?)
    }

    async fn update_user_app_profile_image(
        &self,
        user_id: i64,
        profile_image: &str,
    ) -> anyhow::Result<()> {
        Ok(
            sqlx::query(sqlite_queries::QUERY_UPDATE_USER_APP_PROFILE_IMAGE)
                .bind(profile_image)
                .bind(Utc::now())
                .bind(user_id)
                .execute(&self.db_pool)
                .await
                .map(|_| ())?,
        )
    }

    async fn get_user_photos(
        &self,
        user_id: i64,
    ) -> anyhow::Result<Vec<models::user_app::UserPhoto>> {
        Ok(
            sqlx::query_as::<_, models::user_app::UserPhoto>(sqlite_queries::QUERY_GET_USER_PHOTOS)
                .bind(user_id)
                .fetch_all(&self.db_pool)
                .await?,
        )
    }

    async fn insert_user_photo(
        &self,
        user_id: i64,
        image_url: &str,
    ) -> anyhow::Result<models::user_app::UserPhoto> {
        Ok(sqlx::query_as::<_, models::user_app::UserPhoto>(
            sqlite_queries::QUERY_INSERT_USER_PHOTO,
        )
        .bind(user_id)
        .bind(image_url)
        .bind(Utc::now())
        .fetch_one(&self.db_pool)
        .await?)
    }

    async fn delete_user_photo(
        &self,
        user_id: i64,
        photo_id: i64,
    ) -> anyhow::Result<Option<String>> {
        Ok(sqlx::query_scalar(sqlite_queries::QUERY_DELETE_USER_PHOTO)
            .bind(photo_id)
            .bind(user_id)
            .fetch_optional(&self.db_pool)
            .await?)
    }

    async fn insert_pet(&self, pet: &models::pet::Pet) -> anyhow::Result<i64> {
        Ok(sqlx::query(sqlite_queries::QUERY_INSERT_PET)
            .bind(pet.user_app_id)
            .bind(&pet.name)
            .bind(&pet.breed)
            .bind(&pet.age)
            .bind(pet.gender)
            .bind(pet.size)
            .bind(&pet.medical_condition)
            .bind(&pet.behavioral_concern)
            .bind(&pet.treat)
            .bind(pet.rabies_expiry)
            .bind(&pet.profile_image)
            .bind(pet.created_at)
            .bind(pet.updated_at)
            .execute(&self.db_pool)
            .await?
            .last_insert_rowid())
    }

    async fn update_pet(&self, pet: &models::pet::Pet) -> anyhow::Result<bool> {
        let result = sqlx::query(sqlite_queries::QUERY_UPDATE_PET)
            .bind(&pet.name)
            .bind(&pet.breed)
            .bind(&pet.age)
            .bind(pet.gender)
            .bind(pet.size)
            .bind(&pet.medical_condition)
            .bind(&pet.behavioral_concern)
            .bind(&pet.treat)
            .bind(pet.rabies_expiry)
            .bind(&pet.profile_image)
            .bind(Utc::now())
            .bind(pet.id)
            .bind(pet.user_app_id)
            .execute(&self.db_pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn get_pet_by_id(
        &self,
        pet_id: i64,
        user_id: i64,
    ) -> anyhow::Result<Option<models::pet::Pet>> {
        Ok(
            sqlx::query_as::<_, models::pet::Pet>(sqlite_queries::QUERY_GET_PET_BY_ID)
                .bind(pet_id)
                .bind(user_id)
                .fetch_optional(&self.db_pool)
                .await?,
        )
    }

    async fn get_all_pets_user_id(&self, user_id: i64) -> anyhow::Result<Vec<models::pet::Pet>> {
        Ok(
            sqlx::query_as::<_, models::pet::Pet>(sqlite_queries::QUERY_GET_ALL_PETS_BY_USER_ID)
                .bind(user_id)
                .fetch_all(&self.db_pool)
                .await?,
        )
    }

    async fn delete_pet(&self, pet_id: i64, user_id: i64) -> anyhow::Result<bool> {
        let result = sqlx::query(sqlite_queries::QUERY_DELETE_PET)
            .bind(pet_id)
            .bind(user_id)
            .execute(&self.db_pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn insert_appointment(
        &self,
        appointment: &models::appointment::Appointment,
        notification: &models::notification::NewNotification,
    ) -> anyhow::Result<i64> {
        let mut transaction = self.db_pool.begin().await?;

        let appointment_id = sqlx::query(sqlite_queries::QUERY_INSERT_APPOINTMENT)
            .bind(appointment.user_app_id)
            .bind(appointment.pet_id)
            .bind(appointment.appointment_date)
            .bind(appointment.appointment_time)
            .bind(appointment.total_amount.to_string())
            .bind(appointment.payment_method)
            .bind(appointment.payment_status)
            .bind(appointment.status)
            .bind(appointment.created_at)
            .bind(appointment.updated_at)
            .execute(&mut *transaction)
            .await?
            .last_insert_rowid();

        for (position, line) in appointment.services.iter().enumerate() {
            sqlx::query(sqlite_queries::QUERY_INSERT_APPOINTMENT_SERVICE)
                .bind(appointment_id)
                .bind(position as i64)
                .bind(&line.service_name)
                .bind(line.price.to_string())
                .execute(&mut *transaction)
                .await?;
        }

        insert_notification_with(
            &mut *transaction,
            &models::notification::NewNotification {
                appointment_id: Some(appointment_id),
                ..notification.clone()
            },
        )
        .await?;

        transaction.commit().await?;

        Ok(appointment_id)
    }

    async fn get_appointment_by_id(
        &self,
        appointment_id: i64,
    ) -> anyhow::Result<Option<models::appointment::Appointment>> {
        let appointment = sqlx::query_as::<_, models::appointment::Appointment>(
            sqlite_queries::QUERY_GET_APPOINTMENT_BY_ID,
        )
        .bind(appointment_id)
        .fetch_optional(&self.db_pool)
        .await?;

        let Some(mut appointment) = appointment else {
            return Ok(None);
        };
        appointment.services = self.get_service_lines(appointment.id).await?;

        Ok(Some(appointment))
    }

    async fn get_appointments_by_user_id(
        &self,
        user_id: i64,
    ) -> anyhow::Result<Vec<models::appointment::Appointment>> {
        let mut appointments = sqlx::query_as::<_, models::appointment::Appointment>(
            sqlite_queries::QUERY_GET_APPOINTMENTS_BY_USER_ID,
        )
        .bind(user_id)
        .fetch_all(&self.db_pool)
        .await?;

        self.attach_service_lines(&mut appointments, Some(user_id))
            .await?;

        Ok(appointments)
    }

    async fn get_all_appointments(&self) -> anyhow::Result<Vec<models::appointment::Appointment>> {
        let mut appointments = sqlx::query_as::<_, models::appointment::Appointment>(
            sqlite_queries::QUERY_GET_ALL_APPOINTMENTS,
        )
        .fetch_all(&self.db_pool)
        .await?;

        self.attach_service_lines(&mut appointments, None).await?;

        Ok(appointments)
    }

    async fn update_appointment_status(
        &self,
        appointment_id: i64,
        status: models::appointment::AppointmentStatus,
        admin_notes: Option<String>,
        cancellation_reason: Option<String>,
    ) -> anyhow::Result<()> {
        sqlx::query(sqlite_queries::QUERY_UPDATE_APPOINTMENT_STATUS)
            .bind(status)
            .bind(admin_notes)
            .bind(cancellation_reason)
            .bind(Utc::now())
            .bind(appointment_id)
            .execute(&self.db_pool)
            .await?;

        Ok(())
    }

    async fn delete_appointment(&self, appointment_id: i64, user_id: i64) -> anyhow::Result<bool> {
        let result = sqlx::query(sqlite_queries::QUERY_DELETE_APPOINTMENT)
            .bind(appointment_id)
            .bind(user_id)
            .execute(&self.db_pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn get_appointments_due_for_reminder(
        &self,
        date: chrono::NaiveDate,
    ) -> anyhow::Result<Vec<models::appointment::Appointment>> {
        Ok(sqlx::query_as::<_, models::appointment::Appointment>(
            sqlite_queries::QUERY_GET_APPOINTMENTS_DUE_FOR_REMINDER,
        )
        .bind(date)
        .fetch_all(&self.db_pool)
        .await?)
    }

    async fn insert_appointment_reminder(
        &self,
        appointment_id: i64,
        notification: &models::notification::NewNotification,
    ) -> anyhow::Result<bool> {
        let mut transaction = self.db_pool.begin().await?;

        let result = sqlx::query(sqlite_queries::QUERY_MARK_APPOINTMENT_REMINDER_SENT)
            .bind(Utc::now())
            .bind(appointment_id)
            .execute(&mut *transaction)
            .await?;

        if result.rows_affected() == 0 {
            transaction.rollback().await?;
            return Ok(false);
        }

        insert_notification_with(&mut *transaction, notification).await?;
        transaction.commit().await?;

        Ok(true)
    }

    async fn insert_notification(
        &self,
        notification: &models::notification::NewNotification,
    ) -> anyhow::Result<i64> {
        Ok(insert_notification_with(&self.db_pool, notification).await?)
    }

    async fn get_notifications_by_user_id(
        &self,
        user_id: i64,
        limit: i64,
    ) -> anyhow::Result<Vec<models::notification::Notification>> {
        Ok(sqlx::query_as::<_, models::notification::Notification>(
            sqlite_queries::QUERY_GET_NOTIFICATIONS_BY_USER_ID,
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.db_pool)
        .await?)
    }

    async fn mark_notification_read(
        &self,
        user_id: i64,
        notification_id: i64,
    ) -> anyhow::Result<Option<models::notification::Notification>> {
        Ok(sqlx::query_as::<_, models::notification::Notification>(
            sqlite_queries::QUERY_MARK_NOTIFICATION_READ,
        )
        .bind(Utc::now())
        .bind(notification_id)
        .bind(user_id)
        .fetch_optional(&self.db_pool)
        .await?)
    }

    async fn mark_all_notifications_read(&self, user_id: i64) -> anyhow::Result<u64> {
        Ok(
            sqlx::query(sqlite_queries::QUERY_MARK_ALL_NOTIFICATIONS_READ)
                .bind(Utc::now())
                .bind(user_id)
                .execute(&self.db_pool)
                .await?
                .rows_affected(),
        )
    }

    async fn count_unread_notifications(&self, user_id: i64) -> anyhow::Result<i64> {
        Ok(
            sqlx::query_scalar(sqlite_queries::QUERY_COUNT_UNREAD_NOTIFICATIONS)
                .bind(user_id)
                .fetch_one(&self.db_pool)
                .await?,
        )
    }

    async fn delete_notification(
        &self,
        user_id: i64,
        notification_id: i64,
    ) -> anyhow::Result<bool> {
        let result = sqlx::query(sqlite_queries::QUERY_DELETE_NOTIFICATION)
            .bind(notification_id)
            .bind(user_id)
            .execute(&self.db_pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

/// Schema applied to in-memory databases in tests
#[cfg(test)]
pub const SCHEMA: &str = include_str!("../../migrations/0001_init.sql");

#[cfg(test)]
pub async fn setup_in_memory_repo() -> SqlxSqliteRepo {
    let db_pool = sqlx::sqlite::SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(
            sqlx::sqlite::SqliteConnectOptions::from_str("sqlite::memory:")
                .unwrap()
                .pragma("foreign_keys", "ON"),
        )
        .await
        .unwrap();

    sqlx::raw_sql(SCHEMA).execute(&db_pool).await.unwrap();

    SqlxSqliteRepo { db_pool }
}
