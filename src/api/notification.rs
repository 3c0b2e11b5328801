//! # Notification API Module
//!
//! Notification templates for every lifecycle event and the read-state
//! operations a user can run on their own notifications. Notifications are
//! never created directly by a client.

use crate::{
    api::{errors::DomainError, slots},
    consts, metric,
    models::{
        appointment::{Appointment, AppointmentStatus},
        notification::{NewNotification, Notification, NotificationType},
    },
    repo,
};
use anyhow::bail;
use std::time::Duration;

pub fn welcome(user_id: i64, username: &str) -> NewNotification {
    NewNotification {
        user_app_id: user_id,
        notification_type: NotificationType::Welcome,
        title: "Welcome to HappyPaws! 🐾".into(),
        message: format!(
            "Hi {username}, thanks for joining HappyPaws! Add your pets and book their first grooming session."
        ),
        appointment_id: None,
    }
}

pub fn promotion(user_id: i64) -> NewNotification {
    NewNotification {
        user_app_id: user_id,
        notification_type: NotificationType::Promotion,
        title: "Special Offer for New Members! 🎁".into(),
        message: "Treat your pet to our Full Grooming package: bath, haircut, nails and ears in one visit.".into(),
        appointment_id: None,
    }
}

pub fn appointment_created(appointment: &Appointment) -> NewNotification {
    NewNotification {
        user_app_id: appointment.user_app_id,
        notification_type: NotificationType::Appointment,
        title: "Appointment Created! 📅".into(),
        message: format!(
            "Your appointment for {} on {} at {} has been submitted and is pending approval.",
            appointment.pet_name(),
            slots::date_label(appointment.appointment_date),
            appointment.appointment_time,
        ),
        appointment_id: Some(appointment.id),
    }
}

pub fn owner_cancelled(appointment: &Appointment) -> NewNotification {
    NewNotification {
        user_app_id: appointment.user_app_id,
        notification_type: NotificationType::StatusUpdate,
        title: "Appointment Cancelled".into(),
        message: format!(
            "Your appointment on {} has been cancelled.",
            slots::date_label(appointment.appointment_date)
        ),
        appointment_id: Some(appointment.id),
    }
}

/// Notification for an admin status change, `None` for statuses without template
pub fn status_update(appointment: &Appointment, status: AppointmentStatus) -> Option<NewNotification> {
    let pet_name = appointment.pet_name();
    let date = slots::date_label(appointment.appointment_date);

    let (title, message) = match status {
        AppointmentStatus::Pending => return None,
        AppointmentStatus::Approved => (
            "Appointment Approved! ✅",
            format!("Great news! Your appointment for {pet_name} on {date} has been approved."),
        ),
        AppointmentStatus::InProgress => (
            "Grooming in Progress 🛁",
            format!(
                "Your pet {pet_name} is currently being groomed. We'll notify you when it's done!"
            ),
        ),
        AppointmentStatus::Completed => (
            "Grooming Complete! 🎉",
            format!("{pet_name} is all done and looking fabulous! You can pick them up now."),
        ),
        AppointmentStatus::Claimed => (
            "Pet Picked Up 🐾",
            format!(
                "Thank you for choosing HappyPaws! We hope {pet_name} enjoyed their grooming session."
            ),
        ),
        AppointmentStatus::Cancelled => (
            "Appointment Cancelled",
            format!("Your appointment for {pet_name} on {date} has been cancelled."),
        ),
    };

    Some(NewNotification {
        user_app_id: appointment.user_app_id,
        notification_type: NotificationType::StatusUpdate,
        title: title.into(),
        message,
        appointment_id: Some(appointment.id),
    })
}

pub fn reminder(appointment: &Appointment) -> NewNotification {
    NewNotification {
        user_app_id: appointment.user_app_id,
        notification_type: NotificationType::Reminder,
        title: "Appointment Tomorrow ⏰".into(),
        message: format!(
            "Reminder: {} has a grooming appointment tomorrow, {} at {}. See you there!",
            appointment.pet_name(),
            slots::date_label(appointment.appointment_date),
            appointment.appointment_time,
        ),
        appointment_id: Some(appointment.id),
    }
}

/// Persists a notification for a change that is already stored.
/// A failure is logged and leaves the change in place.
pub async fn dispatch(repo: &repo::ImplAppRepo, notification: &NewNotification) {
    match repo.insert_notification(notification).await {
        Ok(_) => metric::incr_notification_statds(&notification.notification_type.to_string()),
        Err(e) => logfire::error!(
            "Failed to insert {notification_type} notification for user {user_id}: {error}",
            notification_type = notification.notification_type.to_string(),
            user_id = notification.user_app_id,
            error = e.to_string()
        ),
    }
}

/// Persists the promotion after `delay` on a background task.
/// Failures are logged and dropped.
pub fn schedule_promotion(repo: repo::ImplAppRepo, user_id: i64, delay: Duration) {
    ntex::rt::spawn(async move {
        tokio::time::sleep(delay).await;

        match repo.insert_notification(&promotion(user_id)).await {
            Ok(_) => metric::incr_notification_statds(&NotificationType::Promotion.to_string()),
            Err(e) => logfire::error!(
                "Failed to insert promotion for user {user_id}: {error}",
                user_id = user_id,
                error = e.to_string()
            ),
        }
    });
}

/// Latest notifications of the user, newest first
pub async fn get_notifications(
    repo: &repo::ImplAppRepo,
    user_id: i64,
) -> anyhow::Result<Vec<Notification>> {
    repo.get_notifications_by_user_id(user_id, consts::NOTIFICATIONS_PAGE_SIZE)
        .await
}

pub async fn mark_as_read(
    repo: &repo::ImplAppRepo,
    user_id: i64,
    notification_id: i64,
) -> anyhow::Result<Notification> {
    match repo.mark_notification_read(user_id, notification_id).await? {
        Some(notification) => Ok(notification),
        None => bail!(DomainError::not_found("Notification not found")),
    }
}

pub async fn mark_all_as_read(repo: &repo::ImplAppRepo, user_id: i64) -> anyhow::Result<u64> {
    repo.mark_all_notifications_read(user_id).await
}

pub async fn get_unread_count(repo: &repo::ImplAppRepo, user_id: i64) -> anyhow::Result<i64> {
    repo.count_unread_notifications(user_id).await
}

pub async fn delete_notification(
    repo: &repo::ImplAppRepo,
    user_id: i64,
    notification_id: i64,
) -> anyhow::Result<()> {
    if !repo.delete_notification(user_id, notification_id).await? {
        bail!(DomainError::not_found("Notification not found"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::{appointment::TimeSlot, pet::PetSummary},
        repo::{AppRepo, MockAppRepo},
    };
    use chrono::NaiveDate;
    use std::rc::Rc;

    fn appointment() -> Appointment {
        Appointment {
            id: 7,
            user_app_id: 3,
            appointment_date: NaiveDate::from_ymd_opt(2025, 11, 3).unwrap(),
            appointment_time: TimeSlot::EarlyMorning,
            pet: Some(PetSummary {
                name: "Mochi".into(),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    #[test]
    fn test_appointment_created_message() {
        let notification = appointment_created(&appointment());

        assert_eq!(notification.notification_type, NotificationType::Appointment);
        assert_eq!(notification.appointment_id, Some(7));
        assert_eq!(notification.user_app_id, 3);
        assert_eq!(
            notification.message,
            "Your appointment for Mochi on November 03, 2025 at 8:00 AM - 10:00 AM has been submitted and is pending approval."
        );
    }

    #[test]
    fn test_status_update_templates() {
        let appointment = appointment();

        assert!(status_update(&appointment, AppointmentStatus::Pending).is_none());

        let approved = status_update(&appointment, AppointmentStatus::Approved).unwrap();
        assert_eq!(approved.title, "Appointment Approved! ✅");
        assert!(approved.message.contains("Mochi"));
        assert!(approved.message.contains("November 03, 2025"));

        for status in [
            AppointmentStatus::InProgress,
            AppointmentStatus::Completed,
            AppointmentStatus::Claimed,
            AppointmentStatus::Cancelled,
        ] {
            let notification = status_update(&appointment, status).unwrap();
            assert_eq!(notification.notification_type, NotificationType::StatusUpdate);
            assert!(notification.message.contains("Mochi"));
        }
    }

    #[test]
    fn test_templates_without_pet_fall_back() {
        let appointment = Appointment {
            pet: None,
            ..appointment()
        };

        assert!(reminder(&appointment).message.contains("your pet"));
    }

    #[ntex::test]
    async fn test_mark_as_read_not_found() {
        let mut mock_repo = MockAppRepo::new();
        mock_repo
            .expect_mark_notification_read()
            .times(1)
            .returning(|_, _| Ok(None));
        let repo: repo::ImplAppRepo = Rc::new(mock_repo);

        let err = mark_as_read(&repo, 1, 99).await.unwrap_err();
        assert_eq!(
            err.downcast_ref::<DomainError>(),
            Some(&DomainError::not_found("Notification not found"))
        );
    }

    #[ntex::test]
    async fn test_get_notifications_uses_page_size() {
        let mut mock_repo = MockAppRepo::new();
        mock_repo
            .expect_get_notifications_by_user_id()
            .withf(|user_id, limit| *user_id == 1 && *limit == consts::NOTIFICATIONS_PAGE_SIZE)
            .times(1)
            .returning(|_, _| Ok(vec![]));
        let repo: repo::ImplAppRepo = Rc::new(mock_repo);

        assert!(get_notifications(&repo, 1).await.unwrap().is_empty());
    }

    #[ntex::test]
    async fn test_schedule_promotion_inserts_after_delay() {
        let repo = Rc::new(crate::repo::sqlite::setup_in_memory_repo().await);
        let user = crate::models::user_app::User::create_default("alice01", "a@x.com", "h".into());
        let user_id = repo.insert_user_app(&user, &welcome(0, "alice01")).await.unwrap();

        schedule_promotion(repo.clone(), user_id, Duration::from_millis(50));
        assert_eq!(repo.count_unread_notifications(user_id).await.unwrap(), 1);

        tokio::time::sleep(Duration::from_millis(300)).await;
        let notifications = repo.get_notifications_by_user_id(user_id, 50).await.unwrap();
        assert_eq!(notifications.len(), 2);
        assert!(
            notifications
                .iter()
                .any(|n| n.notification_type == NotificationType::Promotion)
        );
    }
}
