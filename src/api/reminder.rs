//! # Reminder API Module
//!
//! Day-before reminders for approved appointments. A periodic sweep looks
//! for appointments booked for tomorrow in the business timezone and writes
//! one REMINDER notification per appointment.

use crate::{api::notification, api::slots, metric, models::notification::NotificationType, repo};
use chrono::NaiveDate;
use chrono_tz::Tz;
use std::time::Duration;

/// Sends the reminders due for the day after `today`.
///
/// # Returns
/// * `anyhow::Result<usize>` - Number of reminders written in this run
///
/// An appointment already reminded is skipped by the repo, so running the
/// sweep twice for the same day sends nothing new.
pub async fn send_due_reminders(
    repo: &repo::ImplAppRepo,
    today: NaiveDate,
) -> anyhow::Result<usize> {
    let Some(tomorrow) = today.succ_opt() else {
        return Ok(0);
    };

    let mut sent = 0;
    for appointment in repo.get_appointments_due_for_reminder(tomorrow).await? {
        if repo
            .insert_appointment_reminder(appointment.id, &notification::reminder(&appointment))
            .await?
        {
            metric::incr_notification_statds(&NotificationType::Reminder.to_string());
            sent += 1;
        }
    }

    Ok(sent)
}

/// Runs [send_due_reminders] every `every` on a background task
pub fn spawn_reminder_sweep(repo: repo::ImplAppRepo, timezone: Tz, every: Duration) {
    ntex::rt::spawn(async move {
        let mut interval = tokio::time::interval(every);

        loop {
            interval.tick().await;

            match send_due_reminders(&repo, slots::business_today(timezone)).await {
                Ok(0) => {}
                Ok(sent) => tracing::info!("sent {} appointment reminders", sent),
                Err(e) => logfire::error!(
                    "Reminder sweep failed: {error}",
                    error = e.to_string()
                ),
            }
        }
    });
}
