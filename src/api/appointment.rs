//! # Appointment API Module
//!
//! Booking, owner cancellation and admin status changes. Notifications are
//! written after the change they report, a failed notification never undoes it.

use crate::{
    api::{
        errors::DomainError,
        lifecycle::{self, Actor, Transition},
        notification, slots, summary,
    },
    consts, metric,
    models::{
        appointment::{
            Appointment, AppointmentStatus, PaymentMethod, PaymentStatus, ServiceLine, TimeSlot,
        },
        pet::PetSummary,
        user_app::UserSummary,
    },
    repo,
    rest::forms::appointment::{AppointmentStatusForm, CreateAppointmentForm, UpdateAppointmentForm},
    utils,
};
use anyhow::bail;
use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use rust_decimal::Decimal;
use serde::Serialize;

/// Booking rules copied from the app config at startup.
/// Every `enforce_*` flag is off by default.
#[derive(Debug, Clone)]
pub struct BookingPolicy {
    pub timezone: Tz,
    pub window_days: u32,
    pub enforce_price_list: bool,
    /// Reject past, weekend and out of window dates on creation
    pub enforce_booking_dates: bool,
    /// Restrict admins to [AppointmentStatus::allowed_next]
    pub enforce_status_transitions: bool,
}

impl BookingPolicy {
    pub fn today(&self) -> NaiveDate {
        slots::business_today(self.timezone)
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentSchema {
    pub id: i64,
    pub user_id: i64,
    pub pet_id: i64,
    pub services: Vec<ServiceLine>,
    pub appointment_date: NaiveDate,
    pub appointment_date_label: String,
    pub appointment_time: TimeSlot,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub total_amount: Decimal,
    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,
    pub status: AppointmentStatus,
    pub admin_notes: String,
    pub cancellation_reason: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pet: Option<PetSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserSummary>,
}

impl From<Appointment> for AppointmentSchema {
    fn from(appointment: Appointment) -> Self {
        AppointmentSchema {
            id: appointment.id,
            user_id: appointment.user_app_id,
            pet_id: appointment.pet_id,
            services: appointment.services,
            appointment_date: appointment.appointment_date,
            appointment_date_label: slots::date_label(appointment.appointment_date),
            appointment_time: appointment.appointment_time,
            total_amount: appointment.total_amount,
            payment_method: appointment.payment_method,
            payment_status: appointment.payment_status,
            status: appointment.status,
            admin_notes: appointment.admin_notes,
            cancellation_reason: appointment.cancellation_reason,
            created_at: appointment.created_at,
            updated_at: appointment.updated_at,
            pet: appointment.pet,
            user: appointment.user,
        }
    }
}

fn into_schemas(appointments: Vec<Appointment>) -> Vec<AppointmentSchema> {
    appointments.into_iter().map(AppointmentSchema::from).collect()
}

async fn get_any_appointment(
    repo: &repo::ImplAppRepo,
    appointment_id: i64,
) -> anyhow::Result<Appointment> {
    match repo.get_appointment_by_id(appointment_id).await? {
        Some(appointment) => Ok(appointment),
        None => bail!(DomainError::not_found("Appointment not found")),
    }
}

/// Appointment owned by `user_id`, absent and foreign ones look the same
async fn get_owned_appointment(
    repo: &repo::ImplAppRepo,
    user_id: i64,
    appointment_id: i64,
) -> anyhow::Result<Appointment> {
    match repo.get_appointment_by_id(appointment_id).await? {
        Some(appointment) if appointment.is_owned_by(user_id) => Ok(appointment),
        _ => bail!(DomainError::not_found("Appointment not found")),
    }
}

/// Books a PENDING appointment for one of the user pets.
///
/// Date and total are stored as submitted unless the policy enforces the
/// booking dates or the price list.
pub async fn create_appointment(
    repo: &repo::ImplAppRepo,
    policy: &BookingPolicy,
    user_id: i64,
    form: CreateAppointmentForm,
) -> anyhow::Result<AppointmentSchema> {
    let _span = logfire::span!("create_appointment").entered();

    let (
        Some(pet_id),
        Some(services),
        Some(appointment_date),
        Some(appointment_time),
        Some(total_amount),
        Some(payment_method),
    ) = (
        form.pet_id,
        form.services,
        form.appointment_date,
        form.appointment_time,
        form.total_amount,
        form.payment_method,
    )
    else {
        bail!(DomainError::validation("All fields are required"));
    };

    if services.is_empty() {
        bail!(DomainError::validation("All fields are required"));
    }

    if total_amount <= Decimal::ZERO {
        bail!(DomainError::validation("Total amount must be greater than zero"));
    }

    let Some(pet) = repo.get_pet_by_id(pet_id, user_id).await? else {
        bail!(DomainError::not_found(
            "Pet not found or doesn't belong to you"
        ));
    };

    if policy.enforce_booking_dates {
        slots::check_bookable(appointment_date, policy.today(), policy.window_days)?;
    }
    summary::verify_submission(&services, total_amount, policy.enforce_price_list)?;

    let now = Utc::now();
    let mut appointment = Appointment {
        user_app_id: user_id,
        pet_id,
        services,
        appointment_date,
        appointment_time,
        total_amount,
        payment_method,
        payment_status: PaymentStatus::Pending,
        status: AppointmentStatus::Pending,
        created_at: now,
        updated_at: now,
        pet: Some(PetSummary::from(&pet)),
        ..Default::default()
    };

    appointment.id = repo
        .insert_appointment(&appointment, &notification::appointment_created(&appointment))
        .await?;

    metric::incr_appointment_status_statds(&AppointmentStatus::Pending.to_string());
    Ok(appointment.into())
}

/// Appointments of the user, newest first
pub async fn get_user_appointments(
    repo: &repo::ImplAppRepo,
    user_id: i64,
) -> anyhow::Result<Vec<AppointmentSchema>> {
    Ok(into_schemas(repo.get_appointments_by_user_id(user_id).await?))
}

pub async fn get_user_appointment(
    repo: &repo::ImplAppRepo,
    user_id: i64,
    appointment_id: i64,
) -> anyhow::Result<AppointmentSchema> {
    Ok(get_owned_appointment(repo, user_id, appointment_id)
        .await?
        .into())
}

/// Owner update: the only allowed status is CANCELLED and a missing status
/// leaves the appointment untouched.
pub async fn update_user_appointment(
    repo: &repo::ImplAppRepo,
    user_id: i64,
    appointment_id: i64,
    form: UpdateAppointmentForm,
) -> anyhow::Result<AppointmentSchema> {
    let _span = logfire::span!("update_user_appointment").entered();

    let appointment = get_owned_appointment(repo, user_id, appointment_id).await?;

    let Some(requested) = form.status else {
        return Ok(appointment.into());
    };

    let Transition::Changed { to, .. } =
        lifecycle::authorize_transition(Actor::Owner, appointment.status, requested, false)?
    else {
        return Ok(appointment.into());
    };

    let cancellation_reason = form
        .cancellation_reason
        .map(|reason| utils::clean_text(&reason))
        .filter(|reason| !reason.is_empty())
        .unwrap_or_else(|| consts::DEFAULT_CANCELLATION_REASON.to_string());

    repo.update_appointment_status(appointment.id, to, None, Some(cancellation_reason))
        .await?;
    metric::incr_appointment_status_statds(&to.to_string());

    notification::dispatch(repo, &notification::owner_cancelled(&appointment)).await;
    Ok(get_any_appointment(repo, appointment.id).await?.into())
}

/// Hard delete, notifications pointing to it are kept
pub async fn delete_user_appointment(
    repo: &repo::ImplAppRepo,
    user_id: i64,
    appointment_id: i64,
) -> anyhow::Result<()> {
    if !repo.delete_appointment(appointment_id, user_id).await? {
        bail!(DomainError::not_found("Appointment not found"));
    }

    Ok(())
}

/// Every appointment with owner and pet, newest first
pub async fn get_all_appointments(
    repo: &repo::ImplAppRepo,
) -> anyhow::Result<Vec<AppointmentSchema>> {
    Ok(into_schemas(repo.get_all_appointments().await?))
}

/// Admin status change, any status may be set from any other one unless the
/// policy enforces the transition table.
///
/// Re-setting the current status only updates the notes. A real change is
/// followed by its STATUS_UPDATE notification.
pub async fn set_appointment_status(
    repo: &repo::ImplAppRepo,
    policy: &BookingPolicy,
    appointment_id: i64,
    form: AppointmentStatusForm,
) -> anyhow::Result<AppointmentSchema> {
    let _span = logfire::span!("set_appointment_status").entered();

    let Some(requested) = form.status else {
        bail!(DomainError::validation("Status is required"));
    };

    let appointment = get_any_appointment(repo, appointment_id).await?;
    let transition = lifecycle::authorize_transition(
        Actor::Admin,
        appointment.status,
        requested,
        policy.enforce_status_transitions,
    )?;

    let admin_notes = form
        .admin_notes
        .map(|notes| utils::clean_text(&notes))
        .filter(|notes| !notes.is_empty());

    repo.update_appointment_status(appointment.id, requested, admin_notes, None)
        .await?;

    if let Transition::Changed { to, .. } = transition {
        metric::incr_appointment_status_statds(&to.to_string());

        if let Some(status_notification) = notification::status_update(&appointment, to) {
            notification::dispatch(repo, &status_notification).await;
        }
    }

    Ok(get_any_appointment(repo, appointment.id).await?.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::{
            notification::NotificationType,
            pet::{Pet, PetSize},
            user_app::User,
        },
        repo::{AppRepo, MockAppRepo, sqlite::setup_in_memory_repo},
    };
    use chrono::{Datelike, TimeDelta, Weekday};
    use rust_decimal_macros::dec;
    use std::rc::Rc;

    struct Fixture {
        repo: repo::ImplAppRepo,
        policy: BookingPolicy,
        owner_id: i64,
        other_id: i64,
        pet_id: i64,
    }

    async fn fixture() -> Fixture {
        let sqlite_repo = setup_in_memory_repo().await;

        let mut user_ids = vec![];
        for username in ["owner01", "other01"] {
            let user = User::create_default(username, &format!("{username}@x.com"), "h".into());
            user_ids.push(
                sqlite_repo
                    .insert_user_app(&user, &notification::welcome(0, username))
                    .await
                    .unwrap(),
            );
        }

        let now = Utc::now();
        let pet_id = sqlite_repo
            .insert_pet(&Pet {
                user_app_id: user_ids[0],
                name: "Mochi".into(),
                breed: "Shih Tzu".into(),
                size: PetSize::Small,
                created_at: now,
                updated_at: now,
                ..Default::default()
            })
            .await
            .unwrap();

        Fixture {
            repo: Rc::new(sqlite_repo),
            policy: BookingPolicy {
                timezone: chrono_tz::Asia::Manila,
                window_days: 30,
                enforce_price_list: false,
                enforce_booking_dates: false,
                enforce_status_transitions: false,
            },
            owner_id: user_ids[0],
            other_id: user_ids[1],
            pet_id,
        }
    }

    /// First weekday strictly after today inside the window
    fn next_weekday(policy: &BookingPolicy) -> NaiveDate {
        policy
            .today()
            .iter_days()
            .skip(1)
            .find(|date| slots::is_bookable(*date))
            .unwrap()
    }

    fn next_weekend_day(policy: &BookingPolicy) -> NaiveDate {
        policy
            .today()
            .iter_days()
            .find(|date| matches!(date.weekday(), Weekday::Sat | Weekday::Sun))
            .unwrap()
    }

    fn create_form(pet_id: i64, date: NaiveDate, total: Decimal) -> CreateAppointmentForm {
        CreateAppointmentForm {
            pet_id: Some(pet_id),
            services: Some(vec![
                ServiceLine {
                    service_name: "Bath & Blow Dry".into(),
                    price: dec!(350),
                },
                ServiceLine {
                    service_name: "Nail Trimming".into(),
                    price: dec!(150),
                },
            ]),
            appointment_date: Some(date),
            appointment_time: Some(TimeSlot::LateMorning),
            total_amount: Some(total),
            payment_method: Some(PaymentMethod::OverTheCounter),
        }
    }

    async fn create_pending(f: &Fixture) -> AppointmentSchema {
        create_appointment(
            &f.repo,
            &f.policy,
            f.owner_id,
            create_form(f.pet_id, next_weekday(&f.policy), dec!(500)),
        )
        .await
        .unwrap()
    }

    fn domain_err(err: anyhow::Error) -> DomainError {
        err.downcast::<DomainError>().unwrap()
    }

    #[ntex::test]
    async fn test_create_appointment() {
        let f = fixture().await;

        let appointment = create_pending(&f).await;
        assert_eq!(appointment.status, AppointmentStatus::Pending);
        assert_eq!(appointment.payment_status, PaymentStatus::Pending);
        assert_eq!(appointment.pet.as_ref().unwrap().name, "Mochi");
        assert_eq!(appointment.services.len(), 2);

        let notifications = f.repo.get_notifications_by_user_id(f.owner_id, 50).await.unwrap();
        assert_eq!(notifications[0].notification_type, NotificationType::Appointment);
        assert_eq!(notifications[0].appointment_id, Some(appointment.id));
        assert!(notifications[0].message.contains("Mochi"));
        assert!(
            notifications[0]
                .message
                .contains(&appointment.appointment_date_label)
        );
    }

    #[ntex::test]
    async fn test_create_appointment_with_foreign_pet_is_not_found() {
        let f = fixture().await;

        let err = create_appointment(
            &f.repo,
            &f.policy,
            f.other_id,
            create_form(f.pet_id, next_weekday(&f.policy), dec!(500)),
        )
        .await
        .unwrap_err();

        assert!(matches!(domain_err(err), DomainError::NotFound(_)));
        assert!(f.repo.get_all_appointments().await.unwrap().is_empty());
    }

    #[ntex::test]
    async fn test_create_appointment_missing_fields() {
        let f = fixture().await;

        let mut form = create_form(f.pet_id, next_weekday(&f.policy), dec!(500));
        form.payment_method = None;
        let err = create_appointment(&f.repo, &f.policy, f.owner_id, form)
            .await
            .unwrap_err();
        assert_eq!(domain_err(err), DomainError::validation("All fields are required"));

        let mut form = create_form(f.pet_id, next_weekday(&f.policy), dec!(500));
        form.services = Some(vec![]);
        assert!(
            create_appointment(&f.repo, &f.policy, f.owner_id, form)
                .await
                .is_err()
        );
    }

    #[ntex::test]
    async fn test_create_appointment_stores_any_date_by_default() {
        let f = fixture().await;

        for date in [
            next_weekend_day(&f.policy),
            f.policy.today() - TimeDelta::days(1),
            f.policy.today() + TimeDelta::days(60),
        ] {
            let appointment = create_appointment(
                &f.repo,
                &f.policy,
                f.owner_id,
                create_form(f.pet_id, date, dec!(500)),
            )
            .await
            .unwrap();
            assert_eq!(appointment.appointment_date, date);
        }
    }

    #[ntex::test]
    async fn test_create_appointment_enforced_dates_reject_weekend_and_past() {
        let mut f = fixture().await;
        f.policy.enforce_booking_dates = true;

        for date in [
            next_weekend_day(&f.policy),
            f.policy.today() - TimeDelta::days(1),
            f.policy.today() + TimeDelta::days(60),
        ] {
            let err = create_appointment(
                &f.repo,
                &f.policy,
                f.owner_id,
                create_form(f.pet_id, date, dec!(500)),
            )
            .await
            .unwrap_err();
            assert!(matches!(domain_err(err), DomainError::Validation(_)));
        }
    }

    #[ntex::test]
    async fn test_create_appointment_keeps_mismatched_total() {
        let f = fixture().await;

        let appointment = create_appointment(
            &f.repo,
            &f.policy,
            f.owner_id,
            create_form(f.pet_id, next_weekday(&f.policy), dec!(1)),
        )
        .await
        .unwrap();

        let stored = get_user_appointment(&f.repo, f.owner_id, appointment.id)
            .await
            .unwrap();
        assert_eq!(stored.total_amount, dec!(1));
    }

    #[ntex::test]
    async fn test_create_appointment_enforced_price_list() {
        let mut f = fixture().await;
        f.policy.enforce_price_list = true;

        let err = create_appointment(
            &f.repo,
            &f.policy,
            f.owner_id,
            create_form(f.pet_id, next_weekday(&f.policy), dec!(1)),
        )
        .await
        .unwrap_err();
        assert!(matches!(domain_err(err), DomainError::Validation(_)));

        assert!(
            create_appointment(
                &f.repo,
                &f.policy,
                f.owner_id,
                create_form(f.pet_id, next_weekday(&f.policy), dec!(500)),
            )
            .await
            .is_ok()
        );
    }

    #[ntex::test]
    async fn test_get_user_appointment_is_scoped() {
        let f = fixture().await;
        let appointment = create_pending(&f).await;

        assert!(
            get_user_appointment(&f.repo, f.owner_id, appointment.id)
                .await
                .is_ok()
        );
        let err = get_user_appointment(&f.repo, f.other_id, appointment.id)
            .await
            .unwrap_err();
        assert!(matches!(domain_err(err), DomainError::NotFound(_)));
        assert!(
            get_user_appointments(&f.repo, f.other_id)
                .await
                .unwrap()
                .is_empty()
        );
    }

    #[ntex::test]
    async fn test_owner_cancel_stores_reason() {
        let f = fixture().await;
        let appointment = create_pending(&f).await;

        let cancelled = update_user_appointment(
            &f.repo,
            f.owner_id,
            appointment.id,
            UpdateAppointmentForm {
                status: Some(AppointmentStatus::Cancelled),
                cancellation_reason: Some("schedule conflict".into()),
            },
        )
        .await
        .unwrap();

        assert_eq!(cancelled.status, AppointmentStatus::Cancelled);
        assert_eq!(cancelled.cancellation_reason, "schedule conflict");

        let notifications = f.repo.get_notifications_by_user_id(f.owner_id, 50).await.unwrap();
        assert_eq!(notifications[0].notification_type, NotificationType::StatusUpdate);
        assert_eq!(notifications[0].title, "Appointment Cancelled");

        // cancelling again changes nothing
        update_user_appointment(
            &f.repo,
            f.owner_id,
            appointment.id,
            UpdateAppointmentForm {
                status: Some(AppointmentStatus::Cancelled),
                cancellation_reason: None,
            },
        )
        .await
        .unwrap();
        let again = f.repo.get_notifications_by_user_id(f.owner_id, 50).await.unwrap();
        assert_eq!(again.len(), notifications.len());
    }

    #[ntex::test]
    async fn test_owner_cancel_default_reason() {
        let f = fixture().await;
        let appointment = create_pending(&f).await;

        let cancelled = update_user_appointment(
            &f.repo,
            f.owner_id,
            appointment.id,
            UpdateAppointmentForm {
                status: Some(AppointmentStatus::Cancelled),
                cancellation_reason: None,
            },
        )
        .await
        .unwrap();

        assert_eq!(cancelled.cancellation_reason, "Cancelled by user");
    }

    #[ntex::test]
    async fn test_owner_cannot_set_other_statuses() {
        let f = fixture().await;
        let appointment = create_pending(&f).await;

        let err = update_user_appointment(
            &f.repo,
            f.owner_id,
            appointment.id,
            UpdateAppointmentForm {
                status: Some(AppointmentStatus::Approved),
                cancellation_reason: None,
            },
        )
        .await
        .unwrap_err();
        assert_eq!(
            domain_err(err),
            DomainError::Forbidden("You can only cancel appointments".into())
        );

        let unchanged = update_user_appointment(
            &f.repo,
            f.owner_id,
            appointment.id,
            UpdateAppointmentForm::default(),
        )
        .await
        .unwrap();
        assert_eq!(unchanged.status, AppointmentStatus::Pending);
    }

    #[ntex::test]
    async fn test_admin_approval_notifies_pet_and_date() {
        let f = fixture().await;
        let appointment = create_pending(&f).await;

        let approved = set_appointment_status(
            &f.repo,
            &f.policy,
            appointment.id,
            AppointmentStatusForm {
                status: Some(AppointmentStatus::Approved),
                admin_notes: Some("bring leash".into()),
            },
        )
        .await
        .unwrap();
        assert_eq!(approved.status, AppointmentStatus::Approved);
        assert_eq!(approved.admin_notes, "bring leash");

        let notifications = f.repo.get_notifications_by_user_id(f.owner_id, 50).await.unwrap();
        let latest = &notifications[0];
        assert_eq!(latest.notification_type, NotificationType::StatusUpdate);
        assert!(latest.message.contains("Mochi"));
        assert!(latest.message.contains(&approved.appointment_date_label));
    }

    #[ntex::test]
    async fn test_admin_same_status_writes_no_notification() {
        let f = fixture().await;
        let appointment = create_pending(&f).await;
        let before = f.repo.get_notifications_by_user_id(f.owner_id, 50).await.unwrap();

        let updated = set_appointment_status(
            &f.repo,
            &f.policy,
            appointment.id,
            AppointmentStatusForm {
                status: Some(AppointmentStatus::Pending),
                admin_notes: Some("call first".into()),
            },
        )
        .await
        .unwrap();

        assert_eq!(updated.admin_notes, "call first");
        let after = f.repo.get_notifications_by_user_id(f.owner_id, 50).await.unwrap();
        assert_eq!(before.len(), after.len());
    }

    async fn set_status(f: &Fixture, appointment_id: i64, status: AppointmentStatus) -> AppointmentSchema {
        set_appointment_status(
            &f.repo,
            &f.policy,
            appointment_id,
            AppointmentStatusForm {
                status: Some(status),
                admin_notes: None,
            },
        )
        .await
        .unwrap()
    }

    async fn notification_count(f: &Fixture) -> usize {
        f.repo
            .get_notifications_by_user_id(f.owner_id, 50)
            .await
            .unwrap()
            .len()
    }

    #[ntex::test]
    async fn test_admin_sets_any_status_by_default() {
        let f = fixture().await;
        let appointment = create_pending(&f).await;

        for (status, title) in [
            (AppointmentStatus::Cancelled, "Appointment Cancelled"),
            (AppointmentStatus::Approved, "Appointment Approved! ✅"),
            (AppointmentStatus::Completed, "Grooming Complete! 🎉"),
        ] {
            let before = notification_count(&f).await;
            assert_eq!(set_status(&f, appointment.id, status).await.status, status);

            let notifications = f.repo.get_notifications_by_user_id(f.owner_id, 50).await.unwrap();
            assert_eq!(notifications.len(), before + 1);
            assert_eq!(notifications[0].title, title);
        }

        // PENDING has no template, the status still goes back
        let before = notification_count(&f).await;
        let reopened = set_status(&f, appointment.id, AppointmentStatus::Pending).await;
        assert_eq!(reopened.status, AppointmentStatus::Pending);
        assert_eq!(notification_count(&f).await, before);
    }

    #[ntex::test]
    async fn test_admin_status_change_survives_failed_notification() {
        let stored = Appointment {
            id: 7,
            user_app_id: 4,
            status: AppointmentStatus::Pending,
            ..Default::default()
        };

        let mut mock_repo = MockAppRepo::new();
        let first = stored.clone();
        let mut seq = mockall::Sequence::new();
        mock_repo
            .expect_get_appointment_by_id()
            .times(1)
            .in_sequence(&mut seq)
            .returning(move |_| Ok(Some(first.clone())));
        mock_repo
            .expect_update_appointment_status()
            .withf(|id, status, _, _| *id == 7 && *status == AppointmentStatus::Approved)
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _, _, _| Ok(()));
        mock_repo
            .expect_insert_notification()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Err(anyhow::anyhow!("database is locked")));
        let approved = Appointment {
            status: AppointmentStatus::Approved,
            ..stored
        };
        mock_repo
            .expect_get_appointment_by_id()
            .times(1)
            .in_sequence(&mut seq)
            .returning(move |_| Ok(Some(approved.clone())));

        let repo: repo::ImplAppRepo = Rc::new(mock_repo);
        let policy = BookingPolicy {
            timezone: chrono_tz::Asia::Manila,
            window_days: 30,
            enforce_price_list: false,
            enforce_booking_dates: false,
            enforce_status_transitions: false,
        };

        let updated = set_appointment_status(
            &repo,
            &policy,
            7,
            AppointmentStatusForm {
                status: Some(AppointmentStatus::Approved),
                admin_notes: None,
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.status, AppointmentStatus::Approved);
    }

    #[ntex::test]
    async fn test_admin_enforced_table_rejects_illegal_transition() {
        let mut f = fixture().await;
        f.policy.enforce_status_transitions = true;
        let appointment = create_pending(&f).await;

        let err = set_appointment_status(
            &f.repo,
            &f.policy,
            appointment.id,
            AppointmentStatusForm {
                status: Some(AppointmentStatus::Claimed),
                admin_notes: None,
            },
        )
        .await
        .unwrap_err();

        assert_eq!(
            domain_err(err),
            DomainError::IllegalTransition {
                from: AppointmentStatus::Pending,
                to: AppointmentStatus::Claimed,
            }
        );
    }

    #[ntex::test]
    async fn test_admin_status_is_required() {
        let f = fixture().await;

        let err = set_appointment_status(&f.repo, &f.policy, 1, AppointmentStatusForm::default())
            .await
            .unwrap_err();
        assert_eq!(domain_err(err), DomainError::validation("Status is required"));
    }

    #[ntex::test]
    async fn test_delete_keeps_notifications() {
        let f = fixture().await;
        let appointment = create_pending(&f).await;

        let err = delete_user_appointment(&f.repo, f.other_id, appointment.id)
            .await
            .unwrap_err();
        assert!(matches!(domain_err(err), DomainError::NotFound(_)));

        delete_user_appointment(&f.repo, f.owner_id, appointment.id)
            .await
            .unwrap();

        assert!(get_all_appointments(&f.repo).await.unwrap().is_empty());
        let notifications = f.repo.get_notifications_by_user_id(f.owner_id, 50).await.unwrap();
        assert!(
            notifications
                .iter()
                .any(|n| n.appointment_id == Some(appointment.id))
        );
    }

    #[ntex::test]
    async fn test_admin_listing_expands_owner() {
        let f = fixture().await;
        create_pending(&f).await;

        let all = get_all_appointments(&f.repo).await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].user.as_ref().unwrap().username, "owner01");
        assert_eq!(all[0].pet.as_ref().unwrap().name, "Mochi");
    }
}
