use chrono::{DateTime, NaiveDate, Utc};
use derive_more::Display;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{pet::PetSummary, user_app::UserSummary};

#[derive(Debug, Display, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, Hash, sqlx::Type)]
#[sqlx(type_name = "varchar", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppointmentStatus {
    #[default]
    #[display("PENDING")]
    Pending,
    #[display("APPROVED")]
    Approved,
    #[display("IN_PROGRESS")]
    InProgress,
    #[display("COMPLETED")]
    Completed,
    #[display("CLAIMED")]
    Claimed,
    #[display("CANCELLED")]
    Cancelled,
}

impl AppointmentStatus {
    pub const ALL: [AppointmentStatus; 6] = [
        AppointmentStatus::Pending,
        AppointmentStatus::Approved,
        AppointmentStatus::InProgress,
        AppointmentStatus::Completed,
        AppointmentStatus::Claimed,
        AppointmentStatus::Cancelled,
    ];

    /// Statuses an admin may move an appointment to from `self` when the
    /// transition table is enforced.
    /// Re-setting the current status is handled by the caller.
    pub fn allowed_next(&self) -> &'static [AppointmentStatus] {
        match self {
            AppointmentStatus::Pending => {
                &[AppointmentStatus::Approved, AppointmentStatus::Cancelled]
            }
            AppointmentStatus::Approved => {
                &[AppointmentStatus::InProgress, AppointmentStatus::Cancelled]
            }
            AppointmentStatus::InProgress => {
                &[AppointmentStatus::Completed, AppointmentStatus::Cancelled]
            }
            AppointmentStatus::Completed => &[AppointmentStatus::Claimed],
            AppointmentStatus::Claimed | AppointmentStatus::Cancelled => &[],
        }
    }
}

#[derive(Debug, Display, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "varchar", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    #[default]
    #[display("CREDIT_CARD")]
    CreditCard,
    #[display("OVER_THE_COUNTER")]
    OverTheCounter,
}

// Payment is not processed, rows stay pending
#[derive(Debug, Display, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "varchar", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    #[default]
    #[display("PENDING")]
    Pending,
    #[display("PAID")]
    Paid,
    #[display("FAILED")]
    Failed,
}

/// Fixed grooming time slots, serialized by their display label
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, Hash, sqlx::Type)]
#[sqlx(type_name = "varchar", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TimeSlot {
    #[default]
    #[serde(rename = "8:00 AM - 10:00 AM")]
    EarlyMorning,
    #[serde(rename = "10:00 AM - 12:00 PM")]
    LateMorning,
    #[serde(rename = "1:30 PM - 3:30 PM")]
    EarlyAfternoon,
    #[serde(rename = "3:30 PM - 5:30 PM")]
    LateAfternoon,
}

impl TimeSlot {
    pub const ALL: [TimeSlot; 4] = [
        TimeSlot::EarlyMorning,
        TimeSlot::LateMorning,
        TimeSlot::EarlyAfternoon,
        TimeSlot::LateAfternoon,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            TimeSlot::EarlyMorning => "8:00 AM - 10:00 AM",
            TimeSlot::LateMorning => "10:00 AM - 12:00 PM",
            TimeSlot::EarlyAfternoon => "1:30 PM - 3:30 PM",
            TimeSlot::LateAfternoon => "3:30 PM - 5:30 PM",
        }
    }
}

impl std::fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ServiceLine {
    pub service_name: String,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub price: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Appointment {
    pub id: i64,
    pub user_app_id: i64,
    pub pet_id: i64,
    pub services: Vec<ServiceLine>,
    pub appointment_date: NaiveDate,
    pub appointment_time: TimeSlot,
    pub total_amount: Decimal,
    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,
    pub status: AppointmentStatus,
    pub admin_notes: String,
    pub cancellation_reason: String,
    pub reminder_sent: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Expanded on reads, `None` right after an insert
    pub pet: Option<PetSummary>,
    /// Only expanded on admin listings
    pub user: Option<UserSummary>,
}

impl Appointment {
    pub fn is_owned_by(&self, user_id: i64) -> bool {
        self.user_app_id == user_id
    }

    pub fn pet_name(&self) -> &str {
        self.pet.as_ref().map(|p| p.name.as_str()).unwrap_or("your pet")
    }
}
