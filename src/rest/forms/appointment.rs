use crate::models::appointment::{AppointmentStatus, PaymentMethod, ServiceLine, TimeSlot};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;

/// Every field is required, missing ones are reported by the api layer
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CreateAppointmentForm {
    pub pet_id: Option<i64>,
    pub services: Option<Vec<ServiceLine>>,
    pub appointment_date: Option<NaiveDate>,
    pub appointment_time: Option<TimeSlot>,
    pub total_amount: Option<Decimal>,
    pub payment_method: Option<PaymentMethod>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAppointmentForm {
    pub status: Option<AppointmentStatus>,
    pub cancellation_reason: Option<String>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentStatusForm {
    pub status: Option<AppointmentStatus>,
    pub admin_notes: Option<String>,
}
