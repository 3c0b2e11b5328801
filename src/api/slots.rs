//! Bookable dates and time slots.
//!
//! Availability is computed, never stored: every weekday inside the booking
//! window is open and every slot of an open day is offered.

use crate::{api::errors::DomainError, consts, models::appointment::TimeSlot};
use anyhow::bail;
use chrono::{Datelike, NaiveDate, TimeDelta, Utc, Weekday};
use chrono_tz::Tz;
use serde::Serialize;

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BookableDate {
    pub date: NaiveDate,
    pub day_name: String,
    pub label: String,
    pub available: bool,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SlotsSchema {
    pub dates: Vec<BookableDate>,
    pub time_slots: Vec<TimeSlot>,
}

/// Current date in the business timezone
pub fn business_today(tz: Tz) -> NaiveDate {
    Utc::now().with_timezone(&tz).date_naive()
}

pub fn is_bookable(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// "November 03, 2025"
pub fn date_label(date: NaiveDate) -> String {
    date.format(consts::APPOINTMENT_DATE_LABEL_FORMAT).to_string()
}

/// `days` consecutive dates starting at `today`
pub fn booking_window(today: NaiveDate, days: u32) -> Vec<BookableDate> {
    today
        .iter_days()
        .take(days as usize)
        .map(|date| BookableDate {
            date,
            day_name: date.format("%A").to_string(),
            label: date_label(date),
            available: is_bookable(date),
        })
        .collect()
}

/// Rejects dates in the past, beyond the window or on a weekend
pub fn check_bookable(date: NaiveDate, today: NaiveDate, days: u32) -> anyhow::Result<()> {
    if date < today {
        bail!(DomainError::validation("Appointment date is in the past"));
    }

    if date >= today + TimeDelta::days(days.into()) {
        bail!(DomainError::validation(
            "Appointment date is outside the booking window"
        ));
    }

    if !is_bookable(date) {
        bail!(DomainError::validation(
            "Appointments are not available on weekends"
        ));
    }

    Ok(())
}

pub fn get_slots(today: NaiveDate, days: u32) -> SlotsSchema {
    SlotsSchema {
        dates: booking_window(today, days),
        time_slots: TimeSlot::ALL.to_vec(),
    }
}
