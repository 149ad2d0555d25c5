use anyhow::Context;
use chrono::NaiveDate;
use rusqlite::{Connection, TransactionBehavior};

use crate::db::queries;
use crate::models::{Booking, BookingSubmission, NewBooking};

/// Maximum number of bookings per (preferred date, time slot) pair.
pub const SLOT_CAPACITY: i64 = 2;

#[derive(Debug, thiserror::Error)]
pub enum IntakeError {
    #[error("validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    #[error("time slot is full")]
    SlotFull,

    #[error("storage error: {0:#}")]
    Storage(#[from] anyhow::Error),
}

/// Validates and normalizes a raw submission.
///
/// Every required field is checked, so the error list names all missing fields at
/// once rather than only the first.
pub fn normalize(submission: &BookingSubmission) -> Result<NewBooking, Vec<String>> {
    let mut errors = Vec::new();

    let full_name = non_empty(&submission.full_name);
    let phone = non_empty(&submission.phone);
    let car_make = non_empty(&submission.car_make);
    let car_model = non_empty(&submission.car_model);
    let time_slot = non_empty(&submission.time_slot);
    let services_needed: Vec<String> = submission
        .services_needed
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();

    if full_name.is_none() {
        errors.push("Full Name is required".to_string());
    }
    if phone.is_none() {
        errors.push("Phone number is required".to_string());
    }
    if car_make.is_none() {
        errors.push("Car make is required".to_string());
    }
    if car_model.is_none() {
        errors.push("Car model is required".to_string());
    }
    if time_slot.is_none() {
        errors.push("Time slot is required".to_string());
    }
    if services_needed.is_empty() {
        errors.push("At least one service must be selected".to_string());
    }

    let preferred_date = match non_empty(&submission.preferred_date) {
        Some(raw) => match NaiveDate::parse_from_str(&raw, "%Y-%m-%d") {
            Ok(date) => Some(date),
            Err(_) => {
                errors.push("Preferred date must be a valid date (YYYY-MM-DD)".to_string());
                None
            }
        },
        None => None,
    };

    match (full_name, phone, car_make, car_model, time_slot) {
        (Some(full_name), Some(phone), Some(car_make), Some(car_model), Some(time_slot))
            if errors.is_empty() =>
        {
            Ok(NewBooking {
                full_name,
                phone,
                email: non_empty(&submission.email),
                car_make,
                car_model,
                year_manufacture: submission.year_manufacture.as_deref().and_then(parse_year),
                preferred_date,
                time_slot,
                services_needed,
                issue_description: non_empty(&submission.issue_description),
                pickup_service: submission.pickup_service.as_deref().map(str::trim) == Some("yes"),
            })
        }
        _ => Err(errors),
    }
}

/// Validates a submission and stores it if its slot still has room.
///
/// The slot count and the insert share one `BEGIN IMMEDIATE` transaction, so the
/// write lock is held from the count until commit and concurrent submitters for
/// the same slot are serialized. Bookings without a preferred date have no slot
/// and are not capacity-limited.
pub fn submit_booking(
    conn: &mut Connection,
    submission: &BookingSubmission,
) -> Result<Booking, IntakeError> {
    let booking = normalize(submission).map_err(IntakeError::Validation)?;

    let tx = conn
        .transaction_with_behavior(TransactionBehavior::Immediate)
        .context("failed to begin booking transaction")?;

    if let Some(date) = &booking.preferred_date {
        let taken = queries::count_bookings_in_slot(&tx, date, &booking.time_slot)?;
        if taken >= SLOT_CAPACITY {
            return Err(IntakeError::SlotFull);
        }
    }

    let id = queries::insert_booking(&tx, &booking)?;
    let stored = queries::get_booking_by_id(&tx, id)?
        .with_context(|| format!("booking {id} missing after insert"))?;

    tx.commit().context("failed to commit booking")?;

    Ok(stored)
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Accepts anything numeric-looking: integers, or finite decimals truncated
/// toward zero. Everything else is treated as absent.
fn parse_year(raw: &str) -> Option<i32> {
    let raw = raw.trim();
    if let Ok(year) = raw.parse::<i32>() {
        return Some(year);
    }
    raw.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= f64::from(i32::MIN) && *v <= f64::from(i32::MAX))
        .map(|v| v.trunc() as i32)
}
