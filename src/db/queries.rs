use anyhow::Context;
use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::{params, Connection, OptionalExtension};

use crate::models::{Booking, NewBooking};

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const BOOKING_COLUMNS: &str = "id, full_name, phone, email, car_make, car_model, year_manufacture, \
     preferred_date, time_slot, services_needed, issue_description, pickup_service, created_at";

// ── Bookings ──

/// Number of bookings already holding the given (date, time slot) pair.
pub fn count_bookings_in_slot(
    conn: &Connection,
    date: &NaiveDate,
    time_slot: &str,
) -> anyhow::Result<i64> {
    let date = date.format(DATE_FORMAT).to_string();
    let count = conn.query_row(
        "SELECT COUNT(*) FROM service_bookings WHERE preferred_date = ?1 AND time_slot = ?2",
        params![date, time_slot],
        |row| row.get(0),
    )?;
    Ok(count)
}

/// Inserts a booking and returns the identifier assigned by the store.
pub fn insert_booking(conn: &Connection, booking: &NewBooking) -> anyhow::Result<i64> {
    let preferred_date = booking
        .preferred_date
        .map(|d| d.format(DATE_FORMAT).to_string());

    conn.execute(
        "INSERT INTO service_bookings
            (full_name, phone, email, car_make, car_model, year_manufacture,
             preferred_date, time_slot, services_needed, issue_description, pickup_service)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
        params![
            booking.full_name,
            booking.phone,
            booking.email,
            booking.car_make,
            booking.car_model,
            booking.year_manufacture,
            preferred_date,
            booking.time_slot,
            booking.services_text(),
            booking.issue_description,
            booking.pickup_service,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn get_booking_by_id(conn: &Connection, id: i64) -> anyhow::Result<Option<Booking>> {
    let sql = format!("SELECT {BOOKING_COLUMNS} FROM service_bookings WHERE id = ?1");
    let row = conn
        .query_row(&sql, params![id], |row| Ok(parse_booking_row(row)))
        .optional()?;

    row.transpose()
}

/// All bookings, newest first.
pub fn list_bookings(conn: &Connection) -> anyhow::Result<Vec<Booking>> {
    let sql = format!(
        "SELECT {BOOKING_COLUMNS} FROM service_bookings ORDER BY created_at DESC, id DESC"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([], |row| Ok(parse_booking_row(row)))?;

    let mut bookings = vec![];
    for row in rows {
        bookings.push(row??);
    }
    Ok(bookings)
}

pub fn count_bookings(conn: &Connection) -> anyhow::Result<i64> {
    let count = conn.query_row("SELECT COUNT(*) FROM service_bookings", [], |row| row.get(0))?;
    Ok(count)
}

fn parse_booking_row(row: &rusqlite::Row) -> anyhow::Result<Booking> {
    let preferred_date_str: Option<String> = row.get(7)?;
    let created_at_str: String = row.get(12)?;

    let preferred_date = preferred_date_str
        .map(|s| {
            NaiveDate::parse_from_str(&s, DATE_FORMAT)
                .with_context(|| format!("invalid preferred_date in store: {s}"))
        })
        .transpose()?;
    let created_at = NaiveDateTime::parse_from_str(&created_at_str, TIMESTAMP_FORMAT)
        .with_context(|| format!("invalid created_at in store: {created_at_str}"))?;

    Ok(Booking {
        id: row.get(0)?,
        full_name: row.get(1)?,
        phone: row.get(2)?,
        email: row.get(3)?,
        car_make: row.get(4)?,
        car_model: row.get(5)?,
        year_manufacture: row.get(6)?,
        preferred_date,
        time_slot: row.get(8)?,
        services_needed: row.get(9)?,
        issue_description: row.get(10)?,
        pickup_service: row.get(11)?,
        created_at,
    })
}
