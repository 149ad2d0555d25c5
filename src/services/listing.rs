use rusqlite::Connection;
use serde::Serialize;

use crate::db::queries;
use crate::models::Booking;

/// Wire shape of a booking as shown to the admin view.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct BookingView {
    pub id: i64,
    pub full_name: String,
    pub phone: String,
    pub email: Option<String>,
    pub car_make: String,
    pub car_model: String,
    pub year_manufacture: Option<i32>,
    pub preferred_date: Option<String>,
    pub time_slot: String,
    pub services_needed: String,
    pub issue_description: Option<String>,
    pub pickup_service: bool,
    pub created_at: String,
}

impl From<Booking> for BookingView {
    fn from(b: Booking) -> Self {
        Self {
            id: b.id,
            full_name: b.full_name,
            phone: b.phone,
            email: b.email,
            car_make: b.car_make,
            car_model: b.car_model,
            year_manufacture: b.year_manufacture,
            preferred_date: b.preferred_date.map(|d| d.format("%Y-%m-%d").to_string()),
            time_slot: b.time_slot,
            services_needed: b.services_needed,
            issue_description: b.issue_description,
            pickup_service: b.pickup_service,
            created_at: b.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}

/// Every stored booking, newest first. Always the complete set.
pub fn all_bookings(conn: &Connection) -> anyhow::Result<Vec<BookingView>> {
    let bookings = queries::list_bookings(conn)?;
    Ok(bookings.into_iter().map(BookingView::from).collect())
}
