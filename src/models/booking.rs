use chrono::{NaiveDate, NaiveDateTime};

/// Separator used when a list of selected services is stored as one text column.
pub const SERVICES_SEPARATOR: &str = ", ";

/// A stored service booking.
#[derive(Debug, Clone, PartialEq)]
pub struct Booking {
    pub id: i64,
    pub full_name: String,
    pub phone: String,
    pub email: Option<String>,
    pub car_make: String,
    pub car_model: String,
    pub year_manufacture: Option<i32>,
    pub preferred_date: Option<NaiveDate>,
    pub time_slot: String,
    pub services_needed: String,
    pub issue_description: Option<String>,
    pub pickup_service: bool,
    pub created_at: NaiveDateTime,
}

/// A validated, normalized booking ready to be inserted.
///
/// `id` and `created_at` are assigned by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBooking {
    pub full_name: String,
    pub phone: String,
    pub email: Option<String>,
    pub car_make: String,
    pub car_model: String,
    pub year_manufacture: Option<i32>,
    pub preferred_date: Option<NaiveDate>,
    pub time_slot: String,
    pub services_needed: Vec<String>,
    pub issue_description: Option<String>,
    pub pickup_service: bool,
}

impl NewBooking {
    pub fn services_text(&self) -> String {
        self.services_needed.join(SERVICES_SEPARATOR)
    }
}

/// Raw form submission as received from the booking page.
///
/// Every field is kept as submitted; normalization happens in the intake service.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookingSubmission {
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub car_make: Option<String>,
    pub car_model: Option<String>,
    pub year_manufacture: Option<String>,
    pub preferred_date: Option<String>,
    pub time_slot: Option<String>,
    pub services_needed: Vec<String>,
    pub issue_description: Option<String>,
    pub pickup_service: Option<String>,
}

impl BookingSubmission {
    /// Builds a submission from decoded form pairs.
    ///
    /// `servicesNeeded` may repeat, and the bracketed `servicesNeeded[]` spelling is
    /// accepted as well. For the other keys the last occurrence wins. Unknown keys
    /// are ignored.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut submission = Self::default();
        for (key, value) in pairs {
            let value = value.into();
            match key.as_ref() {
                "fullName" => submission.full_name = Some(value),
                "phone" => submission.phone = Some(value),
                "email" => submission.email = Some(value),
                "carMake" => submission.car_make = Some(value),
                "carModel" => submission.car_model = Some(value),
                "yearManufacture" => submission.year_manufacture = Some(value),
                "preferredDate" => submission.preferred_date = Some(value),
                "timeSlot" => submission.time_slot = Some(value),
                "servicesNeeded" | "servicesNeeded[]" => submission.services_needed.push(value),
                "issueDescription" => submission.issue_description = Some(value),
                "pickupService" => submission.pickup_service = Some(value),
                _ => {}
            }
        }
        submission
    }
}
