pub mod booking;

pub use booking::{Booking, BookingSubmission, NewBooking, SERVICES_SEPARATOR};
