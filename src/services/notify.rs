use crate::services::listing::BookingView;
use crate::state::AppState;

/// Pushes a freshly stored booking to any connected admin views.
pub fn announce_booking(state: &AppState, booking: BookingView) {
    // No subscribers is the common case; the admin page still polls.
    if state.booking_tx.send(booking).is_err() {
        tracing::debug!("no booking event subscribers");
    }
}
