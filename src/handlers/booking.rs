use std::sync::Arc;

use axum::extract::rejection::FormRejection;
use axum::extract::State;
use axum::http::{header, Method};
use axum::response::IntoResponse;
use axum::{Form, Json};

use crate::errors::{ApiResponse, AppError};
use crate::models::BookingSubmission;
use crate::services::intake::{self, IntakeError};
use crate::services::listing::BookingView;
use crate::services::notify;
use crate::state::AppState;

// POST /api/bookings
pub async fn submit_booking(
    State(state): State<Arc<AppState>>,
    form: Result<Form<Vec<(String, String)>>, FormRejection>,
) -> Result<Json<ApiResponse>, AppError> {
    let Form(pairs) = form.map_err(|rejection| AppError::BadRequest {
        status: rejection.status(),
        message: rejection.body_text(),
    })?;
    let submission = BookingSubmission::from_pairs(pairs);

    let result = {
        let mut conn = state
            .conn()
            .map_err(AppError::storage("saving your booking"))?;
        intake::submit_booking(&mut conn, &submission)
    };

    let booking = match result {
        Ok(booking) => booking,
        Err(IntakeError::Validation(errors)) => {
            tracing::warn!(?errors, "rejected booking submission");
            return Err(AppError::Validation(errors));
        }
        Err(IntakeError::SlotFull) => {
            tracing::warn!(
                preferred_date = ?submission.preferred_date,
                time_slot = ?submission.time_slot,
                "time slot full"
            );
            return Err(AppError::SlotFull);
        }
        Err(e) => return Err(e.into()),
    };

    tracing::info!(
        booking_id = booking.id,
        time_slot = %booking.time_slot,
        "booking accepted"
    );

    let booking_id = booking.id;
    notify::announce_booking(&state, BookingView::from(booking));

    Ok(Json(ApiResponse {
        success: true,
        message: "Booking submitted successfully!".to_string(),
        booking_id: Some(booking_id),
        errors: None,
    }))
}

// Any other verb on /api/bookings
pub async fn method_not_allowed(method: Method) -> impl IntoResponse {
    tracing::warn!(%method, "booking submission with unsupported method");
    ([(header::ALLOW, "POST")], AppError::MethodNotAllowed)
}
