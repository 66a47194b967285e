// libs/appointment-cell/src/router.rs
use axum::{
    Router,
    routing::{get, post},
};

use crate::handlers::{self, BookingState};

pub fn booking_routes(state: BookingState) -> Router {
    Router::new()
        .route("/sessions", post(handlers::create_session))
        .route(
            "/sessions/{session_id}",
            get(handlers::get_session).delete(handlers::delete_session),
        )
        .route("/sessions/{session_id}/filter", post(handlers::filter_doctors))
        .route("/sessions/{session_id}/select", post(handlers::select_doctor))
        .route("/sessions/{session_id}/clear", post(handlers::clear_selection))
        .route("/sessions/{session_id}/contact-method", post(handlers::change_contact_method))
        .route("/sessions/{session_id}/submit", post(handlers::submit_appointment))
        .with_state(state)
}
