use axum::{
    Router,
    routing::{get, post},
};

use crate::handlers::{self, PaymentDeskState};

pub fn payment_routes(state: PaymentDeskState) -> Router {
    Router::new()
        .route("/sessions", post(handlers::create_session))
        .route(
            "/sessions/{session_id}",
            get(handlers::get_session).delete(handlers::delete_session),
        )
        .route("/sessions/{session_id}/submit", post(handlers::submit_payment))
        .route("/sessions/{session_id}/cancel", post(handlers::cancel_payment))
        .route("/summary", get(handlers::payment_summary))
        .with_state(state)
}
