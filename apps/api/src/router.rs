use std::sync::Arc;

use axum::{
    Router,
    routing::get,
};

use appointment_cell::booking_routes;
use appointment_cell::handlers::BookingState;
use doctor_cell::router::doctor_routes;
use doctor_cell::DoctorDirectory;
use notification_cell::NotificationDispatcher;
use payment_cell::handlers::PaymentDeskState;
use payment_cell::{payment_routes, PaymentDesk};
use shared_config::AppConfig;

pub fn create_router(state: Arc<AppConfig>) -> Router {
    let directory = Arc::new(DoctorDirectory::with_default_catalog());
    let dispatcher = Arc::new(NotificationDispatcher::from_config(&state));

    Router::new()
        .route("/", get(|| async { "MedTasks clinic API is running!" }))
        .nest("/doctors", doctor_routes(directory.clone()))
        .nest("/booking", booking_routes(BookingState::new(&state, directory, dispatcher)))
        .nest("/payments", payment_routes(PaymentDeskState::new(PaymentDesk::default())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use serde_json::Value;
    use tower::ServiceExt;

    fn app() -> Router {
        create_router(Arc::new(AppConfig::default()))
    }

    #[tokio::test]
    async fn test_liveness() {
        let response = app()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_cells_are_mounted() {
        let app = app();

        let response = app
            .clone()
            .oneshot(Request::builder().uri("/doctors").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["doctors"].as_array().unwrap().len(), 8);

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/booking/sessions")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/payments/summary?amount=20")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
