// libs/appointment-cell/src/handlers.rs
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::sync::Mutex;
use tracing::{info, warn};
use uuid::Uuid;

use doctor_cell::DoctorDirectory;
use notification_cell::{ContactMethod, NotificationDispatcher};
use shared_config::AppConfig;
use shared_models::error::AppError;
use shared_utils::SessionStore;

use crate::models::{AppointmentForm, SubmitOutcome};
use crate::services::{BookingPage, BookingSession, RecordingBookingView};

#[derive(Clone)]
pub struct BookingState {
    pub page: Arc<BookingPage>,
    pub sessions: SessionStore<BookingSession>,
}

impl BookingState {
    pub fn new(
        config: &AppConfig,
        directory: Arc<DoctorDirectory>,
        dispatcher: Arc<NotificationDispatcher>,
    ) -> Self {
        Self {
            page: Arc::new(BookingPage::new(
                directory,
                dispatcher,
                config.payment_page_url.clone(),
            )),
            sessions: SessionStore::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct FilterRequest {
    pub specialty: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SelectDoctorRequest {
    pub doctor_id: u32,
}

#[derive(Debug, Deserialize)]
pub struct ContactMethodRequest {
    pub contact_method: String,
}

async fn load_session(
    state: &BookingState,
    session_id: Uuid,
) -> Result<Arc<Mutex<BookingSession>>, AppError> {
    state
        .sessions
        .get(session_id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Booking session {} not found", session_id)))
}

fn view_response(
    state: &BookingState,
    session_id: Uuid,
    session: &BookingSession,
    view: RecordingBookingView,
) -> Json<Value> {
    Json(json!({
        "session_id": session_id,
        "updates": view.into_updates(),
        "snapshot": state.page.snapshot(session)
    }))
}

#[axum::debug_handler]
pub async fn create_session(
    State(state): State<BookingState>,
) -> Result<Json<Value>, AppError> {
    let session = state.page.new_session();
    let mut view = RecordingBookingView::new();
    state.page.open(&session, Utc::now().date_naive(), &mut view);

    let (session_id, session) = state.sessions.create(session).await;
    info!("Booking session {} started", session_id);

    let session = session.lock().await;
    Ok(view_response(&state, session_id, &session, view))
}

#[axum::debug_handler]
pub async fn get_session(
    State(state): State<BookingState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let session = load_session(&state, session_id).await?;
    let session = session.lock().await;

    Ok(Json(json!({
        "session_id": session_id,
        "snapshot": state.page.snapshot(&session)
    })))
}

#[axum::debug_handler]
pub async fn filter_doctors(
    State(state): State<BookingState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<FilterRequest>,
) -> Result<Json<Value>, AppError> {
    let session = load_session(&state, session_id).await?;
    let mut session = session.lock().await;
    let mut view = RecordingBookingView::new();

    state.page.filter(&mut session, request.specialty.as_deref(), &mut view);

    Ok(view_response(&state, session_id, &session, view))
}

#[axum::debug_handler]
pub async fn select_doctor(
    State(state): State<BookingState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<SelectDoctorRequest>,
) -> Result<Json<Value>, AppError> {
    let session = load_session(&state, session_id).await?;
    let mut session = session.lock().await;
    let mut view = RecordingBookingView::new();

    state.page.select(&mut session, request.doctor_id, &mut view)?;

    Ok(view_response(&state, session_id, &session, view))
}

#[axum::debug_handler]
pub async fn clear_selection(
    State(state): State<BookingState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let session = load_session(&state, session_id).await?;
    let mut session = session.lock().await;
    let mut view = RecordingBookingView::new();

    state.page.clear_selection(&mut session, &mut view);

    Ok(view_response(&state, session_id, &session, view))
}

#[axum::debug_handler]
pub async fn change_contact_method(
    State(state): State<BookingState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<ContactMethodRequest>,
) -> Result<Json<Value>, AppError> {
    let contact_method: ContactMethod = request
        .contact_method
        .parse()
        .map_err(|e: notification_cell::NotificationError| AppError::BadRequest(e.to_string()))?;

    let session = load_session(&state, session_id).await?;
    let mut session = session.lock().await;
    let mut view = RecordingBookingView::new();

    state.page.change_contact_method(&mut session, contact_method, &mut view);

    Ok(view_response(&state, session_id, &session, view))
}

#[axum::debug_handler]
pub async fn delete_session(
    State(state): State<BookingState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    if !state.sessions.remove(session_id).await {
        return Err(AppError::NotFound(format!("Booking session {} not found", session_id)));
    }
    info!("Booking session {} closed", session_id);

    Ok(Json(json!({
        "session_id": session_id,
        "deleted": true
    })))
}

/// A booked session is discarded once the page hands over to the payment page.
#[axum::debug_handler]
pub async fn submit_appointment(
    State(state): State<BookingState>,
    Path(session_id): Path<Uuid>,
    Json(form): Json<AppointmentForm>,
) -> Result<Json<Value>, AppError> {
    let session = load_session(&state, session_id).await?;
    let mut view = RecordingBookingView::new();

    let outcome = {
        let mut session = session.lock().await;
        state.page.submit(&mut session, &form, &mut view).await
    };

    match outcome {
        SubmitOutcome::Rejected { report } => {
            warn!("Booking session {} submitted an invalid form", session_id);
            Err(AppError::validation_with_details(
                "Form validation failed",
                json!({
                    "errors": report.messages(),
                    "updates": view.into_updates()
                }),
            ))
        }
        SubmitOutcome::Booked { submission, notifications } => {
            state.sessions.remove(session_id).await;
            info!("Booking session {} handed over to payment", session_id);

            Ok(Json(json!({
                "session_id": session_id,
                "status": "booked",
                "submission": submission,
                "notifications": notifications,
                "updates": view.into_updates()
            })))
        }
    }
}
