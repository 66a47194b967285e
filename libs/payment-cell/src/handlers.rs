use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::sync::Mutex;
use tracing::info;
use uuid::Uuid;

use shared_models::error::AppError;
use shared_utils::SessionStore;

use crate::error::PaymentError;
use crate::models::{parse_amount, PaymentForm};
use crate::services::render::summary_for_amount;
use crate::services::{PaymentDesk, PaymentSession};

#[derive(Clone)]
pub struct PaymentDeskState {
    pub desk: Arc<PaymentDesk>,
    pub sessions: SessionStore<PaymentSession>,
}

impl PaymentDeskState {
    pub fn new(desk: PaymentDesk) -> Self {
        Self {
            desk: Arc::new(desk),
            sessions: SessionStore::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SummaryQuery {
    pub amount: Option<String>,
}

async fn load_session(
    state: &PaymentDeskState,
    session_id: Uuid,
) -> Result<Arc<Mutex<PaymentSession>>, AppError> {
    state
        .sessions
        .get(session_id)
        .await
        .ok_or_else(|| PaymentError::SessionNotFound(session_id).into())
}

#[axum::debug_handler]
pub async fn create_session(
    State(state): State<PaymentDeskState>,
) -> Result<Json<Value>, AppError> {
    let (session_id, session) = state.sessions.create(PaymentSession::new()).await;
    info!("Payment session {} started", session_id);

    let snapshot = session.lock().await.snapshot();
    Ok(Json(json!({
        "session_id": session_id,
        "snapshot": snapshot
    })))
}

#[axum::debug_handler]
pub async fn get_session(
    State(state): State<PaymentDeskState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let session = load_session(&state, session_id).await?;
    let snapshot = session.lock().await.snapshot();

    Ok(Json(json!({
        "session_id": session_id,
        "snapshot": snapshot
    })))
}

/// Stops any pending attempt before the session is dropped.
#[axum::debug_handler]
pub async fn delete_session(
    State(state): State<PaymentDeskState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let session = load_session(&state, session_id).await?;

    if session.lock().await.status().is_submitting() {
        state.desk.cancel(&session).await?;
    }
    state.sessions.remove(session_id).await;
    info!("Payment session {} closed", session_id);

    Ok(Json(json!({
        "session_id": session_id,
        "deleted": true
    })))
}

#[axum::debug_handler]
pub async fn submit_payment(
    State(state): State<PaymentDeskState>,
    Path(session_id): Path<Uuid>,
    Json(form): Json<PaymentForm>,
) -> Result<Json<Value>, AppError> {
    let session = load_session(&state, session_id).await?;

    let ticket = state.desk.submit(Arc::clone(&session), form).await?;
    let snapshot = session.lock().await.snapshot();

    Ok(Json(json!({
        "session_id": session_id,
        "attempt": ticket.attempt.attempt,
        "transaction_id": ticket.attempt.transaction_id,
        "delay_ms": ticket.attempt.delay_ms,
        "snapshot": snapshot
    })))
}

#[axum::debug_handler]
pub async fn cancel_payment(
    State(state): State<PaymentDeskState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let session = load_session(&state, session_id).await?;

    state.desk.cancel(&session).await?;
    let snapshot = session.lock().await.snapshot();

    Ok(Json(json!({
        "session_id": session_id,
        "snapshot": snapshot
    })))
}

#[axum::debug_handler]
pub async fn payment_summary(
    Query(query): Query<SummaryQuery>,
) -> Result<Json<Value>, AppError> {
    let amount = query.amount.as_deref().map(parse_amount).unwrap_or(0.0);

    Ok(Json(json!({
        "amount": amount,
        "html": summary_for_amount(amount)
    })))
}
