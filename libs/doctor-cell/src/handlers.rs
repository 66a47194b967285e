use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use shared_models::error::AppError;

use crate::models::DoctorError;
use crate::services::DoctorDirectory;

#[derive(Debug, Deserialize)]
pub struct DoctorSearchQuery {
    pub specialty: Option<String>,
}

#[axum::debug_handler]
pub async fn list_doctors(
    State(directory): State<Arc<DoctorDirectory>>,
    Query(query): Query<DoctorSearchQuery>,
) -> Result<Json<Value>, AppError> {
    let doctors = directory.filter_by_specialty(query.specialty.as_deref());

    Ok(Json(json!({
        "doctors": doctors,
        "total": doctors.len()
    })))
}

#[axum::debug_handler]
pub async fn list_specialties(
    State(directory): State<Arc<DoctorDirectory>>,
) -> Result<Json<Value>, AppError> {
    Ok(Json(json!({
        "specialties": directory.specialties()
    })))
}

#[axum::debug_handler]
pub async fn get_doctor(
    State(directory): State<Arc<DoctorDirectory>>,
    Path(doctor_id): Path<u32>,
) -> Result<Json<Value>, AppError> {
    let doctor = directory
        .find(doctor_id)
        .ok_or(DoctorError::NotFound(doctor_id))?;

    Ok(Json(json!(doctor)))
}
