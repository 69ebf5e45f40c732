use axum::extract::Path;
use axum::Json;
use serde::Serialize;

use pediq_core::input::ClinicalInput;
use pediq_core::models::evaluation::Evaluation;
use pediq_protocols::schema::FieldSpec;
use pediq_protocols::{all_protocols, evaluate, get_protocol};

use crate::error::ApiError;

#[derive(Serialize)]
pub struct ProtocolSummary {
    id: String,
    name: String,
}

#[derive(Serialize)]
pub struct ProtocolDetail {
    id: String,
    name: String,
    fields: Vec<FieldSpec>,
}

pub async fn list_protocols() -> Json<Vec<ProtocolSummary>> {
    let protocols: Vec<ProtocolSummary> = all_protocols()
        .iter()
        .map(|p| ProtocolSummary {
            id: p.id().to_string(),
            name: p.name().to_string(),
        })
        .collect();
    Json(protocols)
}

pub async fn get_protocol_detail(
    Path(id): Path<String>,
) -> Result<Json<ProtocolDetail>, ApiError> {
    let protocol = get_protocol(&id)
        .ok_or_else(|| ApiError::NotFound(format!("protocol not found: {id}")))?;

    Ok(Json(ProtocolDetail {
        id: protocol.id().to_string(),
        name: protocol.name().to_string(),
        fields: protocol.fields().to_vec(),
    }))
}

/// Run one calculation. Invalid input surfaces as 400 with the validation
/// message; an unknown protocol id is 404.
pub async fn evaluate_protocol(
    Path(id): Path<String>,
    Json(input): Json<ClinicalInput>,
) -> Result<Json<Evaluation>, ApiError> {
    let evaluation = evaluate(&id, &input)?;
    Ok(Json(evaluation))
}
