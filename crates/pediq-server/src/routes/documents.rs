use axum::extract::Path;
use axum::Json;
use serde::Serialize;

use pediq_core::documents::{all_documents, get_document};

use crate::error::ApiError;

#[derive(Serialize)]
pub struct DocumentSummary {
    id: &'static str,
    title: &'static str,
    revised: String,
}

#[derive(Serialize)]
pub struct DocumentDetail {
    id: &'static str,
    title: &'static str,
    revised: String,
    markdown: &'static str,
}

pub async fn list_documents() -> Json<Vec<DocumentSummary>> {
    let documents: Vec<DocumentSummary> = all_documents()
        .iter()
        .map(|d| DocumentSummary {
            id: d.id,
            title: d.title,
            revised: d.revised.to_string(),
        })
        .collect();
    Json(documents)
}

pub async fn get_document_detail(
    Path(id): Path<String>,
) -> Result<Json<DocumentDetail>, ApiError> {
    let document = get_document(&id)
        .ok_or_else(|| ApiError::NotFound(format!("document not found: {id}")))?;

    Ok(Json(DocumentDetail {
        id: document.id,
        title: document.title,
        revised: document.revised.to_string(),
        markdown: document.markdown,
    }))
}
