use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::contact::{Contact, ContactInput};
use crate::state::AppState;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponse {
    pub success: bool,
    pub message: &'static str,
    pub contact_id: Uuid,
}

#[derive(Serialize)]
pub struct ListResponse {
    pub success: bool,
    pub contacts: Vec<Contact>,
}

/// POST /api/contact/
pub async fn handle_submit(
    State(state): State<AppState>,
    Json(input): Json<ContactInput>,
) -> Result<(StatusCode, Json<SubmitResponse>), AppError> {
    let contact_id = state.contacts.create(input).await?;
    Ok((
        StatusCode::CREATED,
        Json(SubmitResponse {
            success: true,
            message: "Contact form submitted successfully",
            contact_id,
        }),
    ))
}

/// GET /api/contact/
pub async fn handle_list(State(state): State<AppState>) -> Result<Json<ListResponse>, AppError> {
    let contacts = state.contacts.list().await?;
    Ok(Json(ListResponse {
        success: true,
        contacts,
    }))
}
