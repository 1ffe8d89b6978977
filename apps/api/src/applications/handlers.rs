use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::application::{Application, ApplicationInput};
use crate::state::AppState;
use crate::upload;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponse {
    pub success: bool,
    pub message: &'static str,
    pub application_id: Uuid,
}

#[derive(Serialize)]
pub struct ListResponse {
    pub success: bool,
    pub applications: Vec<Application>,
}

#[derive(Serialize)]
pub struct GetResponse {
    pub success: bool,
    pub application: Application,
}

#[derive(Serialize)]
pub struct UpdateResponse {
    pub success: bool,
    pub message: &'static str,
    pub application: Application,
}

#[derive(Serialize)]
pub struct DeleteResponse {
    pub success: bool,
    pub message: &'static str,
}

/// POST /api/applications/general (multipart, optional `resume` file)
pub async fn handle_submit(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<SubmitResponse>), AppError> {
    let form = upload::parse_application_form(&mut multipart, &state.config.upload_dir).await?;
    let input = ApplicationInput::from_fields(&form.fields);
    let application_id = state.applications.create(input, form.resume_file_name).await?;

    Ok((
        StatusCode::CREATED,
        Json(SubmitResponse {
            success: true,
            message: "Application submitted successfully",
            application_id,
        }),
    ))
}

/// GET /api/applications/
pub async fn handle_list(
    State(state): State<AppState>,
) -> Result<Json<ListResponse>, AppError> {
    let applications = state.applications.list().await?;
    Ok(Json(ListResponse {
        success: true,
        applications,
    }))
}

/// GET /api/applications/:id
pub async fn handle_get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<GetResponse>, AppError> {
    let application = state.applications.get(id).await?;
    Ok(Json(GetResponse {
        success: true,
        application,
    }))
}

/// GET /api/applications/user/:email
pub async fn handle_list_by_email(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<ListResponse>, AppError> {
    let applications = state.applications.list_by_email(&email).await?;
    Ok(Json(ListResponse {
        success: true,
        applications,
    }))
}

/// PUT /api/applications/:id (multipart, optional `resume` file)
pub async fn handle_update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    mut multipart: Multipart,
) -> Result<Json<UpdateResponse>, AppError> {
    let form = upload::parse_application_form(&mut multipart, &state.config.upload_dir).await?;
    let input = ApplicationInput::from_fields(&form.fields);
    let application = state
        .applications
        .update(id, input, form.resume_file_name)
        .await?;

    Ok(Json(UpdateResponse {
        success: true,
        message: "Application updated successfully",
        application,
    }))
}

/// DELETE /api/applications/:id
pub async fn handle_delete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DeleteResponse>, AppError> {
    state.applications.delete(id).await?;
    Ok(Json(DeleteResponse {
        success: true,
        message: "Application deleted successfully",
    }))
}
