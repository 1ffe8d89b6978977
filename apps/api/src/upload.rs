//! Resume upload handling: multipart form parsing, file-type and size
//! policy, collision-resistant naming, and idempotent deletion.

use std::collections::HashMap;
use std::path::Path;

use anyhow::Context;
use axum::extract::multipart::{Field, Multipart};
use bytes::BytesMut;
use chrono::Utc;
use rand::Rng;

use crate::errors::AppError;

/// Multipart field name carrying the resume file.
pub const RESUME_FIELD: &str = "resume";

/// 5 MiB cap, enforced while streaming the field, before any disk write.
pub const MAX_RESUME_BYTES: usize = 5 * 1024 * 1024;

const ALLOWED_MIME_TYPES: [&str; 3] = [
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
];

/// Parsed multipart submission: text fields plus the stored resume name,
/// when one was uploaded.
#[derive(Debug, Default)]
pub struct ApplicationForm {
    pub fields: HashMap<String, String>,
    pub resume_file_name: Option<String>,
}

/// Walks the multipart stream, collecting text fields and storing the single
/// `resume` file into `dir`. On any rejection a file already written for this
/// request is removed again, so a failed request never leaves bytes behind.
pub async fn parse_application_form(
    multipart: &mut Multipart,
    dir: &Path,
) -> Result<ApplicationForm, AppError> {
    let mut form = ApplicationForm::default();
    match collect_fields(multipart, dir, &mut form).await {
        Ok(()) => Ok(form),
        Err(e) => {
            if let Some(name) = form.resume_file_name.take() {
                delete_stored(dir, &name).await.ok();
            }
            Err(e)
        }
    }
}

async fn collect_fields(
    multipart: &mut Multipart,
    dir: &Path,
    form: &mut ApplicationForm,
) -> Result<(), AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("malformed multipart request: {e}")))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        if field.file_name().is_some() {
            if name != RESUME_FIELD {
                return Err(AppError::Validation(format!(
                    "unexpected file field '{name}'"
                )));
            }
            if form.resume_file_name.is_some() {
                return Err(AppError::Validation(
                    "only one resume file may be uploaded per request".to_string(),
                ));
            }
            form.resume_file_name = Some(store_resume_field(field, dir).await?);
        } else {
            let value = field
                .text()
                .await
                .map_err(|e| AppError::Validation(format!("unreadable field '{name}': {e}")))?;
            form.fields.insert(name, value);
        }
    }
    Ok(())
}

/// Validates content type, streams the field into a bounded buffer, and
/// writes it under a generated name. Nothing touches disk before both the
/// type check and the size check have passed.
async fn store_resume_field(field: Field<'_>, dir: &Path) -> Result<String, AppError> {
    let content_type = field.content_type().unwrap_or_default().to_string();
    if !ALLOWED_MIME_TYPES.contains(&content_type.as_str()) {
        return Err(AppError::Validation(format!(
            "only PDF and Word documents are accepted, got '{content_type}'"
        )));
    }

    let original_name = field.file_name().unwrap_or_default().to_string();
    let bytes = read_bounded(field).await?;
    store_resume(dir, &original_name, &bytes).await
}

async fn read_bounded(mut field: Field<'_>) -> Result<BytesMut, AppError> {
    let mut buf = BytesMut::new();
    while let Some(chunk) = field
        .chunk()
        .await
        .map_err(|e| AppError::Validation(format!("unreadable resume upload: {e}")))?
    {
        if buf.len() + chunk.len() > MAX_RESUME_BYTES {
            return Err(AppError::PayloadTooLarge(format!(
                "resume exceeds the {} byte limit",
                MAX_RESUME_BYTES
            )));
        }
        buf.extend_from_slice(&chunk);
    }
    Ok(buf)
}

/// Writes `bytes` into `dir` under a generated name and returns the name.
pub async fn store_resume(dir: &Path, original_name: &str, bytes: &[u8]) -> Result<String, AppError> {
    if bytes.len() > MAX_RESUME_BYTES {
        return Err(AppError::PayloadTooLarge(format!(
            "resume exceeds the {} byte limit",
            MAX_RESUME_BYTES
        )));
    }

    let name = generate_resume_name(original_name);
    tokio::fs::write(dir.join(&name), bytes)
        .await
        .with_context(|| format!("failed to write resume file '{name}'"))?;
    tracing::debug!(file = %name, size = bytes.len(), "stored resume upload");
    Ok(name)
}

/// `resume-<unix millis>-<random 0..1e9><original extension>`.
/// Unique enough within one process without any coordination step.
fn generate_resume_name(original_name: &str) -> String {
    let millis = Utc::now().timestamp_millis();
    let nonce: u32 = rand::thread_rng().gen_range(0..1_000_000_000);
    let ext = Path::new(original_name)
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();
    format!("{RESUME_FIELD}-{millis}-{nonce}{ext}")
}

/// Deletes a stored resume by name. A file that is already gone is fine;
/// the record's filename is a weak reference, not an ownership pointer.
pub async fn delete_stored(dir: &Path, name: &str) -> Result<(), AppError> {
    if name.is_empty() || name.contains('/') || name.contains('\\') {
        return Err(AppError::Validation(format!(
            "invalid stored file name '{name}'"
        )));
    }
    match tokio::fs::remove_file(dir.join(name)).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(AppError::Internal(anyhow::Error::new(e).context(format!(
            "failed to delete stored file '{name}'"
        )))),
    }
}
