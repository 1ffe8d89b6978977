pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::services::ServeDir;

use crate::applications::handlers as applications;
use crate::contact::handlers as contact;
use crate::state::AppState;
use crate::upload;

pub fn build_router(state: AppState) -> Router {
    // Uploaded resumes are served back as static files.
    let uploads = ServeDir::new(&state.config.upload_dir);

    Router::new()
        .route("/api/health", get(health::health_handler))
        // Applications
        .route("/api/applications/general", post(applications::handle_submit))
        .route("/api/applications", get(applications::handle_list))
        .route("/api/applications/", get(applications::handle_list))
        .route(
            "/api/applications/user/:email",
            get(applications::handle_list_by_email),
        )
        .route(
            "/api/applications/:id",
            get(applications::handle_get)
                .put(applications::handle_update)
                .delete(applications::handle_delete),
        )
        // Contact
        .route(
            "/api/contact",
            post(contact::handle_submit).get(contact::handle_list),
        )
        .route(
            "/api/contact/",
            post(contact::handle_submit).get(contact::handle_list),
        )
        .nest_service("/uploads", uploads)
        // Leave headroom above the resume cap for the multipart framing
        // and text fields; the upload layer enforces the per-file limit.
        .layer(DefaultBodyLimit::max(upload::MAX_RESUME_BYTES + 1024 * 1024))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tempfile::{tempdir, TempDir};
    use tower::ServiceExt;

    use super::*;
    use crate::applications::service::ApplicationService;
    use crate::config::Config;
    use crate::contact::service::ContactService;
    use crate::mailer::fake::RecordingNotifier;
    use crate::state::AppState;
    use crate::storage::memory::{InMemoryApplicationStore, InMemoryContactStore};

    const BOUNDARY: &str = "test-boundary";

    fn test_router() -> (Router, Arc<InMemoryApplicationStore>, TempDir) {
        let dir = tempdir().unwrap();
        let store = Arc::new(InMemoryApplicationStore::default());
        let config = Config {
            database_url: String::new(),
            smtp_host: String::new(),
            smtp_user: String::new(),
            smtp_pass: String::new(),
            contact_recipient: "admin@example.com".to_string(),
            upload_dir: dir.path().to_path_buf(),
            port: 0,
            rust_log: "info".to_string(),
        };
        let applications = ApplicationService::new(store.clone(), config.upload_dir.clone());
        let contacts = ContactService::new(
            Arc::new(InMemoryContactStore::default()),
            Arc::new(RecordingNotifier::default()),
            config.contact_recipient.clone(),
        );
        let router = build_router(AppState {
            applications,
            contacts,
            config,
        });
        (router, store, dir)
    }

    fn submission_body(content_type: &str, file_bytes: &[u8]) -> Vec<u8> {
        let mut body = Vec::new();
        for (name, value) in [("name", "Ada"), ("email", "ada@example.com")] {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
                )
                .as_bytes(),
            );
        }
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"resume\"; filename=\"cv.pdf\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(file_bytes);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
        body
    }

    fn submit_request(body: Vec<u8>) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/applications/general")
            .header(
                "content-type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    fn file_count(dir: &TempDir) -> usize {
        std::fs::read_dir(dir.path()).unwrap().count()
    }

    #[tokio::test]
    async fn test_submit_with_pdf_stores_record_and_file() {
        let (router, store, dir) = test_router();

        let response = router
            .oneshot(submit_request(submission_body("application/pdf", b"%PDF-1.4")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(store.len(), 1);
        assert_eq!(file_count(&dir), 1);
    }

    #[tokio::test]
    async fn test_submit_rejects_disallowed_type_without_side_effects() {
        let (router, store, dir) = test_router();

        let response = router
            .oneshot(submit_request(submission_body("text/plain", b"not a resume")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(store.len(), 0);
        assert_eq!(file_count(&dir), 0);
    }

    #[tokio::test]
    async fn test_submit_rejects_oversize_file_without_side_effects() {
        let (router, store, dir) = test_router();
        let oversize = vec![b'a'; upload::MAX_RESUME_BYTES + 1];

        let response = router
            .oneshot(submit_request(submission_body("application/pdf", &oversize)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(store.len(), 0);
        assert_eq!(file_count(&dir), 0);
    }
}
