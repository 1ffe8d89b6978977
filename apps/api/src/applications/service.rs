//! Job-application CRUD over the store and the resume upload directory.
//!
//! The service owns the record↔file coupling: replacing or deleting a record
//! also disposes of the resume file it references. File deletion is always
//! tolerant of "already gone".

use std::path::{Path, PathBuf};
use std::sync::Arc;

use uuid::Uuid;

use crate::errors::AppError;
use crate::models::application::{Application, ApplicationInput};
use crate::storage::ApplicationStore;
use crate::upload;

#[derive(Clone)]
pub struct ApplicationService {
    store: Arc<dyn ApplicationStore>,
    upload_dir: PathBuf,
}

impl ApplicationService {
    pub fn new(store: Arc<dyn ApplicationStore>, upload_dir: PathBuf) -> Self {
        Self { store, upload_dir }
    }

    pub fn upload_dir(&self) -> &Path {
        &self.upload_dir
    }

    /// Persists a new application. `resume_file_name` must name a file the
    /// upload handler just wrote; on rejection the orphan file is removed so
    /// a failed request leaves nothing behind.
    pub async fn create(
        &self,
        input: ApplicationInput,
        resume_file_name: Option<String>,
    ) -> Result<Uuid, AppError> {
        if let Err(e) = input.validate() {
            self.discard(resume_file_name).await;
            return Err(e);
        }

        let app = Application::new(input, resume_file_name);
        self.store.insert(&app).await?;
        tracing::info!(id = %app.id, email = %app.email, "application submitted");
        Ok(app.id)
    }

    pub async fn list(&self) -> Result<Vec<Application>, AppError> {
        self.store.list().await
    }

    pub async fn get(&self, id: Uuid) -> Result<Application, AppError> {
        self.store
            .get(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Application not found".to_string()))
    }

    pub async fn list_by_email(&self, email: &str) -> Result<Vec<Application>, AppError> {
        self.store.list_by_email(email).await
    }

    /// Full-field update. A newly uploaded file replaces the old reference;
    /// the previously referenced file is deleted first. Without a new file
    /// the existing reference is retained.
    pub async fn update(
        &self,
        id: Uuid,
        input: ApplicationInput,
        new_resume: Option<String>,
    ) -> Result<Application, AppError> {
        if let Err(e) = input.validate() {
            self.discard(new_resume).await;
            return Err(e);
        }

        let existing = match self.store.get(id).await? {
            Some(app) => app,
            None => {
                self.discard(new_resume).await;
                return Err(AppError::NotFound("Application not found".to_string()));
            }
        };

        let resume_file_name = match &new_resume {
            Some(name) => {
                if let Some(old) = &existing.resume_file_name {
                    upload::delete_stored(&self.upload_dir, old).await?;
                }
                Some(name.clone())
            }
            None => existing.resume_file_name.clone(),
        };

        let mut updated = Application::new(input, resume_file_name);
        updated.id = existing.id;
        updated.created_at = existing.created_at;

        if !self.store.update(&updated).await? {
            // Record vanished between the lookup and the write; report it gone
            // without leaving the just-stored file orphaned.
            self.discard(new_resume).await;
            return Err(AppError::NotFound("Application not found".to_string()));
        }
        tracing::info!(id = %updated.id, "application updated");
        Ok(updated)
    }

    /// Deletes the record and, when present, its resume file.
    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let existing = self
            .store
            .get(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Application not found".to_string()))?;

        if let Some(name) = &existing.resume_file_name {
            upload::delete_stored(&self.upload_dir, name).await?;
        }
        self.store.delete(id).await?;
        tracing::info!(id = %id, "application deleted");
        Ok(())
    }

    async fn discard(&self, resume_file_name: Option<String>) {
        if let Some(name) = resume_file_name {
            upload::delete_stored(&self.upload_dir, &name).await.ok();
        }
    }
}
