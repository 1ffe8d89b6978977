//! Persistence behind trait seams.
//!
//! Services depend on `ApplicationStore` / `ContactStore`, never on the pool
//! directly, so tests can substitute in-memory fakes for Postgres.
//! Carried in `AppState` as `Arc<dyn …>`.

pub mod pg;

#[cfg(test)]
pub mod memory;

use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::application::Application;
use crate::models::contact::Contact;

#[async_trait]
pub trait ApplicationStore: Send + Sync {
    async fn insert(&self, app: &Application) -> Result<(), AppError>;

    /// All applications, newest first.
    async fn list(&self) -> Result<Vec<Application>, AppError>;

    async fn get(&self, id: Uuid) -> Result<Option<Application>, AppError>;

    /// Exact email match, newest first.
    async fn list_by_email(&self, email: &str) -> Result<Vec<Application>, AppError>;

    /// Full-row replace keyed on id. Returns false when the id is unknown.
    async fn update(&self, app: &Application) -> Result<bool, AppError>;

    /// Returns false when the id is unknown.
    async fn delete(&self, id: Uuid) -> Result<bool, AppError>;
}

#[async_trait]
pub trait ContactStore: Send + Sync {
    async fn insert(&self, contact: &Contact) -> Result<(), AppError>;

    /// All contacts, newest first.
    async fn list(&self) -> Result<Vec<Contact>, AppError>;
}
