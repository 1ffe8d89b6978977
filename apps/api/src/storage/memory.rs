//! In-memory store fakes for service tests. Same ordering contract as the
//! Postgres implementations: newest first by `created_at`.

use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::application::Application;
use crate::models::contact::Contact;
use crate::storage::{ApplicationStore, ContactStore};

#[derive(Default)]
pub struct InMemoryApplicationStore {
    rows: Mutex<Vec<Application>>,
}

impl InMemoryApplicationStore {
    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }
}

#[async_trait]
impl ApplicationStore for InMemoryApplicationStore {
    async fn insert(&self, app: &Application) -> Result<(), AppError> {
        self.rows.lock().unwrap().push(app.clone());
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Application>, AppError> {
        let mut rows = self.rows.lock().unwrap().clone();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Application>, AppError> {
        Ok(self.rows.lock().unwrap().iter().find(|a| a.id == id).cloned())
    }

    async fn list_by_email(&self, email: &str) -> Result<Vec<Application>, AppError> {
        let mut rows: Vec<Application> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|a| a.email == email)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn update(&self, app: &Application) -> Result<bool, AppError> {
        let mut rows = self.rows.lock().unwrap();
        match rows.iter_mut().find(|a| a.id == app.id) {
            Some(existing) => {
                *existing = app.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|a| a.id != id);
        Ok(rows.len() < before)
    }
}

#[derive(Default)]
pub struct InMemoryContactStore {
    rows: Mutex<Vec<Contact>>,
}

impl InMemoryContactStore {
    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }
}

#[async_trait]
impl ContactStore for InMemoryContactStore {
    async fn insert(&self, contact: &Contact) -> Result<(), AppError> {
        self.rows.lock().unwrap().push(contact.clone());
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Contact>, AppError> {
        let mut rows = self.rows.lock().unwrap().clone();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }
}
