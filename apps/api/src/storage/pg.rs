use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::application::Application;
use crate::models::contact::Contact;
use crate::storage::{ApplicationStore, ContactStore};

/// Postgres-backed application store.
#[derive(Clone)]
pub struct PgApplicationStore {
    pool: PgPool,
}

impl PgApplicationStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ApplicationStore for PgApplicationStore {
    async fn insert(&self, app: &Application) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO applications
                (id, name, email, phone, linked_in, portfolio, experience, skills,
                 cover_letter, preferred_role, availability, expected_salary,
                 resume_file_name, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            "#,
        )
        .bind(app.id)
        .bind(&app.name)
        .bind(&app.email)
        .bind(&app.phone)
        .bind(&app.linked_in)
        .bind(&app.portfolio)
        .bind(&app.experience)
        .bind(&app.skills)
        .bind(&app.cover_letter)
        .bind(&app.preferred_role)
        .bind(&app.availability)
        .bind(&app.expected_salary)
        .bind(&app.resume_file_name)
        .bind(app.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Application>, AppError> {
        let rows: Vec<Application> =
            sqlx::query_as("SELECT * FROM applications ORDER BY created_at DESC")
                .fetch_all(&self.pool)
                .await?;
        Ok(rows)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Application>, AppError> {
        let row: Option<Application> = sqlx::query_as("SELECT * FROM applications WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn list_by_email(&self, email: &str) -> Result<Vec<Application>, AppError> {
        let rows: Vec<Application> =
            sqlx::query_as("SELECT * FROM applications WHERE email = $1 ORDER BY created_at DESC")
                .bind(email)
                .fetch_all(&self.pool)
                .await?;
        Ok(rows)
    }

    async fn update(&self, app: &Application) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE applications SET
                name = $2, email = $3, phone = $4, linked_in = $5, portfolio = $6,
                experience = $7, skills = $8, cover_letter = $9, preferred_role = $10,
                availability = $11, expected_salary = $12, resume_file_name = $13
            WHERE id = $1
            "#,
        )
        .bind(app.id)
        .bind(&app.name)
        .bind(&app.email)
        .bind(&app.phone)
        .bind(&app.linked_in)
        .bind(&app.portfolio)
        .bind(&app.experience)
        .bind(&app.skills)
        .bind(&app.cover_letter)
        .bind(&app.preferred_role)
        .bind(&app.availability)
        .bind(&app.expected_salary)
        .bind(&app.resume_file_name)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM applications WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// Postgres-backed contact store.
#[derive(Clone)]
pub struct PgContactStore {
    pool: PgPool,
}

impl PgContactStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ContactStore for PgContactStore {
    async fn insert(&self, contact: &Contact) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO contacts (id, name, email, subject, message, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(contact.id)
        .bind(&contact.name)
        .bind(&contact.email)
        .bind(&contact.subject)
        .bind(&contact.message)
        .bind(contact.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Contact>, AppError> {
        let rows: Vec<Contact> = sqlx::query_as("SELECT * FROM contacts ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }
}
