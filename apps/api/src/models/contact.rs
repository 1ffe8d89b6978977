use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::errors::AppError;

/// One contact-form inquiry. Never updated or deleted once stored.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl Contact {
    pub fn new(input: ContactInput) -> Self {
        Contact {
            id: Uuid::new_v4(),
            name: input.name,
            email: input.email,
            subject: input.subject,
            message: input.message,
            created_at: Utc::now(),
        }
    }
}

/// Input schema for contact submission. All four fields are required.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub message: String,
}

impl ContactInput {
    pub fn validate(&self) -> Result<(), AppError> {
        for (field, value) in [
            ("name", &self.name),
            ("email", &self.email),
            ("subject", &self.subject),
            ("message", &self.message),
        ] {
            if value.trim().is_empty() {
                return Err(AppError::Validation(format!("'{field}' is required")));
            }
        }
        if !self.email.contains('@') {
            return Err(AppError::Validation(format!(
                "'{}' is not a valid email address",
                self.email
            )));
        }
        Ok(())
    }
}
