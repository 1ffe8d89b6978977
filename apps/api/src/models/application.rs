use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::errors::AppError;

/// One candidate submission, as persisted and as serialized over the wire.
/// Wire field names are camelCase to match the frontend forms.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub linked_in: Option<String>,
    pub portfolio: Option<String>,
    pub experience: String,
    pub skills: String,
    pub cover_letter: String,
    pub preferred_role: String,
    pub availability: String,
    pub expected_salary: String,
    /// Weak reference to a file under the resume upload directory.
    /// The file lives independently on disk; deletion must tolerate absence.
    pub resume_file_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Application {
    /// Builds a fresh record from validated input. Identity and timestamp
    /// are server-assigned here, never taken from the request.
    pub fn new(input: ApplicationInput, resume_file_name: Option<String>) -> Self {
        Application {
            id: Uuid::new_v4(),
            name: input.name,
            email: input.email,
            phone: input.phone,
            linked_in: input.linked_in,
            portfolio: input.portfolio,
            experience: input.experience,
            skills: input.skills,
            cover_letter: input.cover_letter,
            preferred_role: input.preferred_role,
            availability: input.availability,
            expected_salary: input.expected_salary,
            resume_file_name,
            created_at: Utc::now(),
        }
    }
}

/// Input schema for create and update. Only `name` and `email` are required;
/// everything else defaults to empty, matching what the submission forms send.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    pub linked_in: Option<String>,
    pub portfolio: Option<String>,
    #[serde(default)]
    pub experience: String,
    #[serde(default)]
    pub skills: String,
    #[serde(default)]
    pub cover_letter: String,
    #[serde(default)]
    pub preferred_role: String,
    #[serde(default)]
    pub availability: String,
    #[serde(default)]
    pub expected_salary: String,
}

impl ApplicationInput {
    /// Builds an input from the text fields of a multipart form.
    /// Field names follow the frontend's camelCase convention.
    pub fn from_fields(fields: &HashMap<String, String>) -> Self {
        let take = |key: &str| fields.get(key).cloned().unwrap_or_default();
        let take_opt = |key: &str| fields.get(key).filter(|v| !v.is_empty()).cloned();

        ApplicationInput {
            name: take("name"),
            email: take("email"),
            phone: take("phone"),
            linked_in: take_opt("linkedIn"),
            portfolio: take_opt("portfolio"),
            experience: take("experience"),
            skills: take("skills"),
            cover_letter: take("coverLetter"),
            preferred_role: take("preferredRole"),
            availability: take("availability"),
            expected_salary: take("expectedSalary"),
        }
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.name.trim().is_empty() {
            return Err(AppError::Validation("'name' is required".to_string()));
        }
        if self.email.trim().is_empty() {
            return Err(AppError::Validation("'email' is required".to_string()));
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
