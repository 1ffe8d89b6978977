use std::path::PathBuf;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Missing required variables abort startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub smtp_host: String,
    pub smtp_user: String,
    pub smtp_pass: String,
    /// Destination address for contact-form notification emails.
    pub contact_recipient: String,
    /// Directory where uploaded resume files are stored.
    pub upload_dir: PathBuf,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            smtp_host: require_env("SMTP_HOST")?,
            smtp_user: require_env("SMTP_USER")?,
            smtp_pass: require_env("SMTP_PASS")?,
            contact_recipient: require_env("CONTACT_RECIPIENT")?,
            upload_dir: std::env::var("UPLOAD_DIR")
                .unwrap_or_else(|_| "uploads/resumes".to_string())
                .into(),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "3001".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
