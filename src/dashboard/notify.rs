use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Info,
    Error,
}

/// Transient, fire-and-forget user feedback.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Notification {
    pub level: Level,
    pub title: String,
    pub description: String,
    pub raised_at: DateTime<Utc>,
}

impl Notification {
    pub fn info(title: &str, description: &str) -> Self {
        Self::new(Level::Info, title, description)
    }

    pub fn error(description: &str) -> Self {
        Self::new(Level::Error, "Error", description)
    }

    fn new(level: Level, title: &str, description: &str) -> Self {
        Self {
            level,
            title: title.to_string(),
            description: description.to_string(),
            raised_at: Utc::now(),
        }
    }
}
