use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// A single rejected field of a submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// External service a collaborator error came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Service {
    Sheets,
    Calendar,
    Tasks,
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Service::Sheets => "Google Sheets",
            Service::Calendar => "Google Calendar",
            Service::Tasks => "Google Tasks",
        };
        f.write_str(name)
    }
}

/// Main error type for the application
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("Environment error: {0}")]
    #[diagnostic(code(event_logger::environment))]
    Environment(String),

    #[error("Configuration error: {0}")]
    #[diagnostic(code(event_logger::config))]
    Config(String),

    #[error("Authentication error: {0}")]
    #[diagnostic(code(event_logger::auth))]
    Auth(String),

    #[error("{service} error: {message}")]
    #[diagnostic(code(event_logger::collaborator))]
    Collaborator { service: Service, message: String },

    #[error("Invalid submission: {}", join_fields(.0))]
    #[diagnostic(code(event_logger::validation))]
    Validation(Vec<FieldError>),

    #[error("HTTP error: {0}")]
    #[diagnostic(code(event_logger::http))]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    #[diagnostic(code(event_logger::io))]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    #[diagnostic(code(event_logger::serialization))]
    Serialization(String),

    #[error("Other error: {0}")]
    #[diagnostic(code(event_logger::other))]
    Other(String),
}

fn join_fields(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

impl From<jsonwebtoken::errors::Error> for Error {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        Error::Auth(err.to_string())
    }
}

/// Type alias for Result with our Error type
pub type LoggerResult<T> = Result<T, Error>;

/// Helper to create environment errors
pub fn env_error(var: &str) -> Error {
    Error::Environment(format!("Missing environment variable: {}", var))
}

/// Helper to create configuration errors
pub fn config_error(message: &str) -> Error {
    Error::Config(message.to_string())
}

/// Helper to create authentication errors
pub fn auth_error(message: &str) -> Error {
    Error::Auth(message.to_string())
}

/// Helper to create errors for a failed outbound call
pub fn collaborator_error(service: Service, message: &str) -> Error {
    Error::Collaborator {
        service,
        message: message.to_string(),
    }
}

/// Helper to create a validation error for one field
pub fn validation_error(field: &str, message: &str) -> Error {
    Error::Validation(vec![FieldError::new(field, message)])
}

/// Helper to create other errors
pub fn other_error(message: &str) -> Error {
    Error::Other(message.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message_lists_every_field() {
        let err = Error::Validation(vec![
            FieldError::new("eventName", "is required"),
            FieldError::new("startDate", "is required"),
        ]);
        assert_eq!(
            err.to_string(),
            "Invalid submission: eventName: is required; startDate: is required"
        );
    }

    #[test]
    fn test_collaborator_message_names_service() {
        let err = collaborator_error(Service::Tasks, "HTTP 403 - quota exceeded");
        assert_eq!(err.to_string(), "Google Tasks error: HTTP 403 - quota exceeded");
    }
}
