//! JSON reply shared by the web handler and the form collector
use crate::error::{Error, FieldError};
use crate::handler::{Outcome, Progress, Stage};
use serde::{Deserialize, Serialize};

pub const SUCCESS_MESSAGE: &str = "Event logged successfully!";
pub const METHOD_NOT_ALLOWED_MESSAGE: &str = "Only POST requests are allowed";

/// Body of every `/api/submit` reply
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitResponse {
    pub success: bool,
    pub message: String,
    /// Stage that failed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stage: Option<Stage>,
    /// Calls that went through before the failure
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<Progress>,
    /// Field-level detail for rejected input
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldError>,
}

impl SubmitResponse {
    pub fn ok() -> Self {
        Self {
            success: true,
            message: SUCCESS_MESSAGE.to_string(),
            stage: None,
            completed: None,
            errors: Vec::new(),
        }
    }

    pub fn failure(message: &str) -> Self {
        Self {
            success: false,
            message: message.to_string(),
            stage: None,
            completed: None,
            errors: Vec::new(),
        }
    }

    pub fn invalid(errors: Vec<FieldError>) -> Self {
        Self {
            errors,
            ..Self::failure("Invalid submission")
        }
    }

    /// Status code and body for a finished submission
    pub fn from_outcome(outcome: Outcome) -> (u16, Self) {
        match outcome {
            Outcome::Succeeded { .. } => (200, Self::ok()),
            Outcome::Failed {
                stage,
                cause: Error::Validation(errors),
                ..
            } => (
                400,
                Self {
                    stage: Some(stage),
                    ..Self::invalid(errors)
                },
            ),
            Outcome::Failed {
                stage,
                cause,
                progress,
            } => (
                500,
                Self {
                    stage: Some(stage),
                    completed: Some(progress),
                    ..Self::failure(&format!("Server Error: {}", cause))
                },
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{collaborator_error, Service};
    use serde_json::json;

    #[test]
    fn test_success_body_is_minimal() {
        let (status, body) = SubmitResponse::from_outcome(Outcome::Succeeded {
            progress: Progress::default(),
        });
        assert_eq!(status, 200);
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({ "success": true, "message": "Event logged successfully!" })
        );
    }

    #[test]
    fn test_validation_failure_is_400() {
        let (status, body) = SubmitResponse::from_outcome(Outcome::Failed {
            stage: Stage::Validating,
            cause: Error::Validation(vec![FieldError::new("eventName", "Event name is required")]),
            progress: Progress::default(),
        });
        assert_eq!(status, 400);
        assert!(!body.success);
        assert_eq!(body.errors[0].field, "eventName");
        assert_eq!(body.completed, None);
    }

    #[test]
    fn test_collaborator_failure_reports_progress() {
        let progress = Progress {
            sheet_appended: true,
            events_created: 1,
            task_created: false,
        };
        let (status, body) = SubmitResponse::from_outcome(Outcome::Failed {
            stage: Stage::DispatchingTask,
            cause: collaborator_error(Service::Tasks, "HTTP 403 - forbidden"),
            progress: progress.clone(),
        });
        assert_eq!(status, 500);
        assert_eq!(body.message, "Server Error: Google Tasks error: HTTP 403 - forbidden");
        assert_eq!(body.stage, Some(Stage::DispatchingTask));
        assert_eq!(body.completed, Some(progress));

        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["stage"], "dispatching_task");
        assert_eq!(value["completed"]["eventsCreated"], 1);
    }
}
