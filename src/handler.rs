//! Runs one submission through validation, derivation and dispatch.
//!
//! Dispatch is strictly sequential: sheet row, calendar entries, then the
//! optional task. The first failure stops the request. Nothing already sent
//! is rolled back; the [`Progress`] in the outcome records what went through.

use crate::components::Collaborators;
use crate::derivation::{derive_all, Derived};
use crate::error::Error;
use crate::submission::{validate, SubmissionRecord};
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, error, info, info_span, Instrument};
use uuid::Uuid;

/// Where a submission is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Received,
    Validating,
    Deriving,
    DispatchingSheet,
    DispatchingEvents,
    DispatchingTask,
    Responding,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Received => "received",
            Stage::Validating => "validating",
            Stage::Deriving => "deriving",
            Stage::DispatchingSheet => "dispatching(sheet)",
            Stage::DispatchingEvents => "dispatching(events)",
            Stage::DispatchingTask => "dispatching(task)",
            Stage::Responding => "responding",
        };
        f.write_str(name)
    }
}

/// Outbound calls that completed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Progress {
    pub sheet_appended: bool,
    pub events_created: usize,
    pub task_created: bool,
}

/// Terminal state of a submission
#[derive(Debug)]
pub enum Outcome {
    Succeeded {
        progress: Progress,
    },
    Failed {
        stage: Stage,
        cause: Error,
        progress: Progress,
    },
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Succeeded { .. })
    }

    pub fn progress(&self) -> &Progress {
        match self {
            Outcome::Succeeded { progress } | Outcome::Failed { progress, .. } => progress,
        }
    }
}

/// Stateless per-request handler around the shared collaborators
#[derive(Debug, Clone)]
pub struct SubmissionHandler {
    collaborators: Collaborators,
    timezone: Tz,
}

impl SubmissionHandler {
    pub fn new(collaborators: Collaborators, timezone: Tz) -> Self {
        Self {
            collaborators,
            timezone,
        }
    }

    /// Handle a record, stamping the row with the current time
    pub async fn handle(&self, record: &SubmissionRecord) -> Outcome {
        self.handle_at(record, Utc::now()).await
    }

    /// Handle a record logged at `logged_at`
    pub async fn handle_at(&self, record: &SubmissionRecord, logged_at: DateTime<Utc>) -> Outcome {
        let span = info_span!("submission", id = %Uuid::new_v4());
        async move {
            let mut progress = Progress::default();
            let outcome = match self.run(record, logged_at, &mut progress).await {
                Ok(()) => {
                    info!(
                        events = progress.events_created,
                        task = progress.task_created,
                        "Submission logged"
                    );
                    Outcome::Succeeded { progress }
                }
                Err((stage, cause)) => {
                    error!(%stage, ?progress, "Submission failed: {}", cause);
                    Outcome::Failed {
                        stage,
                        cause,
                        progress,
                    }
                }
            };
            debug!(stage = %Stage::Responding);
            outcome
        }
        .instrument(span)
        .await
    }

    async fn run(
        &self,
        record: &SubmissionRecord,
        logged_at: DateTime<Utc>,
        progress: &mut Progress,
    ) -> Result<(), (Stage, Error)> {
        debug!(stage = %Stage::Received);

        debug!(stage = %Stage::Validating);
        let submission = validate(record).map_err(|e| (Stage::Validating, e))?;

        debug!(stage = %Stage::Deriving);
        let Derived { row, events, task } =
            derive_all(&submission, logged_at, self.timezone).map_err(|e| (Stage::Deriving, e))?;

        debug!(stage = %Stage::DispatchingSheet);
        self.collaborators
            .sheets
            .append(&row)
            .await
            .map_err(|e| (Stage::DispatchingSheet, e))?;
        progress.sheet_appended = true;

        debug!(stage = %Stage::DispatchingEvents, count = events.len());
        for event in &events {
            self.collaborators
                .calendar
                .insert(event)
                .await
                .map_err(|e| (Stage::DispatchingEvents, e))?;
            progress.events_created += 1;
        }

        if let Some(task) = task {
            debug!(stage = %Stage::DispatchingTask);
            self.collaborators
                .tasks
                .insert(&task)
                .await
                .map_err(|e| (Stage::DispatchingTask, e))?;
            progress.task_created = true;
        }

        Ok(())
    }
}
