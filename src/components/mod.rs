use crate::error::LoggerResult;
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;

pub mod google;

pub use google::models::{CalendarEvent, EventTime, PreparationTask, SheetRow};

/// Tabular store receiving one row per submission
#[async_trait]
pub trait SheetStore: Send + Sync {
    async fn append(&self, row: &SheetRow) -> LoggerResult<()>;
}

/// Calendar receiving the derived entries
#[async_trait]
pub trait CalendarService: Send + Sync {
    async fn insert(&self, event: &CalendarEvent) -> LoggerResult<()>;
}

/// Task list receiving preparation tasks
#[async_trait]
pub trait TaskService: Send + Sync {
    async fn insert(&self, task: &PreparationTask) -> LoggerResult<()>;
}

/// The three external services a submission is dispatched to
#[derive(Clone)]
pub struct Collaborators {
    pub sheets: Arc<dyn SheetStore>,
    pub calendar: Arc<dyn CalendarService>,
    pub tasks: Arc<dyn TaskService>,
}

impl fmt::Debug for Collaborators {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collaborators").finish_non_exhaustive()
    }
}
