//! Mapping a validated submission to the row, calendar entries and task
pub mod event;
pub mod row;
pub mod task;

pub use event::{derive_events, event_description, event_title};
pub use row::build_row;
pub use task::derive_task;

use crate::components::google::models::{CalendarEvent, PreparationTask, SheetRow};
use crate::error::LoggerResult;
use crate::submission::Submission;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;

/// Everything one submission sends out
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Derived {
    pub row: SheetRow,
    pub events: Vec<CalendarEvent>,
    pub task: Option<PreparationTask>,
}

/// Run all three derivations
pub fn derive_all(submission: &Submission, logged_at: DateTime<Utc>, tz: Tz) -> LoggerResult<Derived> {
    Ok(Derived {
        row: build_row(submission, logged_at),
        events: derive_events(submission, tz)?,
        task: derive_task(submission)?,
    })
}
