//! In-memory collaborators for integration tests
#![allow(dead_code)]

use async_trait::async_trait;
use event_logger::components::{
    CalendarEvent, CalendarService, Collaborators, PreparationTask, SheetRow, SheetStore,
    TaskService,
};
use event_logger::error::{collaborator_error, LoggerResult, Service};
use event_logger::handler::SubmissionHandler;
use event_logger::submission::SubmissionRecord;
use std::sync::Arc;
use tokio::sync::Mutex;

pub const TZ: chrono_tz::Tz = chrono_tz::Asia::Bangkok;

/// One outbound call, in the order it was made
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Row(SheetRow),
    Event(CalendarEvent),
    Task(PreparationTask),
}

/// Where the mock should start refusing calls
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FailOn {
    Sheet,
    /// Fail the n-th calendar insert (0-based)
    Event(usize),
    Task,
}

/// Records every call into a shared log
#[derive(Debug, Default)]
pub struct RecordingServices {
    calls: Mutex<Vec<Call>>,
    fail_on: Option<FailOn>,
}

impl RecordingServices {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn failing(fail_on: FailOn) -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            fail_on: Some(fail_on),
        })
    }

    pub fn collaborators(self: &Arc<Self>) -> Collaborators {
        Collaborators {
            sheets: self.clone(),
            calendar: self.clone(),
            tasks: self.clone(),
        }
    }

    pub fn handler(self: &Arc<Self>) -> SubmissionHandler {
        SubmissionHandler::new(self.collaborators(), TZ)
    }

    pub async fn calls(&self) -> Vec<Call> {
        self.calls.lock().await.clone()
    }

    pub async fn rows(&self) -> Vec<SheetRow> {
        self.calls()
            .await
            .into_iter()
            .filter_map(|call| match call {
                Call::Row(row) => Some(row),
                _ => None,
            })
            .collect()
    }

    pub async fn events(&self) -> Vec<CalendarEvent> {
        self.calls()
            .await
            .into_iter()
            .filter_map(|call| match call {
                Call::Event(event) => Some(event),
                _ => None,
            })
            .collect()
    }

    pub async fn tasks(&self) -> Vec<PreparationTask> {
        self.calls()
            .await
            .into_iter()
            .filter_map(|call| match call {
                Call::Task(task) => Some(task),
                _ => None,
            })
            .collect()
    }
}

#[async_trait]
impl SheetStore for RecordingServices {
    async fn append(&self, row: &SheetRow) -> LoggerResult<()> {
        if self.fail_on == Some(FailOn::Sheet) {
            return Err(collaborator_error(Service::Sheets, "HTTP 403 Forbidden - quota"));
        }
        self.calls.lock().await.push(Call::Row(row.clone()));
        Ok(())
    }
}

#[async_trait]
impl CalendarService for RecordingServices {
    async fn insert(&self, event: &CalendarEvent) -> LoggerResult<()> {
        let mut calls = self.calls.lock().await;
        let inserted = calls.iter().filter(|c| matches!(c, Call::Event(_))).count();
        if self.fail_on == Some(FailOn::Event(inserted)) {
            return Err(collaborator_error(Service::Calendar, "HTTP 500 - backend error"));
        }
        calls.push(Call::Event(event.clone()));
        Ok(())
    }
}

#[async_trait]
impl TaskService for RecordingServices {
    async fn insert(&self, task: &PreparationTask) -> LoggerResult<()> {
        if self.fail_on == Some(FailOn::Task) {
            return Err(collaborator_error(Service::Tasks, "HTTP 404 - list not found"));
        }
        self.calls.lock().await.push(Call::Task(task.clone()));
        Ok(())
    }
}

/// The Winter Break record used across the tests
pub fn winter_break() -> SubmissionRecord {
    serde_json::from_value(serde_json::json!({
        "eventType": "school",
        "schoolEventType": "Holiday",
        "eventName": "Winter Break",
        "startDate": "2025-12-20",
        "endDate": "2025-12-31",
        "isMultiDay": true,
        "isAllDay": true,
        "isSchoolOpen": false,
        "createTask": true,
        "taskDays": 7,
        "calendarDisplay": "span"
    }))
    .unwrap()
}
