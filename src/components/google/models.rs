use crate::utils::time::{format_date, to_rfc3339_millis};
use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::Serialize;

/// Number of cells in a logged row
pub const ROW_WIDTH: usize = 14;

/// One spreadsheet row, always exactly [`ROW_WIDTH`] cells
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SheetRow(pub [String; ROW_WIDTH]);

impl SheetRow {
    pub fn cells(&self) -> &[String; ROW_WIDTH] {
        &self.0
    }
}

/// Start or end of a calendar entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventTime {
    /// All-day entries use plain dates
    Date(NaiveDate),
    /// Timed entries use an instant in the configured zone
    DateTime(DateTime<Tz>),
}

/// Calendar entry to create
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarEvent {
    pub summary: String,
    pub description: String,
    pub start: EventTime,
    /// Exclusive for all-day entries
    pub end: EventTime,
}

/// Preparation task to create
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparationTask {
    pub title: String,
    pub notes: String,
    pub due: DateTime<Utc>,
}

/// `start`/`end` object of the Calendar API
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct EventTimeBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_time: Option<String>,
    pub time_zone: String,
}

impl EventTimeBody {
    pub fn new(time: &EventTime, tz: Tz) -> Self {
        match time {
            EventTime::Date(date) => Self {
                date: Some(format_date(*date)),
                date_time: None,
                time_zone: tz.name().to_string(),
            },
            EventTime::DateTime(instant) => Self {
                date: None,
                date_time: Some(instant.to_rfc3339()),
                time_zone: tz.name().to_string(),
            },
        }
    }
}

/// Request body of `events.insert`
#[derive(Debug, Serialize)]
pub(crate) struct EventBody {
    pub summary: String,
    pub description: String,
    pub start: EventTimeBody,
    pub end: EventTimeBody,
}

impl EventBody {
    pub fn new(event: &CalendarEvent, tz: Tz) -> Self {
        Self {
            summary: event.summary.clone(),
            description: event.description.clone(),
            start: EventTimeBody::new(&event.start, tz),
            end: EventTimeBody::new(&event.end, tz),
        }
    }
}

/// Request body of `tasks.insert`
#[derive(Debug, Serialize)]
pub(crate) struct TaskBody {
    pub title: String,
    pub notes: String,
    pub due: String,
}

impl From<&PreparationTask> for TaskBody {
    fn from(task: &PreparationTask) -> Self {
        Self {
            title: task.title.clone(),
            notes: task.notes.clone(),
            due: to_rfc3339_millis(&task.due),
        }
    }
}

/// Request body of `spreadsheets.values.append`
#[derive(Debug, Serialize)]
pub(crate) struct AppendBody<'a> {
    pub values: [&'a SheetRow; 1],
}
