use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Event category chosen on the form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventCategory {
    School,
    Personal,
}

impl EventCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventCategory::School => "school",
            EventCategory::Personal => "personal",
        }
    }
}

impl fmt::Display for EventCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the school day looks like when school stays open
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchoolDayType {
    HalfDay,
    NormalClass,
    NoClass,
}

impl SchoolDayType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SchoolDayType::HalfDay => "Half Day",
            SchoolDayType::NormalClass => "Normal Class",
            SchoolDayType::NoClass => "No Class",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "Half Day" => Some(SchoolDayType::HalfDay),
            "Normal Class" => Some(SchoolDayType::NormalClass),
            "No Class" => Some(SchoolDayType::NoClass),
            _ => None,
        }
    }
}

/// How a multi-day event is shown on the calendar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalendarDisplay {
    /// One entry covering every day
    Span,
    /// Separate entries on the first and last day
    StartEnd,
}

impl CalendarDisplay {
    pub fn as_str(&self) -> &'static str {
        match self {
            CalendarDisplay::Span => "span",
            CalendarDisplay::StartEnd => "start_end",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "span" => Some(CalendarDisplay::Span),
            "start_end" => Some(CalendarDisplay::StartEnd),
            _ => None,
        }
    }
}

/// `taskDays` arrives as a number or, from HTML number inputs, as a string
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumberOrText {
    Number(i64),
    Text(String),
}

/// The form values exactly as submitted.
///
/// Everything is lenient here; [`super::validate`] turns a record into a
/// [`Submission`] and reports every bad field at once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_type: Option<EventCategory>,
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub school_event_type: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub personal_event_type: Option<String>,
    #[serde(default)]
    pub event_name: String,
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub long_description: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(default)]
    pub is_multi_day: bool,
    #[serde(default = "default_true")]
    pub is_all_day: bool,
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(default)]
    pub is_school_open: bool,
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub school_day_type: Option<String>,
    #[serde(default)]
    pub create_task: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_days: Option<NumberOrText>,
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub calendar_display: Option<String>,
}

fn default_true() -> bool {
    true
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

/// The values a fresh form starts with
impl Default for SubmissionRecord {
    fn default() -> Self {
        Self {
            event_type: Some(EventCategory::School),
            school_event_type: Some("Holiday".to_string()),
            personal_event_type: Some("Training".to_string()),
            event_name: String::new(),
            long_description: None,
            start_date: None,
            end_date: None,
            is_multi_day: false,
            is_all_day: true,
            start_time: None,
            end_time: None,
            is_school_open: false,
            school_day_type: None,
            create_task: false,
            task_days: Some(NumberOrText::Number(7)),
            calendar_display: Some("span".to_string()),
        }
    }
}

/// Calendar shape of a submission, decided once during validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventShape {
    /// One entry on the start date
    SingleDay,
    /// One entry from the start date through `end_date`
    MultiDaySpan { end_date: NaiveDate },
    /// A "(Starts)" entry on the start date and an "(Ends)" entry on `end_date`
    MultiDaySplit { end_date: NaiveDate },
}

impl EventShape {
    pub fn end_date(&self) -> Option<NaiveDate> {
        match self {
            EventShape::SingleDay => None,
            EventShape::MultiDaySpan { end_date } | EventShape::MultiDaySplit { end_date } => {
                Some(*end_date)
            }
        }
    }

    pub fn display(&self) -> Option<CalendarDisplay> {
        match self {
            EventShape::SingleDay => None,
            EventShape::MultiDaySpan { .. } => Some(CalendarDisplay::Span),
            EventShape::MultiDaySplit { .. } => Some(CalendarDisplay::StartEnd),
        }
    }
}

/// All-day or timed; times stay optional so the row shows what was entered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timing {
    AllDay,
    Timed {
        start: Option<NaiveTime>,
        end: Option<NaiveTime>,
    },
}

/// A validated submission that the derivations work from
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub category: EventCategory,
    pub subtype: String,
    pub event_name: String,
    pub long_description: Option<String>,
    pub start_date: NaiveDate,
    pub shape: EventShape,
    pub timing: Timing,
    /// Set only for school events where school stays open
    pub school_day: Option<SchoolDayType>,
    /// Set only when a preparation task was requested
    pub task_days: Option<u32>,
}

impl Submission {
    /// A single-day, all-day submission with nothing optional set
    #[cfg(test)]
    pub(crate) fn new(category: EventCategory, subtype: &str, event_name: &str, start_date: NaiveDate) -> Self {
        Self {
            category,
            subtype: subtype.to_string(),
            event_name: event_name.to_string(),
            long_description: None,
            start_date,
            shape: EventShape::SingleDay,
            timing: Timing::AllDay,
            school_day: None,
            task_days: None,
        }
    }

    pub fn is_all_day(&self) -> bool {
        matches!(self.timing, Timing::AllDay)
    }
}
