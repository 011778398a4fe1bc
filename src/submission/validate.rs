use super::models::{
    CalendarDisplay, EventCategory, EventShape, NumberOrText, SchoolDayType, Submission,
    SubmissionRecord, Timing,
};
use crate::error::{Error, FieldError, LoggerResult};
use crate::utils::time::{parse_date, parse_time};
use chrono::{Duration, NaiveDate, NaiveTime};

/// Default start of a timed event without a start time
pub const DEFAULT_START_TIME: (u32, u32) = (9, 0);
/// Default end of a timed event without any times
pub const DEFAULT_END_TIME: (u32, u32) = (10, 0);

/// Check the two constraints the form enforces before sending anything
pub fn check_form_minimum(record: &SubmissionRecord) -> LoggerResult<()> {
    let mut errors = Vec::new();
    if record.event_name.trim().is_empty() {
        errors.push(FieldError::new("eventName", "Event name is required"));
    }
    if record.start_date.is_none() {
        errors.push(FieldError::new("startDate", "Start date is required"));
    }
    if errors.is_empty() {
        Ok(())
    } else {
        Err(Error::Validation(errors))
    }
}

/// Validate a raw record, collecting every field error
pub fn validate(record: &SubmissionRecord) -> LoggerResult<Submission> {
    let mut errors = Vec::new();

    let category = record.event_type;
    if category.is_none() {
        errors.push(FieldError::new("eventType", "Event category is required"));
    }

    let subtype = match category {
        Some(EventCategory::School) => {
            required_text(&record.school_event_type, "schoolEventType", &mut errors)
        }
        Some(EventCategory::Personal) => {
            required_text(&record.personal_event_type, "personalEventType", &mut errors)
        }
        None => None,
    };

    let event_name = record.event_name.trim().to_string();
    if event_name.is_empty() {
        errors.push(FieldError::new("eventName", "Event name is required"));
    }

    let start_date = required_date(&record.start_date, "startDate", &mut errors);

    let shape = if record.is_multi_day {
        let end_date = required_date(&record.end_date, "endDate", &mut errors);
        if let (Some(start), Some(end)) = (start_date, end_date) {
            if end < start {
                errors.push(FieldError::new("endDate", "End date must not be before the start date"));
            }
        }
        let display = match record.calendar_display.as_deref() {
            Some(value) => {
                let parsed = CalendarDisplay::parse(value);
                if parsed.is_none() {
                    errors.push(FieldError::new("calendarDisplay", "Must be 'span' or 'start_end'"));
                }
                parsed
            }
            None => {
                errors.push(FieldError::new(
                    "calendarDisplay",
                    "Calendar display is required for multi-day events",
                ));
                None
            }
        };
        match (end_date, display) {
            (Some(end_date), Some(CalendarDisplay::Span)) => Some(EventShape::MultiDaySpan { end_date }),
            (Some(end_date), Some(CalendarDisplay::StartEnd)) => {
                Some(EventShape::MultiDaySplit { end_date })
            }
            _ => None,
        }
    } else {
        Some(EventShape::SingleDay)
    };

    let timing = if record.is_all_day {
        Timing::AllDay
    } else {
        Timing::Timed {
            start: optional_time(&record.start_time, "startTime", &mut errors),
            end: optional_time(&record.end_time, "endTime", &mut errors),
        }
    };

    // School-open details only apply to school events
    let school_day = if category == Some(EventCategory::School) && record.is_school_open {
        match record.school_day_type.as_deref() {
            Some(value) => {
                let parsed = SchoolDayType::parse(value);
                if parsed.is_none() {
                    errors.push(FieldError::new(
                        "schoolDayType",
                        "Must be 'Half Day', 'Normal Class' or 'No Class'",
                    ));
                }
                parsed
            }
            None => {
                errors.push(FieldError::new(
                    "schoolDayType",
                    "School day type is required when school is open",
                ));
                None
            }
        }
    } else {
        None
    };

    let task_days = if record.create_task {
        parse_task_days(record.task_days.as_ref(), &mut errors)
    } else {
        None
    };

    if let (Some(start_date), Some(shape), Timing::Timed { start, end }) = (start_date, shape, timing) {
        if timed_window(start_date, shape, start, end).is_none() {
            errors.push(FieldError::new("endTime", "End time must be after the start time"));
        }
    }

    match (category, subtype, start_date, shape) {
        (Some(category), Some(subtype), Some(start_date), Some(shape)) if errors.is_empty() => {
            Ok(Submission {
                category,
                subtype,
                event_name,
                long_description: record
                    .long_description
                    .as_ref()
                    .map(|d| d.trim().to_string())
                    .filter(|d| !d.is_empty()),
                start_date,
                shape,
                timing,
                school_day,
                task_days,
            })
        }
        _ => Err(Error::Validation(errors)),
    }
}

/// Start and end wall-clock times of the first timed entry a shape produces.
///
/// Returns `None` when the end would not come after the start.
pub fn timed_window(
    start_date: NaiveDate,
    shape: EventShape,
    start: Option<NaiveTime>,
    end: Option<NaiveTime>,
) -> Option<(chrono::NaiveDateTime, chrono::NaiveDateTime)> {
    let end_date = match shape {
        EventShape::MultiDaySpan { end_date } => end_date,
        EventShape::SingleDay | EventShape::MultiDaySplit { .. } => start_date,
    };
    let (default_start_h, default_start_m) = DEFAULT_START_TIME;
    let (default_end_h, default_end_m) = DEFAULT_END_TIME;

    let start_time = start.or_else(|| NaiveTime::from_hms_opt(default_start_h, default_start_m, 0))?;
    let start_at = start_date.and_time(start_time);
    let end_at = match (start, end) {
        (_, Some(end_time)) => end_date.and_time(end_time),
        (None, None) => end_date.and_time(NaiveTime::from_hms_opt(default_end_h, default_end_m, 0)?),
        // Only a start time: run for an hour
        (Some(start_time), None) => end_date.and_time(start_time) + Duration::hours(1),
    };

    if end_at > start_at {
        Some((start_at, end_at))
    } else {
        None
    }
}

fn required_text(value: &Option<String>, field: &str, errors: &mut Vec<FieldError>) -> Option<String> {
    match value.as_deref().map(str::trim) {
        Some(text) if !text.is_empty() => Some(text.to_string()),
        _ => {
            errors.push(FieldError::new(field, "Event type is required for this category"));
            None
        }
    }
}

fn required_date(value: &Option<String>, field: &str, errors: &mut Vec<FieldError>) -> Option<NaiveDate> {
    match value.as_deref() {
        Some(text) => {
            let date = parse_date(text);
            if date.is_none() {
                errors.push(FieldError::new(field, "Expected a date in YYYY-MM-DD format"));
            }
            date
        }
        None => {
            errors.push(FieldError::new(field, "Date is required"));
            None
        }
    }
}

fn optional_time(value: &Option<String>, field: &str, errors: &mut Vec<FieldError>) -> Option<NaiveTime> {
    let text = value.as_deref()?;
    let time = parse_time(text);
    if time.is_none() {
        errors.push(FieldError::new(field, "Expected a time in HH:MM format"));
    }
    time
}

fn parse_task_days(value: Option<&NumberOrText>, errors: &mut Vec<FieldError>) -> Option<u32> {
    let parsed = match value {
        Some(NumberOrText::Number(n)) => Some(*n),
        Some(NumberOrText::Text(text)) if text.trim().is_empty() => None,
        Some(NumberOrText::Text(text)) => match text.trim().parse::<i64>() {
            Ok(n) => Some(n),
            Err(_) => {
                errors.push(FieldError::new("taskDays", "Must be a whole number of days"));
                return None;
            }
        },
        None => None,
    };

    match parsed {
        Some(n) => match u32::try_from(n) {
            Ok(days) => Some(days),
            Err(_) => {
                errors.push(FieldError::new("taskDays", "Must be zero or more days"));
                None
            }
        },
        None => {
            errors.push(FieldError::new(
                "taskDays",
                "Number of days is required when creating a task",
            ));
            None
        }
    }
}
