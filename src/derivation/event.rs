use crate::components::google::models::{CalendarEvent, EventTime};
use crate::error::{validation_error, LoggerResult};
use crate::submission::validate::timed_window;
use crate::submission::{EventShape, Submission, Timing};
use crate::utils::time::{localize, next_day};
use chrono::{NaiveDate, NaiveDateTime};
use chrono_tz::Tz;

/// Name used when the submission has a blank event name
pub const UNTITLED_EVENT: &str = "Untitled Event";

/// Event name with the blank fallback applied
pub fn display_name(submission: &Submission) -> &str {
    let name = submission.event_name.trim();
    if name.is_empty() {
        UNTITLED_EVENT
    } else {
        name
    }
}

/// `"<subtype> - <event name>"`
pub fn event_title(submission: &Submission) -> String {
    format!("{} - {}", submission.subtype, display_name(submission))
}

/// Description shared by the calendar entries and the task notes
pub fn event_description(submission: &Submission) -> String {
    let base = format!(
        "Category: {}\nType: {}",
        submission.category, submission.subtype
    );
    match submission.long_description.as_deref() {
        Some(details) if !details.trim().is_empty() => format!("{}\n\nDetails:\n{}", base, details),
        _ => base,
    }
}

/// Calendar entries for a submission, one per shape rule
pub fn derive_events(submission: &Submission, tz: Tz) -> LoggerResult<Vec<CalendarEvent>> {
    let title = event_title(submission);
    let description = event_description(submission);
    let start_date = submission.start_date;

    match submission.shape {
        EventShape::SingleDay => Ok(vec![entry(
            title,
            description,
            submission,
            start_date,
            EventShape::SingleDay,
            tz,
        )?]),
        shape @ EventShape::MultiDaySpan { .. } => Ok(vec![entry(
            title,
            description,
            submission,
            start_date,
            shape,
            tz,
        )?]),
        EventShape::MultiDaySplit { end_date } => Ok(vec![
            entry(
                format!("{} (Starts)", title),
                description.clone(),
                submission,
                start_date,
                EventShape::SingleDay,
                tz,
            )?,
            entry(
                format!("{} (Ends)", title),
                description,
                submission,
                end_date,
                EventShape::SingleDay,
                tz,
            )?,
        ]),
    }
}

/// One entry starting on `day`; `shape` decides whether it runs past that day
fn entry(
    summary: String,
    description: String,
    submission: &Submission,
    day: NaiveDate,
    shape: EventShape,
    tz: Tz,
) -> LoggerResult<CalendarEvent> {
    let (start, end) = match submission.timing {
        Timing::AllDay => {
            let last_day = match shape {
                EventShape::MultiDaySpan { end_date } => end_date,
                _ => day,
            };
            let exclusive_end = next_day(last_day)
                .ok_or_else(|| validation_error("endDate", "Date is out of range"))?;
            (EventTime::Date(day), EventTime::Date(exclusive_end))
        }
        Timing::Timed { start, end } => {
            let (start_at, end_at) = timed_window(day, shape, start, end)
                .ok_or_else(|| validation_error("endTime", "End time must be after the start time"))?;
            (instant(&start_at, tz, "startTime")?, instant(&end_at, tz, "endTime")?)
        }
    };

    Ok(CalendarEvent {
        summary,
        description,
        start,
        end,
    })
}

fn instant(naive: &NaiveDateTime, tz: Tz, field: &str) -> LoggerResult<EventTime> {
    localize(tz, naive)
        .map(EventTime::DateTime)
        .ok_or_else(|| validation_error(field, &format!("{} does not exist in {}", naive, tz.name())))
}
