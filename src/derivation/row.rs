use crate::components::google::models::SheetRow;
use crate::submission::{Submission, Timing};
use crate::utils::time::{format_date, format_time, to_rfc3339_millis};
use chrono::{DateTime, Utc};

const NOT_APPLICABLE: &str = "N/A";

fn yes_no(flag: bool) -> String {
    if flag { "Yes" } else { "No" }.to_string()
}

/// Build the spreadsheet row for a submission logged at `logged_at`
pub fn build_row(submission: &Submission, logged_at: DateTime<Utc>) -> SheetRow {
    let (start_time, end_time) = match submission.timing {
        Timing::AllDay => (String::new(), String::new()),
        Timing::Timed { start, end } => (
            start.map(format_time).unwrap_or_default(),
            end.map(format_time).unwrap_or_default(),
        ),
    };

    SheetRow([
        to_rfc3339_millis(&logged_at),
        submission.category.as_str().to_string(),
        submission.subtype.clone(),
        submission.event_name.clone(),
        submission.long_description.clone().unwrap_or_default(),
        format_date(submission.start_date),
        submission.shape.end_date().map(format_date).unwrap_or_default(),
        yes_no(submission.is_all_day()),
        start_time,
        end_time,
        yes_no(submission.school_day.is_some()),
        submission
            .school_day
            .map(|day| day.as_str().to_string())
            .unwrap_or_else(|| NOT_APPLICABLE.to_string()),
        yes_no(submission.task_days.is_some()),
        submission
            .shape
            .display()
            .map(|display| display.as_str().to_string())
            .unwrap_or_else(|| NOT_APPLICABLE.to_string()),
    ])
}
