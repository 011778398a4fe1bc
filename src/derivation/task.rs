use super::event::{display_name, event_description};
use crate::components::google::models::PreparationTask;
use crate::error::{validation_error, LoggerResult};
use crate::submission::Submission;
use crate::utils::time::{days_before, utc_midnight};

/// Preparation task for a submission, if one was requested.
///
/// Google Tasks keeps only the date part of `due`, so it is sent as
/// midnight UTC of the due date.
pub fn derive_task(submission: &Submission) -> LoggerResult<Option<PreparationTask>> {
    let Some(days) = submission.task_days else {
        return Ok(None);
    };

    let due_date = days_before(submission.start_date, days)
        .ok_or_else(|| validation_error("taskDays", "Due date is out of range"))?;

    Ok(Some(PreparationTask {
        title: format!("Preparation for {}", display_name(submission)),
        notes: event_description(submission),
        due: utc_midnight(due_date),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::submission::EventCategory;
    use chrono::{NaiveDate, TimeZone, Utc};

    fn submission(task_days: Option<u32>) -> Submission {
        let mut submission = Submission::new(
            EventCategory::School,
            "Holiday",
            "Winter Break",
            NaiveDate::from_ymd_opt(2025, 12, 20).unwrap(),
        );
        submission.task_days = task_days;
        submission
    }

    #[test]
    fn test_no_task_without_request() {
        assert_eq!(derive_task(&submission(None)).unwrap(), None);
    }

    #[test]
    fn test_task_due_days_before_start() {
        let task = derive_task(&submission(Some(7))).unwrap().unwrap();
        assert_eq!(task.title, "Preparation for Winter Break");
        assert_eq!(task.notes, "Category: school\nType: Holiday");
        assert_eq!(task.due, Utc.with_ymd_and_hms(2025, 12, 13, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_zero_days_is_due_on_start() {
        let task = derive_task(&submission(Some(0))).unwrap().unwrap();
        assert_eq!(task.due, Utc.with_ymd_and_hms(2025, 12, 20, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_due_crosses_month() {
        let task = derive_task(&submission(Some(25))).unwrap().unwrap();
        assert_eq!(task.due, Utc.with_ymd_and_hms(2025, 11, 25, 0, 0, 0).unwrap());
    }
}
