//! Submitted form records and their validation
pub mod models;
pub mod validate;

pub use models::{
    CalendarDisplay, EventCategory, EventShape, NumberOrText, SchoolDayType, Submission,
    SubmissionRecord, Timing,
};
pub use validate::{check_form_minimum, validate};
