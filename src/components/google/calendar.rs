use super::models::{CalendarEvent, EventBody};
use super::token::AccessTokenSource;
use super::{api_url, post_json};
use crate::components::CalendarService;
use crate::error::{LoggerResult, Service};
use async_trait::async_trait;
use chrono_tz::Tz;
use reqwest::Client;
use std::sync::Arc;
use tracing::info;

/// Creates entries through `events.insert`
pub struct GoogleCalendarClient {
    client: Client,
    tokens: Arc<dyn AccessTokenSource>,
    base: String,
    calendar_id: String,
    timezone: Tz,
}

impl GoogleCalendarClient {
    pub fn new(
        client: Client,
        tokens: Arc<dyn AccessTokenSource>,
        base: &str,
        calendar_id: &str,
        timezone: Tz,
    ) -> Self {
        Self {
            client,
            tokens,
            base: base.to_string(),
            calendar_id: calendar_id.to_string(),
            timezone,
        }
    }
}

#[async_trait]
impl CalendarService for GoogleCalendarClient {
    async fn insert(&self, event: &CalendarEvent) -> LoggerResult<()> {
        let url = api_url(
            &self.base,
            &["calendar", "v3", "calendars", &self.calendar_id, "events"],
            Service::Calendar,
        )?;

        let reply = post_json(
            &self.client,
            self.tokens.as_ref(),
            url,
            &EventBody::new(event, self.timezone),
            Service::Calendar,
        )
        .await?;

        let id = reply.get("id").and_then(|id| id.as_str()).unwrap_or("");
        info!("Created calendar event '{}' ({})", event.summary, id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::google::models::EventTime;
    use crate::components::google::token::StaticToken;
    use chrono::NaiveDate;
    use mockito::Matcher;
    use serde_json::json;

    #[tokio::test]
    async fn test_insert_all_day_event() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/calendar/v3/calendars/family@group.calendar.google.com/events")
            .match_header("authorization", "Bearer test-token")
            .match_body(Matcher::Json(json!({
                "summary": "Holiday - Winter Break",
                "description": "Category: school\nType: Holiday",
                "start": { "date": "2025-12-20", "timeZone": "Asia/Bangkok" },
                "end": { "date": "2026-01-01", "timeZone": "Asia/Bangkok" }
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"id": "evt123", "status": "confirmed"}"#)
            .create_async()
            .await;

        let client = GoogleCalendarClient::new(
            Client::new(),
            Arc::new(StaticToken("test-token".to_string())),
            &server.url(),
            "family@group.calendar.google.com",
            chrono_tz::Asia::Bangkok,
        );
        let event = CalendarEvent {
            summary: "Holiday - Winter Break".to_string(),
            description: "Category: school\nType: Holiday".to_string(),
            start: EventTime::Date(NaiveDate::from_ymd_opt(2025, 12, 20).unwrap()),
            end: EventTime::Date(NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()),
        };
        client.insert(&event).await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_insert_failure() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", Matcher::Any)
            .with_status(404)
            .with_body(r#"{"error": {"message": "Not Found"}}"#)
            .create_async()
            .await;

        let client = GoogleCalendarClient::new(
            Client::new(),
            Arc::new(StaticToken("test-token".to_string())),
            &server.url(),
            "missing",
            chrono_tz::UTC,
        );
        let event = CalendarEvent {
            summary: "x".to_string(),
            description: "y".to_string(),
            start: EventTime::Date(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()),
            end: EventTime::Date(NaiveDate::from_ymd_opt(2025, 1, 2).unwrap()),
        };
        let err = client.insert(&event).await.unwrap_err();
        assert!(err.to_string().starts_with("Google Calendar error: HTTP 404"));
    }
}
