//! Google Sheets, Calendar and Tasks clients
pub mod calendar;
pub mod models;
pub mod sheets;
pub mod tasks;
pub mod token;

pub use calendar::GoogleCalendarClient;
pub use models::{CalendarEvent, EventTime, PreparationTask, SheetRow};
pub use sheets::GoogleSheetsClient;
pub use tasks::GoogleTasksClient;
pub use token::{AccessTokenSource, StaticToken, TokenManager};

use super::Collaborators;
use crate::config::Config;
use crate::error::{collaborator_error, LoggerResult, Service};
use reqwest::Client;
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;
use url::Url;

/// Build `base` + path segments, escaping each segment
pub(crate) fn api_url(base: &str, segments: &[&str], service: Service) -> LoggerResult<Url> {
    let mut url = Url::parse(base)
        .map_err(|e| collaborator_error(service, &format!("Failed to parse URL: {}", e)))?;
    url.path_segments_mut()
        .map_err(|_| collaborator_error(service, &format!("Base URL cannot take a path: {}", base)))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// POST a JSON body with a bearer token and return the JSON reply
pub(crate) async fn post_json<B: Serialize + ?Sized>(
    client: &Client,
    tokens: &dyn AccessTokenSource,
    url: Url,
    body: &B,
    service: Service,
) -> LoggerResult<serde_json::Value> {
    let access_token = tokens.access_token().await?;
    debug!("POST {}", url);

    let response = client
        .post(url)
        .bearer_auth(access_token)
        .json(body)
        .send()
        .await
        .map_err(|e| collaborator_error(service, &format!("Request failed: {}", e)))?;

    if !response.status().is_success() {
        let status = response.status();
        let error_body = response
            .text()
            .await
            .unwrap_or_else(|_| "Could not read error response".to_string());
        return Err(collaborator_error(
            service,
            &format!("HTTP {} - {}", status, error_body),
        ));
    }

    response
        .json()
        .await
        .map_err(|e| collaborator_error(service, &format!("Failed to parse response: {}", e)))
}

/// Wire the three Google clients to one shared token manager
pub fn collaborators_from_config(config: &Config) -> LoggerResult<Collaborators> {
    let client = Client::new();
    let tokens: Arc<dyn AccessTokenSource> = Arc::new(TokenManager::from_config(config, client.clone())?);
    Ok(collaborators_with_tokens(config, client, tokens))
}

/// Same as [`collaborators_from_config`] with a caller-supplied token source
pub fn collaborators_with_tokens(
    config: &Config,
    client: Client,
    tokens: Arc<dyn AccessTokenSource>,
) -> Collaborators {
    Collaborators {
        sheets: Arc::new(GoogleSheetsClient::new(
            client.clone(),
            Arc::clone(&tokens),
            &config.endpoints.sheets_base,
            &config.google_sheet_id,
            &config.sheet_range,
        )),
        calendar: Arc::new(GoogleCalendarClient::new(
            client.clone(),
            Arc::clone(&tokens),
            &config.endpoints.calendar_base,
            &config.google_calendar_id,
            config.timezone,
        )),
        tasks: Arc::new(GoogleTasksClient::new(
            client,
            tokens,
            &config.endpoints.tasks_base,
            &config.google_task_list,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_url_escapes_segments() {
        let url = api_url(
            "https://www.googleapis.com/",
            &["calendar", "v3", "calendars", "team calendar@group.calendar.google.com", "events"],
            Service::Calendar,
        )
        .unwrap();
        assert_eq!(
            url.as_str(),
            "https://www.googleapis.com/calendar/v3/calendars/team%20calendar@group.calendar.google.com/events"
        );
    }

    #[test]
    fn test_api_url_rejects_garbage_base() {
        assert!(api_url("not a url", &["x"], Service::Sheets).is_err());
    }
}
