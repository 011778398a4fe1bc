//! Client side of a submission: holds a draft record and sends it once per call
use crate::error::{other_error, LoggerResult};
use crate::response::SubmitResponse;
use crate::submission::{check_form_minimum, SubmissionRecord};
use reqwest::Client;
use tracing::{error, info};

/// Result of the last submit
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Submitting,
    Succeeded(String),
    Failed(String),
}

/// Collects one record at a time and submits it to the handler
#[derive(Debug, Clone)]
pub struct FormCollector {
    client: Client,
    endpoint: String,
    draft: SubmissionRecord,
    status: SubmissionStatus,
}

impl FormCollector {
    pub fn new(endpoint: &str) -> Self {
        Self::with_client(Client::new(), endpoint)
    }

    pub fn with_client(client: Client, endpoint: &str) -> Self {
        Self {
            client,
            endpoint: endpoint.to_string(),
            draft: SubmissionRecord::default(),
            status: SubmissionStatus::Idle,
        }
    }

    pub fn draft(&self) -> &SubmissionRecord {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut SubmissionRecord {
        &mut self.draft
    }

    pub fn status(&self) -> &SubmissionStatus {
        &self.status
    }

    /// Back to the values a fresh form starts with
    pub fn reset(&mut self) {
        self.draft = SubmissionRecord::default();
    }

    /// Submit the draft.
    ///
    /// Only the event name and start date are checked locally. The reply is
    /// read and returned whatever its status; the draft is reset only when
    /// the handler confirms success.
    pub async fn submit(&mut self) -> LoggerResult<SubmitResponse> {
        if let Err(e) = check_form_minimum(&self.draft) {
            self.status = SubmissionStatus::Failed(e.to_string());
            return Err(e);
        }

        self.status = SubmissionStatus::Submitting;
        match self.send().await {
            Ok(reply) if reply.success => {
                info!("Submission accepted: {}", reply.message);
                self.status = SubmissionStatus::Succeeded(reply.message.clone());
                self.reset();
                Ok(reply)
            }
            Ok(reply) => {
                error!("Submission rejected: {}", reply.message);
                self.status = SubmissionStatus::Failed(reply.message.clone());
                Ok(reply)
            }
            Err(e) => {
                error!("Submission failed: {}", e);
                self.status = SubmissionStatus::Failed(e.to_string());
                Err(e)
            }
        }
    }

    async fn send(&self) -> LoggerResult<SubmitResponse> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&self.draft)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        serde_json::from_str::<SubmitResponse>(&body).map_err(|_| {
            other_error(&format!("Unexpected reply (HTTP {}): {}", status, body))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use mockito::Matcher;
    use serde_json::json;

    fn filled(collector: &mut FormCollector) {
        let draft = collector.draft_mut();
        draft.event_name = "Sports Day".to_string();
        draft.start_date = Some("2025-05-01".to_string());
    }

    #[tokio::test]
    async fn test_local_check_blocks_request() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/submit")
            .expect(0)
            .create_async()
            .await;

        let mut collector = FormCollector::new(&format!("{}/api/submit", server.url()));
        let err = collector.submit().await.unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert!(matches!(collector.status(), SubmissionStatus::Failed(_)));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_success_resets_draft() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/submit")
            .match_body(Matcher::PartialJson(json!({
                "eventType": "school",
                "eventName": "Sports Day",
                "startDate": "2025-05-01"
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"success": true, "message": "Event logged successfully!"}"#)
            .expect(1)
            .create_async()
            .await;

        let mut collector = FormCollector::new(&format!("{}/api/submit", server.url()));
        filled(&mut collector);
        let reply = collector.submit().await.unwrap();

        assert!(reply.success);
        assert_eq!(
            collector.status(),
            &SubmissionStatus::Succeeded("Event logged successfully!".to_string())
        );
        assert_eq!(collector.draft(), &SubmissionRecord::default());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_server_failure_is_reported_and_draft_kept() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/api/submit")
            .with_status(500)
            .with_header("content-type", "application/json")
            .with_body(r#"{"success": false, "message": "Server Error: Google Calendar error: HTTP 403", "stage": "dispatching_events", "completed": {"sheetAppended": true, "eventsCreated": 0, "taskCreated": false}}"#)
            .create_async()
            .await;

        let mut collector = FormCollector::new(&format!("{}/api/submit", server.url()));
        filled(&mut collector);
        let reply = collector.submit().await.unwrap();

        assert!(!reply.success);
        assert_eq!(reply.completed.map(|p| p.sheet_appended), Some(true));
        assert!(matches!(collector.status(), SubmissionStatus::Failed(m) if m.contains("HTTP 403")));
        assert_eq!(collector.draft().event_name, "Sports Day");
    }

    #[tokio::test]
    async fn test_non_json_reply_is_an_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/api/submit")
            .with_status(502)
            .with_body("Bad Gateway")
            .create_async()
            .await;

        let mut collector = FormCollector::new(&format!("{}/api/submit", server.url()));
        filled(&mut collector);
        let err = collector.submit().await.unwrap_err();
        assert!(err.to_string().contains("Bad Gateway"));
    }
}
