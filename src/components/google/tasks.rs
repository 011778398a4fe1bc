use super::models::{PreparationTask, TaskBody};
use super::token::AccessTokenSource;
use super::{api_url, post_json};
use crate::components::TaskService;
use crate::error::{LoggerResult, Service};
use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;
use tracing::info;

/// Creates tasks through `tasks.insert`
pub struct GoogleTasksClient {
    client: Client,
    tokens: Arc<dyn AccessTokenSource>,
    base: String,
    task_list: String,
}

impl GoogleTasksClient {
    pub fn new(client: Client, tokens: Arc<dyn AccessTokenSource>, base: &str, task_list: &str) -> Self {
        Self {
            client,
            tokens,
            base: base.to_string(),
            task_list: task_list.to_string(),
        }
    }
}

#[async_trait]
impl TaskService for GoogleTasksClient {
    async fn insert(&self, task: &PreparationTask) -> LoggerResult<()> {
        let url = api_url(
            &self.base,
            &["tasks", "v1", "lists", &self.task_list, "tasks"],
            Service::Tasks,
        )?;

        post_json(
            &self.client,
            self.tokens.as_ref(),
            url,
            &TaskBody::from(task),
            Service::Tasks,
        )
        .await?;

        info!("Created task '{}' due {}", task.title, task.due.date_naive());
        Ok(())
    }
}
