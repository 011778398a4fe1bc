use super::models::{AppendBody, SheetRow};
use super::token::AccessTokenSource;
use super::{api_url, post_json};
use crate::components::SheetStore;
use crate::error::{LoggerResult, Service};
use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;
use tracing::info;

/// Appends rows through `spreadsheets.values.append`
pub struct GoogleSheetsClient {
    client: Client,
    tokens: Arc<dyn AccessTokenSource>,
    base: String,
    spreadsheet_id: String,
    range: String,
}

impl GoogleSheetsClient {
    pub fn new(
        client: Client,
        tokens: Arc<dyn AccessTokenSource>,
        base: &str,
        spreadsheet_id: &str,
        range: &str,
    ) -> Self {
        Self {
            client,
            tokens,
            base: base.to_string(),
            spreadsheet_id: spreadsheet_id.to_string(),
            range: range.to_string(),
        }
    }
}

#[async_trait]
impl SheetStore for GoogleSheetsClient {
    async fn append(&self, row: &SheetRow) -> LoggerResult<()> {
        let append_target = format!("{}:append", self.range);
        let mut url = api_url(
            &self.base,
            &["v4", "spreadsheets", &self.spreadsheet_id, "values", &append_target],
            Service::Sheets,
        )?;
        url.query_pairs_mut()
            .append_pair("valueInputOption", "USER_ENTERED");

        let reply = post_json(
            &self.client,
            self.tokens.as_ref(),
            url,
            &AppendBody { values: [row] },
            Service::Sheets,
        )
        .await?;

        let updated_range = reply
            .get("updates")
            .and_then(|u| u.get("updatedRange"))
            .and_then(|r| r.as_str())
            .unwrap_or("unknown range");
        info!("Appended row to {}", updated_range);
        Ok(())
    }
}
