use crate::error::{config_error, env_error, LoggerResult};
use chrono_tz::Tz;
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;

/// Default time zone for calendar entries
pub const DEFAULT_TIMEZONE: &str = "Asia/Bangkok";

/// Default range rows are appended to
pub const DEFAULT_SHEET_RANGE: &str = "Sheet1!A1";

/// Default Google Tasks list
pub const DEFAULT_TASK_LIST: &str = "@default";

/// Location of the optional endpoint overrides
pub const ENDPOINTS_FILE: &str = "config/endpoints.toml";

/// Base URLs of the Google APIs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    pub sheets_base: String,
    pub calendar_base: String,
    pub tasks_base: String,
    pub token_uri: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            sheets_base: "https://sheets.googleapis.com".to_string(),
            calendar_base: "https://www.googleapis.com".to_string(),
            tasks_base: "https://tasks.googleapis.com".to_string(),
            token_uri: "https://oauth2.googleapis.com/token".to_string(),
        }
    }
}

impl Endpoints {
    /// Point every API at one base URL (used against mock servers)
    pub fn all_at(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        Self {
            sheets_base: base.to_string(),
            calendar_base: base.to_string(),
            tasks_base: base.to_string(),
            token_uri: format!("{}/token", base),
        }
    }

    /// Load overrides from a TOML file, falling back to defaults when the file is absent
    pub fn load_from(path: &Path) -> LoggerResult<Self> {
        match fs::read_to_string(path) {
            Ok(content) => Ok(toml::from_str(&content)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Main configuration structure for the service
#[derive(Debug, Clone)]
pub struct Config {
    /// Service account email
    pub google_client_email: String,
    /// Service account private key (PEM)
    pub google_private_key: String,
    /// Spreadsheet that receives one row per submission
    pub google_sheet_id: String,
    /// Calendar that receives the derived events
    pub google_calendar_id: String,
    /// Task list for preparation tasks
    pub google_task_list: String,
    /// A1 range rows are appended after
    pub sheet_range: String,
    /// Time zone for timed events
    pub timezone: Tz,
    /// Address the web server binds to
    pub host: String,
    pub port: u16,
    pub endpoints: Endpoints,
}

impl Config {
    /// Load configuration from environment and config file
    pub fn load() -> LoggerResult<Self> {
        // Load .env file if it exists
        dotenv().ok();

        let google_client_email =
            env::var("GOOGLE_CLIENT_EMAIL").map_err(|_| env_error("GOOGLE_CLIENT_EMAIL"))?;
        let google_private_key = env::var("GOOGLE_PRIVATE_KEY")
            .map(|key| normalize_private_key(&key))
            .map_err(|_| env_error("GOOGLE_PRIVATE_KEY"))?;
        let google_sheet_id =
            env::var("GOOGLE_SHEET_ID").map_err(|_| env_error("GOOGLE_SHEET_ID"))?;
        let google_calendar_id =
            env::var("GOOGLE_CALENDAR_ID").map_err(|_| env_error("GOOGLE_CALENDAR_ID"))?;

        let google_task_list =
            env::var("GOOGLE_TASK_LIST").unwrap_or_else(|_| String::from(DEFAULT_TASK_LIST));
        let sheet_range =
            env::var("SHEET_RANGE").unwrap_or_else(|_| String::from(DEFAULT_SHEET_RANGE));

        let timezone = parse_timezone(
            &env::var("TIMEZONE").unwrap_or_else(|_| String::from(DEFAULT_TIMEZONE)),
        )?;

        let host = env::var("HOST").unwrap_or_else(|_| String::from("127.0.0.1"));
        let port = match env::var("PORT") {
            Ok(p) => p
                .parse::<u16>()
                .map_err(|_| config_error("Invalid PORT format"))?,
            Err(_) => 3000,
        };

        let endpoints = Endpoints::load_from(Path::new(ENDPOINTS_FILE))?;

        let config = Config {
            google_client_email,
            google_private_key,
            google_sheet_id,
            google_calendar_id,
            google_task_list,
            sheet_range,
            timezone,
            host,
            port,
            endpoints,
        };
        config.check()?;

        Ok(config)
    }

    /// Reject identifiers that are present but empty
    pub fn check(&self) -> LoggerResult<()> {
        let required = [
            ("GOOGLE_CLIENT_EMAIL", &self.google_client_email),
            ("GOOGLE_PRIVATE_KEY", &self.google_private_key),
            ("GOOGLE_SHEET_ID", &self.google_sheet_id),
            ("GOOGLE_CALENDAR_ID", &self.google_calendar_id),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(config_error(&format!("{} is set but empty", name)));
            }
        }
        Ok(())
    }

    /// Socket address string for the web server
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Hosting dashboards store the key on one line with escaped newlines
pub fn normalize_private_key(raw: &str) -> String {
    raw.replace("\\n", "\n")
}

/// Parse an IANA time zone name
pub fn parse_timezone(name: &str) -> LoggerResult<Tz> {
    name.parse::<Tz>()
        .map_err(|_| config_error(&format!("Unknown time zone: {}", name)))
}
