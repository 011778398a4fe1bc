use crate::config::Config;
use crate::error::{auth_error, LoggerResult};
use async_trait::async_trait;
use chrono::Utc;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

/// Scopes needed for the sheet, calendar and task calls
pub const SCOPES: &str = "https://www.googleapis.com/auth/spreadsheets \
https://www.googleapis.com/auth/calendar \
https://www.googleapis.com/auth/tasks";

const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

/// Refresh this many seconds before the token actually expires
const EXPIRY_MARGIN_SECS: i64 = 60;

/// Assertion lifetime allowed by Google
const ASSERTION_LIFETIME_SECS: i64 = 3600;

/// Anything that can hand out a bearer token for the Google APIs
#[async_trait]
pub trait AccessTokenSource: Send + Sync {
    async fn access_token(&self) -> LoggerResult<String>;
}

/// A fixed token, for tests and short-lived tools
#[derive(Debug, Clone)]
pub struct StaticToken(pub String);

#[async_trait]
impl AccessTokenSource for StaticToken {
    async fn access_token(&self) -> LoggerResult<String> {
        Ok(self.0.clone())
    }
}

/// JWT claims of a service account assertion
#[derive(Debug, Serialize, Deserialize)]
struct AssertionClaims {
    iss: String,
    scope: String,
    aud: String,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "default_expires_in")]
    expires_in: i64,
}

fn default_expires_in() -> i64 {
    3600
}

#[derive(Debug, Clone)]
struct CachedToken {
    access_token: String,
    expires_at: i64,
}

/// Service account token manager.
///
/// Signs an assertion with the account's private key, exchanges it for an
/// access token and keeps that token until shortly before it expires.
#[derive(Clone)]
pub struct TokenManager {
    client_email: String,
    key: EncodingKey,
    token_uri: String,
    client: Client,
    cached: Arc<RwLock<Option<CachedToken>>>,
}

impl TokenManager {
    /// Parse the private key up front so a bad key fails at startup
    pub fn new(client_email: &str, private_key_pem: &str, token_uri: &str, client: Client) -> LoggerResult<Self> {
        let key = EncodingKey::from_rsa_pem(private_key_pem.as_bytes())
            .map_err(|e| auth_error(&format!("Invalid service account private key: {}", e)))?;

        Ok(Self {
            client_email: client_email.to_string(),
            key,
            token_uri: token_uri.to_string(),
            client,
            cached: Arc::new(RwLock::new(None)),
        })
    }

    pub fn from_config(config: &Config, client: Client) -> LoggerResult<Self> {
        Self::new(
            &config.google_client_email,
            &config.google_private_key,
            &config.endpoints.token_uri,
            client,
        )
    }

    /// Build the signed assertion sent to the token endpoint
    fn assertion(&self, now: i64) -> LoggerResult<String> {
        let claims = AssertionClaims {
            iss: self.client_email.clone(),
            scope: SCOPES.to_string(),
            aud: self.token_uri.clone(),
            iat: now,
            exp: now + ASSERTION_LIFETIME_SECS,
        };
        Ok(encode(&Header::new(Algorithm::RS256), &claims, &self.key)?)
    }

    /// Exchange a fresh assertion for an access token
    async fn fetch_token(&self) -> LoggerResult<CachedToken> {
        let now = Utc::now().timestamp();
        let assertion = self.assertion(now)?;

        let params = [("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())];

        let response = self
            .client
            .post(&self.token_uri)
            .form(&params)
            .send()
            .await
            .map_err(|e| auth_error(&format!("Failed to request token: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Could not read error response".to_string());
            return Err(auth_error(&format!(
                "Failed to request token: HTTP {} - {}",
                status, error_body
            )));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| auth_error(&format!("Failed to parse token response: {}", e)))?;

        info!("Obtained Google access token for {}", self.client_email);

        Ok(CachedToken {
            access_token: token.access_token,
            expires_at: now + token.expires_in,
        })
    }
}

#[async_trait]
impl AccessTokenSource for TokenManager {
    async fn access_token(&self) -> LoggerResult<String> {
        {
            let cached = self.cached.read().await;
            if let Some(token) = cached.as_ref() {
                if token.expires_at - EXPIRY_MARGIN_SECS > Utc::now().timestamp() {
                    return Ok(token.access_token.clone());
                }
            }
        }

        let mut cached = self.cached.write().await;
        // Another request may have refreshed while we waited for the lock
        if let Some(token) = cached.as_ref() {
            if token.expires_at - EXPIRY_MARGIN_SECS > Utc::now().timestamp() {
                return Ok(token.access_token.clone());
            }
        }

        debug!("Access token missing or expired, requesting a new one");
        let token = self.fetch_token().await?;
        let access_token = token.access_token.clone();
        *cached = Some(token);
        Ok(access_token)
    }
}
