use jwt_simple::prelude::*;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::config::ConfigError;
use crate::error::{AppError, Result};

pub const SPREADSHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";

const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

/// Tokens are refreshed this long before Google says they expire.
const EXPIRY_MARGIN_SECS: u64 = 60;

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

/// The fields of a Google service-account key file that token exchange needs.
#[derive(Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub private_key: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

impl ServiceAccountKey {
    pub fn from_file(path: &str) -> std::result::Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::CredentialsIo {
            path: path.to_string(),
            source,
        })?;
        serde_json::from_str(&contents).map_err(|source| ConfigError::CredentialsFormat {
            path: path.to_string(),
            source,
        })
    }
}

impl std::fmt::Debug for ServiceAccountKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceAccountKey")
            .field("client_email", &self.client_email)
            .field("token_uri", &self.token_uri)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ScopeClaims {
    scope: String,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "default_expires_in")]
    expires_in: u64,
}

fn default_expires_in() -> u64 {
    3600
}

struct CachedToken {
    access_token: String,
    refresh_at: std::time::Instant,
}

/// OAuth2 access tokens for a service account via the JWT-bearer grant.
pub struct ServiceAccountAuth {
    client: Client,
    key: ServiceAccountKey,
    key_pair: RS256KeyPair,
    cached: Mutex<Option<CachedToken>>,
}

impl ServiceAccountAuth {
    pub fn new(client: Client, key: ServiceAccountKey) -> std::result::Result<Self, ConfigError> {
        let key_pair = RS256KeyPair::from_pem(&key.private_key)
            .map_err(|e| ConfigError::InvalidPrivateKey(e.to_string()))?;

        Ok(Self {
            client,
            key,
            key_pair,
            cached: Mutex::new(None),
        })
    }

    /// Returns a cached token, or exchanges a fresh assertion for a new one.
    pub async fn access_token(&self) -> Result<String> {
        let mut cached = self.cached.lock().await;
        if let Some(token) = cached.as_ref() {
            if std::time::Instant::now() < token.refresh_at {
                return Ok(token.access_token.clone());
            }
        }

        let assertion = self.assertion()?;
        let response = self
            .client
            .post(&self.key.token_uri)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .await
            .map_err(|e| AppError::Sheets(format!("token request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(AppError::Sheets(format!(
                "token exchange failed ({}): {}",
                status, error_text
            )));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| AppError::Sheets(format!("Failed to parse token response: {}", e)))?;

        let lifetime = token.expires_in.saturating_sub(EXPIRY_MARGIN_SECS);
        tracing::debug!(
            "Obtained Google access token for {} (valid {}s)",
            self.key.client_email,
            token.expires_in
        );

        *cached = Some(CachedToken {
            access_token: token.access_token.clone(),
            refresh_at: std::time::Instant::now() + std::time::Duration::from_secs(lifetime),
        });

        Ok(token.access_token)
    }

    /// Signed JWT asserting the service account identity and scope.
    fn assertion(&self) -> Result<String> {
        let claims = Claims::with_custom_claims(
            ScopeClaims {
                scope: SPREADSHEETS_SCOPE.to_string(),
            },
            Duration::from_hours(1),
        )
        .with_issuer(&self.key.client_email)
        .with_audience(&self.key.token_uri);

        self.key_pair
            .sign(claims)
            .map_err(|e| AppError::Internal(format!("Failed to sign token assertion: {}", e)))
    }
}
