use std::env;

use serde::Deserialize;
use thiserror::Error;

use crate::models::PaymentLinkCatalog;

/// Sheet tab the guest list is written to unless overridden.
pub const DEFAULT_SHEET_NAME: &str = "Ark1";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing environment variable `{0}`")]
    Missing(&'static str),

    #[error("Invalid `AFTERPARTY_CONFIG`: {0}")]
    InvalidGuestListConfig(#[from] serde_json::Error),

    #[error("Duplicate payment link id in `AFTERPARTY_CONFIG`: {0}")]
    DuplicatePaymentLink(String),

    #[error("Invalid PORT: {0}")]
    InvalidPort(String),

    #[error("Could not read Google credentials from {path}: {source}")]
    CredentialsIo {
        path: String,
        source: std::io::Error,
    },

    #[error("Invalid Google credentials file {path}: {source}")]
    CredentialsFormat {
        path: String,
        source: serde_json::Error,
    },

    #[error("Invalid service account private key: {0}")]
    InvalidPrivateKey(String),
}

/// Contents of `AFTERPARTY_CONFIG`.
#[derive(Debug, Clone, Deserialize)]
pub struct GuestListConfig {
    pub payment_links: PaymentLinkCatalog,
    pub spreadsheet_id: String,
}

impl GuestListConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GuestListConfig = serde_json::from_str(json)?;
        if let Some(id) = config.payment_links.find_duplicate_id() {
            return Err(ConfigError::DuplicatePaymentLink(id.to_string()));
        }
        Ok(config)
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Stripe webhook signing secret (whsec_xxx)
    pub webhook_secret: String,
    /// Stripe secret API key
    pub stripe_api_key: String,
    pub guest_list: GuestListConfig,
    pub sheet_name: String,
    /// Clear the target range before each write so a shrinking list
    /// leaves no stale rows behind.
    pub clear_stale_rows: bool,
    /// Path to the Google service-account key file
    pub google_credentials_path: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| {
            lookup(key)
                .filter(|v| !v.is_empty())
                .ok_or(ConfigError::Missing(key))
        };

        let webhook_secret = required("AFTERPARTY_WEBHOOK_SECRET")?;
        let guest_list = GuestListConfig::from_json(&required("AFTERPARTY_CONFIG")?)?;
        let stripe_api_key = required("AFTERPARTY_STRIPE_API_KEY")?;
        let google_credentials_path = required("GOOGLE_APPLICATION_CREDENTIALS")?;

        let host = lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string());
        let port = match lookup("PORT") {
            Some(p) => p.parse().map_err(|_| ConfigError::InvalidPort(p))?,
            None => 8000,
        };

        let sheet_name = lookup("AFTERPARTY_SHEET_NAME")
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_SHEET_NAME.to_string());

        let clear_stale_rows = lookup("AFTERPARTY_CLEAR_STALE_ROWS")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        Ok(Self {
            host,
            port,
            webhook_secret,
            stripe_api_key,
            guest_list,
            sheet_name,
            clear_stale_rows,
            google_credentials_path,
        })
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
