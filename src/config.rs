//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server starts.
//!
//! ```bash
//! export SUPABASE_URL="https://abcd.supabase.co"
//! export SUPABASE_ANON_KEY="eyJhbGciOi..."
//! ```
//!
//! ## Required Variables
//!
//! - `SUPABASE_URL` - Project URL (`http` or `https`)
//! - `SUPABASE_ANON_KEY` - Public (anon) API key used by the site
//!
//! ## Optional Variables
//!
//! - `SUPABASE_SERVICE_ROLE_KEY` - Service-role key, only read by the `admin` CLI
//! - `LISTEN` - Bind address (default: `0.0.0.0:3000`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//! - `BEHIND_PROXY` - Read client IPs from proxy headers (default: `false`)
//! - `REMOTE_TIMEOUT_SECONDS` - Timeout of each backend request (default: 10, 1-120)
//! - `REQUEST_TIMEOUT_SECONDS` - Timeout of each incoming request (default: 30, 1-300)
//! - `COOKIE_SECURE` - Mark cookies `Secure` (default: `true`; disable for plain
//!   HTTP development)

use anyhow::{Context, Result};
use std::env;
use std::time::Duration;
use url::Url;

use crate::infrastructure::supabase::SupabaseConfig;

/// Service configuration loaded from environment variables.
#[derive(Clone)]
pub struct Config {
    pub supabase_url: String,
    pub supabase_anon_key: String,
    pub supabase_service_role_key: Option<String>,
    pub listen_addr: String,
    pub log_level: String,
    pub log_format: String,
    /// When true, rate limiting reads client IP from X-Forwarded-For / X-Real-IP headers.
    /// Enable only when the service is behind a trusted reverse proxy.
    pub behind_proxy: bool,
    pub remote_timeout_seconds: u64,
    pub request_timeout_seconds: u64,
    pub cookie_secure: bool,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("supabase_url", &self.supabase_url)
            .field("supabase_anon_key", &mask_secret(&self.supabase_anon_key))
            .field(
                "supabase_service_role_key",
                &self.supabase_service_role_key.as_deref().map(mask_secret),
            )
            .field("listen_addr", &self.listen_addr)
            .field("log_level", &self.log_level)
            .field("log_format", &self.log_format)
            .field("behind_proxy", &self.behind_proxy)
            .field("remote_timeout_seconds", &self.remote_timeout_seconds)
            .field("request_timeout_seconds", &self.request_timeout_seconds)
            .field("cookie_secure", &self.cookie_secure)
            .finish()
    }
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is missing or a number does not parse.
    pub fn from_env() -> Result<Self> {
        let supabase_url = env::var("SUPABASE_URL").context("SUPABASE_URL must be set")?;
        let supabase_anon_key =
            env::var("SUPABASE_ANON_KEY").context("SUPABASE_ANON_KEY must be set")?;
        let supabase_service_role_key = env::var("SUPABASE_SERVICE_ROLE_KEY")
            .ok()
            .filter(|v| !v.is_empty());

        let listen_addr = env::var("LISTEN").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        let behind_proxy = env_flag("BEHIND_PROXY", false);
        let cookie_secure = env_flag("COOKIE_SECURE", true);

        let remote_timeout_seconds = env_number("REMOTE_TIMEOUT_SECONDS", 10)?;
        let request_timeout_seconds = env_number("REQUEST_TIMEOUT_SECONDS", 30)?;

        Ok(Self {
            supabase_url,
            supabase_anon_key,
            supabase_service_role_key,
            listen_addr,
            log_level,
            log_format,
            behind_proxy,
            remote_timeout_seconds,
            request_timeout_seconds,
            cookie_secure,
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `SUPABASE_URL` is not an `http(s)` URL
    /// - `SUPABASE_ANON_KEY` is empty
    /// - `log_format` is not `text` or `json`
    /// - `listen_addr` is invalid
    /// - a timeout is out of range
    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.supabase_url)
            .with_context(|| format!("SUPABASE_URL is not a valid URL: '{}'", self.supabase_url))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            anyhow::bail!(
                "SUPABASE_URL must start with 'http://' or 'https://', got '{}'",
                self.supabase_url
            );
        }

        if self.supabase_anon_key.trim().is_empty() {
            anyhow::bail!("SUPABASE_ANON_KEY must not be empty");
        }

        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        if !(1..=120).contains(&self.remote_timeout_seconds) {
            anyhow::bail!(
                "REMOTE_TIMEOUT_SECONDS must be between 1 and 120, got {}",
                self.remote_timeout_seconds
            );
        }

        if !(1..=300).contains(&self.request_timeout_seconds) {
            anyhow::bail!(
                "REQUEST_TIMEOUT_SECONDS must be between 1 and 300, got {}",
                self.request_timeout_seconds
            );
        }

        Ok(())
    }

    /// Backend settings for the site, using the anon key.
    ///
    /// # Errors
    ///
    /// Returns an error if `SUPABASE_URL` does not parse.
    pub fn supabase(&self) -> Result<SupabaseConfig> {
        self.supabase_with_key(&self.supabase_anon_key)
    }

    /// Backend settings for operator tooling, using the service-role key.
    ///
    /// # Errors
    ///
    /// Returns an error if `SUPABASE_SERVICE_ROLE_KEY` is not set.
    pub fn supabase_service_role(&self) -> Result<SupabaseConfig> {
        let key = self
            .supabase_service_role_key
            .as_deref()
            .context("SUPABASE_SERVICE_ROLE_KEY must be set for this command")?;
        self.supabase_with_key(key)
    }

    fn supabase_with_key(&self, key: &str) -> Result<SupabaseConfig> {
        Ok(SupabaseConfig {
            url: Url::parse(&self.supabase_url).context("SUPABASE_URL is not a valid URL")?,
            api_key: key.to_string(),
            timeout: Duration::from_secs(self.remote_timeout_seconds),
        })
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }

    /// Prints configuration summary (without sensitive data).
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!("  Backend: {}", self.supabase_url);
        tracing::info!("  Anon key: {}", mask_secret(&self.supabase_anon_key));
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
        tracing::info!("  Behind proxy: {}", self.behind_proxy);
        tracing::info!("  Backend timeout: {}s", self.remote_timeout_seconds);
        tracing::info!("  Request timeout: {}s", self.request_timeout_seconds);
        if !self.cookie_secure {
            tracing::warn!("  Secure cookies disabled (COOKIE_SECURE=false)");
        }
    }
}

fn env_flag(name: &str, default: bool) -> bool {
    match env::var(name) {
        Ok(v) => v.eq_ignore_ascii_case("true") || v == "1",
        Err(_) => default,
    }
}

fn env_number(name: &str, default: u64) -> Result<u64> {
    match env::var(name) {
        Ok(v) => v
            .trim()
            .parse()
            .with_context(|| format!("{name} must be a whole number, got '{v}'")),
        Err(_) => Ok(default),
    }
}

/// Masks a key for logging, keeping only its first characters.
///
/// `eyJhbGciOiJIUzI1NiIs...` → `eyJhbG***`
fn mask_secret(secret: &str) -> String {
    let visible: String = secret.chars().take(6).collect();
    if secret.chars().count() <= 6 {
        "***".to_string()
    } else {
        format!("{visible}***")
    }
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if required variables are missing or validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}
