use anyhow::{Context, Result};

/// Public Gemini REST endpoint. Overridable so a local stub can stand in for it.
pub const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub google_api_key: String,
    pub gemini_api_base: String,
    /// HS256 secret the identity provider signs access tokens with.
    pub supabase_jwt_secret: String,
    pub generation_timeout_secs: u64,
    /// 1 means a single attempt, no retries.
    pub generation_max_attempts: u32,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let generation_max_attempts = u32::try_from(parse_positive(
            "GENERATION_MAX_ATTEMPTS",
            &optional_env("GENERATION_MAX_ATTEMPTS", "1"),
        )?)
        .context("GENERATION_MAX_ATTEMPTS is too large")?;

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            google_api_key: require_env("GOOGLE_API_KEY")?,
            gemini_api_base: optional_env("GEMINI_API_BASE", DEFAULT_GEMINI_API_BASE),
            supabase_jwt_secret: require_env("SUPABASE_JWT_SECRET")?,
            generation_timeout_secs: parse_positive(
                "GENERATION_TIMEOUT_SECS",
                &optional_env("GENERATION_TIMEOUT_SECS", "30"),
            )?,
            generation_max_attempts,
            port: optional_env("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: optional_env("RUST_LOG", "info"),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parses a count or duration that must be at least 1.
fn parse_positive(key: &str, raw: &str) -> Result<u64> {
    let value = raw
        .trim()
        .parse::<u64>()
        .with_context(|| format!("{key} must be a positive integer, got '{raw}'"))?;
    if value == 0 {
        anyhow::bail!("{key} must be at least 1");
    }
    Ok(value)
}
