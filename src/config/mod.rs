use crate::error::AppError;
use config::{Config as Cfg, File};
use serde::Deserialize;
use std::env;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub sns: SnsConfig,
}

#[derive(Debug, Clone)]
pub struct SnsConfig {
    /// ARN of the topic submissions are published to.
    pub topic_arn: String,
    /// Optional region override; falls back to the SDK's default provider chain.
    pub region: Option<String>,
    /// When false the app runs against the mock publisher.
    pub enabled: bool,
}

#[derive(Debug, Deserialize)]
struct HttpConfig {
    #[serde(default = "default_port")]
    port: u16,
}

fn default_port() -> u16 {
    8080
}

impl AppConfig {
    /// Load configuration from `configuration.*` (optional) and the environment.
    ///
    /// `SNS_TOPIC_ARN` is required; startup aborts when it is absent rather than
    /// degrading into per-request configuration errors.
    pub fn load() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let http = Cfg::builder()
            .add_source(File::with_name("configuration").required(false))
            .add_source(config::Environment::with_prefix("APP").separator("__"))
            .build()?;
        let http: HttpConfig = http.try_deserialize()?;

        Ok(AppConfig {
            port: http.port,
            sns: SnsConfig {
                topic_arn: require_env("SNS_TOPIC_ARN")?,
                region: env::var("SNS_REGION").ok(),
                enabled: env::var("SNS_ENABLED")
                    .unwrap_or_else(|_| "false".to_string())
                    .parse()
                    .unwrap_or(false),
            },
        })
    }
}

fn require_env(key: &str) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) if !val.is_empty() => Ok(val),
        _ => Err(AppError::ConfigError(anyhow::anyhow!(
            "{} is required but not set",
            key
        ))),
    }
}
