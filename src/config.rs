/*
 * Responsibility
 * - ホスト側の設定読み込み (PORT, APP_ENV, パラメータ prefix, leeway など)
 * - 設定値のバリデーション (不正なら起動失敗)
 * - 署名鍵 / portal URL はここでは読まない (invocation ごとに SettingsProvider から取得)
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use crate::services::gate::AUTH_COOKIE_NAME;
use crate::services::settings::DEFAULT_PARAMETER_PREFIX;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    pub fn from_env() -> Self {
        Self::parse(&std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()))
    }

    pub fn parse(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Clone, Debug)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,

    // Parameter path prefix for `{prefix}/jwt-secret` and `{prefix}/auth-url`.
    pub parameter_prefix: String,
    pub cookie_name: String,
    pub jwt_leeway_seconds: u64,

    pub request_timeout: Duration,
    pub body_limit_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let port: u16 = match std::env::var("PORT") {
            Ok(s) => s.parse().map_err(|_| ConfigError::Invalid("PORT"))?,
            Err(_) => 3000,
        };

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = AppEnv::from_env();

        let parameter_prefix = std::env::var("GATE_PARAMETER_PREFIX")
            .unwrap_or_else(|_| DEFAULT_PARAMETER_PREFIX.to_string());
        if !parameter_prefix.starts_with('/') {
            return Err(ConfigError::Invalid("GATE_PARAMETER_PREFIX"));
        }

        let cookie_name =
            std::env::var("GATE_COOKIE_NAME").unwrap_or_else(|_| AUTH_COOKIE_NAME.to_string());
        if cookie_name.trim().is_empty() {
            return Err(ConfigError::Missing("GATE_COOKIE_NAME"));
        }

        let jwt_leeway_seconds = std::env::var("JWT_LEEWAY_SECONDS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(0);

        let request_timeout = std::env::var("REQUEST_TIMEOUT_SECONDS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(5));

        let body_limit_bytes = std::env::var("BODY_LIMIT_BYTES")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(256 * 1024);

        Ok(Self {
            addr,
            app_env,
            parameter_prefix,
            cookie_name,
            jwt_leeway_seconds,
            request_timeout,
            body_limit_bytes,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            app_env: AppEnv::Development,
            parameter_prefix: DEFAULT_PARAMETER_PREFIX.to_string(),
            cookie_name: AUTH_COOKIE_NAME.to_string(),
            jwt_leeway_seconds: 0,
            request_timeout: Duration::from_secs(5),
            body_limit_bytes: 256 * 1024,
        }
    }
}
