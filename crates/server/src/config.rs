use shared_types::{AppConfig, AppError, FeatureFlags};
use std::sync::OnceLock;

static FLAGS: OnceLock<FeatureFlags> = OnceLock::new();

/// Path to the config file, relative to the working directory.
const CONFIG_PATH: &str = "config.toml";

/// Read `config.toml`, parse feature flags, and store them in the global
/// `OnceLock`. Only the first call has effect.
///
/// If the file is missing or unparseable, all flags default to `false`.
pub fn load_feature_flags() {
    FLAGS.get_or_init(|| match std::fs::read_to_string(CONFIG_PATH) {
        Ok(contents) => {
            let config: AppConfig = toml::from_str(&contents).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "failed to parse {CONFIG_PATH}, all feature flags off");
                AppConfig::default()
            });
            tracing::info!(flags = ?config.features, "feature flags loaded");
            config.features
        }
        Err(e) => {
            tracing::info!(error = %e, "{CONFIG_PATH} not found, all feature flags off");
            FeatureFlags::default()
        }
    });
}

/// Get the loaded feature flags. Returns all-false defaults if
/// `load_feature_flags()` hasn't been called yet.
pub fn feature_flags() -> &'static FeatureFlags {
    static DEFAULT: FeatureFlags = FeatureFlags {
        telemetry: false,
        api_docs: false,
    };
    FLAGS.get().unwrap_or(&DEFAULT)
}

/// Process settings read from the environment (and `.env`) at startup.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub host: String,
    pub port: u16,
    pub max_body_bytes: usize,
}

impl ServerConfig {
    pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;
    pub const DEFAULT_PORT: u16 = 8080;
    pub const DEFAULT_MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

    /// Load settings from the environment. `DATABASE_URL` and
    /// `SESSION_SECRET` are required; everything else has a default.
    pub fn from_env() -> Result<Self, AppError> {
        let _ = dotenvy::dotenv();

        let database_url = required("DATABASE_URL")?;
        required("SESSION_SECRET")?;

        Ok(Self {
            database_url,
            max_connections: parsed("DATABASE_MAX_CONNECTIONS")
                .unwrap_or(Self::DEFAULT_MAX_CONNECTIONS),
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: parsed("PORT").unwrap_or(Self::DEFAULT_PORT),
            max_body_bytes: parsed("MAX_BODY_BYTES").unwrap_or(Self::DEFAULT_MAX_BODY_BYTES),
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn required(key: &str) -> Result<String, AppError> {
    std::env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| AppError::internal(format!("{key} must be set")))
}

/// Parse an optional environment variable, ignoring unparseable values.
pub fn parsed<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.trim().parse().ok())
}
