#[cfg(feature = "config")]
use core_config::{ConfigError, FromEnv, env_parse, env_required_any};

/// Database used when neither the config nor the connection string names one.
pub const DEFAULT_DATABASE: &str = "hooked_homey";

/// MongoDB connection settings
///
/// ```ignore
/// use database::mongodb::MongoConfig;
///
/// let config = MongoConfig::new("mongodb://localhost:27017").with_database("catalog");
///
/// // From environment variables (requires `config` feature)
/// let config = MongoConfig::from_env()?;
/// ```
#[derive(Clone, Debug)]
pub struct MongoConfig {
    /// Format: mongodb://[username:password@]host[:port][/database][?options]
    pub url: String,

    /// Explicit database name; falls back to the one in `url`, then [`DEFAULT_DATABASE`]
    pub database: Option<String>,

    /// Reported to the server in connection handshakes
    pub app_name: Option<String>,

    pub max_pool_size: u32,
    pub min_pool_size: u32,
    pub connect_timeout_secs: u64,
    pub server_selection_timeout_secs: u64,
}

impl MongoConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            database: None,
            app_name: None,
            max_pool_size: 20,
            min_pool_size: 0,
            connect_timeout_secs: 10,
            server_selection_timeout_secs: 10,
        }
    }

    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        self.database = Some(database.into());
        self
    }

    pub fn with_app_name(mut self, app_name: impl Into<String>) -> Self {
        self.app_name = Some(app_name.into());
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Connection string with any `user:password@` credentials masked, for logs.
    pub fn redacted_url(&self) -> String {
        let Some(scheme_end) = self.url.find("://") else {
            return self.url.clone();
        };
        let rest = &self.url[scheme_end + 3..];
        let authority_end = rest.find('/').unwrap_or(rest.len());
        match rest[..authority_end].rfind('@') {
            Some(at) => format!(
                "{}://***@{}",
                &self.url[..scheme_end],
                &rest[at + 1..]
            ),
            None => self.url.clone(),
        }
    }
}

impl Default for MongoConfig {
    fn default() -> Self {
        Self::new("mongodb://localhost:27017")
    }
}

/// Environment variables:
/// - `MONGODB_URI`, `MONGODB_URL` or `MONGO_URL` (required, first set wins)
/// - `MONGODB_DATABASE` (optional)
/// - `MONGODB_APP_NAME` (optional)
/// - `MONGODB_MAX_POOL_SIZE` (default: 20)
/// - `MONGODB_MIN_POOL_SIZE` (default: 0)
/// - `MONGODB_CONNECT_TIMEOUT_SECS` (default: 10)
/// - `MONGODB_SERVER_SELECTION_TIMEOUT_SECS` (default: 10)
#[cfg(feature = "config")]
impl FromEnv for MongoConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let url = env_required_any(&["MONGODB_URI", "MONGODB_URL", "MONGO_URL"])?;
        let defaults = Self::new(url);

        let non_blank = |key: &str| {
            std::env::var(key)
                .ok()
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        Ok(Self {
            database: non_blank("MONGODB_DATABASE"),
            app_name: non_blank("MONGODB_APP_NAME"),
            max_pool_size: env_parse("MONGODB_MAX_POOL_SIZE", defaults.max_pool_size)?,
            min_pool_size: env_parse("MONGODB_MIN_POOL_SIZE", defaults.min_pool_size)?,
            connect_timeout_secs: env_parse(
                "MONGODB_CONNECT_TIMEOUT_SECS",
                defaults.connect_timeout_secs,
            )?,
            server_selection_timeout_secs: env_parse(
                "MONGODB_SERVER_SELECTION_TIMEOUT_SECS",
                defaults.server_selection_timeout_secs,
            )?,
            ..defaults
        })
    }
}
