use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

const DEFAULT_CONFIG_FILES: &[&str] = &[
    "astroconsult.toml",
    "config/astroconsult.toml",
    "crates/config/astroconsult.toml",
    "../astroconsult.toml",
    "../config/astroconsult.toml",
    "../crates/config/astroconsult.toml",
];

/// Environment variable naming an explicit configuration file.
pub const CONFIG_PATH_ENV: &str = "ASTROCONSULT_CONFIG";

/// Prefix for `ASTROCONSULT__SECTION__KEY` style overrides.
pub const ENV_PREFIX: &str = "ASTROCONSULT";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub http: HttpConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    #[serde(default)]
    pub chat: ChatConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    pub address: String,
    pub port: u16,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            address: "127.0.0.1".to_string(),
            port: 7070,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://astroconsult.db".to_string(),
            max_connections: 10,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    #[serde(default = "AuthConfig::default_session_ttl")]
    pub session_ttl_seconds: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_ttl_seconds: Self::default_session_ttl(),
        }
    }
}

impl AuthConfig {
    fn default_session_ttl() -> u64 {
        86_400
    }
}

/// Limits applied to the consultation chat.
///
/// ```
/// use astroconsult_config::ChatConfig;
///
/// let chat = ChatConfig::default();
/// assert_eq!(chat.max_message_length, 4_000);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    #[serde(default = "ChatConfig::default_max_message_length")]
    pub max_message_length: usize,
}

impl ChatConfig {
    const fn default_max_message_length() -> usize {
        4_000
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            max_message_length: Self::default_max_message_length(),
        }
    }
}

/// Load the application configuration by combining defaults, files, and environment overrides.
///
/// ```
/// use astroconsult_config::load;
///
/// std::env::remove_var("ASTROCONSULT_CONFIG");
///
/// let config = load().expect("configuration should load with defaults");
/// assert!(!config.http.address.is_empty());
/// ```
pub fn load() -> anyhow::Result<AppConfig> {
    let defaults = AppConfig::default();

    let session_ttl = i64::try_from(defaults.auth.session_ttl_seconds).unwrap_or(i64::MAX);
    let max_message_length =
        i64::try_from(defaults.chat.max_message_length).unwrap_or(i64::MAX);

    let mut builder = config::Config::builder()
        .set_default("http.address", defaults.http.address.clone())?
        .set_default("http.port", i64::from(defaults.http.port))?
        .set_default("database.url", defaults.database.url.clone())?
        .set_default(
            "database.max_connections",
            i64::from(defaults.database.max_connections),
        )?
        .set_default("auth.session_ttl_seconds", session_ttl)?
        .set_default("chat.max_message_length", max_message_length)?;

    let mut config_file_attached = false;

    if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
        builder = builder.add_source(config::File::from(PathBuf::from(&path)));
        config_file_attached = true;
        debug!(path, "loading configuration via {CONFIG_PATH_ENV}");
    } else if let Ok(cwd) = std::env::current_dir() {
        let fallback = DEFAULT_CONFIG_FILES
            .iter()
            .map(|candidate| cwd.join(candidate))
            .find(|path| path.exists());

        if let Some(path) = fallback {
            debug!(path = %path.display(), "loading configuration file");
            builder = builder.add_source(config::File::from(path));
            config_file_attached = true;
        }
    }

    if !config_file_attached {
        debug!("no configuration file found, relying on defaults and environment overrides");
    }

    builder = builder.add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"));

    let cfg = builder.build().context("unable to build configuration")?;

    let mut config = cfg
        .try_deserialize::<AppConfig>()
        .context("invalid configuration")?;

    if config.auth.session_ttl_seconds > i64::MAX as u64 {
        config.auth.session_ttl_seconds = i64::MAX as u64;
    }

    if config.chat.max_message_length == 0 {
        anyhow::bail!("invalid configuration: chat.max_message_length must be positive");
    }

    debug!(?config, "loaded backend configuration");
    Ok(config)
}
