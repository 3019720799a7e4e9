//! Configuration loading and resolution
//!
//! Every service resolves its settings with the same priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable (handled by clap `env` fallbacks)
//! 3. TOML config file
//! 4. Compiled default (fallback)

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

/// Default HTTP timeout for collaborator calls
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// The five LearnSmart services
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    Profile,
    Content,
    Planning,
    Assessment,
    Tracking,
}

impl Service {
    /// Service name as used in config files, logs and health responses
    pub fn name(self) -> &'static str {
        match self {
            Service::Profile => "profile-service",
            Service::Content => "content-service",
            Service::Planning => "planning-service",
            Service::Assessment => "assessment-service",
            Service::Tracking => "tracking-service",
        }
    }

    pub fn default_port(self) -> u16 {
        match self {
            Service::Profile => 8081,
            Service::Content => 8082,
            Service::Planning => 8083,
            Service::Assessment => 8084,
            Service::Tracking => 8085,
        }
    }

    /// Base URL used when no override is configured
    pub fn default_url(self) -> String {
        format!("http://127.0.0.1:{}", self.default_port())
    }
}

/// Command-line arguments shared by every service binary
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ServiceArgs {
    /// Port to listen on
    #[arg(short, long, env = "LEARNSMART_PORT")]
    pub port: Option<u16>,

    /// Interface to bind
    #[arg(long, env = "LEARNSMART_HOST")]
    pub host: Option<String>,

    /// SQLite database file
    #[arg(short, long, env = "LEARNSMART_DATABASE")]
    pub database: Option<PathBuf>,

    /// TOML config file
    #[arg(short, long, env = "LEARNSMART_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Logging section of the TOML file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoggingConfig {
    /// tracing-subscriber directive, e.g. "info" or "learnsmart_profile=debug"
    pub level: Option<String>,
}

/// Collaborator base URLs
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServiceUrls {
    pub profile: Option<String>,
    pub content: Option<String>,
    pub planning: Option<String>,
    pub assessment: Option<String>,
    pub tracking: Option<String>,
}

impl ServiceUrls {
    fn get(&self, service: Service) -> Option<&String> {
        match service {
            Service::Profile => self.profile.as_ref(),
            Service::Content => self.content.as_ref(),
            Service::Planning => self.planning.as_ref(),
            Service::Assessment => self.assessment.as_ref(),
            Service::Tracking => self.tracking.as_ref(),
        }
    }
}

/// Optional TOML configuration file
///
/// ```toml
/// port = 8081
/// database = "/var/lib/learnsmart/profile.db"
/// http_timeout_secs = 10
///
/// [logging]
/// level = "debug"
///
/// [services]
/// planning = "http://planning:8083"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub database: Option<PathBuf>,
    pub http_timeout_secs: Option<u64>,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub services: ServiceUrls,
}

impl TomlConfig {
    /// Parse a TOML config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Read {} failed: {}", path.display(), e)))?;
        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Parse {} failed: {}", path.display(), e)))
    }

    /// Load the explicit file if given, else the per-user default, else defaults
    ///
    /// A missing default file is normal; a missing or broken explicit file
    /// is logged and ignored so the service still starts.
    pub fn load_or_default(explicit: Option<&Path>, service: Service) -> Self {
        if let Some(path) = explicit {
            return match Self::load(path) {
                Ok(config) => {
                    info!("Loaded config file {}", path.display());
                    config
                }
                Err(e) => {
                    warn!("{} - using defaults", e);
                    Self::default()
                }
            };
        }

        match default_config_path(service) {
            Some(path) if path.exists() => match Self::load(&path) {
                Ok(config) => {
                    info!("Loaded config file {}", path.display());
                    config
                }
                Err(e) => {
                    warn!("{} - using defaults", e);
                    Self::default()
                }
            },
            _ => Self::default(),
        }
    }
}

/// Fully resolved settings for one service process
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub service: Service,
    pub host: String,
    pub port: u16,
    pub database: PathBuf,
    pub http_timeout: Duration,
    pub log_level: String,
    urls: ServiceUrls,
}

impl ServiceConfig {
    /// Merge CLI/ENV arguments over the TOML file over compiled defaults
    pub fn resolve(service: Service, args: &ServiceArgs, toml: &TomlConfig) -> Self {
        let host = args
            .host
            .clone()
            .or_else(|| toml.host.clone())
            .unwrap_or_else(|| "127.0.0.1".to_string());
        let port = args
            .port
            .or(toml.port)
            .unwrap_or_else(|| service.default_port());
        let database = args
            .database
            .clone()
            .or_else(|| toml.database.clone())
            .unwrap_or_else(|| default_database_path(service));
        let http_timeout = Duration::from_secs(
            toml.http_timeout_secs
                .unwrap_or(DEFAULT_HTTP_TIMEOUT_SECS),
        );
        let log_level = toml
            .logging
            .level
            .clone()
            .unwrap_or_else(|| "info".to_string());

        Self {
            service,
            host,
            port,
            database,
            http_timeout,
            log_level,
            urls: toml.services.clone(),
        }
    }

    /// Base URL of a collaborator: explicit CLI value, then TOML, then default
    pub fn collaborator_url(&self, collaborator: Service, cli: Option<&str>) -> String {
        cli.map(str::to_string)
            .or_else(|| self.urls.get(collaborator).cloned())
            .unwrap_or_else(|| collaborator.default_url())
            .trim_end_matches('/')
            .to_string()
    }

    /// Socket address string for the listener
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Per-user config file: ~/.config/learnsmart/<service>.toml
pub fn default_config_path(service: Service) -> Option<PathBuf> {
    dirs::config_dir().map(|d| {
        d.join("learnsmart")
            .join(format!("{}.toml", service.name()))
    })
}

/// OS-dependent default database path
pub fn default_database_path(service: Service) -> PathBuf {
    let file = format!("{}.db", service.name());
    dirs::data_local_dir()
        .map(|d| d.join("learnsmart").join(&file))
        .unwrap_or_else(|| PathBuf::from("./learnsmart_data").join(&file))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_overrides() {
        let config = ServiceConfig::resolve(
            Service::Tracking,
            &ServiceArgs::default(),
            &TomlConfig::default(),
        );

        assert_eq!(config.port, 8085);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.log_level, "info");
        assert_eq!(config.http_timeout, Duration::from_secs(30));
        assert!(config
            .database
            .to_string_lossy()
            .ends_with("tracking-service.db"));
    }

    #[test]
    fn test_cli_beats_toml() {
        let toml: TomlConfig = toml::from_str(
            r#"
            port = 9000
            database = "/tmp/from-toml.db"
            "#,
        )
        .unwrap();
        let args = ServiceArgs {
            port: Some(9100),
            ..Default::default()
        };

        let config = ServiceConfig::resolve(Service::Profile, &args, &toml);
        assert_eq!(config.port, 9100);
        assert_eq!(config.database, PathBuf::from("/tmp/from-toml.db"));
    }

    #[test]
    fn test_collaborator_url_priority() {
        let toml: TomlConfig = toml::from_str(
            r#"
            [services]
            planning = "http://planning:8083/"
            "#,
        )
        .unwrap();
        let config = ServiceConfig::resolve(Service::Profile, &ServiceArgs::default(), &toml);

        assert_eq!(
            config.collaborator_url(Service::Planning, None),
            "http://planning:8083"
        );
        assert_eq!(
            config.collaborator_url(Service::Planning, Some("http://override:1")),
            "http://override:1"
        );
        assert_eq!(
            config.collaborator_url(Service::Tracking, None),
            "http://127.0.0.1:8085"
        );
    }
}
