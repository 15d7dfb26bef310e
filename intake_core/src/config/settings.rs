use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Admin password used when nothing else is configured. It is the value
/// existing deployments fell back to, so they keep working unchanged. Not
/// safe for production; `validate` warns when it is in effect.
pub const DEFAULT_ADMIN_PASSWORD: &str = "satvik123";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub admin: AdminConfig,
    pub cors: CorsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Static pages served for any path the API does not handle.
    pub public_dir: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
}

#[derive(Clone, Serialize, Deserialize)]
pub struct AdminConfig {
    pub password: String,
}

impl std::fmt::Debug for AdminConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminConfig")
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Empty means any origin may call the API.
    pub allowed_origins: Vec<String>,
}

/// The bare `ADMIN_PASS` and `PORT` variables existing deployments set.
/// They take precedence over every other configuration source.
#[derive(Debug, Clone, Default)]
pub struct LegacyEnv {
    pub admin_pass: Option<String>,
    pub port: Option<String>,
}

impl LegacyEnv {
    pub fn from_env() -> Self {
        Self {
            admin_pass: std::env::var("ADMIN_PASS").ok().filter(|v| !v.is_empty()),
            port: std::env::var("PORT").ok().filter(|v| !v.trim().is_empty()),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            storage: StorageConfig::default(),
            admin: AdminConfig::default(),
            cors: CorsConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            public_dir: PathBuf::from("./public"),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
        }
    }
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            password: DEFAULT_ADMIN_PASSWORD.to_string(),
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with(LegacyEnv::from_env())
    }

    pub fn load_with(legacy: LegacyEnv) -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .add_source(Config::try_from(&AppConfig::default())?);

        if std::path::Path::new("config.toml").exists() {
            builder = builder.add_source(File::with_name("config"));
        }

        builder = builder.add_source(
            Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("cors.allowed_origins")
                .try_parsing(true),
        );

        if let Some(port) = legacy.port {
            let port: u16 = port
                .trim()
                .parse()
                .map_err(|_| ConfigError::Message(format!("Invalid PORT value: {}", port)))?;
            builder = builder.set_override("server.port", i64::from(port))?;
        }

        builder = builder.set_override_option("admin.password", legacy.admin_pass)?;

        let config = builder.build()?;
        let app_config: AppConfig = config.try_deserialize()?;

        app_config.validate()?;

        Ok(app_config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Message("Server port cannot be 0".to_string()));
        }

        if self.storage.data_dir.as_os_str().is_empty() {
            return Err(ConfigError::Message(
                "Data directory cannot be empty".to_string(),
            ));
        }

        if self.admin.password.is_empty() {
            return Err(ConfigError::Message(
                "Admin password cannot be empty".to_string(),
            ));
        }

        if self.uses_default_admin_password() {
            tracing::warn!("Using default admin password - set ADMIN_PASS in production!");
        }

        Ok(())
    }

    pub fn uses_default_admin_password(&self) -> bool {
        self.admin.password == DEFAULT_ADMIN_PASSWORD
    }

    pub fn create_directories(&self) -> Result<(), std::io::Error> {
        std::fs::create_dir_all(&self.storage.data_dir)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.storage.data_dir, PathBuf::from("./data"));
        assert_eq!(config.admin.password, DEFAULT_ADMIN_PASSWORD);
        assert!(config.cors.allowed_origins.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_admin_password_is_legacy_value() {
        let config = AppConfig::default();
        assert_eq!(config.admin.password, "satvik123");
        assert!(config.uses_default_admin_password());
        assert!(config.validate().is_ok());

        let mut config = AppConfig::default();
        config.admin.password = "rotated".to_string();
        assert!(!config.uses_default_admin_password());
    }

    #[test]
    fn test_config_validation() {
        let mut config = AppConfig::default();
        config.server.port = 0;
        assert!(config.validate().is_err());

        config = AppConfig::default();
        config.admin.password = String::new();
        assert!(config.validate().is_err());

        config = AppConfig::default();
        config.storage.data_dir = PathBuf::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_bind_address() {
        let mut config = AppConfig::default();
        config.server.host = "127.0.0.1".to_string();
        config.server.port = 8080;
        assert_eq!(config.bind_address(), "127.0.0.1:8080");
    }

    #[test]
    fn test_legacy_env_overrides() {
        let config = AppConfig::load_with(LegacyEnv {
            admin_pass: Some("hunter22".to_string()),
            port: Some("4100".to_string()),
        })
        .expect("Should load configuration");

        assert_eq!(config.admin.password, "hunter22");
        assert_eq!(config.server.port, 4100);
    }

    #[test]
    fn test_invalid_legacy_port() {
        let result = AppConfig::load_with(LegacyEnv {
            admin_pass: None,
            port: Some("eighty".to_string()),
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_debug_redacts_password() {
        let mut config = AppConfig::default();
        config.admin.password = "top-secret-value".to_string();

        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("top-secret-value"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn test_directory_creation() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut config = AppConfig::default();
        config.storage.data_dir = dir.path().join("nested").join("data");

        assert!(config.create_directories().is_ok());
        assert!(config.storage.data_dir.exists());
    }
}
