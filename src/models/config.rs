use serde::Deserialize;

/// Configuration options of the storefront server.
///
/// Loaded by [`ServerConfig::load`] from `config/default.yaml`, an optional
/// `config/local.yaml` and `APP__`-prefixed environment variables, in that
/// order of precedence.
#[derive(Clone, Debug, Deserialize)]
pub struct ServerConfig {
    /// Path of the SQLite database file.
    pub database_url: String,
    pub address: String,
    pub port: u16,
    /// Lifetime of the cached public catalog; `0` disables caching.
    #[serde(default = "default_cache_ttl")]
    pub catalog_cache_ttl_secs: u64,
    pub admin: AdminConfig,
    pub operator: OperatorConfig,
    pub email: EmailConfig,
    pub storage: StorageConfig,
}

/// Shared-secret settings of the admin session gate.
#[derive(Clone, Debug, Deserialize)]
pub struct AdminConfig {
    pub password: String,
    /// Mark the session cookie `Secure`. Enable when served over HTTPS.
    #[serde(default)]
    pub secure_cookie: bool,
}

/// Seller contact details used for notifications and the post-order SMS link.
#[derive(Clone, Debug, Deserialize)]
pub struct OperatorConfig {
    pub email: String,
    #[serde(default)]
    pub phone: String,
}

/// Transactional email API settings. Without `api_key` no email is sent.
#[derive(Clone, Debug, Deserialize)]
pub struct EmailConfig {
    #[serde(default)]
    pub api_key: Option<String>,
    pub api_url: String,
    pub from: String,
}

/// Local object storage used for uploaded and fetched images.
#[derive(Clone, Debug, Deserialize)]
pub struct StorageConfig {
    pub upload_dir: String,
    /// URL prefix under which `upload_dir` is served.
    pub public_base_url: String,
}

fn default_cache_ttl() -> u64 {
    60
}

#[cfg(feature = "server")]
impl ServerConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?;

        let server_config: Self = settings.try_deserialize()?;
        if server_config.admin.password.trim().is_empty() {
            return Err(config::ConfigError::Message(
                "admin.password must be set (APP__ADMIN__PASSWORD)".to_string(),
            ));
        }
        Ok(server_config)
    }

    pub fn bind_address(&self) -> (String, u16) {
        (self.address.clone(), self.port)
    }
}
