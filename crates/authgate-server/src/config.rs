use std::collections::HashSet;
use std::net::SocketAddr;

use authgate_core::config::AuthConfig;
use authgate_core::types::{ClientRegistration, is_absolute_http_url};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Issuer, advertised scopes and optional endpoints
    #[serde(default)]
    pub auth: AuthConfig,
    /// Where validated authorization requests are sent for login and consent
    #[serde(default)]
    pub consent: ConsentConfig,
    /// Statically registered clients
    #[serde(default)]
    pub clients: Vec<ClientRegistration>,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), String> {
        // Server validations
        if self.server.port == 0 {
            return Err("server.port must be > 0".into());
        }
        if self.server.body_limit_bytes == 0 {
            return Err("server.body_limit_bytes must be > 0".into());
        }
        if self.server.host.parse::<std::net::IpAddr>().is_err() {
            return Err(format!(
                "server.host must be an IP address, got '{}'",
                self.server.host
            ));
        }
        // Logging validation
        let lvl = self.logging.level.to_ascii_lowercase();
        let valid_levels = ["trace", "debug", "info", "warn", "error", "off"];
        if !valid_levels.contains(&lvl.as_str()) {
            return Err(format!("logging.level must be one of {valid_levels:?}"));
        }
        // Auth validation
        self.auth.validate().map_err(|e| format!("auth: {e}"))?;
        // Consent page
        if !is_absolute_http_url(&self.consent.url) {
            return Err(format!(
                "consent.url must be an absolute http(s) URL, got '{}'",
                self.consent.url
            ));
        }
        // Clients
        let mut seen = HashSet::new();
        for (i, client) in self.clients.iter().enumerate() {
            client
                .validate()
                .map_err(|e| format!("clients[{i}] ({}): {e}", client.client_id))?;
            if !seen.insert(client.client_id.as_str()) {
                return Err(format!("duplicate client_id '{}'", client.client_id));
            }
        }
        Ok(())
    }

    pub fn addr(&self) -> SocketAddr {
        use std::net::{IpAddr, Ipv4Addr};
        let host: IpAddr = self
            .server
            .host
            .parse()
            .unwrap_or(IpAddr::V4(Ipv4Addr::new(0, 0, 0, 0)));
        SocketAddr::from((host, self.server.port))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_body_limit")]
    pub body_limit_bytes: usize,
}

fn default_host() -> String {
    "0.0.0.0".into()
}
fn default_port() -> u16 {
    8080
}
fn default_body_limit() -> usize {
    64 * 1024
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            body_limit_bytes: default_body_limit(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}
fn default_log_level() -> String {
    "info".into()
}
impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsentConfig {
    /// Login/consent page. Validated request parameters are appended to its query.
    #[serde(default = "default_consent_url")]
    pub url: String,
}
fn default_consent_url() -> String {
    "http://localhost:8080/consent".into()
}
impl Default for ConsentConfig {
    fn default() -> Self {
        Self {
            url: default_consent_url(),
        }
    }
}

pub mod loader {
    use super::AppConfig;
    use config::{Config, Environment, File};
    use std::path::PathBuf;

    /// Default configuration file looked up in the working directory.
    pub const DEFAULT_CONFIG_FILE: &str = "authgate.toml";

    pub fn load_config(path: Option<&str>) -> Result<AppConfig, String> {
        let mut builder = Config::builder();
        // A missing file is not an error: defaults plus environment still apply
        let file = PathBuf::from(path.unwrap_or(DEFAULT_CONFIG_FILE));
        if file.exists() {
            builder = builder.add_source(File::from(file));
        }
        // Environment variable overrides, e.g., AUTHGATE__SERVER__PORT=9090
        builder = builder.add_source(
            Environment::with_prefix("AUTHGATE")
                .try_parsing(true)
                .separator("__"),
        );
        let cfg = builder
            .build()
            .map_err(|e| format!("config build error: {e}"))?;
        let merged: AppConfig = cfg
            .try_deserialize()
            .map_err(|e| format!("config deserialize error: {e}"))?;
        merged.validate()?;
        Ok(merged)
    }
}
