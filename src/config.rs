//! Application configuration management.
//!
//! All values come from environment variables. Sensitive fields are marked
//! and must never be logged; production deployments should source them from
//! a secret management system.

use envconfig::Envconfig;
use std::sync::LazyLock;

#[derive(Envconfig, Clone)]
pub struct AppConfig {
    /// Environment name to deploy the app (NON-SENSITIVE)
    /// Values: "local", "dev", "staging", "prod"
    #[envconfig(default = "local")]
    pub env: String,

    /// Database connection string (NON-SENSITIVE)
    /// Example: "sqlite:data/pet_care.db"
    pub db_host: String,

    /// Host address for web server binding (NON-SENSITIVE)
    #[envconfig(default = "0.0.0.0")]
    pub web_server_host: String,

    /// Port for web server binding (NON-SENSITIVE)
    #[envconfig(default = "8080")]
    pub web_server_port: u16,

    /// 🔒 SENSITIVE: cookie-key password (UUID format)
    /// Derives the session and identity cookie keys together with
    /// `cookie_salt`; rotate on security incidents.
    pub cookie_pass: String,

    /// 🔒 SENSITIVE: cookie-key salt (UUID format)
    pub cookie_salt: String,

    /// Push gateway endpoint accepting `{to, title, body, trigger_at}`
    /// payloads (NON-SENSITIVE)
    pub push_gateway_endpoint: String,

    /// 🔒 SENSITIVE: push gateway bearer token
    pub push_gateway_auth: String,
}

impl AppConfig {
    /// Checks if running in production environment
    pub fn is_prod(&self) -> bool {
        self.env.to_lowercase() == "prod"
    }

    /// Gets the server URL host with port for non-production environments
    pub fn url_host(&self) -> String {
        if self.is_prod() {
            return self.web_server_host.to_string();
        }

        format!(
            "{host}:{port}",
            host = self.web_server_host,
            port = self.web_server_port
        )
    }

    pub fn web_server_protocol(&self) -> String {
        if self.is_prod() {
            return "https".into();
        }
        "http".into()
    }

    /// Constructs the complete base URL for the application
    pub fn base_url(&self) -> String {
        format!("{}://{}", self.web_server_protocol(), self.url_host())
    }
}

/// Global application configuration, validated on first access.
pub static APP_CONFIG: LazyLock<AppConfig> = LazyLock::new(|| {
    AppConfig::init_from_env()
        .expect("Failed to load application configuration. Check environment variables.")
});
