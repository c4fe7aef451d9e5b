use std::net::{IpAddr, SocketAddr};

use crate::config::EnvironmentProvider;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://pointsledger.db?mode=rwc";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum SettingsError {
    #[error("Setting '{setting_name}' has invalid value '{value}': expected {expected}")]
    InvalidValue {
        setting_name: &'static str,
        value: String,
        expected: &'static str,
    },
}

/// Non-secret settings needed to start the server
#[derive(Debug, Clone, PartialEq)]
pub struct ServerSettings {
    pub database_url: String,
    pub host: IpAddr,
    pub port: u16,
}

impl ServerSettings {
    /// Read `DATABASE_URL`, `HOST` and `PORT`, falling back to defaults
    pub fn from_env(env: &dyn EnvironmentProvider) -> Result<Self, SettingsError> {
        let database_url = env
            .get_var("DATABASE_URL")
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

        let host_value = env
            .get_var("HOST")
            .unwrap_or_else(|| DEFAULT_HOST.to_string());
        let host: IpAddr = host_value.parse().map_err(|_| SettingsError::InvalidValue {
            setting_name: "HOST",
            value: host_value.clone(),
            expected: "an IP address",
        })?;

        let port = match env.get_var("PORT") {
            Some(value) => value.parse().map_err(|_| SettingsError::InvalidValue {
                setting_name: "PORT",
                value,
                expected: "a port number between 0 and 65535",
            })?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            database_url,
            host,
            port,
        })
    }

    pub fn bind_address(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
