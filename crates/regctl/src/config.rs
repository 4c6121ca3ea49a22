use anyhow::Result;
use application::Endpoints;
use config::{Config, ConfigError, Environment, File};
use infrastructure::{DatabaseConfig, HttpClient};
use serde::Deserialize;
use std::time::Duration;

use crate::cli::{DbConnectionArgs, GlobalArgs};

/// Where regctl finds regsvc.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct CliConfig {
    pub address: String,
    pub port: String,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl CliConfig {
    /// Defaults, then the config file, then `REGCTL_*` environment, then flags.
    pub fn load(global: &GlobalArgs) -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .set_default("address", "http://localhost")?
            .set_default("port", ":8080")?;

        if let Some(path) = &global.config {
            builder = builder.add_source(File::from(path.as_path()));
        }
        // e.g. REGCTL_ADDRESS=http://10.0.0.5
        builder = builder.add_source(Environment::with_prefix("REGCTL"));

        if let Some(address) = &global.address {
            builder = builder.set_override("address", address.as_str())?;
        }
        if let Some(port) = &global.port {
            builder = builder.set_override("port", port.as_str())?;
        }
        if let Some(timeout) = global.timeout {
            builder = builder.set_override("timeout_secs", timeout)?;
        }

        builder.build()?.try_deserialize()
    }

    /// Base URL of the instance, `address` followed by `port`.
    pub fn instance(&self) -> String {
        let address = self.address.trim_end_matches('/');
        match self.port.as_str() {
            "" => address.to_string(),
            port if port.starts_with(':') => format!("{}{}", address, port),
            port => format!("{}:{}", address, port),
        }
    }

    pub fn endpoints(&self) -> Result<Endpoints> {
        let timeout = self.timeout_secs.map(Duration::from_secs);
        Ok(HttpClient::new(&self.instance(), timeout)?.endpoints())
    }
}

impl From<&DbConnectionArgs> for DatabaseConfig {
    fn from(args: &DbConnectionArgs) -> Self {
        DatabaseConfig {
            host: args.hostname.clone(),
            port: args.dbport,
            user: args.dbuser.clone(),
            password: args.dbpass.clone(),
            dbname: args.dbname.clone(),
            sslmode: args.sslmode.clone(),
            max_connections: 1,
            url: None,
        }
    }
}
