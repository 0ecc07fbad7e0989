use serde::{Deserialize, Serialize};
use std::{env, fs, path::Path};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostConfig {
    pub listen_addr: String,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            listen_addr: env::var("HOST_LISTEN_ADDR")
                .unwrap_or_else(|_| "/ip4/0.0.0.0/tcp/0".to_string()),
        }
    }
}

impl HostConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let content = fs::read_to_string(path)?;
        let config: HostConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    pub fn from_env() -> Self {
        Self::default()
    }

    pub fn load() -> Self {
        // Try to load from config file first, fallback to environment variables
        match Self::from_file("config.json") {
            Ok(config) => config,
            Err(_) => Self::from_env(),
        }
    }
}
