mod bootstrap;

use crate::config::HostConfig;

/// Loopback configuration so tests never bind a public interface.
pub fn loopback_config() -> HostConfig {
    HostConfig {
        listen_addr: "/ip4/127.0.0.1/tcp/0".to_string(),
    }
}
