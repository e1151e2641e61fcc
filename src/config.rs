//! Stack configuration
//!
//! Loaded from TOML:
//!
//! ```toml
//! local_address = "10.0.0.1"
//! ignore_checksum = false
//!
//! [tun]
//! name = "tun0"
//!
//! [[routes]]
//! cidr = "10.0.0.0/24"
//! next_hop = "10.0.0.2"
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::IpError;
use crate::iface::link::LinkLayer;
use crate::iface::NetworkInterface;

#[derive(Debug, Clone, Deserialize)]
pub struct StackConfig {
    pub local_address: String,
    #[serde(default)]
    pub ignore_checksum: bool,
    #[serde(default)]
    pub tun: TunConfig,
    #[serde(default)]
    pub routes: Vec<RouteConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TunConfig {
    pub name: String,
}

impl Default for TunConfig {
    fn default() -> Self {
        TunConfig {
            name: "tun0".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RouteConfig {
    pub cidr: String,
    pub next_hop: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(#[from] IpError),
}

impl StackConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Build an interface over `link` with the local address and
    /// forwarding table applied.
    pub fn build_interface<L: LinkLayer>(
        &self,
        link: L,
    ) -> Result<NetworkInterface<L>, ConfigError> {
        let mut iface = NetworkInterface::new(link);
        iface.set_local_address(&self.local_address)?;

        let pairs: Vec<(&str, &str)> = self
            .routes
            .iter()
            .map(|route| (route.cidr.as_str(), route.next_hop.as_str()))
            .collect();
        iface.install_routes(&pairs)?;
        Ok(iface)
    }
}
