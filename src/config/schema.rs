//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from TOML files.
//! Every section has defaults so a file only needs the networks it uses.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Name of the network used when none is selected.
pub const DEFAULT_NETWORK: &str = "localhost";

/// Root configuration for the flight insurance client.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SuretyConfig {
    /// Network selected when the caller does not name one.
    pub network: String,

    /// Known networks keyed by name.
    pub networks: BTreeMap<String, NetworkConfig>,

    /// Client behaviour.
    pub client: ClientConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl Default for SuretyConfig {
    fn default() -> Self {
        let mut networks = BTreeMap::new();
        networks.insert(DEFAULT_NETWORK.to_string(), NetworkConfig::default());
        Self {
            network: DEFAULT_NETWORK.to_string(),
            networks,
            client: ClientConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

impl SuretyConfig {
    /// Look up a network by name.
    pub fn network(&self, name: &str) -> Option<&NetworkConfig> {
        self.networks.get(name)
    }

    /// The network selected by `network`.
    pub fn selected_network(&self) -> Option<&NetworkConfig> {
        self.network(&self.network)
    }
}

/// Endpoint and deployment of one network.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct NetworkConfig {
    /// JSON-RPC endpoint URL.
    pub url: String,

    /// Address of the deployed FlightSuretyApp contract.
    pub app_address: String,

    /// Expected chain ID; checked at connect time when set.
    #[serde(default)]
    pub chain_id: Option<u64>,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:8545".to_string(),
            app_address: String::new(),
            chain_id: None,
        }
    }
}

/// Client behaviour.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ClientConfig {
    /// RPC request timeout in seconds.
    pub rpc_timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            rpc_timeout_secs: 10,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}
