//! Blockchain RPC client with timeout and error handling.
//!
//! # Responsibilities
//! - Connect to the JSON-RPC endpoint of the selected network
//! - Query chain state (chain id, block number, node accounts)
//! - Bound every request by the configured timeout

use alloy::primitives::Address;
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use std::future::IntoFuture;
use std::time::Duration;
use tokio::time::timeout;

use crate::blockchain::types::{BlockchainError, BlockchainResult, ChainId, NetworkConfig};
use crate::observability::metrics;

/// Blockchain RPC client wrapper for one network.
#[derive(Clone)]
pub struct BlockchainClient {
    provider: DynProvider,
    network: NetworkConfig,
    timeout_duration: Duration,
}

impl BlockchainClient {
    /// Create a new blockchain client.
    ///
    /// # Arguments
    /// * `network` - Endpoint and contract address of the selected network
    /// * `rpc_timeout_secs` - Upper bound for every RPC request
    ///
    /// Fails only when the endpoint URL is malformed; an unreachable node is
    /// reported by the first request instead.
    pub async fn new(network: NetworkConfig, rpc_timeout_secs: u64) -> BlockchainResult<Self> {
        let url: url::Url = network.url.parse().map_err(|e| {
            BlockchainError::Rpc(format!("Invalid RPC URL '{}': {}", network.url, e))
        })?;
        let provider = ProviderBuilder::new().connect_http(url).erased();

        let client = Self {
            provider,
            network: network.clone(),
            timeout_duration: Duration::from_secs(rpc_timeout_secs),
        };

        if network.chain_id.is_some() {
            if let Err(e) = client.verify_chain_id().await {
                tracing::warn!(
                    error = %e,
                    "Blockchain client initialized but chain verification failed"
                );
            }
        }

        tracing::info!(rpc_url = %network.url, "Blockchain client initialized");
        Ok(client)
    }

    /// Verify the connected chain ID matches the configured one, if any.
    pub async fn verify_chain_id(&self) -> BlockchainResult<()> {
        let Some(expected) = self.network.chain_id else {
            return Ok(());
        };
        let chain_id = self.get_chain_id().await?;
        if chain_id.0 != expected {
            return Err(BlockchainError::ChainMismatch {
                expected,
                actual: chain_id.0,
            });
        }
        Ok(())
    }

    /// Get the chain ID from the RPC.
    pub async fn get_chain_id(&self) -> BlockchainResult<ChainId> {
        self.request("eth_chainId", self.provider.get_chain_id())
            .await
            .map(ChainId)
    }

    /// Get the latest block number.
    pub async fn get_block_number(&self) -> BlockchainResult<u64> {
        self.request("eth_blockNumber", self.provider.get_block_number())
            .await
    }

    /// Accounts unlocked on the node, in node order.
    pub async fn get_accounts(&self) -> BlockchainResult<Vec<Address>> {
        self.request("eth_accounts", self.provider.get_accounts())
            .await
    }

    /// Check if the node is reachable.
    pub async fn is_healthy(&self) -> bool {
        let healthy = self.get_block_number().await.is_ok();
        metrics::record_node_health(healthy);
        healthy
    }

    /// Run a future under the configured timeout.
    ///
    /// Transport failures and timeouts are logged and mapped to
    /// [`BlockchainError::Rpc`] and [`BlockchainError::Timeout`].
    pub async fn request<T, E, F>(&self, method: &'static str, fut: F) -> BlockchainResult<T>
    where
        F: IntoFuture<Output = Result<T, E>>,
        E: std::fmt::Display,
    {
        match timeout(self.timeout_duration, fut).await {
            Ok(Ok(result)) => Ok(result),
            Ok(Err(e)) => {
                tracing::warn!(method, error = %e, "RPC error");
                Err(BlockchainError::Rpc(format!("{method}: {e}")))
            }
            Err(_) => {
                tracing::warn!(method, "RPC timeout");
                Err(BlockchainError::Timeout(self.timeout_duration.as_secs()))
            }
        }
    }

    /// Get the underlying provider.
    pub fn provider(&self) -> &DynProvider {
        &self.provider
    }

    /// Get the network configuration.
    pub fn network(&self) -> &NetworkConfig {
        &self.network
    }

    /// Request timeout applied to every call.
    pub fn timeout_duration(&self) -> Duration {
        self.timeout_duration
    }
}

impl std::fmt::Debug for BlockchainClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockchainClient")
            .field("rpc_url", &self.network.url)
            .field("app_address", &self.network.app_address)
            .field("timeout_secs", &self.timeout_duration.as_secs())
            .finish()
    }
}
