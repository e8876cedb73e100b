//! Chain-specific types and error definitions.

use thiserror::Error;

pub use crate::config::schema::NetworkConfig;

/// Chain ID type for strong typing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChainId(pub u64);

impl From<u64> for ChainId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl From<ChainId> for u64 {
    fn from(id: ChainId) -> Self {
        id.0
    }
}

/// Errors that can occur while talking to the chain or the insurance contract.
#[derive(Debug, Error)]
pub enum BlockchainError {
    /// RPC connection or request failed.
    #[error("RPC error: {0}")]
    Rpc(String),

    /// RPC request timed out.
    #[error("RPC timeout after {0} seconds")]
    Timeout(u64),

    /// A contract call was rejected. The reason comes from the contract or
    /// the transport and is not interpreted further.
    #[error("{method} failed: {reason}")]
    RemoteCall { method: &'static str, reason: String },

    /// An amount could not be converted between ether and wei.
    #[error("Invalid amount '{0}'")]
    InvalidAmount(String),

    /// Chain configuration mismatch.
    #[error("Chain ID mismatch: expected {expected}, got {actual}")]
    ChainMismatch { expected: u64, actual: u64 },

    /// Something the client needs has not been set up (network, accounts).
    #[error("Not available: {0}")]
    NotAvailable(String),
}

impl BlockchainError {
    /// Wrap any displayable failure as a failed contract call.
    pub fn remote(method: &'static str, reason: impl std::fmt::Display) -> Self {
        Self::RemoteCall {
            method,
            reason: reason.to_string(),
        }
    }
}

/// Result type for blockchain operations.
pub type BlockchainResult<T> = Result<T, BlockchainError>;
