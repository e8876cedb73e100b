//! Conversion between human-readable ether amounts and wei.

use alloy::primitives::utils::{format_ether, parse_ether};
use alloy::primitives::U256;

use crate::blockchain::types::{BlockchainError, BlockchainResult};

/// One ether in wei.
pub const ONE_ETHER: U256 = U256::from_limbs([1_000_000_000_000_000_000, 0, 0, 0]);

/// Parse a decimal ether amount ("10", "0.5") into wei.
pub fn to_wei(ether: &str) -> BlockchainResult<U256> {
    let trimmed = ether.trim();
    if trimmed.is_empty() || trimmed.starts_with('-') {
        return Err(BlockchainError::InvalidAmount(ether.to_string()));
    }
    parse_ether(trimmed).map_err(|_| BlockchainError::InvalidAmount(ether.to_string()))
}

/// Render a wei amount as ether without trailing zeros ("10", "1.5").
pub fn from_wei(wei: U256) -> String {
    let formatted = format_ether(wei);
    if !formatted.contains('.') {
        return formatted;
    }
    formatted
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

/// Whole ether amount in wei.
pub fn ether(amount: u64) -> U256 {
    U256::from(amount) * ONE_ETHER
}
