//! Accounts picked once at start-up for the owner, airlines and passengers.

use alloy::primitives::Address;
use serde::Serialize;

use crate::blockchain::types::{BlockchainError, BlockchainResult};

/// Number of airline accounts taken after the owner.
pub const AIRLINE_ACCOUNTS: usize = 5;

/// Number of passenger accounts taken after the airlines.
pub const PASSENGER_ACCOUNTS: usize = 5;

/// Cached account roles.
///
/// A convenience for choosing senders; the contract remains the only
/// authority on who is registered or insured.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountBook {
    pub owner: Address,
    pub airlines: Vec<Address>,
    pub passengers: Vec<Address>,
}

impl AccountBook {
    /// Split node accounts: owner first, then airlines, then passengers.
    pub fn from_accounts(accounts: &[Address]) -> BlockchainResult<Self> {
        let needed = 1 + AIRLINE_ACCOUNTS + PASSENGER_ACCOUNTS;
        if accounts.len() < needed {
            return Err(BlockchainError::NotAvailable(format!(
                "need {} accounts to bootstrap, node offers {}",
                needed,
                accounts.len()
            )));
        }

        let airlines_end = 1 + AIRLINE_ACCOUNTS;
        Ok(Self {
            owner: accounts[0],
            airlines: accounts[1..airlines_end].to_vec(),
            passengers: accounts[airlines_end..needed].to_vec(),
        })
    }
}
