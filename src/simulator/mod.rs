//! In-process model of the FlightSuretyApp contract.
//!
//! Implements [`FlightSuretyApi`] over a mutex-guarded [`Ledger`], so the
//! facade and its callers can run against the contract rules without a node.
//!
//! # Modules
//! - `ledger.rs`: state, constants, owner/operational guards, balances
//! - `registry.rs`: airline registration, voting and funding
//! - `insurance.rs`: flights, premiums, payouts
//! - `oracle.rs`: status requests and reports
//!
//! Rejected calls surface as [`BlockchainError::RemoteCall`] carrying the
//! revert reason, exactly like a reverted transaction on a real node.

pub mod insurance;
pub mod ledger;
pub mod oracle;
pub mod registry;

use alloy::primitives::{Address, U256};
use async_trait::async_trait;
use std::sync::Mutex;

use crate::blockchain::types::{BlockchainError, BlockchainResult};
use crate::blockchain::units::ether;
use crate::contract::api::FlightSuretyApi;
use crate::contract::types::{FlightStatus, OracleRequest, Registration, TxReceipt};

pub use ledger::{Ledger, Revert, AIRLINE_FUNDING_MIN, AUTO_REGISTRATION_LIMIT, INSURANCE_CAP};

/// Balance every simulated account starts with, in ether.
pub const STARTING_BALANCE_ETHER: u64 = 100;

/// Simulated deployment of the insurance contract.
#[derive(Debug)]
pub struct SimulatedContract {
    accounts: Vec<Address>,
    ledger: Mutex<Ledger>,
}

impl SimulatedContract {
    /// Deploy with `accounts[0]` as owner and founding airline. Every
    /// account is credited the starting balance.
    pub fn deploy(accounts: Vec<Address>, founder_name: &str) -> BlockchainResult<Self> {
        let owner = *accounts.first().ok_or_else(|| {
            BlockchainError::NotAvailable("deployment needs an owner account".to_string())
        })?;
        let mut ledger = Ledger::new(owner, founder_name);
        for account in &accounts {
            ledger
                .balances
                .insert(*account, ether(STARTING_BALANCE_ETHER));
        }

        tracing::info!(%owner, accounts = accounts.len(), "Simulated contract deployed");
        Ok(Self {
            accounts,
            ledger: Mutex::new(ledger),
        })
    }

    /// Deploy with `count` deterministic accounts `0x…01`, `0x…02`, ….
    pub fn with_accounts(count: u8) -> BlockchainResult<Self> {
        let accounts = (1..=count).map(Address::with_last_byte).collect();
        Self::deploy(accounts, "Founder Air")
    }

    pub fn owner(&self) -> Address {
        self.accounts[0]
    }

    /// Native balance of an account.
    pub fn balance_of(&self, account: Address) -> U256 {
        self.lock().balance_of(account)
    }

    /// Distinct airlines that voted for `airline`.
    pub fn vote_count(&self, airline: Address) -> usize {
        self.lock().vote_count(airline)
    }

    pub fn flight_status(&self, flight: &str) -> Option<FlightStatus> {
        self.lock().flight(flight).map(|f| f.status)
    }

    /// Resolve an open oracle request, standing in for oracle consensus.
    pub fn report_flight_status(
        &self,
        airline: Address,
        flight: &str,
        timestamp: u64,
        status: FlightStatus,
    ) -> BlockchainResult<()> {
        self.with_ledger("reportFlightStatus", |ledger| {
            ledger.report_flight_status(airline, flight, timestamp, status)
        })
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Ledger> {
        self.ledger.lock().expect("ledger mutex poisoned")
    }

    fn with_ledger<T>(
        &self,
        method: &'static str,
        f: impl FnOnce(&mut Ledger) -> Result<T, Revert>,
    ) -> BlockchainResult<T> {
        let mut ledger = self.lock();
        f(&mut ledger).map_err(|revert| {
            tracing::debug!(method, reason = %revert, "Call reverted");
            BlockchainError::remote(method, revert)
        })
    }
}

#[async_trait]
impl FlightSuretyApi for SimulatedContract {
    async fn accounts(&self) -> BlockchainResult<Vec<Address>> {
        Ok(self.accounts.clone())
    }

    async fn is_operational(&self) -> BlockchainResult<bool> {
        Ok(self.lock().operational)
    }

    async fn set_operating_status(&self, from: Address, mode: bool) -> BlockchainResult<TxReceipt> {
        self.with_ledger("setOperatingStatus", |ledger| {
            ledger.set_operating_status(from, mode)?;
            Ok(ledger.next_receipt())
        })
    }

    async fn is_airline(&self, airline: Address) -> BlockchainResult<bool> {
        Ok(self.lock().is_airline(airline))
    }

    async fn is_registered_airline(&self, airline: Address) -> BlockchainResult<bool> {
        Ok(self.lock().is_registered_airline(airline))
    }

    async fn register_airline(
        &self,
        from: Address,
        candidate: Address,
        name: &str,
    ) -> BlockchainResult<Registration> {
        self.with_ledger("registerAirline", |ledger| {
            ledger.register_airline(from, candidate, name)
        })
    }

    async fn fund(&self, from: Address, value: U256) -> BlockchainResult<TxReceipt> {
        self.with_ledger("fund", |ledger| ledger.fund(from, value))
    }

    async fn get_funds(&self, airline: Address) -> BlockchainResult<U256> {
        Ok(self.lock().get_funds(airline))
    }

    async fn register_flight(
        &self,
        from: Address,
        flight: &str,
        timestamp: u64,
    ) -> BlockchainResult<TxReceipt> {
        self.with_ledger("registerFlight", |ledger| {
            ledger.register_flight(from, flight, timestamp)
        })
    }

    async fn get_flights(&self) -> BlockchainResult<Vec<String>> {
        Ok(self.lock().flight_codes())
    }

    async fn fetch_flight_status(
        &self,
        _from: Address,
        airline: Address,
        flight: &str,
        timestamp: u64,
    ) -> BlockchainResult<OracleRequest> {
        self.with_ledger("fetchFlightStatus", |ledger| {
            ledger.fetch_flight_status(airline, flight, timestamp)
        })
    }

    async fn buy(&self, from: Address, flight: &str, value: U256) -> BlockchainResult<TxReceipt> {
        self.with_ledger("buy", |ledger| ledger.buy(from, flight, value))
    }

    async fn pay_insurance(&self, from: Address, flight: &str) -> BlockchainResult<TxReceipt> {
        self.with_ledger("payInsurance", |ledger| ledger.pay_insurance(from, flight))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_deploy_credits_accounts() {
        let contract = SimulatedContract::with_accounts(3).unwrap();
        assert_eq!(contract.owner(), Address::with_last_byte(1));
        assert_eq!(contract.accounts().await.unwrap().len(), 3);
        assert_eq!(contract.balance_of(Address::with_last_byte(3)), ether(100));
        assert_eq!(contract.balance_of(Address::with_last_byte(9)), U256::ZERO);
    }

    #[test]
    fn test_deploy_without_accounts_fails() {
        assert!(matches!(
            SimulatedContract::with_accounts(0),
            Err(BlockchainError::NotAvailable(_))
        ));
        assert!(SimulatedContract::deploy(Vec::new(), "Founder Air").is_err());
    }

    #[tokio::test]
    async fn test_revert_reason_surfaces() {
        let contract = SimulatedContract::with_accounts(2).unwrap();
        let err = contract
            .register_airline(contract.owner(), Address::with_last_byte(2), "Second Air")
            .await
            .unwrap_err();
        match err {
            BlockchainError::RemoteCall { method, reason } => {
                assert_eq!(method, "registerAirline");
                assert_eq!(reason, Revert::NotFunded.to_string());
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
