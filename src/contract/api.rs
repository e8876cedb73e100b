//! Typed interface of the FlightSuretyApp contract.
//!
//! Implemented by [`RemoteContract`](crate::contract::RemoteContract) for a
//! deployed contract and by [`SimulatedContract`](crate::simulator::SimulatedContract)
//! for the in-process model. Mutating calls name their sender explicitly.

use alloy::primitives::{Address, U256};
use async_trait::async_trait;

use crate::blockchain::types::BlockchainResult;
use crate::contract::types::{OracleRequest, Registration, TxReceipt};

#[async_trait]
pub trait FlightSuretyApi: Send + Sync {
    /// Accounts available for bootstrap, in node order.
    async fn accounts(&self) -> BlockchainResult<Vec<Address>>;

    async fn is_operational(&self) -> BlockchainResult<bool>;

    /// Owner only.
    async fn set_operating_status(&self, from: Address, mode: bool) -> BlockchainResult<TxReceipt>;

    /// The address has an airline record, registered or pending.
    async fn is_airline(&self, airline: Address) -> BlockchainResult<bool>;

    async fn is_registered_airline(&self, airline: Address) -> BlockchainResult<bool>;

    /// Propose `candidate`; `from` must be a registered, funded airline.
    async fn register_airline(
        &self,
        from: Address,
        candidate: Address,
        name: &str,
    ) -> BlockchainResult<Registration>;

    /// Stake `value` wei for the sending airline.
    async fn fund(&self, from: Address, value: U256) -> BlockchainResult<TxReceipt>;

    /// Funded amount of an airline, in wei.
    async fn get_funds(&self, airline: Address) -> BlockchainResult<U256>;

    async fn register_flight(
        &self,
        from: Address,
        flight: &str,
        timestamp: u64,
    ) -> BlockchainResult<TxReceipt>;

    async fn get_flights(&self) -> BlockchainResult<Vec<String>>;

    /// Ask the oracles for a flight status; resolution happens out of band.
    async fn fetch_flight_status(
        &self,
        from: Address,
        airline: Address,
        flight: &str,
        timestamp: u64,
    ) -> BlockchainResult<OracleRequest>;

    /// Insure `flight` for the sender with a premium of `value` wei.
    async fn buy(&self, from: Address, flight: &str, value: U256) -> BlockchainResult<TxReceipt>;

    /// Claim the payout for `flight`.
    async fn pay_insurance(&self, from: Address, flight: &str) -> BlockchainResult<TxReceipt>;
}
