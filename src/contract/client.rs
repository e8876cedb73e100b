//! Client facade over the FlightSuretyApp contract.
//!
//! Translates user actions into contract calls, converts ether amounts to
//! wei and back, and logs every failure before handing it to the caller.
//! There is no retry and no state beyond the bootstrapped accounts.

use alloy::primitives::Address;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::blockchain::client::BlockchainClient;
use crate::blockchain::types::{BlockchainError, BlockchainResult};
use crate::blockchain::units::{from_wei, to_wei};
use crate::config::SuretyConfig;
use crate::contract::accounts::AccountBook;
use crate::contract::api::FlightSuretyApi;
use crate::contract::remote::RemoteContract;
use crate::contract::types::{OracleRequest, Registration, TxReceipt};

/// Stake sent by `fund_airline`, in ether.
pub const AIRLINE_FUNDING_ETHER: &str = "10";

/// Facade used by the command line and by integration tests.
#[derive(Clone)]
pub struct SuretyClient {
    contract: Arc<dyn FlightSuretyApi>,
    accounts: AccountBook,
}

impl SuretyClient {
    /// Connect to the selected network and bootstrap accounts from the node.
    pub async fn connect(config: &SuretyConfig) -> BlockchainResult<Self> {
        let network_config = config.selected_network().ok_or_else(|| {
            BlockchainError::NotAvailable(format!("unknown network '{}'", config.network))
        })?;

        let client =
            BlockchainClient::new(network_config.clone(), config.client.rpc_timeout_secs).await?;
        if !client.is_healthy().await {
            tracing::warn!(rpc_url = %network_config.url, "Node is not answering");
        }
        let contract = RemoteContract::new(client)?;
        Self::new(Arc::new(contract)).await
    }

    /// Wrap any contract implementation and bootstrap its accounts.
    pub async fn new(contract: Arc<dyn FlightSuretyApi>) -> BlockchainResult<Self> {
        let accounts = contract
            .accounts()
            .await
            .and_then(|accounts| AccountBook::from_accounts(&accounts))
            .inspect_err(|e| tracing::error!(error = %e, "Account bootstrap failed"))?;

        tracing::info!(
            owner = %accounts.owner,
            airlines = accounts.airlines.len(),
            passengers = accounts.passengers.len(),
            "Accounts bootstrapped"
        );
        Ok(Self { contract, accounts })
    }

    pub fn owner(&self) -> Address {
        self.accounts.owner
    }

    pub fn airlines(&self) -> &[Address] {
        &self.accounts.airlines
    }

    pub fn passengers(&self) -> &[Address] {
        &self.accounts.passengers
    }

    pub fn accounts(&self) -> &AccountBook {
        &self.accounts
    }

    pub async fn is_operational(&self) -> BlockchainResult<bool> {
        surface("isOperational", self.contract.is_operational().await)
    }

    /// Toggle the operational flag as the owner.
    pub async fn set_operating_status(&self, mode: bool) -> BlockchainResult<TxReceipt> {
        let result = self
            .contract
            .set_operating_status(self.accounts.owner, mode)
            .await;
        surface("setOperatingStatus", result)
    }

    /// Whether the contract knows `airline`.
    pub async fn is_airline_registered(&self, airline: Address) -> BlockchainResult<bool> {
        surface("isAirline", self.contract.is_airline(airline).await)
    }

    /// Funds staked by `airline`, in ether.
    pub async fn get_airline_funds(&self, airline: Address) -> BlockchainResult<String> {
        surface("getFunds", self.contract.get_funds(airline).await).map(from_wei)
    }

    pub async fn register_airline(
        &self,
        from: Address,
        airline: Address,
        name: &str,
    ) -> BlockchainResult<Registration> {
        let result = self.contract.register_airline(from, airline, name).await;
        let registration = surface("registerAirline", result)?;
        tracing::info!(
            %from,
            %airline,
            name,
            accepted = registration.accepted,
            votes = registration.votes,
            "Airline registration submitted"
        );
        Ok(registration)
    }

    /// Stake the airline funding amount from `airline` itself.
    pub async fn fund_airline(&self, airline: Address) -> BlockchainResult<TxReceipt> {
        let value = to_wei(AIRLINE_FUNDING_ETHER)?;
        surface("fund", self.contract.fund(airline, value).await)
    }

    pub async fn register_flight(
        &self,
        airline: Address,
        flight: &str,
        timestamp: u64,
    ) -> BlockchainResult<TxReceipt> {
        let result = self.contract.register_flight(airline, flight, timestamp).await;
        surface("registerFlight", result)
    }

    pub async fn get_flights(&self) -> BlockchainResult<Vec<String>> {
        surface("getFlights", self.contract.get_flights().await)
    }

    /// Buy insurance for `flight`; `amount` is in ether. The premium cap is
    /// enforced by the contract.
    pub async fn buy(
        &self,
        passenger: Address,
        flight: &str,
        amount: &str,
    ) -> BlockchainResult<TxReceipt> {
        let value = to_wei(amount).inspect_err(|e| tracing::error!(error = %e, "Rejected premium"))?;
        surface("buy", self.contract.buy(passenger, flight, value).await)
    }

    pub async fn pay_insurance(&self, passenger: Address, flight: &str) -> BlockchainResult<TxReceipt> {
        surface("payInsurance", self.contract.pay_insurance(passenger, flight).await)
    }

    /// Ask the oracles about `flight` on behalf of the first airline, stamped
    /// with the current time.
    pub async fn fetch_flight_status(&self, flight: &str) -> BlockchainResult<OracleRequest> {
        let airline = self.accounts.airlines[0];
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();

        let result = self
            .contract
            .fetch_flight_status(self.accounts.owner, airline, flight, timestamp)
            .await;
        surface("fetchFlightStatus", result)
    }
}

impl std::fmt::Debug for SuretyClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SuretyClient")
            .field("accounts", &self.accounts)
            .finish()
    }
}

fn surface<T>(operation: &'static str, result: BlockchainResult<T>) -> BlockchainResult<T> {
    result.inspect_err(|e| tracing::error!(operation, error = %e, "Operation failed"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulator::SimulatedContract;

    #[tokio::test]
    async fn test_bootstrap_needs_enough_accounts() {
        let contract = Arc::new(SimulatedContract::with_accounts(5).unwrap());
        let err = SuretyClient::new(contract).await.unwrap_err();
        assert!(matches!(err, BlockchainError::NotAvailable(_)));
    }

    #[tokio::test]
    async fn test_bootstrap_assigns_roles() {
        let contract = Arc::new(SimulatedContract::with_accounts(11).unwrap());
        let client = SuretyClient::new(contract).await.unwrap();
        assert_eq!(client.owner(), Address::with_last_byte(1));
        assert_eq!(client.airlines().len(), 5);
        assert_eq!(client.passengers()[4], Address::with_last_byte(11));
    }

    #[tokio::test]
    async fn test_connect_unknown_network() {
        let config = SuretyConfig {
            network: "mainnet".to_string(),
            ..SuretyConfig::default()
        };
        let err = SuretyClient::connect(&config).await.unwrap_err();
        assert!(err.to_string().contains("unknown network 'mainnet'"));
    }

    #[tokio::test]
    async fn test_connect_to_unreachable_node_fails_at_bootstrap() {
        let mut config = SuretyConfig::default();
        config.client.rpc_timeout_secs = 2;
        if let Some(network) = config.networks.get_mut("localhost") {
            network.url = "http://127.0.0.1:1".to_string();
            network.app_address = "0xf25186B5081Ff5cE73482AD761DB0eB0d25abfBF".to_string();
        }
        let err = SuretyClient::connect(&config).await.unwrap_err();
        assert!(matches!(
            err,
            BlockchainError::Rpc(_) | BlockchainError::Timeout(_)
        ));
    }

    #[tokio::test]
    async fn test_funds_reported_in_ether() {
        let contract = Arc::new(SimulatedContract::with_accounts(11).unwrap());
        let client = SuretyClient::new(contract).await.unwrap();
        client.fund_airline(client.owner()).await.unwrap();
        assert_eq!(client.get_airline_funds(client.owner()).await.unwrap(), "10");
    }
}
