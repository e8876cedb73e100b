//! FlightSuretyApp calls over JSON-RPC.
//!
//! # Responsibilities
//! - Encode calls through the `sol!` bindings
//! - Send state-changing calls from the named account with fixed gas
//! - Wait for the receipt and report reverts
//! - Bound every call by the client timeout and record metrics

use alloy::contract::SolCallBuilder;
use alloy::primitives::{Address, U256};
use alloy::providers::DynProvider;
use alloy::rpc::types::TransactionReceipt;
use alloy::sol_types::SolCall;
use async_trait::async_trait;
use std::future::IntoFuture;
use std::time::{Duration, Instant};
use tokio::time::timeout;

use crate::blockchain::client::BlockchainClient;
use crate::blockchain::types::{BlockchainError, BlockchainResult};
use crate::contract::api::FlightSuretyApi;
use crate::contract::bindings::FlightSuretyApp::{self, FlightSuretyAppInstance};
use crate::contract::types::{OracleRequest, Registration, TxReceipt};
use crate::observability::metrics;

/// Gas limit attached to every state-changing call.
pub const GAS_LIMIT: u64 = 4_712_388;

/// Gas price attached to every state-changing call (100 gwei).
pub const GAS_PRICE_WEI: u128 = 100_000_000_000;

/// Deployed FlightSuretyApp reached through a [`BlockchainClient`].
#[derive(Clone)]
pub struct RemoteContract {
    client: BlockchainClient,
    instance: FlightSuretyAppInstance<DynProvider>,
    timeout_duration: Duration,
}

impl RemoteContract {
    /// Bind to the contract at the network's configured address.
    pub fn new(client: BlockchainClient) -> BlockchainResult<Self> {
        let app_address: Address = client.network().app_address.parse().map_err(|e| {
            BlockchainError::NotAvailable(format!(
                "invalid contract address '{}': {}",
                client.network().app_address,
                e
            ))
        })?;
        let instance = FlightSuretyApp::new(app_address, client.provider().clone());

        tracing::info!(app_address = %app_address, "Bound to FlightSuretyApp");
        Ok(Self {
            timeout_duration: client.timeout_duration(),
            client,
            instance,
        })
    }

    /// Address of the bound contract.
    pub fn address(&self) -> Address {
        *self.instance.address()
    }

    /// Run one contract call under the timeout, recording its outcome.
    async fn call<T, E, F>(&self, method: &'static str, fut: F) -> BlockchainResult<T>
    where
        F: IntoFuture<Output = Result<T, E>>,
        E: std::fmt::Display,
    {
        let started = Instant::now();
        let result = match timeout(self.timeout_duration, fut).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => Err(BlockchainError::remote(method, e)),
            Err(_) => Err(BlockchainError::Timeout(self.timeout_duration.as_secs())),
        };
        metrics::record_call(method, result.is_ok(), started.elapsed());
        if let Err(e) = &result {
            tracing::warn!(method, error = %e, "Contract call failed");
        }
        result
    }

    /// Send a state-changing call and wait for its receipt.
    async fn transact<C>(
        &self,
        method: &'static str,
        builder: &SolCallBuilder<&DynProvider, C>,
    ) -> BlockchainResult<TransactionReceipt>
    where
        C: SolCall + Send + Sync,
    {
        let builder = builder.clone().gas(GAS_LIMIT).gas_price(GAS_PRICE_WEI);
        let receipt = self
            .call(method, async {
                let pending = builder.send().await.map_err(|e| e.to_string())?;
                pending.get_receipt().await.map_err(|e| e.to_string())
            })
            .await?;

        if !receipt.status() {
            tracing::warn!(method, tx_hash = %receipt.transaction_hash, "Transaction reverted");
            return Err(BlockchainError::remote(method, "transaction reverted"));
        }
        tracing::debug!(
            method,
            tx_hash = %receipt.transaction_hash,
            block_number = ?receipt.block_number,
            "Transaction mined"
        );
        Ok(receipt)
    }
}

fn to_receipt(receipt: &TransactionReceipt) -> TxReceipt {
    TxReceipt {
        tx_hash: receipt.transaction_hash,
        block_number: receipt.block_number,
    }
}

#[async_trait]
impl FlightSuretyApi for RemoteContract {
    async fn accounts(&self) -> BlockchainResult<Vec<Address>> {
        self.client.get_accounts().await
    }

    async fn is_operational(&self) -> BlockchainResult<bool> {
        self.call("isOperational", self.instance.isOperational().call())
            .await
    }

    async fn set_operating_status(&self, from: Address, mode: bool) -> BlockchainResult<TxReceipt> {
        let builder = self.instance.setOperatingStatus(mode).from(from);
        let receipt = self.transact("setOperatingStatus", &builder).await?;
        Ok(to_receipt(&receipt))
    }

    async fn is_airline(&self, airline: Address) -> BlockchainResult<bool> {
        self.call("isAirline", self.instance.isAirline(airline).call())
            .await
    }

    async fn is_registered_airline(&self, airline: Address) -> BlockchainResult<bool> {
        self.call(
            "isRegisteredAirline",
            self.instance.isRegisteredAirline(airline).call(),
        )
        .await
    }

    async fn register_airline(
        &self,
        from: Address,
        candidate: Address,
        name: &str,
    ) -> BlockchainResult<Registration> {
        let builder = self
            .instance
            .registerAirline(candidate, name.to_string())
            .from(from);

        // The return values are only observable through a simulated call.
        let preview = self.call("registerAirline", builder.call()).await?;
        self.transact("registerAirline", &builder).await?;

        Ok(Registration {
            accepted: preview.success,
            votes: preview.votes.saturating_to(),
        })
    }

    async fn fund(&self, from: Address, value: U256) -> BlockchainResult<TxReceipt> {
        let builder = self.instance.fund().from(from).value(value);
        let receipt = self.transact("fund", &builder).await?;
        Ok(to_receipt(&receipt))
    }

    async fn get_funds(&self, airline: Address) -> BlockchainResult<U256> {
        self.call("getFunds", self.instance.getFunds(airline).call())
            .await
    }

    async fn register_flight(
        &self,
        from: Address,
        flight: &str,
        timestamp: u64,
    ) -> BlockchainResult<TxReceipt> {
        let builder = self
            .instance
            .registerFlight(flight.to_string(), U256::from(timestamp))
            .from(from);
        let receipt = self.transact("registerFlight", &builder).await?;
        Ok(to_receipt(&receipt))
    }

    async fn get_flights(&self) -> BlockchainResult<Vec<String>> {
        self.call("getFlights", self.instance.getFlights().call())
            .await
    }

    async fn fetch_flight_status(
        &self,
        from: Address,
        airline: Address,
        flight: &str,
        timestamp: u64,
    ) -> BlockchainResult<OracleRequest> {
        let builder = self
            .instance
            .fetchFlightStatus(airline, flight.to_string(), U256::from(timestamp))
            .from(from);
        let receipt = self.transact("fetchFlightStatus", &builder).await?;

        let index = receipt
            .inner
            .logs()
            .iter()
            .find_map(|log| log.log_decode::<FlightSuretyApp::OracleRequest>().ok())
            .map(|decoded| decoded.inner.data.index);
        if index.is_none() {
            tracing::debug!(flight, "No OracleRequest event in receipt");
        }

        Ok(OracleRequest {
            index,
            airline,
            flight: flight.to_string(),
            timestamp,
        })
    }

    async fn buy(&self, from: Address, flight: &str, value: U256) -> BlockchainResult<TxReceipt> {
        let builder = self.instance.buy(flight.to_string()).from(from).value(value);
        let receipt = self.transact("buy", &builder).await?;
        Ok(to_receipt(&receipt))
    }

    async fn pay_insurance(&self, from: Address, flight: &str) -> BlockchainResult<TxReceipt> {
        let builder = self.instance.payInsurance(flight.to_string()).from(from);
        let receipt = self.transact("payInsurance", &builder).await?;
        Ok(to_receipt(&receipt))
    }
}

impl std::fmt::Debug for RemoteContract {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteContract")
            .field("app_address", &self.address())
            .field("client", &self.client)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blockchain::types::NetworkConfig;

    async fn client_with_address(app_address: &str) -> BlockchainClient {
        let network = NetworkConfig {
            url: "http://127.0.0.1:1".to_string(),
            app_address: app_address.to_string(),
            chain_id: None,
        };
        BlockchainClient::new(network, 2).await.unwrap()
    }

    #[tokio::test]
    async fn test_binds_to_configured_address() {
        let client = client_with_address("0xf25186B5081Ff5cE73482AD761DB0eB0d25abfBF").await;
        let contract = RemoteContract::new(client).unwrap();
        assert_eq!(
            contract.address(),
            "0xf25186B5081Ff5cE73482AD761DB0eB0d25abfBF".parse::<Address>().unwrap()
        );
    }

    #[tokio::test]
    async fn test_rejects_invalid_address() {
        let client = client_with_address("not-an-address").await;
        assert!(matches!(
            RemoteContract::new(client),
            Err(BlockchainError::NotAvailable(_))
        ));
    }

    #[tokio::test]
    async fn test_unreachable_node_surfaces_remote_call_error() {
        let client = client_with_address("0xf25186B5081Ff5cE73482AD761DB0eB0d25abfBF").await;
        let contract = RemoteContract::new(client).unwrap();
        let err = contract.is_operational().await.unwrap_err();
        assert!(matches!(
            err,
            BlockchainError::RemoteCall { method: "isOperational", .. } | BlockchainError::Timeout(_)
        ));
    }

    #[test]
    fn test_register_airline_call_encoding() {
        let call = FlightSuretyApp::registerAirlineCall {
            airline: Address::with_last_byte(2),
            name: "SecAirLine".to_string(),
        };
        let encoded = call.abi_encode();
        assert_eq!(&encoded[..4], FlightSuretyApp::registerAirlineCall::SELECTOR.as_slice());
        let decoded = FlightSuretyApp::registerAirlineCall::abi_decode(&encoded).unwrap();
        assert_eq!(decoded.name, "SecAirLine");
    }
}
