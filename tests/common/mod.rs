//! Shared setup for the integration suites.

use std::sync::Arc;

use flight_surety::{SimulatedContract, SuretyClient};

/// Accounts the simulated node offers: owner, five airlines, five passengers
/// and one spare.
pub const ACCOUNT_COUNT: u8 = 12;

/// Deploy a fresh simulated contract and bootstrap a facade over it.
pub async fn deploy() -> (Arc<SimulatedContract>, SuretyClient) {
    let contract = Arc::new(SimulatedContract::with_accounts(ACCOUNT_COUNT).expect("deploy simulator"));
    let client = SuretyClient::new(contract.clone())
        .await
        .expect("bootstrap against simulator");
    (contract, client)
}

/// Deploy and fund the owner so it can register airlines.
#[allow(dead_code)]
pub async fn deploy_with_funded_owner() -> (Arc<SimulatedContract>, SuretyClient) {
    let (contract, client) = deploy().await;
    client
        .fund_airline(client.owner())
        .await
        .expect("owner funding");
    (contract, client)
}
