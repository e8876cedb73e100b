//! Flight insurance dapp client.
//!
//! Typed access to the FlightSuretyApp contract (airline registration and
//! voting, funding, flights, insurance, oracle requests), plus an
//! in-process model of the contract used by tests.

pub mod blockchain;
pub mod config;
pub mod contract;
pub mod observability;
pub mod simulator;

pub use config::schema::SuretyConfig;
pub use contract::{FlightSuretyApi, SuretyClient};
pub use simulator::SimulatedContract;
