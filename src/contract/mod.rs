//! FlightSuretyApp contract access.
//!
//! # Data Flow
//! ```text
//! CLI / caller
//!     → client.rs (SuretyClient facade: units, account roles, error logging)
//!     → api.rs (FlightSuretyApi trait)
//!         → remote.rs (sol! bindings over JSON-RPC)
//!         → simulator (in-process contract model)
//! ```

pub mod accounts;
pub mod api;
pub mod bindings;
pub mod client;
pub mod remote;
pub mod types;

pub use accounts::AccountBook;
pub use api::FlightSuretyApi;
pub use client::SuretyClient;
pub use remote::RemoteContract;
pub use types::{FlightStatus, OracleRequest, Registration, TxReceipt};
