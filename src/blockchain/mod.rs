//! Blockchain access subsystem.
//!
//! # Data Flow
//! ```text
//! Network table (config)
//!     → client.rs (RPC connection with timeouts, node accounts)
//!     → contract::remote (typed FlightSuretyApp calls)
//! units.rs converts ether strings to wei and back at the facade edge.
//! ```
//!
//! # Constraints
//! - Every RPC call has a configurable timeout
//! - Failures are surfaced once, never retried

pub mod client;
pub mod types;
pub mod units;

pub use client::BlockchainClient;
pub use types::{BlockchainError, BlockchainResult, ChainId};
