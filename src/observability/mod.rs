//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Facade, remote contract and simulator produce:
//!     → logging.rs (structured tracing events)
//!     → metrics.rs (per-method counters and latency histograms)
//! ```

pub mod logging;
pub mod metrics;
