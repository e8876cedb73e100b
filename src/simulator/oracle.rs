//! Flight status requests and their resolution.
//!
//! `fetch_flight_status` opens a request under a random oracle index.
//! Oracle consensus is outside this model; `report_flight_status` plays
//! its part by closing the request with a final status.

use alloy::primitives::Address;

use crate::contract::types::{FlightStatus, OracleRequest};
use crate::simulator::ledger::{flight_key, Ledger, Revert};

/// Oracle indexes are drawn from `0..ORACLE_INDEXES`.
pub const ORACLE_INDEXES: u8 = 10;

impl Ledger {
    pub fn fetch_flight_status(
        &mut self,
        airline: Address,
        flight: &str,
        timestamp: u64,
    ) -> Result<OracleRequest, Revert> {
        self.ensure_operational()?;
        let index = fastrand::u8(0..ORACLE_INDEXES);
        self.oracle_requests
            .insert(flight_key(airline, flight, timestamp), index);

        tracing::debug!(index, %airline, flight, timestamp, "Oracle request opened");
        Ok(OracleRequest {
            index: Some(index),
            airline,
            flight: flight.to_string(),
            timestamp,
        })
    }

    /// Close the open request for `(airline, flight, timestamp)` and apply
    /// `status` to the flight registered under that identity. A flight keeps
    /// the first status it is resolved with.
    pub fn report_flight_status(
        &mut self,
        airline: Address,
        flight: &str,
        timestamp: u64,
        status: FlightStatus,
    ) -> Result<(), Revert> {
        self.ensure_operational()?;
        let key = flight_key(airline, flight, timestamp);
        self.oracle_requests
            .remove(&key)
            .ok_or(Revert::NoOpenRequest)?;

        match self.flights.iter_mut().find(|f| f.key == key) {
            Some(registered) if registered.status == FlightStatus::Unknown => {
                registered.status = status;
                tracing::info!(
                    flight,
                    departure = registered.timestamp,
                    status = status.code(),
                    "Flight status resolved"
                );
            }
            Some(registered) => tracing::debug!(
                flight,
                status = registered.status.code(),
                reported = status.code(),
                "Flight already resolved, report ignored"
            ),
            None => tracing::debug!(flight, timestamp, "Status reported for an unregistered flight"),
        }
        Ok(())
    }
}
