//! Values exchanged with the insurance contract.

use alloy::primitives::{Address, TxHash};
use serde::{Deserialize, Serialize};

/// Result of a `registerAirline` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    /// The call was accepted (airline registered or vote recorded).
    pub accepted: bool,
    /// Contract-wide registration vote counter after this call.
    pub votes: u64,
}

/// Acknowledgement of a mined state-changing call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxReceipt {
    pub tx_hash: TxHash,
    pub block_number: Option<u64>,
}

/// Payload of a flight status request sent to the oracles.
///
/// `index` is the oracle index chosen by the contract, when the request
/// event could be read back from the receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OracleRequest {
    pub index: Option<u8>,
    pub airline: Address,
    pub flight: String,
    pub timestamp: u64,
}

/// Flight status codes reported by the oracles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum FlightStatus {
    Unknown = 0,
    OnTime = 10,
    LateAirline = 20,
    LateWeather = 30,
    LateTechnical = 40,
    LateOther = 50,
}

impl FlightStatus {
    /// Status code as stored by the contract.
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Only delays caused by the airline trigger an insurance payout.
    pub fn pays_out(self) -> bool {
        self == Self::LateAirline
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(FlightStatus::Unknown.code(), 0);
        assert_eq!(FlightStatus::OnTime.code(), 10);
        assert_eq!(FlightStatus::LateAirline.code(), 20);
        assert_eq!(FlightStatus::LateOther.code(), 50);
    }

    #[test]
    fn test_only_airline_delay_pays_out() {
        assert!(FlightStatus::LateAirline.pays_out());
        assert!(!FlightStatus::LateWeather.pays_out());
        assert!(!FlightStatus::OnTime.pays_out());
    }
}
