//! Flight registration, premium purchase and payout.

use alloy::primitives::{Address, B256, U256};

use crate::contract::types::{FlightStatus, TxReceipt};
use crate::simulator::ledger::{flight_key, Flight, Ledger, Purchase, Revert, INSURANCE_CAP};

/// Payout is premium × 3 / 2.
const PAYOUT_NUMERATOR: u64 = 3;
const PAYOUT_DENOMINATOR: u64 = 2;

impl Ledger {
    pub fn register_flight(
        &mut self,
        caller: Address,
        code: &str,
        timestamp: u64,
    ) -> Result<TxReceipt, Revert> {
        self.ensure_operational()?;
        self.ensure_funded_airline(caller)?;
        let key = flight_key(caller, code, timestamp);
        if self.flight_by_key(key).is_some() || self.flight(code).is_some() {
            return Err(Revert::FlightExists);
        }

        self.flights.push(Flight {
            key,
            airline: caller,
            code: code.to_string(),
            timestamp,
            status: FlightStatus::Unknown,
        });
        tracing::debug!(airline = %caller, flight = code, timestamp, "Flight registered");
        Ok(self.next_receipt())
    }

    /// Flight codes in registration order.
    pub fn flight_codes(&self) -> Vec<String> {
        self.flights.iter().map(|f| f.code.clone()).collect()
    }

    pub fn flight(&self, code: &str) -> Option<&Flight> {
        self.flights.iter().find(|f| f.code == code)
    }

    pub fn flight_by_key(&self, key: B256) -> Option<&Flight> {
        self.flights.iter().find(|f| f.key == key)
    }

    pub fn buy(&mut self, caller: Address, code: &str, value: U256) -> Result<TxReceipt, Revert> {
        self.ensure_operational()?;
        let flight = self.flight(code).ok_or(Revert::UnknownFlight)?;
        if flight.status != FlightStatus::Unknown {
            return Err(Revert::FlightResolved);
        }

        let key = (caller, flight.key);
        let already_paid = self
            .purchases
            .get(&key)
            .map(|p| p.premium)
            .unwrap_or_default();
        if value.is_zero() || already_paid + value > INSURANCE_CAP {
            return Err(Revert::InvalidPremium);
        }
        self.ensure_balance(caller, value)?;

        self.collect(caller, value);
        self.purchases.entry(key).or_insert_with(Purchase::default).premium += value;
        tracing::debug!(passenger = %caller, flight = code, premium = %value, "Insurance bought");
        Ok(self.next_receipt())
    }

    pub fn pay_insurance(&mut self, caller: Address, code: &str) -> Result<TxReceipt, Revert> {
        self.ensure_operational()?;
        let flight = self.flight(code).ok_or(Revert::UnknownFlight)?;
        let status = flight.status;
        let key = (caller, flight.key);
        let purchase = self.purchases.get(&key).ok_or(Revert::NoInsurance)?;
        if purchase.paid {
            return Err(Revert::AlreadyPaid);
        }
        if !status.pays_out() {
            return Err(Revert::NotDelayed);
        }

        let payout = purchase.premium * U256::from(PAYOUT_NUMERATOR) / U256::from(PAYOUT_DENOMINATOR);
        if self.pool < payout {
            return Err(Revert::InsufficientPool);
        }

        self.disburse(caller, payout);
        if let Some(purchase) = self.purchases.get_mut(&key) {
            purchase.paid = true;
        }
        tracing::info!(passenger = %caller, flight = code, payout = %payout, "Insurance paid out");
        Ok(self.next_receipt())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blockchain::units::{ether, ONE_ETHER};

    const FLIGHT: &str = "ND1309";

    fn ledger_with_flight() -> (Ledger, Address, Address) {
        let owner = Address::with_last_byte(1);
        let passenger = Address::with_last_byte(7);
        let mut ledger = Ledger::new(owner, "Founder Air");
        ledger.balances.insert(owner, ether(100));
        ledger.balances.insert(passenger, ether(100));
        ledger.fund(owner, ether(10)).unwrap();
        ledger.register_flight(owner, FLIGHT, 1_700_000_000).unwrap();
        (ledger, owner, passenger)
    }

    fn set_status(ledger: &mut Ledger, status: FlightStatus) {
        ledger.flights[0].status = status;
    }

    #[test]
    fn test_register_flight_rules() {
        let (mut ledger, owner, passenger) = ledger_with_flight();
        assert_eq!(ledger.flight_codes(), vec![FLIGHT.to_string()]);
        assert_eq!(
            ledger.register_flight(owner, FLIGHT, 1),
            Err(Revert::FlightExists)
        );
        assert_eq!(
            ledger.register_flight(passenger, "XX1", 1),
            Err(Revert::NotRegistered)
        );
        assert_eq!(ledger.flight(FLIGHT).unwrap().status, FlightStatus::Unknown);
    }

    #[test]
    fn test_premium_cap_is_cumulative() {
        let (mut ledger, _, passenger) = ledger_with_flight();
        let half = ONE_ETHER / U256::from(2);
        ledger.buy(passenger, FLIGHT, half).unwrap();
        ledger.buy(passenger, FLIGHT, half).unwrap();
        assert_eq!(
            ledger.buy(passenger, FLIGHT, U256::from(1)),
            Err(Revert::InvalidPremium)
        );
        assert_eq!(ledger.buy(passenger, FLIGHT, U256::ZERO), Err(Revert::InvalidPremium));
        assert_eq!(ledger.balance_of(passenger), ether(99));
    }

    #[test]
    fn test_buy_unknown_or_resolved_flight() {
        let (mut ledger, _, passenger) = ledger_with_flight();
        assert_eq!(ledger.buy(passenger, "XX1", ONE_ETHER), Err(Revert::UnknownFlight));
        set_status(&mut ledger, FlightStatus::OnTime);
        assert_eq!(ledger.buy(passenger, FLIGHT, ONE_ETHER), Err(Revert::FlightResolved));
    }

    #[test]
    fn test_payout_only_on_airline_delay() {
        let (mut ledger, _, passenger) = ledger_with_flight();
        ledger.buy(passenger, FLIGHT, ONE_ETHER).unwrap();

        assert_eq!(ledger.pay_insurance(passenger, FLIGHT), Err(Revert::NotDelayed));
        set_status(&mut ledger, FlightStatus::LateWeather);
        assert_eq!(ledger.pay_insurance(passenger, FLIGHT), Err(Revert::NotDelayed));

        set_status(&mut ledger, FlightStatus::LateAirline);
        ledger.pay_insurance(passenger, FLIGHT).unwrap();
        // 100 - 1 premium + 1.5 payout
        assert_eq!(
            ledger.balance_of(passenger),
            ether(100) + ONE_ETHER / U256::from(2)
        );
        assert_eq!(ledger.pay_insurance(passenger, FLIGHT), Err(Revert::AlreadyPaid));
    }

    #[test]
    fn test_purchase_recorded_under_flight_key() {
        let (mut ledger, owner, passenger) = ledger_with_flight();
        ledger.buy(passenger, FLIGHT, ONE_ETHER).unwrap();
        let key = flight_key(owner, FLIGHT, 1_700_000_000);
        assert_eq!(ledger.flight_by_key(key).unwrap().timestamp, 1_700_000_000);
        assert_eq!(ledger.purchases[&(passenger, key)].premium, ONE_ETHER);
    }

    #[test]
    fn test_payout_requires_purchase() {
        let (mut ledger, owner, _) = ledger_with_flight();
        set_status(&mut ledger, FlightStatus::LateAirline);
        assert_eq!(ledger.pay_insurance(owner, FLIGHT), Err(Revert::NoInsurance));
    }
}
