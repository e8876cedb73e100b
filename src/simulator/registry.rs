//! Airline registration, voting and funding.
//!
//! While at most [`AUTO_REGISTRATION_LIMIT`] airlines are registered a
//! funded airline registers a candidate outright. Past that point each call
//! is one vote, and the candidate joins once its distinct voters make up a
//! strict majority of the registered airlines.

use alloy::primitives::{Address, U256};

use crate::contract::types::{Registration, TxReceipt};
use crate::simulator::ledger::{
    Airline, Ledger, Revert, AIRLINE_FUNDING_MIN, AUTO_REGISTRATION_LIMIT,
};

impl Ledger {
    pub fn is_airline(&self, airline: Address) -> bool {
        self.airlines.contains_key(&airline)
    }

    pub fn is_registered_airline(&self, airline: Address) -> bool {
        self.airlines.get(&airline).is_some_and(|a| a.registered)
    }

    pub fn register_airline(
        &mut self,
        caller: Address,
        candidate: Address,
        name: &str,
    ) -> Result<Registration, Revert> {
        self.ensure_operational()?;
        self.ensure_funded_airline(caller)?;
        if self.is_registered_airline(candidate) {
            return Err(Revert::AlreadyRegistered);
        }

        if self.registered_count <= AUTO_REGISTRATION_LIMIT {
            let airline = self.airlines.entry(candidate).or_default();
            airline.name = name.to_string();
            airline.registered = true;
            airline.voters.insert(caller);
            self.registered_count += 1;
            self.registration_votes += 1;

            tracing::debug!(%candidate, registered = self.registered_count, "Airline registered");
            return Ok(Registration {
                accepted: true,
                votes: self.registration_votes,
            });
        }

        let already_voted = self
            .airlines
            .get(&candidate)
            .is_some_and(|a| a.voters.contains(&caller));
        if already_voted {
            return Err(Revert::DuplicateVote);
        }

        let registered_count = self.registered_count;
        let airline = self
            .airlines
            .entry(candidate)
            .or_insert_with(|| Airline {
                name: name.to_string(),
                ..Airline::default()
            });
        airline.voters.insert(caller);
        let votes = airline.vote_count();
        if votes * 2 > registered_count {
            airline.registered = true;
            self.registered_count += 1;
            tracing::debug!(%candidate, votes, "Airline registered by vote");
        } else {
            tracing::debug!(%candidate, votes, needed = registered_count / 2 + 1, "Vote recorded");
        }
        self.registration_votes += 1;

        Ok(Registration {
            accepted: true,
            votes: self.registration_votes,
        })
    }

    /// Stake `value` for a registered airline.
    pub fn fund(&mut self, caller: Address, value: U256) -> Result<TxReceipt, Revert> {
        self.ensure_operational()?;
        self.ensure_registered_airline(caller)?;
        if value < AIRLINE_FUNDING_MIN {
            return Err(Revert::InsufficientFunding);
        }
        self.ensure_balance(caller, value)?;

        self.collect(caller, value);
        if let Some(airline) = self.airlines.get_mut(&caller) {
            airline.funds += value;
        }
        Ok(self.next_receipt())
    }

    pub fn get_funds(&self, airline: Address) -> U256 {
        self.airlines
            .get(&airline)
            .map(|a| a.funds)
            .unwrap_or_default()
    }

    /// Distinct airlines that voted for `airline`.
    pub fn vote_count(&self, airline: Address) -> usize {
        self.airlines.get(&airline).map_or(0, Airline::vote_count)
    }
}
