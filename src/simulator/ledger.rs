//! Contract state and the guards shared by every mutating call.

use alloy::primitives::{keccak256, Address, B256, U256};
use std::collections::{HashMap, HashSet};
use thiserror::Error;

use crate::contract::types::{FlightStatus, TxReceipt};

/// Minimum stake that makes an airline funded (10 ether).
pub const AIRLINE_FUNDING_MIN: U256 = U256::from_limbs([10_000_000_000_000_000_000, 0, 0, 0]);

/// Maximum premium per passenger and flight (1 ether).
pub const INSURANCE_CAP: U256 = U256::from_limbs([1_000_000_000_000_000_000, 0, 0, 0]);

/// Registrations accepted without a vote while at most this many airlines
/// are registered.
pub const AUTO_REGISTRATION_LIMIT: usize = 4;

/// Reasons a simulated call is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Revert {
    #[error("Contract is currently not operational")]
    NotOperational,
    #[error("Caller is not contract owner")]
    NotOwner,
    #[error("Caller is not a registered airline")]
    NotRegistered,
    #[error("Caller has not provided airline funding")]
    NotFunded,
    #[error("Airline is already registered")]
    AlreadyRegistered,
    #[error("Caller has already voted for this airline")]
    DuplicateVote,
    #[error("Funding is below the 10 ether minimum")]
    InsufficientFunding,
    #[error("Sender balance too low")]
    InsufficientBalance,
    #[error("Flight is already registered")]
    FlightExists,
    #[error("Flight is not registered")]
    UnknownFlight,
    #[error("Flight status is already resolved")]
    FlightResolved,
    #[error("Premium must be above zero and at most 1 ether")]
    InvalidPremium,
    #[error("No insurance bought for this flight")]
    NoInsurance,
    #[error("Insurance already paid out")]
    AlreadyPaid,
    #[error("Flight was not delayed by the airline")]
    NotDelayed,
    #[error("Contract funds cannot cover the payout")]
    InsufficientPool,
    #[error("No open oracle request for this flight")]
    NoOpenRequest,
}

/// Airline record, registered or pending.
#[derive(Debug, Clone, Default)]
pub struct Airline {
    pub name: String,
    pub registered: bool,
    pub funds: U256,
    /// Airlines that voted for this one.
    pub voters: HashSet<Address>,
}

impl Airline {
    pub fn is_funded(&self) -> bool {
        self.funds >= AIRLINE_FUNDING_MIN
    }

    pub fn vote_count(&self) -> usize {
        self.voters.len()
    }
}

/// A registered flight. `key` is its identity; codes are unique as well so
/// passengers can name a flight by code alone.
#[derive(Debug, Clone)]
pub struct Flight {
    pub key: B256,
    pub airline: Address,
    pub code: String,
    pub timestamp: u64,
    pub status: FlightStatus,
}

#[derive(Debug, Clone, Default)]
pub struct Purchase {
    pub premium: U256,
    pub paid: bool,
}

/// Identity of a flight: `keccak256(airline ‖ code ‖ timestamp)`.
pub fn flight_key(airline: Address, code: &str, timestamp: u64) -> B256 {
    let mut data = Vec::with_capacity(20 + code.len() + 32);
    data.extend_from_slice(airline.as_slice());
    data.extend_from_slice(code.as_bytes());
    data.extend_from_slice(&U256::from(timestamp).to_be_bytes::<32>());
    keccak256(&data)
}

/// All contract state. Every mutating operation checks its guards before
/// touching anything, so a rejected call leaves the ledger unchanged.
#[derive(Debug)]
pub struct Ledger {
    pub(crate) owner: Address,
    pub(crate) operational: bool,
    pub(crate) airlines: HashMap<Address, Airline>,
    pub(crate) registered_count: usize,
    /// Contract-wide counter of accepted registration calls.
    pub(crate) registration_votes: u64,
    pub(crate) flights: Vec<Flight>,
    /// Purchases keyed by passenger and flight key.
    pub(crate) purchases: HashMap<(Address, B256), Purchase>,
    pub(crate) oracle_requests: HashMap<B256, u8>,
    pub(crate) balances: HashMap<Address, U256>,
    /// Airline stakes and premiums held by the contract.
    pub(crate) pool: U256,
    tx_count: u64,
}

impl Ledger {
    /// State right after deployment: `owner` is the founding airline,
    /// registered but not yet funded.
    pub fn new(owner: Address, founder_name: &str) -> Self {
        let mut airlines = HashMap::new();
        airlines.insert(
            owner,
            Airline {
                name: founder_name.to_string(),
                registered: true,
                ..Airline::default()
            },
        );

        Self {
            owner,
            operational: true,
            airlines,
            registered_count: 1,
            registration_votes: 0,
            flights: Vec::new(),
            purchases: HashMap::new(),
            oracle_requests: HashMap::new(),
            balances: HashMap::new(),
            pool: U256::ZERO,
            tx_count: 0,
        }
    }

    pub fn ensure_operational(&self) -> Result<(), Revert> {
        if self.operational {
            Ok(())
        } else {
            Err(Revert::NotOperational)
        }
    }

    pub fn ensure_owner(&self, caller: Address) -> Result<(), Revert> {
        if caller == self.owner {
            Ok(())
        } else {
            Err(Revert::NotOwner)
        }
    }

    pub fn ensure_registered_airline(&self, caller: Address) -> Result<&Airline, Revert> {
        self.airlines
            .get(&caller)
            .filter(|airline| airline.registered)
            .ok_or(Revert::NotRegistered)
    }

    /// Governance actions need a registered airline that has staked.
    pub fn ensure_funded_airline(&self, caller: Address) -> Result<(), Revert> {
        if self.ensure_registered_airline(caller)?.is_funded() {
            Ok(())
        } else {
            Err(Revert::NotFunded)
        }
    }

    pub fn set_operating_status(&mut self, caller: Address, mode: bool) -> Result<(), Revert> {
        self.ensure_owner(caller)?;
        if self.operational != mode {
            tracing::info!(operational = mode, "Operating status changed");
        }
        self.operational = mode;
        Ok(())
    }

    pub fn balance_of(&self, account: Address) -> U256 {
        self.balances.get(&account).copied().unwrap_or_default()
    }

    pub(crate) fn ensure_balance(&self, account: Address, amount: U256) -> Result<(), Revert> {
        if self.balance_of(account) >= amount {
            Ok(())
        } else {
            Err(Revert::InsufficientBalance)
        }
    }

    /// Move `amount` from `account` into the pool. Callers check the
    /// balance first with [`Ledger::ensure_balance`].
    pub(crate) fn collect(&mut self, account: Address, amount: U256) {
        let balance = self.balances.entry(account).or_default();
        *balance -= amount;
        self.pool += amount;
    }

    /// Move `amount` from the pool to `account`.
    pub(crate) fn disburse(&mut self, account: Address, amount: U256) {
        self.pool -= amount;
        *self.balances.entry(account).or_default() += amount;
    }

    /// Fabricate the receipt of a successful state change.
    pub(crate) fn next_receipt(&mut self) -> TxReceipt {
        self.tx_count += 1;
        TxReceipt {
            tx_hash: keccak256(self.tx_count.to_be_bytes()),
            block_number: Some(self.tx_count),
        }
    }
}
