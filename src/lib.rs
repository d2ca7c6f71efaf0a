//! Betdesk - settlement and ledger core for a demonstration betting platform.
//!
//! Players wager on two chance games: a three-digit lottery with four bet
//! sub-types (jodi, odd/even, cross, hurf) and a coin flip. Administrators
//! reconcile manual deposit and withdrawal requests against user balances.
//! This crate owns the part with real invariants: resolving a bet against a
//! drawn outcome under per-family win rules, and keeping a single consistent
//! integer balance per account across bet settlement, deposit approval and
//! withdrawal adjudication. No double-credit, no lost update, no
//! negative-balance bet acceptance.
//!
//! HTTP routes, sessions and admin screens are external collaborators; they
//! hand this crate a validated bet or adjudication request and get back a
//! settlement result or a typed error.

use std::time::{SystemTime, UNIX_EPOCH};

pub mod adjudication;
pub mod config;
pub mod errors;
pub mod games;
pub mod ledger;
pub mod rng;
pub mod settlement;

pub use adjudication::RequestAdjudicator;
pub use config::Config;
pub use errors::{AdjudicationError, BetError, LedgerError};
pub use games::types::{BetSelection, CoinFace, DrawnOutcome, GameKind, LotteryBet, Parity};
pub use ledger::{
    Account, AccountId, BetRecord, FundsRequest, LedgerStore, RequestKind, RequestStatus,
    RoundHistoryEntry,
};
pub use rng::{EntropyRng, OutcomeRng, ScriptedRng};
pub use settlement::{SettlementCoordinator, SettlementResult};

/// Get current timestamp in milliseconds since Unix epoch
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("Time went backwards")
        .as_millis() as u64
}
