//! Error types for the settlement and ledger subsystem.
//!
//! Every failure a caller can act on is a distinct variant: invalid input is
//! retryable with corrected input, insufficient funds is retryable once the
//! balance changes, invalid state transitions are not retryable at all.
//! Nothing in the business flow panics or swallows an error.

use crate::ledger::RequestStatus;

/// Balance mutation errors raised by the ledger store
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    #[error("account {0} not found")]
    AccountNotFound(u64),

    #[error("insufficient funds on account {account_id}: balance {balance}, required {required}")]
    InsufficientFunds {
        account_id: u64,
        balance: u64,
        required: u64,
    },
}

/// Bet placement and settlement errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BetError {
    #[error("invalid selection: {0}")]
    InvalidSelection(String),

    #[error("stake {stake} outside bounds [{min}, {max}]")]
    StakeOutOfBounds { stake: u64, min: u64, max: u64 },

    #[error("unknown lottery market {0}")]
    UnknownMarket(u32),

    #[error("account {0} not found")]
    AccountNotFound(u64),

    #[error("account {0} is deactivated")]
    AccountInactive(u64),

    #[error("insufficient funds on account {account_id}: balance {balance}, required {required}")]
    InsufficientFunds {
        account_id: u64,
        balance: u64,
        required: u64,
    },
}

impl From<LedgerError> for BetError {
    fn from(e: LedgerError) -> Self {
        match e {
            LedgerError::AccountNotFound(id) => BetError::AccountNotFound(id),
            LedgerError::InsufficientFunds {
                account_id,
                balance,
                required,
            } => BetError::InsufficientFunds {
                account_id,
                balance,
                required,
            },
        }
    }
}

/// Deposit/withdrawal adjudication errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AdjudicationError {
    #[error("funds request {0} not found")]
    RequestNotFound(u64),

    #[error("funds request {request_id} cannot move from {from} to {to}")]
    InvalidTransition {
        request_id: u64,
        from: RequestStatus,
        to: RequestStatus,
    },

    #[error("request amount must be positive, got {0}")]
    InvalidAmount(u64),

    #[error("account {0} not found")]
    AccountNotFound(u64),

    #[error("insufficient funds on account {account_id}: balance {balance}, required {required}")]
    InsufficientFunds {
        account_id: u64,
        balance: u64,
        required: u64,
    },
}

impl From<LedgerError> for AdjudicationError {
    fn from(e: LedgerError) -> Self {
        match e {
            LedgerError::AccountNotFound(id) => AdjudicationError::AccountNotFound(id),
            LedgerError::InsufficientFunds {
                account_id,
                balance,
                required,
            } => AdjudicationError::InsufficientFunds {
                account_id,
                balance,
                required,
            },
        }
    }
}

/// Configuration loading and validation errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid configuration value: {0}")]
    Invalid(String),

    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to encode configuration: {0}")]
    Encode(#[from] toml::ser::Error),
}
