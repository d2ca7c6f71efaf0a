//! The authoritative ledger: account balances plus append-only records of
//! bets, round results and funds requests.
//!
//! Every balance mutation goes through this store and is serialized per
//! account by the map's entry guards, so concurrent settlement and
//! adjudication on one account always apply in some total order while
//! different accounts proceed in parallel. The raw maps are never exposed;
//! callers see typed entry points and cloned snapshots.

use crate::current_timestamp_ms;
use crate::errors::{AdjudicationError, LedgerError};
use crate::games::types::{BetSelection, DrawnOutcome, Evaluation, GameKind};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;
use tracing::debug;

pub type AccountId = u64;

/// A user account. Created at registration, never deleted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Account {
    pub id: AccountId,
    pub balance: u64,
    pub is_demo: bool,
    pub is_active: bool,
}

/// One settled bet. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BetRecord {
    pub id: u64,
    pub account_id: AccountId,
    pub game: GameKind,
    pub selection: BetSelection,
    pub drawn: DrawnOutcome,
    pub stake: u64,
    /// Signed balance change: negative stake on loss, net win amount on win
    pub payout_delta: i64,
    pub is_win: bool,
    pub created_at: u64,
}

/// One drawn round, independent of any account; kept for display of recent draws
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoundHistoryEntry {
    pub id: u64,
    pub game: GameKind,
    pub drawn: DrawnOutcome,
    pub market_id: Option<u32>,
    pub timestamp: u64,
}

/// Kind of manual funds request
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RequestKind {
    Deposit,
    Withdrawal,
}

impl fmt::Display for RequestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestKind::Deposit => write!(f, "deposit"),
            RequestKind::Withdrawal => write!(f, "withdrawal"),
        }
    }
}

/// Funds request state machine: pending moves to approved or rejected
/// exactly once; both are terminal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Approved,
    Rejected,
}

impl RequestStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, RequestStatus::Pending)
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestStatus::Pending => write!(f, "pending"),
            RequestStatus::Approved => write!(f, "approved"),
            RequestStatus::Rejected => write!(f, "rejected"),
        }
    }
}

/// A deposit or withdrawal awaiting admin adjudication
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FundsRequest {
    pub id: u64,
    pub account_id: AccountId,
    pub kind: RequestKind,
    pub amount: u64,
    pub method: String,
    /// Opaque payment details (UPI handle, bank fields, ...) owned by the caller
    pub details: serde_json::Value,
    pub admin_note: Option<String>,
    pub status: RequestStatus,
    pub created_at: u64,
    pub updated_at: u64,
}

/// In-memory ledger store with per-account serialization
pub struct LedgerStore {
    accounts: DashMap<AccountId, Account>,
    requests: DashMap<u64, FundsRequest>,
    bets: RwLock<Vec<BetRecord>>,
    rounds: RwLock<Vec<RoundHistoryEntry>>,
    account_seq: AtomicU64,
    request_seq: AtomicU64,
    bet_seq: AtomicU64,
    round_seq: AtomicU64,
}

impl LedgerStore {
    pub fn new() -> Self {
        Self {
            accounts: DashMap::new(),
            requests: DashMap::new(),
            bets: RwLock::new(Vec::new()),
            rounds: RwLock::new(Vec::new()),
            account_seq: AtomicU64::new(1),
            request_seq: AtomicU64::new(1),
            bet_seq: AtomicU64::new(1),
            round_seq: AtomicU64::new(1),
        }
    }

    /// Register a new account with an opening balance
    pub fn create_account(&self, initial_balance: u64, is_demo: bool) -> Account {
        let account = Account {
            id: self.account_seq.fetch_add(1, Ordering::SeqCst),
            balance: initial_balance,
            is_demo,
            is_active: true,
        };
        self.accounts.insert(account.id, account.clone());
        debug!(account_id = account.id, initial_balance, "account created");
        account
    }

    /// Snapshot of an account
    pub fn account(&self, id: AccountId) -> Result<Account, LedgerError> {
        self.accounts
            .get(&id)
            .map(|a| a.clone())
            .ok_or(LedgerError::AccountNotFound(id))
    }

    pub fn balance(&self, id: AccountId) -> Result<u64, LedgerError> {
        Ok(self.account(id)?.balance)
    }

    /// Activate or deactivate an account (deactivated accounts cannot bet)
    pub fn set_active(&self, id: AccountId, active: bool) -> Result<(), LedgerError> {
        let mut account = self
            .accounts
            .get_mut(&id)
            .ok_or(LedgerError::AccountNotFound(id))?;
        account.is_active = active;
        Ok(())
    }

    /// Non-mutating funds check: balance must cover `amount`
    pub fn reserve(&self, id: AccountId, amount: u64) -> Result<(), LedgerError> {
        let account = self
            .accounts
            .get(&id)
            .ok_or(LedgerError::AccountNotFound(id))?;
        if account.balance < amount {
            return Err(LedgerError::InsufficientFunds {
                account_id: id,
                balance: account.balance,
                required: amount,
            });
        }
        Ok(())
    }

    /// Apply one evaluated bet atomically: debit the stake on loss (the funds
    /// check is re-run under the account lock, so concurrent drift since the
    /// coordinator's check cannot drive the balance negative) or credit the
    /// net win amount, and append the bet record and round history entry in
    /// the same logical transaction.
    ///
    /// Returns the appended record and the new balance.
    pub fn settle_bet(
        &self,
        account_id: AccountId,
        selection: &BetSelection,
        drawn: DrawnOutcome,
        stake: u64,
        eval: Evaluation,
    ) -> Result<(BetRecord, u64), LedgerError> {
        let mut account = self
            .accounts
            .get_mut(&account_id)
            .ok_or(LedgerError::AccountNotFound(account_id))?;

        if eval.is_win {
            account.balance += eval.payout_delta as u64;
        } else {
            if account.balance < stake {
                return Err(LedgerError::InsufficientFunds {
                    account_id,
                    balance: account.balance,
                    required: stake,
                });
            }
            account.balance -= stake;
        }
        let new_balance = account.balance;

        let now = current_timestamp_ms();
        let record = BetRecord {
            id: self.bet_seq.fetch_add(1, Ordering::SeqCst),
            account_id,
            game: selection.game(),
            selection: selection.clone(),
            drawn,
            stake,
            payout_delta: eval.payout_delta,
            is_win: eval.is_win,
            created_at: now,
        };
        let round = RoundHistoryEntry {
            id: self.round_seq.fetch_add(1, Ordering::SeqCst),
            game: selection.game(),
            drawn,
            market_id: selection.market_id(),
            timestamp: now,
        };

        // Appended while the account guard is held: no reader can observe the
        // balance change without its record, or the record without the change.
        self.bets.write().unwrap().push(record.clone());
        self.rounds.write().unwrap().push(round);

        debug!(
            account_id,
            bet_id = record.id,
            is_win = record.is_win,
            payout_delta = record.payout_delta,
            new_balance,
            "bet settled"
        );
        Ok((record, new_balance))
    }

    /// Credit an approved deposit
    pub fn credit_deposit(&self, id: AccountId, amount: u64) -> Result<u64, LedgerError> {
        let mut account = self
            .accounts
            .get_mut(&id)
            .ok_or(LedgerError::AccountNotFound(id))?;
        account.balance += amount;
        debug!(account_id = id, amount, new_balance = account.balance, "deposit credited");
        Ok(account.balance)
    }

    /// Hold funds for a newly created withdrawal. Debits below zero are
    /// rejected, never clamped.
    pub fn debit_for_withdrawal_hold(&self, id: AccountId, amount: u64) -> Result<u64, LedgerError> {
        let mut account = self
            .accounts
            .get_mut(&id)
            .ok_or(LedgerError::AccountNotFound(id))?;
        if account.balance < amount {
            return Err(LedgerError::InsufficientFunds {
                account_id: id,
                balance: account.balance,
                required: amount,
            });
        }
        account.balance -= amount;
        debug!(account_id = id, amount, new_balance = account.balance, "withdrawal hold taken");
        Ok(account.balance)
    }

    /// Return held funds for a rejected withdrawal
    pub fn refund_withdrawal(&self, id: AccountId, amount: u64) -> Result<u64, LedgerError> {
        let mut account = self
            .accounts
            .get_mut(&id)
            .ok_or(LedgerError::AccountNotFound(id))?;
        account.balance += amount;
        debug!(account_id = id, amount, new_balance = account.balance, "withdrawal hold refunded");
        Ok(account.balance)
    }

    /// Record a new pending funds request. The caller is responsible for
    /// validating the account and, for withdrawals, taking the hold first.
    pub fn insert_request(
        &self,
        account_id: AccountId,
        kind: RequestKind,
        amount: u64,
        method: String,
        details: serde_json::Value,
    ) -> FundsRequest {
        let now = current_timestamp_ms();
        let request = FundsRequest {
            id: self.request_seq.fetch_add(1, Ordering::SeqCst),
            account_id,
            kind,
            amount,
            method,
            details,
            admin_note: None,
            status: RequestStatus::Pending,
            created_at: now,
            updated_at: now,
        };
        self.requests.insert(request.id, request.clone());
        request
    }

    /// Execute one adjudication transition. The request entry guard is held
    /// across the balance mutation so the state change and its ledger effect
    /// land together; a concurrent adjudication of the same request waits and
    /// then fails the pending check.
    pub fn adjudicate_request(
        &self,
        request_id: u64,
        new_status: RequestStatus,
        note: Option<String>,
    ) -> Result<FundsRequest, AdjudicationError> {
        let mut request = self
            .requests
            .get_mut(&request_id)
            .ok_or(AdjudicationError::RequestNotFound(request_id))?;

        if request.status.is_terminal() || !new_status.is_terminal() {
            return Err(AdjudicationError::InvalidTransition {
                request_id,
                from: request.status,
                to: new_status,
            });
        }

        match request.kind {
            RequestKind::Deposit => {
                // Approval applies the credit; rejection never touched the balance.
                if new_status == RequestStatus::Approved {
                    self.credit_deposit(request.account_id, request.amount)?;
                }
            }
            RequestKind::Withdrawal => {
                // Funds were held at creation; only rejection moves money back.
                if new_status == RequestStatus::Rejected {
                    self.refund_withdrawal(request.account_id, request.amount)?;
                }
            }
        }

        request.status = new_status;
        request.admin_note = note;
        request.updated_at = current_timestamp_ms();
        debug!(
            request_id,
            kind = %request.kind,
            status = %request.status,
            "funds request adjudicated"
        );
        Ok(request.clone())
    }

    pub fn request(&self, id: u64) -> Option<FundsRequest> {
        self.requests.get(&id).map(|r| r.clone())
    }

    /// Pending requests for the admin review screen, oldest first
    pub fn pending_requests(&self) -> Vec<FundsRequest> {
        let mut pending: Vec<FundsRequest> = self
            .requests
            .iter()
            .filter(|r| r.status == RequestStatus::Pending)
            .map(|r| r.clone())
            .collect();
        pending.sort_by_key(|r| r.id);
        pending
    }

    /// Most recent bets for one account, newest first
    pub fn recent_bets(&self, account_id: AccountId, limit: usize) -> Vec<BetRecord> {
        self.bets
            .read()
            .unwrap()
            .iter()
            .rev()
            .filter(|b| b.account_id == account_id)
            .take(limit)
            .cloned()
            .collect()
    }

    /// Most recent draws for one game (and optionally one market), newest first
    pub fn recent_rounds(
        &self,
        game: GameKind,
        market_id: Option<u32>,
        limit: usize,
    ) -> Vec<RoundHistoryEntry> {
        self.rounds
            .read()
            .unwrap()
            .iter()
            .rev()
            .filter(|r| r.game == game && (market_id.is_none() || r.market_id == market_id))
            .take(limit)
            .cloned()
            .collect()
    }
}

impl Default for LedgerStore {
    fn default() -> Self {
        Self::new()
    }
}
