//! Manual deposit/withdrawal workflow.
//!
//! Requests are created pending and adjudicated by an admin exactly once:
//! pending moves to approved or rejected, both terminal. Deposit approval
//! credits the account; withdrawal creation takes the hold up front, so
//! approval changes nothing and rejection refunds the hold. Re-adjudicating
//! a terminal request is a hard error, never a silent no-op.

use crate::errors::AdjudicationError;
use crate::ledger::{AccountId, FundsRequest, LedgerStore, RequestKind, RequestStatus};
use std::sync::Arc;
use tracing::info;

/// Admin-facing workflow over the ledger's funds requests
pub struct RequestAdjudicator {
    ledger: Arc<LedgerStore>,
}

impl RequestAdjudicator {
    pub fn new(ledger: Arc<LedgerStore>) -> Self {
        Self { ledger }
    }

    /// File a deposit request. No balance change until approval.
    pub fn create_deposit(
        &self,
        account_id: AccountId,
        amount: u64,
        method: String,
        details: serde_json::Value,
    ) -> Result<FundsRequest, AdjudicationError> {
        if amount == 0 {
            return Err(AdjudicationError::InvalidAmount(amount));
        }
        self.ledger.account(account_id)?;

        let request =
            self.ledger
                .insert_request(account_id, RequestKind::Deposit, amount, method, details);
        info!(account_id, request_id = request.id, amount, "deposit request created");
        Ok(request)
    }

    /// File a withdrawal request, holding the funds immediately. If the
    /// balance cannot cover the hold, no request is created.
    pub fn create_withdrawal(
        &self,
        account_id: AccountId,
        amount: u64,
        method: String,
        details: serde_json::Value,
    ) -> Result<FundsRequest, AdjudicationError> {
        if amount == 0 {
            return Err(AdjudicationError::InvalidAmount(amount));
        }
        self.ledger.debit_for_withdrawal_hold(account_id, amount)?;

        let request = self.ledger.insert_request(
            account_id,
            RequestKind::Withdrawal,
            amount,
            method,
            details,
        );
        info!(account_id, request_id = request.id, amount, "withdrawal request created, funds held");
        Ok(request)
    }

    /// Move a pending request to approved or rejected and apply the
    /// corresponding balance effect.
    pub fn adjudicate(
        &self,
        request_id: u64,
        new_status: RequestStatus,
        admin_note: Option<String>,
    ) -> Result<FundsRequest, AdjudicationError> {
        let request = self
            .ledger
            .adjudicate_request(request_id, new_status, admin_note)?;
        info!(
            request_id,
            kind = %request.kind,
            status = %request.status,
            amount = request.amount,
            "funds request adjudicated"
        );
        Ok(request)
    }

    /// Pending requests for the admin review screen
    pub fn pending(&self) -> Vec<FundsRequest> {
        self.ledger.pending_requests()
    }
}
