//! Bet settlement coordination.
//!
//! One bet moves through validate -> funds check -> draw -> evaluate ->
//! settle, in that order, with no step skipped. The draw is not observable
//! to the caller until the ledger has durably applied the result: if the
//! atomic apply fails (concurrent drift emptied the account between the
//! funds check and settlement), the coordinator surfaces a typed error and
//! the drawn outcome is discarded with no record and no balance change.

use crate::config::Config;
use crate::errors::BetError;
use crate::games::evaluator;
use crate::games::types::{BetSelection, DrawnOutcome, GameKind};
use crate::ledger::{AccountId, LedgerStore};
use crate::rng::OutcomeRng;
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

/// Outcome of one settled bet, returned to the caller
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SettlementResult {
    pub bet_id: u64,
    pub game: GameKind,
    pub drawn: DrawnOutcome,
    pub is_win: bool,
    pub payout_delta: i64,
    pub new_balance: u64,
}

/// Orchestrates one bet end to end against the ledger
pub struct SettlementCoordinator {
    ledger: Arc<LedgerStore>,
    rng: Arc<dyn OutcomeRng>,
    config: Config,
}

impl SettlementCoordinator {
    pub fn new(ledger: Arc<LedgerStore>, rng: Arc<dyn OutcomeRng>, config: Config) -> Self {
        Self {
            ledger,
            rng,
            config,
        }
    }

    pub fn ledger(&self) -> &Arc<LedgerStore> {
        &self.ledger
    }

    /// Place and settle one bet.
    ///
    /// Rejections before the draw (bad selection, stake bounds, unknown or
    /// inactive account, insufficient funds) leave no trace in the ledger.
    pub fn place_bet(
        &self,
        account_id: AccountId,
        selection: BetSelection,
        stake: u64,
    ) -> Result<SettlementResult, BetError> {
        // 1. Validate stake bounds and selection shape.
        let (min, max) = self.config.stakes.bounds_for(selection.game());
        if stake < min || stake > max {
            return Err(BetError::StakeOutOfBounds { stake, min, max });
        }
        evaluator::validate_selection(&selection, &self.config.markets)?;

        // 2. Account exists, is active, and can cover the stake.
        let account = self.ledger.account(account_id)?;
        if !account.is_active {
            return Err(BetError::AccountInactive(account_id));
        }
        self.ledger.reserve(account_id, stake)?;

        // 3. Draw.
        let drawn = match selection.game() {
            GameKind::CoinFlip => DrawnOutcome::CoinFlip {
                face: self.rng.draw_coin(),
            },
            GameKind::Lottery => DrawnOutcome::Lottery {
                digits: self.rng.draw_digits(),
            },
        };

        // 4. Evaluate (pure).
        let eval = evaluator::evaluate(&selection, &drawn, stake, &self.config.payouts)?;

        // 5. Apply atomically. The store re-checks funds under the account
        // lock; losing that race surfaces as insufficient funds and the draw
        // never becomes visible.
        let (record, new_balance) =
            self.ledger
                .settle_bet(account_id, &selection, drawn, stake, eval)
                .map_err(|e| {
                    warn!(account_id, stake, error = %e, "settlement apply failed after draw");
                    e
                })?;

        info!(
            account_id,
            bet_id = record.id,
            game = %record.game,
            drawn = %record.drawn,
            is_win = record.is_win,
            payout_delta = record.payout_delta,
            new_balance,
            "bet placed and settled"
        );

        Ok(SettlementResult {
            bet_id: record.id,
            game: record.game,
            drawn: record.drawn,
            is_win: record.is_win,
            payout_delta: record.payout_delta,
            new_balance,
        })
    }
}
