//! Pure win/payout evaluation.
//!
//! Rule table (multipliers injected from configuration, basis points,
//! 10_000 = 1.0x):
//!
//! | family  | win condition                                   | payout on win |
//! |---------|-------------------------------------------------|---------------|
//! | coin    | selected face equals drawn face                 | stake x coin  |
//! | jodi    | selection equals the two-digit round number     | stake x jodi  |
//! | oddeven | parity of the round number matches              | stake x oddeven |
//! | cross   | round number is an ordered pair of the digits   | stake x cross / pair count |
//! | hurf    | matched position(s) equal drawn digit(s)        | stake x single or double |
//!
//! The round number is formed from the first two drawn digits. Payout on
//! loss is always `-stake`. The only rounding anywhere is the final
//! floor-towards-zero on the integer win amount.

use crate::config::{MarketConfig, PayoutConfig};
use crate::errors::BetError;
use crate::games::types::{BetSelection, DrawnOutcome, Evaluation, LotteryBet, Parity};

/// Check a selection's shape before any side effect.
///
/// The schema layer upstream already checks field types; this enforces the
/// domain rules a schema cannot express (digit ranges, distinctness, known
/// market).
pub fn validate_selection(
    selection: &BetSelection,
    markets: &[MarketConfig],
) -> Result<(), BetError> {
    match selection {
        BetSelection::CoinFlip { .. } => Ok(()),
        BetSelection::Lottery { market_id, bet } => {
            if !markets.iter().any(|m| m.id == *market_id) {
                return Err(BetError::UnknownMarket(*market_id));
            }
            validate_lottery_bet(bet)
        }
    }
}

fn validate_lottery_bet(bet: &LotteryBet) -> Result<(), BetError> {
    match bet {
        LotteryBet::Jodi { number } => {
            if *number > 99 {
                return Err(BetError::InvalidSelection(format!(
                    "jodi number {} out of range 0-99",
                    number
                )));
            }
            Ok(())
        }
        LotteryBet::OddEven { .. } => Ok(()),
        LotteryBet::Cross { digits } => {
            if digits.len() < 2 || digits.len() > 5 {
                return Err(BetError::InvalidSelection(format!(
                    "cross requires 2-5 digits, got {}",
                    digits.len()
                )));
            }
            if let Some(d) = digits.iter().find(|d| **d > 9) {
                return Err(BetError::InvalidSelection(format!(
                    "cross digit {} out of range 0-9",
                    d
                )));
            }
            for (i, d) in digits.iter().enumerate() {
                if digits[..i].contains(d) {
                    return Err(BetError::InvalidSelection(format!(
                        "cross digits must be distinct, {} repeats",
                        d
                    )));
                }
            }
            Ok(())
        }
        LotteryBet::Hurf { left, right } => {
            if left.is_none() && right.is_none() {
                return Err(BetError::InvalidSelection(
                    "hurf requires at least one position".to_string(),
                ));
            }
            for d in [left, right].into_iter().flatten() {
                if *d > 9 {
                    return Err(BetError::InvalidSelection(format!(
                        "hurf digit {} out of range 0-9",
                        d
                    )));
                }
            }
            Ok(())
        }
    }
}

/// Decide win/lose and compute the signed payout delta. Pure: no state is
/// read or written, identical inputs always yield identical outputs.
pub fn evaluate(
    selection: &BetSelection,
    drawn: &DrawnOutcome,
    stake: u64,
    payouts: &PayoutConfig,
) -> Result<Evaluation, BetError> {
    // Stake bounds are the coordinator's job; a zero stake is still rejected
    // here so the evaluator can never produce a meaningless delta.
    if stake == 0 {
        return Err(BetError::StakeOutOfBounds {
            stake: 0,
            min: 1,
            max: u64::MAX,
        });
    }

    match (selection, drawn) {
        (BetSelection::CoinFlip { face }, DrawnOutcome::CoinFlip { face: drawn_face }) => {
            Ok(settle(face == drawn_face, stake, payouts.coin_flip_bps))
        }
        (BetSelection::Lottery { bet, .. }, DrawnOutcome::Lottery { digits }) => {
            evaluate_lottery(bet, *digits, stake, payouts)
        }
        _ => Err(BetError::InvalidSelection(
            "selection and drawn outcome are for different games".to_string(),
        )),
    }
}

fn evaluate_lottery(
    bet: &LotteryBet,
    digits: [u8; 3],
    stake: u64,
    payouts: &PayoutConfig,
) -> Result<Evaluation, BetError> {
    let round = DrawnOutcome::round_number(digits);

    match bet {
        LotteryBet::Jodi { number } => Ok(settle(*number == round, stake, payouts.jodi_bps)),
        LotteryBet::OddEven { parity } => {
            let drawn_parity = if round % 2 == 0 {
                Parity::Even
            } else {
                Parity::Odd
            };
            Ok(settle(*parity == drawn_parity, stake, payouts.odd_even_bps))
        }
        LotteryBet::Cross { digits: selected } => {
            if selected.len() < 2 {
                return Err(BetError::InvalidSelection(
                    "cross requires at least 2 digits".to_string(),
                ));
            }
            // k distinct digits form k*(k-1) ordered pairs; the win amount is
            // split across them so wider coverage pays less per hit.
            let pairs = (selected.len() * (selected.len() - 1)) as u64;
            let tens = round / 10;
            let units = round % 10;
            let is_win = tens != units && selected.contains(&tens) && selected.contains(&units);
            if is_win {
                // Single floor at the end, not per factor.
                let amount =
                    (stake as u128 * payouts.cross_bps as u128) / (10_000u128 * pairs as u128);
                Ok(Evaluation {
                    is_win: true,
                    payout_delta: amount as i64,
                })
            } else {
                Ok(loss(stake))
            }
        }
        LotteryBet::Hurf { left, right } => {
            let left_hit = left.map(|d| d == digits[0]).unwrap_or(false);
            let right_hit = right.map(|d| d == digits[1]).unwrap_or(false);
            let eval = match (left_hit, right_hit) {
                (true, true) => Evaluation {
                    is_win: true,
                    payout_delta: win_amount(stake, payouts.hurf_double_bps),
                },
                (true, false) | (false, true) => Evaluation {
                    is_win: true,
                    payout_delta: win_amount(stake, payouts.hurf_single_bps),
                },
                (false, false) => loss(stake),
            };
            Ok(eval)
        }
    }
}

fn settle(is_win: bool, stake: u64, multiplier_bps: u64) -> Evaluation {
    if is_win {
        Evaluation {
            is_win: true,
            payout_delta: win_amount(stake, multiplier_bps),
        }
    } else {
        loss(stake)
    }
}

fn loss(stake: u64) -> Evaluation {
    Evaluation {
        is_win: false,
        payout_delta: -(stake as i64),
    }
}

/// floor(stake * multiplier), computed in integer basis points
fn win_amount(stake: u64, multiplier_bps: u64) -> i64 {
    ((stake as u128 * multiplier_bps as u128) / 10_000) as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::types::CoinFace;

    fn payouts() -> PayoutConfig {
        PayoutConfig::default()
    }

    fn lottery(bet: LotteryBet) -> BetSelection {
        BetSelection::Lottery { market_id: 1, bet }
    }

    fn drawn(digits: [u8; 3]) -> DrawnOutcome {
        DrawnOutcome::Lottery { digits }
    }

    #[test]
    fn test_coin_flip_win_pays_floor_of_multiplier() {
        let sel = BetSelection::CoinFlip {
            face: CoinFace::Heads,
        };
        let eval = evaluate(
            &sel,
            &DrawnOutcome::CoinFlip {
                face: CoinFace::Heads,
            },
            100,
            &payouts(),
        )
        .unwrap();
        assert!(eval.is_win);
        // 100 * 1.9 = 190
        assert_eq!(eval.payout_delta, 190);
    }

    #[test]
    fn test_coin_flip_loss_forfeits_stake() {
        let sel = BetSelection::CoinFlip {
            face: CoinFace::Heads,
        };
        let eval = evaluate(
            &sel,
            &DrawnOutcome::CoinFlip {
                face: CoinFace::Tails,
            },
            100,
            &payouts(),
        )
        .unwrap();
        assert!(!eval.is_win);
        assert_eq!(eval.payout_delta, -100);
    }

    #[test]
    fn test_payout_floors_towards_zero() {
        let sel = BetSelection::CoinFlip {
            face: CoinFace::Heads,
        };
        // 7 * 1.9 = 13.3 -> 13
        let eval = evaluate(
            &sel,
            &DrawnOutcome::CoinFlip {
                face: CoinFace::Heads,
            },
            7,
            &payouts(),
        )
        .unwrap();
        assert_eq!(eval.payout_delta, 13);
    }

    #[test]
    fn test_jodi_exact_match() {
        let sel = lottery(LotteryBet::Jodi { number: 42 });
        let win = evaluate(&sel, &drawn([4, 2, 9]), 100, &payouts()).unwrap();
        assert!(win.is_win);
        // 100 * 90 = 9000
        assert_eq!(win.payout_delta, 9000);

        let lose = evaluate(&sel, &drawn([2, 4, 9]), 100, &payouts()).unwrap();
        assert!(!lose.is_win);
        assert_eq!(lose.payout_delta, -100);
    }

    #[test]
    fn test_odd_even_uses_round_number_parity() {
        let odd = lottery(LotteryBet::OddEven {
            parity: Parity::Odd,
        });
        // round number 43, third digit ignored
        let eval = evaluate(&odd, &drawn([4, 3, 2]), 100, &payouts()).unwrap();
        assert!(eval.is_win);
        assert_eq!(eval.payout_delta, 190);

        let eval = evaluate(&odd, &drawn([4, 2, 3]), 100, &payouts()).unwrap();
        assert!(!eval.is_win);
    }

    #[test]
    fn test_cross_wins_on_ordered_pair_and_splits_payout() {
        let sel = lottery(LotteryBet::Cross {
            digits: vec![4, 2, 7],
        });
        // 3 digits -> 6 ordered pairs; 90x / 6 = 15x
        let win = evaluate(&sel, &drawn([7, 4, 0]), 100, &payouts()).unwrap();
        assert!(win.is_win);
        assert_eq!(win.payout_delta, 1500);

        // 44 is not a pair of distinct selected digits
        let lose = evaluate(&sel, &drawn([4, 4, 0]), 100, &payouts()).unwrap();
        assert!(!lose.is_win);

        // 48 only covers one selected digit
        let lose = evaluate(&sel, &drawn([4, 8, 0]), 100, &payouts()).unwrap();
        assert!(!lose.is_win);
    }

    #[test]
    fn test_hurf_single_and_double_position() {
        let both = lottery(LotteryBet::Hurf {
            left: Some(4),
            right: Some(2),
        });
        let eval = evaluate(&both, &drawn([4, 2, 0]), 100, &payouts()).unwrap();
        assert!(eval.is_win);
        // double match: 50x
        assert_eq!(eval.payout_delta, 5000);

        let eval = evaluate(&both, &drawn([4, 9, 0]), 100, &payouts()).unwrap();
        assert!(eval.is_win);
        // single match: 9x
        assert_eq!(eval.payout_delta, 900);

        let left_only = lottery(LotteryBet::Hurf {
            left: Some(4),
            right: None,
        });
        let eval = evaluate(&left_only, &drawn([9, 4, 0]), 100, &payouts()).unwrap();
        assert!(!eval.is_win);
        assert_eq!(eval.payout_delta, -100);
    }

    #[test]
    fn test_zero_stake_rejected() {
        let sel = BetSelection::CoinFlip {
            face: CoinFace::Heads,
        };
        let err = evaluate(
            &sel,
            &DrawnOutcome::CoinFlip {
                face: CoinFace::Heads,
            },
            0,
            &payouts(),
        )
        .unwrap_err();
        assert!(matches!(err, BetError::StakeOutOfBounds { stake: 0, .. }));
    }

    #[test]
    fn test_mismatched_game_rejected() {
        let sel = BetSelection::CoinFlip {
            face: CoinFace::Heads,
        };
        let err = evaluate(&sel, &drawn([1, 2, 3]), 100, &payouts()).unwrap_err();
        assert!(matches!(err, BetError::InvalidSelection(_)));
    }

    #[test]
    fn test_evaluate_is_pure() {
        let sel = lottery(LotteryBet::Jodi { number: 17 });
        let outcome = drawn([1, 7, 7]);
        let a = evaluate(&sel, &outcome, 250, &payouts()).unwrap();
        let b = evaluate(&sel, &outcome, 250, &payouts()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_validate_cross_shapes() {
        let markets = vec![MarketConfig {
            id: 1,
            name: "test".to_string(),
        }];

        let too_few = lottery(LotteryBet::Cross { digits: vec![4] });
        assert!(validate_selection(&too_few, &markets).is_err());

        let repeated = lottery(LotteryBet::Cross {
            digits: vec![4, 4, 2],
        });
        assert!(validate_selection(&repeated, &markets).is_err());

        let out_of_range = lottery(LotteryBet::Cross {
            digits: vec![4, 12],
        });
        assert!(validate_selection(&out_of_range, &markets).is_err());

        let ok = lottery(LotteryBet::Cross {
            digits: vec![0, 4, 2, 7, 9],
        });
        assert!(validate_selection(&ok, &markets).is_ok());
    }

    #[test]
    fn test_validate_hurf_requires_a_position() {
        let markets = vec![MarketConfig {
            id: 1,
            name: "test".to_string(),
        }];
        let empty = lottery(LotteryBet::Hurf {
            left: None,
            right: None,
        });
        assert!(validate_selection(&empty, &markets).is_err());
    }

    #[test]
    fn test_validate_unknown_market() {
        let markets = vec![MarketConfig {
            id: 1,
            name: "test".to_string(),
        }];
        let sel = BetSelection::Lottery {
            market_id: 99,
            bet: LotteryBet::Jodi { number: 5 },
        };
        assert!(matches!(
            validate_selection(&sel, &markets),
            Err(BetError::UnknownMarket(99))
        ));
    }
}
