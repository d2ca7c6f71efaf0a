use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported game types
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum GameKind {
    Lottery,
    CoinFlip,
}

impl fmt::Display for GameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameKind::Lottery => write!(f, "lottery"),
            GameKind::CoinFlip => write!(f, "coinflip"),
        }
    }
}

/// Coin flip face
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CoinFace {
    Heads,
    Tails,
}

impl fmt::Display for CoinFace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoinFace::Heads => write!(f, "heads"),
            CoinFace::Tails => write!(f, "tails"),
        }
    }
}

/// Parity selection for odd/even lottery bets
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Parity {
    Odd,
    Even,
}

/// Lottery bet sub-types (discriminated union)
///
/// Each variant carries only its legal selection shape; anything else is
/// rejected at the boundary before it reaches the evaluator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "family", rename_all = "lowercase")]
pub enum LotteryBet {
    /// Exact two-digit number 00-99
    Jodi { number: u8 },
    /// Parity of the round number
    OddEven { parity: Parity },
    /// 2-5 distinct digits; wins if the round number is any ordered pair of them
    Cross { digits: Vec<u8> },
    /// Left and/or right digit of the round number, at least one required
    Hurf { left: Option<u8>, right: Option<u8> },
}

impl LotteryBet {
    /// Family name for records and logging
    pub fn family(&self) -> &'static str {
        match self {
            LotteryBet::Jodi { .. } => "jodi",
            LotteryBet::OddEven { .. } => "oddeven",
            LotteryBet::Cross { .. } => "cross",
            LotteryBet::Hurf { .. } => "hurf",
        }
    }
}

/// A player's complete bet selection
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "game", rename_all = "lowercase")]
pub enum BetSelection {
    CoinFlip { face: CoinFace },
    Lottery { market_id: u32, bet: LotteryBet },
}

impl BetSelection {
    pub fn game(&self) -> GameKind {
        match self {
            BetSelection::CoinFlip { .. } => GameKind::CoinFlip,
            BetSelection::Lottery { .. } => GameKind::Lottery,
        }
    }

    pub fn market_id(&self) -> Option<u32> {
        match self {
            BetSelection::CoinFlip { .. } => None,
            BetSelection::Lottery { market_id, .. } => Some(*market_id),
        }
    }
}

/// Result of a round draw
///
/// The lottery draws three independent digits with replacement; duplicates
/// are allowed by design (independent trials, not a permutation). The
/// playable two-digit round number is formed from the first two digits; the
/// third is a bonus digit kept for round history display.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "game", rename_all = "lowercase")]
pub enum DrawnOutcome {
    CoinFlip { face: CoinFace },
    Lottery { digits: [u8; 3] },
}

impl DrawnOutcome {
    /// Two-digit round number formed from the first two drawn digits (0-99)
    pub fn round_number(digits: [u8; 3]) -> u8 {
        digits[0] * 10 + digits[1]
    }
}

impl fmt::Display for DrawnOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrawnOutcome::CoinFlip { face } => write!(f, "{}", face),
            DrawnOutcome::Lottery { digits } => {
                write!(f, "{}{}{}", digits[0], digits[1], digits[2])
            }
        }
    }
}

/// Pure win/payout decision for one bet
///
/// `payout_delta` is the signed balance change: `-stake` on loss, the net
/// win amount on win (the stake is never debited up front, so a win credits
/// the full multiplier amount and leaves the stake untouched).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Evaluation {
    pub is_win: bool,
    pub payout_delta: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_number_from_first_two_digits() {
        assert_eq!(DrawnOutcome::round_number([4, 2, 9]), 42);
        assert_eq!(DrawnOutcome::round_number([0, 0, 5]), 0);
        assert_eq!(DrawnOutcome::round_number([9, 9, 9]), 99);
    }

    #[test]
    fn test_selection_game_kind() {
        let coin = BetSelection::CoinFlip {
            face: CoinFace::Heads,
        };
        assert_eq!(coin.game(), GameKind::CoinFlip);
        assert_eq!(coin.market_id(), None);

        let lottery = BetSelection::Lottery {
            market_id: 3,
            bet: LotteryBet::Jodi { number: 42 },
        };
        assert_eq!(lottery.game(), GameKind::Lottery);
        assert_eq!(lottery.market_id(), Some(3));
    }

    #[test]
    fn test_selection_serde_tagging() {
        let sel = BetSelection::Lottery {
            market_id: 1,
            bet: LotteryBet::Hurf {
                left: Some(4),
                right: None,
            },
        };
        let json = serde_json::to_value(&sel).unwrap();
        assert_eq!(json["game"], "lottery");
        assert_eq!(json["bet"]["family"], "hurf");

        let back: BetSelection = serde_json::from_value(json).unwrap();
        assert_eq!(back, sel);
    }

    #[test]
    fn test_drawn_outcome_display() {
        let drawn = DrawnOutcome::Lottery { digits: [4, 2, 7] };
        assert_eq!(drawn.to_string(), "427");
        let coin = DrawnOutcome::CoinFlip {
            face: CoinFace::Tails,
        };
        assert_eq!(coin.to_string(), "tails");
    }
}
