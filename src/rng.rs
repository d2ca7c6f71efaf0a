//! Round outcome generation.
//!
//! Draws are pure consumption of entropy: a coin face, or three independent
//! digits 0-9 with replacement. The generator sits behind a trait so tests
//! can script deterministic sequences; production uses thread-local entropy,
//! which is unpredictable to the player (the platform makes no cryptographic
//! fairness claim).

use crate::games::types::CoinFace;
use rand::Rng;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Source of drawn outcomes for both games
pub trait OutcomeRng: Send + Sync {
    /// Draw a coin face, uniform 50/50
    fn draw_coin(&self) -> CoinFace;

    /// Draw three digits, each independently uniform over 0-9.
    /// Duplicates are allowed by design: independent trials, not a permutation.
    fn draw_digits(&self) -> [u8; 3];
}

/// Production generator backed by thread-local entropy
#[derive(Debug, Default, Clone, Copy)]
pub struct EntropyRng;

impl OutcomeRng for EntropyRng {
    fn draw_coin(&self) -> CoinFace {
        if rand::thread_rng().gen_bool(0.5) {
            CoinFace::Heads
        } else {
            CoinFace::Tails
        }
    }

    fn draw_digits(&self) -> [u8; 3] {
        let mut rng = rand::thread_rng();
        [
            rng.gen_range(0..10),
            rng.gen_range(0..10),
            rng.gen_range(0..10),
        ]
    }
}

/// Deterministic generator for tests: replays scripted outcomes in order.
///
/// Panics when the script runs dry, so a test that draws more than it
/// scripted fails loudly instead of passing on garbage.
#[derive(Debug, Default)]
pub struct ScriptedRng {
    coins: Mutex<VecDeque<CoinFace>>,
    digits: Mutex<VecDeque<[u8; 3]>>,
}

impl ScriptedRng {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_coin(&self, face: CoinFace) {
        self.coins.lock().unwrap().push_back(face);
    }

    pub fn push_coins(&self, face: CoinFace, count: usize) {
        let mut coins = self.coins.lock().unwrap();
        for _ in 0..count {
            coins.push_back(face);
        }
    }

    pub fn push_digits(&self, digits: [u8; 3]) {
        self.digits.lock().unwrap().push_back(digits);
    }
}

impl OutcomeRng for ScriptedRng {
    fn draw_coin(&self) -> CoinFace {
        self.coins
            .lock()
            .unwrap()
            .pop_front()
            .expect("scripted coin outcomes exhausted")
    }

    fn draw_digits(&self) -> [u8; 3] {
        self.digits
            .lock()
            .unwrap()
            .pop_front()
            .expect("scripted digit outcomes exhausted")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entropy_digits_in_range() {
        let rng = EntropyRng;
        for _ in 0..100 {
            let digits = rng.draw_digits();
            assert!(digits.iter().all(|d| *d <= 9));
        }
    }

    #[test]
    fn test_entropy_coin_hits_both_faces() {
        let rng = EntropyRng;
        let mut heads = 0;
        let mut tails = 0;
        for _ in 0..200 {
            match rng.draw_coin() {
                CoinFace::Heads => heads += 1,
                CoinFace::Tails => tails += 1,
            }
        }
        // 200 flips all landing the same way means a broken generator.
        assert!(heads > 0 && tails > 0);
    }

    #[test]
    fn test_scripted_sequence_replays_in_order() {
        let rng = ScriptedRng::new();
        rng.push_coin(CoinFace::Tails);
        rng.push_coin(CoinFace::Heads);
        rng.push_digits([4, 2, 9]);

        assert_eq!(rng.draw_coin(), CoinFace::Tails);
        assert_eq!(rng.draw_coin(), CoinFace::Heads);
        assert_eq!(rng.draw_digits(), [4, 2, 9]);
    }

    #[test]
    #[should_panic(expected = "exhausted")]
    fn test_scripted_panics_when_dry() {
        let rng = ScriptedRng::new();
        rng.draw_coin();
    }
}
