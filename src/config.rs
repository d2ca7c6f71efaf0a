//! Configuration for stakes, payouts and lottery markets.
//!
//! Multipliers are injected here rather than baked into the evaluator, and
//! are expressed in basis points (10_000 = 1.0x) so payouts stay exact
//! integer arithmetic.

use crate::errors::ConfigError;
use crate::games::types::GameKind;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level settlement configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Config {
    pub stakes: StakeConfig,
    pub payouts: PayoutConfig,
    pub markets: Vec<MarketConfig>,
}

/// Per-game stake bounds
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StakeConfig {
    pub coin_min: u64,
    pub coin_max: u64,
    pub lottery_min: u64,
    pub lottery_max: u64,
}

impl Default for StakeConfig {
    fn default() -> Self {
        Self {
            coin_min: 10,
            coin_max: 100_000,
            lottery_min: 10,
            lottery_max: 50_000,
        }
    }
}

impl StakeConfig {
    /// (min, max) stake bounds for a game
    pub fn bounds_for(&self, game: GameKind) -> (u64, u64) {
        match game {
            GameKind::CoinFlip => (self.coin_min, self.coin_max),
            GameKind::Lottery => (self.lottery_min, self.lottery_max),
        }
    }
}

/// Payout multipliers per bet family, in basis points (10_000 = 1.0x)
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PayoutConfig {
    pub coin_flip_bps: u64,
    pub jodi_bps: u64,
    pub odd_even_bps: u64,
    /// Cross multiplier before splitting across the selection's pair count
    pub cross_bps: u64,
    pub hurf_single_bps: u64,
    pub hurf_double_bps: u64,
}

impl Default for PayoutConfig {
    fn default() -> Self {
        Self {
            coin_flip_bps: 19_000,   // 1.9x
            jodi_bps: 900_000,       // 90x
            odd_even_bps: 19_000,    // 1.9x
            cross_bps: 900_000,      // 90x pre-split
            hurf_single_bps: 90_000, // 9x
            hurf_double_bps: 500_000, // 50x
        }
    }
}

/// A lottery market players can bet into
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct MarketConfig {
    pub id: u32,
    pub name: String,
}

impl Config {
    /// Configuration for the demo deployment: default multipliers and the
    /// two stock markets.
    pub fn demo() -> Self {
        Self {
            stakes: StakeConfig::default(),
            payouts: PayoutConfig::default(),
            markets: vec![
                MarketConfig {
                    id: 1,
                    name: "Day Bazaar".to_string(),
                },
                MarketConfig {
                    id: 2,
                    name: "Night Bazaar".to_string(),
                },
            ],
        }
    }

    /// Validate configuration for logical consistency
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.stakes.coin_min == 0 || self.stakes.lottery_min == 0 {
            return Err(ConfigError::Invalid(
                "minimum stake must be > 0".to_string(),
            ));
        }
        if self.stakes.coin_min > self.stakes.coin_max {
            return Err(ConfigError::Invalid(
                "coin stake bounds inverted".to_string(),
            ));
        }
        if self.stakes.lottery_min > self.stakes.lottery_max {
            return Err(ConfigError::Invalid(
                "lottery stake bounds inverted".to_string(),
            ));
        }

        let multipliers = [
            self.payouts.coin_flip_bps,
            self.payouts.jodi_bps,
            self.payouts.odd_even_bps,
            self.payouts.cross_bps,
            self.payouts.hurf_single_bps,
            self.payouts.hurf_double_bps,
        ];
        if multipliers.iter().any(|m| *m == 0) {
            return Err(ConfigError::Invalid(
                "payout multipliers must be > 0".to_string(),
            ));
        }
        if self.payouts.hurf_double_bps < self.payouts.hurf_single_bps {
            return Err(ConfigError::Invalid(
                "hurf double multiplier below single".to_string(),
            ));
        }

        if self.markets.is_empty() {
            return Err(ConfigError::Invalid(
                "at least one lottery market required".to_string(),
            ));
        }
        for (i, market) in self.markets.iter().enumerate() {
            if self.markets[..i].iter().any(|m| m.id == market.id) {
                return Err(ConfigError::Invalid(format!(
                    "duplicate market id {}",
                    market.id
                )));
            }
        }

        Ok(())
    }

    /// Load configuration from a TOML file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_config_is_valid() {
        assert!(Config::demo().validate().is_ok());
    }

    #[test]
    fn test_empty_markets_rejected() {
        let config = Config {
            markets: vec![],
            ..Config::demo()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_multiplier_rejected() {
        let mut config = Config::demo();
        config.payouts.jodi_bps = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_inverted_stake_bounds_rejected() {
        let mut config = Config::demo();
        config.stakes.lottery_min = 1_000_000;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_duplicate_market_ids_rejected() {
        let mut config = Config::demo();
        config.markets.push(MarketConfig {
            id: 1,
            name: "duplicate".to_string(),
        });
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_bounds_per_game() {
        let config = Config::demo();
        assert_eq!(config.stakes.bounds_for(GameKind::CoinFlip), (10, 100_000));
        assert_eq!(config.stakes.bounds_for(GameKind::Lottery), (10, 50_000));
    }

    #[test]
    fn test_toml_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("betdesk.toml");

        let config = Config::demo();
        config.save_to_file(&path).unwrap();

        let loaded = Config::load_from_file(&path).unwrap();
        assert_eq!(loaded.markets, config.markets);
        assert_eq!(loaded.payouts.jodi_bps, config.payouts.jodi_bps);
        assert_eq!(loaded.stakes.coin_max, config.stakes.coin_max);
    }
}
