//! Table constants and the tunable configuration built from them.

use crate::agents::PlayStyle;
use serde::{Deserialize, Serialize};

/// Chip amounts. Signed so a short stack can be detected after posting a blind.
pub type Chips = i64;

pub const SMALL_BLIND: Chips = 5;
pub const BIG_BLIND: Chips = 10;
/// Chips each seat brings to a match.
pub const ROUND_BUY_IN: Chips = BIG_BLIND * 100;
/// A raise adds `current_bet * RAISE_RATE` on top of the call.
pub const RAISE_RATE: Chips = 1;
pub const MONTE_CARLO_TRIALS: u32 = 100;
/// Bankroll given to a player record that has never played.
pub const INITIAL_FUNDS: Chips = 10_000;
/// Threshold points added per whole buy-in of chips committed by a Raise or Call.
pub const SIZE_WEIGHT: u32 = 50;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("blinds must be positive with small <= big (small {small}, big {big})")]
    Blinds { small: Chips, big: Chips },
    #[error("buy-in {buy_in} cannot cover the big blind {big_blind}")]
    BuyIn { buy_in: Chips, big_blind: Chips },
    #[error("raise rate must be at least 1, got {0}")]
    RaiseRate(Chips),
    #[error("Monte Carlo trials must be at least 1")]
    Trials,
    #[error("threshold {value} for {style:?} is above 100")]
    Threshold { style: PlayStyle, value: u8 },
    #[error("invalid config json: {0}")]
    Json(String),
}

/// Win-percentage thresholds the betting policy uses against one opponent style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleThresholds {
    pub all_in: u8,
    pub raise: u8,
    pub call: u8,
}

impl StyleThresholds {
    pub const fn new(all_in: u8, raise: u8, call: u8) -> Self {
        Self { all_in, raise, call }
    }
}

/// Betting policy tuning, one threshold set per opponent style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    pub tight_passive: StyleThresholds,
    pub tight_aggressive: StyleThresholds,
    pub loose_passive: StyleThresholds,
    pub loose_aggressive: StyleThresholds,
    pub size_weight: u32,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            tight_passive: StyleThresholds::new(85, 65, 45),
            tight_aggressive: StyleThresholds::new(88, 70, 50),
            loose_passive: StyleThresholds::new(75, 60, 40),
            loose_aggressive: StyleThresholds::new(78, 62, 35),
            size_weight: SIZE_WEIGHT,
        }
    }
}

impl PolicyConfig {
    pub fn thresholds(&self, style: PlayStyle) -> &StyleThresholds {
        match style {
            PlayStyle::TightPassive => &self.tight_passive,
            PlayStyle::TightAggressive => &self.tight_aggressive,
            PlayStyle::LoosePassive => &self.loose_passive,
            PlayStyle::LooseAggressive => &self.loose_aggressive,
        }
    }
}

/// Everything a table needs to run a match.
///
/// ```
/// use headsup_holdem::config::{TableConfig, BIG_BLIND};
///
/// let cfg = TableConfig::from_json(r#"{ "big_blind": 20, "small_blind": 10 }"#).unwrap();
/// assert_eq!(cfg.big_blind, 2 * BIG_BLIND);
/// assert_eq!(cfg.round_buy_in, TableConfig::default().round_buy_in);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    pub small_blind: Chips,
    pub big_blind: Chips,
    pub round_buy_in: Chips,
    pub raise_rate: Chips,
    pub monte_carlo_trials: u32,
    pub initial_funds: Chips,
    pub policy: PolicyConfig,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            small_blind: SMALL_BLIND,
            big_blind: BIG_BLIND,
            round_buy_in: ROUND_BUY_IN,
            raise_rate: RAISE_RATE,
            monte_carlo_trials: MONTE_CARLO_TRIALS,
            initial_funds: INITIAL_FUNDS,
            policy: PolicyConfig::default(),
        }
    }
}

impl TableConfig {
    /// Parse overrides on top of the defaults and validate the result.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let cfg: TableConfig =
            serde_json::from_str(json).map_err(|e| ConfigError::Json(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.small_blind <= 0 || self.big_blind < self.small_blind {
            return Err(ConfigError::Blinds { small: self.small_blind, big: self.big_blind });
        }
        if self.round_buy_in <= self.big_blind {
            return Err(ConfigError::BuyIn { buy_in: self.round_buy_in, big_blind: self.big_blind });
        }
        if self.raise_rate < 1 {
            return Err(ConfigError::RaiseRate(self.raise_rate));
        }
        if self.monte_carlo_trials == 0 {
            return Err(ConfigError::Trials);
        }
        for style in PlayStyle::ALL {
            let t = self.policy.thresholds(style);
            for value in [t.all_in, t.raise, t.call] {
                if value > 100 {
                    return Err(ConfigError::Threshold { style, value });
                }
            }
        }
        Ok(())
    }
}
