use crate::config::{Chips, INITIAL_FUNDS};
use crate::player::ActionCounters;
use serde::{Deserialize, Serialize};

/// A user's persisted bankroll and lifetime tallies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub name: String,
    pub funds: Chips,
    pub win: u32,
    pub lose: u32,
    pub fold: u32,
    pub check: u32,
    pub call: u32,
    pub bet: u32,
    pub raise: u32,
    pub reraise: u32,
    #[serde(default)]
    pub allin: u32,
}

impl Default for PlayerRecord {
    fn default() -> Self {
        Self::fresh("Player", INITIAL_FUNDS)
    }
}

/// Percentages derived from a record; 0 where there is nothing to divide by.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RecordStats {
    pub hands: u32,
    pub win_rate: f64,
    pub fold_rate: f64,
    pub check_rate: f64,
    pub call_rate: f64,
    pub bet_rate: f64,
    pub raise_rate: f64,
    pub reraise_rate: f64,
    pub allin_rate: f64,
}

impl PlayerRecord {
    pub fn fresh(name: impl Into<String>, funds: Chips) -> Self {
        Self {
            name: name.into(),
            funds,
            win: 0,
            lose: 0,
            fold: 0,
            check: 0,
            call: 0,
            bet: 0,
            raise: 0,
            reraise: 0,
            allin: 0,
        }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn counters(&self) -> ActionCounters {
        ActionCounters {
            fold: self.fold,
            check: self.check,
            call: self.call,
            bet: self.bet,
            raise: self.raise,
            reraise: self.reraise,
            allin: self.allin,
        }
    }

    pub fn add_counters(&mut self, c: &ActionCounters) {
        self.fold += c.fold;
        self.check += c.check;
        self.call += c.call;
        self.bet += c.bet;
        self.raise += c.raise;
        self.reraise += c.reraise;
        self.allin += c.allin;
    }

    /// Win rate and action mix.
    ///
    /// ```
    /// use headsup_holdem::session::PlayerRecord;
    ///
    /// let mut r = PlayerRecord::fresh("ann", 10_000);
    /// assert_eq!(r.stats().win_rate, 0.0);
    /// r.win = 3;
    /// r.lose = 1;
    /// r.call = 1;
    /// r.fold = 1;
    /// let s = r.stats();
    /// assert_eq!(s.win_rate, 75.0);
    /// assert_eq!(s.fold_rate, 50.0);
    /// ```
    pub fn stats(&self) -> RecordStats {
        let hands = self.win + self.lose;
        let actions = self.counters().total();
        let pct = |n: u32, d: u32| if d == 0 { 0.0 } else { f64::from(n) * 100.0 / f64::from(d) };
        RecordStats {
            hands,
            win_rate: pct(self.win, hands),
            fold_rate: pct(self.fold, actions),
            check_rate: pct(self.check, actions),
            call_rate: pct(self.call, actions),
            bet_rate: pct(self.bet, actions),
            raise_rate: pct(self.raise, actions),
            reraise_rate: pct(self.reraise, actions),
            allin_rate: pct(self.allin, actions),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn older_records_without_allin_still_load() {
        let json = r#"{"name":"bo","funds":9000,"win":2,"lose":5,"fold":7,"check":1,"call":3,"bet":0,"raise":1,"reraise":0}"#;
        let r = PlayerRecord::from_json(json).unwrap();
        assert_eq!(r.allin, 0);
        assert_eq!(r.funds, 9000);
        assert_eq!(r.counters().total(), 12);
    }

    #[test]
    fn counters_accumulate() {
        let mut r = PlayerRecord::default();
        r.add_counters(&ActionCounters { call: 2, allin: 1, ..Default::default() });
        r.add_counters(&ActionCounters { call: 1, ..Default::default() });
        assert_eq!(r.call, 3);
        assert_eq!(r.allin, 1);
        assert_eq!(r.funds, INITIAL_FUNDS);
    }
}
