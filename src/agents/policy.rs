use super::{Action, LegalActions, PlayStyle};
use crate::config::{Chips, PolicyConfig};

/// Bet sizing the policy weighs a decision against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BetContext {
    pub current_bet: Chips,
    pub own_bet: Chips,
    pub round_buy_in: Chips,
    /// Chips a Bet or Raise adds on top of the call.
    pub raise_increment: Chips,
}

impl BetContext {
    pub fn to_call(&self) -> Chips {
        (self.current_bet - self.own_bet).max(0)
    }
}

/// Pick one legal action from a win percentage and the opponent's style.
///
/// Checked in order: All-In, Raise (or Bet), Call, then Check or Fold.
/// Raise and Call thresholds grow with the chips committed relative to the buy-in.
///
/// ```
/// use headsup_holdem::agents::{decide, legal_actions, Action, BetContext, PlayStyle};
/// use headsup_holdem::config::PolicyConfig;
///
/// let legal = legal_actions(990, 0, 0, 10, 1);
/// let ctx = BetContext { current_bet: 0, own_bet: 0, round_buy_in: 1000, raise_increment: 10 };
/// let policy = PolicyConfig::default();
/// assert_eq!(decide(&legal, 20, PlayStyle::LoosePassive, &ctx, &policy), Action::Check);
/// assert_eq!(decide(&legal, 95, PlayStyle::LoosePassive, &ctx, &policy), Action::AllIn);
/// ```
pub fn decide(
    legal: &LegalActions,
    win_pct: u8,
    style: PlayStyle,
    ctx: &BetContext,
    policy: &PolicyConfig,
) -> Action {
    let t = policy.thresholds(style);
    let win = u32::from(win_pct);
    let size_adjust = |chips: Chips| -> u32 {
        if ctx.round_buy_in <= 0 {
            return 0;
        }
        let points = chips.max(0) * Chips::from(policy.size_weight) / ctx.round_buy_in;
        u32::try_from(points).unwrap_or(u32::MAX)
    };

    if legal.contains(Action::AllIn) && win >= u32::from(t.all_in) {
        return Action::AllIn;
    }

    let raise_needs = u32::from(t.raise).saturating_add(size_adjust(ctx.to_call() + ctx.raise_increment));
    if win >= raise_needs {
        if legal.contains(Action::Raise) {
            return Action::Raise;
        }
        if legal.contains(Action::Bet) {
            return Action::Bet;
        }
    }

    let call_needs = u32::from(t.call).saturating_add(size_adjust(ctx.to_call()));
    if legal.contains(Action::Call) && win >= call_needs {
        return Action::Call;
    }

    if legal.contains(Action::Check) {
        Action::Check
    } else {
        Action::Fold
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::legal_actions;

    fn ctx(current_bet: Chips, own_bet: Chips) -> BetContext {
        let raise_increment = if current_bet == 0 { 10 } else { current_bet };
        BetContext { current_bet, own_bet, round_buy_in: 1000, raise_increment }
    }

    #[test]
    fn strong_hand_shoves_when_all_in_is_legal() {
        let legal = legal_actions(990, 10, 20, 10, 1);
        let p = PolicyConfig::default();
        assert_eq!(decide(&legal, 90, PlayStyle::TightAggressive, &ctx(20, 10), &p), Action::AllIn);
    }

    #[test]
    fn loose_opponent_lowers_the_shove_threshold() {
        let legal = legal_actions(990, 10, 20, 10, 1);
        let p = PolicyConfig::default();
        assert_eq!(decide(&legal, 80, PlayStyle::LooseAggressive, &ctx(20, 10), &p), Action::AllIn);
        assert_ne!(decide(&legal, 80, PlayStyle::TightAggressive, &ctx(20, 10), &p), Action::AllIn);
    }

    #[test]
    fn raise_then_bet_fallback() {
        let p = PolicyConfig::default();
        let facing = legal_actions(990, 10, 20, 10, 1);
        assert_eq!(decide(&facing, 72, PlayStyle::TightPassive, &ctx(20, 10), &p), Action::Raise);
        let open = legal_actions(990, 0, 0, 10, 1);
        assert_eq!(decide(&open, 72, PlayStyle::TightPassive, &ctx(0, 0), &p), Action::Bet);
    }

    #[test]
    fn medium_hand_calls_small_bets_but_not_big_ones() {
        let p = PolicyConfig::default();
        let small = legal_actions(990, 0, 10, 10, 1);
        assert_eq!(decide(&small, 50, PlayStyle::TightPassive, &ctx(10, 0), &p), Action::Call);
        // 600 to call adds 30 points to the 45 call threshold
        let big = legal_actions(990, 0, 600, 10, 1);
        assert_eq!(decide(&big, 50, PlayStyle::TightPassive, &ctx(600, 0), &p), Action::Fold);
    }

    #[test]
    fn weak_hand_checks_when_free_and_folds_otherwise() {
        let p = PolicyConfig::default();
        let free = legal_actions(990, 10, 10, 10, 1);
        assert_eq!(decide(&free, 10, PlayStyle::LoosePassive, &ctx(10, 10), &p), Action::Check);
        let facing = legal_actions(990, 0, 10, 10, 1);
        assert_eq!(decide(&facing, 10, PlayStyle::LoosePassive, &ctx(10, 0), &p), Action::Fold);
    }

    #[test]
    fn decision_is_always_legal() {
        let p = PolicyConfig::default();
        for funds in [3, 10, 35, 990] {
            for (current, own) in [(0, 0), (10, 0), (10, 5), (10, 10), (40, 10)] {
                let legal = legal_actions(funds, own, current, 10, 1);
                for win in [0u8, 30, 45, 61, 70, 80, 100] {
                    for style in PlayStyle::ALL {
                        let a = decide(&legal, win, style, &ctx(current, own), &p);
                        assert!(legal.contains(a), "{a} not in [{legal}]");
                    }
                }
            }
        }
    }
}
