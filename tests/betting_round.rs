use headsup_holdem::agents::Action;
use headsup_holdem::cards::parse_cards;
use headsup_holdem::config::TableConfig;
use headsup_holdem::deck::Deck;
use headsup_holdem::game::{Continue, Game, GameState, HandSummary, Prompt, Street, HUMAN_SEAT, NPC_SEAT};
use rand::seq::IndexedRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn passive(legal: &headsup_holdem::agents::LegalActions) -> Action {
    if legal.contains(Action::Check) {
        Action::Check
    } else if legal.contains(Action::Call) {
        Action::Call
    } else {
        Action::AllIn
    }
}

/// Check or call every decision until the hand ends.
fn play_passively(game: &mut Game) -> HandSummary {
    let mut prompt = game.resume().unwrap();
    loop {
        assert_eq!(game.total_chips(), 2 * game.config().round_buy_in);
        match prompt {
            Prompt::AwaitAction { seat, legal } => {
                assert_eq!(seat, HUMAN_SEAT);
                prompt = game.act(passive(&legal)).unwrap();
            }
            Prompt::HandOver(summary) => return summary,
        }
    }
}

fn stacked_game(seed: u64, cards: &str) -> Game {
    let mut game = Game::new(TableConfig::default(), seed).unwrap();
    game.stack_next_deck(Deck::stacked(parse_cards(cards).unwrap()));
    game
}

#[test]
fn identical_high_cards_split_the_pot() {
    for seed in 0..6 {
        let mut game = stacked_game(seed, "Ah Kh As Ks 2c 7d 9s Jh 4c");
        let summary = play_passively(&mut game);
        assert_eq!(summary.winners, vec![HUMAN_SEAT, NPC_SEAT]);
        let human = summary.showdown[HUMAN_SEAT].unwrap();
        let npc = summary.showdown[NPC_SEAT].unwrap();
        assert_eq!(human.classification, npc.classification);
        assert_eq!(human.classification.to_string(), "Ace high");
        assert_eq!(summary.payouts[HUMAN_SEAT], summary.payouts[NPC_SEAT]);
        assert_eq!(game.players()[HUMAN_SEAT].funds(), 1000);
        assert_eq!(game.players()[NPC_SEAT].funds(), 1000);
        assert!(summary.match_result.is_none());
    }
}

#[test]
fn paired_board_ace_splits_with_king_kicker() {
    let mut game = stacked_game(3, "Ah Kh As Ks 2c 7d 9s Jh Ac");
    let summary = play_passively(&mut game);
    assert_eq!(summary.winners, vec![HUMAN_SEAT, NPC_SEAT]);
    let best = summary.showdown[HUMAN_SEAT].unwrap();
    assert_eq!(best.classification.to_string(), "Pair of Aces, King kicker");
    assert_eq!(summary.revealed[NPC_SEAT], Some("As Ks".parse().unwrap()));
}

#[test]
fn better_hand_takes_the_whole_pot() {
    let mut game = stacked_game(4, "Qc Qd 7h 2s Qs 9d 4c Jh 3d");
    let summary = play_passively(&mut game);
    assert_eq!(summary.winners, vec![HUMAN_SEAT]);
    assert!(summary.human_won);
    let won = summary.payouts[HUMAN_SEAT];
    assert!(won > 0);
    assert_eq!(game.players()[HUMAN_SEAT].funds() + game.players()[NPC_SEAT].funds(), 2000);
}

#[test]
fn money_is_conserved_across_many_hands() {
    let mut game = Game::new(TableConfig::default(), 77).unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(77);
    let mut prompt = game.resume().unwrap();
    let mut hands = 0;
    while hands < 60 {
        assert_eq!(game.total_chips(), 2000);
        assert!(game.board().len() <= 5);
        prompt = match prompt {
            Prompt::AwaitAction { legal, .. } => {
                assert_eq!(game.state(), GameState::PlayersInput);
                let action = *legal.as_slice().choose(&mut rng).unwrap();
                game.act(action).unwrap()
            }
            Prompt::HandOver(summary) => {
                hands += 1;
                let paid: i64 = summary.payouts.iter().sum();
                assert!(summary.winners.is_empty() || paid > 0);
                assert_eq!(game.pot_total(), 0);
                if summary.is_match_over() {
                    game.proceed(Continue::NewMatch).unwrap()
                } else {
                    game.proceed(Continue::NextRound).unwrap()
                }
            }
        };
    }
}

#[test]
fn dealer_rotates_between_hands() {
    let mut game = Game::new(TableConfig::default(), 12).unwrap();
    let summary = play_passively(&mut game);
    assert!(!summary.is_match_over());
    let first = game.dealer();
    game.proceed(Continue::NextRound).unwrap();
    assert_ne!(game.dealer(), first);
    assert_eq!(game.hand_no(), 2);
}

#[test]
fn folding_hands_the_pot_to_the_opponent() {
    let mut game = Game::new(TableConfig::default(), 21).unwrap();
    let mut prompt = game.resume().unwrap();
    for _ in 0..100 {
        match &prompt {
            Prompt::AwaitAction { .. } if game.street() == Street::PreFlop => break,
            Prompt::AwaitAction { legal, .. } => prompt = game.act(passive(legal)).unwrap(),
            Prompt::HandOver(_) => prompt = game.proceed(Continue::NewMatch).unwrap(),
        }
    }
    let human_bet = game.players()[HUMAN_SEAT].bet();
    let summary = match game.act(Action::Fold).unwrap() {
        Prompt::HandOver(summary) => summary,
        other => panic!("expected the hand to end, got {other:?}"),
    };
    assert_eq!(summary.winners, vec![NPC_SEAT]);
    assert!(!summary.human_won);
    assert_eq!(summary.human_counters.fold, 1);
    assert!(summary.showdown.iter().all(Option::is_none));
    assert!(summary.revealed.iter().all(Option::is_none));
    assert_eq!(game.players()[HUMAN_SEAT].funds(), 1000 - human_bet);
}

#[test]
fn result_is_processed_once() {
    let mut game = Game::new(TableConfig::default(), 31).unwrap();
    let summary = play_passively(&mut game);
    let funds: Vec<i64> = game.players().iter().map(|p| p.funds()).collect();
    assert_eq!(game.resume().unwrap(), Prompt::HandOver(summary));
    let again: Vec<i64> = game.players().iter().map(|p| p.funds()).collect();
    assert_eq!(funds, again);
}

#[test]
fn serialized_game_resumes_identically() {
    let mut game = Game::new(TableConfig::default(), 55).unwrap();
    let mut prompt = game.resume().unwrap();
    while let Prompt::HandOver(_) = prompt {
        prompt = game.proceed(Continue::NewMatch).unwrap();
    }
    let json = serde_json::to_string(&game).unwrap();
    let mut restored: Game = serde_json::from_str(&json).unwrap();
    assert_eq!(restored.resume().unwrap(), prompt);

    let legal = match &prompt {
        Prompt::AwaitAction { legal, .. } => legal.clone(),
        Prompt::HandOver(_) => unreachable!(),
    };
    let action = passive(&legal);
    let a = game.act(action).unwrap();
    let b = restored.act(action).unwrap();
    assert_eq!(a, b);
    assert_eq!(serde_json::to_string(&game).unwrap(), serde_json::to_string(&restored).unwrap());
}

#[test]
fn wrong_label_is_rejected_without_changes() {
    let mut game = Game::new(TableConfig::default(), 8).unwrap();
    let mut prompt = game.resume().unwrap();
    while let Prompt::HandOver(_) = prompt {
        prompt = game.proceed(Continue::NewMatch).unwrap();
    }
    let before = serde_json::to_string(&game).unwrap();
    assert!(game.act_str("shove everything").is_err());
    assert!(game.proceed(Continue::NextRound).is_err());
    assert_eq!(serde_json::to_string(&game).unwrap(), before);
    assert_eq!(game.resume().unwrap(), prompt);
}
