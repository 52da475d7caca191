use headsup_holdem::cards::parse_cards;
use headsup_holdem::equity::{EquityError, EquityEstimator};
use headsup_holdem::hand::HoleCards;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

#[test]
fn pocket_aces_preflop_win_about_85_percent() {
    let hole: HoleCards = "Ah As".parse().unwrap();
    let estimator = EquityEstimator::new(100);
    let runs = 30u64;
    let total: u64 = (0..runs)
        .map(|seed| {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            u64::from(estimator.win_percentage(&hole, &[], &mut rng).unwrap())
        })
        .sum();
    let average = total / runs;
    assert!((80..=90).contains(&average), "average {average}");
}

#[test]
fn same_seed_same_estimate() {
    let hole: HoleCards = "7d 2c".parse().unwrap();
    let board = parse_cards("Kh 9s 3d").unwrap();
    let estimator = EquityEstimator::new(100);
    let a = estimator.win_percentage(&hole, &board, &mut ChaCha8Rng::seed_from_u64(8)).unwrap();
    let b = estimator.win_percentage(&hole, &board, &mut ChaCha8Rng::seed_from_u64(8)).unwrap();
    assert_eq!(a, b);
    assert!(a <= 100);
}

#[test]
fn weak_hand_loses_to_strong_hand_on_average() {
    let estimator = EquityEstimator::new(200);
    let mut rng = ChaCha8Rng::seed_from_u64(99);
    let weak = estimator.win_percentage(&"7d 2c".parse().unwrap(), &[], &mut rng).unwrap();
    let strong = estimator.win_percentage(&"Kd Kc".parse().unwrap(), &[], &mut rng).unwrap();
    assert!(strong > weak + 30, "strong {strong} weak {weak}");
}

#[test]
fn rejects_overlapping_cards() {
    let hole: HoleCards = "Ah As".parse().unwrap();
    let board = parse_cards("Ah 2c 3d").unwrap();
    let err = EquityEstimator::new(10).win_percentage(&hole, &board, &mut ChaCha8Rng::seed_from_u64(0));
    assert!(matches!(err, Err(EquityError::InvalidCards(_))));
}

#[test]
fn full_board_still_estimates() {
    let hole: HoleCards = "Ah Kh".parse().unwrap();
    let board = parse_cards("Qh Jh Th 2c 3d").unwrap();
    let pct = EquityEstimator::new(40).win_percentage(&hole, &board, &mut ChaCha8Rng::seed_from_u64(4)).unwrap();
    assert_eq!(pct, 100);
}
