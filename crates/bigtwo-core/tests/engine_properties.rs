use bigtwo_core::model::beat::{BeatMode, Strategy};
use bigtwo_core::model::card::Card;
use bigtwo_core::model::combination::{Category, Combination};
use bigtwo_core::model::deck::Deck;
use bigtwo_core::model::hand::Hand;
use bigtwo_core::model::partition::{Partition, SizePlan};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

const SCENARIO_HAND: [&str; 11] = [
    "6D", "6C", "8D", "8H", "0C", "JD", "QC", "QH", "KH", "KS", "AD",
];

fn combo(codes: &[&str]) -> Combination {
    Combination::from_codes(codes).unwrap()
}

fn codes(partition: &Partition) -> Vec<Vec<String>> {
    partition.iter().map(Combination::codes).collect()
}

#[test]
fn card_values_form_a_permutation() {
    let mut seen = [false; 52];
    for card in Card::all() {
        let value = card.value();
        assert!(!seen[usize::from(value)], "duplicate value {value}");
        seen[usize::from(value)] = true;
        assert_eq!(Card::from_value(value).unwrap(), card);
        assert_eq!(card.code().parse::<Card>().unwrap(), card);
    }
    assert!(seen.iter().all(|flag| *flag));
}

#[test]
fn sorting_any_shuffle_restores_ascending_values() {
    let mut rng = StdRng::seed_from_u64(20251017);
    for _ in 0..16 {
        let mut cards = Deck::standard().cards().to_vec();
        cards.shuffle(&mut rng);
        let hand = Hand::with_cards(cards);
        let values: Vec<u8> = hand.iter().map(|card| card.value()).collect();
        assert_eq!(values, (0..52).collect::<Vec<u8>>());
    }
}

#[test]
fn classifier_examples() {
    assert_eq!(combo(&["3D", "3C"]).category(), Some(Category::Pair));
    assert_eq!(combo(&["3D", "4C"]).category(), None);
    assert_eq!(
        combo(&["3D", "4D", "5D", "6D", "7D"]).category(),
        Some(Category::StraightFlush)
    );
    assert_eq!(
        combo(&["3D", "3C", "3H", "4D", "4C"]).category(),
        Some(Category::FullHouse)
    );
    assert_eq!(
        combo(&["3D", "3C", "3H", "3S", "4D"]).category(),
        Some(Category::FourOfAKind)
    );
}

#[test]
fn flush_outranks_straight_and_suit_breaks_flush_ties() {
    let straight = combo(&["4D", "5C", "6D", "7H", "8D"]);
    let flush = combo(&["3D", "5D", "6D", "9D", "JD"]);
    assert!(flush > straight);
    assert!(straight < flush);

    let spade_flush = combo(&["3S", "5S", "6S", "9S", "AS"]);
    let heart_flush = combo(&["4H", "5H", "8H", "9H", "AH"]);
    assert!(spade_flush > heart_flush);
    let low_spades = combo(&["3S", "4S", "6S", "8S", "9S"]);
    assert!(low_spades > heart_flush);
}

#[test]
fn different_sizes_are_incomparable() {
    let single = combo(&["2S"]);
    let pair = combo(&["3D", "3C"]);
    assert!(single.partial_cmp(&pair).is_none());
    assert!(!(single < pair) && !(single > pair) && single != pair);
}

#[test]
fn decomposition_is_deterministic_and_disjoint() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..32 {
        let mut cards = Deck::standard().cards().to_vec();
        cards.shuffle(&mut rng);
        cards.truncate(13);
        let hand = Hand::with_cards(cards);

        let first = Partition::decompose(hand.cards(), SizePlan::UpTo(5));
        let second = Partition::decompose(hand.cards(), SizePlan::UpTo(5));
        assert_eq!(codes(&first), codes(&second));

        let mut used: Vec<Card> = first
            .iter()
            .flat_map(|combo| combo.cards().iter().copied())
            .chain(first.unused().iter().copied())
            .collect();
        used.sort();
        assert_eq!(used, hand.cards());
        assert!(first.iter().all(Combination::is_valid));
    }
}

#[test]
fn weakest_and_strongest_bracket_every_beating_single() {
    let hand = Hand::from_codes(&SCENARIO_HAND).unwrap();
    let partition = Partition::decompose(hand.cards(), SizePlan::Exact(1));
    let target = combo(&["9S"]);
    let beating: Vec<&Combination> = partition.beating(&target).collect();
    assert!(beating.len() > 1);

    let weakest = partition.pick_beating(&target, BeatMode::Weakest).unwrap();
    let strongest = partition.pick_beating(&target, BeatMode::Strongest).unwrap();
    for other in &beating {
        assert!(*weakest <= **other);
        assert!(*strongest >= **other);
    }
    assert_eq!(weakest.codes(), vec!["0C"]);
    assert_eq!(strongest.codes(), vec!["AD"]);
}

#[test]
fn scenario_hand_partitions_into_straight_pairs_and_singles() {
    let hand = Hand::from_codes(&SCENARIO_HAND).unwrap();
    let strategy = Strategy::organise(hand, SizePlan::UpTo(5));
    assert_eq!(
        codes(strategy.partition()),
        vec![
            vec!["0C", "JD", "QC", "KH", "AD"],
            vec!["6D", "6C"],
            vec!["8D", "8H"],
            vec!["QH"],
            vec!["KS"],
        ]
    );
    assert_eq!(
        strategy.partition().first().map(Combination::category),
        Some(Some(Category::Straight))
    );
}

#[test]
fn scenario_hand_answers_a_low_single() {
    let hand = Hand::from_codes(&SCENARIO_HAND).unwrap();
    let target = combo(&["4D"]);
    let mut strategy = Strategy::organise(hand.clone(), SizePlan::UpTo(5));
    let weakest = strategy.beats(&target, BeatMode::for_table(&[7, 13, 13, 9], 1));
    assert_eq!(weakest.map(|c| c.codes()), Some(vec!["QH".to_string()]));

    let mut strategy = Strategy::organise(hand, SizePlan::UpTo(5));
    let strongest = strategy.beats(&target, BeatMode::Strongest);
    assert_eq!(strongest.map(|c| c.codes()), Some(vec!["KS".to_string()]));
}
