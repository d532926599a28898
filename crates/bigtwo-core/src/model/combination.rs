use crate::model::card::{Card, CardError};
use core::fmt;
use std::cmp::Ordering;

/// Play categories in ascending strength. Five-card categories start at `Straight`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Single,
    Pair,
    Triple,
    Straight,
    Flush,
    FullHouse,
    FourOfAKind,
    StraightFlush,
}

impl Category {
    pub const fn as_str(self) -> &'static str {
        match self {
            Category::Single => "single",
            Category::Pair => "pair",
            Category::Triple => "triple",
            Category::Straight => "straight",
            Category::Flush => "flush",
            Category::FullHouse => "full_house",
            Category::FourOfAKind => "four_of_a_kind",
            Category::StraightFlush => "straight_flush",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A set of cards played as one unit ("trick" in table talk).
///
/// Cards are kept sorted by value. The category is derived from the cards on
/// every call and never cached. Combinations of different sizes, or with no
/// valid category, are incomparable: `<`, `==` and `>` are all false.
#[derive(Debug, Clone, Default)]
pub struct Combination {
    cards: Vec<Card>,
}

impl Combination {
    pub fn new(cards: impl Into<Vec<Card>>) -> Self {
        let mut cards = cards.into();
        cards.sort();
        Self { cards }
    }

    pub fn from_codes<S: AsRef<str>>(codes: &[S]) -> Result<Self, CardError> {
        Card::parse_all(codes).map(Self::new)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn into_cards(self) -> Vec<Card> {
        self.cards
    }

    pub fn contains(&self, card: Card) -> bool {
        self.cards.contains(&card)
    }

    pub fn category(&self) -> Option<Category> {
        analyse(&self.cards).map(|(category, _)| category)
    }

    pub fn is_valid(&self) -> bool {
        self.category().is_some()
    }

    /// Copy in canonical order: the pair ahead of the triple for a full house,
    /// the kicker ahead of the quad for four of a kind. Other combinations
    /// keep value order.
    pub fn normalized(&self) -> Combination {
        match analyse(&self.cards) {
            Some((_, cards)) => Combination { cards },
            None => self.clone(),
        }
    }

    /// Last card of the canonical ordering; decides ties within a category.
    pub fn key_card(&self) -> Option<Card> {
        analyse(&self.cards).and_then(|(_, cards)| cards.last().copied())
    }

    pub fn beats(&self, other: &Combination) -> bool {
        self > other
    }

    pub fn codes(&self) -> Vec<String> {
        self.cards.iter().map(|card| card.code()).collect()
    }

    pub fn value_total(&self) -> u32 {
        self.cards.iter().map(|card| u32::from(card.value())).sum()
    }

    /// Mean card value, `0.0` for an empty combination.
    pub fn average_value(&self) -> f64 {
        if self.cards.is_empty() {
            return 0.0;
        }
        f64::from(self.value_total()) / self.cards.len() as f64
    }
}

impl From<Vec<Card>> for Combination {
    fn from(cards: Vec<Card>) -> Self {
        Combination::new(cards)
    }
}

impl PartialEq for Combination {
    fn eq(&self, other: &Self) -> bool {
        self.partial_cmp(other) == Some(Ordering::Equal)
    }
}

impl PartialOrd for Combination {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self.len() != other.len() {
            return None;
        }
        let (mine, my_cards) = analyse(&self.cards)?;
        let (theirs, their_cards) = analyse(&other.cards)?;
        if mine != theirs {
            return Some(mine.cmp(&theirs));
        }

        let my_key = my_cards.last()?;
        let their_key = their_cards.last()?;
        if mine == Category::Flush {
            return Some(
                my_key
                    .suit
                    .cmp(&their_key.suit)
                    .then_with(|| my_key.cmp(their_key)),
            );
        }
        Some(my_key.cmp(their_key))
    }
}

impl fmt::Display for Combination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (idx, card) in self.cards.iter().enumerate() {
            if idx > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{card}")?;
        }
        f.write_str("]")
    }
}

/// Classifies value-sorted cards and returns them in canonical order.
fn analyse(cards: &[Card]) -> Option<(Category, Vec<Card>)> {
    let category = match cards.len() {
        1 => Category::Single,
        2 if same_rank(cards) => Category::Pair,
        3 if same_rank(cards) => Category::Triple,
        5 => return analyse_five(cards),
        _ => return None,
    };
    Some((category, cards.to_vec()))
}

fn analyse_five(cards: &[Card]) -> Option<(Category, Vec<Card>)> {
    let straight = cards
        .windows(2)
        .all(|pair| pair[1].rank_index() == pair[0].rank_index() + 1);
    let flush = cards.iter().all(|card| card.suit == cards[0].suit);
    match (straight, flush) {
        (true, true) => return Some((Category::StraightFlush, cards.to_vec())),
        (true, false) => return Some((Category::Straight, cards.to_vec())),
        (false, true) => return Some((Category::Flush, cards.to_vec())),
        (false, false) => {}
    }

    if let Some(ordered) = split_by_rank(cards, 3, true) {
        return Some((Category::FullHouse, ordered));
    }
    split_by_rank(cards, 4, false).map(|ordered| (Category::FourOfAKind, ordered))
}

/// Finds the first `size`-card subset sharing a rank and returns the
/// remaining cards followed by the subset. With `rest_matches` the remainder
/// must share a rank too.
fn split_by_rank(cards: &[Card], size: usize, rest_matches: bool) -> Option<Vec<Card>> {
    for indices in IndexCombinations::new(cards.len(), size) {
        let group: Vec<Card> = indices.iter().map(|&idx| cards[idx]).collect();
        if !same_rank(&group) {
            continue;
        }
        let rest: Vec<Card> = cards
            .iter()
            .enumerate()
            .filter(|(idx, _)| !indices.contains(idx))
            .map(|(_, card)| *card)
            .collect();
        if rest_matches && !same_rank(&rest) {
            continue;
        }
        let mut ordered = rest;
        ordered.extend(group);
        return Some(ordered);
    }
    None
}

fn same_rank(cards: &[Card]) -> bool {
    cards.windows(2).all(|pair| pair[0].rank == pair[1].rank)
}

/// Lexicographic `k`-subsets of `0..n`.
pub(crate) struct IndexCombinations {
    n: usize,
    indices: Vec<usize>,
    started: bool,
    done: bool,
}

impl IndexCombinations {
    pub(crate) fn new(n: usize, k: usize) -> Self {
        Self {
            n,
            indices: (0..k).collect(),
            started: false,
            done: k == 0 || k > n,
        }
    }
}

impl Iterator for IndexCombinations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        if !self.started {
            self.started = true;
            return Some(self.indices.clone());
        }

        let k = self.indices.len();
        let mut pivot = k;
        loop {
            if pivot == 0 {
                self.done = true;
                return None;
            }
            pivot -= 1;
            if self.indices[pivot] != pivot + self.n - k {
                break;
            }
        }
        self.indices[pivot] += 1;
        for idx in pivot + 1..k {
            self.indices[idx] = self.indices[idx - 1] + 1;
        }
        Some(self.indices.clone())
    }
}
