use crate::game::round::RoundState;
use crate::model::deck::Deck;
use crate::model::player::PlayerPosition;
use crate::model::score::ScoreBoard;
use rand::SeedableRng;
use rand::rngs::StdRng;

/// A sequence of rounds dealt from one seeded generator.
#[derive(Debug, Clone)]
pub struct MatchState {
    scores: ScoreBoard,
    wins: [u32; 4],
    round_number: u32,
    current_round: RoundState,
    rng: StdRng,
    seed: u64,
}

impl MatchState {
    pub fn new() -> Self {
        Self::with_seed(rand::random())
    }

    pub fn with_seed(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let deck = Deck::shuffled(&mut rng);
        Self {
            scores: ScoreBoard::new(),
            wins: [0; 4],
            round_number: 0,
            current_round: RoundState::deal(&deck),
            rng,
            seed,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn scores(&self) -> &ScoreBoard {
        &self.scores
    }

    pub fn wins(&self) -> &[u32; 4] {
        &self.wins
    }

    pub fn round(&self) -> &RoundState {
        &self.current_round
    }

    pub fn round_mut(&mut self) -> &mut RoundState {
        &mut self.current_round
    }

    /// Zero-based index of the round in progress.
    pub fn round_number(&self) -> u32 {
        self.round_number
    }

    /// Scores the finished round and deals the next one. Returns the score
    /// deltas, or `None` while nobody has emptied their hand yet.
    pub fn finish_round_and_start_next(&mut self) -> Option<(PlayerPosition, [i32; 4])> {
        let winner = self.current_round.winner()?;
        let deltas = self
            .scores
            .apply_round(winner, self.current_round.hand_sizes());
        self.wins[winner.index()] += 1;
        self.round_number += 1;

        let deck = Deck::shuffled(&mut self.rng);
        self.current_round = RoundState::deal(&deck);
        Some((winner, deltas))
    }
}

impl Default for MatchState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::MatchState;
    use crate::game::round::THREE_OF_DIAMONDS;

    #[test]
    fn same_seed_deals_same_hands() {
        let a = MatchState::with_seed(77);
        let b = MatchState::with_seed(77);
        assert_eq!(a.seed(), 77);
        assert_eq!(a.round().starting_player(), b.round().starting_player());
        assert_eq!(
            a.round().hand(a.round().starting_player()),
            b.round().hand(b.round().starting_player())
        );
    }

    #[test]
    fn unfinished_round_is_not_scored() {
        let mut state = MatchState::with_seed(3);
        assert!(state.finish_round_and_start_next().is_none());
        assert_eq!(state.round_number(), 0);
        assert_eq!(state.scores().standings(), &[0; 4]);
    }

    #[test]
    fn finished_round_is_scored_and_redealt() {
        let mut state = MatchState::with_seed(11);
        let starter = state.round().starting_player();
        let hand: Vec<_> = state.round().hand(starter).cards().to_vec();

        // Lead singles from the starter's hand while everybody else passes.
        let mut remaining = hand.clone();
        remaining.retain(|card| *card != THREE_OF_DIAMONDS);
        remaining.insert(0, THREE_OF_DIAMONDS);
        for card in remaining {
            let round = state.round_mut();
            round.play(starter, vec![card]).unwrap();
            if round.is_finished() {
                break;
            }
            let mut seat = starter.next();
            while seat != starter {
                round.play(seat, vec![]).unwrap();
                seat = seat.next();
            }
        }

        let (winner, deltas) = state.finish_round_and_start_next().unwrap();
        assert_eq!(winner, starter);
        assert_eq!(deltas[starter.index()], 39);
        assert_eq!(state.scores().standings().iter().sum::<i32>(), 0);
        assert_eq!(state.wins()[starter.index()], 1);
        assert_eq!(state.round_number(), 1);
        assert_eq!(state.round().hand_sizes(), [13; 4]);
    }
}
