use crate::game::request::PlayRequest;
use crate::model::card::Card;
use crate::model::deck::Deck;
use crate::model::hand::Hand;
use crate::model::player::PlayerPosition;
use crate::model::rank::Rank;
use crate::model::score::ScoreBoard;
use crate::model::suit::Suit;
use crate::model::trick::{Play, Trick, TrickError};
use thiserror::Error;

pub const THREE_OF_DIAMONDS: Card = Card::new(Rank::Three, Suit::Diamonds);

#[derive(Debug, Clone)]
pub struct RoundState {
    hands: [Hand; 4],
    current_trick: Trick,
    trick_history: Vec<Trick>,
    starting_player: PlayerPosition,
    winner: Option<PlayerPosition>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayOutcome {
    Played,
    TrickCompleted { winner: PlayerPosition },
    RoundWon { winner: PlayerPosition },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlayError {
    #[error("round already won by {0}")]
    RoundOver(PlayerPosition),
    #[error("{seat} does not hold all of the played cards")]
    CardsNotHeld { seat: PlayerPosition },
    #[error("the first play of the round must contain 3D")]
    MustIncludeThreeOfDiamonds,
    #[error(transparent)]
    Trick(#[from] TrickError),
}

impl RoundState {
    /// Deals thirteen cards per seat; whoever holds 3D leads.
    pub fn deal(deck: &Deck) -> Self {
        let hands = deck.deal();
        Self::from_hands(hands)
    }

    pub fn from_hands(hands: [Hand; 4]) -> Self {
        let starting_player = PlayerPosition::LOOP
            .iter()
            .copied()
            .find(|seat| hands[seat.index()].contains(THREE_OF_DIAMONDS))
            .unwrap_or(PlayerPosition::North);

        Self {
            hands,
            current_trick: Trick::new(starting_player),
            trick_history: Vec::new(),
            starting_player,
            winner: None,
        }
    }

    pub fn hand(&self, seat: PlayerPosition) -> &Hand {
        &self.hands[seat.index()]
    }

    pub fn hand_sizes(&self) -> [usize; 4] {
        std::array::from_fn(|idx| self.hands[idx].len())
    }

    pub fn current_trick(&self) -> &Trick {
        &self.current_trick
    }

    pub fn trick_history(&self) -> &[Trick] {
        &self.trick_history
    }

    pub fn starting_player(&self) -> PlayerPosition {
        self.starting_player
    }

    pub fn current_player(&self) -> PlayerPosition {
        self.current_trick.expected_position()
    }

    /// Nobody has played yet this round.
    pub fn is_start_of_round(&self) -> bool {
        self.trick_history.is_empty() && self.current_trick.is_empty()
    }

    pub fn winner(&self) -> Option<PlayerPosition> {
        self.winner
    }

    pub fn is_finished(&self) -> bool {
        self.winner.is_some()
    }

    /// Completed tricks followed by the trick in progress.
    pub fn history(&self) -> Vec<Vec<Play>> {
        self.trick_history
            .iter()
            .chain(std::iter::once(&self.current_trick))
            .map(|trick| trick.plays().to_vec())
            .collect()
    }

    pub fn request_for(
        &self,
        seat: PlayerPosition,
        scores: &ScoreBoard,
        round_no: u32,
    ) -> PlayRequest {
        let play_to_beat = self
            .current_trick
            .best()
            .map(|play| play.cards.clone())
            .unwrap_or_default();
        PlayRequest {
            hand: self.hand(seat).cards().to_vec(),
            is_start_of_round: self.is_start_of_round(),
            play_to_beat,
            round_history: self.history(),
            player_no: seat,
            hand_sizes: self.hand_sizes(),
            scores: *scores.standings(),
            round_no,
        }
    }

    pub fn play(&mut self, seat: PlayerPosition, cards: Vec<Card>) -> Result<PlayOutcome, PlayError> {
        if let Some(winner) = self.winner {
            return Err(PlayError::RoundOver(winner));
        }

        if !self.hands[seat.index()].contains_all(&cards) {
            return Err(PlayError::CardsNotHeld { seat });
        }

        if self.is_start_of_round() && !cards.is_empty() && !cards.contains(&THREE_OF_DIAMONDS) {
            return Err(PlayError::MustIncludeThreeOfDiamonds);
        }

        self.current_trick.play(seat, cards.clone())?;
        let removed = self.hands[seat.index()].remove_all(&cards);
        debug_assert!(removed, "held cards checked before the trick accepted them");

        if self.hands[seat.index()].is_empty() {
            self.winner = Some(seat);
            return Ok(PlayOutcome::RoundWon { winner: seat });
        }

        match self.current_trick.winner() {
            Some(winner) => {
                self.complete_trick(winner);
                Ok(PlayOutcome::TrickCompleted { winner })
            }
            None => Ok(PlayOutcome::Played),
        }
    }

    fn complete_trick(&mut self, next_leader: PlayerPosition) {
        let finished = std::mem::replace(&mut self.current_trick, Trick::new(next_leader));
        self.trick_history.push(finished);
    }
}

#[cfg(test)]
mod tests {
    use super::{PlayError, PlayOutcome, RoundState, THREE_OF_DIAMONDS};
    use crate::model::card::Card;
    use crate::model::deck::Deck;
    use crate::model::hand::Hand;
    use crate::model::player::PlayerPosition;
    use crate::model::score::ScoreBoard;
    use crate::model::trick::TrickError;

    fn hand(codes: &[&str]) -> Hand {
        Hand::from_codes(codes).unwrap()
    }

    fn cards(codes: &[&str]) -> Vec<Card> {
        Card::parse_all(codes).unwrap()
    }

    fn small_round() -> RoundState {
        RoundState::from_hands([
            hand(&["4D", "9S"]),
            hand(&["3D", "3C", "KH"]),
            hand(&["5C", "2S"]),
            hand(&["6H", "7H"]),
        ])
    }

    #[test]
    fn dealing_distributes_thirteen_cards_per_player() {
        let round = RoundState::deal(&Deck::shuffled_with_seed(5));
        assert_eq!(round.hand_sizes(), [13; 4]);
        assert!(round.is_start_of_round());
        assert!(round.hand(round.starting_player()).contains(THREE_OF_DIAMONDS));
        assert_eq!(round.current_player(), round.starting_player());
    }

    #[test]
    fn first_play_must_contain_three_of_diamonds() {
        let mut round = small_round();
        assert_eq!(round.starting_player(), PlayerPosition::East);
        assert_eq!(
            round.play(PlayerPosition::East, cards(&["KH"])),
            Err(PlayError::MustIncludeThreeOfDiamonds)
        );
        assert_eq!(
            round.play(PlayerPosition::East, cards(&["3D", "3C"])),
            Ok(PlayOutcome::Played)
        );
        assert!(!round.is_start_of_round());
    }

    #[test]
    fn cards_must_be_held() {
        let mut round = small_round();
        assert_eq!(
            round.play(PlayerPosition::East, cards(&["3D", "3H"])),
            Err(PlayError::CardsNotHeld { seat: PlayerPosition::East })
        );
    }

    #[test]
    fn accepted_plays_leave_the_hand_and_rejected_ones_do_not() {
        let mut round = small_round();
        round.play(PlayerPosition::East, cards(&["3D", "3C"])).unwrap();
        assert_eq!(round.hand(PlayerPosition::East), &hand(&["KH"]));

        assert!(matches!(
            round.play(PlayerPosition::South, cards(&["5C", "2S"])),
            Err(PlayError::Trick(_))
        ));
        assert_eq!(round.hand(PlayerPosition::South), &hand(&["5C", "2S"]));
        assert_eq!(round.hand_sizes(), [2, 1, 2, 2]);
    }

    #[test]
    fn trick_passes_to_best_player_and_round_ends_on_empty_hand() {
        let mut round = small_round();
        round.play(PlayerPosition::East, cards(&["3D"])).unwrap();
        round.play(PlayerPosition::South, cards(&["5C"])).unwrap();
        round.play(PlayerPosition::West, vec![]).unwrap();
        round.play(PlayerPosition::North, vec![]).unwrap();
        assert_eq!(
            round.play(PlayerPosition::East, vec![]),
            Ok(PlayOutcome::TrickCompleted { winner: PlayerPosition::South })
        );
        assert_eq!(round.trick_history().len(), 1);
        assert_eq!(round.current_player(), PlayerPosition::South);

        let scores = ScoreBoard::new();
        let request = round.request_for(PlayerPosition::South, &scores, 3);
        assert!(request.is_leading());
        assert_eq!(request.round_history.len(), 2);
        assert_eq!(request.hand_sizes, [2, 2, 1, 2]);
        assert_eq!(
            round.play(PlayerPosition::South, vec![]),
            Err(PlayError::Trick(TrickError::PassOnLead(PlayerPosition::South)))
        );
        assert_eq!(
            round.play(PlayerPosition::South, cards(&["2S"])),
            Ok(PlayOutcome::RoundWon { winner: PlayerPosition::South })
        );
        assert_eq!(round.winner(), Some(PlayerPosition::South));
        assert_eq!(
            round.play(PlayerPosition::West, cards(&["6H"])),
            Err(PlayError::RoundOver(PlayerPosition::South))
        );
    }

    #[test]
    fn request_reports_play_to_beat() {
        let mut round = small_round();
        round.play(PlayerPosition::East, cards(&["3D", "3C"])).unwrap();
        let request = round.request_for(PlayerPosition::South, &ScoreBoard::new(), 0);
        assert_eq!(request.play_to_beat, cards(&["3D", "3C"]));
        assert!(!request.is_start_of_round);
        assert_eq!(request.played_cards().count(), 2);
    }
}
