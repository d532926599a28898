use crate::model::card::Card;
use crate::model::combination::Combination;
use crate::model::hand::Hand;
use crate::model::player::PlayerPosition;
use crate::model::trick::Play;
use serde::{Deserialize, Serialize};

/// Everything a decision policy is told when it is asked to play.
///
/// `play_to_beat` is empty on a free lead. `round_history` holds one entry
/// per trick of the current round, the last one being the trick in progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayRequest {
    pub hand: Vec<Card>,
    pub is_start_of_round: bool,
    #[serde(default)]
    pub play_to_beat: Vec<Card>,
    #[serde(default)]
    pub round_history: Vec<Vec<Play>>,
    pub player_no: PlayerPosition,
    pub hand_sizes: [usize; 4],
    #[serde(default)]
    pub scores: [i32; 4],
    #[serde(default)]
    pub round_no: u32,
}

impl PlayRequest {
    /// A fresh request for a free lead with no history.
    pub fn leading(hand: Vec<Card>, player_no: PlayerPosition, hand_sizes: [usize; 4]) -> Self {
        Self {
            hand,
            is_start_of_round: false,
            play_to_beat: Vec::new(),
            round_history: Vec::new(),
            player_no,
            hand_sizes,
            scores: [0; 4],
            round_no: 0,
        }
    }

    pub fn is_leading(&self) -> bool {
        self.play_to_beat.is_empty()
    }

    pub fn hand(&self) -> Hand {
        Hand::with_cards(self.hand.clone())
    }

    pub fn target(&self) -> Combination {
        Combination::new(self.play_to_beat.clone())
    }

    pub fn own_hand_size(&self) -> usize {
        self.hand_sizes[self.player_no.index()]
    }

    pub fn opponent_hand_sizes(&self) -> impl Iterator<Item = usize> + '_ {
        PlayerPosition::LOOP
            .iter()
            .filter(move |seat| **seat != self.player_no)
            .map(move |seat| self.hand_sizes[seat.index()])
    }

    /// Every card already played this round, in play order.
    pub fn played_cards(&self) -> impl Iterator<Item = Card> + '_ {
        self.round_history
            .iter()
            .flatten()
            .flat_map(|play| play.cards.iter().copied())
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
