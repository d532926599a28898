use crate::model::card::Card;
use crate::model::combination::Combination;
use crate::model::player::PlayerPosition;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone)]
pub struct Trick {
    leader: PlayerPosition,
    plays: Vec<Play>,
}

/// One turn within a trick. No cards means a pass.
///
/// Serialises as `[player_no, [codes...]]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(PlayerPosition, Vec<Card>)", into = "(PlayerPosition, Vec<Card>)")]
pub struct Play {
    pub position: PlayerPosition,
    pub cards: Vec<Card>,
}

impl Play {
    pub fn new(position: PlayerPosition, cards: Vec<Card>) -> Self {
        Self { position, cards }
    }

    pub fn pass(position: PlayerPosition) -> Self {
        Self {
            position,
            cards: Vec::new(),
        }
    }

    pub fn is_pass(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn combination(&self) -> Combination {
        Combination::new(self.cards.clone())
    }
}

impl From<(PlayerPosition, Vec<Card>)> for Play {
    fn from((position, cards): (PlayerPosition, Vec<Card>)) -> Self {
        Self { position, cards }
    }
}

impl From<Play> for (PlayerPosition, Vec<Card>) {
    fn from(play: Play) -> Self {
        (play.position, play.cards)
    }
}

#[derive(Debug, Clone, Error)]
pub enum TrickError {
    #[error("trick already closed")]
    TrickClosed,
    #[error("expected {expected} to play next but got {actual}")]
    OutOfTurn {
        expected: PlayerPosition,
        actual: PlayerPosition,
    },
    #[error("{0} cannot pass while leading")]
    PassOnLead(PlayerPosition),
    #[error("{0} is not a valid combination")]
    InvalidCombination(Combination),
    #[error("{played} does not beat {best}")]
    DoesNotBeat {
        played: Combination,
        best: Combination,
    },
}

/// Combinations inside errors compare by their cards, so invalid plays are
/// equal to themselves.
impl PartialEq for TrickError {
    fn eq(&self, other: &Self) -> bool {
        use TrickError::*;
        match (self, other) {
            (TrickClosed, TrickClosed) => true,
            (
                OutOfTurn { expected, actual },
                OutOfTurn {
                    expected: other_expected,
                    actual: other_actual,
                },
            ) => expected == other_expected && actual == other_actual,
            (PassOnLead(a), PassOnLead(b)) => a == b,
            (InvalidCombination(a), InvalidCombination(b)) => a.cards() == b.cards(),
            (
                DoesNotBeat { played, best },
                DoesNotBeat {
                    played: other_played,
                    best: other_best,
                },
            ) => played.cards() == other_played.cards() && best.cards() == other_best.cards(),
            _ => false,
        }
    }
}

impl Eq for TrickError {}

impl Trick {
    pub fn new(leader: PlayerPosition) -> Self {
        Self {
            leader,
            plays: Vec::with_capacity(4),
        }
    }

    pub fn leader(&self) -> PlayerPosition {
        self.leader
    }

    pub fn plays(&self) -> &[Play] {
        &self.plays
    }

    pub fn is_empty(&self) -> bool {
        self.plays.is_empty()
    }

    /// Latest non-pass play; every accepted play beats the one before it.
    pub fn best(&self) -> Option<&Play> {
        self.plays.iter().rev().find(|play| !play.is_pass())
    }

    /// Combination the next player has to beat, `None` on a free lead.
    pub fn to_beat(&self) -> Option<Combination> {
        self.best().map(Play::combination)
    }

    /// Play has come back round to the holder of the best play.
    pub fn is_closed(&self) -> bool {
        self.best()
            .is_some_and(|best| best.position == self.expected_position())
    }

    pub fn expected_position(&self) -> PlayerPosition {
        self.plays
            .last()
            .map(|play| play.position.next())
            .unwrap_or(self.leader)
    }

    pub fn play(&mut self, position: PlayerPosition, cards: Vec<Card>) -> Result<(), TrickError> {
        if self.is_closed() {
            return Err(TrickError::TrickClosed);
        }

        let expected = self.expected_position();
        if expected != position {
            return Err(TrickError::OutOfTurn {
                expected,
                actual: position,
            });
        }

        if cards.is_empty() {
            if self.best().is_none() {
                return Err(TrickError::PassOnLead(position));
            }
            self.plays.push(Play::pass(position));
            return Ok(());
        }

        let played = Combination::new(cards);
        if !played.is_valid() {
            return Err(TrickError::InvalidCombination(played));
        }
        if let Some(best) = self.to_beat() {
            if !played.beats(&best) {
                return Err(TrickError::DoesNotBeat { played, best });
            }
        }

        self.plays.push(Play::new(position, played.into_cards()));
        Ok(())
    }

    pub fn winner(&self) -> Option<PlayerPosition> {
        if !self.is_closed() {
            return None;
        }
        self.best().map(|play| play.position)
    }
}
