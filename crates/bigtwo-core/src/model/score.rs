use crate::model::player::PlayerPosition;

/// Running totals; every round is zero-sum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreBoard {
    totals: [i32; 4],
}

impl ScoreBoard {
    pub const fn new() -> Self {
        Self { totals: [0; 4] }
    }

    pub const fn from_totals(totals: [i32; 4]) -> Self {
        Self { totals }
    }

    pub fn score(&self, seat: PlayerPosition) -> i32 {
        self.totals[seat.index()]
    }

    pub fn standings(&self) -> &[i32; 4] {
        &self.totals
    }

    pub fn leading_player(&self) -> PlayerPosition {
        PlayerPosition::LOOP
            .iter()
            .copied()
            .max_by_key(|seat| (self.score(*seat), std::cmp::Reverse(seat.index())))
            .unwrap_or(PlayerPosition::North)
    }

    /// Losers pay one point per card still held; the winner collects the sum.
    pub fn apply_round(&mut self, winner: PlayerPosition, hand_sizes: [usize; 4]) -> [i32; 4] {
        let mut deltas = [0i32; 4];
        for seat in PlayerPosition::LOOP {
            if seat != winner {
                let penalty = hand_sizes[seat.index()] as i32;
                deltas[seat.index()] -= penalty;
                deltas[winner.index()] += penalty;
            }
        }
        for (total, delta) in self.totals.iter_mut().zip(deltas) {
            *total += delta;
        }
        deltas
    }
}
