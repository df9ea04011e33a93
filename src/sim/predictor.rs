//! Next tile generation
//!
//! Low tiles (1, 2, 3) come from a shuffle bag so the player never waits
//! long for a partner. Once the game is long enough, a second bag with a
//! single trigger among fillers occasionally unlocks a bonus tile whose rank
//! tracks the best tile on the board.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::bag::ShuffleBag;
use super::board::{rank_of, value_of};
use crate::consts::*;
use crate::settings::GameConfig;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TileValuePredictor {
    numbers: ShuffleBag<u32>,
    special: ShuffleBag<u32>,
    bonus_move_threshold: u32,
}

impl TileValuePredictor {
    /// Predictor with the classic bag weights
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::from_config(&GameConfig::default(), rng)
    }

    pub fn from_config<R: Rng + ?Sized>(config: &GameConfig, rng: &mut R) -> Self {
        let mut numbers = ShuffleBag::new(config.number_randomness);
        for value in 1..=3 {
            numbers.add(value);
        }
        numbers.shuffle(rng);

        let mut special = ShuffleBag::new(1);
        special.add(SPECIAL_TRIGGER);
        for _ in 0..config.special_rareness {
            special.add(0);
        }
        special.shuffle(rng);

        Self {
            numbers,
            special,
            bonus_move_threshold: config.bonus_move_threshold,
        }
    }

    fn draw_number<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<u32> {
        let value = self.numbers.next(rng);
        if value.is_none() {
            log::warn!("number bag is empty, no tile to draw");
        }
        value
    }

    /// Draw the value of the next tile.
    ///
    /// The special bag is only consulted once `num_moves` passes the bonus
    /// threshold. The bonus quantity `highest_rank - 3` is deliberately left
    /// without a floor.
    pub fn next_raw_value<R: Rng + ?Sized>(
        &mut self,
        num_moves: u32,
        highest_rank: u32,
        rng: &mut R,
    ) -> Option<u32> {
        if num_moves <= self.bonus_move_threshold
            || self.special.next(rng) != Some(SPECIAL_TRIGGER)
        {
            return self.draw_number(rng);
        }

        let quantity = bonus_quantity(highest_rank);
        if quantity < 2 {
            return self.draw_number(rng);
        }
        if quantity < 4 {
            return Some(value_of(quantity as u32));
        }
        let rank = rng.random_range(4..=quantity);
        log::debug!("bonus tile rank {} (up to {})", rank, quantity);
        Some(value_of(rank as u32))
    }

    /// Candidates for the next tile.
    ///
    /// A low draw is shown exactly. A bonus draw expands into up to three
    /// neighbouring high values, one of which is picked at placement time.
    /// Empty only when the number bag is misconfigured.
    pub fn preview<R: Rng + ?Sized>(
        &mut self,
        num_moves: u32,
        highest_rank: u32,
        rng: &mut R,
    ) -> Vec<u32> {
        match self.next_raw_value(num_moves, highest_rank, rng) {
            Some(value) => preview_candidates(value),
            None => Vec::new(),
        }
    }

    pub fn numbers(&self) -> &ShuffleBag<u32> {
        &self.numbers
    }

    pub fn special(&self) -> &ShuffleBag<u32> {
        &self.special
    }
}

/// Signed, unclamped `highest_rank - 3`
#[inline]
pub fn bonus_quantity(highest_rank: u32) -> i32 {
    highest_rank as i32 - BONUS_RANK_DEMOTION
}

/// Expand a drawn value into the preview list
pub fn preview_candidates(value: u32) -> Vec<u32> {
    if value <= 3 {
        return vec![value];
    }
    let rank = rank_of(value);
    let count = (rank - 1).min(MAX_PREVIEW);
    (0..count)
        .map(|i| value_of((rank - 1 - i).clamp(1, MAX_PREVIEW_RANK) + 1))
        .collect()
}
