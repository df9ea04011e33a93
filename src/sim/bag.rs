//! Shuffle bag: weighted random sequence without long droughts
//!
//! Every item is copied `randomness` times into a pool. The pool is shuffled
//! and walked with a cursor; when the cursor runs off the end the pool is
//! reshuffled. Within one pass each item appears exactly `randomness` times.
//! Nothing prevents the same item from being drawn twice across a reshuffle.

use std::fmt;

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShuffleBag<T> {
    /// Distinct draws, in insertion order (duplicates allowed)
    items: Vec<T>,
    /// Each item repeated `randomness` times
    pool: Vec<T>,
    randomness: usize,
    cursor: usize,
}

impl<T: Clone> ShuffleBag<T> {
    pub fn new(randomness: usize) -> Self {
        Self {
            items: Vec::new(),
            pool: Vec::new(),
            randomness,
            cursor: 0,
        }
    }

    /// Append an item and rebuild the pool.
    ///
    /// The rebuilt pool is in insertion order; call [`ShuffleBag::shuffle`]
    /// before the first draw.
    pub fn add(&mut self, item: T) {
        self.items.push(item);
        self.rebuild_pool();
    }

    /// Drop all items and the pool
    pub fn clear(&mut self) {
        self.items.clear();
        self.pool.clear();
        self.cursor = 0;
    }

    fn rebuild_pool(&mut self) {
        self.pool = self
            .items
            .iter()
            .flat_map(|item| std::iter::repeat_n(item.clone(), self.randomness))
            .collect();
        self.cursor = 0;
    }

    /// Fisher-Yates over the pool, cursor back to the start
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.pool.shuffle(rng);
        self.cursor = 0;
    }

    /// Draw the item under the cursor.
    ///
    /// Reaching the end of the pool triggers a reshuffle; the item returned
    /// is always the one read before the cursor advanced. `None` when the
    /// bag holds nothing.
    pub fn next<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<T> {
        let item = self.pool.get(self.cursor)?.clone();
        self.cursor += 1;
        if self.cursor >= self.pool.len() {
            self.shuffle(rng);
        }
        Some(item)
    }

    /// Remaining draws of the current pass followed by the ones already made
    pub fn upcoming(&self) -> impl Iterator<Item = &T> {
        self.pool[self.cursor..]
            .iter()
            .chain(self.pool[..self.cursor].iter())
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn randomness(&self) -> usize {
        self.randomness
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Pool length (items x randomness)
    pub fn len(&self) -> usize {
        self.pool.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pool.is_empty()
    }
}

impl<T: Clone + fmt::Display> fmt::Display for ShuffleBag<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}-{} ", self.cursor, self.randomness)?;
        for item in self.upcoming() {
            write!(f, "{},", item)?;
        }
        write!(f, ")")
    }
}
