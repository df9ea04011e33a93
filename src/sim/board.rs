//! Board grid and tile value helpers
//!
//! A cell holds a tile code: `0` is empty, `1` and `2` are the low special
//! tiles, and everything else is a rank tile `3 * 2^(rank - 1)`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Direction the tiles travel toward
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "Up",
            Direction::Down => "Down",
            Direction::Left => "Left",
            Direction::Right => "Right",
        }
    }

    /// Cell at `depth` steps from the destination edge along `line`.
    ///
    /// Lines are columns for vertical moves and rows for horizontal ones.
    #[inline]
    pub fn cell(&self, size: usize, line: usize, depth: usize) -> (usize, usize) {
        match self {
            Direction::Up => (depth, line),
            Direction::Down => (size - 1 - depth, line),
            Direction::Left => (line, depth),
            Direction::Right => (line, size - 1 - depth),
        }
    }

    /// Board-axis coordinate (row or column) of a depth along the move.
    ///
    /// The mapping is its own inverse, so it also turns a coordinate back
    /// into a depth.
    #[inline]
    pub fn axis_position(&self, size: usize, depth: usize) -> usize {
        match self {
            Direction::Up | Direction::Left => depth,
            Direction::Down | Direction::Right => size - 1 - depth,
        }
    }

}

impl TryFrom<u8> for Direction {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Direction::Up),
            1 => Ok(Direction::Down),
            2 => Ok(Direction::Left),
            3 => Ok(Direction::Right),
            _ => Err(format!("invalid direction code {}", code)),
        }
    }
}

impl From<Direction> for u8 {
    fn from(direction: Direction) -> u8 {
        match direction {
            Direction::Up => 0,
            Direction::Down => 1,
            Direction::Left => 2,
            Direction::Right => 3,
        }
    }
}

/// Rank of a tile code (0 for empty and the low tiles)
#[inline]
pub fn rank_of(code: u32) -> u32 {
    if code < 3 {
        return 0;
    }
    let mut value = code;
    let mut rank = 1;
    while value > 3 {
        value /= 2;
        rank += 1;
    }
    rank
}

/// Tile code of a rank: `3 * 2^(rank - 1)`
#[inline]
pub fn value_of(rank: u32) -> u32 {
    assert!(rank >= 1, "rank tiles start at rank 1");
    match 1u32.checked_shl(rank - 1).and_then(|p| p.checked_mul(3)) {
        Some(value) => value,
        None => panic!("rank {} does not fit a tile code", rank),
    }
}

/// Square grid of tile codes, row-major
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    size: usize,
    cells: Vec<u32>,
}

impl Board {
    /// Empty `size` x `size` board
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![0; size * size],
        }
    }

    /// Build a board from literal rows
    pub fn from_rows<const N: usize>(rows: [[u32; N]; N]) -> Self {
        Self {
            size: N,
            cells: rows.iter().flatten().copied().collect(),
        }
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    fn index(&self, row: usize, col: usize) -> usize {
        assert!(
            row < self.size && col < self.size,
            "cell ({}, {}) outside {}x{} board",
            row,
            col,
            self.size,
            self.size
        );
        row * self.size + col
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> u32 {
        self.cells[self.index(row, col)]
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, code: u32) {
        let i = self.index(row, col);
        self.cells[i] = code;
    }

    pub fn cells(&self) -> &[u32] {
        &self.cells
    }

    pub fn rows(&self) -> impl Iterator<Item = &[u32]> {
        self.cells.chunks(self.size)
    }

    /// Highest rank on the board (0 when only low tiles are present)
    pub fn highest_rank(&self) -> u32 {
        self.cells.iter().map(|&c| rank_of(c)).max().unwrap_or(0)
    }

    pub fn highest_tile(&self) -> u32 {
        self.cells.iter().copied().max().unwrap_or(0)
    }

    pub fn count_empty(&self) -> usize {
        self.cells.iter().filter(|&&c| c == 0).count()
    }

    /// Non-empty cells
    pub fn tile_count(&self) -> usize {
        self.cells.len() - self.count_empty()
    }

    /// Coordinates of every empty cell, row-major
    pub fn empty_cells(&self) -> Vec<(usize, usize)> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| **c == 0)
            .map(|(i, _)| (i / self.size, i % self.size))
            .collect()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.highest_tile().to_string().len().max(1);
        for row in self.rows() {
            let line: Vec<String> = row
                .iter()
                .map(|&c| match c {
                    0 => format!("{:>width$}", ".", width = width),
                    c => format!("{:>width$}", c, width = width),
                })
                .collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}
