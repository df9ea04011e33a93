//! Board scoring: every rank tile is worth `3^rank`, low tiles nothing

use super::board::{Board, rank_of};

pub fn score(board: &Board) -> u64 {
    board
        .cells()
        .iter()
        .filter(|&&code| code >= 3)
        .map(|&code| 3u64.pow(rank_of(code)))
        .sum()
}
