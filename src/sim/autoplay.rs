//! Automatic move selection
//!
//! Lets a driver play without a human: the CLI uses it to run seeded games
//! and an RL harness can use it as a baseline. Policies only ever pick from
//! the legal directions, so a `None` means the game is over.

use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

use super::board::{Board, Direction};
use super::moves;
use super::state::GameSession;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[cfg_attr(not(target_arch = "wasm32"), derive(clap::ValueEnum))]
pub enum Policy {
    /// Uniform over legal directions
    Random,
    /// Best immediate board, ties broken at random
    #[default]
    Greedy,
}

impl Policy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Policy::Random => "random",
            Policy::Greedy => "greedy",
        }
    }
}

/// Heuristic value of a board after a move: free cells first, then merges,
/// then keeping the best tile in a corner
fn evaluate(board: &Board, merges: usize) -> i64 {
    let size = board.size();
    let best = board.highest_tile();
    let corners = [(0, 0), (0, size - 1), (size - 1, 0), (size - 1, size - 1)];
    let cornered = corners.iter().any(|&(r, c)| board.get(r, c) == best);

    board.count_empty() as i64 * 100 + merges as i64 * 40 + if cornered { 25 } else { 0 }
}

/// Pick a direction for the session's current board
pub fn choose_direction<R: Rng + ?Sized>(
    session: &GameSession,
    policy: Policy,
    rng: &mut R,
) -> Option<Direction> {
    let board = session.board();
    let legal = session.legal_directions();

    match policy {
        Policy::Random => legal.choose(rng).copied(),
        Policy::Greedy => {
            let scored: Vec<(Direction, i64)> = legal
                .iter()
                .map(|&direction| {
                    let mut next = board.clone();
                    let check = moves::check_move(&next, direction);
                    let report = moves::apply_move(&mut next, &check);
                    (direction, evaluate(&next, report.merges))
                })
                .collect();
            let best = scored.iter().map(|&(_, value)| value).max()?;
            let candidates: Vec<Direction> = scored
                .into_iter()
                .filter(|&(_, value)| value == best)
                .map(|(direction, _)| direction)
                .collect();
            candidates.choose(rng).copied()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_policies_only_choose_legal_moves() {
        let mut rng = Pcg32::seed_from_u64(8);
        for policy in [Policy::Random, Policy::Greedy] {
            let mut session = GameSession::with_seed(321);
            while let Some(direction) = choose_direction(&session, policy, &mut rng) {
                assert!(session.legal_directions().contains(&direction));
                assert!(session.try_move(direction).applied);
                if session.num_moves() > 5_000 {
                    break;
                }
            }
            assert!(session.is_game_over());
        }
    }

    #[test]
    fn test_greedy_prefers_merging() {
        let board = Board::from_rows([
            [3, 3, 6, 12],
            [24, 48, 96, 192],
            [6, 12, 24, 48],
            [0, 0, 0, 0],
        ]);
        let session = GameSession::with_board(board, 1);
        let mut rng = Pcg32::seed_from_u64(2);
        // Left/Right merge the 3s, Down only slides; merging frees more cells
        let direction = choose_direction(&session, Policy::Greedy, &mut rng).unwrap();
        assert!(matches!(direction, Direction::Left | Direction::Right));
    }

    #[test]
    fn test_policy_names() {
        use clap::ValueEnum;

        assert_eq!(Policy::from_str("greedy", true), Ok(Policy::Greedy));
        assert_eq!(Policy::from_str("RANDOM", true), Ok(Policy::Random));
        assert!(Policy::from_str("expectimax", true).is_err());
        assert_eq!(Policy::Greedy.as_str(), "greedy");
    }
}
