//! Game session state machine
//!
//! A session owns the board, the tile predictor and the only RNG. Every
//! random decision is drawn from that RNG, so a seed plus a sequence of
//! directions replays a game exactly.

use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::board::{Board, Direction};
use super::moves::{self, MoveReport};
use super::predictor::TileValuePredictor;
use super::score;
use crate::settings::{GameConfig, InitialLayout};

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Accepting moves
    Active,
    /// No direction can move; terminal
    GameOver,
}

/// Tile dropped onto the board after a move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub row: usize,
    pub col: usize,
    pub value: u32,
}

/// Result of [`GameSession::try_move`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveOutcome {
    /// The move was legal and the board changed
    pub applied: bool,
    /// The session is over (either already, or as a result of this move)
    pub game_over: bool,
    /// Merges performed by the move
    pub merges: usize,
    /// Where the new tile went, if one was placed
    pub placed: Option<Placement>,
}

#[derive(Debug, Clone)]
pub struct GameSession {
    config: GameConfig,
    /// Seed of the current game
    seed: u64,
    rng: Pcg32,
    board: Board,
    predictor: TileValuePredictor,
    /// Candidates for the next tile, refreshed after every move
    preview: Vec<u32>,
    num_moves: u32,
    score: u64,
    phase: GamePhase,
}

impl GameSession {
    /// Start a game; `None` picks a fresh seed.
    ///
    /// Panics on a config that fails [`GameConfig::validate`]; use
    /// [`GameSession::try_new`] for configs from outside the program.
    pub fn new(config: GameConfig, seed: Option<u64>) -> Self {
        match Self::try_new(config, seed) {
            Ok(session) => session,
            Err(e) => panic!("invalid game config: {:#}", e),
        }
    }

    /// Validate `config`, then start a game
    pub fn try_new(config: GameConfig, seed: Option<u64>) -> anyhow::Result<Self> {
        config.validate()?;
        let seed = seed.unwrap_or_else(|| rand::rng().random());
        let mut rng = Pcg32::seed_from_u64(seed);
        let predictor = TileValuePredictor::from_config(&config, &mut rng);
        let mut session = Self {
            board: Board::new(config.board_size),
            config,
            seed,
            rng,
            predictor,
            preview: Vec::new(),
            num_moves: 0,
            score: 0,
            phase: GamePhase::Active,
        };

        session.seed_board();
        session.refresh_preview();
        session.score = score::score(&session.board);
        log::info!(
            "New game: seed={} layout={} size={}",
            seed,
            session.config.initial_layout.as_str(),
            session.config.board_size
        );
        Ok(session)
    }

    /// Classic layout on a 4x4 board
    pub fn with_seed(seed: u64) -> Self {
        Self::new(GameConfig::default(), Some(seed))
    }

    /// Throw the current game away and start over with the same config.
    ///
    /// Returns the seed of the new game.
    pub fn reset(&mut self, seed: Option<u64>) -> u64 {
        *self = Self::new(self.config.clone(), seed);
        self.seed
    }

    fn seed_board(&mut self) {
        match self.config.initial_layout {
            InitialLayout::Classic => {
                for value in [1, 1, 1, 2, 2] {
                    self.place_random(value);
                }
            }
            InitialLayout::Dealt { count } => {
                for _ in 0..count {
                    let value = self.rng.random_range(1..=3);
                    self.place_random(value);
                }
            }
        }
    }

    /// Drop a value on a uniformly chosen empty cell
    fn place_random(&mut self, value: u32) {
        let empty = self.board.empty_cells();
        if let Some(&(row, col)) = empty.choose(&mut self.rng) {
            self.board.set(row, col, value);
        } else {
            log::warn!("no empty cell for initial tile {}", value);
        }
    }

    fn refresh_preview(&mut self) {
        self.preview =
            self.predictor
                .preview(self.num_moves, self.board.highest_rank(), &mut self.rng);
    }

    /// Attempt a move. Illegal moves and moves after game over change nothing.
    pub fn try_move(&mut self, direction: Direction) -> MoveOutcome {
        if self.phase == GamePhase::GameOver {
            return MoveOutcome {
                game_over: true,
                ..MoveOutcome::default()
            };
        }

        let check = moves::check_move(&self.board, direction);
        if !check.is_legal() {
            log::trace!("{} is not possible", direction.as_str());
            return MoveOutcome::default();
        }

        self.num_moves += 1;
        let report: MoveReport = moves::apply_move(&mut self.board, &check);
        let placed = self.place_next_tile(direction);
        self.refresh_preview();
        self.score = score::score(&self.board);

        log::debug!(
            "move {} {}: merges={} placed={:?} score={}",
            self.num_moves,
            direction.as_str(),
            report.merges,
            placed,
            self.score
        );

        if self.legal_directions().is_empty() {
            self.phase = GamePhase::GameOver;
            log::info!(
                "Game over after {} moves, score {}, best tile {}",
                self.num_moves,
                self.score,
                self.board.highest_tile()
            );
        }

        MoveOutcome {
            applied: true,
            game_over: self.phase == GamePhase::GameOver,
            merges: report.merges,
            placed,
        }
    }

    /// Place one candidate from the preview on the edge the move came from
    fn place_next_tile(&mut self, direction: Direction) -> Option<Placement> {
        let size = self.board.size();
        let entry_edge: Vec<(usize, usize)> = (0..size)
            .map(|line| direction.cell(size, line, size - 1))
            .filter(|&(row, col)| self.board.get(row, col) == 0)
            .collect();

        let Some(&(row, col)) = entry_edge.choose(&mut self.rng) else {
            log::warn!("no free cell on the entry edge after {}", direction.as_str());
            return None;
        };
        let Some(&value) = self.preview.choose(&mut self.rng) else {
            log::warn!("preview is empty, skipping tile placement");
            return None;
        };

        self.board.set(row, col, value);
        Some(Placement { row, col, value })
    }

    /// Directions that would currently move something
    pub fn legal_directions(&self) -> Vec<Direction> {
        moves::legal_directions(&self.board)
    }

    /// Candidates for the tile the next move will place
    pub fn preview_tiles(&self) -> &[u32] {
        &self.preview
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn num_moves(&self) -> u32 {
        self.num_moves
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn highest_rank(&self) -> u32 {
        self.board.highest_rank()
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Session over an explicit board, for driving specific positions
    #[cfg(test)]
    pub(crate) fn with_board(board: Board, seed: u64) -> Self {
        let config = GameConfig {
            board_size: board.size(),
            ..GameConfig::default()
        };
        let mut session = Self::new(config, Some(seed));
        session.board = board;
        session.score = score::score(&session.board);
        session
    }

    /// Replace the pending preview list
    #[cfg(test)]
    pub(crate) fn set_preview(&mut self, preview: Vec<u32>) {
        self.preview = preview;
    }
}
