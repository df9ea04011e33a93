//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only, owned by the session
//! - No I/O on the move path
//! - No rendering or platform dependencies

pub mod autoplay;
pub mod bag;
pub mod board;
pub mod moves;
pub mod predictor;
pub mod score;
pub mod state;

pub use autoplay::{Policy, choose_direction};
pub use bag::ShuffleBag;
pub use board::{Board, Direction, rank_of, value_of};
pub use moves::{MoveCheck, MoveReport, apply_move, can_merge, check_move, legal_directions};
pub use predictor::{TileValuePredictor, preview_candidates};
pub use score::score;
pub use state::{GamePhase, GameSession, MoveOutcome, Placement};
