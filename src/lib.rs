//! Threes Sim - A tile-merging puzzle simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (board, moves, tile generation, session)
//! - `settings`: Session configuration
//! - `wasm`: JavaScript bindings (wasm32 only)

pub mod settings;
pub mod sim;
#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use settings::{GameConfig, InitialLayout};
pub use sim::{Direction, GamePhase, GameSession, MoveOutcome};

/// Game configuration constants
pub mod consts {
    /// Default board edge length (the classic game is 4x4)
    pub const BOARD_SIZE: usize = 4;

    /// Copies of each low value in one pass of the number bag
    pub const NUMBER_RANDOMNESS: usize = 4;
    /// `0` fillers next to the single trigger in the special bag
    pub const SPECIAL_RARENESS: usize = 20;
    /// Value drawn from the special bag that unlocks a bonus tile
    pub const SPECIAL_TRIGGER: u32 = 1;
    /// Bonus tiles never appear on or before this move
    pub const BONUS_MOVE_THRESHOLD: u32 = 21;
    /// Ranks between the board's best tile and the best possible bonus
    pub const BONUS_RANK_DEMOTION: i32 = 3;

    /// Maximum number of candidates shown for a bonus tile
    pub const MAX_PREVIEW: u32 = 3;
    /// Highest rank a preview candidate is derived from
    pub const MAX_PREVIEW_RANK: u32 = 11;

    /// Tiles seeded by the dealt opening layout
    pub const DEALT_TILE_COUNT: usize = 9;
}
