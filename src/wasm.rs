//! JavaScript bindings for browser front ends
//!
//! Directions cross the boundary as codes: 0 Up, 1 Down, 2 Left, 3 Right.

use wasm_bindgen::prelude::*;

use crate::settings::{GameConfig, InitialLayout};
use crate::sim::{Direction, GameSession};

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    // A second init (hot reload) is harmless
    let _ = console_log::init_with_level(log::Level::Info);
}

#[wasm_bindgen]
pub struct WasmGame(GameSession);

#[wasm_bindgen]
impl WasmGame {
    /// New classic game; pass a layout name ("classic" or "dealt") to override
    #[wasm_bindgen(constructor)]
    pub fn new(seed: Option<u64>, layout: Option<String>) -> Result<WasmGame, JsValue> {
        let layout = match layout {
            Some(name) => InitialLayout::from_str(&name)
                .ok_or_else(|| JsValue::from_str(&format!("unknown layout {}", name)))?,
            None => InitialLayout::Classic,
        };
        GameSession::try_new(GameConfig::with_layout(layout), seed)
            .map(Self)
            .map_err(|e| JsValue::from_str(&format!("{:#}", e)))
    }

    /// Returns true if the move was applied
    #[wasm_bindgen(js_name = tryMove)]
    pub fn try_move(&mut self, direction: u8) -> Result<bool, JsValue> {
        let direction = Direction::try_from(direction).map_err(|e| JsValue::from_str(&e))?;
        Ok(self.0.try_move(direction).applied)
    }

    #[wasm_bindgen(js_name = legalDirections)]
    pub fn legal_directions(&self) -> Vec<u8> {
        self.0
            .legal_directions()
            .into_iter()
            .map(u8::from)
            .collect()
    }

    #[wasm_bindgen(js_name = previewTiles)]
    pub fn preview_tiles(&self) -> Vec<u32> {
        self.0.preview_tiles().to_vec()
    }

    pub fn score(&self) -> u64 {
        self.0.score()
    }

    /// Row-major tile codes
    pub fn board(&self) -> Vec<u32> {
        self.0.board().cells().to_vec()
    }

    #[wasm_bindgen(js_name = boardSize)]
    pub fn board_size(&self) -> usize {
        self.0.board().size()
    }

    #[wasm_bindgen(js_name = isGameOver)]
    pub fn is_game_over(&self) -> bool {
        self.0.is_game_over()
    }

    #[wasm_bindgen(js_name = numMoves)]
    pub fn num_moves(&self) -> u32 {
        self.0.num_moves()
    }

    /// Start over; returns the seed in use
    pub fn reset(&mut self, seed: Option<u64>) -> u64 {
        let seed = self.0.reset(seed);
        log::info!("Game restarted with seed: {}", seed);
        seed
    }

    #[wasm_bindgen(js_name = boardJson)]
    pub fn board_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(self.0.board()).map_err(|e| JsValue::from_str(&e.to_string()))
    }
}
