use wasm_bindgen::prelude::*;

use crate::game::Game;
use crate::types::Position;

/// Driver-facing handle around [`Game`] for the web front end.
#[wasm_bindgen]
pub struct WasmGame {
    inner: Game,
}

#[wasm_bindgen]
impl WasmGame {
    /// Fresh game with the standard setup, Red to move.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self { inner: Game::new() }
    }

    /// Serialized [`GameState`](crate::types::GameState) snapshot.
    pub fn state(&self) -> Result<JsValue, JsValue> {
        to_js(&self.inner.to_game_state())
    }

    /// Submits a candidate move. `Ok` carries the serialized
    /// [`MoveOutcome`](crate::types::MoveOutcome), `Err` the serialized
    /// rejection code.
    pub fn submit_move(
        &mut self,
        from_row: u8,
        from_col: u8,
        to_row: u8,
        to_col: u8,
    ) -> Result<JsValue, JsValue> {
        let from = Position::new(from_row, from_col);
        let to = Position::new(to_row, to_col);
        match self.inner.submit_move(from, to) {
            Ok(outcome) => to_js(&outcome),
            Err(reason) => {
                let code = to_js(&reason)?;
                Err(code)
            }
        }
    }

    /// Serialized jump list for the side to move; non-empty means the driver
    /// should show its "jump mandatory" notice.
    pub fn legal_jumps(&self) -> Result<JsValue, JsValue> {
        to_js(&self.inner.legal_jumps())
    }

    pub fn legal_simple_moves(&self) -> Result<JsValue, JsValue> {
        to_js(&self.inner.legal_simple_moves())
    }

    pub fn winner(&self) -> Result<JsValue, JsValue> {
        to_js(&self.inner.winner())
    }
}

impl Default for WasmGame {
    fn default() -> Self {
        Self::new()
    }
}

fn to_js<T: serde::Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|err| JsValue::from_str(&err.to_string()))
}
