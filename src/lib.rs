use wasm_bindgen::prelude::*;

pub mod board;
pub mod game;
pub mod moves;
pub mod notation;
pub mod types;
pub mod wasm;

#[wasm_bindgen]
pub fn wasm_ready() -> bool {
    true
}
