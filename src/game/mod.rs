//! Memorama session controller.
//!
//! Wires the pair selector, grid layout, match state machine, and timer
//! queue to the frontend's loader, picker, animator, and presenter:
//!
//! 1. `MemoramaBuilder::build` deals pairs and lists the models to load
//! 2. the frontend reports each load via `card_loaded` / `card_load_failed`
//! 3. clicks arrive via `click_at` (screen space) or `click_card`
//! 4. `advance` moves the virtual clock and judges full rounds

mod memorama;

pub use memorama::{BackgroundRequest, LoadRequest, Memorama, MemoramaBuilder};
