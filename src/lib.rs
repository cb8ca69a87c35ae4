//! # memorama
//!
//! Engine-independent core of a 3D memory-matching card game.
//!
//! Cards are 3D models laid out in a grid and flipped by pointer clicks;
//! two face-up cards with the same pair index stay up, anything else turns
//! back after a short reveal pause. Find every pair to win.
//!
//! ## Design Principles
//!
//! 1. **Renderer-Agnostic**: Scene graph, lighting, model loading, and the
//!    frame loop belong to the rendering engine. The core only sees the
//!    `Picker`, `Animator`, and `Presenter` seams.
//!
//! 2. **Deterministic**: Dealing uses a seeded ChaCha8 stream and the
//!    reveal pause runs on a virtual-time `TimerQueue`, so a seed plus a
//!    click history reproduces a session exactly.
//!
//! 3. **Single Owner**: All mutable state lives in one `SessionState`,
//!    passed explicitly to the `MatchStateMachine`.
//!
//! ## Modules
//!
//! - `core`: Card ids, RNG, configuration, errors, click records
//! - `cards`: Pair catalog, card identities and entities, pair selection
//! - `layout`: Grid placement arithmetic
//! - `timer`: Virtual-time one-shot timers
//! - `session`: Session state, match state machine, events
//! - `interaction`: Picking, animation, and notification seams
//! - `game`: Session controller tying it all together
//!
//! ## Example
//!
//! ```
//! use memorama::{CardIdentity, GameConfig, MemoramaBuilder};
//!
//! let mut game = MemoramaBuilder::new()
//!     .config(GameConfig::default().with_total_pairs(2))
//!     .build(42)
//!     .unwrap();
//!
//! let a = game.card_loaded(CardIdentity::primary(0)).unwrap();
//! let b = game.card_loaded(CardIdentity::counterpart(0)).unwrap();
//!
//! game.click_card(a);
//! game.click_card(b);
//! game.advance(1000);
//!
//! assert_eq!(game.state().pairs_found(), 1);
//! ```

pub mod core;
pub mod cards;
pub mod layout;
pub mod timer;
pub mod session;
pub mod interaction;
pub mod game;

// Re-export commonly used types
pub use crate::core::{
    CardId, ClickOutcome, ClickRecord, GameConfig, GameRng, IgnoreReason, MemoramaError, Result,
};

pub use crate::cards::{AssetRef, CardEntity, CardIdentity, PairCatalog, PairDefinition};

pub use crate::layout::GridLayout;

pub use crate::timer::TimerQueue;

pub use crate::session::{Judgement, MatchPhase, MatchStateMachine, SessionEvent, SessionState};

pub use crate::interaction::{
    Animator, FlipCommand, PerspectivePicker, Picker, Presenter, ScreenPoint, Viewport,
};

pub use crate::game::{BackgroundRequest, LoadRequest, Memorama, MemoramaBuilder};
