//! Interaction gateway and presentation seams.
//!
//! - `Picker`: resolves a pointer click to a card
//! - `Animator`, `Presenter`: fire-and-forget commands to the renderer
//!
//! The match state machine depends only on these traits, so it runs and
//! tests without any rendering engine present.

mod picker;
mod presentation;

pub use picker::{PerspectivePicker, Picker, ScreenPoint, Viewport};
pub use presentation::{
    Animator, FlipCommand, NullAnimator, NullPresenter, Placeholder, Presenter, RecordingAnimator,
    RecordingPresenter,
};
