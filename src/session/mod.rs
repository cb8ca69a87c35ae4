//! Session state, the match state machine, and session events.

mod state;
mod machine;
mod event;

pub use state::{MatchPhase, SessionState};
pub use machine::{Judgement, MatchStateMachine, PendingEvaluation};
pub use event::SessionEvent;
