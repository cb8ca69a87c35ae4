//! Seams to the rendering engine.
//!
//! The engine owns the scene graph, camera, lights, and frame loop. The
//! core talks to it only through these two traits:
//!
//! - `Animator`: play the flip tween for a card
//! - `Presenter`: user-visible notifications (win, failed card)
//!
//! Both are fire-and-forget. The core never waits for an animation to end.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::cards::CardIdentity;
use crate::core::CardId;

/// A flip tween: rotate about Y from one angle to another.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FlipCommand {
    pub card: CardId,
    pub from_rotation: f32,
    pub to_rotation: f32,
    pub duration_ms: u64,
    /// Face state once the tween completes.
    pub face_up: bool,
}

/// Plays card flip animations.
pub trait Animator {
    fn flip(&mut self, command: FlipCommand);
}

/// Shows user-visible notifications.
pub trait Presenter {
    /// Every pair has been found. Called exactly once per session.
    fn announce_win(&mut self, pairs_found: u32);

    /// A card's model failed to load. The card will never be clickable.
    fn show_placeholder(&mut self, identity: CardIdentity, position: Vec3, reason: &str) {
        let _ = (identity, position, reason);
    }
}

/// Animator that drops every command.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullAnimator;

impl Animator for NullAnimator {
    fn flip(&mut self, _command: FlipCommand) {}
}

/// Presenter that drops every notification.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullPresenter;

impl Presenter for NullPresenter {
    fn announce_win(&mut self, _pairs_found: u32) {}
}

/// Animator that keeps every command it receives.
#[derive(Clone, Debug, Default)]
pub struct RecordingAnimator {
    pub commands: Vec<FlipCommand>,
}

impl RecordingAnimator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands issued for one card, oldest first.
    pub fn for_card(&self, card: CardId) -> impl Iterator<Item = &FlipCommand> {
        self.commands.iter().filter(move |c| c.card == card)
    }
}

impl Animator for RecordingAnimator {
    fn flip(&mut self, command: FlipCommand) {
        self.commands.push(command);
    }
}

/// A placeholder request captured by `RecordingPresenter`.
#[derive(Clone, Debug, PartialEq)]
pub struct Placeholder {
    pub identity: CardIdentity,
    pub position: Vec3,
    pub reason: String,
}

/// Presenter that keeps every notification it receives.
#[derive(Clone, Debug, Default)]
pub struct RecordingPresenter {
    /// `pairs_found` of each win announcement.
    pub wins: Vec<u32>,
    pub placeholders: Vec<Placeholder>,
}

impl RecordingPresenter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Presenter for RecordingPresenter {
    fn announce_win(&mut self, pairs_found: u32) {
        self.wins.push(pairs_found);
    }

    fn show_placeholder(&mut self, identity: CardIdentity, position: Vec3, reason: &str) {
        self.placeholders.push(Placeholder {
            identity,
            position,
            reason: reason.to_string(),
        });
    }
}

impl<T: Animator + ?Sized> Animator for &mut T {
    fn flip(&mut self, command: FlipCommand) {
        (**self).flip(command);
    }
}

impl<T: Presenter + ?Sized> Presenter for &mut T {
    fn announce_win(&mut self, pairs_found: u32) {
        (**self).announce_win(pairs_found);
    }

    fn show_placeholder(&mut self, identity: CardIdentity, position: Vec3, reason: &str) {
        (**self).show_placeholder(identity, position, reason);
    }
}
