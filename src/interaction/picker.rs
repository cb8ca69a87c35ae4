//! Pointer picking: screen coordinate → card.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::core::{CameraConfig, CardId, GameConfig};
use crate::session::SessionState;

/// Pointer position in pixels, origin at the top-left corner.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScreenPoint {
    pub x: f32,
    pub y: f32,
}

impl ScreenPoint {
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Size of the drawing surface in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn aspect(&self) -> f32 {
        self.width / self.height
    }

    /// Normalized device coordinates: x and y in `[-1, 1]`, y up.
    #[must_use]
    pub fn to_ndc(&self, point: ScreenPoint) -> Vec2 {
        Vec2::new(
            (point.x / self.width) * 2.0 - 1.0,
            -(point.y / self.height) * 2.0 + 1.0,
        )
    }

    /// Inverse of [`Viewport::to_ndc`].
    #[must_use]
    pub fn screen_from_ndc(&self, ndc: Vec2) -> ScreenPoint {
        ScreenPoint::new(
            (ndc.x + 1.0) / 2.0 * self.width,
            (1.0 - ndc.y) / 2.0 * self.height,
        )
    }
}

/// Resolves a click to the card under the pointer.
pub trait Picker {
    /// Card hit by a click at `point`, or `None` if the click hit nothing.
    fn pick(&self, point: ScreenPoint, viewport: Viewport, state: &SessionState) -> Option<CardId>;
}

/// Ray picking against card faces seen through a perspective camera.
///
/// The camera sits at `(0, 0, position_z)` looking down -z. Each card is
/// treated as an axis-aligned rectangle in the plane `z = card.z`; the
/// nearest card under the ray wins.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PerspectivePicker {
    camera: CameraConfig,
    half_extents: Vec2,
}

impl PerspectivePicker {
    #[must_use]
    pub fn new(camera: CameraConfig, half_extents: Vec2) -> Self {
        Self {
            camera,
            half_extents,
        }
    }

    #[must_use]
    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.camera, Vec2::from(config.card_half_extents()))
    }

    fn tan_half_fov(&self) -> f32 {
        (self.camera.fov_y_deg.to_radians() / 2.0).tan()
    }

    /// Point where the ray through `ndc` crosses the plane at depth `z`.
    ///
    /// `None` when the plane is not in front of the camera.
    #[must_use]
    pub fn unproject(&self, ndc: Vec2, aspect: f32, z: f32) -> Option<Vec2> {
        let distance = self.camera.position_z - z;
        if distance < self.camera.near || distance > self.camera.far {
            return None;
        }
        let tan = self.tan_half_fov();
        Some(Vec2::new(ndc.x * tan * aspect * distance, ndc.y * tan * distance))
    }

    /// Screen position of a world point.
    ///
    /// `None` when the point is not in front of the camera.
    #[must_use]
    pub fn project(&self, world: Vec3, viewport: Viewport) -> Option<ScreenPoint> {
        let distance = self.camera.position_z - world.z;
        if distance < self.camera.near || distance > self.camera.far {
            return None;
        }
        let tan = self.tan_half_fov();
        let ndc = Vec2::new(
            world.x / (tan * viewport.aspect() * distance),
            world.y / (tan * distance),
        );
        Some(viewport.screen_from_ndc(ndc))
    }
}

impl Picker for PerspectivePicker {
    fn pick(&self, point: ScreenPoint, viewport: Viewport, state: &SessionState) -> Option<CardId> {
        let ndc = viewport.to_ndc(point);
        let aspect = viewport.aspect();

        let mut best: Option<(f32, CardId)> = None;
        for card in state.cards() {
            let Some(hit) = self.unproject(ndc, aspect, card.position.z) else {
                continue;
            };
            let offset = (hit - card.position.truncate()).abs();
            if offset.x > self.half_extents.x || offset.y > self.half_extents.y {
                continue;
            }
            if best.map_or(true, |(z, _)| card.position.z > z) {
                best = Some((card.position.z, card.id));
            }
        }
        best.map(|(_, id)| id)
    }
}
