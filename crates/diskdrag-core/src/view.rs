//! View transform between window pixels and scene coordinates.

use kurbo::{Affine, Point, Rect, Size, Vec2};
use serde::{Deserialize, Serialize};

/// Maps the scene rect into a window.
///
/// The scene is drawn at 1:1 logical scale (times the window's scale
/// factor). When the viewport is larger than the scene rect, the rect is
/// centred; otherwise it is pinned to the top-left corner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct View {
    /// Translation applied after scaling, in physical pixels.
    pub offset: Vec2,
    /// Physical pixels per scene unit.
    pub scale: f64,
}

impl Default for View {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            scale: 1.0,
        }
    }
}

impl View {
    /// Create an identity view.
    pub fn new() -> Self {
        Self::default()
    }

    /// Lay out `scene_rect` in a viewport of `viewport` physical pixels.
    pub fn fit(scene_rect: Rect, viewport: Size, scale_factor: f64) -> Self {
        let scale = if scale_factor > 0.0 { scale_factor } else { 1.0 };
        let free_x = (viewport.width - scene_rect.width() * scale).max(0.0);
        let free_y = (viewport.height - scene_rect.height() * scale).max(0.0);
        Self {
            offset: Vec2::new(
                free_x / 2.0 - scene_rect.x0 * scale,
                free_y / 2.0 - scene_rect.y0 * scale,
            ),
            scale,
        }
    }

    /// Scene-to-screen transform for rendering.
    pub fn transform(&self) -> Affine {
        Affine::translate(self.offset) * Affine::scale(self.scale)
    }

    /// Screen-to-scene transform for input handling.
    pub fn inverse_transform(&self) -> Affine {
        Affine::scale(1.0 / self.scale) * Affine::translate(-self.offset)
    }

    /// Convert a window point (physical pixels) to scene coordinates.
    pub fn screen_to_scene(&self, screen_point: Point) -> Point {
        self.inverse_transform() * screen_point
    }

    /// Convert a scene point to window coordinates (physical pixels).
    pub fn scene_to_screen(&self, scene_point: Point) -> Point {
        self.transform() * scene_point
    }
}
