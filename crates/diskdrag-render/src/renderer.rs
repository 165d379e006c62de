//! Renderer trait abstraction.

use diskdrag_core::scene::Scene;
use diskdrag_core::shapes::Disk;
use diskdrag_core::view::View;
use kurbo::{Affine, Point, Rect, Size};
use peniko::Color;
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Initialization failed: {0}")]
    InitFailed(String),
    #[error("Render failed: {0}")]
    RenderFailed(String),
    #[error("Surface error: {0}")]
    Surface(String),
}

/// Context for a single render frame.
pub struct RenderContext<'a> {
    /// The scene to render.
    pub scene: &'a Scene,
    /// Scene-to-window mapping.
    pub view: View,
    /// Viewport size in physical pixels.
    pub viewport_size: Size,
    /// Background color.
    pub background_color: Color,
    /// Outline drawn around the scene rect (None = no outline).
    pub scene_rect_color: Option<Color>,
}

impl<'a> RenderContext<'a> {
    /// Create a new render context that fits the scene rect into the viewport.
    pub fn new(scene: &'a Scene, viewport_size: Size) -> Self {
        Self {
            scene,
            view: View::fit(scene.scene_rect, viewport_size, 1.0),
            viewport_size,
            background_color: Color::WHITE,
            scene_rect_color: Some(Color::from_rgba8(220, 220, 220, 255)),
        }
    }

    /// Refit the view for a HiDPI scale factor.
    pub fn with_scale_factor(mut self, scale_factor: f64) -> Self {
        self.view = View::fit(self.scene.scene_rect, self.viewport_size, scale_factor);
        self
    }

    /// Set the background color.
    pub fn with_background(mut self, color: Color) -> Self {
        self.background_color = color;
        self
    }

    /// Scene rect in window coordinates.
    pub fn scene_rect_on_screen(&self) -> Rect {
        let rect = self.scene.scene_rect;
        Rect::from_points(
            self.view.scene_to_screen(rect.origin()),
            self.view.scene_to_screen(Point::new(rect.x1, rect.y1)),
        )
    }
}

/// Trait for rendering backends.
pub trait Renderer {
    /// Build the drawing commands for a frame.
    fn build_scene(&mut self, ctx: &RenderContext);

    /// Get the background color (for clearing).
    fn background_color(&self, ctx: &RenderContext) -> Color {
        ctx.background_color
    }
}

/// Helper trait for disk rendering (used internally by renderers).
pub trait ShapeRenderer {
    /// Render a disk with the transform of its parent frame.
    fn render_disk(&mut self, disk: &Disk, transform: Affine);
}

/// Transform placing a disk's local geometry in the window.
pub fn disk_transform(view: &View, parent_origin: Point, disk: &Disk) -> Affine {
    view.transform() * Affine::translate(parent_origin.to_vec2() + disk.position().to_vec2())
}

#[cfg(test)]
mod tests {
    use super::*;
    use diskdrag_core::DemoKind;

    #[test]
    fn test_context_centres_scene_rect() {
        let scene = DemoKind::SingleDisk.build().unwrap();
        let ctx = RenderContext::new(&scene, Size::new(450.0, 350.0));
        assert_eq!(ctx.scene_rect_on_screen(), Rect::new(100.0, 50.0, 350.0, 300.0));
    }

    #[test]
    fn test_disk_transform_places_local_origin() {
        let scene = DemoKind::SingleDisk.build().unwrap();
        let (disk, origin) = scene.disks_ordered().next().unwrap();
        let transform = disk_transform(&View::new(), origin, disk);
        assert_eq!(transform * Point::ZERO, Point::new(50.0, 50.0));
    }
}
