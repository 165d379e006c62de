//! Vello-based renderer implementation.

use crate::renderer::{RenderContext, Renderer, ShapeRenderer, disk_transform};
use diskdrag_core::shapes::{Disk, ShapeTrait};
use kurbo::{Affine, Stroke};
use peniko::Fill;
use vello::Scene;

/// Vello-based renderer for GPU-accelerated 2D graphics.
pub struct VelloRenderer {
    /// The Vello scene being built.
    scene: Scene,
}

impl Default for VelloRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl VelloRenderer {
    /// Create a new renderer.
    pub fn new() -> Self {
        Self {
            scene: Scene::new(),
        }
    }

    /// Hand over the scene built by the last `build_scene` call.
    pub fn take_scene(&mut self) -> Scene {
        std::mem::take(&mut self.scene)
    }
}

impl Renderer for VelloRenderer {
    fn build_scene(&mut self, ctx: &RenderContext) {
        self.scene.reset();

        if let Some(color) = ctx.scene_rect_color {
            self.scene.stroke(
                &Stroke::new(1.0),
                Affine::IDENTITY,
                color,
                None,
                &ctx.scene_rect_on_screen(),
            );
        }

        // Groups have no geometry; only their members are drawn.
        for (disk, origin) in ctx.scene.disks_ordered() {
            self.render_disk(disk, disk_transform(&ctx.view, origin, disk));
        }
    }
}

impl ShapeRenderer for VelloRenderer {
    fn render_disk(&mut self, disk: &Disk, transform: Affine) {
        let path = disk.to_path();
        let style = disk.style();

        if let Some(fill_color) = style.fill() {
            self.scene
                .fill(Fill::NonZero, transform, fill_color, None, &path);
        }

        let stroke = Stroke::new(style.stroke_width);
        self.scene
            .stroke(&stroke, transform, style.stroke(), None, &path);
    }
}
