//! Draggable disk.

use super::{GroupId, SerializableColor, ShapeId, ShapeStyle, ShapeTrait};
use crate::drag::{DragResponse, PointerTarget, displacement};
use crate::scene::SceneError;
use kurbo::{BezPath, Ellipse as KurboEllipse, Point, Rect, Shape as KurboShape};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A filled disk that follows pointer drags.
///
/// Local geometry always starts at the origin; `position` is the offset of
/// the top-left corner in the parent frame. A broadcasting disk forwards its
/// drag displacement to its owning group instead of moving itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Disk {
    pub(crate) id: ShapeId,
    /// Top-left corner in parent coordinates.
    position: Point,
    /// Width and height of the bounding square.
    size: f64,
    broadcasts_to_group: bool,
    /// Owning group, if any. Set when the disk is added to a group.
    pub(crate) owner: Option<GroupId>,
    style: ShapeStyle,
}

impl Disk {
    /// Fill for disks that move on their own.
    pub const LOCAL_FILL: SerializableColor = SerializableColor::red();
    /// Fill for disks that move their whole group.
    pub const BROADCAST_FILL: SerializableColor = SerializableColor::green();

    /// Create a locally draggable disk with its top-left corner at (x, y).
    pub fn new(x: f64, y: f64, size: f64) -> Self {
        Self::with_mode(x, y, size, false)
    }

    /// Create a disk that moves its owning group when dragged.
    pub fn broadcasting(x: f64, y: f64, size: f64) -> Self {
        Self::with_mode(x, y, size, true)
    }

    fn with_mode(x: f64, y: f64, size: f64, broadcasts_to_group: bool) -> Self {
        let fill = if broadcasts_to_group {
            Self::BROADCAST_FILL
        } else {
            Self::LOCAL_FILL
        };
        Self {
            id: Uuid::new_v4(),
            position: Point::new(x, y),
            size,
            broadcasts_to_group,
            owner: None,
            style: ShapeStyle::filled(fill),
        }
    }

    /// Top-left corner in parent coordinates.
    pub fn position(&self) -> Point {
        self.position
    }

    /// Move the top-left corner (parent coordinates).
    pub fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    /// Top-left corner in scene coordinates, given the parent frame's origin.
    pub fn scene_position(&self, parent_origin: Point) -> Point {
        parent_origin + self.position.to_vec2()
    }

    /// Place the top-left corner at a scene position, given the parent frame's origin.
    pub fn set_scene_position(&mut self, scene_position: Point, parent_origin: Point) {
        self.position = scene_position - parent_origin.to_vec2();
    }

    pub fn size(&self) -> f64 {
        self.size
    }

    pub fn broadcasts_to_group(&self) -> bool {
        self.broadcasts_to_group
    }

    pub fn owner(&self) -> Option<GroupId> {
        self.owner
    }

    /// Local geometry, anchored at the origin.
    pub fn local_rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.size, self.size)
    }
}

impl ShapeTrait for Disk {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn bounds(&self) -> Rect {
        self.local_rect() + self.position.to_vec2()
    }

    fn hit_test(&self, point: Point) -> bool {
        let radius = self.size / 2.0;
        if radius <= 0.0 {
            return false;
        }
        let center = self.bounds().center();
        let dx = (point.x - center.x) / radius;
        let dy = (point.y - center.y) / radius;
        dx * dx + dy * dy <= 1.0
    }

    fn to_path(&self) -> BezPath {
        KurboEllipse::from_rect(self.local_rect()).to_path(0.1)
    }

    fn style(&self) -> &ShapeStyle {
        &self.style
    }
}

impl PointerTarget for Disk {
    fn on_pointer_move(&self, current: Point, previous: Point) -> Result<DragResponse, SceneError> {
        let delta = displacement(current, previous);
        if !self.broadcasts_to_group {
            return Ok(DragResponse::Translate {
                shape: self.id,
                delta,
            });
        }
        let group = self.owner.ok_or(SceneError::NoOwner(self.id))?;
        Ok(DragResponse::Broadcast { group, delta })
    }
}
