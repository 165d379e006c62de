//! Group that moves its members together.

use super::{Disk, GroupId, ShapeId};
use crate::scene::SceneError;
use kurbo::{BezPath, Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// An ownership container for disks.
///
/// The group has no geometry of its own: it only provides the coordinate
/// frame its members are positioned in and translates them all when a
/// broadcasting member is dragged. Membership is fixed at construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Group {
    pub(crate) id: GroupId,
    /// Origin of the group frame in scene coordinates.
    position: Point,
    /// Member disks, back to front.
    members: Vec<ShapeId>,
}

impl Group {
    /// Create a group frame at `position` with the given members.
    pub fn new(position: Point, members: Vec<ShapeId>) -> Self {
        Self {
            id: Uuid::new_v4(),
            position,
            members,
        }
    }

    pub fn id(&self) -> GroupId {
        self.id
    }

    /// Origin of the group frame in scene coordinates.
    pub fn position(&self) -> Point {
        self.position
    }

    pub fn members(&self) -> &[ShapeId] {
        &self.members
    }

    /// Groups report empty bounds; members are hit-tested and drawn on their own.
    pub fn bounds(&self) -> Rect {
        Rect::ZERO
    }

    /// Groups draw nothing.
    pub fn to_path(&self) -> BezPath {
        BezPath::new()
    }

    /// Move every member's scene position by `delta`.
    ///
    /// All members are resolved before any is moved, so a missing member
    /// leaves the layout untouched.
    pub fn broadcast_displacement(
        &self,
        delta: Vec2,
        disks: &mut HashMap<ShapeId, Disk>,
    ) -> Result<(), SceneError> {
        if let Some(missing) = self.members.iter().find(|id| !disks.contains_key(*id)) {
            return Err(SceneError::UnknownShape(*missing));
        }

        log::trace!(
            "Group {} broadcasting ({}, {}) to {} members",
            self.id,
            delta.x,
            delta.y,
            self.members.len()
        );

        for id in &self.members {
            if let Some(disk) = disks.get_mut(id) {
                let current = disk.scene_position(self.position);
                disk.set_scene_position(current + delta, self.position);
            }
        }
        Ok(())
    }
}
