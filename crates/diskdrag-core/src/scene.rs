//! Scene graph holding disks and groups.

use crate::drag::{DragResponse, PointerTarget};
use crate::shapes::{Disk, Group, GroupId, ShapeId, ShapeTrait};
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Scene lookup errors.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("Unknown shape: {0}")]
    UnknownShape(ShapeId),
    #[error("Unknown group: {0}")]
    UnknownGroup(GroupId),
    #[error("Shape {0} broadcasts to its group but has no owner")]
    NoOwner(ShapeId),
    #[error("Shape {0} is already in the scene")]
    DuplicateShape(ShapeId),
}

/// Result type for scene operations.
pub type SceneResult<T> = Result<T, SceneError>;

/// A top-level entry in the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SceneItem {
    Shape(ShapeId),
    Group(GroupId),
}

/// All items shown in a view.
///
/// Disks and groups live in id-keyed maps; disks refer back to their group
/// by id only. Top-level items are kept in z-order (back to front).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scene {
    /// Area of the scene the view shows.
    pub scene_rect: Rect,
    disks: HashMap<ShapeId, Disk>,
    groups: HashMap<GroupId, Group>,
    z_order: Vec<SceneItem>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(Rect::ZERO)
    }
}

impl Scene {
    /// Create an empty scene.
    pub fn new(scene_rect: Rect) -> Self {
        Self {
            scene_rect,
            disks: HashMap::new(),
            groups: HashMap::new(),
            z_order: Vec::new(),
        }
    }

    /// Add a top-level disk.
    pub fn add_shape(&mut self, mut disk: Disk) -> SceneResult<ShapeId> {
        let id = disk.id();
        if self.disks.contains_key(&id) {
            return Err(SceneError::DuplicateShape(id));
        }
        disk.owner = None;
        self.z_order.push(SceneItem::Shape(id));
        self.disks.insert(id, disk);
        Ok(id)
    }

    /// Add a group whose frame origin is `position`, taking ownership of `members`.
    ///
    /// Fails without touching the scene if any member is already in the
    /// scene or appears twice in `members`.
    pub fn add_group(&mut self, position: Point, members: Vec<Disk>) -> SceneResult<GroupId> {
        let mut ids: Vec<ShapeId> = Vec::with_capacity(members.len());
        for disk in &members {
            let id = disk.id();
            if self.disks.contains_key(&id) || ids.contains(&id) {
                return Err(SceneError::DuplicateShape(id));
            }
            ids.push(id);
        }

        let group = Group::new(position, ids);
        let group_id = group.id();
        for mut disk in members {
            disk.owner = Some(group_id);
            self.disks.insert(disk.id(), disk);
        }
        self.z_order.push(SceneItem::Group(group_id));
        self.groups.insert(group_id, group);
        Ok(group_id)
    }

    pub fn disk(&self, id: ShapeId) -> Option<&Disk> {
        self.disks.get(&id)
    }

    pub fn group(&self, id: GroupId) -> Option<&Group> {
        self.groups.get(&id)
    }

    /// Top-level items, back to front.
    pub fn items(&self) -> &[SceneItem] {
        &self.z_order
    }

    pub fn is_empty(&self) -> bool {
        self.z_order.is_empty()
    }

    /// Number of disks, including group members.
    pub fn len(&self) -> usize {
        self.disks.len()
    }

    /// Scene-space origin of a disk's parent frame.
    fn parent_origin(&self, disk: &Disk) -> SceneResult<Point> {
        match disk.owner() {
            Some(group_id) => self
                .groups
                .get(&group_id)
                .map(Group::position)
                .ok_or(SceneError::UnknownGroup(group_id)),
            None => Ok(Point::ZERO),
        }
    }

    /// Top-left corner of a disk in scene coordinates.
    pub fn scene_position(&self, id: ShapeId) -> SceneResult<Point> {
        let disk = self.disks.get(&id).ok_or(SceneError::UnknownShape(id))?;
        Ok(disk.scene_position(self.parent_origin(disk)?))
    }

    /// Place a disk's top-left corner at a scene position.
    pub fn set_scene_position(&mut self, id: ShapeId, position: Point) -> SceneResult<()> {
        let disk = self.disks.get(&id).ok_or(SceneError::UnknownShape(id))?;
        let origin = self.parent_origin(disk)?;
        if let Some(disk) = self.disks.get_mut(&id) {
            disk.set_scene_position(position, origin);
        }
        Ok(())
    }

    /// Move every member of a group by the same displacement.
    pub fn broadcast_displacement(&mut self, group: GroupId, delta: Vec2) -> SceneResult<()> {
        let group = self
            .groups
            .get(&group)
            .ok_or(SceneError::UnknownGroup(group))?;
        group.broadcast_displacement(delta, &mut self.disks)
    }

    /// Apply a shape's response to a pointer move.
    pub fn apply(&mut self, response: DragResponse) -> SceneResult<()> {
        match response {
            DragResponse::Translate { shape, delta } => {
                let current = self.scene_position(shape)?;
                self.set_scene_position(shape, current + delta)
            }
            DragResponse::Broadcast { group, delta } => self.broadcast_displacement(group, delta),
        }
    }

    /// Deliver a pointer-move notification to a disk and apply its response.
    pub fn on_pointer_move(&mut self, id: ShapeId, current: Point, previous: Point) -> SceneResult<()> {
        let disk = self.disks.get(&id).ok_or(SceneError::UnknownShape(id))?;
        let response = disk.on_pointer_move(current, previous)?;
        self.apply(response)
    }

    /// Find the topmost disk under a scene point.
    pub fn shape_at(&self, point: Point) -> Option<ShapeId> {
        self.z_order.iter().rev().find_map(|item| match item {
            SceneItem::Shape(id) => self
                .disks
                .get(id)
                .filter(|disk| disk.hit_test(point))
                .map(|_| *id),
            SceneItem::Group(group_id) => {
                let group = self.groups.get(group_id)?;
                let local = point - group.position().to_vec2();
                group.members().iter().rev().copied().find(|id| {
                    self.disks
                        .get(id)
                        .is_some_and(|disk| disk.hit_test(local))
                })
            }
        })
    }

    /// Disks in paint order (back to front) with their parent frame origin.
    pub fn disks_ordered(&self) -> impl Iterator<Item = (&Disk, Point)> {
        self.z_order.iter().flat_map(move |item| {
            let entries: Vec<(&Disk, Point)> = match item {
                SceneItem::Shape(id) => self
                    .disks
                    .get(id)
                    .map(|disk| (disk, Point::ZERO))
                    .into_iter()
                    .collect(),
                SceneItem::Group(group_id) => match self.groups.get(group_id) {
                    Some(group) => group
                        .members()
                        .iter()
                        .filter_map(|id| self.disks.get(id))
                        .map(|disk| (disk, group.position()))
                        .collect(),
                    None => Vec::new(),
                },
            };
            entries
        })
    }

    /// Bounding box of every disk, in scene coordinates.
    pub fn bounds(&self) -> Option<Rect> {
        self.disks_ordered()
            .map(|(disk, origin)| disk.bounds() + origin.to_vec2())
            .reduce(|a, b| a.union(b))
    }

    /// Serialize the scene layout to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize a scene layout from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_point(actual: Point, expected: Point) {
        assert!(
            (actual.x - expected.x).abs() < 1e-9 && (actual.y - expected.y).abs() < 1e-9,
            "expected {expected:?}, got {actual:?}"
        );
    }

    fn group_scene() -> (Scene, [ShapeId; 3], GroupId) {
        let mut scene = Scene::new(Rect::new(0.0, 0.0, 250.0, 250.0));
        let disks = [
            Disk::new(50.0, 50.0, 10.0),
            Disk::new(100.0, 100.0, 10.0),
            Disk::broadcasting(100.0, 50.0, 10.0),
        ];
        let ids = [disks[0].id(), disks[1].id(), disks[2].id()];
        let group = scene.add_group(Point::ZERO, disks.to_vec()).unwrap();
        (scene, ids, group)
    }

    #[test]
    fn test_single_disk_move() {
        let mut scene = Scene::new(Rect::new(0.0, 0.0, 250.0, 250.0));
        let id = scene.add_shape(Disk::new(50.0, 50.0, 20.0)).unwrap();

        scene
            .on_pointer_move(id, Point::new(15.0, 12.0), Point::new(10.0, 10.0))
            .unwrap();

        assert_point(scene.scene_position(id).unwrap(), Point::new(55.0, 52.0));
    }

    #[test]
    fn test_sequential_moves_add_up() {
        let mut stepped = Scene::default();
        let a = stepped.add_shape(Disk::new(0.0, 0.0, 10.0)).unwrap();
        stepped
            .on_pointer_move(a, Point::new(3.0, 0.0), Point::ZERO)
            .unwrap();
        stepped
            .on_pointer_move(a, Point::new(3.0, 4.0), Point::new(3.0, 0.0))
            .unwrap();

        let mut combined = Scene::default();
        let b = combined.add_shape(Disk::new(0.0, 0.0, 10.0)).unwrap();
        combined
            .on_pointer_move(b, Point::new(3.0, 4.0), Point::ZERO)
            .unwrap();

        assert_point(stepped.scene_position(a).unwrap(), Point::new(3.0, 4.0));
        assert_point(
            stepped.scene_position(a).unwrap(),
            combined.scene_position(b).unwrap(),
        );
    }

    #[test]
    fn test_chunking_does_not_change_result() {
        let steps = [
            Vec2::new(1.5, -2.0),
            Vec2::new(-0.25, 7.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(-3.0, -3.0),
        ];
        let mut scene = Scene::default();
        let id = scene.add_shape(Disk::new(20.0, 30.0, 10.0)).unwrap();

        let mut pointer = Point::new(100.0, 100.0);
        for step in steps {
            let next = pointer + step;
            scene.on_pointer_move(id, next, pointer).unwrap();
            pointer = next;
        }

        let total: Vec2 = steps.iter().fold(Vec2::ZERO, |acc, s| acc + *s);
        assert_point(scene.scene_position(id).unwrap(), Point::new(20.0, 30.0) + total);
    }

    #[test]
    fn test_broadcaster_moves_whole_group() {
        let (mut scene, ids, _) = group_scene();

        scene
            .on_pointer_move(ids[2], Point::new(5.0, -5.0), Point::ZERO)
            .unwrap();

        assert_point(scene.scene_position(ids[0]).unwrap(), Point::new(55.0, 45.0));
        assert_point(scene.scene_position(ids[1]).unwrap(), Point::new(105.0, 95.0));
        assert_point(scene.scene_position(ids[2]).unwrap(), Point::new(105.0, 45.0));
    }

    #[test]
    fn test_local_member_moves_alone() {
        let (mut scene, ids, _) = group_scene();

        scene
            .on_pointer_move(ids[0], Point::new(7.0, 8.0), Point::new(2.0, 2.0))
            .unwrap();

        assert_point(scene.scene_position(ids[0]).unwrap(), Point::new(55.0, 56.0));
        assert_point(scene.scene_position(ids[1]).unwrap(), Point::new(100.0, 100.0));
        assert_point(scene.scene_position(ids[2]).unwrap(), Point::new(100.0, 50.0));
    }

    #[test]
    fn test_broadcast_preserves_relative_offsets() {
        let (mut scene, ids, group) = group_scene();
        let before: Vec<Point> = ids.iter().map(|id| scene.scene_position(*id).unwrap()).collect();

        scene
            .broadcast_displacement(group, Vec2::new(-12.5, 33.0))
            .unwrap();

        let after: Vec<Point> = ids.iter().map(|id| scene.scene_position(*id).unwrap()).collect();
        for (b, a) in before.iter().zip(&after) {
            assert_point(*a, *b + Vec2::new(-12.5, 33.0));
        }
        assert_point(
            Point::ZERO + (after[1] - after[0]),
            Point::ZERO + (before[1] - before[0]),
        );
    }

    #[test]
    fn test_group_members_are_owned() {
        let (scene, ids, group) = group_scene();
        for id in ids {
            assert_eq!(scene.disk(id).unwrap().owner(), Some(group));
        }
        assert_eq!(scene.group(group).unwrap().members(), &ids);
        assert_eq!(scene.group(group).unwrap().bounds(), Rect::ZERO);
    }

    #[test]
    fn test_top_level_broadcaster_errors() {
        let mut scene = Scene::default();
        let id = scene.add_shape(Disk::broadcasting(0.0, 0.0, 10.0)).unwrap();
        let err = scene
            .on_pointer_move(id, Point::new(1.0, 1.0), Point::ZERO)
            .unwrap_err();
        assert!(matches!(err, SceneError::NoOwner(_)));
        assert_point(scene.scene_position(id).unwrap(), Point::ZERO);
    }

    #[test]
    fn test_unknown_ids() {
        let mut scene = Scene::default();
        let ghost = uuid::Uuid::new_v4();
        assert!(matches!(
            scene.scene_position(ghost),
            Err(SceneError::UnknownShape(_))
        ));
        assert!(matches!(
            scene.broadcast_displacement(ghost, Vec2::new(1.0, 1.0)),
            Err(SceneError::UnknownGroup(_))
        ));
    }

    #[test]
    fn test_disk_cannot_join_two_groups() {
        let mut scene = Scene::default();
        let shared = Disk::new(10.0, 10.0, 10.0);
        let shared_id = shared.id();
        let first = scene
            .add_group(
                Point::ZERO,
                vec![shared.clone(), Disk::broadcasting(50.0, 50.0, 10.0)],
            )
            .unwrap();

        let err = scene
            .add_group(Point::new(100.0, 100.0), vec![shared])
            .unwrap_err();
        assert!(matches!(err, SceneError::DuplicateShape(id) if id == shared_id));

        assert_eq!(scene.items().len(), 1);
        assert_eq!(scene.disk(shared_id).unwrap().owner(), Some(first));
        assert_eq!(scene.disks_ordered().count(), 2);

        scene
            .broadcast_displacement(first, Vec2::new(1.0, 0.0))
            .unwrap();
        assert_point(scene.scene_position(shared_id).unwrap(), Point::new(11.0, 10.0));
    }

    #[test]
    fn test_top_level_disk_cannot_join_group() {
        let mut scene = Scene::default();
        let disk = Disk::new(10.0, 10.0, 10.0);
        let id = scene.add_shape(disk.clone()).unwrap();

        let err = scene.add_group(Point::ZERO, vec![disk.clone()]).unwrap_err();
        assert!(matches!(err, SceneError::DuplicateShape(_)));
        let err = scene.add_shape(disk).unwrap_err();
        assert!(matches!(err, SceneError::DuplicateShape(_)));

        assert_eq!(scene.items(), &[SceneItem::Shape(id)]);
        assert_eq!(scene.disk(id).unwrap().owner(), None);
        assert_eq!(scene.disks_ordered().count(), 1);
    }

    #[test]
    fn test_group_rejects_repeated_member() {
        let mut scene = Scene::default();
        let disk = Disk::new(10.0, 10.0, 10.0);

        let err = scene
            .add_group(Point::ZERO, vec![disk.clone(), disk])
            .unwrap_err();
        assert!(matches!(err, SceneError::DuplicateShape(_)));
        assert!(scene.is_empty());
        assert_eq!(scene.len(), 0);
    }

    #[test]
    fn test_group_frame_offset() {
        let mut scene = Scene::default();
        let disk = Disk::new(10.0, 10.0, 20.0);
        let id = disk.id();
        scene.add_group(Point::new(100.0, 50.0), vec![disk]).unwrap();

        assert_point(scene.scene_position(id).unwrap(), Point::new(110.0, 60.0));
        assert_eq!(scene.bounds(), Some(Rect::new(110.0, 60.0, 130.0, 80.0)));

        scene
            .set_scene_position(id, Point::new(120.0, 70.0))
            .unwrap();
        assert_point(scene.disk(id).unwrap().position(), Point::new(20.0, 20.0));
    }

    #[test]
    fn test_shape_at_prefers_front() {
        let mut scene = Scene::default();
        let back = scene.add_shape(Disk::new(0.0, 0.0, 20.0)).unwrap();
        let front = scene.add_shape(Disk::new(5.0, 5.0, 20.0)).unwrap();

        assert_eq!(scene.shape_at(Point::new(12.0, 12.0)), Some(front));
        assert_eq!(scene.shape_at(Point::new(3.0, 10.0)), Some(back));
        assert_eq!(scene.shape_at(Point::new(100.0, 100.0)), None);
    }

    #[test]
    fn test_shape_at_finds_group_members() {
        let mut scene = Scene::default();
        let disk = Disk::new(10.0, 10.0, 10.0);
        let id = disk.id();
        scene.add_group(Point::new(100.0, 100.0), vec![disk]).unwrap();

        assert_eq!(scene.shape_at(Point::new(115.0, 115.0)), Some(id));
        assert_eq!(scene.shape_at(Point::new(15.0, 15.0)), None);
    }

    #[test]
    fn test_disks_ordered_and_bounds() {
        let (scene, ids, _) = group_scene();
        let order: Vec<ShapeId> = scene.disks_ordered().map(|(d, _)| d.id()).collect();
        assert_eq!(order, ids.to_vec());
        assert_eq!(scene.bounds(), Some(Rect::new(50.0, 50.0, 110.0, 110.0)));
        assert_eq!(Scene::default().bounds(), None);
    }

    #[test]
    fn test_json_roundtrip_keeps_layout() {
        let (mut scene, ids, group) = group_scene();
        scene
            .broadcast_displacement(group, Vec2::new(1.0, 1.0))
            .unwrap();

        let json = scene.to_json().unwrap();
        let restored = Scene::from_json(&json).unwrap();

        assert_eq!(restored.len(), 3);
        assert_eq!(restored.items(), scene.items());
        for id in ids {
            assert_point(
                restored.scene_position(id).unwrap(),
                scene.scene_position(id).unwrap(),
            );
        }
    }
}
