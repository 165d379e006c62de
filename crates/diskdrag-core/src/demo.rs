//! The two demo scenes: one movable disk, and a group with a broadcasting member.

use crate::scene::{Scene, SceneResult};
use crate::shapes::Disk;
use kurbo::{Point, Rect};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Scene rect shared by both demos.
pub const SCENE_RECT: Rect = Rect::new(0.0, 0.0, 250.0, 250.0);

/// Which demo scene to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DemoKind {
    /// A single red disk.
    #[default]
    SingleDisk,
    /// Two red disks and a green one that moves the whole group.
    DiskGroup,
}

/// Unrecognized demo name.
#[derive(Debug, Error)]
#[error("Unknown demo '{0}' (expected 'single' or 'group')")]
pub struct UnknownDemo(pub String);

impl FromStr for DemoKind {
    type Err = UnknownDemo;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "single" | "disk" => Ok(DemoKind::SingleDisk),
            "group" => Ok(DemoKind::DiskGroup),
            _ => Err(UnknownDemo(s.to_string())),
        }
    }
}

impl fmt::Display for DemoKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DemoKind::SingleDisk => f.write_str("single"),
            DemoKind::DiskGroup => f.write_str("group"),
        }
    }
}

impl DemoKind {
    /// Build the scene for this demo.
    pub fn build(self) -> SceneResult<Scene> {
        let mut scene = Scene::new(SCENE_RECT);
        match self {
            DemoKind::SingleDisk => {
                scene.add_shape(Disk::new(50.0, 50.0, 20.0))?;
            }
            DemoKind::DiskGroup => {
                scene.add_group(
                    Point::ZERO,
                    vec![
                        Disk::new(50.0, 50.0, 10.0),
                        Disk::new(100.0, 100.0, 10.0),
                        Disk::broadcasting(100.0, 50.0, 10.0),
                    ],
                )?;
            }
        }
        Ok(scene)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::SceneItem;

    #[test]
    fn test_parse() {
        assert_eq!("single".parse::<DemoKind>().unwrap(), DemoKind::SingleDisk);
        assert_eq!(" Group ".parse::<DemoKind>().unwrap(), DemoKind::DiskGroup);
        assert!("triangle".parse::<DemoKind>().is_err());
    }

    #[test]
    fn test_display_parses_back() {
        for kind in [DemoKind::SingleDisk, DemoKind::DiskGroup] {
            assert_eq!(kind.to_string().parse::<DemoKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_single_disk_scene() {
        let scene = DemoKind::SingleDisk.build().unwrap();
        assert_eq!(scene.scene_rect, SCENE_RECT);
        assert_eq!(scene.len(), 1);
        let Some(SceneItem::Shape(id)) = scene.items().first().copied() else {
            panic!("expected a top-level disk");
        };
        assert_eq!(scene.scene_position(id).unwrap(), Point::new(50.0, 50.0));
        assert!((scene.disk(id).unwrap().size() - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_group_scene_has_one_broadcaster() {
        let scene = DemoKind::DiskGroup.build().unwrap();
        let Some(SceneItem::Group(group_id)) = scene.items().first().copied() else {
            panic!("expected a group");
        };
        let group = scene.group(group_id).unwrap();
        let broadcasters: Vec<_> = group
            .members()
            .iter()
            .filter(|id| scene.disk(**id).unwrap().broadcasts_to_group())
            .collect();
        assert_eq!(group.members().len(), 3);
        assert_eq!(broadcasters.len(), 1);
        assert_eq!(
            scene.scene_position(*broadcasters[0]).unwrap(),
            Point::new(100.0, 50.0)
        );
    }
}
