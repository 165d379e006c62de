//! Pointer notifications and the drag responses shapes produce.

use crate::cursor::{CursorService, OPEN_HAND};
use crate::scene::SceneError;
use crate::shapes::{GroupId, ShapeId};
use kurbo::{Point, Vec2};

/// Displacement between two consecutive pointer positions (scene coordinates).
pub fn displacement(current: Point, previous: Point) -> Vec2 {
    current - previous
}

/// What the scene should do in response to a pointer-move notification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragResponse {
    /// Move the notified shape by `delta`.
    Translate { shape: ShapeId, delta: Vec2 },
    /// Move every member of `group` by `delta`.
    Broadcast { group: GroupId, delta: Vec2 },
}

/// Outcome of a press, release or double-click notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResponse {
    /// The notification was handled; no default behavior should run.
    Consumed,
}

/// Pointer notifications a scene item can receive.
///
/// Press, release and double-click are consumed without effect by default so
/// the host never applies its own selection or move semantics on top of the
/// item's positioning.
pub trait PointerTarget {
    /// Pointer entered the item.
    fn on_pointer_enter(&self, cursor: &mut dyn CursorService) {
        cursor.push_cursor(OPEN_HAND);
    }

    /// Pointer left the item.
    fn on_pointer_leave(&self, cursor: &mut dyn CursorService) {
        cursor.restore_cursor();
    }

    /// Pointer moved with a button held. Positions are in scene coordinates.
    fn on_pointer_move(&self, current: Point, previous: Point) -> Result<DragResponse, SceneError>;

    fn on_pointer_press(&self) -> EventResponse {
        EventResponse::Consumed
    }

    fn on_pointer_release(&self) -> EventResponse {
        EventResponse::Consumed
    }

    fn on_pointer_double_click(&self) -> EventResponse {
        EventResponse::Consumed
    }
}
