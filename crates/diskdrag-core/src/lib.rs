//! diskdrag Core Library
//!
//! Drag handling for disks in a 2D scene graph: a disk follows pointer
//! drags on its own, or forwards the drag to its group so every member
//! moves together.

pub mod cursor;
pub mod demo;
pub mod drag;
pub mod input;
pub mod scene;
pub mod shapes;
pub mod view;

pub use cursor::{CursorIcon, CursorService, CursorStack, OPEN_HAND};
pub use demo::{DemoKind, SCENE_RECT, UnknownDemo};
pub use drag::{DragResponse, EventResponse, PointerTarget, displacement};
pub use input::{InputState, MouseButton, PointerDispatcher, PointerEvent};
pub use scene::{Scene, SceneError, SceneItem, SceneResult};
pub use shapes::{Disk, Group, GroupId, ShapeId, ShapeStyle, ShapeTrait};
pub use view::View;
