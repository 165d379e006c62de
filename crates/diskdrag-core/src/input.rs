//! Pointer input tracking and delivery of notifications to scene items.

use crate::cursor::CursorService;
use crate::drag::PointerTarget;
use crate::scene::{Scene, SceneError, SceneResult};
use crate::shapes::ShapeId;
use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::time::Instant;

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Pointer event in scene coordinates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PointerEvent {
    Down {
        position: Point,
        button: MouseButton,
    },
    Up {
        position: Point,
        button: MouseButton,
    },
    Move {
        position: Point,
    },
    /// Pointer left the view.
    Left,
}

/// Double-click detection constants.
const DOUBLE_CLICK_TIME_MS: u128 = 500;
const DOUBLE_CLICK_DISTANCE: f64 = 5.0;

/// Tracks the pointer between notifications.
#[derive(Debug, Clone)]
pub struct InputState {
    /// Current pointer position in scene coordinates.
    pub pointer_position: Point,
    /// Pointer position at the previous notification.
    pub previous_pointer_position: Point,
    /// Currently pressed mouse buttons.
    pressed_buttons: HashSet<MouseButton>,
    /// Last click time for double-click detection.
    last_click_time: Option<Instant>,
    /// Last click position for double-click detection.
    last_click_position: Option<Point>,
    /// Whether the latest press completed a double-click.
    double_click_detected: bool,
}

impl Default for InputState {
    fn default() -> Self {
        Self {
            pointer_position: Point::ZERO,
            previous_pointer_position: Point::ZERO,
            pressed_buttons: HashSet::new(),
            last_click_time: None,
            last_click_position: None,
            double_click_detected: false,
        }
    }
}

impl InputState {
    /// Create a new input state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Process a pointer event.
    pub fn handle_pointer_event(&mut self, event: &PointerEvent) {
        match *event {
            PointerEvent::Down { position, button } => {
                self.previous_pointer_position = position;
                self.pointer_position = position;
                self.pressed_buttons.insert(button);
                self.double_click_detected = false;

                if button == MouseButton::Left {
                    let now = Instant::now();
                    if let (Some(last_time), Some(last_pos)) =
                        (self.last_click_time, self.last_click_position)
                    {
                        let elapsed = now.duration_since(last_time).as_millis();
                        let distance = (position - last_pos).hypot();
                        if elapsed < DOUBLE_CLICK_TIME_MS && distance < DOUBLE_CLICK_DISTANCE {
                            self.double_click_detected = true;
                            // A third click starts a new sequence
                            self.last_click_time = None;
                            self.last_click_position = None;
                            return;
                        }
                    }
                    self.last_click_time = Some(now);
                    self.last_click_position = Some(position);
                }
            }
            PointerEvent::Up { position, button } => {
                self.previous_pointer_position = self.pointer_position;
                self.pointer_position = position;
                self.pressed_buttons.remove(&button);
            }
            PointerEvent::Move { position } => {
                self.previous_pointer_position = self.pointer_position;
                self.pointer_position = position;
            }
            // Buttons stay pressed: the release still arrives while a drag
            // is outside the view.
            PointerEvent::Left => {}
        }
    }

    /// Check if a button is currently pressed.
    pub fn is_button_pressed(&self, button: MouseButton) -> bool {
        self.pressed_buttons.contains(&button)
    }

    /// Check if the latest press was the second half of a double-click.
    pub fn is_double_click(&self) -> bool {
        self.double_click_detected
    }
}

/// Delivers pointer notifications to the disk under the pointer.
///
/// Hover changes produce leave/enter pairs. A left press grabs the disk under
/// the pointer; while the button is held, every move goes to that disk with
/// the current and previous scene positions, wherever the pointer is,
/// including outside the view.
#[derive(Debug, Default)]
pub struct PointerDispatcher {
    input: InputState,
    hovered: Option<ShapeId>,
    grabbed: Option<ShapeId>,
}

impl PointerDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    /// Disk currently under the pointer (as far as notifications go).
    pub fn hovered(&self) -> Option<ShapeId> {
        self.hovered
    }

    /// Disk being dragged, if any.
    pub fn grabbed(&self) -> Option<ShapeId> {
        self.grabbed
    }

    /// Handle one pointer event. Returns whether the scene layout changed.
    pub fn handle_event(
        &mut self,
        scene: &mut Scene,
        cursor: &mut dyn CursorService,
        event: PointerEvent,
    ) -> SceneResult<bool> {
        self.input.handle_pointer_event(&event);

        match event {
            PointerEvent::Move { position } => {
                if let Some(id) = self.grabbed {
                    if self.input.is_button_pressed(MouseButton::Left) {
                        let previous = self.input.previous_pointer_position;
                        scene.on_pointer_move(id, position, previous)?;
                        return Ok(true);
                    }
                    self.release(scene)?;
                }
                self.update_hover(scene, cursor, scene.shape_at(position))?;
                Ok(false)
            }
            PointerEvent::Down {
                position,
                button: MouseButton::Left,
            } => {
                // A press while still grabbed means the last release was lost.
                self.release(scene)?;
                let hit = scene.shape_at(position);
                self.update_hover(scene, cursor, hit)?;
                if let Some(id) = hit {
                    let disk = scene.disk(id).ok_or(SceneError::UnknownShape(id))?;
                    if self.input.is_double_click() {
                        disk.on_pointer_double_click();
                    } else {
                        disk.on_pointer_press();
                    }
                    log::debug!("Drag started on {}", id);
                    self.grabbed = Some(id);
                }
                Ok(false)
            }
            PointerEvent::Up {
                position,
                button: MouseButton::Left,
            } => {
                self.release(scene)?;
                self.update_hover(scene, cursor, scene.shape_at(position))?;
                Ok(false)
            }
            PointerEvent::Down { .. } | PointerEvent::Up { .. } => Ok(false),
            PointerEvent::Left => {
                if self.grabbed.is_none() {
                    self.update_hover(scene, cursor, None)?;
                }
                Ok(false)
            }
        }
    }

    fn release(&mut self, scene: &Scene) -> SceneResult<()> {
        if let Some(id) = self.grabbed.take() {
            let disk = scene.disk(id).ok_or(SceneError::UnknownShape(id))?;
            disk.on_pointer_release();
            log::debug!("Drag ended on {}", id);
        }
        Ok(())
    }

    fn update_hover(
        &mut self,
        scene: &Scene,
        cursor: &mut dyn CursorService,
        hit: Option<ShapeId>,
    ) -> SceneResult<()> {
        if hit == self.hovered {
            return Ok(());
        }
        if let Some(old) = self.hovered.take() {
            // A vanished disk still owes its cursor restore.
            match scene.disk(old) {
                Some(disk) => disk.on_pointer_leave(cursor),
                None => cursor.restore_cursor(),
            }
        }
        if let Some(new) = hit {
            let disk = scene.disk(new).ok_or(SceneError::UnknownShape(new))?;
            disk.on_pointer_enter(cursor);
            self.hovered = Some(new);
        }
        Ok(())
    }
}
