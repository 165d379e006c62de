//! Translates window input into pointer notifications for the scene.

use diskdrag_core::cursor::{CursorIcon, CursorService, CursorStack};
use diskdrag_core::input::{MouseButton, PointerDispatcher, PointerEvent};
use diskdrag_core::scene::Scene;
use diskdrag_core::view::View;
use kurbo::Point;
use winit::event::{ElementState, MouseButton as WinitMouseButton};

/// What the window should do after an input event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventOutcome {
    /// The scene layout changed.
    pub redraw: bool,
    /// New cursor to show, if it changed.
    pub cursor: Option<CursorIcon>,
}

/// Map a winit button to a scene button.
pub fn map_button(button: WinitMouseButton) -> Option<MouseButton> {
    match button {
        WinitMouseButton::Left => Some(MouseButton::Left),
        WinitMouseButton::Right => Some(MouseButton::Right),
        WinitMouseButton::Middle => Some(MouseButton::Middle),
        _ => None,
    }
}

/// Owns the pointer dispatcher and the cursor override stack for a window.
#[derive(Debug, Default)]
pub struct EventHandler {
    dispatcher: PointerDispatcher,
    cursor: CursorStack,
    /// Last pointer position in scene coordinates.
    pointer: Option<Point>,
}

impl EventHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dispatcher(&self) -> &PointerDispatcher {
        &self.dispatcher
    }

    /// Pointer moved to `screen` (physical pixels).
    pub fn cursor_moved(&mut self, scene: &mut Scene, view: &View, screen: Point) -> EventOutcome {
        let position = view.screen_to_scene(screen);
        self.pointer = Some(position);
        self.dispatch(scene, PointerEvent::Move { position })
    }

    /// Button pressed or released at the last known pointer position.
    pub fn mouse_input(
        &mut self,
        scene: &mut Scene,
        state: ElementState,
        button: WinitMouseButton,
    ) -> EventOutcome {
        let (Some(button), Some(position)) = (map_button(button), self.pointer) else {
            return EventOutcome::default();
        };
        let event = match state {
            ElementState::Pressed => PointerEvent::Down { position, button },
            ElementState::Released => PointerEvent::Up { position, button },
        };
        self.dispatch(scene, event)
    }

    /// Pointer left the window.
    ///
    /// During a drag the last position is kept so the release, which may be
    /// reported before any further move, still reaches the dispatcher.
    pub fn cursor_left(&mut self, scene: &mut Scene) -> EventOutcome {
        if self.dispatcher.grabbed().is_none() {
            self.pointer = None;
        }
        self.dispatch(scene, PointerEvent::Left)
    }

    fn dispatch(&mut self, scene: &mut Scene, event: PointerEvent) -> EventOutcome {
        let before = self.cursor.current_cursor();
        let redraw = match self.dispatcher.handle_event(scene, &mut self.cursor, event) {
            Ok(changed) => changed,
            Err(e) => {
                log::warn!("Pointer event dropped: {}", e);
                false
            }
        };
        let after = self.cursor.current_cursor();
        EventOutcome {
            redraw,
            cursor: (after != before).then_some(after),
        }
    }
}
