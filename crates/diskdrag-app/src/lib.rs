//! diskdrag Application
//!
//! Window, input and rendering shell around the diskdrag scene.

mod app;
mod event_handler;

pub use app::{App, AppConfig, AppError, DEMO_ENV_VAR};
pub use event_handler::{EventHandler, EventOutcome, map_button};
