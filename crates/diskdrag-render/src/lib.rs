//! diskdrag Render Library
//!
//! Renderer abstraction and implementations for diskdrag.
//! The default implementation uses Vello for GPU-accelerated rendering.

mod renderer;

#[cfg(feature = "vello-renderer")]
mod vello_impl;

pub use renderer::{RenderContext, Renderer, RendererError, ShapeRenderer, disk_transform};

#[cfg(feature = "vello-renderer")]
pub use vello_impl::VelloRenderer;
