//! Immediate-mode UI for the customizer overlay
//!
//! Design principles:
//! - Immediate mode (no retained state, rebuilt each frame)
//! - Simple rectangle-based layout
//! - Macroquad integration for rendering

mod rect;
mod widgets;
mod input;
pub mod theme;
mod overlay;

pub use rect::*;
pub use widgets::*;
pub use input::*;
pub use overlay::{draw_overlay, EditorTab, OverlayLayout, OverlayView, UiAction};
