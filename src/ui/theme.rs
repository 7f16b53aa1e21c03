//! UI Theme - Shared colors and styling constants

use macroquad::prelude::Color;

// =============================================================================
// Base UI Colors
// =============================================================================

/// Scene backdrop
pub const BACKDROP_COLOR: Color = Color::new(0.93, 0.93, 0.94, 1.0);

/// Panel background
pub const PANEL_COLOR: Color = Color::new(1.0, 1.0, 1.0, 0.92);

/// Panel outline
pub const PANEL_BORDER: Color = Color::new(0.82, 0.82, 0.85, 1.0);

/// Button fill
pub const BUTTON_COLOR: Color = Color::new(0.11, 0.11, 0.13, 1.0);

/// Button fill under the pointer
pub const BUTTON_HOVER: Color = Color::new(0.22, 0.22, 0.26, 1.0);

/// Text on buttons
pub const BUTTON_TEXT: Color = Color::new(0.97, 0.97, 0.98, 1.0);

/// Primary text color
pub const TEXT_COLOR: Color = Color::new(0.11, 0.11, 0.13, 1.0);

/// Dimmed/secondary text
pub const TEXT_DIM: Color = Color::new(0.45, 0.45, 0.5, 1.0);

/// Inactive tab fill
pub const TAB_COLOR: Color = Color::new(1.0, 1.0, 1.0, 0.85);

// =============================================================================
// Font Sizes
// =============================================================================

/// Intro headline size
pub const FONT_SIZE_TITLE: f32 = 64.0;

/// Header/title text size
pub const FONT_SIZE_HEADER: f32 = 20.0;

/// Standard content text size
pub const FONT_SIZE_CONTENT: f32 = 16.0;

/// Small/detail text size
pub const FONT_SIZE_SMALL: f32 = 13.0;

/// Corner radius shared by buttons and tabs
pub const CORNER_RADIUS: f32 = 6.0;
