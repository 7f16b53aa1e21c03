//! Basic UI widgets

use macroquad::prelude::*;
use super::{theme, Rect, UiContext};

/// Draw text centered in a rect
pub fn draw_text_centered(text: &str, rect: &Rect, font_size: f32, color: Color) {
    let dims = measure_text(text, None, font_size as u16, 1.0);
    // Round to integer pixels for crisp rendering
    let x = (rect.center_x() - dims.width * 0.5).round();
    let y = (rect.center_y() + dims.offset_y * 0.5).round();
    draw_text(text, x, y, font_size, color);
}

/// Filled button with a label, returns true if clicked
pub fn text_button(ctx: &mut UiContext, rect: Rect, label: &str) -> bool {
    let hovered = ctx.mouse.inside(&rect);
    let fill = if hovered { theme::BUTTON_HOVER } else { theme::BUTTON_COLOR };
    draw_rounded_rect(rect.x, rect.y, rect.w, rect.h, theme::CORNER_RADIUS, fill);
    draw_text_centered(label, &rect, theme::FONT_SIZE_CONTENT, theme::BUTTON_TEXT);
    ctx.mouse.clicked(&rect)
}

/// Tab button. `highlight` fills the background when the tab is on.
pub fn tab_button(ctx: &mut UiContext, rect: Rect, label: &str, highlight: Option<Color>) -> bool {
    let hovered = ctx.mouse.inside(&rect);
    let fill = match highlight {
        Some(color) => color,
        None if hovered => Color::new(0.9, 0.9, 0.92, 1.0),
        None => theme::TAB_COLOR,
    };
    // Square corners: highlight colors are translucent
    draw_rectangle(rect.x, rect.y, rect.w, rect.h, fill);
    draw_rectangle_lines(rect.x, rect.y, rect.w, rect.h, 1.0, theme::PANEL_BORDER);
    draw_text_centered(label, &rect, theme::FONT_SIZE_SMALL, theme::TEXT_COLOR);
    ctx.mouse.clicked(&rect)
}

/// Color swatch, ringed when selected
pub fn swatch(ctx: &mut UiContext, rect: Rect, color: Color, selected: bool) -> bool {
    let hovered = ctx.mouse.inside(&rect);
    let r = rect.w.min(rect.h) * 0.5;
    let (cx, cy) = (rect.center_x(), rect.center_y());
    draw_circle(cx, cy, r - 2.0, color);
    if selected {
        draw_circle_lines(cx, cy, r, 2.0, theme::TEXT_COLOR);
    } else if hovered {
        draw_circle_lines(cx, cy, r, 1.0, theme::TEXT_DIM);
    }
    ctx.mouse.clicked(&rect)
}

/// Draw a rounded rectangle (simple approximation using overlapping rects)
pub fn draw_rounded_rect(x: f32, y: f32, w: f32, h: f32, r: f32, color: Color) {
    let r = r.min(w * 0.5).min(h * 0.5);
    // Main body
    draw_rectangle(x + r, y, w - r * 2.0, h, color);
    draw_rectangle(x, y + r, r, h - r * 2.0, color);
    draw_rectangle(x + w - r, y + r, r, h - r * 2.0, color);
    // Corners (circles)
    draw_circle(x + r, y + r, r, color);
    draw_circle(x + w - r, y + r, r, color);
    draw_circle(x + r, y + h - r, r, color);
    draw_circle(x + w - r, y + h - r, r, color);
}
