//! Customizer overlay
//!
//! Layout is computed up front ([`OverlayLayout`]) so the frame loop can ask
//! whether a press lands on the overlay before routing it to the 3D scene.
//! Drawing then walks the same rects and reports clicks as [`UiAction`]s.

use macroquad::prelude::*;

use super::{draw_text_centered, swatch, tab_button, text_button, theme, Rect, UiContext};
use crate::rig::Breakpoint;
use crate::store::{BaseColor, CustomizationState, SlotId, ViewMode};

/// Side panel selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorTab {
    Color,
    File,
}

impl EditorTab {
    pub const ALL: [EditorTab; 2] = [EditorTab::Color, EditorTab::File];

    pub fn label(self) -> &'static str {
        match self {
            EditorTab::Color => "Color",
            EditorTab::File => "Image",
        }
    }
}

/// Something the user clicked
#[derive(Debug, Clone, PartialEq)]
pub enum UiAction {
    EnterEditing,
    BackToIntro,
    EnterPreview,
    ExitPreview,
    /// Clicking the open tab closes it
    SelectEditorTab(EditorTab),
    CloseEditor,
    PickColor(BaseColor),
    ToggleFilter(SlotId),
    ChooseFile,
    ReadFile(SlotId),
    Download,
}

const BUTTON_W: f32 = 120.0;
const BUTTON_H: f32 = 40.0;
const TAB_W: f32 = 96.0;
const TAB_H: f32 = 40.0;
const FILTER_W: f32 = 80.0;
const FILTER_H: f32 = 36.0;
const GAP: f32 = 8.0;
const PANEL_W: f32 = 236.0;
const PANEL_HEADER: f32 = 32.0;
const SWATCH_CELL: f32 = 40.0;
const SWATCH_COLUMNS: usize = 4;
const SLOT_BUTTON_H: f32 = 30.0;

/// Where every overlay widget sits this frame
#[derive(Debug, Clone, Default)]
pub struct OverlayLayout {
    pub headline: Option<Rect>,
    pub customize: Option<Rect>,
    pub back: Option<Rect>,
    pub preview: Option<Rect>,
    pub edit: Option<Rect>,
    pub editor_tabs: Vec<(EditorTab, Rect)>,
    pub download: Option<Rect>,
    pub filter_tabs: Vec<(SlotId, Rect)>,
    pub panel: Option<Rect>,
    pub close: Option<Rect>,
    pub swatches: Vec<Rect>,
    pub choose_file: Option<Rect>,
    pub read_file: Vec<(SlotId, Rect)>,
    pub status: Rect,
}

impl OverlayLayout {
    pub fn new(
        screen_w: f32,
        screen_h: f32,
        mode: ViewMode,
        editor: Option<EditorTab>,
        swatch_count: usize,
        breakpoint: Breakpoint,
    ) -> Self {
        let margin = if breakpoint.is_mobile() { 14.0 } else { 24.0 };
        let mut layout = OverlayLayout {
            status: Rect::new(margin, screen_h - margin - FILTER_H - GAP - 22.0, screen_w - margin * 2.0, 22.0),
            ..Default::default()
        };
        let top_right = Rect::new(screen_w - margin - BUTTON_W, margin, BUTTON_W, BUTTON_H);

        match mode {
            ViewMode::Intro => {
                if breakpoint.is_mobile() {
                    layout.headline = Some(Rect::new(margin, margin, screen_w - margin * 2.0, 120.0));
                    layout.customize = Some(Rect::new(
                        (screen_w - 180.0) * 0.5,
                        screen_h - margin - 48.0,
                        180.0,
                        48.0,
                    ));
                } else {
                    let width = (screen_w * 0.45).min(520.0);
                    layout.headline = Some(Rect::new(margin * 2.0, screen_h * 0.25, width, 200.0));
                    layout.customize = Some(Rect::new(margin * 2.0, screen_h * 0.25 + 220.0, 180.0, 48.0));
                }
            }
            ViewMode::Editing => {
                layout.back = Some(Rect::new(margin, margin, BUTTON_W, BUTTON_H));
                layout.preview = Some(top_right);

                let column_h = TAB_H * 3.0 + GAP * 2.0;
                let column_y = ((screen_h - column_h) * 0.5).max(margin + BUTTON_H + GAP);
                for (i, tab) in EditorTab::ALL.iter().enumerate() {
                    let y = column_y + i as f32 * (TAB_H + GAP);
                    layout.editor_tabs.push((*tab, Rect::new(margin, y, TAB_W, TAB_H)));
                }
                layout.download = Some(Rect::new(margin, column_y + 2.0 * (TAB_H + GAP), TAB_W, TAB_H));

                let count = SlotId::ALL.len() as f32;
                let filter_w = FILTER_W.min((screen_w - margin * 2.0 - GAP * (count - 1.0)) / count);
                let row_w = filter_w * count + GAP * (count - 1.0);
                let row_x = (screen_w - row_w) * 0.5;
                let row_y = screen_h - margin - FILTER_H;
                for (i, slot) in SlotId::ALL.iter().enumerate() {
                    let x = row_x + i as f32 * (filter_w + GAP);
                    layout.filter_tabs.push((*slot, Rect::new(x, row_y, filter_w, FILTER_H)));
                }

                if let Some(tab) = editor {
                    let panel_x = margin + TAB_W + GAP * 1.5;
                    let panel_w = PANEL_W.min(screen_w - panel_x - margin);
                    let body_h = match tab {
                        EditorTab::Color => {
                            let rows = swatch_count.div_ceil(SWATCH_COLUMNS) as f32;
                            rows * (SWATCH_CELL + GAP)
                        }
                        EditorTab::File => {
                            let rows = SlotId::ALL.len().div_ceil(2) as f32;
                            36.0 + GAP + 20.0 + rows * (SLOT_BUTTON_H + GAP)
                        }
                    };
                    let panel = Rect::new(panel_x, column_y, panel_w, PANEL_HEADER + body_h + GAP * 2.0);
                    layout.close = Some(Rect::new(panel.right() - 28.0, panel.y + 4.0, 24.0, 24.0));
                    let body = panel.remaining_after_top(PANEL_HEADER).pad(GAP);

                    match tab {
                        EditorTab::Color => {
                            layout.swatches = body.grid(swatch_count, SWATCH_COLUMNS, SWATCH_CELL, GAP);
                        }
                        EditorTab::File => {
                            layout.choose_file = Some(body.slice_top(36.0));
                            let list_y = body.y + 36.0 + GAP + 20.0;
                            let button_w = (body.w - GAP) * 0.5;
                            for (i, slot) in SlotId::ALL.iter().enumerate() {
                                let (col, row) = ((i % 2) as f32, (i / 2) as f32);
                                layout.read_file.push((
                                    *slot,
                                    Rect::new(
                                        body.x + col * (button_w + GAP),
                                        list_y + row * (SLOT_BUTTON_H + GAP),
                                        button_w,
                                        SLOT_BUTTON_H,
                                    ),
                                ));
                            }
                        }
                    }
                    layout.panel = Some(panel);
                }
            }
            ViewMode::Preview => {
                layout.edit = Some(top_right);
            }
        }
        layout
    }

    /// Whether a press at (x, y) belongs to the overlay
    pub fn blocks(&self, x: f32, y: f32) -> bool {
        let singles = [self.customize, self.back, self.preview, self.edit, self.download, self.panel];
        singles.iter().flatten().any(|r| r.contains(x, y))
            || self.editor_tabs.iter().any(|(_, r)| r.contains(x, y))
            || self.filter_tabs.iter().any(|(_, r)| r.contains(x, y))
    }
}

/// Read-only data the overlay displays
pub struct OverlayView<'a> {
    pub state: &'a CustomizationState,
    pub editor: Option<EditorTab>,
    pub swatches: &'a [BaseColor],
    pub selected_file: Option<&'a str>,
    pub reading: bool,
    pub status: Option<&'a str>,
}

/// Draw the overlay and collect clicked actions
pub fn draw_overlay(ctx: &mut UiContext, layout: &OverlayLayout, view: &OverlayView) -> Vec<UiAction> {
    let mut actions = Vec::new();
    let state = view.state;

    if let Some(rect) = layout.headline {
        draw_text("LET'S DO IT.", rect.x, rect.y + theme::FONT_SIZE_TITLE, theme::FONT_SIZE_TITLE, theme::TEXT_COLOR);
        let lines = [
            "Design a shirt that is yours alone.",
            "Pick a color, drop in your artwork,",
            "and place it exactly where you want it.",
        ];
        for (i, line) in lines.iter().enumerate() {
            let y = rect.y + theme::FONT_SIZE_TITLE + 36.0 + i as f32 * 22.0;
            draw_text(line, rect.x, y, theme::FONT_SIZE_CONTENT + 2.0, theme::TEXT_DIM);
        }
    }
    if let Some(rect) = layout.customize {
        if text_button(ctx, rect, "Customize It") {
            actions.push(UiAction::EnterEditing);
        }
    }
    if let Some(rect) = layout.back {
        if text_button(ctx, rect, "Go Back") {
            actions.push(UiAction::BackToIntro);
        }
    }
    if let Some(rect) = layout.preview {
        if text_button(ctx, rect, "Preview") {
            actions.push(UiAction::EnterPreview);
        }
    }
    if let Some(rect) = layout.edit {
        if text_button(ctx, rect, "Edit") {
            actions.push(UiAction::ExitPreview);
        }
    }

    for (tab, rect) in &layout.editor_tabs {
        let highlight = (view.editor == Some(*tab)).then_some(theme::PANEL_BORDER);
        if tab_button(ctx, *rect, tab.label(), highlight) {
            actions.push(UiAction::SelectEditorTab(*tab));
        }
    }
    if let Some(rect) = layout.download {
        if tab_button(ctx, rect, "Download", None) {
            actions.push(UiAction::Download);
        }
    }

    for (slot, rect) in &layout.filter_tabs {
        let highlight = state
            .slot(*slot)
            .active
            .then(|| state.base_color.with_alpha(0.5));
        if tab_button(ctx, *rect, slot.label(), highlight) {
            actions.push(UiAction::ToggleFilter(*slot));
        }
    }

    if let (Some(panel), Some(tab)) = (layout.panel, view.editor) {
        draw_rectangle(panel.x, panel.y, panel.w, panel.h, theme::PANEL_COLOR);
        draw_rectangle_lines(panel.x, panel.y, panel.w, panel.h, 1.0, theme::PANEL_BORDER);
        let title = match tab {
            EditorTab::Color => "Base color",
            EditorTab::File => "Decal image",
        };
        draw_text(title, panel.x + GAP, panel.y + 22.0, theme::FONT_SIZE_HEADER, theme::TEXT_COLOR);
        if let Some(close) = layout.close {
            draw_text_centered("x", &close, theme::FONT_SIZE_HEADER, theme::TEXT_DIM);
            if ctx.mouse.clicked(&close) {
                actions.push(UiAction::CloseEditor);
            }
        }

        for (rect, color) in layout.swatches.iter().zip(view.swatches) {
            if swatch(ctx, *rect, color.to_color(), *color == state.base_color) {
                actions.push(UiAction::PickColor(*color));
            }
        }

        if let Some(rect) = layout.choose_file {
            if text_button(ctx, rect, "Choose File") {
                actions.push(UiAction::ChooseFile);
            }
            let caption = match (view.reading, view.selected_file) {
                (true, _) => "Reading...".to_string(),
                (false, Some(name)) => format!("Apply {} to:", name),
                (false, None) => "No file selected".to_string(),
            };
            draw_text(&caption, rect.x, rect.bottom() + GAP + 14.0, theme::FONT_SIZE_SMALL, theme::TEXT_DIM);
        }
        for (slot, rect) in &layout.read_file {
            if text_button(ctx, *rect, slot.label()) {
                actions.push(UiAction::ReadFile(*slot));
            }
        }
    }

    if let Some(status) = view.status {
        let r = layout.status;
        draw_text(status, r.x, r.bottom() - 6.0, theme::FONT_SIZE_CONTENT, theme::TEXT_COLOR);
    }

    actions
}

#[cfg(test)]
mod tests {
    use super::*;

    fn editing(editor: Option<EditorTab>) -> OverlayLayout {
        OverlayLayout::new(1280.0, 800.0, ViewMode::Editing, editor, 12, Breakpoint::Desktop)
    }

    #[test]
    fn test_intro_only_has_customize() {
        let layout = OverlayLayout::new(1280.0, 800.0, ViewMode::Intro, None, 12, Breakpoint::Desktop);
        assert!(layout.customize.is_some());
        assert!(layout.back.is_none());
        assert!(layout.filter_tabs.is_empty());
        assert!(layout.editor_tabs.is_empty());
        // Scene center is free for the camera drag
        assert!(!layout.blocks(900.0, 400.0));
    }

    #[test]
    fn test_filter_tabs_in_order() {
        let layout = editing(None);
        let slots: Vec<SlotId> = layout.filter_tabs.iter().map(|(s, _)| *s).collect();
        assert_eq!(slots, SlotId::ALL.to_vec());
        for pair in layout.filter_tabs.windows(2) {
            assert!(pair[0].1.right() < pair[1].1.x);
        }
    }

    #[test]
    fn test_panel_only_with_editor() {
        assert!(editing(None).panel.is_none());

        let color = editing(Some(EditorTab::Color));
        assert!(color.panel.is_some());
        assert_eq!(color.swatches.len(), 12);
        assert!(color.read_file.is_empty());

        let file = editing(Some(EditorTab::File));
        assert!(file.choose_file.is_some());
        assert_eq!(file.read_file.len(), SlotId::ALL.len());
        let panel = file.panel.unwrap();
        for (_, r) in &file.read_file {
            assert!(r.bottom() <= panel.bottom());
        }
    }

    #[test]
    fn test_blocks_widgets_not_scene() {
        let layout = editing(Some(EditorTab::Color));
        let (_, tab) = layout.filter_tabs[0];
        assert!(layout.blocks(tab.center_x(), tab.center_y()));
        let panel = layout.panel.unwrap();
        assert!(layout.blocks(panel.center_x(), panel.center_y()));
        assert!(!layout.blocks(640.0, 400.0));
    }

    #[test]
    fn test_mobile_filters_fit_width() {
        let layout = OverlayLayout::new(360.0, 740.0, ViewMode::Editing, None, 12, Breakpoint::Mobile);
        let last = layout.filter_tabs.last().map(|(_, r)| *r).unwrap();
        let first = layout.filter_tabs[0].1;
        assert!(first.x >= 0.0);
        assert!(last.right() <= 360.0);
    }

    #[test]
    fn test_preview_has_only_edit() {
        let layout = OverlayLayout::new(1280.0, 800.0, ViewMode::Preview, Some(EditorTab::Color), 12, Breakpoint::Desktop);
        assert!(layout.edit.is_some());
        assert!(layout.panel.is_none());
        assert!(layout.filter_tabs.is_empty());
    }
}
