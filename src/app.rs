//! Application state
//!
//! Ties the store, camera rig, gizmos and overlay together and routes each
//! frame's pointer stream:
//! - a press on an overlay widget belongs to the UI
//! - else a press on a gizmo handle starts that gizmo's drag
//! - else it starts the camera yaw drag
//!
//! Move/Up/Cancel follow whichever machine owns the pointer source.

use macroquad::logging::{info, warn};
use macroquad::math::Vec2;

use crate::config::CustomizerConfig;
use crate::decal::{self, GizmoController, GizmoScene, GizmoView};
use crate::export;
use crate::ingest::{self, PendingIngest, SelectedFile};
use crate::input::{FrameInput, PointerPhase, PointerTracker};
use crate::render::garment::model_matrix;
use crate::render::SceneRenderer;
use crate::rig::{Breakpoint, CameraRig};
use crate::store::{BaseColor, CustomizationStore, SlotId, ViewMode};
use crate::ui::{EditorTab, MouseState, OverlayLayout, UiAction, UiContext};

pub struct AppState {
    pub config: CustomizerConfig,
    pub store: CustomizationStore,
    pub rig: CameraRig,
    pub gizmos: GizmoController,
    pub renderer: SceneRenderer,
    pub ui: UiContext,
    pub pointer: PointerTracker,
    /// Open side panel, if any
    pub editor: Option<EditorTab>,
    pub selected_file: Option<SelectedFile>,
    pub pending: Option<PendingIngest>,
    /// Capture the next rendered frame before the overlay is drawn
    pub download_requested: bool,
    pub swatches: Vec<BaseColor>,
    /// Seconds since startup, advanced by `begin_frame`
    time: f64,
    status_message: Option<(String, f64)>,
}

impl AppState {
    pub fn new(config: CustomizerConfig) -> Self {
        let store = CustomizationStore::new(config.appearance.default_color(), config.decals.limits());
        let rig = CameraRig::new(config.camera.clone());
        let gizmos = GizmoController::new(config.decals.rotation_snap_degrees);
        let swatches = config.appearance.swatch_colors();
        Self {
            config,
            store,
            rig,
            gizmos,
            renderer: SceneRenderer::new(),
            ui: UiContext::new(),
            pointer: PointerTracker::new(),
            editor: None,
            selected_file: None,
            pending: None,
            download_requested: false,
            swatches,
            time: 0.0,
            status_message: None,
        }
    }

    pub fn begin_frame(&mut self, now: f64) {
        self.time = now;
    }

    pub fn breakpoint(&self, screen_w: f32) -> Breakpoint {
        Breakpoint::from_width(screen_w, &self.config.breakpoints)
    }

    // ========================================================================
    // Status line
    // ========================================================================

    /// Set a status message that will be displayed for a duration
    pub fn set_status(&mut self, message: &str, duration_secs: f64) {
        self.status_message = Some((message.to_string(), self.time + duration_secs));
    }

    /// Get current status message if not expired
    pub fn get_status(&self) -> Option<&str> {
        match &self.status_message {
            Some((msg, expiry)) if self.time < *expiry => Some(msg),
            _ => None,
        }
    }

    // ========================================================================
    // Layout and routing
    // ========================================================================

    pub fn layout(&self, screen_w: f32, screen_h: f32) -> OverlayLayout {
        OverlayLayout::new(
            screen_w,
            screen_h,
            self.store.state().view_mode,
            self.editor,
            self.swatches.len(),
            self.breakpoint(screen_w),
        )
    }

    pub fn gizmo_scene(&self, screen_w: f32, screen_h: f32) -> GizmoScene {
        GizmoScene {
            camera: self.rig.camera(),
            screen: Vec2::new(screen_w, screen_h),
            model: model_matrix(self.rig.model_yaw(), self.breakpoint(screen_w)),
            shape: self.renderer.shape,
        }
    }

    pub fn gizmo_views(&self, scene: &GizmoScene) -> Vec<GizmoView> {
        GizmoController::views(self.store.state(), scene)
    }

    /// Dispatch this frame's pointer events. Returns the overlay's view of
    /// the pointer (a press only when it landed on a widget).
    pub fn route_pointer(&mut self, input: &FrameInput, layout: &OverlayLayout, scene: &GizmoScene) -> MouseState {
        let mut mouse = MouseState {
            x: input.pointer.0,
            y: input.pointer.1,
            left_pressed: false,
        };

        for event in &input.events {
            if event.phase == PointerPhase::Down && layout.blocks(event.x, event.y) {
                mouse = MouseState { x: event.x, y: event.y, left_pressed: true };
                continue;
            }
            if self.gizmos.handle(event, &mut self.store, scene, input.shift) {
                continue;
            }
            self.rig.handle(event);
        }

        let views = self.gizmo_views(scene);
        self.gizmos.hover(&views, Vec2::new(input.pointer.0, input.pointer.1));
        mouse
    }

    /// Wheel resize. A consumed scroll on an active chest counts as a
    /// manipulation for the reset shortcut.
    pub fn handle_wheel(&mut self, delta: f32) {
        let outcome = decal::wheel_resize(&mut self.store, delta, self.config.decals.wheel_step);
        if outcome == decal::WheelOutcome::Consumed && self.store.state().slot(SlotId::Chest).active {
            self.gizmos.mark_manipulated(SlotId::Chest);
        }
    }

    pub fn handle_shortcuts(&mut self, escape: bool, reset: bool) {
        if escape && self.editor.is_some() {
            self.editor = None;
        }
        if reset && self.store.state().view_mode == ViewMode::Editing {
            if let Some(slot) = self.gizmos.last_slot() {
                self.store.reset_slot_transform(slot);
                self.set_status(&format!("{} decal reset", slot.label()), 2.0);
            }
        }
    }

    // ========================================================================
    // Actions
    // ========================================================================

    pub fn apply_action(&mut self, action: UiAction) {
        match action {
            UiAction::EnterEditing => self.store.set_view_mode(ViewMode::Editing),
            UiAction::BackToIntro => {
                self.editor = None;
                self.store.set_view_mode(ViewMode::Intro);
            }
            UiAction::EnterPreview => {
                self.editor = None;
                self.store.set_view_mode(ViewMode::Preview);
            }
            UiAction::ExitPreview => self.store.set_view_mode(ViewMode::Editing),
            UiAction::SelectEditorTab(tab) => {
                self.editor = if self.editor == Some(tab) { None } else { Some(tab) };
            }
            UiAction::CloseEditor => self.editor = None,
            UiAction::PickColor(color) => self.store.set_base_color(color),
            UiAction::ToggleFilter(slot) => {
                self.store.toggle_slot(slot);
            }
            UiAction::ChooseFile => self.choose_file(),
            UiAction::ReadFile(slot) => {
                if self.pending.is_some() {
                    self.set_status("Still reading the previous file", 2.0);
                    return;
                }
                // No file selected → nothing happens
                self.pending = ingest::start_read(self.selected_file.as_ref(), slot);
            }
            UiAction::Download => self.download_requested = true,
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn choose_file(&mut self) {
        let dialog = rfd::FileDialog::new().add_filter("Images", ingest::IMAGE_EXTENSIONS);
        if let Some(path) = dialog.pick_file() {
            let file = SelectedFile::new(path);
            self.set_status(&format!("Selected {}", file.name), 3.0);
            self.selected_file = Some(file);
        }
    }

    #[cfg(target_arch = "wasm32")]
    fn choose_file(&mut self) {
        self.set_status("File picking not available in browser", 3.0);
    }

    /// Apply a finished file read, if one is ready
    pub fn poll_ingest(&mut self) {
        let Some(pending) = self.pending.take() else {
            return;
        };
        match pending.poll() {
            Err(still_running) => self.pending = Some(still_running),
            Ok((slot, name, Ok(data_url))) => {
                ingest::apply_ingest(&mut self.store, slot, data_url);
                self.editor = None;
                info!("applied {} to {}", name, slot.label());
                self.set_status(&format!("{} applied to {}", name, slot.label()), 3.0);
            }
            Ok((slot, name, Err(e))) => {
                warn!("reading {} for {} failed: {}", name, slot.label(), e);
                self.set_status(&format!("Could not read {}: {}", name, e), 5.0);
            }
        }
    }

    /// Capture the frame just rendered and save it. Call before drawing the overlay.
    pub fn run_download(&mut self) {
        if !std::mem::take(&mut self.download_requested) {
            return;
        }
        let png = match export::capture_png() {
            Ok(png) => png,
            Err(e) => {
                warn!("capture failed: {}", e);
                self.set_status(&format!("Download failed: {}", e), 5.0);
                return;
            }
        };
        self.save_download(&png);
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn save_download(&mut self, png: &[u8]) {
        match export::save_with_dialog(png) {
            Ok(Some(path)) => self.set_status(&format!("Saved {}", path.display()), 3.0),
            Ok(None) => {}
            Err(e) => {
                warn!("saving screenshot failed: {}", e);
                self.set_status(&format!("Download failed: {}", e), 5.0);
            }
        }
    }

    #[cfg(target_arch = "wasm32")]
    fn save_download(&mut self, _png: &[u8]) {
        self.set_status("Download not available in browser", 3.0);
    }
}
