//! Decal Studio: an interactive 3D garment customizer
//!
//! Pick a base color, drop artwork into decal slots and place it on the
//! garment with an on-screen gizmo:
//! - Chest, back and shoulder decals glued to the garment surface
//! - Full-wrap texture over the whole garment
//! - Drag to spin the garment, damped camera per view mode and screen size
//! - Preview turntable and PNG download

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod app;
mod config;
mod decal;
mod export;
mod ingest;
mod input;
mod ray;
mod render;
mod rig;
mod store;
mod ui;

use macroquad::logging::{debug, info, warn};
use macroquad::prelude::*;

use app::AppState;
use config::{ConfigError, CustomizerConfig, CONFIG_PATH};
use ui::{draw_overlay, theme, OverlayView};

fn window_conf() -> Conf {
    Conf {
        window_title: format!("Decal Studio v{}", VERSION),
        window_width: 1280,
        window_height: 800,
        window_resizable: true,
        high_dpi: true,
        sample_count: 4,
        ..Default::default()
    }
}

/// Load the RON config (works natively and in the browser)
async fn load_config() -> Result<CustomizerConfig, ConfigError> {
    let text = macroquad::file::load_string(CONFIG_PATH)
        .await
        .map_err(|e| ConfigError::Io(e.to_string()))?;
    CustomizerConfig::from_ron_str(&text)
}

#[macroquad::main(window_conf)]
async fn main() {
    // Initialize crash logging FIRST (before any other code)
    #[cfg(not(target_arch = "wasm32"))]
    crashlog::setup!(crashlog::cargo_metadata!().capitalized(), false);

    let config = match load_config().await {
        Ok(config) => {
            info!("loaded config from {}", CONFIG_PATH);
            config
        }
        Err(e) => {
            warn!("using default config ({}): {}", CONFIG_PATH, e);
            CustomizerConfig::default()
        }
    };

    // Touches are routed as their own pointer sources
    simulate_mouse_with_touch(false);

    let mut app = AppState::new(config);
    app.store.subscribe(|change, state| {
        debug!("store: {:?} (view {:?})", change, state.view_mode);
    });
    let breakpoint = app.breakpoint(screen_width());
    app.rig.reset(app.store.state().view_mode, breakpoint);

    loop {
        app.begin_frame(get_time());
        let (w, h) = (screen_width(), screen_height());
        let breakpoint = app.breakpoint(w);

        // Input: overlay first, then gizmos, then the camera
        let input = app.pointer.poll(w, h);
        let layout = app.layout(w, h);
        let scene = app.gizmo_scene(w, h);
        let mouse = app.route_pointer(&input, &layout, &scene);
        app.handle_wheel(input.wheel);
        app.handle_shortcuts(is_key_pressed(KeyCode::Escape), is_key_pressed(KeyCode::R));
        app.poll_ingest();

        let mode = app.store.state().view_mode;
        app.rig.update(get_frame_time(), mode, breakpoint);

        // Scene
        clear_background(theme::BACKDROP_COLOR);
        app.renderer.draw(app.store.state(), &app.rig, breakpoint);
        app.run_download();

        // Overlay
        let scene = app.gizmo_scene(w, h);
        let views = app.gizmo_views(&scene);
        app.gizmos.draw(&views);

        app.ui.begin_frame(mouse);
        let status = app.get_status().map(str::to_owned);
        let view = OverlayView {
            state: app.store.state(),
            editor: app.editor,
            swatches: &app.swatches,
            selected_file: app.selected_file.as_ref().map(|f| f.name.as_str()),
            reading: app.pending.is_some(),
            status: status.as_deref(),
        };
        let actions = draw_overlay(&mut app.ui, &layout, &view);
        for action in actions {
            app.apply_action(action);
        }

        next_frame().await;
    }
}
