//! Unified pointer input
//!
//! Mouse and touch are polled from macroquad each frame and turned into one
//! stream of [`PointerEvent`]s. Gesture state machines (camera rig, gizmos)
//! only ever see this stream, so touch and mouse drive them identically.
//!
//! Interrupted gestures surface as [`PointerPhase::Cancel`]: a mouse button
//! that is found released without a release edge, a mouse that leaves the
//! window mid-drag, or a touch the platform cancels.

use macroquad::input::{
    is_key_down, is_mouse_button_down, is_mouse_button_pressed, is_mouse_button_released,
    mouse_position, mouse_wheel, touches, KeyCode, MouseButton, TouchPhase,
};

/// Which physical pointer produced an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerSource {
    Mouse,
    Touch(u64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    Down,
    Move,
    Up,
    /// Gesture interrupted; owners commit their last known value
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub source: PointerSource,
    pub phase: PointerPhase,
    pub x: f32,
    pub y: f32,
}

impl PointerEvent {
    pub fn new(source: PointerSource, phase: PointerPhase, x: f32, y: f32) -> Self {
        Self { source, phase, x, y }
    }
}

/// Raw mouse sample for one frame
#[derive(Debug, Clone, Copy, Default)]
pub struct MouseSample {
    pub x: f32,
    pub y: f32,
    pub down: bool,
    pub pressed: bool,
    pub released: bool,
}

/// Everything the frame loop needs from input
#[derive(Debug, Clone, Default)]
pub struct FrameInput {
    pub events: Vec<PointerEvent>,
    /// Vertical wheel delta (positive = away from the user)
    pub wheel: f32,
    /// Primary pointer position for hover/hit testing
    pub pointer: (f32, f32),
    pub shift: bool,
}

/// Turns polled mouse/touch state into pointer events
#[derive(Debug, Default)]
pub struct PointerTracker {
    mouse_down: bool,
    last_mouse: (f32, f32),
    last_touch: Option<(f32, f32)>,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Poll macroquad for this frame's input
    pub fn poll(&mut self, screen_w: f32, screen_h: f32) -> FrameInput {
        let (mx, my) = mouse_position();
        let sample = MouseSample {
            x: mx,
            y: my,
            down: is_mouse_button_down(MouseButton::Left),
            pressed: is_mouse_button_pressed(MouseButton::Left),
            released: is_mouse_button_released(MouseButton::Left),
        };

        let mut events = self.mouse_events(sample, screen_w, screen_h);
        for touch in touches() {
            let phase = match touch.phase {
                TouchPhase::Started => PointerPhase::Down,
                TouchPhase::Moved => PointerPhase::Move,
                TouchPhase::Ended => PointerPhase::Up,
                TouchPhase::Cancelled => PointerPhase::Cancel,
                TouchPhase::Stationary => continue,
            };
            let (x, y) = (touch.position.x, touch.position.y);
            events.push(PointerEvent::new(PointerSource::Touch(touch.id), phase, x, y));
            self.last_touch = Some((x, y));
        }

        let pointer = if touches().is_empty() {
            (mx, my)
        } else {
            self.last_touch.unwrap_or((mx, my))
        };

        FrameInput {
            events,
            wheel: mouse_wheel().1,
            pointer,
            shift: is_key_down(KeyCode::LeftShift) || is_key_down(KeyCode::RightShift),
        }
    }

    /// Mouse edge detection. Pure so it can be tested without a window.
    pub fn mouse_events(&mut self, sample: MouseSample, screen_w: f32, screen_h: f32) -> Vec<PointerEvent> {
        let mut events = Vec::new();
        let pos = (sample.x, sample.y);
        let mouse = |phase| PointerEvent::new(PointerSource::Mouse, phase, sample.x, sample.y);
        let inside = sample.x >= 0.0 && sample.y >= 0.0 && sample.x <= screen_w && sample.y <= screen_h;

        if self.mouse_down {
            if sample.released {
                events.push(mouse(PointerPhase::Up));
                self.mouse_down = false;
            } else if !sample.down || !inside {
                // Release happened somewhere we never saw it
                events.push(mouse(PointerPhase::Cancel));
                self.mouse_down = false;
            } else if pos != self.last_mouse {
                events.push(mouse(PointerPhase::Move));
            }
        } else if sample.pressed && inside {
            events.push(mouse(PointerPhase::Down));
            self.mouse_down = true;
            if sample.released {
                // Press and release within one frame
                events.push(mouse(PointerPhase::Up));
                self.mouse_down = false;
            }
        }

        self.last_mouse = pos;
        events
    }
}
