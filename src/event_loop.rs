//! Event dispatch for the main window.
//!
//! The loop has two states. Every event either mutates device state or the
//! viewport and keeps it `Running`, or ends it for good.

use eframe::egui::Key;
use tracing::{debug, info, warn};

use crate::controller::{apply_event, Device, InputEvent};
use crate::layout::Viewport;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Terminated,
}

/// Anything the loop reacts to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LoopEvent {
    /// The window was asked to close
    Quit,
    KeyPressed(Key),
    Resize { width: f32, height: f32 },
    Input(InputEvent),
}

/// Keys that end the program.
pub fn is_quit_key(key: Key) -> bool {
    matches!(key, Key::Escape | Key::Q)
}

#[derive(Debug)]
pub struct EventLoop {
    state: LoopState,
}

impl Default for EventLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl EventLoop {
    pub fn new() -> Self {
        Self {
            state: LoopState::Running,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == LoopState::Running
    }

    /// Applies one event. Once terminated, further events are ignored.
    pub fn dispatch(
        &mut self,
        event: LoopEvent,
        devices: &mut [Device],
        viewport: &mut Viewport,
    ) -> LoopState {
        if !self.is_running() {
            debug!("Ignoring {:?} after termination", event);
            return self.state;
        }

        match event {
            LoopEvent::Quit => {
                info!("Quit requested");
                self.state = LoopState::Terminated;
            }
            LoopEvent::KeyPressed(key) if is_quit_key(key) => {
                info!("Quit key {:?} pressed", key);
                self.state = LoopState::Terminated;
            }
            LoopEvent::KeyPressed(_) => {}
            LoopEvent::Resize { width, height } => {
                debug!("Window resized to {}x{}", width, height);
                viewport.resize(width, height);
            }
            LoopEvent::Input(input) => {
                if let Err(e) = apply_event(devices, &input) {
                    warn!("Dropping input event: {}", e);
                }
            }
        }

        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::DeviceSnapshot;
    use eframe::egui::vec2;

    fn setup() -> (Vec<Device>, Viewport) {
        let devices = (0..2)
            .map(|i| {
                Device::from_snapshot(
                    i,
                    DeviceSnapshot {
                        name: format!("Pad {i}"),
                        axes: vec![0.0; 4],
                        trackballs: vec![(0.0, 0.0)],
                        hats: vec![(0, 0)],
                        buttons: vec![false; 15],
                    },
                )
            })
            .collect();
        (devices, Viewport::new(vec2(400.0, 300.0)))
    }

    #[test]
    fn test_quit_event_terminates() {
        let (mut devices, mut viewport) = setup();
        let mut event_loop = EventLoop::new();

        assert_eq!(
            event_loop.dispatch(LoopEvent::Quit, &mut devices, &mut viewport),
            LoopState::Terminated
        );
    }

    #[test]
    fn test_quit_keys_terminate() {
        for key in [Key::Escape, Key::Q] {
            let (mut devices, mut viewport) = setup();
            let mut event_loop = EventLoop::new();
            event_loop.dispatch(LoopEvent::KeyPressed(key), &mut devices, &mut viewport);
            assert_eq!(event_loop.state(), LoopState::Terminated, "{key:?}");
        }
    }

    #[test]
    fn test_other_keys_keep_running() {
        let (mut devices, mut viewport) = setup();
        let mut event_loop = EventLoop::new();

        for key in [Key::W, Key::Space, Key::Enter] {
            event_loop.dispatch(LoopEvent::KeyPressed(key), &mut devices, &mut viewport);
        }
        assert!(event_loop.is_running());
    }

    #[test]
    fn test_input_events_update_matching_device() {
        let (mut devices, mut viewport) = setup();
        let mut event_loop = EventLoop::new();

        for input in [
            InputEvent::Axis { device: 1, index: 3, value: 0.75 },
            InputEvent::Trackball { device: 0, index: 0, dx: 2.0, dy: -1.0 },
            InputEvent::Hat { device: 1, index: 0, x: 1, y: -1 },
            InputEvent::Button { device: 0, index: 12, pressed: true },
        ] {
            let state = event_loop.dispatch(LoopEvent::Input(input), &mut devices, &mut viewport);
            assert_eq!(state, LoopState::Running);
        }

        assert_eq!(devices[1].axes()[3], 0.75);
        assert_eq!(devices[0].trackballs()[0], (2.0, -1.0));
        assert_eq!(devices[1].hats()[0], (1, -1));
        assert!(devices[0].buttons()[12]);
        assert!(!devices[1].buttons()[12]);
    }

    #[test]
    fn test_bad_indices_are_dropped() {
        let (mut devices, mut viewport) = setup();
        let before = devices.clone();
        let mut event_loop = EventLoop::new();

        event_loop.dispatch(
            LoopEvent::Input(InputEvent::Button { device: 0, index: 99, pressed: true }),
            &mut devices,
            &mut viewport,
        );
        event_loop.dispatch(
            LoopEvent::Input(InputEvent::Axis { device: 7, index: 0, value: 1.0 }),
            &mut devices,
            &mut viewport,
        );

        assert!(event_loop.is_running());
        assert_eq!(devices, before);
    }

    #[test]
    fn test_resize_updates_viewport_only() {
        let (mut devices, mut viewport) = setup();
        let before = devices.clone();
        let mut event_loop = EventLoop::new();

        event_loop.dispatch(
            LoopEvent::Resize { width: 1000.0, height: 500.0 },
            &mut devices,
            &mut viewport,
        );

        assert_eq!(viewport.column_width(devices.len()), 500.0);
        assert_eq!(viewport.height, 500.0);
        assert_eq!(devices, before);
    }

    #[test]
    fn test_no_transition_out_of_terminated() {
        let (mut devices, mut viewport) = setup();
        let mut event_loop = EventLoop::new();
        event_loop.dispatch(LoopEvent::Quit, &mut devices, &mut viewport);

        let state = event_loop.dispatch(
            LoopEvent::Input(InputEvent::Axis { device: 0, index: 0, value: 1.0 }),
            &mut devices,
            &mut viewport,
        );

        assert_eq!(state, LoopState::Terminated);
        assert_eq!(devices[0].axes()[0], 0.0);
    }
}
