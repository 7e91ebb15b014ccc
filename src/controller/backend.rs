use std::fmt;

use crate::controller::device::{DeviceSnapshot, InputEvent};

// Backend errors
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("Failed to initialize input backend: {0}")]
    InitializationError(String),
}

/// Source of joystick devices and their input events.
///
/// Device indices in events refer to positions in the list returned by the
/// last call to [`InputBackend::enumerate`].
pub trait InputBackend: fmt::Debug {
    /// Opens every connected device and reports its initial state.
    fn enumerate(&mut self) -> Vec<DeviceSnapshot>;

    /// Next queued input event, `None` once the queue is drained. Never blocks.
    fn next_event(&mut self) -> Option<InputEvent>;
}
