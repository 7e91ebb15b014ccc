//! Joystick subsystem: device state and where it comes from
//!
//! 1. [`backend`] - the [`InputBackend`] seam between the registry and a gamepad library
//! 2. [`gilrs_backend`] - the gilrs implementation of that seam
//! 3. [`registry`] - startup enumeration and the fixed list of [`Device`]s
//! 4. [`device`] - per-device state arrays and the events that mutate them
//!
//! # Architecture
//!
//! ```text
//! gilrs ──► GilrsBackend ──► DeviceRegistry<Ready> ──► Device::apply
//!           (InputEvent)     (fixed device list)       (state arrays)
//! ```
//!
//! Everything runs on the UI thread; the backend is drained once per frame.

pub mod backend;
pub mod device;
pub mod gilrs_backend;
pub mod registry;

pub use backend::{BackendError, InputBackend};
pub use device::{apply_event, Device, DeviceError, DeviceSnapshot, InputEvent, InputKind};
pub use gilrs_backend::GilrsBackend;
pub use registry::{DeviceRegistry, Enumerating, Ready, RegistryError};
