use statum::{machine, state};
use tracing::{debug, info, warn};

use crate::controller::backend::InputBackend;
use crate::controller::device::{Device, InputEvent};

// Registry errors
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("No joysticks were detected")]
    NoDevices,
}

// Define registry states using statum's state macro
#[state]
#[derive(Debug, Clone)]
pub enum RegistryState {
    Enumerating,
    Ready,
}

#[machine]
#[derive(Debug)]
pub struct DeviceRegistry<S: RegistryState> {
    // Where devices and events come from
    backend: Box<dyn InputBackend>,

    // Devices in enumeration order; fixed once Ready
    devices: Vec<Device>,
}

// Implementation for Enumerating state
impl DeviceRegistry<Enumerating> {
    pub fn create(backend: Box<dyn InputBackend>) -> Self {
        debug!("Creating device registry over {:?}", backend);
        Self::new(backend, Vec::new())
    }

    // Open every connected device and transition to Ready
    pub fn enumerate(mut self) -> Result<DeviceRegistry<Ready>, RegistryError> {
        let snapshots = self.backend.enumerate();
        if snapshots.is_empty() {
            warn!("No joysticks connected");
            return Err(RegistryError::NoDevices);
        }

        info!("Found {} joysticks", snapshots.len());
        self.devices = snapshots
            .into_iter()
            .enumerate()
            .map(|(index, snapshot)| Device::from_snapshot(index, snapshot))
            .collect();

        for device in &self.devices {
            info!(
                "  [{}] {}: {} axes, {} trackballs, {} hats, {} buttons",
                device.index(),
                device.name(),
                device.axis_count(),
                device.trackball_count(),
                device.hat_count(),
                device.button_count()
            );
        }

        Ok(self.transition())
    }
}

// Implementation for Ready state
impl DeviceRegistry<Ready> {
    pub fn devices(&self) -> &[Device] {
        &self.devices
    }

    pub fn devices_mut(&mut self) -> &mut [Device] {
        &mut self.devices
    }

    pub fn device_count(&self) -> usize {
        self.devices.len()
    }

    // Next queued input event from the backend, if any
    pub fn next_event(&mut self) -> Option<InputEvent> {
        self.backend.next_event()
    }
}
