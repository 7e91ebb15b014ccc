use tracing::debug;

/// Which state array an input index refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Axis,
    Trackball,
    Hat,
    Button,
}

impl std::fmt::Display for InputKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            InputKind::Axis => "axis",
            InputKind::Trackball => "trackball",
            InputKind::Hat => "hat",
            InputKind::Button => "button",
        };
        f.write_str(name)
    }
}

// Input state change reported by a backend
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    Axis {
        device: usize,
        index: usize,
        value: f32,
    },
    Trackball {
        device: usize,
        index: usize,
        dx: f32,
        dy: f32,
    },
    Hat {
        device: usize,
        index: usize,
        x: i8,
        y: i8,
    },
    Button {
        device: usize,
        index: usize,
        pressed: bool,
    },
}

impl InputEvent {
    /// Index of the device the event belongs to.
    pub fn device(&self) -> usize {
        match *self {
            InputEvent::Axis { device, .. }
            | InputEvent::Trackball { device, .. }
            | InputEvent::Hat { device, .. }
            | InputEvent::Button { device, .. } => device,
        }
    }
}

// Device errors
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum DeviceError {
    #[error("Unknown device index {0}")]
    UnknownDevice(usize),

    #[error("Device {device} has no {kind} {index} (count: {count})")]
    IndexOutOfRange {
        device: usize,
        kind: InputKind,
        index: usize,
        count: usize,
    },
}

/// Everything a backend knows about a device when it is first opened.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeviceSnapshot {
    pub name: String,
    pub axes: Vec<f32>,
    pub trackballs: Vec<(f32, f32)>,
    pub hats: Vec<(i8, i8)>,
    pub buttons: Vec<bool>,
}

/// Live state of one joystick.
///
/// The state arrays are sized once from the snapshot and only ever written
/// through [`Device::apply`], so the capability counts never change.
#[derive(Debug, Clone, PartialEq)]
pub struct Device {
    index: usize,
    name: String,
    axes: Vec<f32>,
    trackballs: Vec<(f32, f32)>,
    hats: Vec<(i8, i8)>,
    buttons: Vec<bool>,
}

impl Device {
    pub fn from_snapshot(index: usize, snapshot: DeviceSnapshot) -> Self {
        Self {
            index,
            name: snapshot.name,
            axes: snapshot.axes,
            trackballs: snapshot.trackballs,
            hats: snapshot.hats,
            buttons: snapshot.buttons,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn axes(&self) -> &[f32] {
        &self.axes
    }

    pub fn trackballs(&self) -> &[(f32, f32)] {
        &self.trackballs
    }

    pub fn hats(&self) -> &[(i8, i8)] {
        &self.hats
    }

    pub fn buttons(&self) -> &[bool] {
        &self.buttons
    }

    pub fn axis_count(&self) -> usize {
        self.axes.len()
    }

    pub fn trackball_count(&self) -> usize {
        self.trackballs.len()
    }

    pub fn hat_count(&self) -> usize {
        self.hats.len()
    }

    pub fn button_count(&self) -> usize {
        self.buttons.len()
    }

    /// Writes the event's value into the matching state slot.
    ///
    /// The device index of the event is not checked here; callers route events
    /// to the right device first.
    pub fn apply(&mut self, event: &InputEvent) -> Result<(), DeviceError> {
        let device = self.index;
        match *event {
            InputEvent::Axis { index, value, .. } => {
                *slot(&mut self.axes, device, InputKind::Axis, index)? = value;
            }
            InputEvent::Trackball { index, dx, dy, .. } => {
                *slot(&mut self.trackballs, device, InputKind::Trackball, index)? = (dx, dy);
            }
            InputEvent::Hat { index, x, y, .. } => {
                *slot(&mut self.hats, device, InputKind::Hat, index)? = (x, y);
            }
            InputEvent::Button { index, pressed, .. } => {
                *slot(&mut self.buttons, device, InputKind::Button, index)? = pressed;
            }
        }
        debug!("Device {} updated: {:?}", device, event);
        Ok(())
    }
}

fn slot<T>(
    values: &mut [T],
    device: usize,
    kind: InputKind,
    index: usize,
) -> Result<&mut T, DeviceError> {
    let count = values.len();
    values.get_mut(index).ok_or(DeviceError::IndexOutOfRange {
        device,
        kind,
        index,
        count,
    })
}

/// Routes an event to its device and applies it.
pub fn apply_event(devices: &mut [Device], event: &InputEvent) -> Result<(), DeviceError> {
    let index = event.device();
    devices
        .get_mut(index)
        .ok_or(DeviceError::UnknownDevice(index))?
        .apply(event)
}
