use std::collections::HashMap;

use gilrs::{Axis, Button, Event, EventType, Gamepad, GamepadId, Gilrs, GilrsBuilder};
use tracing::{debug, error, info, warn};

use crate::controller::backend::{BackendError, InputBackend};
use crate::controller::device::{DeviceSnapshot, InputEvent};

// Standard axes reported as analog channels, in display order
const ANALOG_AXES: [Axis; 6] = [
    Axis::LeftStickX,
    Axis::LeftStickY,
    Axis::LeftZ,
    Axis::RightStickX,
    Axis::RightStickY,
    Axis::RightZ,
];

// Analog triggers, reported by gilrs as buttons with a 0..1 value and shown
// as extra axis channels after the standard axes
const ANALOG_TRIGGERS: [Button; 2] = [Button::LeftTrigger2, Button::RightTrigger2];

const DPAD_AXES: [Axis; 2] = [Axis::DPadX, Axis::DPadY];

const BUTTONS: [Button; 15] = [
    Button::South,
    Button::East,
    Button::North,
    Button::West,
    Button::C,
    Button::Z,
    Button::LeftTrigger,
    Button::LeftTrigger2,
    Button::RightTrigger,
    Button::RightTrigger2,
    Button::Select,
    Button::Start,
    Button::Mode,
    Button::LeftThumb,
    Button::RightThumb,
];

const DPAD_BUTTONS: [Button; 4] = [
    Button::DPadUp,
    Button::DPadDown,
    Button::DPadLeft,
    Button::DPadRight,
];

// Which standard inputs a gamepad maps, frozen at enumeration
#[derive(Debug, Clone, PartialEq)]
struct GamepadLayout {
    index: usize,
    axes: Vec<Axis>,
    triggers: Vec<Button>,
    buttons: Vec<Button>,
    has_hat: bool,
}

impl GamepadLayout {
    fn probe(
        index: usize,
        has_axis: impl Fn(Axis) -> bool,
        has_button: impl Fn(Button) -> bool,
    ) -> Self {
        let axes = ANALOG_AXES.into_iter().filter(|a| has_axis(*a)).collect();
        let triggers = ANALOG_TRIGGERS.into_iter().filter(|b| has_button(*b)).collect();
        let buttons = BUTTONS.into_iter().filter(|b| has_button(*b)).collect();
        let has_hat =
            DPAD_AXES.into_iter().any(&has_axis) || DPAD_BUTTONS.into_iter().any(&has_button);
        Self {
            index,
            axes,
            triggers,
            buttons,
            has_hat,
        }
    }

    fn axis_count(&self) -> usize {
        self.axes.len() + self.triggers.len()
    }

    fn axis_event(&self, axis: Axis, value: f32) -> Option<InputEvent> {
        let index = self.axes.iter().position(|a| *a == axis)?;
        Some(InputEvent::Axis {
            device: self.index,
            index,
            value,
        })
    }

    fn trigger_event(&self, button: Button, value: f32) -> Option<InputEvent> {
        let position = self.triggers.iter().position(|b| *b == button)?;
        Some(InputEvent::Axis {
            device: self.index,
            index: self.axes.len() + position,
            value: trigger_axis(value),
        })
    }

    fn snapshot(&self, gamepad: &Gamepad<'_>) -> DeviceSnapshot {
        DeviceSnapshot {
            name: gamepad.name().to_string(),
            axes: self
                .axes
                .iter()
                .map(|a| gamepad.value(*a))
                .chain(self.triggers.iter().map(|b| {
                    trigger_axis(gamepad.button_data(*b).map_or(0.0, |d| d.value()))
                }))
                .collect(),
            trackballs: Vec::new(),
            hats: if self.has_hat {
                vec![hat_value(gamepad)]
            } else {
                Vec::new()
            },
            buttons: self.buttons.iter().map(|b| gamepad.is_pressed(*b)).collect(),
        }
    }
}

/// gilrs-backed device source.
///
/// gilrs normalizes controllers to a standard layout, so a device's axes and
/// buttons are the standard ones it maps. Analog triggers follow the axes as
/// extra channels in [-1, 1], the d-pad becomes a single hat and there are
/// never trackballs.
#[derive(Debug)]
pub struct GilrsBackend {
    gilrs: Gilrs,
    layouts: HashMap<GamepadId, GamepadLayout>,
}

impl GilrsBackend {
    pub fn create(default_filters: bool) -> Result<Self, BackendError> {
        info!("Initializing gilrs controller interface (default filters: {})", default_filters);
        let gilrs = match GilrsBuilder::new().with_default_filters(default_filters).build() {
            Ok(g) => {
                info!("Successfully initialized gilrs");
                g
            }
            Err(e) => {
                error!("Failed to initialize gilrs: {}", e);
                return Err(BackendError::InitializationError(e.to_string()));
            }
        };

        Ok(Self {
            gilrs,
            layouts: HashMap::new(),
        })
    }

    fn hat_event(&self, id: GamepadId, index: usize) -> InputEvent {
        let (x, y) = hat_value(&self.gilrs.gamepad(id));
        InputEvent::Hat {
            device: index,
            index: 0,
            x,
            y,
        }
    }

    fn convert_gilrs_event(&self, id: GamepadId, event: EventType) -> Option<InputEvent> {
        let Some(layout) = self.layouts.get(&id) else {
            debug!("Skipping event from gamepad not present at startup: {}", id);
            return None;
        };
        let device = layout.index;

        match event {
            EventType::AxisChanged(axis, value, _) => {
                if DPAD_AXES.contains(&axis) {
                    return layout.has_hat.then(|| self.hat_event(id, device));
                }
                let input = layout.axis_event(axis, value);
                if input.is_none() {
                    debug!("Ignoring unmapped axis: {:?}", axis);
                }
                input
            }
            EventType::ButtonChanged(button, value, _) => layout.trigger_event(button, value),
            EventType::ButtonPressed(button, _) | EventType::ButtonReleased(button, _) => {
                let pressed = matches!(event, EventType::ButtonPressed(..));
                if DPAD_BUTTONS.contains(&button) {
                    return layout.has_hat.then(|| self.hat_event(id, device));
                }
                match layout.buttons.iter().position(|b| *b == button) {
                    Some(index) => Some(InputEvent::Button {
                        device,
                        index,
                        pressed,
                    }),
                    None => {
                        debug!("Ignoring unmapped button: {:?}", button);
                        None
                    }
                }
            }
            EventType::Connected => {
                info!("Controller connected event detected for {}, ignoring", id);
                None
            }
            EventType::Disconnected => {
                warn!("Controller {} disconnected, its panel keeps the last state", id);
                None
            }
            _ => None,
        }
    }
}

impl InputBackend for GilrsBackend {
    fn enumerate(&mut self) -> Vec<DeviceSnapshot> {
        self.layouts.clear();
        let mut snapshots = Vec::new();

        for (index, (id, gamepad)) in self.gilrs.gamepads().enumerate() {
            let layout = GamepadLayout::probe(
                index,
                |a| gamepad.axis_code(a).is_some(),
                |b| gamepad.button_code(b).is_some(),
            );
            info!(
                "  [{}] ID: {}, Name: {}, axes: {}, buttons: {}, hat: {}",
                index,
                id,
                gamepad.name(),
                layout.axis_count(),
                layout.buttons.len(),
                layout.has_hat
            );
            snapshots.push(layout.snapshot(&gamepad));
            self.layouts.insert(id, layout);
        }

        snapshots
    }

    fn next_event(&mut self) -> Option<InputEvent> {
        while let Some(Event { id, event, .. }) = self.gilrs.next_event() {
            if let Some(input) = self.convert_gilrs_event(id, event) {
                return Some(input);
            }
        }
        None
    }
}

fn hat_value(gamepad: &Gamepad<'_>) -> (i8, i8) {
    fold_hat(
        [
            gamepad.is_pressed(Button::DPadLeft),
            gamepad.is_pressed(Button::DPadRight),
            gamepad.is_pressed(Button::DPadUp),
            gamepad.is_pressed(Button::DPadDown),
        ],
        (gamepad.value(Axis::DPadX), gamepad.value(Axis::DPadY)),
    )
}

// Buttons are [left, right, up, down]; a pressed button wins over the axis
fn fold_hat(buttons: [bool; 4], axes: (f32, f32)) -> (i8, i8) {
    let [left, right, up, down] = buttons.map(i8::from);
    let x = match right - left {
        0 => axis_direction(axes.0),
        x => x,
    };
    let y = match up - down {
        0 => axis_direction(axes.1),
        y => y,
    };
    (x, y)
}

// Trigger travel 0..1 onto the axis range, released at -1
fn trigger_axis(value: f32) -> f32 {
    value.clamp(0.0, 1.0) * 2.0 - 1.0
}

fn axis_direction(value: f32) -> i8 {
    if value > 0.5 {
        1
    } else if value < -0.5 {
        -1
    } else {
        0
    }
}
