//! Text content of a device panel.

use crate::controller::Device;
use crate::layout::{BUTTONS_PER_ROW, HAT_INDENT, SLIDER_INDENT};

/// How a panel line is coloured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    /// Labels: the device name and the per-category headers
    Static,
    /// Live values
    Dynamic,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelLine {
    pub text: String,
    pub style: LineStyle,
}

impl PanelLine {
    fn label(text: String) -> Self {
        Self {
            text,
            style: LineStyle::Static,
        }
    }

    fn value(text: String) -> Self {
        Self {
            text,
            style: LineStyle::Dynamic,
        }
    }
}

/// All text lines of a device panel, top to bottom.
///
/// The line count always matches [`crate::layout::panel_line_count`].
pub fn panel_lines(device: &Device) -> Vec<PanelLine> {
    let mut lines = vec![
        PanelLine::label(device.name().to_string()),
        PanelLine::label(format!("{} axes:", device.axis_count())),
    ];
    lines.extend(device.axes().iter().enumerate().map(|(i, v)| {
        PanelLine::value(format!("{SLIDER_INDENT}{i}={v:+.3}"))
    }));

    lines.push(PanelLine::label(format!("{} trackballs:", device.trackball_count())));
    lines.extend(
        device
            .trackballs()
            .iter()
            .enumerate()
            .map(|(i, (dx, dy))| PanelLine::value(format!("{i}={dx:+.2},{dy:+.2}"))),
    );

    lines.push(PanelLine::label(format!("{} hats:", device.hat_count())));
    lines.extend(
        device
            .hats()
            .iter()
            .enumerate()
            .map(|(i, (x, y))| PanelLine::value(format!("{HAT_INDENT}{i}={x:+},{y:+}"))),
    );

    lines.push(PanelLine::label(format!("{} buttons:", device.button_count())));
    lines.extend(button_grid(device.buttons()).into_iter().map(PanelLine::value));
    lines
}

/// Packs button states into rows of ten cells.
///
/// A pressed button shows the last digit of its index, a released one a blank.
pub fn button_grid(buttons: &[bool]) -> Vec<String> {
    buttons
        .chunks(BUTTONS_PER_ROW)
        .map(|row| {
            row.iter()
                .enumerate()
                .map(|(i, pressed)| {
                    if *pressed {
                        char::from_digit(i as u32, 10).unwrap_or(' ')
                    } else {
                        ' '
                    }
                })
                .collect()
        })
        .collect()
}
