//! Layout arithmetic shared by the window sizer and the renderer.
//!
//! Everything here is pure geometry in egui points so it can be checked
//! without a window.

use eframe::egui::{pos2, vec2, Pos2, Rect, Vec2};

use crate::controller::Device;

/// Buttons shown per row of the button grid.
pub const BUTTONS_PER_ROW: usize = 10;

/// Lines every panel has regardless of capabilities: the name and four labels.
pub const HEADER_LINES: usize = 5;

/// Text used to size a panel that has only short names.
pub const MIN_PANEL_TEXT: &str = "WWWWWWWWWWWWW";

/// Indent of axis lines, covered by the slider.
pub const SLIDER_INDENT: &str = "    ";

/// Indent of hat lines, covered by the hat indicator.
pub const HAT_INDENT: &str = "  ";

/// Line height and string widths of the panel font.
pub trait FontMetrics {
    fn line_height(&self) -> f32;
    fn text_width(&self, text: &str) -> f32;
}

/// Every glyph has the same advance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedMetrics {
    pub advance: f32,
    pub line_height: f32,
}

impl FontMetrics for FixedMetrics {
    fn line_height(&self) -> f32 {
        self.line_height
    }

    fn text_width(&self, text: &str) -> f32 {
        text.chars().count() as f32 * self.advance
    }
}

/// Font measurements the renderer needs, taken once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PanelMetrics {
    pub line_height: f32,
    /// Width of the axis line indent
    pub slider_width: f32,
    /// Width of the hat line indent
    pub hat_width: f32,
}

impl PanelMetrics {
    pub fn measure(metrics: &dyn FontMetrics) -> Self {
        Self {
            line_height: metrics.line_height(),
            slider_width: metrics.text_width(SLIDER_INDENT),
            hat_width: metrics.text_width(HAT_INDENT),
        }
    }
}

/// Number of button grid rows for `buttons` buttons.
pub fn button_rows(buttons: usize) -> usize {
    buttons.div_ceil(BUTTONS_PER_ROW)
}

/// Number of text lines in a device's panel.
pub fn panel_line_count(device: &Device) -> usize {
    HEADER_LINES
        + device.axis_count()
        + device.trackball_count()
        + device.hat_count()
        + button_rows(device.button_count())
}

/// Height a panel needs to show every line of `device`.
pub fn panel_height(device: &Device, metrics: &dyn FontMetrics) -> f32 {
    panel_line_count(device) as f32 * metrics.line_height()
}

/// Window size that fits the densest panel without clipping.
pub fn recommended_size(devices: &[Device], metrics: &dyn FontMetrics) -> Vec2 {
    let height = devices
        .iter()
        .map(|d| panel_height(d, metrics))
        .fold(0.0, f32::max);
    let column = devices
        .iter()
        .map(|d| metrics.text_width(d.name()))
        .fold(metrics.text_width(MIN_PANEL_TEXT), f32::max);
    vec2(column * devices.len() as f32, height)
}

/// Current window size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(size: Vec2) -> Self {
        Self {
            width: size.x,
            height: size.y,
        }
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    /// Width of one device column.
    pub fn column_width(&self, device_count: usize) -> f32 {
        if device_count == 0 {
            return self.width;
        }
        (self.width / device_count as f32).floor()
    }

    /// Region of the device at `index`.
    pub fn column(&self, index: usize, device_count: usize) -> Rect {
        let width = self.column_width(device_count);
        Rect::from_min_size(pos2(width * index as f32, 0.0), vec2(width, self.height))
    }
}

/// Rectangle of text line `line` inside `panel`, `width` wide.
pub fn line_rect(panel: Rect, line: usize, width: f32, line_height: f32) -> Rect {
    Rect::from_min_size(
        pos2(panel.min.x, panel.min.y + line as f32 * line_height),
        vec2(width, line_height),
    )
}

/// Panel line of axis `index`.
pub fn axis_line(index: usize) -> usize {
    2 + index
}

/// Panel line of hat `index`.
pub fn hat_line(device: &Device, index: usize) -> usize {
    4 + device.axis_count() + device.trackball_count() + index
}

/// Horizontal slider within a line rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderGeometry {
    /// Track line, inset by half an indicator on each side.
    pub track: Rect,
    /// Top-left corner of the indicator.
    pub indicator: Pos2,
}

/// Offset of the indicator along a track of `span` points.
///
/// Maps [-1, 1] onto [0, span]; values outside the range stick to the ends.
pub fn slider_offset(value: f32, span: f32) -> f32 {
    span * (value.clamp(-1.0, 1.0) + 1.0) / 2.0
}

pub fn slider_geometry(area: Rect, indicator_size: f32, value: f32) -> SliderGeometry {
    let top = area.min.y + (area.height() - indicator_size) / 2.0;
    let span = (area.width() - indicator_size).max(0.0);
    let half = indicator_size / 2.0;
    SliderGeometry {
        track: Rect::from_min_size(pos2(area.min.x + half, top + half - 2.0), vec2(span, 4.0)),
        indicator: pos2(area.min.x + slider_offset(value, span), top),
    }
}

/// Hat indicator box within a line rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HatGeometry {
    /// Square bounding box, centred in the area.
    pub frame: Rect,
    /// Top-left corner of the indicator.
    pub indicator: Pos2,
}

/// Offset of the indicator from the top-left of a box with `span` points of travel.
///
/// Screen y grows downwards, so a positive hat y moves the indicator up.
pub fn hat_offset(x: i8, y: i8, span: f32) -> Vec2 {
    let x = f32::from(x.clamp(-1, 1));
    let y = f32::from(y.clamp(-1, 1));
    vec2((x + 1.0) * span / 2.0, (1.0 - y) * span / 2.0)
}

pub fn hat_geometry(area: Rect, indicator_size: f32, value: (i8, i8)) -> HatGeometry {
    let side = area.width().min(area.height());
    let frame = Rect::from_center_size(area.center(), vec2(side, side));
    let offset = hat_offset(value.0, value.1, (side - indicator_size).max(0.0));
    HatGeometry {
        frame,
        indicator: frame.min + offset,
    }
}

/// Positions of the hat box tick marks as fractions of its side.
pub const HAT_TICKS: [f32; 3] = [0.25, 0.5, 0.75];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::DeviceSnapshot;

    const METRICS: FixedMetrics = FixedMetrics {
        advance: 12.0,
        line_height: 24.0,
    };

    fn device(name: &str, axes: usize, balls: usize, hats: usize, buttons: usize) -> Device {
        Device::from_snapshot(
            0,
            DeviceSnapshot {
                name: name.to_string(),
                axes: vec![0.0; axes],
                trackballs: vec![(0.0, 0.0); balls],
                hats: vec![(0, 0); hats],
                buttons: vec![false; buttons],
            },
        )
    }

    #[test]
    fn test_panel_height_formula() {
        for (a, b, h, n) in [(0, 0, 0, 0), (6, 0, 1, 15), (2, 1, 2, 10), (4, 2, 0, 21)] {
            let d = device("Pad", a, b, h, n);
            let expected = (5 + a + b + h + n.div_ceil(10)) as f32 * 24.0;
            assert_eq!(panel_height(&d, &METRICS), expected, "{a} {b} {h} {n}");
        }
    }

    #[test]
    fn test_recommended_size_uses_densest_panel_and_widest_name() {
        let devices = [
            device("Short", 2, 0, 1, 4),
            device("A rather long joystick name", 6, 1, 1, 32),
        ];
        let size = recommended_size(&devices, &METRICS);

        assert_eq!(size.y, (5 + 6 + 1 + 1 + 4) as f32 * 24.0);
        assert_eq!(size.x, 27.0 * 12.0 * 2.0);
    }

    #[test]
    fn test_recommended_size_has_minimum_column_width() {
        let size = recommended_size(&[device("X", 0, 0, 0, 0)], &METRICS);
        assert_eq!(size.x, 13.0 * 12.0);
        assert_eq!(size.y, 5.0 * 24.0);
    }

    #[test]
    fn test_resize_changes_column_width() {
        let mut viewport = Viewport::new(vec2(600.0, 400.0));
        assert_eq!(viewport.column_width(3), 200.0);

        viewport.resize(900.0, 300.0);
        assert_eq!(viewport.column_width(3), 300.0);
        assert_eq!(viewport.column(2, 3), Rect::from_min_size(pos2(600.0, 0.0), vec2(300.0, 300.0)));
    }

    #[test]
    fn test_slider_offset_is_monotonic() {
        let span = 38.0;
        let mut last = slider_offset(-1.0, span);
        assert_eq!(last, 0.0);
        for step in 1..=200 {
            let value = -1.0 + step as f32 / 100.0;
            let offset = slider_offset(value, span);
            assert!(offset > last, "offset at {value} did not increase");
            last = offset;
        }
        assert_eq!(last, span);
        assert_eq!(slider_offset(1.5, span), span);
        assert_eq!(slider_offset(-3.0, span), 0.0);
    }

    #[test]
    fn test_slider_geometry_centres_indicator_vertically() {
        let area = Rect::from_min_size(pos2(100.0, 48.0), vec2(48.0, 24.0));
        let slider = slider_geometry(area, 10.0, 0.0);

        assert_eq!(slider.indicator, pos2(100.0 + 19.0, 55.0));
        assert_eq!(slider.track.min, pos2(105.0, 58.0));
        assert_eq!(slider.track.width(), 38.0);
    }

    #[test]
    fn test_hat_offset_inverts_y() {
        let span = 14.0;
        assert_eq!(hat_offset(0, 0, span), vec2(7.0, 7.0));
        assert_eq!(hat_offset(0, 1, span).y, 0.0);
        assert_eq!(hat_offset(0, -1, span).y, 14.0);
        assert_eq!(hat_offset(1, 0, span).x, 14.0);
        assert_eq!(hat_offset(-1, 0, span).x, 0.0);
    }

    #[test]
    fn test_hat_geometry_is_square_and_centred() {
        let area = Rect::from_min_size(pos2(0.0, 24.0), vec2(24.0, 30.0));
        let hat = hat_geometry(area, 10.0, (1, 1));

        assert_eq!(hat.frame.width(), 24.0);
        assert_eq!(hat.frame.height(), 24.0);
        assert_eq!(hat.frame.center(), area.center());
        assert_eq!(hat.indicator, pos2(hat.frame.min.x + 14.0, hat.frame.min.y));
    }

    #[test]
    fn test_panel_metrics_measure_indents() {
        let measured = PanelMetrics::measure(&METRICS);
        assert_eq!(measured.line_height, 24.0);
        assert_eq!(measured.slider_width, 48.0);
        assert_eq!(measured.hat_width, 24.0);
    }

    #[test]
    fn test_line_positions() {
        let d = device("Pad", 3, 2, 2, 0);
        assert_eq!(axis_line(0), 2);
        assert_eq!(hat_line(&d, 1), 4 + 3 + 2 + 1);
        let rect = line_rect(Rect::from_min_size(pos2(50.0, 0.0), vec2(100.0, 500.0)), 3, 48.0, 24.0);
        assert_eq!(rect.min, pos2(50.0, 72.0));
    }
}
