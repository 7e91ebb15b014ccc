//! Low-level drawing primitives for the device panels
//!
//! Sliders, hat boxes and the shaded indicator shared by both.

use eframe::egui::{pos2, vec2, Color32, Painter, Pos2, Rect, Stroke, Vec2};

use crate::layout::{hat_geometry, slider_geometry, HAT_TICKS};
use crate::ui::common::UiColors;

/// One disc of the shaded indicator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shade {
    /// Centre relative to the indicator's top-left corner
    pub center: Vec2,
    pub radius: f32,
    pub color: Color32,
}

/// Discs that make up an indicator `size` points wide, back to front.
///
/// The outermost disc has the base colour; each smaller disc is lighter and
/// drifts toward the upper-left, ending in a highlight of the light colour.
pub fn indicator_shades(size: f32, base: Color32, light: Color32) -> Vec<Shade> {
    let size = size.round().max(2.0) as i32;
    let half = size / 2;
    let blend = |from: u8, to: u8, i: i32| -> u8 {
        (i32::from(from) + (i * (i32::from(to) - i32::from(from))).div_euclid(half)) as u8
    };

    (0..=half)
        .rev()
        .map(|i| {
            let offset = (size / 4 + i / 2 + 1) as f32;
            Shade {
                center: vec2(offset, offset),
                radius: (i as f32).max(0.5),
                color: Color32::from_rgb(
                    blend(light.r(), base.r(), i),
                    blend(light.g(), base.g(), i),
                    blend(light.b(), base.b(), i),
                ),
            }
        })
        .collect()
}

pub fn draw_indicator(painter: &Painter, top_left: Pos2, shades: &[Shade]) {
    for shade in shades {
        painter.circle_filled(top_left + shade.center, shade.radius, shade.color);
    }
}

/// Draw a horizontal slider for an axis value in [-1, 1]
pub fn draw_slider(
    painter: &Painter,
    area: Rect,
    indicator_size: f32,
    shades: &[Shade],
    value: f32,
    colors: &UiColors,
) {
    let slider = slider_geometry(area, indicator_size, value);
    let track = slider.track;

    // Two-tone track: dark upper half, light lower half
    painter.rect_filled(
        Rect::from_min_size(track.min, vec2(track.width(), 2.0)),
        0.0,
        colors.track,
    );
    painter.rect_filled(
        Rect::from_min_size(pos2(track.min.x, track.min.y + 2.0), vec2(track.width(), 2.0)),
        0.0,
        colors.track_highlight,
    );

    // End ticks
    painter.rect_filled(
        Rect::from_min_size(track.min, vec2(1.0, track.height())),
        0.0,
        colors.track,
    );
    painter.rect_filled(
        Rect::from_min_size(pos2(track.max.x - 1.0, track.min.y), vec2(1.0, track.height())),
        0.0,
        colors.track_highlight,
    );

    draw_indicator(painter, slider.indicator, shades);
}

/// Draw a hat box with crosshair and ticks, and the indicator at the hat position
pub fn draw_hat(
    painter: &Painter,
    area: Rect,
    indicator_size: f32,
    shades: &[Shade],
    value: (i8, i8),
    colors: &UiColors,
) {
    let hat = hat_geometry(area, indicator_size, value);
    let stroke = Stroke::new(1.0, colors.grid);
    for segment in hat_grid(hat.frame) {
        painter.line_segment(segment, stroke);
    }
    draw_indicator(painter, hat.indicator, shades);
}

/// Line segments of the hat box: border, centre crosshair, quarter ticks.
pub fn hat_grid(frame: Rect) -> Vec<[Pos2; 2]> {
    let Rect { min, max } = frame;
    let side = frame.width();
    let tick = (side / 8.0).max(1.0);

    let mut segments = vec![
        [pos2(min.x, min.y), pos2(max.x, min.y)],
        [pos2(min.x, max.y), pos2(max.x, max.y)],
        [pos2(min.x, min.y), pos2(min.x, max.y)],
        [pos2(max.x, min.y), pos2(max.x, max.y)],
    ];

    for fraction in HAT_TICKS {
        let x = min.x + side * fraction;
        let y = min.y + frame.height() * fraction;
        if fraction == 0.5 {
            segments.push([pos2(x, min.y), pos2(x, max.y)]);
            segments.push([pos2(min.x, y), pos2(max.x, y)]);
        } else {
            segments.push([pos2(x, min.y), pos2(x, min.y + tick)]);
            segments.push([pos2(x, max.y - tick), pos2(x, max.y)]);
            segments.push([pos2(min.x, y), pos2(min.x + tick, y)]);
            segments.push([pos2(max.x - tick, y), pos2(max.x, y)]);
        }
    }

    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: Color32 = Color32::from_rgb(63, 63, 63);

    #[test]
    fn test_indicator_goes_from_base_to_light() {
        let shades = indicator_shades(10.0, BASE, Color32::WHITE);

        assert_eq!(shades.len(), 6);
        assert_eq!(shades[0].color, BASE);
        assert_eq!(shades[0].radius, 5.0);
        assert_eq!(shades[0].center, vec2(5.0, 5.0));
        assert_eq!(shades[5].color, Color32::WHITE);
        // Darkening steps round down: 255 + floor(-192 / 5)
        assert_eq!(shades[4].color, Color32::from_rgb(216, 216, 216));
        assert!(shades.windows(2).all(|w| w[0].radius > w[1].radius));
        assert!(shades.windows(2).all(|w| w[0].color.r() <= w[1].color.r()));
    }

    #[test]
    fn test_default_indicator_stays_inside_its_box() {
        for shade in indicator_shades(10.0, BASE, Color32::WHITE) {
            assert!(shade.center.x - shade.radius >= 0.0);
            assert!(shade.center.x + shade.radius <= 10.0);
        }
    }

    #[test]
    fn test_hat_grid_has_crosshair_and_ticks() {
        let frame = Rect::from_min_size(pos2(0.0, 0.0), vec2(24.0, 24.0));
        let segments = hat_grid(frame);

        // Border, crosshair, and four ticks at each of the two quarter positions
        assert_eq!(segments.len(), 4 + 2 + 8);
        assert!(segments.contains(&[pos2(12.0, 0.0), pos2(12.0, 24.0)]));
        assert!(segments.contains(&[pos2(0.0, 12.0), pos2(24.0, 12.0)]));
        assert!(segments.contains(&[pos2(6.0, 0.0), pos2(6.0, 3.0)]));
        assert!(segments.contains(&[pos2(21.0, 18.0), pos2(24.0, 18.0)]));
    }
}
