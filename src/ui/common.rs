//! Colours resolved from the configured [`Theme`].

use eframe::egui::Color32;

use crate::config::Theme;
use crate::ui::panel::LineStyle;

fn rgb((r, g, b): (u8, u8, u8)) -> Color32 {
    Color32::from_rgb(r, g, b)
}

/// Theme colours as egui colours, resolved once at startup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UiColors {
    pub background: Color32,
    pub static_text: Color32,
    pub dynamic_text: Color32,
    pub track: Color32,
    pub track_highlight: Color32,
    pub grid: Color32,
    pub indicator_base: Color32,
    pub indicator_light: Color32,
}

impl UiColors {
    pub fn from_theme(theme: &Theme) -> Self {
        Self {
            background: rgb(theme.background_color),
            static_text: rgb(theme.static_text_color),
            dynamic_text: rgb(theme.dynamic_text_color),
            track: rgb(theme.track_color),
            track_highlight: rgb(theme.track_highlight_color),
            grid: rgb(theme.grid_color),
            indicator_base: rgb(theme.indicator_base_color),
            indicator_light: rgb(theme.indicator_light_color),
        }
    }

    pub fn text(&self, style: LineStyle) -> Color32 {
        match style {
            LineStyle::Static => self.static_text,
            LineStyle::Dynamic => self.dynamic_text,
        }
    }
}

impl Default for UiColors {
    fn default() -> Self {
        Self::from_theme(&Theme::default())
    }
}
