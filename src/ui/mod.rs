//! # Joystick Test User Interface
//!
//! One eframe window split into equal columns, one per joystick. Each column
//! shows the device name, its axes with sliders, trackball deltas, hats with a
//! direction box, and a grid of pressed buttons.
//!
//! ## Frame Processing
//!
//! Every frame runs the same three steps on the UI thread:
//!
//! 1. Drain window events (close request, quit keys, size changes) and every
//!    queued gamepad event through the [`EventLoop`]
//! 2. Close the window if the loop terminated
//! 3. Repaint all panels from the current device state
//!
//! gilrs does not wake eframe up, so the app asks for another frame after the
//! configured poll interval.
//!
//! ## Sizing
//!
//! [`startup_layout`] measures the loaded font in a headless egui context
//! before the window exists, so the window opens large enough for the densest
//! panel. Later user resizes are kept as they are.

pub mod common;
pub mod drawing;
pub mod fonts;
pub mod panel;

use eframe::egui::{self, pos2, Align2, Context, Event, FontId, Painter, Rect, Vec2};
use std::time::Duration;
use tracing::{debug, info};

use crate::config::Config;
use crate::controller::{Device, DeviceRegistry, Ready};
use crate::event_loop::{EventLoop, LoopEvent};
use crate::layout::{
    axis_line, hat_line, line_rect, recommended_size, PanelMetrics, Viewport,
};

use self::common::UiColors;
use self::drawing::{draw_hat, draw_slider, indicator_shades, Shade};
use self::fonts::{EguiMetrics, LoadedFont};
use self::panel::panel_lines;

/// Window size and font measurements, computed once before the window opens.
pub fn startup_layout(font: &LoadedFont, font_size: f32, devices: &[Device]) -> (Vec2, PanelMetrics) {
    let ctx = Context::default();
    ctx.set_fonts(font.definitions.clone());
    let font_id = FontId::monospace(font_size);

    let mut layout = (Vec2::ZERO, PanelMetrics::default());
    let _ = ctx.run(egui::RawInput::default(), |ctx| {
        let metrics = EguiMetrics::new(ctx, font_id.clone());
        layout = (
            recommended_size(devices, &metrics),
            PanelMetrics::measure(&metrics),
        );
    });

    info!(
        "Recommended window size {}x{} (font {}, line height {})",
        layout.0.x,
        layout.0.y,
        font.family.as_deref().unwrap_or("built-in"),
        layout.1.line_height
    );
    layout
}

/// Application context: the devices, the window state and everything needed to draw.
pub struct JoystickTestUI {
    /// Fixed device list and the backend feeding it
    registry: DeviceRegistry<Ready>,

    event_loop: EventLoop,

    /// Last known window size
    viewport: Viewport,

    font_id: FontId,
    metrics: PanelMetrics,
    colors: UiColors,
    indicator_size: f32,

    /// Pre-computed discs of the slider and hat indicator
    shades: Vec<Shade>,

    poll_interval: Duration,
}

impl JoystickTestUI {
    pub fn new(
        ctx: &Context,
        registry: DeviceRegistry<Ready>,
        config: &Config,
        font: &LoadedFont,
        window_size: Vec2,
        metrics: PanelMetrics,
    ) -> Self {
        ctx.set_theme(egui::Theme::Dark);
        ctx.set_fonts(font.definitions.clone());

        let colors = UiColors::from_theme(&config.ui.theme);
        let indicator_size = config.ui.indicator_size;
        Self {
            registry,
            event_loop: EventLoop::new(),
            viewport: Viewport::new(window_size),
            font_id: FontId::monospace(config.fonts.size),
            metrics,
            colors,
            indicator_size,
            shades: indicator_shades(indicator_size, colors.indicator_base, colors.indicator_light),
            poll_interval: Duration::from_millis(config.ui.poll_interval_ms),
        }
    }

    #[cfg(test)]
    fn state(&self) -> crate::event_loop::LoopState {
        self.event_loop.state()
    }

    #[cfg(test)]
    fn devices(&self) -> &[Device] {
        self.registry.devices()
    }

    #[cfg(test)]
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    // Window events queued since the last frame
    fn window_events(&self, ctx: &Context) -> Vec<LoopEvent> {
        ctx.input(|i| {
            let mut events = Vec::new();
            if i.viewport().close_requested() {
                events.push(LoopEvent::Quit);
            }
            for event in &i.events {
                if let Event::Key {
                    key,
                    pressed: true,
                    repeat: false,
                    ..
                } = event
                {
                    events.push(LoopEvent::KeyPressed(*key));
                }
            }
            let screen = i.screen_rect();
            if screen.width() != self.viewport.width || screen.height() != self.viewport.height {
                events.push(LoopEvent::Resize {
                    width: screen.width(),
                    height: screen.height(),
                });
            }
            events
        })
    }

    /// Processes everything queued, then repaints.
    pub fn run_frame(&mut self, ctx: &Context) {
        for event in self.window_events(ctx) {
            self.event_loop
                .dispatch(event, self.registry.devices_mut(), &mut self.viewport);
        }

        let mut drained = 0usize;
        while self.event_loop.is_running() {
            let Some(input) = self.registry.next_event() else {
                break;
            };
            self.event_loop.dispatch(
                LoopEvent::Input(input),
                self.registry.devices_mut(),
                &mut self.viewport,
            );
            drained += 1;
        }
        if drained > 0 {
            debug!("Applied {} input events", drained);
        }

        if !self.event_loop.is_running() {
            info!("Closing window");
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            return;
        }

        self.render(ctx);
        ctx.request_repaint_after(self.poll_interval);
    }

    fn render(&self, ctx: &Context) {
        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(self.colors.background))
            .show(ctx, |ui| {
                let count = self.registry.device_count();
                for device in self.registry.devices() {
                    let column = self.viewport.column(device.index(), count);
                    self.draw_panel(&ui.painter().with_clip_rect(column), column, device);
                }
            });
    }

    fn draw_panel(&self, painter: &Painter, column: Rect, device: &Device) {
        let line_height = self.metrics.line_height;
        painter.rect_filled(column, 0.0, self.colors.background);

        for (i, line) in panel_lines(device).iter().enumerate() {
            painter.text(
                pos2(column.min.x, column.min.y + i as f32 * line_height),
                Align2::LEFT_TOP,
                &line.text,
                self.font_id.clone(),
                self.colors.text(line.style),
            );
        }

        for (i, value) in device.axes().iter().enumerate() {
            let area = line_rect(column, axis_line(i), self.metrics.slider_width, line_height);
            draw_slider(painter, area, self.indicator_size, &self.shades, *value, &self.colors);
        }

        for (i, value) in device.hats().iter().enumerate() {
            let area = line_rect(column, hat_line(device, i), self.metrics.hat_width, line_height);
            draw_hat(painter, area, self.indicator_size, &self.shades, *value, &self.colors);
        }
    }
}

impl eframe::App for JoystickTestUI {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.run_frame(ctx);
    }

    fn clear_color(&self, _visuals: &egui::Visuals) -> [f32; 4] {
        self.colors.background.to_normalized_gamma_f32()
    }
}
