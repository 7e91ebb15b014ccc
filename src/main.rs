pub mod config;
pub mod controller;
pub mod event_loop;
pub mod layout;
pub mod ui;

use crate::config::Config;
use crate::controller::{DeviceRegistry, GilrsBackend, RegistryError};
use crate::ui::fonts::{font_dirs, load_font};
use crate::ui::{startup_layout, JoystickTestUI};
use color_eyre::{eyre::eyre, Result};
use eframe::egui;
use std::process::ExitCode;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

const APP_NAME: &str = "Joystick Test";

// Hints for SDL-based platform layers; set before any library initializes
const LIBRARY_ENV: [(&str, &str); 3] = [
    ("SDL_VIDEO_ALLOW_SCREENSAVER", "1"),
    ("SDL_JOYSTICK_ALLOW_BACKGROUND_EVENTS", "1"),
    ("SDL_VIDEO_X11_NET_WM_BYPASS_COMPOSITOR", "0"),
];

const NO_DEVICES_MESSAGE: &str =
    "This program only works with at least one joystick plugged in. No joysticks were detected.";

fn main() -> Result<ExitCode> {
    setup()?;

    let config = Config::load()?;
    info!("Starting {} {}", APP_NAME, env!("CARGO_PKG_VERSION"));

    let backend = GilrsBackend::create(config.controller.default_filters)
        .map_err(|e| eyre!("Failed to start gamepad input: {}", e))?;
    let registry = match DeviceRegistry::create(Box::new(backend)).enumerate() {
        Ok(registry) => registry,
        Err(e) => {
            println!("{}", NO_DEVICES_MESSAGE);
            return Ok(ExitCode::from(exit_status(Err(e))));
        }
    };

    let font = load_font(&config.fonts.candidates, &font_dirs());
    let (window_size, metrics) = startup_layout(&font, config.fonts.size, registry.devices());

    let title = format!("{} {}", APP_NAME, env!("CARGO_PKG_VERSION"));
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(title.as_str())
            .with_inner_size(window_size)
            .with_resizable(true),
        ..Default::default()
    };

    eframe::run_native(
        APP_NAME,
        native_options,
        Box::new(move |cc| {
            Ok(Box::new(JoystickTestUI::new(
                &cc.egui_ctx,
                registry,
                &config,
                &font,
                window_size,
                metrics,
            )))
        }),
    )
    .map_err(|e| eyre!("Window error: {}", e))?;

    info!("Exiting");
    Ok(ExitCode::from(exit_status(Ok(()))))
}

// Process status for how a run ended
fn exit_status(outcome: Result<(), RegistryError>) -> u8 {
    match outcome {
        Ok(()) => 0,
        Err(RegistryError::NoDevices) => 1,
    }
}

fn setup() -> Result<()> {
    if std::env::var("RUST_LIB_BACKTRACE").is_err() {
        std::env::set_var("RUST_LIB_BACKTRACE", "0")
    }
    color_eyre::install()?;
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info")
    }
    for (key, value) in LIBRARY_ENV {
        std::env::set_var(key, value);
    }
    setup_logging_env();
    Ok(())
}

fn setup_logging_env() {
    FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .with_file(true)
        .with_line_number(true)
        .pretty()
        .init();
}
