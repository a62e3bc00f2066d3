#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

use companion::app::{uses_stdio_host, Companion};
use companion::consts::PKG_NAME;
use egui::ViewportBuilder;
use std::io::{stderr, stdout};
use tracing::Level;
use tracing_subscriber::fmt::writer::{BoxMakeWriter, MakeWriterExt};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry};

/// Stdout belongs to the host bridge when it is enabled, so logs move to
/// stderr.
fn init_log(to_stderr: bool) {
    let env_filter = EnvFilter::new(format!("{PKG_NAME}=info,egui_overlay=info"));
    let writer = if to_stderr {
        BoxMakeWriter::new(stderr.with_max_level(Level::INFO))
    } else {
        BoxMakeWriter::new(stdout.with_max_level(Level::INFO))
    };
    let formatting_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_level(true)
        .with_ansi(!to_stderr)
        .with_line_number(true)
        .with_writer(writer);

    Registry::default()
        .with(env_filter)
        .with(formatting_layer)
        .init();
}

pub fn main() -> eframe::Result<()> {
    init_log(uses_stdio_host());

    let options = eframe::NativeOptions {
        centered: true,
        viewport: ViewportBuilder::default()
            .with_inner_size((900.0, 600.0))
            .with_min_inner_size((480.0, 400.0)),
        ..Default::default()
    };
    Companion::start(options)
}
