#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

mod app;

use std::{fs, path::PathBuf};

use clap::Parser;
use vwf_engine::{FontLayout, Session};

#[derive(Parser, Debug)]
#[command(version, about = "Editor for fixed-size glyph records in game VWF font files", long_about = None)]
struct Args {
    /// Font resource file to edit
    #[arg(value_name = "FONT", default_value = "font.bin")]
    font_file: PathBuf,

    /// Companion glyph atlas image (read-only)
    #[arg(long, value_name = "IMAGE", default_value = "font.png")]
    atlas: PathBuf,

    /// File the edited buffer is written to (the input is never overwritten)
    #[arg(long, value_name = "FILE", default_value = "font_new.bin")]
    output: PathBuf,

    /// Font layout description (TOML); defaults to the built-in game layout
    #[arg(long, value_name = "FILE")]
    layout: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let _logger = flexi_logger::Logger::try_with_env_or_str("info")?.start()?;

    log::info!("Starting VWF Edit {}", env!("CARGO_PKG_VERSION"));

    let layout: FontLayout = match &args.layout {
        Some(path) => toml::from_str(&fs::read_to_string(path)?)?,
        None => FontLayout::default(),
    };

    let session = Session::load(&args.font_file, layout)?;
    let atlas = image::open(&args.atlas)?.to_rgba8();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([640.0, 700.0]),
        ..Default::default()
    };
    eframe::run_native(
        "VWF Edit",
        options,
        Box::new(move |_cc| Box::new(app::EditApp::new(session, atlas, args.output))),
    )
    .map_err(|err| anyhow::anyhow!("could not start the UI: {err}"))
}
