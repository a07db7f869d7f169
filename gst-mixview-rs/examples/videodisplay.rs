// SPDX-FileCopyrightText: 2025 Contributors to the mixview project.
// SPDX-License-Identifier: Apache-2.0

//! Standalone display demo.
//!
//! Connects to a mixing server and renders one stream. Without an
//! `--xid` the sink opens its own window; with one (e.g. obtained via
//! `xwininfo`) the video is embedded into that window, exercising the
//! window-handle rendezvous the GUI relies on.
//!
//! ```bash
//! cargo run --example videodisplay -- --settings mixview.json --port 11000 --levels
//! ```

use clap::Parser;
use gst_mixview::{DisplaySurface, LevelCallback, SurfaceError, VideoDisplay, WindowHandle};
use gstreamer::glib;
use mixview::Settings;
use tracing::info;

#[derive(Parser)]
#[command(about = "Render one mixer stream into a window")]
struct Args {
    /// Path to the settings JSON document
    #[arg(long)]
    settings: std::path::PathBuf,

    /// Raw feed port of the stream to display
    #[arg(long, default_value_t = 11000)]
    port: u16,

    /// Play the stream's audio
    #[arg(long)]
    play_audio: bool,

    /// Log audio levels from the metering stage
    #[arg(long)]
    levels: bool,

    /// Native window id to embed into (0 = let the sink open a window)
    #[arg(long, default_value_t = 0)]
    xid: usize,
}

/// Surface backed by an externally created native window.
struct CliSurface {
    xid: usize,
}

impl DisplaySurface for CliSurface {
    fn window_handle(&self) -> Result<WindowHandle, SurfaceError> {
        Ok(WindowHandle(self.xid))
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(tracing::level_filters::LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .init();

    let args = Args::parse();
    gstreamer::init()?;

    let settings = Settings::from_json(std::fs::read_to_string(&args.settings)?.as_str())?;
    let surface = CliSurface { xid: args.xid };

    let level_callback = args.levels.then(|| {
        Box::new(|peak: &[f64], rms: &[f64]| {
            info!("audio levels: peak={peak:?} rms={rms:?}");
        }) as LevelCallback
    });

    let _display = VideoDisplay::new(
        &surface,
        &settings,
        args.port,
        args.play_audio,
        None,
        level_callback,
    )?;

    // Bus-watch handlers run on this main loop.
    glib::MainLoop::new(None, false).run();
    Ok(())
}
