// SPDX-FileCopyrightText: 2025 Contributors to the mixview project.
// SPDX-License-Identifier: Apache-2.0

//! Video display composer.
//!
//! [`VideoDisplay`] renders one remotely-produced audio/video stream
//! into a local display surface. It derives the pipeline configuration
//! from the settings and the registered consumers, asks the core graph
//! builder for a description, realizes it through GStreamer, answers
//! the window-handle rendezvous and supervises the event stream until
//! dropped.
//!
//! Independent display instances (program, preview thumbnails) each run
//! their own pipeline with their own event stream; nothing is shared
//! between them except the configuration.

use std::cell::Cell;
use std::rc::Rc;

use gst::glib;
use gst::prelude::*;
use gstreamer as gst;
use gstreamer_video as gst_video;
use gstreamer_video::prelude::*;
use tracing::{debug, info};

use mixview::Settings;
use mixview::graph::{self, OVERLAY_NAME};

use crate::error::{DisplayError, Result, SurfaceError};
use crate::events::{self, EventRouter};
use crate::launch;

/// Native handle of a realized on-screen drawable.
///
/// Read-only shared state; exposed exactly once per pipeline via the
/// window-handle rendezvous.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowHandle(pub usize);

/// Capability the windowing toolkit must provide for a display widget.
///
/// The composer calls this once, before starting the pipeline, on the
/// UI thread. Implementations should realize the underlying native
/// window on demand.
pub trait DisplaySurface {
    /// Realizes the drawable if necessary and returns its native handle.
    ///
    /// # Errors
    ///
    /// Returns [`SurfaceError`] if the drawable cannot be realized or
    /// has no native window.
    fn window_handle(&self) -> core::result::Result<WindowHandle, SurfaceError>;
}

/// Callback painting an overlay onto each video frame.
///
/// Invoked from the streaming thread with the frame's surface context,
/// timestamp and duration. Painting side effects happen directly on the
/// context; the return value of the paint is not consumed.
pub type DrawCallback = Box<dyn FnMut(&cairo::Context, gst::ClockTime, gst::ClockTime) + Send>;

/// Callback receiving `(peak, rms)` audio levels per channel.
///
/// Invoked on the UI thread at the metering stage's fixed cadence.
pub type LevelCallback = Box<dyn FnMut(&[f64], &[f64])>;

/// Lifecycle of a display pipeline.
///
/// Construction walks `Created` to `Running`; `Errored` is terminal and
/// entered when the engine reports a runtime error. There is no
/// automatic restart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayState {
    /// Configuration computed, nothing realized yet
    Created,

    /// Graph description built and realized by the engine
    GraphBuilt,

    /// Event stream subscribed, pipeline not yet started
    Subscribed,

    /// Pipeline running; frames are being rendered
    Running,

    /// Terminal error state; the display freezes on the last frame
    Errored,
}

/// Displays a mixer video stream inside a native window surface.
///
/// Owns the running pipeline exclusively; dropping the display stops
/// the pipeline and releases its resources.
///
/// GStreamer must be initialized (`gst::init`) before constructing a
/// display.
///
/// # Examples
///
/// ```no_run
/// use gst_mixview::{DisplaySurface, SurfaceError, VideoDisplay, WindowHandle};
/// use mixview::Settings;
///
/// struct Widget {
///     xid: usize,
/// }
///
/// impl DisplaySurface for Widget {
///     fn window_handle(&self) -> Result<WindowHandle, SurfaceError> {
///         Ok(WindowHandle(self.xid))
///     }
/// }
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// gstreamer::init()?;
/// let settings = Settings::from_json(std::fs::read_to_string("mixview.json")?.as_str())?;
/// let widget = Widget { xid: 0x1c0_0003 };
///
/// // Program view with audio playback, no overlay, no metering.
/// let display = VideoDisplay::new(&widget, &settings, 11000, true, None, None)?;
/// # Ok(())
/// # }
/// ```
pub struct VideoDisplay {
    pipeline: gst::Pipeline,
    state: Rc<Cell<DisplayState>>,

    // Keeps the bus watch alive for the pipeline's lifetime.
    _watch: gst::bus::BusWatchGuard,
}

impl VideoDisplay {
    /// Builds, binds and starts the display pipeline for one stream.
    ///
    /// The overlay stage is inserted iff `draw_callback` is given and
    /// the audio branch exists iff `play_audio` or `level_callback`
    /// asks for it. Event routing is subscribed before the pipeline
    /// starts, so early events (in particular the window-handle
    /// request from the sink's realize path) are never missed.
    ///
    /// # Arguments
    ///
    /// * `surface` - Display widget the video is rendered into
    /// * `settings` - Configuration sections (server, caps, previews)
    /// * `port` - Raw feed port of the stream to display
    /// * `play_audio` - End the audio branch in a playback sink
    /// * `draw_callback` - Optional per-frame overlay painter
    /// * `level_callback` - Optional audio-level consumer
    ///
    /// # Errors
    ///
    /// * [`DisplayError::Construction`] if the engine rejects the graph
    /// * [`DisplayError::SurfaceBinding`] if the surface has no handle
    /// * [`DisplayError::StateChange`] if the pipeline refuses to start
    ///
    /// Construction is atomic: on any error the partially-realized
    /// pipeline is torn down before returning.
    pub fn new(
        surface: &dyn DisplaySurface,
        settings: &Settings,
        port: u16,
        play_audio: bool,
        draw_callback: Option<DrawCallback>,
        level_callback: Option<LevelCallback>,
    ) -> Result<Self> {
        let config = settings.pipeline_config(
            port,
            play_audio,
            draw_callback.is_some(),
            level_callback.is_some(),
        );
        let state = Rc::new(Cell::new(DisplayState::Created));

        if config.use_previews {
            info!("using jpeg previews instead of raw video for port {port}");
        } else {
            info!("using raw video instead of jpeg previews for port {port}");
        }

        let description = graph::build(&config);
        let pipeline_syntax = launch::launch_syntax(&description);
        debug!("creating display pipeline: {pipeline_syntax}");

        let pipeline = gst::parse::launch(&pipeline_syntax)?
            .downcast::<gst::Pipeline>()
            .map_err(|_| DisplayError::NotAPipeline)?;
        state.set(DisplayState::GraphBuilt);

        // Realize the surface before starting: the engine asks for the
        // handle synchronously from the sink's realize path.
        let handle = surface.window_handle()?;
        debug!("realized display surface with native handle {}", handle.0);

        let bus = pipeline.bus().ok_or(DisplayError::NoBus)?;

        // Window-handle rendezvous. Delivered on whichever thread
        // realizes the sink and answered right there; the engine blocks
        // its startup on the answer, so nothing here may wait.
        let raw_handle = handle.0;
        bus.set_sync_handler(move |_, message| {
            if gst_video::is_video_overlay_prepare_window_handle_message(message) {
                info!("binding video sink to window handle {raw_handle}");
                if let Some(overlay) = message
                    .src()
                    .and_then(|source| source.dynamic_cast_ref::<gst_video::VideoOverlay>())
                {
                    unsafe { overlay.set_window_handle(raw_handle) };
                }
            }
            gst::BusSyncReply::Pass
        });

        // Asynchronous events run through the router on the UI thread.
        let mut router = EventRouter::new(Rc::clone(&state), level_callback);
        let watch = bus.add_watch_local(move |_, message| {
            router.route(message);
            glib::ControlFlow::Continue
        })?;
        state.set(DisplayState::Subscribed);

        if let Some(draw_callback) = draw_callback {
            let overlay = pipeline
                .by_name(OVERLAY_NAME)
                .ok_or(DisplayError::MissingElement(OVERLAY_NAME))?;
            events::connect_draw(&overlay, draw_callback);
        }

        debug!("launching display pipeline");
        if let Err(err) = pipeline.set_state(gst::State::Playing) {
            let _ = pipeline.set_state(gst::State::Null);
            return Err(err.into());
        }
        state.set(DisplayState::Running);

        Ok(VideoDisplay {
            pipeline,
            state,
            _watch: watch,
        })
    }

    /// Current lifecycle state of the display.
    pub fn state(&self) -> DisplayState {
        self.state.get()
    }

    /// The underlying pipeline, for inspection.
    pub fn pipeline(&self) -> &gst::Pipeline {
        &self.pipeline
    }
}

impl Drop for VideoDisplay {
    /// Stops the pipeline and releases the engine resources.
    fn drop(&mut self) {
        debug!("stopping display pipeline");
        let _ = self.pipeline.set_state(gst::State::Null);
    }
}
