// SPDX-FileCopyrightText: 2025 Contributors to the mixview project.
// SPDX-License-Identifier: Apache-2.0

//! GStreamer realization of the mixview display pipeline.
//!
//! The `mixview` core crate decides *what* the display pipeline looks
//! like (a [`mixview::GraphDescription`]); this crate makes it run:
//!
//! - [`launch::launch_syntax`] serializes the abstract stage list into
//!   gst-launch syntax, GStreamer's native graph-construction
//!   micro-language
//! - [`VideoDisplay`] realizes the pipeline, binds it to a native
//!   window surface and supervises its asynchronous event stream
//!
//! ## GStreamer Concepts (for non-GStreamer developers)
//! - **Pipeline**: the running realization of a processing graph
//! - **Bus**: the thread-safe bridge carrying messages from the
//!   pipeline's worker threads into the application's event loop
//! - **Sync message**: a message delivered synchronously on the
//!   emitting thread; used here for the window-handle rendezvous,
//!   which must be answered before the sink's startup proceeds
//!
//! ## Threading
//! Bus-watch handlers (errors, level samples) run on the UI thread's
//! main context. The window-handle rendezvous and overlay draw
//! requests are emitted from pipeline threads and are answered there;
//! the draw callback therefore has to be `Send`.

/// Video display composer (pipeline lifecycle and surface binding)
pub mod display;

/// Error types for display construction and runtime
pub mod error;

/// Routing of engine events to typed callbacks
mod events;

/// Serialization of graph descriptions into gst-launch syntax
pub mod launch;

pub use display::{
    DisplaySurface, DisplayState, DrawCallback, LevelCallback, VideoDisplay, WindowHandle,
};
pub use error::{DisplayError, Result, SurfaceError};
