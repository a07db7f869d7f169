// SPDX-FileCopyrightText: 2025 Contributors to the mixview project.
// SPDX-License-Identifier: Apache-2.0

//! Error types for display construction and runtime.
//!
//! Construction either fully succeeds or fails atomically with one of
//! the variants below. Runtime engine errors are not surfaced as
//! `Result`s: they arrive on the event stream after a successful start
//! and leave the display in the terminal
//! [`Errored`](crate::DisplayState::Errored) state.

use gstreamer as gst;

/// Convenience result type using [`DisplayError`] as the error variant.
pub type Result<T> = core::result::Result<T, DisplayError>;

/// The display surface could not be realized or has no native handle.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct SurfaceError(pub String);

/// Errors that can occur while constructing a [`crate::VideoDisplay`].
#[derive(Debug, thiserror::Error)]
pub enum DisplayError {
    /// The engine rejected the graph description (malformed graph or
    /// unreachable endpoint).
    #[error("engine rejected the display graph: {0}")]
    Construction(#[from] glib::Error),

    /// The engine realized the graph as something other than a pipeline.
    #[error("engine did not return a pipeline for the display graph")]
    NotAPipeline,

    /// The realized pipeline has no bus to subscribe on.
    #[error("display pipeline has no bus")]
    NoBus,

    /// Subscribing to the asynchronous event stream failed.
    #[error("failed to subscribe to the display pipeline bus: {0}")]
    Subscribe(#[from] glib::BoolError),

    /// A stage named by the graph description is missing from the
    /// realized pipeline.
    #[error("display pipeline is missing the \"{0}\" element")]
    MissingElement(&'static str),

    /// The display surface could not provide a native window handle.
    #[error("failed to bind the display surface: {0}")]
    SurfaceBinding(#[from] SurfaceError),

    /// The pipeline refused to start.
    #[error("failed to start the display pipeline: {0}")]
    StateChange(#[from] gst::StateChangeError),
}
