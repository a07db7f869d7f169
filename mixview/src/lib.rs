// SPDX-FileCopyrightText: 2025 Contributors to the mixview project.
// SPDX-License-Identifier: Apache-2.0

//! # mixview - video mixer front-end core
//!
//! Engine- and toolkit-agnostic core of a live-video mixing console
//! front-end. The crate models the two stateful pieces of the GUI:
//!
//! - the **composition controller**: a small bidirectional sync protocol
//!   between a group of mutually-exclusive composite-mode toggles and a
//!   remote mixing session ([`CompositionController`])
//! - the **display graph builder**: a pure function from runtime
//!   configuration to the processing-graph description a media engine
//!   realizes for the incoming stream ([`graph::build`])
//!
//! ### Key Concepts
//!
//! - **Composite mode**: the on-screen arrangement of the mixed sources
//!   (fullscreen, picture-in-picture, side-by-side), exactly one active
//!   at a time ([`CompositeMode`])
//! - **Toggle group**: the mutually-exclusive controls the operator
//!   clicks, one accelerator key each ([`ToggleGroup`])
//! - **Connection**: the asynchronous message bus towards the remote
//!   mixing session ([`Connection`]); the server holds the authoritative
//!   composite-mode state
//! - **Graph description**: an ordered list of typed processing stages
//!   (source, demux, decode, scale, overlay, sinks) that a concrete
//!   engine layer serializes into its native graph syntax
//!   ([`graph::GraphDescription`])
//!
//! The GStreamer realization of the graph lives in the companion
//! `gst-mixview-rs` crate; this crate has no engine or toolkit
//! dependencies and is fully testable on its own.

/// Composite-mode enumeration and wire names
pub mod composite;

/// Configuration sections and the derived pipeline configuration
pub mod config;

/// Remote mixing-session connection contract and message names
pub mod connection;

/// Composite-mode toggle controller (local/remote state sync)
pub mod controller;

/// Error types for mixview operations
pub mod error;

/// Display-graph model and the pure graph builder
pub mod graph;

/// Mutually-exclusive toggle group and the toolkit capability trait
pub mod toggles;

pub use composite::CompositeMode;
pub use config::{PipelineConfig, Settings};
pub use connection::{Connection, MessageHandler, messages};
pub use controller::CompositionController;
pub use error::{Error, Result};
pub use graph::GraphDescription;
pub use toggles::{Accelerator, ActivateHandler, ToggleControl, ToggleGroup, TogglePanel};
