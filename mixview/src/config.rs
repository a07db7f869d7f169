// SPDX-FileCopyrightText: 2025 Contributors to the mixview project.
// SPDX-License-Identifier: Apache-2.0

//! Configuration sections and the derived pipeline configuration.
//!
//! [`Settings`] mirrors the sections of the mixer's configuration store
//! that the display layer reads: the server endpoint, the mixed-stream
//! caps and the preview-feed options. It is deserialized once at startup
//! and consumed read-only.
//!
//! [`PipelineConfig`] is the flattened, per-display-instance view the
//! graph builder consumes: settings plus the stream port and the
//! consumer flags (audio playback, overlay drawing, level metering).
//! It is computed once at composer construction and immutable for the
//! composer's lifetime.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Server endpoint section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    /// Hostname or address of the mixing server
    pub host: String,
}

/// Caps of the mixed output streams.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MixSettings {
    /// Video caps of the raw mixed stream (e.g. `video/x-raw,...`)
    pub videocaps: String,

    /// Audio caps of the mixed stream (e.g. `audio/x-raw,...`)
    pub audiocaps: String,
}

/// Preview-feed section.
///
/// The server offers JPEG-compressed preview feeds on `port + 1000`
/// next to each raw feed; the GUI uses them when both the server has
/// them enabled and the GUI is configured to prefer them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreviewSettings {
    /// Whether the server produces preview feeds at all
    pub enabled: bool,

    /// Whether this GUI should consume previews instead of raw video
    #[serde(rename = "use")]
    pub use_in_gui: bool,

    /// Video caps of the decoded preview feed
    pub videocaps: String,
}

/// The configuration sections consumed by the display layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Server endpoint
    pub server: ServerSettings,

    /// Mixed-stream caps
    pub mix: MixSettings,

    /// Preview-feed options
    pub previews: PreviewSettings,
}

impl Settings {
    /// Parses settings from their JSON representation.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Settings`] if the document is malformed
    /// or sections are missing.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Whether the GUI consumes preview feeds instead of raw video.
    pub fn use_previews(&self) -> bool {
        self.previews.enabled && self.previews.use_in_gui
    }

    /// Derives the immutable per-display pipeline configuration.
    ///
    /// # Arguments
    ///
    /// * `port` - Raw feed port of the stream to display (the preview
    ///   port offset is applied later by the graph builder)
    /// * `play_audio` - Whether the audio branch should end in a
    ///   playback sink
    /// * `has_overlay_sink` - Whether an overlay-drawing consumer exists
    /// * `wants_level_metering` - Whether an audio-level consumer exists
    pub fn pipeline_config(
        &self,
        port: u16,
        play_audio: bool,
        has_overlay_sink: bool,
        wants_level_metering: bool,
    ) -> PipelineConfig {
        PipelineConfig {
            host: self.server.host.clone(),
            port,
            use_previews: self.use_previews(),
            has_overlay_sink,
            wants_audio_playback: play_audio,
            wants_level_metering,
            video_caps: self.mix.videocaps.clone(),
            audio_caps: self.mix.audiocaps.clone(),
            preview_caps: self.previews.videocaps.clone(),
        }
    }
}

/// Immutable input of the graph builder, computed once per display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Mixing-server host
    pub host: String,

    /// Raw feed port (before any preview offset)
    pub port: u16,

    /// Consume the JPEG preview feed instead of raw video
    pub use_previews: bool,

    /// Insert the overlay-paint bracket into the video branch
    pub has_overlay_sink: bool,

    /// End the audio branch in a playback sink
    pub wants_audio_playback: bool,

    /// Report audio levels (forces the audio branch to exist)
    pub wants_level_metering: bool,

    /// Target video caps applied to the display branch
    pub video_caps: String,

    /// Audio caps applied to the audio branch
    pub audio_caps: String,

    /// Caps of the decoded preview feed
    pub preview_caps: String,
}
