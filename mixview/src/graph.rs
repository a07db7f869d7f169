// SPDX-FileCopyrightText: 2025 Contributors to the mixview project.
// SPDX-License-Identifier: Apache-2.0

//! Display-graph model and the pure graph builder.
//!
//! The incoming stream is a matroska transport carrying the mixed video
//! and audio. [`build`] turns a [`PipelineConfig`] into a
//! [`GraphDescription`]: one source trunk that demultiplexes into at
//! most one video branch and at most one audio branch, each a simple
//! chain. The builder is pure and deterministic; it performs no I/O and
//! has no failure modes. Realizing the description (and serializing it
//! into an engine's native graph syntax) is the engine layer's job.

use crate::config::PipelineConfig;

/// Preview feeds are served on the raw feed's port plus this offset.
pub const PREVIEW_PORT_OFFSET: u32 = 1000;

/// Element name of the demultiplexer (branch heads link from it).
pub const DEMUX_NAME: &str = "demux";

/// Element name of the overlay-paint stage.
pub const OVERLAY_NAME: &str = "overlay";

/// Element name of the display sink (target of the window-handle rendezvous).
pub const VIDEO_SINK_NAME: &str = "v";

/// Element name of the audio level-metering stage.
pub const LEVEL_NAME: &str = "lvl";

/// Reporting interval of the level-metering stage, fixed at build time.
pub const LEVEL_INTERVAL_NS: u64 = 50_000_000;

/// Scaling algorithm of a [`Stage::VideoScale`] stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaleMethod {
    /// Nearest-neighbour sampling; preserves hard edges in preview thumbnails
    NearestNeighbour,
}

/// One processing stage of the display graph, with typed parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stage {
    /// TCP client source connected to the mixing server
    TcpSource {
        /// Server host
        host: String,
        /// Feed port, preview offset already applied; wider than a TCP
        /// port so the offset cannot overflow for high feed ports
        port: u32,
    },

    /// Queue decoupling producer and consumer timing
    Queue,

    /// Matroska demultiplexer splitting the transport into sub-streams
    MatroskaDemux {
        /// Element name branch heads link from
        name: &'static str,
    },

    /// Caps filter restricting the stream format
    CapsFilter {
        /// Caps string
        caps: String,
    },

    /// JPEG decoder for the preview feed
    JpegDecode,

    /// Video rescaler
    VideoScale {
        /// Scaling algorithm
        method: ScaleMethod,
    },

    /// Frame-rate normalizer
    VideoRate,

    /// Colorspace converter
    VideoConvert,

    /// Overlay-paint stage emitting draw requests per frame
    CairoOverlay {
        /// Element name the draw signal is connected on
        name: &'static str,
    },

    /// Display sink bound to the native window handle
    VideoSink {
        /// Element name
        name: &'static str,
    },

    /// Level-metering stage reporting peak/RMS without altering the signal
    Level {
        /// Element name level messages are filtered by
        name: &'static str,
        /// Reporting interval in nanoseconds
        interval_ns: u64,
    },

    /// Audio playback sink
    AudioSink {
        /// Whether the sink synchronizes on buffer timestamps
        sync: bool,
    },

    /// Sink discarding its input (audio branch without playback)
    DiscardSink,
}

/// Ordered description of the display pipeline.
///
/// Invariant: one source trunk ending in the demultiplexer, at most one
/// video branch and at most one audio branch, each a simple chain with
/// no cycles and no fan-in. Built once per display instance and
/// consumed exactly once to realize a running pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphDescription {
    /// Source chain ending in the demultiplexer
    pub trunk: Vec<Stage>,

    /// Video branch ending in the display sink
    pub video: Vec<Stage>,

    /// Audio branch; empty when neither playback nor metering is wanted
    pub audio: Vec<Stage>,
}

impl GraphDescription {
    /// Whether the description contains an audio branch.
    pub fn has_audio_branch(&self) -> bool {
        !self.audio.is_empty()
    }

    /// The port the source connects to (preview offset applied).
    pub fn source_port(&self) -> Option<u32> {
        self.trunk.iter().find_map(|stage| match stage {
            Stage::TcpSource { port, .. } => Some(*port),
            _ => None,
        })
    }
}

/// Builds the display-graph description for the given configuration.
///
/// Pure and deterministic: two calls with identical configuration
/// produce structurally identical descriptions. The caller guarantees
/// config validity; there are no failure modes.
///
/// # Examples
///
/// ```
/// use mixview::PipelineConfig;
/// use mixview::graph;
///
/// let config = PipelineConfig {
///     host: "mixer.lan".into(),
///     port: 11000,
///     use_previews: true,
///     has_overlay_sink: false,
///     wants_audio_playback: false,
///     wants_level_metering: true,
///     video_caps: "video/x-raw,width=1920,height=1080".into(),
///     audio_caps: "audio/x-raw,channels=2".into(),
///     preview_caps: "video/x-raw,width=320,height=180".into(),
/// };
///
/// let description = graph::build(&config);
/// assert_eq!(description.source_port(), Some(12000));
/// assert!(description.has_audio_branch());
/// ```
pub fn build(config: &PipelineConfig) -> GraphDescription {
    // Preview feeds live on the raw port + 1000. Computed in u32 so a
    // feed port near the top of the u16 range cannot overflow.
    let port = if config.use_previews {
        u32::from(config.port) + PREVIEW_PORT_OFFSET
    } else {
        u32::from(config.port)
    };

    let trunk = vec![
        Stage::TcpSource {
            host: config.host.clone(),
            port,
        },
        Stage::Queue,
        Stage::MatroskaDemux { name: DEMUX_NAME },
    ];

    let mut video = Vec::new();
    if config.use_previews {
        // Previews arrive JPEG-compressed at preview resolution and a
        // loose frame rate; decode, scale and rate-normalize up to the
        // target caps.
        video.push(Stage::CapsFilter {
            caps: "image/jpeg".to_owned(),
        });
        video.push(Stage::JpegDecode);
        video.push(Stage::CapsFilter {
            caps: config.preview_caps.clone(),
        });
        video.push(Stage::VideoScale {
            method: ScaleMethod::NearestNeighbour,
        });
        video.push(Stage::VideoRate);
        video.push(Stage::CapsFilter {
            caps: config.video_caps.clone(),
        });
    } else {
        video.push(Stage::CapsFilter {
            caps: config.video_caps.clone(),
        });
    }
    video.push(Stage::Queue);

    if config.has_overlay_sink {
        // The overlay stage needs a caps-compatible colorspace on both
        // sides, hence the convert bracket.
        video.push(Stage::VideoConvert);
        video.push(Stage::CairoOverlay { name: OVERLAY_NAME });
        video.push(Stage::VideoConvert);
    }
    video.push(Stage::VideoSink {
        name: VIDEO_SINK_NAME,
    });

    let mut audio = Vec::new();
    if config.wants_audio_playback || config.wants_level_metering {
        audio.push(Stage::CapsFilter {
            caps: config.audio_caps.clone(),
        });
        audio.push(Stage::Queue);
        // The metering stage is always part of the audio branch, even
        // without a level consumer: playback position tracking depends
        // on it.
        audio.push(Stage::Level {
            name: LEVEL_NAME,
            interval_ns: LEVEL_INTERVAL_NS,
        });
        if config.wants_audio_playback {
            audio.push(Stage::AudioSink { sync: false });
        } else {
            audio.push(Stage::DiscardSink);
        }
    }

    GraphDescription { trunk, video, audio }
}
