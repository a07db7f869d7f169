// SPDX-FileCopyrightText: 2025 Contributors to the mixview project.
// SPDX-License-Identifier: Apache-2.0

//! Serialization of graph descriptions into gst-launch syntax.
//!
//! GStreamer's native graph-construction micro-language links elements
//! with `!` and names branch points, so a demultiplexer pad can be
//! referenced as `demux.` from several chains. The mapping from
//! [`Stage`] to launch fragment is total; the stage parameters carry
//! everything the fragment needs.

use mixview::graph::{DEMUX_NAME, GraphDescription, ScaleMethod, Stage};

/// Serializes a graph description into a gst-launch pipeline string.
///
/// The trunk comes first, then the video branch and (if present) the
/// audio branch, each linking from the demultiplexer. Deterministic:
/// identical descriptions serialize identically.
///
/// # Examples
///
/// ```
/// use mixview::graph::{GraphDescription, Stage};
///
/// let description = GraphDescription {
///     trunk: vec![
///         Stage::TcpSource { host: "mixer.lan".into(), port: 9001 },
///         Stage::Queue,
///         Stage::MatroskaDemux { name: "demux" },
///     ],
///     video: vec![
///         Stage::CapsFilter { caps: "video/x-raw".into() },
///         Stage::Queue,
///         Stage::VideoSink { name: "v" },
///     ],
///     audio: vec![],
/// };
///
/// assert_eq!(
///     gst_mixview::launch::launch_syntax(&description),
///     "tcpclientsrc host=mixer.lan port=9001 ! queue ! matroskademux name=demux  \
///      demux. ! video/x-raw ! queue ! xvimagesink name=v"
/// );
/// ```
pub fn launch_syntax(description: &GraphDescription) -> String {
    let mut sections = vec![chain(&description.trunk)];
    sections.push(format!("{DEMUX_NAME}. ! {}", chain(&description.video)));
    if description.has_audio_branch() {
        sections.push(format!("{DEMUX_NAME}. ! {}", chain(&description.audio)));
    }
    sections.join("  ")
}

/// Serializes a simple chain of stages.
fn chain(stages: &[Stage]) -> String {
    stages
        .iter()
        .map(stage_syntax)
        .collect::<Vec<_>>()
        .join(" ! ")
}

/// Serializes one stage into its launch fragment.
fn stage_syntax(stage: &Stage) -> String {
    match stage {
        Stage::TcpSource { host, port } => {
            format!("tcpclientsrc host={host} port={port}")
        }
        Stage::Queue => "queue".to_owned(),
        Stage::MatroskaDemux { name } => format!("matroskademux name={name}"),
        // Bare caps act as a capsfilter in launch syntax.
        Stage::CapsFilter { caps } => caps.clone(),
        Stage::JpegDecode => "jpegdec".to_owned(),
        Stage::VideoScale { method } => {
            format!("videoscale method={}", scale_method_syntax(*method))
        }
        Stage::VideoRate => "videorate".to_owned(),
        Stage::VideoConvert => "videoconvert".to_owned(),
        Stage::CairoOverlay { name } => format!("cairooverlay name={name}"),
        Stage::VideoSink { name } => format!("xvimagesink name={name}"),
        Stage::Level { name, interval_ns } => {
            format!("level name={name} interval={interval_ns}")
        }
        Stage::AudioSink { sync } => format!("alsasink sync={sync}"),
        Stage::DiscardSink => "fakesink".to_owned(),
    }
}

fn scale_method_syntax(method: ScaleMethod) -> &'static str {
    match method {
        ScaleMethod::NearestNeighbour => "nearest-neighbour",
    }
}
