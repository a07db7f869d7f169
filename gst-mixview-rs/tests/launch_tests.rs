// SPDX-FileCopyrightText: 2025 Contributors to the mixview project.
// SPDX-License-Identifier: Apache-2.0

//! Tests for the gst-launch serialization of graph descriptions.
//!
//! Serialization is pure string building, so these tests run without a
//! GStreamer installation. The golden strings double as documentation
//! of the exact pipelines the composer realizes.

use gst_mixview::launch::launch_syntax;
use mixview::{PipelineConfig, graph};

fn config() -> PipelineConfig {
    PipelineConfig {
        host: "mixer.lan".to_owned(),
        port: 9001,
        use_previews: false,
        has_overlay_sink: false,
        wants_audio_playback: false,
        wants_level_metering: false,
        video_caps: "video/x-raw,width=1280,height=720".to_owned(),
        audio_caps: "audio/x-raw,channels=2".to_owned(),
        preview_caps: "video/x-raw,width=320,height=180".to_owned(),
    }
}

#[test]
fn bare_display_chain_serializes_to_a_single_video_branch() {
    let syntax = launch_syntax(&graph::build(&config()));

    assert_eq!(
        syntax,
        "tcpclientsrc host=mixer.lan port=9001 ! queue ! matroskademux name=demux  \
         demux. ! video/x-raw,width=1280,height=720 ! queue ! xvimagesink name=v"
    );
}

#[test]
fn preview_overlay_and_metering_serialize_with_all_branches() {
    let syntax = launch_syntax(&graph::build(&PipelineConfig {
        use_previews: true,
        has_overlay_sink: true,
        wants_level_metering: true,
        ..config()
    }));

    assert_eq!(
        syntax,
        "tcpclientsrc host=mixer.lan port=10001 ! queue ! matroskademux name=demux  \
         demux. ! image/jpeg ! jpegdec ! video/x-raw,width=320,height=180 ! \
         videoscale method=nearest-neighbour ! videorate ! \
         video/x-raw,width=1280,height=720 ! queue ! \
         videoconvert ! cairooverlay name=overlay ! videoconvert ! xvimagesink name=v  \
         demux. ! audio/x-raw,channels=2 ! queue ! level name=lvl interval=50000000 ! fakesink"
    );
}

#[test]
fn audio_playback_ends_in_an_unsynchronized_playback_sink() {
    let syntax = launch_syntax(&graph::build(&PipelineConfig {
        wants_audio_playback: true,
        ..config()
    }));

    assert!(syntax.ends_with("level name=lvl interval=50000000 ! alsasink sync=false"));
    // Exactly one audio branch links from the demultiplexer.
    assert_eq!(syntax.matches("demux. !").count(), 2);
}

#[test]
fn serialization_is_deterministic() {
    let config = PipelineConfig {
        use_previews: true,
        has_overlay_sink: true,
        wants_audio_playback: true,
        wants_level_metering: true,
        ..config()
    };
    assert_eq!(
        launch_syntax(&graph::build(&config)),
        launch_syntax(&graph::build(&config))
    );
}
