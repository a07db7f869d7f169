// SPDX-FileCopyrightText: 2025 Contributors to the mixview project.
// SPDX-License-Identifier: Apache-2.0

//! Routing of engine events to typed callbacks.
//!
//! The pipeline emits an asynchronous event stream; [`EventRouter`]
//! demultiplexes it by kind and element name:
//!
//! - errors are logged and flip the display into its terminal
//!   [`DisplayState::Errored`] state
//! - level messages are accepted only from the metering stage and
//!   forwarded to the level callback, if one is registered
//! - everything else without a registered consumer is silently dropped
//!
//! The overlay draw signal is not a bus message; it is connected
//! directly on the overlay element by [`connect_draw`] and emitted from
//! the streaming thread.

use std::cell::Cell;
use std::rc::Rc;
use std::sync::Mutex;

use gst::glib;
use gst::prelude::*;
use gstreamer as gst;
use tracing::{error, warn};

use mixview::graph::LEVEL_NAME;

use crate::display::{DisplayState, DrawCallback, LevelCallback};

/// Structure name carried by level element messages.
const LEVEL_STRUCTURE: &str = "level";

/// Signal the overlay stage emits once per frame.
const DRAW_SIGNAL: &str = "draw";

/// Demultiplexes bus messages for one display pipeline.
///
/// Runs inside the bus watch, so all routing happens on the UI thread
/// in emission order.
pub(crate) struct EventRouter {
    state: Rc<Cell<DisplayState>>,
    level_callback: Option<LevelCallback>,
}

impl EventRouter {
    pub(crate) fn new(state: Rc<Cell<DisplayState>>, level_callback: Option<LevelCallback>) -> Self {
        EventRouter {
            state,
            level_callback,
        }
    }

    /// Routes one bus message by kind and source.
    pub(crate) fn route(&mut self, message: &gst::Message) {
        use gst::MessageView;

        match message.view() {
            MessageView::Error(err) => {
                // Terminal state: no retry, the display freezes on the
                // last frame. Restarting is the owner's business.
                self.state.set(DisplayState::Errored);
                error!(
                    "error on display pipeline from {:?}: {} ({:?})",
                    err.src().map(|source| source.path_string()),
                    err.error(),
                    err.debug(),
                );
            }
            MessageView::Element(element) => {
                let Some(structure) = element.structure() else {
                    return;
                };
                if structure.name().as_str() != LEVEL_STRUCTURE {
                    return;
                }
                // Only the metering stage of this pipeline counts.
                if !element
                    .src()
                    .is_some_and(|source| source.name() == LEVEL_NAME)
                {
                    return;
                }
                let Some(callback) = self.level_callback.as_mut() else {
                    return;
                };

                let peak = channel_values(structure, "peak");
                let rms = channel_values(structure, "rms");
                callback(&peak, &rms);
            }
            // Messages without a registered consumer are dropped.
            _ => {}
        }
    }
}

/// Extracts a per-channel f64 list from a level message structure.
fn channel_values(structure: &gst::StructureRef, field: &str) -> Vec<f64> {
    match structure.get::<glib::ValueArray>(field) {
        Ok(values) => values
            .iter()
            .filter_map(|value| value.get::<f64>().ok())
            .collect(),
        Err(err) => {
            warn!("level message without \"{field}\" values: {err}");
            Vec::new()
        }
    }
}

/// Connects the draw callback to the overlay stage's per-frame signal.
///
/// The signal is emitted from the streaming thread, synchronously with
/// frame processing; the callback paints directly onto the provided
/// surface context and its return value is ignored.
pub(crate) fn connect_draw(overlay: &gst::Element, callback: DrawCallback) {
    let callback = Mutex::new(callback);
    overlay.connect(DRAW_SIGNAL, false, move |values| {
        let context = match values.get(1).map(|value| value.get::<cairo::Context>()) {
            Some(Ok(context)) => context,
            _ => {
                warn!("draw request without a surface context");
                return None;
            }
        };
        let timestamp = values
            .get(2)
            .and_then(|value| value.get::<u64>().ok())
            .unwrap_or_default();
        let duration = values
            .get(3)
            .and_then(|value| value.get::<u64>().ok())
            .unwrap_or_default();

        if let Ok(mut callback) = callback.lock() {
            callback(
                &context,
                gst::ClockTime::from_nseconds(timestamp),
                gst::ClockTime::from_nseconds(duration),
            );
        }
        None
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn init() {
        static INIT: std::sync::Once = std::sync::Once::new();
        INIT.call_once(|| gst::init().unwrap());
    }

    /// Synthesizes the element message the metering stage would post.
    fn level_message_from(element_name: &str) -> gst::Message {
        let source = gst::Bin::with_name(element_name);
        gst::message::Element::builder(gst::Structure::builder(LEVEL_STRUCTURE).build())
            .src(&source)
            .build()
    }

    #[test]
    fn engine_error_flips_the_display_into_its_terminal_state() {
        init();
        let state = Rc::new(Cell::new(DisplayState::Running));
        let mut router = EventRouter::new(Rc::clone(&state), None);

        router.route(&gst::message::Error::new(
            gst::CoreError::Failed,
            "stream stopped",
        ));

        assert_eq!(state.get(), DisplayState::Errored);
    }

    #[test]
    fn level_messages_are_accepted_only_from_the_metering_stage() {
        init();
        let state = Rc::new(Cell::new(DisplayState::Running));
        let calls = Rc::new(Cell::new(0u32));
        let seen = Rc::clone(&calls);
        let mut router = EventRouter::new(
            Rc::clone(&state),
            Some(Box::new(move |_, _| seen.set(seen.get() + 1))),
        );

        // Same structure name, foreign element: dropped.
        router.route(&level_message_from("some-other-element"));
        assert_eq!(calls.get(), 0);

        // Right element, wrong structure name: dropped.
        let metering = gst::Bin::with_name(LEVEL_NAME);
        router.route(
            &gst::message::Element::builder(gst::Structure::builder("spectrum").build())
                .src(&metering)
                .build(),
        );
        assert_eq!(calls.get(), 0);

        router.route(&level_message_from(LEVEL_NAME));
        assert_eq!(calls.get(), 1);
        assert_eq!(state.get(), DisplayState::Running);
    }

    #[test]
    fn level_message_without_channel_values_forwards_empty_slices() {
        init();
        let lengths = Rc::new(Cell::new(None));
        let seen = Rc::clone(&lengths);
        let mut router = EventRouter::new(
            Rc::new(Cell::new(DisplayState::Running)),
            Some(Box::new(move |peak: &[f64], rms: &[f64]| {
                seen.set(Some((peak.len(), rms.len())));
            })),
        );

        router.route(&level_message_from(LEVEL_NAME));

        assert_eq!(lengths.get(), Some((0, 0)));
    }
}
