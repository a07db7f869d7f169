// SPDX-FileCopyrightText: 2025 Contributors to the mixview project.
// SPDX-License-Identifier: Apache-2.0

//! Tests for the composite-mode toggle controller.
//!
//! The controller is exercised against the toolkit-free [`ToggleGroup`]
//! and a recording fake of the server connection. The fake captures
//! outbound sends and lets tests inject inbound notifications the same
//! way the real message bus would: one at a time, on the test thread.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use mixview::{
    CompositeMode, CompositionController, Connection, MessageHandler, ToggleGroup, messages,
};
use tracing_test::traced_test;

/// Recording fake of the remote mixing-session connection.
#[derive(Default)]
struct FakeConnection {
    sent: RefCell<Vec<(String, Vec<String>)>>,
    handlers: RefCell<HashMap<String, MessageHandler>>,
}

impl Connection for FakeConnection {
    fn send(&self, command: &str, args: &[&str]) {
        self.sent.borrow_mut().push((
            command.to_owned(),
            args.iter().map(|arg| (*arg).to_owned()).collect(),
        ));
    }

    fn on(&self, event: &str, handler: MessageHandler) {
        self.handlers.borrow_mut().insert(event.to_owned(), handler);
    }
}

impl FakeConnection {
    /// Delivers an inbound notification to the registered handler.
    fn deliver(&self, event: &str, args: &[&str]) {
        let mut handlers = self.handlers.borrow_mut();
        let handler = handlers
            .get_mut(event)
            .unwrap_or_else(|| panic!("no handler registered for \"{event}\""));
        let args: Vec<String> = args.iter().map(|arg| (*arg).to_owned()).collect();
        handler(&args);
    }

    /// Outbound messages sent so far, oldest first.
    fn sent(&self) -> Vec<(String, Vec<String>)> {
        self.sent.borrow().clone()
    }
}

fn setup() -> (
    Rc<RefCell<ToggleGroup>>,
    Rc<FakeConnection>,
    CompositionController<ToggleGroup, FakeConnection>,
) {
    let panel = Rc::new(RefCell::new(ToggleGroup::new()));
    let connection = Rc::new(FakeConnection::default());
    let controller = CompositionController::new(Rc::clone(&panel), Rc::clone(&connection));
    (panel, connection, controller)
}

#[test]
fn construction_registers_accelerators_and_requests_initial_state() {
    let (_panel, _connection, controller) = setup();

    // Everything the test needs is reachable through the controller's
    // own accessors.
    let panel = controller.panel().borrow();
    let chords: Vec<(CompositeMode, String)> = panel
        .controls()
        .iter()
        .map(|control| (control.mode(), control.accelerator().chord().to_owned()))
        .collect();
    assert_eq!(
        chords,
        vec![
            (CompositeMode::Fullscreen, "F1".to_owned()),
            (CompositeMode::PictureInPicture, "F2".to_owned()),
            (CompositeMode::SideBySideEqual, "F3".to_owned()),
            (CompositeMode::SideBySidePreview, "F4".to_owned()),
        ]
    );

    // Nothing is active until the server answers, and the only message
    // so far is the state request.
    assert_eq!(panel.active(), None);
    assert_eq!(
        controller.connection().sent(),
        vec![(messages::GET_COMPOSITE_MODE.to_owned(), vec![])]
    );
}

#[test]
fn local_activation_sends_exactly_one_mode_switch_request() {
    let (panel, connection, _controller) = setup();

    panel.borrow_mut().click(CompositeMode::Fullscreen);

    let sent = connection.sent();
    assert_eq!(sent.len(), 2);
    assert_eq!(
        sent[1],
        (
            messages::SET_COMPOSITE_MODE.to_owned(),
            vec!["fullscreen".to_owned()],
        )
    );

    // Clicking the already-active control again is a no-op.
    panel.borrow_mut().click(CompositeMode::Fullscreen);
    assert_eq!(connection.sent().len(), 2);
}

#[test]
fn remote_notification_switches_the_toggle_without_echoing_back() {
    let (panel, connection, _controller) = setup();

    connection.deliver(messages::COMPOSITE_MODE, &["fullscreen"]);
    assert_eq!(panel.borrow().active(), Some(CompositeMode::Fullscreen));

    connection.deliver(messages::COMPOSITE_MODE, &["picture_in_picture"]);
    let panel = panel.borrow();
    assert_eq!(panel.active(), Some(CompositeMode::PictureInPicture));

    // Exactly one control is active and no set_composite_mode was
    // caused by either transition.
    assert_eq!(
        panel
            .controls()
            .iter()
            .filter(|control| control.is_active())
            .count(),
        1
    );
    assert_eq!(
        connection.sent(),
        vec![(messages::GET_COMPOSITE_MODE.to_owned(), vec![])]
    );
}

#[test]
fn server_echo_of_a_local_click_does_not_resend() {
    let (panel, connection, _controller) = setup();

    panel.borrow_mut().click(CompositeMode::SideBySideEqual);
    assert_eq!(connection.sent().len(), 2);

    // The authoritative echo confirms the switch; it must not bounce
    // back towards the server.
    connection.deliver(messages::COMPOSITE_MODE, &["side_by_side_equal"]);
    assert_eq!(connection.sent().len(), 2);
    assert_eq!(panel.borrow().active(), Some(CompositeMode::SideBySideEqual));
}

#[traced_test]
#[test]
fn unknown_remote_mode_is_logged_and_ignored() {
    let (panel, connection, _controller) = setup();

    connection.deliver(messages::COMPOSITE_MODE, &["fullscreen"]);
    connection.deliver(messages::COMPOSITE_MODE, &["unknown_mode"]);

    assert!(logs_contain("unknown composite mode \"unknown_mode\""));

    // State is unchanged and nothing was sent in response.
    assert_eq!(panel.borrow().active(), Some(CompositeMode::Fullscreen));
    assert_eq!(
        connection.sent(),
        vec![(messages::GET_COMPOSITE_MODE.to_owned(), vec![])]
    );
}

#[traced_test]
#[test]
fn empty_remote_notification_is_treated_as_unknown() {
    let (panel, connection, _controller) = setup();

    connection.deliver(messages::COMPOSITE_MODE, &[]);

    assert!(logs_contain("unknown composite mode"));
    assert_eq!(panel.borrow().active(), None);
}

#[test]
fn at_most_one_control_is_active_across_mixed_events() {
    let (panel, connection, _controller) = setup();

    connection.deliver(messages::COMPOSITE_MODE, &["side_by_side_preview"]);
    panel.borrow_mut().click(CompositeMode::Fullscreen);
    connection.deliver(messages::COMPOSITE_MODE, &["picture_in_picture"]);

    let panel = panel.borrow();
    assert_eq!(
        panel
            .controls()
            .iter()
            .filter(|control| control.is_active())
            .count(),
        1
    );
    assert_eq!(panel.active(), Some(CompositeMode::PictureInPicture));
}
