// SPDX-FileCopyrightText: 2025 Contributors to the mixview project.
// SPDX-License-Identifier: Apache-2.0

//! Contract of the remote mixing-session connection.
//!
//! The connection itself (socket handling, framing, reconnection) is an
//! external collaborator. This crate only relies on two capabilities:
//! fire-and-forget sends and handler registration for inbound message
//! types, with handlers invoked on the UI thread.

/// Handler for one inbound message type. Receives the message arguments.
pub type MessageHandler = Box<dyn FnMut(&[String])>;

/// Asynchronous message bus towards the remote mixing session.
///
/// `send` must not block the UI thread; delivery is best-effort and
/// unordered relative to inbound notifications. Handlers registered via
/// `on` are invoked on the UI thread when a message of that type
/// arrives, one message at a time.
pub trait Connection {
    /// Sends `command` with the given arguments, fire-and-forget.
    fn send(&self, command: &str, args: &[&str]);

    /// Registers `handler` for inbound messages of type `event`.
    fn on(&self, event: &str, handler: MessageHandler);
}

/// Message names of the composite-mode protocol.
///
/// This is the complete set of server messages this front-end core
/// uses; the wider session protocol is out of scope.
pub mod messages {
    /// Outbound: request the server to switch composite mode.
    pub const SET_COMPOSITE_MODE: &str = "set_composite_mode";

    /// Outbound: request the current composite mode (no arguments).
    pub const GET_COMPOSITE_MODE: &str = "get_composite_mode";

    /// Inbound: authoritative composite-mode notification.
    pub const COMPOSITE_MODE: &str = "composite_mode";
}
