// SPDX-FileCopyrightText: 2025 Contributors to the mixview project.
// SPDX-License-Identifier: Apache-2.0

//! Composite-mode toggle controller.
//!
//! Synchronizes a group of mutually-exclusive toggles with the remote
//! mixing session. The server owns the authoritative state: a local
//! click only *requests* a mode switch and mutates nothing directly;
//! the toggle state follows the server's `composite_mode` echo.
//!
//! ## Feedback-loop prevention
//!
//! A remote notification is applied through [`TogglePanel::set_active`],
//! which by contract never fires the user-activation handler. The send
//! towards the server therefore happens exclusively on the user path,
//! and a server echo can never bounce back as another
//! `set_composite_mode`.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::{error, info};

use crate::composite::CompositeMode;
use crate::connection::{Connection, messages};
use crate::toggles::{Accelerator, TogglePanel};

/// Manages accelerators, clicks and server sync for the composition toggles.
///
/// # Examples
///
/// ```
/// use std::cell::RefCell;
/// use std::rc::Rc;
///
/// use mixview::{CompositionController, Connection, MessageHandler, ToggleGroup};
///
/// struct NullConnection;
///
/// impl Connection for NullConnection {
///     fn send(&self, _command: &str, _args: &[&str]) {}
///     fn on(&self, _event: &str, _handler: MessageHandler) {}
/// }
///
/// let panel = Rc::new(RefCell::new(ToggleGroup::new()));
/// let connection = Rc::new(NullConnection);
/// let controller = CompositionController::new(Rc::clone(&panel), connection);
/// assert_eq!(controller.panel().borrow().controls().len(), 4);
/// ```
pub struct CompositionController<P: TogglePanel + 'static, C: Connection + 'static> {
    panel: Rc<RefCell<P>>,
    connection: Rc<C>,
}

impl<P, C> CompositionController<P, C>
where
    P: TogglePanel + 'static,
    C: Connection + 'static,
{
    /// Wires the toggle panel to the remote session.
    ///
    /// Binds the Nth function key to the Nth composite mode in
    /// declaration order, installs the user-activation handler, registers
    /// the inbound `composite_mode` handler and finally requests the
    /// current server state to resynchronize.
    pub fn new(panel: Rc<RefCell<P>>, connection: Rc<C>) -> Self {
        {
            let mut panel_ref = panel.borrow_mut();

            for (index, mode) in CompositeMode::ALL.into_iter().enumerate() {
                panel_ref.register(mode, Accelerator::function_key(index as u8 + 1));
            }

            // User path: forward the request to the server, touch no
            // local state. The toggle follows the server echo.
            let outbound = Rc::clone(&connection);
            panel_ref.on_activate(Box::new(move |mode| {
                info!("composition mode activated: {mode}");
                outbound.send(messages::SET_COMPOSITE_MODE, &[mode.as_str()]);
            }));
        }

        // Remote path: apply the authoritative state without re-entering
        // the user-activation handler.
        let remote_panel = Rc::clone(&panel);
        connection.on(
            messages::COMPOSITE_MODE,
            Box::new(move |args| {
                let name = args.first().map(String::as_str).unwrap_or_default();
                match name.parse::<CompositeMode>() {
                    Ok(mode) => {
                        info!("composite mode update from server: {mode}");
                        remote_panel.borrow_mut().set_active(mode);
                    }
                    Err(err) => error!("{err}"),
                }
            }),
        );

        // Request the initial state; the answer arrives as a regular
        // composite_mode notification.
        connection.send(messages::GET_COMPOSITE_MODE, &[]);

        CompositionController { panel, connection }
    }

    /// The toggle panel driven by this controller.
    pub fn panel(&self) -> &Rc<RefCell<P>> {
        &self.panel
    }

    /// The server connection this controller sends on.
    pub fn connection(&self) -> &C {
        &self.connection
    }
}
