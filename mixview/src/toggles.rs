// SPDX-FileCopyrightText: 2025 Contributors to the mixview project.
// SPDX-License-Identifier: Apache-2.0

//! Mutually-exclusive toggle controls and the toolkit capability trait.
//!
//! The controller never talks to widgets directly. It talks to a
//! [`TogglePanel`], the minimal capability a toolkit toggle row must
//! provide: register a control with an accelerator, set a control active
//! programmatically, and deliver user-driven activations to a handler.
//!
//! [`ToggleGroup`] is the toolkit-free model implementation of that
//! capability. It keeps user-driven activation ([`ToggleGroup::click`])
//! and remote-driven activation ([`TogglePanel::set_active`]) on two
//! distinct code paths that converge only at the state mutation, so a
//! remote update can never re-trigger the user handler and loop back to
//! the server.

use tracing::warn;

use crate::composite::CompositeMode;

/// Key chord bound to one toggle control.
///
/// The exact key is irrelevant to correctness; it must be unique per
/// mode and stable across runs.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Accelerator(String);

impl Accelerator {
    /// Returns the accelerator for the Nth function key (`F1`, `F2`, ...).
    pub fn function_key(n: u8) -> Self {
        Accelerator(format!("F{n}"))
    }

    /// Returns the key chord as the toolkit-facing string.
    pub fn chord(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Accelerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One named toggle control within a group.
///
/// Set membership and the accelerator are fixed at registration time;
/// only the active flag mutates afterwards.
#[derive(Debug, Clone)]
pub struct ToggleControl {
    mode: CompositeMode,
    accelerator: Accelerator,
    is_active: bool,
}

impl ToggleControl {
    /// The composite mode this control selects.
    pub fn mode(&self) -> CompositeMode {
        self.mode
    }

    /// The accelerator bound to this control.
    pub fn accelerator(&self) -> &Accelerator {
        &self.accelerator
    }

    /// Whether this control is currently the active one in its group.
    pub fn is_active(&self) -> bool {
        self.is_active
    }
}

/// Handler invoked on user-driven activation of a control.
pub type ActivateHandler = Box<dyn FnMut(CompositeMode)>;

/// Capability a toolkit toggle row must provide to the controller.
///
/// Implementations must guarantee that [`TogglePanel::set_active`] never
/// invokes the handler passed to [`TogglePanel::on_activate`]; only
/// genuine user interaction may do that.
pub trait TogglePanel {
    /// Adds a control for `mode` with the given accelerator.
    fn register(&mut self, mode: CompositeMode, accelerator: Accelerator);

    /// Activates the control for `mode` programmatically, deactivating
    /// all others. Does not fire the activation handler.
    fn set_active(&mut self, mode: CompositeMode);

    /// Installs the handler for user-driven activations. The handler
    /// fires only on a transition to active, never on deactivation.
    fn on_activate(&mut self, handler: ActivateHandler);
}

/// Toolkit-free group of mutually-exclusive toggle controls.
///
/// At most one control is active at any observation point. Toolkit
/// adapters can wrap this model, forwarding widget clicks to
/// [`ToggleGroup::click`] and mirroring [`ToggleControl::is_active`]
/// back into widget state.
#[derive(Default)]
pub struct ToggleGroup {
    controls: Vec<ToggleControl>,
    on_activate: Option<ActivateHandler>,
}

impl ToggleGroup {
    /// Creates an empty toggle group.
    pub fn new() -> Self {
        ToggleGroup::default()
    }

    /// User-driven activation of the control for `mode`.
    ///
    /// Fires the activation handler iff the control transitions to
    /// active. Clicking the already-active control is a no-op; the group
    /// is mutually exclusive and exactly one control stays active.
    pub fn click(&mut self, mode: CompositeMode) {
        if !self.apply(mode) {
            return;
        }
        if let Some(handler) = self.on_activate.as_mut() {
            handler(mode);
        }
    }

    /// Returns the currently active mode, if any control is active yet.
    pub fn active(&self) -> Option<CompositeMode> {
        self.controls
            .iter()
            .find(|control| control.is_active)
            .map(|control| control.mode)
    }

    /// Returns the registered controls in registration order.
    pub fn controls(&self) -> &[ToggleControl] {
        &self.controls
    }

    /// Makes the control for `mode` the single active one.
    ///
    /// Returns `true` iff the control transitioned to active. Shared by
    /// the user path and the remote path; everything that differs
    /// between the two happens in the callers.
    fn apply(&mut self, mode: CompositeMode) -> bool {
        if !self.controls.iter().any(|control| control.mode == mode) {
            warn!("ignoring activation of unregistered control {mode}");
            return false;
        }
        let mut transitioned = false;
        for control in &mut self.controls {
            let active = control.mode == mode;
            if active && !control.is_active {
                transitioned = true;
            }
            control.is_active = active;
        }
        transitioned
    }
}

impl TogglePanel for ToggleGroup {
    fn register(&mut self, mode: CompositeMode, accelerator: Accelerator) {
        self.controls.push(ToggleControl {
            mode,
            accelerator,
            is_active: false,
        });
    }

    fn set_active(&mut self, mode: CompositeMode) {
        // Remote path: state mutation only, the handler stays silent.
        self.apply(mode);
    }

    fn on_activate(&mut self, handler: ActivateHandler) {
        self.on_activate = Some(handler);
    }
}
