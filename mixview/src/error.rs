// SPDX-FileCopyrightText: 2025 Contributors to the mixview project.
// SPDX-License-Identifier: Apache-2.0

//! Error types for mixview operations.
//!
//! Runtime failures in this crate are deliberately small in number: the
//! controller can receive a composite-mode name it does not know, and
//! settings can fail to parse. Everything engine-related is reported by
//! the realization layer (`gst-mixview-rs`), not here.

/// Convenience result type using [`Error`] as the error variant.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors that can occur in the mixview core.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A remote notification named a composite mode this front-end does
    /// not know. Logged and ignored by the controller; local toggle
    /// state is left unchanged.
    #[error("unknown composite mode \"{0}\"")]
    UnknownMode(String),

    /// The settings document could not be parsed.
    #[error("invalid settings: {0}")]
    Settings(#[from] serde_json::Error),
}
