// SPDX-FileCopyrightText: 2025 Contributors to the mixview project.
// SPDX-License-Identifier: Apache-2.0

//! Composite-mode enumeration.
//!
//! A composite mode is the arrangement rule the mixing server applies to
//! its video sources. The set is fixed at startup; exactly one mode is
//! active within a toggle group at any time. The wire names used on the
//! server connection are the lower-snake-case names in [`CompositeMode::as_str`].

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// On-screen composition applied to the mixed video sources.
///
/// Declaration order is significant: the controller binds the Nth
/// function key to the Nth mode of [`CompositeMode::ALL`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompositeMode {
    /// One source fills the whole frame
    Fullscreen,

    /// Second source inset into a corner of the first
    PictureInPicture,

    /// Both sources at equal size next to each other
    SideBySideEqual,

    /// Primary source large, secondary as a smaller preview
    SideBySidePreview,
}

impl CompositeMode {
    /// All composite modes in declaration (accelerator-binding) order.
    pub const ALL: [CompositeMode; 4] = [
        CompositeMode::Fullscreen,
        CompositeMode::PictureInPicture,
        CompositeMode::SideBySideEqual,
        CompositeMode::SideBySidePreview,
    ];

    /// Returns the wire name used on the server connection.
    pub fn as_str(self) -> &'static str {
        match self {
            CompositeMode::Fullscreen => "fullscreen",
            CompositeMode::PictureInPicture => "picture_in_picture",
            CompositeMode::SideBySideEqual => "side_by_side_equal",
            CompositeMode::SideBySidePreview => "side_by_side_preview",
        }
    }
}

impl fmt::Display for CompositeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CompositeMode {
    type Err = Error;

    /// Parses a wire name back into a mode.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownMode`] for any name that is not one of the
    /// four known wire names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CompositeMode::ALL
            .into_iter()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| Error::UnknownMode(s.to_owned()))
    }
}
