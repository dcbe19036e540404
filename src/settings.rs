// Copyright (C) 2026 Michael Wilson <mike@mdwn.dev>
//
// This program is free software: you can redistribute it and/or modify it under
// the terms of the GNU General Public License as published by the Free Software
// Foundation, version 3.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE. See the GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along with
// this program. If not, see <https://www.gnu.org/licenses/>.
//

//! Numbering configuration shared by every converter.
//!
//! Converters take a [`Settings`] explicitly. The process-wide instance below exists so that
//! callers without a handle can still pick up the configured offsets; it is set with [`install`],
//! read with [`current`] and restored to the defaults with [`reset`].

use parking_lot::RwLock;
use tracing::info;

/// Offsets between user-facing numbering and engine numbering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Settings {
    /// Added to the octave of every note name before it is converted.
    octave_offset: i32,
    /// Subtracted from channel, program, port and scene numbers on their way to the engine.
    data_offset: i32,
}

impl Settings {
    /// Zero-based octaves and zero-based data.
    pub const DEFAULT: Settings = Settings::new(0, 0);

    /// Creates new settings.
    pub const fn new(octave_offset: i32, data_offset: i32) -> Settings {
        Settings {
            octave_offset,
            data_offset,
        }
    }

    /// Returns a copy with the given octave offset.
    pub const fn with_octave_offset(self, octave_offset: i32) -> Settings {
        Settings::new(octave_offset, self.data_offset)
    }

    /// Returns a copy with the given data offset.
    pub const fn with_data_offset(self, data_offset: i32) -> Settings {
        Settings::new(self.octave_offset, data_offset)
    }

    /// Gets the octave offset.
    pub fn octave_offset(&self) -> i32 {
        self.octave_offset
    }

    /// Gets the data offset.
    pub fn data_offset(&self) -> i32 {
        self.data_offset
    }
}

impl Default for Settings {
    fn default() -> Settings {
        Settings::DEFAULT
    }
}

static CURRENT: RwLock<Settings> = parking_lot::const_rwlock(Settings::DEFAULT);

/// Returns a snapshot of the process-wide settings.
pub fn current() -> Settings {
    *CURRENT.read()
}

/// Replaces the process-wide settings.
pub fn install(settings: Settings) {
    info!(
        octave_offset = settings.octave_offset,
        data_offset = settings.data_offset,
        "Installing numbering settings"
    );
    *CURRENT.write() = settings;
}

/// Restores the process-wide settings to [`Settings::DEFAULT`].
pub fn reset() {
    install(Settings::DEFAULT);
}
