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

//! Error types returned while resolving units.

/// No candidate signature accepted the supplied arguments.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("no matching signature: invalid combination of arguments ({supplied})")]
pub struct BindingError {
    supplied: String,
}

impl BindingError {
    /// Creates a binding error describing the arguments that were supplied.
    pub fn new(supplied: impl Into<String>) -> BindingError {
        BindingError {
            supplied: supplied.into(),
        }
    }

    /// Describes the arguments that failed to bind.
    pub fn supplied(&self) -> &str {
        &self.supplied
    }
}

/// A value is outside of its legal domain.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("{kind} {value} is out of range")]
    OutOfRange { kind: &'static str, value: i64 },

    #[error("{kind} {value} is out of range")]
    FloatOutOfRange { kind: &'static str, value: f64 },

    #[error("invalid note name '{0}'")]
    InvalidNoteName(String),

    #[error("invalid note range '{0}'")]
    InvalidNoteRange(String),

    #[error("invalid key name '{0}'")]
    InvalidKey(String),

    #[error("invalid event type {0:#x}")]
    InvalidEventType(u32),

    #[error("{param} expects {expected}, got {got}")]
    WrongType {
        param: &'static str,
        expected: &'static str,
        got: String,
    },

    #[error("sysex too short ({0} bytes)")]
    SysexTooShort(usize),

    #[error("sysex doesn't start with F0 (starts with {0:#04X})")]
    SysexStart(i64),

    #[error("sysex doesn't end with F7 (ends with {0:#04X})")]
    SysexEnd(i64),

    #[error("sysex data byte {value} at position {index} is out of range")]
    SysexDataByte { index: usize, value: i64 },

    #[error("manufacturer id must be either one or three bytes (got {0})")]
    ManufacturerLength(usize),

    #[error("three-byte manufacturer id must start with null byte (starts with {0:#04X})")]
    ManufacturerPrefix(i64),

    #[error("manufacturer id byte {0} is out of range")]
    ManufacturerByte(i64),

    #[error("notes and values must be sequences of the same length ({notes} notes, {values} values)")]
    LengthMismatch { notes: usize, values: usize },

    #[error("need at least two notes (got {0})")]
    TooFewPoints(usize),

    #[error("notes must be in ascending order (got {0:?})")]
    NotAscending(Vec<i64>),

    #[error("in_min must be less than in_max (got in_min {in_min}, in_max {in_max})")]
    InputRange { in_min: i64, in_max: i64 },

    #[error("lower velocity {lower} must not exceed upper velocity {upper}")]
    VelocityBounds { lower: i64, upper: i64 },
}

/// Port lookups and configuration files that could not be resolved.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("port name '{0}' is ambiguous")]
    AmbiguousPort(String),

    #[error("invalid port name '{0}'")]
    UnknownPort(String),

    #[error("unknown unit '{0}'")]
    UnknownUnit(String),

    #[error("Config load/parse error: {0}")]
    Load(#[from] config::ConfigError),
}

/// Any failure raised while turning a unit call into a descriptor.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Binding(#[from] BindingError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
