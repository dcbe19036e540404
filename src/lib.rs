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

//! Resolves MIDI modifier units into validated, mode-tagged descriptors for a real-time event
//! engine.
//!
//! Unit calls come in through [`UnitBuilder`], either as typed method calls or by name with
//! dynamic [`Arguments`]. Polymorphic units pick their argument shape through the overload
//! resolver, numbers are converted into engine space using the [`Settings`] offsets, and the
//! result is a [`Unit`] or [`Patch`] the engine can consume as-is.

pub mod config;
pub mod convert;
pub mod curve;
pub mod error;
pub mod offset;
pub mod overload;
pub mod patch;
pub mod ports;
pub mod settings;
pub mod units;
pub mod value;

#[cfg(test)]
mod test;

pub use curve::Mode;
pub use error::{BindingError, ConfigError, Error, ValidationError};
pub use offset::{actual, no_offset, offset, DataValue};
pub use overload::Arguments;
pub use patch::{EventType, Patch, Unit};
pub use ports::{PortDirectory, PortNames, StaticPorts};
pub use settings::Settings;
pub use units::UnitBuilder;
pub use value::Value;
