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

//! Translation between user-facing numbers and engine numbers.
//!
//! Every number that crosses into the engine goes through [`Settings::actual`] exactly once, and
//! every number coming back goes through [`Settings::offset`]. Nothing else adds or subtracts the
//! data offset.

use std::fmt;

use crate::settings::{self, Settings};

/// An integer on its way to the engine, tagged with whether the data offset applies to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataValue {
    /// A user-facing number; the data offset is subtracted.
    Plain(i64),
    /// Already an engine number; the data offset is skipped.
    NoOffset(i64),
}

/// Marks a number as unaffected by the data offset.
pub fn no_offset(n: i64) -> DataValue {
    DataValue::NoOffset(n)
}

impl DataValue {
    /// The number as written by the caller, regardless of the tag.
    pub fn raw(&self) -> i64 {
        match self {
            DataValue::Plain(n) | DataValue::NoOffset(n) => *n,
        }
    }
}

impl fmt::Display for DataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataValue::Plain(n) => write!(f, "{}", n),
            DataValue::NoOffset(n) => write!(f, "NoOffset({})", n),
        }
    }
}

macro_rules! plain_from {
    ($($t:ty),*) => {
        $(
            impl From<$t> for DataValue {
                fn from(value: $t) -> DataValue {
                    DataValue::Plain(value.into())
                }
            }
        )*
    };
}

plain_from!(i8, i16, i32, i64, u8, u16, u32);

impl Settings {
    /// Converts an engine number into user-facing numbering.
    pub fn offset(&self, n: i64) -> i64 {
        n + i64::from(self.data_offset())
    }

    /// Converts a user-facing number into engine numbering. `NoOffset` values come back as-is.
    pub fn actual(&self, value: impl Into<DataValue>) -> i64 {
        match value.into() {
            DataValue::Plain(n) => n - i64::from(self.data_offset()),
            DataValue::NoOffset(n) => n,
        }
    }
}

/// [`Settings::offset`] using the process-wide settings.
pub fn offset(n: i64) -> i64 {
    settings::current().offset(n)
}

/// [`Settings::actual`] using the process-wide settings.
pub fn actual(value: impl Into<DataValue>) -> i64 {
    settings::current().actual(value)
}
