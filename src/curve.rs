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

//! Velocity and controller curves handed to the engine.
//!
//! The engine interpolates; this module only checks that a curve is well formed and keeps its
//! points in order.

use std::fmt;

use midly::num::u7;

use crate::convert;
use crate::error::ValidationError;
use crate::settings::Settings;
use crate::value::Value;

/// How the engine applies a curve value. The discriminants are part of the engine contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Mode {
    /// Adds the value.
    Offset = 1,
    /// Multiplies by the value.
    Multiply = 2,
    /// Replaces with the value.
    Fixed = 3,
    /// Applies an exponential curve with the value as gamma.
    Gamma = 4,
    /// Applies the engine's curve with the value as its shape parameter.
    Curve = 5,
}

impl Mode {
    /// Every mode, in engine order.
    pub const ALL: [Mode; 5] = [
        Mode::Offset,
        Mode::Multiply,
        Mode::Fixed,
        Mode::Gamma,
        Mode::Curve,
    ];

    /// The engine's integer for this mode.
    pub fn as_int(self) -> u8 {
        self as u8
    }

    /// The keyword that selects this mode.
    pub fn keyword(self) -> &'static str {
        match self {
            Mode::Offset => "offset",
            Mode::Multiply => "multiply",
            Mode::Fixed => "fixed",
            Mode::Gamma => "gamma",
            Mode::Curve => "curve",
        }
    }
}

impl TryFrom<u8> for Mode {
    type Error = u8;

    fn try_from(value: u8) -> Result<Mode, u8> {
        Mode::ALL
            .into_iter()
            .find(|mode| mode.as_int() == value)
            .ok_or(value)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.keyword())
    }
}

/// A single value applied uniformly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scalar {
    mode: Mode,
    value: f64,
}

impl Scalar {
    /// Gets the mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Gets the value.
    pub fn value(&self) -> f64 {
        self.value
    }
}

/// Values pinned to notes; the engine interpolates between neighbouring points.
#[derive(Debug, Clone, PartialEq)]
pub struct Slope {
    mode: Mode,
    notes: Vec<u7>,
    values: Vec<f64>,
}

impl Slope {
    /// Gets the mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Gets the notes, in ascending order.
    pub fn notes(&self) -> &[u7] {
        &self.notes
    }

    /// Gets the value at each note.
    pub fn values(&self) -> &[f64] {
        &self.values
    }
}

/// Builds a single-value curve. The caller checks the value against its own domain.
pub fn scalar(mode: Mode, value: f64) -> Scalar {
    Scalar { mode, value }
}

/// Builds a multi-point curve. Notes are converted first, then the point lists must have the same
/// length, contain at least two points and be in ascending note order.
pub fn slope(
    mode: Mode,
    notes: &[Value],
    values: &[f64],
    settings: &Settings,
) -> Result<Slope, ValidationError> {
    let numbers = notes
        .iter()
        .map(|note| convert::note_number(note, settings))
        .collect::<Result<Vec<i64>, ValidationError>>()?;

    if numbers.len() != values.len() {
        return Err(ValidationError::LengthMismatch {
            notes: numbers.len(),
            values: values.len(),
        });
    }
    if numbers.len() < 2 {
        return Err(ValidationError::TooFewPoints(numbers.len()));
    }
    if numbers.windows(2).any(|pair| pair[0] > pair[1]) {
        return Err(ValidationError::NotAscending(numbers));
    }

    Ok(Slope {
        mode,
        notes: numbers
            .into_iter()
            .map(|n| u7::from_int_lossy(n as u8))
            .collect(),
        values: values.to_vec(),
    })
}

#[cfg(test)]
mod test {
    use std::error::Error;

    use midly::num::u7;

    use crate::error::ValidationError;
    use crate::settings::Settings;
    use crate::value::Value;

    use super::{scalar, slope, Mode};

    fn notes(notes: &[i64]) -> Vec<Value> {
        notes.iter().map(|n| Value::Int(*n)).collect()
    }

    #[test]
    fn modes() {
        assert_eq!(
            vec![1, 2, 3, 4, 5],
            Mode::ALL.iter().map(|m| m.as_int()).collect::<Vec<u8>>()
        );
        assert_eq!(Ok(Mode::Gamma), Mode::try_from(4u8));
        assert_eq!(Err(0), Mode::try_from(0u8));
        assert_eq!("multiply", Mode::Multiply.to_string());
    }

    #[test]
    fn scalar_passes_through() {
        let curve = scalar(Mode::Gamma, 0.7);
        assert_eq!(Mode::Gamma, curve.mode());
        assert_eq!(0.7, curve.value());
    }

    #[test]
    fn slope_keeps_points() -> Result<(), Box<dyn Error>> {
        let curve = slope(
            Mode::Multiply,
            &[Value::from("c4"), Value::from(60), Value::from("c5")],
            &[0.25, 1.0 / 3.0, 2.0],
            &Settings::DEFAULT,
        )?;
        assert_eq!(Mode::Multiply, curve.mode());
        assert_eq!(
            &[u7::from(48), u7::from(60), u7::from(60)],
            curve.notes()
        );
        assert_eq!(&[0.25, 1.0 / 3.0, 2.0], curve.values());
        Ok(())
    }

    #[test]
    fn slope_invariants() {
        let settings = Settings::DEFAULT;

        assert_eq!(
            Err(ValidationError::LengthMismatch {
                notes: 2,
                values: 3
            }),
            slope(Mode::Offset, &notes(&[48, 60]), &[1.0, 2.0, 3.0], &settings)
        );
        assert_eq!(
            Err(ValidationError::TooFewPoints(1)),
            slope(Mode::Offset, &notes(&[48]), &[1.0], &settings)
        );
        assert_eq!(
            Err(ValidationError::TooFewPoints(0)),
            slope(Mode::Offset, &[], &[], &settings)
        );
        assert_eq!(
            Err(ValidationError::NotAscending(vec![60, 48])),
            slope(Mode::Offset, &notes(&[60, 48]), &[1.0, 2.0], &settings)
        );
        assert!(matches!(
            slope(Mode::Offset, &notes(&[48, 200]), &[1.0, 2.0], &settings),
            Err(ValidationError::OutOfRange { value: 200, .. })
        ));
    }

    #[test]
    fn slope_notes_follow_octave_offset() -> Result<(), Box<dyn Error>> {
        let curve = slope(
            Mode::Fixed,
            &[Value::from("c3"), Value::from("c4")],
            &[10.0, 100.0],
            &Settings::DEFAULT.with_octave_offset(1),
        )?;
        assert_eq!(&[u7::from(48), u7::from(60)], curve.notes());
        Ok(())
    }
}
