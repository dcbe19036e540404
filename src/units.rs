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

//! The user-facing unit constructors.

use midly::num::u7;
use tracing::{debug, warn};

use crate::convert;
use crate::curve::{self, Mode};
use crate::error::{ConfigError, Error, ValidationError};
use crate::offset::DataValue;
use crate::overload::{self, Arguments, Signature};
use crate::patch::{EventType, Patch, Unit};
use crate::ports::{PortDirectory, PortNames};
use crate::settings::{self, Settings};
use crate::value::Value;

const VELOCITY: &[Signature<Mode>] = &[
    Signature::new(&["offset"], Mode::Offset),
    Signature::new(&["multiply"], Mode::Multiply),
    Signature::new(&["fixed"], Mode::Fixed),
    Signature::new(&["gamma"], Mode::Gamma),
    Signature::new(&["curve"], Mode::Curve),
];

const VELOCITY_SLOPE: &[Signature<Mode>] = &[
    Signature::new(&["notes", "offset"], Mode::Offset),
    Signature::new(&["notes", "multiply"], Mode::Multiply),
    Signature::new(&["notes", "fixed"], Mode::Fixed),
    Signature::new(&["notes", "gamma"], Mode::Gamma),
    Signature::new(&["notes", "curve"], Mode::Curve),
];

const PORT: &[Signature<()>] = &[Signature::new(&["port"], ())];
const CHANNEL: &[Signature<()>] = &[Signature::new(&["channel"], ())];
const TRANSPOSE: &[Signature<()>] = &[Signature::new(&["offset"], ())];
const NOTE: &[Signature<()>] = &[Signature::new(&["note"], ())];
const VELOCITY_LIMIT: &[Signature<()>] = &[Signature::new(&["lower", "upper"], ())];
const CTRL_MAP: &[Signature<()>] = &[Signature::new(&["ctrl_in", "ctrl_out"], ())];

/// Tagged with which of `in_min` and `in_max` were given.
const CTRL_RANGE: &[Signature<(bool, bool)>] = &[
    Signature::new(&["ctrl", "out_min", "out_max"], (false, false)),
    Signature::new(&["ctrl", "out_min", "out_max", "in_min"], (true, false)),
    Signature::new(&["ctrl", "out_min", "out_max", "in_max"], (false, true)),
    Signature::new(&["ctrl", "out_min", "out_max", "in_min", "in_max"], (true, true)),
];

const DEFAULT_IN_MIN: i64 = 0;
const DEFAULT_IN_MAX: i64 = 127;

/// Velocity ranges are half open; this is one past the highest velocity.
const VELOCITY_END: u8 = 128;

/// Builds units against one snapshot of the numbering settings and the engine's port names.
#[derive(Debug, Clone, Default)]
pub struct UnitBuilder {
    settings: Settings,
    ports: PortNames,
}

impl UnitBuilder {
    /// Creates a builder.
    pub fn new(settings: Settings, ports: PortNames) -> UnitBuilder {
        UnitBuilder { settings, ports }
    }

    /// Creates a builder reading port names from the given directory once.
    pub fn with_directory(settings: Settings, directory: &dyn PortDirectory) -> UnitBuilder {
        UnitBuilder::new(settings, directory.snapshot())
    }

    /// Creates a builder from the process-wide settings, without any port names.
    pub fn current() -> UnitBuilder {
        UnitBuilder::new(settings::current(), PortNames::default())
    }

    /// Gets the settings this builder converts with.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Gets the port names this builder resolves against.
    pub fn ports(&self) -> &PortNames {
        &self.ports
    }

    /// Routes events to a port, given by number or by name.
    pub fn port(&self, port: impl Into<Value>) -> Result<Unit, Error> {
        let port = convert::port_number(&port.into(), &self.settings, &self.ports)?;
        Ok(Unit::Port(port))
    }

    /// Moves events to a channel.
    pub fn channel(&self, channel: impl Into<DataValue>) -> Result<Unit, Error> {
        Ok(Unit::Channel(convert::channel_number(
            channel,
            &self.settings,
        )?))
    }

    /// Shifts notes by `offset` semitones.
    pub fn transpose(&self, offset: i32) -> Unit {
        Unit::Transpose(offset)
    }

    /// Changes every note event to `note`, keeping its velocity.
    pub fn note(&self, note: impl Into<Value>) -> Result<Patch, Error> {
        let note = seven_bit(convert::note_number(&note.into(), &self.settings)?);
        Ok(Patch::Only {
            filter: EventType::NOTE,
            patch: Box::new(Patch::TypeSplit(vec![
                (EventType::NOTEON, Unit::NoteOn { note }.into()),
                (EventType::NOTEOFF, Unit::NoteOff { note }.into()),
            ])),
        })
    }

    /// Changes velocities. Takes exactly one of `offset`, `multiply`, `fixed`, `gamma` or
    /// `curve`.
    pub fn velocity(&self, args: &Arguments) -> Result<Unit, Error> {
        let (values, mode) = overload::resolve(args, VELOCITY)?.into_parts();
        let value = values[0].as_float(mode.keyword())?;
        if mode == Mode::Fixed {
            check_fixed_velocity(value)?;
        }

        Ok(Unit::Velocity(curve::scalar(mode, value)))
    }

    /// Changes velocities depending on the note. Takes `notes` plus one of `offset`, `multiply`,
    /// `fixed`, `gamma` or `curve`, each a sequence with one value per note.
    pub fn velocity_slope(&self, args: &Arguments) -> Result<Unit, Error> {
        let (bound, mode) = overload::resolve(args, VELOCITY_SLOPE)?.into_parts();
        let notes = bound[0].as_seq("notes")?;
        let values = bound[1]
            .as_seq(mode.keyword())?
            .iter()
            .map(|value| value.as_float(mode.keyword()))
            .collect::<Result<Vec<f64>, ValidationError>>()?;

        let slope = curve::slope(mode, notes, &values, &self.settings)?;
        if mode == Mode::Fixed {
            for value in slope.values() {
                check_fixed_velocity(*value)?;
            }
        }

        Ok(Unit::VelocitySlope(slope))
    }

    #[deprecated(note = "use `velocity` with `multiply`")]
    pub fn velocity_multiply(&self, value: f64) -> Result<Unit, Error> {
        warn!("velocity_multiply is deprecated, use velocity(multiply=...)");
        self.velocity(&Arguments::new().kwarg("multiply", value))
    }

    #[deprecated(note = "use `velocity` with `fixed`")]
    pub fn velocity_fixed(&self, value: i64) -> Result<Unit, Error> {
        warn!("velocity_fixed is deprecated, use velocity(fixed=...)");
        self.velocity(&Arguments::new().kwarg("fixed", value))
    }

    #[deprecated(note = "use `velocity` with `gamma`")]
    pub fn velocity_curve(&self, gamma: f64) -> Result<Unit, Error> {
        warn!("velocity_curve is deprecated, use velocity(gamma=...)");
        self.velocity(&Arguments::new().kwarg("gamma", gamma))
    }

    #[deprecated(note = "use `velocity_slope` with `offset`")]
    pub fn velocity_gradient(
        &self,
        note_lower: impl Into<Value>,
        note_upper: impl Into<Value>,
        value_lower: f64,
        value_upper: f64,
    ) -> Result<Unit, Error> {
        warn!("velocity_gradient is deprecated, use velocity_slope(offset=...)");
        self.gradient(Mode::Offset, note_lower, note_upper, value_lower, value_upper)
    }

    #[deprecated(note = "use `velocity_slope` with `multiply`")]
    pub fn velocity_gradient_multiply(
        &self,
        note_lower: impl Into<Value>,
        note_upper: impl Into<Value>,
        value_lower: f64,
        value_upper: f64,
    ) -> Result<Unit, Error> {
        warn!("velocity_gradient_multiply is deprecated, use velocity_slope(multiply=...)");
        self.gradient(Mode::Multiply, note_lower, note_upper, value_lower, value_upper)
    }

    #[deprecated(note = "use `velocity_slope` with `fixed`")]
    pub fn velocity_gradient_fixed(
        &self,
        note_lower: impl Into<Value>,
        note_upper: impl Into<Value>,
        value_lower: f64,
        value_upper: f64,
    ) -> Result<Unit, Error> {
        warn!("velocity_gradient_fixed is deprecated, use velocity_slope(fixed=...)");
        self.gradient(Mode::Fixed, note_lower, note_upper, value_lower, value_upper)
    }

    fn gradient(
        &self,
        mode: Mode,
        note_lower: impl Into<Value>,
        note_upper: impl Into<Value>,
        value_lower: f64,
        value_upper: f64,
    ) -> Result<Unit, Error> {
        let notes: (Value, Value) = (note_lower.into(), note_upper.into());
        self.velocity_slope(
            &Arguments::new()
                .arg(notes)
                .kwarg(mode.keyword(), (value_lower, value_upper)),
        )
    }

    /// Keeps note velocities within `[lower, upper]`: lower velocities become `lower`, higher
    /// ones become `upper`.
    pub fn velocity_limit(&self, lower: i64, upper: i64) -> Result<Patch, Error> {
        let lower_velocity = convert::velocity_value(lower)?.as_int();
        let upper_velocity = convert::velocity_value(upper)?.as_int();
        if lower > upper {
            return Err(ValidationError::VelocityBounds { lower, upper }.into());
        }

        Ok(Patch::Only {
            filter: EventType::NOTE,
            patch: Box::new(Patch::VelocitySplit(vec![
                (
                    0..lower_velocity,
                    self.velocity(&Arguments::new().kwarg("fixed", lower))?
                        .into(),
                ),
                (lower_velocity..upper_velocity, Patch::Pass),
                (
                    upper_velocity..VELOCITY_END,
                    self.velocity(&Arguments::new().kwarg("fixed", upper))?
                        .into(),
                ),
            ])),
        })
    }

    /// Moves controller `ctrl_in` to `ctrl_out`.
    pub fn ctrl_map(&self, ctrl_in: i64, ctrl_out: i64) -> Result<Unit, Error> {
        Ok(Unit::CtrlMap {
            ctrl_in: convert::ctrl_number(ctrl_in)?,
            ctrl_out: convert::ctrl_number(ctrl_out)?,
        })
    }

    /// Maps the full range of a controller onto `[out_min, out_max]`.
    pub fn ctrl_range(&self, ctrl: i64, out_min: i64, out_max: i64) -> Result<Unit, Error> {
        self.ctrl_range_with_input(ctrl, out_min, out_max, None, None)
    }

    /// Maps `[in_min, in_max]` of a controller onto `[out_min, out_max]`. A missing `in_min`
    /// is 0 and a missing `in_max` is 127.
    pub fn ctrl_range_with_input(
        &self,
        ctrl: i64,
        out_min: i64,
        out_max: i64,
        in_min: Option<i64>,
        in_max: Option<i64>,
    ) -> Result<Unit, Error> {
        let in_min = in_min.unwrap_or(DEFAULT_IN_MIN);
        let in_max = in_max.unwrap_or(DEFAULT_IN_MAX);
        if in_min >= in_max {
            return Err(ValidationError::InputRange { in_min, in_max }.into());
        }

        Ok(Unit::CtrlRange {
            ctrl: convert::ctrl_number(ctrl)?,
            out_min,
            out_max,
            in_min,
            in_max,
        })
    }

    /// Builds a unit by name from dynamically supplied arguments.
    pub fn build(&self, unit: &str, args: &Arguments) -> Result<Patch, Error> {
        debug!(unit, args = %args, "Building unit");

        match unit {
            "port" => {
                let values = bind(args, PORT)?;
                Ok(self.port(values[0].clone())?.into())
            }
            "channel" => {
                let values = bind(args, CHANNEL)?;
                Ok(self.channel(values[0].as_data("channel")?)?.into())
            }
            "transpose" => {
                let values = bind(args, TRANSPOSE)?;
                let offset = values[0].as_int("offset")?;
                let offset = i32::try_from(offset).map_err(|_| ValidationError::OutOfRange {
                    kind: "transpose offset",
                    value: offset,
                })?;
                Ok(self.transpose(offset).into())
            }
            "note" => {
                let values = bind(args, NOTE)?;
                self.note(values[0].clone())
            }
            "velocity" => Ok(self.velocity(args)?.into()),
            "velocity_slope" => Ok(self.velocity_slope(args)?.into()),
            "velocity_limit" => {
                let values = bind(args, VELOCITY_LIMIT)?;
                self.velocity_limit(values[0].as_int("lower")?, values[1].as_int("upper")?)
            }
            "ctrl_map" => {
                let values = bind(args, CTRL_MAP)?;
                Ok(self
                    .ctrl_map(
                        values[0].as_int("ctrl_in")?,
                        values[1].as_int("ctrl_out")?,
                    )?
                    .into())
            }
            "ctrl_range" => {
                let (values, (has_in_min, has_in_max)) =
                    overload::resolve(args, CTRL_RANGE)?.into_parts();
                let mut input = values[3..].iter();
                let in_min = if has_in_min {
                    input.next().map(|v| v.as_int("in_min")).transpose()?
                } else {
                    None
                };
                let in_max = if has_in_max {
                    input.next().map(|v| v.as_int("in_max")).transpose()?
                } else {
                    None
                };
                Ok(self
                    .ctrl_range_with_input(
                        values[0].as_int("ctrl")?,
                        values[1].as_int("out_min")?,
                        values[2].as_int("out_max")?,
                        in_min,
                        in_max,
                    )?
                    .into())
            }
            other => Err(ConfigError::UnknownUnit(other.to_string()).into()),
        }
    }
}

fn bind(args: &Arguments, table: &[Signature<()>]) -> Result<Vec<Value>, Error> {
    Ok(overload::resolve(args, table)?.into_parts().0)
}

/// Only call with values already checked against [0,127].
fn seven_bit(n: i64) -> u7 {
    u7::from_int_lossy(n as u8)
}

fn check_fixed_velocity(value: f64) -> Result<(), ValidationError> {
    if value.fract() != 0.0 || !(0.0..=127.0).contains(&value) {
        return Err(ValidationError::FloatOutOfRange {
            kind: "velocity",
            value,
        });
    }
    Ok(())
}
