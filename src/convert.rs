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

//! Validation and normalization of raw MIDI values.
//!
//! Every function here either returns a value the engine accepts as-is or fails with a
//! [`ValidationError`] naming the offending value. Nothing is clamped.

use midly::num::{u4, u7};

use crate::error::{Error, ValidationError};
use crate::offset::DataValue;
use crate::patch::EventType;
use crate::ports::PortNames;
use crate::settings::Settings;
use crate::value::Value;

/// Pitch class spellings accepted in note names, lowercase.
const PITCH_CLASSES: &[(&str, i64)] = &[
    ("c", 0),
    ("c#", 1),
    ("db", 1),
    ("d", 2),
    ("d#", 3),
    ("eb", 3),
    ("e", 4),
    ("f", 5),
    ("f#", 6),
    ("gb", 6),
    ("g", 7),
    ("g#", 8),
    ("ab", 8),
    ("a", 9),
    ("a#", 10),
    ("bb", 10),
    ("b", 11),
];

/// Canonical spelling of each pitch class.
const NOTE_NAMES: [&str; 12] = [
    "c", "c#", "d", "d#", "e", "f", "f#", "g", "g#", "a", "a#", "b",
];

const CONTROLLER_NAMES: &[(u8, &str)] = &[
    (0, "Bank select (MSB)"),
    (1, "Modulation"),
    (6, "Data entry (MSB)"),
    (7, "Volume"),
    (10, "Pan"),
    (11, "Expression"),
    (32, "Bank select (LSB)"),
    (38, "Data entry (LSB)"),
    (64, "Sustain"),
    (65, "Portamento"),
    (66, "Sostenuto"),
    (67, "Soft pedal"),
    (68, "Legato pedal"),
    (98, "NRPN (LSB)"),
    (99, "NRPN (MSB)"),
    (100, "RPN (LSB)"),
    (101, "RPN (MSB)"),
    (121, "Reset all controllers"),
    (123, "All notes off"),
];

const SYSEX_START: i64 = 0xF0;
const SYSEX_END: i64 = 0xF7;

fn pitch_class(name: &str) -> Option<i64> {
    PITCH_CLASSES
        .iter()
        .find(|(spelling, _)| *spelling == name)
        .map(|(_, pitch_class)| *pitch_class)
}

fn check_7bit(kind: &'static str, value: i64) -> Result<u7, ValidationError> {
    match u8::try_from(value).ok().and_then(u7::try_from) {
        Some(value) => Ok(value),
        None => Err(ValidationError::OutOfRange { kind, value }),
    }
}

/// Converts a note name such as `"c#4"` or a note number into a note number in [0,127].
pub fn note_number(note: &Value, settings: &Settings) -> Result<i64, ValidationError> {
    let number = note_number_unchecked(note, settings)?;
    if !(0..=127).contains(&number) {
        return Err(ValidationError::OutOfRange {
            kind: "note number",
            value: number,
        });
    }
    Ok(number)
}

/// Like [`note_number`], without the range check.
pub fn note_number_unchecked(note: &Value, settings: &Settings) -> Result<i64, ValidationError> {
    match note {
        Value::Int(n) | Value::NoOffset(n) => Ok(*n),
        Value::Str(name) => match name.trim().parse::<i64>() {
            Ok(n) => Ok(n),
            Err(_) => parse_note_name(name, settings),
        },
        other => Err(other.wrong_type("note", "a note name or number")),
    }
}

fn parse_note_name(name: &str, settings: &Settings) -> Result<i64, ValidationError> {
    let invalid = || ValidationError::InvalidNoteName(name.to_string());

    let lower = name.to_lowercase();
    let split = lower
        .find(|c: char| c.is_ascii_digit() || c == '-')
        .ok_or_else(invalid)?;
    let (pitch, octave) = lower.split_at(split);

    let pitch_class = pitch_class(pitch).ok_or_else(invalid)?;
    let octave = octave.parse::<i64>().map_err(|_| invalid())?;

    octave
        .checked_add(i64::from(settings.octave_offset()))
        .and_then(|octave| octave.checked_mul(12))
        .and_then(|base| base.checked_add(pitch_class))
        .ok_or_else(invalid)
}

/// Converts a note range into a `(lower, upper)` pair of note numbers, upper exclusive.
///
/// Accepts a single note (`n` becomes `(n, n + 1)`), a two-element sequence of notes, or a
/// `"lower:upper"` string where an empty side means 0.
pub fn note_range(notes: &Value, settings: &Settings) -> Result<(i64, i64), ValidationError> {
    match notes {
        Value::Int(_) | Value::NoOffset(_) => {
            let n = note_number(notes, settings)?;
            Ok((n, n + 1))
        }
        Value::Str(range) => match range.split_once(':') {
            Some((lower, upper)) => {
                let bound = |side: &str| {
                    if side.is_empty() {
                        return Ok(0);
                    }
                    note_number(&Value::Str(side.to_string()), settings)
                        .map_err(|_| ValidationError::InvalidNoteRange(range.clone()))
                };
                Ok((bound(lower)?, bound(upper)?))
            }
            None => {
                let n = note_number(notes, settings)
                    .map_err(|_| ValidationError::InvalidNoteRange(range.clone()))?;
                Ok((n, n + 1))
            }
        },
        Value::Seq(pair) if pair.len() == 2 => Ok((
            note_number(&pair[0], settings)?,
            note_number(&pair[1], settings)?,
        )),
        other => Err(ValidationError::InvalidNoteRange(other.to_string())),
    }
}

/// Gets the name of a note number, e.g. `49` is `"c#4"` with no octave offset.
pub fn note_name(note: i64, settings: &Settings) -> Result<String, ValidationError> {
    if !(0..=127).contains(&note) {
        return Err(ValidationError::OutOfRange {
            kind: "note number",
            value: note,
        });
    }

    let name = NOTE_NAMES[note.rem_euclid(12) as usize];
    let octave = note.div_euclid(12) - i64::from(settings.octave_offset());
    Ok(format!("{}{}", name, octave))
}

/// Gets the pitch class of a key name such as `"eb"`.
pub fn tonic_note_number(key: &str) -> Result<i64, ValidationError> {
    pitch_class(&key.to_lowercase()).ok_or_else(|| ValidationError::InvalidKey(key.to_string()))
}

/// Gets the description of a well-known controller, if there is one.
pub fn controller_name(ctrl: u8) -> Option<&'static str> {
    CONTROLLER_NAMES
        .iter()
        .find(|(number, _)| *number == ctrl)
        .map(|(_, name)| *name)
}

/// Checks that `bits` names exactly one known event type.
pub fn event_type(bits: u32) -> Result<EventType, ValidationError> {
    EventType::single(bits).ok_or(ValidationError::InvalidEventType(bits))
}

/// Converts a port number or port name into an engine port index.
pub fn port_number(port: &Value, settings: &Settings, ports: &PortNames) -> Result<u32, Error> {
    match port {
        Value::Str(name) => {
            let index = ports.index_of(name)?;
            u32::try_from(index).map_err(|_| {
                ValidationError::OutOfRange {
                    kind: "port number",
                    value: index as i64,
                }
                .into()
            })
        }
        other => {
            let value = other.as_data("port")?;
            let actual = settings.actual(value);
            u32::try_from(actual).map_err(|_| {
                ValidationError::OutOfRange {
                    kind: "port number",
                    value: value.raw(),
                }
                .into()
            })
        }
    }
}

/// Converts a channel number into an engine channel.
pub fn channel_number(
    channel: impl Into<DataValue>,
    settings: &Settings,
) -> Result<u4, ValidationError> {
    let channel = channel.into();
    let actual = settings.actual(channel);
    match u8::try_from(actual).ok().and_then(u4::try_from) {
        Some(channel) => Ok(channel),
        None => Err(ValidationError::OutOfRange {
            kind: "channel number",
            value: channel.raw(),
        }),
    }
}

/// Converts a program number into an engine program.
pub fn program_number(
    program: impl Into<DataValue>,
    settings: &Settings,
) -> Result<u7, ValidationError> {
    let program = program.into();
    check_7bit("program number", settings.actual(program)).map_err(|_| {
        ValidationError::OutOfRange {
            kind: "program number",
            value: program.raw(),
        }
    })
}

/// Checks a controller number.
pub fn ctrl_number(ctrl: i64) -> Result<u7, ValidationError> {
    check_7bit("controller number", ctrl)
}

/// Checks a controller value.
pub fn ctrl_value(value: i64) -> Result<u7, ValidationError> {
    check_7bit("controller value", value)
}

/// Checks a velocity.
pub fn velocity_value(velocity: i64) -> Result<u7, ValidationError> {
    check_7bit("velocity", velocity)
}

/// Converts a scene number into an engine scene number.
pub fn scene_number(scene: impl Into<DataValue>, settings: &Settings) -> i64 {
    settings.actual(scene)
}

/// Checks a complete (or, with `allow_partial`, unterminated) system exclusive message.
pub fn sysex_data(sysex: &[i64], allow_partial: bool) -> Result<Vec<u8>, ValidationError> {
    let (first, last) = match sysex {
        [first, .., last] => (*first, *last),
        _ => return Err(ValidationError::SysexTooShort(sysex.len())),
    };

    if first != SYSEX_START {
        return Err(ValidationError::SysexStart(first));
    }
    let terminated = last == SYSEX_END;
    if !terminated && !allow_partial {
        return Err(ValidationError::SysexEnd(last));
    }

    // An unterminated tail is data too.
    let data_end = if terminated {
        sysex.len() - 1
    } else {
        sysex.len()
    };
    for (index, byte) in sysex.iter().enumerate().take(data_end).skip(1) {
        if !(0..=127).contains(byte) {
            return Err(ValidationError::SysexDataByte {
                index,
                value: *byte,
            });
        }
    }

    Ok(sysex.iter().map(|byte| *byte as u8).collect())
}

/// Checks a one or three byte manufacturer id. A single number is treated as a one byte id.
pub fn sysex_manufacturer(manufacturer: &Value) -> Result<Vec<u8>, ValidationError> {
    let id = match manufacturer {
        Value::Seq(bytes) => bytes
            .iter()
            .map(|byte| byte.as_int("manufacturer"))
            .collect::<Result<Vec<i64>, ValidationError>>()?,
        other => vec![other.as_int("manufacturer")?],
    };

    if id.len() != 1 && id.len() != 3 {
        return Err(ValidationError::ManufacturerLength(id.len()));
    }
    if id.len() == 3 && id[0] != 0 {
        return Err(ValidationError::ManufacturerPrefix(id[0]));
    }
    if let Some(byte) = id.iter().find(|byte| !(0..=127).contains(*byte)) {
        return Err(ValidationError::ManufacturerByte(*byte));
    }

    Ok(id.into_iter().map(|byte| byte as u8).collect())
}
