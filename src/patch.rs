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

//! Descriptors handed to the engine.
//!
//! A [`Unit`] is one engine primitive. A [`Patch`] describes how units are combined; the engine
//! owns the meaning of each combinator, this crate only builds the tree.

use std::fmt;
use std::ops::{BitOr, Range};

use midly::num::{u4, u7};

use crate::curve::{Scalar, Slope};

/// A set of MIDI event types. Single-bit values name one type; the bit positions are part of the
/// engine contract.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct EventType(u32);

impl EventType {
    pub const NONE: EventType = EventType(0);
    pub const NOTEON: EventType = EventType(1 << 0);
    pub const NOTEOFF: EventType = EventType(1 << 1);
    pub const CTRL: EventType = EventType(1 << 2);
    pub const PITCHBEND: EventType = EventType(1 << 3);
    pub const AFTERTOUCH: EventType = EventType(1 << 4);
    pub const POLY_AFTERTOUCH: EventType = EventType(1 << 5);
    pub const PROGRAM: EventType = EventType(1 << 6);
    pub const SYSEX: EventType = EventType(1 << 7);
    pub const SYSCM_QFRAME: EventType = EventType(1 << 8);
    pub const SYSCM_SONGPOS: EventType = EventType(1 << 9);
    pub const SYSCM_SONGSEL: EventType = EventType(1 << 10);
    pub const SYSCM_TUNEREQ: EventType = EventType(1 << 11);
    pub const SYSRT_CLOCK: EventType = EventType(1 << 12);
    pub const SYSRT_START: EventType = EventType(1 << 13);
    pub const SYSRT_CONTINUE: EventType = EventType(1 << 14);
    pub const SYSRT_STOP: EventType = EventType(1 << 15);
    pub const SYSRT_SENSING: EventType = EventType(1 << 16);
    pub const SYSRT_RESET: EventType = EventType(1 << 17);
    pub const DUMMY: EventType = EventType(1 << 29);

    pub const NOTE: EventType = EventType(Self::NOTEON.0 | Self::NOTEOFF.0);
    pub const SYSCM: EventType = EventType(
        Self::SYSCM_QFRAME.0 | Self::SYSCM_SONGPOS.0 | Self::SYSCM_SONGSEL.0 | Self::SYSCM_TUNEREQ.0,
    );
    pub const SYSRT: EventType = EventType(
        Self::SYSRT_CLOCK.0
            | Self::SYSRT_START.0
            | Self::SYSRT_CONTINUE.0
            | Self::SYSRT_STOP.0
            | Self::SYSRT_SENSING.0
            | Self::SYSRT_RESET.0,
    );
    pub const SYSTEM: EventType = EventType(Self::SYSEX.0 | Self::SYSCM.0 | Self::SYSRT.0);
    pub const ANY: EventType = EventType(
        Self::NOTE.0
            | Self::CTRL.0
            | Self::PITCHBEND.0
            | Self::AFTERTOUCH.0
            | Self::POLY_AFTERTOUCH.0
            | Self::PROGRAM.0
            | Self::SYSTEM.0
            | Self::DUMMY.0,
    );

    /// Returns the event type if `bits` is exactly one known type.
    pub fn single(bits: u32) -> Option<EventType> {
        (bits.count_ones() == 1 && bits & Self::ANY.0 != 0).then_some(EventType(bits))
    }

    /// The raw bit mask.
    pub fn bits(self) -> u32 {
        self.0
    }

    /// True if every type in `other` is in `self`.
    pub fn contains(self, other: EventType) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for EventType {
    type Output = EventType;

    fn bitor(self, rhs: EventType) -> EventType {
        EventType(self.0 | rhs.0)
    }
}

impl fmt::Debug for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EventType({:#x})", self.0)
    }
}

/// A single engine primitive with every number in engine space.
#[derive(Debug, Clone, PartialEq)]
pub enum Unit {
    /// Routes events to the given port.
    Port(u32),
    /// Moves events to the given channel.
    Channel(u4),
    /// Shifts notes by a number of semitones.
    Transpose(i32),
    /// Changes note-on velocities uniformly.
    Velocity(Scalar),
    /// Changes note-on velocities depending on the note.
    VelocitySlope(Slope),
    /// Moves a controller to another controller number.
    CtrlMap { ctrl_in: u7, ctrl_out: u7 },
    /// Linearly maps a controller's input range onto an output range.
    CtrlRange {
        ctrl: u7,
        out_min: i64,
        out_max: i64,
        in_min: i64,
        in_max: i64,
    },
    /// Replaces the event with a note-on for `note`, keeping the event's velocity.
    NoteOn { note: u7 },
    /// Replaces the event with a note-off for `note`, keeping the event's velocity.
    NoteOff { note: u7 },
}

/// A tree of units joined by engine combinators.
#[derive(Debug, Clone, PartialEq)]
pub enum Patch {
    /// A single primitive.
    Unit(Unit),
    /// Leaves events untouched.
    Pass,
    /// Runs each patch on the output of the previous one.
    Chain(Vec<Patch>),
    /// Runs `patch` on events of type `filter`; other events pass through unchanged.
    Only {
        filter: EventType,
        patch: Box<Patch>,
    },
    /// Sends each event to the patch registered for its type.
    TypeSplit(Vec<(EventType, Patch)>),
    /// Sends each note event to the patch whose velocity range contains its velocity.
    VelocitySplit(Vec<(Range<u8>, Patch)>),
}

impl From<Unit> for Patch {
    fn from(unit: Unit) -> Patch {
        Patch::Unit(unit)
    }
}

#[cfg(test)]
mod test {
    use midly::num::u4;

    use super::{EventType, Patch, Unit};

    #[test]
    fn event_type_sets() {
        assert_eq!(EventType::NOTE, EventType::NOTEON | EventType::NOTEOFF);
        assert!(EventType::NOTE.contains(EventType::NOTEOFF));
        assert!(!EventType::NOTE.contains(EventType::CTRL));
        assert!(EventType::ANY.contains(EventType::SYSRT_RESET));
        assert!(EventType::SYSTEM.contains(EventType::SYSEX));
        assert_eq!(0b11, EventType::NOTE.bits());
        assert_eq!("EventType(0x3)", format!("{:?}", EventType::NOTE));
    }

    #[test]
    fn single_event_types() {
        assert_eq!(Some(EventType::CTRL), EventType::single(1 << 2));
        assert_eq!(Some(EventType::DUMMY), EventType::single(1 << 29));
        assert_eq!(None, EventType::single(EventType::NOTE.bits()));
        assert_eq!(None, EventType::single(EventType::NONE.bits()));
        assert_eq!(None, EventType::single(1 << 20));
    }

    #[test]
    fn unit_into_patch() {
        assert_eq!(
            Patch::Unit(Unit::Channel(u4::from(3))),
            Unit::Channel(u4::from(3)).into()
        );
    }
}
