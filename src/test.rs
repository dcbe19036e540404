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

//! End-to-end checks of the documented behaviour, across modules.

use std::error::Error;

use midly::num::u7;
use serial_test::serial;
use tracing_subscriber::EnvFilter;

use crate::convert::{ctrl_number, note_name, note_number, sysex_data};
use crate::curve::Mode;
use crate::error;
use crate::offset::{actual, no_offset};
use crate::overload::Arguments;
use crate::patch::Unit;
use crate::settings::{self, Settings};
use crate::units::UnitBuilder;

/// Logs to the test output, filtered by `RUST_LOG`.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[test]
fn note_name_round_trip() -> Result<(), Box<dyn Error>> {
    let settings = Settings::DEFAULT.with_octave_offset(1);
    for n in 0..=127 {
        assert_eq!(n, note_number(&note_name(n, &settings)?.into(), &settings)?);
    }
    Ok(())
}

#[test]
fn velocity_selects_one_mode() -> Result<(), Box<dyn Error>> {
    init_tracing();
    let builder = UnitBuilder::default();

    for mode in Mode::ALL {
        let Unit::Velocity(scalar) =
            builder.velocity(&Arguments::new().kwarg(mode.keyword(), 1))?
        else {
            panic!("expected a velocity unit");
        };
        assert_eq!(mode, scalar.mode());
    }

    assert!(matches!(
        builder.velocity(&Arguments::new().kwarg("fixed", 64).kwarg("gamma", 1)),
        Err(error::Error::Binding(_))
    ));
    assert!(matches!(
        builder.velocity(&Arguments::new()),
        Err(error::Error::Binding(_))
    ));
    Ok(())
}

#[test]
#[serial]
fn data_offset_immunity() {
    settings::install(Settings::DEFAULT.with_data_offset(2));
    assert_eq!(5, actual(no_offset(5)));
    assert_eq!(3, actual(5));

    let builder = UnitBuilder::current();
    assert_eq!(&Settings::DEFAULT.with_data_offset(2), builder.settings());

    settings::reset();
}

#[test]
fn documented_scenarios() -> Result<(), Box<dyn Error>> {
    init_tracing();
    let builder = UnitBuilder::default();

    assert_eq!(0, ctrl_number(0)?.as_int());
    assert_eq!(127, ctrl_number(127)?.as_int());
    assert!(ctrl_number(-1).is_err());
    assert!(ctrl_number(128).is_err());

    let err = builder
        .ctrl_range_with_input(7, 0, 100, Some(50), Some(50))
        .unwrap_err();
    assert!(err.to_string().contains("in_min must be less than in_max"));

    let Unit::Velocity(fixed) = builder.velocity(&Arguments::new().kwarg("fixed", 64))? else {
        panic!("expected a velocity unit");
    };
    assert_eq!((Mode::Fixed, 64.0), (fixed.mode(), fixed.value()));

    let Unit::VelocitySlope(slope) = builder.velocity_slope(
        &Arguments::new()
            .kwarg("notes", (48, 60))
            .kwarg("offset", (-10, 10)),
    )?
    else {
        panic!("expected a velocity slope");
    };
    assert_eq!(Mode::Offset, slope.mode());
    assert_eq!(&[u7::from(48), u7::from(60)], slope.notes());
    assert_eq!(&[-10.0, 10.0], slope.values());

    assert_eq!(49, note_number(&"c#4".into(), &Settings::DEFAULT)?);

    assert!(sysex_data(&[0xF0, 0x41, 0xF7], false).is_ok());
    assert!(sysex_data(&[0x41, 0xF7], false).is_err());
    Ok(())
}
