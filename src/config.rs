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

//! YAML configuration: numbering setup, port names and unit definitions.

use std::path::Path;

use tracing::info;

use crate::error::Error;
use crate::patch::Patch;

pub use self::pipeline::{Pipeline, UnitDefinition};
pub use self::setup::Setup;

mod pipeline;
mod setup;

/// Reads the setup and the pipeline from the same file and builds the pipeline.
pub fn build_file(path: &Path) -> Result<Patch, Error> {
    let setup = Setup::deserialize(path)?;
    let pipeline = Pipeline::deserialize(path)?;
    let patch = pipeline.build(&setup.builder())?;
    info!(
        path = %path.display(),
        units = pipeline.units().len(),
        "Built pipeline"
    );
    Ok(patch)
}

#[cfg(test)]
mod test {
    use std::error::Error;
    use std::fs;

    use midly::num::u4;
    use tempfile::tempdir;

    use crate::patch::{Patch, Unit};

    use super::build_file;

    #[test]
    fn builds_from_file() -> Result<(), Box<dyn Error>> {
        let dir = tempdir()?;
        let path = dir.path().join("pipeline.yaml");
        fs::write(
            &path,
            r#"
            data_offset: 1
            out_ports:
              - synth
              - drums
            units:
              - unit: port
                args: [drums]
              - unit: channel
                args: [10]
              - unit: transpose
                kwargs:
                  offset: -12
            "#,
        )?;

        assert_eq!(
            Patch::Chain(vec![
                Unit::Port(1).into(),
                Unit::Channel(u4::from(9)).into(),
                Unit::Transpose(-12).into(),
            ]),
            build_file(&path)?
        );
        Ok(())
    }

    #[test]
    fn missing_file() {
        let dir = tempdir().unwrap();
        assert!(build_file(&dir.path().join("missing.yaml")).is_err());
    }
}
