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
use std::collections::BTreeMap;
use std::path::Path;

use config::{Config, File, FileFormat};
use serde::Deserialize;

use crate::error::{ConfigError, Error};
use crate::overload::Arguments;
use crate::patch::Patch;
use crate::units::UnitBuilder;
use crate::value::Value;

/// A YAML representation of a single unit call.
#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct UnitDefinition {
    /// The unit name, e.g. `velocity_slope`.
    unit: String,
    /// Positional arguments.
    #[serde(default)]
    args: Vec<Value>,
    /// Keyword arguments.
    #[serde(default)]
    kwargs: BTreeMap<String, Value>,
}

impl UnitDefinition {
    /// Gets the unit name.
    pub fn unit(&self) -> &str {
        &self.unit
    }

    /// The call's arguments.
    pub fn arguments(&self) -> Arguments {
        Arguments::from_parts(self.args.clone(), self.kwargs.clone())
    }

    /// Builds the unit.
    pub fn build(&self, builder: &UnitBuilder) -> Result<Patch, Error> {
        builder.build(&self.unit, &self.arguments())
    }
}

/// A YAML representation of a chain of units.
#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct Pipeline {
    /// The units, in processing order.
    units: Vec<UnitDefinition>,
}

impl Pipeline {
    /// Deserializes a file from the path into a pipeline.
    pub fn deserialize(path: &Path) -> Result<Pipeline, ConfigError> {
        Ok(Config::builder()
            .add_source(File::from(path))
            .build()?
            .try_deserialize::<Pipeline>()?)
    }

    /// Parses a pipeline from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Pipeline, ConfigError> {
        Ok(Config::builder()
            .add_source(File::from_str(yaml, FileFormat::Yaml))
            .build()?
            .try_deserialize::<Pipeline>()?)
    }

    /// Gets the unit definitions.
    pub fn units(&self) -> &[UnitDefinition] {
        &self.units
    }

    /// Builds every unit, failing on the first unit that does not resolve.
    pub fn build(&self, builder: &UnitBuilder) -> Result<Patch, Error> {
        Ok(Patch::Chain(
            self.units
                .iter()
                .map(|unit| unit.build(builder))
                .collect::<Result<Vec<Patch>, Error>>()?,
        ))
    }
}
