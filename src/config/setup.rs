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
use std::path::Path;

use config::{Config, File, FileFormat};
use serde::Deserialize;
use tracing::info;

use crate::error::ConfigError;
use crate::ports::{PortNames, StaticPorts};
use crate::settings::{self, Settings};
use crate::units::UnitBuilder;

/// A YAML representation of the numbering setup and the engine's port names.
#[derive(Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct Setup {
    /// Added to the octave of note names.
    #[serde(default)]
    octave_offset: i32,
    /// Subtracted from channel, program, port and scene numbers.
    #[serde(default)]
    data_offset: i32,
    /// The engine's input port names.
    in_ports: Option<Vec<String>>,
    /// The engine's output port names.
    out_ports: Option<Vec<String>>,
}

impl Setup {
    /// Deserializes a file from the path into a setup.
    pub fn deserialize(path: &Path) -> Result<Setup, ConfigError> {
        let setup = Config::builder()
            .add_source(File::from(path))
            .build()?
            .try_deserialize::<Setup>()?;
        info!(path = %path.display(), "Loaded setup");
        Ok(setup)
    }

    /// Parses a setup from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Setup, ConfigError> {
        Ok(Config::builder()
            .add_source(File::from_str(yaml, FileFormat::Yaml))
            .build()?
            .try_deserialize::<Setup>()?)
    }

    /// The numbering settings described by this setup.
    pub fn settings(&self) -> Settings {
        Settings::new(self.octave_offset, self.data_offset)
    }

    /// The port names described by this setup.
    pub fn ports(&self) -> StaticPorts {
        StaticPorts::new(PortNames::new(
            self.in_ports.clone(),
            self.out_ports.clone(),
        ))
    }

    /// A unit builder using this setup's settings and ports.
    pub fn builder(&self) -> UnitBuilder {
        UnitBuilder::with_directory(self.settings(), &self.ports())
    }

    /// Makes this setup's settings the process-wide settings.
    pub fn install(&self) {
        settings::install(self.settings());
    }
}
