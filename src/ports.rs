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

//! Port names published by the engine.

use tracing::debug;

use crate::error::ConfigError;

/// A consistent view of the engine's input and output port names. A list is `None` when the
/// engine has no named ports on that side.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PortNames {
    inputs: Option<Vec<String>>,
    outputs: Option<Vec<String>>,
}

impl PortNames {
    /// Creates a new port name snapshot.
    pub fn new(inputs: Option<Vec<String>>, outputs: Option<Vec<String>>) -> PortNames {
        PortNames { inputs, outputs }
    }

    /// Gets the input port names.
    pub fn inputs(&self) -> Option<&[String]> {
        self.inputs.as_deref()
    }

    /// Gets the output port names.
    pub fn outputs(&self) -> Option<&[String]> {
        self.outputs.as_deref()
    }

    /// Resolves a port name to its engine index. A name listed on both sides must sit at the
    /// same index on both.
    pub fn index_of(&self, name: &str) -> Result<usize, ConfigError> {
        let position =
            |names: Option<&[String]>| names.and_then(|names| names.iter().position(|n| n == name));

        let index = match (position(self.inputs()), position(self.outputs())) {
            (Some(input), Some(output)) if input != output => {
                return Err(ConfigError::AmbiguousPort(name.to_string()))
            }
            (Some(input), _) => input,
            (None, Some(output)) => output,
            (None, None) => return Err(ConfigError::UnknownPort(name.to_string())),
        };

        debug!(port = name, index, "Resolved port name");
        Ok(index)
    }
}

/// Source of port names. The engine implements this; [`StaticPorts`] serves names from
/// configuration.
pub trait PortDirectory: Send + Sync {
    /// Returns both port lists as they are at this moment.
    fn snapshot(&self) -> PortNames;
}

/// A fixed set of port names.
#[derive(Debug, Clone, Default)]
pub struct StaticPorts {
    names: PortNames,
}

impl StaticPorts {
    /// Creates a directory that always reports the given names.
    pub fn new(names: PortNames) -> StaticPorts {
        StaticPorts { names }
    }
}

impl PortDirectory for StaticPorts {
    fn snapshot(&self) -> PortNames {
        self.names.clone()
    }
}

#[cfg(test)]
mod test {
    use crate::error::ConfigError;

    use super::{PortDirectory, PortNames, StaticPorts};

    fn names(names: &[&str]) -> Option<Vec<String>> {
        Some(names.iter().map(|n| n.to_string()).collect())
    }

    #[test]
    fn resolves_by_position() {
        let ports = PortNames::new(names(&["keys", "pads"]), names(&["synth", "keys"]));

        assert_eq!(1, ports.index_of("pads").unwrap());
        assert_eq!(0, ports.index_of("synth").unwrap());
        assert!(matches!(
            ports.index_of("keys"),
            Err(ConfigError::AmbiguousPort(name)) if name == "keys"
        ));
        assert!(matches!(
            ports.index_of("drums"),
            Err(ConfigError::UnknownPort(name)) if name == "drums"
        ));
    }

    #[test]
    fn same_index_on_both_sides_is_fine() {
        let ports = PortNames::new(names(&["a", "b"]), names(&["x", "b"]));
        assert_eq!(1, ports.index_of("b").unwrap());
    }

    #[test]
    fn missing_lists() {
        let ports = PortNames::new(None, names(&["out"]));
        assert_eq!(0, ports.index_of("out").unwrap());
        assert!(matches!(
            PortNames::default().index_of("out"),
            Err(ConfigError::UnknownPort(_))
        ));
    }

    #[test]
    fn static_directory() {
        let names = PortNames::new(names(&["in"]), None);
        let directory = StaticPorts::new(names.clone());
        assert_eq!(names, directory.snapshot());
    }
}
