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

//! Overload resolution for units that accept several argument shapes.
//!
//! A unit declares an ordered table of [`Signature`]s. [`resolve`] binds the call's arguments
//! against each signature in turn and returns the first one that fits, so the order of the table
//! decides between signatures that would both accept a call.

use std::collections::BTreeMap;
use std::fmt;

use tracing::debug;

use crate::error::BindingError;
use crate::value::Value;

/// One accepted argument shape: parameter names in positional order, plus a tag identifying it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Signature<T> {
    params: &'static [&'static str],
    tag: T,
}

impl<T: Copy> Signature<T> {
    /// Creates a new signature.
    pub const fn new(params: &'static [&'static str], tag: T) -> Signature<T> {
        Signature { params, tag }
    }

    /// Gets the parameter names.
    pub fn params(&self) -> &'static [&'static str] {
        self.params
    }

    /// Gets the tag.
    pub fn tag(&self) -> T {
        self.tag
    }

    /// Binds the arguments to this signature's parameters, in parameter order. Every parameter
    /// must be given exactly once and no argument may be left over.
    fn bind(&self, args: &Arguments) -> Option<Vec<Value>> {
        if args.positional.len() > self.params.len() {
            return None;
        }

        let mut keywords_used = 0;
        let values = self
            .params
            .iter()
            .enumerate()
            .map(|(i, param)| match args.positional.get(i) {
                Some(_) if args.keywords.contains_key(*param) => None,
                Some(value) => Some(value.clone()),
                None => {
                    let value = args.keywords.get(*param)?;
                    keywords_used += 1;
                    Some(value.clone())
                }
            })
            .collect::<Option<Vec<Value>>>()?;

        (keywords_used == args.keywords.len()).then_some(values)
    }
}

/// The arguments of a single unit call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Arguments {
    positional: Vec<Value>,
    keywords: BTreeMap<String, Value>,
}

impl Arguments {
    /// Creates an empty argument list.
    pub fn new() -> Arguments {
        Arguments::default()
    }

    /// Creates an argument list from its parts.
    pub fn from_parts(positional: Vec<Value>, keywords: BTreeMap<String, Value>) -> Arguments {
        Arguments {
            positional,
            keywords,
        }
    }

    /// Appends a positional argument.
    pub fn arg(mut self, value: impl Into<Value>) -> Arguments {
        self.positional.push(value.into());
        self
    }

    /// Sets a keyword argument.
    pub fn kwarg(mut self, name: &str, value: impl Into<Value>) -> Arguments {
        self.keywords.insert(name.to_string(), value.into());
        self
    }

    /// Gets the positional arguments.
    pub fn positional(&self) -> &[Value] {
        &self.positional
    }

    /// Gets the keyword arguments.
    pub fn keywords(&self) -> &BTreeMap<String, Value> {
        &self.keywords
    }
}

impl fmt::Display for Arguments {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.positional.is_empty() && self.keywords.is_empty() {
            return write!(f, "no arguments");
        }

        let mut parts = Vec::new();
        if !self.positional.is_empty() {
            parts.push(format!("{} positional", self.positional.len()));
        }
        if !self.keywords.is_empty() {
            let names: Vec<&str> = self.keywords.keys().map(String::as_str).collect();
            parts.push(format!("keywords: {}", names.join(", ")));
        }
        write!(f, "{}", parts.join("; "))
    }
}

/// The winning signature's tag and the argument values bound to its parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved<T> {
    values: Vec<Value>,
    tag: T,
}

impl<T: Copy> Resolved<T> {
    /// Gets the bound values, in parameter order.
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Gets the value bound to the parameter at `index`, if the signature has one.
    pub fn value(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    /// Gets the tag of the winning signature.
    pub fn tag(&self) -> T {
        self.tag
    }

    /// Splits into values and tag.
    pub fn into_parts(self) -> (Vec<Value>, T) {
        (self.values, self.tag)
    }
}

/// Resolves the arguments against the table, first match wins.
pub fn resolve<T: Copy + fmt::Debug>(
    args: &Arguments,
    table: &[Signature<T>],
) -> Result<Resolved<T>, BindingError> {
    debug_assert!(
        table
            .iter()
            .enumerate()
            .all(|(i, signature)| table[..i].iter().all(|s| s.params != signature.params)),
        "signature table contains duplicate parameter lists"
    );

    for signature in table {
        if let Some(values) = signature.bind(args) {
            debug!(tag = ?signature.tag, params = ?signature.params, "Resolved overload");
            return Ok(Resolved {
                values,
                tag: signature.tag,
            });
        }
    }

    Err(BindingError::new(args.to_string()))
}

#[cfg(test)]
mod test {
    use std::collections::BTreeMap;
    use std::error::Error;

    use crate::value::Value;

    use super::{resolve, Arguments, Signature};

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Shape {
        Short,
        Long,
        Other,
    }

    const TABLE: &[Signature<Shape>] = &[
        Signature::new(&["ctrl", "out_min", "out_max"], Shape::Short),
        Signature::new(&["ctrl", "out_min", "out_max", "in_min", "in_max"], Shape::Long),
        Signature::new(&["other"], Shape::Other),
    ];

    #[test]
    fn positional_binding() -> Result<(), Box<dyn Error>> {
        let resolved = resolve(&Arguments::new().arg(7).arg(0).arg(100), TABLE)?;
        assert_eq!(Shape::Short, resolved.tag());
        assert_eq!(&[Value::Int(7), Value::Int(0), Value::Int(100)], resolved.values());

        let resolved = resolve(
            &Arguments::new().arg(7).arg(0).arg(100).arg(10).arg(20),
            TABLE,
        )?;
        assert_eq!(Shape::Long, resolved.tag());
        assert_eq!(Some(&Value::Int(20)), resolved.value(4));
        assert_eq!(None, resolved.value(5));
        Ok(())
    }

    #[test]
    fn keyword_binding_follows_parameter_order() -> Result<(), Box<dyn Error>> {
        let args = Arguments::new()
            .arg(7)
            .kwarg("in_max", 20)
            .kwarg("out_max", 100)
            .kwarg("in_min", 10)
            .kwarg("out_min", 0);
        let (values, tag) = resolve(&args, TABLE)?.into_parts();
        assert_eq!(Shape::Long, tag);
        assert_eq!(
            vec![
                Value::Int(7),
                Value::Int(0),
                Value::Int(100),
                Value::Int(10),
                Value::Int(20)
            ],
            values
        );
        Ok(())
    }

    #[test]
    fn first_match_wins() -> Result<(), Box<dyn Error>> {
        const OVERLAPPING: &[Signature<u8>] = &[
            Signature::new(&["value"], 1),
            Signature::new(&["amount"], 2),
        ];
        assert_eq!(1, resolve(&Arguments::new().arg(3), OVERLAPPING)?.tag());
        assert_eq!(
            2,
            resolve(&Arguments::new().kwarg("amount", 3), OVERLAPPING)?.tag()
        );
        Ok(())
    }

    #[test]
    fn rejects_bad_combinations() {
        // Missing parameter.
        assert!(resolve(&Arguments::new().arg(7).arg(0), TABLE).is_err());
        // Extra keyword.
        assert!(resolve(
            &Arguments::new().arg(7).arg(0).arg(100).kwarg("gamma", 2),
            TABLE
        )
        .is_err());
        // Positional and keyword for the same parameter.
        assert!(resolve(
            &Arguments::new().arg(7).arg(0).arg(100).kwarg("ctrl", 7),
            TABLE
        )
        .is_err());
        // Too many positional arguments.
        assert!(resolve(&Arguments::new().arg(1).arg(2).arg(3).arg(4).arg(5).arg(6), TABLE).is_err());

        let err = resolve(&Arguments::new(), TABLE).unwrap_err();
        assert_eq!("no arguments", err.supplied());

        let err = resolve(
            &Arguments::new().arg(1).kwarg("fixed", 1).kwarg("gamma", 2),
            TABLE,
        )
        .unwrap_err();
        assert_eq!(
            "no matching signature: invalid combination of arguments (1 positional; keywords: fixed, gamma)",
            err.to_string()
        );
    }

    #[test]
    fn from_parts() -> Result<(), Box<dyn Error>> {
        let args = Arguments::from_parts(
            vec![Value::Int(1)],
            BTreeMap::from([("other".to_string(), Value::Int(2))]),
        );
        assert_eq!(1, args.positional().len());
        assert_eq!(1, args.keywords().len());
        assert!(resolve(&args, TABLE).is_err());

        let args = Arguments::from_parts(
            vec![],
            BTreeMap::from([("other".to_string(), Value::Int(2))]),
        );
        assert_eq!(Shape::Other, resolve(&args, TABLE)?.tag());
        Ok(())
    }
}
