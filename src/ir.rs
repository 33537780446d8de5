// Copyright 2026 Cornell University
// released under MIT License

use crate::errors::{RadixError, Result};
use cranelift_entity::{entity_impl, PrimaryMap};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Index;
use std::str::FromStr;

/// A reference to a single signal in the circuit hierarchy:
/// the owning circuit, the instances we pass through, and the signal itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Target {
    circuit: String,
    #[serde(default)]
    path: Vec<String>,
    signal: String,
}

impl Target {
    pub fn new(circuit: impl Into<String>, path: Vec<String>, signal: impl Into<String>) -> Self {
        Self {
            circuit: circuit.into(),
            path,
            signal: signal.into(),
        }
    }

    pub fn circuit(&self) -> &str {
        &self.circuit
    }

    /// Instance names from the top of the hierarchy down to the signal's parent
    pub fn path(&self) -> &[String] {
        &self.path
    }

    pub fn signal(&self) -> &str {
        &self.signal
    }

    /// Flattens the target into a single hierarchical name, e.g.
    /// `top.fsm.state` for `sep = "."` or `top/fsm/state` for `sep = "/"`
    pub fn hierarchical_name(&self, sep: &str) -> String {
        let mut name = self.circuit.clone();
        for instance in self.path.iter().chain(std::iter::once(&self.signal)) {
            name.push_str(sep);
            name.push_str(instance);
        }
        name
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.hierarchical_name("."))
    }
}

/// Parses a dot-separated name: the first component is the circuit,
/// the last is the signal, anything in between is the instance path.
impl FromStr for Target {
    type Err = RadixError;

    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.split('.').collect();
        if parts.iter().any(|p| p.is_empty()) {
            return Err(RadixError::InvalidTarget(s.to_string()));
        }
        match parts.as_slice() {
            [circuit, path @ .., signal] => Ok(Self::new(
                *circuit,
                path.iter().map(|p| p.to_string()).collect(),
                *signal,
            )),
            _ => Err(RadixError::InvalidTarget(s.to_string())),
        }
    }
}

/// One row of an alias: a raw value and the label a viewer should show for it
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ValueFilter {
    pub value: u64,
    pub label: String,
}

impl ValueFilter {
    pub fn new(value: u64, label: impl Into<String>) -> Self {
        Self {
            value,
            label: label.into(),
        }
    }
}

/// A named enumeration which maps raw signal values to display labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasDefinition {
    name: String,
    width: u32,
    #[serde(default)]
    filters: Vec<ValueFilter>,
}

impl AliasDefinition {
    pub fn new(name: impl Into<String>, width: u32, filters: Vec<ValueFilter>) -> Self {
        Self {
            name: name.into(),
            width,
            filters,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    /// Value filters in the order they were defined
    pub fn filters(&self) -> &[ValueFilter] {
        &self.filters
    }

    /// The `[msb:0]` suffix that viewers expect after a bus name.
    /// Single-bit signals have no suffix at all.
    pub fn bit_range(&self) -> String {
        if self.width > 1 {
            format!("[{}:0]", self.width - 1)
        } else {
            String::new()
        }
    }
}

/// Binds one signal to an alias (by name).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalAssociation {
    pub target: Target,
    pub alias: String,
}

impl SignalAssociation {
    pub fn new(target: Target, alias: impl Into<String>) -> Self {
        Self {
            target,
            alias: alias.into(),
        }
    }
}

#[derive(Clone, Copy, Hash, PartialEq, Eq, Default)]
pub struct AliasId(u32);
entity_impl!(AliasId, "alias");

/// Read-only store of alias definitions, looked up by name.
/// Iteration follows definition order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AliasTable {
    entries: PrimaryMap<AliasId, AliasDefinition>,
    by_name: FxHashMap<String, AliasId>,
}

impl AliasTable {
    pub fn add(&mut self, definition: AliasDefinition) -> Result<AliasId> {
        if definition.width == 0 {
            return Err(RadixError::ZeroWidth(definition.name));
        }
        if self.by_name.contains_key(&definition.name) {
            return Err(RadixError::DuplicateAlias(definition.name));
        }
        let name = definition.name.clone();
        let id = self.entries.push(definition);
        self.by_name.insert(name, id);
        Ok(id)
    }

    pub fn from_definitions(definitions: impl IntoIterator<Item = AliasDefinition>) -> Result<Self> {
        let mut table = Self::default();
        for definition in definitions {
            table.add(definition)?;
        }
        Ok(table)
    }

    pub fn get(&self, name: &str) -> Option<&AliasDefinition> {
        self.by_name.get(name).map(|id| &self.entries[*id])
    }

    pub fn iter(&self) -> impl Iterator<Item = &AliasDefinition> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Index<&str> for AliasTable {
    type Output = AliasDefinition;

    fn index(&self, index: &str) -> &Self::Output {
        &self.entries[self.by_name[index]]
    }
}

impl Index<AliasId> for AliasTable {
    type Output = AliasDefinition;

    fn index(&self, index: AliasId) -> &Self::Output {
        &self.entries[index]
    }
}

/// Everything that upstream tools collected for one run:
/// the alias definitions and the signals bound to them.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Job {
    #[serde(default)]
    pub definitions: Vec<AliasDefinition>,
    #[serde(default)]
    pub associations: Vec<SignalAssociation>,
}

impl Job {
    pub fn alias_table(&self) -> Result<AliasTable> {
        AliasTable::from_definitions(self.definitions.iter().cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hierarchical_names() {
        let target = Target::new("top", vec!["core".to_string(), "fsm".to_string()], "state");
        assert_eq!(target.hierarchical_name("."), "top.core.fsm.state");
        assert_eq!(target.hierarchical_name("/"), "top/core/fsm/state");

        // a signal directly in the top circuit has no instance path
        let port = Target::new("top", vec![], "valid");
        assert_eq!(port.hierarchical_name("/"), "top/valid");
    }

    #[test]
    fn parse_target() {
        let target: Target = "top.fsm.state".parse().unwrap();
        assert_eq!(target.circuit(), "top");
        assert_eq!(target.path(), ["fsm".to_string()]);
        assert_eq!(target.signal(), "state");
        assert_eq!(target.to_string(), "top.fsm.state");

        assert!("state".parse::<Target>().is_err());
        assert!("top..state".parse::<Target>().is_err());
    }

    #[test]
    fn bit_range_suffix() {
        assert_eq!(AliasDefinition::new("bit", 1, vec![]).bit_range(), "");
        assert_eq!(AliasDefinition::new("pair", 2, vec![]).bit_range(), "[1:0]");
        assert_eq!(AliasDefinition::new("byte", 8, vec![]).bit_range(), "[7:0]");
    }

    #[test]
    fn alias_table_lookup() {
        let mut table = AliasTable::default();
        let state = table
            .add(AliasDefinition::new(
                "state",
                2,
                vec![ValueFilter::new(0, "IDLE"), ValueFilter::new(1, "BUSY")],
            ))
            .unwrap();
        table.add(AliasDefinition::new("op", 4, vec![])).unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table["state"].width(), 2);
        assert_eq!(table[state].filters()[1].label, "BUSY");
        assert!(table.get("missing").is_none());

        let names: Vec<&str> = table.iter().map(|d| d.name()).collect();
        assert_eq!(names, ["state", "op"]);
    }

    #[test]
    fn alias_table_rejects_bad_definitions() {
        let mut table = AliasTable::default();
        table.add(AliasDefinition::new("state", 2, vec![])).unwrap();
        assert!(matches!(
            table.add(AliasDefinition::new("state", 3, vec![])),
            Err(RadixError::DuplicateAlias(name)) if name == "state"
        ));
        assert!(matches!(
            table.add(AliasDefinition::new("empty", 0, vec![])),
            Err(RadixError::ZeroWidth(name)) if name == "empty"
        ));
    }
}
