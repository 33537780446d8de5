// Copyright 2026 Cornell University
// released under MIT License

use crate::backends::resolve_groups;
use crate::errors::Result;
use crate::grouping::GroupedSignals;
use crate::ir::AliasTable;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::io::Write;

/// A single `value -> label` entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonValue {
    pub digit: u64,
    pub alias: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonAlias {
    pub width: u32,
    pub values: Vec<JsonValue>,
    pub signals: Vec<String>,
}

/// The whole config file: alias name -> alias, in definition order
pub type JsonConfig = IndexMap<String, JsonAlias>;

/// Builds the generic JSON config. Every definition becomes one entry, even
/// if no signal uses it; every group must have a definition.
pub fn to_json_config(groups: &GroupedSignals, aliases: &AliasTable) -> Result<JsonConfig> {
    resolve_groups(groups, aliases)?;
    let config = aliases
        .iter()
        .map(|definition| {
            let values = definition
                .filters()
                .iter()
                .map(|f| JsonValue {
                    digit: f.value,
                    alias: f.label.clone(),
                })
                .collect();
            let signals = groups
                .get(definition.name())
                .map(|g| g.signals().to_vec())
                .unwrap_or_default();
            let entry = JsonAlias {
                width: definition.width(),
                values,
                signals,
            };
            (definition.name().to_string(), entry)
        })
        .collect();
    Ok(config)
}

/// Writes the pretty-printed JSON config
pub fn to_json(groups: &GroupedSignals, aliases: &AliasTable, out: &mut impl Write) -> Result<()> {
    let config = to_json_config(groups, aliases)?;
    serde_json::to_writer_pretty(&mut *out, &config)?;
    writeln!(out)?;
    Ok(())
}

pub fn to_json_bytes(groups: &GroupedSignals, aliases: &AliasTable) -> Result<Vec<u8>> {
    let mut out = vec![];
    to_json(groups, aliases, &mut out)?;
    Ok(out)
}
