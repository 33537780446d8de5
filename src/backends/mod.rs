// Copyright 2026 Cornell University
// released under MIT License

pub mod gtkwave;
pub mod json;
pub mod tcl;
pub mod verdi;

use crate::errors::{RadixError, Result};
use crate::grouping::{GroupedSignals, SignalGroup};
use crate::ir::{AliasDefinition, AliasTable};

/// Looks up the definition behind a group of signals.
/// A group without a definition means the job is inconsistent and we refuse to
/// render anything for it.
fn definition_for<'a>(aliases: &'a AliasTable, group: &SignalGroup) -> Result<&'a AliasDefinition> {
    aliases
        .get(group.alias())
        .ok_or_else(|| RadixError::MissingDefinition {
            alias: group.alias().to_string(),
            signal_count: group.signals().len(),
        })
}

/// Pairs every group with its definition, failing on the first group
/// that has none. Backends call this before writing a single byte.
fn resolve_groups<'a, 'g>(
    groups: &'g GroupedSignals,
    aliases: &'a AliasTable,
) -> Result<Vec<(&'g SignalGroup, &'a AliasDefinition)>> {
    groups
        .iter()
        .map(|group| definition_for(aliases, group).map(|definition| (group, definition)))
        .collect()
}

/// Verifies that every group of signals has an alias definition
pub fn check_definitions(groups: &GroupedSignals, aliases: &AliasTable) -> Result<()> {
    resolve_groups(groups, aliases).map(|_| ())
}

/// Signal name followed by its `[msb:0]` range (if any)
fn with_bit_range(signal: &str, definition: &AliasDefinition) -> String {
    format!("{signal}{}", definition.bit_range())
}
