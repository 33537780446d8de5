// Copyright 2026 Cornell University
// released under MIT License

//! GTKWave Tcl script backend.
//!
//! GTKWave translates values through "enum" filters: flat lists of
//! `value label value label ...` where the value has to match the textual
//! representation GTKWave currently uses for the trace. Since that can be
//! either hex or binary, every value is listed in both forms.
//! A filter can only be attached to highlighted signals that are already on
//! screen, hence the four step `apply_enum_filter` helper.

use crate::backends::tcl::{ident, list};
use crate::backends::{resolve_groups, with_bit_range};
use crate::errors::Result;
use crate::grouping::GroupedSignals;
use crate::ir::AliasTable;
use rustc_hash::{FxHashMap, FxHashSet};
use std::io::Write;

/// Hierarchical separator expected by GTKWave
pub const SEPARATOR: &str = ".";

const APPLY_PROC: &str = "apply_enum_filter";

/// Zero-padded hex digits: `ceil(width / 4)` of them.
/// Values wider than `width` are not truncated.
pub fn hex_value(value: u64, width: u32) -> String {
    let digits = width.div_ceil(4) as usize;
    format!("{value:0digits$x}")
}

/// Zero-padded binary: exactly `width` digits unless the value does not fit
pub fn bin_value(value: u64, width: u32) -> String {
    let digits = width as usize;
    format!("{value:0digits$b}")
}

/// Assigns every alias a Tcl-safe suffix for its `enum_*` / `file_*`
/// variables. Aliases that sanitize to the same identifier get a counter.
fn variable_suffixes(aliases: &AliasTable) -> FxHashMap<&str, String> {
    let mut taken = FxHashSet::default();
    let mut suffixes = FxHashMap::default();
    for definition in aliases.iter() {
        let base = ident(definition.name());
        let mut candidate = base.clone();
        let mut counter = 1;
        while !taken.insert(candidate.clone()) {
            candidate = format!("{base}_{counter}");
            counter += 1;
        }
        suffixes.insert(definition.name(), candidate);
    }
    suffixes
}

pub fn to_gtkwave(groups: &GroupedSignals, aliases: &AliasTable, out: &mut impl Write) -> Result<()> {
    let resolved = resolve_groups(groups, aliases)?;
    let suffixes = variable_suffixes(aliases);

    writeln!(out, "# GTKWave custom radix script")?;
    writeln!(out, "# generated by custom-radix")?;
    writeln!(out)?;

    writeln!(out, "proc {APPLY_PROC} {{signals filter}} {{")?;
    writeln!(out, "    gtkwave::addSignalsFromList $signals")?;
    writeln!(out, "    gtkwave::highlightSignalsFromList $signals")?;
    writeln!(out, "    gtkwave::installFileFilter $filter")?;
    writeln!(out, "    gtkwave::unhighlightSignalsFromList $signals")?;
    writeln!(out, "}}")?;
    writeln!(out)?;

    writeln!(out, "# enum filters")?;
    for definition in aliases.iter() {
        let suffix = &suffixes[definition.name()];
        let mut entries = Vec::with_capacity(definition.filters().len() * 4);
        for filter in definition.filters() {
            entries.push(hex_value(filter.value, definition.width()));
            entries.push(filter.label.clone());
            entries.push(bin_value(filter.value, definition.width()));
            entries.push(filter.label.clone());
        }
        if entries.is_empty() {
            writeln!(out, "set enum_{suffix} [list]")?;
        } else {
            writeln!(out, "set enum_{suffix} [list {}]", list(&entries))?;
        }
        writeln!(
            out,
            "set file_{suffix} [gtkwave::setCurrentTranslateEnums $enum_{suffix}]"
        )?;
    }
    writeln!(out)?;

    writeln!(out, "# apply filters")?;
    for (group, definition) in resolved.iter() {
        let suffix = &suffixes[definition.name()];
        let signals = group
            .signals()
            .iter()
            .map(|signal| with_bit_range(signal, definition));
        writeln!(
            out,
            "{APPLY_PROC} [list {}] $file_{suffix}",
            list(signals)
        )?;
    }

    Ok(())
}

pub fn to_gtkwave_bytes(groups: &GroupedSignals, aliases: &AliasTable) -> Result<Vec<u8>> {
    let mut out = vec![];
    to_gtkwave(groups, aliases, &mut out)?;
    Ok(out)
}
