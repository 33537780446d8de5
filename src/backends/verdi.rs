// Copyright 2026 Cornell University
// released under MIT License

//! Verdi nWave script backend.
//!
//! nWave can only apply an alias table to signals that are already shown in
//! the waveform window, so the script runs in four phases that must not be
//! interleaved per alias:
//! 1. create all alias tables
//! 2. add every group of signals to the window
//! 3. apply each alias table globally to the signals of its group
//! 4. remove the temporary groups again (the global alias stays in effect)

use crate::backends::tcl::{list, quote};
use crate::backends::{resolve_groups, with_bit_range};
use crate::errors::Result;
use crate::grouping::GroupedSignals;
use crate::ir::AliasTable;
use std::io::Write;

/// Hierarchical separator expected by nWave
pub const SEPARATOR: &str = "/";

const WIN: &str = "-win $_nWave1";

fn table_name(alias: &str) -> String {
    format!("alias_tab_{alias}")
}

pub fn to_verdi(groups: &GroupedSignals, aliases: &AliasTable, out: &mut impl Write) -> Result<()> {
    let resolved = resolve_groups(groups, aliases)?;

    writeln!(out, "# Verdi nWave custom radix script")?;
    writeln!(out, "# generated by custom-radix")?;
    writeln!(out)?;

    writeln!(out, "# alias tables")?;
    for definition in aliases.iter() {
        let table = table_name(definition.name());
        for filter in definition.filters() {
            writeln!(
                out,
                "wvAddAliasTableEntry {WIN} -table {} -value {} -alias {}",
                quote(&table),
                filter.value,
                quote(&filter.label)
            )?;
        }
    }
    writeln!(out)?;

    writeln!(out, "# show signals")?;
    for (group, definition) in resolved.iter() {
        let signals = group
            .signals()
            .iter()
            .map(|signal| with_bit_range(signal, definition));
        let members = list(std::iter::once(group.alias().to_string()).chain(signals));
        writeln!(out, "wvAddSignal {WIN} -group {}", quote(&members))?;
    }
    writeln!(out)?;

    // positions are 1-based within the freshly added group
    writeln!(out, "# apply alias tables")?;
    for (group, _) in resolved.iter() {
        let positions = (1..=group.signals().len()).map(|ii| ii.to_string());
        let position = list(std::iter::once(group.alias().to_string()).chain(positions));
        writeln!(
            out,
            "wvSetAliasTable {WIN} -table {} -global -position {}",
            quote(&table_name(group.alias())),
            quote(&position)
        )?;
    }
    writeln!(out)?;

    writeln!(out, "# remove temporary groups")?;
    for (group, _) in resolved.iter() {
        writeln!(out, "wvSelectGroup {WIN} {}", quote(group.alias()))?;
        writeln!(out, "wvCutSignal {WIN}")?;
    }

    Ok(())
}

pub fn to_verdi_bytes(groups: &GroupedSignals, aliases: &AliasTable) -> Result<Vec<u8>> {
    let mut out = vec![];
    to_verdi(groups, aliases, &mut out)?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::RadixError;
    use crate::grouping::group;
    use crate::ir::{AliasDefinition, SignalAssociation, Target, ValueFilter};

    fn render(definitions: Vec<AliasDefinition>, associations: &[SignalAssociation]) -> String {
        let aliases = AliasTable::from_definitions(definitions).unwrap();
        let groups = group(associations, SEPARATOR);
        String::from_utf8(to_verdi_bytes(&groups, &aliases).unwrap()).unwrap()
    }

    fn assoc(target: &str, alias: &str) -> SignalAssociation {
        SignalAssociation::new(target.parse::<Target>().unwrap(), alias)
    }

    #[test]
    fn single_bit_signals_have_no_range() {
        let script = render(
            vec![AliasDefinition::new(
                "valid",
                1,
                vec![ValueFilter::new(0, "NO"), ValueFilter::new(1, "YES")],
            )],
            &[assoc("top.io.valid", "valid")],
        );
        assert!(script.contains("wvAddSignal -win $_nWave1 -group {valid top/io/valid}\n"));
        assert!(!script.contains("[0:0]"));
    }

    #[test]
    fn buses_have_a_range() {
        let script = render(
            vec![AliasDefinition::new("state", 3, vec![ValueFilter::new(4, "DONE")])],
            &[assoc("top.fsm.state", "state"), assoc("top.fsm2.state", "state")],
        );
        assert!(script.contains(
            "wvAddSignal -win $_nWave1 -group {state {top/fsm/state[2:0]} {top/fsm2/state[2:0]}}\n"
        ));
        assert!(script.contains(
            "wvSetAliasTable -win $_nWave1 -table alias_tab_state -global -position {state 1 2}\n"
        ));
        assert!(script
            .contains("wvAddAliasTableEntry -win $_nWave1 -table alias_tab_state -value 4 -alias DONE\n"));
    }

    #[test]
    fn phases_are_not_interleaved() {
        let script = render(
            vec![
                AliasDefinition::new("a", 2, vec![ValueFilter::new(0, "A0")]),
                AliasDefinition::new("b", 2, vec![ValueFilter::new(0, "B0")]),
            ],
            &[assoc("top.x", "b"), assoc("top.y", "a")],
        );
        let last_table = script.rfind("wvAddAliasTableEntry").unwrap();
        let first_signal = script.find("wvAddSignal").unwrap();
        let last_signal = script.rfind("wvAddSignal").unwrap();
        let first_apply = script.find("wvSetAliasTable").unwrap();
        let last_apply = script.rfind("wvSetAliasTable").unwrap();
        let first_cut = script.find("wvSelectGroup").unwrap();
        assert!(last_table < first_signal);
        assert!(last_signal < first_apply);
        assert!(last_apply < first_cut);
    }

    #[test]
    fn labels_with_spaces_are_quoted() {
        let script = render(
            vec![AliasDefinition::new("s", 2, vec![ValueFilter::new(2, "WAIT ACK")])],
            &[],
        );
        assert!(script.contains("-value 2 -alias {WAIT ACK}\n"));
    }

    #[test]
    fn missing_definition_fails() {
        let aliases = AliasTable::default();
        let groups = group(&[assoc("top.fsm.state", "state")], SEPARATOR);
        assert!(matches!(
            to_verdi_bytes(&groups, &aliases),
            Err(RadixError::MissingDefinition { .. })
        ));
    }

    #[test]
    fn empty_job_is_only_boilerplate() {
        let script = render(vec![], &[]);
        assert_eq!(
            script,
            "# Verdi nWave custom radix script\n\
             # generated by custom-radix\n\
             \n\
             # alias tables\n\
             \n\
             # show signals\n\
             \n\
             # apply alias tables\n\
             \n\
             # remove temporary groups\n"
        );
    }
}
