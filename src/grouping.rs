// Copyright 2026 Cornell University
// released under MIT License

use crate::ir::SignalAssociation;
use log::debug;
use std::collections::BTreeMap;

/// All signals displayed with the same alias, as flat hierarchical names
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SignalGroup {
    alias: String,
    signals: Vec<String>,
}

impl SignalGroup {
    pub fn new(alias: impl Into<String>, signals: Vec<String>) -> Self {
        Self {
            alias: alias.into(),
            signals,
        }
    }

    pub fn alias(&self) -> &str {
        &self.alias
    }

    /// Signal names in the order their associations were collected
    pub fn signals(&self) -> &[String] {
        &self.signals
    }
}

/// Signal groups sorted by alias name.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GroupedSignals {
    groups: Vec<SignalGroup>,
}

impl GroupedSignals {
    pub fn iter(&self) -> impl Iterator<Item = &SignalGroup> {
        self.groups.iter()
    }

    pub fn get(&self, alias: &str) -> Option<&SignalGroup> {
        self.groups
            .binary_search_by(|g| g.alias.as_str().cmp(alias))
            .ok()
            .map(|idx| &self.groups[idx])
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl<'a> IntoIterator for &'a GroupedSignals {
    type Item = &'a SignalGroup;
    type IntoIter = std::slice::Iter<'a, SignalGroup>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.iter()
    }
}

/// Resolves every association to a hierarchical name joined with `sep`
/// and partitions the names by alias.
/// Groups come out in ascending alias order; within a group the
/// association order is preserved.
pub fn group<'a>(
    associations: impl IntoIterator<Item = &'a SignalAssociation>,
    sep: &str,
) -> GroupedSignals {
    let mut by_alias: BTreeMap<&str, Vec<String>> = BTreeMap::new();
    for association in associations {
        by_alias
            .entry(association.alias.as_str())
            .or_default()
            .push(association.target.hierarchical_name(sep));
    }
    let groups: Vec<SignalGroup> = by_alias
        .into_iter()
        .map(|(alias, signals)| SignalGroup::new(alias, signals))
        .collect();
    debug!(
        "grouped signals into {} alias group(s) using separator `{}`",
        groups.len(),
        sep
    );
    GroupedSignals { groups }
}
