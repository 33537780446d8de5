// Copyright 2026 Cornell University
// released under MIT License

//! Output format selection and the render pipeline.
//!
//! A job starts out with placeholder [`RenderRequest`]s that only say which
//! format to produce. [`run`] replaces each placeholder with a new request of
//! the same kind that carries the grouped signals and alias definitions; the
//! output bytes are rendered on first access.

use crate::backends::{self, gtkwave, json, verdi};
use crate::errors::{RadixError, Result};
use crate::grouping::{group, GroupedSignals};
use crate::ir::{AliasTable, Job};
use log::{debug, info};
use rustc_hash::FxHashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// The supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Viewer {
    /// Generic JSON config
    Json,
    /// Verdi nWave alias table script
    Verdi,
    /// GTKWave enum filter script
    GtkWave,
}

impl Viewer {
    pub const ALL: [Viewer; 3] = [Viewer::Json, Viewer::Verdi, Viewer::GtkWave];

    pub fn keyword(&self) -> &'static str {
        match self {
            Viewer::Json => "json",
            Viewer::Verdi => "verdi",
            Viewer::GtkWave => "gtkwave",
        }
    }

    /// Separator used to flatten hierarchical signal names for this format
    pub fn separator(&self) -> &'static str {
        match self {
            Viewer::Json => ".",
            Viewer::Verdi => verdi::SEPARATOR,
            Viewer::GtkWave => gtkwave::SEPARATOR,
        }
    }

    pub fn suffix(&self) -> &'static str {
        match self {
            Viewer::Json => "json",
            Viewer::Verdi | Viewer::GtkWave => "tcl",
        }
    }

    /// Suggested file name without suffix
    pub fn base_name(&self) -> String {
        format!("custom_radix_{}", self.keyword())
    }

    pub fn render(&self, groups: &GroupedSignals, aliases: &AliasTable) -> Result<Vec<u8>> {
        match self {
            Viewer::Json => json::to_json_bytes(groups, aliases),
            Viewer::Verdi => verdi::to_verdi_bytes(groups, aliases),
            Viewer::GtkWave => gtkwave::to_gtkwave_bytes(groups, aliases),
        }
    }
}

impl fmt::Display for Viewer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.keyword())
    }
}

impl FromStr for Viewer {
    type Err = RadixError;

    fn from_str(s: &str) -> Result<Self> {
        Viewer::ALL
            .into_iter()
            .find(|v| v.keyword() == s)
            .ok_or_else(|| RadixError::UnsupportedViewer(s.to_string()))
    }
}

/// Parses a comma separated list of viewer keywords, e.g. `json,gtkwave`.
/// An empty list selects `json`. Repeated keywords are only rendered once.
pub fn parse_viewer_list(list: &str) -> Result<Vec<Viewer>> {
    let mut viewers: Vec<Viewer> = vec![];
    for keyword in list.split(',').map(str::trim).filter(|k| !k.is_empty()) {
        let viewer: Viewer = keyword.parse()?;
        if !viewers.contains(&viewer) {
            viewers.push(viewer);
        }
    }
    if viewers.is_empty() {
        viewers.push(Viewer::Json);
    }
    Ok(viewers)
}

/// Everything a backend needs, plus the rendered bytes once they are requested
#[derive(Debug, Clone, Default)]
pub struct RadixData {
    groups: GroupedSignals,
    aliases: AliasTable,
    payload: OnceLock<Vec<u8>>,
}

impl RadixData {
    pub fn new(groups: GroupedSignals, aliases: AliasTable) -> Self {
        Self {
            groups,
            aliases,
            payload: OnceLock::new(),
        }
    }
}

/// A request to produce one output format.
#[derive(Debug, Clone)]
pub enum RenderRequest {
    Json(RadixData),
    Verdi(RadixData),
    GtkWave(RadixData),
}

impl RenderRequest {
    /// A request that carries no data yet
    pub fn placeholder(viewer: Viewer) -> Self {
        Self::new(viewer, RadixData::default())
    }

    fn new(viewer: Viewer, data: RadixData) -> Self {
        match viewer {
            Viewer::Json => RenderRequest::Json(data),
            Viewer::Verdi => RenderRequest::Verdi(data),
            Viewer::GtkWave => RenderRequest::GtkWave(data),
        }
    }

    pub fn viewer(&self) -> Viewer {
        match self {
            RenderRequest::Json(_) => Viewer::Json,
            RenderRequest::Verdi(_) => Viewer::Verdi,
            RenderRequest::GtkWave(_) => Viewer::GtkWave,
        }
    }

    fn data(&self) -> &RadixData {
        match self {
            RenderRequest::Json(data) | RenderRequest::Verdi(data) | RenderRequest::GtkWave(data) => {
                data
            }
        }
    }

    pub fn groups(&self) -> &GroupedSignals {
        &self.data().groups
    }

    pub fn aliases(&self) -> &AliasTable {
        &self.data().aliases
    }

    /// Creates a request of the same kind populated with fresh data.
    /// `self` is left untouched.
    pub fn populate(&self, groups: GroupedSignals, aliases: AliasTable) -> Self {
        Self::new(self.viewer(), RadixData::new(groups, aliases))
    }

    /// `<base_name>.<suffix>`, e.g. `custom_radix_gtkwave.tcl`
    pub fn file_name(&self) -> String {
        let viewer = self.viewer();
        format!("{}.{}", viewer.base_name(), viewer.suffix())
    }

    /// The rendered output, computed on first access
    pub fn payload(&self) -> Result<&[u8]> {
        let data = self.data();
        if let Some(bytes) = data.payload.get() {
            return Ok(bytes);
        }
        let bytes = self.viewer().render(&data.groups, &data.aliases)?;
        info!("rendered {} bytes for `{}`", bytes.len(), self.viewer());
        Ok(data.payload.get_or_init(|| bytes))
    }
}

/// Placeholder requests for the selected viewers
pub fn placeholders(viewers: &[Viewer]) -> Vec<RenderRequest> {
    viewers.iter().map(|v| RenderRequest::placeholder(*v)).collect()
}

/// Runs the pipeline for one job: groups the associations once per separator
/// and replaces every request with a populated one.
///
/// Fails if the definitions are inconsistent (duplicates, zero width) or if
/// a signal refers to an alias without a definition.
pub fn run(job: &Job, requests: &[RenderRequest]) -> Result<Vec<RenderRequest>> {
    info!(
        "collected {} alias definition(s) and {} signal association(s)",
        job.definitions.len(),
        job.associations.len()
    );
    let aliases = job.alias_table()?;

    let mut by_separator: FxHashMap<&'static str, GroupedSignals> = FxHashMap::default();
    let mut populated = Vec::with_capacity(requests.len());
    for request in requests {
        let sep = request.viewer().separator();
        let groups = by_separator
            .entry(sep)
            .or_insert_with(|| group(&job.associations, sep));
        backends::check_definitions(groups, &aliases)?;
        debug!("populating `{}` request", request.viewer());
        populated.push(request.populate(groups.clone(), aliases.clone()));
    }
    Ok(populated)
}
