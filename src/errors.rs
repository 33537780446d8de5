// Copyright 2026 Cornell University
// released under MIT License

use thiserror::Error;

/// Errors raised while collecting, grouping or rendering custom radix data
#[derive(Error, Debug)]
pub enum RadixError {
    /// The viewer keyword passed on the command line is not one we can render
    #[error("unsupported viewer `{0}` (expected one of: json, verdi, gtkwave)")]
    UnsupportedViewer(String),

    /// A signal was associated with an alias that has no definition
    #[error("no alias definition found for `{alias}`, which is used by {signal_count} signal(s)")]
    MissingDefinition { alias: String, signal_count: usize },

    /// Two definitions share the same alias name
    #[error("alias `{0}` is defined more than once")]
    DuplicateAlias(String),

    /// A definition with a bit-width of zero cannot be displayed
    #[error("alias `{0}` has a width of 0")]
    ZeroWidth(String),

    /// A hierarchical target could not be parsed from its string form
    #[error("invalid signal target `{0}`: expected `circuit.instance…signal`")]
    InvalidTarget(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, RadixError>;
