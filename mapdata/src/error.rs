//! Error and warning types for map loading and catalog parsing.

use crate::map::Color;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Fatal failure while loading a map session. There is no retry.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode map image {path}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("invalid region catalog: {0}")]
    Catalog(#[from] ParseError),
}

/// Errors that make a region catalog unusable.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Nothing but blank lines and comments.
    #[error("catalog is empty")]
    EmptyInput,
    /// Text was present but no region block reached its color line.
    #[error("catalog contains no complete region (every block needs an `R G B` line)")]
    NoRegions,
}

/// A malformed catalog line. Logged and skipped, never fatal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseWarning {
    /// 1-based line number in the source text.
    pub line: usize,
    pub kind: WarningKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WarningKind {
    /// Indented line with no region open to attach it to.
    OrphanIndentedLine,
    /// Leading whitespace that is neither a tab nor four spaces.
    ShallowIndent,
    /// Numeric line that is not exactly three values in `0..=255`.
    MalformedColor(String),
    /// Text line after settlement, faction and culture were all set.
    ExtraField(String),
    /// Region name whose block never reached a color line.
    DanglingRegion(String),
    /// A later region reused an earlier region's color and replaced it.
    DuplicateColor {
        color: Color,
        previous: String,
        replacement: String,
    },
}

impl fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: ", self.line)?;
        match &self.kind {
            WarningKind::OrphanIndentedLine => write!(f, "indented line outside of a region"),
            WarningKind::ShallowIndent => {
                write!(f, "unrecognized indentation (use a tab or 4 spaces)")
            }
            WarningKind::MalformedColor(text) => write!(f, "malformed color line '{}'", text),
            WarningKind::ExtraField(text) => write!(f, "ignoring extra field '{}'", text),
            WarningKind::DanglingRegion(name) => {
                write!(f, "region '{}' has no color line, dropped", name)
            }
            WarningKind::DuplicateColor {
                color,
                previous,
                replacement,
            } => write!(
                f,
                "color {} of '{}' is reused by '{}', keeping the later one",
                color, previous, replacement
            ),
        }
    }
}
