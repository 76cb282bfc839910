use clap::{Parser, Subcommand};
use mapdata::LocatorKind;
use std::path::PathBuf;

#[derive(Parser, Debug, PartialEq)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Region catalog (indented text blocks ending in an RGB line)
    #[arg(long, global = true, default_value = "regions.txt")]
    pub catalog: PathBuf,

    /// Color-keyed map image (PNG or BMP)
    #[arg(long, global = true, default_value = "map.png")]
    pub map: PathBuf,

    /// How pointer coordinates are resolved to regions
    #[arg(long, global = true, value_enum, default_value_t = Strategy::Color)]
    pub strategy: Strategy,

    /// Per-channel color tolerance for the fill strategy
    #[arg(long, global = true, default_value_t = 30)]
    pub tolerance: u8,

    /// Log filter passed to env_logger (e.g. "debug", "mapdata=trace")
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Bounding rectangles derived from the color index
    Rect,
    /// Exact pixel color lookup
    Color,
    /// Flood fill from the clicked pixel, memoized
    Fill,
}

impl From<Strategy> for LocatorKind {
    fn from(strategy: Strategy) -> Self {
        match strategy {
            Strategy::Rect => LocatorKind::Rect,
            Strategy::Color => LocatorKind::Color,
            Strategy::Fill => LocatorKind::Fill,
        }
    }
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Commands {
    /// Dump the parsed region catalog as JSON.
    Regions,

    /// Print region, orphan and pixel counts.
    Stats,

    /// Print the name of the region under a pixel (`-` for none).
    #[command(allow_negative_numbers = true)]
    Locate { x: i64, y: i64 },

    /// Run an input event script and print the sidebar after each change.
    ///
    /// One event per line: `move X Y`, `leave`, `click`, `click X Y`,
    /// `remove R,G,B`, `remove #ID`, `clear`. Lines starting with `#` are
    /// comments.
    Replay { script: PathBuf },

    /// Render the selection overlay to an image file.
    Overlay {
        /// Output path for the image.
        #[arg(short, long, default_value = "overlay.png")]
        output: PathBuf,

        /// Click this pixel before rendering (repeatable), as `X,Y`.
        #[arg(long, value_parser = parse_point)]
        select: Vec<(i64, i64)>,

        /// Hover this pixel before rendering, as `X,Y`.
        #[arg(long, value_parser = parse_point)]
        hover: Option<(i64, i64)>,
    },
}

/// Parses `X,Y` into a pixel coordinate.
pub fn parse_point(s: &str) -> Result<(i64, i64), String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y but got '{}'", s))?;
    let x = x.trim().parse().map_err(|e| format!("bad x in '{}': {}", s, e))?;
    let y = y.trim().parse().map_err(|e| format!("bad y in '{}': {}", s, e))?;
    Ok((x, y))
}
