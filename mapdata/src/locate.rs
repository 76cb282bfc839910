//! Cursor position → region resolution.
//!
//! Three interchangeable strategies sit behind [`Locator`]. The strategy is
//! chosen once per session and never switched while it runs.

mod color;
mod flood;
mod rect;

pub use color::ColorLocator;
pub use flood::{FillConfig, FloodFillLocator};
pub use rect::{RectLocator, RegionRect};

use crate::map::{Color, MapData};
use std::fmt;

/// Identifier handed out by the flood-fill strategy, starting at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FillId(pub u32);

impl fmt::Display for FillId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Identity of a resolved region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RegionKey {
    /// A catalog region, identified by its color.
    Color(Color),
    /// A region discovered by flood fill.
    Fill(FillId),
}

impl fmt::Display for RegionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegionKey::Color(c) => write!(f, "{}", c),
            RegionKey::Fill(id) => write!(f, "{}", id),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LocatorKind {
    Rect,
    Color,
    Fill,
}

/// Resolves a cursor pixel to a region.
///
/// Coordinates are signed so that positions left of or above the map are
/// representable; anything outside the bitmap resolves to `None`.
pub trait Locator {
    fn kind(&self) -> LocatorKind;

    fn locate(&mut self, map: &MapData, x: i64, y: i64) -> Option<RegionKey>;

    /// Pixels making up a region this locator produced.
    fn region_pixels<'a>(&'a self, map: &'a MapData, key: RegionKey) -> &'a [(u32, u32)] {
        match key {
            RegionKey::Color(color) => map.index().pixels(color),
            RegionKey::Fill(_) => &[],
        }
    }

    /// Drops state derived from a previous bitmap.
    fn reset(&mut self, map: &MapData);
}

/// Builds the locator for a strategy. Rectangles come from the index bounds.
pub fn locator_for(kind: LocatorKind, map: &MapData, fill: FillConfig) -> Box<dyn Locator> {
    match kind {
        LocatorKind::Rect => Box::new(RectLocator::from_index(map.index())),
        LocatorKind::Color => Box::new(ColorLocator),
        LocatorKind::Fill => Box::new(FloodFillLocator::new(fill)),
    }
}
