use super::{Locator, LocatorKind, RegionKey};
use crate::index::ColorIndex;
use crate::map::{Color, MapData};

/// Axis-aligned hit box for a catalog region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionRect {
    pub color: Color,
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl RegionRect {
    /// Closed containment: both `x` and `x + w` are inside.
    pub fn contains(&self, x: i64, y: i64) -> bool {
        let (x0, y0) = (self.x as i64, self.y as i64);
        x0 <= x && x <= x0 + self.w as i64 && y0 <= y && y <= y0 + self.h as i64
    }
}

/// First-match rectangle hit testing in catalog order.
///
/// Rectangles are expected not to overlap; when they do, the earlier one wins.
#[derive(Debug, Clone, Default)]
pub struct RectLocator {
    rects: Vec<RegionRect>,
    derived: bool,
}

impl RectLocator {
    pub fn new(rects: Vec<RegionRect>) -> Self {
        Self {
            rects,
            derived: false,
        }
    }

    /// One rectangle per indexed region: its pixel bounding box.
    pub fn from_index(index: &ColorIndex) -> Self {
        Self {
            rects: index.colors().filter_map(|c| index.bounds(c)).collect(),
            derived: true,
        }
    }

    pub fn rects(&self) -> &[RegionRect] {
        &self.rects
    }
}

impl Locator for RectLocator {
    fn kind(&self) -> LocatorKind {
        LocatorKind::Rect
    }

    fn locate(&mut self, map: &MapData, x: i64, y: i64) -> Option<RegionKey> {
        map.pixel(x, y)?;
        self.rects
            .iter()
            .find(|r| r.contains(x, y))
            .map(|r| RegionKey::Color(r.color))
    }

    /// Derived rectangles follow the new bitmap; caller-supplied ones are kept.
    fn reset(&mut self, map: &MapData) {
        if self.derived {
            *self = Self::from_index(map.index());
        }
    }
}
