use super::{Locator, LocatorKind, RegionKey};
use crate::map::MapData;

/// Exact color match against the index. O(1) per query.
#[derive(Debug, Clone, Copy, Default)]
pub struct ColorLocator;

impl Locator for ColorLocator {
    fn kind(&self) -> LocatorKind {
        LocatorKind::Color
    }

    fn locate(&mut self, map: &MapData, x: i64, y: i64) -> Option<RegionKey> {
        let (px, py) = map.pixel(x, y)?;
        let color = map.color_at(px, py);
        map.index().lookup(color).map(|region| RegionKey::Color(region.color))
    }

    fn reset(&mut self, _map: &MapData) {}
}
