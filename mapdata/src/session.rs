use crate::catalog::Region;
use crate::locate::{FillConfig, Locator, LocatorKind, RegionKey, locator_for};
use crate::map::MapData;
use crate::selection::{Effects, Selection};
use image::RgbaImage;

/// Everything one interactive map session needs, passed around explicitly.
///
/// Owns the loaded map, the locator chosen at creation and the selection.
/// Event handlers take `&mut Session` and run to completion one at a time.
pub struct Session {
    map: MapData,
    locator: Box<dyn Locator>,
    selection: Selection<RegionKey>,
}

impl Session {
    pub fn new(map: MapData, kind: LocatorKind, fill: FillConfig) -> Self {
        let locator = locator_for(kind, &map, fill);
        Self::with_locator(map, locator)
    }

    /// Session with a caller-built locator (e.g. hand-placed rectangles).
    pub fn with_locator(map: MapData, locator: Box<dyn Locator>) -> Self {
        log::info!("Starting session with {:?} locator", locator.kind());
        Self {
            map,
            locator,
            selection: Selection::new(),
        }
    }

    pub fn map(&self) -> &MapData {
        &self.map
    }

    pub fn kind(&self) -> LocatorKind {
        self.locator.kind()
    }

    pub fn selection(&self) -> &Selection<RegionKey> {
        &self.selection
    }

    pub fn hovered(&self) -> Option<RegionKey> {
        self.selection.hovered()
    }

    pub fn locate(&mut self, x: i64, y: i64) -> Option<RegionKey> {
        self.locator.locate(&self.map, x, y)
    }

    pub fn pointer_move(&mut self, x: i64, y: i64) -> Effects {
        let region = self.locate(x, y);
        self.selection.pointer_move(region)
    }

    pub fn pointer_leave(&mut self) -> Effects {
        self.selection.pointer_leave()
    }

    /// Toggles whatever region is under `(x, y)`. Misses are ignored.
    pub fn click_at(&mut self, x: i64, y: i64) -> Effects {
        let region = self.locate(x, y);
        if region.is_none() {
            log::debug!("Click at ({}, {}) hit no region", x, y);
        }
        self.selection.click_at(region)
    }

    /// Toggles `region` directly, e.g. from a sidebar entry.
    pub fn click(&mut self, region: RegionKey) -> Effects {
        self.selection.click(region)
    }

    pub fn clear_all(&mut self) -> Effects {
        self.selection.clear_all()
    }

    pub fn remove(&mut self, region: RegionKey) -> Effects {
        self.selection.remove(&region)
    }

    /// Catalog record behind a key. Flood-fill regions have none.
    pub fn region(&self, key: RegionKey) -> Option<&Region> {
        match key {
            RegionKey::Color(color) => self.map.index().region(color),
            RegionKey::Fill(_) => None,
        }
    }

    pub fn display_name(&self, key: RegionKey) -> String {
        match (self.region(key), key) {
            (Some(region), _) => region.name.clone(),
            (None, RegionKey::Fill(id)) => format!("Region {}", id),
            (None, RegionKey::Color(color)) => format!("Unknown ({})", color),
        }
    }

    pub fn region_pixels(&self, key: RegionKey) -> &[(u32, u32)] {
        self.locator.region_pixels(&self.map, key)
    }

    /// Replaces the bitmap: rebuilds the index, resets the locator and clears
    /// selection and hover.
    pub fn reload(&mut self, bitmap: RgbaImage) -> Effects {
        self.map.replace_bitmap(bitmap);
        self.locator.reset(&self.map);
        self.selection = Selection::new();
        Effects::ALL
    }
}
