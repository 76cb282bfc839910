use crate::catalog::{Region, RegionCatalog};
use crate::locate::RegionRect;
use crate::map::Color;
use image::RgbaImage;
use std::collections::HashMap;

/// Pixel coordinates of one region, in row-major scan order.
pub type PixelList = Vec<(u32, u32)>;

/// Color → region index plus the pixel membership cache for one bitmap.
///
/// Built by a single scan. Lookups and overlay redraws afterwards never touch
/// the bitmap again. The membership lists describe the bitmap the index was
/// built from; a different bitmap needs [`ColorIndex::rebuild`].
#[derive(Debug, Clone)]
pub struct ColorIndex {
    catalog: RegionCatalog,
    members: HashMap<Color, PixelList>,
    dimensions: (u32, u32),
}

impl ColorIndex {
    pub fn build(catalog: RegionCatalog, bitmap: &RgbaImage) -> Self {
        let mut index = Self {
            catalog,
            members: HashMap::new(),
            dimensions: (0, 0),
        };
        index.rebuild(bitmap);
        index
    }

    /// Discards every membership list and rescans `bitmap`.
    pub fn rebuild(&mut self, bitmap: &RgbaImage) {
        let (width, height) = bitmap.dimensions();
        log::info!(
            "Indexing {}x{} map against {} catalog colors",
            width,
            height,
            self.catalog.len()
        );

        let mut members: HashMap<Color, PixelList> = HashMap::new();
        let mut unmatched = 0usize;
        for (x, y, pixel) in bitmap.enumerate_pixels() {
            let color = Color::from(pixel);
            if self.catalog.contains(color) {
                members.entry(color).or_default().push((x, y));
            } else {
                unmatched += 1;
            }
        }

        self.members = members;
        self.dimensions = (width, height);

        let orphans = self.orphans();
        for region in &orphans {
            log::debug!("Region '{}' ({}) has no pixels on the map", region.name, region.color);
        }
        log::info!(
            "Indexed {} regions ({} orphaned), {} background pixels",
            self.members.len(),
            orphans.len(),
            unmatched
        );
    }

    /// Region for a color present on the map. Orphaned catalog entries and
    /// background colors yield `None`.
    pub fn lookup(&self, color: Color) -> Option<&Region> {
        if self.members.contains_key(&color) {
            self.catalog.get(color)
        } else {
            None
        }
    }

    /// Catalog entry for a color whether or not it appears on the map.
    pub fn region(&self, color: Color) -> Option<&Region> {
        self.catalog.get(color)
    }

    pub fn catalog(&self) -> &RegionCatalog {
        &self.catalog
    }

    /// Cached pixels of a region. Empty for unknown colors.
    pub fn pixels(&self, color: Color) -> &[(u32, u32)] {
        self.members.get(&color).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn pixel_count(&self, color: Color) -> usize {
        self.pixels(color).len()
    }

    /// Total pixels that belong to some region.
    pub fn indexed_pixels(&self) -> usize {
        self.members.values().map(Vec::len).sum()
    }

    /// Number of catalog regions present on the map.
    pub fn region_count(&self) -> usize {
        self.members.len()
    }

    /// Colors present on the map, in catalog order.
    pub fn colors(&self) -> impl Iterator<Item = Color> + '_ {
        self.catalog
            .iter()
            .map(|r| r.color)
            .filter(|c| self.members.contains_key(c))
    }

    /// Catalog regions with no pixel on the map.
    pub fn orphans(&self) -> Vec<&Region> {
        self.catalog
            .iter()
            .filter(|r| !self.members.contains_key(&r.color))
            .collect()
    }

    /// Bounding box of a region's pixels. `w`/`h` are spans, so the closed
    /// rectangle covers exactly the outermost pixels.
    pub fn bounds(&self, color: Color) -> Option<RegionRect> {
        let pixels = self.members.get(&color)?;
        let (mut min_x, mut min_y) = (u32::MAX, u32::MAX);
        let (mut max_x, mut max_y) = (0u32, 0u32);
        for &(x, y) in pixels {
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
        }
        Some(RegionRect {
            color,
            x: min_x,
            y: min_y,
            w: max_x - min_x,
            h: max_y - min_y,
        })
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.dimensions
    }
}
