use super::{FillId, Locator, LocatorKind, RegionKey};
use crate::map::{Color, MapData};
use std::collections::HashMap;

/// Thresholds for flood-fill region discovery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FillConfig {
    /// Maximum per-channel difference from the seed color.
    pub tolerance: u8,
    /// A pixel with every channel below this is a border line.
    pub border_threshold: u8,
}

impl Default for FillConfig {
    fn default() -> Self {
        Self {
            tolerance: 30,
            border_threshold: 50,
        }
    }
}

impl FillConfig {
    pub fn is_border(&self, c: Color) -> bool {
        c.r < self.border_threshold && c.g < self.border_threshold && c.b < self.border_threshold
    }

    /// Blue-dominant sea color.
    pub fn is_water(&self, c: Color) -> bool {
        c.b >= 150 && c.b > c.r.saturating_add(40) && c.b > c.g.saturating_add(20)
    }
}

/// Discovers regions lazily by filling outward from probed pixels.
///
/// Every pixel that joins a fill is memoized with the fill's id, so a second
/// probe anywhere inside the same area is a map lookup.
#[derive(Debug, Clone)]
pub struct FloodFillLocator {
    config: FillConfig,
    assigned: HashMap<(u32, u32), FillId>,
    regions: HashMap<FillId, Vec<(u32, u32)>>,
    next_id: u32,
}

impl FloodFillLocator {
    pub fn new(config: FillConfig) -> Self {
        Self {
            config,
            assigned: HashMap::new(),
            regions: HashMap::new(),
            next_id: 1,
        }
    }

    pub fn config(&self) -> FillConfig {
        self.config
    }

    /// Memoized id for a pixel, without filling.
    pub fn assigned(&self, x: u32, y: u32) -> Option<FillId> {
        self.assigned.get(&(x, y)).copied()
    }

    /// Members of a discovered region, in fill order (seed first).
    pub fn region_members(&self, id: FillId) -> &[(u32, u32)] {
        self.regions.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn region_count(&self) -> usize {
        self.regions.len()
    }

    fn fill(&mut self, map: &MapData, seed_x: u32, seed_y: u32) -> Option<FillId> {
        if let Some(&id) = self.assigned.get(&(seed_x, seed_y)) {
            return Some(id);
        }

        let seed = map.color_at(seed_x, seed_y);
        if self.config.is_border(seed) || self.config.is_water(seed) {
            return None;
        }

        let id = FillId(self.next_id);
        self.next_id += 1;

        let (width, height) = map.dimensions();
        let mut members = Vec::new();
        let mut frontier = vec![(seed_x, seed_y)];
        self.assigned.insert((seed_x, seed_y), id);

        while let Some((x, y)) = frontier.pop() {
            members.push((x, y));

            let neighbors = [
                (x > 0).then(|| (x - 1, y)),
                (x + 1 < width).then(|| (x + 1, y)),
                (y > 0).then(|| (x, y - 1)),
                (y + 1 < height).then(|| (x, y + 1)),
            ];
            for (nx, ny) in neighbors.into_iter().flatten() {
                if self.assigned.contains_key(&(nx, ny)) {
                    continue;
                }
                let color = map.color_at(nx, ny);
                if self.config.is_border(color) || !seed.within(color, self.config.tolerance) {
                    continue;
                }
                self.assigned.insert((nx, ny), id);
                frontier.push((nx, ny));
            }
        }

        log::debug!(
            "Flood fill from ({}, {}) discovered region {} with {} pixels",
            seed_x,
            seed_y,
            id,
            members.len()
        );
        self.regions.insert(id, members);
        Some(id)
    }
}

impl Locator for FloodFillLocator {
    fn kind(&self) -> LocatorKind {
        LocatorKind::Fill
    }

    fn locate(&mut self, map: &MapData, x: i64, y: i64) -> Option<RegionKey> {
        let (px, py) = map.pixel(x, y)?;
        self.fill(map, px, py).map(RegionKey::Fill)
    }

    fn region_pixels<'a>(&'a self, map: &'a MapData, key: RegionKey) -> &'a [(u32, u32)] {
        match key {
            RegionKey::Fill(id) => self.region_members(id),
            RegionKey::Color(color) => map.index().pixels(color),
        }
    }

    fn reset(&mut self, _map: &MapData) {
        *self = Self::new(self.config);
    }
}
