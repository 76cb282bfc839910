use crate::catalog::{RegionCatalog, load_catalog};
use crate::error::LoadError;
use crate::index::ColorIndex;
use image::{Rgba, RgbaImage};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Exact RGB color of a map pixel. Alpha is never part of a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Normalized `"r,g,b"` key.
    pub fn key(&self) -> String {
        self.to_string()
    }

    /// True when every channel differs from `other` by at most `tolerance`.
    pub fn within(&self, other: Color, tolerance: u8) -> bool {
        self.r.abs_diff(other.r) <= tolerance
            && self.g.abs_diff(other.g) <= tolerance
            && self.b.abs_diff(other.b) <= tolerance
    }
}

impl From<&Rgba<u8>> for Color {
    fn from(pixel: &Rgba<u8>) -> Self {
        Self {
            r: pixel[0],
            g: pixel[1],
            b: pixel[2],
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.r, self.g, self.b)
    }
}

impl FromStr for Color {
    type Err = String;

    /// Accepts `"r,g,b"` or `"r g b"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|p| !p.is_empty())
            .collect();
        if parts.len() != 3 {
            return Err(format!("expected three channels in '{}'", s));
        }
        let channel = |p: &str| {
            p.parse::<u8>()
                .map_err(|_| format!("channel '{}' is not in 0..=255", p))
        };
        Ok(Self {
            r: channel(parts[0])?,
            g: channel(parts[1])?,
            b: channel(parts[2])?,
        })
    }
}

/// A loaded map: the bitmap snapshot plus the index derived from it.
///
/// The bitmap is never patched in place. A changed image goes through
/// [`MapData::replace_bitmap`], which rebuilds the index.
#[derive(Debug, Clone)]
pub struct MapData {
    bitmap: RgbaImage,
    index: ColorIndex,
}

impl MapData {
    pub fn new(catalog: RegionCatalog, bitmap: RgbaImage) -> Self {
        let index = ColorIndex::build(catalog, &bitmap);
        Self { bitmap, index }
    }

    /// Runs the full load sequence: catalog text, bitmap decode, index build.
    pub fn load(catalog_path: &Path, bitmap_path: &Path) -> Result<Self, LoadError> {
        let report = load_catalog(catalog_path)?;
        log::info!(
            "Loaded {} regions from {:?} ({} warnings)",
            report.catalog.len(),
            catalog_path,
            report.warnings.len()
        );
        let bitmap = load_bitmap(bitmap_path)?;
        Ok(Self::new(report.catalog, bitmap))
    }

    pub fn bitmap(&self) -> &RgbaImage {
        &self.bitmap
    }

    pub fn index(&self) -> &ColorIndex {
        &self.index
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.bitmap.dimensions()
    }

    /// Converts signed cursor coordinates to a pixel inside the bitmap.
    pub fn pixel(&self, x: i64, y: i64) -> Option<(u32, u32)> {
        let (w, h) = self.bitmap.dimensions();
        if x < 0 || y < 0 || x >= w as i64 || y >= h as i64 {
            return None;
        }
        Some((x as u32, y as u32))
    }

    /// Color at an in-bounds pixel.
    pub fn color_at(&self, x: u32, y: u32) -> Color {
        Color::from(self.bitmap.get_pixel(x, y))
    }

    /// Swaps in a new bitmap and rebuilds the index against it.
    pub fn replace_bitmap(&mut self, bitmap: RgbaImage) {
        self.index.rebuild(&bitmap);
        self.bitmap = bitmap;
    }
}

/// Decodes any raster format `image` supports into RGBA8.
pub fn load_bitmap(path: &Path) -> Result<RgbaImage, LoadError> {
    log::info!("Loading map image from {:?}", path);
    let image = image::open(path).map_err(|source| match source {
        image::ImageError::IoError(source) => LoadError::Io {
            path: path.to_path_buf(),
            source,
        },
        source => LoadError::Image {
            path: path.to_path_buf(),
            source,
        },
    })?;
    let bitmap = image.to_rgba8();
    log::info!("Map dimensions: {}x{}", bitmap.width(), bitmap.height());
    Ok(bitmap)
}
