//! Region lookup for color-keyed map images.
//!
//! Load a region catalog and a bitmap into [`MapData`], pick a locator
//! strategy, and drive a [`Session`] with pointer events.

pub mod catalog;
pub mod error;
pub mod index;
pub mod locate;
pub mod map;
pub mod selection;
pub mod session;

pub use catalog::{ParseReport, Region, RegionCatalog, load_catalog, parse_catalog};
pub use error::{LoadError, ParseError, ParseWarning, WarningKind};
pub use index::ColorIndex;
pub use locate::{FillConfig, FillId, Locator, LocatorKind, RegionKey};
pub use map::{Color, MapData};
pub use selection::{Effects, Selection};
pub use session::Session;
