use crate::state::AppState;
use image::{Rgba, RgbaImage};
use mapdata::{Effects, Session};

/// Tint blended over selected regions.
pub const SELECTED_TINT: Rgba<u8> = Rgba([255, 215, 0, 255]);
/// Tint blended over the hovered region.
pub const HOVER_TINT: Rgba<u8> = Rgba([255, 255, 255, 255]);

const SELECTED_ALPHA: u8 = 128;
const HOVER_ALPHA: u8 = 96;

/// Presentation state derived from the session.
///
/// Holds the sidebar lines and the hover tooltip. `dirty` is raised whenever
/// an event asks for a refresh so the overlay is only redrawn when needed.
#[derive(Debug, Clone, PartialEq)]
pub struct UiState {
    /// Sidebar entries, one per selected region, sorted.
    pub selected: Vec<String>,
    /// Name of the region under the pointer, if any.
    pub hovered_tooltip: Option<String>,
    /// Overlay needs redrawing.
    pub dirty: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self::new()
    }
}

impl UiState {
    /// Starts dirty so the first frame is drawn.
    pub fn new() -> Self {
        Self {
            selected: Vec::new(),
            hovered_tooltip: None,
            dirty: true,
        }
    }

    pub fn set_selected(&mut self, selected: Vec<String>) {
        if self.selected != selected {
            self.selected = selected;
            self.dirty = true;
        }
    }

    pub fn set_hovered_tooltip(&mut self, tooltip: Option<String>) {
        if self.hovered_tooltip != tooltip {
            self.hovered_tooltip = tooltip;
            self.dirty = true;
        }
    }

    /// Applies the effects of one event.
    pub fn apply(&mut self, effects: Effects, state: &AppState) {
        if effects.refresh {
            self.set_hovered_tooltip(state.hover_text());
            self.dirty = true;
        }
        if effects.selection_changed {
            let mut names: Vec<String> = state
                .session
                .selection()
                .iter()
                .map(|&key| state.region_details(key))
                .collect();
            names.sort();
            self.set_selected(names);
        }
    }

    pub fn sidebar_text(&self) -> String {
        let mut text = format!("Selected regions: {}", self.selected.len());
        for name in &self.selected {
            text.push_str("\n  ");
            text.push_str(name);
        }
        text
    }
}

fn blend(pixel: &mut Rgba<u8>, tint: Rgba<u8>, alpha: u8) {
    let a = alpha as u16;
    for c in 0..3 {
        let base = pixel[c] as u16;
        pixel[c] = ((base * (255 - a) + tint[c] as u16 * a) / 255) as u8;
    }
}

/// Renders the map with selected regions tinted and the hovered region
/// brightened on top.
pub fn draw_overlay(session: &Session) -> RgbaImage {
    let mut image = session.map().bitmap().clone();

    for &key in session.selection().iter() {
        for &(x, y) in session.region_pixels(key) {
            blend(image.get_pixel_mut(x, y), SELECTED_TINT, SELECTED_ALPHA);
        }
    }
    if let Some(key) = session.hovered() {
        for &(x, y) in session.region_pixels(key) {
            blend(image.get_pixel_mut(x, y), HOVER_TINT, HOVER_ALPHA);
        }
    }
    image
}
