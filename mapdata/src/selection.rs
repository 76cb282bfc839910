use std::collections::HashSet;
use std::hash::Hash;

/// Side effects a transition asks the presentation layer to perform.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Effects {
    /// Overlay must be redrawn.
    pub refresh: bool,
    /// Selection count/list must be re-rendered.
    pub selection_changed: bool,
}

impl Effects {
    pub const NONE: Self = Self {
        refresh: false,
        selection_changed: false,
    };
    pub const REFRESH: Self = Self {
        refresh: true,
        selection_changed: false,
    };
    pub const ALL: Self = Self {
        refresh: true,
        selection_changed: true,
    };

    pub fn is_none(&self) -> bool {
        *self == Self::NONE
    }

    pub fn merge(self, other: Self) -> Self {
        Self {
            refresh: self.refresh || other.refresh,
            selection_changed: self.selection_changed || other.selection_changed,
        }
    }
}

/// Hover pointer plus a toggleable selection set.
///
/// Hover and selection are independent: hovering never selects, and toggling
/// a selection leaves the hover pointer alone.
#[derive(Debug, Clone)]
pub struct Selection<K> {
    selected: HashSet<K>,
    hovered: Option<K>,
}

impl<K> Default for Selection<K> {
    fn default() -> Self {
        Self {
            selected: HashSet::new(),
            hovered: None,
        }
    }
}

impl<K: Copy + Eq + Hash> Selection<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pointer moved onto `region` (or onto nothing).
    pub fn pointer_move(&mut self, region: Option<K>) -> Effects {
        if self.hovered == region {
            return Effects::NONE;
        }
        self.hovered = region;
        Effects::REFRESH
    }

    pub fn pointer_leave(&mut self) -> Effects {
        if self.hovered.take().is_some() {
            Effects::REFRESH
        } else {
            Effects::NONE
        }
    }

    /// Toggles `region` in the selection set.
    pub fn click(&mut self, region: K) -> Effects {
        if !self.selected.remove(&region) {
            self.selected.insert(region);
        }
        Effects::ALL
    }

    /// Click that may have missed every region. A miss changes nothing.
    pub fn click_at(&mut self, region: Option<K>) -> Effects {
        match region {
            Some(region) => self.click(region),
            None => Effects::NONE,
        }
    }

    pub fn clear_all(&mut self) -> Effects {
        self.selected.clear();
        Effects::ALL
    }

    pub fn remove(&mut self, region: &K) -> Effects {
        if self.selected.remove(region) {
            Effects::ALL
        } else {
            Effects::NONE
        }
    }

    pub fn is_selected(&self, region: &K) -> bool {
        self.selected.contains(region)
    }

    pub fn hovered(&self) -> Option<K> {
        self.hovered
    }

    pub fn count(&self) -> usize {
        self.selected.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &K> {
        self.selected.iter()
    }

    /// Selected keys in a stable order for display.
    pub fn selected(&self) -> Vec<K>
    where
        K: Ord,
    {
        let mut keys: Vec<K> = self.selected.iter().copied().collect();
        keys.sort();
        keys
    }
}
