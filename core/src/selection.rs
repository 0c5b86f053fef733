use hashbrown::HashSet;

use crate::*;

/// Currently selected square and the legal destinations reported for it.
///
/// Destinations are only ever present together with a selection; both are
/// dropped together by [`Selection::clear`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    selected: Option<Square>,
    highlighted: HashSet<Square>,
}

impl Selection {
    pub fn selected(&self) -> Option<Square> {
        self.selected
    }

    pub fn highlighted(&self) -> &HashSet<Square> {
        &self.highlighted
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_none()
    }

    /// Replaces any prior selection; destinations arrive later.
    pub fn select(&mut self, square: Square) {
        self.clear();
        self.selected = Some(square);
    }

    /// Installs destinations for `origin`, ignored unless it is still selected.
    pub fn highlight(&mut self, origin: Square, destinations: impl IntoIterator<Item = Square>) -> bool {
        if self.selected != Some(origin) {
            return false;
        }
        self.highlighted = destinations.into_iter().collect();
        true
    }

    pub fn clear(&mut self) -> bool {
        let had_selection = self.selected.take().is_some();
        self.highlighted.clear();
        had_selection
    }
}
