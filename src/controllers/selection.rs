//! Focused-POI tracking

use crate::poi::{PoiId, store::PoiStore};
use serde::{Deserialize, Serialize};

/// At most one POI has focus at a time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Selection {
    Unselected,
    Selected(PoiId),
}

/// Tracks the focused POI.
///
/// The store can drop a selected POI out from under us on a data refresh, so
/// the dangling check happens lazily on read: [`SelectionController::resolve`]
/// transitions to `Unselected` the moment the reference no longer holds,
/// rather than eagerly watching store mutations.
#[derive(Debug)]
pub struct SelectionController {
    selection: Selection,
}

impl SelectionController {
    pub(crate) fn new() -> Self {
        Self {
            selection: Selection::Unselected,
        }
    }

    pub fn select(&mut self, id: PoiId) {
        self.selection = Selection::Selected(id);
    }

    pub fn deselect(&mut self) {
        self.selection = Selection::Unselected;
    }

    /// The raw selection state, without a liveness check
    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// Resolves the selection against the store, clearing it if dangling
    pub fn resolve(&mut self, store: &PoiStore) -> Option<PoiId> {
        match self.selection {
            Selection::Unselected => None,
            Selection::Selected(id) => {
                if store.contains(id) {
                    Some(id)
                } else {
                    log::warn!("selected {} vanished from the store, deselecting", id);
                    self.selection = Selection::Unselected;
                    None
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geo::LatLng;
    use crate::poi::{Category, PointOfInterest};

    #[test]
    fn select_and_deselect() {
        let mut controller = SelectionController::new();
        assert_eq!(controller.selection(), Selection::Unselected);

        controller.select(PoiId(1));
        assert_eq!(controller.selection(), Selection::Selected(PoiId(1)));

        controller.deselect();
        assert_eq!(controller.selection(), Selection::Unselected);
    }

    #[test]
    fn dangling_selection_clears_on_resolve() {
        let mut store = PoiStore::new();
        store.load(vec![PointOfInterest::new(
            7,
            "Vondelpark",
            Category::Park,
            LatLng::new(52.3579, 4.8686),
        )]);

        let mut controller = SelectionController::new();
        controller.select(PoiId(7));
        assert_eq!(controller.resolve(&store), Some(PoiId(7)));

        // Data refresh drops the POI
        store.load(Vec::new());
        assert_eq!(controller.resolve(&store), None);
        assert_eq!(controller.selection(), Selection::Unselected);
    }
}
