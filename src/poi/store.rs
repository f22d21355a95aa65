//! Authoritative in-memory POI collection

use crate::poi::{PoiId, PointOfInterest};
use crate::{EngineError, Result};
use fxhash::FxHashMap;

/// Owns the session's POIs and their mutable flags.
///
/// Iteration order is the order of the loaded snapshot, which downstream
/// filtering preserves. Deletion is a data-source concern; a store is only
/// ever replaced wholesale by [`PoiStore::load`].
#[derive(Debug, Default)]
pub struct PoiStore {
    by_id: FxHashMap<PoiId, PointOfInterest>,
    order: Vec<PoiId>,
}

impl PoiStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the store contents with a fresh snapshot.
    ///
    /// POIs with out-of-range coordinates are dropped, and a duplicated id
    /// replaces the earlier occurrence; both are logged since they indicate a
    /// misbehaving data source, not a caller error.
    pub fn load(&mut self, collection: Vec<PointOfInterest>) {
        self.by_id.clear();
        self.order.clear();

        for poi in collection {
            if !poi.position.is_valid() {
                log::warn!("dropping {} ({}): coordinate out of range", poi.id, poi.name);
                continue;
            }
            let id = poi.id;
            if self.by_id.insert(id, poi).is_some() {
                log::warn!("duplicate {} in snapshot, keeping the later entry", id);
            } else {
                self.order.push(id);
            }
        }
    }

    /// Looks up a POI by id
    pub fn get(&self, id: PoiId) -> Option<&PointOfInterest> {
        self.by_id.get(&id)
    }

    /// Whether the store currently contains `id`
    pub fn contains(&self, id: PoiId) -> bool {
        self.by_id.contains_key(&id)
    }

    /// Flips the favorite flag, returning the new value
    pub fn toggle_favorite(&mut self, id: PoiId) -> Result<bool> {
        let poi = self.by_id.get_mut(&id).ok_or(EngineError::NotFound(id))?;
        poi.favorite = !poi.favorite;
        Ok(poi.favorite)
    }

    /// Marks a POI as visited. Idempotent: re-marking is a no-op, not an error.
    pub fn mark_visited(&mut self, id: PoiId) -> Result<()> {
        let poi = self.by_id.get_mut(&id).ok_or(EngineError::NotFound(id))?;
        poi.visited = true;
        Ok(())
    }

    /// Iterates POIs in snapshot order
    pub fn iter(&self) -> impl Iterator<Item = &PointOfInterest> {
        self.order.iter().filter_map(move |id| self.by_id.get(id))
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}
