use crate::controllers::{
    geolocation::{FixApplied, GeolocationController, PermissionState},
    search::{SearchController, SearchFailure},
    selection::SelectionController,
    EngineEvent,
};
use crate::core::{
    geo::{project, LatLng, ScreenPoint},
    viewport::{MapType, Viewport},
};
use crate::input::Command;
use crate::poi::{
    filter::{visible_pois, CategoryVisibility},
    store::PoiStore,
    Category, PoiId, PointOfInterest,
};
use crate::providers::{GeoFix, GeolocationProvider, PoiSource, SearchProvider, SearchResult};
use crate::runtime::{self, AsyncSpawner, BlockingSpawner};
use crate::Result;
use crossbeam_channel::{unbounded, Receiver};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Initial viewport state and focus behavior
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub center: LatLng,
    pub zoom: u8,
    pub map_type: MapType,
    /// Minimum zoom applied when focusing a POI or a search hit
    pub focus_zoom: u8,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            center: LatLng::default(),
            zoom: 2,
            map_type: MapType::Roadmap,
            focus_zoom: 14,
        }
    }
}

/// The auxiliary UI surfaces the engine tracks visibility for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Panel {
    Search,
    Filter,
    List,
}

/// Visibility of the auxiliary panels: independent, mutually non-exclusive
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Panels {
    pub search: bool,
    pub filter: bool,
    pub list: bool,
}

impl Panels {
    pub fn toggle(&mut self, panel: Panel) {
        match panel {
            Panel::Search => self.search = !self.search,
            Panel::Filter => self.filter = !self.filter,
            Panel::List => self.list = !self.list,
        }
    }
}

/// A visible POI with its projected screen position
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub poi: PointOfInterest,
    pub position: ScreenPoint,
    pub selected: bool,
}

/// Search state as exposed to the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchSnapshot {
    pub query: String,
    pub results: Vec<SearchResult>,
    pub loading: bool,
    pub error: Option<SearchFailure>,
}

/// Geolocation state as exposed to the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeolocationSnapshot {
    pub permission: PermissionState,
    pub last_fix: Option<GeoFix>,
    pub loading: bool,
    pub fixes_recorded: usize,
}

/// Read-only view of the whole engine for a host view to render.
///
/// The presentation layer never mutates the model directly; the engine's
/// enumerated operations are the only mutation entry points.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub viewport: Viewport,
    pub markers: Vec<Marker>,
    pub selection: Option<PointOfInterest>,
    pub panels: Panels,
    pub search: SearchSnapshot,
    pub geolocation: GeolocationSnapshot,
}

/// Top-level coordinator for the interactive map viewport.
///
/// Owns the viewport, the POI store, category visibility, the panel flags
/// and the three controllers, and routes every user intent to the right
/// place. All state mutation happens on the caller's thread; provider
/// completions queue up on a channel until [`ViewportEngine::pump`] applies
/// them. `recenter` is the single write path to center/zoom; when two
/// recenters land in the same tick, the last one applied wins.
pub struct ViewportEngine {
    viewport: Viewport,
    store: PoiStore,
    visibility: CategoryVisibility,
    panels: Panels,
    selection: SelectionController,
    search: SearchController,
    geolocation: GeolocationController,
    focus_zoom: u8,
    events: Receiver<EngineEvent>,
}

impl ViewportEngine {
    /// Creates an engine with the default spawner for the enabled runtime
    pub fn new(
        config: EngineConfig,
        search_provider: Arc<dyn SearchProvider>,
        geolocation_provider: Arc<dyn GeolocationProvider>,
    ) -> Self {
        Self::with_spawner(
            config,
            search_provider,
            geolocation_provider,
            runtime::default_spawner(),
        )
    }

    /// Creates an engine whose provider calls run synchronously on submit.
    ///
    /// Completions are already queued when the triggering call returns; a
    /// single `pump` applies them deterministically.
    pub fn for_testing(
        config: EngineConfig,
        search_provider: Arc<dyn SearchProvider>,
        geolocation_provider: Arc<dyn GeolocationProvider>,
    ) -> Self {
        Self::with_spawner(
            config,
            search_provider,
            geolocation_provider,
            Arc::new(BlockingSpawner),
        )
    }

    pub fn with_spawner(
        config: EngineConfig,
        search_provider: Arc<dyn SearchProvider>,
        geolocation_provider: Arc<dyn GeolocationProvider>,
        spawner: Arc<dyn AsyncSpawner>,
    ) -> Self {
        let (tx, rx) = unbounded();
        Self {
            viewport: Viewport::new(config.center, config.zoom, config.map_type),
            store: PoiStore::new(),
            visibility: CategoryVisibility::all(),
            panels: Panels::default(),
            selection: SelectionController::new(),
            search: SearchController::new(search_provider, Arc::clone(&spawner), tx.clone()),
            geolocation: GeolocationController::new(geolocation_provider, spawner, tx),
            focus_zoom: config.focus_zoom,
            events: rx,
        }
    }

    /// Replaces the POI collection from a data source snapshot
    pub fn load_from(&mut self, source: &dyn PoiSource) -> Result<usize> {
        let pois = source.load_pois()?;
        self.store.load(pois);
        Ok(self.store.len())
    }

    /// Replaces the POI collection directly
    pub fn load_pois(&mut self, pois: Vec<PointOfInterest>) {
        self.store.load(pois);
    }

    /// Routes an enumerated user intent to the owning component
    pub fn apply(&mut self, command: Command) {
        match command {
            Command::ZoomIn => self.viewport.zoom_in(1),
            Command::ZoomOut => self.viewport.zoom_out(1),
            Command::SetZoom(zoom) => self.viewport.set_zoom(zoom),
            Command::PanBy { d_lat, d_lng } => self.pan_by(d_lat, d_lng),
            Command::ToggleMapType => self.viewport.toggle_map_type(),
            Command::TogglePanel(panel) => self.panels.toggle(panel),
            Command::ToggleCategory(category) => self.toggle_category(category),
            Command::ToggleFavorite(id) => self.toggle_favorite(id),
            Command::MarkVisited(id) => self.mark_visited(id),
            Command::Select(id) => self.select(id),
            Command::Deselect => self.deselect(),
            Command::SubmitSearch(query) => {
                self.submit_search(&query);
            }
            Command::PickSearchResult(index) => self.pick_search_result(index),
            Command::RequestLocation => {
                self.request_location();
            }
        }
    }

    /// The single write path to viewport center and zoom.
    ///
    /// Used by selection, search and geolocation alike, so two controllers
    /// can never interleave partial viewport writes; the last recenter in a
    /// tick wins outright. An out-of-range coordinate is absorbed here.
    pub fn recenter(&mut self, center: LatLng, min_zoom: Option<u8>) {
        if !center.is_valid() {
            log::warn!(
                "recenter ignored: {}",
                crate::EngineError::InvalidCoordinates(format!(
                    "({}, {})",
                    center.lat, center.lng
                ))
            );
            return;
        }
        self.viewport.set_center(center);
        if let Some(floor) = min_zoom {
            self.viewport.raise_zoom_to(floor);
        }
    }

    /// Shifts the center by the given deltas in degrees
    pub fn pan_by(&mut self, d_lat: f64, d_lng: f64) {
        if !d_lat.is_finite() || !d_lng.is_finite() {
            log::warn!("ignoring pan by non-finite delta");
            return;
        }
        let center = self.viewport.center;
        self.recenter(
            LatLng::new(
                LatLng::clamp_lat(center.lat + d_lat),
                LatLng::wrap_lng(center.lng + d_lng),
            ),
            None,
        );
    }

    pub fn toggle_panel(&mut self, panel: Panel) {
        self.panels.toggle(panel);
    }

    pub fn toggle_category(&mut self, category: Category) {
        self.visibility = self.visibility.toggled(category);
    }

    /// Flips a POI's favorite flag; an unknown id is logged and ignored
    pub fn toggle_favorite(&mut self, id: PoiId) {
        if let Err(error) = self.store.toggle_favorite(id) {
            log::warn!("toggle_favorite ignored: {error}");
        }
    }

    /// Marks a POI visited; an unknown id is logged and ignored
    pub fn mark_visited(&mut self, id: PoiId) {
        if let Err(error) = self.store.mark_visited(id) {
            log::warn!("mark_visited ignored: {error}");
        }
    }

    /// Focuses a POI: selects it, recenters on it, and raises zoom to the
    /// focus floor (never lowering it)
    pub fn select(&mut self, id: PoiId) {
        let Some(position) = self.store.get(id).map(|poi| poi.position) else {
            log::warn!("select ignored: POI not found: {id}");
            return;
        };
        self.selection.select(id);
        self.recenter(position, Some(self.focus_zoom));
    }

    pub fn deselect(&mut self) {
        self.selection.deselect();
    }

    /// Submits a text search; blank input is a no-op
    pub fn submit_search(&mut self, query: &str) -> bool {
        self.search.submit(query)
    }

    /// Applies a search hit: clears the result list, recenters on the hit,
    /// and closes the search panel
    pub fn pick_search_result(&mut self, index: usize) {
        let Some(result) = self.search.take_result(index) else {
            log::warn!("search result {index} out of range, ignoring");
            return;
        };
        self.recenter(result.position, Some(self.focus_zoom));
        self.panels.search = false;
    }

    /// Requests a geolocation fix; a no-op while one is already in flight
    pub fn request_location(&mut self) -> bool {
        self.geolocation.request_location()
    }

    /// Applies queued provider completions in completion order.
    ///
    /// Returns how many completions were applied; superseded ones are
    /// dropped without being counted.
    pub fn pump(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(event) = self.events.try_recv() {
            match event {
                EngineEvent::SearchCompleted { generation, outcome } => {
                    if self.search.apply_completion(generation, outcome) {
                        applied += 1;
                    }
                }
                EngineEvent::FixResolved { generation, outcome } => {
                    match self.geolocation.apply_completion(generation, outcome) {
                        FixApplied::Recenter(position) => {
                            self.recenter(position, None);
                            applied += 1;
                        }
                        FixApplied::Settled => applied += 1,
                        FixApplied::Stale => {}
                    }
                }
            }
        }
        applied
    }

    /// Produces the read-only snapshot the presentation layer renders.
    ///
    /// Resolving the selection here is what implements the lazy dangling
    /// check: a selection whose POI has left the store collapses to
    /// `Unselected` on this read.
    pub fn snapshot(&mut self) -> Snapshot {
        let selected = self.selection.resolve(&self.store);
        let viewport = self.viewport;

        let markers = visible_pois(self.store.iter(), &self.visibility)
            .into_iter()
            .map(|poi| Marker {
                position: project(poi.position, viewport.center, viewport.zoom),
                selected: Some(poi.id) == selected,
                poi: poi.clone(),
            })
            .collect();

        Snapshot {
            viewport,
            markers,
            selection: selected.and_then(|id| self.store.get(id).cloned()),
            panels: self.panels,
            search: SearchSnapshot {
                query: self.search.query().to_string(),
                results: self.search.results().to_vec(),
                loading: self.search.is_loading(),
                error: self.search.failure().cloned(),
            },
            geolocation: GeolocationSnapshot {
                permission: self.geolocation.permission(),
                last_fix: self.geolocation.last_fix(),
                loading: self.geolocation.is_loading(),
                fixes_recorded: self.geolocation.history().len(),
            },
        }
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn store(&self) -> &PoiStore {
        &self.store
    }

    pub fn visibility(&self) -> &CategoryVisibility {
        &self.visibility
    }

    pub fn panels(&self) -> &Panels {
        &self.panels
    }

    pub fn search(&self) -> &SearchController {
        &self.search
    }

    pub fn geolocation(&self) -> &GeolocationController {
        &self.geolocation
    }
}
