use crate::core::geo::LatLng;
use serde::{Deserialize, Serialize};

/// The minimum allowed zoom level
pub const MIN_ZOOM: u8 = 1;
/// The maximum allowed zoom level
pub const MAX_ZOOM: u8 = 20;

/// Base map imagery style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MapType {
    Roadmap,
    Satellite,
}

impl MapType {
    /// The other imagery style; map-type switching is a binary flip
    pub fn toggled(self) -> Self {
        match self {
            MapType::Roadmap => MapType::Satellite,
            MapType::Satellite => MapType::Roadmap,
        }
    }
}

impl Default for MapType {
    fn default() -> Self {
        MapType::Roadmap
    }
}

/// The current view of the map: center, zoom level, and imagery style.
///
/// Owned exclusively by the engine. Every other component reads it, and all
/// writes funnel through the engine's recenter/zoom operations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// The center of the map view in geographical coordinates
    pub center: LatLng,
    /// The current zoom level, always within [MIN_ZOOM, MAX_ZOOM]
    pub zoom: u8,
    /// The base imagery style
    pub map_type: MapType,
}

impl Viewport {
    /// Creates a new viewport, clamping zoom to the valid range
    pub fn new(center: LatLng, zoom: u8, map_type: MapType) -> Self {
        Self {
            center: Self::clamp_center(center),
            zoom: zoom.clamp(MIN_ZOOM, MAX_ZOOM),
            map_type,
        }
    }

    /// Sets the center, clamping latitude and wrapping longitude
    pub fn set_center(&mut self, center: LatLng) {
        self.center = Self::clamp_center(center);
    }

    /// Sets the zoom level, clamping to the valid range
    pub fn set_zoom(&mut self, zoom: u8) {
        self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
    }

    /// Raises the zoom level to at least `floor`, never lowering it
    pub fn raise_zoom_to(&mut self, floor: u8) {
        if floor > self.zoom {
            self.set_zoom(floor);
        }
    }

    /// Increments zoom by `delta`, saturating at MAX_ZOOM
    pub fn zoom_in(&mut self, delta: u8) {
        self.set_zoom(self.zoom.saturating_add(delta));
    }

    /// Decrements zoom by `delta`, saturating at MIN_ZOOM
    pub fn zoom_out(&mut self, delta: u8) {
        self.set_zoom(self.zoom.saturating_sub(delta));
    }

    /// Flips between roadmap and satellite imagery
    pub fn toggle_map_type(&mut self) {
        self.map_type = self.map_type.toggled();
    }

    fn clamp_center(center: LatLng) -> LatLng {
        LatLng::new(LatLng::clamp_lat(center.lat), LatLng::wrap_lng(center.lng))
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(LatLng::default(), 2, MapType::Roadmap)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewport_creation_clamps_zoom() {
        let viewport = Viewport::new(LatLng::new(40.7128, -74.0060), 25, MapType::Roadmap);
        assert_eq!(viewport.zoom, MAX_ZOOM);
        assert_eq!(viewport.center.lat, 40.7128);

        let viewport = Viewport::new(LatLng::default(), 0, MapType::Roadmap);
        assert_eq!(viewport.zoom, MIN_ZOOM);
    }

    #[test]
    fn zoom_saturates_at_bounds() {
        let mut viewport = Viewport::new(LatLng::default(), 19, MapType::Roadmap);
        viewport.zoom_in(1);
        assert_eq!(viewport.zoom, 20);
        viewport.zoom_in(1);
        assert_eq!(viewport.zoom, 20);

        viewport.set_zoom(2);
        viewport.zoom_out(1);
        assert_eq!(viewport.zoom, 1);
        viewport.zoom_out(1);
        assert_eq!(viewport.zoom, 1);
    }

    #[test]
    fn raise_zoom_never_lowers() {
        let mut viewport = Viewport::new(LatLng::default(), 16, MapType::Roadmap);
        viewport.raise_zoom_to(14);
        assert_eq!(viewport.zoom, 16);
        viewport.raise_zoom_to(18);
        assert_eq!(viewport.zoom, 18);
    }

    #[test]
    fn map_type_toggle_is_a_binary_flip() {
        let mut viewport = Viewport::default();
        assert_eq!(viewport.map_type, MapType::Roadmap);
        viewport.toggle_map_type();
        assert_eq!(viewport.map_type, MapType::Satellite);
        viewport.toggle_map_type();
        assert_eq!(viewport.map_type, MapType::Roadmap);
    }

    #[test]
    fn center_is_normalized() {
        let mut viewport = Viewport::default();
        viewport.set_center(LatLng::new(95.0, 190.0));
        assert_eq!(viewport.center.lat, 90.0);
        assert_eq!(viewport.center.lng, -170.0);
    }
}
