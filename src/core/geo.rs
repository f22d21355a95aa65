use serde::{Deserialize, Serialize};

/// Mean Earth radius in meters, used for great-circle distances
const EARTH_RADIUS: f64 = 6378137.0;

/// Represents a geographical coordinate with latitude and longitude
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    /// Creates a new LatLng coordinate
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Validates that the coordinates are finite and within valid ranges
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && self.lat >= -90.0
            && self.lat <= 90.0
            && self.lng >= -180.0
            && self.lng <= 180.0
    }

    /// Calculates the distance to another LatLng in meters using the Haversine formula
    pub fn distance_to(&self, other: &LatLng) -> f64 {
        let lat1_rad = self.lat.to_radians();
        let lat2_rad = other.lat.to_radians();
        let delta_lat = (other.lat - self.lat).to_radians();
        let delta_lng = (other.lng - self.lng).to_radians();

        let a = (delta_lat / 2.0).sin().powi(2)
            + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

        EARTH_RADIUS * c
    }

    /// Wraps longitude to [-180, 180] range
    pub fn wrap_lng(lng: f64) -> f64 {
        let wrapped = lng % 360.0;
        if wrapped > 180.0 {
            wrapped - 360.0
        } else if wrapped < -180.0 {
            wrapped + 360.0
        } else {
            wrapped
        }
    }

    /// Clamps latitude to valid range
    pub fn clamp_lat(lat: f64) -> f64 {
        lat.clamp(-90.0, 90.0)
    }
}

impl Default for LatLng {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// Represents a position in normalized screen space
///
/// The viewport center is the origin; `x` grows eastward and `y` grows
/// southward, matching the usual top-left screen convention.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &ScreenPoint) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

impl Default for ScreenPoint {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// Projects a geographical coordinate into normalized screen space.
///
/// Pure and deterministic: the result depends only on the arguments. The
/// viewport center always lands on the origin, and the doubling effect of
/// each zoom step means screen-space distances grow monotonically with zoom.
/// Longitudinal offsets are wrapped so coordinates straddling the
/// antimeridian project to the near side rather than across the world.
/// Callers are expected to reject NaN coordinates before projecting.
pub fn project(coord: LatLng, center: LatLng, zoom: u8) -> ScreenPoint {
    let scale = 2_f64.powi(i32::from(zoom));
    let dx = LatLng::wrap_lng(coord.lng - center.lng) / 360.0;
    let dy = (center.lat - coord.lat) / 180.0;
    ScreenPoint::new(dx * scale, dy * scale)
}
