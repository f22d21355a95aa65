//! Deterministic in-process providers
//!
//! Used by the headless demo and the test suite. Delays are explicit and
//! default to zero so behavior is reproducible; a zero delay never touches a
//! timer, which lets these providers run under the blocking spawner.

use super::{GeoFix, GeolocationProvider, PoiSource, ProviderError, SearchProvider, SearchResult};
use crate::core::geo::LatLng;
use crate::poi::{Category, PointOfInterest};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Built-in place table for simulated search
static DEFAULT_PLACES: Lazy<Vec<SearchResult>> = Lazy::new(|| {
    vec![
        SearchResult {
            name: "Amsterdam Centraal".into(),
            address: "Stationsplein, Amsterdam".into(),
            position: LatLng::new(52.3791, 4.9003),
        },
        SearchResult {
            name: "Rijksmuseum".into(),
            address: "Museumstraat 1, Amsterdam".into(),
            position: LatLng::new(52.3600, 4.8852),
        },
        SearchResult {
            name: "Vondelpark".into(),
            address: "Vondelpark, Amsterdam".into(),
            position: LatLng::new(52.3579, 4.8686),
        },
        SearchResult {
            name: "Utrecht Centraal".into(),
            address: "Stationshal 12, Utrecht".into(),
            position: LatLng::new(52.0894, 5.1100),
        },
    ]
});

async fn simulated_latency(delay: Duration) {
    if delay.is_zero() {
        return;
    }

    #[cfg(feature = "tokio-runtime")]
    tokio::time::sleep(delay).await;

    #[cfg(not(feature = "tokio-runtime"))]
    std::thread::sleep(delay);
}

/// Case-insensitive substring search over a fixed place table
pub struct SimSearchProvider {
    places: Vec<SearchResult>,
    delay: Duration,
    calls: AtomicUsize,
}

impl SimSearchProvider {
    pub fn new() -> Self {
        Self {
            places: DEFAULT_PLACES.clone(),
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_places(places: Vec<SearchResult>) -> Self {
        Self {
            places,
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// How many times `search` has been invoked
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Default for SimSearchProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SearchProvider for SimSearchProvider {
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        simulated_latency(self.delay).await;

        let needle = query.to_lowercase();
        Ok(self
            .places
            .iter()
            .filter(|place| {
                place.name.to_lowercase().contains(&needle)
                    || place.address.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect())
    }
}

/// Scripted geolocation outcomes
pub struct SimGeolocationProvider {
    outcome: Result<GeoFix, ProviderError>,
    delay: Duration,
    calls: AtomicUsize,
}

impl SimGeolocationProvider {
    /// Always resolves to the given fix
    pub fn fixed(fix: GeoFix) -> Self {
        Self {
            outcome: Ok(fix),
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
        }
    }

    /// Always denies permission
    pub fn denying() -> Self {
        Self {
            outcome: Err(ProviderError::PermissionDenied),
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
        }
    }

    /// Always fails with a retryable provider error
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            outcome: Err(ProviderError::failure(message)),
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// How many times `request_fix` has been invoked
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GeolocationProvider for SimGeolocationProvider {
    async fn request_fix(&self) -> Result<GeoFix, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        simulated_latency(self.delay).await;
        self.outcome.clone()
    }
}

/// POI source backed by an in-memory snapshot
pub struct StaticPoiSource {
    pois: Vec<PointOfInterest>,
}

impl StaticPoiSource {
    pub fn new(pois: Vec<PointOfInterest>) -> Self {
        Self { pois }
    }

    /// Parses a JSON array of POIs
    pub fn from_json(json: &str) -> crate::Result<Self> {
        let pois: Vec<PointOfInterest> = serde_json::from_str(json)?;
        Ok(Self::new(pois))
    }

    /// A small Amsterdam data set used by the headless demo
    pub fn sample() -> Self {
        Self::new(vec![
            PointOfInterest::new(1, "Vondelpark", Category::Park, LatLng::new(52.3579, 4.8686))
                .with_rating(4.7)
                .with_description("Large city park with open-air theatre"),
            PointOfInterest::new(2, "Rijksmuseum", Category::Attraction, LatLng::new(52.3600, 4.8852))
                .with_rating(4.8)
                .with_description("Dutch national museum")
                .with_media("rijksmuseum.jpg"),
            PointOfInterest::new(3, "Foodhallen", Category::Restaurant, LatLng::new(52.3673, 4.8686))
                .with_rating(4.4),
            PointOfInterest::new(4, "De Bijenkorf", Category::Shopping, LatLng::new(52.3739, 4.8935))
                .with_rating(4.3),
            PointOfInterest::new(5, "Hotel V Nesplein", Category::Accommodation, LatLng::new(52.3689, 4.8934))
                .with_rating(4.2),
            PointOfInterest::new(6, "Amsterdam Centraal", Category::Transport, LatLng::new(52.3791, 4.9003))
                .with_rating(4.1),
        ])
    }
}

impl PoiSource for StaticPoiSource {
    fn load_pois(&self) -> crate::Result<Vec<PointOfInterest>> {
        Ok(self.pois.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;

    #[test]
    fn sim_search_matches_substrings() {
        let provider = SimSearchProvider::new();
        let hits = block_on(provider.search("centraal")).unwrap();
        assert_eq!(hits.len(), 2);
        assert_eq!(provider.call_count(), 1);
    }

    #[test]
    fn sim_search_misses_yield_empty() {
        let provider = SimSearchProvider::new();
        let hits = block_on(provider.search("nonexistent")).unwrap();
        assert!(hits.is_empty());
    }

    #[test]
    fn sim_geolocation_scripts_outcomes() {
        let fix = GeoFix::new(LatLng::new(52.37, 4.89)).with_accuracy(12.0);
        let granted = SimGeolocationProvider::fixed(fix);
        assert_eq!(block_on(granted.request_fix()).unwrap(), fix);

        let denied = SimGeolocationProvider::denying();
        assert_eq!(
            block_on(denied.request_fix()).unwrap_err(),
            ProviderError::PermissionDenied
        );
    }

    #[test]
    fn static_source_parses_json() {
        let json = r#"[{
            "id": 1,
            "name": "Vondelpark",
            "category": "park",
            "position": { "lat": 52.3579, "lng": 4.8686 },
            "rating": 4.7,
            "description": "",
            "media": null
        }]"#;

        let source = StaticPoiSource::from_json(json).unwrap();
        let pois = source.load_pois().unwrap();
        assert_eq!(pois.len(), 1);
        assert_eq!(pois[0].category, Category::Park);
        assert!(!pois[0].favorite);
    }
}
