//! Network-backed search provider
//!
//! Speaks the Nominatim-style geocoding response shape: a JSON array of
//! places with stringly-typed `lat`/`lon` fields.

use super::{ProviderError, SearchProvider, SearchResult};
use crate::core::geo::LatLng;
use async_trait::async_trait;
use once_cell::sync::Lazy;
use serde::Deserialize;

/// Shared async HTTP client for geocoding requests
static HTTP_CLIENT: Lazy<reqwest::Client> = Lazy::new(|| {
    reqwest::Client::builder()
        .user_agent("waymark/0.1.0")
        .timeout(std::time::Duration::from_secs(15))
        .build()
        .expect("failed to build reqwest async client")
});

const DEFAULT_ENDPOINT: &str = "https://nominatim.openstreetmap.org/search";

#[derive(Debug, Deserialize)]
struct GeocodedPlace {
    #[serde(default)]
    name: String,
    display_name: String,
    lat: String,
    lon: String,
}

/// Search provider backed by an HTTP geocoding endpoint
pub struct HttpSearchProvider {
    endpoint: String,
    limit: usize,
}

impl HttpSearchProvider {
    pub fn new() -> Self {
        Self::with_endpoint(DEFAULT_ENDPOINT)
    }

    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            limit: 10,
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    fn convert(place: GeocodedPlace) -> Option<SearchResult> {
        let lat = place.lat.parse::<f64>().ok()?;
        let lng = place.lon.parse::<f64>().ok()?;
        let position = LatLng::new(lat, lng);
        if !position.is_valid() {
            log::warn!("discarding geocoder hit with out-of-range coordinate");
            return None;
        }

        let name = if place.name.is_empty() {
            place
                .display_name
                .split(',')
                .next()
                .unwrap_or(&place.display_name)
                .trim()
                .to_string()
        } else {
            place.name
        };

        Some(SearchResult {
            name,
            address: place.display_name,
            position,
        })
    }
}

impl Default for HttpSearchProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SearchProvider for HttpSearchProvider {
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, ProviderError> {
        let limit = self.limit.to_string();
        let response = HTTP_CLIENT
            .get(&self.endpoint)
            .query(&[("q", query), ("format", "json"), ("limit", limit.as_str())])
            .send()
            .await
            .map_err(|e| ProviderError::failure(format!("geocoding request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            // 4xx responses indicate a malformed request and will not
            // succeed on retry; everything else might
            let retryable = !status.is_client_error();
            return Err(ProviderError::Failure {
                message: format!("geocoding endpoint returned {status}"),
                retryable,
            });
        }

        let places: Vec<GeocodedPlace> = response
            .json()
            .await
            .map_err(|e| ProviderError::failure(format!("malformed geocoding response: {e}")))?;

        Ok(places.into_iter().filter_map(Self::convert).collect())
    }
}
