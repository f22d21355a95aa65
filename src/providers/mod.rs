//! External collaborator interfaces
//!
//! The engine consumes three injected capabilities: a POI data source, a
//! text search provider, and a geolocation provider. The engine never
//! depends on which implementation is wired in: [`sim`] offers
//! deterministic in-process implementations, [`http`] a network-backed one.

pub mod http;
pub mod sim;

use crate::core::geo::LatLng;
use crate::poi::PointOfInterest;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Failure signaled by a provider.
///
/// Providers own their retry/backoff policy; the engine only reacts to the
/// terminal outcome it is handed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProviderError {
    /// The provider could not complete the request
    #[error("{message}")]
    Failure { message: String, retryable: bool },

    /// The user refused the capability (geolocation only)
    #[error("permission denied")]
    PermissionDenied,
}

impl ProviderError {
    pub fn failure(message: impl Into<String>) -> Self {
        ProviderError::Failure {
            message: message.into(),
            retryable: true,
        }
    }

    pub fn fatal(message: impl Into<String>) -> Self {
        ProviderError::Failure {
            message: message.into(),
            retryable: false,
        }
    }

    pub fn is_retryable(&self) -> bool {
        match self {
            ProviderError::Failure { retryable, .. } => *retryable,
            // Denial is terminal until the user retries explicitly
            ProviderError::PermissionDenied => true,
        }
    }
}

/// A single hit returned by a search provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub name: String,
    pub address: String,
    pub position: LatLng,
}

/// A geolocation fix as delivered by a provider
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoFix {
    pub position: LatLng,
    /// Accuracy radius in meters, when the provider reports one
    pub accuracy: Option<f64>,
}

impl GeoFix {
    pub fn new(position: LatLng) -> Self {
        Self {
            position,
            accuracy: None,
        }
    }

    pub fn with_accuracy(mut self, accuracy: f64) -> Self {
        self.accuracy = Some(accuracy);
        self
    }

    /// A fix is usable when its coordinate is in range and its accuracy,
    /// if reported, is finite and non-negative
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Checks the fix, naming what is wrong with it
    pub fn validate(&self) -> crate::Result<()> {
        if !self.position.is_valid() {
            return Err(crate::EngineError::InvalidFix(format!(
                "coordinate out of range ({}, {})",
                self.position.lat, self.position.lng
            )));
        }
        if let Some(radius) = self.accuracy {
            if !radius.is_finite() || radius < 0.0 {
                return Err(crate::EngineError::InvalidFix(format!(
                    "accuracy radius {radius} is negative or non-finite"
                )));
            }
        }
        Ok(())
    }
}

/// Snapshot source for the POI collection
pub trait PoiSource: Send + Sync {
    fn load_pois(&self) -> crate::Result<Vec<PointOfInterest>>;
}

/// Free-text place search
#[async_trait]
pub trait SearchProvider: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, ProviderError>;
}

/// Device/user position lookup
#[async_trait]
pub trait GeolocationProvider: Send + Sync {
    async fn request_fix(&self) -> Result<GeoFix, ProviderError>;
}
