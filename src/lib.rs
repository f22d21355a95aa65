//! # Waymark
//!
//! A headless, async-aware map viewport engine for points of interest.
//!
//! Waymark owns the interaction state of a map view (center, zoom, map type,
//! a live POI collection with per-item flags, category filtering, selection,
//! text search and geolocation) and exposes immutable snapshots with
//! projected marker positions for a host view to render. It performs no
//! rendering and no tile fetching of its own.

pub mod controllers;
pub mod core;
pub mod input;
pub mod poi;
pub mod prelude;
pub mod providers;
pub mod runtime;

// Re-export public API
pub use crate::core::{
    engine::{
        EngineConfig, GeolocationSnapshot, Marker, Panel, Panels, SearchSnapshot, Snapshot,
        ViewportEngine,
    },
    geo::{project, LatLng, ScreenPoint},
    viewport::{MapType, Viewport, MAX_ZOOM, MIN_ZOOM},
};

pub use crate::poi::{
    filter::{visible_pois, CategoryVisibility},
    store::PoiStore,
    Category, PoiId, PointOfInterest,
};

pub use crate::input::Command;

pub use crate::providers::{
    GeoFix, GeolocationProvider, PoiSource, ProviderError, SearchProvider, SearchResult,
};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, EngineError>;

/// Common error types
///
/// Nothing in the engine is allowed to take the host process down: every
/// variant here is either absorbed locally (logged and ignored) or surfaced
/// as a non-fatal, retryable UI state.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("POI not found: {0}")]
    NotFound(PoiId),

    #[error("stale async result: generation {received}, current {current}")]
    StaleAsyncResult { received: u64, current: u64 },

    #[error("provider failure: {0}")]
    Provider(#[from] ProviderError),

    #[error("invalid fix: {0}")]
    InvalidFix(String),

    #[error("invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Error type alias for convenience
pub type Error = EngineError;
