//! Prelude module for common waymark types and traits
//!
//! Re-exports the most commonly used types for easy importing with
//! `use waymark::prelude::*;`

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

pub use crate::controllers::{
    geolocation::{FixRecord, GeolocationController, PermissionState},
    search::{SearchController, SearchFailure, SearchPhase},
    selection::{Selection, SelectionController},
};

pub use crate::input::Command;

pub use crate::providers::{
    http::HttpSearchProvider,
    sim::{SimGeolocationProvider, SimSearchProvider, StaticPoiSource},
    GeoFix, GeolocationProvider, PoiSource, ProviderError, SearchProvider, SearchResult,
};

pub use crate::runtime::{AsyncSpawner, BlockingSpawner};

#[cfg(feature = "tokio-runtime")]
pub use crate::runtime::TokioSpawner;

pub use crate::{Error as EngineError, Result};

pub use std::{sync::Arc, time::Duration};

pub use fxhash::{FxHashMap as HashMap, FxHashSet as HashSet};
