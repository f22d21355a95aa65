//! Interaction controllers
//!
//! Each controller owns one slice of interaction state (selection, search,
//! geolocation) and runs on the engine's single logical thread. Async
//! provider calls are fire-and-forget: their outcomes travel back as
//! [`EngineEvent`]s on a channel and are applied, in completion order, when
//! the engine drains it. Every completion carries the generation it was
//! issued under so superseded responses die quietly instead of clobbering
//! newer state.

pub mod geolocation;
pub mod search;
pub mod selection;

use crate::providers::{GeoFix, ProviderError, SearchResult};

/// Completion of an outstanding provider call
#[derive(Debug)]
pub enum EngineEvent {
    SearchCompleted {
        generation: u64,
        outcome: Result<Vec<SearchResult>, ProviderError>,
    },
    FixResolved {
        generation: u64,
        outcome: Result<GeoFix, ProviderError>,
    },
}
