//! End-to-end scenarios against the public engine API

use std::sync::Arc;
use std::time::Duration;

use waymark::prelude::*;

/// Pumps the engine until `expected` completions have been applied,
/// yielding to the runtime in between. Panics if nothing arrives in time.
async fn pump_until(engine: &mut ViewportEngine, expected: usize) {
    let mut applied = 0;
    for _ in 0..400 {
        applied += engine.pump();
        if applied >= expected {
            return;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("expected {expected} completions, saw {applied}");
}

fn amsterdam_config() -> EngineConfig {
    EngineConfig {
        center: LatLng::new(52.3702, 4.8952),
        zoom: 12,
        ..EngineConfig::default()
    }
}

#[tokio::test]
async fn full_user_journey() {
    let mut engine = ViewportEngine::new(
        amsterdam_config(),
        Arc::new(SimSearchProvider::new()),
        Arc::new(SimGeolocationProvider::fixed(
            GeoFix::new(LatLng::new(52.3667, 4.8945)).with_accuracy(20.0),
        )),
    );
    engine.load_from(&StaticPoiSource::sample()).unwrap();

    // Browse: hide shopping, favorite the park
    engine.apply(Command::ToggleCategory(Category::Shopping));
    engine.apply(Command::ToggleFavorite(PoiId(1)));

    // Focus the park
    engine.apply(Command::Select(PoiId(1)));
    let snapshot = engine.snapshot();
    assert_eq!(snapshot.viewport.center, LatLng::new(52.3579, 4.8686));
    assert_eq!(snapshot.viewport.zoom, 14);
    let selected = snapshot.selection.unwrap();
    assert!(selected.favorite);
    assert_eq!(snapshot.markers.len(), 5);

    // Search and jump to a hit
    engine.apply(Command::TogglePanel(Panel::Search));
    engine.apply(Command::SubmitSearch("utrecht".into()));
    pump_until(&mut engine, 1).await;
    assert_eq!(engine.snapshot().search.results.len(), 1);

    engine.apply(Command::PickSearchResult(0));
    assert_eq!(engine.viewport().center, LatLng::new(52.0894, 5.1100));
    assert!(!engine.panels().search);

    // Come back home via geolocation
    engine.apply(Command::RequestLocation);
    pump_until(&mut engine, 1).await;

    let snapshot = engine.snapshot();
    assert_eq!(snapshot.geolocation.permission, PermissionState::Granted);
    assert_eq!(snapshot.viewport.center, LatLng::new(52.3667, 4.8945));
    // Recenters from geolocation do not touch zoom
    assert_eq!(snapshot.viewport.zoom, 14);
}

#[tokio::test]
async fn slow_search_response_never_overwrites_newer_one() {
    let mut engine = ViewportEngine::new(
        amsterdam_config(),
        Arc::new(SimSearchProvider::new().with_delay(Duration::from_millis(40))),
        Arc::new(SimGeolocationProvider::denying()),
    );

    engine.apply(Command::SubmitSearch("vondelpark".into()));
    engine.apply(Command::SubmitSearch("utrecht".into()));

    // Exactly one of the two completions may apply
    pump_until(&mut engine, 1).await;
    tokio::time::sleep(Duration::from_millis(80)).await;
    engine.pump();

    let snapshot = engine.snapshot();
    assert_eq!(snapshot.search.query, "utrecht");
    assert!(!snapshot.search.loading);
    let names: Vec<_> = snapshot
        .search
        .results
        .iter()
        .map(|r| r.name.as_str())
        .collect();
    assert_eq!(names, vec!["Utrecht Centraal"]);
}

#[tokio::test]
async fn concurrent_location_requests_hit_the_provider_once() {
    let provider = Arc::new(
        SimGeolocationProvider::fixed(GeoFix::new(LatLng::new(52.0, 4.0)))
            .with_delay(Duration::from_millis(30)),
    );
    let mut engine = ViewportEngine::new(
        amsterdam_config(),
        Arc::new(SimSearchProvider::new()),
        provider.clone(),
    );

    engine.apply(Command::RequestLocation);
    engine.apply(Command::RequestLocation);
    engine.apply(Command::RequestLocation);

    pump_until(&mut engine, 1).await;
    assert_eq!(provider.call_count(), 1);
    assert_eq!(engine.snapshot().geolocation.fixes_recorded, 1);

    // A fresh request after the first resolved is allowed again
    engine.apply(Command::RequestLocation);
    pump_until(&mut engine, 1).await;
    assert_eq!(provider.call_count(), 2);
    assert_eq!(engine.snapshot().geolocation.fixes_recorded, 2);
}

#[tokio::test]
async fn denial_surfaces_and_allows_retry() {
    let denying = Arc::new(SimGeolocationProvider::denying());
    let mut engine = ViewportEngine::new(
        amsterdam_config(),
        Arc::new(SimSearchProvider::new()),
        denying.clone(),
    );

    let before = *engine.viewport();
    engine.apply(Command::RequestLocation);
    pump_until(&mut engine, 1).await;

    let snapshot = engine.snapshot();
    assert_eq!(snapshot.geolocation.permission, PermissionState::Denied);
    assert!(snapshot.geolocation.last_fix.is_none());
    assert_eq!(*engine.viewport(), before, "denial never moves the viewport");

    engine.apply(Command::RequestLocation);
    pump_until(&mut engine, 1).await;
    assert_eq!(denying.call_count(), 2);
}

#[tokio::test]
async fn search_failure_is_retryable_without_losing_the_query() {
    struct FlakyProvider {
        calls: std::sync::atomic::AtomicUsize,
    }

    #[async_trait::async_trait]
    impl SearchProvider for FlakyProvider {
        async fn search(
            &self,
            query: &str,
        ) -> std::result::Result<Vec<SearchResult>, ProviderError> {
            let call = self
                .calls
                .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            if call == 0 {
                Err(ProviderError::failure("geocoder unreachable"))
            } else {
                Ok(vec![SearchResult {
                    name: format!("{query} (found)"),
                    address: String::new(),
                    position: LatLng::new(1.0, 1.0),
                }])
            }
        }
    }

    let mut engine = ViewportEngine::new(
        amsterdam_config(),
        Arc::new(FlakyProvider {
            calls: std::sync::atomic::AtomicUsize::new(0),
        }),
        Arc::new(SimGeolocationProvider::denying()),
    );

    engine.apply(Command::SubmitSearch("museumplein".into()));
    pump_until(&mut engine, 1).await;

    let snapshot = engine.snapshot();
    let error = snapshot.search.error.expect("failure is surfaced");
    assert!(error.retryable);
    assert_eq!(snapshot.search.query, "museumplein", "query text survives");

    // Retry the same query
    engine.apply(Command::SubmitSearch(snapshot.search.query));
    pump_until(&mut engine, 1).await;

    let snapshot = engine.snapshot();
    assert!(snapshot.search.error.is_none());
    assert_eq!(snapshot.search.results.len(), 1);
}

#[test]
fn favorite_toggle_scenario() {
    let mut engine = ViewportEngine::for_testing(
        EngineConfig::default(),
        Arc::new(SimSearchProvider::new()),
        Arc::new(SimGeolocationProvider::denying()),
    );
    engine.load_pois(vec![PointOfInterest::new(
        1,
        "Vondelpark",
        Category::Park,
        LatLng::new(52.3579, 4.8686),
    )]);

    engine.apply(Command::ToggleFavorite(PoiId(1)));
    assert!(engine.store().get(PoiId(1)).unwrap().favorite);

    engine.apply(Command::ToggleFavorite(PoiId(1)));
    assert!(!engine.store().get(PoiId(1)).unwrap().favorite);
}

#[test]
fn snapshot_serializes_for_host_views() {
    let mut engine = ViewportEngine::for_testing(
        amsterdam_config(),
        Arc::new(SimSearchProvider::new()),
        Arc::new(SimGeolocationProvider::denying()),
    );
    engine.load_from(&StaticPoiSource::sample()).unwrap();
    engine.apply(Command::Select(PoiId(1)));

    let snapshot = engine.snapshot();
    let json = serde_json::to_value(&snapshot).unwrap();

    assert_eq!(json["viewport"]["zoom"], 14);
    assert_eq!(json["markers"].as_array().unwrap().len(), 6);
    assert_eq!(json["selection"]["name"], "Vondelpark");
    assert_eq!(json["geolocation"]["permission"], "not-requested");
}
