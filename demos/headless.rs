use std::sync::Arc;
use std::time::Duration;

use waymark::prelude::*;

/// Example of driving the viewport engine headlessly, without any UI
#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    println!("🗺️ Waymark Headless Example");
    println!("===========================");

    let search = Arc::new(SimSearchProvider::new().with_delay(Duration::from_millis(50)));
    let geolocation = Arc::new(
        SimGeolocationProvider::fixed(
            GeoFix::new(LatLng::new(52.3702, 4.8952)).with_accuracy(15.0),
        )
        .with_delay(Duration::from_millis(50)),
    );

    let config = EngineConfig {
        center: LatLng::new(52.3702, 4.8952), // Amsterdam
        zoom: 12,
        ..EngineConfig::default()
    };
    let mut engine = ViewportEngine::new(config, search, geolocation);

    let loaded = engine.load_from(&StaticPoiSource::sample())?;
    println!("✅ Loaded {loaded} POIs");

    // Focus a POI and flag it
    engine.apply(Command::Select(PoiId(2)));
    engine.apply(Command::ToggleFavorite(PoiId(2)));
    engine.apply(Command::MarkVisited(PoiId(2)));

    let snapshot = engine.snapshot();
    let focused = snapshot.selection.expect("a POI is selected");
    println!(
        "📍 Focused {} ({}) at zoom {}",
        focused.name, focused.category, snapshot.viewport.zoom
    );

    // Hide a category and show what the map would render
    engine.apply(Command::ToggleCategory(Category::Shopping));
    for marker in engine.snapshot().markers {
        println!(
            "   {} {} -> ({:.3}, {:.3}){}",
            marker.poi.category.style().icon,
            marker.poi.name,
            marker.position.x,
            marker.position.y,
            if marker.selected { "  [selected]" } else { "" }
        );
    }

    // Run a search and jump to the first hit
    engine.apply(Command::SubmitSearch("centraal".into()));
    while engine.pump() == 0 {
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    let hits = engine.snapshot().search.results;
    println!("🔎 {} hits for \"centraal\"", hits.len());
    engine.apply(Command::PickSearchResult(0));

    // Acquire the (simulated) device position
    engine.apply(Command::RequestLocation);
    while engine.pump() == 0 {
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    let geo = engine.snapshot().geolocation;
    println!(
        "🧭 Permission {:?}, fix {:?}",
        geo.permission,
        geo.last_fix.map(|fix| fix.position)
    );

    let viewport = *engine.viewport();
    println!(
        "✅ Final viewport: ({:.4}, {:.4}) zoom {} ({:?})",
        viewport.center.lat, viewport.center.lng, viewport.zoom, viewport.map_type
    );

    Ok(())
}
