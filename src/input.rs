//! Enumerated user intents
//!
//! Everything a host view can ask of the engine is one of these commands,
//! dispatched through [`crate::ViewportEngine::apply`]. Keeping the surface
//! closed means the presentation layer cannot reach into the data model;
//! it can only speak this vocabulary.

use crate::core::engine::Panel;
use crate::poi::{Category, PoiId};
use serde::{Deserialize, Serialize};

/// A single user intent routed by the engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "op", content = "args")]
pub enum Command {
    ZoomIn,
    ZoomOut,
    SetZoom(u8),
    PanBy { d_lat: f64, d_lng: f64 },
    ToggleMapType,
    TogglePanel(Panel),
    ToggleCategory(Category),
    ToggleFavorite(PoiId),
    MarkVisited(PoiId),
    Select(PoiId),
    Deselect,
    SubmitSearch(String),
    PickSearchResult(usize),
    RequestLocation,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_round_trip_through_json() {
        let commands = vec![
            Command::ZoomIn,
            Command::SetZoom(12),
            Command::PanBy { d_lat: 0.5, d_lng: -1.0 },
            Command::TogglePanel(Panel::Filter),
            Command::ToggleCategory(Category::Transport),
            Command::Select(PoiId(3)),
            Command::SubmitSearch("museum".into()),
            Command::RequestLocation,
        ];

        for command in commands {
            let json = serde_json::to_string(&command).unwrap();
            let back: Command = serde_json::from_str(&json).unwrap();
            assert_eq!(back, command);
        }
    }
}
