//! Point-of-interest data model
//!
//! POIs are created when a data source snapshot is loaded and live for the
//! session; identity and geometry are immutable, while the `favorite` and
//! `visited` flags are mutated in place through [`store::PoiStore`]
//! operations only.

pub mod filter;
pub mod store;

use crate::core::geo::LatLng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique, immutable identity of a POI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PoiId(pub u64);

impl fmt::Display for PoiId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "poi#{}", self.0)
    }
}

/// Closed set of POI categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Attraction,
    Restaurant,
    Accommodation,
    Shopping,
    Park,
    Transport,
}

impl Category {
    /// Every known category, in display order
    pub const ALL: [Category; 6] = [
        Category::Attraction,
        Category::Restaurant,
        Category::Accommodation,
        Category::Shopping,
        Category::Park,
        Category::Transport,
    ];

    /// Display metadata for this category.
    ///
    /// An exhaustive match rather than a lookup table, so adding a category
    /// without styling it is a compile error.
    pub fn style(self) -> CategoryStyle {
        match self {
            Category::Attraction => CategoryStyle {
                label: "Attraction",
                icon: "star",
                color: "#e5a50a",
            },
            Category::Restaurant => CategoryStyle {
                label: "Restaurant",
                icon: "restaurant",
                color: "#c01c28",
            },
            Category::Accommodation => CategoryStyle {
                label: "Accommodation",
                icon: "hotel",
                color: "#613583",
            },
            Category::Shopping => CategoryStyle {
                label: "Shopping",
                icon: "bag",
                color: "#1c71d8",
            },
            Category::Park => CategoryStyle {
                label: "Park",
                icon: "tree",
                color: "#26a269",
            },
            Category::Transport => CategoryStyle {
                label: "Transport",
                icon: "train",
                color: "#5e5c64",
            },
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.style().label)
    }
}

/// Presentation metadata for a category marker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryStyle {
    pub label: &'static str,
    pub icon: &'static str,
    pub color: &'static str,
}

/// A discrete place of interest with location, category and display metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointOfInterest {
    pub id: PoiId,
    pub name: String,
    pub category: Category,
    pub position: LatLng,
    /// Rating on a 0-5 scale
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub description: String,
    /// Reference to an image or other media asset, resolved by the host view
    #[serde(default)]
    pub media: Option<String>,
    #[serde(default)]
    pub favorite: bool,
    #[serde(default)]
    pub visited: bool,
}

impl PointOfInterest {
    pub fn new(id: u64, name: impl Into<String>, category: Category, position: LatLng) -> Self {
        Self {
            id: PoiId(id),
            name: name.into(),
            category,
            position,
            rating: 0.0,
            description: String::new(),
            media: None,
            favorite: false,
            visited: false,
        }
    }

    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = rating.clamp(0.0, 5.0);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_media(mut self, media: impl Into<String>) -> Self {
        self.media = Some(media.into());
        self
    }
}
