//! Category-based visibility filtering

use crate::poi::{Category, PointOfInterest};
use fxhash::FxHashSet;
use serde::Serialize;

/// The set of categories currently shown on the map.
///
/// Starts with every known category visible. Toggling is pure (it returns a
/// new set), so the engine can treat visibility as replaceable state rather
/// than something mutated in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryVisibility {
    visible: FxHashSet<Category>,
}

impl CategoryVisibility {
    /// All categories visible
    pub fn all() -> Self {
        Self {
            visible: Category::ALL.iter().copied().collect(),
        }
    }

    /// No categories visible. A legal state: the map simply shows no markers.
    pub fn none() -> Self {
        Self {
            visible: FxHashSet::default(),
        }
    }

    /// Returns a new set with `category` added if absent, removed if present
    pub fn toggled(&self, category: Category) -> Self {
        let mut visible = self.visible.clone();
        if !visible.insert(category) {
            visible.remove(&category);
        }
        Self { visible }
    }

    pub fn contains(&self, category: Category) -> bool {
        self.visible.contains(&category)
    }

    pub fn is_empty(&self) -> bool {
        self.visible.is_empty()
    }

    pub fn len(&self) -> usize {
        self.visible.len()
    }
}

impl Default for CategoryVisibility {
    fn default() -> Self {
        Self::all()
    }
}

/// Filters POIs down to the visible categories.
///
/// Pure and order-preserving: the output keeps the relative order of the
/// input sequence.
pub fn visible_pois<'a, I>(all_pois: I, visibility: &CategoryVisibility) -> Vec<&'a PointOfInterest>
where
    I: IntoIterator<Item = &'a PointOfInterest>,
{
    all_pois
        .into_iter()
        .filter(|poi| visibility.contains(poi.category))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geo::LatLng;
    use crate::poi::PointOfInterest;

    fn sample() -> Vec<PointOfInterest> {
        vec![
            PointOfInterest::new(1, "Vondelpark", Category::Park, LatLng::new(52.3579, 4.8686)),
            PointOfInterest::new(2, "Foodhallen", Category::Restaurant, LatLng::new(52.3673, 4.8686)),
            PointOfInterest::new(3, "De Bijenkorf", Category::Shopping, LatLng::new(52.3739, 4.8935)),
        ]
    }

    #[test]
    fn filters_to_visible_categories() {
        let pois = sample();
        let visibility = CategoryVisibility::none()
            .toggled(Category::Park)
            .toggled(Category::Restaurant);

        let visible = visible_pois(&pois, &visibility);
        let names: Vec<_> = visible.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Vondelpark", "Foodhallen"]);
    }

    #[test]
    fn toggle_twice_restores_the_set() {
        let visibility = CategoryVisibility::all();
        let roundtrip = visibility.toggled(Category::Park).toggled(Category::Park);
        assert_eq!(visibility, roundtrip);
    }

    #[test]
    fn all_off_yields_empty_visible_set() {
        let pois = sample();
        let mut visibility = CategoryVisibility::all();
        for category in Category::ALL {
            visibility = visibility.toggled(category);
        }

        assert!(visibility.is_empty());
        assert!(visible_pois(&pois, &visibility).is_empty());

        // Toggling everything back on restores the original visible set,
        // regardless of toggle order
        for category in Category::ALL.iter().rev() {
            visibility = visibility.toggled(*category);
        }
        assert_eq!(visible_pois(&pois, &visibility).len(), 3);
    }

    #[test]
    fn filter_preserves_source_order() {
        let pois = sample();
        let visible = visible_pois(&pois, &CategoryVisibility::all());
        let ids: Vec<_> = visible.iter().map(|p| p.id.0).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }
}
