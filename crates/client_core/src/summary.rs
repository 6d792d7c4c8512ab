use shared::{
    domain::{City, CityDistance, CityId},
    protocol::SELECTED_CITIES_KEY,
};
use storage::SlotStore;

use crate::error::PlannerError;

/// Reads the itinerary saved by the planning stage. No saved list reads as
/// an empty itinerary.
pub async fn load_itinerary(store: &dyn SlotStore) -> Result<Vec<City>, PlannerError> {
    match store.read_slot(SELECTED_CITIES_KEY).await? {
        Some(raw) => Ok(serde_json::from_str(&raw)?),
        None => Ok(Vec::new()),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stop {
    pub ordinal: usize,
    pub city: City,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Leg {
    pub from: CityId,
    pub to: CityId,
    pub distance: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItinerarySummary {
    pub stops: Vec<Stop>,
    pub legs: Vec<Leg>,
}

impl ItinerarySummary {
    pub fn build(cities: &[City], distances: &[CityDistance]) -> Self {
        let stops = cities
            .iter()
            .enumerate()
            .map(|(index, city)| Stop {
                ordinal: index + 1,
                city: city.clone(),
            })
            .collect();
        let legs = cities
            .windows(2)
            .map(|pair| Leg {
                from: pair[0].id,
                to: pair[1].id,
                distance: distances
                    .iter()
                    .find(|d| d.connects(pair[0].id, pair[1].id))
                    .map(|d| d.distance),
            })
            .collect();
        Self { stops, legs }
    }

    pub fn total_known_distance(&self) -> u64 {
        self.legs
            .iter()
            .filter_map(|leg| leg.distance)
            .map(u64::from)
            .sum()
    }

    pub fn has_unknown_legs(&self) -> bool {
        self.legs.iter().any(|leg| leg.distance.is_none())
    }
}

#[cfg(test)]
#[path = "tests/summary_tests.rs"]
mod tests;
