use shared::domain::{City, CityId};
use tracing::debug;

use crate::ordering::move_element;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    Moved,
    Unchanged,
}

/// Available/selected partition of the catalog loaded for one session.
///
/// Every catalog city is in exactly one of the two lists. Moves are keyed by
/// city id and are no-ops when the city is not in the source list, so a stale
/// double click can never duplicate a city.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CityLists {
    available: Vec<City>,
    selected: Vec<City>,
}

impl CityLists {
    pub fn seeded(catalog: Vec<City>) -> Self {
        Self {
            available: catalog,
            selected: Vec::new(),
        }
    }

    pub fn available(&self) -> &[City] {
        &self.available
    }

    pub fn selected(&self) -> &[City] {
        &self.selected
    }

    pub fn is_selected(&self, city_id: CityId) -> bool {
        self.selected.iter().any(|c| c.id == city_id)
    }

    pub fn find_available(&self, city_id: CityId) -> Option<&City> {
        self.available.iter().find(|c| c.id == city_id)
    }

    pub fn find_selected(&self, city_id: CityId) -> Option<&City> {
        self.selected.iter().find(|c| c.id == city_id)
    }

    pub fn move_to_selected(&mut self, city: &City) -> MoveOutcome {
        match take_by_id(&mut self.available, city.id) {
            Some(taken) => {
                self.selected.push(taken);
                MoveOutcome::Moved
            }
            None => {
                debug!(city_id = city.id.0, "select ignored; city not available");
                MoveOutcome::Unchanged
            }
        }
    }

    pub fn move_to_available(&mut self, city: &City) -> MoveOutcome {
        match take_by_id(&mut self.selected, city.id) {
            Some(taken) => {
                self.available.push(taken);
                MoveOutcome::Moved
            }
            None => {
                debug!(city_id = city.id.0, "deselect ignored; city not selected");
                MoveOutcome::Unchanged
            }
        }
    }

    pub fn reorder_selected(&mut self, from: usize, to: usize) -> bool {
        move_element(&mut self.selected, from, to)
    }
}

fn take_by_id(cities: &mut Vec<City>, city_id: CityId) -> Option<City> {
    let index = cities.iter().position(|c| c.id == city_id)?;
    Some(cities.remove(index))
}

#[cfg(test)]
#[path = "tests/partition_tests.rs"]
mod tests;
