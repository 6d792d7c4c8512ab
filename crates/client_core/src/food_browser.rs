use shared::domain::{City, CityId, Food};
use tracing::info;

use crate::{error::PlannerError, transport::CatalogSource};

pub const NO_FOODS_LINE: &str = "No foods found";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Chevron {
    Up,
    Down,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoodPanel {
    city: City,
    open: bool,
    lines: Vec<String>,
}

impl FoodPanel {
    fn closed(city: City) -> Self {
        Self {
            city,
            open: false,
            lines: Vec::new(),
        }
    }

    pub fn city(&self) -> &City {
        &self.city
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn chevron(&self) -> Chevron {
        if self.open {
            Chevron::Up
        } else {
            Chevron::Down
        }
    }

    /// Lines shown under the city while the panel is open.
    pub fn lines(&self) -> &[String] {
        if self.open {
            &self.lines[..]
        } else {
            &[]
        }
    }
}

pub fn food_line(food: &Food) -> String {
    format!("{} - ${}", food.name, food.price)
}

/// Collapsible per-city food listing for the home page.
#[derive(Debug, Clone, Default)]
pub struct FoodBrowser {
    panels: Vec<FoodPanel>,
}

impl FoodBrowser {
    pub fn new(cities: Vec<City>) -> Self {
        Self {
            panels: cities.into_iter().map(FoodPanel::closed).collect(),
        }
    }

    pub async fn load(source: &dyn CatalogSource) -> Result<Self, PlannerError> {
        source.check_health().await?;
        let cities = source.list_cities_with_food().await?;
        info!(cities = cities.len(), "food browser loaded");
        Ok(Self::new(cities.iter().map(|c| c.city()).collect()))
    }

    pub fn panels(&self) -> &[FoodPanel] {
        &self.panels
    }

    pub fn panel(&self, city_id: CityId) -> Option<&FoodPanel> {
        self.panels.iter().find(|p| p.city.id == city_id)
    }

    /// Opens a closed panel, fetching its foods, or closes an open one.
    /// Returns whether the panel is open afterwards.
    pub async fn toggle(
        &mut self,
        city_id: CityId,
        source: &dyn CatalogSource,
    ) -> Result<bool, PlannerError> {
        let panel = self
            .panels
            .iter_mut()
            .find(|p| p.city.id == city_id)
            .ok_or(PlannerError::NotFound { city_id })?;

        if panel.open {
            panel.open = false;
            return Ok(false);
        }

        let response = source.city_food(city_id).await?;
        panel.lines = if response.food.is_empty() {
            vec![NO_FOODS_LINE.to_string()]
        } else {
            response.food.iter().map(food_line).collect()
        };
        panel.open = true;
        Ok(true)
    }
}

#[cfg(test)]
#[path = "tests/food_browser_tests.rs"]
mod tests;
