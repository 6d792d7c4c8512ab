use std::{fs, path::Path, sync::Arc};

use anyhow::Context;
use serde::Deserialize;
use shared::{
    domain::{City, CityDistance, CityId, Food, FoodId},
    error::{ApiError, ErrorCode},
    protocol::{
        CitiesResponse, CitiesWithFoodResponse, CityFoodResponse, CityWithFood, DistancesResponse,
    },
};
use tracing::info;

/// Fixed, read-only set of cities, foods and distances.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub cities: Vec<City>,
    #[serde(default)]
    pub foods: Vec<Food>,
    #[serde(default)]
    pub distances: Vec<CityDistance>,
}

impl Catalog {
    pub fn builtin() -> Self {
        let food = |id: i64, city_id: i64, name: &str, price: u32| Food {
            id: FoodId(id),
            city_id: CityId(city_id),
            name: name.to_string(),
            price,
        };
        let leg = |from: i64, to: i64, distance: u32| CityDistance {
            from_city_id: CityId(from),
            to_city_id: CityId(to),
            distance,
        };

        Self {
            cities: vec![
                City::new(1, "New York"),
                City::new(2, "London"),
                City::new(3, "Tokyo"),
            ],
            foods: vec![
                food(1, 1, "Pizza", 10),
                food(2, 1, "Bagel", 5),
                food(3, 2, "Fish & Chips", 12),
                food(4, 2, "Tea", 3),
                food(5, 3, "Sushi", 15),
                food(6, 3, "Ramen", 8),
            ],
            distances: vec![leg(1, 2, 5570), leg(1, 3, 10850), leg(2, 3, 9560)],
        }
    }

    pub fn from_toml_str(raw: &str) -> anyhow::Result<Self> {
        toml::from_str(raw).context("catalog file is not valid TOML")
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read catalog file '{}'", path.display()))?;
        let catalog = Self::from_toml_str(&raw)?;
        info!(
            path = %path.display(),
            cities = catalog.cities.len(),
            foods = catalog.foods.len(),
            "catalog loaded from file"
        );
        Ok(catalog)
    }

    pub fn city(&self, city_id: CityId) -> Option<&City> {
        self.cities.iter().find(|city| city.id == city_id)
    }

    pub fn foods_for(&self, city_id: CityId) -> Vec<Food> {
        self.foods
            .iter()
            .filter(|food| food.city_id == city_id)
            .cloned()
            .collect()
    }
}

#[derive(Clone)]
pub struct CatalogContext {
    pub catalog: Arc<Catalog>,
}

impl CatalogContext {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog: Arc::new(catalog),
        }
    }
}

pub fn health_message() -> &'static str {
    "API is running"
}

pub fn list_cities(ctx: &CatalogContext) -> CitiesResponse {
    CitiesResponse {
        cities: ctx.catalog.cities.clone(),
    }
}

pub fn list_cities_with_food(ctx: &CatalogContext) -> CitiesWithFoodResponse {
    CitiesWithFoodResponse {
        cities: ctx
            .catalog
            .cities
            .iter()
            .map(|city| CityWithFood {
                id: city.id,
                name: city.name.clone(),
                food: ctx.catalog.foods_for(city.id),
            })
            .collect(),
    }
}

pub fn foods_for_city(ctx: &CatalogContext, city_id: CityId) -> Result<CityFoodResponse, ApiError> {
    let city = ctx
        .catalog
        .city(city_id)
        .ok_or_else(|| ApiError::new(ErrorCode::NotFound, "City not found"))?;
    Ok(CityFoodResponse {
        city: city.name.clone(),
        food: ctx.catalog.foods_for(city_id),
    })
}

pub fn list_distances(ctx: &CatalogContext) -> DistancesResponse {
    let distances = ctx.catalog.distances.clone();
    DistancesResponse {
        count: distances.len(),
        distances,
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
