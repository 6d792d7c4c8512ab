use serde::{Deserialize, Serialize};

use crate::domain::{City, CityDistance, CityId, Food};

pub const SELECTED_CITIES_KEY: &str = "selectedCities";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CitiesResponse {
    pub cities: Vec<City>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CityWithFood {
    pub id: CityId,
    pub name: String,
    pub food: Vec<Food>,
}

impl CityWithFood {
    pub fn city(&self) -> City {
        City {
            id: self.id,
            name: self.name.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CitiesWithFoodResponse {
    pub cities: Vec<CityWithFood>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CityFoodResponse {
    pub city: String,
    pub food: Vec<Food>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DistancesResponse {
    pub distances: Vec<CityDistance>,
    pub count: usize,
}
