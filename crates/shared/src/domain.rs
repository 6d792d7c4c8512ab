use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_newtype!(CityId);
id_newtype!(FoodId);

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct City {
    pub id: CityId,
    pub name: String,
}

impl City {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id: CityId(id),
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Food {
    pub id: FoodId,
    pub city_id: CityId,
    pub name: String,
    pub price: u32,
}

/// Undirected distance between two cities, in kilometers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CityDistance {
    pub from_city_id: CityId,
    pub to_city_id: CityId,
    pub distance: u32,
}

impl CityDistance {
    pub fn connects(&self, a: CityId, b: CityId) -> bool {
        (self.from_city_id == a && self.to_city_id == b)
            || (self.from_city_id == b && self.to_city_id == a)
    }
}
