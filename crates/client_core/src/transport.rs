use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use shared::{
    domain::{City, CityDistance, CityId},
    protocol::{CitiesResponse, CitiesWithFoodResponse, CityFoodResponse, CityWithFood, DistancesResponse},
};
use tracing::{debug, warn};
use url::Url;

use crate::error::PlannerError;

pub const DEFAULT_SERVER_URL: &str = "http://localhost:3001";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Read-only view of the catalog the planner pages consume.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn check_health(&self) -> Result<String, PlannerError>;
    async fn list_cities(&self) -> Result<Vec<City>, PlannerError>;
    async fn list_cities_with_food(&self) -> Result<Vec<CityWithFood>, PlannerError>;
    async fn city_food(&self, city_id: CityId) -> Result<CityFoodResponse, PlannerError>;
    async fn list_distances(&self) -> Result<Vec<CityDistance>, PlannerError>;
}

#[derive(Clone)]
pub struct CatalogClient {
    http: Client,
    server_url: String,
}

impl CatalogClient {
    pub fn new(server_url: &str, timeout: Duration) -> Result<Self, PlannerError> {
        let parsed = Url::parse(server_url).map_err(|source| PlannerError::InvalidServerUrl {
            url: server_url.to_string(),
            source,
        })?;
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|source| PlannerError::Transport {
                server_url: server_url.to_string(),
                source,
            })?;
        Ok(Self {
            http,
            server_url: parsed.as_str().trim_end_matches('/').to_string(),
        })
    }

    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    fn transport(&self, source: reqwest::Error) -> PlannerError {
        warn!(server_url = %self.server_url, error = %source, "catalog request failed");
        PlannerError::Transport {
            server_url: self.server_url.clone(),
            source,
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, PlannerError> {
        debug!(path, "catalog GET");
        self.http
            .get(format!("{}{path}", self.server_url))
            .send()
            .await
            .map_err(|e| self.transport(e))?
            .error_for_status()
            .map_err(|e| self.transport(e))?
            .json()
            .await
            .map_err(|e| self.transport(e))
    }
}

#[async_trait]
impl CatalogSource for CatalogClient {
    async fn check_health(&self) -> Result<String, PlannerError> {
        self.http
            .get(format!("{}/health", self.server_url))
            .send()
            .await
            .map_err(|e| self.transport(e))?
            .error_for_status()
            .map_err(|e| self.transport(e))?
            .text()
            .await
            .map_err(|e| self.transport(e))
    }

    async fn list_cities(&self) -> Result<Vec<City>, PlannerError> {
        let body: CitiesResponse = self.get_json("/api/cities").await?;
        Ok(body.cities)
    }

    async fn list_cities_with_food(&self) -> Result<Vec<CityWithFood>, PlannerError> {
        let body: CitiesWithFoodResponse = self.get_json("/api/cities/food").await?;
        Ok(body.cities)
    }

    async fn city_food(&self, city_id: CityId) -> Result<CityFoodResponse, PlannerError> {
        let response = self
            .http
            .get(format!("{}/api/cities/{}/food", self.server_url, city_id.0))
            .send()
            .await
            .map_err(|e| self.transport(e))?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(PlannerError::NotFound { city_id });
        }
        response
            .error_for_status()
            .map_err(|e| self.transport(e))?
            .json()
            .await
            .map_err(|e| self.transport(e))
    }

    async fn list_distances(&self) -> Result<Vec<CityDistance>, PlannerError> {
        let body: DistancesResponse = self.get_json("/api/cities/distances").await?;
        Ok(body.distances)
    }
}
