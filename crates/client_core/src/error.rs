use shared::domain::CityId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlannerError {
    #[error("invalid server url '{url}': {source}")]
    InvalidServerUrl {
        url: String,
        source: url::ParseError,
    },
    #[error("transport failure talking to {server_url}: {source}")]
    Transport {
        server_url: String,
        source: reqwest::Error,
    },
    #[error("city {city_id} not found")]
    NotFound { city_id: CityId },
    #[error("no cities selected")]
    EmptySelection,
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
    #[error("persisted itinerary is malformed: {0}")]
    Decode(#[from] serde_json::Error),
}

impl PlannerError {
    /// Text shown to the user in the blocking alert for this failure.
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidServerUrl { url, .. } => format!("Server address '{url}' is not valid."),
            Self::Transport { server_url, .. } => {
                format!("Cannot connect to API. Make sure the server is running on {server_url}")
            }
            Self::NotFound { .. } => "City not found".to_string(),
            Self::EmptySelection => "Please select at least one city before submitting!".to_string(),
            Self::Storage(_) => "Could not save your list. Please try again.".to_string(),
            Self::Decode(_) => "Your saved itinerary could not be read.".to_string(),
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. } | Self::InvalidServerUrl { .. })
    }
}
