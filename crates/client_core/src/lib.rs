pub mod error;
pub mod food_browser;
pub mod ordering;
pub mod partition;
pub mod render;
pub mod session;
pub mod summary;
pub mod transport;

pub use error::PlannerError;
pub use food_browser::{Chevron, FoodBrowser, FoodPanel};
pub use ordering::{move_element, DragController, DropOutcome, GestureEnd, GesturePhase};
pub use partition::{CityLists, MoveOutcome};
pub use render::{selected_rows, NoopRenderer, RenderAdapter, SelectedRow};
pub use session::{PlanningSession, Stage, Submission};
pub use summary::{load_itinerary, ItinerarySummary, Leg, Stop};
pub use transport::{CatalogClient, CatalogSource, DEFAULT_REQUEST_TIMEOUT, DEFAULT_SERVER_URL};

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
