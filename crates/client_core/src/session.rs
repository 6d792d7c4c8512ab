use shared::{
    domain::{City, CityId},
    protocol::SELECTED_CITIES_KEY,
};
use storage::SlotStore;
use tracing::{error, info};

use crate::{
    error::PlannerError,
    ordering::{DragController, DropOutcome, GestureEnd, GesturePhase},
    partition::{CityLists, MoveOutcome},
    render::{selected_rows, RenderAdapter},
    transport::CatalogSource,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Summary,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub key: &'static str,
    pub payload: String,
    pub city_count: usize,
    pub next: Stage,
}

/// State for one trip-planning view: the city partition, the active drag
/// gesture and the renderer that mirrors them.
pub struct PlanningSession<R: RenderAdapter> {
    lists: CityLists,
    drag: DragController,
    renderer: R,
}

impl<R: RenderAdapter> PlanningSession<R> {
    pub fn new(renderer: R) -> Self {
        Self {
            lists: CityLists::default(),
            drag: DragController::new(),
            renderer,
        }
    }

    pub fn with_catalog(catalog: Vec<City>, renderer: R) -> Self {
        let mut session = Self::new(renderer);
        session.lists = CityLists::seeded(catalog);
        session.render_all();
        session
    }

    /// Seeds the available list from the catalog. On failure both lists stay
    /// empty.
    pub async fn load(&mut self, source: &dyn CatalogSource) -> Result<(), PlannerError> {
        match fetch_catalog(source).await {
            Ok(cities) => {
                info!(cities = cities.len(), "planning session loaded");
                self.cancel_drag();
                self.lists = CityLists::seeded(cities);
                self.render_all();
                Ok(())
            }
            Err(err) => {
                error!(error = %err, "API connection failed");
                self.lists = CityLists::default();
                Err(err)
            }
        }
    }

    pub fn lists(&self) -> &CityLists {
        &self.lists
    }

    pub fn available(&self) -> &[City] {
        self.lists.available()
    }

    pub fn selected(&self) -> &[City] {
        self.lists.selected()
    }

    pub fn drag(&self) -> &DragController {
        &self.drag
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn into_renderer(self) -> R {
        self.renderer
    }

    pub fn move_to_selected(&mut self, city: &City) -> MoveOutcome {
        let outcome = self.lists.move_to_selected(city);
        self.after_move(outcome);
        outcome
    }

    pub fn move_to_available(&mut self, city: &City) -> MoveOutcome {
        let outcome = self.lists.move_to_available(city);
        self.after_move(outcome);
        outcome
    }

    pub fn select_id(&mut self, city_id: CityId) -> MoveOutcome {
        match self.lists.find_available(city_id).cloned() {
            Some(city) => self.move_to_selected(&city),
            None => MoveOutcome::Unchanged,
        }
    }

    pub fn deselect_id(&mut self, city_id: CityId) -> MoveOutcome {
        match self.lists.find_selected(city_id).cloned() {
            Some(city) => self.move_to_available(&city),
            None => MoveOutcome::Unchanged,
        }
    }

    pub fn drag_start(&mut self, index: usize) -> bool {
        let started = self.drag.begin(index, self.lists.selected().len());
        if started {
            self.renderer.render_drag_indicator(Some(index));
            self.render_selected();
        }
        started
    }

    pub fn drag_over(&self, index: usize) -> bool {
        self.drag.hover(index, self.lists.selected().len())
    }

    pub fn drop_on(&mut self, index: usize) -> DropOutcome {
        let outcome = self.drag.drop_on(index, self.lists.selected().len());
        if let DropOutcome::Reordered { from, to } = outcome {
            self.lists.reorder_selected(from, to);
            info!(from, to, "itinerary reordered");
            self.render_selected();
        }
        outcome
    }

    pub fn drag_end(&mut self) -> GestureEnd {
        let ended = self.drag.end();
        if ended != GestureEnd::NoGesture {
            self.renderer.render_drag_indicator(None);
            self.render_selected();
        }
        ended
    }

    /// Drag `from` onto `to` as one complete gesture.
    pub fn reorder(&mut self, from: usize, to: usize) -> DropOutcome {
        if !self.drag_start(from) {
            return DropOutcome::Rejected;
        }
        let outcome = if self.drag_over(to) {
            self.drop_on(to)
        } else {
            DropOutcome::Rejected
        };
        self.drag_end();
        outcome
    }

    /// Persists the selected list under `selectedCities` and hands over to the
    /// summary stage. An empty selection is refused without touching `store`.
    pub async fn submit(&self, store: &dyn SlotStore) -> Result<Submission, PlannerError> {
        let selected = self.lists.selected();
        if selected.is_empty() {
            return Err(PlannerError::EmptySelection);
        }

        let payload = serde_json::to_string(selected)?;
        store.write_slot(SELECTED_CITIES_KEY, &payload).await?;
        info!(cities = selected.len(), "saved selected cities");

        Ok(Submission {
            key: SELECTED_CITIES_KEY,
            payload,
            city_count: selected.len(),
            next: Stage::Summary,
        })
    }

    fn after_move(&mut self, outcome: MoveOutcome) {
        if outcome == MoveOutcome::Moved {
            // Row indices shift on every move, so a pending payload is stale.
            self.cancel_drag();
            self.render_all();
        }
    }

    fn cancel_drag(&mut self) {
        if self.drag.phase() != GesturePhase::Idle {
            self.drag = DragController::new();
            self.renderer.render_drag_indicator(None);
        }
    }

    fn render_all(&mut self) {
        self.renderer.render_available(self.lists.available());
        self.render_selected();
    }

    fn render_selected(&mut self) {
        let rows = selected_rows(self.lists.selected(), self.drag.dragging_index());
        self.renderer.render_selected(&rows);
    }
}

async fn fetch_catalog(source: &dyn CatalogSource) -> Result<Vec<City>, PlannerError> {
    source.check_health().await?;
    info!("API is running");
    source.list_cities().await
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
