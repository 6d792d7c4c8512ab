use super::*;
use crate::render::SelectedRow;
use async_trait::async_trait;
use shared::{
    domain::{CityDistance, Food, FoodId},
    protocol::{CityFoodResponse, CityWithFood},
};
use storage::MemorySlotStore;

#[derive(Default)]
struct RecordingRenderer {
    available: Vec<Vec<String>>,
    selected: Vec<Vec<String>>,
    dragging_rows: Vec<Vec<bool>>,
    indicator: Vec<Option<usize>>,
}

impl RenderAdapter for RecordingRenderer {
    fn render_available(&mut self, cities: &[City]) {
        self.available
            .push(cities.iter().map(|c| c.name.clone()).collect());
    }

    fn render_selected(&mut self, rows: &[SelectedRow]) {
        self.selected.push(rows.iter().map(SelectedRow::label).collect());
        self.dragging_rows
            .push(rows.iter().map(|row| row.dragging).collect());
    }

    fn render_drag_indicator(&mut self, dragging: Option<usize>) {
        self.indicator.push(dragging);
    }
}

struct StaticCatalog {
    cities: Vec<City>,
    reachable: bool,
}

impl StaticCatalog {
    fn unreachable() -> Self {
        Self {
            cities: Vec::new(),
            reachable: false,
        }
    }

    fn check(&self) -> Result<(), PlannerError> {
        if self.reachable {
            Ok(())
        } else {
            Err(PlannerError::NotFound { city_id: CityId(0) })
        }
    }
}

#[async_trait]
impl CatalogSource for StaticCatalog {
    async fn check_health(&self) -> Result<String, PlannerError> {
        self.check()?;
        Ok("API is running".into())
    }

    async fn list_cities(&self) -> Result<Vec<City>, PlannerError> {
        self.check()?;
        Ok(self.cities.clone())
    }

    async fn list_cities_with_food(&self) -> Result<Vec<CityWithFood>, PlannerError> {
        self.check()?;
        Ok(Vec::new())
    }

    async fn city_food(&self, city_id: CityId) -> Result<CityFoodResponse, PlannerError> {
        self.check()?;
        Ok(CityFoodResponse {
            city: city_id.to_string(),
            food: vec![Food {
                id: FoodId(1),
                city_id,
                name: "Pizza".into(),
                price: 10,
            }],
        })
    }

    async fn list_distances(&self) -> Result<Vec<CityDistance>, PlannerError> {
        self.check()?;
        Ok(Vec::new())
    }
}

fn catalog() -> Vec<City> {
    vec![
        City::new(1, "New York"),
        City::new(2, "London"),
        City::new(3, "Tokyo"),
    ]
}

fn session() -> PlanningSession<RecordingRenderer> {
    PlanningSession::with_catalog(catalog(), RecordingRenderer::default())
}

fn ids(cities: &[City]) -> Vec<i64> {
    cities.iter().map(|c| c.id.0).collect()
}

#[test]
fn scenario_select_two_then_drag_second_to_top() {
    let mut session = session();
    session.move_to_selected(&City::new(2, "London"));
    assert_eq!(ids(session.available()), vec![1, 3]);
    assert_eq!(ids(session.selected()), vec![2]);

    session.move_to_selected(&City::new(1, "New York"));
    assert_eq!(ids(session.available()), vec![3]);
    assert_eq!(ids(session.selected()), vec![2, 1]);

    assert_eq!(
        session.reorder(1, 0),
        DropOutcome::Reordered { from: 1, to: 0 }
    );
    assert_eq!(ids(session.selected()), vec![1, 2]);
}

#[test]
fn every_move_re_renders_both_lists() {
    let mut session = session();
    session.select_id(CityId(3));
    session.deselect_id(CityId(3));

    let renderer = session.into_renderer();
    // Initial render plus one per move.
    assert_eq!(renderer.available.len(), 3);
    assert_eq!(renderer.selected.len(), 3);
    assert_eq!(renderer.selected[1], vec!["1. Tokyo".to_string()]);
    assert_eq!(
        renderer.available[2],
        vec!["New York".to_string(), "London".to_string(), "Tokyo".to_string()]
    );
}

#[test]
fn unchanged_moves_do_not_render() {
    let mut session = session();
    session.select_id(CityId(2));
    assert_eq!(session.select_id(CityId(2)), MoveOutcome::Unchanged);
    assert_eq!(session.deselect_id(CityId(1)), MoveOutcome::Unchanged);
    assert_eq!(session.renderer().available.len(), 2);
}

#[test]
fn reorder_re_renders_ordinals_in_new_order() {
    let mut session = session();
    for id in [1, 2, 3] {
        session.select_id(CityId(id));
    }

    assert!(session.drag_start(2));
    assert!(session.drag_over(0));
    assert_eq!(
        session.drop_on(0),
        DropOutcome::Reordered { from: 2, to: 0 }
    );
    assert_eq!(session.drag_end(), GestureEnd::Committed);

    let renderer = session.renderer();
    assert_eq!(
        renderer.selected.last().expect("render"),
        &vec![
            "1. Tokyo".to_string(),
            "2. New York".to_string(),
            "3. London".to_string()
        ]
    );
    assert_eq!(renderer.indicator, vec![Some(2), None]);
}

#[test]
fn drag_flag_follows_the_gesture_and_clears_after_drop() {
    let mut session = session();
    for id in [1, 2, 3] {
        session.select_id(CityId(id));
    }

    assert!(session.drag_start(2));
    assert_eq!(
        session.renderer().dragging_rows.last().expect("render"),
        &vec![false, false, true]
    );

    session.drag_over(0);
    session.drop_on(0);
    session.drag_end();
    let last = session.renderer().dragging_rows.last().expect("render");
    assert!(last.iter().all(|dragging| !dragging), "stale flag: {last:?}");
}

#[test]
fn dropping_a_row_on_itself_only_clears_the_indicator() {
    let mut session = session();
    session.select_id(CityId(1));
    session.select_id(CityId(2));

    assert_eq!(session.reorder(0, 0), DropOutcome::Unchanged);
    assert_eq!(ids(session.selected()), vec![1, 2]);
    let renderer = session.renderer();
    assert_eq!(
        renderer.selected.last().expect("render"),
        &vec!["1. New York".to_string(), "2. London".to_string()]
    );
    assert_eq!(
        renderer.dragging_rows.last().expect("render"),
        &vec![false, false]
    );
    assert_eq!(renderer.indicator, vec![Some(0), None]);
}

#[test]
fn abandoned_drag_keeps_order() {
    let mut session = session();
    session.select_id(CityId(1));
    session.select_id(CityId(2));

    assert!(session.drag_start(0));
    assert_eq!(session.drag_end(), GestureEnd::Abandoned);
    assert_eq!(ids(session.selected()), vec![1, 2]);
    assert_eq!(session.drag().phase(), GesturePhase::Idle);
}

#[test]
fn moving_a_city_cancels_a_pending_drag() {
    let mut session = session();
    session.select_id(CityId(1));
    session.select_id(CityId(2));
    assert!(session.drag_start(1));

    session.deselect_id(CityId(1));
    assert_eq!(session.drop_on(0), DropOutcome::Rejected);
    assert_eq!(ids(session.selected()), vec![2]);

    assert_eq!(session.drag_end(), GestureEnd::NoGesture);
    let renderer = session.renderer();
    assert_eq!(renderer.indicator, vec![Some(1), None]);
    assert_eq!(renderer.dragging_rows.last().expect("render"), &vec![false]);
}

#[tokio::test]
async fn reload_during_a_drag_clears_the_indicator() {
    let source = StaticCatalog {
        cities: catalog(),
        reachable: true,
    };
    let mut session = session();
    session.select_id(CityId(1));
    assert!(session.drag_start(0));

    session.load(&source).await.expect("load");
    assert_eq!(session.drag().phase(), GesturePhase::Idle);
    assert_eq!(session.renderer().indicator, vec![Some(0), None]);
}

#[tokio::test]
async fn submit_persists_selected_cities_in_itinerary_order() {
    let mut session = session();
    session.select_id(CityId(2));
    session.select_id(CityId(1));

    let store = MemorySlotStore::new();
    let submission = session.submit(&store).await.expect("submit");
    assert_eq!(submission.next, Stage::Summary);
    assert_eq!(submission.city_count, 2);

    let saved = store
        .read_slot("selectedCities")
        .await
        .expect("read")
        .expect("slot written");
    assert_eq!(
        saved,
        r#"[{"id":2,"name":"London"},{"id":1,"name":"New York"}]"#
    );
    assert_eq!(submission.payload, saved);
}

#[tokio::test]
async fn submit_twice_writes_the_same_value() {
    let mut session = session();
    session.select_id(CityId(3));
    let store = MemorySlotStore::new();

    let first = session.submit(&store).await.expect("first");
    let second = session.submit(&store).await.expect("second");
    assert_eq!(first, second);
    assert_eq!(store.len().await, 1);
}

#[tokio::test]
async fn submit_overwrites_a_previous_selection() {
    let store = MemorySlotStore::new();
    store
        .write_slot("selectedCities", r#"[{"id":9,"name":"Old"}]"#)
        .await
        .expect("seed");

    let mut session = session();
    session.select_id(CityId(1));
    session.submit(&store).await.expect("submit");
    assert_eq!(
        store.read_slot("selectedCities").await.expect("read").as_deref(),
        Some(r#"[{"id":1,"name":"New York"}]"#)
    );
}

#[tokio::test]
async fn empty_submit_is_refused_without_writing() {
    let store = MemorySlotStore::new();
    store
        .write_slot("selectedCities", r#"[{"id":9,"name":"Old"}]"#)
        .await
        .expect("seed");

    let session = session();
    let err = session.submit(&store).await.expect_err("should refuse");
    assert!(matches!(err, PlannerError::EmptySelection));
    assert_eq!(
        err.user_message(),
        "Please select at least one city before submitting!"
    );
    assert_eq!(
        store.read_slot("selectedCities").await.expect("read").as_deref(),
        Some(r#"[{"id":9,"name":"Old"}]"#)
    );
}

#[tokio::test]
async fn load_seeds_available_from_catalog_source() {
    let source = StaticCatalog {
        cities: catalog(),
        reachable: true,
    };
    let mut session = PlanningSession::new(RecordingRenderer::default());
    session.load(&source).await.expect("load");
    assert_eq!(ids(session.available()), vec![1, 2, 3]);
    assert!(session.selected().is_empty());
    assert_eq!(session.renderer().available.len(), 1);
}

#[tokio::test]
async fn failed_load_leaves_the_view_empty() {
    let mut session = PlanningSession::new(RecordingRenderer::default());
    let err = session
        .load(&StaticCatalog::unreachable())
        .await
        .expect_err("should fail");
    assert!(matches!(err, PlannerError::NotFound { .. }));
    assert!(session.available().is_empty());
    assert!(session.selected().is_empty());
    assert!(session.renderer().available.is_empty());
}
