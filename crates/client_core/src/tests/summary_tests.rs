use super::*;
use storage::{MemorySlotStore, Storage};

fn distances() -> Vec<CityDistance> {
    vec![
        CityDistance {
            from_city_id: CityId(1),
            to_city_id: CityId(2),
            distance: 5570,
        },
        CityDistance {
            from_city_id: CityId(2),
            to_city_id: CityId(3),
            distance: 9560,
        },
    ]
}

#[test]
fn summary_numbers_stops_and_measures_legs() {
    let cities = vec![
        City::new(1, "New York"),
        City::new(2, "London"),
        City::new(3, "Tokyo"),
    ];
    let summary = ItinerarySummary::build(&cities, &distances());

    let ordinals: Vec<_> = summary.stops.iter().map(|s| s.ordinal).collect();
    assert_eq!(ordinals, vec![1, 2, 3]);
    assert_eq!(summary.legs.len(), 2);
    assert_eq!(summary.legs[0].distance, Some(5570));
    assert_eq!(summary.legs[1].distance, Some(9560));
    assert_eq!(summary.total_known_distance(), 15130);
    assert!(!summary.has_unknown_legs());
}

#[test]
fn legs_match_distances_in_either_direction() {
    let cities = vec![City::new(3, "Tokyo"), City::new(2, "London")];
    let summary = ItinerarySummary::build(&cities, &distances());
    assert_eq!(summary.legs[0].distance, Some(9560));
}

#[test]
fn missing_distance_is_reported_as_unknown() {
    let cities = vec![City::new(1, "New York"), City::new(3, "Tokyo")];
    let summary = ItinerarySummary::build(&cities, &distances());
    assert_eq!(
        summary.legs,
        vec![Leg {
            from: CityId(1),
            to: CityId(3),
            distance: None
        }]
    );
    assert!(summary.has_unknown_legs());
    assert_eq!(summary.total_known_distance(), 0);
}

#[test]
fn total_distance_does_not_overflow_on_large_legs() {
    let cities = vec![City::new(1, "A"), City::new(2, "B"), City::new(3, "C")];
    let distances = vec![
        CityDistance {
            from_city_id: CityId(1),
            to_city_id: CityId(2),
            distance: u32::MAX,
        },
        CityDistance {
            from_city_id: CityId(2),
            to_city_id: CityId(3),
            distance: u32::MAX,
        },
    ];
    let summary = ItinerarySummary::build(&cities, &distances);
    assert_eq!(summary.total_known_distance(), 2 * u64::from(u32::MAX));
}

#[test]
fn single_city_has_no_legs() {
    let summary = ItinerarySummary::build(&[City::new(2, "London")], &distances());
    assert_eq!(summary.stops.len(), 1);
    assert!(summary.legs.is_empty());
}

#[tokio::test]
async fn loads_itinerary_saved_under_selected_cities() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    storage
        .write_slot(
            "selectedCities",
            r#"[{"id":2,"name":"London"},{"id":1,"name":"New York"}]"#,
        )
        .await
        .expect("write");

    let itinerary = load_itinerary(&storage).await.expect("load");
    assert_eq!(
        itinerary,
        vec![City::new(2, "London"), City::new(1, "New York")]
    );
}

#[tokio::test]
async fn missing_slot_is_an_empty_itinerary() {
    let store = MemorySlotStore::new();
    assert!(load_itinerary(&store).await.expect("load").is_empty());
}

#[tokio::test]
async fn malformed_slot_is_a_decode_error() {
    let store = MemorySlotStore::new();
    store
        .write_slot("selectedCities", "not json")
        .await
        .expect("write");
    let err = load_itinerary(&store).await.expect_err("should fail");
    assert!(matches!(err, PlannerError::Decode(_)));
}
