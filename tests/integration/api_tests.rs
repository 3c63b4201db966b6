//! API integration tests

use axum::http::StatusCode;
use serde_json::{json, Value};
use tripmap_server::repository::Collection;

use crate::common::{TableSearch, TestApp};

fn without_id(mut doc: Value) -> Value {
    if let Some(map) = doc.as_object_mut() {
        map.remove("_id");
    }
    doc
}

#[tokio::test]
async fn test_health_check() {
    let app = TestApp::new(TableSearch::default());
    let (status, body) = app.get("/api/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");

    let (status, body) = app.get("/api/ready").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ready");
}

#[tokio::test]
async fn test_get_list_is_null_when_empty() {
    let app = TestApp::new(TableSearch::default());
    let (status, body) = app.get("/api/list").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::Null);
}

#[tokio::test]
async fn test_save_list_replaces_previous_document() {
    let app = TestApp::new(TableSearch::default());
    let first = json!({ "travelList": ["A"], "cafeList": [], "days": {} });
    let second = json!({ "travelList": ["B", "C"], "cafeList": ["D"], "days": { "day1": ["B"] } });

    let (status, body) = app.post("/api/list", first).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["insertedId"].is_string());

    let (status, _) = app.post("/api/list", second.clone()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(app.store.count(Collection::TravelData), 1);

    let (_, body) = app.get("/api/list").await;
    assert!(body["_id"].is_string());
    assert_eq!(without_id(body), second);
}

#[tokio::test]
async fn test_save_rejects_non_object_body() {
    let app = TestApp::new(TableSearch::default());
    let (status, body) = app.post("/api/accommodations", json!(["not", "an", "object"])).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].is_string());
    assert_eq!(app.store.count(Collection::Accommodations), 0);
}

#[tokio::test]
async fn test_schedule_upserts_then_merges() {
    let app = TestApp::new(TableSearch::default());
    let day1 = json!([{ "place": "Airport", "arrival": "09:00", "departure": "09:30" }]);
    let day2 = json!([{ "place": "Udo", "arrival": "10:00AM", "departure": "1:00PM" }]);

    let (status, body) = app.post("/api/schedule", json!({ "day1": day1 })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Schedule updated");
    assert_eq!(body["result"]["upsertedCount"], 1);

    let (_, body) = app.post("/api/schedule", json!({ "day2": day2 })).await;
    assert_eq!(body["result"]["matchedCount"], 1);
    assert_eq!(body["result"]["modifiedCount"], 1);
    assert_eq!(app.store.count(Collection::Schedules), 1);

    let (_, body) = app.get("/api/schedule").await;
    assert_eq!(body["day1"], day1);
    assert_eq!(body["day2"], day2);
}

#[tokio::test]
async fn test_accommodations_round_trip() {
    let app = TestApp::new(TableSearch::default());
    let doc = json!({
        "accommodations": [{
            "name": "Seaside Hotel",
            "link": "https://example.com",
            "checkIn": "15:00",
            "checkOut": "11:00",
            "parking": "free",
            "note": "",
            "day": "day1"
        }]
    });
    app.post("/api/accommodations", doc.clone()).await;
    let (status, body) = app.get("/api/accommodations").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(without_id(body), doc);
}

#[tokio::test]
async fn test_places_are_wrapped() {
    let app = TestApp::new(TableSearch::default());
    let (_, body) = app.get("/api/places").await;
    assert_eq!(body, json!({ "places": [] }));

    app.post("/api/places", json!({ "name": "Udo" })).await;
    let (status, body) = app.get("/api/places").await;
    assert_eq!(status, StatusCode::OK);
    let places = body["places"].as_array().unwrap();
    assert_eq!(places.len(), 1);
    assert_eq!(places[0]["name"], "Udo");
}

#[tokio::test]
async fn test_create_post_requires_every_field() {
    let app = TestApp::new(TableSearch::default());
    let (status, body) = app
        .post("/api/posts", json!({ "category": "notice", "content": "hello" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Missing required fields: date, title");
    assert_eq!(app.store.count(Collection::Posts), 0);
}

#[tokio::test]
async fn test_create_post_null_field_is_missing() {
    let app = TestApp::new(TableSearch::default());
    let (status, body) = app
        .post(
            "/api/posts",
            json!({ "category": "notice", "title": null, "content": "hello", "date": "2025-06-01" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Missing required fields: title");
    assert_eq!(app.store.count(Collection::Posts), 0);
}

#[tokio::test]
async fn test_posts_sorted_newest_first() {
    let app = TestApp::new(TableSearch::default());
    for (title, date) in [("old", "2025-06-01"), ("new", "2025-06-03"), ("mid", "2025-06-02")] {
        let (status, body) = app
            .post(
                "/api/posts",
                json!({ "category": "free", "title": title, "content": "...", "date": date }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["message"], "Post saved");
        assert!(body["id"].is_string());
    }

    let (status, body) = app.get("/api/posts").await;
    assert_eq!(status, StatusCode::OK);
    let titles: Vec<&str> = body["posts"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["new", "mid", "old"]);
    assert!(body["posts"][0]["_id"].is_string());
}

#[tokio::test]
async fn test_locations_for_day_are_tagged() {
    let search = TableSearch::default()
        .with("Udo", 33.50, 126.95)
        .with("Bijarim", 33.48, 126.80);
    let app = TestApp::new(search);
    app.post(
        "/api/list",
        json!({
            "travelList": ["Udo"],
            "cafeList": [],
            "days": { "day3": ["Udo", "Bijarim", "Nowhere"] }
        }),
    )
    .await;

    let (status, body) = app.get("/api/locations?category=day3").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["category"], "day3");
    let locations = body["locations"].as_array().unwrap();
    assert_eq!(locations.len(), 2);
    assert!(locations.iter().all(|l| l["dayKey"] == "day3"));

    let (_, body) = app.get("/api/locations?category=travel").await;
    assert_eq!(body["locations"][0]["title"], "Udo");
    assert!(body["locations"][0].get("dayKey").is_none());
}

#[tokio::test]
async fn test_locations_unknown_category() {
    let app = TestApp::new(TableSearch::default());
    let (status, _) = app.get("/api/locations?category=day9").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_map_config_lists_categories() {
    let app = TestApp::new(TableSearch::default());
    let (status, body) = app.get("/api/map/config").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["level"], 10);
    let keys: Vec<&str> = body["categories"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["key"].as_str().unwrap())
        .collect();
    assert_eq!(keys.first(), Some(&"travel"));
    assert!(keys.contains(&"day5"));
}
