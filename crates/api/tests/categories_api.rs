//! HTTP-level tests for the admin category endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_json, create, delete, get, post_json, put_json, tour_body, PNG_DATA_URI};
use serde_json::json;

const CATEGORIES: &str = "/api/v1/admin/categories";

fn names(json: &serde_json::Value) -> Vec<String> {
    json["categories"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn wildlife_create_conflict_and_reorder() {
    let app = common::build_test_app();
    let culture = create(&app, CATEGORIES, json!({ "name": "Culture" })).await;
    assert_eq!(culture["sequence"], 1);

    let wildlife = create(&app, CATEGORIES, json!({ "name": "Wildlife" })).await;
    assert_eq!(wildlife["sequence"], 2);
    assert_eq!(wildlife["slug"], "wildlife");

    let response = post_json(&app, CATEGORIES, json!({ "name": "wildlife" })).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(
        body_json(response).await["error"],
        "Category with this name already exists"
    );

    let response = put_json(
        &app,
        &format!("{CATEGORIES}/reorder"),
        json!({ "categories": [wildlife["_id"], culture["_id"]] }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["updated"], 2);

    let json = body_json(get(&app, CATEGORIES).await).await;
    assert_eq!(names(&json), vec!["Wildlife", "Culture"]);
    assert_eq!(json["categories"][0]["sequence"], 1);
    assert_eq!(json["categories"][1]["sequence"], 2);
}

#[tokio::test]
async fn reorder_assigns_one_to_n_in_submitted_order() {
    let app = common::build_test_app();
    let mut ids = Vec::new();
    for name in ["A", "B", "C", "D"] {
        ids.push(create(&app, CATEGORIES, json!({ "name": name })).await["_id"].clone());
    }

    // Admin UI sends documents; only position matters.
    let body = json!({
        "categories": [
            { "_id": ids[2], "sequence": 3 },
            { "_id": ids[0], "sequence": 1 },
            { "_id": ids[3], "sequence": 4 },
            { "_id": ids[1], "sequence": 2 }
        ]
    });
    let response = put_json(&app, &format!("{CATEGORIES}/reorder"), body).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(get(&app, CATEGORIES).await).await;
    assert_eq!(names(&json), vec!["C", "A", "D", "B"]);
    let sequences: Vec<_> = json["categories"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["sequence"].as_i64().unwrap())
        .collect();
    assert_eq!(sequences, vec![1, 2, 3, 4]);
}

#[tokio::test]
async fn reorder_rejects_duplicates_and_bad_ids() {
    let app = common::build_test_app();
    let a = create(&app, CATEGORIES, json!({ "name": "A" })).await;
    let uri = format!("{CATEGORIES}/reorder");

    let response = put_json(&app, &uri, json!({ "categories": [a["_id"], a["_id"]] })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = put_json(&app, &uri, json!({ "categories": ["nope"] })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn slug_derivation_and_tour_reference_round_trip() {
    let app = common::build_test_app();
    let category = create(&app, CATEGORIES, json!({ "name": "Adventure Tours" })).await;
    assert_eq!(category["slug"], "adventure-tours");

    let slug = category["slug"].as_str().unwrap();
    let tour = create(
        &app,
        "/api/v1/admin/tours",
        tour_body("Dune Bashing", slug, 60.0),
    )
    .await;

    let fetched = body_json(get(&app, &format!("/api/v1/tours/{}", tour["slug"].as_str().unwrap())).await).await;
    assert_eq!(fetched["category"], "adventure-tours");
}

#[tokio::test]
async fn explicit_slug_is_kept_and_must_be_unique() {
    let app = common::build_test_app();
    let category = create(&app, CATEGORIES, json!({ "name": "Desert", "slug": "sand" })).await;
    assert_eq!(category["slug"], "sand");

    let response = post_json(&app, CATEGORIES, json!({ "name": "Dunes", "slug": "sand" })).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn create_requires_a_name() {
    let app = common::build_test_app();
    let response = post_json(&app, CATEGORIES, json!({ "name": "  " })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn data_uri_image_is_uploaded() {
    let app = common::build_test_app();
    let category = create(
        &app,
        CATEGORIES,
        json!({ "name": "Beaches", "imageUrl": PNG_DATA_URI }),
    )
    .await;

    let url = category["imageUrl"].as_str().unwrap();
    assert!(url.starts_with("https://blob.test/categories/"));
    assert!(url.ends_with("-beaches"));
    let blob = app.blobs.get(url).await.unwrap();
    assert_eq!(blob.content_type, "image/png");
}

#[tokio::test]
async fn plain_image_url_is_stored_as_is() {
    let app = common::build_test_app();
    let category = create(
        &app,
        CATEGORIES,
        json!({ "name": "Hills", "imageUrl": "https://cdn.example.com/hills.jpg" }),
    )
    .await;
    assert_eq!(category["imageUrl"], "https://cdn.example.com/hills.jpg");
    assert!(app.blobs.is_empty().await);
}

#[tokio::test]
async fn update_renames_and_replaces_image() {
    let app = common::build_test_app();
    let category = create(
        &app,
        CATEGORIES,
        json!({ "name": "Lakes", "imageUrl": PNG_DATA_URI, "description": "Water" }),
    )
    .await;
    let old_url = category["imageUrl"].as_str().unwrap().to_string();
    let uri = format!("{CATEGORIES}/{}", category["_id"].as_str().unwrap());
    let response = put_json(
        &app,
        &uri,
        json!({ "name": "Lakes & Rivers", "imageUrl": PNG_DATA_URI, "slug": "ignored" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await;

    assert_eq!(updated["name"], "Lakes & Rivers");
    assert_eq!(updated["slug"], "lakes");
    assert_eq!(updated["description"], "Water");
    assert_ne!(updated["imageUrl"], old_url.as_str());
    assert!(!app.blobs.contains(&old_url).await);
    assert!(app.blobs.contains(updated["imageUrl"].as_str().unwrap()).await);

    let cleared = body_json(put_json(&app, &uri, json!({ "imageUrl": "", "description": "" })).await).await;
    assert!(cleared["imageUrl"].is_null());
    assert!(cleared["description"].is_null());
}

#[tokio::test]
async fn failed_image_upload_keeps_old_image() {
    let app = common::build_test_app();
    let category = create(
        &app,
        CATEGORIES,
        json!({ "name": "Wildlife", "imageUrl": PNG_DATA_URI }),
    )
    .await;
    let old_url = category["imageUrl"].as_str().unwrap().to_string();
    let uri = format!("{CATEGORIES}/{}", category["_id"].as_str().unwrap());

    app.blobs.set_fail_uploads(true);
    let response = put_json(
        &app,
        &uri,
        json!({ "name": "Safari", "imageUrl": "data:image/jpeg;base64,/9j/4AAQ" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let stored = body_json(get(&app, &uri).await).await;
    assert_eq!(stored["name"], "Wildlife");
    assert_eq!(stored["imageUrl"], old_url.as_str());
    assert!(app.blobs.contains(&old_url).await);
    assert_eq!(app.blobs.len().await, 1);
}

#[tokio::test]
async fn invalid_image_payload_on_update_is_rejected() {
    let app = common::build_test_app();
    let category = create(
        &app,
        CATEGORIES,
        json!({ "name": "Beaches", "imageUrl": PNG_DATA_URI }),
    )
    .await;
    let old_url = category["imageUrl"].as_str().unwrap().to_string();
    let uri = format!("{CATEGORIES}/{}", category["_id"].as_str().unwrap());

    let response = put_json(&app, &uri, json!({ "imageUrl": "data:image/png;base64,%%%" })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "INVALID_PAYLOAD");

    let stored = body_json(get(&app, &uri).await).await;
    assert_eq!(stored["imageUrl"], old_url.as_str());
    assert!(app.blobs.contains(&old_url).await);
}

#[tokio::test]
async fn update_name_conflicts_ignore_self() {
    let app = common::build_test_app();
    let a = create(&app, CATEGORIES, json!({ "name": "Forest" })).await;
    create(&app, CATEGORIES, json!({ "name": "Mountain" })).await;
    let uri = format!("{CATEGORIES}/{}", a["_id"].as_str().unwrap());

    let response = put_json(&app, &uri, json!({ "name": "FOREST" })).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["name"], "FOREST");

    let response = put_json(&app, &uri, json!({ "name": "mountain" })).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn delete_removes_category_and_image() {
    let app = common::build_test_app();
    let category = create(
        &app,
        CATEGORIES,
        json!({ "name": "Islands", "imageUrl": PNG_DATA_URI }),
    )
    .await;
    let url = category["imageUrl"].as_str().unwrap().to_string();
    let uri = format!("{CATEGORIES}/{}", category["_id"].as_str().unwrap());

    let response = delete(&app, &uri).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["message"], "Category deleted");
    assert!(!app.blobs.contains(&url).await);
    assert_eq!(get(&app, &uri).await.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn list_searches_and_pages() {
    let app = common::build_test_app();
    for name in ["River Cruise", "City Walk", "River Rafting"] {
        create(&app, CATEGORIES, json!({ "name": name })).await;
    }

    let json = body_json(get(&app, &format!("{CATEGORIES}?search=river&limit=1")).await).await;
    assert_eq!(names(&json), vec!["River Cruise"]);
    assert_eq!(json["pagination"]["total"], 2);
    assert_eq!(json["pagination"]["totalPages"], 2);

    let json = body_json(get(&app, &format!("{CATEGORIES}?page=9")).await).await;
    assert!(names(&json).is_empty());
    assert_eq!(json["pagination"]["total"], 3);
}
