//! Integration tests for profile endpoints

mod common;

use axum::http::StatusCode;
use serde_json::json;

#[tokio::test]
#[ignore = "requires database"]
async fn test_get_profile_requires_auth() {
    let app = common::TestApp::new().await;

    let (status, body) = app.get("/api/v1/profile").await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(common::parse(&body)["error"]["code"], "UNAUTHORIZED");
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_get_profile_not_found_before_creation() {
    let app = common::TestApp::new().await;
    let user = app.test_user();

    let (status, _) = app.get_auth("/api/v1/profile", &user.token).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_create_profile_calculates_goals() {
    let app = common::TestApp::new().await;
    let user = app.test_user();

    let (status, body) = app
        .post_auth("/api/v1/profile", &common::sample_profile().to_string(), &user.token)
        .await;

    assert_eq!(status, StatusCode::CREATED);
    let body = common::parse(&body);
    assert_eq!(body["profile"]["user_id"], user.id.to_string());
    assert_eq!(body["profile"]["fitness_goal"], "lose_weight");
    assert_eq!(body["goals"]["goal_intensity"], "slow");
    assert_eq!(body["goals"]["auto_recalculate"], true);
    assert_eq!(body["goals"]["daily_protein"], 160);
    assert!(body["goals"]["daily_calories"].as_i64().unwrap() >= 1200);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_create_profile_twice_conflicts() {
    let app = common::TestApp::new().await;
    let user = app.user_with_profile().await;

    let (status, body) = app
        .post_auth("/api/v1/profile", &common::sample_profile().to_string(), &user.token)
        .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(common::parse(&body)["error"]["code"], "CONFLICT");
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_concurrent_creates_resolve_to_one_conflict() {
    let app = common::TestApp::new().await;
    let user = app.test_user();
    let body = common::sample_profile().to_string();

    let (first, second) = tokio::join!(
        app.post_auth("/api/v1/profile", &body, &user.token),
        app.post_auth("/api/v1/profile", &body, &user.token),
    );

    let mut statuses = vec![first.0.as_u16(), second.0.as_u16()];
    statuses.sort();
    assert_eq!(statuses, vec![201, 409]);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_create_profile_invalid_height() {
    let app = common::TestApp::new().await;
    let user = app.test_user();

    let mut profile = common::sample_profile();
    profile["height"] = json!(20.0);

    let (status, body) = app
        .post_auth("/api/v1/profile", &profile.to_string(), &user.token)
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let body = common::parse(&body);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(body["error"]["field"], "height");
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_create_profile_unknown_goal_rejected() {
    let app = common::TestApp::new().await;
    let user = app.test_user();

    let mut profile = common::sample_profile();
    profile["fitness_goal"] = json!("get_shredded");

    let (status, _) = app
        .post_auth("/api/v1/profile", &profile.to_string(), &user.token)
        .await;

    assert!(status.is_client_error());
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_update_profile_merges_and_recalculates() {
    let app = common::TestApp::new().await;
    let user = app.user_with_profile().await;

    let body = json!({ "fitness_goal": "build_muscle" });
    let (status, response) = app
        .put_auth("/api/v1/profile", &body.to_string(), &user.token)
        .await;

    assert_eq!(status, StatusCode::OK);
    let response = common::parse(&response);
    assert_eq!(response["profile"]["fitness_goal"], "build_muscle");
    assert_eq!(response["profile"]["current_weight"], 80.0);
    assert_eq!(response["goals"]["goal_intensity"], "moderate");
    assert_eq!(response["goals"]["daily_protein"], 176);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_update_profile_clears_goal_weight() {
    let app = common::TestApp::new().await;
    let user = app.user_with_profile().await;

    let body = json!({ "fitness_goal": "maintain_weight", "goal_weight": null });
    let (status, response) = app
        .put_auth("/api/v1/profile", &body.to_string(), &user.token)
        .await;

    assert_eq!(status, StatusCode::OK);
    let response = common::parse(&response);
    assert!(response["profile"].get("goal_weight").is_none());

    let (_, profile) = app.get_auth("/api/v1/profile", &user.token).await;
    assert!(common::parse(&profile).get("goal_weight").is_none());
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_update_missing_profile_not_found() {
    let app = common::TestApp::new().await;
    let user = app.test_user();

    let body = json!({ "height": 175.0 });
    let (status, _) = app
        .put_auth("/api/v1/profile", &body.to_string(), &user.token)
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}
