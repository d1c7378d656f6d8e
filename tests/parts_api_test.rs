mod common;

use axum::http::{Method, StatusCode};
use robohub_api::entities::part;
use rstest::rstest;
use sea_orm::{EntityTrait, PaginatorTrait};
use serde_json::json;

use common::{response_json, today, TestApp};

#[tokio::test]
async fn create_part_under_missing_robot_is_not_found() {
    let app = TestApp::new().await;

    let response = app
        .request(
            Method::POST,
            "/ROBOHUB/robots/1/parts",
            Some(json!({"name": "wheel", "quantity": 4})),
        )
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let count = part::Entity::find()
        .count(app.state.db.as_ref())
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn create_part_returns_full_projection_with_defaults() {
    let app = TestApp::new().await;
    let robot = app.create_robot("R2", "utility").await;

    let response = app
        .request(
            Method::POST,
            &format!("/ROBOHUB/robots/{robot}/parts"),
            Some(json!({"name": "wheel"})),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = response_json(response).await;
    assert_eq!(body["data"]["robot_id"], robot);
    assert_eq!(body["data"]["part"]["id"], 1);
    assert_eq!(body["data"]["part"]["name"], "wheel");
    assert_eq!(body["data"]["part"]["quantity"], 1);
    assert_eq!(body["data"]["part"]["last_checked"], today());

    let response = app
        .request(
            Method::POST,
            &format!("/ROBOHUB/robots/{robot}/parts"),
            Some(json!({"name": "tread", "quantity": 4, "last_checked": "2026-01-02"})),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = response_json(response).await;
    assert_eq!(body["data"]["part"]["quantity"], 4);
    assert_eq!(body["data"]["part"]["last_checked"], "2026-01-02");
}

#[tokio::test]
async fn part_ids_are_assigned_per_robot() {
    let app = TestApp::new().await;
    let first = app.create_robot("R2", "utility").await;
    let second = app.create_robot("C3", "protocol").await;

    assert_eq!(app.create_part(first, "wheel").await, 1);
    assert_eq!(app.create_part(first, "arm").await, 2);
    assert_eq!(app.create_part(second, "vocoder").await, 1);
    assert_eq!(app.create_part(first, "dome").await, 3);

    let response = app
        .request(Method::GET, &format!("/ROBOHUB/robots/{first}/parts"), None)
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["data"]["robot_id"], first);
    let ids: Vec<i64> = body["data"]["parts"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![1, 2, 3]);
}

#[tokio::test]
async fn get_part_checks_robot_and_part() {
    let app = TestApp::new().await;
    let robot = app.create_robot("R2", "utility").await;
    let wheel = app.create_part(robot, "wheel").await;

    let response = app
        .request(
            Method::GET,
            &format!("/ROBOHUB/robots/{robot}/parts/{wheel}"),
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["data"]["robot_id"], robot);
    assert_eq!(body["data"]["part"]["name"], "wheel");

    let response = app
        .request(Method::GET, &format!("/ROBOHUB/robots/{robot}/parts/9"), None)
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .request(Method::GET, "/ROBOHUB/robots/99/parts/1", None)
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app.request(Method::GET, "/ROBOHUB/robots/99/parts", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_part_applies_provided_fields() {
    let app = TestApp::new().await;
    let robot = app.create_robot("R2", "utility").await;
    let wheel = app.create_part(robot, "wheel").await;

    let response = app
        .request(
            Method::PATCH,
            &format!("/ROBOHUB/robots/{robot}/parts/{wheel}"),
            Some(json!({"quantity": 6})),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["data"]["part"]["name"], "wheel");
    assert_eq!(body["data"]["part"]["quantity"], 6);

    let response = app
        .request(
            Method::PATCH,
            &format!("/ROBOHUB/robots/{robot}/parts/{wheel}"),
            Some(json!({"quantity": -1})),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .request(
            Method::PATCH,
            &format!("/ROBOHUB/robots/{robot}/parts/7"),
            Some(json!({"quantity": 2})),
        )
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[rstest]
#[case::robot("robot")]
#[case::part("part")]
#[tokio::test]
async fn empty_partial_update_is_rejected_uniformly(#[case] target: &str) {
    let app = TestApp::new().await;
    let robot = app.create_robot("R2", "utility").await;
    let wheel = app.create_part(robot, "wheel").await;

    let uri = match target {
        "robot" => format!("/ROBOHUB/robots/{robot}"),
        _ => format!("/ROBOHUB/robots/{robot}/parts/{wheel}"),
    };

    let response = app.request(Method::PATCH, &uri, Some(json!({}))).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    assert_eq!(body["error"], "Bad Request");
    assert_eq!(body["message"], "Bad request: No fields provided for update");
}

#[tokio::test]
async fn delete_part_then_it_is_gone() {
    let app = TestApp::new().await;
    let robot = app.create_robot("R2", "utility").await;
    let wheel = app.create_part(robot, "wheel").await;
    let uri = format!("/ROBOHUB/robots/{robot}/parts/{wheel}");

    let response = app.request(Method::DELETE, &uri, None).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app.request(Method::GET, &uri, None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app.request(Method::DELETE, &uri, None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .request(Method::DELETE, "/ROBOHUB/robots/99/parts/1", None)
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn deleting_a_logged_part_is_a_conflict() {
    let app = TestApp::new().await;
    let robot = app.create_robot("R2", "utility").await;
    let wheel = app.create_part(robot, "wheel").await;
    app.create_log(robot, Some(wheel), "replaced tread").await;

    let uri = format!("/ROBOHUB/robots/{robot}/parts/{wheel}");
    let response = app.request(Method::DELETE, &uri, None).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = app.request(Method::GET, &uri, None).await;
    assert_eq!(response.status(), StatusCode::OK);
}
