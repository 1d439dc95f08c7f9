mod common;

use axum::{body::Body, http::Request};
use common::{app, send, TestEnv};
use serde_json::json;

fn search(body: &str) -> Request<Body> {
    Request::post("/search")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn search_without_query_is_bad_request() {
    let env = TestEnv::new();
    let state = env.state();

    for body in ["{}", r#"{"q":""}"#, r#"{"q":null}"#, "not json"] {
        let (status, value) = send(app(state.clone()), search(body)).await;
        assert_eq!(status, 400, "body {body:?}");
        assert_eq!(value, json!({ "error": "missing query" }));
    }
}

#[tokio::test]
async fn search_matches_indexed_text_case_insensitively() {
    let env = TestEnv::new();
    let state = env.state();
    state
        .vector_index
        .index("blueprints/1_plan.pdf", "This is a TEST document", None)
        .await
        .unwrap();
    state
        .vector_index
        .index("blueprints/2_site.jpg", "Site photo, north elevation", None)
        .await
        .unwrap();

    let (status, value) = send(app(state), search(r#"{"q":"test"}"#)).await;

    assert_eq!(status, 200);
    assert_eq!(
        value,
        json!({ "results": [
            { "id": "blueprints/1_plan.pdf", "snippet": "This is a TEST document" }
        ]})
    );
}

#[tokio::test]
async fn search_with_no_match_returns_empty_results() {
    let env = TestEnv::new();
    let (status, value) = send(app(env.state()), search(r#"{"q":"rebar"}"#)).await;

    assert_eq!(status, 200);
    assert_eq!(value, json!({ "results": [] }));
}

#[tokio::test]
async fn search_with_whitespace_query_is_accepted() {
    let env = TestEnv::new();
    let state = env.state();
    state
        .vector_index
        .index("blueprints/1_plan.pdf", "Level 2 framing plan", None)
        .await
        .unwrap();

    let (status, value) = send(app(state), search(r#"{"q":" "}"#)).await;

    assert_eq!(status, 200);
    assert_eq!(value["results"].as_array().unwrap().len(), 1);
}
