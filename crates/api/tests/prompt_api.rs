//! HTTP-level integration tests for prompt CRUD and listing.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, category_id, create_prompt, delete_auth, get, get_auth, patch_json_auth,
    post_json, post_json_auth, register,
};
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_prompt_returns_author_and_category(pool: PgPool) {
    let app = common::build_test_app(pool);
    let alice = register(&app, "alice").await;
    let education = category_id(&app, "Education").await;

    let body = json!({
        "title": "  Socratic tutor  ",
        "description": "   ",
        "content": "Ask me questions until I understand.",
        "category_id": education,
    });
    let response = post_json_auth(app, "/api/v1/prompts", body, &alice.token).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let data = body_json(response).await["data"].clone();
    assert_eq!(data["title"], "Socratic tutor");
    assert!(data["description"].is_null(), "blank description is stored as null");
    assert_eq!(data["visibility"], "public");
    assert_eq!(data["author"]["id"], alice.id);
    assert_eq!(data["author"]["username"], "alice");
    assert_eq!(data["category"]["id"], education);
    assert_eq!(data["category"]["name"], "Education");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_prompt_requires_auth(pool: PgPool) {
    let app = common::build_test_app(pool);
    let body = json!({ "title": "t", "content": "c", "category_id": 1 });
    let response = post_json(app, "/api/v1/prompts", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_prompt_validation_and_missing_category(pool: PgPool) {
    let app = common::build_test_app(pool);
    let alice = register(&app, "alice").await;
    let education = category_id(&app, "Education").await;

    let blank_title = json!({ "title": " ", "content": "c", "category_id": education });
    let response = post_json_auth(app.clone(), "/api/v1/prompts", blank_title, &alice.token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let long_title = json!({ "title": "x".repeat(129), "content": "c", "category_id": education });
    let response = post_json_auth(app.clone(), "/api/v1/prompts", long_title, &alice.token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let missing = json!({ "title": "t", "content": "c", "category_id": 999_999 });
    let response = post_json_auth(app, "/api/v1/prompts", missing, &alice.token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        body_json(response).await["error"],
        "Category with id 999999 not found"
    );
}

// ---------------------------------------------------------------------------
// Read
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_private_prompt_visible_only_to_author(pool: PgPool) {
    let app = common::build_test_app(pool);
    let alice = register(&app, "alice").await;
    let bob = register(&app, "bob").await;
    let category = category_id(&app, "Marketing").await;
    let secret = create_prompt(&app, &alice, "Secret", category, "private").await;
    let uri = format!("/api/v1/prompts/{secret}");

    let response = get_auth(app.clone(), &uri, &alice.token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let data = body_json(response).await["data"].clone();
    assert_eq!(data["content"], "content of Secret");
    assert_eq!(data["vote_count"], 0);
    assert_eq!(data["has_voted"], false);

    let response = get_auth(app.clone(), &uri, &bob.token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = get(app, &uri).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_invalid_token_on_public_route_is_anonymous(pool: PgPool) {
    let app = common::build_test_app(pool);
    let alice = register(&app, "alice").await;
    let category = category_id(&app, "Marketing").await;
    let id = create_prompt(&app, &alice, "Open", category, "public").await;

    let response = get_auth(app, &format!("/api/v1/prompts/{id}"), "not-a-jwt").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["has_voted"], false);
}

// ---------------------------------------------------------------------------
// List
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_paginates_public_prompts(pool: PgPool) {
    let app = common::build_test_app(pool);
    let alice = register(&app, "alice").await;
    let category = category_id(&app, "Copywriting").await;
    for i in 0..3 {
        create_prompt(&app, &alice, &format!("Public {i}"), category, "public").await;
    }
    create_prompt(&app, &alice, "Hidden", category, "private").await;

    let response = get(app, "/api/v1/prompts?page=2&page_size=2").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
    assert!(json["data"][0].get("content").is_none(), "listings omit content");
    assert_eq!(json["pagination"]["page"], 2);
    assert_eq!(json["pagination"]["page_size"], 2);
    assert_eq!(json["pagination"]["total_items"], 3);
    assert_eq!(json["pagination"]["total_pages"], 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_own_prompts_includes_private(pool: PgPool) {
    let app = common::build_test_app(pool);
    let alice = register(&app, "alice").await;
    let bob = register(&app, "bob").await;
    let category = category_id(&app, "Copywriting").await;
    create_prompt(&app, &alice, "Open", category, "public").await;
    create_prompt(&app, &alice, "Draft", category, "private").await;
    create_prompt(&app, &bob, "Bob's", category, "public").await;

    let uri = format!("/api/v1/prompts?user_id={}", alice.id);

    let own = body_json(get_auth(app.clone(), &uri, &alice.token).await).await;
    assert_eq!(own["pagination"]["total_items"], 2);

    let other = body_json(get_auth(app, &uri, &bob.token).await).await;
    assert_eq!(other["pagination"]["total_items"], 1);
    assert_eq!(other["data"][0]["title"], "Open");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_sorts_by_title_ascending(pool: PgPool) {
    let app = common::build_test_app(pool);
    let alice = register(&app, "alice").await;
    let category = category_id(&app, "Copywriting").await;
    for title in ["Charlie", "Alpha", "Bravo"] {
        create_prompt(&app, &alice, title, category, "public").await;
    }

    let json = body_json(get(app, "/api/v1/prompts?sort_by=title&order=asc").await).await;
    let titles: Vec<_> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Alpha", "Bravo", "Charlie"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_rejects_bad_parameters(pool: PgPool) {
    let app = common::build_test_app(pool);

    for uri in [
        "/api/v1/prompts?page=0",
        "/api/v1/prompts?page_size=0",
        "/api/v1/prompts?page_size=101",
        "/api/v1/prompts?sort_by=popularity",
        "/api/v1/prompts?order=sideways",
    ] {
        let response = get(app.clone(), uri).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "uri: {uri}");
    }

    let response = get(app, "/api/v1/prompts?category_id=999999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_prompt_partial_fields(pool: PgPool) {
    let app = common::build_test_app(pool);
    let alice = register(&app, "alice").await;
    let copywriting = category_id(&app, "Copywriting").await;
    let marketing = category_id(&app, "Marketing").await;
    let id = create_prompt(&app, &alice, "Draft", copywriting, "public").await;
    let uri = format!("/api/v1/prompts/{id}");

    let response = patch_json_auth(
        app.clone(),
        &uri,
        json!({ "title": "Final", "category_id": marketing }),
        &alice.token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let data = body_json(response).await["data"].clone();
    assert_eq!(data["title"], "Final");
    assert_eq!(data["category"]["name"], "Marketing");
    assert_eq!(data["description"], "about Draft", "absent fields are unchanged");

    let response = patch_json_auth(app, &uri, json!({ "description": "" }), &alice.token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_json(response).await["data"]["description"].is_null());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_prompt_errors(pool: PgPool) {
    let app = common::build_test_app(pool);
    let alice = register(&app, "alice").await;
    let bob = register(&app, "bob").await;
    let category = category_id(&app, "Copywriting").await;
    let id = create_prompt(&app, &alice, "Mine", category, "public").await;
    let uri = format!("/api/v1/prompts/{id}");

    let response = patch_json_auth(app.clone(), &uri, json!({}), &alice.token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response =
        patch_json_auth(app.clone(), &uri, json!({ "category_id": 999_999 }), &alice.token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = patch_json_auth(app.clone(), &uri, json!({ "title": "x" }), &bob.token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = patch_json_auth(
        app,
        "/api/v1/prompts/999999",
        json!({ "title": "x" }),
        &alice.token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_prompt(pool: PgPool) {
    let app = common::build_test_app(pool);
    let alice = register(&app, "alice").await;
    let bob = register(&app, "bob").await;
    let category = category_id(&app, "Copywriting").await;
    let id = create_prompt(&app, &alice, "Temporary", category, "public").await;
    let uri = format!("/api/v1/prompts/{id}");

    let response = delete_auth(app.clone(), &uri, &bob.token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = delete_auth(app.clone(), &uri, &alice.token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get(app.clone(), &uri).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = delete_auth(app, &uri, &alice.token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
