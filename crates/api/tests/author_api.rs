//! HTTP-level integration tests for the author endpoints and the
//! author+videos transaction.
//!
//! Uses Axum's tower::ServiceExt to send requests directly to the router
//! without an actual TCP listener.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, create_author, delete, get, patch_json, post_json};
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Author CRUD
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_author_returns_200_with_new_id(pool: PgPool) {
    let app = build_test_app(pool);
    let response = post_json(
        app,
        "/authors",
        json!({"name": "Ana", "phone": "11988887777"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["id"].as_i64().unwrap() > 0);
    assert_eq!(json["name"], "Ana");
    assert_eq!(json["phone"], "11988887777");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn created_author_can_be_read_back(pool: PgPool) {
    let id = create_author(&pool, "Bia", "11977776666").await;

    let response = get(build_test_app(pool), &format!("/authors/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["id"], id);
    assert_eq!(json["name"], "Bia");
    assert_eq!(json["phone"], "11977776666");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn get_nonexistent_author_returns_404_naming_the_id(pool: PgPool) {
    let response = get(build_test_app(pool), "/authors/999999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "Author with id 999999 not found");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn get_author_with_non_numeric_id_is_rejected(pool: PgPool) {
    let response = get(build_test_app(pool), "/authors/abc").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn patch_author_updates_supplied_fields_only(pool: PgPool) {
    let id = create_author(&pool, "Original", "11911112222").await;

    let response = patch_json(
        build_test_app(pool.clone()),
        "/authors",
        json!({"id": id, "name": "Renamed"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["name"], "Renamed");
    assert_eq!(json["phone"], "11911112222");

    let stored = body_json(get(build_test_app(pool), &format!("/authors/{id}")).await).await;
    assert_eq!(stored["name"], "Renamed");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn patch_nonexistent_author_returns_404_and_alters_nothing(pool: PgPool) {
    let id = create_author(&pool, "Untouched", "11911112222").await;
    let missing = id + 1000;

    let response = patch_json(
        build_test_app(pool.clone()),
        "/authors",
        json!({"id": missing, "name": "Ghost"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        body_json(response).await["error"],
        format!("Author with id {missing} not found")
    );

    let stored = body_json(get(build_test_app(pool), &format!("/authors/{id}")).await).await;
    assert_eq!(stored["name"], "Untouched");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn patch_author_without_id_returns_400(pool: PgPool) {
    let response = patch_json(build_test_app(pool), "/authors", json!({"name": "No id"})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn delete_author_twice_returns_200_then_404(pool: PgPool) {
    let id = create_author(&pool, "Temp", "1").await;

    let first = delete(build_test_app(pool.clone()), &format!("/authors/{id}")).await;
    assert_eq!(first.status(), StatusCode::OK);

    let second = delete(build_test_app(pool.clone()), &format!("/authors/{id}")).await;
    assert_eq!(second.status(), StatusCode::NOT_FOUND);

    let response = get(build_test_app(pool), &format!("/authors/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn malformed_author_body_is_rejected(pool: PgPool) {
    let response = post_json(build_test_app(pool), "/authors", json!({"name": 42})).await;
    assert!(response.status().is_client_error());
}

// ---------------------------------------------------------------------------
// Author with videos
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn author_with_videos_cross_references_ids(pool: PgPool) {
    let response = post_json(
        build_test_app(pool.clone()),
        "/authorWithVideos",
        json!({
            "author_name": "A",
            "author_phone": "11999999999",
            "videos": [{"title": "V1"}, {"title": "V2", "like_count": 3}]
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let author_id = json["author_id"].as_i64().unwrap();
    assert_eq!(json["author_name"], "A");
    assert_eq!(json["author_phone"], "11999999999");

    let videos = json["videos"].as_array().unwrap();
    assert_eq!(videos.len(), 2);
    assert_eq!(videos[0]["title"], "V1");
    assert_eq!(videos[1]["title"], "V2");
    assert_eq!(videos[1]["like_count"], 3);
    for video in videos {
        assert_eq!(video["author_id"], author_id);
        assert!(video["id"].as_i64().unwrap() > 0);
    }

    let author = body_json(get(build_test_app(pool), &format!("/authors/{author_id}")).await).await;
    assert_eq!(author["name"], "A");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn author_with_videos_persists_nothing_on_failure(pool: PgPool) {
    sqlx::query("ALTER TABLE videos ADD CONSTRAINT ck_videos_title CHECK (title <> 'boom')")
        .execute(&pool)
        .await
        .unwrap();

    let response = post_json(
        build_test_app(pool.clone()),
        "/authorWithVideos",
        json!({
            "author_name": "Doomed",
            "author_phone": "11999999999",
            "videos": [{"title": "ok"}, {"title": "boom"}]
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let authors: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM authors")
        .fetch_one(&pool)
        .await
        .unwrap();
    let videos: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM videos")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(authors.0, 0);
    assert_eq!(videos.0, 0);
}
