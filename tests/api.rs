//! 문서 접근 제어 API의 라우터 수준 테스트

mod common;

use axum::http::StatusCode;
use common::TestApp;
use serde_json::json;

#[tokio::test]
async fn collaborator_gains_read_but_not_sharing() {
    let app = TestApp::new().await;
    let alice = app.user("alice").await;
    let bob = app.user("bob").await;
    let doc = app
        .document(&alice, json!({ "title": "Plan", "content": "# Plan" }))
        .await;
    let path = format!("/api/v1/documents/{doc}");

    let response = app.request("GET", &path, None, Some(&bob)).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let response = app
        .request(
            "POST",
            &format!("{path}/collaborators"),
            Some(json!({ "user_id": "bob", "permission": "write" })),
            Some(&alice),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);

    let response = app.request("GET", &path, None, Some(&bob)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["document"]["permission"], "write");
    assert_eq!(response.body["document"]["author"]["id"], "alice");
    assert!(response.body["document"].get("password_hash").is_none());

    let response = app
        .request(
            "PUT",
            &format!("{path}/share"),
            Some(json!({ "visibility": "public" })),
            Some(&bob),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.body["error"]["code"], "access_denied");
}

#[tokio::test]
async fn empty_title_is_rejected_and_nothing_is_stored() {
    let app = TestApp::new().await;
    let alice = app.user("alice").await;

    let response = app
        .request(
            "POST",
            "/api/v1/documents",
            Some(json!({ "title": "", "content": "body" })),
            Some(&alice),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"]["code"], "invalid_input");

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM documents")
        .fetch_one(&app.pool)
        .await
        .unwrap();
    assert_eq!(count, 0);

    let response = app.request("GET", "/api/v1/documents", None, Some(&alice)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["documents"], json!([]));
}

#[tokio::test]
async fn anonymous_reads_public_documents_only() {
    let app = TestApp::new().await;
    let alice = app.user("alice").await;
    let public = app
        .document(
            &alice,
            json!({ "title": "Open", "content": "hello", "visibility": "public" }),
        )
        .await;
    let private = app
        .document(&alice, json!({ "title": "Closed", "content": "secret" }))
        .await;

    let response = app
        .request("GET", &format!("/api/v1/documents/{public}"), None, None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["document"]["permission"], "read");

    let response = app
        .request("GET", &format!("/api/v1/documents/{private}"), None, None)
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let response = app
        .request("GET", "/api/v1/documents/public?limit=5", None, None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let listed = response.body["documents"].as_array().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["id"], public.as_str());

    let response = app.request("GET", "/api/v1/documents", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn only_the_author_deletes() {
    let app = TestApp::new().await;
    let alice = app.user("alice").await;
    let bob = app.user("bob").await;
    let doc = app
        .document(&alice, json!({ "title": "Shared", "content": "text" }))
        .await;
    let path = format!("/api/v1/documents/{doc}");

    app.request(
        "POST",
        &format!("{path}/collaborators"),
        Some(json!({ "user_id": "bob", "permission": "write" })),
        Some(&alice),
    )
    .await;

    let response = app
        .request("PUT", &path, Some(json!({ "content": "edited by bob" })), Some(&bob))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["document"]["content"], "edited by bob");

    let response = app.request("DELETE", &path, None, Some(&bob)).await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = app.request("DELETE", &path, None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let response = app.request("DELETE", &path, None, Some(&alice)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!({ "success": true }));

    let response = app.request("GET", &path, None, Some(&alice)).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn password_sharing_round_trip() {
    let app = TestApp::new().await;
    let alice = app.user("alice").await;
    let doc = app
        .document(&alice, json!({ "title": "Diary", "content": "dear diary" }))
        .await;
    let share = format!("/api/v1/documents/{doc}/share");

    let response = app
        .request(
            "PUT",
            &share,
            Some(json!({ "visibility": "password_protected", "password": "12345" })),
            Some(&alice),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = app
        .request(
            "PUT",
            &share,
            Some(json!({ "visibility": "password_protected", "password": "123456" })),
            Some(&alice),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{}", response.body);
    assert_eq!(response.body["document"]["id"], doc.as_str());
    assert_eq!(response.body["document"]["visibility"], "password_protected");
    let token = response.body["document"]["access_token"]
        .as_str()
        .unwrap()
        .to_string();
    let shared = format!("/api/v1/shared/{token}");

    let response = app.request("GET", &shared, None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let response = app
        .request_with_headers("GET", &shared, None, None, &[("x-document-password", "654321")])
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = app
        .request_with_headers("GET", &shared, None, None, &[("x-document-password", "123456")])
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["document"]["content"], "dear diary");

    let response = app
        .request(
            "PUT",
            &share,
            Some(json!({ "visibility": "private" })),
            Some(&alice),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["document"]["access_token"], json!(null));

    let (hash, access_token): (Option<String>, Option<String>) =
        sqlx::query_as("SELECT password_hash, access_token FROM documents WHERE id = ?")
            .bind(&doc)
            .fetch_one(&app.pool)
            .await
            .unwrap();
    assert!(hash.is_none());
    assert!(access_token.is_none());

    let response = app.request("GET", &shared, None, None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn link_only_rotates_token_on_every_share() {
    let app = TestApp::new().await;
    let alice = app.user("alice").await;
    let doc = app
        .document(&alice, json!({ "title": "Link", "content": "body" }))
        .await;
    let share = format!("/api/v1/documents/{doc}/share");

    let first = app
        .request("PUT", &share, Some(json!({ "visibility": "link_only" })), Some(&alice))
        .await;
    let second = app
        .request("PUT", &share, Some(json!({ "visibility": "link_only" })), Some(&alice))
        .await;
    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(second.status, StatusCode::OK);

    let first_token = first.body["document"]["access_token"].as_str().unwrap();
    let second_token = second.body["document"]["access_token"].as_str().unwrap();
    assert_ne!(first_token, second_token);

    let response = app
        .request("GET", &format!("/api/v1/shared/{second_token}"), None, None)
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app
        .request("GET", &format!("/api/v1/shared/{first_token}"), None, None)
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn invalid_visibility_is_bad_request() {
    let app = TestApp::new().await;
    let alice = app.user("alice").await;
    let doc = app
        .document(&alice, json!({ "title": "T", "content": "C" }))
        .await;

    let response = app
        .request(
            "PUT",
            &format!("/api/v1/documents/{doc}/share"),
            Some(json!({ "visibility": "everyone" })),
            Some(&alice),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = app
        .request(
            "PUT",
            "/api/v1/documents/missing/share",
            Some(json!({ "visibility": "public" })),
            Some(&alice),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn bad_bearer_tokens_are_rejected() {
    let app = TestApp::new().await;

    let response = app
        .request("GET", "/api/v1/documents", None, Some("not-a-jwt"))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"]["code"], "invalid_token");

    let response = app
        .request(
            "POST",
            "/api/v1/documents",
            Some(json!({ "title": "T", "content": "C" })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"]["code"], "authentication_required");
}

#[tokio::test]
async fn comments_and_versions_follow_document_access() {
    let app = TestApp::new().await;
    let alice = app.user("alice").await;
    let bob = app.user("bob").await;
    let doc = app
        .document(&alice, json!({ "title": "Essay", "content": "draft one" }))
        .await;
    let path = format!("/api/v1/documents/{doc}");

    let response = app
        .request(
            "POST",
            &format!("{path}/comments"),
            Some(json!({ "content": "nice" })),
            Some(&bob),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    app.request(
        "POST",
        &format!("{path}/collaborators"),
        Some(json!({ "user_id": "bob", "permission": "read" })),
        Some(&alice),
    )
    .await;

    let response = app
        .request(
            "POST",
            &format!("{path}/comments"),
            Some(json!({ "content": "nice", "position": { "line": 1 } })),
            Some(&bob),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
    let comment_id = response.body["comment"]["id"].as_str().unwrap().to_string();

    let response = app
        .request("GET", &format!("{path}/comments"), None, Some(&alice))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["comments"][0]["user"]["id"], "bob");
    assert_eq!(response.body["comments"][0]["position"]["line"], 1);

    // 문서 작성자는 다른 사람의 댓글을 지울 수 있습니다.
    let response = app
        .request("DELETE", &format!("/api/v1/comments/{comment_id}"), None, Some(&alice))
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app
        .request("POST", &format!("{path}/versions"), None, Some(&bob))
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = app
        .request("POST", &format!("{path}/versions"), None, Some(&alice))
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["version"]["version_number"], 1);
    let version_id = response.body["version"]["id"].as_str().unwrap().to_string();

    let response = app
        .request("GET", &format!("/api/v1/versions/{version_id}"), None, Some(&bob))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["version"]["content"], "draft one");

    let response = app.request("GET", &path, None, Some(&alice)).await;
    assert_eq!(response.body["document"]["version"], 2);
}

#[tokio::test]
async fn health_check_responds() {
    let app = TestApp::new().await;
    let response = app.request("GET", "/api/v1/health", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
}

#[tokio::test]
async fn malformed_bodies_are_invalid_input() {
    let app = TestApp::new().await;
    let alice = app.user("alice").await;

    let response = app
        .request(
            "POST",
            "/api/v1/documents",
            Some(json!({ "title": 5, "content": "x" })),
            Some(&alice),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"]["code"], "invalid_input");

    let response = app
        .request_raw("POST", "/api/v1/documents", "{\"title\": ", Some(&alice))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"]["code"], "invalid_input");

    let response = app
        .request("GET", "/api/v1/documents/public?limit=many", None, None)
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"]["code"], "invalid_input");

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM documents")
        .fetch_one(&app.pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn unprovisioned_actor_cannot_write_rows() {
    let app = TestApp::new().await;
    let alice = app.user("alice").await;
    let doc = app
        .document(
            &alice,
            json!({ "title": "Open", "content": "hello", "visibility": "public" }),
        )
        .await;
    let ghost = app.token("ghost");

    let response = app
        .request(
            "POST",
            &format!("/api/v1/documents/{doc}/comments"),
            Some(json!({ "content": "hello" })),
            Some(&ghost),
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"]["code"], "authentication_required");

    let response = app
        .request(
            "POST",
            "/api/v1/documents",
            Some(json!({ "title": "Mine", "content": "x" })),
            Some(&ghost),
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    // 공개 문서 읽기는 계정 없이도 됩니다.
    let response = app
        .request("GET", &format!("/api/v1/documents/{doc}"), None, Some(&ghost))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["document"]["permission"], "read");
}

#[tokio::test]
async fn collaborators_read_public_documents_as_readers() {
    let app = TestApp::new().await;
    let alice = app.user("alice").await;
    let bob = app.user("bob").await;
    let doc = app
        .document(
            &alice,
            json!({ "title": "Open", "content": "hello", "visibility": "public" }),
        )
        .await;
    let path = format!("/api/v1/documents/{doc}");

    let response = app
        .request(
            "POST",
            &format!("{path}/collaborators"),
            Some(json!({ "user_id": "bob", "permission": "write" })),
            Some(&alice),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);

    let response = app.request("GET", &path, None, Some(&bob)).await;
    assert_eq!(response.body["document"]["permission"], "read");

    let response = app
        .request("PUT", &path, Some(json!({ "content": "edited" })), Some(&bob))
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = app.request("GET", &path, None, Some(&alice)).await;
    assert_eq!(response.body["document"]["permission"], "admin");
}
