//! 라우터 수준 테스트용 공통 헬퍼

use std::str::FromStr;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use chrono::Duration;
use serde_json::{json, Value};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use tower::ServiceExt;

use mdshare::{
    config::PasswordHashConfig,
    db,
    middleware::auth::create_access_token,
    routes::{self, documents::AppState},
    services::password::PasswordHasher,
};

pub const JWT_SECRET: &str = "test-secret";

/// 테스트용 애플리케이션 컨텍스트
pub struct TestApp {
    /// 테스트 대상 라우터
    pub router: Router,
    /// 저장소를 직접 확인할 때 쓰는 풀
    pub pool: SqlitePool,
}

/// 응답의 상태 코드와 파싱한 JSON 본문
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestApp {
    /// 마이그레이션을 적용한 새 인메모리 DB
    pub async fn new() -> Self {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .expect("Invalid database url")
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .expect("Failed to open in-memory database");

        db::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");

        let hasher = PasswordHasher::new(&PasswordHashConfig {
            memory_kib: 8,
            iterations: 1,
            parallelism: 1,
        })
        .expect("Failed to build hasher");

        let state = AppState {
            pool: pool.clone(),
            jwt_secret: JWT_SECRET.to_string(),
            hasher,
        };

        Self {
            router: routes::app(state),
            pool,
        }
    }

    /// 사용자 ID의 Bearer 토큰. 인증 제공자와 같은 방식으로 서명합니다.
    pub fn token(&self, user_id: &str) -> String {
        create_access_token(user_id, JWT_SECRET, Duration::hours(1))
            .expect("Failed to sign token")
    }

    /// `PUT /users/me`로 계정을 만들고 토큰을 돌려줍니다.
    pub async fn user(&self, user_id: &str) -> String {
        let token = self.token(user_id);
        let response = self
            .request(
                "PUT",
                "/api/v1/users/me",
                Some(json!({ "email": format!("{user_id}@example.com"), "name": user_id })),
                Some(&token),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "{}", response.body);
        token
    }

    /// 문서를 만들고 ID를 돌려줍니다.
    pub async fn document(&self, token: &str, body: Value) -> String {
        let response = self
            .request("POST", "/api/v1/documents", Some(body), Some(token))
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
        response.body["document"]["id"]
            .as_str()
            .expect("document id")
            .to_string()
    }

    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        self.request_with_headers(method, path, body, token, &[]).await
    }

    pub async fn request_with_headers(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
        headers: &[(&str, &str)],
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        self.send(method, path, body_str, token, headers).await
    }

    /// 본문을 그대로 보냅니다. 깨진 JSON을 보낼 때 씁니다.
    pub async fn request_raw(
        &self,
        method: &str,
        path: &str,
        body: &str,
        token: Option<&str>,
    ) -> TestResponse {
        self.send(method, path, body.to_string(), token, &[]).await
    }

    async fn send(
        &self,
        method: &str,
        path: &str,
        body: String,
        token: Option<&str>,
        headers: &[(&str, &str)],
    ) -> TestResponse {
        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {}", token));
        }
        for (name, value) in headers {
            req = req.header(*name, *value);
        }

        let req = req.body(Body::from(body)).expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}
