//! # mdshare 웹 서버 진입점
//!
//! 이 파일이 수행하는 작업:
//! 1. 환경변수(.env) 로딩
//! 2. 로깅(tracing) 초기화
//! 3. SQLite 데이터베이스 연결 풀 생성
//! 4. 데이터베이스 마이그레이션 실행
//! 5. 비밀번호 해셔 준비
//! 6. API 라우터 설정
//! 7. HTTP 서버 시작

use anyhow::Result;
use mdshare::{
    config::Config,
    db,
    routes::{self, documents::AppState},
    services::password::PasswordHasher,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // ── 1단계: 환경변수 로딩 ──
    // .env 파일이 없어도 에러 없이 넘어갑니다.
    dotenvy::dotenv().ok();

    // ── 2단계: 로깅(tracing) 초기화 ──
    // RUST_LOG가 없으면 mdshare, tower_http, axum을 debug 레벨로 출력합니다.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mdshare=debug,tower_http=debug,axum=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // ── 3단계: 설정 로딩 ──
    let config = Config::from_env()?;
    tracing::info!("Starting mdshare server on {}:{}", config.host, config.port);

    // ── 4단계: SQLite 연결 풀 생성 ──
    // 저장소 클라이언트는 여기서 한 번만 만들고 AppState로 주입합니다.
    let pool = db::connect(&config.database_url, config.max_connections).await?;

    // ── 5단계: 데이터베이스 마이그레이션 실행 ──
    tracing::info!("Running database migrations...");
    db::run_migrations(&pool).await?;

    // ── 6단계: 애플리케이션 상태(State) 생성 ──
    // 해싱 파라미터가 잘못되면 첫 요청이 아니라 시작 시점에 실패합니다.
    let hasher = PasswordHasher::new(&config.password_hash)?;
    tracing::debug!(
        memory_kib = config.password_hash.memory_kib,
        iterations = config.password_hash.iterations,
        parallelism = config.password_hash.parallelism,
        "password hashing configured"
    );

    let state = AppState {
        pool,
        jwt_secret: config.jwt_secret.clone(),
        hasher,
    };

    // ── 7단계: 라우터 + CORS + 요청 로깅 ──
    let app = routes::app(state);

    // ── 8단계: 서버 시작 ──
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
