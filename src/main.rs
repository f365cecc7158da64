//! # Calisthenics Coach 웹 서버 진입점
//!
//! 이 파일이 수행하는 작업:
//! 1. 환경변수(.env) 로딩
//! 2. 로깅(tracing) 초기화
//! 3. SQLite 데이터베이스 연결 풀 생성
//! 4. 데이터베이스 마이그레이션 실행 (운동 카탈로그 시드 포함)
//! 5. API 라우터 설정
//! 6. HTTP 서버 시작

mod config;
mod db;
mod error;
mod middleware;
mod models;
mod routes;
mod services;

#[cfg(test)]
mod test_utils;

use anyhow::Result; // main에서는 여러 에러 타입을 `?` 하나로 전파
use axum::{
    routing::{get, post},
    Router,
};
use config::Config;
use routes::*; // 핸들러 함수와 AppState
use sqlx::sqlite::SqlitePoolOptions;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt}; // .with(), .init()

#[tokio::main]
async fn main() -> Result<()> {
    // .env 파일이 없어도 에러 없이 넘어갑니다
    dotenvy::dotenv().ok();

    // RUST_LOG가 없으면 이 크레이트와 HTTP 계층을 debug 레벨로
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "calisthenics_coach=debug,tower_http=debug,axum=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    tracing::info!(
        "Starting Calisthenics Coach server on {}:{}",
        config.host,
        config.port
    );

    // 연결 풀: 요청마다 새로 연결하지 않고 최대 5개를 재사용합니다
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await?;

    tracing::info!("Running database migrations...");
    // migrations/ 폴더의 SQL 파일을 컴파일 시점에 바이너리에 포함하고, 아직 안 돌린 것만 실행합니다
    sqlx::migrate!("./migrations").run(&pool).await?;

    let state = AppState {
        pool,
        jwt_secret: config.jwt_secret.clone(),
        recent_window_days: config.recent_window_days,
    };

    // `{id}`는 axum 0.8의 경로 파라미터 문법입니다 (`Path<String>`으로 추출)
    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route("/profile", get(get_profile).put(upsert_profile))
        .route("/workout-plans/generate", post(generate_plan))
        .route("/workout-plans/active", get(get_active_plan))
        .route("/workout-plans/{id}", get(get_plan))
        // 모든 핸들러에 AppState를 주입합니다 (`State<AppState>` 추출자)
        .with_state(state);

    // 개발 환경 기준으로 모든 출처를 허용합니다
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // 레이어는 나중에 추가한 것이 바깥쪽입니다: TraceLayer → CORS → 라우터
    let app = Router::new()
        .nest("/api/v1", api_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
