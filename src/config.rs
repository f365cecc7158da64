//! # 애플리케이션 설정(Configuration) 모듈
//!
//! 환경변수에서 서버 설정값을 읽어오는 모듈입니다.
//! `.env` 파일이나 시스템 환경변수에서 값을 가져옵니다.
//!
//! 설정 항목:
//! - `DATABASE_URL`: SQLite 데이터베이스 경로 (필수)
//! - `JWT_SECRET`: 액세스 토큰 검증용 비밀키 (필수)
//! - `HOST`: 서버 바인딩 주소 (기본값 `0.0.0.0`)
//! - `PORT`: 서버 포트 번호 (기본값 `3000`)
//! - `RECENT_WINDOW_DAYS`: "최근 수행한 운동"으로 볼 기간 (기본값 `14`)

use std::env;

/// 기본 최근 운동 기간 (일)
pub const DEFAULT_RECENT_WINDOW_DAYS: i64 = 14;

/// 애플리케이션 전체 설정
///
/// 서버 시작 시 환경변수에서 한 번 읽어온 후 `AppState`로 공유됩니다.
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite 데이터베이스 경로 (예: "sqlite:coach.db?mode=rwc")
    pub database_url: String,
    /// 인증 서비스와 공유하는 HS256 비밀키
    pub jwt_secret: String,
    pub host: String,
    pub port: u16,
    /// 이 기간 안에 완료한 운동은 선택 우선순위가 낮아집니다
    pub recent_window_days: i64,
}

impl Config {
    /// 환경변수에서 설정값을 읽어 Config 인스턴스를 생성합니다.
    ///
    /// # 에러
    /// `DATABASE_URL`과 `JWT_SECRET`은 필수이며, 없으면 에러가 발생합니다.
    /// 나머지 설정은 없거나 숫자로 읽을 수 없으면 기본값을 씁니다.
    pub fn from_env() -> Result<Self, env::VarError> {
        Ok(Self {
            database_url: env::var("DATABASE_URL")?,
            jwt_secret: env::var("JWT_SECRET")?,
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .unwrap_or(3000),
            recent_window_days: env::var("RECENT_WINDOW_DAYS")
                .ok()
                .and_then(|raw| raw.parse().ok())
                .filter(|days: &i64| *days > 0)
                .unwrap_or(DEFAULT_RECENT_WINDOW_DAYS),
        })
    }
}
