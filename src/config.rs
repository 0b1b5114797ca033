//! # 애플리케이션 설정(Configuration) 모듈
//!
//! 환경변수에서 서버 설정값을 읽어오는 모듈입니다.
//! `.env` 파일이나 시스템 환경변수에서 값을 가져옵니다.
//!
//! 설정 항목:
//! - `DATABASE_URL`: SQLite 데이터베이스 경로 (필수)
//! - `JWT_SECRET`: ID 공급자와 공유하는 토큰 서명 비밀키 (필수)
//! - `HOST` / `PORT`: 서버 바인딩 주소
//! - `DATABASE_MAX_CONNECTIONS`: 연결 풀 크기
//! - `PASSWORD_HASH_MEMORY_KIB` / `PASSWORD_HASH_ITERATIONS` / `PASSWORD_HASH_PARALLELISM`:
//!   비밀번호 보호 문서에 쓰는 Argon2id 비용 파라미터

use std::env;
use std::str::FromStr;

#[derive(Debug, Clone)]
/// 애플리케이션 전체 설정을 담는 구조체
pub struct Config {
    /// SQLite 데이터베이스 파일 경로 (예: "sqlite:data/mdshare.db")
    pub database_url: String,
    /// Bearer 토큰 검증에 사용하는 비밀키
    pub jwt_secret: String,
    /// 서버가 바인딩할 호스트 주소 (기본값: "0.0.0.0")
    pub host: String,
    /// 서버 포트 번호 (기본값: 3000)
    pub port: u16,
    /// 연결 풀의 최대 연결 수 (기본값: 5)
    pub max_connections: u32,
    /// 비밀번호 해싱 비용
    pub password_hash: PasswordHashConfig,
}

/// Argon2id 비용 파라미터. 값이 클수록 해싱이 느려지고 무차별 대입에 강해집니다.
#[derive(Debug, Clone, Copy)]
pub struct PasswordHashConfig {
    /// 메모리 사용량 (KiB)
    pub memory_kib: u32,
    /// 반복 횟수
    pub iterations: u32,
    /// 병렬도
    pub parallelism: u32,
}

impl Default for PasswordHashConfig {
    /// argon2 크레이트의 기본값과 같습니다 (19 MiB, 2회, 병렬도 1).
    fn default() -> Self {
        Self {
            memory_kib: 19 * 1024,
            iterations: 2,
            parallelism: 1,
        }
    }
}

impl Config {
    /// 환경변수에서 설정값을 읽어 Config 인스턴스를 생성합니다.
    ///
    /// # 에러
    /// `DATABASE_URL`과 `JWT_SECRET`은 필수이며, 없으면 에러가 발생합니다.
    /// 나머지 설정은 기본값이 있어 환경변수가 없어도 동작합니다.
    pub fn from_env() -> Result<Self, env::VarError> {
        let defaults = PasswordHashConfig::default();

        Ok(Self {
            database_url: env::var("DATABASE_URL")?,
            jwt_secret: env::var("JWT_SECRET")?,
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: parse_or("PORT", 3000),
            max_connections: parse_or("DATABASE_MAX_CONNECTIONS", 5),
            password_hash: PasswordHashConfig {
                memory_kib: parse_or("PASSWORD_HASH_MEMORY_KIB", defaults.memory_kib),
                iterations: parse_or("PASSWORD_HASH_ITERATIONS", defaults.iterations),
                parallelism: parse_or("PASSWORD_HASH_PARALLELISM", defaults.parallelism),
            },
        })
    }
}

/// 환경변수를 읽어 파싱하고, 없거나 파싱에 실패하면 기본값을 씁니다.
fn parse_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}
