//! # 공유 비밀값 생성
//!
//! - `PasswordHasher`: 비밀번호 보호 문서의 비밀번호를 Argon2id로 해싱/검증
//!   (비용 파라미터는 설정에서 조절)
//! - `generate_access_token()`: 공유 링크에 들어가는 256비트 난수 토큰
//!
//! 평문 비밀번호는 저장하거나 로그에 남기지 않습니다.

use argon2::{
    password_hash::{PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};
use rand_core::{OsRng, RngCore};

use crate::config::PasswordHashConfig;
use crate::error::AppError;

/// Argon2id 해셔. 파라미터만 들고 있으므로 복제 비용이 작습니다.
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    params: Params,
}

impl PasswordHasher {
    pub fn new(config: &PasswordHashConfig) -> Result<Self, AppError> {
        let params = Params::new(config.memory_kib, config.iterations, config.parallelism, None)
            .map_err(|e| AppError::Internal(format!("Invalid password hash parameters: {e}")))?;

        Ok(Self { params })
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    pub fn hash_password(&self, password: &str) -> Result<String, AppError> {
        let salt = SaltString::generate(&mut OsRng);

        let hash = self
            .argon2()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::Internal(format!("Password hashing failed: {e}")))?;

        Ok(hash.to_string())
    }

    /// 해시 문자열에 기록된 파라미터로 검증하므로, 설정이 바뀌어도
    /// 예전에 만든 해시를 계속 검증할 수 있습니다.
    pub fn verify_password(&self, password: &str, hash: &str) -> Result<bool, AppError> {
        let parsed_hash = PasswordHash::new(hash)
            .map_err(|e| AppError::Internal(format!("Password hash parse error: {e}")))?;

        match self.argon2().verify_password(password.as_bytes(), &parsed_hash) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(AppError::Internal(format!(
                "Password verification failed: {e}"
            ))),
        }
    }
}

/// 공유 링크용 토큰: OsRng에서 뽑은 32바이트를 16진수 문자열(64자)로 만듭니다.
pub fn generate_access_token() -> String {
    let mut bytes = [0u8; 32];
    OsRng.fill_bytes(&mut bytes);
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}
