//! 자격증명 저장소용 Argon2id 해싱.
//!
//! 평문 비밀번호는 서버 시작 시 [`CredentialStore`](super::CredentialStore)를
//! 구성할 때 한 번만 해싱되고, 이후에는 PHC 문자열만 메모리에 남습니다.
//! 로그인 시 검증은 요청마다 수행되며 수십 ms의 CPU를 쓰므로 호출자는
//! `spawn_blocking` 안에서 [`verify_password`]를 호출합니다.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

/// 비밀번호 처리 에러.
///
/// 로그인 응답에는 드러나지 않고 `debug!` 로그에만 남습니다.
#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    #[error("password hashing failed")]
    HashingFailed,
    #[error("password does not match")]
    Mismatch,
    #[error("stored hash is not a PHC string")]
    InvalidHashFormat,
}

/// 저장소 전체가 공유하는 Argon2id 설정 (crate 기본 파라미터).
fn hasher() -> Argon2<'static> {
    Argon2::default()
}

/// 평문 비밀번호를 솔트가 포함된 PHC 문자열로 해싱합니다.
///
/// 같은 비밀번호라도 호출마다 다른 솔트가 생성됩니다.
///
/// ```rust,ignore
/// let phc = hash_password("admin")?;
/// assert!(phc.starts_with("$argon2id$v=19$"));
/// ```
pub fn hash_password(plaintext: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);
    hasher()
        .hash_password(plaintext.as_bytes(), &salt)
        .map(|phc| phc.to_string())
        .map_err(|_| PasswordError::HashingFailed)
}

/// 평문 비밀번호가 저장된 PHC 해시와 일치하는지 확인합니다.
///
/// # Errors
///
/// - [`PasswordError::InvalidHashFormat`]: `phc`를 파싱할 수 없음
/// - [`PasswordError::Mismatch`]: 비밀번호 불일치
pub fn verify_password(plaintext: &str, phc: &str) -> Result<(), PasswordError> {
    let stored = PasswordHash::new(phc).map_err(|_| PasswordError::InvalidHashFormat)?;
    hasher()
        .verify_password(plaintext.as_bytes(), &stored)
        .map_err(|_| PasswordError::Mismatch)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify_password() {
        let hash = hash_password("admin").unwrap();

        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("admin", &hash).is_ok());
        assert!(matches!(
            verify_password("wrong", &hash),
            Err(PasswordError::Mismatch)
        ));
    }

    #[test]
    fn test_same_password_different_salt() {
        let hash1 = hash_password("user").unwrap();
        let hash2 = hash_password("user").unwrap();

        assert_ne!(hash1, hash2);
        assert!(verify_password("user", &hash1).is_ok());
        assert!(verify_password("user", &hash2).is_ok());
    }

    #[test]
    fn test_invalid_hash_format() {
        let result = verify_password("password", "not-a-valid-hash");
        assert!(matches!(result, Err(PasswordError::InvalidHashFormat)));
    }

    #[test]
    fn test_unicode_password() {
        let hash = hash_password("한글패스워드123").unwrap();
        assert!(verify_password("한글패스워드123", &hash).is_ok());
    }
}
