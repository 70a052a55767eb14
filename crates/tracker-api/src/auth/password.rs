//! 비밀번호 해싱 유틸리티.
//!
//! Argon2id 기반 비밀번호 해싱 및 검증. 평문 비밀번호는 절대 저장되지
//! 않습니다.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

/// 비밀번호 해싱 에러.
#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    #[error("비밀번호 해싱 실패")]
    HashingFailed,
}

/// 비밀번호 해싱.
///
/// 솔트는 호출마다 무작위로 생성되므로 같은 입력도 매번 다른 해시를
/// 만들지만, 모두 원래 비밀번호로 검증됩니다.
///
/// # Returns
///
/// PHC 형식의 해시 문자열 (솔트 포함, `$argon2id$...`)
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|_| PasswordError::HashingFailed)?;

    Ok(hash.to_string())
}

/// 비밀번호 검증.
///
/// 불일치뿐 아니라 해시 형식이 깨진 경우에도 `false`를 반환합니다.
/// 호출자에게 에러를 던지지 않습니다.
pub fn verify_password(password: &str, hash: &str) -> bool {
    let Ok(parsed_hash) = PasswordHash::new(hash) else {
        return false;
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify_password() {
        let password = "secret1";
        let hash = hash_password(password).unwrap();

        assert!(hash.starts_with("$argon2id$"));
        assert_ne!(hash, password);
        assert!(verify_password(password, &hash));
        assert!(!verify_password("wrong-password", &hash));
    }

    #[test]
    fn test_same_password_different_hashes() {
        let hash1 = hash_password("Password1").unwrap();
        let hash2 = hash_password("Password1").unwrap();

        // 솔트가 무작위이므로 해시는 다르지만 둘 다 검증됩니다
        assert_ne!(hash1, hash2);
        assert!(verify_password("Password1", &hash1));
        assert!(verify_password("Password1", &hash2));
    }

    #[test]
    fn test_malformed_hash_returns_false() {
        assert!(!verify_password("password", "not-a-valid-hash"));
        assert!(!verify_password("password", ""));
        assert!(!verify_password("password", "$argon2id$broken"));
    }

    #[test]
    fn test_empty_password_roundtrip() {
        let hash = hash_password("").unwrap();
        assert!(verify_password("", &hash));
        assert!(!verify_password("x", &hash));
    }
}
