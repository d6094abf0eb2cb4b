//! 메모리 기반 자격증명 저장소.
//!
//! 서버 시작 시 한 번 구성되며 이후에는 읽기 전용입니다.
//! 사용자 등록 엔드포인트가 없으므로 잠금 없이 `Arc`로 공유합니다.

use std::collections::HashMap;

use shelf_core::{AuthConfig, SeedUser, ShelfError};
use tracing::debug;

use super::password::{hash_password, verify_password};
use super::Role;

/// 저장된 사용자 레코드.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub id: String,
    pub username: String,
    pub password_hash: String,
    pub role: Role,
}

/// 사용자 이름 → 사용자 레코드 매핑.
#[derive(Debug)]
pub struct CredentialStore {
    users: HashMap<String, UserRecord>,
    /// 존재하지 않는 사용자 검증용 해시 (응답 시간으로 사용자 존재 여부가 드러나지 않도록)
    decoy_hash: String,
}

/// 내장 기본 사용자 목록 (username, password, id, role).
const DEFAULT_USERS: &[(&str, &str, &str, Role)] = &[
    ("admin", "admin", "12345", Role::Admin),
    ("user", "user", "67890", Role::User),
];

impl CredentialStore {
    /// 설정의 사용자 목록으로 저장소를 구성합니다.
    ///
    /// 목록이 비어 있으면 내장 기본 사용자를 사용합니다.
    pub fn from_config(auth: &AuthConfig) -> Result<Self, ShelfError> {
        if auth.users.is_empty() {
            Self::with_default_users()
        } else {
            Self::from_seed(&auth.users)
        }
    }

    /// 내장 기본 사용자(`admin`/`admin`, `user`/`user`)로 저장소를 구성합니다.
    pub fn with_default_users() -> Result<Self, ShelfError> {
        let mut store = Self::empty()?;
        for (username, password, id, role) in DEFAULT_USERS {
            store.insert(id, username, password, *role)?;
        }
        Ok(store)
    }

    /// 평문 비밀번호가 포함된 시드 목록으로 저장소를 구성합니다.
    ///
    /// 알 수 없는 역할이나 중복된 사용자 이름은 설정 에러입니다.
    pub fn from_seed(seeds: &[SeedUser]) -> Result<Self, ShelfError> {
        let mut store = Self::empty()?;
        for seed in seeds {
            let role = Role::parse(&seed.role).ok_or_else(|| {
                ShelfError::Config(format!(
                    "unknown role '{}' for user '{}'",
                    seed.role, seed.username
                ))
            })?;
            if store.users.contains_key(&seed.username) {
                return Err(ShelfError::Config(format!(
                    "duplicate username '{}'",
                    seed.username
                )));
            }
            store.insert(&seed.id, &seed.username, &seed.password, role)?;
        }
        Ok(store)
    }

    fn empty() -> Result<Self, ShelfError> {
        let decoy_hash = hash_password(&uuid::Uuid::new_v4().to_string())
            .map_err(|e| ShelfError::Internal(format!("hashing decoy password: {}", e)))?;
        Ok(Self {
            users: HashMap::new(),
            decoy_hash,
        })
    }

    fn insert(&mut self, id: &str, username: &str, password: &str, role: Role) -> Result<(), ShelfError> {
        let password_hash = hash_password(password)
            .map_err(|e| ShelfError::Internal(format!("hashing password for '{}': {}", username, e)))?;

        self.users.insert(
            username.to_string(),
            UserRecord {
                id: id.to_string(),
                username: username.to_string(),
                password_hash,
                role,
            },
        );
        Ok(())
    }

    /// 사용자 이름으로 레코드 조회.
    pub fn find(&self, username: &str) -> Option<&UserRecord> {
        self.users.get(username)
    }

    /// 자격증명을 검증하고 일치하는 사용자를 반환합니다.
    ///
    /// 사용자가 없거나 비밀번호가 다르면 `None`입니다. 사용자가 없어도 같은
    /// 비용의 Argon2 검증을 한 번 수행합니다. Argon2 검증은 CPU를 사용하므로
    /// 비동기 컨텍스트에서는 blocking 풀에서 호출해야 합니다.
    pub fn authenticate(&self, username: &str, password: &str) -> Option<&UserRecord> {
        let Some(user) = self.find(username) else {
            let _ = verify_password(password, &self.decoy_hash);
            debug!(username, "Unknown username");
            return None;
        };

        match verify_password(password, &user.password_hash) {
            Ok(()) => Some(user),
            Err(e) => {
                debug!(username, error = %e, "Password verification failed");
                None
            }
        }
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}
