//! 인증 및 권한 부여.
//!
//! 쿠키 기반 JWT 인증과 역할 기반 접근 제어를 제공합니다.
//!
//! # 구성 요소
//!
//! - [`CredentialStore`]: 사용자 이름 → {id, 비밀번호 해시, 역할}
//! - [`hash_password`] / [`verify_password`]: Argon2id 해싱
//! - [`TokenIssuer`] / [`TokenVerifier`]: HS256 토큰 발급/검증
//! - [`CookiePolicy`]: `access_token` / `refresh_token` 쿠키 전송
//! - [`require_access_token`] / [`require_admin`]: 라우트 가드 미들웨어
//!
//! # 알려진 한계
//!
//! - Refresh Token은 사용 후에도 무효화되지 않습니다 (재사용 가능).
//! - 로그아웃은 쿠키만 지우며 발급된 토큰은 만료 시까지 유효합니다.
//! - 쿠키에는 기본적으로 `Secure`/`SameSite` 속성이 없습니다.

mod cookies;
mod jwt;
mod middleware;
mod password;
mod roles;
mod store;

pub use cookies::{get_cookie, CookiePolicy, ACCESS_COOKIE_NAME, REFRESH_COOKIE_NAME};
pub use jwt::{Claims, TokenError, TokenIssuer, TokenKind, TokenPair, TokenVerifier};
pub use middleware::{authenticate, require_access_token, require_admin, require_role, AuthError};
pub use password::{hash_password, verify_password, PasswordError};
pub use roles::Role;
pub use store::{CredentialStore, UserRecord};
