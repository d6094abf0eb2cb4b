//! JWT 토큰 발급 및 검증.
//!
//! Access Token(기본 15분)과 Refresh Token(기본 7일)은 같은 구조를 가지며
//! 만료 시간만 다릅니다. 서버는 토큰을 저장하지 않습니다.
//!
//! 검증 규칙: HS256 서명이 공유 비밀 키와 일치하고, 현재 시각이 `exp`보다
//! 이전이어야 합니다. 시계 오차 허용(leeway)은 없습니다. 쿠키 용도에 맞는
//! 토큰인지는 [`TokenVerifier::verify_kind`]로 추가 확인합니다.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::Role;

/// 토큰 종류.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

/// JWT 페이로드.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject - 사용자 ID
    pub sub: String,
    /// 사용자 역할
    pub role: Role,
    /// 토큰 종류 (`access` 쿠키에는 Access Token만 허용)
    pub token_type: TokenKind,
    /// Issued At (Unix timestamp)
    pub iat: i64,
    /// Expiration (Unix timestamp)
    pub exp: i64,
    /// JWT ID - 토큰 고유 식별자
    pub jti: String,
}

impl Claims {
    fn new(subject: &str, role: Role, kind: TokenKind, now: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            sub: subject.to_string(),
            role,
            token_type: kind,
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
            jti: uuid::Uuid::new_v4().to_string(),
        }
    }

    /// `now` 기준으로 만료되었는지 확인.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.exp
    }

    /// 특정 역할 이상인지 확인.
    pub fn has_role(&self, required_role: Role) -> bool {
        self.role.level() >= required_role.level()
    }
}

/// Access Token + Refresh Token 페어.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// 토큰 발급/검증 에러.
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("Token has expired")]
    Expired,
    #[error("Invalid token signature")]
    InvalidSignature,
    #[error("Malformed token")]
    Malformed,
    #[error("Invalid token type")]
    WrongKind,
    #[error("token encoding failed: {0}")]
    Encoding(#[from] jsonwebtoken::errors::Error),
}

/// 토큰 발급기.
///
/// 비밀 키로부터 한 번 만든 `EncodingKey`를 재사용합니다.
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl TokenIssuer {
    pub fn new(secret: &SecretString, access_ttl: Duration, refresh_ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.expose_secret().as_bytes()),
            access_ttl,
            refresh_ttl,
        }
    }

    /// 토큰 종류별 유효 기간.
    pub fn ttl(&self, kind: TokenKind) -> Duration {
        match kind {
            TokenKind::Access => self.access_ttl,
            TokenKind::Refresh => self.refresh_ttl,
        }
    }

    /// 현재 시각 기준으로 토큰을 발급합니다.
    pub fn issue(&self, subject: &str, role: Role, kind: TokenKind) -> Result<String, TokenError> {
        self.issue_at(subject, role, kind, Utc::now())
    }

    /// `now`를 발급 시각으로 하여 토큰을 발급합니다.
    pub fn issue_at(
        &self,
        subject: &str,
        role: Role,
        kind: TokenKind,
        now: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        let claims = Claims::new(subject, role, kind, now, self.ttl(kind));
        Ok(encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)?)
    }

    /// Access Token + Refresh Token 쌍을 발급합니다.
    pub fn issue_pair(&self, subject: &str, role: Role) -> Result<TokenPair, TokenError> {
        let now = Utc::now();
        Ok(TokenPair {
            access_token: self.issue_at(subject, role, TokenKind::Access, now)?,
            refresh_token: self.issue_at(subject, role, TokenKind::Refresh, now)?,
        })
    }
}

/// 토큰 검증기.
pub struct TokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    pub fn new(secret: &SecretString) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // 만료는 verify_at에서 주입된 시각으로 직접 검사
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            decoding_key: DecodingKey::from_secret(secret.expose_secret().as_bytes()),
            validation,
        }
    }

    /// 현재 시각 기준으로 토큰을 검증하고 Claims를 반환합니다.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        self.verify_at(token, Utc::now())
    }

    /// `now` 기준으로 토큰을 검증합니다.
    ///
    /// # Errors
    ///
    /// - [`TokenError::InvalidSignature`]: 서명 불일치
    /// - [`TokenError::Malformed`]: 구조/인코딩/클레임 파싱 실패
    /// - [`TokenError::Expired`]: `now >= exp`
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, TokenError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            match e.kind() {
                ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Malformed,
            }
        })?;

        if data.claims.is_expired_at(now) {
            return Err(TokenError::Expired);
        }

        Ok(data.claims)
    }

    /// 토큰을 검증하고 종류가 `kind`인지 확인합니다.
    ///
    /// 종류가 다르면 [`TokenError::WrongKind`]입니다. Refresh Token이 Access Token
    /// 자리에서 쓰이면 Access Token 수명 제한이 무의미해집니다.
    pub fn verify_kind(&self, token: &str, kind: TokenKind) -> Result<Claims, TokenError> {
        let claims = self.verify(token)?;
        if claims.token_type != kind {
            return Err(TokenError::WrongKind);
        }
        Ok(claims)
    }
}
