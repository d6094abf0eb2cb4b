//! 쿠키 기반 토큰 전송.
//!
//! Access/Refresh Token은 `HttpOnly; Path=/` 쿠키로 전달됩니다.
//! `Secure`와 `SameSite` 속성은 기본적으로 붙지 않으며 설정으로만 켤 수 있습니다.

use axum::http::{header::COOKIE, HeaderMap};
use shelf_core::{AuthConfig, SameSite};

/// Access Token 쿠키 이름.
pub const ACCESS_COOKIE_NAME: &str = "access_token";

/// Refresh Token 쿠키 이름.
pub const REFRESH_COOKIE_NAME: &str = "refresh_token";

/// 요청의 `Cookie` 헤더에서 `name` 쿠키 값을 찾습니다.
///
/// 여러 개의 `Cookie` 헤더를 모두 확인하며 빈 값은 없는 것으로 취급합니다.
pub fn get_cookie<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|header| header.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| key.trim() == name)
        .map(|(_, value)| value.trim())
        .filter(|value| !value.is_empty())
}

/// `Set-Cookie` 헤더 생성 정책.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CookiePolicy {
    pub secure: bool,
    pub same_site: Option<SameSite>,
}

impl CookiePolicy {
    pub fn from_config(auth: &AuthConfig) -> Self {
        Self {
            secure: auth.cookie_secure,
            same_site: auth.cookie_same_site,
        }
    }

    /// 토큰을 담는 세션 쿠키 (`Max-Age` 없음).
    pub fn session_cookie(&self, name: &str, value: &str) -> String {
        self.with_attributes(format!("{}={}; HttpOnly; Path=/", name, value))
    }

    /// 브라우저에서 쿠키를 삭제하는 만료 쿠키.
    pub fn expired_cookie(&self, name: &str) -> String {
        self.with_attributes(format!("{}=; HttpOnly; Path=/; Max-Age=0", name))
    }

    fn with_attributes(&self, mut cookie: String) -> String {
        if self.secure {
            cookie.push_str("; Secure");
        }
        if let Some(same_site) = self.same_site {
            cookie.push_str("; SameSite=");
            cookie.push_str(same_site.as_attribute());
        }
        cookie
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(values: &[&str]) -> HeaderMap {
        let mut headers = HeaderMap::new();
        for value in values {
            headers.append(COOKIE, HeaderValue::from_str(value).unwrap());
        }
        headers
    }

    #[test]
    fn test_get_cookie_single_header() {
        let h = headers(&["access_token=abc.def.ghi; refresh_token=xyz"]);
        assert_eq!(get_cookie(&h, ACCESS_COOKIE_NAME), Some("abc.def.ghi"));
        assert_eq!(get_cookie(&h, REFRESH_COOKIE_NAME), Some("xyz"));
        assert_eq!(get_cookie(&h, "session"), None);
    }

    #[test]
    fn test_get_cookie_multiple_headers() {
        let h = headers(&["theme=dark", "refresh_token=r1"]);
        assert_eq!(get_cookie(&h, REFRESH_COOKIE_NAME), Some("r1"));
        assert_eq!(get_cookie(&h, "theme"), Some("dark"));
    }

    #[test]
    fn test_get_cookie_ignores_prefix_matches_and_empty() {
        let h = headers(&["my_access_token=legacy; access_token="]);
        assert_eq!(get_cookie(&h, ACCESS_COOKIE_NAME), None);
        assert_eq!(get_cookie(&HeaderMap::new(), ACCESS_COOKIE_NAME), None);
    }

    #[test]
    fn test_default_policy_has_no_hardening() {
        let policy = CookiePolicy::default();
        assert_eq!(
            policy.session_cookie(ACCESS_COOKIE_NAME, "tok"),
            "access_token=tok; HttpOnly; Path=/"
        );
        assert_eq!(
            policy.expired_cookie(REFRESH_COOKIE_NAME),
            "refresh_token=; HttpOnly; Path=/; Max-Age=0"
        );
    }

    #[test]
    fn test_hardened_policy() {
        let policy = CookiePolicy {
            secure: true,
            same_site: Some(SameSite::Strict),
        };
        assert_eq!(
            policy.session_cookie(ACCESS_COOKIE_NAME, "tok"),
            "access_token=tok; HttpOnly; Path=/; Secure; SameSite=Strict"
        );
    }
}
