//! Shelf 서비스의 공통 에러 타입.

use thiserror::Error;

/// 핵심 서비스 에러.
#[derive(Debug, Error)]
pub enum ShelfError {
    /// 설정 에러 (잘못된 사용자 목록, 범위를 벗어난 토큰 수명 등)
    #[error("설정 에러: {0}")]
    Config(String),

    /// 잘못된 입력
    #[error("잘못된 입력: {0}")]
    Validation(String),

    /// 내부 에러
    #[error("내부 에러: {0}")]
    Internal(String),
}

impl From<validator::ValidationErrors> for ShelfError {
    fn from(errors: validator::ValidationErrors) -> Self {
        ShelfError::Validation(crate::domain::describe_validation_errors(&errors))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NewBook;
    use validator::Validate;

    #[test]
    fn test_from_validation_errors() {
        let errors = NewBook::new("", "Author").validate().unwrap_err();
        match ShelfError::from(errors) {
            ShelfError::Validation(message) => assert!(message.contains("title")),
            other => panic!("unexpected error: {other}"),
        }
    }
}
