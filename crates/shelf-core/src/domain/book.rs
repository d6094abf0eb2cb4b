//! 도서 도메인 모델.
//!
//! 카탈로그에 저장되는 `Book`과 생성/수정 요청에 쓰이는 `NewBook`을 정의합니다.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// 제목/저자 필드의 최대 길이 (문자 수).
pub const MAX_FIELD_LEN: u64 = 100;

/// 저장된 도서.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx-support", derive(sqlx::FromRow))]
#[cfg_attr(feature = "utoipa-support", derive(utoipa::ToSchema))]
pub struct Book {
    /// 도서 ID (저장소가 순차 발급)
    pub id: i64,
    /// 제목
    pub title: String,
    /// 저자
    pub author: String,
}

impl Book {
    /// 입력값과 ID로 도서를 구성합니다.
    pub fn from_new(id: i64, new: NewBook) -> Self {
        Self {
            id,
            title: new.title,
            author: new.author,
        }
    }

    /// 저자 이름에 `needle`이 포함되는지 확인 (대소문자 무시).
    ///
    /// 빈 문자열은 모든 도서와 일치합니다.
    pub fn author_matches(&self, needle: &str) -> bool {
        needle.is_empty() || self.author.to_lowercase().contains(&needle.to_lowercase())
    }
}

/// 도서 생성/수정 입력.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "utoipa-support", derive(utoipa::ToSchema))]
pub struct NewBook {
    /// 제목 (1-100자)
    #[validate(length(min = 1, max = MAX_FIELD_LEN, message = "title must be 1-100 characters"))]
    pub title: String,
    /// 저자 (1-100자)
    #[validate(length(min = 1, max = MAX_FIELD_LEN, message = "author must be 1-100 characters"))]
    pub author: String,
}

impl NewBook {
    pub fn new(title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
        }
    }
}

/// 기본 시드 도서 목록.
pub fn seed_books() -> Vec<Book> {
    vec![
        Book {
            id: 1,
            title: "Book 1".to_string(),
            author: "Author 1".to_string(),
        },
        Book {
            id: 2,
            title: "Book 2".to_string(),
            author: "Author 2".to_string(),
        },
    ]
}
