//! 도서 저장소.
//!
//! 핸들러는 [`BookRepository`] trait에만 의존하며 실제 백엔드는 시작 시
//! 설정(`database.url`)에 따라 선택됩니다:
//!
//! - [`InMemoryBookRepository`]: 기본 시드 도서 2권으로 시작하는 메모리 저장소
//! - [`SqliteBookRepository`]: `sqlx` SQLite 풀 기반 저장소
//!
//! 두 백엔드 모두 새 ID를 가장 큰 기존 ID + 1로 부여합니다.

mod memory;
mod sqlite;

pub use memory::InMemoryBookRepository;
pub use sqlite::SqliteBookRepository;

use async_trait::async_trait;
use shelf_core::{Book, NewBook};

/// 저장소 에러.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("book {0} not found")]
    NotFound(i64),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// 도서 CRUD 저장소.
///
/// 입력 검증은 호출자(핸들러)의 책임입니다.
#[async_trait]
pub trait BookRepository: Send + Sync {
    /// 백엔드 이름 (헬스 체크 표시용).
    fn backend(&self) -> &'static str;

    /// 전체 도서 목록 (ID 오름차순).
    async fn list(&self) -> Result<Vec<Book>, RepositoryError>;

    async fn get(&self, id: i64) -> Result<Book, RepositoryError>;

    async fn create(&self, new: NewBook) -> Result<Book, RepositoryError>;

    async fn update(&self, id: i64, new: NewBook) -> Result<Book, RepositoryError>;

    async fn delete(&self, id: i64) -> Result<(), RepositoryError>;

    /// 저자 이름에 `author`가 포함된 도서 검색 (대소문자 무시, 빈 문자열은 전체).
    async fn search_by_author(&self, author: &str) -> Result<Vec<Book>, RepositoryError>;

    /// 저장소를 비우고 스키마를 다시 만듭니다.
    async fn reset(&self) -> Result<(), RepositoryError>;

    async fn is_healthy(&self) -> bool {
        true
    }
}
