//! SQLite 도서 저장소.
//!
//! `books` 테이블은 연결 시 없으면 생성됩니다. `id`는 rowid 별칭이므로
//! 새 ID는 가장 큰 기존 ID + 1입니다. 저자 검색은 SQLite `LIKE`를 사용하므로
//! 대소문자 무시는 ASCII 범위에서만 동작합니다.

use std::str::FromStr;

use async_trait::async_trait;
use shelf_core::{Book, NewBook};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::info;

use super::{BookRepository, RepositoryError};

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS books (
    id INTEGER PRIMARY KEY,
    title TEXT NOT NULL,
    author TEXT NOT NULL
)";

/// `sqlx` SQLite 풀 기반 도서 저장소.
#[derive(Debug, Clone)]
pub struct SqliteBookRepository {
    pool: SqlitePool,
}

impl SqliteBookRepository {
    /// 연결 URL로 풀을 만들고 스키마를 준비합니다.
    ///
    /// 파일이 없으면 생성합니다. `sqlite::memory:`는 연결마다 별도의
    /// 데이터베이스이므로 연결 1개로 고정됩니다.
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self, RepositoryError> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);

        let in_memory = url.contains(":memory:") || url.contains("mode=memory");
        let pool_options = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(max_connections.max(1))
        };

        let pool = pool_options.connect_with(options).await?;
        let repo = Self::from_pool(pool);
        repo.ensure_schema().await?;

        info!(url, "SQLite book repository ready");
        Ok(repo)
    }

    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn ensure_schema(&self) -> Result<(), RepositoryError> {
        sqlx::query(CREATE_TABLE).execute(&self.pool).await?;
        Ok(())
    }
}

/// `LIKE` 패턴의 와일드카드를 이스케이프합니다.
fn like_pattern(needle: &str) -> String {
    let escaped = needle
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

#[async_trait]
impl BookRepository for SqliteBookRepository {
    fn backend(&self) -> &'static str {
        "sqlite"
    }

    async fn list(&self) -> Result<Vec<Book>, RepositoryError> {
        let books = sqlx::query_as::<_, Book>("SELECT id, title, author FROM books ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(books)
    }

    async fn get(&self, id: i64) -> Result<Book, RepositoryError> {
        sqlx::query_as::<_, Book>("SELECT id, title, author FROM books WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(RepositoryError::NotFound(id))
    }

    async fn create(&self, new: NewBook) -> Result<Book, RepositoryError> {
        let book = sqlx::query_as::<_, Book>(
            "INSERT INTO books (title, author) VALUES (?, ?) RETURNING id, title, author",
        )
        .bind(&new.title)
        .bind(&new.author)
        .fetch_one(&self.pool)
        .await?;
        Ok(book)
    }

    async fn update(&self, id: i64, new: NewBook) -> Result<Book, RepositoryError> {
        sqlx::query_as::<_, Book>(
            "UPDATE books SET title = ?, author = ? WHERE id = ? RETURNING id, title, author",
        )
        .bind(&new.title)
        .bind(&new.author)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(RepositoryError::NotFound(id))
    }

    async fn delete(&self, id: i64) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM books WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(id));
        }
        Ok(())
    }

    async fn search_by_author(&self, author: &str) -> Result<Vec<Book>, RepositoryError> {
        if author.is_empty() {
            return self.list().await;
        }

        let books = sqlx::query_as::<_, Book>(
            "SELECT id, title, author FROM books WHERE author LIKE ? ESCAPE '\\' ORDER BY id",
        )
        .bind(like_pattern(author))
        .fetch_all(&self.pool)
        .await?;
        Ok(books)
    }

    async fn reset(&self) -> Result<(), RepositoryError> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("DROP TABLE IF EXISTS books").execute(&mut *tx).await?;
        sqlx::query(CREATE_TABLE).execute(&mut *tx).await?;
        tx.commit().await?;
        Ok(())
    }

    async fn is_healthy(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }
}
