//! 메모리 기반 도서 저장소.

use std::collections::BTreeMap;

use async_trait::async_trait;
use shelf_core::{seed_books, Book, NewBook};
use tokio::sync::RwLock;

use super::{BookRepository, RepositoryError};

/// `RwLock`으로 보호되는 메모리 도서 저장소.
///
/// 새 id는 현재 가장 큰 id + 1이므로, 마지막 도서를 삭제하면 그 id가 다시 쓰입니다.
#[derive(Debug)]
pub struct InMemoryBookRepository {
    inner: RwLock<BTreeMap<i64, Book>>,
}

impl InMemoryBookRepository {
    /// 빈 저장소.
    pub fn new() -> Self {
        Self::with_books(Vec::new())
    }

    /// 기본 시드 도서(`Book 1`, `Book 2`)가 들어 있는 저장소.
    pub fn seeded() -> Self {
        Self::with_books(seed_books())
    }

    pub fn with_books(books: Vec<Book>) -> Self {
        Self {
            inner: RwLock::new(books.into_iter().map(|b| (b.id, b)).collect()),
        }
    }
}

impl Default for InMemoryBookRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BookRepository for InMemoryBookRepository {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn list(&self) -> Result<Vec<Book>, RepositoryError> {
        Ok(self.inner.read().await.values().cloned().collect())
    }

    async fn get(&self, id: i64) -> Result<Book, RepositoryError> {
        self.inner
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(RepositoryError::NotFound(id))
    }

    async fn create(&self, new: NewBook) -> Result<Book, RepositoryError> {
        let mut books = self.inner.write().await;
        let id = books.keys().next_back().copied().unwrap_or(0) + 1;

        let book = Book::from_new(id, new);
        books.insert(id, book.clone());
        Ok(book)
    }

    async fn update(&self, id: i64, new: NewBook) -> Result<Book, RepositoryError> {
        let mut books = self.inner.write().await;
        let book = books
            .get_mut(&id)
            .ok_or(RepositoryError::NotFound(id))?;

        book.title = new.title;
        book.author = new.author;
        Ok(book.clone())
    }

    async fn delete(&self, id: i64) -> Result<(), RepositoryError> {
        self.inner
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(RepositoryError::NotFound(id))
    }

    async fn search_by_author(&self, author: &str) -> Result<Vec<Book>, RepositoryError> {
        Ok(self
            .inner
            .read()
            .await
            .values()
            .filter(|b| b.author_matches(author))
            .cloned()
            .collect())
    }

    async fn reset(&self) -> Result<(), RepositoryError> {
        self.inner.write().await.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_seeded_list() {
        let repo = InMemoryBookRepository::seeded();
        let books = repo.list().await.unwrap();
        assert_eq!(books, seed_books());
    }

    #[tokio::test]
    async fn test_create_assigns_next_id() {
        let repo = InMemoryBookRepository::seeded();
        let book = repo.create(NewBook::new("Book 3", "Author 3")).await.unwrap();
        assert_eq!(book.id, 3);
        assert_eq!(repo.get(3).await.unwrap(), book);
    }

    #[tokio::test]
    async fn test_id_follows_highest_existing() {
        let repo = InMemoryBookRepository::seeded();
        repo.delete(2).await.unwrap();
        let book = repo.create(NewBook::new("Again", "Someone")).await.unwrap();
        assert_eq!(book.id, 2);

        // 중간 id 삭제는 다음 id에 영향 없음
        repo.delete(1).await.unwrap();
        let book = repo.create(NewBook::new("Later", "Someone")).await.unwrap();
        assert_eq!(book.id, 3);
    }

    #[tokio::test]
    async fn test_update_and_delete_missing() {
        let repo = InMemoryBookRepository::new();
        assert!(matches!(
            repo.update(42, NewBook::new("a", "b")).await,
            Err(RepositoryError::NotFound(42))
        ));
        assert!(matches!(repo.delete(42).await, Err(RepositoryError::NotFound(42))));
        assert!(matches!(repo.get(42).await, Err(RepositoryError::NotFound(42))));
    }

    #[tokio::test]
    async fn test_update_replaces_fields() {
        let repo = InMemoryBookRepository::seeded();
        let updated = repo
            .update(1, NewBook::new("Renamed", "New Author"))
            .await
            .unwrap();
        assert_eq!(updated.id, 1);
        assert_eq!(updated.title, "Renamed");
        assert_eq!(repo.get(1).await.unwrap().author, "New Author");
    }

    #[tokio::test]
    async fn test_search_by_author() {
        let repo = InMemoryBookRepository::seeded();
        repo.create(NewBook::new("Emma", "Jane Austen")).await.unwrap();

        assert_eq!(repo.search_by_author("austen").await.unwrap().len(), 1);
        assert_eq!(repo.search_by_author("AUTHOR").await.unwrap().len(), 2);
        assert_eq!(repo.search_by_author("").await.unwrap().len(), 3);
        assert!(repo.search_by_author("tolkien").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_reset_empties_and_restarts_ids() {
        let repo = InMemoryBookRepository::seeded();
        repo.reset().await.unwrap();
        assert!(repo.list().await.unwrap().is_empty());

        let book = repo.create(NewBook::new("Fresh", "Start")).await.unwrap();
        assert_eq!(book.id, 1);
    }
}
