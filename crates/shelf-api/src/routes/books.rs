//! 도서 카탈로그 endpoint.
//!
//! 인증 없이 사용할 수 있는 공개 CRUD API입니다.
//! 생성/수정 입력은 `validator`로 검증하며 실패 시 422를 반환합니다.

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, Query, State,
    },
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use shelf_core::{Book, NewBook, ShelfError};
use tracing::info;
use utoipa::IntoParams;
use validator::Validate;

use super::MessageResponse;
use crate::error::{ApiResult, ErrorResponse};
use crate::state::AppState;

/// 저자 검색 쿼리.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct SearchQuery {
    /// 저자 이름 일부 (대소문자 무시, 생략 시 전체)
    #[serde(default)]
    pub author: Option<String>,
}

fn validated(payload: Result<Json<NewBook>, JsonRejection>) -> ApiResult<NewBook> {
    let Json(new) = payload?;
    new.validate().map_err(ShelfError::from)?;
    Ok(new)
}

/// 전체 도서 목록.
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    responses(
        (status = 200, description = "도서 목록", body = Vec<Book>)
    )
)]
pub async fn list_books(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Book>>> {
    Ok(Json(state.books.list().await?))
}

/// 저자 이름으로 도서 검색.
#[utoipa::path(
    get,
    path = "/books/search",
    tag = "books",
    params(SearchQuery),
    responses(
        (status = 200, description = "검색 결과", body = Vec<Book>)
    )
)]
pub async fn search_books(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SearchQuery>,
) -> ApiResult<Json<Vec<Book>>> {
    let author = query.author.unwrap_or_default();
    Ok(Json(state.books.search_by_author(&author).await?))
}

/// 도서 단건 조회.
#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "books",
    params(
        ("id" = i64, Path, description = "도서 ID")
    ),
    responses(
        (status = 200, description = "도서", body = Book),
        (status = 404, description = "도서 없음", body = ErrorResponse)
    )
)]
pub async fn get_book(
    State(state): State<Arc<AppState>>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<Book>> {
    let Path(id) = id?;
    Ok(Json(state.books.get(id).await?))
}

/// 도서 등록.
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    request_body = NewBook,
    responses(
        (status = 200, description = "등록된 도서", body = Book),
        (status = 422, description = "입력 검증 실패", body = ErrorResponse)
    )
)]
pub async fn create_book(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<NewBook>, JsonRejection>,
) -> ApiResult<Json<Book>> {
    let new = validated(payload)?;
    let book = state.books.create(new).await?;
    info!(book_id = book.id, "Book created");
    Ok(Json(book))
}

/// 도서 수정.
#[utoipa::path(
    put,
    path = "/books/{id}",
    tag = "books",
    params(
        ("id" = i64, Path, description = "도서 ID")
    ),
    request_body = NewBook,
    responses(
        (status = 200, description = "수정된 도서", body = Book),
        (status = 404, description = "도서 없음", body = ErrorResponse),
        (status = 422, description = "입력 검증 실패", body = ErrorResponse)
    )
)]
pub async fn update_book(
    State(state): State<Arc<AppState>>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<NewBook>, JsonRejection>,
) -> ApiResult<Json<Book>> {
    let Path(id) = id?;
    let new = validated(payload)?;
    let book = state.books.update(id, new).await?;
    info!(book_id = id, "Book updated");
    Ok(Json(book))
}

/// 도서 삭제.
#[utoipa::path(
    delete,
    path = "/books/{id}",
    tag = "books",
    params(
        ("id" = i64, Path, description = "도서 ID")
    ),
    responses(
        (status = 200, description = "삭제 완료", body = MessageResponse),
        (status = 404, description = "도서 없음", body = ErrorResponse)
    )
)]
pub async fn delete_book(
    State(state): State<Arc<AppState>>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<MessageResponse>> {
    let Path(id) = id?;
    state.books.delete(id).await?;
    info!(book_id = id, "Book deleted");
    Ok(Json(MessageResponse::new(format!(
        "Book with id {} deleted",
        id
    ))))
}

/// 도서 저장소 초기화 (테이블 삭제 후 재생성).
#[utoipa::path(
    post,
    path = "/setup-database",
    tag = "books",
    responses(
        (status = 200, description = "초기화 완료", body = MessageResponse)
    )
)]
pub async fn setup_database(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<MessageResponse>> {
    state.books.reset().await?;
    info!(backend = state.books.backend(), "Book storage reset");
    Ok(Json(MessageResponse::new("Database setup complete")))
}

/// 도서 라우터 생성.
pub fn books_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/books", get(list_books).post(create_book))
        .route("/books/search", get(search_books))
        .route(
            "/books/{id}",
            get(get_book).put(update_book).delete(delete_book),
        )
        .route("/setup-database", post(setup_database))
}
