//! 도메인 모델.

pub mod book;

pub use book::{seed_books, Book, NewBook, MAX_FIELD_LEN};

use validator::ValidationErrors;

/// 검증 에러를 사람이 읽을 수 있는 한 줄 메시지로 변환합니다.
///
/// 필드 이름 순으로 정렬되며 메시지는 `; `로 구분됩니다.
pub fn describe_validation_errors(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    fields
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{}: invalid value", field))
            })
        })
        .collect::<Vec<_>>()
        .join("; ")
}
