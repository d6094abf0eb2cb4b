//! # Shelf Core
//!
//! Shelf 서비스의 핵심 도메인 모델 및 공통 인프라를 제공합니다.
//!
//! 이 크레이트는 API 서버와 무관하게 사용되는 기본 타입을 제공합니다:
//! - 도서(Book) 도메인 모델 및 입력 검증
//! - 설정 관리 (파일 + 환경 변수)
//! - 로깅 인프라
//! - 공통 에러 타입

pub mod config;
pub mod domain;
pub mod error;
pub mod logging;

pub use config::*;
pub use domain::*;
pub use error::*;
pub use logging::*;
