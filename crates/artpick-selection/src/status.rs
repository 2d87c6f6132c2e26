//! 사용자 상태 메시지.
//!
//! 작업 경계에서 잡힌 에러와 일괄 선택 결과를 화면에 표시할 문구로 바꾼다.
//! 에러 상세는 로그로 남기고, 메시지는 짧게 유지한다.

use artpick_core::error::{CoreError, RangeError};

/// 메시지 수준
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Success,
    Error,
}

/// 화면 상태 메시지
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub level: StatusLevel,
    pub text: String,
}

impl StatusMessage {
    fn success(text: String) -> Self {
        Self {
            level: StatusLevel::Success,
            text,
        }
    }

    fn error(text: String) -> Self {
        Self {
            level: StatusLevel::Error,
            text,
        }
    }

    /// 일괄 선택 성공
    pub fn bulk_selected(count: usize, pages: u32) -> Self {
        Self::success(format!(
            "{count} {} selected across {pages} {}",
            plural(count as u64, "item", "items"),
            plural(u64::from(pages), "page", "pages")
        ))
    }

    /// 페이지 조회 실패
    pub fn load_failed(page: u32, err: &CoreError) -> Self {
        Self::error(format!(
            "Failed to load page {page} ({}). The table shows the last loaded page.{}",
            error_class(err),
            retry_hint(err)
        ))
    }

    /// 허용되지 않은 페이지 크기
    pub fn invalid_page_size(rows: u32) -> Self {
        Self::error(format!(
            "Page size {rows} is not available (choose 10, 20 or 30)"
        ))
    }

    /// 일괄 선택 요청 실패
    pub fn bulk_failed(err: &CoreError) -> Self {
        match err {
            CoreError::Range(RangeError::ExceedsTotal {
                requested,
                available,
            }) => Self::error(format!(
                "Cannot select {requested} items, only {available} available"
            )),
            CoreError::Range(RangeError::NotPositive { input }) => Self::error(format!(
                "Cannot select \"{input}\" items: enter a positive whole number"
            )),
            CoreError::BulkSelectionFailed {
                completed_pages,
                total_pages,
                source,
            } => Self::error(format!(
                "Selection failed after {completed_pages} of {total_pages} pages ({}). Previous selection kept.{}",
                error_class(source),
                retry_hint(err)
            )),
            other => Self::error(format!("Selection failed ({})", error_class(other))),
        }
    }

    /// 두 메시지를 이어 붙인다. 하나라도 에러면 에러 수준
    pub fn followed_by(&self, next: &StatusMessage) -> Self {
        let level = if self.is_error() || next.is_error() {
            StatusLevel::Error
        } else {
            StatusLevel::Success
        };
        Self {
            level,
            text: format!("{}. {}", self.text, next.text),
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == StatusLevel::Error
    }
}

fn plural<'a>(n: u64, one: &'a str, many: &'a str) -> &'a str {
    if n == 1 {
        one
    } else {
        many
    }
}

/// 다시 시도하면 나아질 수 있는 실패에만 붙인다
fn retry_hint(err: &CoreError) -> &'static str {
    if err.is_transient() {
        " Try again."
    } else {
        ""
    }
}

fn error_class(err: &CoreError) -> &'static str {
    match err {
        CoreError::Network(_) => "network error",
        CoreError::Service { .. } => "service error",
        CoreError::BulkSelectionFailed { source, .. } => error_class(source),
        CoreError::Range(_) | CoreError::Validation { .. } => "invalid request",
        _ => "internal error",
    }
}
