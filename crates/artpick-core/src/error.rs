//! ARTPICK 핵심 에러 타입.
//!
//! 페이지 조회, 일괄 선택, 설정 로드에서 발생하는 에러를 하나의 타입으로 모은다.
//! 어떤 에러도 프로세스를 종료시키지 않으며, 호출한 작업의 경계에서
//! 사용자 상태 메시지로 변환된다.

use thiserror::Error;

/// 코어 레이어 에러.
#[derive(Debug, Error)]
pub enum CoreError {
    /// 전송 계층 실패 (연결 거부, 타임아웃 등)
    #[error("네트워크 에러: {0}")]
    Network(String),

    /// 원격 서비스가 실패 상태 코드 또는 잘못된 페이로드로 응답
    #[error("서비스 에러{}: {message}", status_suffix(.status))]
    Service {
        /// HTTP 상태 코드 (페이로드 오류면 None)
        status: Option<u16>,
        /// 상세 사유
        message: String,
    },

    /// 선택 개수 범위 오류 (네트워크 호출 전에 검출)
    #[error("선택 범위 오류: {0}")]
    Range(#[from] RangeError),

    /// 일괄 선택 도중 페이지 조회 실패: 이전 선택은 그대로 유지된다
    #[error("일괄 선택 실패 ({completed_pages}/{total_pages} 페이지 완료): {source}")]
    BulkSelectionFailed {
        /// 실패 전까지 완료된 페이지 수
        completed_pages: u32,
        /// 조회해야 했던 전체 페이지 수
        total_pages: u32,
        /// 원인 에러
        #[source]
        source: Box<CoreError>,
    },

    /// 필드 유효성 검증 실패
    #[error("유효성 검증 실패 ({field}): {message}")]
    Validation {
        /// 검증 실패한 필드명
        field: String,
        /// 실패 사유
        message: String,
    },

    /// 설정값 오류
    #[error("설정 에러: {0}")]
    Config(String),

    /// JSON 직렬화/역직렬화 실패
    #[error("직렬화 에러: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CoreError {
    /// 일시적 실패인지 (네트워크/서비스): 사용자가 다시 시도할 수 있다
    pub fn is_transient(&self) -> bool {
        match self {
            CoreError::Network(_) | CoreError::Service { .. } => true,
            CoreError::BulkSelectionFailed { source, .. } => source.is_transient(),
            _ => false,
        }
    }
}

fn status_suffix(status: &Option<u16>) -> String {
    status.map(|s| format!(" ({s})")).unwrap_or_default()
}

/// 선택 개수 검증 실패 사유
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RangeError {
    /// 양의 정수가 아닌 입력
    #[error("양의 정수가 아님: {input:?}")]
    NotPositive {
        /// 사용자가 입력한 원문
        input: String,
    },

    /// 서비스가 보고한 전체 개수보다 많이 요청
    #[error("{requested}개 요청, {available}개만 존재")]
    ExceedsTotal {
        /// 요청 개수
        requested: u64,
        /// 서비스가 보고한 전체 개수
        available: u64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_error_display_includes_status() {
        let err = CoreError::Service {
            status: Some(503),
            message: "점검 중".to_string(),
        };
        assert_eq!(err.to_string(), "서비스 에러 (503): 점검 중");

        let err = CoreError::Service {
            status: None,
            message: "data 필드 없음".to_string(),
        };
        assert_eq!(err.to_string(), "서비스 에러: data 필드 없음");
    }

    #[test]
    fn transient_classification() {
        assert!(CoreError::Network("refused".to_string()).is_transient());
        assert!(CoreError::Service {
            status: Some(500),
            message: String::new()
        }
        .is_transient());
        assert!(!CoreError::Range(RangeError::ExceedsTotal {
            requested: 150,
            available: 100
        })
        .is_transient());
        assert!(!CoreError::Config("x".to_string()).is_transient());
    }

    #[test]
    fn bulk_failure_inherits_transience_from_source() {
        let err = CoreError::BulkSelectionFailed {
            completed_pages: 1,
            total_pages: 3,
            source: Box::new(CoreError::Network("timeout".to_string())),
        };
        assert!(err.is_transient());
        assert!(err.to_string().contains("1/3"));
    }

    #[test]
    fn range_error_converts_into_core_error() {
        let err: CoreError = RangeError::NotPositive {
            input: "abc".to_string(),
        }
        .into();
        assert!(matches!(err, CoreError::Range(RangeError::NotPositive { .. })));
    }
}
