//! 페이지 조회 포트.
//!
//! 구현: `artpick-network` crate (reqwest)

use async_trait::async_trait;

use crate::error::CoreError;
use crate::models::page::{PageBuffer, PageSize};

/// 원격 카탈로그 페이지 조회기
///
/// 재시도는 하지 않는다. 재시도 정책은 호출자가 정한다.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// 지정 페이지(1부터)를 조회
    ///
    /// 전송 실패는 `CoreError::Network`, 실패 상태 코드나 잘못된
    /// 페이로드는 `CoreError::Service`로 반환한다.
    async fn fetch_page(&self, page: u32, size: PageSize) -> Result<PageBuffer, CoreError>;
}

/// 페이지 번호 사전 검증 (I/O 전에 호출)
pub fn validate_page_number(page: u32) -> Result<(), CoreError> {
    if page == 0 {
        return Err(CoreError::Validation {
            field: "page".to_string(),
            message: "페이지 번호는 1 이상이어야 함".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::artwork::Artwork;
    use std::sync::Arc;

    struct SingleRowFetcher;

    #[async_trait]
    impl PageFetcher for SingleRowFetcher {
        async fn fetch_page(&self, page: u32, size: PageSize) -> Result<PageBuffer, CoreError> {
            validate_page_number(page)?;
            let id = u64::from(page - 1) * u64::from(size.rows());
            let record: Artwork = serde_json::from_value(serde_json::json!({ "id": id }))?;
            Ok(PageBuffer::new(vec![record], 1))
        }
    }

    #[test]
    fn fetcher_is_object_safe() {
        let fetcher: Arc<dyn PageFetcher> = Arc::new(SingleRowFetcher);
        let page = tokio_test::block_on(fetcher.fetch_page(3, PageSize::Ten)).unwrap();
        assert_eq!(page.ids().collect::<Vec<_>>(), vec![20]);
    }

    #[test]
    fn page_zero_is_rejected() {
        let fetcher = SingleRowFetcher;
        let result = tokio_test::block_on(fetcher.fetch_page(0, PageSize::Ten));
        assert!(matches!(result, Err(CoreError::Validation { .. })));
    }
}
