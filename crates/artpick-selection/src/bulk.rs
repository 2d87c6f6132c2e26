//! 일괄 범위 선택.
//!
//! "처음 N개 선택" 요청을 전역 인덱스 `[0, N-1]` 구간으로 보고,
//! 그 구간을 덮는 페이지만 오름차순으로 하나씩 조회한다.
//! 도중에 한 페이지라도 실패하면 모은 ID를 전부 버린다.
//!
//! 서비스가 페이지 조회 사이에 순서를 바꾸지 않는다고 가정한다.
//! 순서가 바뀌면 결과 집합이 어긋날 수 있다 (스냅샷 커서 없음).

use artpick_core::error::{CoreError, RangeError};
use artpick_core::models::artwork::{Artwork, ArtworkId};
use artpick_core::models::page::PageSize;
use artpick_core::ports::page_fetcher::PageFetcher;
use std::collections::HashSet;
use std::ops::RangeInclusive;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// 사용자 입력 → 선택 개수
///
/// 앞뒤 공백은 무시한다. 숫자가 아니거나 0 이하면 `RangeError::NotPositive`.
pub fn parse_count(input: &str) -> Result<u64, RangeError> {
    let trimmed = input.trim();
    match trimmed.parse::<u64>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(RangeError::NotPositive {
            input: trimmed.to_string(),
        }),
    }
}

/// 검증된 일괄 선택 범위
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BulkRange {
    /// 요청 개수 N
    pub requested: u64,
    /// 페이지 크기
    pub size: PageSize,
    /// 첫 페이지 (1부터)
    pub first_page: u32,
    /// 마지막 페이지
    pub last_page: u32,
}

impl BulkRange {
    /// 요청 검증 및 페이지 구간 계산
    pub fn plan(requested: u64, size: PageSize, total: u64) -> Result<Self, RangeError> {
        if requested == 0 {
            return Err(RangeError::NotPositive {
                input: requested.to_string(),
            });
        }
        if requested > total {
            return Err(RangeError::ExceedsTotal {
                requested,
                available: total,
            });
        }

        let rows = u64::from(size.rows());
        let start = 0u64;
        let end = requested - 1;

        Ok(Self {
            requested,
            size,
            first_page: (start / rows) as u32 + 1,
            last_page: (end / rows) as u32 + 1,
        })
    }

    pub fn pages(&self) -> RangeInclusive<u32> {
        self.first_page..=self.last_page
    }

    pub fn page_count(&self) -> u32 {
        self.last_page - self.first_page + 1
    }

    /// 페이지 내 행의 전역 인덱스
    pub fn global_index(&self, page: u32, row: usize) -> u64 {
        u64::from(page - 1) * u64::from(self.size.rows()) + row as u64
    }

    /// 전역 인덱스가 `[0, N-1]` 안에 있는지
    pub fn covers(&self, index: u64) -> bool {
        index < self.requested
    }
}

/// 일괄 선택 결과 (아직 선택 저장소에 반영 전)
#[derive(Debug, Clone)]
pub struct BulkSelection {
    /// 선택할 ID
    pub ids: HashSet<ArtworkId>,
    /// 선택된 레코드 (전역 인덱스 순서)
    pub records: Vec<Artwork>,
    /// 요청 개수 N
    pub requested: u64,
    /// 조회한 페이지 수
    pub pages_spanned: u32,
}

/// 일괄 범위 선택기
pub struct BulkRangeSelector {
    fetcher: Arc<dyn PageFetcher>,
}

impl BulkRangeSelector {
    pub fn new(fetcher: Arc<dyn PageFetcher>) -> Self {
        Self { fetcher }
    }

    /// 처음 N개 항목의 ID 수집
    ///
    /// 범위 오류는 네트워크 호출 없이 즉시 반환한다. 페이지 조회 실패 시
    /// 그때까지 모은 ID를 버리고 `CoreError::BulkSelectionFailed`를 반환한다.
    pub async fn select_first_n(
        &self,
        requested: u64,
        size: PageSize,
        total: u64,
    ) -> Result<BulkSelection, CoreError> {
        let range = BulkRange::plan(requested, size, total)?;
        debug!(
            "일괄 선택 시작: n={requested}, 페이지 {}..={} (limit={size})",
            range.first_page, range.last_page
        );

        let mut ids = HashSet::new();
        let mut records = Vec::new();
        let mut completed_pages = 0u32;

        for page in range.pages() {
            let buffer = match self.fetcher.fetch_page(page, size).await {
                Ok(buffer) => buffer,
                Err(e) => {
                    warn!("일괄 선택 중단: 페이지 {page} 조회 실패: {e}");
                    return Err(CoreError::BulkSelectionFailed {
                        completed_pages,
                        total_pages: range.page_count(),
                        source: Box::new(e),
                    });
                }
            };

            for (row, record) in buffer.records.into_iter().enumerate() {
                if range.covers(range.global_index(page, row)) && ids.insert(record.id) {
                    records.push(record);
                }
            }
            completed_pages += 1;
        }

        if (ids.len() as u64) < requested {
            // 조회 사이 컬렉션이 줄었거나 순서가 바뀐 경우
            warn!("일괄 선택 부족: 요청 {requested}개, 수집 {}개", ids.len());
        }

        info!(
            "일괄 선택 완료: {}개, {}페이지",
            ids.len(),
            range.page_count()
        );
        Ok(BulkSelection {
            ids,
            records,
            requested,
            pages_spanned: range.page_count(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeCatalog;

    #[test]
    fn parse_count_accepts_positive_integers() {
        assert_eq!(parse_count("25"), Ok(25));
        assert_eq!(parse_count("  7 \n"), Ok(7));
    }

    #[test]
    fn parse_count_rejects_non_positive_input() {
        for input in ["", "   ", "0", "-3", "abc", "2.5", "1e3"] {
            assert!(
                matches!(parse_count(input), Err(RangeError::NotPositive { .. })),
                "입력 {input:?}"
            );
        }
    }

    #[test]
    fn plan_page_span() {
        let range = BulkRange::plan(25, PageSize::Ten, 100).unwrap();
        assert_eq!(range.pages(), 1..=3);
        assert_eq!(range.page_count(), 3);

        let range = BulkRange::plan(1, PageSize::Ten, 100).unwrap();
        assert_eq!(range.pages(), 1..=1);

        let range = BulkRange::plan(30, PageSize::Thirty, 30).unwrap();
        assert_eq!(range.pages(), 1..=1);

        let range = BulkRange::plan(31, PageSize::Thirty, 100).unwrap();
        assert_eq!(range.pages(), 1..=2);
    }

    #[test]
    fn plan_rejects_out_of_range() {
        assert_eq!(
            BulkRange::plan(150, PageSize::Ten, 100),
            Err(RangeError::ExceedsTotal {
                requested: 150,
                available: 100
            })
        );
        assert!(matches!(
            BulkRange::plan(0, PageSize::Ten, 100),
            Err(RangeError::NotPositive { .. })
        ));
        // n == total 은 허용
        assert!(BulkRange::plan(100, PageSize::Ten, 100).is_ok());
    }

    #[tokio::test]
    async fn first_25_of_page_size_10_fetches_three_pages() {
        let catalog = Arc::new(FakeCatalog::new(100));
        let selector = BulkRangeSelector::new(catalog.clone());

        let selection = selector
            .select_first_n(25, PageSize::Ten, 100)
            .await
            .unwrap();

        assert_eq!(catalog.calls(), vec![1, 2, 3]);
        assert_eq!(selection.ids.len(), 25);
        assert_eq!(selection.pages_spanned, 3);
        for index in 0..25 {
            assert!(selection.ids.contains(&FakeCatalog::id_at(index)));
        }
        assert!(!selection.ids.contains(&FakeCatalog::id_at(25)));
        assert_eq!(selection.records.len(), 25);
        assert_eq!(selection.records[24].id, FakeCatalog::id_at(24));
    }

    #[tokio::test]
    async fn first_one_fetches_only_page_one() {
        let catalog = Arc::new(FakeCatalog::new(100));
        let selector = BulkRangeSelector::new(catalog.clone());

        let selection = selector.select_first_n(1, PageSize::Ten, 100).await.unwrap();

        assert_eq!(catalog.calls(), vec![1]);
        assert_eq!(
            selection.ids,
            HashSet::from([FakeCatalog::id_at(0)])
        );
    }

    #[tokio::test]
    async fn exceeding_total_makes_no_request() {
        let catalog = Arc::new(FakeCatalog::new(100));
        let selector = BulkRangeSelector::new(catalog.clone());

        let err = selector
            .select_first_n(150, PageSize::Ten, 100)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            CoreError::Range(RangeError::ExceedsTotal {
                requested: 150,
                available: 100
            })
        ));
        assert!(catalog.calls().is_empty());
    }

    #[tokio::test]
    async fn failure_mid_walk_reports_progress() {
        let catalog = Arc::new(FakeCatalog::new(100));
        catalog.fail_on(2);
        let selector = BulkRangeSelector::new(catalog.clone());

        let err = selector
            .select_first_n(25, PageSize::Ten, 100)
            .await
            .unwrap_err();

        match err {
            CoreError::BulkSelectionFailed {
                completed_pages,
                total_pages,
                source,
            } => {
                assert_eq!(completed_pages, 1);
                assert_eq!(total_pages, 3);
                assert!(matches!(*source, CoreError::Network(_)));
            }
            other => panic!("예상치 못한 에러: {other}"),
        }
        // 실패 이후 페이지는 조회하지 않음
        assert_eq!(catalog.calls(), vec![1, 2]);
    }

    #[tokio::test]
    async fn shrunken_collection_yields_fewer_ids() {
        // 서비스가 보고한 total은 30이지만 실제로는 22개만 남은 경우
        let catalog = Arc::new(FakeCatalog::new(22));
        let selector = BulkRangeSelector::new(catalog.clone());

        let selection = selector.select_first_n(30, PageSize::Ten, 30).await.unwrap();

        assert_eq!(catalog.calls(), vec![1, 2, 3]);
        assert_eq!(selection.ids.len(), 22);
        assert_eq!(selection.requested, 30);
    }
}
