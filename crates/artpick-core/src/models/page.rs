//! 페이지 버퍼와 페이지 커서.
//!
//! 페이지 크기는 고정된 선택지(10/20/30) 중 하나이며,
//! 커서의 첫 인덱스는 항상 페이지 크기의 배수로 유지된다.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::CoreError;
use crate::models::artwork::{Artwork, ArtworkId};

/// 페이지 크기 선택지
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum PageSize {
    #[default]
    Ten,
    Twenty,
    Thirty,
}

impl PageSize {
    /// 페이지네이터에 노출하는 전체 선택지
    pub const ALL: [PageSize; 3] = [PageSize::Ten, PageSize::Twenty, PageSize::Thirty];

    /// 행 수
    pub fn rows(self) -> u32 {
        match self {
            PageSize::Ten => 10,
            PageSize::Twenty => 20,
            PageSize::Thirty => 30,
        }
    }
}

impl TryFrom<u32> for PageSize {
    type Error = CoreError;

    fn try_from(rows: u32) -> Result<Self, Self::Error> {
        match rows {
            10 => Ok(PageSize::Ten),
            20 => Ok(PageSize::Twenty),
            30 => Ok(PageSize::Thirty),
            other => Err(CoreError::Validation {
                field: "page_size".to_string(),
                message: format!("10, 20, 30 중 하나여야 함 (입력: {other})"),
            }),
        }
    }
}

impl From<PageSize> for u32 {
    fn from(size: PageSize) -> Self {
        size.rows()
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.rows())
    }
}

/// 페이지네이션 커서: (첫 인덱스, 페이지 크기)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageCursor {
    /// 현재 페이지 첫 항목의 0 기반 전역 인덱스
    pub first: u64,
    /// 페이지 크기
    pub size: PageSize,
}

impl PageCursor {
    /// 첫 페이지 커서
    pub fn new(size: PageSize) -> Self {
        Self { first: 0, size }
    }

    /// 페이지네이터의 page-change 이벤트(`{first, rows}`)로부터 커서 생성
    ///
    /// `first`가 페이지 크기의 배수가 아니면 그 페이지의 시작으로 내린다.
    pub fn from_event(first: u64, rows: u32) -> Result<Self, CoreError> {
        let size = PageSize::try_from(rows)?;
        Ok(Self::at(first, size))
    }

    /// 지정 인덱스를 포함하는 페이지의 커서
    pub fn at(first: u64, size: PageSize) -> Self {
        let rows = u64::from(size.rows());
        Self {
            first: first / rows * rows,
            size,
        }
    }

    /// 1 기반 페이지 번호
    pub fn page_number(&self) -> u32 {
        (self.first / u64::from(self.size.rows())) as u32 + 1
    }

    /// 지정 페이지 번호(1부터)로 이동한 커서
    pub fn with_page(&self, page: u32) -> Self {
        let page = page.max(1);
        Self {
            first: u64::from(page - 1) * u64::from(self.size.rows()),
            size: self.size,
        }
    }

    /// 페이지 크기 변경: 현재 첫 항목을 포함하는 페이지로 맞춘다
    pub fn with_size(&self, size: PageSize) -> Self {
        Self::at(self.first, size)
    }

    /// 전체 개수 기준 마지막 페이지 번호 (항목이 없어도 1)
    pub fn last_page(&self, total: u64) -> u32 {
        let rows = u64::from(self.size.rows());
        (total.div_ceil(rows).max(1)) as u32
    }
}

/// 현재 화면에 표시되는 페이지 버퍼
///
/// 조회가 성공할 때마다 통째로 교체되며 부분 갱신은 없다.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageBuffer {
    /// 페이지 순서대로 정렬된 레코드
    pub records: Vec<Artwork>,
    /// 서비스가 보고한 전체 작품 수
    pub total: u64,
}

impl PageBuffer {
    pub fn new(records: Vec<Artwork>, total: u64) -> Self {
        Self { records, total }
    }

    /// 페이지 순서대로 ID 반환
    pub fn ids(&self) -> impl Iterator<Item = ArtworkId> + '_ {
        self.records.iter().map(|r| r.id)
    }

    /// 해당 ID가 이 페이지에 있는지
    pub fn contains(&self, id: ArtworkId) -> bool {
        self.records.iter().any(|r| r.id == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
