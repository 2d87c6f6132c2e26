//! 작품 레코드 모델.
//!
//! 원격 카탈로그의 `GET /artworks` 응답 구조를 그대로 표현한다.
//! 레코드는 읽기 전용이며 로컬에서 수정하지 않는다.

use serde::{Deserialize, Serialize};

use crate::models::page::PageBuffer;

/// 작품 식별자: 서비스의 숫자 ID, 페이지가 바뀌어도 안정적
pub type ArtworkId = u64;

/// 작품 레코드
///
/// `id`를 제외한 모든 필드는 서비스가 `null`을 돌려줄 수 있다.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artwork {
    /// 작품 고유 ID
    pub id: ArtworkId,
    /// 제목
    #[serde(default)]
    pub title: Option<String>,
    /// 제작지
    #[serde(default)]
    pub place_of_origin: Option<String>,
    /// 작가 표시 문자열
    #[serde(default)]
    pub artist_display: Option<String>,
    /// 명문
    #[serde(default)]
    pub inscriptions: Option<String>,
    /// 제작 시작 연도
    #[serde(default)]
    pub date_start: Option<i32>,
    /// 제작 종료 연도
    #[serde(default)]
    pub date_end: Option<i32>,
}

/// 페이지네이션 메타데이터
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationInfo {
    /// 전체 작품 수
    pub total: u64,
    /// 페이지 크기
    #[serde(default)]
    pub limit: u32,
    /// 첫 항목 오프셋
    #[serde(default)]
    pub offset: u64,
    /// 전체 페이지 수
    #[serde(default)]
    pub total_pages: u64,
    /// 현재 페이지 (1부터)
    #[serde(default)]
    pub current_page: u32,
    /// 다음 페이지 URL
    #[serde(default)]
    pub next_url: Option<String>,
}

/// 서비스 응답 봉투: `data`와 `pagination.total`은 필수
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtworkPage {
    /// 현재 페이지의 작품 목록
    pub data: Vec<Artwork>,
    /// 페이지네이션 정보
    pub pagination: PaginationInfo,
}

impl ArtworkPage {
    /// 화면 표시용 페이지 버퍼로 변환
    pub fn into_buffer(self) -> PageBuffer {
        PageBuffer::new(self.data, self.pagination.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_optional_fields_default_to_none() {
        let artwork: Artwork = serde_json::from_str(r#"{"id": 42}"#).unwrap();
        assert_eq!(artwork.id, 42);
        assert!(artwork.title.is_none());
        assert!(artwork.date_end.is_none());
    }

    #[test]
    fn missing_id_is_rejected() {
        let result = serde_json::from_str::<Artwork>(r#"{"title": "No id"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn envelope_requires_data_and_total() {
        let no_data = r#"{"pagination": {"total": 10}}"#;
        assert!(serde_json::from_str::<ArtworkPage>(no_data).is_err());

        let no_total = r#"{"data": [], "pagination": {"limit": 10}}"#;
        assert!(serde_json::from_str::<ArtworkPage>(no_total).is_err());

        let minimal = r#"{"data": [], "pagination": {"total": 0}}"#;
        let page: ArtworkPage = serde_json::from_str(minimal).unwrap();
        assert_eq!(page.pagination.total, 0);
        assert!(page.pagination.next_url.is_none());
    }
}
