//! HTTP 페이지 조회 클라이언트.
//!
//! `PageFetcher` 포트 구현. `GET {base_url}/artworks?page=&limit=` 한 번으로
//! 한 페이지를 가져오며 재시도는 하지 않는다.

use artpick_core::error::CoreError;
use artpick_core::models::artwork::ArtworkPage;
use artpick_core::models::page::{PageBuffer, PageSize};
use artpick_core::ports::page_fetcher::{validate_page_number, PageFetcher};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, warn};

/// 작품 목록 엔드포인트 경로
const ARTWORKS_PATH: &str = "/artworks";

/// 카탈로그 REST 클라이언트: `PageFetcher` 포트 구현
pub struct HttpPageFetcher {
    client: reqwest::Client,
    base_url: String,
    fields: Vec<String>,
}

impl HttpPageFetcher {
    /// 새 HTTP 페이지 조회기 생성
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, CoreError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CoreError::Network(format!("HTTP 클라이언트 빌드 실패: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            fields: Vec::new(),
        })
    }

    /// 응답 필드 제한 설정 (`fields` 쿼리 파라미터)
    pub fn with_fields(mut self, fields: Vec<String>) -> Self {
        self.fields = fields;
        self
    }

    fn query(&self, page: u32, size: PageSize) -> Vec<(&'static str, String)> {
        let mut query = vec![("page", page.to_string()), ("limit", size.to_string())];
        if !self.fields.is_empty() {
            query.push(("fields", self.fields.join(",")));
        }
        query
    }

    /// 응답 상태 코드 확인 및 에러 매핑
    async fn check_response(
        &self,
        resp: reqwest::Response,
    ) -> Result<reqwest::Response, CoreError> {
        let status = resp.status();

        if status.is_success() {
            return Ok(resp);
        }

        let text = resp.text().await.unwrap_or_else(|e| {
            warn!("응답 본문 읽기 실패: {e}");
            String::new()
        });

        Err(CoreError::Service {
            status: Some(status.as_u16()),
            message: text,
        })
    }
}

/// reqwest 전송 에러 → 코어 에러
fn map_transport_error(e: reqwest::Error) -> CoreError {
    if e.is_timeout() {
        CoreError::Network(format!("요청 타임아웃: {e}"))
    } else {
        CoreError::Network(format!("페이지 요청 실패: {e}"))
    }
}

/// 응답 본문 → 페이지 버퍼
///
/// `data`나 `pagination.total`이 없거나, 페이지 크기보다 많은 행이 오면
/// 잘못된 페이로드로 본다.
fn decode_page(body: &str, size: PageSize) -> Result<PageBuffer, CoreError> {
    let page: ArtworkPage = serde_json::from_str(body).map_err(|e| CoreError::Service {
        status: None,
        message: format!("페이지 응답 파싱 실패: {e}"),
    })?;

    if page.data.len() > size.rows() as usize {
        return Err(CoreError::Service {
            status: None,
            message: format!(
                "페이지 크기 초과 응답: {}행 (limit={size})",
                page.data.len()
            ),
        });
    }

    Ok(page.into_buffer())
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn fetch_page(&self, page: u32, size: PageSize) -> Result<PageBuffer, CoreError> {
        validate_page_number(page)?;
        debug!("페이지 조회 요청: page={page}, limit={size}");

        let url = format!("{}{}", self.base_url, ARTWORKS_PATH);
        let resp = self
            .client
            .get(&url)
            .query(&self.query(page, size))
            .send()
            .await
            .map_err(map_transport_error)?;

        let resp = self.check_response(resp).await?;
        let body = resp.text().await.map_err(map_transport_error)?;
        let buffer = decode_page(&body, size)?;

        debug!(
            "페이지 조회 성공: page={page}, rows={}, total={}",
            buffer.len(),
            buffer.total
        );
        Ok(buffer)
    }
}
