//! 테스트용 인메모리 카탈로그.

use artpick_core::error::CoreError;
use artpick_core::models::artwork::{Artwork, ArtworkId};
use artpick_core::models::page::{PageBuffer, PageSize};
use artpick_core::ports::page_fetcher::{validate_page_number, PageFetcher};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use tokio::sync::oneshot;

pub(crate) fn artwork(id: ArtworkId) -> Artwork {
    Artwork {
        id,
        title: Some(format!("작품 {id}")),
        place_of_origin: Some("Japan".to_string()),
        artist_display: Some("Katsushika Hokusai".to_string()),
        inscriptions: None,
        date_start: Some(1830),
        date_end: Some(1832),
    }
}

pub(crate) fn page_of(ids: &[ArtworkId], total: u64) -> PageBuffer {
    PageBuffer::new(ids.iter().copied().map(artwork).collect(), total)
}

/// 전역 인덱스 i의 작품 ID는 `1000 + i`
pub(crate) struct FakeCatalog {
    total: u64,
    calls: Mutex<Vec<u32>>,
    fail_page: Mutex<Option<u32>>,
    gates: Mutex<HashMap<u32, oneshot::Receiver<()>>>,
    releases: Mutex<HashMap<u32, oneshot::Sender<()>>>,
}

impl FakeCatalog {
    pub(crate) fn new(total: u64) -> Self {
        Self {
            total,
            calls: Mutex::new(Vec::new()),
            fail_page: Mutex::new(None),
            gates: Mutex::new(HashMap::new()),
            releases: Mutex::new(HashMap::new()),
        }
    }

    pub(crate) fn id_at(index: u64) -> ArtworkId {
        1000 + index
    }

    /// 이후 해당 페이지 조회는 네트워크 에러
    pub(crate) fn fail_on(&self, page: u32) {
        *self.fail_page.lock() = Some(page);
    }

    /// 해당 페이지 조회를 [`Self::release`] 전까지 멈춘다 (1회)
    pub(crate) fn gate(&self, page: u32) {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().insert(page, rx);
        self.releases.lock().insert(page, tx);
    }

    pub(crate) fn release(&self, page: u32) {
        if let Some(tx) = self.releases.lock().remove(&page) {
            let _ = tx.send(());
        }
    }

    pub(crate) fn calls(&self) -> Vec<u32> {
        self.calls.lock().clone()
    }

    pub(crate) fn clear_calls(&self) {
        self.calls.lock().clear();
    }
}

#[async_trait]
impl PageFetcher for FakeCatalog {
    async fn fetch_page(&self, page: u32, size: PageSize) -> Result<PageBuffer, CoreError> {
        validate_page_number(page)?;
        self.calls.lock().push(page);

        let gate = self.gates.lock().remove(&page);
        if let Some(rx) = gate {
            let _ = rx.await;
        }

        if *self.fail_page.lock() == Some(page) {
            return Err(CoreError::Network(format!("페이지 {page} 연결 거부")));
        }

        let rows = u64::from(size.rows());
        let start = u64::from(page - 1) * rows;
        let end = (start + rows).min(self.total);
        let records = (start..end).map(|i| artwork(Self::id_at(i))).collect();
        Ok(PageBuffer::new(records, self.total))
    }
}
