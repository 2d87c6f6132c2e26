//! 뷰 컨트롤러.
//!
//! 페이지 커서, 현재 페이지 버퍼, 선택 저장소를 하나의 소유 객체로 묶는다.
//! 마운트 시 생성되고 언마운트 시 소비된다.
//!
//! 조회는 취소하지 않는다. 대신 모든 조회에 단조 증가 토큰을 붙이고,
//! 응답이 돌아왔을 때 최신 토큰이 아니면 결과를 버린다.
//! 상태 잠금은 짧게 잡고 `.await` 너머로 들고 가지 않는다.

use artpick_core::error::CoreError;
use artpick_core::models::artwork::{Artwork, ArtworkId};
use artpick_core::models::page::{PageBuffer, PageCursor, PageSize};
use artpick_core::ports::page_fetcher::PageFetcher;
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::bulk::{parse_count, BulkRange, BulkRangeSelector};
use crate::status::StatusMessage;
use crate::store::{SelectionChange, SelectionDiff, SelectionStore};

/// 뷰 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewPhase {
    /// 진행 중인 조회 없음
    Idle,
    /// 페이지 조회 또는 일괄 선택 진행 중
    Loading,
}

/// 페이지 조회 결과
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// 페이지 버퍼 교체됨
    Applied,
    /// 더 최근 요청에 밀려 버려짐
    Stale,
    /// 실패: 이전 페이지 버퍼 유지
    Failed,
}

/// 일괄 선택 결과
#[derive(Debug)]
pub enum BulkOutcome {
    /// 선택 집합 교체됨
    Committed { selected: usize, pages_spanned: u32 },
    /// 더 최근 일괄 선택에 밀려 버려짐
    Superseded,
    /// 거부 또는 실패: 이전 선택 유지
    Rejected(CoreError),
}

/// 렌더링용 상태 스냅샷
#[derive(Debug, Clone)]
pub struct ViewSnapshot {
    /// 현재 페이지 행
    pub rows: Vec<Artwork>,
    /// 현재 페이지에서 체크된 행 (페이지 순서)
    pub selected_rows: Vec<Artwork>,
    /// 서비스가 보고한 전체 작품 수
    pub total: u64,
    /// 요청된 커서 (조회 중이면 아직 표시 전일 수 있음)
    pub cursor: PageCursor,
    /// 전체 페이지 수
    pub page_count: u32,
    pub phase: ViewPhase,
    pub status: Option<StatusMessage>,
    /// 전체 선택 개수 (모든 페이지)
    pub selected_count: usize,
}

impl ViewSnapshot {
    pub fn is_checked(&self, id: ArtworkId) -> bool {
        self.selected_rows.iter().any(|r| r.id == id)
    }
}

struct ViewState {
    /// 마지막으로 요청된 커서
    cursor: PageCursor,
    /// 현재 페이지 버퍼의 커서
    loaded_cursor: PageCursor,
    page: PageBuffer,
    selection: SelectionStore,
    fetch_token: u64,
    bulk_token: u64,
    in_flight: usize,
    status: Option<StatusMessage>,
}

/// 페이지네이션 테이블 뷰 컨트롤러
pub struct ViewController {
    fetcher: Arc<dyn PageFetcher>,
    bulk: BulkRangeSelector,
    state: Mutex<ViewState>,
}

impl ViewController {
    /// 새 컨트롤러 생성 (아직 조회하지 않음, [`Self::mount`] 호출 필요)
    pub fn new(fetcher: Arc<dyn PageFetcher>, size: PageSize) -> Self {
        let cursor = PageCursor::new(size);
        Self {
            bulk: BulkRangeSelector::new(fetcher.clone()),
            fetcher,
            state: Mutex::new(ViewState {
                cursor,
                loaded_cursor: cursor,
                page: PageBuffer::default(),
                selection: SelectionStore::new(),
                fetch_token: 0,
                bulk_token: 0,
                in_flight: 0,
                status: None,
            }),
        }
    }

    /// 첫 페이지 조회
    pub async fn mount(&self) -> FetchOutcome {
        info!("뷰 마운트");
        self.refresh().await
    }

    /// 현재 커서의 페이지 다시 조회
    pub async fn refresh(&self) -> FetchOutcome {
        let cursor = self.state.lock().cursor;
        self.load(cursor).await
    }

    /// 페이지네이터 page-change 이벤트 (`{first, rows}`)
    pub async fn change_page(&self, first: u64, rows: u32) -> FetchOutcome {
        match PageCursor::from_event(first, rows) {
            Ok(cursor) => self.load(cursor).await,
            Err(e) => {
                warn!("잘못된 페이지 이벤트: first={first}, rows={rows}: {e}");
                self.state.lock().status = Some(StatusMessage::invalid_page_size(rows));
                FetchOutcome::Failed
            }
        }
    }

    /// 페이지 번호(1부터)로 이동
    pub async fn go_to_page(&self, page: u32) -> FetchOutcome {
        let cursor = self.state.lock().cursor.with_page(page);
        self.load(cursor).await
    }

    /// 페이지 크기 변경: 현재 첫 항목을 포함하는 페이지로 이동
    pub async fn change_page_size(&self, size: PageSize) -> FetchOutcome {
        let cursor = self.state.lock().cursor.with_size(size);
        self.load(cursor).await
    }

    async fn load(&self, cursor: PageCursor) -> FetchOutcome {
        let token = {
            let mut state = self.state.lock();
            state.fetch_token += 1;
            state.cursor = cursor;
            state.in_flight += 1;
            state.fetch_token
        };

        let page_number = cursor.page_number();
        debug!(
            "페이지 조회: page={page_number}, limit={}, token={token}",
            cursor.size
        );
        let result = self.fetcher.fetch_page(page_number, cursor.size).await;

        let mut state = self.state.lock();
        state.in_flight -= 1;

        if token != state.fetch_token {
            debug!(
                "오래된 응답 폐기: page={page_number}, token={token}, 최신={}",
                state.fetch_token
            );
            return FetchOutcome::Stale;
        }

        match result {
            Ok(page) => {
                state.selection.remember(&page.records);
                state.page = page;
                state.loaded_cursor = cursor;
                FetchOutcome::Applied
            }
            Err(e) => {
                warn!("페이지 {page_number} 조회 실패: {e}");
                state.cursor = state.loaded_cursor;
                state.status = Some(StatusMessage::load_failed(page_number, &e));
                FetchOutcome::Failed
            }
        }
    }

    /// 테이블 위젯 selection-change 이벤트 반영 (현재 표시 중인 페이지 기준)
    pub fn apply_selection(&self, change: SelectionChange) -> SelectionDiff {
        let mut guard = self.state.lock();
        let state = &mut *guard;
        state.selection.apply_change(&state.page, change)
    }

    /// "처음 N개 선택" 제출
    ///
    /// 성공하면 선택 집합을 통째로 교체하고 현재 페이지를 다시 조회한다.
    /// 실패하면 선택 집합은 그대로다.
    pub async fn submit_bulk(&self, input: &str) -> BulkOutcome {
        let requested = match parse_count(input) {
            Ok(n) => n,
            Err(e) => return self.reject_bulk(e.into()),
        };

        // 거부된 요청은 토큰을 올리지 않는다 (진행 중인 일괄 선택 유지)
        let planned = {
            let mut state = self.state.lock();
            let total = state.page.total;
            BulkRange::plan(requested, state.cursor.size, total).map(|range| {
                state.bulk_token += 1;
                state.in_flight += 1;
                (state.bulk_token, range, total)
            })
        };
        let (token, range, total) = match planned {
            Ok(planned) => planned,
            Err(e) => return self.reject_bulk(e.into()),
        };

        let result = self
            .bulk
            .select_first_n(range.requested, range.size, total)
            .await;

        let (selected, pages_spanned) = {
            let mut state = self.state.lock();
            state.in_flight -= 1;

            if token != state.bulk_token {
                debug!("오래된 일괄 선택 결과 폐기: token={token}");
                return BulkOutcome::Superseded;
            }

            match result {
                Ok(selection) => {
                    let selected = selection.ids.len();
                    state.selection.replace_all(selection.ids);
                    state.selection.remember(&selection.records);
                    state.status = Some(StatusMessage::bulk_selected(
                        selected,
                        selection.pages_spanned,
                    ));
                    (selected, selection.pages_spanned)
                }
                Err(e) => {
                    state.status = Some(StatusMessage::bulk_failed(&e));
                    return BulkOutcome::Rejected(e);
                }
            }
        };

        if self.refresh().await == FetchOutcome::Failed {
            // 커밋 문구 뒤에 재조회 실패를 붙인다
            let committed = StatusMessage::bulk_selected(selected, pages_spanned);
            let mut state = self.state.lock();
            let combined = match state.status.take() {
                Some(load) => committed.followed_by(&load),
                None => committed,
            };
            state.status = Some(combined);
        }
        BulkOutcome::Committed {
            selected,
            pages_spanned,
        }
    }

    fn reject_bulk(&self, err: CoreError) -> BulkOutcome {
        warn!("일괄 선택 거부: {err}");
        self.state.lock().status = Some(StatusMessage::bulk_failed(&err));
        BulkOutcome::Rejected(err)
    }

    /// 렌더링용 스냅샷
    pub fn snapshot(&self) -> ViewSnapshot {
        let state = self.state.lock();
        ViewSnapshot {
            rows: state.page.records.clone(),
            selected_rows: state
                .selection
                .derive_view(&state.page)
                .into_iter()
                .cloned()
                .collect(),
            total: state.page.total,
            cursor: state.cursor,
            page_count: state.cursor.last_page(state.page.total),
            phase: if state.in_flight > 0 {
                ViewPhase::Loading
            } else {
                ViewPhase::Idle
            },
            status: state.status.clone(),
            selected_count: state.selection.len(),
        }
    }

    pub fn is_selected(&self, id: ArtworkId) -> bool {
        self.state.lock().selection.is_selected(id)
    }

    /// 선택 요약 (지금까지 본 레코드만, ID 오름차순)과 레코드 미확인 개수
    pub fn selected_records(&self) -> (Vec<Artwork>, usize) {
        let state = self.state.lock();
        (
            state.selection.selected_records(),
            state.selection.unresolved_count(),
        )
    }

    /// 뷰 해제: 진행 중이던 조회 결과는 더 이상 반영될 곳이 없다
    pub fn unmount(self) {
        let state = self.state.lock();
        info!(
            "뷰 언마운트: 선택 {}개, 진행 중 요청 {}개",
            state.selection.len(),
            state.in_flight
        );
    }
}
