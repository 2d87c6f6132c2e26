//! 선택 저장소.
//!
//! 선택 상태의 유일한 원본은 작품 ID 집합이다. 페이지 이동과 무관하게 유지되며,
//! 화면의 체크 상태(선택 뷰)는 저장하지 않고 매번 현재 페이지에서 계산한다.
//!
//! 테이블 위젯은 자신이 그리는 행의 상태만 알려주므로, 위젯 보고로는
//! 현재 페이지에 있는 ID만 해제할 수 있다. 다른 페이지에서 선택된 ID는 건드리지 않는다.

use artpick_core::models::artwork::{Artwork, ArtworkId};
use artpick_core::models::page::PageBuffer;
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

/// 테이블 위젯의 selection-change 보고
///
/// 툴킷에 따라 전체 상태를 보내거나 변경분만 보낸다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionChange {
    /// 현재 페이지에서 체크된 행 전체
    Full(Vec<ArtworkId>),
    /// 새로 체크/해제된 행
    Delta {
        checked: Vec<ArtworkId>,
        unchecked: Vec<ArtworkId>,
    },
}

/// 선택 갱신 결과
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectionDiff {
    /// 새로 추가된 ID 수
    pub added: usize,
    /// 제거된 ID 수
    pub removed: usize,
}

/// 페이지 독립 선택 저장소
#[derive(Debug, Clone, Default)]
pub struct SelectionStore {
    selected: HashSet<ArtworkId>,
    /// 선택된 ID 중 레코드를 본 것 (선택 요약 표시용)
    seen: HashMap<ArtworkId, Artwork>,
}

impl SelectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 위젯 보고를 체크/해제 집합으로 정규화해 반영
    pub fn apply_change(&mut self, visible: &PageBuffer, change: SelectionChange) -> SelectionDiff {
        match change {
            SelectionChange::Full(reported) => {
                let checked: HashSet<ArtworkId> = reported.into_iter().collect();
                let unchecked: HashSet<ArtworkId> =
                    visible.ids().filter(|id| !checked.contains(id)).collect();
                self.toggle_selection(visible, &checked, &unchecked)
            }
            SelectionChange::Delta { checked, unchecked } => {
                let checked: HashSet<ArtworkId> = checked.into_iter().collect();
                let unchecked: HashSet<ArtworkId> = unchecked.into_iter().collect();
                self.toggle_selection(visible, &checked, &unchecked)
            }
        }
    }

    /// 현재 페이지 기준 선택 토글
    ///
    /// 해제는 현재 페이지에 있는 ID에만 적용한다. 추가도 현재 페이지에 있는 ID로
    /// 제한해, 한 번도 본 적 없는 ID가 집합에 들어가지 않게 한다.
    /// 같은 ID가 양쪽에 있으면 체크가 우선한다.
    pub fn toggle_selection(
        &mut self,
        visible: &PageBuffer,
        newly_checked: &HashSet<ArtworkId>,
        newly_unchecked: &HashSet<ArtworkId>,
    ) -> SelectionDiff {
        let mut diff = SelectionDiff::default();

        for id in visible.ids() {
            if newly_unchecked.contains(&id)
                && !newly_checked.contains(&id)
                && self.selected.remove(&id)
            {
                self.seen.remove(&id);
                diff.removed += 1;
            }
        }

        for &id in newly_checked {
            if !visible.contains(id) {
                warn!("현재 페이지에 없는 ID 체크 무시: {id}");
                continue;
            }
            if self.selected.insert(id) {
                diff.added += 1;
            }
        }

        self.remember(&visible.records);
        debug!(
            "선택 갱신: +{} -{} (총 {})",
            diff.added,
            diff.removed,
            self.selected.len()
        );
        diff
    }

    /// O(1) 선택 여부 확인
    pub fn is_selected(&self, id: ArtworkId) -> bool {
        self.selected.contains(&id)
    }

    /// 선택 집합 전체 교체 (일괄 선택 전용)
    pub fn replace_all(&mut self, ids: HashSet<ArtworkId>) {
        debug!("선택 집합 교체: {} → {}", self.selected.len(), ids.len());
        self.selected = ids;
        self.seen.retain(|id, _| self.selected.contains(id));
    }

    /// 페이지에서 선택된 레코드만 페이지 순서대로 반환
    pub fn derive_view<'a>(&self, page: &'a PageBuffer) -> Vec<&'a Artwork> {
        page.records
            .iter()
            .filter(|r| self.selected.contains(&r.id))
            .collect()
    }

    /// 선택된 레코드만 캐시에 추가
    pub fn remember(&mut self, records: &[Artwork]) {
        for record in records {
            if self.selected.contains(&record.id) {
                self.seen.insert(record.id, record.clone());
            }
        }
    }

    /// 선택된 레코드 요약 (ID 오름차순)
    ///
    /// 한 번도 조회되지 않은 레코드는 빠진다. [`Self::unresolved_count`] 참고.
    pub fn selected_records(&self) -> Vec<Artwork> {
        let mut records: Vec<Artwork> = self
            .selected
            .iter()
            .filter_map(|id| self.seen.get(id).cloned())
            .collect();
        records.sort_by_key(|r| r.id);
        records
    }

    /// 선택되었지만 레코드를 본 적 없는 ID 수
    pub fn unresolved_count(&self) -> usize {
        self.selected
            .iter()
            .filter(|id| !self.seen.contains_key(id))
            .count()
    }

    /// 선택된 ID (정렬 없음)
    pub fn ids(&self) -> impl Iterator<Item = ArtworkId> + '_ {
        self.selected.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }
}
