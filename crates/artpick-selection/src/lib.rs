//! # artpick-selection
//!
//! 페이지 독립 선택 상태 관리.
//! 어떤 페이지가 표시되든 선택된 작품 ID 집합을 유지하고,
//! 현재 페이지와 대조해 체크 상태를 계산하며,
//! "처음 N개 선택" 요청을 필요한 페이지만 조회해 처리한다.
//!
//! ## 구조
//!
//! - [`store`] — 선택 집합, 위젯 보고 정규화, 선택 뷰 계산
//! - [`bulk`] — 일괄 범위 선택 (순차 페이지 조회, 전부 아니면 전무)
//! - [`controller`] — 페이지 커서, 조회 토큰, Idle/Loading 상태
//! - [`status`] — 사용자 상태 메시지

pub mod bulk;
pub mod controller;
pub mod status;
pub mod store;

#[cfg(test)]
pub(crate) mod testing;
