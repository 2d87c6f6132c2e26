//! ARTPICK 도메인 모델.
//!
//! 원격 카탈로그에서 받는 작품 레코드와 페이지 단위 데이터 구조체를 정의한다.

pub mod artwork;
pub mod page;
