//! # artpick-network
//!
//! 원격 카탈로그 HTTP 어댑터.
//! `PageFetcher` 포트를 reqwest로 구현하며, 전송 실패와
//! 서비스 실패를 `CoreError::Network` / `CoreError::Service`로 구분한다.
//!
//! ## 사용 예시
//!
//! ```rust,ignore
//! use artpick_network::http_client::HttpPageFetcher;
//! use std::time::Duration;
//!
//! let fetcher = HttpPageFetcher::new("https://api.artic.edu/api/v1", Duration::from_secs(30))?;
//! ```

pub mod http_client;
