//! 애플리케이션 설정 구조체.
//!
//! 카탈로그 서버 URL, 요청 타임아웃, 기본 페이지 크기 등 런타임 설정을 정의한다.
//! [`crate::config_manager::ConfigManager`]를 통해 JSON 파일에서 로드.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::models::page::PageSize;

/// 최상위 애플리케이션 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// 카탈로그 서버 연결 설정
    #[serde(default)]
    pub server: ServerConfig,
    /// 테이블 뷰 설정
    #[serde(default)]
    pub view: ViewConfig,
}

// ============================================================
// 서버/뷰 설정
// ============================================================

/// 카탈로그 서버 연결 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// API 기본 URL (예: "https://api.artic.edu/api/v1")
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// 요청 타임아웃 (밀리초)
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
    /// 응답에 포함할 필드 (`fields` 쿼리 파라미터, 비어 있으면 생략)
    #[serde(default = "default_fields")]
    pub fields: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_ms: default_request_timeout_ms(),
            fields: default_fields(),
        }
    }
}

/// 테이블 뷰 설정
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ViewConfig {
    /// 시작 시 페이지 크기
    #[serde(default)]
    pub default_page_size: PageSize,
}

// ============================================================
// AppConfig impl
// ============================================================

impl AppConfig {
    /// 기본 설정값 반환
    pub fn default_config() -> Self {
        Self {
            server: ServerConfig::default(),
            view: ViewConfig::default(),
        }
    }

    /// 서버 요청 타임아웃을 Duration으로 반환
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.server.request_timeout_ms)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::default_config()
    }
}

// ============================================================
// 기본값 함수
// ============================================================

fn default_base_url() -> String {
    "https://api.artic.edu/api/v1".to_string()
}

fn default_request_timeout_ms() -> u64 {
    30_000
}

fn default_fields() -> Vec<String> {
    [
        "id",
        "title",
        "place_of_origin",
        "artist_display",
        "inscriptions",
        "date_start",
        "date_end",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}
