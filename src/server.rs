//! 번역 파일 HTTP 서버 — GET /static/locales/{lang}.json
//!
//! 브라우저 클라이언트와 `HttpSource`가 같은 경로로 번역 트리를 받아갑니다.

use crate::config::{I18nConfig, LanguageSettings};
use anyhow::Result;
use axum::{
    extract::{Path, State},
    http::{header, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub const LOCALES_ROUTE: &str = "/static/locales";

#[derive(Clone)]
pub struct LocaleServer {
    locales_dir: Arc<PathBuf>,
    languages: Arc<LanguageSettings>,
    listen_addr: String,
}

impl LocaleServer {
    pub fn new(config: &I18nConfig) -> Self {
        Self {
            locales_dir: Arc::new(config.locales_dir.clone()),
            languages: Arc::new(config.language_settings()),
            listen_addr: config.listen_addr.clone(),
        }
    }

    pub fn router(&self) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::OPTIONS]);

        Router::new()
            .route(LOCALES_ROUTE, get(list_languages))
            .route(&format!("{}/:file", LOCALES_ROUTE), get(get_locale_file))
            .layer(cors)
            .layer(TraceLayer::new_for_http())
            .with_state(self.clone())
    }

    pub async fn start(self) -> Result<()> {
        let router = self.router();
        let listener = tokio::net::TcpListener::bind(&self.listen_addr).await?;
        tracing::info!(
            "Serving {} on http://{}{}",
            self.locales_dir.display(),
            self.listen_addr,
            LOCALES_ROUTE
        );
        axum::serve(listener, router).await?;
        Ok(())
    }
}

/// GET /static/locales - 지원 언어 목록
async fn list_languages(State(state): State<LocaleServer>) -> impl IntoResponse {
    Json(json!({
        "supported": state.languages.supported,
        "fallback": state.languages.fallback,
    }))
}

/// GET /static/locales/:file - 지원 언어의 `{lang}.json`만 제공
async fn get_locale_file(State(state): State<LocaleServer>, Path(file): Path<String>) -> Response {
    let Some(code) = file.strip_suffix(".json") else {
        return not_found(&file);
    };
    if !state.languages.is_supported(code) {
        return not_found(&file);
    }

    let path = state.locales_dir.join(&file);
    match tokio::fs::read(&path).await {
        Ok(bytes) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/json; charset=utf-8")],
            bytes,
        )
            .into_response(),
        Err(e) => {
            tracing::warn!("Failed to read {}: {}", path.display(), e);
            not_found(&file)
        }
    }
}

fn not_found(file: &str) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "success": false, "error": format!("Locale '{}' not found", file) })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    fn server(dir: &std::path::Path) -> LocaleServer {
        LocaleServer::new(&I18nConfig {
            locales_dir: dir.to_path_buf(),
            ..Default::default()
        })
    }

    async fn get(router: Router, uri: &str) -> (StatusCode, String) {
        let response = router
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_serves_supported_locale() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("en.json"), r#"{"welcome": "Hello"}"#).unwrap();

        let (status, body) = get(server(dir.path()).router(), "/static/locales/en.json").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, r#"{"welcome": "Hello"}"#);
    }

    #[tokio::test]
    async fn test_rejects_unknown_and_unsupported_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("fr.json"), "{}").unwrap();
        let router = server(dir.path()).router();

        // 파일이 있어도 지원 언어가 아니면 404
        assert_eq!(get(router.clone(), "/static/locales/fr.json").await.0, StatusCode::NOT_FOUND);
        // 지원 언어지만 파일 없음
        assert_eq!(get(router.clone(), "/static/locales/zh-CN.json").await.0, StatusCode::NOT_FOUND);
        assert_eq!(get(router, "/static/locales/en.txt").await.0, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_lists_languages() {
        let dir = tempfile::tempdir().unwrap();
        let (status, body) = get(server(dir.path()).router(), "/static/locales").await;
        assert_eq!(status, StatusCode::OK);
        let value: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(value["supported"], json!(["en", "zh-CN"]));
        assert_eq!(value["fallback"], "en");
    }
}
