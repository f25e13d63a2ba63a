pub mod assertions;
pub mod builders;
pub mod fixtures;
pub mod shared;

use anyhow::Context as _;
use axum::{
    body::{Body, Bytes},
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use staybook::{api::create_router, db::MemoryStore, AppState, Config};
use std::sync::Arc;
use tower::ServiceExt as _;

// Re-export commonly used items
pub use assertions::*;
pub use builders::*;
pub use fixtures::*;

/// Router over a fresh in-memory store.
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
}

impl TestApp {
    pub async fn new() -> anyhow::Result<Self> {
        Self::new_with_config(|_| {}).await
    }

    pub async fn new_with_config(configure: impl FnOnce(&mut Config)) -> anyhow::Result<Self> {
        let shared = shared::shared().await?;
        let mut config = shared.base_config.clone();
        configure(&mut config);

        let store = Arc::new(MemoryStore::new());
        let state = AppState::with_stores(config, store.clone(), store);
        let router = create_router(state.clone());

        Ok(Self { router, state })
    }

    pub async fn request(
        &self,
        method: Method,
        path_and_query: &str,
        body: Option<Bytes>,
        cookie: Option<&str>,
    ) -> anyhow::Result<(StatusCode, HeaderMap, Bytes)> {
        let mut builder = Request::builder()
            .method(method)
            .uri(path_and_query)
            .header(header::HOST, "example.org")
            .header(header::ACCEPT, "application/json")
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }

        let request = builder
            .body(match body {
                Some(bytes) => Body::from(bytes),
                None => Body::empty(),
            })
            .context("build request")?;

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .context("dispatch request")?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .context("read response body")?;

        Ok((status, headers, body))
    }

    pub async fn request_json(
        &self,
        method: Method,
        path_and_query: &str,
        body: &serde_json::Value,
        cookie: Option<&str>,
    ) -> anyhow::Result<(StatusCode, HeaderMap, Bytes)> {
        let bytes = Bytes::from(serde_json::to_vec(body).context("encode JSON body")?);
        self.request(method, path_and_query, Some(bytes), cookie)
            .await
    }
}

pub async fn with_test_app<F>(f: F) -> anyhow::Result<()>
where
    F: for<'a> FnOnce(
        &'a TestApp,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = anyhow::Result<()>> + 'a>,
    >,
{
    let app = TestApp::new().await?;
    f(&app).await
}
