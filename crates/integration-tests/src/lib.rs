//! Integration tests for Poke Cart.
//!
//! Each test drives the full storefront application (routes plus the
//! request-id, tracing and Sentry layers) in-process, with the catalog
//! listing served by a stub HTTP server on a loopback port.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p pokecart-integration-tests
//! ```

#![allow(clippy::unwrap_used)]

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
    routing::get,
};
use pokecart_storefront::{
    app,
    config::{CatalogConfig, StorefrontConfig},
    state::AppState,
};
use serde_json::{Value, json};
use tower::ServiceExt;
use url::Url;

/// Path the stub listing server answers on.
pub const LISTING_PATH: &str = "/api/v2/pokemon";

/// Image template used by every test context.
pub const IMAGE_TEMPLATE: &str = "http://img.test/{id}.png";

/// A listing body in the shape the catalog endpoint returns.
#[must_use]
pub fn listing_body(names: &[&str]) -> Value {
    let results: Vec<Value> = names
        .iter()
        .map(|name| json!({ "name": name, "url": format!("https://pokeapi.test/{name}") }))
        .collect();
    json!({ "count": names.len(), "next": null, "previous": null, "results": results })
}

/// Serve `body` with `status` at [`LISTING_PATH`] and return its URL.
pub async fn spawn_listing(status: StatusCode, body: String) -> Url {
    let router = Router::new().route(
        LISTING_PATH,
        get(move || {
            let body = body.clone();
            async move { (status, [(header::CONTENT_TYPE, "application/json")], body) }
        }),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    Url::parse(&format!("http://{addr}{LISTING_PATH}")).unwrap()
}

/// Storefront configuration pointed at `listing_url`.
#[must_use]
pub fn config_for(listing_url: Url) -> StorefrontConfig {
    StorefrontConfig {
        host: [127, 0, 0, 1].into(),
        port: 0,
        catalog: CatalogConfig {
            listing_url,
            image_url_template: IMAGE_TEMPLATE.to_string(),
        },
        sentry_dsn: None,
        sentry_environment: None,
        sentry_sample_rate: 1.0,
        sentry_traces_sample_rate: 0.0,
    }
}

/// A response reduced to what the tests look at.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub body: String,
}

/// Application state plus helpers for driving the full router.
#[derive(Clone)]
pub struct TestContext {
    pub state: AppState,
}

impl TestContext {
    /// Context whose catalog listing serves `names`. The catalog is not
    /// loaded yet.
    pub async fn with_listing(names: &[&str]) -> Self {
        let url = spawn_listing(StatusCode::OK, listing_body(names).to_string()).await;
        Self {
            state: AppState::new(config_for(url)),
        }
    }

    /// Context whose catalog listing always answers `status` with `body`.
    pub async fn with_failing_listing(status: StatusCode, body: &str) -> Self {
        let url = spawn_listing(status, body.to_string()).await;
        Self {
            state: AppState::new(config_for(url)),
        }
    }

    /// Send `request` through the full application.
    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = app(self.state.clone()).oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        TestResponse {
            status,
            headers,
            body: String::from_utf8(body.to_vec()).unwrap(),
        }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.send(Request::get(uri).body(Body::empty()).unwrap())
            .await
    }

    /// POST a form the way HTMX does.
    pub async fn htmx_post(&self, uri: &str, form: &str) -> TestResponse {
        self.send(
            Request::post(uri)
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .header("HX-Request", "true")
                .body(Body::from(form.to_string()))
                .unwrap(),
        )
        .await
    }

    /// POST a form without HTMX (JavaScript disabled).
    pub async fn form_post(&self, uri: &str, form: &str) -> TestResponse {
        self.send(
            Request::post(uri)
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(form.to_string()))
                .unwrap(),
        )
        .await
    }
}
