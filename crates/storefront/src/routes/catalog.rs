//! Catalog grid route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use pokecart_core::CatalogItem;
use tracing::instrument;

use crate::state::AppState;

/// Catalog item display data for templates.
#[derive(Clone)]
pub struct CatalogItemView {
    pub id: u32,
    pub name: String,
    pub image_url: String,
}

impl From<&CatalogItem> for CatalogItemView {
    fn from(item: &CatalogItem) -> Self {
        Self {
            id: item.id.as_u32(),
            name: item.name.clone(),
            image_url: item.image_url.clone(),
        }
    }
}

/// Catalog grid page template.
#[derive(Template, WebTemplate)]
#[template(path = "catalog/index.html")]
pub struct CatalogIndexTemplate {
    pub items: Vec<CatalogItemView>,
    /// Cart total for the nav badge.
    pub count: u64,
}

/// Shown until the catalog has loaded. Refreshes itself.
#[derive(Template, WebTemplate)]
#[template(path = "catalog/loading.html")]
pub struct CatalogLoadingTemplate {
    pub refresh_seconds: u32,
    pub count: u64,
}

/// Display the catalog grid, or the loading indicator while the load is
/// outstanding (or has failed without ever succeeding).
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Response {
    let catalog = state.catalog();
    let count = state.cart().await.total_items();

    let Some(items) = catalog.items() else {
        return CatalogLoadingTemplate {
            refresh_seconds: 2,
            count,
        }
        .into_response();
    };

    CatalogIndexTemplate {
        items: items.iter().map(CatalogItemView::from).collect(),
        count,
    }
    .into_response()
}
