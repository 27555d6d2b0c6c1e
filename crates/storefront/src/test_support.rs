//! Shared fixtures for unit tests.

use pokecart_core::{CatalogItem, CatalogItemId};

use crate::catalog::CatalogState;
use crate::config::{CatalogConfig, StorefrontConfig};
use crate::state::AppState;

pub fn test_config() -> StorefrontConfig {
    StorefrontConfig {
        host: [127, 0, 0, 1].into(),
        port: 0,
        catalog: CatalogConfig::default(),
        sentry_dsn: None,
        sentry_environment: None,
        sentry_sample_rate: 1.0,
        sentry_traces_sample_rate: 0.0,
    }
}

pub fn catalog_item(id: u32, name: &str) -> CatalogItem {
    CatalogItem {
        id: CatalogItemId::new(id),
        name: name.to_string(),
        image_url: format!("http://img.test/{id}.png"),
    }
}

/// State with a loaded two-item catalog and an empty cart.
pub fn loaded_state() -> AppState {
    let state = AppState::new(test_config());
    state.publish_catalog(CatalogState::loaded(vec![
        catalog_item(1, "bulbasaur"),
        catalog_item(2, "ivysaur"),
    ]));
    state
}
