//! End-to-end cart flow through the full storefront application.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use axum::http::{StatusCode, header};
use pokecart_core::ProductId;
use pokecart_integration_tests::TestContext;

async fn loaded_context() -> TestContext {
    let ctx = TestContext::with_listing(&["bulbasaur", "ivysaur"]).await;
    assert_eq!(ctx.state.load_catalog().await.unwrap(), 2);
    ctx
}

#[tokio::test]
async fn test_add_update_remove_scenario() {
    let ctx = loaded_context().await;

    // Add both catalog items
    ctx.htmx_post("/cart/add", "id=1").await;
    let response = ctx.htmx_post("/cart/add", "id=2").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, "<span id=\"cart-count\">2</span>");

    let cart = ctx.state.cart().await;
    assert_eq!(cart.len(), 2);
    assert_eq!(cart.lines()[0].product_id, "1");
    assert_eq!(cart.lines()[0].title, "bulbasaur");
    assert_eq!(cart.lines()[0].quantity, 1);
    assert_eq!(cart.lines()[1].product_id, "2");
    assert_eq!(cart.lines()[1].title, "ivysaur");
    assert_eq!(cart.lines()[1].quantity, 1);
    assert_eq!(cart.total_items(), 2);

    // Set the first line to 3
    let response = ctx
        .htmx_post("/cart/update", "product_id=1&quantity=3")
        .await;
    assert!(response.body.contains("Total Items: 4"));
    assert_eq!(ctx.state.cart().await.total_items(), 4);

    // Remove the second line
    let response = ctx.htmx_post("/cart/remove", "product_id=2").await;
    assert!(response.body.contains("Total Items: 3"));
    assert!(!response.body.contains("ivysaur"));

    let cart = ctx.state.cart().await;
    assert_eq!(cart.len(), 1);
    assert_eq!(cart.line(&ProductId::new("1")).unwrap().quantity, 3);
    assert_eq!(cart.total_items(), 3);

    // Confirm shows the total and leaves the cart alone
    let response = ctx.htmx_post("/cart/buy", "").await;
    assert!(response.body.contains("You are buying 3 items"));
    assert_eq!(ctx.state.cart().await.total_items(), 3);
}

#[tokio::test]
async fn test_catalog_page_after_load() {
    let ctx = loaded_context().await;

    let response = ctx.get("/").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("bulbasaur"));
    assert!(response.body.contains("http://img.test/1.png"));
    assert!(response.body.contains("http://img.test/2.png"));
}

#[tokio::test]
async fn test_cart_page_reflects_mutations() {
    let ctx = loaded_context().await;
    ctx.htmx_post("/cart/add", "id=2").await;
    ctx.htmx_post("/cart/add", "id=2").await;

    let response = ctx.get("/cart").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("ivysaur"));
    assert!(response.body.contains("Total Items: 2"));
    assert!(!response.body.contains(" disabled>-</button>"));
}

#[tokio::test]
async fn test_plain_forms_work_without_htmx() {
    let ctx = loaded_context().await;

    let response = ctx.form_post("/cart/add", "id=1").await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.headers.get(header::LOCATION).unwrap(), "/");

    let response = ctx
        .form_post("/cart/update", "product_id=1&quantity=4")
        .await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.headers.get(header::LOCATION).unwrap(), "/cart");

    assert_eq!(ctx.state.cart().await.total_items(), 4);
}

#[tokio::test]
async fn test_count_badge_tracks_mutations() {
    let ctx = loaded_context().await;
    ctx.htmx_post("/cart/add", "id=1").await;
    ctx.htmx_post("/cart/add", "id=2").await;
    ctx.htmx_post("/cart/update", "product_id=2&quantity=0")
        .await;

    let response = ctx.get("/cart/count").await;
    assert_eq!(response.body, "<span id=\"cart-count\">1</span>");
}
