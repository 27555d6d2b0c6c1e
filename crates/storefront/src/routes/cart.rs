//! Cart route handlers.
//!
//! Cart operations use HTMX for dynamic updates without full page reloads.
//! Plain form posts (no `HX-Request` header) are answered with a redirect
//! back to the page they came from. The cart itself lives in [`AppState`];
//! every mutation goes through [`AppState::dispatch`].

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::State,
    http::HeaderMap,
    response::{AppendHeaders, IntoResponse, Redirect, Response},
};
use pokecart_core::{Cart, CartAction, CartLine, CatalogItemId, ProductId};
use serde::Deserialize;
use tracing::instrument;

use super::is_htmx;
use crate::error::{AppError, Form, Result, add_breadcrumb};
use crate::state::AppState;

/// HTMX event fired after every cart mutation. The nav badge listens for it
/// and refreshes itself from `/cart/count`.
const CART_UPDATED_TRIGGER: (&str, &str) = ("HX-Trigger", "cart-updated");

/// Cart line display data for templates.
#[derive(Clone)]
pub struct CartLineView {
    pub product_id: String,
    pub title: String,
    pub quantity: u32,
    /// Decrement is disabled at 1; removal is a separate action.
    pub can_decrement: bool,
    pub decrement_quantity: i64,
    pub increment_quantity: i64,
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub lines: Vec<CartLineView>,
    pub total_items: u64,
}

impl From<&CartLine> for CartLineView {
    fn from(line: &CartLine) -> Self {
        let quantity = i64::from(line.quantity);
        Self {
            product_id: line.product_id.to_string(),
            title: line.title.clone(),
            quantity: line.quantity,
            can_decrement: line.quantity > 1,
            decrement_quantity: quantity - 1,
            increment_quantity: quantity + 1,
        }
    }
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            lines: cart.lines().iter().map(CartLineView::from).collect(),
            total_items: cart.total_items(),
        }
    }
}

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub id: u32,
}

/// Update cart form data.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub product_id: String,
    pub quantity: i64,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub product_id: String,
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub cart: CartView,
    /// Cart total for the nav badge.
    pub count: u64,
}

/// Cart items fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_items.html")]
pub struct CartItemsTemplate {
    pub cart: CartView,
}

/// Cart count badge fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u64,
}

/// Purchase confirmation fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/buy_confirmation.html")]
pub struct BuyConfirmationTemplate {
    pub total_items: u64,
}

/// Purchase confirmation page for plain form posts.
#[derive(Template, WebTemplate)]
#[template(path = "cart/confirm.html")]
pub struct BuyConfirmationPageTemplate {
    pub total_items: u64,
    pub count: u64,
}

/// Answer a cart mutation: the given fragment for HTMX, a redirect otherwise.
fn mutation_response(headers: &HeaderMap, fragment: impl IntoResponse, back_to: &str) -> Response {
    if is_htmx(headers) {
        (AppendHeaders([CART_UPDATED_TRIGGER]), fragment).into_response()
    } else {
        Redirect::to(back_to).into_response()
    }
}

/// Display cart page.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> impl IntoResponse {
    let cart = state.cart().await;

    CartShowTemplate {
        cart: CartView::from(&cart),
        count: cart.total_items(),
    }
}

/// Add one unit of a catalog item to the cart (HTMX).
///
/// The item's name is taken from the loaded catalog at the moment of the add.
/// Returns the updated count badge.
#[instrument(skip(state, headers))]
pub async fn add(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<AddToCartForm>,
) -> Result<Response> {
    if form.id == 0 {
        return Err(AppError::BadRequest(
            "catalog item IDs start at 1".to_string(),
        ));
    }

    let item = state
        .catalog()
        .find(CatalogItemId::new(form.id))
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("catalog item {}", form.id)))?;

    let product_id = ProductId::from(item.id);
    add_breadcrumb(
        "cart",
        "Added item",
        Some(&[("product_id", product_id.as_str())]),
    );

    let cart = state.dispatch(CartAction::Add(item)).await;
    tracing::debug!(%product_id, total_items = cart.total_items(), "Cart item added");

    Ok(mutation_response(
        &headers,
        CartCountTemplate {
            count: cart.total_items(),
        },
        "/",
    ))
}

/// Set the quantity of a cart line (HTMX).
///
/// A quantity of zero or below removes the line.
#[instrument(skip(state, headers))]
pub async fn update(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<UpdateCartForm>,
) -> Response {
    let quantity = form.quantity.to_string();
    add_breadcrumb(
        "cart",
        "Updated quantity",
        Some(&[
            ("product_id", form.product_id.as_str()),
            ("quantity", quantity.as_str()),
        ]),
    );

    let cart = state
        .dispatch(CartAction::SetQuantity {
            product_id: ProductId::new(form.product_id),
            quantity: form.quantity,
        })
        .await;

    mutation_response(
        &headers,
        CartItemsTemplate {
            cart: CartView::from(&cart),
        },
        "/cart",
    )
}

/// Remove a line from the cart (HTMX).
#[instrument(skip(state, headers))]
pub async fn remove(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<RemoveFromCartForm>,
) -> Response {
    add_breadcrumb(
        "cart",
        "Removed item",
        Some(&[("product_id", form.product_id.as_str())]),
    );

    let cart = state
        .dispatch(CartAction::Remove(ProductId::new(form.product_id)))
        .await;

    mutation_response(
        &headers,
        CartItemsTemplate {
            cart: CartView::from(&cart),
        },
        "/cart",
    )
}

/// Get cart count badge (HTMX).
#[instrument(skip(state))]
pub async fn count(State(state): State<AppState>) -> impl IntoResponse {
    CartCountTemplate {
        count: state.cart().await.total_items(),
    }
}

/// Confirm the purchase.
///
/// Only shows how many items are being bought; the cart is left unchanged.
#[instrument(skip(state, headers))]
pub async fn buy(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let total_items = state.cart().await.total_items();
    add_breadcrumb("cart", "Confirmed buy", None);
    tracing::info!(total_items, "Purchase confirmed");

    if is_htmx(&headers) {
        BuyConfirmationTemplate { total_items }.into_response()
    } else {
        BuyConfirmationPageTemplate {
            total_items,
            count: total_items,
        }
        .into_response()
    }
}
