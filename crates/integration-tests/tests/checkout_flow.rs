//! Checkout against a mock backend.

#![allow(clippy::unwrap_used)]

use rust_decimal::Decimal;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, ResponseTemplate};

use bazaar_core::{ProductId, Role};
use bazaar_integration_tests::{TestContext, log_in, product};
use bazaar_storefront::checkout::{CheckoutOutcome, checkout};
use bazaar_storefront::views::cart::{LOGIN_REQUIRED, ORDER_PLACED};
use bazaar_storefront::views::{CartPage, Route};

#[tokio::test]
async fn test_checkout_without_session_sends_nothing() {
    let ctx = TestContext::new().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&ctx.server)
        .await;

    let mut state = ctx.state();
    state.cart.add_item(&product(1, "Mug", 999, 5), 2);

    let outcome = checkout(&mut state.cart, &state.sessions, &state.orders)
        .await
        .unwrap();
    assert_eq!(outcome, CheckoutOutcome::RedirectToLogin);
    assert_eq!(state.cart.count(), 2);

    let mut page = CartPage::new();
    assert_eq!(page.checkout(&mut state).await, Some(Route::Login));
    assert_eq!(page.notice().unwrap().message, LOGIN_REQUIRED);
}

#[tokio::test]
async fn test_checkout_sends_items_and_clears_cart() {
    let ctx = TestContext::new().await;
    Mock::given(method("POST"))
        .and(path("/api/orders"))
        .and(header("authorization", "Bearer test-token"))
        .and(body_json(serde_json::json!({
            "items": [
                {"product_id": 1, "quantity": 3},
                {"product_id": 2, "quantity": 1}
            ]
        })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&ctx.server)
        .await;

    let mut state = ctx.state();
    log_in(&state, Role::Customer);
    state.cart.add_item(&product(1, "Mug", 999, 5), 3);
    state.cart.add_item(&product(2, "Pen", 500, 5), 1);
    assert_eq!(state.cart.total(), Decimal::new(3497, 2));

    let mut page = CartPage::new();
    assert_eq!(page.checkout(&mut state).await, Some(Route::Home));
    assert_eq!(page.notice().unwrap().message, ORDER_PLACED);
    assert!(state.cart.is_empty());

    // The cleared cart stays cleared after a restart
    assert!(ctx.state().cart.is_empty());
}

#[tokio::test]
async fn test_rejected_checkout_keeps_cart_and_message() {
    let ctx = TestContext::new().await;
    Mock::given(method("POST"))
        .and(path("/api/orders"))
        .respond_with(
            ResponseTemplate::new(400).set_body_string("insufficient stock for product 1\n"),
        )
        .mount(&ctx.server)
        .await;

    let mut state = ctx.state();
    log_in(&state, Role::Customer);
    state.cart.add_item(&product(1, "Mug", 999, 1), 4);
    let before = state.cart.lines().to_vec();

    let err = checkout(&mut state.cart, &state.sessions, &state.orders)
        .await
        .unwrap_err();
    assert_eq!(err.message(), "insufficient stock for product 1");
    assert_eq!(state.cart.lines(), before.as_slice());

    let mut page = CartPage::new();
    assert_eq!(page.checkout(&mut state).await, None);
    assert_eq!(
        page.notice().unwrap().message,
        "Checkout Failed: insufficient stock for product 1"
    );
    assert_eq!(
        ctx.state().cart.line(ProductId::new(1)).unwrap().quantity,
        4
    );
}

#[tokio::test]
async fn test_empty_cart_is_not_submitted() {
    let ctx = TestContext::new().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&ctx.server)
        .await;

    let mut state = ctx.state();
    log_in(&state, Role::Customer);

    let outcome = checkout(&mut state.cart, &state.sessions, &state.orders)
        .await
        .unwrap();
    assert_eq!(outcome, CheckoutOutcome::EmptyCart);
}
