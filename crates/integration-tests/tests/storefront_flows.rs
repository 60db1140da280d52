//! End-to-end storefront flows over HTTP.
//!
//! Run with: cargo test -p pharmacart-integration-tests

use std::time::Duration;

use pharmacart_integration_tests::{CARD, DELIVERY, TestContext, location};
use pharmacart_storefront::services::MockPaymentGateway;
use reqwest::StatusCode;
use serde_json::Value;

fn pay_form() -> Vec<(&'static str, &'static str)> {
    DELIVERY.iter().chain(CARD.iter()).copied().collect()
}

fn stored(ctx: &TestContext) -> Value {
    let raw = std::fs::read_to_string(&ctx.storage_path).expect("storage file missing");
    serde_json::from_str(&raw).expect("storage file is not JSON")
}

// ============================================================================
// Navigation & Guards
// ============================================================================

#[tokio::test]
async fn test_health_and_root_redirect() {
    let ctx = TestContext::new().await;

    let resp = ctx.get("/health").await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers().contains_key("x-request-id"));

    let resp = ctx.get("/").await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/medicines");
}

#[tokio::test]
async fn test_guarded_views_redirect_to_login() {
    let ctx = TestContext::new().await;

    for path in ["/checkout", "/dashboard"] {
        let resp = ctx.get(path).await;
        assert!(resp.status().is_redirection(), "{path} was not guarded");
        assert_eq!(location(&resp), "/login");
    }

    let resp = ctx.post("/checkout/pay", &pay_form()).await;
    assert_eq!(location(&resp), "/login");
}

#[tokio::test]
async fn test_catalog_search() {
    let ctx = TestContext::new().await;

    let body = ctx.page("/medicines?q=pain").await;
    assert!(body.contains("Paracetamol"));
    assert!(!body.contains("Metformin"));

    let body = ctx.page("/medicines?q=nothing-matches").await;
    assert!(body.contains("No medicines match"));
}

// ============================================================================
// Cart
// ============================================================================

#[tokio::test]
async fn test_cart_add_update_remove() {
    let ctx = TestContext::new().await;

    let resp = ctx.post("/cart/add", &[("product_id", "1"), ("q", "pain relief")]).await;
    assert_eq!(location(&resp), "/medicines?added=1&q=pain%20relief");
    let body = ctx.page("/medicines?added=1").await;
    assert!(body.contains("Paracetamol added to cart successfully!"));

    ctx.add_to_cart(1).await;
    let body = ctx.page("/cart").await;
    assert!(body.contains(r#"name="quantity" value="2""#));
    assert_eq!(stored(&ctx)["cart"].as_str().map(|s| s.contains("\"quantity\":2")), Some(true));

    let resp = ctx.post("/cart/update", &[("product_id", "1"), ("quantity", "0")]).await;
    assert_eq!(location(&resp), "/cart?error=quantity");
    let body = ctx.page("/cart?error=quantity").await;
    assert!(body.contains("Quantity must be at least 1."));
    assert!(body.contains(r#"name="quantity" value="2""#));

    let resp = ctx.post("/cart/update", &[("product_id", "1"), ("quantity", "5")]).await;
    assert_eq!(location(&resp), "/cart");
    assert!(ctx.page("/cart").await.contains(r#"name="quantity" value="5""#));

    ctx.post("/cart/remove", &[("product_id", "1")]).await;
    assert!(ctx.page("/cart").await.contains("Your cart is empty."));
    assert_eq!(stored(&ctx)["cart"], "[]");
}

#[tokio::test]
async fn test_add_unknown_medicine_is_not_found() {
    let ctx = TestContext::new().await;
    let resp = ctx.post("/cart/add", &[("product_id", "999")]).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// ============================================================================
// Auth
// ============================================================================

#[tokio::test]
async fn test_login_failure_and_logout() {
    let ctx = TestContext::new().await;

    let resp = ctx
        .post("/login", &[("email", "demo@example.com"), ("password", "wrong")])
        .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.expect("body");
    assert!(body.contains("Invalid email or password"));
    assert!(body.contains(r#"value="demo@example.com""#));

    ctx.login_demo().await;
    let body = ctx.page("/dashboard").await;
    assert!(body.contains("Demo User"));
    assert!(body.contains("No orders found. Start shopping to see your orders here!"));

    let resp = ctx.post("/logout", &[]).await;
    assert_eq!(location(&resp), "/login");
    assert_eq!(location(&ctx.get("/dashboard").await), "/login");
}

#[tokio::test]
async fn test_register_validation_and_success() {
    let ctx = TestContext::new().await;

    let resp = ctx
        .post(
            "/register",
            &[
                ("name", "Ravi"),
                ("email", "ravi@example.com"),
                ("password", "secret"),
                ("password_confirm", "different"),
            ],
        )
        .await;
    assert!(resp.text().await.expect("body").contains("Passwords do not match"));

    let resp = ctx
        .post(
            "/register",
            &[
                ("name", "Ravi"),
                ("email", "ravi@example.com"),
                ("password", "secret"),
                ("password_confirm", "secret"),
            ],
        )
        .await;
    assert_eq!(location(&resp), "/dashboard");
    assert!(ctx.page("/dashboard").await.contains("ravi@example.com"));
}

// ============================================================================
// Checkout
// ============================================================================

#[tokio::test]
async fn test_checkout_records_order_and_clears_cart() {
    let ctx = TestContext::new().await;
    ctx.login_demo().await;

    // Empty cart goes back to the cart page
    assert_eq!(location(&ctx.get("/checkout").await), "/cart");

    ctx.add_to_cart(1).await;
    ctx.add_to_cart(2).await;
    ctx.add_to_cart(2).await;

    let body = ctx.page("/checkout").await;
    assert!(body.contains(r#"value="demo@example.com""#));
    assert!(body.contains("₹2,448.75"));

    let resp = ctx.post("/checkout", &[("first_name", "Asha")]).await;
    let body = resp.text().await.expect("body");
    assert!(body.contains("Please provide a valid 10-digit phone number."));

    let body = ctx.post("/checkout", &DELIVERY).await.text().await.expect("body");
    assert!(body.contains(r#"name="card_number""#));

    let mut bad_card = pay_form();
    bad_card.retain(|(k, _)| *k != "cvv");
    bad_card.push(("cvv", "12"));
    let body = ctx.post("/checkout/pay", &bad_card).await.text().await.expect("body");
    assert!(body.contains("Please enter the 3-digit CVV."));

    let resp = ctx.post("/checkout/pay", &pay_form()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.expect("body");
    assert!(body.contains("₹2,448.75"));
    assert!(body.contains("asha@example.com"));

    let body = ctx.page("/dashboard").await;
    assert!(body.contains("Order Confirmed &amp; Processing") || body.contains("Order Confirmed &#38; Processing"));
    assert!(body.contains("Asha Rao"));
    assert!(ctx.page("/cart").await.contains("Your cart is empty."));

    let saved = stored(&ctx);
    let orders: Value =
        serde_json::from_str(saved["orders"].as_str().expect("orders key")).expect("orders JSON");
    assert_eq!(orders.as_array().map(Vec::len), Some(1));
    assert_eq!(orders[0]["paymentDetails"]["status"], "COMPLETED");
}

#[tokio::test]
async fn test_declined_payment_keeps_cart() {
    let ctx = TestContext::with_gateway(MockPaymentGateway::declining(Duration::ZERO)).await;
    ctx.login_demo().await;
    ctx.add_to_cart(3).await;

    let body = ctx.post("/checkout/pay", &pay_form()).await.text().await.expect("body");
    assert!(body.contains("Payment failed. Please try again."));
    assert!(body.contains(r#"value="Asha""#));

    assert!(!ctx.page("/cart").await.contains("Your cart is empty."));
    assert!(ctx.page("/dashboard").await.contains("No orders found."));
    assert!(stored(&ctx).get("orders").is_none_or(Value::is_null));
}

#[tokio::test]
async fn test_second_payment_while_first_pending_is_refused() {
    let ctx = TestContext::with_gateway(MockPaymentGateway::new(Duration::from_millis(300))).await;
    ctx.login_demo().await;
    ctx.add_to_cart(1).await;

    let first = {
        let client = ctx.client.clone();
        let url = ctx.url("/checkout/pay");
        let form = pay_form();
        tokio::spawn(async move { client.post(url).form(&form).send().await })
    };
    tokio::time::sleep(Duration::from_millis(50)).await;

    let body = ctx.post("/checkout/pay", &pay_form()).await.text().await.expect("body");
    assert!(body.contains("A payment is already in progress."));

    let first = first.await.expect("task").expect("first payment");
    assert_eq!(first.status(), StatusCode::OK);

    let saved = stored(&ctx);
    let orders: Value =
        serde_json::from_str(saved["orders"].as_str().expect("orders key")).expect("orders JSON");
    assert_eq!(orders.as_array().map(Vec::len), Some(1));
}
