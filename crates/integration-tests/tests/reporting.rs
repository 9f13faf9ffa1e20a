//! Reporting aggregation contract, driven through the handlers.

#![allow(clippy::unwrap_used)]

use axum::Json;
use axum::extract::State;
use rust_decimal::Decimal;

use bistro_api::db::Store as _;
use bistro_api::models::NewPayment;
use bistro_api::routes::stats;
use bistro_core::Email;
use bistro_integration_tests::TestContext;

async fn pay_for(ctx: &TestContext, menu_item_ids: Vec<bistro_core::MenuItemId>, cents: i64) {
    ctx.state
        .store()
        .record_payment(NewPayment {
            email: Email::parse("diner@example.com").unwrap(),
            total_amount: Decimal::new(cents, 2),
            cart_item_ids: vec![],
            menu_item_ids,
        })
        .await
        .unwrap();
}

#[tokio::test]
async fn order_stats_inner_join_and_quantity_invariant() {
    let ctx = TestContext::new();
    let pizza = ctx.add_menu_item("Margherita", "pizza", 1450).await;
    let calzone = ctx.add_menu_item("Calzone", "pizza", 1600).await;
    let salad = ctx.add_menu_item("Caesar Salad", "salad", 1250).await;

    pay_for(&ctx, vec![pizza, salad], 2700).await;
    pay_for(&ctx, vec![calzone, salad], 2850).await;

    // Remove the salad from the catalog; its two line items must vanish
    // from the aggregation.
    ctx.state.store().delete_menu_item(salad).await.unwrap();

    let Json(stats) = stats::orders(State(ctx.state.clone())).await.unwrap();

    assert_eq!(stats.len(), 1);
    assert_eq!(stats[0].category, "pizza");
    assert_eq!(stats[0].quantity, 2);
    assert_eq!(stats[0].revenue, Decimal::new(3050, 2));

    // Total quantity == count of line items whose menu item still exists.
    let total: u64 = stats.iter().map(|s| s.quantity).sum();
    assert_eq!(total, 2);
}

#[tokio::test]
async fn admin_stats_revenue_matches_payment_totals() {
    let ctx = TestContext::new();
    ctx.register_admin("chef@example.com").await;

    // Empty: zero revenue, not an error.
    assert_eq!(
        ctx.state.store().total_revenue().await.unwrap(),
        Decimal::ZERO
    );

    pay_for(&ctx, vec![], 2550).await;
    pay_for(&ctx, vec![], 1450).await;

    let counts = ctx.state.store().counts().await.unwrap();
    assert_eq!(counts.users, 1);
    assert_eq!(counts.orders, 2);
    assert_eq!(
        ctx.state.store().total_revenue().await.unwrap(),
        Decimal::new(4000, 2)
    );
}
