//! Integration tests for the order workflow.
//!
//! These exercise the consolidated order builder end to end over a mocked
//! backend API:
//!
//! 1. A cart within stock passes the guard and submits a payload carrying
//!    already-discounted unit prices.
//! 2. A cart over stock is blocked client-side, naming the shortfall, and
//!    never reaches the network.
//! 3. An empty cart is blocked before any request is issued.
//! 4. Backend field-validation failures leave the draft untouched so the
//!    operator can correct and retry.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use testresult::TestResult;

use tillroll::prelude::*;

use tillroll::api::MockOrderApi;

fn widget() -> CatalogItem {
    CatalogItem {
        id: 1,
        name: "Widget".to_string(),
        price: Decimal::from(50),
        quantity_in_stock: 10,
        discount: None,
    }
}

fn gadget() -> CatalogItem {
    CatalogItem {
        id: 2,
        name: "Gadget".to_string(),
        price: Decimal::from(20),
        quantity_in_stock: 2,
        discount: Some(Decimal::from(25)),
    }
}

fn sam() -> Customer {
    Customer {
        email: "sam@example.com".to_string(),
        first_name: "Sam".to_string(),
        last_name: "Till".to_string(),
    }
}

#[tokio::test]
async fn widget_order_passes_guard_and_submits() -> TestResult {
    let item = widget();
    let catalog = Catalog::new(vec![item.clone()]);

    let mut builder = OrderBuilder::new();
    builder.set_customer(sam());

    for _ in 0..3 {
        builder.add_item(&item);
    }

    assert_eq!(builder.total_price()?, Decimal::from(150));

    let mut api = MockOrderApi::new();
    api.expect_submit_order()
        .withf(|payload| {
            payload.customer_email == "sam@example.com"
                && payload.items
                    == vec![PayloadLine {
                        item_id: 1,
                        quantity: 3,
                        price: Decimal::from(50),
                        item_discount: Decimal::ZERO,
                    }]
        })
        .times(1)
        .returning(|_| Ok("Order placed".to_string()));

    let receipt = builder.submit(&api, &catalog).await?;

    assert_eq!(receipt.message, "Order placed");
    assert_eq!(receipt.customer, sam());

    // Clearing the cart is the caller's job after a success.
    assert_eq!(builder.cart().len(), 1);
    builder.reset();
    assert!(builder.cart().is_empty());

    Ok(())
}

#[tokio::test]
async fn gadget_order_is_blocked_by_the_stock_guard() {
    let item = gadget();
    let catalog = Catalog::new(vec![item.clone()]);

    let mut builder = OrderBuilder::new();
    builder.set_customer(sam());

    for _ in 0..5 {
        builder.add_item(&item);
    }

    let mut api = MockOrderApi::new();
    api.expect_submit_order().times(0);

    let error = builder
        .submit(&api, &catalog)
        .await
        .expect_err("guard should block");

    let OrderError::Stock(StockError::Insufficient(shortfalls)) = error else {
        panic!("expected a stock error, got {error}");
    };

    assert_eq!(
        shortfalls,
        vec![StockShortfall {
            item_id: 2,
            name: "Gadget".to_string(),
            requested: 5,
            available: 2,
        }]
    );
}

#[tokio::test]
async fn empty_cart_never_issues_a_request() {
    let builder = OrderBuilder::new();
    let catalog = Catalog::new(vec![widget()]);

    let mut api = MockOrderApi::new();
    api.expect_submit_order().times(0);

    let error = builder
        .submit(&api, &catalog)
        .await
        .expect_err("empty cart should block");

    assert!(matches!(error, OrderError::EmptyCart));
}

#[tokio::test]
async fn discounted_payload_reaches_the_backend() -> TestResult {
    let item = gadget();

    let catalog = Catalog::new(vec![CatalogItem {
        quantity_in_stock: 10,
        ..item.clone()
    }]);

    let mut builder = OrderBuilder::new();
    builder.set_customer(sam());

    for _ in 0..5 {
        builder.add_item(&item);
    }

    // 20 at 25% off is 15 per unit.
    assert_eq!(builder.total_price()?, Decimal::from(75));

    let mut api = MockOrderApi::new();
    api.expect_submit_order()
        .withf(|payload| {
            payload.items
                == vec![PayloadLine {
                    item_id: 2,
                    quantity: 5,
                    price: Decimal::from(15),
                    item_discount: Decimal::from(25),
                }]
        })
        .times(1)
        .returning(|_| Ok("Order placed".to_string()));

    builder.submit(&api, &catalog).await?;

    Ok(())
}

#[tokio::test]
async fn validation_failure_preserves_the_draft() {
    let item = widget();
    let catalog = Catalog::new(vec![item.clone()]);

    let mut builder = OrderBuilder::new();
    builder.add_item(&item);

    let mut api = MockOrderApi::new();
    api.expect_submit_order().times(1).returning(|_| {
        let mut fields = BTreeMap::new();
        fields.insert(
            "customer_email".to_string(),
            "must be a valid email".to_string(),
        );

        Err(ApiError::Validation(fields))
    });

    let error = builder
        .submit(&api, &catalog)
        .await
        .expect_err("backend validation should fail");

    let OrderError::Api(ApiError::Validation(fields)) = error else {
        panic!("expected a validation error, got {error}");
    };

    assert_eq!(
        fields.get("customer_email").map(String::as_str),
        Some("must be a valid email")
    );

    // The cart is untouched so the operator can correct and retry.
    assert_eq!(builder.cart().len(), 1);
}
