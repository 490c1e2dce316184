//! Integration tests exercising the order aggregate together with the
//! inventory movements and the discount policy.
//!
//! Line totals are computed as unit price times quantity. A summation that
//! treats the bare quantity as a same-currency money term was rejected as a
//! pricing bug; the tests below pin the corrected formula.

use std::collections::HashMap;

use domain::{
    Customer, CustomerId, DiscountPolicy, Money, Order, OrderStatus, Product, ProductId,
    inventory,
};

fn customer() -> Customer {
    Customer::new(
        CustomerId::new(),
        "Ada Lovelace",
        "ada@example.com",
        "12 Analytical Way",
    )
    .unwrap()
}

fn catalog() -> HashMap<ProductId, Product> {
    [
        Product::new("SKU-001", "Widget", "A standard widget", Money::of(1000).unwrap(), 20),
        Product::new("SKU-002", "Gadget", "A premium gadget", Money::of(50_000).unwrap(), 5),
    ]
    .into_iter()
    .map(|p| (p.id().clone(), p))
    .collect()
}

#[test]
fn adding_items_reserves_stock_through_movements() {
    let mut products = catalog();
    let mut order = Order::create(customer());

    let widget = products[&ProductId::new("SKU-001")].clone();
    let movement = order.add_item(&widget, 3).unwrap();
    inventory::apply_movements(&mut products, std::slice::from_ref(&movement)).unwrap();

    assert_eq!(products[&ProductId::new("SKU-001")].stock(), 17);
    assert_eq!(order.total_amount(), Money::of(3000).unwrap());
}

#[test]
fn cancelling_restores_stock_for_every_line() {
    let mut products = catalog();
    let mut order = Order::create(customer());

    for (sku, quantity) in [("SKU-001", 2u32), ("SKU-002", 3u32)] {
        let product = products[&ProductId::new(sku)].clone();
        let movement = order.add_item(&product, quantity).unwrap();
        inventory::apply_movements(&mut products, std::slice::from_ref(&movement)).unwrap();
    }
    order.confirm().unwrap();

    assert_eq!(products[&ProductId::new("SKU-001")].stock(), 18);
    assert_eq!(products[&ProductId::new("SKU-002")].stock(), 2);

    let movements = order.cancel().unwrap();
    inventory::apply_movements(&mut products, &movements).unwrap();

    assert_eq!(order.status(), OrderStatus::Cancelled);
    assert_eq!(products[&ProductId::new("SKU-001")].stock(), 20);
    assert_eq!(products[&ProductId::new("SKU-002")].stock(), 5);
}

#[test]
fn restoration_is_all_or_nothing() {
    let mut products = catalog();
    let mut order = Order::create(customer());

    for (sku, quantity) in [("SKU-001", 2u32), ("SKU-002", 3u32)] {
        let product = products[&ProductId::new(sku)].clone();
        let movement = order.add_item(&product, quantity).unwrap();
        inventory::apply_movements(&mut products, std::slice::from_ref(&movement)).unwrap();
    }

    // One product disappears from the working set before cancellation.
    products.remove(&ProductId::new("SKU-002"));

    let movements = order.cancel().unwrap();
    let result = inventory::apply_movements(&mut products, &movements);

    assert!(result.is_err());
    // The surviving product was not restocked either.
    assert_eq!(products[&ProductId::new("SKU-001")].stock(), 18);
}

#[test]
fn discount_and_shipping_follow_order_totals() {
    let mut products = catalog();
    let policy = DiscountPolicy::new();
    let mut order = Order::create(customer());

    // 3 gadgets at 500.00 -> total 1500.00, 3 items
    let gadget = products[&ProductId::new("SKU-002")].clone();
    let movement = order.add_item(&gadget, 3).unwrap();
    inventory::apply_movements(&mut products, std::slice::from_ref(&movement)).unwrap();

    // only the high-value bonus applies
    assert_eq!(policy.discount_percent(&order), 7);
    assert_eq!(policy.calculate_discount(&order), Money::of(10_500).unwrap());
    assert!(policy.is_eligible_for_free_shipping(&order));
}

#[test]
fn oversell_leaves_order_and_stock_unchanged() {
    let mut products = catalog();
    let mut order = Order::create(customer());

    let gadget = products[&ProductId::new("SKU-002")].clone();
    let result = order.add_item(&gadget, 6);

    assert!(result.is_err());
    assert!(!order.has_items());
    assert_eq!(products[&ProductId::new("SKU-002")].stock(), 5);
}
