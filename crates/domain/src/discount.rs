//! Discount policy over an order snapshot.

use crate::money::Money;
use crate::order::Order;

/// Quantity above which the 10% tier applies.
const BULK_QUANTITY: u32 = 10;

/// Quantity above which the 5% tier applies.
const VOLUME_QUANTITY: u32 = 5;

/// Order total (major units) above which 7 extra points apply.
const HIGH_VALUE_MAJOR: u32 = 1000;

/// Order total (major units) above which shipping is free.
const FREE_SHIPPING_MAJOR: u32 = 500;

/// Stateless discount and shipping-eligibility policy.
///
/// Thresholds are fixed business constants; there is no configuration
/// surface.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiscountPolicy;

impl DiscountPolicy {
    /// Creates the policy.
    pub fn new() -> Self {
        Self
    }

    /// Returns the discount percentage for an order.
    ///
    /// Quantity tiers: more than 10 items earn 10%, more than 5 earn 5%.
    /// Orders totalling more than 1000 major units earn 7 extra points.
    pub fn discount_percent(&self, order: &Order) -> u8 {
        let mut percent = 0;

        let total_items = order.total_quantity();
        if total_items > BULK_QUANTITY {
            percent += 10;
        } else if total_items > VOLUME_QUANTITY {
            percent += 5;
        }

        let total = order.total_amount();
        if total.exceeds(&Money::from_major(HIGH_VALUE_MAJOR, total.currency())) {
            percent += 7;
        }

        percent
    }

    /// Returns the discount amount for an order, in the order's currency.
    pub fn calculate_discount(&self, order: &Order) -> Money {
        order
            .total_amount()
            .percent_off(self.discount_percent(order))
    }

    /// Returns true if the order qualifies for free shipping.
    ///
    /// Strictly greater than 500 major units.
    pub fn is_eligible_for_free_shipping(&self, order: &Order) -> bool {
        let total = order.total_amount();
        total.exceeds(&Money::from_major(FREE_SHIPPING_MAJOR, total.currency()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::customer::Customer;
    use crate::ids::CustomerId;
    use crate::product::Product;

    fn customer() -> Customer {
        Customer::new(
            CustomerId::new(),
            "Ada Lovelace",
            "ada@example.com",
            "12 Analytical Way",
        )
        .unwrap()
    }

    /// Builds an order from `(quantity, unit price in minor units)` lines.
    fn order_with(lines: &[(u32, i64)]) -> Order {
        let mut order = Order::create(customer());
        for (n, (quantity, unit_minor)) in lines.iter().enumerate() {
            let product = Product::new(
                format!("SKU-{n:03}"),
                "Widget",
                "A standard widget",
                Money::of(*unit_minor).unwrap(),
                *quantity,
            );
            order.add_item(&product, *quantity).unwrap();
        }
        order
    }

    #[test]
    fn eleven_items_over_1000_earn_17_percent() {
        // 11 items totalling 1200.00 -> 10% + 7% = 17%, discount 204.00
        let order = order_with(&[(10, 10_000), (1, 20_000)]);
        assert_eq!(order.total_quantity(), 11);
        assert_eq!(order.total_amount(), Money::of(120_000).unwrap());

        let policy = DiscountPolicy::new();
        assert_eq!(policy.discount_percent(&order), 17);
        assert_eq!(
            policy.calculate_discount(&order),
            Money::of(20_400).unwrap()
        );
    }

    #[test]
    fn three_items_small_total_earn_nothing() {
        // 3 items totalling 100.00
        let order = order_with(&[(2, 2_500), (1, 5_000)]);
        let policy = DiscountPolicy::new();

        assert_eq!(policy.discount_percent(&order), 0);
        assert!(policy.calculate_discount(&order).is_zero());
    }

    #[test]
    fn quantity_tiers_are_strict() {
        let policy = DiscountPolicy::new();
        // exactly 5 items: no tier
        assert_eq!(policy.discount_percent(&order_with(&[(5, 2_000)])), 0);
        // 6 items: 5%
        assert_eq!(policy.discount_percent(&order_with(&[(6, 2_000)])), 5);
        // exactly 10 items: still the 5% tier
        assert_eq!(policy.discount_percent(&order_with(&[(10, 2_000)])), 5);
        // 11 items: 10%
        assert_eq!(policy.discount_percent(&order_with(&[(11, 2_000)])), 10);
    }

    #[test]
    fn high_value_threshold_is_strict() {
        let policy = DiscountPolicy::new();
        // exactly 1000.00: no high-value points
        assert_eq!(policy.discount_percent(&order_with(&[(2, 50_000)])), 0);
        // 1000.02: 7 points
        assert_eq!(policy.discount_percent(&order_with(&[(2, 50_001)])), 7);
    }

    #[test]
    fn free_shipping_is_strictly_over_500() {
        let policy = DiscountPolicy::new();
        assert!(policy.is_eligible_for_free_shipping(&order_with(&[(1, 50_100)])));
        assert!(!policy.is_eligible_for_free_shipping(&order_with(&[(1, 50_000)])));
    }
}
