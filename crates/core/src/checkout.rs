//! Order totals for the cart page and checkout.
//!
//! Totals are a pure function of the cart and the catalog and are recomputed
//! on every read.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::cart::{Cart, CartLine};
use crate::catalog::{Catalog, Product};
use crate::types::Price;

/// Subtotals strictly above this ship free.
pub const FREE_SHIPPING_THRESHOLD: i64 = 500;

/// Flat shipping charge below the threshold.
pub const FLAT_SHIPPING: i64 = 25;

/// A cart line joined with its catalog product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryLine<'a> {
    pub line: CartLine,
    /// `None` when the product is no longer in the catalog.
    pub product: Option<&'a Product>,
    /// Zero for unavailable products.
    pub line_total: Price,
}

impl SummaryLine<'_> {
    #[must_use]
    pub const fn is_unavailable(&self) -> bool {
        self.product.is_none()
    }
}

/// Priced view of a cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderSummary<'a> {
    /// Every cart line, including unavailable ones, in cart order.
    pub lines: Vec<SummaryLine<'a>>,
    pub item_count: u32,
    pub subtotal: Price,
    pub shipping: Price,
    pub total: Price,
}

impl<'a> OrderSummary<'a> {
    /// Price `cart` against `catalog`.
    #[must_use]
    pub fn compute(cart: &Cart, catalog: &'a Catalog) -> Self {
        let lines: Vec<SummaryLine<'a>> = cart
            .lines()
            .iter()
            .map(|line| {
                let product = catalog.find_by_id(line.id);
                let line_total = product.map_or_else(Price::zero, |p| p.price.times(line.quantity));
                SummaryLine {
                    line: *line,
                    product,
                    line_total,
                }
            })
            .collect();

        let subtotal: Price = lines.iter().map(|l| l.line_total).sum();
        let shipping = shipping_for(subtotal);
        let total = subtotal + shipping;

        Self {
            lines,
            item_count: cart.total_quantity(),
            subtotal,
            shipping,
            total,
        }
    }

    #[must_use]
    pub fn has_free_shipping(&self) -> bool {
        self.shipping.is_zero()
    }

    /// How much more would qualify for free shipping, if any.
    #[must_use]
    pub fn free_shipping_remaining(&self) -> Option<Price> {
        let threshold = Decimal::from(FREE_SHIPPING_THRESHOLD);
        (!self.has_free_shipping()).then(|| {
            Price::new(
                (threshold - self.subtotal.amount).max(Decimal::ZERO),
                self.subtotal.currency_code,
            )
        })
    }

    #[must_use]
    pub fn has_unavailable(&self) -> bool {
        self.lines.iter().any(SummaryLine::is_unavailable)
    }

    /// Owned, serializable form for JSON responses.
    #[must_use]
    pub fn snapshot(&self) -> OrderSnapshot {
        OrderSnapshot {
            lines: self
                .lines
                .iter()
                .map(|l| SnapshotLine {
                    id: l.line.id.as_i32(),
                    quantity: l.line.quantity,
                    name: l.product.map(|p| p.name.clone()),
                    available: !l.is_unavailable(),
                    line_total: l.line_total.amount,
                })
                .collect(),
            item_count: self.item_count,
            subtotal: self.subtotal.amount,
            shipping: self.shipping.amount,
            total: self.total.amount,
        }
    }
}

/// Shipping charge for a subtotal.
#[must_use]
pub fn shipping_for(subtotal: Price) -> Price {
    if subtotal.amount > Decimal::from(FREE_SHIPPING_THRESHOLD) {
        Price::new(Decimal::ZERO, subtotal.currency_code)
    } else {
        Price::new(Decimal::from(FLAT_SHIPPING), subtotal.currency_code)
    }
}

/// Serializable order summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderSnapshot {
    pub lines: Vec<SnapshotLine>,
    pub item_count: u32,
    pub subtotal: Decimal,
    pub shipping: Decimal,
    pub total: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SnapshotLine {
    pub id: i32,
    pub quantity: u32,
    pub name: Option<String>,
    pub available: bool,
    pub line_total: Decimal,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::ProductId;

    fn cart(lines: &[(i32, u32)]) -> Cart {
        Cart::from_lines(
            lines
                .iter()
                .map(|&(id, quantity)| CartLine {
                    id: ProductId::new(id),
                    quantity,
                })
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_free_shipping_above_threshold() {
        let catalog = Catalog::builtin();
        // 799 + 8999
        let summary = OrderSummary::compute(&cart(&[(1, 1), (3, 1)]), &catalog);
        assert_eq!(summary.subtotal, Price::from_major(9798));
        assert_eq!(summary.shipping, Price::from_major(0));
        assert_eq!(summary.total, Price::from_major(9798));
        assert!(summary.has_free_shipping());
        assert_eq!(summary.free_shipping_remaining(), None);
    }

    #[test]
    fn test_flat_shipping_below_threshold() {
        let subtotal = Price::from_major(100);
        assert_eq!(shipping_for(subtotal), Price::from_major(25));
        assert_eq!(subtotal + shipping_for(subtotal), Price::from_major(125));
        assert_eq!(shipping_for(Price::from_major(500)), Price::from_major(25));
        assert_eq!(shipping_for(Price::from_major(501)), Price::from_major(0));

        let catalog = Catalog::builtin();
        // 199 x 2
        let summary = OrderSummary::compute(&cart(&[(6, 2)]), &catalog);
        assert_eq!(summary.subtotal, Price::from_major(398));
        assert_eq!(summary.total, Price::from_major(423));
        assert_eq!(
            summary.free_shipping_remaining(),
            Some(Price::from_major(102))
        );
    }

    #[test]
    fn test_unavailable_lines_kept_but_contribute_nothing() {
        let catalog = Catalog::builtin();
        let summary = OrderSummary::compute(&cart(&[(99, 3), (6, 1)]), &catalog);

        assert_eq!(summary.lines.len(), 2);
        let missing = summary.lines.first().unwrap();
        assert!(missing.is_unavailable());
        assert_eq!(missing.line_total, Price::zero());
        assert!(summary.has_unavailable());
        assert_eq!(summary.item_count, 4);
        assert_eq!(summary.subtotal, Price::from_major(199));
    }

    #[test]
    fn test_snapshot_serializes_amounts_as_strings() {
        let catalog = Catalog::builtin();
        let summary = OrderSummary::compute(&cart(&[(2, 1)]), &catalog);
        let json = serde_json::to_value(summary.snapshot()).unwrap();
        assert_eq!(json["subtotal"], "599");
        assert_eq!(json["shipping"], "0");
        assert_eq!(json["lines"][0]["name"], "SolarSpark Flex Panel");
        assert_eq!(json["lines"][0]["available"], true);
    }
}
