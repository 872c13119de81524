//! Shopping cart state.
//!
//! A [`Cart`] is an ordered list of [`CartLine`]s with at most one line per
//! product and a positive quantity on every line. Lines keep insertion order.
//! Totals are derived on read and never stored.

mod notice;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use notice::CartNotice;

use crate::types::ProductId;

/// One product and how many of it are in the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CartLine {
    pub id: ProductId,
    pub quantity: u32,
}

/// A persisted line list that breaks the cart invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    #[error("cart line for product {0} has zero quantity")]
    ZeroQuantity(ProductId),
    #[error("cart has more than one line for product {0}")]
    DuplicateLine(ProductId),
}

/// Ordered cart lines.
///
/// Serializes as a bare array of `{"id", "quantity"}` objects; deserializing
/// re-checks the invariants.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<CartLine>", into = "Vec<CartLine>")]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl TryFrom<Vec<CartLine>> for Cart {
    type Error = CartError;

    fn try_from(lines: Vec<CartLine>) -> Result<Self, Self::Error> {
        Self::from_lines(lines)
    }
}

impl From<Cart> for Vec<CartLine> {
    fn from(cart: Cart) -> Self {
        cart.lines
    }
}

impl Cart {
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Build a cart from raw lines, checking the invariants.
    ///
    /// # Errors
    ///
    /// Returns `CartError` when a line has zero quantity or two lines share a
    /// product id.
    pub fn from_lines(lines: Vec<CartLine>) -> Result<Self, CartError> {
        for (i, line) in lines.iter().enumerate() {
            if line.quantity == 0 {
                return Err(CartError::ZeroQuantity(line.id));
            }
            if lines.iter().take(i).any(|earlier| earlier.id == line.id) {
                return Err(CartError::DuplicateLine(line.id));
            }
        }
        Ok(Self { lines })
    }

    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Quantity of `id` in the cart, 0 when there is no line.
    #[must_use]
    pub fn quantity_of(&self, id: ProductId) -> u32 {
        self.line(id).map_or(0, |line| line.quantity)
    }

    /// Sum of every line's quantity.
    #[must_use]
    pub fn total_quantity(&self) -> u32 {
        self.lines
            .iter()
            .fold(0u32, |total, line| total.saturating_add(line.quantity))
    }

    /// Append a line with quantity 1, or bump the existing line by one.
    ///
    /// Quantities saturate at `u32::MAX`, so a line already at the ceiling
    /// stays there. Storefront stock limits keep real lines far below it.
    pub fn increase(&mut self, id: ProductId) -> CartNotice {
        if let Some(line) = self.line_mut(id) {
            line.quantity = line.quantity.saturating_add(1);
            CartNotice::QuantityIncreased
        } else {
            self.lines.push(CartLine { id, quantity: 1 });
            CartNotice::ItemAdded
        }
    }

    /// Add `quantity` units in one step.
    ///
    /// Returns `None` and leaves the cart untouched when `quantity` is 0.
    /// The line quantity saturates at `u32::MAX`.
    pub fn add(&mut self, id: ProductId, quantity: u32) -> Option<CartNotice> {
        if quantity == 0 {
            return None;
        }
        if let Some(line) = self.line_mut(id) {
            line.quantity = line.quantity.saturating_add(quantity);
            Some(CartNotice::QuantityIncreased)
        } else {
            self.lines.push(CartLine { id, quantity });
            Some(CartNotice::ItemAdded)
        }
    }

    /// Drop one unit; a line at quantity 1 is deleted.
    ///
    /// No-op returning `None` when there is no line for `id`.
    pub fn decrease(&mut self, id: ProductId) -> Option<CartNotice> {
        let position = self.position(id)?;
        let line = self.lines.get_mut(position)?;
        if line.quantity > 1 {
            line.quantity -= 1;
            Some(CartNotice::QuantityDecreased)
        } else {
            self.lines.remove(position);
            Some(CartNotice::ItemRemoved)
        }
    }

    /// Delete the line for `id`.
    ///
    /// No-op returning `None` when there is no line for `id`.
    pub fn remove(&mut self, id: ProductId) -> Option<CartNotice> {
        let position = self.position(id)?;
        self.lines.remove(position);
        Some(CartNotice::ItemRemoved)
    }

    /// Delete every line.
    pub fn clear(&mut self) -> CartNotice {
        self.lines.clear();
        CartNotice::CartCleared
    }

    fn position(&self, id: ProductId) -> Option<usize> {
        self.lines.iter().position(|line| line.id == id)
    }

    fn line(&self, id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.id == id)
    }

    fn line_mut(&mut self, id: ProductId) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|line| line.id == id)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn id(n: i32) -> ProductId {
        ProductId::new(n)
    }

    fn line(n: i32, quantity: u32) -> CartLine {
        CartLine { id: id(n), quantity }
    }

    #[test]
    fn test_increase_appends_then_increments() {
        let mut cart = Cart::new();
        assert_eq!(cart.increase(id(1)), CartNotice::ItemAdded);
        assert_eq!(cart.lines(), &[line(1, 1)]);

        assert_eq!(cart.increase(id(1)), CartNotice::QuantityIncreased);
        assert_eq!(cart.lines(), &[line(1, 2)]);
    }

    #[test]
    fn test_new_lines_keep_insertion_order() {
        let mut cart = Cart::new();
        cart.increase(id(3));
        cart.increase(id(1));
        cart.increase(id(3));
        assert_eq!(cart.lines(), &[line(3, 2), line(1, 1)]);
        assert_eq!(cart.total_quantity(), 3);
    }

    #[test]
    fn test_decrease_last_unit_removes_line() {
        let mut cart = Cart::from_lines(vec![line(1, 1)]).unwrap();
        assert_eq!(cart.decrease(id(1)), Some(CartNotice::ItemRemoved));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_decrease_above_one_keeps_line() {
        let mut cart = Cart::from_lines(vec![line(1, 3)]).unwrap();
        assert_eq!(cart.decrease(id(1)), Some(CartNotice::QuantityDecreased));
        assert_eq!(cart.quantity_of(id(1)), 2);
    }

    #[test]
    fn test_absent_line_decrease_and_remove_are_silent() {
        let mut cart = Cart::from_lines(vec![line(2, 1)]).unwrap();
        assert_eq!(cart.decrease(id(9)), None);
        assert_eq!(cart.remove(id(9)), None);
        assert_eq!(cart.lines(), &[line(2, 1)]);
    }

    #[test]
    fn test_remove_deletes_whole_line() {
        let mut cart = Cart::from_lines(vec![line(1, 4), line(2, 1)]).unwrap();
        assert_eq!(cart.remove(id(1)), Some(CartNotice::ItemRemoved));
        assert_eq!(cart.lines(), &[line(2, 1)]);
    }

    #[test]
    fn test_add_many() {
        let mut cart = Cart::new();
        assert_eq!(cart.add(id(5), 0), None);
        assert!(cart.is_empty());
        assert_eq!(cart.add(id(5), 3), Some(CartNotice::ItemAdded));
        assert_eq!(cart.add(id(5), 2), Some(CartNotice::QuantityIncreased));
        assert_eq!(cart.quantity_of(id(5)), 5);
    }

    #[test]
    fn test_quantity_saturates_at_ceiling() {
        let mut cart = Cart::from_lines(vec![line(1, u32::MAX)]).unwrap();
        assert_eq!(cart.increase(id(1)), CartNotice::QuantityIncreased);
        assert_eq!(cart.add(id(1), 7), Some(CartNotice::QuantityIncreased));
        assert_eq!(cart.quantity_of(id(1)), u32::MAX);
        assert_eq!(cart.total_quantity(), u32::MAX);
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::from_lines(vec![line(1, 2), line(2, 1)]).unwrap();
        assert_eq!(cart.clear(), CartNotice::CartCleared);
        assert_eq!(cart.quantity_of(id(1)), 0);
        assert_eq!(cart.total_quantity(), 0);
    }

    #[test]
    fn test_from_lines_rejects_invalid() {
        assert_eq!(
            Cart::from_lines(vec![line(1, 0)]),
            Err(CartError::ZeroQuantity(id(1)))
        );
        assert_eq!(
            Cart::from_lines(vec![line(1, 1), line(2, 1), line(1, 2)]),
            Err(CartError::DuplicateLine(id(1)))
        );
    }

    #[test]
    fn test_serialized_shape() {
        let cart = Cart::from_lines(vec![line(1, 2), line(6, 1)]).unwrap();
        let json = serde_json::to_string(&cart).unwrap();
        assert_eq!(json, r#"[{"id":1,"quantity":2},{"id":6,"quantity":1}]"#);

        let duplicate = r#"[{"id":1,"quantity":2},{"id":1,"quantity":1}]"#;
        assert!(serde_json::from_str::<Cart>(duplicate).is_err());
    }

    #[derive(Debug, Clone, Copy)]
    enum Op {
        Increase(i32),
        Decrease(i32),
        Remove(i32),
        Add(i32, u32),
    }

    /// Largest quantity a single generated `add` requests. With at most 64
    /// operations, lines stay far below `u32::MAX`, where `increase`
    /// saturates and the increase/decrease round trip no longer holds.
    const MAX_ADD: u32 = 4;

    fn arb_op() -> impl Strategy<Value = Op> {
        prop_oneof![
            (0..6i32).prop_map(Op::Increase),
            (0..6i32).prop_map(Op::Decrease),
            (0..6i32).prop_map(Op::Remove),
            (0..6i32, 0..MAX_ADD).prop_map(|(id, qty)| Op::Add(id, qty)),
        ]
    }

    fn apply(cart: &mut Cart, op: Op) {
        match op {
            Op::Increase(n) => {
                cart.increase(id(n));
            }
            Op::Decrease(n) => {
                cart.decrease(id(n));
            }
            Op::Remove(n) => {
                cart.remove(id(n));
            }
            Op::Add(n, qty) => {
                cart.add(id(n), qty);
            }
        }
    }

    proptest! {
        #[test]
        fn prop_invariants_hold(ops in prop::collection::vec(arb_op(), 0..64)) {
            let mut cart = Cart::new();
            for op in ops {
                apply(&mut cart, op);
            }
            let rebuilt = Cart::from_lines(cart.lines().to_vec());
            prop_assert_eq!(rebuilt, Ok(cart.clone()));
        }

        #[test]
        fn prop_increase_then_decrease_restores(
            ops in prop::collection::vec(arb_op(), 0..32),
            target in 0..8i32,
        ) {
            let mut cart = Cart::new();
            for op in ops {
                apply(&mut cart, op);
            }
            let before = cart.clone();
            cart.increase(id(target));
            cart.decrease(id(target));
            prop_assert_eq!(cart, before);
        }

        #[test]
        fn prop_clear_zeroes_everything(
            ops in prop::collection::vec(arb_op(), 0..32),
            probe in 0..8i32,
        ) {
            let mut cart = Cart::new();
            for op in ops {
                apply(&mut cart, op);
            }
            cart.clear();
            prop_assert_eq!(cart.quantity_of(id(probe)), 0);
            prop_assert!(cart.is_empty());
        }
    }
}
