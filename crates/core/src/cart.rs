//! Session cart.
//!
//! A cart maps product ids to positive quantities. Lines keep the order in
//! which products were first added, which is the order they are listed on
//! the cart and checkout pages.

use serde::{Deserialize, Serialize};

use crate::catalog::{Product, find_product};
use crate::types::{Price, ProductId};

/// One cart entry. `quantity` is always at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: ProductId,
    pub quantity: u32,
}

/// A cart line resolved against the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedLine<'a> {
    pub product: &'a Product,
    pub quantity: u32,
    pub subtotal: Price,
}

/// Product id to quantity mapping, owned by one session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// An empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Add one unit of `product_id`.
    ///
    /// Any id is accepted, including ids that are not in the catalog.
    pub fn add(&mut self, product_id: ProductId) {
        match self.lines.iter_mut().find(|l| l.product_id == product_id) {
            Some(line) => line.quantity = line.quantity.saturating_add(1),
            None => self.lines.push(CartLine {
                product_id,
                quantity: 1,
            }),
        }
    }

    /// Remove one unit of `product_id`, dropping the line when it reaches zero.
    ///
    /// Removing a product that is not in the cart does nothing.
    pub fn remove(&mut self, product_id: ProductId) {
        let Some(pos) = self.lines.iter().position(|l| l.product_id == product_id) else {
            return;
        };
        if let Some(line) = self.lines.get_mut(pos) {
            line.quantity = line.quantity.saturating_sub(1);
            if line.quantity == 0 {
                self.lines.remove(pos);
            }
        }
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Raw lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Quantity of `product_id` in the cart, 0 if absent.
    #[must_use]
    pub fn quantity_of(&self, product_id: ProductId) -> u32 {
        self.lines
            .iter()
            .find(|l| l.product_id == product_id)
            .map_or(0, |l| l.quantity)
    }

    /// Total number of units, for the cart badge.
    #[must_use]
    pub fn count(&self) -> u32 {
        self.lines
            .iter()
            .fold(0u32, |acc, l| acc.saturating_add(l.quantity))
    }

    /// Lines whose product exists in `products`, with subtotals.
    ///
    /// Lines referencing products missing from the catalog are skipped.
    pub fn resolve<'a>(
        &'a self,
        products: &'a [Product],
    ) -> impl Iterator<Item = ResolvedLine<'a>> + 'a {
        self.lines.iter().filter_map(move |line| {
            find_product(products, line.product_id).map(|product| ResolvedLine {
                product,
                quantity: line.quantity,
                subtotal: product.price.times(line.quantity),
            })
        })
    }

    /// Sum of price times quantity over lines found in `products`.
    #[must_use]
    pub fn total(&self, products: &[Product]) -> Price {
        self.resolve(products).map(|line| line.subtotal).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::catalog;

    const APPLE: ProductId = ProductId::new(1);
    const TOMATO: ProductId = ProductId::new(11);
    const GARLIC: ProductId = ProductId::new(20);

    #[test]
    fn test_apple_and_tomato_example() {
        let mut cart = Cart::new();
        cart.add(APPLE);
        cart.add(APPLE);
        cart.add(TOMATO);

        assert_eq!(cart.total(catalog()), Price::new(7500));
        assert_eq!(cart.count(), 3);
    }

    #[test]
    fn test_add_inserts_then_increments() {
        let mut cart = Cart::new();
        cart.add(GARLIC);
        assert_eq!(cart.quantity_of(GARLIC), 1);
        cart.add(GARLIC);
        assert_eq!(cart.quantity_of(GARLIC), 2);
        assert_eq!(cart.lines().len(), 1);
    }

    #[test]
    fn test_remove_drops_line_at_zero() {
        let mut cart = Cart::new();
        cart.add(APPLE);
        cart.add(APPLE);
        cart.remove(APPLE);
        assert_eq!(cart.quantity_of(APPLE), 1);
        cart.remove(APPLE);
        assert!(cart.is_empty());
        assert_eq!(cart.quantity_of(APPLE), 0);
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut cart = Cart::new();
        cart.add(APPLE);
        let before = cart.clone();
        cart.remove(TOMATO);
        cart.remove(TOMATO);
        assert_eq!(cart, before);
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::new();
        cart.add(APPLE);
        cart.add(TOMATO);
        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.count(), 0);
        assert_eq!(cart.total(catalog()), Price::ZERO);
    }

    #[test]
    fn test_unknown_products_are_skipped_in_total() {
        let mut cart = Cart::new();
        cart.add(ProductId::new(404));
        cart.add(TOMATO);

        assert_eq!(cart.count(), 2);
        assert_eq!(cart.total(catalog()), Price::new(2500));
        assert_eq!(cart.resolve(catalog()).count(), 1);
    }

    #[test]
    fn test_lines_keep_insertion_order() {
        let mut cart = Cart::new();
        cart.add(GARLIC);
        cart.add(APPLE);
        cart.add(GARLIC);
        let order: Vec<ProductId> = cart.lines().iter().map(|l| l.product_id).collect();
        assert_eq!(order, vec![GARLIC, APPLE]);
    }

    #[test]
    fn test_invariants_hold_over_operation_sequences() {
        // Deterministic pseudo-random walk over add/remove on a few ids,
        // including one that is not in the catalog.
        let ids = [APPLE, TOMATO, GARLIC, ProductId::new(99)];
        let mut cart = Cart::new();
        let mut seed: u32 = 0x2545_f491;

        for _ in 0..2_000 {
            seed ^= seed << 13;
            seed ^= seed >> 17;
            seed ^= seed << 5;
            let id = ids[(seed % 4) as usize];
            if seed & 0x10 == 0 {
                cart.add(id);
            } else {
                cart.remove(id);
            }

            assert!(cart.lines().iter().all(|l| l.quantity > 0));
            let sum: u32 = cart.lines().iter().map(|l| l.quantity).sum();
            assert_eq!(cart.count(), sum);

            let expected: u64 = cart
                .lines()
                .iter()
                .filter_map(|l| {
                    find_product(catalog(), l.product_id)
                        .map(|p| p.price.pesos() * u64::from(l.quantity))
                })
                .sum();
            assert_eq!(cart.total(catalog()), Price::new(expected));
        }
    }

    #[test]
    fn test_serde_round_trip_through_session_json() {
        let mut cart = Cart::new();
        cart.add(APPLE);
        cart.add(TOMATO);
        let value = serde_json::to_value(&cart).expect("serialize");
        let back: Cart = serde_json::from_value(value).expect("deserialize");
        assert_eq!(back, cart);
    }
}
