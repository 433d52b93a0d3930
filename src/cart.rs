//! Cart
//!
//! Transition rules over the shopping cart. None of the operations fail:
//! unknown product ids are no-ops and non-positive quantities remove the line.

use serde::{Deserialize, Serialize};

use crate::{
    catalog::{Product, ProductId},
    prices::Price,
};

/// One distinct product in the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    /// Product identity, unique within the cart
    pub product_id: ProductId,

    /// Product name captured when first added
    pub name: String,

    /// Unit price captured when first added; not re-synced with the catalog
    pub unit_price: Price,

    quantity: u32,
}

impl CartLine {
    fn from_product(product: &Product) -> Self {
        CartLine {
            product_id: product.id.clone(),
            name: product.name.clone(),
            unit_price: product.price,
            quantity: 1,
        }
    }

    /// Quantity of this line, always at least 1.
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Unit price multiplied by quantity.
    pub fn line_total(&self) -> Price {
        self.unit_price.times(self.quantity)
    }
}

/// Cart
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Cart { lines: Vec::new() }
    }

    /// Add one unit of `product`, appending a new line on first add.
    pub fn add_item(&mut self, product: &Product) {
        match self.line_mut(&product.id) {
            Some(line) => line.quantity = line.quantity.saturating_add(1),
            None => self.lines.push(CartLine::from_product(product)),
        }
    }

    /// Set the quantity of a line exactly; zero or less removes it.
    pub fn update_quantity(&mut self, product_id: &ProductId, quantity: i64) {
        if quantity <= 0 {
            self.remove_item(product_id);
            return;
        }

        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);

        if let Some(line) = self.line_mut(product_id) {
            line.quantity = quantity;
        }
    }

    /// Drop the line for `product_id`, if present.
    pub fn remove_item(&mut self, product_id: &ProductId) {
        self.lines.retain(|line| &line.product_id != product_id);
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Sum of unit price times quantity, recomputed on every call.
    pub fn total(&self) -> Price {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Sum of all quantities.
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Look up the line for `product_id`.
    pub fn get(&self, product_id: &ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|line| &line.product_id == product_id)
    }

    /// Get the number of distinct lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    fn line_mut(&mut self, product_id: &ProductId) -> Option<&mut CartLine> {
        self.lines
            .iter_mut()
            .find(|line| &line.product_id == product_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: i64, price: i64) -> Product {
        Product {
            id: ProductId::from(id),
            name: format!("Product {id}"),
            description: None,
            price: Price::from(price),
            image: None,
            category_id: None,
            is_active: true,
            is_available: true,
        }
    }

    #[test]
    fn new_cart_is_empty() {
        let cart = Cart::new();

        assert!(cart.is_empty());
        assert_eq!(cart.total(), Price::ZERO);
        assert_eq!(cart.item_count(), 0);
    }

    #[test]
    fn add_item_appends_line_with_quantity_one() {
        let mut cart = Cart::new();

        cart.add_item(&product(1, 1200));

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.get(&ProductId::from(1)).map(CartLine::quantity), Some(1));
    }

    #[test]
    fn add_item_twice_increments_quantity() {
        let mut cart = Cart::new();
        let burger = product(1, 1200);

        cart.add_item(&burger);
        cart.add_item(&burger);

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.get(&burger.id).map(CartLine::quantity), Some(2));
        assert_eq!(cart.total(), Price::from(2400));
    }

    #[test]
    fn add_item_keeps_price_captured_at_first_add() {
        let mut cart = Cart::new();
        let mut burger = product(1, 1200);

        cart.add_item(&burger);
        burger.price = Price::from(1500);
        cart.add_item(&burger);

        assert_eq!(cart.total(), Price::from(2400));
    }

    #[test]
    fn lines_preserve_insertion_order() {
        let mut cart = Cart::new();

        cart.add_item(&product(3, 10));
        cart.add_item(&product(1, 10));
        cart.add_item(&product(2, 10));
        cart.add_item(&product(1, 10));

        let ids: Vec<_> = cart.lines().iter().map(|l| l.product_id.clone()).collect();

        assert_eq!(
            ids,
            vec![ProductId::from(3), ProductId::from(1), ProductId::from(2)]
        );
    }

    #[test]
    fn update_quantity_sets_exact_value() {
        let mut cart = Cart::new();
        cart.add_item(&product(1, 100));

        cart.update_quantity(&ProductId::from(1), 5);

        assert_eq!(cart.item_count(), 5);
        assert_eq!(cart.total(), Price::from(500));
    }

    #[test]
    fn update_quantity_to_zero_removes_line() {
        let mut cart = Cart::new();
        cart.add_item(&product(1, 100));

        cart.update_quantity(&ProductId::from(1), 0);

        assert!(cart.is_empty());
    }

    #[test]
    fn update_quantity_negative_removes_line() {
        let mut cart = Cart::new();
        cart.add_item(&product(1, 100));
        cart.add_item(&product(2, 100));

        cart.update_quantity(&ProductId::from(1), -3);

        assert_eq!(cart.len(), 1);
        assert!(cart.get(&ProductId::from(1)).is_none());
    }

    #[test]
    fn update_quantity_unknown_product_is_noop() {
        let mut cart = Cart::new();
        cart.add_item(&product(1, 100));
        let before = cart.clone();

        cart.update_quantity(&ProductId::from(9), 4);

        assert_eq!(cart, before);
    }

    #[test]
    fn remove_unknown_product_is_noop() {
        let mut cart = Cart::new();
        cart.add_item(&product(1, 100));
        let before = cart.clone();

        cart.remove_item(&ProductId::from(9));

        assert_eq!(cart, before);
    }

    #[test]
    fn clear_empties_cart() {
        let mut cart = Cart::new();
        cart.add_item(&product(1, 100));
        cart.add_item(&product(2, 100));

        cart.clear();

        assert_eq!(cart, Cart::new());
    }

    #[test]
    fn item_count_sums_quantities() {
        let mut cart = Cart::new();
        cart.add_item(&product(1, 100));
        cart.add_item(&product(1, 100));
        cart.add_item(&product(2, 250));

        assert_eq!(cart.item_count(), 3);
        assert_eq!(cart.total(), Price::from(450));
    }
}
