use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use vayuhu_shared::CartItem;

/// Bookings selected for payment, in insertion order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an item. Amounts below zero are refused so the total never goes negative.
    pub fn add(&mut self, item: CartItem) -> Result<(), CartError> {
        if item.final_amount < Decimal::ZERO {
            return Err(CartError::NegativeAmount {
                id: item.id,
                amount: item.final_amount,
            });
        }
        self.items.push(item);
        Ok(())
    }

    /// Remove every item with this id and return how many went.
    ///
    /// Removing an id that is not in the cart is a no-op.
    pub fn remove(&mut self, id: i64) -> usize {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        before - self.items.len()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of `final_amount` over all items, recomputed on every call.
    pub fn total(&self) -> Decimal {
        self.items.iter().map(|item| item.final_amount).sum()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CartError {
    #[error("Cart item {id} has a negative amount ({amount})")]
    NegativeAmount { id: i64, amount: Decimal },
}
