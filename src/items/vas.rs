//! VAS items
//!
//! Value-added services (installation, warranty, ...) that ride along with a line item.

use rust_decimal::Decimal;

use crate::ids::{CategoryId, SellerId, VasItemId};

/// A value-added service attached to a single line item.
#[derive(Debug, Clone, PartialEq)]
pub struct VasItem {
    vas_item_id: VasItemId,
    category_id: CategoryId,
    seller_id: SellerId,
    price: Decimal,
    quantity: u32,
}

impl VasItem {
    /// Create a VAS item.
    #[must_use]
    pub fn new(
        vas_item_id: VasItemId,
        category_id: CategoryId,
        seller_id: SellerId,
        price: Decimal,
        quantity: u32,
    ) -> Self {
        Self {
            vas_item_id,
            category_id,
            seller_id,
            price,
            quantity,
        }
    }

    /// VAS item identifier.
    pub fn vas_item_id(&self) -> VasItemId {
        self.vas_item_id
    }

    /// Category; always [`CategoryId::VAS`] for items admitted by the cart.
    pub fn category_id(&self) -> CategoryId {
        self.category_id
    }

    /// Seller; always [`SellerId::VAS`] for items admitted by the cart.
    pub fn seller_id(&self) -> SellerId {
        self.seller_id
    }

    /// Unit price.
    pub fn price(&self) -> Decimal {
        self.price
    }

    /// Quantity attached to the parent line.
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// `price × quantity`. Saturates at the `Decimal` bounds.
    pub fn line_total(&self) -> Decimal {
        self.price.saturating_mul(Decimal::from(self.quantity))
    }

    pub(crate) fn set_quantity(&mut self, quantity: u32) {
        self.quantity = quantity;
    }

    pub(crate) fn add_quantity(&mut self, quantity: u32) {
        self.quantity = self.quantity.saturating_add(quantity);
    }
}
