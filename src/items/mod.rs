//! Items

use rust_decimal::Decimal;
use smallvec::SmallVec;

use crate::ids::{CategoryId, ItemId, SellerId, VasItemId};

pub mod vas;

pub use vas::VasItem;

/// A distinct (item, category, seller) entry in the cart.
///
/// The unit price is fixed when the line is created; adding more of the same line only
/// changes the quantity.
#[derive(Debug, Clone, PartialEq)]
pub struct LineItem {
    item_id: ItemId,
    category_id: CategoryId,
    seller_id: SellerId,
    price: Decimal,
    quantity: u32,
    vas_items: SmallVec<[VasItem; 3]>,
}

impl LineItem {
    /// Create a line item with no VAS items.
    #[must_use]
    pub fn new(
        item_id: ItemId,
        category_id: CategoryId,
        seller_id: SellerId,
        price: Decimal,
        quantity: u32,
    ) -> Self {
        Self {
            item_id,
            category_id,
            seller_id,
            price,
            quantity,
            vas_items: SmallVec::new(),
        }
    }

    /// Item identifier.
    pub fn item_id(&self) -> ItemId {
        self.item_id
    }

    /// Category of the item.
    pub fn category_id(&self) -> CategoryId {
        self.category_id
    }

    /// Seller of the item.
    pub fn seller_id(&self) -> SellerId {
        self.seller_id
    }

    /// Unit price.
    pub fn price(&self) -> Decimal {
        self.price
    }

    /// Quantity in the cart.
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// VAS items attached to this line, in insertion order.
    pub fn vas_items(&self) -> &[VasItem] {
        &self.vas_items
    }

    /// `price × quantity`, excluding VAS items. Saturates at the `Decimal` bounds.
    pub fn line_total(&self) -> Decimal {
        self.price.saturating_mul(Decimal::from(self.quantity))
    }

    /// `price × quantity` summed over the attached VAS items.
    pub fn vas_total(&self) -> Decimal {
        self.vas_items
            .iter()
            .map(VasItem::line_total)
            .fold(Decimal::ZERO, Decimal::saturating_add)
    }

    /// Total quantity of the attached VAS items.
    pub fn vas_quantity(&self) -> u32 {
        self.vas_items.iter().map(VasItem::quantity).sum()
    }

    /// Look up a VAS item by id.
    pub fn vas_item(&self, vas_item_id: VasItemId) -> Option<&VasItem> {
        self.vas_items
            .iter()
            .find(|vas_item| vas_item.vas_item_id() == vas_item_id)
    }

    pub(crate) fn vas_item_mut(&mut self, vas_item_id: VasItemId) -> Option<&mut VasItem> {
        self.vas_items
            .iter_mut()
            .find(|vas_item| vas_item.vas_item_id() == vas_item_id)
    }

    pub(crate) fn attach(&mut self, vas_item: VasItem) {
        self.vas_items.push(vas_item);
    }

    pub(crate) fn add_quantity(&mut self, quantity: u32) {
        self.quantity = self.quantity.saturating_add(quantity);
    }
}

/// How much of a quantity increase on an existing entry was accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopUp {
    /// The whole request fit.
    Full(u32),

    /// The entry hit its ceiling; only this many units were added.
    Clamped(u32),
}

impl TopUp {
    /// Plan adding `requested` units to `current`, clamping at `max`. A quantity already
    /// above `max` gets nothing.
    #[must_use]
    pub fn plan(current: u32, requested: u32, max: u32) -> Self {
        if current.saturating_add(requested) > max {
            TopUp::Clamped(max.saturating_sub(current))
        } else {
            TopUp::Full(requested)
        }
    }

    /// Units actually added.
    pub fn added(self) -> u32 {
        match self {
            TopUp::Full(added) | TopUp::Clamped(added) => added,
        }
    }
}
