//! Cart
//!
//! The cart aggregate. Line items live in a slot map addressed by key; a side index maps each
//! (item, category, seller) triple to its key and a key list keeps insertion order, so
//! displays list items in the order they were first added.

use rust_decimal::{Decimal, prelude::ToPrimitive};
use rustc_hash::FxHashMap;
use slotmap::{SlotMap, new_key_type};
use smallvec::SmallVec;
use tracing::{debug, info};

use crate::{
    config::CartLimits,
    ids::{CategoryId, ItemId, SellerId},
    items::{LineItem, TopUp},
    outcome::{Accepted, Admission, Outcome, Rejection, Shortfall},
    promotions::{CartContents, PromotionEngine},
    snapshot::DisplaySnapshot,
};

pub mod vas;

new_key_type! {
    /// Line Item Key
    pub struct LineItemKey;
}

type LineIdentity = (ItemId, CategoryId, SellerId);

/// A shopping cart with its limits and promotion rules.
///
/// `total_price` is a running total: it is credited on every admission and debited on
/// removal, and is never recomputed from the items.
#[derive(Debug, Clone)]
pub struct Cart {
    items: SlotMap<LineItemKey, LineItem>,
    index: FxHashMap<LineIdentity, LineItemKey>,
    order: SmallVec<[LineItemKey; 10]>,
    total_price: Decimal,
    total_discount: Decimal,
    limits: CartLimits,
    promotions: PromotionEngine,
}

impl Default for Cart {
    fn default() -> Self {
        Self::new(CartLimits::default(), PromotionEngine::default())
    }
}

impl Cart {
    /// Create an empty cart.
    pub fn new(limits: CartLimits, promotions: PromotionEngine) -> Self {
        Self {
            items: SlotMap::with_key(),
            index: FxHashMap::default(),
            order: SmallVec::new(),
            total_price: Decimal::ZERO,
            total_discount: Decimal::ZERO,
            limits,
            promotions,
        }
    }

    /// Create an empty cart with the default promotion rules.
    pub fn with_limits(limits: CartLimits) -> Self {
        Self::new(limits, PromotionEngine::default())
    }

    /// Limits this cart enforces.
    pub fn limits(&self) -> &CartLimits {
        &self.limits
    }

    /// Running total of line items and VAS items, before promotions.
    pub fn total_price(&self) -> Decimal {
        self.total_price
    }

    /// Discount accumulated by displays since the last reset.
    pub fn total_discount(&self) -> Decimal {
        self.total_discount
    }

    /// Line items in insertion order.
    pub fn items(&self) -> impl Iterator<Item = &LineItem> {
        self.order.iter().filter_map(|key| self.items.get(*key))
    }

    /// The first line item with `item_id`, whatever its category and seller.
    pub fn item(&self, item_id: ItemId) -> Option<&LineItem> {
        self.items().find(|item| item.item_id() == item_id)
    }

    /// Number of distinct line items.
    pub fn unique_items(&self) -> usize {
        self.order.len()
    }

    /// Whether the cart holds no line items.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Quantity across all line items and their VAS items.
    pub fn total_quantity(&self) -> u32 {
        self.items()
            .map(|item| item.quantity().saturating_add(item.vas_quantity()))
            .fold(0, u32::saturating_add)
    }

    /// Quantity across digital line items.
    pub fn digital_quantity(&self) -> u32 {
        self.items()
            .filter(|item| item.category_id() == CategoryId::DIGITAL)
            .map(LineItem::quantity)
            .fold(0, u32::saturating_add)
    }

    /// What the promotion rules see of this cart.
    pub fn contents(&self) -> CartContents<'_> {
        CartContents::new(self.items(), self.total_price)
    }

    /// Add `quantity` units of an item.
    ///
    /// An existing (item, category, seller) line is topped up to the per-item ceiling. A new
    /// line is checked against the distinct-item, price, total-quantity and digital ceilings
    /// in that order; the price and quantity ceilings admit as many units as still fit.
    #[tracing::instrument(skip(self), level = "debug")]
    pub fn add_item(
        &mut self,
        item_id: ItemId,
        category_id: CategoryId,
        seller_id: SellerId,
        price: Decimal,
        quantity: u32,
    ) -> Outcome {
        let result = self.admit_item(item_id, category_id, seller_id, price, quantity);

        self.trace(result)
    }

    /// Remove the first line item with `item_id`.
    ///
    /// Only the line's own `price × quantity` is debited from the running total.
    #[tracing::instrument(skip(self), level = "debug")]
    pub fn remove_item(&mut self, item_id: ItemId) -> Outcome {
        let result = self.withdraw_item(item_id);

        self.trace(result)
    }

    /// Empty the cart and clear the running totals.
    pub fn reset(&mut self) -> Outcome {
        self.items.clear();
        self.index.clear();
        self.order.clear();
        self.total_price = Decimal::ZERO;
        self.total_discount = Decimal::ZERO;

        info!("cart reset");

        Accepted::CartReset.into()
    }

    /// Display the cart with the best promotion applied.
    ///
    /// The applied discount is added to the cart's accumulated discount; line items and the
    /// running total are left alone.
    pub fn display(&mut self) -> Outcome {
        let snapshot = self.preview();

        self.total_discount = snapshot.total_discount;

        info!(
            promotion = ?snapshot.applied_promotion_id,
            total_price = %snapshot.total_price,
            total_discount = %snapshot.total_discount,
            "displayed cart"
        );

        Outcome::display(snapshot)
    }

    /// The snapshot [`Cart::display`] would return, without accumulating its discount.
    pub fn preview(&self) -> DisplaySnapshot {
        let contents = self.contents();
        let mut snapshot = DisplaySnapshot::new(self.items(), self.total_price, self.total_discount);

        self.promotions.apply(&contents, &mut snapshot);

        snapshot
    }

    fn admit_item(
        &mut self,
        item_id: ItemId,
        category_id: CategoryId,
        seller_id: SellerId,
        price: Decimal,
        quantity: u32,
    ) -> Result<Admission, Rejection> {
        if seller_id == SellerId::VAS {
            return Err(Rejection::ReservedSeller(seller_id));
        }

        let max_item_quantity = self.limits.max_item_quantity;

        if let Some(item) = self
            .index
            .get(&(item_id, category_id, seller_id))
            .and_then(|key| self.items.get_mut(*key))
        {
            let top_up = TopUp::plan(item.quantity(), quantity, max_item_quantity);

            self.total_price = credit(self.total_price, item.price(), top_up.added())
                .ok_or(Rejection::PriceCeiling(self.limits.max_cart_price))?;
            item.add_quantity(top_up.added());

            return Ok(match top_up {
                TopUp::Full(_) => Accepted::ItemQuantityUpdated.into(),
                TopUp::Clamped(added) => Shortfall::ItemCeiling {
                    item_id,
                    limit: max_item_quantity,
                    added,
                }
                .into(),
            });
        }

        if self.unique_items() >= self.limits.max_unique_items {
            return Err(Rejection::TooManyUniqueItems {
                item_id,
                limit: self.limits.max_unique_items,
            });
        }

        let exceeds_price_ceiling = match credit(self.total_price, price, quantity) {
            Some(prospective) => {
                let best_discount = self.promotions.best_discount(&self.contents(), prospective);

                prospective.saturating_sub(best_discount) > self.limits.max_cart_price
            }
            None => true,
        };

        if exceeds_price_ceiling {
            let admitted = self.units_within_price_ceiling(price).min(quantity);

            if admitted == 0 {
                return Err(Rejection::PriceCeiling(self.limits.max_cart_price));
            }

            self.insert(LineItem::new(item_id, category_id, seller_id, price, admitted))?;

            return Ok(Shortfall::PriceCeiling {
                admitted,
                declined: quantity - admitted,
            }
            .into());
        }

        let in_cart = self.total_quantity();
        let max_total_quantity = self.limits.max_total_quantity;

        if in_cart >= max_total_quantity {
            return Err(Rejection::CartFull);
        }

        if in_cart.saturating_add(quantity) > max_total_quantity {
            let admitted = max_total_quantity - in_cart;

            self.insert(LineItem::new(item_id, category_id, seller_id, price, admitted))?;

            return Ok(Shortfall::TotalQuantity {
                admitted,
                declined: quantity - admitted,
            }
            .into());
        }

        if category_id == CategoryId::VAS {
            return Err(Rejection::VasItemAsLineItem);
        }

        if category_id == CategoryId::DIGITAL {
            let limit = self.limits.max_digital_quantity;
            let available = quantity.min(limit.saturating_sub(self.digital_quantity()));

            if available == 0 {
                return Err(Rejection::DigitalCeiling(limit));
            }

            self.insert(LineItem::new(item_id, category_id, seller_id, price, available))?;

            if available < quantity {
                return Ok(Shortfall::DigitalCeiling {
                    limit,
                    admitted: available,
                }
                .into());
            }

            return Ok(Accepted::ItemAdded.into());
        }

        self.insert(LineItem::new(item_id, category_id, seller_id, price, quantity))?;

        Ok(Accepted::ItemAdded.into())
    }

    fn withdraw_item(&mut self, item_id: ItemId) -> Result<Admission, Rejection> {
        let key = self
            .first_key(item_id)
            .ok_or(Rejection::NotInCart(item_id))?;

        let item = self
            .items
            .remove(key)
            .ok_or(Rejection::NotInCart(item_id))?;

        self.index
            .remove(&(item.item_id(), item.category_id(), item.seller_id()));
        self.order.retain(|candidate| *candidate != key);
        self.total_price = self.total_price.saturating_sub(item.line_total());

        Ok(Accepted::ItemRemoved.into())
    }

    /// Key of the first line item, in insertion order, with `item_id`.
    fn first_key(&self, item_id: ItemId) -> Option<LineItemKey> {
        self.order.iter().copied().find(|key| {
            self.items
                .get(*key)
                .is_some_and(|item| item.item_id() == item_id)
        })
    }

    fn insert(&mut self, item: LineItem) -> Result<LineItemKey, Rejection> {
        let identity = (item.item_id(), item.category_id(), item.seller_id());

        self.total_price = credit(self.total_price, item.price(), item.quantity())
            .ok_or(Rejection::PriceCeiling(self.limits.max_cart_price))?;

        let key = self.items.insert(item);
        self.index.insert(identity, key);
        self.order.push(key);

        Ok(key)
    }

    /// Whole units of `price` that fit between the running total and the price ceiling.
    fn units_within_price_ceiling(&self, price: Decimal) -> u32 {
        units_within(self.limits.max_cart_price.saturating_sub(self.total_price), price)
    }

    fn trace(&self, result: Result<Admission, Rejection>) -> Outcome {
        match &result {
            Ok(admission) => debug!(
                ?admission,
                total_price = %self.total_price,
                quantity = self.total_quantity(),
                "cart updated"
            ),
            Err(rejection) => debug!(%rejection, "request rejected"),
        }

        result.into()
    }
}

/// `total + price × quantity`, or `None` if it does not fit in a `Decimal`.
fn credit(total: Decimal, price: Decimal, quantity: u32) -> Option<Decimal> {
    price
        .checked_mul(Decimal::from(quantity))
        .and_then(|amount| total.checked_add(amount))
}

/// Whole units of `price` that fit in `budget`; zero if none do or `price` is zero.
fn units_within(budget: Decimal, price: Decimal) -> u32 {
    budget
        .checked_div(price)
        .map(|units| units.floor())
        .and_then(|units| units.to_u32())
        .unwrap_or(0)
}
