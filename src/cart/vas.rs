//! VAS items on line items

use rust_decimal::Decimal;

use crate::{
    ids::{CategoryId, ItemId, SellerId, VasItemId},
    items::{TopUp, VasItem},
    outcome::{Accepted, Admission, Outcome, Rejection, Shortfall},
};

use super::{Cart, credit, units_within};

impl Cart {
    /// Attach `quantity` units of a VAS item to the first line item with `item_id`.
    ///
    /// VAS items must come from the VAS seller in the VAS category, may only hang off
    /// furniture or electronics and may not cost more than their parent. Each `vas_item_id`
    /// gets a limited number of units per parent; an existing VAS item is topped up to the
    /// per-item ceiling instead.
    #[tracing::instrument(skip(self), level = "debug")]
    pub fn add_vas_item_to_item(
        &mut self,
        item_id: ItemId,
        vas_item_id: VasItemId,
        category_id: CategoryId,
        seller_id: SellerId,
        price: Decimal,
        quantity: u32,
    ) -> Outcome {
        let result = self.admit_vas_item(
            item_id,
            VasItem::new(vas_item_id, category_id, seller_id, price, quantity),
        );

        self.trace(result)
    }

    fn admit_vas_item(
        &mut self,
        item_id: ItemId,
        mut vas_item: VasItem,
    ) -> Result<Admission, Rejection> {
        if vas_item.seller_id() != SellerId::VAS {
            return Err(Rejection::VasSeller(SellerId::VAS));
        }

        let key = self.first_key(item_id).ok_or(Rejection::ParentNotFound)?;

        if vas_item.category_id() != CategoryId::VAS {
            return Err(Rejection::VasCategory(CategoryId::VAS));
        }

        let limits = &self.limits;
        let room_under_ceiling = units_within(
            limits.max_cart_price.saturating_sub(self.total_price),
            vas_item.price(),
        );
        let parent = self.items.get_mut(key).ok_or(Rejection::ParentNotFound)?;

        if !parent.category_id().accepts_vas_items() {
            return Err(Rejection::VasParentCategory);
        }

        if vas_item.price() > parent.price() {
            return Err(Rejection::VasPriceAboveParent);
        }

        let vas_item_id = vas_item.vas_item_id();
        let attached = parent.vas_item(vas_item_id).map_or(0, VasItem::quantity);

        if attached == limits.max_vas_per_item {
            return Err(Rejection::VasCeiling(limits.max_vas_per_item));
        }

        if let Some(existing) = parent.vas_item_mut(vas_item_id) {
            let top_up = TopUp::plan(
                existing.quantity(),
                vas_item.quantity(),
                limits.max_item_quantity,
            );

            self.total_price = credit(self.total_price, existing.price(), top_up.added())
                .ok_or(Rejection::PriceCeiling(limits.max_cart_price))?;
            existing.add_quantity(top_up.added());

            return Ok(match top_up {
                TopUp::Full(_) => Accepted::VasItemQuantityUpdated.into(),
                TopUp::Clamped(added) => Shortfall::VasItemCeiling {
                    vas_item_id,
                    limit: limits.max_item_quantity,
                    added,
                }
                .into(),
            });
        }

        let requested = vas_item.quantity();

        if requested > limits.max_vas_per_item {
            let admitted = limits.max_vas_per_item;

            self.total_price = credit(self.total_price, vas_item.price(), admitted)
                .ok_or(Rejection::PriceCeiling(limits.max_cart_price))?;
            vas_item.set_quantity(admitted);
            parent.attach(vas_item);

            return Ok(Shortfall::VasRoom(admitted).into());
        }

        let exceeds_price_ceiling = credit(self.total_price, vas_item.price(), requested)
            .is_none_or(|prospective| prospective > limits.max_cart_price);

        if exceeds_price_ceiling {
            let admitted = room_under_ceiling.min(requested);

            if admitted == 0 {
                return Err(Rejection::PriceCeiling(limits.max_cart_price));
            }

            self.total_price = credit(self.total_price, vas_item.price(), admitted)
                .ok_or(Rejection::PriceCeiling(limits.max_cart_price))?;
            vas_item.set_quantity(admitted);
            parent.attach(vas_item);

            return Ok(Shortfall::VasPriceCeiling {
                admitted,
                declined: requested - admitted,
            }
            .into());
        }

        self.total_price = credit(self.total_price, vas_item.price(), requested)
            .ok_or(Rejection::PriceCeiling(limits.max_cart_price))?;
        parent.attach(vas_item);

        Ok(Accepted::VasItemAdded(item_id).into())
    }
}
