//! Trolley prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    batch::BatchError,
    cart::Cart,
    commands::{AddItem, AddVasItemToItem, Command, CommandError, RemoveItem},
    config::{CartLimits, ConfigError},
    ids::{CategoryId, ItemId, SellerId, VasItemId},
    items::{LineItem, VasItem},
    outcome::{Accepted, Message, Outcome, Rejection, Shortfall},
    promotions::{
        CategoryPromotion, PromotionDiscount, PromotionEngine, PromotionId, SameSellerPromotion,
        TotalPricePromotion, TotalPriceTier,
    },
    snapshot::{DisplaySnapshot, SnapshotError},
};
