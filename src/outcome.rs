//! Outcomes
//!
//! Every cart operation answers with an [`Outcome`]: accepted, partially accepted
//! ([`Shortfall`]) or rejected ([`Rejection`]). Rule violations are ordinary values, not
//! errors.

use std::fmt;

use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

use crate::{
    ids::{CategoryId, ItemId, SellerId, VasItemId},
    snapshot::DisplaySnapshot,
};

/// An operation that went through in full.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accepted {
    /// A new line item was created.
    ItemAdded,

    /// An existing line item's quantity was increased.
    ItemQuantityUpdated,

    /// A new VAS item was attached to a line item.
    VasItemAdded(ItemId),

    /// An existing VAS item's quantity was increased.
    VasItemQuantityUpdated,

    /// A line item was removed.
    ItemRemoved,

    /// The cart was emptied.
    CartReset,
}

impl fmt::Display for Accepted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Accepted::ItemAdded => f.write_str("Item added to cart"),
            Accepted::ItemQuantityUpdated => {
                f.write_str("Added from the same item, item quantity updated in cart.")
            }
            Accepted::VasItemAdded(item_id) => {
                write!(f, "VasItem added to item with itemId: {item_id}.")
            }
            Accepted::VasItemQuantityUpdated => f.write_str("VasItem quantity updated in item"),
            Accepted::ItemRemoved => f.write_str("Item removed from cart"),
            Accepted::CartReset => f.write_str("Cart reset"),
        }
    }
}

/// A request that was refused outright; nothing changed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    /// Regular items may not use the VAS seller.
    #[error("SellerId {0} only for VasItems Seller")]
    ReservedSeller(SellerId),

    /// The cart already holds the maximum number of distinct line items.
    #[error(
        "Cart can contain a maximum of {limit} unique items(excluding VasItems). ItemId with {item_id} can't added."
    )]
    TooManyUniqueItems {
        /// Item that was refused
        item_id: ItemId,
        /// Configured distinct-item ceiling
        limit: usize,
    },

    /// Not even one unit fits under the cart price ceiling.
    #[error("Total cart price exceeded, total cart price cannot exceed {0}.")]
    PriceCeiling(Decimal),

    /// The cart already holds the maximum total quantity.
    #[error("Cart is full. No items added to the cart.")]
    CartFull,

    /// VAS items were sent as a top-level item.
    #[error(
        "VasItem can only be added as sub-items to items in the Furniture and electronic categories."
    )]
    VasItemAsLineItem,

    /// The digital quantity ceiling is already reached.
    #[error("The number of digital items cannot be more than {0}. No items added.")]
    DigitalCeiling(u32),

    /// VAS items must come from the VAS seller.
    #[error("SellerId for vasItems must be {0}")]
    VasSeller(SellerId),

    /// No line item carries the requested item id.
    #[error("Item not found in cart")]
    ParentNotFound,

    /// VAS items must be in the VAS category.
    #[error("The CategoryID of VasItem can only be {0}")]
    VasCategory(CategoryId),

    /// The parent line item's category does not take VAS items.
    #[error("VasItem can only be added to items in Furniture or Electronics category")]
    VasParentCategory,

    /// The VAS item costs more than its parent.
    #[error(
        "The price of the VasItem added to the DefaultItem cannot be higher than the DefaultItem's price."
    )]
    VasPriceAboveParent,

    /// The parent line item has no VAS room left for this VAS item.
    #[error("A maximum of {0} VasItems can be added to a DefaultItem.")]
    VasCeiling(u32),

    /// Removal of an item that is not in the cart.
    #[error("Item with itemId:{0} not found in cart")]
    NotInCart(ItemId),

    /// The command record could not be dispatched.
    #[error("Invalid command")]
    InvalidCommand,
}

/// A request that was admitted only in part because a ceiling was hit.
///
/// The `addedQuantity` reported for each case is whatever [`Shortfall::added_quantity`]
/// returns; for the price and total-quantity clips that is the number of units that did
/// *not* fit.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Shortfall {
    /// An existing line item reached its per-item ceiling.
    #[error("The maximum quantity of {item_id} in the cart is {limit}. Only {added} items added.")]
    ItemCeiling {
        /// Line item that was topped up
        item_id: ItemId,
        /// Per-item ceiling
        limit: u32,
        /// Units added
        added: u32,
    },

    /// A new line item was clipped by the cart price ceiling.
    #[error("Total cart price exceeded. Only {admitted} items added to the cart.")]
    PriceCeiling {
        /// Units added
        admitted: u32,
        /// Units left out
        declined: u32,
    },

    /// A new line item was clipped by the total quantity ceiling.
    #[error("Total number of products exceeded. Only {admitted} items added to the cart.")]
    TotalQuantity {
        /// Units added
        admitted: u32,
        /// Units left out
        declined: u32,
    },

    /// A new digital line item was clipped by the digital ceiling.
    #[error("The number of digital items cannot be more than {limit}. Only {admitted} items added.")]
    DigitalCeiling {
        /// Digital ceiling
        limit: u32,
        /// Units added
        admitted: u32,
    },

    /// An existing VAS item reached its per-item ceiling.
    #[error(
        "The maximum quantity of {vas_item_id} in the item is {limit}. Only {added} items added."
    )]
    VasItemCeiling {
        /// VAS item that was topped up
        vas_item_id: VasItemId,
        /// Per-item ceiling
        limit: u32,
        /// Units added
        added: u32,
    },

    /// A new VAS item was clipped to the room left on its parent.
    #[error("Only {0} VasItems added to the item.")]
    VasRoom(u32),

    /// A new VAS item was clipped by the cart price ceiling.
    #[error("Total cart price exceeded. Only {admitted} VasItems added to the item.")]
    VasPriceCeiling {
        /// Units added
        admitted: u32,
        /// Units left out
        declined: u32,
    },
}

impl Shortfall {
    /// Quantity reported alongside the message.
    pub fn added_quantity(&self) -> u32 {
        match self {
            Shortfall::ItemCeiling { added, .. } | Shortfall::VasItemCeiling { added, .. } => *added,
            Shortfall::DigitalCeiling { admitted, .. } | Shortfall::VasRoom(admitted) => *admitted,
            Shortfall::PriceCeiling { declined, .. }
            | Shortfall::TotalQuantity { declined, .. }
            | Shortfall::VasPriceCeiling { declined, .. } => *declined,
        }
    }
}

/// A request that changed the cart, fully or in part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Admission {
    /// Everything requested went in.
    Accepted(Accepted),

    /// Only part of the request went in.
    Shortfall(Shortfall),
}

impl From<Accepted> for Admission {
    fn from(accepted: Accepted) -> Self {
        Admission::Accepted(accepted)
    }
}

impl From<Shortfall> for Admission {
    fn from(shortfall: Shortfall) -> Self {
        Admission::Shortfall(shortfall)
    }
}

/// Message half of an [`Outcome`]: a sentence, or the cart display.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Message {
    /// Human readable description.
    Text(String),

    /// Cart display with the best promotion applied.
    Cart(Box<DisplaySnapshot>),
}

/// Result of one cart operation, in the shape written to the output file.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Outcome {
    result: bool,
    message: Message,
    #[serde(skip_serializing_if = "Option::is_none")]
    added_quantity: Option<u32>,
}

impl Outcome {
    /// Cart display outcome.
    #[must_use]
    pub fn display(snapshot: DisplaySnapshot) -> Self {
        Self {
            result: true,
            message: Message::Cart(Box::new(snapshot)),
            added_quantity: None,
        }
    }

    /// Whether the request went through in full.
    pub fn is_success(&self) -> bool {
        self.result
    }

    /// Whether some, but not all, of the request went through.
    pub fn is_partial(&self) -> bool {
        !self.result && self.added_quantity.is_some()
    }

    /// The message text, unless this is a cart display.
    pub fn text(&self) -> Option<&str> {
        match &self.message {
            Message::Text(text) => Some(text),
            Message::Cart(_) => None,
        }
    }

    /// The cart display, if this is one.
    pub fn snapshot(&self) -> Option<&DisplaySnapshot> {
        match &self.message {
            Message::Cart(snapshot) => Some(snapshot),
            Message::Text(_) => None,
        }
    }

    /// The message half of the outcome.
    pub fn message(&self) -> &Message {
        &self.message
    }

    /// Quantity reported for a partial admission.
    pub fn added_quantity(&self) -> Option<u32> {
        self.added_quantity
    }
}

impl From<Accepted> for Outcome {
    fn from(accepted: Accepted) -> Self {
        Self {
            result: true,
            message: Message::Text(accepted.to_string()),
            added_quantity: None,
        }
    }
}

impl From<Rejection> for Outcome {
    fn from(rejection: Rejection) -> Self {
        Self {
            result: false,
            message: Message::Text(rejection.to_string()),
            added_quantity: None,
        }
    }
}

impl From<Shortfall> for Outcome {
    fn from(shortfall: Shortfall) -> Self {
        Self {
            result: false,
            added_quantity: Some(shortfall.added_quantity()),
            message: Message::Text(shortfall.to_string()),
        }
    }
}

impl From<Admission> for Outcome {
    fn from(admission: Admission) -> Self {
        match admission {
            Admission::Accepted(accepted) => accepted.into(),
            Admission::Shortfall(shortfall) => shortfall.into(),
        }
    }
}

impl From<Result<Admission, Rejection>> for Outcome {
    fn from(result: Result<Admission, Rejection>) -> Self {
        result.map_or_else(Outcome::from, Outcome::from)
    }
}
