//! Identifiers
//!
//! Items, categories and sellers are all plain numbers on the wire. Wrapping them keeps a
//! category id from being passed where a seller id is expected, and gives the well-known
//! categories and sellers a name.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! numeric_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl $name {
            /// Return the raw numeric value.
            #[must_use]
            pub const fn get(self) -> u64 {
                self.0
            }
        }

        impl From<u64> for $name {
            fn from(value: u64) -> Self {
                Self(value)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }
    };
}

numeric_id!(
    /// Identifier of a line item.
    ItemId
);

numeric_id!(
    /// Identifier of a value-added service item.
    VasItemId
);

numeric_id!(
    /// Product category.
    CategoryId
);

numeric_id!(
    /// Seller of an item.
    SellerId
);

impl CategoryId {
    /// Furniture. Accepts VAS items.
    pub const FURNITURE: Self = Self(1001);

    /// Items in this category qualify for the category promotion.
    pub const PROMOTED: Self = Self(3003);

    /// Electronics. Accepts VAS items.
    pub const ELECTRONICS: Self = Self(3004);

    /// Value-added services; only ever attached to another item.
    pub const VAS: Self = Self(3242);

    /// Digital goods, capped separately from the cart-wide quantity.
    pub const DIGITAL: Self = Self(7889);

    /// Whether items in this category can carry VAS items.
    #[must_use]
    pub fn accepts_vas_items(self) -> bool {
        self == Self::FURNITURE || self == Self::ELECTRONICS
    }
}

impl SellerId {
    /// The seller reserved for VAS items.
    pub const VAS: Self = Self(5003);
}
