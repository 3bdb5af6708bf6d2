//! Same Seller Promotion

use decimal_percentage::Percentage;
use rust_decimal::Decimal;

use super::{CartContents, PromotionDiscount, PromotionId};

/// Percentage off the running cart total when every line item has the same seller.
///
/// The percentage is taken of the cart's running total rather than the basis; the basis
/// only caps the result.
#[derive(Debug, Clone, Copy)]
pub struct SameSellerPromotion {
    rate: Percentage,
}

impl Default for SameSellerPromotion {
    fn default() -> Self {
        Self::new(Percentage::from(Decimal::new(10, 2)))
    }
}

impl SameSellerPromotion {
    /// Create a promotion with the given rate.
    pub fn new(rate: Percentage) -> Self {
        Self { rate }
    }

    /// Discount for `contents`, capped at `basis`.
    pub fn evaluate(&self, contents: &CartContents<'_>, basis: Decimal) -> PromotionDiscount {
        let mut sellers = contents.items().iter().map(|item| item.seller_id());

        let Some(first) = sellers.next() else {
            return PromotionDiscount::ineligible();
        };

        if sellers.any(|seller| seller != first) {
            return PromotionDiscount::ineligible();
        }

        PromotionDiscount::capped(
            PromotionId::SameSeller,
            self.rate * contents.total_price(),
            basis,
        )
    }
}
