//! Total Price Promotion
//!
//! A flat discount picked from a tier table by the basis amount. Always eligible.

use rust_decimal::Decimal;
use smallvec::{SmallVec, smallvec};

use super::{PromotionDiscount, PromotionId};

/// Discount granted while the basis is below `below`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TotalPriceTier {
    below: Decimal,
    discount: Decimal,
}

impl TotalPriceTier {
    /// Create a tier.
    pub fn new(below: Decimal, discount: Decimal) -> Self {
        Self { below, discount }
    }

    /// Exclusive upper bound of the tier.
    pub fn below(&self) -> Decimal {
        self.below
    }

    /// Discount granted inside the tier.
    pub fn discount(&self) -> Decimal {
        self.discount
    }
}

/// Tiered flat discount on the cart total.
#[derive(Debug, Clone)]
pub struct TotalPricePromotion {
    tiers: SmallVec<[TotalPriceTier; 4]>,
    top_discount: Decimal,
}

impl Default for TotalPricePromotion {
    fn default() -> Self {
        Self::new(
            smallvec![
                TotalPriceTier::new(Decimal::from(5_000), Decimal::from(250)),
                TotalPriceTier::new(Decimal::from(10_000), Decimal::from(500)),
                TotalPriceTier::new(Decimal::from(50_000), Decimal::from(1_000)),
            ],
            Decimal::from(2_000),
        )
    }
}

impl TotalPricePromotion {
    /// Create a promotion from tiers (checked in order) and the discount above the last tier.
    pub fn new(tiers: SmallVec<[TotalPriceTier; 4]>, top_discount: Decimal) -> Self {
        Self {
            tiers,
            top_discount,
        }
    }

    /// Discount for `basis`, capped at `basis`.
    pub fn evaluate(&self, basis: Decimal) -> PromotionDiscount {
        let discount = self
            .tiers
            .iter()
            .find(|tier| basis < tier.below)
            .map_or(self.top_discount, TotalPriceTier::discount);

        PromotionDiscount::capped(PromotionId::TotalPrice, discount, basis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn discount_for(basis: i64) -> Decimal {
        TotalPricePromotion::default()
            .evaluate(Decimal::from(basis))
            .discount
    }

    #[test]
    fn tier_boundaries_are_exclusive() {
        assert_eq!(discount_for(4_999), Decimal::from(250));
        assert_eq!(discount_for(5_000), Decimal::from(500));
        assert_eq!(discount_for(9_999), Decimal::from(500));
        assert_eq!(discount_for(10_000), Decimal::from(1_000));
        assert_eq!(discount_for(49_999), Decimal::from(1_000));
        assert_eq!(discount_for(50_000), Decimal::from(2_000));
        assert_eq!(discount_for(500_000), Decimal::from(2_000));
    }

    #[test]
    fn discount_never_exceeds_basis() {
        assert_eq!(discount_for(20), Decimal::from(20));
        assert_eq!(discount_for(0), Decimal::ZERO);
    }

    #[test]
    fn always_eligible() {
        let verdict = TotalPricePromotion::default().evaluate(Decimal::ZERO);

        assert_eq!(verdict.promotion, Some(PromotionId::TotalPrice));
    }
}
