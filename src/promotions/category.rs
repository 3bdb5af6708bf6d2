//! Category Promotion

use decimal_percentage::Percentage;
use rust_decimal::Decimal;

use crate::ids::CategoryId;

use super::{CartContents, PromotionDiscount, PromotionId};

/// Percentage off the line totals of items in one category. VAS items do not count.
#[derive(Debug, Clone, Copy)]
pub struct CategoryPromotion {
    category: CategoryId,
    rate: Percentage,
}

impl Default for CategoryPromotion {
    fn default() -> Self {
        Self::new(CategoryId::PROMOTED, Percentage::from(Decimal::new(5, 2)))
    }
}

impl CategoryPromotion {
    /// Create a promotion for `category` with the given rate.
    pub fn new(category: CategoryId, rate: Percentage) -> Self {
        Self { category, rate }
    }

    /// Discount for `contents`, capped at `basis`.
    pub fn evaluate(&self, contents: &CartContents<'_>, basis: Decimal) -> PromotionDiscount {
        let mut matching = contents
            .items()
            .iter()
            .filter(|item| item.category_id() == self.category)
            .peekable();

        if matching.peek().is_none() {
            return PromotionDiscount::ineligible();
        }

        let category_total = matching
            .map(|item| item.line_total())
            .fold(Decimal::ZERO, Decimal::saturating_add);

        PromotionDiscount::capped(PromotionId::Category, self.rate * category_total, basis)
    }
}
