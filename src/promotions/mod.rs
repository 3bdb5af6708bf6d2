//! Promotions
//!
//! Three cart-wide discount rules are evaluated independently against a price basis and the
//! single best one is applied when the cart is displayed. Nothing here mutates the cart.

use rust_decimal::Decimal;
use serde::Serialize;
use smallvec::SmallVec;
use tracing::debug;

use crate::{items::LineItem, snapshot::DisplaySnapshot};

pub mod category;
pub mod same_seller;
pub mod total_price;

pub use category::CategoryPromotion;
pub use same_seller::SameSellerPromotion;
pub use total_price::{TotalPricePromotion, TotalPriceTier};

/// Published promotion identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "u32")]
pub enum PromotionId {
    /// Tiered discount on the cart total.
    TotalPrice,

    /// Percentage off when every item comes from one seller.
    SameSeller,

    /// Percentage off items in the promoted category.
    Category,
}

impl PromotionId {
    /// Numeric id as published to clients.
    pub const fn id(self) -> u32 {
        match self {
            PromotionId::TotalPrice => 1232,
            PromotionId::SameSeller => 9909,
            PromotionId::Category => 5676,
        }
    }
}

impl From<PromotionId> for u32 {
    fn from(promotion: PromotionId) -> Self {
        promotion.id()
    }
}

/// A rule's verdict for one basis: which promotion (if eligible) and how much it is worth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromotionDiscount {
    /// The promotion, or `None` if the rule did not apply.
    pub promotion: Option<PromotionId>,

    /// Discount amount, never more than the basis.
    pub discount: Decimal,
}

impl PromotionDiscount {
    /// The verdict of a rule that does not apply.
    pub const fn ineligible() -> Self {
        Self {
            promotion: None,
            discount: Decimal::ZERO,
        }
    }

    /// An eligible rule's discount, capped at `basis`.
    pub fn capped(promotion: PromotionId, discount: Decimal, basis: Decimal) -> Self {
        Self {
            promotion: Some(promotion),
            discount: discount.min(basis),
        }
    }
}

/// What the rules get to look at: the live line items and the live running total.
#[derive(Debug, Clone)]
pub struct CartContents<'a> {
    items: SmallVec<[&'a LineItem; 10]>,
    total_price: Decimal,
}

impl<'a> CartContents<'a> {
    /// Wrap the cart's line items (in cart order) and its running total.
    pub fn new(items: impl IntoIterator<Item = &'a LineItem>, total_price: Decimal) -> Self {
        Self {
            items: items.into_iter().collect(),
            total_price,
        }
    }

    /// Line items in cart order.
    pub fn items(&self) -> &[&'a LineItem] {
        &self.items
    }

    /// Running cart total.
    pub fn total_price(&self) -> Decimal {
        self.total_price
    }
}

/// The set of rules the cart is priced with.
#[derive(Debug, Clone, Default)]
pub struct PromotionEngine {
    total_price: TotalPricePromotion,
    same_seller: SameSellerPromotion,
    category: CategoryPromotion,
}

impl PromotionEngine {
    /// Create an engine from explicit rules.
    pub fn new(
        total_price: TotalPricePromotion,
        same_seller: SameSellerPromotion,
        category: CategoryPromotion,
    ) -> Self {
        Self {
            total_price,
            same_seller,
            category,
        }
    }

    /// Evaluate all three rules against `basis`, in priority order.
    pub fn evaluate(
        &self,
        contents: &CartContents<'_>,
        basis: Decimal,
    ) -> [PromotionDiscount; 3] {
        [
            self.total_price.evaluate(basis),
            self.same_seller.evaluate(contents, basis),
            self.category.evaluate(contents, basis),
        ]
    }

    /// The largest discount any rule would give against `basis`.
    pub fn best_discount(&self, contents: &CartContents<'_>, basis: Decimal) -> Decimal {
        self.evaluate(contents, basis)
            .into_iter()
            .map(|candidate| candidate.discount)
            .fold(Decimal::ZERO, Decimal::max)
    }

    /// Pick the rule to apply against `basis`.
    ///
    /// The total-price rule must strictly beat both others; otherwise the same-seller rule
    /// must strictly beat the category rule; otherwise the category rule's verdict is used,
    /// even if that is "no promotion".
    pub fn select(&self, contents: &CartContents<'_>, basis: Decimal) -> PromotionDiscount {
        let [total_price, same_seller, category] = self.evaluate(contents, basis);

        if total_price.discount > same_seller.discount && total_price.discount > category.discount
        {
            total_price
        } else if same_seller.discount > category.discount {
            same_seller
        } else {
            category
        }
    }

    /// Apply the best promotion to a display snapshot of `contents`.
    ///
    /// Returns the applied verdict so the caller can carry the discount forward.
    pub fn apply(
        &self,
        contents: &CartContents<'_>,
        snapshot: &mut DisplaySnapshot,
    ) -> PromotionDiscount {
        let selected = self.select(contents, snapshot.total_price);

        snapshot.total_price = snapshot
            .total_price
            .saturating_sub(selected.discount)
            .max(Decimal::ZERO);
        snapshot.applied_promotion_id = selected.promotion;
        snapshot.total_discount = snapshot.total_discount.saturating_add(selected.discount);

        debug!(
            promotion = ?selected.promotion,
            discount = %selected.discount,
            total_price = %snapshot.total_price,
            "applied promotion"
        );

        selected
    }
}

#[cfg(test)]
mod tests {
    use crate::ids::{CategoryId, ItemId, SellerId};

    use super::*;

    fn item(id: u64, category: CategoryId, seller: u64, price: i64, quantity: u32) -> LineItem {
        LineItem::new(
            ItemId(id),
            category,
            SellerId(seller),
            Decimal::from(price),
            quantity,
        )
    }

    fn total(items: &[LineItem]) -> Decimal {
        items.iter().map(LineItem::line_total).sum()
    }

    #[test]
    fn promotion_ids_serialize_as_numbers() -> testresult::TestResult {
        assert_eq!(serde_json::to_string(&PromotionId::TotalPrice)?, "1232");
        assert_eq!(serde_json::to_string(&PromotionId::SameSeller)?, "9909");
        assert_eq!(serde_json::to_string(&PromotionId::Category)?, "5676");

        Ok(())
    }

    #[test]
    fn same_seller_beats_tier_on_large_single_seller_cart() {
        let items = [item(1, CategoryId::FURNITURE, 7, 3000, 10)];
        let contents = CartContents::new(&items, total(&items));

        let selected = PromotionEngine::default().select(&contents, contents.total_price());

        assert_eq!(selected.promotion, Some(PromotionId::SameSeller));
        assert_eq!(selected.discount, Decimal::from(3000));
    }

    #[test]
    fn tier_wins_when_sellers_differ() {
        let items = [
            item(1, CategoryId::FURNITURE, 7, 100, 1),
            item(2, CategoryId::FURNITURE, 8, 100, 1),
        ];
        let contents = CartContents::new(&items, total(&items));

        let selected = PromotionEngine::default().select(&contents, contents.total_price());

        assert_eq!(selected.promotion, Some(PromotionId::TotalPrice));
        assert_eq!(selected.discount, Decimal::from(200));
    }

    #[test]
    fn tie_between_tier_and_same_seller_goes_to_same_seller() {
        // 2500 total: tier gives 250, same seller gives 10% = 250
        let items = [item(1, CategoryId::FURNITURE, 7, 2500, 1)];
        let contents = CartContents::new(&items, total(&items));

        let selected = PromotionEngine::default().select(&contents, contents.total_price());

        assert_eq!(selected.promotion, Some(PromotionId::SameSeller));
        assert_eq!(selected.discount, Decimal::from(250));
    }

    #[test]
    fn all_zero_falls_back_to_category_verdict() {
        let contents = CartContents::new(std::iter::empty(), Decimal::ZERO);

        let selected = PromotionEngine::default().select(&contents, Decimal::ZERO);

        assert_eq!(selected, PromotionDiscount::ineligible());
    }

    #[test]
    fn best_discount_is_the_maximum() {
        let items = [
            item(1, CategoryId::PROMOTED, 7, 100_000, 1),
            item(2, CategoryId::FURNITURE, 8, 10, 1),
        ];
        let contents = CartContents::new(&items, total(&items));

        // category: 5% of 100000 = 5000; tier: 2000; sellers differ
        let best = PromotionEngine::default().best_discount(&contents, contents.total_price());

        assert_eq!(best, Decimal::from(5000));
    }

    #[test]
    fn apply_updates_snapshot_and_accumulates_discount() {
        let items = [
            item(1, CategoryId::FURNITURE, 7, 100, 1),
            item(2, CategoryId::FURNITURE, 8, 100, 1),
        ];
        let contents = CartContents::new(&items, total(&items));
        let mut snapshot = DisplaySnapshot::new(&items, Decimal::from(200), Decimal::from(50));

        let applied = PromotionEngine::default().apply(&contents, &mut snapshot);

        assert_eq!(applied.promotion, Some(PromotionId::TotalPrice));
        assert_eq!(snapshot.total_price, Decimal::ZERO);
        assert_eq!(snapshot.applied_promotion_id, Some(PromotionId::TotalPrice));
        assert_eq!(snapshot.total_discount, Decimal::from(250));
    }
}
