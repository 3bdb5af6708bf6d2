//! Cart display
//!
//! A detached copy of the cart with the best promotion applied. Changing the snapshot never
//! touches the cart it was taken from.

use std::io;

use rust_decimal::Decimal;
use serde::Serialize;
use tabled::{
    builder::Builder,
    grid::config::HorizontalLine,
    settings::{Alignment, Style, Theme, object::Columns},
};
use thiserror::Error;

use crate::{
    ids::{CategoryId, ItemId, SellerId, VasItemId},
    items::{LineItem, VasItem},
    promotions::PromotionId,
};

/// Errors rendering a snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// Writing the rendered table failed.
    #[error("Failed to write cart table: {0}")]
    Io(#[from] io::Error),
}

/// A VAS item as displayed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VasItemView {
    /// VAS item identifier
    pub vas_item_id: VasItemId,

    /// VAS category
    pub category_id: CategoryId,

    /// VAS seller
    pub seller_id: SellerId,

    /// Unit price
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,

    /// Quantity
    pub quantity: u32,
}

impl From<&VasItem> for VasItemView {
    fn from(vas_item: &VasItem) -> Self {
        Self {
            vas_item_id: vas_item.vas_item_id(),
            category_id: vas_item.category_id(),
            seller_id: vas_item.seller_id(),
            price: vas_item.price(),
            quantity: vas_item.quantity(),
        }
    }
}

/// A line item as displayed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItemView {
    /// Item identifier
    pub item_id: ItemId,

    /// Item category
    pub category_id: CategoryId,

    /// Item seller
    pub seller_id: SellerId,

    /// Unit price
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,

    /// Quantity
    pub quantity: u32,

    /// Attached VAS items
    pub vas_items: Vec<VasItemView>,
}

impl From<&LineItem> for LineItemView {
    fn from(item: &LineItem) -> Self {
        Self {
            item_id: item.item_id(),
            category_id: item.category_id(),
            seller_id: item.seller_id(),
            price: item.price(),
            quantity: item.quantity(),
            vas_items: item.vas_items().iter().map(VasItemView::from).collect(),
        }
    }
}

/// The cart as returned by a display request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplaySnapshot {
    /// Line items in cart order
    pub items: Vec<LineItemView>,

    /// Cart total after the applied promotion
    #[serde(with = "rust_decimal::serde::float")]
    pub total_price: Decimal,

    /// Promotion applied, if any
    pub applied_promotion_id: Option<PromotionId>,

    /// Discount accumulated on the cart, including this display
    #[serde(with = "rust_decimal::serde::float")]
    pub total_discount: Decimal,
}

impl DisplaySnapshot {
    /// Copy `items` with no promotion applied yet.
    pub fn new<'a>(
        items: impl IntoIterator<Item = &'a LineItem>,
        total_price: Decimal,
        total_discount: Decimal,
    ) -> Self {
        Self {
            items: items.into_iter().map(LineItemView::from).collect(),
            total_price,
            applied_promotion_id: None,
            total_discount,
        }
    }

    /// Render the snapshot as a table followed by a totals summary.
    ///
    /// # Errors
    ///
    /// Returns a [`SnapshotError`] if writing to `out` fails.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), SnapshotError> {
        let mut builder = Builder::default();

        builder.push_record([
            "", "Item", "Category", "Seller", "Price", "Qty", "Total",
        ]);

        for (idx, item) in self.items.iter().enumerate() {
            builder.push_record([
                format!("#{:<3}", idx + 1),
                item.item_id.to_string(),
                item.category_id.to_string(),
                item.seller_id.to_string(),
                item.price.to_string(),
                item.quantity.to_string(),
                item.price.saturating_mul(Decimal::from(item.quantity)).to_string(),
            ]);

            for vas_item in &item.vas_items {
                builder.push_record([
                    String::new(),
                    format!("└ {}", vas_item.vas_item_id),
                    vas_item.category_id.to_string(),
                    vas_item.seller_id.to_string(),
                    vas_item.price.to_string(),
                    vas_item.quantity.to_string(),
                    vas_item
                        .price
                        .saturating_mul(Decimal::from(vas_item.quantity))
                        .to_string(),
                ]);
            }
        }

        let mut table = builder.build();
        let mut theme = Theme::from(Style::modern_rounded());

        theme.remove_horizontal_lines();
        theme.insert_horizontal_line(
            1,
            HorizontalLine::new(Some('─'), Some('┼'), Some('├'), Some('┤')),
        );

        table.with(theme);
        table.modify(Columns::new(4..7), Alignment::right());

        let promotion = self
            .applied_promotion_id
            .map_or_else(|| "none".to_string(), |promotion| promotion.id().to_string());

        writeln!(out, "\n{table}")?;
        writeln!(out, " Total price:    {}", self.total_price)?;
        writeln!(out, " Promotion:      {promotion}")?;
        writeln!(out, " Total discount: {}", self.total_discount)?;

        Ok(())
    }
}
