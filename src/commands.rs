//! Commands
//!
//! Command records as they appear in a batch file: `{"command": "...", "payload": {...}}`.

use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::warn;

use crate::{
    cart::Cart,
    ids::{CategoryId, ItemId, SellerId, VasItemId},
    outcome::{Outcome, Rejection},
};

/// Errors turning a record into a [`Command`].
#[derive(Debug, Error)]
pub enum CommandError {
    /// The record or its payload does not have the expected shape.
    #[error("Malformed command record: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The command name is not one the cart understands.
    #[error("Unknown command `{0}`")]
    Unknown(String),
}

/// Payload of `addItem`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddItem {
    /// Item identifier
    pub item_id: ItemId,

    /// Item category
    pub category_id: CategoryId,

    /// Item seller
    pub seller_id: SellerId,

    /// Unit price
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,

    /// Quantity requested
    pub quantity: u32,
}

/// Payload of `addVasItemToItem`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddVasItemToItem {
    /// Parent line item
    pub item_id: ItemId,

    /// VAS item identifier
    pub vas_item_id: VasItemId,

    /// VAS category
    pub category_id: CategoryId,

    /// VAS seller
    pub seller_id: SellerId,

    /// Unit price
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,

    /// Quantity requested
    pub quantity: u32,
}

/// Payload of `removeItem`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveItem {
    /// Item to remove
    pub item_id: ItemId,
}

/// A cart operation.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Add a line item.
    AddItem(AddItem),

    /// Attach a VAS item to a line item.
    AddVasItemToItem(AddVasItemToItem),

    /// Remove a line item.
    RemoveItem(RemoveItem),

    /// Empty the cart.
    ResetCart,

    /// Show the cart with the best promotion applied.
    DisplayCart,
}

#[derive(Debug, Deserialize)]
struct Record {
    command: String,

    #[serde(default)]
    payload: Value,
}

impl Command {
    /// Parse a `{command, payload}` record.
    ///
    /// # Errors
    ///
    /// Returns a [`CommandError`] if the record is malformed or names an unknown command.
    pub fn from_record(record: Value) -> Result<Self, CommandError> {
        let Record { command, payload } = serde_json::from_value(record)?;

        match command.as_str() {
            "addItem" => Ok(Command::AddItem(serde_json::from_value(payload)?)),
            "addVasItemToItem" => Ok(Command::AddVasItemToItem(serde_json::from_value(payload)?)),
            "removeItem" => Ok(Command::RemoveItem(serde_json::from_value(payload)?)),
            "resetCart" => Ok(Command::ResetCart),
            "displayCart" => Ok(Command::DisplayCart),
            _ => Err(CommandError::Unknown(command)),
        }
    }
}

impl Cart {
    /// Run a single command.
    pub fn process(&mut self, command: Command) -> Outcome {
        match command {
            Command::AddItem(AddItem {
                item_id,
                category_id,
                seller_id,
                price,
                quantity,
            }) => self.add_item(item_id, category_id, seller_id, price, quantity),
            Command::AddVasItemToItem(AddVasItemToItem {
                item_id,
                vas_item_id,
                category_id,
                seller_id,
                price,
                quantity,
            }) => self.add_vas_item_to_item(
                item_id,
                vas_item_id,
                category_id,
                seller_id,
                price,
                quantity,
            ),
            Command::RemoveItem(RemoveItem { item_id }) => self.remove_item(item_id),
            Command::ResetCart => self.reset(),
            Command::DisplayCart => self.display(),
        }
    }

    /// Parse and run a raw record. Records that cannot be parsed are answered with
    /// [`Rejection::InvalidCommand`] and leave the cart untouched.
    pub fn process_record(&mut self, record: Value) -> Outcome {
        match Command::from_record(record) {
            Ok(command) => self.process(command),
            Err(error) => {
                warn!(%error, "invalid command record");

                Rejection::InvalidCommand.into()
            }
        }
    }
}
