//! Trolley
//!
//! Trolley is a single-cart shopping aggregate: line items with attached value-added service
//! items, capacity and price ceilings, and a best-of promotion engine applied when the cart
//! is displayed.

pub mod batch;
pub mod cart;
pub mod commands;
pub mod config;
pub mod ids;
pub mod items;
pub mod logging;
pub mod outcome;
pub mod prelude;
pub mod promotions;
pub mod snapshot;
