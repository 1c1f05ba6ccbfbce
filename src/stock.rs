//! Pre-submission stock validation.

use std::fmt::Write as _;

use thiserror::Error;

use crate::{cart::Cart, catalog::Catalog};

/// One cart line whose requested quantity exceeds the known stock.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StockShortfall {
    /// Id of the offending catalog item.
    pub item_id: u64,

    /// Display name of the offending item.
    pub name: String,

    /// Quantity requested in the cart.
    pub requested: u32,

    /// Quantity available according to the latest catalog load.
    pub available: u32,
}

/// Errors raised by the stock guard.
#[derive(Debug, Error)]
pub enum StockError {
    /// One or more lines request more than the known stock. Every offending
    /// item appears exactly once.
    #[error("insufficient stock: {}", describe_shortfalls(.0))]
    Insufficient(Vec<StockShortfall>),
}

/// Checks every cart line against the latest known stock levels.
///
/// The check is all-or-nothing: if any line requests more than the catalog
/// reports in stock, the whole cart is rejected and every shortfall is
/// listed. An item missing from the catalog counts as having stock 0. The
/// guard is advisory; the backend remains the authority and may still reject
/// the order on a stock change that happened after this check.
///
/// # Errors
///
/// Returns [`StockError::Insufficient`] listing each offending line once.
pub fn check_stock(cart: &Cart, catalog: &Catalog) -> Result<(), StockError> {
    let shortfalls: Vec<StockShortfall> = cart
        .iter()
        .filter_map(|line| {
            let available = catalog.stock_for(line.item_id()).unwrap_or(0);

            (line.quantity() > available).then(|| StockShortfall {
                item_id: line.item_id(),
                name: line.name().to_string(),
                requested: line.quantity(),
                available,
            })
        })
        .collect();

    if shortfalls.is_empty() {
        Ok(())
    } else {
        Err(StockError::Insufficient(shortfalls))
    }
}

fn describe_shortfalls(shortfalls: &[StockShortfall]) -> String {
    shortfalls
        .iter()
        .fold(String::new(), |mut out, shortfall| {
            if !out.is_empty() {
                out.push_str("; ");
            }

            // Writing to a String cannot fail.
            let _ = write!(
                out,
                "{} (requested {}, available {})",
                shortfall.name, shortfall.requested, shortfall.available
            );

            out
        })
}
