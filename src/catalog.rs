//! Catalog of purchasable items.

use rust_decimal::Decimal;
use serde::Deserialize;

/// A purchasable item as returned by the catalog endpoint.
///
/// The backend owns this data; the client holds a read-only copy per load.
/// Field names follow the wire contract.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct CatalogItem {
    /// Backend identity of the item.
    #[serde(rename = "item_id")]
    pub id: u64,

    /// Display name.
    #[serde(rename = "item_name")]
    pub name: String,

    /// Unit price in the backend's currency unit.
    #[serde(rename = "item_price", with = "rust_decimal::serde::float")]
    pub price: Decimal,

    /// Quantity currently in stock.
    #[serde(rename = "item_quantity")]
    pub quantity_in_stock: u32,

    /// Optional percentage discount; absent means no discount.
    #[serde(
        rename = "item_discount",
        default,
        with = "rust_decimal::serde::float_option"
    )]
    pub discount: Option<Decimal>,
}

impl CatalogItem {
    /// Returns the discount percentage, treating an absent discount as zero.
    #[must_use]
    pub fn discount_percent(&self) -> Decimal {
        self.discount.unwrap_or(Decimal::ZERO)
    }
}

/// The set of catalog items known from the latest load.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    items: Vec<CatalogItem>,
}

impl Catalog {
    /// Creates a catalog from the items of one load, preserving their order.
    #[must_use]
    pub fn new(items: Vec<CatalogItem>) -> Self {
        Self { items }
    }

    /// Looks up an item by id.
    #[must_use]
    pub fn get(&self, item_id: u64) -> Option<&CatalogItem> {
        self.items.iter().find(|item| item.id == item_id)
    }

    /// Returns the known stock level for an item, if the item is known.
    #[must_use]
    pub fn stock_for(&self, item_id: u64) -> Option<u32> {
        self.get(item_id).map(|item| item.quantity_in_stock)
    }

    /// Iterates over the items in load order.
    pub fn iter(&self) -> impl Iterator<Item = &CatalogItem> {
        self.items.iter()
    }

    /// Number of items in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the catalog holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
