//! The consolidated order workflow.

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{debug, warn};

use crate::{
    api::{ApiError, OrderApi},
    cart::Cart,
    catalog::{Catalog, CatalogItem},
    discounts::DiscountError,
    orders::{Customer, OrderDraft, Receipt},
    stock::{StockError, check_stock},
};

/// Errors raised while submitting an order.
#[derive(Debug, Error)]
pub enum OrderError {
    /// The cart is empty; nothing was sent to the backend.
    #[error("cannot submit an empty order")]
    EmptyCart,

    /// The stock guard blocked the submission; nothing was sent.
    #[error(transparent)]
    Stock(#[from] StockError),

    /// The payload could not be priced.
    #[error(transparent)]
    Pricing(#[from] DiscountError),

    /// The backend rejected the request.
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// The single order-construction service shared by every presentation
/// surface.
///
/// Owns the in-progress [`OrderDraft`]; the cart is only mutated through
/// [`add_item`](Self::add_item), [`remove_item`](Self::remove_item) and
/// [`reset`](Self::reset). Submission does not clear the cart: the caller
/// resets after transitioning to the receipt view, so a failed submission
/// preserves everything the operator entered.
#[derive(Debug, Default)]
pub struct OrderBuilder {
    draft: OrderDraft,
}

impl OrderBuilder {
    /// Creates a builder with an empty cart and blank customer fields.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one unit of `item` to the cart, capturing its current price and
    /// discount on the first add.
    pub fn add_item(&mut self, item: &CatalogItem) {
        self.draft.cart.add(item);
    }

    /// Removes one unit of the item with `item_id`; a no-op when the item is
    /// not in the cart.
    pub fn remove_item(&mut self, item_id: u64) {
        self.draft.cart.remove(item_id);
    }

    /// Replaces the customer identity fields.
    pub fn set_customer(&mut self, customer: Customer) {
        self.draft.customer = customer;
    }

    /// Read access to the cart.
    #[must_use]
    pub fn cart(&self) -> &Cart {
        &self.draft.cart
    }

    /// Read access to the customer identity.
    #[must_use]
    pub fn customer(&self) -> &Customer {
        &self.draft.customer
    }

    /// Total price of the cart with per-line discounts applied.
    ///
    /// # Errors
    ///
    /// Returns a [`DiscountError`] if any captured discount is out of range
    /// or the arithmetic overflows.
    pub fn total_price(&self) -> Result<Decimal, DiscountError> {
        self.draft.cart.total_price()
    }

    /// Discards the draft, leaving an empty cart and blank customer fields.
    pub fn reset(&mut self) {
        self.draft = OrderDraft::default();
    }

    /// Submits the order through `api`.
    ///
    /// Client-side blocks run before any network call: an empty cart and a
    /// stock-guard failure both return without issuing a request. On success
    /// the caller receives a [`Receipt`] and is expected to [`reset`](Self::reset)
    /// the builder itself; on any failure the draft is left untouched for
    /// retry.
    ///
    /// # Errors
    ///
    /// - [`OrderError::EmptyCart`]: nothing in the cart; no request sent.
    /// - [`OrderError::Stock`]: some line exceeds known stock; no request sent.
    /// - [`OrderError::Pricing`]: a captured discount could not be applied.
    /// - [`OrderError::Api`]: transport failure, rejected token, or
    ///   field-validation errors from the backend.
    pub async fn submit(
        &self,
        api: &impl OrderApi,
        catalog: &Catalog,
    ) -> Result<Receipt, OrderError> {
        if self.draft.cart.is_empty() {
            return Err(OrderError::EmptyCart);
        }

        check_stock(&self.draft.cart, catalog)?;

        let payload = self.draft.payload()?;

        debug!(lines = payload.items.len(), "cart passed client-side checks");

        let message = api.submit_order(&payload).await.inspect_err(|error| {
            warn!(%error, "order submission failed");
        })?;

        Ok(Receipt {
            message,
            customer: self.draft.customer.clone(),
        })
    }
}
