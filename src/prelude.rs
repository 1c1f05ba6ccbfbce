//! Tillroll prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    api::{ApiError, FieldErrors, OrderApi},
    builder::{OrderBuilder, OrderError},
    cart::{Cart, OrderLine},
    catalog::{Catalog, CatalogItem},
    client::{ApiConfig, PosClient},
    discounts::{DiscountError, discounted_unit_price},
    orders::{Customer, OrderDraft, OrderPayload, PayloadLine, Receipt},
    stock::{StockError, StockShortfall, check_stock},
};
