//! Order drafts, submission payloads and receipts.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::{cart::Cart, discounts::DiscountError};

/// Customer identity entered by the operator.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Customer {
    /// Customer e-mail address.
    pub email: String,

    /// Customer first name.
    pub first_name: String,

    /// Customer last name.
    pub last_name: String,
}

/// The order being built: customer identity plus the cart at submission
/// time. Field-level validation of the identity is the backend's job; the
/// client only forwards what the operator typed.
#[derive(Clone, Debug, Default)]
pub struct OrderDraft {
    /// Customer identity fields.
    pub customer: Customer,

    /// The cart accumulated so far.
    pub cart: Cart,
}

/// One line of the submission payload. The `price` field carries the
/// already-discounted unit price; the backend does not re-derive it.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct PayloadLine {
    /// Id of the catalog item.
    pub item_id: u64,

    /// Quantity ordered.
    pub quantity: u32,

    /// Discounted unit price.
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,

    /// Discount percentage that was applied to produce `price`.
    #[serde(with = "rust_decimal::serde::float")]
    pub item_discount: Decimal,
}

/// The request body sent to the order-creation endpoint.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct OrderPayload {
    /// Customer e-mail address.
    pub customer_email: String,

    /// Customer first name.
    pub first_name: String,

    /// Customer last name.
    pub last_name: String,

    /// Submission lines derived from the cart.
    pub items: Vec<PayloadLine>,
}

impl OrderDraft {
    /// Shapes the draft into the submission payload, applying each line's
    /// captured discount to its unit price.
    ///
    /// # Errors
    ///
    /// Returns a [`DiscountError`] if any line's captured discount is out of
    /// range or the pricing arithmetic overflows.
    pub fn payload(&self) -> Result<OrderPayload, DiscountError> {
        let items = self
            .cart
            .iter()
            .map(|line| {
                Ok(PayloadLine {
                    item_id: line.item_id(),
                    quantity: line.quantity(),
                    price: line.discounted_unit_price()?,
                    item_discount: line.discount_percent(),
                })
            })
            .collect::<Result<Vec<_>, DiscountError>>()?;

        Ok(OrderPayload {
            customer_email: self.customer.email.clone(),
            first_name: self.customer.first_name.clone(),
            last_name: self.customer.last_name.clone(),
            items,
        })
    }
}

/// Confirmation handed to the caller after a successful submission, used to
/// transition to a receipt view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Receipt {
    /// Server-issued confirmation message.
    pub message: String,

    /// Identity of the customer the order was placed for.
    pub customer: Customer,
}
