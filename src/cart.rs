//! In-memory cart aggregation.

use rust_decimal::Decimal;

use crate::{
    catalog::CatalogItem,
    discounts::{DiscountError, discounted_unit_price},
};

/// One catalog item plus the quantity the operator wants to purchase.
///
/// The unit price and discount are captured when the line is first created
/// and are not re-read on later catalog changes.
#[derive(Clone, Debug, PartialEq)]
pub struct OrderLine {
    item_id: u64,
    name: String,
    unit_price: Decimal,
    discount_percent: Decimal,
    quantity: u32,
}

impl OrderLine {
    fn new(item: &CatalogItem) -> Self {
        Self {
            item_id: item.id,
            name: item.name.clone(),
            unit_price: item.price,
            discount_percent: item.discount_percent(),
            quantity: 1,
        }
    }

    /// Id of the catalog item this line references.
    #[must_use]
    pub fn item_id(&self) -> u64 {
        self.item_id
    }

    /// Display name captured from the catalog item.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Unit price captured when the line was created.
    #[must_use]
    pub fn unit_price(&self) -> Decimal {
        self.unit_price
    }

    /// Discount percentage captured when the line was created.
    #[must_use]
    pub fn discount_percent(&self) -> Decimal {
        self.discount_percent
    }

    /// Quantity in the cart; never below 1 while the line exists.
    #[must_use]
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Unit price with the line's captured discount applied.
    ///
    /// # Errors
    ///
    /// Returns a [`DiscountError`] if the captured discount percentage is out
    /// of range or the calculation overflows.
    pub fn discounted_unit_price(&self) -> Result<Decimal, DiscountError> {
        discounted_unit_price(self.unit_price, self.discount_percent)
    }

    /// Discounted unit price multiplied by the quantity.
    ///
    /// # Errors
    ///
    /// Returns a [`DiscountError`] if the discounted unit price cannot be
    /// calculated or the multiplication overflows.
    pub fn total(&self) -> Result<Decimal, DiscountError> {
        self.discounted_unit_price()?
            .checked_mul(Decimal::from(self.quantity))
            .ok_or(DiscountError::Overflow)
    }
}

/// The order-in-progress collection of [`OrderLine`]s.
///
/// Lines are keyed by item id (at most one line per id) and kept in the
/// order items were first added.
#[derive(Clone, Debug, Default)]
pub struct Cart {
    lines: Vec<OrderLine>,
}

impl Cart {
    /// Creates an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one unit of `item` to the cart.
    ///
    /// An existing line for the item's id is incremented; otherwise a new
    /// line is created at quantity 1, capturing the item's current price and
    /// discount.
    pub fn add(&mut self, item: &CatalogItem) {
        if let Some(line) = self.line_mut(item.id) {
            line.quantity += 1;
        } else {
            self.lines.push(OrderLine::new(item));
        }
    }

    /// Removes one unit of the item with `item_id` from the cart.
    ///
    /// A line that reaches quantity 0 is deleted. Removing an item that is
    /// not in the cart is a no-op.
    pub fn remove(&mut self, item_id: u64) {
        let Some(index) = self.lines.iter().position(|line| line.item_id == item_id) else {
            return;
        };

        if let Some(line) = self.lines.get_mut(index) {
            if line.quantity > 1 {
                line.quantity -= 1;
            } else {
                self.lines.remove(index);
            }
        }
    }

    /// Calculates the total price of the cart: the sum over all lines of the
    /// discounted unit price times the quantity.
    ///
    /// # Errors
    ///
    /// Returns a [`DiscountError`] if any line's captured discount is out of
    /// range or the arithmetic overflows.
    pub fn total_price(&self) -> Result<Decimal, DiscountError> {
        self.lines.iter().try_fold(Decimal::ZERO, |acc, line| {
            acc.checked_add(line.total()?).ok_or(DiscountError::Overflow)
        })
    }

    /// Gets the line for an item id, if present.
    #[must_use]
    pub fn line(&self, item_id: u64) -> Option<&OrderLine> {
        self.lines.iter().find(|line| line.item_id == item_id)
    }

    /// Iterates over the lines in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &OrderLine> {
        self.lines.iter()
    }

    /// Number of lines in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the cart holds no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Removes every line from the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    fn line_mut(&mut self, item_id: u64) -> Option<&mut OrderLine> {
        self.lines.iter_mut().find(|line| line.item_id == item_id)
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn widget() -> CatalogItem {
        CatalogItem {
            id: 1,
            name: "Widget".to_string(),
            price: Decimal::from(50),
            quantity_in_stock: 10,
            discount: None,
        }
    }

    fn gadget() -> CatalogItem {
        CatalogItem {
            id: 2,
            name: "Gadget".to_string(),
            price: Decimal::from(100),
            quantity_in_stock: 4,
            discount: Some(Decimal::from(10)),
        }
    }

    #[test]
    fn add_creates_line_at_quantity_one() {
        let mut cart = Cart::new();

        cart.add(&widget());

        let line = cart.line(1).expect("line for widget");
        assert_eq!(line.quantity(), 1);
        assert_eq!(line.unit_price(), Decimal::from(50));
        assert_eq!(line.discount_percent(), Decimal::ZERO);
    }

    #[test]
    fn add_increments_existing_line() {
        let mut cart = Cart::new();

        cart.add(&widget());
        cart.add(&widget());

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.line(1).map(OrderLine::quantity), Some(2));
    }

    #[test]
    fn add_captures_price_at_insertion_time() {
        let mut cart = Cart::new();
        let mut item = widget();

        cart.add(&item);

        // Later catalog changes must not affect the captured price.
        item.price = Decimal::from(75);
        cart.add(&item);

        assert_eq!(cart.line(1).map(OrderLine::unit_price), Some(Decimal::from(50)));
    }

    #[test]
    fn remove_decrements_then_deletes() {
        let mut cart = Cart::new();

        cart.add(&widget());
        cart.add(&widget());

        cart.remove(1);
        assert_eq!(cart.line(1).map(OrderLine::quantity), Some(1));

        cart.remove(1);
        assert!(cart.line(1).is_none());
        assert!(cart.is_empty());
    }

    #[test]
    fn add_then_remove_leaves_no_line() {
        let mut cart = Cart::new();

        cart.add(&widget());
        cart.remove(1);

        assert!(cart.line(1).is_none());
    }

    #[test]
    fn remove_unknown_item_is_a_no_op() {
        let mut cart = Cart::new();

        cart.add(&widget());
        cart.remove(99);

        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn total_price_of_empty_cart_is_zero() -> TestResult {
        let cart = Cart::new();

        assert_eq!(cart.total_price()?, Decimal::ZERO);

        Ok(())
    }

    #[test]
    fn total_price_applies_discount_per_line() -> TestResult {
        let mut cart = Cart::new();

        // Price 100 at 10% off, quantity 2: 90 * 2 = 180.
        cart.add(&gadget());
        cart.add(&gadget());

        assert_eq!(cart.total_price()?, Decimal::from(180));

        Ok(())
    }

    #[test]
    fn total_price_sums_multiple_lines() -> TestResult {
        let mut cart = Cart::new();

        cart.add(&widget());
        cart.add(&widget());
        cart.add(&widget());
        cart.add(&gadget());

        // 3 * 50 + 1 * 90 = 240.
        assert_eq!(cart.total_price()?, Decimal::from(240));

        Ok(())
    }

    #[test]
    fn clear_empties_the_cart() {
        let mut cart = Cart::new();

        cart.add(&widget());
        cart.add(&gadget());
        cart.clear();

        assert!(cart.is_empty());
    }

    #[test]
    fn lines_keep_insertion_order() {
        let mut cart = Cart::new();

        cart.add(&gadget());
        cart.add(&widget());

        let ids: Vec<u64> = cart.iter().map(OrderLine::item_id).collect();
        assert_eq!(ids, vec![2, 1]);
    }
}
