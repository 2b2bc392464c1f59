/// Side indicates the direction of the order.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum Side {
    /// Buy means the user wants to acquire the asset, matching against resting sell orders.
    Buy,
    /// Sell means the user wants to dispose of the asset, matching against resting buy orders.
    Sell,
}

/// `Order` is a fixed-layout, cache-line-sized record carrying everything the
/// matching path needs: routing key, side, price, remaining quantity, ids and
/// a producer-assigned timestamp used only for observability.
///
/// FIFO priority within a price level is established by arrival order in the
/// book, never by `timestamp`. Two orders racing through different producers
/// may carry out-of-order timestamps and still match correctly.
#[derive(Clone, Copy, Debug)]
#[repr(C, align(64))]
pub struct Order {
    pub id: u64,
    pub price: u64,
    pub quantity: u32,
    pub symbol_id: u32,
    pub side: Side,
    pub timestamp: u64,
}

impl Order {
    /// Creates a new order. Does not validate; see [`Order::validate`].
    pub fn new(id: u64, symbol_id: u32, side: Side, price: u64, quantity: u32, timestamp: u64) -> Self {
        Self {
            id,
            price,
            quantity,
            symbol_id,
            side,
            timestamp,
        }
    }

    /// Checks the order's preconditions: `price > 0` and `quantity > 0`.
    pub fn validate(&self) -> Result<(), crate::error::OrderValidationError> {
        if self.price == 0 {
            return Err(crate::error::OrderValidationError::ZeroPrice);
        }
        if self.quantity == 0 {
            return Err(crate::error::OrderValidationError::ZeroQuantity);
        }
        Ok(())
    }
}

/// `Trade` is emitted by the matcher in the order matches occur. Its price is
/// always the resting (maker) order's price, never the incoming order's limit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Trade {
    pub symbol_id: u32,
    pub price: u64,
    pub quantity: u32,
    pub buyer_id: u64,
    pub seller_id: u64,
}
