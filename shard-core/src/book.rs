use crate::order::{Order, Side, Trade};
use std::collections::{BTreeMap, VecDeque};

/// The resting orders at a single (symbol, side, price), in strict arrival
/// order. The head of the deque is the oldest order and is the next to
/// execute (I3).
type PriceLevel = VecDeque<Order>;

/// A single instrument's limit order book: two price-indexed containers of
/// [`PriceLevel`]s, continuously matched in price-time priority.
///
/// `bids` and `asks` are both `BTreeMap<price, PriceLevel>` so the best level
/// on either side is an O(log L) lookup (`last_entry`/`first_entry`), where L
/// is the number of distinct active price levels; walking the FIFO at that
/// level and popping its head is O(1) amortized.
///
/// Invariants upheld by every public method: no empty `PriceLevel` is ever
/// left in either map (I2), and after `match_order` returns the book is never
/// crossed (I4); residual quantity is only ever rested once matching at the
/// incoming limit has been exhausted.
#[derive(Default)]
pub struct OrderBook {
    bids: BTreeMap<u64, PriceLevel>,
    asks: BTreeMap<u64, PriceLevel>,
}

impl OrderBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `order` to the tail of its (side, price) level, creating the
    /// level if this is the first order at that price.
    ///
    /// Precondition: `order.quantity > 0` (I1). Callers on the hot path
    /// validate this at ingress (see [`Order::validate`]); this method does
    /// not re-check it.
    pub fn add_order(&mut self, order: Order) {
        let book = match order.side {
            Side::Buy => &mut self.bids,
            Side::Sell => &mut self.asks,
        };
        book.entry(order.price).or_default().push_back(order);
    }

    /// Matches `incoming` against the opposite side as far as price-time
    /// priority allows, returning the trades in execution order, then rests
    /// any unfilled residual on `incoming`'s own side.
    pub fn match_order(&mut self, incoming: Order) -> Vec<Trade> {
        match incoming.side {
            Side::Buy => self.match_buy(incoming),
            Side::Sell => self.match_sell(incoming),
        }
    }

    fn match_buy(&mut self, mut incoming: Order) -> Vec<Trade> {
        let mut trades = Vec::new();

        while incoming.quantity > 0 {
            let Some(mut best) = self.asks.first_entry() else {
                break;
            };
            let level_price = *best.key();
            if incoming.price < level_price {
                break;
            }

            let level = best.get_mut();
            Self::walk_level(level, &mut incoming, &mut trades, |qty, taker, resting| {
                Trade {
                    symbol_id: taker.symbol_id,
                    price: level_price,
                    quantity: qty,
                    buyer_id: taker.id,
                    seller_id: resting.id,
                }
            });

            if level.is_empty() {
                best.remove();
            }
        }

        if incoming.quantity > 0 {
            self.add_order(incoming);
        }
        trades
    }

    fn match_sell(&mut self, mut incoming: Order) -> Vec<Trade> {
        let mut trades = Vec::new();

        while incoming.quantity > 0 {
            let Some(mut best) = self.bids.last_entry() else {
                break;
            };
            let level_price = *best.key();
            if incoming.price > level_price {
                break;
            }

            let level = best.get_mut();
            Self::walk_level(level, &mut incoming, &mut trades, |qty, taker, resting| {
                Trade {
                    symbol_id: taker.symbol_id,
                    price: level_price,
                    quantity: qty,
                    buyer_id: resting.id,
                    seller_id: taker.id,
                }
            });

            if level.is_empty() {
                best.remove();
            }
        }

        if incoming.quantity > 0 {
            self.add_order(incoming);
        }
        trades
    }

    /// Walks one price level from the head, filling `incoming` against each
    /// resting order until either side is exhausted, building a `Trade` per
    /// fill via `make_trade`. Fully-filled resting orders are popped from the
    /// head, preserving I3 for the survivors.
    fn walk_level(
        level: &mut PriceLevel,
        incoming: &mut Order,
        trades: &mut Vec<Trade>,
        make_trade: impl Fn(u32, &Order, &Order) -> Trade,
    ) {
        while incoming.quantity > 0 {
            let Some(resting) = level.front_mut() else {
                break;
            };
            let qty = incoming.quantity.min(resting.quantity);

            trades.push(make_trade(qty, incoming, resting));

            incoming.quantity -= qty;
            resting.quantity -= qty;

            if resting.quantity == 0 {
                level.pop_front();
            }
        }
    }

    /// Best (highest) bid price, if any resting buy orders remain.
    pub fn best_bid(&self) -> Option<u64> {
        self.bids.keys().next_back().copied()
    }

    /// Best (lowest) ask price, if any resting sell orders remain.
    pub fn best_ask(&self) -> Option<u64> {
        self.asks.keys().next().copied()
    }

    /// Total resting quantity across both sides, used by conservation tests.
    pub fn total_resting_quantity(&self) -> u64 {
        let bid_qty: u64 = self
            .bids
            .values()
            .flat_map(|level| level.iter())
            .map(|o| o.quantity as u64)
            .sum();
        let ask_qty: u64 = self
            .asks
            .values()
            .flat_map(|level| level.iter())
            .map(|o| o.quantity as u64)
            .sum();
        bid_qty + ask_qty
    }

    /// Snapshot of the resting `(id, quantity)` pairs on one side, in price
    /// priority then arrival order. Used by tests to assert book state.
    pub fn level_snapshot(&self, side: Side, price: u64) -> Vec<(u64, u32)> {
        let book = match side {
            Side::Buy => &self.bids,
            Side::Sell => &self.asks,
        };
        book.get(&price)
            .map(|level| level.iter().map(|o| (o.id, o.quantity)).collect())
            .unwrap_or_default()
    }

    /// `true` if neither side holds any resting orders.
    pub fn is_empty(&self) -> bool {
        self.bids.is_empty() && self.asks.is_empty()
    }
}
