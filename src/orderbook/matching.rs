//! The matching loop: `spec.md` §4.2's central algorithm.
//!
//! A single generic loop walks whichever side is passive for the incoming
//! order, best price first, filling FIFO within each level. Which side is
//! "best" depends on whether it's the bid or ask side, so the loop is
//! parameterized over a small [`BookSide`] tag that knows its own "best
//! entry" end of the skip list — the "strategy object" option `spec.md` §9
//! names, in place of two fully duplicated loops.

use crate::orderbook::order::{Order, Side, Trade};
use crate::orderbook::price_level::PriceLevel;
use crate::orderbook::ticks::Ticks;
use crossbeam_skiplist::SkipMap;
use std::sync::Arc;
use tracing::debug;

/// Which side of the book is being walked as the passive (maker) side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BookSide {
    Bids,
    Asks,
}

impl BookSide {
    /// The passive side a taker on `side` matches against.
    pub(crate) fn passive_for(side: Side) -> Self {
        match side {
            Side::Buy => BookSide::Asks,
            Side::Sell => BookSide::Bids,
        }
    }

    fn best_entry(
        self,
        bids: &SkipMap<Ticks, Arc<PriceLevel>>,
        asks: &SkipMap<Ticks, Arc<PriceLevel>>,
    ) -> Option<(Ticks, Arc<PriceLevel>)> {
        match self {
            // Bids are read highest-first: the skip list orders ascending,
            // so the best bid is at the back.
            BookSide::Bids => bids.back().map(|e| (*e.key(), e.value().clone())),
            // Asks are read lowest-first: ascending order puts the best ask
            // at the front.
            BookSide::Asks => asks.front().map(|e| (*e.key(), e.value().clone())),
        }
    }

    fn remove(
        self,
        bids: &SkipMap<Ticks, Arc<PriceLevel>>,
        asks: &SkipMap<Ticks, Arc<PriceLevel>>,
        price: Ticks,
    ) {
        match self {
            BookSide::Bids => {
                bids.remove(&price);
            }
            BookSide::Asks => {
                asks.remove(&price);
            }
        }
    }
}

/// Runs the matching loop for an incoming `taker` against `passive_side`,
/// mutating `taker.quantity` down to its residual and returning the trades
/// emitted along the way, in emission order.
///
/// `crosses` decides whether the taker's limit crosses a given resting
/// price; pass a predicate that always returns `true` for market orders
/// (`spec.md` §9's market-price-bypass design note) and the BUY/SELL
/// crossing test from `spec.md` §4.2 for limit orders.
///
/// Returns the emitted trades together with the ids of resting orders that
/// were fully consumed, so the caller can drop them from the book-wide
/// locator (the `PriceLevel` itself already drops them from its own index).
pub(crate) fn run_matching_loop(
    taker: &mut Order,
    passive_side: BookSide,
    bids: &SkipMap<Ticks, Arc<PriceLevel>>,
    asks: &SkipMap<Ticks, Arc<PriceLevel>>,
    crosses: impl Fn(Ticks) -> bool,
) -> (Vec<Trade>, Vec<u64>) {
    let mut trades = Vec::new();
    let mut filled_ids = Vec::new();

    while taker.quantity > 0 {
        let Some((price, level)) = passive_side.best_entry(bids, asks) else {
            break;
        };
        if !crosses(price) {
            break;
        }

        let resting = level.front();
        let fill = taker.quantity.min(resting.quantity);
        let fill_u32 = u32::try_from(fill)
            .expect("single fill exceeds u32 range; caller must bound resting quantities to u32");

        let trade = Trade {
            buy_order_id: if taker.side == Side::Buy {
                taker.order_id
            } else {
                resting.order_id
            },
            sell_order_id: if taker.side == Side::Sell {
                taker.order_id
            } else {
                resting.order_id
            },
            price: price.to_price(),
            quantity: fill_u32,
        };
        debug!(
            buy = trade.buy_order_id,
            sell = trade.sell_order_id,
            price = trade.price,
            qty = trade.quantity,
            "matched"
        );
        trades.push(trade);

        taker.quantity -= fill;
        level.fill_front(fill);

        if fill == resting.quantity {
            filled_ids.push(resting.order_id);
        }
        if level.is_empty() {
            passive_side.remove(bids, asks, price);
        }
    }

    (trades, filled_ids)
}
