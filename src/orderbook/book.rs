//! Core per-symbol order book: two price-indexed sides, the order locator,
//! and the public submit/cancel/query surface (`spec.md` §4.2).

use crate::orderbook::config::OrderBookConfig;
use crate::orderbook::error::OrderBookError;
use crate::orderbook::matching::{BookSide, run_matching_loop};
use crate::orderbook::order::{Order, OrderType, Side, Trade};
use crate::orderbook::price_level::PriceLevel;
use crate::orderbook::ticks::Ticks;
use crossbeam_skiplist::SkipMap;
use dashmap::DashMap;
use std::sync::Arc;
use tracing::trace;

#[derive(Debug, Clone, Copy)]
struct Locator {
    side: Side,
    price: Ticks,
}

/// A single symbol's order book: two price-keyed sides and a cancel index.
///
/// `bids` and `asks` are both stored ascending by [`Ticks`] in a
/// `crossbeam_skiplist::SkipMap`; bids are read from the back (highest
/// price first), asks from the front (lowest price first), giving O(log P)
/// best-price access on both sides with a single key type.
pub struct OrderBook {
    symbol: String,
    bids: SkipMap<Ticks, Arc<PriceLevel>>,
    asks: SkipMap<Ticks, Arc<PriceLevel>>,
    locator: DashMap<u64, Locator>,
    config: OrderBookConfig,
}

impl OrderBook {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self::with_config(symbol, OrderBookConfig::default())
    }

    pub fn with_config(symbol: impl Into<String>, config: OrderBookConfig) -> Self {
        Self {
            symbol: symbol.into(),
            bids: SkipMap::new(),
            asks: SkipMap::new(),
            locator: DashMap::new(),
            config,
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Dispatches `order` by its `order_type` and returns the trades
    /// produced, per `spec.md` §4.2.
    pub fn submit(&self, order: Order) -> Result<Vec<Trade>, OrderBookError> {
        match order.order_type {
            OrderType::Cancel => {
                self.cancel(order.order_id);
                Ok(Vec::new())
            }
            OrderType::Market => Ok(self.submit_market(order)),
            OrderType::Limit => self.submit_limit(order),
        }
    }

    fn submit_market(&self, mut order: Order) -> Vec<Trade> {
        if order.quantity == 0 {
            return Vec::new();
        }
        let passive = BookSide::passive_for(order.side);
        let (trades, filled_ids) =
            run_matching_loop(&mut order, passive, &self.bids, &self.asks, |_| true);
        for id in filled_ids {
            self.locator.remove(&id);
        }
        // Market remainder is discarded (IOC-like, spec.md §1 Non-goals):
        // it is never inserted into the book.
        trades
    }

    fn submit_limit(&self, mut order: Order) -> Result<Vec<Trade>, OrderBookError> {
        if order.quantity == 0 {
            return Ok(Vec::new());
        }
        if self.locator.contains_key(&order.order_id) {
            return Err(OrderBookError::DuplicateOrderId(order.order_id));
        }
        let price = Ticks::from_price(order.price)?;
        self.validate_limit(price, order)?;

        let taker_side = order.side;
        let passive = BookSide::passive_for(taker_side);
        let crosses = move |best: Ticks| match taker_side {
            Side::Buy => price >= best,
            Side::Sell => price <= best,
        };
        let (trades, filled_ids) =
            run_matching_loop(&mut order, passive, &self.bids, &self.asks, crosses);
        for id in filled_ids {
            self.locator.remove(&id);
        }

        if order.quantity > 0 {
            trace!(
                order_id = order.order_id,
                side = %order.side,
                price = order.price,
                qty = order.quantity,
                "resting"
            );
            let side_map = match taker_side {
                Side::Buy => &self.bids,
                Side::Sell => &self.asks,
            };
            let level = side_map
                .get_or_insert_with(price, || Arc::new(PriceLevel::new()))
                .value()
                .clone();
            level.add(order);
            self.locator.insert(
                order.order_id,
                Locator {
                    side: taker_side,
                    price,
                },
            );
        }

        Ok(trades)
    }

    fn validate_limit(&self, price: Ticks, order: Order) -> Result<(), OrderBookError> {
        if let Some(tick_size) = self.config.tick_size {
            let tick_size_ticks = Ticks::from_price(tick_size)?;
            if tick_size_ticks.0 == 0 || price.0 % tick_size_ticks.0 != 0 {
                return Err(OrderBookError::InvalidTickSize {
                    price: order.price,
                    tick_size,
                });
            }
        }
        if let Some(lot_size) = self.config.lot_size {
            if lot_size == 0 || order.quantity % lot_size != 0 {
                return Err(OrderBookError::InvalidLotSize {
                    quantity: order.quantity,
                    lot_size,
                });
            }
        }
        let (min, max) = (self.config.min_order_size, self.config.max_order_size);
        if min.is_some_and(|m| order.quantity < m) || max.is_some_and(|m| order.quantity > m) {
            return Err(OrderBookError::OrderSizeOutOfRange {
                quantity: order.quantity,
                min,
                max,
            });
        }
        Ok(())
    }

    /// Cancels a resting order by id. Returns `false` (no state mutation) if
    /// the id is not currently resting in this book.
    pub fn cancel(&self, order_id: u64) -> bool {
        let Some((_, locator)) = self.locator.remove(&order_id) else {
            return false;
        };
        let side_map = match locator.side {
            Side::Buy => &self.bids,
            Side::Sell => &self.asks,
        };
        let Some(entry) = side_map.get(&locator.price) else {
            return true;
        };
        let level = entry.value().clone();
        level.cancel(order_id);
        if level.is_empty() {
            side_map.remove(&locator.price);
        }
        trace!(order_id, "cancelled");
        true
    }

    pub fn best_bid(&self) -> Option<f64> {
        self.bids.back().map(|e| e.key().to_price())
    }

    pub fn best_ask(&self) -> Option<f64> {
        self.asks.front().map(|e| e.key().to_price())
    }

    pub fn spread(&self) -> Option<f64> {
        Some(self.best_ask()? - self.best_bid()?)
    }

    pub fn bid_quantity_at(&self, price: f64) -> u64 {
        self.quantity_at(&self.bids, price)
    }

    pub fn ask_quantity_at(&self, price: f64) -> u64 {
        self.quantity_at(&self.asks, price)
    }

    fn quantity_at(&self, side: &SkipMap<Ticks, Arc<PriceLevel>>, price: f64) -> u64 {
        let Ok(ticks) = Ticks::from_price(price) else {
            return 0;
        };
        side.get(&ticks)
            .map(|e| e.value().total_quantity())
            .unwrap_or(0)
    }
}
