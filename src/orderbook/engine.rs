//! Multi-symbol dispatcher: routes submissions to a per-symbol [`OrderBook`],
//! creating books lazily on first use (`spec.md` §4.3).

use crate::orderbook::book::OrderBook;
use crate::orderbook::config::OrderBookConfig;
use crate::orderbook::error::OrderBookError;
use crate::orderbook::order::{Order, Trade};
use dashmap::DashMap;
use std::sync::Arc;
use tracing::info;

/// Called with a symbol and the trades its book just produced, after every
/// successful [`Engine::submit`] that matched at least one order. Modeled on
/// the teacher crate's `TradeListener` (`Arc<dyn Fn(..) + Send + Sync>`)
/// so engines can be wired into a downstream publisher without generics.
pub type TradeListener = Arc<dyn Fn(&str, &[Trade]) + Send + Sync>;

/// Routes orders to isolated per-symbol books; one symbol's state never
/// affects another's (`spec.md` §2 Non-goals: no cross-symbol matching).
#[derive(Clone)]
pub struct Engine {
    books: Arc<DashMap<String, Arc<OrderBook>>>,
    default_config: OrderBookConfig,
    trade_listener: Option<TradeListener>,
}

impl Engine {
    pub fn new() -> Self {
        Self {
            books: Arc::new(DashMap::new()),
            default_config: OrderBookConfig::default(),
            trade_listener: None,
        }
    }

    pub fn with_default_config(default_config: OrderBookConfig) -> Self {
        Self {
            books: Arc::new(DashMap::new()),
            default_config,
            trade_listener: None,
        }
    }

    /// Registers a callback invoked with every non-empty trade batch a
    /// submission produces.
    pub fn set_trade_listener(&mut self, listener: TradeListener) {
        self.trade_listener = Some(listener);
    }

    fn book_for(&self, symbol: &str) -> Arc<OrderBook> {
        if let Some(book) = self.books.get(symbol) {
            return book.clone();
        }
        self.books
            .entry(symbol.to_string())
            .or_insert_with(|| {
                info!(symbol, "created order book");
                Arc::new(OrderBook::with_config(symbol, self.default_config))
            })
            .clone()
    }

    /// Submits `order` to `symbol`'s book, creating the book on first use.
    pub fn submit(&self, symbol: &str, order: Order) -> Result<Vec<Trade>, OrderBookError> {
        let book = self.book_for(symbol);
        let trades = book.submit(order)?;
        if !trades.is_empty() {
            if let Some(listener) = &self.trade_listener {
                listener(symbol, &trades);
            }
        }
        Ok(trades)
    }

    /// Cancels `order_id` in `symbol`'s book. Returns `false` if the symbol
    /// has no book yet or the id is not resting.
    pub fn cancel(&self, symbol: &str, order_id: u64) -> bool {
        self.books
            .get(symbol)
            .map(|book| book.cancel(order_id))
            .unwrap_or(false)
    }

    pub fn best_bid(&self, symbol: &str) -> Option<f64> {
        self.books.get(symbol).and_then(|b| b.best_bid())
    }

    pub fn best_ask(&self, symbol: &str) -> Option<f64> {
        self.books.get(symbol).and_then(|b| b.best_ask())
    }

    pub fn spread(&self, symbol: &str) -> Option<f64> {
        self.books.get(symbol).and_then(|b| b.spread())
    }

    pub fn bid_quantity_at(&self, symbol: &str, price: f64) -> u64 {
        self.books
            .get(symbol)
            .map(|b| b.bid_quantity_at(price))
            .unwrap_or(0)
    }

    pub fn ask_quantity_at(&self, symbol: &str, price: f64) -> u64 {
        self.books
            .get(symbol)
            .map(|b| b.ask_quantity_at(price))
            .unwrap_or(0)
    }

    pub fn has_book(&self, symbol: &str) -> bool {
        self.books.contains_key(symbol)
    }

    pub fn book_count(&self) -> usize {
        self.books.len()
    }

    pub fn symbols(&self) -> Vec<String> {
        self.books.iter().map(|e| e.key().clone()).collect()
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}
