//! # orderbook-core
//!
//! A price-time priority limit order matching engine for a single exchange
//! venue, with isolated per-symbol books.
//!
//! ## Architecture
//!
//! Each symbol gets its own [`OrderBook`]: two price-indexed sides (bids,
//! asks) backed by a `crossbeam_skiplist::SkipMap<Ticks, Arc<PriceLevel>>`,
//! and a `DashMap<u64, Locator>` cancel index mapping a resting order id to
//! the side and price it rests at. A [`PriceLevel`](orderbook::book) is a
//! FIFO queue of orders at one price, implemented as a slab-backed intrusive
//! linked list so both "fill the front" and "cancel an arbitrary id" run in
//! O(1) — the same shape as a `std::list` plus an iterator index, minus the
//! pointer stability Rust won't give you for free.
//!
//! Prices never touch the skip list as `f64`; they're quantized to
//! [`Ticks`](orderbook::book), an internal fixed-point integer key, so that
//! price ordering and equality are exact. The public API stays in `f64`.
//!
//! An [`Engine`] wraps a `DashMap<String, Arc<OrderBook>>` to route
//! submissions by symbol, creating books lazily. Symbols never interact:
//! there is no cross-symbol matching or shared liquidity.
//!
//! ## Concurrency
//!
//! A single [`OrderBook`] is designed for one writer at a time (orders for
//! one symbol arrive and are matched in a single sequence, the way a real
//! venue serializes one instrument's matching). The underlying structures
//! (`SkipMap`, `DashMap`, the per-level `Mutex`) are concurrency-safe so
//! that different symbols can be driven from different threads through one
//! [`Engine`] without any book ever needing to know about another.
//!
//! ## Example
//!
//! ```
//! use orderbook_core::{Engine, Order, Side};
//!
//! let engine = Engine::new();
//! engine.submit("AAPL", Order::new_limit(1, 1, 100.00, 200, Side::Buy)).unwrap();
//! engine.submit("AAPL", Order::new_limit(2, 2, 101.00, 150, Side::Sell)).unwrap();
//!
//! let trades = engine
//!     .submit("AAPL", Order::new_limit(3, 3, 101.00, 150, Side::Buy))
//!     .unwrap();
//! assert_eq!(trades.len(), 1);
//! assert_eq!(engine.best_ask("AAPL"), None);
//! ```

pub mod orderbook;

pub use orderbook::{Engine, Order, OrderBook, OrderBookConfig, OrderBookError, OrderType, Side, Trade, TradeListener};
