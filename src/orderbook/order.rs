//! Order and trade value types flowing through the matching engine.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which side of the book an order or trade leg belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    /// The opposite side, used to pick the passive side a taker matches against.
    pub fn opposite(self) -> Side {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Buy => write!(f, "BUY"),
            Side::Sell => write!(f, "SELL"),
        }
    }
}

/// The instruction an [`Order`] carries. `Cancel` is a legacy alias for the
/// dedicated [`crate::OrderBook::cancel`] entry point, kept for message-stream
/// compatibility (see `spec.md` §9).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderType {
    Limit,
    Market,
    Cancel,
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderType::Limit => write!(f, "LIMIT"),
            OrderType::Market => write!(f, "MARKET"),
            OrderType::Cancel => write!(f, "CANCEL"),
        }
    }
}

/// An immutable instruction submitted to the engine.
///
/// `order_id` must be unique across the lifetime of the book it is submitted
/// to (scoped per symbol, not globally); the engine never generates ids, it
/// only consumes caller-assigned ones. `price` is ignored for `Market` orders
/// (conventionally left at `0.0`). `quantity` is the remaining quantity and is
/// decremented in place as a resting order is matched.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub order_id: u64,
    pub timestamp: u64,
    pub price: f64,
    pub quantity: u64,
    pub side: Side,
    pub order_type: OrderType,
}

impl Order {
    pub fn new_limit(order_id: u64, timestamp: u64, price: f64, quantity: u64, side: Side) -> Self {
        Self {
            order_id,
            timestamp,
            price,
            quantity,
            side,
            order_type: OrderType::Limit,
        }
    }

    pub fn new_market(order_id: u64, timestamp: u64, quantity: u64, side: Side) -> Self {
        Self {
            order_id,
            timestamp,
            price: 0.0,
            quantity,
            side,
            order_type: OrderType::Market,
        }
    }

    pub fn new_cancel(order_id: u64, timestamp: u64) -> Self {
        Self {
            order_id,
            timestamp,
            price: 0.0,
            quantity: 0,
            side: Side::Buy,
            order_type: OrderType::Cancel,
        }
    }
}

/// A single fill produced by the matching loop. `price` is always the
/// resting (maker) order's price, never the taker's limit price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub buy_order_id: u64,
    pub sell_order_id: u64,
    pub price: f64,
    pub quantity: u32,
}
