//! Order book error types.
//!
//! Per `spec.md` §7, most boundary conditions (unknown symbol, unknown id,
//! empty-side query) are not errors at all and are represented as plain
//! return values (`bool`/`Option`). `OrderBookError` covers only the cases
//! the spec recommends rejecting at the submission boundary.

use thiserror::Error;

/// Errors that can occur while submitting an order to an [`crate::OrderBook`].
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum OrderBookError {
    /// A limit order's id already rests in this book. `spec.md` §4.2 calls
    /// this an "implementation-level invariant violation" and requires
    /// callers to supply unique ids; this crate detects and rejects it.
    #[error("order id {0} already rests in this book")]
    DuplicateOrderId(u64),

    /// A limit price was NaN or infinite (or negative).
    #[error("price {0} is not a finite, non-negative price")]
    NonFinitePrice(f64),

    /// The book was constructed with a tick size and the price is not a
    /// multiple of it.
    #[error("price {price} is not a multiple of tick size {tick_size}")]
    InvalidTickSize { price: f64, tick_size: f64 },

    /// The book was constructed with a lot size and the quantity is not a
    /// multiple of it.
    #[error("quantity {quantity} is not a multiple of lot size {lot_size}")]
    InvalidLotSize { quantity: u64, lot_size: u64 },

    /// The book was constructed with a min/max order size and the quantity
    /// falls outside that range.
    #[error("quantity {quantity} is out of range (min {min:?}, max {max:?})")]
    OrderSizeOutOfRange {
        quantity: u64,
        min: Option<u64>,
        max: Option<u64>,
    },
}
