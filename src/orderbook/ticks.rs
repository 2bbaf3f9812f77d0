//! Internal fixed-point price representation used as the `SkipMap` key.
//!
//! `spec.md` §9 flags float-keyed price maps as a known hazard and recommends
//! keying by integer tick counts internally while keeping the public API in
//! `f64`. `Ticks` is that internal key; it never appears on the public
//! surface of this crate.

use crate::orderbook::error::OrderBookError;

/// Scale applied to a price before truncating to an integer tick count.
/// Eight decimal digits covers equity and crypto tick sizes without pulling
/// in a decimal-arithmetic dependency the rest of this crate doesn't need.
pub const PRICE_SCALE: f64 = 100_000_000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticks(pub u64);

impl Ticks {
    /// Quantizes a price to its tick representation.
    ///
    /// Rejects non-finite and negative prices; this is the "reject at the
    /// engine boundary" behaviour `spec.md` §7 recommends for the otherwise
    /// undefined-behaviour case of non-finite prices.
    pub fn from_price(price: f64) -> Result<Self, OrderBookError> {
        if !price.is_finite() || price < 0.0 {
            return Err(OrderBookError::NonFinitePrice(price));
        }
        Ok(Ticks((price * PRICE_SCALE).round() as u64))
    }

    pub fn to_price(self) -> f64 {
        self.0 as f64 / PRICE_SCALE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_clean_prices() {
        let t = Ticks::from_price(101.00).unwrap();
        assert_eq!(t.to_price(), 101.00);
    }

    #[test]
    fn orders_numerically() {
        let a = Ticks::from_price(99.50).unwrap();
        let b = Ticks::from_price(100.00).unwrap();
        assert!(a < b);
    }

    #[test]
    fn rejects_nan_and_infinite() {
        assert!(Ticks::from_price(f64::NAN).is_err());
        assert!(Ticks::from_price(f64::INFINITY).is_err());
        assert!(Ticks::from_price(-1.0).is_err());
    }
}
