//! Property-based tests for the universal invariants in the matching loop
//! and order book (quantity conservation, no crossed book, FIFO priority,
//! cancel round-trip).

use orderbook_core::{Engine, Order, OrderBook, Side};
use proptest::prelude::*;

/// Prices are generated as whole cents to avoid the `f64` rounding noise an
/// arbitrary mantissa would introduce when compared back against the engine's
/// `f64` boundary API.
fn price_strategy() -> impl Strategy<Value = f64> {
    (1i64..=100_000i64).prop_map(|cents| cents as f64 / 100.0)
}

fn quantity_strategy() -> impl Strategy<Value = u64> {
    1u64..=10_000u64
}

fn side_strategy() -> impl Strategy<Value = Side> {
    prop_oneof![Just(Side::Buy), Just(Side::Sell)]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]

    /// Filled + residual quantity always equals the submitted quantity.
    #[test]
    fn quantity_conservation(
        price in price_strategy(),
        qty in quantity_strategy(),
        side in side_strategy(),
    ) {
        let book = OrderBook::new("TEST");
        let order = Order::new_limit(1, 0, price, qty, side);
        let trades = book.submit(order).unwrap();

        let filled: u64 = trades.iter().map(|t| t.quantity as u64).sum();
        let residual = match side {
            Side::Buy => book.bid_quantity_at(price),
            Side::Sell => book.ask_quantity_at(price),
        };
        prop_assert_eq!(filled + residual, qty);
    }

    /// The book is never crossed after a submission settles.
    #[test]
    fn no_crossed_book(
        orders in prop::collection::vec(
            (side_strategy(), price_strategy(), quantity_strategy()),
            1..100,
        )
    ) {
        let book = OrderBook::new("TEST");
        for (i, (side, price, qty)) in orders.into_iter().enumerate() {
            let order = Order::new_limit(i as u64 + 1, 0, price, qty, side);
            book.submit(order).unwrap();

            if let (Some(bid), Some(ask)) = (book.best_bid(), book.best_ask()) {
                prop_assert!(bid < ask, "crossed book: bid {} >= ask {}", bid, ask);
            }
        }
    }

    /// Cancelling an order that rested restores the level's total quantity.
    #[test]
    fn cancel_restores_total_quantity(
        price in price_strategy(),
        resting_qty in quantity_strategy(),
        added_qty in quantity_strategy(),
    ) {
        let book = OrderBook::new("TEST");
        book.submit(Order::new_limit(1, 0, price, resting_qty, Side::Buy)).unwrap();
        let before = book.bid_quantity_at(price);

        book.submit(Order::new_limit(2, 0, price, added_qty, Side::Buy)).unwrap();
        let cancelled = book.cancel(2);
        prop_assert!(cancelled);
        prop_assert_eq!(book.bid_quantity_at(price), before);

        // Double cancel is a no-op.
        prop_assert!(!book.cancel(2));
    }

    /// FIFO priority: the first resting order at a price is always the one
    /// a partial fill consumes first.
    #[test]
    fn fifo_priority_within_a_level(
        price in price_strategy(),
        first_qty in 2u64..5_000u64,
        second_qty in quantity_strategy(),
        fill_qty in 1u64..5_000u64,
    ) {
        let book = OrderBook::new("TEST");
        book.submit(Order::new_limit(1, 0, price, first_qty, Side::Sell)).unwrap();
        book.submit(Order::new_limit(2, 0, price, second_qty, Side::Sell)).unwrap();

        let taker_qty = fill_qty.min(first_qty);
        let trades = book
            .submit(Order::new_limit(3, 0, price, taker_qty, Side::Buy))
            .unwrap();

        prop_assert_eq!(trades.len(), 1);
        prop_assert_eq!(trades[0].sell_order_id, 1);
    }

    /// A limit order's emitted trades always respect its own crossing price.
    #[test]
    fn trades_respect_taker_limit(
        resting_price in price_strategy(),
        resting_qty in quantity_strategy(),
        taker_price in price_strategy(),
        taker_qty in quantity_strategy(),
    ) {
        let book = OrderBook::new("TEST");
        book.submit(Order::new_limit(1, 0, resting_price, resting_qty, Side::Sell)).unwrap();

        let trades = book
            .submit(Order::new_limit(2, 0, taker_price, taker_qty, Side::Buy))
            .unwrap();

        for trade in &trades {
            prop_assert!(trade.price <= taker_price);
        }
    }

    /// A market order against an empty opposite side is a complete no-op.
    #[test]
    fn market_on_empty_side_is_noop(
        qty in quantity_strategy(),
        side in side_strategy(),
    ) {
        let book = OrderBook::new("TEST");
        let trades = book.submit(Order::new_market(1, 0, qty, side)).unwrap();
        prop_assert!(trades.is_empty());
        prop_assert_eq!(book.best_bid(), None);
        prop_assert_eq!(book.best_ask(), None);
    }
}

#[test]
fn engine_keeps_distinct_symbols_fully_independent() {
    let engine = Engine::new();
    for i in 0..50u64 {
        let price = 100.0 + (i as f64);
        engine
            .submit("SYM_A", Order::new_limit(i + 1, 0, price, 10, Side::Buy))
            .unwrap();
        engine
            .submit("SYM_B", Order::new_limit(i + 1, 0, price, 10, Side::Sell))
            .unwrap();
    }
    assert!(engine.best_ask("SYM_A").is_none());
    assert!(engine.best_bid("SYM_B").is_none());
    assert_eq!(engine.book_count(), 2);
}
