//! Optional per-book validation policy.
//!
//! `spec.md` §7 leaves duplicate ids, non-finite prices, and zero quantities
//! as caller-contract "undefined behaviour" but recommends rejecting at the
//! engine boundary. `OrderBookConfig` is the opt-in mechanism for the
//! additional tick/lot/size checks, modeled on the teacher crate's
//! `with_tick_size`/`with_lot_size`/`with_min_order_size`/`with_max_order_size`
//! builders. Disabled (`None`) fields impose no validation, matching the
//! teacher's default-off behaviour.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OrderBookConfig {
    pub tick_size: Option<f64>,
    pub lot_size: Option<u64>,
    pub min_order_size: Option<u64>,
    pub max_order_size: Option<u64>,
}

impl OrderBookConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tick_size(mut self, tick_size: f64) -> Self {
        self.tick_size = Some(tick_size);
        self
    }

    pub fn with_lot_size(mut self, lot_size: u64) -> Self {
        self.lot_size = Some(lot_size);
        self
    }

    pub fn with_min_order_size(mut self, min: u64) -> Self {
        self.min_order_size = Some(min);
        self
    }

    pub fn with_max_order_size(mut self, max: u64) -> Self {
        self.max_order_size = Some(max);
        self
    }
}
