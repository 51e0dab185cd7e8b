use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Per-tier unit price keyed by the board's total tier count. This is a
/// lookup table, not a continuous formula: the per-tier price steps down as
/// the count grows (bulk curve), and changing the count re-prices the whole
/// quantity at the new count's rate.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierSchedule {
    /// (tier count, per-tier unit price), ascending by count.
    pub entries: Vec<(u32, Decimal)>,
}

impl TierSchedule {
    /// Counts past the table reuse the last entry; the curve flattens.
    pub fn price_for(&self, tier_count: u32) -> Option<Decimal> {
        if tier_count == 0 {
            return None;
        }

        self.entries
            .iter()
            .filter(|(count, _)| *count <= tier_count)
            .last()
            .or_else(|| self.entries.first())
            .map(|(_, price)| *price)
    }
}

impl Default for TierSchedule {
    fn default() -> Self {
        Self {
            entries: vec![
                (1, Decimal::new(120_000, 2)),
                (2, Decimal::new(105_000, 2)),
                (3, Decimal::new(95_000, 2)),
                (4, Decimal::new(87_500, 2)),
            ],
        }
    }
}
