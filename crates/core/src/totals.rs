use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::item::Item;
use crate::domain::settings::SettingsSnapshot;

/// Full cost/sell breakdown for one quote. Recomputed on demand from items
/// and the quote's settings snapshot; never cached beyond a single request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteTotals {
    pub total_material: Decimal,
    pub total_labour_hours: Decimal,
    pub total_labour: Decimal,
    pub consumables: Decimal,
    pub overhead: Decimal,
    pub engineering: Decimal,
    pub contingency: Decimal,
    pub total_cost: Decimal,
    pub sell_price: Decimal,
    pub sell_price_rounded: Decimal,
    pub gst: Decimal,
    pub sell_price_inc_gst: Decimal,
    pub profit: Decimal,
    pub margin_pct: Decimal,
    pub margin_alert: bool,
}

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Aggregates line costs into a sell price. The compounding order is fixed:
///
/// 1. material = Σ line cost; labour = Σ labour hours × quantity × rate
/// 2. consumables apply to material only
/// 3. overhead and engineering each apply to material + labour
/// 4. global contingency is a flat amount on cost
/// 5. target margin is a true margin on fully-loaded cost (cost ÷ (1 − m)),
///    then the global discount applies to the sell price
/// 6. sell is rounded UP to the rounding increment — rounding down would
///    erode margin
/// 7. GST applies to the rounded sell for tax-inclusive display only
pub fn compute_totals<'a>(
    items: impl IntoIterator<Item = &'a Item>,
    snapshot: &SettingsSnapshot,
    global_discount_pct: Decimal,
    global_contingency: Decimal,
) -> QuoteTotals {
    let mut total_material = Decimal::ZERO;
    let mut total_labour_hours = Decimal::ZERO;

    for item in items {
        total_material += item.cost;
        total_labour_hours += item.labour_hours * Decimal::from(item.quantity);
    }

    let total_labour = (total_labour_hours * snapshot.labour_rate).round_dp(2);
    let labour_and_material = total_material + total_labour;

    let consumables = (total_material * snapshot.consumables_pct / HUNDRED).round_dp(2);
    let overhead = (labour_and_material * snapshot.overhead_pct / HUNDRED).round_dp(2);
    let engineering = (labour_and_material * snapshot.engineering_pct / HUNDRED).round_dp(2);

    let total_cost =
        labour_and_material + consumables + overhead + engineering + global_contingency;

    let margin_fraction = snapshot.target_margin_pct / HUNDRED;
    let sell_before_discount = if margin_fraction < Decimal::ONE {
        (total_cost / (Decimal::ONE - margin_fraction)).round_dp(2)
    } else {
        total_cost
    };
    let sell_price =
        (sell_before_discount * (Decimal::ONE - global_discount_pct / HUNDRED)).round_dp(2);

    let sell_price_rounded = round_up_to_increment(sell_price, snapshot.rounding_increment);

    let profit = sell_price_rounded - total_cost;
    let margin_pct = if sell_price_rounded > Decimal::ZERO {
        (profit / sell_price_rounded * HUNDRED).round_dp(2)
    } else {
        Decimal::ZERO
    };

    let gst = (sell_price_rounded * snapshot.gst_pct / HUNDRED).round_dp(2);

    QuoteTotals {
        total_material,
        total_labour_hours,
        total_labour,
        consumables,
        overhead,
        engineering,
        contingency: global_contingency,
        total_cost,
        sell_price,
        sell_price_rounded,
        gst,
        sell_price_inc_gst: sell_price_rounded + gst,
        profit,
        margin_pct,
        margin_alert: margin_pct < snapshot.min_margin_alert_pct,
    }
}

/// Rounds up to the nearest increment, never down; a value already on the
/// increment is unchanged.
fn round_up_to_increment(value: Decimal, increment: Decimal) -> Decimal {
    if increment <= Decimal::ZERO {
        return value.round_dp(2);
    }

    ((value / increment).ceil() * increment).round_dp(2)
}
