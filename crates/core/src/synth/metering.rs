use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::board::WcMeterType;
use crate::domain::item::ProposedItem;
use crate::synth::LinePrice;

pub const WC_PANEL_PART: &str = "WCM-PANEL";
pub const WC_FUSE_PART: &str = "WCM-FUSE";
pub const WC_NEUTRAL_LINK_PART: &str = "WCM-NLINK";
pub const WC_BREAKER_SINGLE_PART: &str = "WCM-BRK-1P";
pub const WC_BREAKER_THREE_PART: &str = "WCM-BRK-3P";

/// Fuses are supplied per phase regardless of meter type.
pub const FUSES_PER_UNIT: u32 = 3;

const METERING_SUBCATEGORY: &str = "Metering";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WcBundlePrices {
    pub panel: LinePrice,
    pub fuse: LinePrice,
    pub neutral_link: LinePrice,
    pub breaker_single: LinePrice,
    pub breaker_three: LinePrice,
}

impl Default for WcBundlePrices {
    fn default() -> Self {
        Self {
            panel: LinePrice::new(Decimal::new(32_500, 2), Decimal::new(20, 1)),
            fuse: LinePrice::new(Decimal::new(1_850, 2), Decimal::new(2, 1)),
            neutral_link: LinePrice::new(Decimal::new(2_400, 2), Decimal::new(3, 1)),
            breaker_single: LinePrice::new(Decimal::new(8_900, 2), Decimal::new(5, 1)),
            breaker_three: LinePrice::new(Decimal::new(21_500, 2), Decimal::new(8, 1)),
        }
    }
}

/// The whole-current metering bundle: one panel, three fuses, one neutral
/// link and one phase-appropriate breaker per metered unit, all scaled by
/// `quantity` together. Disabling the feature removes every member.
pub fn whole_current_bundle(
    wc_type: WcMeterType,
    quantity: u32,
    prices: &WcBundlePrices,
) -> Vec<ProposedItem> {
    let (breaker_part, breaker_description, breaker_price) = match wc_type {
        WcMeterType::SinglePhase => {
            (WC_BREAKER_SINGLE_PART, "Single phase meter breaker", &prices.breaker_single)
        }
        WcMeterType::ThreePhase => {
            (WC_BREAKER_THREE_PART, "Three phase meter breaker", &prices.breaker_three)
        }
    };

    vec![
        bundle_item(WC_PANEL_PART, "Whole current meter panel", quantity, &prices.panel),
        bundle_item(WC_FUSE_PART, "Meter fuse", quantity * FUSES_PER_UNIT, &prices.fuse),
        bundle_item(WC_NEUTRAL_LINK_PART, "Neutral link", quantity, &prices.neutral_link),
        bundle_item(breaker_part, breaker_description, quantity, breaker_price),
    ]
}

fn bundle_item(part: &str, description: &str, quantity: u32, price: &LinePrice) -> ProposedItem {
    ProposedItem {
        category: super::SWITCHBOARD_CATEGORY.to_owned(),
        subcategory: Some(METERING_SUBCATEGORY.to_owned()),
        name: part.to_owned(),
        description: Some(description.to_owned()),
        quantity,
        unit_price: price.unit_price,
        labour_hours: price.labour_hours,
    }
}

#[cfg(test)]
mod tests {
    use crate::domain::board::WcMeterType;

    use super::{whole_current_bundle, WcBundlePrices, FUSES_PER_UNIT, WC_BREAKER_THREE_PART};

    #[test]
    fn bundle_scales_every_member_together() {
        let prices = WcBundlePrices::default();
        let bundle = whole_current_bundle(WcMeterType::ThreePhase, 3, &prices);

        assert_eq!(bundle.len(), 4);
        let fuses = bundle.iter().find(|item| item.name == "WCM-FUSE").expect("fuse line");
        assert_eq!(fuses.quantity, 3 * FUSES_PER_UNIT);
        for member in bundle.iter().filter(|item| item.name != "WCM-FUSE") {
            assert_eq!(member.quantity, 3);
        }
    }

    #[test]
    fn breaker_follows_meter_phase() {
        let prices = WcBundlePrices::default();
        let bundle = whole_current_bundle(WcMeterType::ThreePhase, 1, &prices);
        assert!(bundle.iter().any(|item| item.name == WC_BREAKER_THREE_PART));
        assert!(!bundle.iter().any(|item| item.name == "WCM-BRK-1P"));
    }
}
