pub mod metering;
pub mod tiers;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::board::{BoardConfig, EnclosureType};
use crate::domain::catalog::CatalogEntry;
use crate::domain::item::ProposedItem;
use crate::errors::DomainError;
use crate::merge::fold_proposals;

use self::metering::{whole_current_bundle, WcBundlePrices};
use self::tiers::TierSchedule;

pub const SWITCHBOARD_CATEGORY: &str = "Switchboard";
pub const BASICS_CATEGORY: &str = "Basics";

pub const TIER_PART: &str = "SB-TIER";
pub const SPD_PART: &str = "SPD-KIT";
pub const CT_PANEL_PART: &str = "SB-CTPNL";
pub const BASE_PART: &str = "SB-BASE";
pub const COMPARTMENT_PART: &str = "SB-COMP";
pub const DELIVERY_PART: &str = "SVC-DEL";
pub const RECONNECTION_PART: &str = "SVC-RECON";

const ENCLOSURE_SUBCATEGORY: &str = "Enclosure";
const TIERS_SUBCATEGORY: &str = "Tiers";
const PROTECTION_SUBCATEGORY: &str = "Protection";
const METERING_SUBCATEGORY: &str = "Metering";
const SERVICES_SUBCATEGORY: &str = "Services";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinePrice {
    pub unit_price: Decimal,
    pub labour_hours: Decimal,
}

impl LinePrice {
    pub fn new(unit_price: Decimal, labour_hours: Decimal) -> Self {
        Self { unit_price, labour_hours }
    }
}

/// Injectable prices for the formula-priced and fixed-price synthesis rules.
/// Defaults are the observed reference values; deployments override them via
/// the `[pricing]` config section.
///
/// TODO: source `enclosure` from the catalog once enclosure entries carry
/// real pricing; the reference price here is a stand-in until then.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceBook {
    pub enclosure: LinePrice,
    pub tier_schedule: TierSchedule,
    pub tier_labour_hours: Decimal,
    pub spd: LinePrice,
    pub wc_bundle: WcBundlePrices,
    pub ct_panel: LinePrice,
    pub base: LinePrice,
    pub compartment: LinePrice,
    pub delivery: LinePrice,
    pub reconnection: LinePrice,
}

impl Default for PriceBook {
    fn default() -> Self {
        Self {
            enclosure: LinePrice::new(Decimal::new(185_000, 2), Decimal::new(80, 1)),
            tier_schedule: TierSchedule::default(),
            tier_labour_hours: Decimal::new(25, 1),
            spd: LinePrice::new(Decimal::new(48_500, 2), Decimal::new(15, 1)),
            wc_bundle: WcBundlePrices::default(),
            ct_panel: LinePrice::new(Decimal::new(64_000, 2), Decimal::new(60, 1)),
            base: LinePrice::new(Decimal::new(42_000, 2), Decimal::new(30, 1)),
            compartment: LinePrice::new(Decimal::new(28_500, 2), Decimal::new(20, 1)),
            delivery: LinePrice::new(Decimal::new(35_000, 2), Decimal::ZERO),
            reconnection: LinePrice::new(Decimal::new(18_000, 2), Decimal::ZERO),
        }
    }
}

/// Derives the full target set of line items a board configuration implies.
/// Pure: every rule is evaluated on every call, there is no delta mode.
/// Busbars are deliberately absent; they are manual selection only.
pub fn synthesize(
    config: &BoardConfig,
    basics_catalog: &[CatalogEntry],
    price_book: &PriceBook,
) -> Result<Vec<ProposedItem>, DomainError> {
    config.validate()?;

    let mut proposals = Vec::new();

    for entry in basics_catalog {
        if !entry.is_auto_add || entry.category != BASICS_CATEGORY {
            continue;
        }
        proposals.push(ProposedItem {
            category: BASICS_CATEGORY.to_owned(),
            subcategory: entry.subcategory.clone(),
            name: entry.display_name().to_owned(),
            description: Some(entry.description.clone()),
            quantity: entry.default_quantity.max(1),
            unit_price: entry.unit_price,
            labour_hours: entry.labour_hours,
        });
    }

    if let Some(enclosure_type) = config.enclosure_type {
        proposals.push(enclosure_item(enclosure_type, &price_book.enclosure));
    }

    if config.spd {
        proposals.push(system_item(
            SPD_PART,
            "Surge Protection Device",
            PROTECTION_SUBCATEGORY,
            1,
            &price_book.spd,
        ));
    }

    if let Some(tier_count) = config.tier_count {
        if tier_count > 0 {
            let unit_price = price_book.tier_schedule.price_for(tier_count).ok_or_else(|| {
                DomainError::InvalidConfiguration {
                    reason: format!("no tier price available for count {tier_count}"),
                }
            })?;
            proposals.push(ProposedItem {
                category: SWITCHBOARD_CATEGORY.to_owned(),
                subcategory: Some(TIERS_SUBCATEGORY.to_owned()),
                name: TIER_PART.to_owned(),
                description: Some("Switchboard tier".to_owned()),
                quantity: tier_count,
                unit_price,
                labour_hours: price_book.tier_labour_hours,
            });
        }
    }

    if config.whole_current_metering {
        // validate() has already guaranteed wc_type and a positive quantity.
        let wc_type = config.wc_type.ok_or_else(|| DomainError::InvalidConfiguration {
            reason: "whole-current metering enabled without a meter type".to_owned(),
        })?;
        proposals.extend(whole_current_bundle(wc_type, config.wc_quantity, &price_book.wc_bundle));
    }

    if config.ct_metering {
        proposals.push(system_item(
            CT_PANEL_PART,
            "CT metering panel",
            METERING_SUBCATEGORY,
            1,
            &price_book.ct_panel,
        ));
    }

    if config.base_included {
        proposals.push(system_item(
            BASE_PART,
            "Plinth base section",
            ENCLOSURE_SUBCATEGORY,
            1,
            &price_book.base,
        ));
    }

    if let Some(compartment_count) = config.compartment_count {
        if compartment_count > 0 {
            proposals.push(system_item(
                COMPARTMENT_PART,
                "Equipment compartment",
                ENCLOSURE_SUBCATEGORY,
                compartment_count,
                &price_book.compartment,
            ));
        }
    }

    if config.delivery {
        proposals.push(system_item(
            DELIVERY_PART,
            "Delivery to site",
            SERVICES_SUBCATEGORY,
            1,
            &price_book.delivery,
        ));
    }

    if config.reconnection {
        proposals.push(system_item(
            RECONNECTION_PART,
            "Site reconnection",
            SERVICES_SUBCATEGORY,
            1,
            &price_book.reconnection,
        ));
    }

    Ok(fold_proposals(proposals))
}

fn enclosure_item(enclosure_type: EnclosureType, price: &LinePrice) -> ProposedItem {
    let part = match enclosure_type {
        EnclosureType::WallMount => "SB-ENC-WM",
        EnclosureType::FloorStanding => "SB-ENC-FS",
        EnclosureType::Custom => "SB-ENC-CU",
    };
    ProposedItem {
        category: SWITCHBOARD_CATEGORY.to_owned(),
        subcategory: Some(ENCLOSURE_SUBCATEGORY.to_owned()),
        name: part.to_owned(),
        description: Some(format!("{} Enclosure", enclosure_type.display())),
        quantity: 1,
        unit_price: price.unit_price,
        labour_hours: price.labour_hours,
    }
}

fn system_item(
    part: &str,
    description: &str,
    subcategory: &str,
    quantity: u32,
    price: &LinePrice,
) -> ProposedItem {
    ProposedItem {
        category: SWITCHBOARD_CATEGORY.to_owned(),
        subcategory: Some(subcategory.to_owned()),
        name: part.to_owned(),
        description: Some(description.to_owned()),
        quantity,
        unit_price: price.unit_price,
        labour_hours: price.labour_hours,
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use crate::domain::board::{BoardConfig, EnclosureType, WcMeterType};
    use crate::domain::catalog::{CatalogEntry, CatalogEntryId};

    use super::{synthesize, PriceBook, SPD_PART, TIER_PART};

    fn basics_entry(part_number: &str, default_quantity: u32, is_auto_add: bool) -> CatalogEntry {
        CatalogEntry {
            id: CatalogEntryId(format!("cat-{part_number}")),
            part_number: part_number.to_owned(),
            description: format!("{part_number} description"),
            category: "Basics".to_owned(),
            subcategory: None,
            brand: None,
            unit_price: Decimal::new(1_500, 2),
            labour_hours: Decimal::new(5, 1),
            default_quantity,
            is_auto_add,
            meter_type: None,
        }
    }

    #[test]
    fn empty_config_yields_only_auto_add_basics() {
        let catalog =
            vec![basics_entry("SB-LABEL", 1, true), basics_entry("SB-OPTIONAL", 1, false)];
        let proposals = synthesize(&BoardConfig::default(), &catalog, &PriceBook::default())
            .expect("synthesize");

        assert_eq!(proposals.len(), 1);
        assert_eq!(proposals[0].name, "SB-LABEL");
    }

    #[test]
    fn basics_default_quantity_floors_at_one() {
        let catalog = vec![basics_entry("SB-LABEL", 0, true)];
        let proposals = synthesize(&BoardConfig::default(), &catalog, &PriceBook::default())
            .expect("synthesize");
        assert_eq!(proposals[0].quantity, 1);
    }

    #[test]
    fn enclosure_rule_uses_reference_price() {
        let config =
            BoardConfig { enclosure_type: Some(EnclosureType::WallMount), ..BoardConfig::default() };
        let book = PriceBook::default();
        let proposals = synthesize(&config, &[], &book).expect("synthesize");

        let enclosure = proposals.iter().find(|item| item.name == "SB-ENC-WM").expect("enclosure");
        assert_eq!(enclosure.unit_price, book.enclosure.unit_price);
        assert_eq!(enclosure.description.as_deref(), Some("Wall Mount Enclosure"));
        assert_eq!(enclosure.quantity, 1);
    }

    #[test]
    fn spd_rule_proposes_exactly_one_kit() {
        let config = BoardConfig { spd: true, ..BoardConfig::default() };
        let proposals = synthesize(&config, &[], &PriceBook::default()).expect("synthesize");

        let spd: Vec<_> = proposals.iter().filter(|item| item.name == SPD_PART).collect();
        assert_eq!(spd.len(), 1);
        assert_eq!(spd[0].quantity, 1);
    }

    #[test]
    fn tier_quantity_and_price_follow_the_count() {
        let book = PriceBook::default();

        let one = BoardConfig { tier_count: Some(1), ..BoardConfig::default() };
        let proposals = synthesize(&one, &[], &book).expect("synthesize");
        let tier = proposals.iter().find(|item| item.name == TIER_PART).expect("tier line");
        assert_eq!(tier.quantity, 1);
        assert_eq!(tier.unit_price, Decimal::new(120_000, 2));

        let two = BoardConfig { tier_count: Some(2), ..BoardConfig::default() };
        let proposals = synthesize(&two, &[], &book).expect("synthesize");
        let tier = proposals.iter().find(|item| item.name == TIER_PART).expect("tier line");
        assert_eq!(tier.quantity, 2);
        assert_eq!(tier.unit_price, Decimal::new(105_000, 2));
    }

    #[test]
    fn zero_tier_count_proposes_nothing() {
        let config = BoardConfig { tier_count: Some(0), ..BoardConfig::default() };
        let proposals = synthesize(&config, &[], &PriceBook::default()).expect("synthesize");
        assert!(proposals.iter().all(|item| item.name != TIER_PART));
    }

    #[test]
    fn wc_metering_emits_full_bundle_with_scaled_fuses() {
        let config = BoardConfig {
            whole_current_metering: true,
            wc_type: Some(WcMeterType::SinglePhase),
            wc_quantity: 3,
            ..BoardConfig::default()
        };
        let proposals = synthesize(&config, &[], &PriceBook::default()).expect("synthesize");

        let fuses = proposals.iter().find(|item| item.name == "WCM-FUSE").expect("fuses");
        assert_eq!(fuses.quantity, 9);
        let panel = proposals.iter().find(|item| item.name == "WCM-PANEL").expect("panel");
        assert_eq!(panel.quantity, 3);
        assert!(proposals.iter().any(|item| item.name == "WCM-BRK-1P"));
    }

    #[test]
    fn invalid_wc_config_fails_whole_synthesis() {
        let config = BoardConfig {
            whole_current_metering: true,
            wc_quantity: 2,
            ..BoardConfig::default()
        };
        assert!(synthesize(&config, &[], &PriceBook::default()).is_err());
    }

    #[test]
    fn busbars_are_never_synthesized() {
        let config = BoardConfig {
            enclosure_type: Some(EnclosureType::FloorStanding),
            tier_count: Some(3),
            spd: true,
            whole_current_metering: true,
            wc_type: Some(WcMeterType::ThreePhase),
            wc_quantity: 2,
            ct_metering: true,
            base_included: true,
            compartment_count: Some(2),
            delivery: true,
            reconnection: true,
            ..BoardConfig::default()
        };
        let proposals = synthesize(&config, &[], &PriceBook::default()).expect("synthesize");

        assert!(proposals
            .iter()
            .all(|item| item.subcategory.as_deref() != Some("Busbars")));
        assert!(proposals.iter().all(|item| !item.name.to_lowercase().contains("busbar")));
    }

    #[test]
    fn duplicate_identities_are_folded_within_a_pass() {
        // Two identical auto-add catalog rows must come out as one proposal.
        let catalog = vec![basics_entry("SB-LABEL", 1, true), basics_entry("SB-LABEL", 1, true)];
        let proposals = synthesize(&BoardConfig::default(), &catalog, &PriceBook::default())
            .expect("synthesize");

        assert_eq!(proposals.len(), 1);
        assert_eq!(proposals[0].quantity, 2);
    }
}
