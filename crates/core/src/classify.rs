use serde::{Deserialize, Serialize};

use crate::domain::catalog::MeterType;

/// Everything the classifier is allowed to look at for one catalog entry.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClassifierInput {
    pub description: String,
    pub part_number: String,
    pub vendor_categories: Vec<String>,
    pub manual_brand: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub brand: String,
    pub category: String,
    pub subcategory: String,
    pub meter_type: Option<MeterType>,
}

pub const MASTER_CATEGORY: &str = "Switchboard";
pub const POWER_METERS_SUBCATEGORY: &str = "Power Meters";
pub const POWER_METER_ACCESSORIES_SUBCATEGORY: &str = "Power Meter Accessories";

const SUBCATEGORY_DELIMITER: &str = " > ";
const UNKNOWN_BRAND: &str = "Unknown";

const BRAND_PREFIXES: &[(&str, &str)] = &[
    ("CLIP", "Clipsal"),
    ("NHP", "NHP"),
    ("HAG", "Hager"),
    ("A9", "Schneider Electric"),
];

const POWER_METER_KEYWORDS: &[&str] =
    &["power meter", "energy meter", "metering", "kilowatt hour meter"];

// Checked in declaration order. Direct's keyword set is the broadest and must
// stay first; NMI falls through to a part-number prefix check.
const DIRECT_KEYWORDS: &[&str] = &["direct", "whole current", "din rail", "63a", "100a"];
const CT_KEYWORDS: &[&str] =
    &["ct connected", "current transformer connected", "measuring instrument"];
const NMI_KEYWORDS: &[&str] = &["nmi", "pattern approved"];
const NMI_PART_PREFIX: &str = "MK";

/// Derives normalized brand/category/subcategory/meter-type from the raw
/// descriptive attributes of a catalog entry. Pure function, no state.
pub fn classify(input: &ClassifierInput) -> Classification {
    let brand = resolve_brand(input);
    let vendor_path = input
        .vendor_categories
        .iter()
        .map(|category| category.trim())
        .filter(|category| !category.is_empty())
        .collect::<Vec<_>>()
        .join(SUBCATEGORY_DELIMITER);

    let haystack = format!("{} {}", vendor_path, input.description).to_lowercase();

    if !is_power_meter(&haystack) {
        return Classification {
            brand,
            category: MASTER_CATEGORY.to_owned(),
            subcategory: vendor_path,
            meter_type: None,
        };
    }

    // Legacy vendor paths filed meter accessories under the meters themselves.
    let subcategory = if haystack.contains("accessor") {
        POWER_METER_ACCESSORIES_SUBCATEGORY.to_owned()
    } else {
        POWER_METERS_SUBCATEGORY.to_owned()
    };

    Classification {
        brand,
        category: MASTER_CATEGORY.to_owned(),
        subcategory,
        meter_type: Some(classify_meter_type(&haystack, &input.part_number)),
    }
}

fn resolve_brand(input: &ClassifierInput) -> String {
    if let Some(manual) = input.manual_brand.as_ref() {
        let trimmed = manual.trim();
        if !trimmed.is_empty() {
            return trimmed.to_owned();
        }
    }

    let part_number = input.part_number.trim().to_ascii_uppercase();
    for (prefix, brand) in BRAND_PREFIXES {
        if part_number.starts_with(prefix) {
            return (*brand).to_owned();
        }
    }

    UNKNOWN_BRAND.to_owned()
}

fn is_power_meter(haystack: &str) -> bool {
    POWER_METER_KEYWORDS.iter().any(|keyword| haystack.contains(keyword))
}

/// Fixed-precedence sub-classifier: Direct beats CT-connected beats NMI
/// beats the residual Special bucket. The ordering matches existing catalog
/// classifications and must not be rearranged.
fn classify_meter_type(haystack: &str, part_number: &str) -> MeterType {
    if DIRECT_KEYWORDS.iter().any(|keyword| haystack.contains(keyword)) {
        return MeterType::Direct;
    }

    if CT_KEYWORDS.iter().any(|keyword| haystack.contains(keyword)) {
        return MeterType::CtConnected;
    }

    let nmi_by_keyword = NMI_KEYWORDS.iter().any(|keyword| haystack.contains(keyword));
    let nmi_by_part = part_number.trim().to_ascii_uppercase().starts_with(NMI_PART_PREFIX);
    if nmi_by_keyword || nmi_by_part {
        return MeterType::NmiPattern;
    }

    MeterType::Special
}
