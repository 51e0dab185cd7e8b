use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CatalogEntryId(pub String);

/// Direct-connected vs. CT-connected vs. NMI pattern-approved power meters.
/// `Special` is the residual bucket for meters the classifier cannot place.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeterType {
    Direct,
    CtConnected,
    NmiPattern,
    Special,
}

impl MeterType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Direct => "direct",
            Self::CtConnected => "ct_connected",
            Self::NmiPattern => "nmi_pattern",
            Self::Special => "special",
        }
    }
}

impl std::str::FromStr for MeterType {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "direct" => Ok(Self::Direct),
            "ct_connected" => Ok(Self::CtConnected),
            "nmi_pattern" => Ok(Self::NmiPattern),
            "special" => Ok(Self::Special),
            other => Err(format!("unknown meter type `{other}`")),
        }
    }
}

/// A purchasable or labour part. Line items copy values out of the catalog
/// rather than holding a foreign reference, so later catalog edits never
/// retroactively change historical quotes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: CatalogEntryId,
    pub part_number: String,
    pub description: String,
    pub category: String,
    pub subcategory: Option<String>,
    pub brand: Option<String>,
    pub unit_price: Decimal,
    pub labour_hours: Decimal,
    pub default_quantity: u32,
    pub is_auto_add: bool,
    pub meter_type: Option<MeterType>,
}

impl CatalogEntry {
    /// Display name for synthesized line items: part number when present,
    /// description otherwise.
    pub fn display_name(&self) -> &str {
        if self.part_number.trim().is_empty() {
            &self.description
        } else {
            &self.part_number
        }
    }
}
