use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Process-wide pricing settings, a singleton record in the store. Quotes do
/// not read these live: each quote carries a [`SettingsSnapshot`] frozen at
/// creation (or duplication) time so later edits never move historical totals.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub labour_rate: Decimal,
    pub consumables_pct: Decimal,
    pub overhead_pct: Decimal,
    pub engineering_pct: Decimal,
    pub target_margin_pct: Decimal,
    pub gst_pct: Decimal,
    pub rounding_increment: Decimal,
    pub min_margin_alert_pct: Decimal,
    pub company_name: String,
    pub company_contact: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            labour_rate: Decimal::new(9_500, 2),
            consumables_pct: Decimal::new(300, 2),
            overhead_pct: Decimal::new(1_200, 2),
            engineering_pct: Decimal::new(500, 2),
            target_margin_pct: Decimal::new(2_500, 2),
            gst_pct: Decimal::new(1_000, 2),
            rounding_increment: Decimal::new(5_000, 2),
            min_margin_alert_pct: Decimal::new(1_500, 2),
            company_name: "Boardquote Switchboards".to_owned(),
            company_contact: None,
        }
    }
}

impl Settings {
    pub fn snapshot(&self) -> SettingsSnapshot {
        SettingsSnapshot(self.clone())
    }
}

/// Frozen copy of [`Settings`] carried by a quote. Never recomputed from the
/// live record once taken; duplication copies the original's snapshot verbatim.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SettingsSnapshot(pub Settings);

impl std::ops::Deref for SettingsSnapshot {
    type Target = Settings;

    fn deref(&self) -> &Settings {
        &self.0
    }
}
