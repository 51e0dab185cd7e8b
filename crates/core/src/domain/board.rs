use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoardId(pub String);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoardType {
    MainSwitchboard,
    DistributionBoard,
    MeterPanel,
    ControlPanel,
}

impl BoardType {
    pub fn name_prefix(&self) -> &'static str {
        match self {
            Self::MainSwitchboard => "MSB",
            Self::DistributionBoard => "DB",
            Self::MeterPanel => "MP",
            Self::ControlPanel => "CP",
        }
    }

    /// Longest-first so `MSB` is recognized before `MP` when stripping.
    pub fn known_prefixes() -> [&'static str; 4] {
        ["MSB", "DB", "MP", "CP"]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MainSwitchboard => "main_switchboard",
            Self::DistributionBoard => "distribution_board",
            Self::MeterPanel => "meter_panel",
            Self::ControlPanel => "control_panel",
        }
    }
}

impl std::str::FromStr for BoardType {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "main_switchboard" => Ok(Self::MainSwitchboard),
            "distribution_board" => Ok(Self::DistributionBoard),
            "meter_panel" => Ok(Self::MeterPanel),
            "control_panel" => Ok(Self::ControlPanel),
            other => Err(format!("unknown board type `{other}`")),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnclosureType {
    WallMount,
    FloorStanding,
    Custom,
}

impl EnclosureType {
    pub fn display(&self) -> &'static str {
        match self {
            Self::WallMount => "Wall Mount",
            Self::FloorStanding => "Floor Standing",
            Self::Custom => "Custom",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Material {
    MildSteel,
    StainlessSteel,
    Aluminium,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WcMeterType {
    SinglePhase,
    ThreePhase,
}

/// Most metered units a single board can carry.
pub const MAX_WC_QUANTITY: u32 = 200;

/// Typed board configuration. One closed shape shared by every board type,
/// validated before synthesis runs; an update always replaces the whole
/// record rather than merging field by field.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub enclosure_type: Option<EnclosureType>,
    pub ip_rating: Option<String>,
    pub material: Option<Material>,
    pub tier_count: Option<u32>,
    pub spd: bool,
    pub whole_current_metering: bool,
    pub wc_type: Option<WcMeterType>,
    pub wc_quantity: u32,
    pub ct_metering: bool,
    pub base_included: bool,
    pub compartment_count: Option<u32>,
    pub delivery: bool,
    pub reconnection: bool,
}

impl BoardConfig {
    /// Rejects configurations the synthesizer could not evaluate without
    /// guessing. Run before any synthesis pass.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.whole_current_metering {
            if self.wc_type.is_none() {
                return Err(DomainError::InvalidConfiguration {
                    reason: "whole-current metering enabled without a meter type".to_owned(),
                });
            }
            if self.wc_quantity == 0 {
                return Err(DomainError::InvalidConfiguration {
                    reason: "whole-current metering enabled with zero quantity".to_owned(),
                });
            }
            if self.wc_quantity > MAX_WC_QUANTITY {
                return Err(DomainError::InvalidConfiguration {
                    reason: format!(
                        "whole-current meter quantity {} exceeds the maximum of {MAX_WC_QUANTITY}",
                        self.wc_quantity
                    ),
                });
            }
        }

        if !self.whole_current_metering && (self.wc_type.is_some() || self.wc_quantity > 0) {
            return Err(DomainError::InvalidConfiguration {
                reason: "whole-current meter type or quantity set while metering is disabled"
                    .to_owned(),
            });
        }

        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    pub id: BoardId,
    pub quote_id: crate::domain::quote::QuoteId,
    pub name: String,
    pub board_type: BoardType,
    pub position: u32,
    pub config: BoardConfig,
    pub is_optional: bool,
}

/// Board display-name normalization. Applied on every create and update:
/// an empty name becomes `<PREFIX>01`, a name already carrying the correct
/// prefix is untouched, a name carrying a different known prefix has that
/// prefix replaced, anything else gets the prefix prepended.
pub fn normalize_name(board_type: BoardType, name: &str) -> String {
    let prefix = board_type.name_prefix();
    let trimmed = name.trim();

    if trimmed.is_empty() {
        return format!("{prefix}01");
    }

    if trimmed.starts_with(prefix) {
        return trimmed.to_owned();
    }

    for known in BoardType::known_prefixes() {
        if let Some(rest) = trimmed.strip_prefix(known) {
            return format!("{prefix}{rest}");
        }
    }

    format!("{prefix}{trimmed}")
}

#[cfg(test)]
mod tests {
    use super::{normalize_name, BoardConfig, BoardType, WcMeterType};
    use crate::errors::DomainError;

    #[test]
    fn empty_name_gets_default_numbered_prefix() {
        assert_eq!(normalize_name(BoardType::MainSwitchboard, ""), "MSB01");
        assert_eq!(normalize_name(BoardType::DistributionBoard, "   "), "DB01");
    }

    #[test]
    fn correct_prefix_is_left_unchanged() {
        assert_eq!(normalize_name(BoardType::MeterPanel, "MP03"), "MP03");
        assert_eq!(normalize_name(BoardType::MainSwitchboard, "MSB12"), "MSB12");
    }

    #[test]
    fn foreign_known_prefix_is_replaced() {
        assert_eq!(normalize_name(BoardType::DistributionBoard, "MSB01"), "DB01");
        assert_eq!(normalize_name(BoardType::MeterPanel, "CP07"), "MP07");
    }

    #[test]
    fn longest_prefix_wins_when_stripping() {
        // MSB must not be read as MP + garbage or M + SB.
        assert_eq!(normalize_name(BoardType::ControlPanel, "MSB04"), "CP04");
    }

    #[test]
    fn unknown_name_gets_prefix_prepended() {
        assert_eq!(normalize_name(BoardType::MainSwitchboard, "Stage 2"), "MSBStage 2");
    }

    #[test]
    fn wc_metering_requires_type_and_quantity() {
        let missing_type = BoardConfig {
            whole_current_metering: true,
            wc_quantity: 2,
            ..BoardConfig::default()
        };
        assert!(matches!(
            missing_type.validate(),
            Err(DomainError::InvalidConfiguration { .. })
        ));

        let zero_quantity = BoardConfig {
            whole_current_metering: true,
            wc_type: Some(WcMeterType::SinglePhase),
            wc_quantity: 0,
            ..BoardConfig::default()
        };
        assert!(zero_quantity.validate().is_err());
    }

    #[test]
    fn wc_quantity_above_the_cap_is_rejected() {
        let config = BoardConfig {
            whole_current_metering: true,
            wc_type: Some(WcMeterType::SinglePhase),
            wc_quantity: super::MAX_WC_QUANTITY + 1,
            ..BoardConfig::default()
        };
        assert!(matches!(config.validate(), Err(DomainError::InvalidConfiguration { .. })));
    }

    #[test]
    fn wc_fields_without_metering_are_rejected() {
        let stray = BoardConfig { wc_quantity: 3, ..BoardConfig::default() };
        assert!(stray.validate().is_err());
    }

    #[test]
    fn default_config_is_valid() {
        assert!(BoardConfig::default().validate().is_ok());
    }
}
