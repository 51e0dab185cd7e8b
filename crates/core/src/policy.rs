use serde::{Deserialize, Serialize};

/// One policy row: a part-number pattern and what the system owns for parts
/// matching it. `exact` rules match the whole part number; prefix rules match
/// any part number starting with the pattern.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyRule {
    pub pattern: String,
    pub exact: bool,
    pub auto_managed: bool,
    pub formula_priced: bool,
}

/// Versioned part-number policy table. Loaded once and passed by reference
/// into the quoting service, which consults it to gate manual add/delete and
/// to exclude formula-priced parts from bulk price refreshes; tests can
/// substitute their own rules and the table can evolve without code changes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyTable {
    pub version: u32,
    pub rules: Vec<PolicyRule>,
}

impl PolicyTable {
    pub fn new(version: u32, rules: Vec<PolicyRule>) -> Self {
        Self { version, rules }
    }

    /// The part families the synthesizer owns today: tiers, enclosures, base
    /// and compartment sections, CT metering panels, the SPD kit, the
    /// whole-current metering bundle, the delivery/reconnection services, and
    /// the house `SB-` basics family. Rule order matters: the first matching
    /// rule wins, so the formula-priced `SB-TIER`/`SB-ENC` rows sit ahead of
    /// the general `SB-` rule.
    pub fn standard() -> Self {
        fn prefix(pattern: &str, formula_priced: bool) -> PolicyRule {
            PolicyRule {
                pattern: pattern.to_owned(),
                exact: false,
                auto_managed: true,
                formula_priced,
            }
        }

        Self::new(
            1,
            vec![
                prefix("SB-TIER", true),
                prefix("SB-ENC", true),
                prefix("SPD-KIT", false),
                prefix("WCM-", false),
                prefix("SVC-DEL", false),
                prefix("SVC-RECON", false),
                prefix("SB-", false),
            ],
        )
    }

    fn matching_rule(&self, part_number: &str) -> Option<&PolicyRule> {
        let trimmed = part_number.trim();
        self.rules.iter().find(|rule| {
            if rule.exact {
                trimmed == rule.pattern
            } else {
                trimmed.starts_with(rule.pattern.as_str())
            }
        })
    }

    /// Auto-managed parts are hidden from manual add menus, cannot be
    /// manually deleted, and have their quantity owned by the synthesizer.
    pub fn is_auto_managed(&self, part_number: &str) -> bool {
        self.matching_rule(part_number).map(|rule| rule.auto_managed).unwrap_or(false)
    }

    /// Formula-priced parts carry computed prices and must be skipped by any
    /// bulk catalog-price refresh; a naive refresh would overwrite a computed
    /// value with a stale flat catalog price.
    pub fn is_formula_priced(&self, part_number: &str) -> bool {
        self.matching_rule(part_number).map(|rule| rule.formula_priced).unwrap_or(false)
    }
}

impl Default for PolicyTable {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::{PolicyRule, PolicyTable};

    #[test]
    fn prefix_rules_cover_whole_part_families() {
        let table = PolicyTable::standard();
        assert!(table.is_auto_managed("SB-TIER"));
        assert!(table.is_auto_managed("WCM-FUSE"));
        assert!(table.is_auto_managed("WCM-BRK-3P"));
        assert!(table.is_auto_managed("SVC-DEL-METRO"));
    }

    #[test]
    fn house_basics_family_is_auto_managed_but_catalog_priced() {
        let table = PolicyTable::standard();
        assert!(table.is_auto_managed("SB-LABEL"));
        assert!(!table.is_formula_priced("SB-LABEL"));
        assert!(table.is_formula_priced("SB-TIER"));
    }

    #[test]
    fn unlisted_parts_are_user_owned() {
        let table = PolicyTable::standard();
        assert!(!table.is_auto_managed("NHP-MS250"));
        assert!(!table.is_formula_priced("NHP-MS250"));
        assert!(!table.is_auto_managed(""));
    }

    #[test]
    fn formula_priced_is_a_subset_of_auto_managed() {
        let table = PolicyTable::standard();
        for rule in &table.rules {
            if rule.formula_priced {
                assert!(rule.auto_managed, "formula-priced rule {} must be auto-managed", rule.pattern);
            }
        }
        assert!(table.is_formula_priced("SB-TIER"));
        assert!(table.is_formula_priced("SB-ENC-WM"));
        assert!(!table.is_formula_priced("SPD-KIT"));
    }

    #[test]
    fn exact_rules_do_not_match_extensions() {
        let table = PolicyTable::new(
            7,
            vec![PolicyRule {
                pattern: "SB-TIER".to_owned(),
                exact: true,
                auto_managed: true,
                formula_priced: true,
            }],
        );
        assert!(table.is_auto_managed("SB-TIER"));
        assert!(!table.is_auto_managed("SB-TIER-XL"));
    }
}
