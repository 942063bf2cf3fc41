//! Static unit-to-kilogram table
//!
//! Rules are evaluated in declaration order and the first match wins. Volume
//! and count units carry the flat food-density ratios the catalog curation
//! team settled on.

use crate::config::UnitMatchPolicy;

/// One entry of the conversion table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitRule {
    /// Canonical label used in logs
    pub label: &'static str,
    /// Lowercase spellings accepted for this unit
    pub aliases: &'static [&'static str],
    /// Kilograms per one unit
    pub ratio: f64,
}

impl UnitRule {
    /// Whether `label` (already lowercased) selects this rule under `policy`
    pub fn matches(&self, label: &str, policy: UnitMatchPolicy) -> bool {
        match policy {
            UnitMatchPolicy::Exact => self.aliases.contains(&label),
            UnitMatchPolicy::Permissive => label
                .split(|c: char| !c.is_alphabetic())
                .filter(|token| !token.is_empty())
                .any(|token| self.aliases.contains(&token)),
        }
    }
}

pub const UNIT_RULES: &[UnitRule] = &[
    UnitRule {
        label: "kilogram",
        aliases: &["kg", "kgs", "kilo", "kilos", "kilogram", "kilograms"],
        ratio: 1.0,
    },
    UnitRule {
        label: "gram",
        aliases: &["g", "gr", "gram", "grams"],
        ratio: 0.001,
    },
    UnitRule {
        label: "pound",
        aliases: &["lb", "lbs", "pound", "pounds"],
        ratio: 0.454,
    },
    UnitRule {
        label: "ounce",
        aliases: &["oz", "ounce", "ounces"],
        ratio: 0.028,
    },
    UnitRule {
        label: "teaspoon",
        aliases: &["tsp", "teaspoon", "teaspoons"],
        ratio: 0.569,
    },
    UnitRule {
        label: "tablespoon",
        aliases: &["tbsp", "tablespoon", "tablespoons"],
        ratio: 0.569,
    },
    UnitRule {
        label: "cup",
        aliases: &["cup", "cups"],
        ratio: 0.569,
    },
    UnitRule {
        label: "quart",
        aliases: &["qt", "quart", "quarts"],
        ratio: 0.569,
    },
    UnitRule {
        label: "clove",
        aliases: &["clove", "cloves"],
        ratio: 0.569,
    },
];

/// First rule matching `label`, case-insensitively
pub fn lookup(label: &str, policy: UnitMatchPolicy) -> Option<&'static UnitRule> {
    let normalized = label.trim().to_lowercase();
    UNIT_RULES
        .iter()
        .find(|rule| rule.matches(&normalized, policy))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_policy_requires_whole_label() {
        assert_eq!(lookup("Ounce", UnitMatchPolicy::Exact).unwrap().label, "ounce");
        assert!(lookup("2 ounces", UnitMatchPolicy::Exact).is_none());
    }

    #[test]
    fn test_permissive_policy_accepts_free_text() {
        assert_eq!(
            lookup("2 ounces", UnitMatchPolicy::Permissive).unwrap().label,
            "ounce"
        );
        assert_eq!(
            lookup("3 tbsp", UnitMatchPolicy::Permissive).unwrap().label,
            "tablespoon"
        );
        assert_eq!(
            lookup("1 clove, minced", UnitMatchPolicy::Permissive)
                .unwrap()
                .label,
            "clove"
        );
    }

    #[test]
    fn test_permissive_policy_matches_whole_tokens_only() {
        // "kg" must not be read as grams, nor "cupboard" as cups
        assert_eq!(lookup("kg", UnitMatchPolicy::Permissive).unwrap().label, "kilogram");
        assert!(lookup("cupboard", UnitMatchPolicy::Permissive).is_none());
    }

    #[test]
    fn test_first_rule_wins() {
        let rule = lookup("1 lb or 16 oz", UnitMatchPolicy::Permissive).unwrap();
        assert_eq!(rule.label, "pound");
    }
}
