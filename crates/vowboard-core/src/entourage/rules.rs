//! Merge rules: which categories are laid out together, and how.
//!
//! Each rule fires once, at its trigger category's place in the display
//! order. Categories a rule pulls in besides its trigger are suppressed as
//! standalone sections.

use super::category::*;

/// How members within a column are ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnOrder {
    /// As they came from the sheet
    Original,
    /// Fathers ahead of everyone else, otherwise as they came
    FatherFirst,
}

/// Layout for a trigger category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeRule {
    /// Groom and bride side by side as one pair
    Couple,
    /// Two groups of categories as left/right columns. A column's title
    /// falls back to the first of its categories that has members.
    Columns {
        left: &'static [&'static str],
        right: &'static [&'static str],
        left_title: Option<&'static str>,
        right_title: Option<&'static str>,
        order: ColumnOrder,
        /// Follow with the principal sponsors block
        with_sponsors: bool,
    },
    /// A label block ahead of the category's default layout
    Labelled { label: &'static str },
}

pub struct RuleEntry {
    pub trigger: &'static str,
    pub rule: MergeRule,
}

pub const PRINCIPAL_SPONSORS: &str = "Principal Sponsors";
pub const SECONDARY_SPONSORS: &str = "Secondary Sponsors";

pub const MERGE_RULES: &[RuleEntry] = &[
    RuleEntry {
        trigger: THE_COUPLE,
        rule: MergeRule::Couple,
    },
    RuleEntry {
        trigger: PARENTS_OF_THE_GROOM,
        rule: MergeRule::Columns {
            left: &[PARENTS_OF_THE_GROOM],
            right: &[PARENTS_OF_THE_BRIDE],
            left_title: Some("Groom's Parents"),
            right_title: Some("Bride's Parents"),
            order: ColumnOrder::FatherFirst,
            with_sponsors: true,
        },
    },
    RuleEntry {
        trigger: FAMILY_OF_THE_GROOM,
        rule: MergeRule::Columns {
            left: &[FAMILY_OF_THE_GROOM],
            right: &[FAMILY_OF_THE_BRIDE],
            left_title: Some(FAMILY_OF_THE_GROOM),
            right_title: Some(FAMILY_OF_THE_BRIDE),
            order: ColumnOrder::Original,
            with_sponsors: false,
        },
    },
    RuleEntry {
        trigger: BEST_MAN,
        rule: MergeRule::Columns {
            left: &[MAID_OF_HONOR, MATRON_OF_HONOR],
            right: &[BEST_MAN],
            left_title: None,
            right_title: Some(BEST_MAN),
            order: ColumnOrder::Original,
            with_sponsors: false,
        },
    },
    RuleEntry {
        trigger: CANDLE_SPONSORS,
        rule: MergeRule::Labelled {
            label: SECONDARY_SPONSORS,
        },
    },
    RuleEntry {
        trigger: BRIDESMAIDS,
        rule: MergeRule::Columns {
            left: &[GROOMSMEN],
            right: &[BRIDESMAIDS],
            left_title: Some(GROOMSMEN),
            right_title: Some(BRIDESMAIDS),
            order: ColumnOrder::Original,
            with_sponsors: false,
        },
    },
    RuleEntry {
        trigger: LITTLE_GROOM,
        rule: MergeRule::Columns {
            left: &[LITTLE_GROOM],
            right: &[LITTLE_BRIDE],
            left_title: Some(LITTLE_GROOM),
            right_title: Some(LITTLE_BRIDE),
            order: ColumnOrder::Original,
            with_sponsors: false,
        },
    },
];

/// The rule triggered by a category, if any
pub fn rule_for(category: &str) -> Option<&'static MergeRule> {
    MERGE_RULES
        .iter()
        .find(|entry| entry.trigger == category)
        .map(|entry| &entry.rule)
}

/// Whether a category is only ever shown as part of another category's rule
pub fn is_suppressed(category: &str) -> bool {
    MERGE_RULES.iter().any(|entry| match entry.rule {
        MergeRule::Columns { left, right, .. } => {
            entry.trigger != category && (left.contains(&category) || right.contains(&category))
        }
        _ => false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_triggers_are_in_display_order() {
        for entry in MERGE_RULES {
            assert!(
                CATEGORY_ORDER.contains(&entry.trigger),
                "{} missing from display order",
                entry.trigger
            );
        }
    }

    #[test]
    fn test_suppressed_categories() {
        for category in [
            PARENTS_OF_THE_BRIDE,
            FAMILY_OF_THE_BRIDE,
            MATRON_OF_HONOR,
            MAID_OF_HONOR,
            GROOMSMEN,
            LITTLE_BRIDE,
        ] {
            assert!(is_suppressed(category), "{} should be suppressed", category);
        }
        for category in [
            THE_COUPLE,
            PARENTS_OF_THE_GROOM,
            BEST_MAN,
            BRIDESMAIDS,
            CANDLE_SPONSORS,
            RING_BEARER,
            "Ushers",
        ] {
            assert!(!is_suppressed(category), "{} should not be suppressed", category);
        }
    }

    #[test]
    fn test_rule_lookup() {
        assert_eq!(rule_for(THE_COUPLE), Some(&MergeRule::Couple));
        assert!(matches!(rule_for(CANDLE_SPONSORS), Some(MergeRule::Labelled { .. })));
        assert!(rule_for(GROOMSMEN).is_none());
        assert!(rule_for(FLOWER_GIRLS).is_none());
    }

    #[test]
    fn test_each_merged_category_has_one_owner() {
        for category in CATEGORY_ORDER {
            let owners = MERGE_RULES
                .iter()
                .filter(|entry| match entry.rule {
                    MergeRule::Columns { left, right, .. } => {
                        left.contains(category) || right.contains(category)
                    }
                    _ => false,
                })
                .count();
            assert!(owners <= 1, "{} claimed by {} rules", category, owners);
        }
    }
}
