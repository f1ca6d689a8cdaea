//! Bundled entourage and sponsor lists, shown when the API is unreachable
//! or the sheet is empty.

use serde::Deserialize;
use tracing::error;

use crate::entourage::category::{
    BEST_MAN, BIBLE_BEARER, CANDLE_SPONSORS, COIN_BEARER, CORD_SPONSORS, FLOWER_GIRLS, LITTLE_BRIDE,
    LITTLE_GROOM, MAID_OF_HONOR, MATRON_OF_HONOR, PARENTS_OF_THE_BRIDE, PARENTS_OF_THE_GROOM,
    RING_BEARER,
};
use crate::models::{EntourageMember, PrincipalSponsor};

const BUNDLED: &str = include_str!("../data/entourage.json");

#[derive(Debug, Deserialize)]
struct Bundle {
    #[serde(default)]
    entourage: Vec<StaticMember>,
    #[serde(default)]
    principal_sponsors: Vec<StaticSponsor>,
}

#[derive(Debug, Deserialize)]
struct StaticMember {
    role: String,
    name: String,
    #[serde(default)]
    group: String,
}

#[derive(Debug, Deserialize)]
struct StaticSponsor {
    #[serde(default)]
    name: String,
    #[serde(default)]
    spouse: String,
}

/// Role titles whose category isn't simply the plural of the title
const ROLE_CATEGORIES: &[(&str, &str)] = &[
    ("Best Man", BEST_MAN),
    ("Matron of Honor", MATRON_OF_HONOR),
    ("Maid of Honor", MAID_OF_HONOR),
    ("Bridesmaid", "Bridesmaids"),
    ("Groomsman", "Groomsmen"),
    ("Father", PARENTS_OF_THE_BRIDE),
    ("Mother", PARENTS_OF_THE_BRIDE),
    ("Brother", PARENTS_OF_THE_GROOM),
    ("Flower Girl", FLOWER_GIRLS),
    ("Little Bride", LITTLE_BRIDE),
    ("Little Groom", LITTLE_GROOM),
    ("Ring Bearer", RING_BEARER),
    ("Coin Bearer", COIN_BEARER),
    ("Bible Bearer", BIBLE_BEARER),
];

/// Groups that pin a member to a category regardless of role
const GROUP_CATEGORIES: &[(&str, &str)] = &[
    ("bride-family", PARENTS_OF_THE_BRIDE),
    ("groom-family", PARENTS_OF_THE_GROOM),
    ("candle", CANDLE_SPONSORS),
    ("cord", CORD_SPONSORS),
];

fn bundle() -> Bundle {
    match serde_json::from_str(BUNDLED) {
        Ok(bundle) => bundle,
        Err(e) => {
            error!(error = %e, "Bundled entourage data is malformed");
            Bundle {
                entourage: Vec::new(),
                principal_sponsors: Vec::new(),
            }
        }
    }
}

/// Category for a bundled member: group override, then the role table,
/// then the role pluralized.
pub fn category_for(role: &str, group: &str) -> String {
    if let Some((_, category)) = GROUP_CATEGORIES.iter().find(|(g, _)| *g == group) {
        return category.to_string();
    }
    if let Some((_, category)) = ROLE_CATEGORIES.iter().find(|(r, _)| *r == role) {
        return category.to_string();
    }
    if role.ends_with('s') {
        role.to_string()
    } else {
        format!("{}s", role)
    }
}

pub fn static_entourage() -> Vec<EntourageMember> {
    bundle()
        .entourage
        .into_iter()
        .map(|m| EntourageMember::new(&m.name, &m.role, &category_for(&m.role, &m.group)))
        .collect()
}

/// Bundled sponsor pairs; pairs with both names blank are skipped.
pub fn static_sponsors() -> Vec<PrincipalSponsor> {
    bundle()
        .principal_sponsors
        .into_iter()
        .map(|s| PrincipalSponsor::new(&s.name, &s.spouse))
        .filter(|s| !s.is_blank())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entourage::{build_layout, CategoryBlock};

    #[test]
    fn test_category_for() {
        assert_eq!(category_for("Bridesmaid", ""), "Bridesmaids");
        assert_eq!(category_for("Father", ""), PARENTS_OF_THE_BRIDE);
        assert_eq!(category_for("Mother", "groom-family"), PARENTS_OF_THE_GROOM);
        assert_eq!(category_for("Candle Sponsor", "candle"), CANDLE_SPONSORS);
        assert_eq!(category_for("Usher", ""), "Ushers");
        assert_eq!(category_for("Readers", ""), "Readers");
    }

    #[test]
    fn test_bundled_data_parses() {
        let members = static_entourage();
        assert!(!members.is_empty());
        assert!(members.iter().all(|m| m.category().is_some()));
    }

    #[test]
    fn test_blank_sponsor_pairs_skipped() {
        let sponsors = static_sponsors();
        assert!(!sponsors.is_empty());
        assert!(sponsors.iter().all(|s| !s.is_blank()));
    }

    #[test]
    fn test_bundled_layout_has_sponsor_pairs() {
        let blocks = build_layout(&static_entourage(), &static_sponsors());
        assert!(blocks
            .iter()
            .any(|b| matches!(b, CategoryBlock::Pair { title, .. } if title == CANDLE_SPONSORS)));
        assert!(blocks.iter().any(|b| b.heading() == "Principal Sponsors"));
    }
}
