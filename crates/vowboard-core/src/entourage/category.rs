//! Role categories and bucketing.

use std::collections::HashMap;

use crate::models::EntourageMember;

pub const OFFICIATING_MINISTER: &str = "OFFICIATING MINISTER";
pub const THE_COUPLE: &str = "The Couple";
pub const PARENTS_OF_THE_GROOM: &str = "Parents of the Groom";
pub const PARENTS_OF_THE_BRIDE: &str = "Parents of the Bride";
pub const FAMILY_OF_THE_GROOM: &str = "Family of the Groom";
pub const FAMILY_OF_THE_BRIDE: &str = "Family of the Bride";
pub const MATRON_OF_HONOR: &str = "Matron of Honor";
pub const BEST_MAN: &str = "Best Man";
pub const MAID_OF_HONOR: &str = "Maid of Honor";
pub const CANDLE_SPONSORS: &str = "Candle Sponsors";
pub const VEIL_SPONSORS: &str = "Veil Sponsors";
pub const CORD_SPONSORS: &str = "Cord Sponsors";
pub const GROOMSMEN: &str = "Groomsmen";
pub const BRIDESMAIDS: &str = "Bridesmaids";
pub const LITTLE_GROOM: &str = "Little Groom";
pub const LITTLE_BRIDE: &str = "Little Bride";
pub const RING_BEARER: &str = "Ring Bearer";
pub const BIBLE_BEARER: &str = "Bible Bearer";
pub const COIN_BEARER: &str = "Coin Bearer";
pub const FLOWER_GIRLS: &str = "Flower Girls";
pub const PRESIDER: &str = "Presider";

/// Display precedence. Categories not listed follow in first-seen order.
pub const CATEGORY_ORDER: &[&str] = &[
    OFFICIATING_MINISTER,
    THE_COUPLE,
    PARENTS_OF_THE_GROOM,
    PARENTS_OF_THE_BRIDE,
    FAMILY_OF_THE_GROOM,
    FAMILY_OF_THE_BRIDE,
    MATRON_OF_HONOR,
    BEST_MAN,
    MAID_OF_HONOR,
    CANDLE_SPONSORS,
    VEIL_SPONSORS,
    CORD_SPONSORS,
    GROOMSMEN,
    BRIDESMAIDS,
    LITTLE_GROOM,
    LITTLE_BRIDE,
    RING_BEARER,
    BIBLE_BEARER,
    COIN_BEARER,
    FLOWER_GIRLS,
];

/// Categories always shown as one centered list, whatever their size.
pub const SINGLE_COLUMN: &[&str] = &[
    BEST_MAN,
    MAID_OF_HONOR,
    RING_BEARER,
    COIN_BEARER,
    BIBLE_BEARER,
    FLOWER_GIRLS,
    PRESIDER,
];

/// Sponsor sections whose two members meet at the center as a couple.
pub const PAIRED_SPONSORS: &[&str] = &[CANDLE_SPONSORS, CORD_SPONSORS, VEIL_SPONSORS];

/// Members grouped by category, remembering the order categories were
/// first seen in.
#[derive(Debug, Default)]
pub struct Buckets {
    order: Vec<String>,
    members: HashMap<String, Vec<EntourageMember>>,
}

impl Buckets {
    /// Partition members by category. Relative order within a category is
    /// preserved; blank and "Other" members are dropped.
    pub fn group(members: &[EntourageMember]) -> Self {
        let mut buckets = Self::default();
        for member in members {
            let Some(category) = member.category() else {
                continue;
            };
            match buckets.members.get_mut(category) {
                Some(list) => list.push(member.clone()),
                None => {
                    buckets.order.push(category.to_string());
                    buckets
                        .members
                        .insert(category.to_string(), vec![member.clone()]);
                }
            }
        }
        buckets
    }

    /// Members of a category, empty when the category was never seen
    pub fn get(&self, category: &str) -> &[EntourageMember] {
        self.members
            .get(category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Every category in display order: the fixed precedence list first
    /// (including categories with no members, so merge rules still get a
    /// chance to fire), then unlisted categories in first-seen order.
    pub fn display_order(&self) -> Vec<&str> {
        let mut order: Vec<&str> = CATEGORY_ORDER.to_vec();
        order.extend(
            self.order
                .iter()
                .map(String::as_str)
                .filter(|c| !CATEGORY_ORDER.contains(c)),
        );
        order
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(name: &str, category: &str) -> EntourageMember {
        EntourageMember::new(name, "", category)
    }

    #[test]
    fn test_group_preserves_order_and_drops_hidden() {
        let members = vec![
            member("A", BRIDESMAIDS),
            member("B", "Other"),
            member("C", GROOMSMEN),
            member("D", BRIDESMAIDS),
            member("E", ""),
        ];
        let buckets = Buckets::group(&members);
        let names: Vec<&str> = buckets.get(BRIDESMAIDS).iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["A", "D"]);
        assert_eq!(buckets.get(GROOMSMEN).len(), 1);
        assert!(buckets.get("Other").is_empty());
        assert!(buckets.get("").is_empty());
    }

    #[test]
    fn test_display_order_appends_unlisted_in_first_seen_order() {
        let members = vec![
            member("A", "Ushers"),
            member("B", BEST_MAN),
            member("C", "Readers"),
            member("D", "Ushers"),
        ];
        let buckets = Buckets::group(&members);
        let order = buckets.display_order();
        assert_eq!(order.len(), CATEGORY_ORDER.len() + 2);
        assert_eq!(order[0], OFFICIATING_MINISTER);
        assert_eq!(&order[CATEGORY_ORDER.len()..], &["Ushers", "Readers"]);
    }

    #[test]
    fn test_empty_buckets() {
        let buckets = Buckets::group(&[]);
        assert!(buckets.get(THE_COUPLE).is_empty());
        assert_eq!(buckets.display_order().len(), CATEGORY_ORDER.len());
    }
}
