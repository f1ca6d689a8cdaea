//! Entourage grouping and pairing.
//!
//! Turns the flat entourage and sponsor sheets into an ordered list of
//! `CategoryBlock`s:
//!
//! 1. bucket members by role category (blank and "Other" are dropped)
//! 2. walk categories in the fixed display order, then any others
//! 3. for each category apply its merge rule from `rules::MERGE_RULES`,
//!    or the default layout

pub mod block;
pub mod category;
pub mod rules;

pub use block::{pair_rows, CategoryBlock, Row};
pub use category::Buckets;
pub use rules::{MergeRule, MERGE_RULES};

use tracing::{debug, warn};

use crate::models::{EntourageMember, PrincipalSponsor, Side};
use category::{PAIRED_SPONSORS, SINGLE_COLUMN};
use rules::{ColumnOrder, PRINCIPAL_SPONSORS};

/// Build the entourage layout.
pub fn build_layout(members: &[EntourageMember], sponsors: &[PrincipalSponsor]) -> Vec<CategoryBlock> {
    let buckets = Buckets::group(members);
    let mut blocks = Vec::new();

    for category in buckets.display_order() {
        if rules::is_suppressed(category) {
            continue;
        }
        let bucket = buckets.get(category);

        match rules::rule_for(category) {
            Some(MergeRule::Couple) => {
                if !bucket.is_empty() {
                    blocks.push(couple_block(category, bucket));
                }
            }
            Some(&MergeRule::Columns {
                left,
                right,
                left_title,
                right_title,
                order,
                with_sponsors,
            }) => {
                let left_members = column(&buckets, left, order);
                let right_members = column(&buckets, right, order);
                if !left_members.is_empty() || !right_members.is_empty() {
                    blocks.push(CategoryBlock::Dual {
                        title: None,
                        left_title: Some(column_title(&buckets, left, left_title)),
                        right_title: Some(column_title(&buckets, right, right_title)),
                        rows: pair_rows(left_members, right_members),
                    });
                }
                if with_sponsors {
                    if let Some(block) = sponsor_block(sponsors) {
                        blocks.push(block);
                    }
                }
            }
            Some(MergeRule::Labelled { label }) => {
                if !bucket.is_empty() {
                    blocks.push(CategoryBlock::Label {
                        title: label.to_string(),
                    });
                    blocks.push(default_block(category, bucket));
                }
            }
            None => {
                if !bucket.is_empty() {
                    blocks.push(default_block(category, bucket));
                }
            }
        }
    }

    debug!(
        members = members.len(),
        sponsors = sponsors.len(),
        blocks = blocks.len(),
        "Entourage layout built"
    );
    blocks
}

/// Concatenate a column's categories, ordered per the rule
fn column(buckets: &Buckets, categories: &[&str], order: ColumnOrder) -> Vec<EntourageMember> {
    let mut members: Vec<EntourageMember> = categories
        .iter()
        .flat_map(|c| buckets.get(c).iter().cloned())
        .collect();
    if order == ColumnOrder::FatherFirst {
        // Stable: fathers move up, everyone else keeps their place
        members.sort_by_key(|m| !m.role_kind().is_father());
    }
    members
}

fn column_title(buckets: &Buckets, categories: &[&str], fixed: Option<&str>) -> String {
    if let Some(title) = fixed {
        return title.to_string();
    }
    categories
        .iter()
        .find(|c| !buckets.get(c).is_empty())
        .or_else(|| categories.first())
        .map(|c| c.to_string())
        .unwrap_or_default()
}

/// Groom on the left (right-aligned), bride on the right (left-aligned).
fn couple_block(category: &str, members: &[EntourageMember]) -> CategoryBlock {
    let mut groom = None;
    let mut bride = None;

    for member in members {
        match member.role_kind().side {
            Some(Side::Groom) if groom.is_none() => groom = Some(member.clone()),
            Some(Side::Bride) if bride.is_none() => bride = Some(member.clone()),
            _ => {
                warn!(
                    name = %member.name,
                    title = %member.role_title,
                    "Couple member is neither an unplaced groom nor bride, not shown"
                );
            }
        }
    }

    CategoryBlock::Pair {
        title: category.to_string(),
        left: groom,
        right: bride,
    }
}

/// Male sponsors on the left, female on the right, row by row.
fn sponsor_block(sponsors: &[PrincipalSponsor]) -> Option<CategoryBlock> {
    let rows: Vec<Row> = sponsors
        .iter()
        .filter(|s| !s.is_blank())
        .map(|s| Row {
            left: sponsor_cell(&s.male),
            right: sponsor_cell(&s.female),
        })
        .collect();

    if rows.is_empty() {
        return None;
    }
    Some(CategoryBlock::Dual {
        title: Some(PRINCIPAL_SPONSORS.to_string()),
        left_title: None,
        right_title: None,
        rows,
    })
}

fn sponsor_cell(name: &str) -> Option<EntourageMember> {
    let name = name.trim();
    if name.is_empty() {
        None
    } else {
        Some(EntourageMember::new(name, "", ""))
    }
}

/// Layout for a category without a merge rule.
///
/// - paired sponsor sections with exactly two members meet at the center
/// - single-column categories and anything with two or fewer members is
///   one centered list
/// - everything else is split at the midpoint into two columns
fn default_block(category: &str, members: &[EntourageMember]) -> CategoryBlock {
    if PAIRED_SPONSORS.contains(&category) && members.len() == 2 {
        return CategoryBlock::Pair {
            title: category.to_string(),
            left: Some(members[0].clone()),
            right: Some(members[1].clone()),
        };
    }

    if SINGLE_COLUMN.contains(&category) || members.len() <= 2 {
        return CategoryBlock::Single {
            title: category.to_string(),
            members: members.to_vec(),
        };
    }

    let half = members.len().div_ceil(2);
    let (left, right) = members.split_at(half);
    CategoryBlock::Dual {
        title: Some(category.to_string()),
        left_title: None,
        right_title: None,
        rows: pair_rows(left.to_vec(), right.to_vec()),
    }
}
