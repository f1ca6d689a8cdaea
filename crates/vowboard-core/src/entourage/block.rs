use serde::{Deserialize, Serialize};

use crate::models::EntourageMember;

/// One row of a two-column layout. A `None` side renders as a blank cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    pub left: Option<EntourageMember>,
    pub right: Option<EntourageMember>,
}

/// A renderable unit of the entourage section.
///
/// The renderer draws these in order with a divider before every block
/// except the first. In two-column blocks the left column is right-aligned
/// and the right column left-aligned, so pairs meet at the center.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CategoryBlock {
    /// A heading with no names under it
    Label { title: String },
    /// One centered vertical list
    Single {
        title: String,
        members: Vec<EntourageMember>,
    },
    /// Exactly one row of two names meeting at the center
    Pair {
        title: String,
        left: Option<EntourageMember>,
        right: Option<EntourageMember>,
    },
    /// Row-paired columns, under either one centered title or a title per column
    Dual {
        title: Option<String>,
        left_title: Option<String>,
        right_title: Option<String>,
        rows: Vec<Row>,
    },
}

impl CategoryBlock {
    /// Every member shown by this block, left before right, top to bottom
    pub fn members(&self) -> Vec<&EntourageMember> {
        match self {
            CategoryBlock::Label { .. } => vec![],
            CategoryBlock::Single { members, .. } => members.iter().collect(),
            CategoryBlock::Pair { left, right, .. } => left.iter().chain(right.iter()).collect(),
            CategoryBlock::Dual { rows, .. } => rows
                .iter()
                .flat_map(|row| row.left.iter().chain(row.right.iter()))
                .collect(),
        }
    }

    /// Headline for lists and logs
    pub fn heading(&self) -> String {
        match self {
            CategoryBlock::Label { title }
            | CategoryBlock::Single { title, .. }
            | CategoryBlock::Pair { title, .. } => title.clone(),
            CategoryBlock::Dual {
                title,
                left_title,
                right_title,
                ..
            } => match (title, left_title, right_title) {
                (Some(title), _, _) => title.clone(),
                (None, Some(l), Some(r)) => format!("{} / {}", l, r),
                (None, Some(t), None) | (None, None, Some(t)) => t.clone(),
                (None, None, None) => String::new(),
            },
        }
    }
}

/// Zip two columns into rows, padding the shorter one with blanks.
pub fn pair_rows(left: Vec<EntourageMember>, right: Vec<EntourageMember>) -> Vec<Row> {
    let len = left.len().max(right.len());
    let mut left = left.into_iter();
    let mut right = right.into_iter();
    (0..len)
        .map(|_| Row {
            left: left.next(),
            right: right.next(),
        })
        .collect()
}
