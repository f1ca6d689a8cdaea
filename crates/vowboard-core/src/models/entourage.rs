use serde::{Deserialize, Serialize};

use super::de::lenient_text;

/// One row of the entourage sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntourageMember {
    #[serde(rename = "Name", default, deserialize_with = "lenient_text")]
    pub name: String,
    #[serde(rename = "RoleCategory", default, deserialize_with = "lenient_text")]
    pub role_category: String,
    #[serde(rename = "RoleTitle", default, deserialize_with = "lenient_text")]
    pub role_title: String,
    #[serde(rename = "Email", default, deserialize_with = "lenient_text")]
    pub email: String,
}

impl EntourageMember {
    pub fn new(name: &str, role_title: &str, role_category: &str) -> Self {
        Self {
            name: name.to_string(),
            role_category: role_category.to_string(),
            role_title: role_title.to_string(),
            email: String::new(),
        }
    }

    /// Category name as it should be grouped; None for members that are
    /// never rendered (blank or "Other").
    pub fn category(&self) -> Option<&str> {
        let category = self.role_category.trim();
        if category.is_empty() || category == "Other" {
            None
        } else {
            Some(category)
        }
    }

    pub fn role_kind(&self) -> RoleKind {
        RoleKind::from_title(&self.role_title)
    }
}

/// Principal sponsor couple. Either side may be blank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrincipalSponsor {
    #[serde(rename = "MalePrincipalSponsor", default, deserialize_with = "lenient_text")]
    pub male: String,
    #[serde(rename = "FemalePrincipalSponsor", default, deserialize_with = "lenient_text")]
    pub female: String,
}

impl PrincipalSponsor {
    pub fn new(male: &str, female: &str) -> Self {
        Self {
            male: male.to_string(),
            female: female.to_string(),
        }
    }

    pub fn is_blank(&self) -> bool {
        self.male.trim().is_empty() && self.female.trim().is_empty()
    }
}

/// Which half of the couple a member stands with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Groom,
    Bride,
}

/// Parent role, used to put fathers ahead of mothers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParentRole {
    Father,
    Mother,
}

/// Positional role of a member within a paired layout.
///
/// The sheet only carries a free-text title, so both parts are derived by
/// case-insensitive keyword matching on it. A title can carry both
/// ("Father of the Groom"). Titles without a keyword leave the part unset
/// and the member keeps its original position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleKind {
    pub side: Option<Side>,
    pub parent: Option<ParentRole>,
}

impl RoleKind {
    pub fn from_title(title: &str) -> Self {
        let lower = title.to_lowercase();
        let side = if lower.contains("groom") {
            Some(Side::Groom)
        } else if lower.contains("bride") {
            Some(Side::Bride)
        } else {
            None
        };
        let parent = if lower.contains("father") {
            Some(ParentRole::Father)
        } else if lower.contains("mother") {
            Some(ParentRole::Mother)
        } else {
            None
        };
        Self { side, parent }
    }

    pub fn is_father(&self) -> bool {
        self.parent == Some(ParentRole::Father)
    }
}
