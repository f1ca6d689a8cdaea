//! Photo gallery directory scanning.
//!
//! Images live under `{public}/mobile-background` and
//! `{public}/desktop-background`. Files are picked up on every scan, so new
//! photos appear without a restart.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

pub const MOBILE_DIR: &str = "mobile-background";
pub const DESKTOP_DIR: &str = "desktop-background";

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "gif"];

/// How images within a directory are ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GallerySort {
    /// By the number a filename starts with (`12.jpg` is 12); other names count as 0
    #[default]
    Numeric,
    /// Plain filename order
    Lexicographic,
}

impl GallerySort {
    pub fn toggle(self) -> Self {
        match self {
            GallerySort::Numeric => GallerySort::Lexicographic,
            GallerySort::Lexicographic => GallerySort::Numeric,
        }
    }
}

impl fmt::Display for GallerySort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GallerySort::Numeric => write!(f, "numeric"),
            GallerySort::Lexicographic => write!(f, "name"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageCategory {
    Mobile,
    Desktop,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryImage {
    /// Site-relative path, e.g. `/mobile-background/3.jpg`
    pub src: String,
    pub category: ImageCategory,
}

impl GalleryImage {
    pub fn file_name(&self) -> &str {
        self.src.rsplit('/').next().unwrap_or(&self.src)
    }
}

/// Whether a filename carries one of the gallery's image extensions
pub fn is_image(file_name: &str) -> bool {
    match file_name.rsplit_once('.') {
        Some((_, ext)) => IMAGE_EXTENSIONS
            .iter()
            .any(|allowed| ext.eq_ignore_ascii_case(allowed)),
        None => false,
    }
}

/// Leading number of a filename when it's all digits up to the first dot,
/// else 0. `"12.jpg"` → 12, `"12.edit.png"` → 12, `"img12.jpg"` → 0.
pub fn numeric_key(file_name: &str) -> u64 {
    let Some((head, _)) = file_name.split_once('.') else {
        return 0;
    };
    if head.is_empty() || !head.bytes().all(|b| b.is_ascii_digit()) {
        return 0;
    }
    head.parse().unwrap_or(0)
}

/// Image filenames in one directory, sorted. An unreadable or missing
/// directory yields an empty list.
pub fn scan_dir(dir: &Path, sort: GallerySort) -> Vec<String> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            warn!(dir = %dir.display(), error = %e, "Could not read gallery directory");
            return Vec::new();
        }
    };

    let mut names: Vec<String> = entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().map(|t| t.is_file()).unwrap_or(false))
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|name| is_image(name))
        .collect();

    // Directory order is platform dependent; start from name order so numeric ties are stable
    names.sort();
    if sort == GallerySort::Numeric {
        names.sort_by_key(|name| numeric_key(name));
    }

    debug!(dir = %dir.display(), count = names.len(), "Scanned gallery directory");
    names
}

/// Every gallery image: mobile backgrounds first, then desktop.
pub fn list_images(public_dir: &Path, sort: GallerySort) -> Vec<GalleryImage> {
    [(MOBILE_DIR, ImageCategory::Mobile), (DESKTOP_DIR, ImageCategory::Desktop)]
        .into_iter()
        .flat_map(|(dir, category)| {
            scan_dir(&public_dir.join(dir), sort)
                .into_iter()
                .map(move |name| GalleryImage {
                    src: format!("/{}/{}", dir, name),
                    category,
                })
        })
        .collect()
}
