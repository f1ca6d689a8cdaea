//! Terminal UI module using ratatui.
//!
//! - `render`: frame layout, title bar, tabs, status bar and overlays
//! - `input`: keyboard event handling
//! - `styles`: color palette and text styles
//! - `tabs`: per-tab content (guest book, entourage, gallery)

pub mod input;
pub mod render;
pub mod styles;
pub mod tabs;
