pub mod entourage;
pub mod gallery;
pub mod guests;
