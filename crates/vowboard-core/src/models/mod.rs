//! Data models for the wedding site API.
//!
//! - `GuestRecord`, `Companion`, `GuestStatus`: RSVP rows from the guest sheet
//! - `EntourageMember`, `PrincipalSponsor`: wedding party rows
//! - `RoleKind`: positional role derived from a member's title

mod de;
pub mod entourage;
pub mod guest;

pub use entourage::{EntourageMember, ParentRole, PrincipalSponsor, RoleKind, Side};
pub use guest::{Companion, GuestId, GuestRecord, GuestStatus};
