//! Core domain models and types for Modshelf
//!
//! This crate contains the data structures, enums, and domain logic that
//! represent creators, mods, versions, and slugs in the Modshelf catalog.

pub mod model;
pub mod slot;
pub mod slug;
pub mod types;

// Re-exports for convenience
pub use model::{Creator, Mod, ModDetail, ModSummary, ModVersion};
pub use slot::Slot;
pub use slug::{derive_base_slug, is_valid_slug, resolve_unique_slug};
pub use types::{CreatorId, ModId, VersionId};
