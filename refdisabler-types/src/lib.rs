//! Shared DTOs (schemas-as-code) for the refdisabler workspace.
//!
//! # Design constraints
//! - These types are intended to be serialized to disk.
//! - Readers are tolerant: unknown fields are ignored, optional fields may
//!   be absent.
//! - Prefer adding optional fields over changing semantics.

pub mod keys;
pub mod record;
pub mod snapshot;

pub use keys::{FormKey, FormKeyParseError, ModKey};
pub use record::{EnableParent, PlacedKind, PlacedRecord, Placement, Position};
pub use snapshot::{LoadOrderSnapshot, ModEntry, PatchDocument, ToolInfo};

/// Schema identifiers.
pub mod schema {
    pub const LOADORDER_V1: &str = "refdisabler.loadorder.v1";
    pub const PATCH_V1: &str = "refdisabler.patch.v1";
}
