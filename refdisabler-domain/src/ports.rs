//! Port traits abstracting the host's load order and resolution cache.
//!
//! The host owns layering ("winning override" semantics); the domain only
//! consumes it. Errors surfacing from these traits are fatal to the run and
//! propagate unchanged.

use crate::vanilla::VanillaSet;
use refdisabler_types::{FormKey, ModKey, PlacedKind, PlacedRecord};

/// One winning override together with the plugin file that owns it.
#[derive(Debug, Clone, Copy)]
pub struct WinningRef<'a> {
    pub mod_key: &'a ModKey,
    pub record: &'a PlacedRecord,
}

/// Winning-override resolution across the whole load order.
pub trait LinkCache {
    /// The record that takes effect for `key` after layering all files, if
    /// any file defines it.
    fn resolve(&self, key: &FormKey) -> anyhow::Result<Option<&PlacedRecord>>;
}

/// Enumeration of winning overrides per record kind, in the host's defined
/// priority order.
pub trait LoadOrderView {
    fn winning_overrides(&self, kind: PlacedKind) -> anyhow::Result<Vec<WinningRef<'_>>>;

    /// Winning overrides as if the load order contained only the files in
    /// `subset`: for each form key, the highest-priority version owned by a
    /// subset member. Form keys no subset member defines are absent, even
    /// when another file overrides them.
    fn winning_overrides_within(
        &self,
        kind: PlacedKind,
        subset: &VanillaSet,
    ) -> anyhow::Result<Vec<WinningRef<'_>>>;
}
