//! Embeddable core for the reference disabler.
//!
//! Provides a clap-free entry point suitable for linking into a host
//! pipeline or other binary.
//!
//! # Ports and adapters
//!
//! The domain consumes the load order through the port traits re-exported
//! here ([`LoadOrderView`], [`LinkCache`]); the [`adapters`] module provides
//! the snapshot-backed implementation plus the read/write helpers for the
//! host hand-off documents.
//!
//! # Entry point
//!
//! - [`run_patcher`](pipeline::run_patcher) — run both passes, return the
//!   patch and counters.

pub mod adapters;
pub mod pipeline;
pub mod settings;

// Re-export the domain surface so embedders don't need refdisabler-domain
// directly.
pub use refdisabler_domain::{
    DisableOptions, LinkCache, LoadOrderView, PatchMod, RunSummary, VanillaSet, WinningRef,
};
