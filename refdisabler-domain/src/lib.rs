//! Decision logic for the reference disabler: which placed overrides need to
//! be rewritten, and the two-pass sweep that applies the rules.
//!
//! This crate owns *what* gets patched and why. It never touches plugin
//! files; load-order layering and winning-override resolution arrive through
//! the port traits in [`ports`], so the whole crate can be exercised against
//! in-memory hosts.

mod evaluator;
mod patch;
mod ports;
mod vanilla;
mod walker;

pub use evaluator::{DISABLED_Z, DisableEvaluator, DisableOptions};
pub use patch::PatchMod;
pub use ports::{LinkCache, LoadOrderView, WinningRef};
pub use vanilla::VanillaSet;
pub use walker::{RunSummary, Walker};
