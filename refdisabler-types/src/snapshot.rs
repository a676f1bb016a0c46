//! Wire documents exchanged with the host pipeline.
//!
//! The host serializes its load order into a [`LoadOrderSnapshot`] before the
//! core runs, and takes a [`PatchDocument`] back. Neither document is a
//! plugin codec; binary (de)serialization stays on the host's side.

use crate::keys::ModKey;
use crate::record::PlacedRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Host-provided dump of the full load order, lowest priority first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadOrderSnapshot {
    /// Schema identifier, e.g. `refdisabler.loadorder.v1`.
    pub schema: String,

    #[serde(default)]
    pub mods: Vec<ModEntry>,
}

/// One plugin file and the placed records it defines or overrides.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModEntry {
    pub key: ModKey,

    #[serde(default)]
    pub records: Vec<PlacedRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInfo {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

/// The patch handed back to the host: only mutated records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatchDocument {
    /// Schema identifier, e.g. `refdisabler.patch.v1`.
    pub schema: String,

    pub tool: ToolInfo,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_at: Option<DateTime<Utc>>,

    /// Plugin name the host should write the patch as.
    pub mod_key: ModKey,

    #[serde(default)]
    pub records: Vec<PlacedRecord>,
}
