//! Host settings (`settings.json`) for the patcher.
//!
//! Field names mirror the host's settings file, so they are camelCase on
//! the wire. The reader is tolerant: missing fields default, unknown fields
//! are ignored, and a missing file means defaults.

use anyhow::Context;
use camino::Utf8Path;
use fs_err as fs;
use serde::{Deserialize, Serialize};

/// The settings file name the host conventionally uses.
pub const SETTINGS_FILE_NAME: &str = "settings.json";

/// User-facing toggles, loaded before the core runs.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PatcherSettings {
    /// Also properly disable records carrying the deleted flag.
    pub fix_deleted: bool,

    /// Emit verbose diagnostics for skipped linked/scripted records.
    pub debug: bool,
}

pub fn parse_settings(contents: &str) -> anyhow::Result<PatcherSettings> {
    serde_json::from_str(contents).context("invalid settings JSON")
}

pub fn load_settings(path: &Utf8Path) -> anyhow::Result<PatcherSettings> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read settings file {}", path))?;
    parse_settings(&contents).with_context(|| format!("parse settings file {}", path))
}

/// Load from `path`, or fall back to defaults when the file does not exist.
pub fn load_or_default(path: &Utf8Path) -> anyhow::Result<PatcherSettings> {
    if path.exists() {
        load_settings(path)
    } else {
        Ok(PatcherSettings::default())
    }
}
