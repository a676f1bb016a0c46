//! Snapshot-backed implementation of the domain port traits, plus the
//! read/write helpers for the host hand-off documents.

use anyhow::Context;
use camino::Utf8Path;
use chrono::Utc;
use fs_err as fs;
use refdisabler_domain::{LinkCache, LoadOrderView, PatchMod, VanillaSet, WinningRef};
use refdisabler_types::{
    FormKey, LoadOrderSnapshot, ModKey, PatchDocument, PlacedKind, PlacedRecord, ToolInfo, schema,
};
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("unsupported load order schema '{found}' (expected {expected})")]
    UnsupportedSchema {
        found: String,
        expected: &'static str,
    },
}

#[derive(Debug)]
struct Winning {
    mod_key: ModKey,
    record: PlacedRecord,
}

/// Load order materialized from a host snapshot.
///
/// Mods arrive lowest priority first. The full override chain is kept per
/// form key, so the winner can be computed both across the whole load order
/// (the last link) and within a subset of files (the last link a subset
/// member owns).
#[derive(Debug)]
pub struct SnapshotLoadOrder {
    chains: BTreeMap<FormKey, Vec<Winning>>,
}

impl SnapshotLoadOrder {
    pub fn from_snapshot(snapshot: LoadOrderSnapshot) -> anyhow::Result<Self> {
        if snapshot.schema != schema::LOADORDER_V1 {
            return Err(SnapshotError::UnsupportedSchema {
                found: snapshot.schema,
                expected: schema::LOADORDER_V1,
            }
            .into());
        }

        let mut chains: BTreeMap<FormKey, Vec<Winning>> = BTreeMap::new();
        for entry in snapshot.mods {
            for record in entry.records {
                chains.entry(record.form_key.clone()).or_default().push(Winning {
                    mod_key: entry.key.clone(),
                    record,
                });
            }
        }
        debug!(records = chains.len(), "indexed override chains");
        Ok(Self { chains })
    }

    pub fn len(&self) -> usize {
        self.chains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chains.is_empty()
    }
}

impl LinkCache for SnapshotLoadOrder {
    fn resolve(&self, key: &FormKey) -> anyhow::Result<Option<&PlacedRecord>> {
        Ok(self
            .chains
            .get(key)
            .and_then(|chain| chain.last())
            .map(|w| &w.record))
    }
}

impl LoadOrderView for SnapshotLoadOrder {
    fn winning_overrides(&self, kind: PlacedKind) -> anyhow::Result<Vec<WinningRef<'_>>> {
        Ok(self
            .chains
            .values()
            .filter_map(|chain| chain.last())
            .filter(|w| w.record.kind == kind)
            .map(|w| WinningRef {
                mod_key: &w.mod_key,
                record: &w.record,
            })
            .collect())
    }

    fn winning_overrides_within(
        &self,
        kind: PlacedKind,
        subset: &VanillaSet,
    ) -> anyhow::Result<Vec<WinningRef<'_>>> {
        Ok(self
            .chains
            .values()
            .filter_map(|chain| chain.iter().rev().find(|w| subset.contains(&w.mod_key)))
            .filter(|w| w.record.kind == kind)
            .map(|w| WinningRef {
                mod_key: &w.mod_key,
                record: &w.record,
            })
            .collect())
    }
}

pub fn read_snapshot(path: &Utf8Path) -> anyhow::Result<LoadOrderSnapshot> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read load order snapshot {}", path))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("parse load order snapshot {}", path))
}

/// Build the hand-off document for the host, records sorted by form key.
pub fn patch_document(patch: &PatchMod, tool: ToolInfo) -> PatchDocument {
    PatchDocument {
        schema: schema::PATCH_V1.to_string(),
        tool,
        generated_at: Some(Utc::now()),
        mod_key: patch.mod_key().clone(),
        records: patch.records().cloned().collect(),
    }
}

pub fn write_patch(path: &Utf8Path, patch: &PatchMod, tool: ToolInfo) -> anyhow::Result<()> {
    let doc = patch_document(patch, tool);
    let json = serde_json::to_string_pretty(&doc).context("serialize patch")?;

    if let Some(parent) = path.parent()
        && !parent.as_str().is_empty()
    {
        fs::create_dir_all(parent).with_context(|| format!("create parent dir for {}", path))?;
    }
    fs::write(path, json).with_context(|| format!("write {}", path))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use refdisabler_types::{ModEntry, Placement, Position};
    use tempfile::TempDir;

    fn record(id: u32, mod_key: &str, kind: PlacedKind, z: f32) -> PlacedRecord {
        let mut record = PlacedRecord::new(FormKey::new(id, mod_key), kind);
        record.placement = Some(Placement::at(Position::new(0.0, 0.0, z)));
        record
    }

    fn snapshot(mods: Vec<(&str, Vec<PlacedRecord>)>) -> LoadOrderSnapshot {
        LoadOrderSnapshot {
            schema: schema::LOADORDER_V1.to_string(),
            mods: mods
                .into_iter()
                .map(|(name, records)| ModEntry {
                    key: ModKey::new(name),
                    records,
                })
                .collect(),
        }
    }

    #[test]
    fn rejects_unknown_schema() {
        let result = SnapshotLoadOrder::from_snapshot(LoadOrderSnapshot {
            schema: "something.else.v9".to_string(),
            mods: vec![],
        });
        let err = result.expect_err("schema mismatch");
        assert!(err.to_string().contains("something.else.v9"));
    }

    #[test]
    fn later_mod_wins_for_the_same_form_key() {
        let base = record(0x800, "Base.esp", PlacedKind::Object, 10.0);
        let winner = record(0x800, "Base.esp", PlacedKind::Object, 99.0);

        let host = SnapshotLoadOrder::from_snapshot(snapshot(vec![
            ("Base.esp", vec![base]),
            ("Override.esp", vec![winner.clone()]),
        ]))
        .expect("build");

        let resolved = host
            .resolve(&winner.form_key)
            .expect("resolve")
            .expect("present");
        assert_eq!(resolved.placement.expect("placement").position.z, 99.0);

        let overrides = host.winning_overrides(PlacedKind::Object).expect("iter");
        assert_eq!(overrides.len(), 1);
        // The winning context is owned by the overriding mod.
        assert_eq!(overrides[0].mod_key, &ModKey::new("Override.esp"));
    }

    #[test]
    fn winning_overrides_filter_by_kind() {
        let host = SnapshotLoadOrder::from_snapshot(snapshot(vec![(
            "Mod.esp",
            vec![
                record(0x1, "Mod.esp", PlacedKind::Object, 0.0),
                record(0x2, "Mod.esp", PlacedKind::Npc, 0.0),
                record(0x3, "Mod.esp", PlacedKind::Npc, 0.0),
                record(0x4, "Mod.esp", PlacedKind::Hazard, 0.0),
            ],
        )]))
        .expect("build");

        assert_eq!(host.winning_overrides(PlacedKind::Object).unwrap().len(), 1);
        assert_eq!(host.winning_overrides(PlacedKind::Npc).unwrap().len(), 2);
        assert_eq!(host.winning_overrides(PlacedKind::Hazard).unwrap().len(), 1);
        assert_eq!(host.len(), 4);
    }

    #[test]
    fn subset_winner_ignores_files_outside_the_subset() {
        // Skyrim.esm defines, Update.esm overrides, Mod.esp wins overall.
        // Within the vanilla set the Update.esm version wins; a record only
        // Mod.esp defines is absent entirely.
        let host = SnapshotLoadOrder::from_snapshot(snapshot(vec![
            (
                "Skyrim.esm",
                vec![record(0x100, "Skyrim.esm", PlacedKind::Object, 1.0)],
            ),
            (
                "Update.esm",
                vec![record(0x100, "Skyrim.esm", PlacedKind::Object, 2.0)],
            ),
            (
                "Mod.esp",
                vec![
                    record(0x100, "Skyrim.esm", PlacedKind::Object, 3.0),
                    record(0x200, "Mod.esp", PlacedKind::Object, 4.0),
                ],
            ),
        ]))
        .expect("build");

        let vanilla = VanillaSet::skyrim_se();
        let within = host
            .winning_overrides_within(PlacedKind::Object, &vanilla)
            .expect("iter");
        assert_eq!(within.len(), 1);
        assert_eq!(within[0].mod_key, &ModKey::new("Update.esm"));
        assert_eq!(within[0].record.placement.expect("placement").position.z, 2.0);

        let overall = host.winning_overrides(PlacedKind::Object).expect("iter");
        assert_eq!(overall.len(), 2);
    }

    #[test]
    fn resolve_misses_return_none() {
        let host = SnapshotLoadOrder::from_snapshot(snapshot(vec![])).expect("build");
        assert!(host.is_empty());
        let missing = host
            .resolve(&FormKey::new(0xDEAD, "Nope.esp"))
            .expect("resolve");
        assert!(missing.is_none());
    }

    #[test]
    fn read_snapshot_round_trips_through_disk() {
        let temp = TempDir::new().expect("temp dir");
        let path = Utf8PathBuf::from_path_buf(temp.path().join("loadorder.json")).expect("utf8");

        let original = snapshot(vec![(
            "Mod.esp",
            vec![record(0x800, "Mod.esp", PlacedKind::Object, 4.0)],
        )]);
        std::fs::write(&path, serde_json::to_string(&original).expect("serialize"))
            .expect("write");

        let loaded = read_snapshot(&path).expect("read");
        assert_eq!(loaded.mods.len(), 1);
        assert_eq!(loaded.mods[0].records[0].form_key.id, 0x800);

        assert!(read_snapshot(&path.with_file_name("missing.json")).is_err());
    }

    #[test]
    fn write_patch_emits_a_schema_tagged_document() {
        let temp = TempDir::new().expect("temp dir");
        let path =
            Utf8PathBuf::from_path_buf(temp.path().join("out").join("patch.json")).expect("utf8");

        let mut patch = PatchMod::default();
        patch.get_or_add_override(&record(0x900, "Mod.esp", PlacedKind::Npc, 1.0));
        patch.get_or_add_override(&record(0x100, "Mod.esp", PlacedKind::Npc, 2.0));

        let tool = ToolInfo {
            name: "refdisabler".to_string(),
            version: Some("0.0.0".to_string()),
        };
        write_patch(&path, &patch, tool).expect("write");

        let doc: PatchDocument =
            serde_json::from_str(&std::fs::read_to_string(&path).expect("read")).expect("parse");
        assert_eq!(doc.schema, schema::PATCH_V1);
        assert_eq!(doc.mod_key, ModKey::new("SynthesisDisabler.esp"));
        assert!(doc.generated_at.is_some());

        let ids: Vec<u32> = doc.records.iter().map(|r| r.form_key.id).collect();
        assert_eq!(ids, vec![0x100, 0x900]);
    }
}
