//! End to end: snapshot JSON on disk, through the pipeline, patch JSON out.

use camino::Utf8PathBuf;
use pretty_assertions::assert_eq;
use refdisabler_core::adapters::{read_snapshot, write_patch, SnapshotLoadOrder};
use refdisabler_core::pipeline::run_patcher;
use refdisabler_core::settings::PatcherSettings;
use refdisabler_core::VanillaSet;
use refdisabler_types::{PatchDocument, ToolInfo, schema};
use tempfile::TempDir;

const SNAPSHOT: &str = r#"{
  "schema": "refdisabler.loadorder.v1",
  "mods": [
    {
      "key": "Skyrim.esm",
      "records": [
        {
          "form_key": "000D45:Skyrim.esm",
          "kind": "object",
          "placement": { "position": { "x": 1.0, "y": 2.0, "z": 3.0 } },
          "initially_disabled": true
        }
      ]
    },
    {
      "key": "Clutter.esp",
      "records": [
        {
          "form_key": "000801:Clutter.esp",
          "kind": "object",
          "editor_id": "BrokenCartRef",
          "placement": { "position": { "x": 10.0, "y": 20.0, "z": 30.0 } },
          "initially_disabled": true
        },
        {
          "form_key": "000802:Clutter.esp",
          "kind": "npc",
          "placement": { "position": { "x": 0.0, "y": 0.0, "z": 0.0 } },
          "initially_disabled": true,
          "scripts": ["TrapTrigger"]
        }
      ]
    }
  ]
}"#;

#[test]
fn snapshot_to_patch_document() {
    let temp = TempDir::new().expect("temp dir");
    let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).expect("utf8");

    let snapshot_path = root.join("loadorder.json");
    std::fs::write(&snapshot_path, SNAPSHOT).expect("write snapshot");

    let snapshot = read_snapshot(&snapshot_path).expect("read");
    let host = SnapshotLoadOrder::from_snapshot(snapshot).expect("index");

    let vanilla = VanillaSet::skyrim_se();
    let outcome = run_patcher(&PatcherSettings::default(), &vanilla, &host).expect("run");

    // Only the unscripted non-vanilla record gets patched.
    assert_eq!(outcome.summary.objects, 1);
    assert_eq!(outcome.summary.npcs, 0);
    assert_eq!(outcome.summary.total, 1);

    let out_path = root.join("patch.json");
    let tool = ToolInfo {
        name: "refdisabler".to_string(),
        version: None,
    };
    write_patch(&out_path, &outcome.patch, tool).expect("write patch");

    let doc: PatchDocument =
        serde_json::from_str(&std::fs::read_to_string(&out_path).expect("read")).expect("parse");
    assert_eq!(doc.schema, schema::PATCH_V1);
    assert_eq!(doc.records.len(), 1);

    let record = &doc.records[0];
    assert_eq!(record.form_key.id, 0x801);
    assert!(record.initially_disabled);
    let parent = record.enable_parent.as_ref().expect("parent");
    assert_eq!(parent.reference.id, 0x000014);
    assert!(parent.opposite_of_parent);
    assert_eq!(record.placement.expect("placement").position.z, -30000.0);
}
