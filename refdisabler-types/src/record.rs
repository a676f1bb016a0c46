use crate::keys::FormKey;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A point (or Euler rotation) in world units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Position {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// Placement data of a placed reference (the DATA subrecord).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub position: Position,

    #[serde(default)]
    pub rotation: Position,
}

impl Placement {
    pub fn at(position: Position) -> Self {
        Self {
            position,
            rotation: Position::default(),
        }
    }
}

/// Enable-parent link (the XESP subrecord): ties this reference's enabled
/// state to another reference, optionally inverted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnableParent {
    pub reference: FormKey,

    /// Set-enable-state-to-opposite-of-parent flag.
    #[serde(default)]
    pub opposite_of_parent: bool,

    #[serde(default)]
    pub pop_in: bool,
}

/// The record-kind categories swept by the patcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlacedKind {
    Object,
    Npc,
    Hazard,
}

impl PlacedKind {
    pub const ALL: [PlacedKind; 3] = [PlacedKind::Object, PlacedKind::Npc, PlacedKind::Hazard];

    pub fn plural(self) -> &'static str {
        match self {
            PlacedKind::Object => "objects",
            PlacedKind::Npc => "NPCs",
            PlacedKind::Hazard => "hazards",
        }
    }
}

impl fmt::Display for PlacedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PlacedKind::Object => "object",
            PlacedKind::Npc => "npc",
            PlacedKind::Hazard => "hazard",
        };
        f.write_str(name)
    }
}

/// A placed object/NPC/hazard instance in a worldspace cell.
///
/// Mirrors the subset of the host's placed-reference record the disable
/// rules look at. Tolerant reader: every field except `form_key` and `kind`
/// may be absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedRecord {
    pub form_key: FormKey,
    pub kind: PlacedKind,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub editor_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placement: Option<Placement>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_parent: Option<EnableParent>,

    /// The "initially disabled" major record flag.
    #[serde(default)]
    pub initially_disabled: bool,

    /// The "deleted" major record flag.
    #[serde(default)]
    pub deleted: bool,

    /// Names of scripts attached through the VM adapter.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub scripts: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub linked_references: Vec<FormKey>,
}

impl PlacedRecord {
    pub fn new(form_key: FormKey, kind: PlacedKind) -> Self {
        Self {
            form_key,
            kind,
            editor_id: None,
            placement: None,
            enable_parent: None,
            initially_disabled: false,
            deleted: false,
            scripts: Vec::new(),
            linked_references: Vec::new(),
        }
    }
}
