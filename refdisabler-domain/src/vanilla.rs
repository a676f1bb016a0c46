use refdisabler_types::ModKey;
use std::collections::BTreeSet;

/// Base-game plugin files exempt from all processing.
///
/// Immutable once constructed; build it at startup and share it by
/// reference.
#[derive(Debug, Clone)]
pub struct VanillaSet {
    keys: BTreeSet<ModKey>,
}

impl VanillaSet {
    /// Skyrim SE base game plus the Creation Club content every AE setup
    /// carries.
    pub fn skyrim_se() -> Self {
        Self::from_keys([
            "Skyrim.esm",
            "Update.esm",
            "Dawnguard.esm",
            "HearthFires.esm",
            "Dragonborn.esm",
            "ccbgssse001-fish.esm",
            "ccqdrsse001-survivalmode.esl",
            "ccbgssse037-curios.esl",
            "ccbgssse025-advdsgs.esm",
        ])
    }

    pub fn from_keys<I, K>(keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<ModKey>,
    {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains(&self, key: &ModKey) -> bool {
        self.keys.contains(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ModKey> {
        self.keys.iter()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl Default for VanillaSet {
    fn default() -> Self {
        Self::skyrim_se()
    }
}
