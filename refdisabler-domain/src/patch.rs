use refdisabler_types::{FormKey, ModKey, PlacedRecord};
use std::collections::BTreeMap;

/// Copy-on-write output mod.
///
/// Records enter the patch only when the evaluator decides they need an
/// edit; untouched winning overrides are never copied. Iteration order is
/// deterministic (sorted by form key).
#[derive(Debug, Clone)]
pub struct PatchMod {
    mod_key: ModKey,
    records: BTreeMap<FormKey, PlacedRecord>,
}

impl PatchMod {
    /// Default output plugin name.
    pub const DEFAULT_NAME: &'static str = "SynthesisDisabler.esp";

    pub fn new(mod_key: ModKey) -> Self {
        Self {
            mod_key,
            records: BTreeMap::new(),
        }
    }

    pub fn mod_key(&self) -> &ModKey {
        &self.mod_key
    }

    /// Copy `record` into the patch unless it is already there, and hand out
    /// the mutable copy.
    pub fn get_or_add_override(&mut self, record: &PlacedRecord) -> &mut PlacedRecord {
        self.records
            .entry(record.form_key.clone())
            .or_insert_with(|| record.clone())
    }

    pub fn remove(&mut self, key: &FormKey) -> Option<PlacedRecord> {
        self.records.remove(key)
    }

    pub fn contains(&self, key: &FormKey) -> bool {
        self.records.contains_key(key)
    }

    pub fn get(&self, key: &FormKey) -> Option<&PlacedRecord> {
        self.records.get(key)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> impl Iterator<Item = &PlacedRecord> {
        self.records.values()
    }

    pub fn into_records(self) -> Vec<PlacedRecord> {
        self.records.into_values().collect()
    }
}

impl Default for PatchMod {
    fn default() -> Self {
        Self::new(ModKey::new(Self::DEFAULT_NAME))
    }
}
