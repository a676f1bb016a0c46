use crate::patch::PatchMod;
use crate::ports::LinkCache;
use crate::vanilla::VanillaSet;
use refdisabler_types::{EnableParent, FormKey, ModKey, PlacedRecord};
use tracing::{debug, info};

/// Z coordinate a record is parked at once properly disabled.
pub const DISABLED_Z: f32 = -30000.0;

/// Total edits between progress lines.
const PROGRESS_EVERY: u64 = 50;

#[derive(Debug, Clone, Copy, Default)]
pub struct DisableOptions {
    /// Also repair records carrying the deleted flag.
    pub fix_deleted: bool,
}

/// Applies the disable rules to one winning override at a time, copying
/// records into the patch only when they need an edit.
///
/// The rules are null-tolerant throughout: a missing optional field
/// short-circuits its branch instead of failing.
#[derive(Debug)]
pub struct DisableEvaluator<'a> {
    vanilla: &'a VanillaSet,
    options: DisableOptions,
    total: u64,
}

impl<'a> DisableEvaluator<'a> {
    pub fn new(vanilla: &'a VanillaSet, options: DisableOptions) -> Self {
        Self {
            vanilla,
            options,
            total: 0,
        }
    }

    /// Running count of records edited so far.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Decide whether `record` (the winning override, owned by `mod_key`)
    /// needs an edit, and apply it to the patch copy.
    pub fn evaluate(
        &mut self,
        cache: &dyn LinkCache,
        patch: &mut PatchMod,
        mod_key: &ModKey,
        record: &PlacedRecord,
    ) -> anyhow::Result<()> {
        // Records without placement data have nothing to park off-map.
        if record.placement.is_none() {
            return Ok(());
        }
        if self.vanilla.contains(mod_key) {
            return Ok(());
        }

        let mut edit_record = false;
        if record.initially_disabled {
            if record.enable_parent.is_none() {
                edit_record = true;
            }
            if let Some(placement) = &record.placement
                && placement.position.z != DISABLED_Z
            {
                edit_record = true;
            }
        }
        if self.options.fix_deleted && record.deleted {
            debug!(form_key = %record.form_key, "found deleted record");
            edit_record = true;
        }
        if !edit_record {
            return Ok(());
        }

        // A referenced or scripted object cannot be safely disabled; keep it
        // out of the patch entirely, removing any copy made earlier.
        let resolved = cache.resolve(&record.form_key)?.unwrap_or(record);
        if !resolved.linked_references.is_empty() {
            debug!(
                form_key = %resolved.form_key,
                linked = resolved.linked_references.len(),
                "skipping record with linked references"
            );
            patch.remove(&record.form_key);
            return Ok(());
        }
        if !resolved.scripts.is_empty() {
            debug!(
                form_key = %resolved.form_key,
                scripts = resolved.scripts.len(),
                "skipping record with attached scripts"
            );
            patch.remove(&record.form_key);
            return Ok(());
        }

        let copy = patch.get_or_add_override(record);
        if self.options.fix_deleted {
            copy.deleted = false;
        }
        copy.initially_disabled = true;
        match &mut copy.enable_parent {
            Some(parent) => parent.opposite_of_parent = true,
            None => {
                copy.enable_parent = Some(EnableParent {
                    reference: FormKey::player_ref(),
                    opposite_of_parent: true,
                    pop_in: false,
                });
            }
        }
        let Some(placement) = &mut copy.placement else {
            // Lost its placement on the way into the patch; leave the copy
            // untouched rather than fail.
            return Ok(());
        };
        placement.position.z = DISABLED_Z;

        self.total += 1;
        if self.total % PROGRESS_EVERY == 0 {
            info!("properly disabled {} placed references so far", self.total);
        }
        Ok(())
    }
}
