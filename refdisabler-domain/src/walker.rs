use crate::evaluator::{DisableEvaluator, DisableOptions};
use crate::patch::PatchMod;
use crate::ports::{LinkCache, LoadOrderView};
use crate::vanilla::VanillaSet;
use refdisabler_types::PlacedKind;
use tracing::info;

/// Per-category and overall edit counts for one patcher run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub objects: u64,
    pub npcs: u64,
    pub hazards: u64,
    pub total: u64,
    /// Vanilla initially-disabled records pruned from the patch by pass 2.
    pub pruned: u64,
}

/// Two-pass batch sweep over the load order.
///
/// Pass 1 feeds every non-vanilla winning override through the disable
/// rules, one record kind at a time. Pass 2 prunes vanilla-owned
/// initially-disabled records that leaked into the patch as resolution
/// artifacts.
#[derive(Debug)]
pub struct Walker<'a> {
    vanilla: &'a VanillaSet,
    options: DisableOptions,
}

impl<'a> Walker<'a> {
    pub fn new(vanilla: &'a VanillaSet, options: DisableOptions) -> Self {
        Self { vanilla, options }
    }

    pub fn run<H>(&self, host: &H, patch: &mut PatchMod) -> anyhow::Result<RunSummary>
    where
        H: LoadOrderView + LinkCache,
    {
        let mut summary = RunSummary::default();
        let mut evaluator = DisableEvaluator::new(self.vanilla, self.options);

        for kind in PlacedKind::ALL {
            info!("disabling {}...", kind.plural());
            let before = evaluator.total();
            for winning in host.winning_overrides(kind)? {
                if self.vanilla.contains(winning.mod_key) {
                    continue;
                }
                evaluator.evaluate(host, patch, winning.mod_key, winning.record)?;
            }
            let count = evaluator.total() - before;
            match kind {
                PlacedKind::Object => summary.objects = count,
                PlacedKind::Npc => summary.npcs = count,
                PlacedKind::Hazard => summary.hazards = count,
            }
            info!("properly disabled {} {}", count, kind.plural());
        }
        summary.total = evaluator.total();
        info!(
            "properly disabled {} placed references in total",
            summary.total
        );

        info!("removing vanilla initially disabled records from the patch...");
        // Layered among the vanilla files only: a record the base game ships
        // initially-disabled stays out of the patch even when a mod's broken
        // override of it was edited in pass 1.
        for kind in PlacedKind::ALL {
            for winning in host.winning_overrides_within(kind, self.vanilla)? {
                if !winning.record.initially_disabled {
                    continue;
                }
                if patch.remove(&winning.record.form_key).is_some() {
                    summary.pruned += 1;
                }
            }
        }
        info!("final patch record count: {}", patch.len());

        Ok(summary)
    }
}
