//! Clap-free entry point: settings in, patch and counters out.

use crate::settings::PatcherSettings;
use refdisabler_domain::{
    DisableOptions, LinkCache, LoadOrderView, PatchMod, RunSummary, VanillaSet, Walker,
};
use tracing::info;

/// Everything one patcher run produces.
#[derive(Debug)]
pub struct RunOutcome {
    pub summary: RunSummary,
    pub patch: PatchMod,
}

/// Run both passes over `host` and return the resulting patch.
pub fn run_patcher<H>(
    settings: &PatcherSettings,
    vanilla: &VanillaSet,
    host: &H,
) -> anyhow::Result<RunOutcome>
where
    H: LoadOrderView + LinkCache,
{
    let options = DisableOptions {
        fix_deleted: settings.fix_deleted,
    };
    let walker = Walker::new(vanilla, options);

    let mut patch = PatchMod::default();
    let summary = walker.run(host, &mut patch)?;

    info!(
        total = summary.total,
        pruned = summary.pruned,
        records = patch.len(),
        "patcher run complete"
    );
    Ok(RunOutcome { summary, patch })
}
