use anyhow::Context;
use camino::Utf8PathBuf;
use clap::Parser;
use refdisabler_core::adapters::{read_snapshot, write_patch, SnapshotLoadOrder};
use refdisabler_core::pipeline::run_patcher;
use refdisabler_core::settings::{self, PatcherSettings};
use refdisabler_core::VanillaSet;
use refdisabler_types::ToolInfo;
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "refdisabler",
    version,
    about = "Properly disables broken placed references across a load order."
)]
struct Cli {
    /// Load order snapshot exported by the host.
    #[arg(long)]
    load_order: Utf8PathBuf,

    /// Settings file (missing file means defaults).
    #[arg(long, default_value = settings::SETTINGS_FILE_NAME)]
    settings: Utf8PathBuf,

    /// Where to write the patch document.
    #[arg(long, default_value = "SynthesisDisabler.json")]
    out: Utf8PathBuf,

    /// Also properly disable deleted records.
    #[arg(long, default_value_t = false)]
    fix_deleted: bool,

    /// Verbose diagnostics for skipped linked/scripted records.
    #[arg(long, default_value_t = false)]
    debug: bool,
}

fn main() -> ExitCode {
    // Failures can happen before the subscriber is up, so report on stderr.
    if let Err(e) = real_main() {
        eprintln!("error: {:?}", e);
        return ExitCode::from(1);
    }
    ExitCode::from(0)
}

fn real_main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut settings = settings::load_or_default(&cli.settings)
        .with_context(|| format!("load settings from {}", cli.settings))?;
    // CLI flags only ever turn options on; the settings file is the baseline.
    settings.fix_deleted |= cli.fix_deleted;
    settings.debug |= cli.debug;

    init_tracing(&settings);

    let snapshot = read_snapshot(&cli.load_order)?;
    let host = SnapshotLoadOrder::from_snapshot(snapshot)
        .with_context(|| format!("index load order from {}", cli.load_order))?;
    info!(records = host.len(), "indexed load order");

    let vanilla = VanillaSet::skyrim_se();
    let outcome = run_patcher(&settings, &vanilla, &host)?;

    write_patch(&cli.out, &outcome.patch, tool_info())?;
    info!("wrote patch to {}", cli.out);
    Ok(())
}

/// The `debug` toggle maps to the default log level; `RUST_LOG` still wins.
fn init_tracing(settings: &PatcherSettings) {
    let default_level = if settings.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();
}

fn tool_info() -> ToolInfo {
    ToolInfo {
        name: "refdisabler".to_string(),
        version: Some(env!("CARGO_PKG_VERSION").to_string()),
    }
}
