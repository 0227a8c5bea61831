mod angles;
mod bodies;
mod diagnostics;
mod dial;
mod ephemeris;
mod phase;
mod prefs;
mod readout;
mod riseset;
mod scene;
mod suntimes;
mod timebase;
mod ui;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Result, bail};
use clap::{Parser, ValueEnum};

use crate::ephemeris::{EphemerisSourceKind, SelectedEphemeris};
use crate::prefs::SitePreferences;

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliEphemerisSource {
    Auto,
    Builtin,
    Snapshot,
}

impl From<CliEphemerisSource> for EphemerisSourceKind {
    fn from(value: CliEphemerisSource) -> Self {
        match value {
            CliEphemerisSource::Auto => EphemerisSourceKind::Auto,
            CliEphemerisSource::Builtin => EphemerisSourceKind::Builtin,
            CliEphemerisSource::Snapshot => EphemerisSourceKind::Snapshot,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "obsclock",
    version,
    about = "24-hour observatory dial clock with UT, sidereal time and planet positions"
)]
struct Cli {
    /// Preferences file holding site name, coordinates and dial geometry.
    #[arg(long, default_value = "settings.par")]
    prefs: PathBuf,

    #[arg(long, value_enum, default_value_t = CliEphemerisSource::Auto)]
    ephemeris: CliEphemerisSource,

    /// Snapshot file consulted by the auto and snapshot sources.
    #[arg(long, default_value = "ephemeris.json")]
    snapshot: PathBuf,

    /// Seconds between dial recomputations.
    #[arg(long, default_value_t = 20)]
    refresh_seconds: u32,

    /// Print a one-shot site and timing report instead of opening the window.
    #[arg(long)]
    diagnostics: bool,

    /// Write the current dial scene and readouts as JSON to stdout.
    #[arg(long)]
    dump_scene: bool,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    if cli.refresh_seconds == 0 {
        bail!("--refresh-seconds must be greater than zero");
    }

    let prefs = prefs::load_preferences(&cli.prefs);
    let selected = ephemeris::select_ephemeris(cli.ephemeris.into(), &cli.snapshot)?;

    if cli.diagnostics {
        diagnostics::run_diagnostics(&selected, &prefs)?;
        return Ok(());
    }

    if cli.dump_scene {
        return dump_scene(&selected, &prefs);
    }

    ui::app::run_gui(
        selected,
        prefs,
        cli.prefs,
        Duration::from_secs(u64::from(cli.refresh_seconds)),
    )
}

fn dump_scene(selected: &SelectedEphemeris, prefs: &SitePreferences) -> Result<()> {
    let input = ephemeris::observe(selected, prefs, 0.0)?;
    let scene = dial::compute_tick(&input);
    let readouts = readout::build(&input, &prefs.site_name);
    let doc = serde_json::json!({
        "readouts": readouts,
        "scene": scene,
    });
    println!("{}", serde_json::to_string_pretty(&doc)?);
    Ok(())
}
