use std::time::Instant;

use anyhow::Result;

use crate::dial;
use crate::ephemeris::{self, SelectedEphemeris};
use crate::prefs::SitePreferences;
use crate::readout;

const BENCH_TICKS: usize = 40;

/// Compute-time accumulator for repeated ticks.
#[derive(Debug)]
struct TickStats {
    count: usize,
    total_us: u128,
    min_us: u128,
    max_us: u128,
}

impl TickStats {
    fn new() -> Self {
        Self {
            count: 0,
            total_us: 0,
            min_us: u128::MAX,
            max_us: 0,
        }
    }

    fn record(&mut self, micros: u128) {
        self.count += 1;
        self.total_us += micros;
        self.min_us = self.min_us.min(micros);
        self.max_us = self.max_us.max(micros);
    }

    fn min_us(&self) -> u128 {
        if self.count == 0 { 0 } else { self.min_us }
    }

    fn mean_us(&self) -> u128 {
        if self.count == 0 {
            0
        } else {
            self.total_us / self.count as u128
        }
    }
}

/// Print the selected source, one tick's readouts and primitive counts,
/// and compute timing over repeated ticks, then return. Used from the CLI
/// to check a site/source combination without opening the window.
pub fn run_diagnostics(selected: &SelectedEphemeris, prefs: &SitePreferences) -> Result<()> {
    println!("Observatory clock diagnostics");
    println!(
        "Site: {} ({:.6}, {:.6})",
        prefs.site_name, prefs.latitude, prefs.longitude
    );
    println!("Selected ephemeris source: {}", selected.label);
    if let Some(reason) = &selected.fallback_reason {
        println!("Fallback reason: {reason}");
    }

    let input = ephemeris::observe(selected, prefs, 0.0)?;
    let scene = dial::compute_tick(&input);
    let readouts = readout::build(&input, &prefs.site_name);
    let counts = scene.counts();

    println!();
    println!("Tick summary:");
    println!(
        "  Primitives: {} ({} circles, {} segments, {} wedges, {} glyphs)",
        counts.total(),
        counts.circles,
        counts.segments,
        counts.wedges,
        counts.glyphs
    );
    println!(
        "  LOCAL {}  UT {}",
        readouts.local_hhmm, readouts.ut_hhmm
    );
    println!(
        "  LST {}  GST {}",
        readouts.sidereal_local_hhmm, readouts.sidereal_greenwich_hhmm
    );
    println!(
        "  JD {:.4}  MJD {:.4}",
        readouts.julian_date, readouts.modified_julian_date
    );
    match (&readouts.sunrise, &readouts.sunset) {
        (Some(rise), Some(set)) => println!(
            "  Sunrise {rise}  Sunset {set}  Night {} h",
            readouts.night_length_hours
        ),
        _ => println!("  Sun rise/set unavailable for this date"),
    }
    println!("  {}", readouts.illumination_line());

    let mut stats = TickStats::new();
    for _ in 0..BENCH_TICKS {
        let started = Instant::now();
        let input = ephemeris::observe(selected, prefs, 0.0)?;
        let _ = dial::compute_tick(&input);
        stats.record(started.elapsed().as_micros());
    }
    println!();
    println!("Timing over {BENCH_TICKS} ticks:");
    println!("  Min: {} us", stats.min_us());
    println!("  Mean: {} us", stats.mean_us());
    println!("  Max: {} us", stats.max_us);
    Ok(())
}
