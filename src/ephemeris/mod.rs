pub mod builtin;
pub mod provider;
pub mod snapshot;

pub use provider::{
    Ephemeris, EphemerisSourceKind, SelectedEphemeris, SiderealTimes, select_ephemeris,
};

use anyhow::Result;
use chrono::{DateTime, Local, NaiveDateTime, Utc};

use crate::angles::DialGeometry;
use crate::dial::TickInput;
use crate::prefs::SitePreferences;
use crate::riseset::SunTimes;
use crate::suntimes;
use crate::timebase::TimeSample;

/// Gather everything one tick needs: capture the instant, query the
/// ephemeris source, and fetch the day's solar events. Rise/set failures
/// degrade to `Absent` here; ephemeris failures propagate so the host can
/// surface them and keep the previous scene.
pub fn observe(
    selected: &SelectedEphemeris,
    prefs: &SitePreferences,
    previous_moon_fraction: f64,
) -> Result<TickInput> {
    let utc = Utc::now();
    let local = utc.with_timezone(&Local).naive_local();
    observe_at(selected, prefs, previous_moon_fraction, utc, local)
}

/// Same as [`observe`] with the instant supplied, which keeps ticks
/// reproducible under test.
pub fn observe_at(
    selected: &SelectedEphemeris,
    prefs: &SitePreferences,
    previous_moon_fraction: f64,
    utc: DateTime<Utc>,
    local: NaiveDateTime,
) -> Result<TickInput> {
    let sidereal = selected.provider.sidereal_times(utc, prefs.longitude)?;
    let time = TimeSample {
        local,
        utc,
        sidereal_local: sidereal.local,
        sidereal_greenwich: sidereal.greenwich,
    };
    let sky = selected.provider.sky_state(utc)?;
    let sun_times = suntimes::sun_times_utc(local.date(), prefs.latitude, prefs.longitude)
        .unwrap_or(SunTimes::Absent);
    Ok(TickInput {
        time,
        sky,
        previous_moon_fraction,
        sun_times,
        geometry: DialGeometry::square(f64::from(prefs.dial_width)),
        font_size: prefs.font_size as f32,
    })
}
