use std::path::Path;

use anyhow::Result;
use chrono::{DateTime, Utc};

use crate::bodies::SkyState;
use crate::timebase::{self, SiderealTime};

use super::builtin::BuiltinEphemeris;
use super::snapshot::SnapshotEphemeris;

/// Which ephemeris source to consult.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EphemerisSourceKind {
    /// Use the snapshot file when one is present and usable, otherwise the
    /// built-in series.
    Auto,
    /// Always the built-in analytic series.
    Builtin,
    /// Require the snapshot file; selection fails if it cannot be used.
    Snapshot,
}

/// Both sidereal clock readings for a single instant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SiderealTimes {
    pub greenwich: SiderealTime,
    pub local: SiderealTime,
}

pub trait Ephemeris: Send + Sync {
    /// Geocentric positions of the nine plotted bodies plus the Moon's
    /// illuminated fraction for the instant.
    fn sky_state(&self, when: DateTime<Utc>) -> Result<SkyState>;

    /// Typed sidereal readings for the instant at the given site
    /// longitude (degrees, west negative).
    fn sidereal_times(&self, when: DateTime<Utc>, longitude_deg: f64) -> Result<SiderealTimes>;
}

pub struct SelectedEphemeris {
    pub provider: Box<dyn Ephemeris>,
    pub label: &'static str,
    pub fallback_reason: Option<String>,
}

impl std::fmt::Debug for SelectedEphemeris {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectedEphemeris")
            .field("label", &self.label)
            .field("fallback_reason", &self.fallback_reason)
            .finish_non_exhaustive()
    }
}

/// Resolve the requested source kind to a concrete provider. Auto prefers
/// the snapshot and records why it fell back when that fails.
pub fn select_ephemeris(
    kind: EphemerisSourceKind,
    snapshot_path: &Path,
) -> Result<SelectedEphemeris> {
    match kind {
        EphemerisSourceKind::Builtin => Ok(SelectedEphemeris {
            provider: Box::new(BuiltinEphemeris),
            label: "BUILTIN_SERIES",
            fallback_reason: None,
        }),
        EphemerisSourceKind::Snapshot => {
            let snapshot = SnapshotEphemeris::load(snapshot_path)?;
            Ok(SelectedEphemeris {
                provider: Box::new(snapshot),
                label: "SNAPSHOT_FILE",
                fallback_reason: None,
            })
        }
        EphemerisSourceKind::Auto => match SnapshotEphemeris::load(snapshot_path) {
            Ok(snapshot) => Ok(SelectedEphemeris {
                provider: Box::new(snapshot),
                label: "SNAPSHOT_FILE",
                fallback_reason: None,
            }),
            Err(err) => Ok(SelectedEphemeris {
                provider: Box::new(BuiltinEphemeris),
                label: "BUILTIN_SERIES",
                fallback_reason: Some(format!(
                    "Snapshot not usable, using built-in series: {err:#}"
                )),
            }),
        },
    }
}

/// Sidereal readings from the internal timebase; both bundled providers
/// compute them this way, snapshot files carry body positions only.
pub fn sidereal_readings(when: DateTime<Utc>, longitude_deg: f64) -> SiderealTimes {
    SiderealTimes {
        greenwich: timebase::greenwich_sidereal(when),
        local: timebase::local_sidereal(when, longitude_deg),
    }
}
