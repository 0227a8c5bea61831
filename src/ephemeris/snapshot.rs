use std::collections::HashSet;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow, bail};
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::bodies::{BodyId, BodyState, SkyState};

use super::provider::{Ephemeris, SiderealTimes, sidereal_readings};

const SNAPSHOT_VERSION: u32 = 1;

/// Snapshots older than this are refused at load; positions drift visibly
/// beyond it and `auto` should fall back to the built-in series instead.
const STALE_AFTER_DAYS: i64 = 3;

/// Ephemeris backed by an externally generated JSON table of body
/// positions, e.g. exported nightly from a planetarium program. Body
/// positions are fixed for the process lifetime; sidereal time is still
/// computed per tick from the timebase.
#[derive(Debug)]
pub struct SnapshotEphemeris {
    sky: SkyState,
}

#[derive(Debug, Deserialize)]
struct SnapshotFile {
    version: u32,
    generated_utc: DateTime<Utc>,
    moon_fraction: f64,
    bodies: Vec<SnapshotBody>,
}

#[derive(Debug, Deserialize)]
struct SnapshotBody {
    body: BodyId,
    ra_deg: f64,
    distance_au: f64,
}

impl SnapshotEphemeris {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("unable to read ephemeris snapshot {}", path.display()))?;
        parse_snapshot_text(&text, Utc::now())
    }
}

impl Ephemeris for SnapshotEphemeris {
    fn sky_state(&self, _when: DateTime<Utc>) -> Result<SkyState> {
        Ok(self.sky)
    }

    fn sidereal_times(&self, when: DateTime<Utc>, longitude_deg: f64) -> Result<SiderealTimes> {
        Ok(sidereal_readings(when, longitude_deg))
    }
}

/// Parse and validate snapshot JSON. Every plotted body must appear
/// exactly once with a sane position, and the snapshot must be recent
/// enough for its positions to still be worth plotting.
pub fn parse_snapshot_text(text: &str, now: DateTime<Utc>) -> Result<SnapshotEphemeris> {
    let file: SnapshotFile = serde_json::from_str(text).map_err(|err| {
        anyhow!(
            "invalid JSON at line {}, column {}: {err}",
            err.line(),
            err.column()
        )
    })?;
    if file.version != SNAPSHOT_VERSION {
        bail!(
            "unsupported snapshot version {}, expected {SNAPSHOT_VERSION}",
            file.version
        );
    }
    let age_days = now.signed_duration_since(file.generated_utc).num_days();
    if age_days > STALE_AFTER_DAYS {
        bail!("snapshot is {age_days} days old, too stale to plot");
    }
    if !(0.0..=1.0).contains(&file.moon_fraction) {
        bail!(
            "moon fraction {} is outside the range 0 to 1",
            file.moon_fraction
        );
    }

    let mut seen = HashSet::new();
    for entry in &file.bodies {
        if !seen.insert(entry.body) {
            bail!("duplicate body entry {:?}", entry.body);
        }
        if !(0.0..360.0).contains(&entry.ra_deg) {
            bail!(
                "right ascension {} for {:?} is outside 0..360",
                entry.ra_deg,
                entry.body
            );
        }
        if entry.distance_au <= 0.0 {
            bail!(
                "distance {} for {:?} must be positive",
                entry.distance_au,
                entry.body
            );
        }
    }

    let body = |id: BodyId| -> Result<BodyState> {
        file.bodies
            .iter()
            .find(|entry| entry.body == id)
            .map(|entry| BodyState {
                ra_deg: entry.ra_deg,
                distance_au: entry.distance_au,
            })
            .ok_or_else(|| anyhow!("snapshot is missing {:?}", id))
    };
    Ok(SnapshotEphemeris {
        sky: SkyState {
            sun: body(BodyId::Sun)?,
            moon: body(BodyId::Moon)?,
            mercury: body(BodyId::Mercury)?,
            venus: body(BodyId::Venus)?,
            mars: body(BodyId::Mars)?,
            jupiter: body(BodyId::Jupiter)?,
            saturn: body(BodyId::Saturn)?,
            uranus: body(BodyId::Uranus)?,
            neptune: body(BodyId::Neptune)?,
            moon_fraction: file.moon_fraction,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, 23, 12, 0, 0)
            .single()
            .expect("valid instant")
    }

    fn snapshot_json(generated: &str, bodies: &str) -> String {
        format!(
            r#"{{
                "version": 1,
                "generated_utc": "{generated}",
                "moon_fraction": 0.42,
                "bodies": [{bodies}]
            }}"#
        )
    }

    fn all_bodies() -> String {
        [
            ("sun", 152.1, 1.0106),
            ("moon", 60.4, 0.0026),
            ("mercury", 171.3, 1.32),
            ("venus", 121.9, 1.51),
            ("mars", 187.0, 2.45),
            ("jupiter", 104.2, 5.93),
            ("saturn", 1.5, 8.81),
            ("uranus", 59.3, 19.4),
            ("neptune", 0.9, 29.5),
        ]
        .iter()
        .map(|(body, ra, dist)| {
            format!(r#"{{"body":"{body}","ra_deg":{ra},"distance_au":{dist}}}"#)
        })
        .collect::<Vec<_>>()
        .join(",")
    }

    #[test]
    fn complete_snapshot_parses_into_a_sky() {
        let text = snapshot_json("2026-08-22T04:00:00Z", &all_bodies());
        let snapshot = parse_snapshot_text(&text, now()).expect("snapshot parses");
        let sky = snapshot
            .sky_state(now())
            .expect("snapshot serves its sky");
        assert!((sky.sun.ra_deg - 152.1).abs() < 1e-9);
        assert!((sky.saturn.distance_au - 8.81).abs() < 1e-9);
        assert!((sky.moon_fraction - 0.42).abs() < 1e-9);
    }

    #[test]
    fn missing_bodies_are_named_in_the_error() {
        let bodies = all_bodies().replace(r#"{"body":"saturn","ra_deg":1.5,"distance_au":8.81},"#, "");
        let text = snapshot_json("2026-08-22T04:00:00Z", &bodies);
        let err = parse_snapshot_text(&text, now()).expect_err("saturn is missing");
        assert!(err.to_string().contains("missing Saturn"));
    }

    #[test]
    fn duplicate_bodies_are_rejected() {
        let bodies = format!(
            r#"{},{{"body":"mars","ra_deg":10.0,"distance_au":1.9}}"#,
            all_bodies()
        );
        let text = snapshot_json("2026-08-22T04:00:00Z", &bodies);
        let err = parse_snapshot_text(&text, now()).expect_err("mars appears twice");
        assert!(err.to_string().contains("duplicate body entry Mars"));
    }

    #[test]
    fn stale_snapshots_are_refused() {
        let text = snapshot_json("2026-08-10T04:00:00Z", &all_bodies());
        let err = parse_snapshot_text(&text, now()).expect_err("two weeks is too old");
        assert!(err.to_string().contains("too stale"));
    }

    #[test]
    fn version_and_ranges_are_validated() {
        let text = snapshot_json("2026-08-22T04:00:00Z", &all_bodies())
            .replace("\"version\": 1", "\"version\": 2");
        let err = parse_snapshot_text(&text, now()).expect_err("unknown version");
        assert!(err.to_string().contains("unsupported snapshot version 2"));

        let bodies = all_bodies().replace("152.1", "412.0");
        let text = snapshot_json("2026-08-22T04:00:00Z", &bodies);
        let err = parse_snapshot_text(&text, now()).expect_err("ra out of range");
        assert!(err.to_string().contains("outside 0..360"));

        let text = snapshot_json("2026-08-22T04:00:00Z", &all_bodies())
            .replace("0.42", "1.42");
        let err = parse_snapshot_text(&text, now()).expect_err("fraction out of range");
        assert!(err.to_string().contains("moon fraction"));
    }

    #[test]
    fn broken_json_reports_the_position() {
        let err = parse_snapshot_text("{ nope", now()).expect_err("not JSON");
        assert!(err.to_string().contains("invalid JSON at line 1"));
    }

    #[test]
    fn load_reads_a_file_from_disk() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("ephemeris.json");
        let generated = Utc::now().to_rfc3339();
        std::fs::write(&path, snapshot_json(&generated, &all_bodies())).expect("fixture written");
        let snapshot = SnapshotEphemeris::load(&path).expect("snapshot loads");
        let sky = snapshot.sky_state(Utc::now()).expect("sky served");
        assert!((sky.mercury.distance_au - 1.32).abs() < 1e-9);
    }
}
