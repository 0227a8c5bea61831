use anyhow::Result;
use chrono::{DateTime, Utc};

use crate::bodies::{BodyState, SkyState};
use crate::timebase;

use super::provider::{Ephemeris, SiderealTimes, sidereal_readings};

const AU_KM: f64 = 149_597_870.7;
const EARTH_RADIUS_KM: f64 = 6378.14;

/// Keplerian mean elements at J2000 with per-century rates, from the JPL
/// approximate-position tables (valid 1800-2050). Order: semi-major axis
/// (au), eccentricity, inclination, mean longitude, longitude of
/// perihelion, longitude of ascending node (all angles in degrees).
struct Elements {
    a: (f64, f64),
    e: (f64, f64),
    i: (f64, f64),
    l: (f64, f64),
    peri: (f64, f64),
    node: (f64, f64),
}

const MERCURY: Elements = Elements {
    a: (0.38709927, 0.00000037),
    e: (0.20563593, 0.00001906),
    i: (7.00497902, -0.00594749),
    l: (252.25032350, 149472.67411175),
    peri: (77.45779628, 0.16047689),
    node: (48.33076593, -0.12534081),
};

const VENUS: Elements = Elements {
    a: (0.72333566, 0.00000390),
    e: (0.00677672, -0.00004107),
    i: (3.39467605, -0.00078890),
    l: (181.97909950, 58517.81538729),
    peri: (131.60246718, 0.00268329),
    node: (76.67984255, -0.27769418),
};

// Earth-Moon barycenter; close enough to the geocenter for this dial.
const EARTH: Elements = Elements {
    a: (1.00000261, 0.00000562),
    e: (0.01671123, -0.00004392),
    i: (-0.00001531, -0.01294668),
    l: (100.46457166, 35999.37244981),
    peri: (102.93768193, 0.32327364),
    node: (0.0, 0.0),
};

const MARS: Elements = Elements {
    a: (1.52371034, 0.00001847),
    e: (0.09339410, 0.00007882),
    i: (1.84969142, -0.00813131),
    l: (-4.55343205, 19140.30268499),
    peri: (-23.94362959, 0.44441088),
    node: (49.55953891, -0.29257343),
};

const JUPITER: Elements = Elements {
    a: (5.20288700, -0.00011607),
    e: (0.04838624, -0.00013253),
    i: (1.30439695, -0.00183714),
    l: (34.39644051, 3034.74612775),
    peri: (14.72847983, 0.21252668),
    node: (100.47390909, 0.20469106),
};

const SATURN: Elements = Elements {
    a: (9.53667594, -0.00125060),
    e: (0.05386179, -0.00050991),
    i: (2.48599187, 0.00193609),
    l: (49.95424423, 1222.49362201),
    peri: (92.59887831, -0.41897216),
    node: (113.66242448, -0.28867794),
};

const URANUS: Elements = Elements {
    a: (19.18916464, -0.00196176),
    e: (0.04725744, -0.00004397),
    i: (0.77263783, -0.00242939),
    l: (313.23810451, 428.48202785),
    peri: (170.95427630, 0.40805281),
    node: (74.01692503, 0.04240589),
};

const NEPTUNE: Elements = Elements {
    a: (30.06992276, 0.00026291),
    e: (0.00859048, 0.00005105),
    i: (1.77004347, 0.00035372),
    l: (-55.12002969, 218.45945325),
    peri: (44.96476227, -0.32241464),
    node: (131.78422574, -0.00508664),
};

/// Self-contained analytic ephemeris: planets from the mean-element
/// tables, the Moon from the low-precision lunar series, illumination
/// from the Sun-Moon elongation. Accuracy is a small fraction of a degree
/// over the table's validity span, far inside one dial pixel.
pub struct BuiltinEphemeris;

impl BuiltinEphemeris {
    pub fn sky(&self, when: DateTime<Utc>) -> SkyState {
        let centuries = (timebase::julian_date(when) - timebase::J2000_JD) / 36525.0;
        let obliquity = (23.439291 - 0.0130042 * centuries).to_radians();
        let earth = heliocentric(&EARTH, centuries);

        let sun_vec = equatorial([-earth[0], -earth[1], -earth[2]], obliquity);
        let (sun_ra, sun_distance) = ra_and_distance(sun_vec);
        let moon_vec = equatorial(moon_ecliptic(centuries), obliquity);
        let (moon_ra, moon_distance) = ra_and_distance(moon_vec);

        let planet = |elements: &Elements| planet_state(elements, earth, centuries, obliquity);
        SkyState {
            sun: BodyState {
                ra_deg: sun_ra,
                distance_au: sun_distance,
            },
            moon: BodyState {
                ra_deg: moon_ra,
                distance_au: moon_distance,
            },
            mercury: planet(&MERCURY),
            venus: planet(&VENUS),
            mars: planet(&MARS),
            jupiter: planet(&JUPITER),
            saturn: planet(&SATURN),
            uranus: planet(&URANUS),
            neptune: planet(&NEPTUNE),
            moon_fraction: illuminated_fraction(sun_vec, moon_vec),
        }
    }
}

impl Ephemeris for BuiltinEphemeris {
    fn sky_state(&self, when: DateTime<Utc>) -> Result<SkyState> {
        Ok(self.sky(when))
    }

    fn sidereal_times(&self, when: DateTime<Utc>, longitude_deg: f64) -> Result<SiderealTimes> {
        Ok(sidereal_readings(when, longitude_deg))
    }
}

/// Kepler's equation by Newton iteration; eight rounds converge to double
/// precision for every planetary eccentricity in the table.
fn solve_kepler(mean_anomaly: f64, eccentricity: f64) -> f64 {
    let mut ea = mean_anomaly;
    for _ in 0..8 {
        ea -= (ea - eccentricity * ea.sin() - mean_anomaly) / (1.0 - eccentricity * ea.cos());
    }
    ea
}

/// Heliocentric ecliptic position (au) from the mean elements at the given
/// epoch: propagate the elements, solve Kepler, then rotate the orbital
/// plane by argument of perihelion, inclination and ascending node.
fn heliocentric(elements: &Elements, centuries: f64) -> [f64; 3] {
    let at = |(base, rate): (f64, f64)| base + rate * centuries;
    let a = at(elements.a);
    let e = at(elements.e);
    let inclination = at(elements.i).to_radians();
    let mean_longitude = at(elements.l);
    let perihelion = at(elements.peri);
    let node_deg = at(elements.node);

    let mean_anomaly = (mean_longitude - perihelion).rem_euclid(360.0).to_radians();
    let omega = (perihelion - node_deg).to_radians();
    let node = node_deg.to_radians();
    let ea = solve_kepler(mean_anomaly, e);

    let xp = a * (ea.cos() - e);
    let yp = a * (1.0 - e * e).sqrt() * ea.sin();

    let (so, co) = omega.sin_cos();
    let (si, ci) = inclination.sin_cos();
    let (sn, cn) = node.sin_cos();
    [
        (co * cn - so * sn * ci) * xp + (-so * cn - co * sn * ci) * yp,
        (co * sn + so * cn * ci) * xp + (-so * sn + co * cn * ci) * yp,
        so * si * xp + co * si * yp,
    ]
}

fn planet_state(
    elements: &Elements,
    earth: [f64; 3],
    centuries: f64,
    obliquity: f64,
) -> BodyState {
    let helio = heliocentric(elements, centuries);
    let geocentric = [
        helio[0] - earth[0],
        helio[1] - earth[1],
        helio[2] - earth[2],
    ];
    let (ra_deg, distance_au) = ra_and_distance(equatorial(geocentric, obliquity));
    BodyState {
        ra_deg,
        distance_au,
    }
}

/// Geocentric ecliptic position of the Moon (au) from the low-precision
/// series of the Astronomical Almanac; good to a few tenths of a degree.
fn moon_ecliptic(centuries: f64) -> [f64; 3] {
    let t = centuries;
    let longitude = 218.316
        + 481_267.8813 * t
        + 6.29 * sind(134.9 + 477_198.85 * t)
        - 1.27 * sind(259.2 - 413_335.38 * t)
        + 0.66 * sind(235.7 + 890_534.23 * t)
        + 0.21 * sind(269.9 + 954_397.70 * t)
        - 0.19 * sind(357.5 + 35_999.05 * t)
        - 0.11 * sind(186.6 + 966_404.05 * t);
    let latitude = 5.13 * sind(93.3 + 483_202.03 * t)
        + 0.28 * sind(228.2 + 960_400.87 * t)
        - 0.28 * sind(318.3 + 6_003.18 * t)
        - 0.17 * sind(217.6 - 407_332.20 * t);
    let parallax = 0.9508
        + 0.0518 * cosd(134.9 + 477_198.85 * t)
        + 0.0095 * cosd(259.2 - 413_335.38 * t)
        + 0.0078 * cosd(235.7 + 890_534.23 * t)
        + 0.0028 * cosd(269.9 + 954_397.70 * t);

    let distance_au = EARTH_RADIUS_KM / parallax.to_radians().sin() / AU_KM;
    let (sl, cl) = longitude.to_radians().sin_cos();
    let (sb, cb) = latitude.to_radians().sin_cos();
    [
        distance_au * cb * cl,
        distance_au * cb * sl,
        distance_au * sb,
    ]
}

fn sind(degrees: f64) -> f64 {
    degrees.to_radians().sin()
}

fn cosd(degrees: f64) -> f64 {
    degrees.to_radians().cos()
}

/// Rotate an ecliptic vector onto the equator.
fn equatorial(vec: [f64; 3], obliquity: f64) -> [f64; 3] {
    let (se, ce) = obliquity.sin_cos();
    [
        vec[0],
        vec[1] * ce - vec[2] * se,
        vec[1] * se + vec[2] * ce,
    ]
}

fn ra_and_distance(vec: [f64; 3]) -> (f64, f64) {
    let ra_deg = vec[1].atan2(vec[0]).to_degrees().rem_euclid(360.0);
    let distance = (vec[0] * vec[0] + vec[1] * vec[1] + vec[2] * vec[2]).sqrt();
    (ra_deg, distance)
}

/// Illuminated fraction of the Moon from the geocentric elongation: 0 when
/// the Moon sits at the Sun, 1 when directly opposite.
fn illuminated_fraction(sun: [f64; 3], moon: [f64; 3]) -> f64 {
    let dot = sun[0] * moon[0] + sun[1] * moon[1] + sun[2] * moon[2];
    let norms = (sun[0] * sun[0] + sun[1] * sun[1] + sun[2] * sun[2]).sqrt()
        * (moon[0] * moon[0] + moon[1] * moon[1] + moon[2] * moon[2]).sqrt();
    if norms == 0.0 {
        return 0.0;
    }
    let cos_elongation = (dot / norms).clamp(-1.0, 1.0);
    (1.0 - cos_elongation) / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn epoch() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0)
            .single()
            .expect("valid instant")
    }

    fn days_after_epoch(days: i64) -> DateTime<Utc> {
        epoch() + chrono::Duration::days(days)
    }

    #[test]
    fn kepler_solver_satisfies_the_equation() {
        assert!(solve_kepler(0.0, 0.2).abs() < 1e-12);
        let ea = solve_kepler(1.0, 0.0);
        assert!((ea - 1.0).abs() < 1e-12);
        let ea = solve_kepler(2.5, 0.2056);
        assert!((ea - 0.2056 * ea.sin() - 2.5).abs() < 1e-10);
    }

    #[test]
    fn sun_position_at_the_epoch_matches_the_almanac() {
        let sky = BuiltinEphemeris.sky(epoch());
        // True values for 2000-01-01 12:00 UT: RA 281.29 deg, 0.9833 au.
        assert!(
            (sky.sun.ra_deg - 281.29).abs() < 2.5,
            "sun RA {}",
            sky.sun.ra_deg
        );
        assert!((sky.sun.distance_au - 0.9833).abs() < 0.01);
    }

    #[test]
    fn sun_advances_about_a_degree_per_day() {
        let before = BuiltinEphemeris.sky(epoch());
        let after = BuiltinEphemeris.sky(days_after_epoch(10));
        let advance = (after.sun.ra_deg - before.sun.ra_deg).rem_euclid(360.0);
        assert!((advance - 10.0).abs() < 1.5, "advance {advance}");
    }

    #[test]
    fn solar_distance_stays_near_one_au_through_the_year() {
        for days in [0, 91, 182, 273] {
            let sky = BuiltinEphemeris.sky(days_after_epoch(days));
            assert!(
                (0.982..1.018).contains(&sky.sun.distance_au),
                "day {days}: {}",
                sky.sun.distance_au
            );
        }
    }

    #[test]
    fn lunar_distance_stays_between_perigee_and_apogee() {
        for days in [0, 7, 14, 21, 28] {
            let sky = BuiltinEphemeris.sky(days_after_epoch(days));
            assert!(
                (0.00238..0.00272).contains(&sky.moon.distance_au),
                "day {days}: {}",
                sky.moon.distance_au
            );
        }
    }

    #[test]
    fn moon_races_eastward_through_the_zodiac() {
        let before = BuiltinEphemeris.sky(days_after_epoch(100));
        let after = BuiltinEphemeris.sky(days_after_epoch(101));
        let advance = (after.moon.ra_deg - before.moon.ra_deg).rem_euclid(360.0);
        assert!((7.0..19.0).contains(&advance), "advance {advance}");
    }

    #[test]
    fn epoch_moon_is_a_waning_crescent() {
        // New moon fell on 2000-01-06; five days earlier the disc showed
        // roughly a quarter illuminated and shrinking.
        let sky = BuiltinEphemeris.sky(epoch());
        assert!(
            (0.15..0.30).contains(&sky.moon_fraction),
            "fraction {}",
            sky.moon_fraction
        );
    }

    #[test]
    fn illumination_endpoints_are_exact() {
        assert!(illuminated_fraction([1.0, 0.0, 0.0], [2.0, 0.0, 0.0]).abs() < 1e-12);
        assert!((illuminated_fraction([1.0, 0.0, 0.0], [-3.0, 0.0, 0.0]) - 1.0).abs() < 1e-12);
        assert!((illuminated_fraction([1.0, 0.0, 0.0], [0.0, 5.0, 0.0]) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn every_body_lands_in_a_plausible_geocentric_range() {
        let sky = BuiltinEphemeris.sky(days_after_epoch(9731));
        let checks = [
            (sky.mercury, 0.45, 1.55),
            (sky.venus, 0.25, 1.75),
            (sky.mars, 0.3, 2.75),
            (sky.jupiter, 3.8, 6.6),
            (sky.saturn, 7.9, 11.2),
            (sky.uranus, 17.0, 21.4),
            (sky.neptune, 28.7, 31.4),
        ];
        for (state, low, high) in checks {
            assert!((0.0..360.0).contains(&state.ra_deg), "ra {}", state.ra_deg);
            assert!(
                (low..high).contains(&state.distance_au),
                "distance {}",
                state.distance_au
            );
        }
        assert!((0.0..=1.0).contains(&sky.moon_fraction));
    }
}
