use chrono::{DateTime, NaiveDateTime, Timelike, Utc};
use serde::Serialize;

pub const J2000_JD: f64 = 2451545.0;
const UNIX_EPOCH_JD: f64 = 2440587.5;
const MJD_OFFSET: f64 = 2400000.5;

/// Sidereal clock reading in the range [0h, 24h). Carried as typed fields
/// so nothing downstream has to split strings to get at the components.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct SiderealTime {
    pub hour: u32,
    pub minute: u32,
    pub second: f64,
}

impl SiderealTime {
    pub fn from_decimal_hours(hours: f64) -> Self {
        let wrapped = hours.rem_euclid(24.0);
        let hour = wrapped.floor();
        let minutes = (wrapped - hour) * 60.0;
        let minute = minutes.floor();
        let second = (minutes - minute) * 60.0;
        Self {
            hour: hour as u32,
            minute: minute as u32,
            second,
        }
    }

    pub fn decimal_hours(&self) -> f64 {
        f64::from(self.hour) + f64::from(self.minute) / 60.0 + self.second / 3600.0
    }

    pub fn hh_mm(&self) -> String {
        format!("{:02}:{:02}", self.hour, self.minute)
    }
}

/// All clocks for one tick, captured from a single instant. Local wall
/// time comes from the host timezone; both sidereal readings come from the
/// ephemeris source for the same instant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimeSample {
    pub local: NaiveDateTime,
    pub utc: DateTime<Utc>,
    pub sidereal_local: SiderealTime,
    pub sidereal_greenwich: SiderealTime,
}

impl TimeSample {
    /// Decimal local hour as the hands use it: whole hours plus minutes,
    /// seconds ignored so the hand moves in minute steps.
    pub fn local_hand_hours(&self) -> f64 {
        f64::from(self.local.hour()) + f64::from(self.local.minute()) / 60.0
    }

    pub fn ut_hour(&self) -> u32 {
        self.utc.hour()
    }

    pub fn civil_ut_offset(&self) -> i32 {
        civil_ut_offset(self.local.hour(), self.utc.hour())
    }

    pub fn sidereal_offset(&self) -> f64 {
        sidereal_offset(&self.local, &self.sidereal_local)
    }
}

/// Integer-hour offset between the civil clock and UT, derived from the two
/// hour fields alone. The wraparound branch reduces the local hour mod 12
/// before subtracting; that asymmetry is load-bearing for the dial layout
/// and is kept exactly. Offsets west of Greenwich come out negative, and a
/// midnight-straddling pair may come out as the negative congruent value
/// (callers reduce mod 24 where a positive hour is needed).
pub fn civil_ut_offset(local_hour: u32, ut_hour: u32) -> i32 {
    let local = local_hour as i32;
    let ut = ut_hour as i32;
    if local > ut {
        local % 12 - (ut + 12)
    } else {
        local - ut
    }
}

/// Civil-minus-sidereal offset in decimal hours. Deliberately not reduced
/// to any range: it only ever feeds additive angle terms, where a full-turn
/// surplus cancels out.
pub fn sidereal_offset(local: &NaiveDateTime, sidereal: &SiderealTime) -> f64 {
    f64::from(local.hour()) + f64::from(local.minute()) / 60.0 + f64::from(local.second()) / 3600.0
        - sidereal.decimal_hours()
}

pub fn julian_date(utc: DateTime<Utc>) -> f64 {
    utc.timestamp_millis() as f64 / 86_400_000.0 + UNIX_EPOCH_JD
}

pub fn modified_julian_date(jd: f64) -> f64 {
    jd - MJD_OFFSET
}

/// Greenwich mean sidereal time in hours for a Julian date, from the Meeus
/// polynomial. The equation of the equinoxes is below the dial's minute
/// resolution and is not applied.
pub fn greenwich_sidereal_hours(jd: f64) -> f64 {
    let days = jd - J2000_JD;
    let centuries = days / 36525.0;
    let degrees = 280.46061837
        + 360.98564736629 * days
        + centuries * centuries * (0.000387933 - centuries / 38_710_000.0);
    degrees.rem_euclid(360.0) / 15.0
}

pub fn greenwich_sidereal(utc: DateTime<Utc>) -> SiderealTime {
    SiderealTime::from_decimal_hours(greenwich_sidereal_hours(julian_date(utc)))
}

/// Local sidereal time: Greenwich sidereal time shifted by the site
/// longitude at 15 degrees per hour (west-negative longitudes subtract).
pub fn local_sidereal(utc: DateTime<Utc>, longitude_deg: f64) -> SiderealTime {
    let hours = greenwich_sidereal_hours(julian_date(utc)) + longitude_deg / 15.0;
    SiderealTime::from_decimal_hours(hours)
}
