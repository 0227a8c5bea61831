use serde::Serialize;

use crate::dial::TickInput;
use crate::phase::PhaseTrend;
use crate::riseset;
use crate::timebase;

/// Text panel beside the dial: every derived clock reading for the tick,
/// formatted once so the GUI, diagnostics report and scene dump all show
/// the same values.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Readouts {
    pub site_name: String,
    pub friendly_date: String,
    pub file_prefix: String,
    pub local_hhmm: String,
    pub sidereal_local_hhmm: String,
    pub ut_hhmm: String,
    pub sidereal_greenwich_hhmm: String,
    pub julian_date: f64,
    pub modified_julian_date: f64,
    pub sunrise: Option<String>,
    pub sunset: Option<String>,
    pub night_length_hours: u32,
    pub moon_illumination_pct: f64,
    pub moon_trend: PhaseTrend,
}

impl Readouts {
    pub fn illumination_line(&self) -> String {
        let word = self.moon_trend.word();
        if word.is_empty() {
            format!("Moon Illumination: {:.1}%", self.moon_illumination_pct)
        } else {
            format!(
                "Moon Illumination: {:.1}% {}",
                self.moon_illumination_pct, word
            )
        }
    }
}

pub fn build(input: &TickInput, site_name: &str) -> Readouts {
    let time = &input.time;
    let jd = timebase::julian_date(time.utc);
    let events = riseset::localize(&input.sun_times, time.civil_ut_offset());
    Readouts {
        site_name: site_name.to_string(),
        friendly_date: time.local.format("%A, %d. %B %Y %I:%M%p").to_string(),
        file_prefix: time.utc.format("%Y%m%d").to_string(),
        local_hhmm: time.local.format("%H:%M").to_string(),
        sidereal_local_hhmm: time.sidereal_local.hh_mm(),
        ut_hhmm: time.utc.format("%H:%M").to_string(),
        sidereal_greenwich_hhmm: time.sidereal_greenwich.hh_mm(),
        julian_date: jd,
        modified_julian_date: timebase::modified_julian_date(jd),
        sunrise: events.map(|e| e.sunrise.hh_mm()),
        sunset: events.map(|e| e.sunset.hh_mm()),
        night_length_hours: events
            .map_or(0, |e| riseset::night_length_hours(e.sunrise.hour, e.sunset.hour)),
        moon_illumination_pct: input.sky.moon_fraction * 100.0,
        moon_trend: PhaseTrend::from_fractions(
            input.sky.moon_fraction,
            input.previous_moon_fraction,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::angles::DialGeometry;
    use crate::bodies::{BodyState, SkyState};
    use crate::riseset::{HourMinute, SunTimes};
    use crate::timebase::{SiderealTime, TimeSample};
    use chrono::{NaiveDate, TimeZone, Utc};

    fn body(ra_deg: f64, distance_au: f64) -> BodyState {
        BodyState {
            ra_deg,
            distance_au,
        }
    }

    fn input_with(sun_times: SunTimes) -> TickInput {
        let utc = Utc
            .with_ymd_and_hms(2026, 3, 1, 1, 30, 0)
            .single()
            .expect("valid instant");
        let local = NaiveDate::from_ymd_opt(2026, 2, 28)
            .expect("valid date")
            .and_hms_opt(20, 30, 0)
            .expect("valid time");
        TickInput {
            time: TimeSample {
                local,
                utc,
                sidereal_local: SiderealTime {
                    hour: 4,
                    minute: 15,
                    second: 30.0,
                },
                sidereal_greenwich: SiderealTime {
                    hour: 9,
                    minute: 26,
                    second: 38.0,
                },
            },
            sky: SkyState {
                sun: body(150.0, 1.01),
                moon: body(60.0, 0.0026),
                mercury: body(140.0, 0.7),
                venus: body(120.0, 1.2),
                mars: body(200.0, 1.5),
                jupiter: body(50.0, 5.0),
                saturn: body(320.0, 9.6),
                uranus: body(40.0, 19.0),
                neptune: body(0.0, 30.0),
                moon_fraction: 0.5,
            },
            previous_moon_fraction: 0.4,
            sun_times,
            geometry: DialGeometry::square(420.0),
            font_size: 16.0,
        }
    }

    fn present_times() -> SunTimes {
        SunTimes::Present {
            sunrise: HourMinute {
                hour: 11,
                minute: 42,
            },
            sunset: HourMinute {
                hour: 23,
                minute: 5,
            },
        }
    }

    #[test]
    fn clock_strings_come_from_one_instant() {
        let readouts = build(&input_with(present_times()), "Stull Observatory");
        assert_eq!(readouts.local_hhmm, "20:30");
        assert_eq!(readouts.ut_hhmm, "01:30");
        assert_eq!(readouts.sidereal_local_hhmm, "04:15");
        assert_eq!(readouts.sidereal_greenwich_hhmm, "09:26");
        assert_eq!(readouts.file_prefix, "20260301");
        assert_eq!(
            readouts.friendly_date,
            "Saturday, 28. February 2026 08:30PM"
        );
    }

    #[test]
    fn julian_dates_match_the_instant() {
        let readouts = build(&input_with(present_times()), "Stull Observatory");
        assert!((readouts.julian_date - 2461100.5625).abs() < 1e-6);
        assert!((readouts.modified_julian_date - 61100.0625).abs() < 1e-6);
    }

    #[test]
    fn localized_events_feed_the_rise_set_lines() {
        let readouts = build(&input_with(present_times()), "Stull Observatory");
        assert_eq!(readouts.sunrise.as_deref(), Some("06:42"));
        assert_eq!(readouts.sunset.as_deref(), Some("18:05"));
        assert_eq!(readouts.night_length_hours, 12);
    }

    #[test]
    fn absent_events_blank_the_lines_and_zero_the_night() {
        let readouts = build(&input_with(SunTimes::Absent), "Stull Observatory");
        assert_eq!(readouts.sunrise, None);
        assert_eq!(readouts.sunset, None);
        assert_eq!(readouts.night_length_hours, 0);
    }

    #[test]
    fn illumination_line_carries_the_trend_word() {
        let readouts = build(&input_with(SunTimes::Absent), "Stull Observatory");
        assert_eq!(readouts.illumination_line(), "Moon Illumination: 50.0% waxing");

        let mut steady = input_with(SunTimes::Absent);
        steady.previous_moon_fraction = 0.5;
        let readouts = build(&steady, "Stull Observatory");
        assert_eq!(readouts.illumination_line(), "Moon Illumination: 50.0%");
    }
}
