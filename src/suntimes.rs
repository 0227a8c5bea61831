use anyhow::Result;
use chrono::{Datelike, NaiveDate};
use solar_positioning::{Horizon, SunriseResult, spa};

use crate::riseset::{HourMinute, SunTimes};

// Delta-T (TT minus UT1) handed to the SPA. A fixed value is fine here: a
// whole second of delta-T moves rise and set by far less than the one
// minute the dial displays.
const DELTA_T_SECONDS: f64 = 69.0;

/// UT sunrise and sunset for the given civil date and site. Polar day and
/// polar night come back as `Absent` rather than errors; genuine SPA
/// failures propagate and the caller degrades the tick.
pub fn sun_times_utc(date: NaiveDate, latitude: f64, longitude: f64) -> Result<SunTimes> {
    let result = spa::sunrise_sunset_utc_for_horizon(
        date.year(),
        date.month(),
        date.day(),
        latitude,
        longitude,
        DELTA_T_SECONDS,
        Horizon::SunriseSunset,
    )?;
    Ok(match result {
        SunriseResult::RegularDay {
            sunrise, sunset, ..
        } => {
            let (_, sunrise_hours) = sunrise.day_and_hours();
            let (_, sunset_hours) = sunset.day_and_hours();
            SunTimes::Present {
                sunrise: hour_minute(sunrise_hours),
                sunset: hour_minute(sunset_hours),
            }
        }
        SunriseResult::AllDay { .. } | SunriseResult::AllNight { .. } => SunTimes::Absent,
    })
}

/// Split decimal hours into the wall-clock reading the dial shows.
fn hour_minute(hours: f64) -> HourMinute {
    let hours = hours.rem_euclid(24.0);
    let hour = hours.floor();
    let minute = ((hours - hour) * 60.0).floor();
    HourMinute {
        hour: hour as u32,
        minute: minute as u32,
    }
}
