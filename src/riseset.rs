/// Wall-clock reading for one horizon crossing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HourMinute {
    pub hour: u32,
    pub minute: u32,
}

impl HourMinute {
    pub fn decimal_hours(&self) -> f64 {
        f64::from(self.hour) + f64::from(self.minute) / 60.0
    }

    pub fn hh_mm(&self) -> String {
        format!("{:02}:{:02}", self.hour, self.minute)
    }
}

/// Solar events for the current date in UT, as delivered by the rise/set
/// source. Polar day, polar night and every provider error collapse to
/// `Absent`; the dial then simply omits the marks and shading.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SunTimes {
    Present {
        sunrise: HourMinute,
        sunset: HourMinute,
    },
    Absent,
}

/// Both events shifted into the civil clock.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LocalSunEvents {
    pub sunrise: HourMinute,
    pub sunset: HourMinute,
}

/// Shift one UT event by the integer civil offset, wrapping into [0, 24).
/// Minutes ride along unchanged since the offset is whole hours.
pub fn localize_event(event: HourMinute, civil_ut_offset: i32) -> HourMinute {
    let hour = (event.hour as i32 + civil_ut_offset).rem_euclid(24) as u32;
    HourMinute {
        hour,
        minute: event.minute,
    }
}

pub fn localize(times: &SunTimes, civil_ut_offset: i32) -> Option<LocalSunEvents> {
    match times {
        SunTimes::Present { sunrise, sunset } => Some(LocalSunEvents {
            sunrise: localize_event(*sunrise, civil_ut_offset),
            sunset: localize_event(*sunset, civil_ut_offset),
        }),
        SunTimes::Absent => None,
    }
}

/// Angular span of the night wedge in degrees, measured from sunset
/// forward through the hours to sunrise.
pub fn night_extent_deg(sunrise_angle_deg: f64, sunset_angle_deg: f64) -> f64 {
    (sunrise_angle_deg - sunset_angle_deg).rem_euclid(360.0)
}

/// Whole hours of night between the localized event hours; informational
/// only. Callers substitute 0 when the events are absent.
pub fn night_length_hours(sunrise_hour: u32, sunset_hour: u32) -> u32 {
    (sunrise_hour as i64 + 24 - sunset_hour as i64).rem_euclid(24) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn localization_wraps_negative_offsets_into_the_day() {
        let event = HourMinute { hour: 1, minute: 42 };
        let local = localize_event(event, -5);
        assert_eq!(local.hour, 20);
        assert_eq!(local.minute, 42);
    }

    #[test]
    fn localization_wraps_past_midnight_going_east() {
        let event = HourMinute {
            hour: 22,
            minute: 10,
        };
        let local = localize_event(event, 9);
        assert_eq!(local.hour, 7);
        assert_eq!(local.minute, 10);
    }

    #[test]
    fn absent_times_localize_to_nothing() {
        assert_eq!(localize(&SunTimes::Absent, -5), None);
    }

    #[test]
    fn both_events_shift_together() {
        let times = SunTimes::Present {
            sunrise: HourMinute {
                hour: 10,
                minute: 30,
            },
            sunset: HourMinute { hour: 1, minute: 5 },
        };
        let local = localize(&times, -5).expect("events present");
        assert_eq!(local.sunrise.hour, 5);
        assert_eq!(local.sunset.hour, 20);
        assert_eq!(local.sunset.hh_mm(), "20:05");
    }

    #[test]
    fn night_extent_wraps_through_midnight() {
        // Sunset at 280 degrees of dial angle, sunrise at 10: the night
        // wedge covers the 90 degrees between them, not the complement.
        let extent = night_extent_deg(10.0, 280.0);
        assert!((extent - 90.0).abs() < 1e-9);
    }

    #[test]
    fn night_length_counts_evening_to_morning() {
        assert_eq!(night_length_hours(5, 20), 9);
        assert_eq!(night_length_hours(7, 16), 15);
        assert_eq!(night_length_hours(0, 0), 0);
    }
}
