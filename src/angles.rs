use std::f64::consts::{FRAC_PI_2, PI};

use crate::scene::Point;

/// One hour of dial rotation. The full 24-hour face spans 2π, so each hour
/// step is π/12.
pub const HOUR_STEP: f64 = PI / 12.0;

/// Dial angle for an hour-of-day value: 0h points straight up and hours
/// advance clockwise. Callers reduce modulo 24 first when the source value
/// can stray outside a day; the mapping itself stays linear so equal hours
/// land on equal pixels either way.
pub fn hour_angle(hours: f64) -> f64 {
    hours * HOUR_STEP - FRAC_PI_2
}

/// Dial angle for a right ascension in degrees, shifted by an additive hour
/// offset (the civil-minus-sidereal difference that rotates the whole sky).
pub fn ra_angle(ra_deg: f64, offset_hours: f64) -> f64 {
    ra_deg / 15.0 * HOUR_STEP + offset_hours * HOUR_STEP - FRAC_PI_2
}

/// Canvas geometry. The face is always laid out square; width and height
/// are kept as separate half-extents because every radial position scales
/// x by the horizontal one and y by the vertical one.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DialGeometry {
    pub width: f64,
    pub height: f64,
}

impl DialGeometry {
    pub fn square(side: f64) -> Self {
        Self {
            width: side,
            height: side,
        }
    }

    pub fn half_width(&self) -> f64 {
        self.width / 2.0
    }

    pub fn half_height(&self) -> f64 {
        self.height / 2.0
    }

    pub fn center(&self) -> Point {
        Point::new(self.half_width(), self.half_height())
    }
}

/// Pixel position at `radius_fraction` of the half-extent along `angle`.
/// Positive y runs down the canvas, which is what makes increasing angles
/// sweep clockwise on screen.
pub fn point_on_circle(geometry: &DialGeometry, angle: f64, radius_fraction: f64) -> Point {
    let center = geometry.center();
    Point::new(
        center.x + radius_fraction * geometry.half_width() * angle.cos(),
        center.y + radius_fraction * geometry.half_height() * angle.sin(),
    )
}
