use std::f64::consts::{FRAC_PI_2, PI};

use chrono::Timelike;

use crate::angles::{self, DialGeometry, HOUR_STEP};
use crate::bodies::{self, BodyId, SkyState};
use crate::phase;
use crate::riseset::{self, SunTimes};
use crate::scene::{self, DialScene, Point};
use crate::timebase::{SiderealTime, TimeSample};

const HOUR_NUMBER_RADIUS: f64 = 0.92;
const HOUR_TICK_INNER: f64 = 0.81;
const HOUR_TICK_OUTER: f64 = 0.84;
const SIDEREAL_NUMBER_RADIUS: f64 = 0.74;
const SIDEREAL_TICK_INNER: f64 = 0.65;
const SIDEREAL_TICK_OUTER: f64 = 0.67;
const LOCAL_HAND_RADIUS: f64 = 0.9;
const UT_HAND_RADIUS: f64 = 0.8;
const SIDEREAL_HAND_RADIUS: f64 = 0.6;
const HORIZON_RADIUS: f64 = 0.7;
const EVENT_MARK_INNER: f64 = 0.5;
const EVENT_MARK_OUTER: f64 = 0.7;
const CROSSHAIR_RADIUS: f64 = 0.15;
const CROSSHAIR_GLYPH_RADIUS: f64 = 0.17;

/// Everything one tick needs, captured up front. The computation below is
/// pure: the same input always yields the same primitive list.
#[derive(Clone, Debug, PartialEq)]
pub struct TickInput {
    pub time: TimeSample,
    pub sky: SkyState,
    pub previous_moon_fraction: f64,
    pub sun_times: SunTimes,
    pub geometry: DialGeometry,
    pub font_size: f32,
}

/// Angle of the sidereal hand: the sidereal clock reading mapped like an
/// hour hand, then rotated by the civil-minus-sidereal offset so it lines
/// up with local hours on the shared face.
pub fn sidereal_hand_angle(sidereal: &SiderealTime, sidereal_offset: f64) -> f64 {
    angles::hour_angle(f64::from(sidereal.hour) + f64::from(sidereal.minute) / 60.0)
        + sidereal_offset * HOUR_STEP
}

/// Build the full scene for one tick, in paint order: night shading and
/// rise/set marks underneath, then the sidereal ring, the static face, the
/// quarter crosshairs, the hands and horizon, and the bodies on top.
pub fn compute_tick(input: &TickInput) -> DialScene {
    let mut scene = DialScene::default();
    let sidereal_offset = input.time.sidereal_offset();
    let hand_angle = sidereal_hand_angle(&input.time.sidereal_local, sidereal_offset);

    night_layer(&mut scene, input);
    sidereal_ring(&mut scene, input, hand_angle);
    static_face(&mut scene, input);
    quarter_crosshairs(&mut scene, input, sidereal_offset);

    let center = input.geometry.center();
    let local_hours = input.time.local_hand_hours();
    scene.hand(
        center,
        position(input, angles::hour_angle(local_hours), LOCAL_HAND_RADIUS),
        scene::DIAL_PURPLE,
        4.0,
    );
    horizon(&mut scene, input, local_hours);

    let ut_hours = f64::from(input.time.ut_hour()) + f64::from(input.time.local.minute()) / 60.0;
    scene.hand(
        center,
        position(input, angles::hour_angle(ut_hours), UT_HAND_RADIUS),
        scene::UT_RED,
        4.0,
    );
    scene.hand(
        center,
        position(input, hand_angle, SIDEREAL_HAND_RADIUS),
        scene::SIDEREAL_BLUE,
        5.0,
    );

    body_glyphs(&mut scene, input, sidereal_offset);
    scene
}

fn position(input: &TickInput, angle: f64, radius_fraction: f64) -> Point {
    angles::point_on_circle(&input.geometry, angle, radius_fraction)
}

/// Night wedge from sunset forward to sunrise, plus the two green event
/// marks. Skipped entirely when the day's events are absent.
fn night_layer(scene: &mut DialScene, input: &TickInput) {
    let offset = input.time.civil_ut_offset();
    let Some(events) = riseset::localize(&input.sun_times, offset) else {
        return;
    };
    let sunrise_angle = angles::hour_angle(events.sunrise.decimal_hours());
    let sunset_angle = angles::hour_angle(events.sunset.decimal_hours());
    let extent = riseset::night_extent_deg(sunrise_angle.to_degrees(), sunset_angle.to_degrees());

    scene.wedge(
        input.geometry.center(),
        input.geometry.half_width(),
        sunrise_angle,
        extent,
        scene::NIGHT_SHADE,
    );
    for angle in [sunrise_angle, sunset_angle] {
        scene.segment(
            position(input, angle, EVENT_MARK_INNER),
            position(input, angle, EVENT_MARK_OUTER),
            scene::EVENT_GREEN,
            2.0,
        );
    }
}

/// Rotating inner ring: 24 sidereal hour numbers with their ticks. The
/// ring base angle backs the minute fraction out of the hand angle so the
/// current sidereal hour number sits where the hand points.
fn sidereal_ring(scene: &mut DialScene, input: &TickInput, hand_angle: f64) {
    let sidereal = &input.time.sidereal_local;
    let base = hand_angle - f64::from(sidereal.minute) / 60.0 * HOUR_STEP;
    for i in 0..24 {
        let angle = base + f64::from(i) * HOUR_STEP;
        let label = (sidereal.hour + i) % 24;
        scene.glyph(
            position(input, angle, SIDEREAL_NUMBER_RADIUS),
            label.to_string(),
            scene::SIDEREAL_BLUE,
            input.font_size,
        );
        scene.segment(
            position(input, angle, SIDEREAL_TICK_INNER),
            position(input, angle, SIDEREAL_TICK_OUTER),
            scene::SIDEREAL_BLUE,
            1.0,
        );
    }
}

/// Fixed face: outer circle, 24 hour numbers, 48 half-hour ticks with the
/// whole-hour ticks drawn heavier.
fn static_face(scene: &mut DialScene, input: &TickInput) {
    scene.circle(
        input.geometry.center(),
        input.geometry.half_width(),
        scene::DIAL_PURPLE,
        3.0,
    );
    for hour in 0..24u32 {
        scene.glyph(
            position(
                input,
                angles::hour_angle(f64::from(hour)),
                HOUR_NUMBER_RADIUS,
            ),
            hour.to_string(),
            scene::INK,
            input.font_size,
        );
    }
    for i in 0..48u32 {
        let angle = angles::hour_angle(f64::from(i) * 0.5);
        let width = if i % 2 == 0 { 3.0 } else { 1.0 };
        scene.segment(
            position(input, angle, HOUR_TICK_INNER),
            position(input, angle, HOUR_TICK_OUTER),
            scene::INK,
            width,
        );
    }
}

/// Lunar quarter crosshairs: four spokes from the center at the new, full,
/// first and third quarter directions relative to the Sun, with "1" and
/// "3" labels on the quadrature spokes.
fn quarter_crosshairs(scene: &mut DialScene, input: &TickInput, sidereal_offset: f64) {
    let center = input.geometry.center();
    let base = angles::ra_angle(input.sky.sun.ra_deg, sidereal_offset);
    for offset in [0.0, PI, FRAC_PI_2, -FRAC_PI_2] {
        scene.segment(
            center,
            position(input, base + offset, CROSSHAIR_RADIUS),
            scene::INK,
            1.0,
        );
    }
    scene.glyph(
        position(
            input,
            angles::ra_angle(input.sky.sun.ra_deg + 90.0, sidereal_offset),
            CROSSHAIR_GLYPH_RADIUS,
        ),
        "1",
        scene::INK,
        input.font_size,
    );
    scene.glyph(
        position(
            input,
            angles::ra_angle(input.sky.sun.ra_deg - 90.0, sidereal_offset),
            CROSSHAIR_GLYPH_RADIUS,
        ),
        "3",
        scene::INK,
        input.font_size,
    );
}

/// Local horizon: the two directions six hours either side of now.
fn horizon(scene: &mut DialScene, input: &TickInput, local_hours: f64) {
    let center = input.geometry.center();
    for hours in [local_hours + 6.0, local_hours - 6.0] {
        scene.segment(
            center,
            position(input, angles::hour_angle(hours), HORIZON_RADIUS),
            scene::SOFT_GREY,
            1.0,
        );
    }
}

fn body_glyphs(scene: &mut DialScene, input: &TickInput, sidereal_offset: f64) {
    for body in bodies::DRAW_ORDER {
        let state = input.sky.body(body);
        let (radius, slot_color) = bodies::placement(body, state, &input.sky.sun);
        let color = if body == BodyId::Moon {
            phase::moon_shade(input.sky.moon_fraction)
        } else {
            slot_color
        };
        scene.glyph(
            position(input, angles::ra_angle(state.ra_deg, sidereal_offset), radius),
            body.glyph(),
            color,
            input.font_size,
        );
    }
}
